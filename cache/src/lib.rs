pub mod error;
pub mod source;
pub mod synchronizer;

pub use error::SyncError;
pub use source::ListSource;
pub use synchronizer::CacheSynchronizer;

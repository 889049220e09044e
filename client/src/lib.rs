pub mod config;
pub mod context;
pub mod error;

pub use config::ClientConfig;
pub use context::{ClientContext, ListView};
pub use error::AppError;

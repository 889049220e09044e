pub mod client;
pub mod dispatcher;
pub mod error;
pub mod types;

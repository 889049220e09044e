pub mod gates;
pub mod manager;
pub mod model;
pub mod token;

pub use manager::SessionManager;
pub use model::{SessionError, SessionStatus};
pub use token::TokenKeeper;

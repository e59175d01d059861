pub mod message;
pub mod item;
pub mod tool;
pub mod article;
pub mod config;
pub mod error;
pub mod state;


pub use error::AgentError;
pub type Result<T> = std::result::Result<T, AgentError>;

pub mod ports;
pub mod tools;
pub mod runtime;
pub mod state;
pub mod agent;
pub mod host;
pub mod news;

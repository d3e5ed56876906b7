pub mod config;
pub mod error;
pub mod server;
pub mod training;

pub use error::{Error, Result};

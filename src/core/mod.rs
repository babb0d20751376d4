

pub mod config;
pub mod error;

pub use config::YeetupConfig;
pub use error::{Result, YeetupError};

pub mod config;
pub mod error;
pub mod types;

pub use config::{config, EngineConfig};
pub use error::{CatodeError, Result};

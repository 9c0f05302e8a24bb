//! Ambient concerns shared by the cfenv crates: the error type, tracing
//! setup and environment-driven configuration.

pub mod config;
pub mod error;
pub mod tracing;

pub use config::{Config, RuntimeConfig};
pub use error::EnvError;

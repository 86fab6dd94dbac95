//! Shared utilities

pub mod config;
pub mod context;
pub mod diagnostic;

pub use config::{Config, ConfigError};
pub use context::{GlobalContext, LoadedProject};
pub use diagnostic::Diagnostic;

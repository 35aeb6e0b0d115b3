//! Logging utilities.
//!
//! The engine only emits through the `log` facade; `init_logging` wires an
//! `env_logger` backend for binaries that do not install their own.

mod init;

pub use init::{init_logging, LoggingConfig};

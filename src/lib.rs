pub mod record;
pub mod binder;
pub mod memory;

#[cfg(feature = "kafka")]
pub mod kafka;

pub mod backend;
pub mod config;
pub mod consumer;
pub mod diagnostics;
pub mod env;
pub mod error;
pub mod init;
pub mod publisher;
pub mod server;

//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the server:
//! configuration resolution, error handling, path authorization, the
//! backend server, and the transport layer.

pub mod config;
pub mod error;
pub mod paths;
pub mod security;
pub mod server;
pub mod transport;

pub use config::{CliArgs, Config, EnvSnapshot};
pub use error::{Error, Result};
pub use security::{RootError, RootSet};
pub use server::FilesystemServer;
pub use transport::{TransportKind, TransportService};

//! Configuration resolution for the filesystem MCP server.
//!
//! Configuration is merged from three layers with fixed precedence:
//! command-line flags, then environment variables, then built-in
//! defaults. The resolver is a pure function over a [`CliArgs`] value and
//! an [`EnvSnapshot`], so tests never have to touch the process
//! environment. Malformed durations, booleans, and transport names
//! degrade to their defaults with a warning; the only fatal resolution
//! error is an empty allowed-directory list.

use std::collections::HashMap;
use std::time::Duration;

use clap::Parser;
use tracing::warn;

use super::error::{Error, Result};
use super::paths::{clean_relative_path, clean_url_path, collect_allowed_dirs};
use super::transport::{SseSettings, StreamableHttpSettings, TransportKind};

/// Fallback bind address for network transports.
pub const DEFAULT_ADDR: &str = ":8080";

/// Default path prefix for HTTP endpoints.
pub const DEFAULT_BASE_PATH: &str = "/mcp";

/// Default graceful-shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_SECS: u64 = 10;

/// Command-line arguments.
///
/// Every flag is optional so that precedence over environment variables
/// is decided in [`Config::resolve`], not by clap defaults.
#[derive(Debug, Default, Parser)]
#[command(name = "fs-mcp-server", version, about = "Filesystem MCP server")]
pub struct CliArgs {
    /// Transport to use: stdio, sse, or streamable-http.
    #[arg(long)]
    pub transport: Option<String>,

    /// Address for network transports (sse or streamable-http).
    #[arg(long)]
    pub addr: Option<String>,

    /// Public base URL used when advertising message endpoints (SSE).
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Base path prefix for HTTP endpoints.
    #[arg(long = "base-path")]
    pub base_path: Option<String>,

    /// Relative SSE endpoint path (default /sse).
    #[arg(long = "sse-path")]
    pub sse_path: Option<String>,

    /// Relative message endpoint path (default /message).
    #[arg(long = "message-path")]
    pub message_path: Option<String>,

    /// Comma, semicolon, or newline separated list of allowed directories.
    #[arg(long = "allowed-dirs")]
    pub allowed_dirs: Option<String>,

    /// Interval for SSE keep-alive pings in seconds (0 to disable).
    #[arg(long = "sse-keepalive", value_name = "SECONDS")]
    pub sse_keepalive: Option<u64>,

    /// Graceful shutdown timeout for network transports, in seconds.
    #[arg(long = "shutdown-timeout", value_name = "SECONDS")]
    pub shutdown_timeout: Option<u64>,

    /// Include the full base URL in SSE message endpoint events.
    #[arg(long = "sse-use-full-url", value_name = "BOOL")]
    pub sse_use_full_url: Option<bool>,

    /// Allowed directories.
    #[arg(value_name = "DIR")]
    pub dirs: Vec<String>,
}

/// An immutable snapshot of the process environment.
///
/// Captured once at startup and passed to the resolver, so configuration
/// resolution is deterministic and testable without `set_var`.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// An empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Return a snapshot with one additional variable set.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Raw value of a variable, if present.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Trimmed, non-empty value of a variable. Whitespace-only values
    /// count as unset, matching how the flags treat them.
    fn string(&self, key: &str) -> Option<String> {
        self.raw(key)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// Parse a variable as whole seconds, keeping `fallback` on malformed
    /// input with a single warning.
    fn seconds(&self, key: &str, fallback: u64) -> u64 {
        let Some(raw) = self.string(key) else {
            return fallback;
        };
        match raw.parse::<u64>() {
            Ok(secs) => secs,
            Err(_) => {
                warn!("Invalid duration in {}={:?}, using {}s", key, raw, fallback);
                fallback
            }
        }
    }

    /// Parse a variable as a boolean, keeping `fallback` on malformed
    /// input with a single warning.
    fn boolean(&self, key: &str, fallback: bool) -> bool {
        let Some(raw) = self.string(key) else {
            return fallback;
        };
        match parse_bool(&raw) {
            Some(value) => value,
            None => {
                warn!("Invalid boolean in {}={:?}, using {}", key, raw, fallback);
                fallback
            }
        }
    }
}

/// Parse the accepted boolean spellings, case-insensitively.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

/// Resolved run-time configuration.
///
/// Built exactly once at process start and never mutated afterward.
#[derive(Debug, Clone)]
pub struct Config {
    /// Selected transport.
    pub transport: TransportKind,

    /// Bind address for network transports.
    pub addr: String,

    /// Public base URL for advertised endpoints.
    pub base_url: String,

    /// Path prefix for HTTP endpoints.
    pub base_path: String,

    /// Relative SSE endpoint path; empty means the transport default.
    pub sse_path: String,

    /// Relative message endpoint path; empty means the transport default.
    pub message_path: String,

    /// SSE keep-alive interval, disabled when `None`.
    pub sse_keep_alive: Option<Duration>,

    /// Graceful-shutdown deadline for network transports.
    pub shutdown_timeout: Duration,

    /// Advertise the full base URL in SSE endpoint events.
    pub use_full_url: bool,

    /// Ordered, deduplicated allowed directory roots.
    pub allowed_dirs: Vec<String>,
}

impl Config {
    /// Merge flags, environment, and defaults into one configuration.
    ///
    /// Fails only when the merged allowed-directory list is empty; every
    /// other problem is absorbed with a default and a warning.
    pub fn resolve(args: CliArgs, env: &EnvSnapshot) -> Result<Self> {
        let transport_raw = args
            .transport
            .or_else(|| env.string("MCP_TRANSPORT"))
            .unwrap_or_default();
        let transport = TransportKind::parse_lenient(&transport_raw);

        let mut addr = args
            .addr
            .or_else(|| env.string("MCP_ADDR"))
            .unwrap_or_default()
            .trim()
            .to_string();

        let base_url = args
            .base_url
            .or_else(|| env.string("MCP_BASE_URL"))
            .unwrap_or_default()
            .trim()
            .to_string();

        let base_path = clean_url_path(
            &args
                .base_path
                .or_else(|| env.string("MCP_BASE_PATH"))
                .unwrap_or_else(|| DEFAULT_BASE_PATH.to_string()),
        );

        let sse_path = clean_relative_path(
            &args
                .sse_path
                .or_else(|| env.string("MCP_SSE_PATH"))
                .unwrap_or_default(),
        );

        let message_path = clean_relative_path(
            &args
                .message_path
                .or_else(|| env.string("MCP_MESSAGE_PATH"))
                .unwrap_or_default(),
        );

        let keep_alive_secs = args
            .sse_keepalive
            .unwrap_or_else(|| env.seconds("MCP_SSE_KEEPALIVE", 0));
        let sse_keep_alive = (keep_alive_secs > 0).then(|| Duration::from_secs(keep_alive_secs));

        let shutdown_secs = args
            .shutdown_timeout
            .unwrap_or_else(|| env.seconds("MCP_SHUTDOWN_TIMEOUT", DEFAULT_SHUTDOWN_SECS));
        let shutdown_timeout = Duration::from_secs(shutdown_secs);

        let use_full_url = args
            .sse_use_full_url
            .unwrap_or_else(|| env.boolean("MCP_SSE_USE_FULL_URL", true));

        let primary_list = args
            .allowed_dirs
            .or_else(|| env.string("MCP_ALLOWED_DIRECTORIES"));
        let additional_list = env.string("MCP_ADDITIONAL_DIRECTORIES");
        let allowed_dirs = collect_allowed_dirs(
            &args.dirs,
            primary_list.as_deref(),
            additional_list.as_deref(),
        );

        if allowed_dirs.is_empty() {
            return Err(Error::config(
                "no allowed directories configured; pass directories as positional \
                 arguments, use --allowed-dirs, or set MCP_ALLOWED_DIRECTORIES",
            ));
        }

        // Network transports cannot serve without an address.
        if !transport.is_stdio() && addr.is_empty() {
            addr = DEFAULT_ADDR.to_string();
        }

        Ok(Self {
            transport,
            addr,
            base_url,
            base_path,
            sse_path,
            message_path,
            sse_keep_alive,
            shutdown_timeout,
            use_full_url,
            allowed_dirs,
        })
    }

    /// Settings for the SSE transport, with endpoint-path defaults applied.
    pub fn sse_settings(&self) -> SseSettings {
        SseSettings {
            addr: self.addr.clone(),
            base_url: self.base_url.clone(),
            base_path: self.base_path.clone(),
            sse_path: if self.sse_path.is_empty() {
                "/sse".to_string()
            } else {
                self.sse_path.clone()
            },
            message_path: if self.message_path.is_empty() {
                "/message".to_string()
            } else {
                self.message_path.clone()
            },
            keep_alive: self.sse_keep_alive,
            use_full_url: self.use_full_url,
        }
    }

    /// Settings for the streamable HTTP transport.
    pub fn streamable_http_settings(&self) -> StreamableHttpSettings {
        StreamableHttpSettings {
            addr: self.addr.clone(),
            base_path: if self.base_path.is_empty() {
                DEFAULT_BASE_PATH.to_string()
            } else {
                self.base_path.clone()
            },
        }
    }
}

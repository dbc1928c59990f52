//! End-to-end tests for the server binary.

use std::process::Command;

use anyhow::Result;

/// With no positional directories, no --allowed-dirs, and no directory
/// environment variables, the process must exit non-zero with a
/// diagnostic before any transport is started.
#[test]
fn exits_with_error_when_no_directories_configured() -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_fs_mcp_server"))
        .env_remove("MCP_ALLOWED_DIRECTORIES")
        .env_remove("MCP_ADDITIONAL_DIRECTORIES")
        .output()?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no allowed directories"),
        "unexpected stderr: {stderr}"
    );
    Ok(())
}

/// A missing allowed directory fails backend construction, after
/// configuration resolution succeeded.
#[test]
fn exits_with_error_when_directory_does_not_exist() -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_fs_mcp_server"))
        .env_remove("MCP_ALLOWED_DIRECTORIES")
        .env_remove("MCP_ADDITIONAL_DIRECTORIES")
        .arg("/nonexistent/path/12345")
        .output()?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to create server"),
        "unexpected stderr: {stderr}"
    );
    Ok(())
}

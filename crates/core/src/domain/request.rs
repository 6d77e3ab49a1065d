// Execution Request (input value object)

use super::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single shell command to run, plus an optional working directory.
///
/// Transient: built per invocation and dropped once the executor returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Full command line, handed verbatim to the shell interpreter
    pub command: String,

    /// Child working directory; `None` inherits the caller's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
}

impl ExecutionRequest {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            working_dir: None,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Reject empty and whitespace-only commands
    pub fn validate(&self) -> Result<()> {
        if self.command.trim().is_empty() {
            return Err(DomainError::EmptyCommand);
        }
        Ok(())
    }

    /// First whitespace-delimited token of the command line.
    ///
    /// This is the name checked against the search path before spawning.
    /// Shell syntax is not parsed, so `FOO=1 env` yields `FOO=1`.
    pub fn program_name(&self) -> Result<&str> {
        self.command
            .split_whitespace()
            .next()
            .ok_or(DomainError::EmptyCommand)
    }
}

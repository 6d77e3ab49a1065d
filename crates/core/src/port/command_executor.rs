// Command Executor Port
// Abstraction for running one shell command to completion

use crate::application::cancel::CancelSignal;
use crate::domain::{DomainError, ExecutionRequest, ExecutionResult};
use async_trait::async_trait;
use thiserror::Error;

/// Execution errors
///
/// Every variant is terminal for the call: there is no partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("The command cannot be empty")]
    EmptyCommand,

    #[error("The command '{command}' was not found")]
    ExecutableNotFound { command: String },

    #[error("Command '{command}' failed: {error}")]
    ExecutionFailed {
        command: String,
        /// Underlying failure, e.g. `exit status 1` or an OS error
        error: String,
        /// Captured stderr (empty when the process never started)
        stderr: String,
    },

    #[error("Command '{command}' was cancelled")]
    Cancelled { command: String },
}

impl ExecutionError {
    /// Machine-readable category
    pub fn category(&self) -> &'static str {
        match self {
            ExecutionError::EmptyCommand => "empty_command",
            ExecutionError::ExecutableNotFound { .. } => "executable_not_found",
            ExecutionError::ExecutionFailed { .. } => "execution_failed",
            ExecutionError::Cancelled { .. } => "cancelled",
        }
    }
}

impl From<DomainError> for ExecutionError {
    fn from(_: DomainError) -> Self {
        // The only request-level domain rule is a non-empty command
        ExecutionError::EmptyCommand
    }
}

/// Command Executor trait
///
/// Implementations:
/// - ShellExecutor: validates, resolves the program, runs `sh -c`
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run the request to completion and capture its output
    ///
    /// # Errors
    /// - ExecutionError::EmptyCommand if the command is blank
    /// - ExecutionError::ExecutableNotFound if the first token is not on the search path
    /// - ExecutionError::ExecutionFailed on spawn failure or non-zero exit
    /// - ExecutionError::Cancelled if `cancel` fires before the process exits
    async fn execute(
        &self,
        request: &ExecutionRequest,
        cancel: CancelSignal,
    ) -> Result<ExecutionResult, ExecutionError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock executor behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Succeed with the given stdout/stderr
        Success { stdout: String, stderr: String },
        /// Always fail with the given error
        Fail(ExecutionError),
        /// Block until the cancel signal fires
        WaitForCancel,
    }

    /// Mock Command Executor for testing
    pub struct MockCommandExecutor {
        behavior: Arc<Mutex<MockBehavior>>,
        requests: Arc<Mutex<Vec<ExecutionRequest>>>,
    }

    impl MockCommandExecutor {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn new_success(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
            Self::new(MockBehavior::Success {
                stdout: stdout.into(),
                stderr: stderr.into(),
            })
        }

        pub fn new_fail(error: ExecutionError) -> Self {
            Self::new(MockBehavior::Fail(error))
        }

        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        pub fn requests(&self) -> Vec<ExecutionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandExecutor for MockCommandExecutor {
        async fn execute(
            &self,
            request: &ExecutionRequest,
            mut cancel: CancelSignal,
        ) -> Result<ExecutionResult, ExecutionError> {
            self.requests.lock().unwrap().push(request.clone());

            let behavior = self.behavior.lock().unwrap().clone();

            match behavior {
                MockBehavior::Success { stdout, stderr } => {
                    Ok(ExecutionResult::new(stdout, stderr))
                }
                MockBehavior::Fail(err) => Err(err),
                MockBehavior::WaitForCancel => {
                    cancel.cancelled().await;
                    Err(ExecutionError::Cancelled {
                        command: request.command.clone(),
                    })
                }
            }
        }
    }
}

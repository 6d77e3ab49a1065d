// Execution errors -> attribute-scoped diagnostics

use crate::application::constants::*;
use crate::domain::{AttributePath, Diagnostic};
use crate::error::AppError;
use crate::port::ExecutionError;

/// Map an execution failure onto a diagnostic scoped to `command`
pub fn from_execution_error(err: &ExecutionError) -> Diagnostic {
    let (summary, detail) = match err {
        ExecutionError::EmptyCommand => (
            SUMMARY_MISSING_COMMAND,
            "The command cannot be empty. Please specify a valid shell command.".to_string(),
        ),
        ExecutionError::ExecutableNotFound { command } => (
            SUMMARY_COMMAND_NOT_FOUND,
            format!(
                "The command '{}' was not found. Ensure it's installed and accessible.",
                command
            ),
        ),
        ExecutionError::ExecutionFailed {
            command,
            error,
            stderr,
        } => (
            SUMMARY_EXECUTION_FAILED,
            format!(
                "Command execution failed.\n\nCommand: {}\nError: {}\nStderr: {}",
                command, error, stderr
            ),
        ),
        ExecutionError::Cancelled { command } => (
            SUMMARY_CANCELLED,
            format!(
                "Command execution was cancelled before completion.\n\nCommand: {}",
                command
            ),
        ),
    };

    Diagnostic::error(err.category(), summary, detail).at(AttributePath::root(COMMAND_ATTRIBUTE))
}

/// Map a configuration decoding failure (not scoped to an attribute)
pub fn from_config_error(err: &AppError) -> Diagnostic {
    match err {
        AppError::Execution(e) => from_execution_error(e),
        other => Diagnostic::error(
            CATEGORY_INVALID_CONFIG,
            SUMMARY_INVALID_CONFIG,
            other.to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_failed_detail_embeds_stderr() {
        let diag = from_execution_error(&ExecutionError::ExecutionFailed {
            command: "ls /nope".to_string(),
            error: "exit status 2".to_string(),
            stderr: "ls: cannot access '/nope'".to_string(),
        });

        assert_eq!(diag.summary, "Command Execution Failed");
        assert_eq!(diag.category, "execution_failed");
        assert_eq!(
            diag.detail,
            "Command execution failed.\n\nCommand: ls /nope\nError: exit status 2\nStderr: ls: cannot access '/nope'"
        );
        assert_eq!(diag.attribute, Some(AttributePath::root("command")));
    }

    #[test]
    fn test_not_found_references_command() {
        let diag = from_execution_error(&ExecutionError::ExecutableNotFound {
            command: "nonexistent-binary-xyz --flag".to_string(),
        });

        assert_eq!(diag.summary, "Command Not Found");
        assert!(diag.detail.contains("'nonexistent-binary-xyz --flag'"));
    }

    #[test]
    fn test_config_error_has_no_attribute() {
        let err = AppError::Config("bad".to_string());
        let diag = from_config_error(&err);

        assert_eq!(diag.summary, "Invalid Configuration");
        assert!(diag.attribute.is_none());
        assert!(diag.is_error());
    }
}

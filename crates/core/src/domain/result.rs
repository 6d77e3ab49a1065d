// Execution Result (output value object, success only)

use serde::{Deserialize, Serialize};

/// Synthetic key reported for every successful read
pub const RESULT_ID: &str = "-";

/// Fully captured output of a command that exited with status 0
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub id: String,
}

impl ExecutionResult {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            id: RESULT_ID.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_always_dash() {
        let result = ExecutionResult::new("out", "err");
        assert_eq!(result.id, "-");
        assert_eq!(result.stdout, "out");
        assert_eq!(result.stderr, "err");
    }
}

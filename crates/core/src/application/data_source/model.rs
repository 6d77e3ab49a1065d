// Command data source model (config in, state out)

use crate::domain::{DomainError, ExecutionRequest, ExecutionResult};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Decoded configuration and, after a successful read, the resulting state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDataSourceModel {
    pub command: String,

    #[serde(default)]
    pub working_dir: Option<String>,

    #[serde(default)]
    pub output: Option<String>,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub id: Option<String>,
}

impl CommandDataSourceModel {
    /// Decode a configuration object
    ///
    /// Computed attributes supplied by the caller are ignored.
    pub fn from_config(config: serde_json::Value) -> Result<Self> {
        if !config.is_object() {
            return Err(DomainError::ValidationError(
                "configuration must be an object".to_string(),
            )
            .into());
        }

        let mut model: Self = serde_json::from_value(config)?;
        model.output = None;
        model.error = None;
        model.id = None;
        Ok(model)
    }

    /// Build the execution request; an empty `working_dir` means unset
    pub fn to_request(&self) -> ExecutionRequest {
        let request = ExecutionRequest::new(self.command.clone());
        match self.working_dir.as_deref() {
            Some(dir) if !dir.is_empty() => request.with_working_dir(dir),
            _ => request,
        }
    }

    /// Fill the computed attributes from a successful execution
    pub fn with_result(mut self, result: ExecutionResult) -> Self {
        self.output = Some(result.stdout);
        self.error = Some(result.stderr);
        self.id = Some(result.id);
        self
    }
}

/// Outcome of a read: either a state or error diagnostics, never both
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadResponse {
    pub state: Option<CommandDataSourceModel>,
    pub diagnostics: Vec<crate::domain::Diagnostic>,
}

impl ReadResponse {
    pub fn has_error(&self) -> bool {
        crate::domain::diagnostic::has_error(&self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use serde_json::json;

    #[test]
    fn test_missing_command_is_rejected() {
        let err = CommandDataSourceModel::from_config(json!({"working_dir": "/tmp"})).unwrap_err();
        assert!(matches!(err, AppError::Serialization(_)));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = CommandDataSourceModel::from_config(json!("echo hi")).unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::ValidationError(_))));
    }

    #[test]
    fn test_computed_attributes_are_dropped_on_decode() {
        let model = CommandDataSourceModel::from_config(json!({
            "command": "echo hi",
            "output": "stale",
            "id": "x"
        }))
        .unwrap();

        assert_eq!(model.output, None);
        assert_eq!(model.id, None);
    }

    #[test]
    fn test_empty_working_dir_means_unset() {
        let model = CommandDataSourceModel::from_config(json!({
            "command": "pwd",
            "working_dir": ""
        }))
        .unwrap();
        assert_eq!(model.to_request().working_dir, None);

        let model = CommandDataSourceModel::from_config(json!({
            "command": "pwd",
            "working_dir": "/tmp"
        }))
        .unwrap();
        assert_eq!(
            model.to_request().working_dir,
            Some(std::path::PathBuf::from("/tmp"))
        );
    }

    #[test]
    fn test_with_result_fills_computed() {
        let model = CommandDataSourceModel::from_config(json!({"command": "echo hi"}))
            .unwrap()
            .with_result(ExecutionResult::new("hi\n", ""));

        assert_eq!(model.output.as_deref(), Some("hi\n"));
        assert_eq!(model.error.as_deref(), Some(""));
        assert_eq!(model.id.as_deref(), Some("-"));
    }
}

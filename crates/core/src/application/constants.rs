// Data source constants (no magic values)

/// Provider type name used when none is configured
pub const DEFAULT_PROVIDER_TYPE_NAME: &str = "localexec";

/// Attribute every execution diagnostic is scoped to
pub const COMMAND_ATTRIBUTE: &str = "command";

/// Diagnostic summaries, one per failure category
pub const SUMMARY_MISSING_COMMAND: &str = "Missing Command";
pub const SUMMARY_COMMAND_NOT_FOUND: &str = "Command Not Found";
pub const SUMMARY_EXECUTION_FAILED: &str = "Command Execution Failed";
pub const SUMMARY_CANCELLED: &str = "Command Cancelled";
pub const SUMMARY_INVALID_CONFIG: &str = "Invalid Configuration";

/// Category for configuration decoding failures
pub const CATEGORY_INVALID_CONFIG: &str = "invalid_config";

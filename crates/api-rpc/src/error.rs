//! RPC Error Types
//!
//! Maps data source diagnostics to JSON-RPC error codes.

use jsonrpsee::types::ErrorObjectOwned;
use localexec_core::domain::Diagnostic;
use thiserror::Error;

/// RPC Error Codes
pub mod code {
    pub const VALIDATION_ERROR: i32 = 4000;
    pub const NOT_FOUND: i32 = 4001;
    pub const CANCELLED: i32 = 4004;
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SYSTEM_ERROR: i32 = 5002;
}

/// Server lifecycle errors
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Failed to build server on {addr}: {reason}")]
    Bind { addr: String, reason: String },

    #[error("Failed to register method {method}: {reason}")]
    Register { method: String, reason: String },
}

fn code_for(category: &str) -> i32 {
    match category {
        "empty_command" | "invalid_config" => code::VALIDATION_ERROR,
        "executable_not_found" => code::NOT_FOUND,
        "cancelled" => code::CANCELLED,
        "execution_failed" => code::SYSTEM_ERROR,
        _ => code::INTERNAL_ERROR,
    }
}

/// Convert read diagnostics to a JSON-RPC ErrorObject
///
/// The first error decides code and message; all diagnostics travel in `data`.
pub fn to_rpc_error(diagnostics: Vec<Diagnostic>) -> ErrorObjectOwned {
    let Some(first) = diagnostics.iter().find(|d| d.is_error()) else {
        return ErrorObjectOwned::owned(
            code::INTERNAL_ERROR,
            "read failed without diagnostics",
            None::<()>,
        );
    };

    let code = code_for(&first.category);
    let message = first.summary.clone();
    ErrorObjectOwned::owned(code, message, Some(diagnostics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use localexec_core::domain::AttributePath;

    #[test]
    fn test_not_found_maps_to_4001() {
        let diag = Diagnostic::error("executable_not_found", "Command Not Found", "nope")
            .at(AttributePath::root("command"));

        let err = to_rpc_error(vec![diag]);

        assert_eq!(err.code(), code::NOT_FOUND);
        assert_eq!(err.message(), "Command Not Found");
        let data: Vec<Diagnostic> = serde_json::from_str(err.data().unwrap().get()).unwrap();
        assert_eq!(data[0].category, "executable_not_found");
    }

    #[test]
    fn test_category_codes() {
        assert_eq!(code_for("empty_command"), code::VALIDATION_ERROR);
        assert_eq!(code_for("invalid_config"), code::VALIDATION_ERROR);
        assert_eq!(code_for("cancelled"), code::CANCELLED);
        assert_eq!(code_for("execution_failed"), code::SYSTEM_ERROR);
        assert_eq!(code_for("other"), code::INTERNAL_ERROR);
    }

    #[test]
    fn test_empty_diagnostics_is_internal() {
        assert_eq!(to_rpc_error(Vec::new()).code(), code::INTERNAL_ERROR);
    }
}

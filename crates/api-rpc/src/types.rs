//! RPC Request/Response Types
//!
//! Defines the JSON-RPC method parameters and results.

use localexec_core::domain::DataSourceSchema;
use serde::{Deserialize, Serialize};

/// datasource.read.v1 - Run the command and return its output
#[derive(Debug, Deserialize)]
pub struct ReadRequest {
    /// Data source configuration (`command`, `working_dir`)
    #[serde(flatten)]
    pub config: serde_json::Map<String, serde_json::Value>,

    /// Cancel the execution after this many milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadResponse {
    pub command: String,
    pub working_dir: Option<String>,
    pub output: String,
    pub error: String,
    pub id: String,
}

/// datasource.schema.v1 - Describe the data source (no parameters)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaResponse {
    pub type_name: String,
    pub schema: DataSourceSchema,
}

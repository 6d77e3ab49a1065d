//! RPC Method Handlers
//!
//! Thin adapters from JSON-RPC params to the command data source.

use crate::error::to_rpc_error;
use crate::types::{ReadRequest, ReadResponse, SchemaResponse};
use jsonrpsee::types::ErrorObjectOwned;
use localexec_core::application::{CancelSignal, CommandDataSource};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    data_source: Arc<CommandDataSource>,
}

impl RpcHandler {
    pub fn new(data_source: Arc<CommandDataSource>) -> Self {
        Self { data_source }
    }

    /// datasource.schema.v1
    pub fn schema(&self) -> SchemaResponse {
        SchemaResponse {
            type_name: self.data_source.type_name().to_string(),
            schema: self.data_source.schema(),
        }
    }

    /// datasource.read.v1
    pub async fn read(&self, params: ReadRequest) -> Result<ReadResponse, ErrorObjectOwned> {
        let cancel = match params.timeout_ms {
            Some(ms) => CancelSignal::with_timeout(Duration::from_millis(ms)),
            None => CancelSignal::never(),
        };

        let resp = self
            .data_source
            .read(serde_json::Value::Object(params.config), cancel)
            .await;

        let failed = resp.has_error();
        let state = match resp.state {
            Some(state) if !failed => state,
            _ => {
                info!(
                    diagnostics = resp.diagnostics.len(),
                    "datasource.read.v1 returned diagnostics"
                );
                return Err(to_rpc_error(resp.diagnostics));
            }
        };

        Ok(ReadResponse {
            command: state.command,
            working_dir: state.working_dir,
            output: state.output.unwrap_or_default(),
            error: state.error.unwrap_or_default(),
            id: state.id.unwrap_or_default(),
        })
    }
}

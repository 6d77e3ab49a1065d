//! JSON-RPC Server
//!
//! Serves the data source over JSON-RPC 2.0 on localhost TCP.

use crate::error::RpcError;
use crate::handler::RpcHandler;
use crate::types::ReadRequest;
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use localexec_core::application::CommandDataSource;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 9617;

pub const METHOD_READ: &str = "datasource.read.v1";
pub const METHOD_SCHEMA: &str = "datasource.schema.v1";

/// RPC Server Configuration
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    pub host: String,
    /// `0` picks a free port
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, data_source: Arc<CommandDataSource>) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(data_source)),
        }
    }

    /// Start the JSON-RPC server
    ///
    /// Returns the bound address (useful with port `0`) and the server handle.
    pub async fn start(self) -> Result<(SocketAddr, ServerHandle), RpcError> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| RpcError::Bind {
                addr: addr.clone(),
                reason: e.to_string(),
            })?;
        let local_addr = server.local_addr().map_err(|e| RpcError::Bind {
            addr: addr.clone(),
            reason: e.to_string(),
        })?;

        let mut module = RpcModule::new(());

        let handler = self.handler.clone();
        module
            .register_async_method(METHOD_READ, move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: ReadRequest = params.parse()?;
                    handler.read(req).await
                }
            })
            .map_err(|e| register_error(METHOD_READ, e))?;

        let handler = self.handler.clone();
        module
            .register_method(METHOD_SCHEMA, move |_, _, _| {
                Ok::<_, jsonrpsee::types::ErrorObjectOwned>(handler.schema())
            })
            .map_err(|e| register_error(METHOD_SCHEMA, e))?;

        info!(addr = %local_addr, "JSON-RPC server started");

        let handle = server.start(module);
        Ok((local_addr, handle))
    }
}

fn register_error(method: &str, e: impl std::fmt::Display) -> RpcError {
    RpcError::Register {
        method: method.to_string(),
        reason: e.to_string(),
    }
}

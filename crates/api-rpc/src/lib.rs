//! JSON-RPC API Layer
//!
//! Exposes the command data source (schema + read) to a configuration
//! engine over JSON-RPC 2.0.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use error::RpcError;
pub use server::{RpcServer, RpcServerConfig};

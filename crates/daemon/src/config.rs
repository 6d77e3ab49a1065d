//! Daemon configuration, read from `LOCALEXEC_*` environment variables

use anyhow::{Context, Result};
use localexec_api_rpc::RpcServerConfig;
use localexec_core::application::constants::DEFAULT_PROVIDER_TYPE_NAME;
use localexec_infra_system::ShellConfig;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Extra daily-rolling log files when set
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub rpc: RpcServerConfig,
    pub provider_name: String,
    pub shell: ShellConfig,
    pub log: LogConfig,
}

impl DaemonConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (tests pass a map instead of the environment)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut rpc = RpcServerConfig::default();
        if let Some(host) = lookup("LOCALEXEC_RPC_HOST") {
            rpc.host = host;
        }
        if let Some(port) = lookup("LOCALEXEC_RPC_PORT") {
            rpc.port = port
                .parse()
                .with_context(|| format!("LOCALEXEC_RPC_PORT is not a port: {}", port))?;
        }

        let provider_name = lookup("LOCALEXEC_PROVIDER_NAME")
            .unwrap_or_else(|| DEFAULT_PROVIDER_TYPE_NAME.to_string());

        let mut shell = ShellConfig::default();
        if let Some(program) = lookup("LOCALEXEC_SHELL") {
            shell.program = PathBuf::from(program);
        }

        let format = match lookup("LOCALEXEC_LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };
        let log_dir = lookup("LOCALEXEC_LOG_DIR")
            .map(|dir| PathBuf::from(shellexpand::tilde(&dir).into_owned()));

        Ok(Self {
            rpc,
            provider_name,
            shell,
            log: LogConfig { format, log_dir },
        })
    }
}

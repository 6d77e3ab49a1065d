//! localexec CLI - run the command data source from a terminal
//! Talks to the provider daemon over JSON-RPC, or runs in-process with --local

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tabled::{Table, Tabled};

use localexec_core::application::{CancelSignal, CommandDataSource};
use localexec_core::domain::{DataSourceSchema, Diagnostic};
use localexec_core::port::id_provider::UuidProvider;
use localexec_core::port::time_provider::SystemTimeProvider;
use localexec_infra_system::{SearchPathResolver, ShellConfig, ShellExecutor};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9617";

#[derive(Parser)]
#[command(name = "localexec")]
#[command(about = "Run a local command the way the localexec data source does", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "LOCALEXEC_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,

    /// Run in-process instead of calling the daemon
    #[arg(long, global = true)]
    local: bool,

    /// Shell interpreter for --local runs (same variable the daemon reads)
    #[arg(long, global = true, env = "LOCALEXEC_SHELL")]
    shell: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a command and print its output
    Read {
        /// Shell command line to execute
        #[arg(short, long)]
        command: String,

        /// Working directory (defaults to the current directory)
        #[arg(short = 'd', long)]
        working_dir: Option<String>,

        /// Cancel the command after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the data source schema
    Schema,
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
    data: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ReadResult {
    command: String,
    working_dir: Option<String>,
    output: String,
    error: String,
    id: String,
}

#[derive(Deserialize)]
struct SchemaResult {
    type_name: String,
    schema: DataSourceSchema,
}

#[derive(Tabled)]
struct AttributeRow {
    name: String,
    kind: String,
    description: String,
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        let details: Vec<Diagnostic> = error
            .data
            .and_then(|data| serde_json::from_value(data).ok())
            .unwrap_or_default();
        anyhow::bail!(
            "RPC error ({}): {}{}",
            error.code,
            error.message,
            render_details(&details)
        );
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

fn render_details(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| format!("\n\n{}", d.detail))
        .collect()
}

fn shell_config(program: Option<&str>) -> ShellConfig {
    let mut shell = ShellConfig::default();
    if let Some(program) = program {
        shell.program = program.into();
    }
    shell
}

fn local_data_source(shell: ShellConfig) -> CommandDataSource {
    let executor = ShellExecutor::new(
        Arc::new(SearchPathResolver::from_env()),
        Arc::new(SystemTimeProvider),
    )
    .with_shell(shell);
    CommandDataSource::new(Arc::new(executor), Arc::new(UuidProvider))
}

async fn read_local(
    config: serde_json::Value,
    timeout_ms: Option<u64>,
    shell: ShellConfig,
) -> Result<ReadResult> {
    let cancel = match timeout_ms {
        Some(ms) => CancelSignal::with_timeout(Duration::from_millis(ms)),
        None => CancelSignal::never(),
    };

    let resp = local_data_source(shell).read(config, cancel).await;
    if resp.has_error() {
        let summary = resp
            .diagnostics
            .first()
            .map(|d| d.summary.clone())
            .unwrap_or_default();
        anyhow::bail!("{}{}", summary, render_details(&resp.diagnostics));
    }

    let state = resp
        .state
        .ok_or_else(|| anyhow::anyhow!("Read returned no state"))?;
    Ok(ReadResult {
        command: state.command,
        working_dir: state.working_dir,
        output: state.output.unwrap_or_default(),
        error: state.error.unwrap_or_default(),
        id: state.id.unwrap_or_default(),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let shell = shell_config(cli.shell.as_deref());

    match cli.command {
        Commands::Read {
            command,
            working_dir,
            timeout_ms,
            json,
        } => {
            let config = json!({
                "command": command,
                "working_dir": working_dir,
            });

            let result = if cli.local {
                read_local(config, timeout_ms, shell).await?
            } else {
                let mut params = config;
                params["timeout_ms"] = json!(timeout_ms);
                let value = call_rpc(&cli.rpc_url, "datasource.read.v1", params).await?;
                serde_json::from_value(value)?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", result.output);
                eprint!("{}", result.error);
            }
        }

        Commands::Schema => {
            let (type_name, schema) = if cli.local {
                let ds = local_data_source(shell);
                (ds.type_name().to_string(), ds.schema())
            } else {
                let value = call_rpc(&cli.rpc_url, "datasource.schema.v1", json!({})).await?;
                let result: SchemaResult = serde_json::from_value(value)?;
                (result.type_name, result.schema)
            };

            println!("{}", format!("Data source: {}", type_name).cyan().bold());
            println!("{}", schema.description);
            println!();

            let rows: Vec<AttributeRow> = schema
                .attributes
                .into_iter()
                .map(|a| AttributeRow {
                    name: a.name,
                    kind: format!("{:?}", a.kind).to_lowercase(),
                    description: a.description,
                })
                .collect();
            println!("{}", Table::new(rows));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_shell_flag_is_parsed() {
        let cli = Cli::try_parse_from([
            "localexec",
            "--local",
            "--shell",
            "/bin/bash",
            "read",
            "--command",
            "true",
        ])
        .unwrap();

        assert!(cli.local);
        assert_eq!(cli.shell.as_deref(), Some("/bin/bash"));
    }

    #[test]
    fn test_shell_config_overrides_program_only() {
        assert_eq!(shell_config(None), ShellConfig::default());

        let shell = shell_config(Some("/bin/bash"));
        assert_eq!(shell.program, PathBuf::from("/bin/bash"));
        assert_eq!(shell.args, ShellConfig::default().args);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_read_local_uses_configured_shell() {
        let config = json!({"command": "echo $0"});

        let result = read_local(config, None, shell_config(Some("sh")))
            .await
            .unwrap();

        assert_eq!(result.output, "sh\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_read_local_missing_shell_fails() {
        let config = json!({"command": "echo hi"});

        let err = read_local(config, None, shell_config(Some("/nonexistent/shell")))
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("Command Execution Failed"));
    }
}

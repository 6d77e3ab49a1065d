// Command Data Source - metadata, schema and read use case

pub mod diagnostics;
mod model;

pub use model::{CommandDataSourceModel, ReadResponse};

use crate::application::cancel::CancelSignal;
use crate::application::constants::DEFAULT_PROVIDER_TYPE_NAME;
use crate::domain::DataSourceSchema;
use crate::port::{CommandExecutor, IdProvider};
use std::sync::Arc;
use tracing::{debug, info_span, warn, Instrument};

/// Read-only data source that runs a local command and exposes its output
pub struct CommandDataSource {
    executor: Arc<dyn CommandExecutor>,
    id_provider: Arc<dyn IdProvider>,
    provider_type_name: String,
}

impl CommandDataSource {
    pub fn new(executor: Arc<dyn CommandExecutor>, id_provider: Arc<dyn IdProvider>) -> Self {
        Self {
            executor,
            id_provider,
            provider_type_name: DEFAULT_PROVIDER_TYPE_NAME.to_string(),
        }
    }

    /// Override the provider type name reported by [`Self::type_name`]
    pub fn with_provider_type_name(mut self, name: impl Into<String>) -> Self {
        self.provider_type_name = name.into();
        self
    }

    /// The data source is registered under the provider's own type name
    pub fn type_name(&self) -> &str {
        &self.provider_type_name
    }

    pub fn schema(&self) -> DataSourceSchema {
        DataSourceSchema::command()
    }

    /// Decode `config`, run the command and return either a state or diagnostics
    pub async fn read(&self, config: serde_json::Value, cancel: CancelSignal) -> ReadResponse {
        let invocation_id = self.id_provider.generate_id();
        let span = info_span!("datasource.read", invocation_id = %invocation_id);

        async move {
            let model = match CommandDataSourceModel::from_config(config) {
                Ok(model) => model,
                Err(e) => {
                    warn!(error = %e, "Invalid data source configuration");
                    return ReadResponse {
                        state: None,
                        diagnostics: vec![diagnostics::from_config_error(&e)],
                    };
                }
            };

            let request = model.to_request();
            match self.executor.execute(&request, cancel).await {
                Ok(result) => {
                    debug!("Data source read completed");
                    ReadResponse {
                        state: Some(model.with_result(result)),
                        diagnostics: Vec::new(),
                    }
                }
                Err(e) => {
                    debug!(category = e.category(), "Data source read failed");
                    ReadResponse {
                        state: None,
                        diagnostics: vec![diagnostics::from_execution_error(&e)],
                    }
                }
            }
        }
        .instrument(span)
        .await
    }
}

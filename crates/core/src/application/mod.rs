// Application Layer - Use Cases

pub mod cancel;
pub mod constants;
pub mod data_source;

// Re-exports
pub use cancel::{cancel_channel, CancelHandle, CancelSignal};
pub use data_source::{CommandDataSource, CommandDataSourceModel, ReadResponse};

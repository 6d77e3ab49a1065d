// Port Layer - Interfaces for external dependencies

pub mod command_executor;
pub mod executable_resolver;
pub mod id_provider; // For deterministic testing
pub mod time_provider;

// Re-exports
pub use command_executor::{CommandExecutor, ExecutionError};
pub use executable_resolver::ExecutableResolver;
pub use id_provider::IdProvider;
pub use time_provider::TimeProvider;

// localexec Infrastructure - System Adapters
// Implements: CommandExecutor, ExecutableResolver

pub mod search_path_resolver;
pub mod shell_executor;

pub use search_path_resolver::SearchPathResolver;
pub use shell_executor::{ShellConfig, ShellExecutor};

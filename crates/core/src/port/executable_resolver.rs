// Executable Resolver Port
// Pre-flight lookup of a bare program name on the executable search path

use std::path::PathBuf;

/// Executable resolver interface
///
/// Advisory only: the shell that finally runs the command may resolve names
/// differently (builtins, aliases, functions), but a miss here still stops
/// the call before anything is spawned.
pub trait ExecutableResolver: Send + Sync {
    /// Resolve `name` to an executable file, or `None` if it cannot be found
    fn resolve(&self, name: &str) -> Option<PathBuf>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;

    /// Resolver backed by a fixed name -> path table
    #[derive(Default)]
    pub struct StaticResolver {
        known: HashMap<String, PathBuf>,
    }

    impl StaticResolver {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, name: &str, path: impl Into<PathBuf>) -> Self {
            self.known.insert(name.to_string(), path.into());
            self
        }
    }

    impl ExecutableResolver for StaticResolver {
        fn resolve(&self, name: &str) -> Option<PathBuf> {
            self.known.get(name).cloned()
        }
    }
}

// Search path resolver
// Resolves bare program names the way a shell would look them up on PATH
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

use localexec_core::port::ExecutableResolver;

/// Executable resolver backed by a `PATH`-style directory list
///
/// Names containing a path separator are checked directly (relative to the
/// process working directory) and never searched.
#[derive(Debug, Clone, Default)]
pub struct SearchPathResolver {
    /// `None` reads `PATH` from the environment on every lookup
    search_path: Option<OsString>,
}

impl SearchPathResolver {
    /// Resolve against the process `PATH`
    pub fn from_env() -> Self {
        Self { search_path: None }
    }

    /// Resolve against a fixed directory list instead of `PATH`
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }

    fn current_search_path(&self) -> Option<OsString> {
        self.search_path
            .clone()
            .or_else(|| std::env::var_os("PATH"))
    }

    fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
        #[cfg(windows)]
        {
            let exts = std::env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".into());
            let mut out = vec![dir.join(name)];
            out.extend(
                exts.split(';')
                    .filter(|e| !e.is_empty())
                    .map(|ext| dir.join(format!("{}{}", name, ext))),
            );
            out
        }

        #[cfg(not(windows))]
        {
            vec![dir.join(name)]
        }
    }
}

fn has_separator(name: &str) -> bool {
    name.contains('/') || (cfg!(windows) && name.contains('\\'))
}

/// Regular file with at least one execute bit set (any file on Windows)
fn is_executable(path: &Path) -> bool {
    let Ok(meta) = std::fs::metadata(path) else {
        return false;
    };
    if !meta.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        meta.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        true
    }
}

impl ExecutableResolver for SearchPathResolver {
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }

        if has_separator(name) {
            let path = PathBuf::from(name);
            return is_executable(&path).then_some(path);
        }

        let search_path = self.current_search_path()?;
        let found = std::env::split_paths(&search_path)
            .filter(|dir| !dir.as_os_str().is_empty())
            .flat_map(|dir| Self::candidates(&dir, name))
            .find(|candidate| is_executable(candidate));

        debug!(name = %name, found = ?found, "Search path lookup");
        found
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn write_file(dir: &Path, name: &str, mode: u32) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\necho hi\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[test]
    fn test_finds_executable_on_search_path() {
        let dir = tempfile::tempdir().unwrap();
        let tool = write_file(dir.path(), "my-tool", 0o755);

        let resolver = SearchPathResolver::with_search_path(dir.path());
        assert_eq!(resolver.resolve("my-tool"), Some(tool));
    }

    #[test]
    fn test_skips_non_executable_files() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "data.txt", 0o644);

        let resolver = SearchPathResolver::with_search_path(dir.path());
        assert_eq!(resolver.resolve("data.txt"), None);
    }

    #[test]
    fn test_first_directory_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let expected = write_file(first.path(), "dup", 0o755);
        write_file(second.path(), "dup", 0o755);

        let joined = std::env::join_paths([first.path(), second.path()]).unwrap();
        let resolver = SearchPathResolver::with_search_path(joined);
        assert_eq!(resolver.resolve("dup"), Some(expected));
    }

    #[test]
    fn test_directories_are_not_executables() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();

        let resolver = SearchPathResolver::with_search_path(dir.path());
        assert_eq!(resolver.resolve("subdir"), None);
    }

    #[test]
    fn test_path_with_separator_is_checked_directly() {
        let dir = tempfile::tempdir().unwrap();
        let tool = write_file(dir.path(), "direct", 0o700);
        let name = tool.to_str().unwrap();

        // Empty search path: the lookup must not depend on it
        let resolver = SearchPathResolver::with_search_path("");
        assert_eq!(resolver.resolve(name), Some(tool.clone()));
        assert_eq!(resolver.resolve("direct"), None);
    }

    #[test]
    fn test_missing_program() {
        let resolver = SearchPathResolver::from_env();
        assert_eq!(resolver.resolve("nonexistent-binary-xyz"), None);
        assert_eq!(resolver.resolve(""), None);
        assert!(resolver.resolve("sh").is_some());
    }
}

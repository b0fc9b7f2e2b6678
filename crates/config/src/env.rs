//! Environment access for configuration building.
//!
//! The `.env` file is loaded into the process environment once at startup.
//! Loading never overwrites variables that are already set, so running the
//! loader more than once is a no-op for any key it has seen before.

use std::{
    collections::HashMap,
    env,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

/// Set to any value to skip `.env` loading entirely.
pub const SKIP_DOTENV_VAR: &str = "DEVKIT_SKIP_DOTENV";

/// Source of environment variables consumed by [`crate::ConfigBuilder`].
pub trait EnvSource {
    /// Look up a variable, returning `None` when it is unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Outcome of loading an env file.
#[derive(Debug)]
pub enum EnvFile {
    /// File was found and its variables were applied
    Loaded(PathBuf),
    /// No env file exists; defaults apply
    Missing,
    /// Loading was disabled through [`SKIP_DOTENV_VAR`]
    Skipped,
    /// File exists but could not be read or parsed
    Invalid(dotenvy::Error),
}

impl EnvFile {
    /// Emit the outcome as a log line. Invalid files are a warning, never fatal.
    pub fn report(&self) {
        match self {
            Self::Loaded(path) => debug!("Loaded environment from {}", path.display()),
            Self::Missing => debug!("No .env file found, using process environment"),
            Self::Skipped => debug!("Skipping .env file ({} is set)", SKIP_DOTENV_VAR),
            Self::Invalid(err) => warn!("Ignoring unreadable .env file: {}", err),
        }
    }

    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Load `.env` from the current directory or its nearest ancestor.
pub fn load_env_file() -> EnvFile {
    if env::var_os(SKIP_DOTENV_VAR).is_some() {
        return EnvFile::Skipped;
    }

    match dotenvy::dotenv() {
        Ok(path) => EnvFile::Loaded(path),
        Err(err) => classify(err),
    }
}

/// Load a specific env file.
pub fn load_env_file_from(path: impl AsRef<Path>) -> EnvFile {
    let path = path.as_ref();

    match dotenvy::from_path(path) {
        Ok(()) => EnvFile::Loaded(path.to_path_buf()),
        Err(err) => classify(err),
    }
}

fn classify(err: dotenvy::Error) -> EnvFile {
    match err {
        dotenvy::Error::Io(io) if io.kind() == ErrorKind::NotFound => EnvFile::Missing,
        err => EnvFile::Invalid(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_env_file_from(dir.path().join(".env"));
        assert!(matches!(result, EnvFile::Missing));
    }

    #[test]
    fn test_loads_variables() {
        let file = env_file("DEVKIT_TEST_LOADED=from-file\n");

        let result = load_env_file_from(file.path());

        assert!(result.is_loaded());
        assert_eq!(env::var("DEVKIT_TEST_LOADED").unwrap(), "from-file");
    }

    #[test]
    fn test_existing_variables_win() {
        env::set_var("DEVKIT_TEST_PRESET", "from-process");
        let file = env_file("DEVKIT_TEST_PRESET=from-file\n");

        load_env_file_from(file.path());

        assert_eq!(env::var("DEVKIT_TEST_PRESET").unwrap(), "from-process");
    }

    #[test]
    fn test_second_load_does_not_overwrite() {
        let first = env_file("DEVKIT_TEST_RELOAD=first\n");
        let second = env_file("DEVKIT_TEST_RELOAD=second\n");

        load_env_file_from(first.path());
        load_env_file_from(second.path());
        load_env_file_from(first.path());

        assert_eq!(env::var("DEVKIT_TEST_RELOAD").unwrap(), "first");
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let file = env_file("this line is not valid\n");

        let result = load_env_file_from(file.path());

        assert!(matches!(result, EnvFile::Invalid(_)));
        // Reporting must not panic
        result.report();
    }

    // Only test touching SKIP_DOTENV_VAR, so the two phases cannot race.
    #[test]
    fn test_skip_variable_and_default_search() {
        env::set_var(SKIP_DOTENV_VAR, "1");
        assert!(matches!(load_env_file(), EnvFile::Skipped));

        env::remove_var(SKIP_DOTENV_VAR);
        let result = load_env_file();
        assert!(matches!(result, EnvFile::Missing | EnvFile::Loaded(_)));
    }

    #[test]
    fn test_map_source() {
        let source = HashMap::from([("KEY".to_string(), "value".to_string())]);
        assert_eq!(source.var("KEY").as_deref(), Some("value"));
        assert_eq!(source.var("OTHER"), None);
    }
}

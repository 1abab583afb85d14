pub mod prompt;

use atomic_write_file::AtomicWriteFile;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable name for providing a Sheets API key without a key file
pub const ENV_KEY_VAR: &str = "CIRCUIT_STANDINGS_API_KEY";

// Re-export prompt functions for convenience
pub use prompt::{prompt_for_key, setup_key_if_missing};

/// Check for an API key in the CIRCUIT_STANDINGS_API_KEY environment variable.
/// Returns Some(key) if the env var is set and non-empty, None otherwise.
pub fn get_key_from_env() -> Option<String> {
    match std::env::var(ENV_KEY_VAR) {
        Ok(val) => {
            let trimmed = val.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

/// Default key file path (~/.config/circuit-standings/api-key)
pub fn get_key_path() -> PathBuf {
    crate::config::get_config_dir().join("api-key")
}

#[derive(Debug)]
pub enum CredentialError {
    KeyNotFound,
    ReadFailed(String),
    StoreFailed(String),
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::KeyNotFound => write!(f, "API key not found"),
            CredentialError::ReadFailed(msg) => write!(f, "Failed to read API key: {}", msg),
            CredentialError::StoreFailed(msg) => write!(f, "Failed to store API key: {}", msg),
        }
    }
}

impl std::error::Error for CredentialError {}

/// Load the API key from a key file.
pub fn load_key(path: &Path) -> Result<String, CredentialError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let key = contents.trim().to_string();
            if key.is_empty() {
                Err(CredentialError::KeyNotFound)
            } else {
                Ok(key)
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(CredentialError::KeyNotFound),
        Err(e) => Err(CredentialError::ReadFailed(e.to_string())),
    }
}

/// Save the API key to a key file atomically so it is never left truncated.
pub fn store_key(path: &Path, key: &str) -> Result<(), CredentialError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CredentialError::StoreFailed(e.to_string()))?;
    }

    let mut file =
        AtomicWriteFile::open(path).map_err(|e| CredentialError::StoreFailed(e.to_string()))?;
    writeln!(file, "{}", key).map_err(|e| CredentialError::StoreFailed(e.to_string()))?;
    file.commit()
        .map_err(|e| CredentialError::StoreFailed(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("circuit-standings-test-missing-key");
        let _ = std::fs::remove_file(&path);

        assert!(matches!(load_key(&path), Err(CredentialError::KeyNotFound)));
    }

    #[test]
    fn test_store_and_load_roundtrip() {
        let path = std::env::temp_dir().join("circuit-standings-test-key");
        let _ = std::fs::remove_file(&path);

        store_key(&path, "AIzaTestKey123").unwrap();
        assert_eq!(load_key(&path).unwrap(), "AIzaTestKey123");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_whitespace_only_key_file_counts_as_missing() {
        let path = std::env::temp_dir().join("circuit-standings-test-blank-key");
        std::fs::write(&path, "\n  \n").unwrap();

        assert!(matches!(load_key(&path), Err(CredentialError::KeyNotFound)));

        let _ = std::fs::remove_file(&path);
    }
}

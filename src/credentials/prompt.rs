use anyhow::{Context, Result};

use super::{get_key_from_env, get_key_path, load_key, store_key, CredentialError};

/// Prompts user to enter a Google Sheets API key
pub fn prompt_for_key() -> Result<String> {
    println!("Google Sheets API key required.");
    println!("Create one at: https://console.cloud.google.com/apis/credentials");
    println!("The key needs access to the Google Sheets API (read-only is enough).");
    println!();

    let key = rpassword::prompt_password("Enter API key: ")
        .context("Failed to read API key from stdin")?;

    let key = key.trim();

    if key.is_empty() {
        anyhow::bail!("API key cannot be empty");
    }

    Ok(key.to_string())
}

/// Resolve the API key: environment variable, then key file, then an
/// interactive prompt whose answer is persisted for next time.
pub fn setup_key_if_missing() -> Result<String> {
    if let Some(key) = get_key_from_env() {
        return Ok(key);
    }

    let key_path = get_key_path();
    match load_key(&key_path) {
        Ok(key) => Ok(key),
        Err(CredentialError::KeyNotFound) => {
            let key = prompt_for_key()?;

            store_key(&key_path, &key).context("Failed to store API key")?;
            println!("API key stored in {}.", key_path.display());

            Ok(key)
        }
        Err(e) => anyhow::bail!("Failed to read API key: {}", e),
    }
}

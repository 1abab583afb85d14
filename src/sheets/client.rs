use anyhow::{Context, Result};

/// HTTP client for the Google Sheets values API, bound to one API key.
#[derive(Clone)]
pub struct SheetsClient {
    pub(crate) http: reqwest::Client,
    pub(crate) api_key: String,
}

/// Create a Sheets API client using an API key
pub fn create_client(api_key: &str) -> Result<SheetsClient> {
    let http = reqwest::Client::builder()
        .user_agent(concat!("circuit-standings/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")?;

    Ok(SheetsClient {
        http,
        api_key: api_key.to_string(),
    })
}

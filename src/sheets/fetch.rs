use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio_retry::{strategy::ExponentialBackoff, Retry};

use super::client::SheetsClient;

/// The tab holding the judges' score grid in every event sheet.
const SCORE_RANGE: &str = "Calculator";

/// Response shape of the Sheets `values.get` endpoint. Cells arrive as text
/// and are parsed downstream.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Fetch the score grid of one spreadsheet.
///
/// Transient failures are retried with exponential backoff (3 attempts);
/// whatever error survives is for the caller to handle.
pub async fn fetch_sheet_values(client: &SheetsClient, sheet_id: &str) -> Result<Vec<Vec<String>>> {
    let url = format!(
        "https://sheets.googleapis.com/v4/spreadsheets/{}/values/{}",
        sheet_id, SCORE_RANGE
    );

    // Retry strategy: exponential backoff with 3 attempts
    let retry_strategy = ExponentialBackoff::from_millis(100)
        .max_delay(std::time::Duration::from_secs(5))
        .take(3);

    let range = Retry::spawn(retry_strategy, || async {
        let response = client
            .http
            .get(&url)
            .query(&[("key", client.api_key.as_str())])
            .send()
            .await
            .map_err(|e| anyhow!("Sheets API request failed: {}", e))?;

        let status = response.status();
        if status.as_u16() == 403 {
            return Err(anyhow!(
                "Sheets API rejected the key (quota exhausted, or the API key lacks Sheets access)."
            ));
        }
        if status.as_u16() == 404 {
            return Err(anyhow!(
                "Spreadsheet not found. Check the sheet id and that it is shared for reading."
            ));
        }
        if !status.is_success() {
            return Err(anyhow!("Sheets API error: HTTP {}", status));
        }

        response
            .json::<ValueRange>()
            .await
            .map_err(|e| anyhow!("Failed to decode Sheets API response: {}", e))
    })
    .await?;

    Ok(range.values)
}

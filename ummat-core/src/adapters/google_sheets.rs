//! Google Sheets row source
//!
//! Reads the finance ledger through the Sheets API v4 `values` endpoint:
//! `GET /spreadsheets/{id}/values/{sheet}!{range}?key={apiKey}`.
//!
//! API Documentation: https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets.values/get

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use url::Url;

use crate::domain::result::{Error as DomainError, Result as DomainResult};
use crate::ports::{RowSource, Rows};

/// Default production API URL
const SHEETS_PRODUCTION_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Environment variable to override the Sheets API base URL (mock servers).
pub const SHEETS_BASE_URL_ENV: &str = "UMMAT_SHEETS_BASE_URL";

/// Sheet tab holding the ledger
pub const DEFAULT_SHEET_NAME: &str = "Dashboard";

/// Columns date..fund
pub const DEFAULT_RANGE: &str = "A:E";

/// Get the Sheets base URL, checking environment variable first
pub fn get_base_url() -> String {
    base_url_or_production(std::env::var(SHEETS_BASE_URL_ENV).ok())
}

fn base_url_or_production(override_url: Option<String>) -> String {
    override_url
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| SHEETS_PRODUCTION_URL.to_string())
}

/// `values.get` response body. A range with no data omits `values`.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<JsonValue>>,
}

/// Google Sheets ledger source
#[derive(Debug)]
pub struct GoogleSheetsSource {
    client: Client,
    spreadsheet_id: String,
    api_key: String,
    sheet_name: String,
    range: String,
    base_url: String,
}

impl GoogleSheetsSource {
    /// Create a source for the given spreadsheet.
    ///
    /// Uses the `UMMAT_SHEETS_BASE_URL` environment variable if set,
    /// otherwise the production API.
    pub fn new(
        spreadsheet_id: &str,
        api_key: &str,
        sheet_name: &str,
        range: &str,
    ) -> DomainResult<Self> {
        Self::new_with_base_url(spreadsheet_id, api_key, sheet_name, range, &get_base_url())
    }

    pub fn new_with_base_url(
        spreadsheet_id: &str,
        api_key: &str,
        sheet_name: &str,
        range: &str,
        base_url: &str,
    ) -> DomainResult<Self> {
        if spreadsheet_id.trim().is_empty() {
            return Err(DomainError::config(
                "Google Sheets spreadsheet ID is not configured",
            ));
        }
        if api_key.trim().is_empty() {
            return Err(DomainError::config("Google Sheets API key is not configured"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            spreadsheet_id: spreadsheet_id.trim().to_string(),
            api_key: api_key.trim().to_string(),
            sheet_name: sheet_name.to_string(),
            range: range.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Request URL. Sheet name and range form one percent-encoded segment.
    fn values_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid Sheets base URL '{}'", self.base_url))?;

        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Sheets base URL cannot have a path"))?
            .pop_if_empty()
            .push(&self.spreadsheet_id)
            .push("values")
            .push(&format!("{}!{}", self.sheet_name, self.range));
        url.query_pairs_mut().append_pair("key", &self.api_key);

        Ok(url)
    }

    /// Fetch the raw range, header row included.
    pub fn fetch_values(&self) -> Result<Rows> {
        let url = self.values_url()?;

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| self.map_request_error(e))?;

        self.check_response_status(&response)?;

        let body: ValueRange = response
            .json()
            .context("Failed to parse Google Sheets response")?;

        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> anyhow::Error {
        if error.is_timeout() {
            anyhow::anyhow!("Connection to Google Sheets timed out after 30 seconds")
        } else if error.is_connect() {
            anyhow::anyhow!("Unable to connect to Google Sheets")
        } else {
            anyhow::anyhow!("Google Sheets request failed: {}", error)
        }
    }

    /// Check response status and return appropriate errors
    fn check_response_status(&self, response: &reqwest::blocking::Response) -> Result<()> {
        match response.status().as_u16() {
            200 => Ok(()),
            400 => anyhow::bail!(
                "Google Sheets rejected the request. Check that sheet '{}' and range '{}' exist.",
                self.sheet_name,
                self.range
            ),
            403 => anyhow::bail!(
                "Google Sheets API key was rejected or cannot read this spreadsheet."
            ),
            404 => anyhow::bail!("Spreadsheet not found. Check the spreadsheet ID."),
            429 => anyhow::bail!(
                "Google Sheets quota exceeded. Please wait a moment and try again."
            ),
            status => anyhow::bail!("Google Sheets API error: HTTP {}", status),
        }
    }
}

impl RowSource for GoogleSheetsSource {
    fn name(&self) -> &str {
        "google_sheets"
    }

    fn fetch_rows(&self) -> DomainResult<Rows> {
        let values = self
            .fetch_values()
            .map_err(|e| DomainError::source(format!("{:#}", e)))?;

        // First row is the header
        Ok(values.into_iter().skip(1).collect())
    }
}

/// Sheets returns formatted strings, but numbers and booleans can show up
/// with other value render options.
fn cell_to_string(value: JsonValue) -> String {
    match value {
        JsonValue::String(s) => s,
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base_url: &str) -> GoogleSheetsSource {
        GoogleSheetsSource::new_with_base_url(
            "sheet123",
            "test_key",
            DEFAULT_SHEET_NAME,
            DEFAULT_RANGE,
            base_url,
        )
        .unwrap()
    }

    #[test]
    fn test_source_name() {
        assert_eq!(source("http://localhost").name(), "google_sheets");
    }

    #[test]
    fn test_reject_missing_credentials() {
        let no_id = GoogleSheetsSource::new_with_base_url("", "key", "Dashboard", "A:E", "http://x");
        assert!(matches!(no_id, Err(DomainError::Config(_))));

        let no_key =
            GoogleSheetsSource::new_with_base_url("id", "  ", "Dashboard", "A:E", "http://x");
        assert!(matches!(no_key, Err(DomainError::Config(_))));
    }

    #[test]
    fn test_values_url() {
        let url = source("https://sheets.googleapis.com/v4/spreadsheets/")
            .values_url()
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet123/values/Dashboard!A:E?key=test_key"
        );
    }

    #[test]
    fn test_values_url_encodes_sheet_name() {
        let src = GoogleSheetsSource::new_with_base_url(
            "sheet123",
            "test_key",
            "Kas Masjid",
            "A:E",
            "http://localhost",
        )
        .unwrap();
        let url = src.values_url().unwrap();
        assert_eq!(url.path(), "/sheet123/values/Kas%20Masjid!A:E");
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(JsonValue::from("Rp 5.000")), "Rp 5.000");
        assert_eq!(cell_to_string(JsonValue::from(50000)), "50000");
        assert_eq!(cell_to_string(JsonValue::Bool(true)), "true");
        assert_eq!(cell_to_string(JsonValue::Null), "");
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(
            base_url_or_production(None),
            "https://sheets.googleapis.com/v4/spreadsheets"
        );
        assert_eq!(base_url_or_production(Some("  ".to_string())), SHEETS_PRODUCTION_URL);
        assert_eq!(
            base_url_or_production(Some("http://127.0.0.1:9000".to_string())),
            "http://127.0.0.1:9000"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(source("http://localhost/api/").base_url, "http://localhost/api");
    }
}

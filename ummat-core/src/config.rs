//! Configuration management
//!
//! Settings live in `settings.json` in the app directory:
//! ```json
//! {
//!   "app": { "demoMode": false, "utcOffsetHours": 7, "itemsPerPage": 7 },
//!   "source": {
//!     "spreadsheetId": "...", "apiKey": "...",
//!     "sheetName": "Dashboard", "range": "A:E",
//!     "csvPath": null
//!   }
//! }
//! ```
//! Keys this crate does not know about are kept when saving.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::adapters::google_sheets::{DEFAULT_RANGE, DEFAULT_SHEET_NAME};
use crate::domain::DEFAULT_ITEMS_PER_PAGE;

/// Asia/Jakarta (WIB) has no daylight saving time
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;

pub const DEMO_MODE_ENV: &str = "UMMAT_DEMO_MODE";
pub const SPREADSHEET_ID_ENV: &str = "GOOGLE_SHEETS_FINANCE_SPREADSHEET_ID";
pub const API_KEY_ENV: &str = "GOOGLE_SHEETS_API_KEY";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(default)]
    source: SourceSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    demo_mode: bool,
    #[serde(default = "default_utc_offset_hours")]
    utc_offset_hours: i32,
    #[serde(default = "default_items_per_page")]
    items_per_page: usize,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            demo_mode: false,
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            other: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SourceSettings {
    #[serde(default)]
    spreadsheet_id: String,
    #[serde(default)]
    api_key: String,
    #[serde(default = "default_sheet_name")]
    sheet_name: String,
    #[serde(default = "default_range")]
    range: String,
    #[serde(default)]
    csv_path: Option<PathBuf>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            api_key: String::new(),
            sheet_name: default_sheet_name(),
            range: default_range(),
            csv_path: None,
            other: HashMap::new(),
        }
    }
}

fn default_utc_offset_hours() -> i32 {
    DEFAULT_UTC_OFFSET_HOURS
}

fn default_items_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

fn default_sheet_name() -> String {
    DEFAULT_SHEET_NAME.to_string()
}

fn default_range() -> String {
    DEFAULT_RANGE.to_string()
}

/// Where ledger rows come from, in precedence order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    Demo,
    Csv(PathBuf),
    GoogleSheets,
}

/// Row source settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub spreadsheet_id: String,
    pub api_key: String,
    pub sheet_name: String,
    pub range: String,
    pub csv_path: Option<PathBuf>,
}

/// Ummat configuration (resolved view of settings plus environment)
#[derive(Debug, Clone)]
pub struct Config {
    pub demo_mode: bool,
    pub utc_offset_hours: i32,
    pub items_per_page: usize,
    pub source: SourceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_settings(&SettingsFile::default(), |_| None)
    }
}

impl Config {
    /// Load config from the app directory
    ///
    /// Environment variables win over the file:
    /// - `UMMAT_DEMO_MODE` (true/false, for CI and trying things out)
    /// - `GOOGLE_SHEETS_FINANCE_SPREADSHEET_ID`
    /// - `GOOGLE_SHEETS_API_KEY`
    pub fn load(app_dir: &Path) -> Result<Self> {
        let raw = read_settings(app_dir)?;
        Ok(Self::from_settings(&raw, |name| std::env::var(name).ok()))
    }

    fn from_settings(raw: &SettingsFile, env: impl Fn(&str) -> Option<String>) -> Self {
        let demo_mode = match env(DEMO_MODE_ENV).as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => raw.app.demo_mode,
        };

        let non_empty = |name: &str| env(name).filter(|v| !v.trim().is_empty());

        let source = SourceConfig {
            spreadsheet_id: non_empty(SPREADSHEET_ID_ENV)
                .unwrap_or_else(|| raw.source.spreadsheet_id.clone()),
            api_key: non_empty(API_KEY_ENV).unwrap_or_else(|| raw.source.api_key.clone()),
            sheet_name: raw.source.sheet_name.clone(),
            range: raw.source.range.clone(),
            csv_path: raw.source.csv_path.clone(),
        };

        Self {
            demo_mode,
            utc_offset_hours: raw.app.utc_offset_hours,
            items_per_page: raw.app.items_per_page,
            source,
        }
    }

    /// Save config to the app directory
    ///
    /// Only `demoMode` is written back. Credentials that came from the
    /// environment never end up in the file.
    pub fn save(&self, app_dir: &Path) -> Result<()> {
        let settings_path = app_dir.join("settings.json");

        // Re-read so edits made since load() are not lost
        let mut settings = read_settings(app_dir)?;
        settings.app.demo_mode = self.demo_mode;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    pub fn enable_demo_mode(&mut self) {
        self.demo_mode = true;
    }

    pub fn disable_demo_mode(&mut self) {
        self.demo_mode = false;
    }

    /// Which source to read: demo mode, then a CSV export, then the sheet
    pub fn source_kind(&self) -> SourceKind {
        if self.demo_mode {
            SourceKind::Demo
        } else if let Some(path) = &self.source.csv_path {
            SourceKind::Csv(path.clone())
        } else {
            SourceKind::GoogleSheets
        }
    }

    /// Configured local time zone. Out-of-range offsets fall back to UTC.
    pub fn utc_offset(&self) -> FixedOffset {
        utc_offset_from_hours(self.utc_offset_hours)
    }

    /// Today's date in the configured time zone
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.utc_offset()).date_naive()
    }
}

/// Whole-hour offset east of UTC; out-of-range values give UTC.
pub fn utc_offset_from_hours(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours.saturating_mul(3600)).unwrap_or_else(|| Utc.fix())
}

/// A missing file means defaults. A file that does not parse is an error,
/// so `save` never overwrites credentials it could not read.
fn read_settings(app_dir: &Path) -> Result<SettingsFile> {
    let settings_path = app_dir.join("settings.json");
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read {}", settings_path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", settings_path.display()))
}

//! Demo service - manage demo mode
//!
//! Demo mode serves the built-in demo ledger instead of the spreadsheet,
//! for trying the reports out without Google Sheets credentials.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::Config;

/// Demo service for managing demo mode
pub struct DemoService {
    app_dir: PathBuf,
}

impl DemoService {
    pub fn new(app_dir: &Path) -> Self {
        Self {
            app_dir: app_dir.to_path_buf(),
        }
    }

    /// Check if demo mode is currently enabled
    pub fn is_enabled(&self) -> Result<bool> {
        let config = Config::load(&self.app_dir)?;
        Ok(config.demo_mode)
    }

    /// Enable demo mode in settings.json
    pub fn enable(&self) -> Result<()> {
        let mut config = Config::load(&self.app_dir).unwrap_or_default();
        config.enable_demo_mode();
        config.save(&self.app_dir)
    }

    /// Disable demo mode in settings.json
    pub fn disable(&self) -> Result<()> {
        let mut config = Config::load(&self.app_dir).unwrap_or_default();
        config.disable_demo_mode();
        config.save(&self.app_dir)
    }
}

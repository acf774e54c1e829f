//! Configuration structures for the order sheet pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SheetError};

/// Marker phrase that opens the price-check request section.
pub const DEFAULT_SKIP_MARKER: &str = "Product REQUEST cek harga";

/// Main configuration for the ordersheet pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Document parsing configuration.
    pub parser: ParserConfig,

    /// Summary configuration.
    pub report: ReportConfig,
}

/// Document parsing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Any line containing this phrase starts a section that is ignored
    /// until the end of the document.
    pub skip_marker: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            skip_marker: DEFAULT_SKIP_MARKER.to_string(),
        }
    }
}

/// Summary configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of rows in top spender and top item rankings.
    pub top_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { top_limit: 5 }
    }
}

impl SheetConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the parser cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.parser.skip_marker.trim().is_empty() {
            return Err(SheetError::Config(
                "parser.skip_marker must not be empty".to_string(),
            ));
        }
        if self.report.top_limit == 0 {
            return Err(SheetError::Config(
                "report.top_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

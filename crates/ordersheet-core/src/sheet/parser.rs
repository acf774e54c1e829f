//! Document-level parser entry points.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use super::assembler::{DocumentAssembler, ParseStats};
use super::OrderSheetParser;
use crate::error::Result;
use crate::models::config::{ParserConfig, DEFAULT_SKIP_MARKER};
use crate::models::sheet::OrderSheet;

/// Result of parsing one document.
#[derive(Debug, Clone, Serialize)]
pub struct ParseOutcome {
    /// Parsed sheet.
    pub sheet: OrderSheet,
    /// Line counters.
    pub stats: ParseStats,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Order sheet parser.
#[derive(Debug, Clone)]
pub struct SheetParser {
    /// Phrase that starts the ignored section.
    skip_marker: String,
}

impl SheetParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self {
            skip_marker: DEFAULT_SKIP_MARKER.to_string(),
        }
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &ParserConfig) -> Self {
        Self::new().with_skip_marker(config.skip_marker.clone())
    }

    /// Set the skip marker phrase.
    pub fn with_skip_marker(mut self, marker: impl Into<String>) -> Self {
        self.skip_marker = marker.into();
        self
    }

    /// A fresh assembler for one document.
    pub fn assembler(&self) -> DocumentAssembler {
        DocumentAssembler::with_skip_marker(self.skip_marker.clone())
    }

    /// Parse a document from a line-oriented reader.
    ///
    /// Fails only if the reader fails or yields invalid UTF-8.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<ParseOutcome> {
        let start = Instant::now();
        let mut assembler = self.assembler();

        for line in reader.lines() {
            assembler.push_line(&line?);
        }

        Ok(finish(assembler, start))
    }

    /// Parse a UTF-8 document from disk.
    pub fn parse_file(&self, path: &Path) -> Result<ParseOutcome> {
        info!("Parsing {}", path.display());
        let file = File::open(path)?;
        self.parse_reader(BufReader::new(file))
    }
}

impl Default for SheetParser {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderSheetParser for SheetParser {
    fn parse(&self, text: &str) -> ParseOutcome {
        let start = Instant::now();
        let mut assembler = self.assembler();

        for line in text.lines() {
            assembler.push_line(line);
        }

        finish(assembler, start)
    }
}

fn finish(assembler: DocumentAssembler, start: Instant) -> ParseOutcome {
    let (sheet, stats) = assembler.finish();

    info!(
        "Parsed {} items, {} customers, {} purchases from {} lines",
        sheet.items.len(),
        sheet.customers.len(),
        sheet.purchase_count(),
        stats.lines_read
    );

    ParseOutcome {
        sheet,
        stats,
        processing_time_ms: start.elapsed().as_millis() as u64,
    }
}

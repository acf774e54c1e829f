//! Leading marker classification for customer lines.

use serde::{Deserialize, Serialize};

use super::patterns::ORDINAL_MARKER;

/// Leading marker syntax of a customer line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineMarker {
    /// `- [x]`
    Checked,
    /// `- [ ]` or `- []`
    Unchecked,
    /// `1.`
    Ordinal,
    /// `- `
    Dash,
    /// No recognized marker.
    Plain,
}

impl LineMarker {
    /// Only `- [x]` confirms an order.
    pub fn is_checked(self) -> bool {
        matches!(self, Self::Checked)
    }
}

/// A customer line split into its marker and body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    pub marker: LineMarker,
    pub body: &'a str,
}

impl ClassifiedLine<'_> {
    pub fn is_checked(&self) -> bool {
        self.marker.is_checked()
    }
}

/// Strip the leading marker of a line and report which one it was.
pub fn classify_line(line: &str) -> ClassifiedLine<'_> {
    let line = line.trim();

    let (marker, body) = if let Some(rest) = line.strip_prefix("- [x]") {
        (LineMarker::Checked, rest)
    } else if let Some(rest) = line
        .strip_prefix("- [ ]")
        .or_else(|| line.strip_prefix("- []"))
    {
        (LineMarker::Unchecked, rest)
    } else if let Some(m) = ORDINAL_MARKER.find(line) {
        (LineMarker::Ordinal, &line[m.end()..])
    } else if let Some(rest) = line.strip_prefix("- ") {
        (LineMarker::Dash, rest)
    } else {
        (LineMarker::Plain, line)
    };

    ClassifiedLine {
        marker,
        body: body.trim(),
    }
}

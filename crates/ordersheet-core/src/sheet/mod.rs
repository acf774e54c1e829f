//! Order sheet parsing module.

mod assembler;
mod parser;
pub mod rules;

pub use assembler::{AssemblerState, DocumentAssembler, LineEvent, ParseStats, Phase};
pub use parser::{ParseOutcome, SheetParser};

/// Trait for order sheet parsers.
///
/// Parsing is total: every input produces a best-effort sheet.
pub trait OrderSheetParser {
    /// Parse a whole document held in memory.
    fn parse(&self, text: &str) -> ParseOutcome;
}

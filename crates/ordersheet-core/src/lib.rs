//! Core library for checklist-style order sheets.
//!
//! This crate provides:
//! - Unicode whitespace and dash normalization for hand-typed lines
//! - Rule-based field extraction (prices, item names, line markers,
//!   quantities, notes, phone numbers)
//! - Customer identity resolution across repeated appearances
//! - A single-pass document assembler producing items, purchases and customers
//! - Aggregation summaries (billing, top spenders, top items, revenue)

pub mod error;
pub mod models;
pub mod sheet;
pub mod summary;

pub use error::{Result, SheetError};
pub use models::config::SheetConfig;
pub use models::sheet::{Customer, CustomerRegistry, Item, OrderSheet, Purchase};
pub use sheet::{
    AssemblerState, DocumentAssembler, LineEvent, OrderSheetParser, ParseOutcome, ParseStats,
    Phase, SheetParser,
};

//! Single-pass document assembly.
//!
//! Each line is a pure transition from the previous [`AssemblerState`] to a
//! new one plus a [`LineEvent`]. The [`DocumentAssembler`] folds those events
//! into the finished items, the customer registry and the parse statistics.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::rules::{
    classify_line, normalize_unicode, remove_item_note, strip_price, CustomerEntry,
    CustomerFieldExtractor, FieldExtractor, PriceExtractor,
};
use crate::models::config::DEFAULT_SKIP_MARKER;
use crate::models::sheet::{CustomerRegistry, Item, OrderSheet};

/// Where the assembler is in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No item line seen yet; customer lines have nothing to attach to.
    NoCurrentItem,
    /// An item is open and collects customer lines.
    HasCurrentItem,
    /// The skip marker was seen; every later line is discarded.
    SkippingSection,
}

/// Per-line state carried through the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblerState {
    current: Option<Item>,
    skipping: bool,
}

impl AssemblerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match (self.skipping, &self.current) {
            (true, _) => Phase::SkippingSection,
            (false, Some(_)) => Phase::HasCurrentItem,
            (false, None) => Phase::NoCurrentItem,
        }
    }

    /// The item currently collecting purchases.
    pub fn current_item(&self) -> Option<&Item> {
        self.current.as_ref()
    }

    /// Close the state, yielding the still-open item.
    ///
    /// An item opened before the skip marker is still emitted.
    pub fn into_current(self) -> Option<Item> {
        self.current
    }
}

/// What a single line did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// Empty after trimming and normalization.
    Blank,
    /// The line carried the skip marker.
    SectionSkipStarted,
    /// Discarded because the skipped section is active.
    SkippedInSection,
    /// A new item was opened; the previous one, if any, is complete.
    ItemOpened { closed: Option<Item> },
    /// A non-price line before the first item.
    IgnoredBeforeItem,
    /// A customer line under the current item. Checked entries have already
    /// been appended to the current item as a purchase.
    Customer(CustomerEntry),
}

/// Counters collected while assembling a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    pub lines_read: usize,
    pub blank_lines: usize,
    pub item_lines: usize,
    pub checked_lines: usize,
    pub unchecked_lines: usize,
    pub ignored_lines: usize,
    pub skipped_lines: usize,
}

/// Drives the line-by-line parse of one document.
pub struct DocumentAssembler {
    skip_marker: String,
    prices: PriceExtractor,
    customers: CustomerFieldExtractor,
    state: AssemblerState,
    items: Vec<Item>,
    registry: CustomerRegistry,
    stats: ParseStats,
}

impl DocumentAssembler {
    /// Create an assembler using the default skip marker.
    pub fn new() -> Self {
        Self::with_skip_marker(DEFAULT_SKIP_MARKER)
    }

    pub fn with_skip_marker(skip_marker: impl Into<String>) -> Self {
        Self {
            skip_marker: skip_marker.into(),
            prices: PriceExtractor::new(),
            customers: CustomerFieldExtractor::new(),
            state: AssemblerState::new(),
            items: Vec::new(),
            registry: CustomerRegistry::new(),
            stats: ParseStats::default(),
        }
    }

    /// Compute the transition for one raw line without touching the
    /// assembler's own state.
    pub fn step(&self, mut state: AssemblerState, raw_line: &str) -> (AssemblerState, LineEvent) {
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            return (state, LineEvent::Blank);
        }

        let normalized = normalize_unicode(trimmed);
        let line = normalized.trim();
        if line.is_empty() {
            return (state, LineEvent::Blank);
        }

        if line.contains(self.skip_marker.as_str()) {
            state.skipping = true;
            return (state, LineEvent::SectionSkipStarted);
        }

        if state.skipping {
            return (state, LineEvent::SkippedInSection);
        }

        if let Some(price) = self.prices.extract(line) {
            let (name, note_from) = strip_price(line, &price);
            let item = Item::new(remove_item_note(&name, note_from), price.value.amount);
            trace!(
                "Item '{}' at {} ({:?})",
                item.name, item.price, price.value.notation
            );
            let closed = state.current.replace(item);
            return (state, LineEvent::ItemOpened { closed });
        }

        if state.current.is_none() {
            return (state, LineEvent::IgnoredBeforeItem);
        }

        let entry = self.customers.extract(&classify_line(line));
        if entry.checked {
            if let Some(current) = state.current.as_mut() {
                current.purchases.push(entry.to_purchase());
            }
        }

        (state, LineEvent::Customer(entry))
    }

    /// Feed one raw line.
    pub fn push_line(&mut self, raw_line: &str) {
        let state = std::mem::take(&mut self.state);
        let (state, event) = self.step(state, raw_line);
        self.state = state;
        self.apply(event);
    }

    fn apply(&mut self, event: LineEvent) {
        self.stats.lines_read += 1;

        match event {
            LineEvent::Blank => self.stats.blank_lines += 1,
            LineEvent::SectionSkipStarted => {
                debug!("Entering skipped section at line {}", self.stats.lines_read);
                self.stats.skipped_lines += 1;
            }
            LineEvent::SkippedInSection => self.stats.skipped_lines += 1,
            LineEvent::IgnoredBeforeItem => self.stats.ignored_lines += 1,
            LineEvent::ItemOpened { closed } => {
                self.stats.item_lines += 1;
                if let Some(item) = closed {
                    self.close_item(item);
                }
            }
            LineEvent::Customer(entry) if entry.checked => {
                self.stats.checked_lines += 1;
                let customer = entry.to_customer();
                let key = customer.key.clone();
                if self.registry.upsert(customer) {
                    debug!("New customer '{}'", key);
                }
            }
            LineEvent::Customer(entry) => {
                self.stats.unchecked_lines += 1;
                trace!("Unchecked entry for '{}' discarded", entry.name);
            }
        }
    }

    fn close_item(&mut self, item: Item) {
        debug!(
            "Closed item '{}' with {} purchase(s)",
            item.name,
            item.purchases.len()
        );
        self.items.push(item);
    }

    /// Current state, for inspection between lines.
    pub fn state(&self) -> &AssemblerState {
        &self.state
    }

    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    /// Emit the open item and return the finished sheet.
    pub fn finish(mut self) -> (OrderSheet, ParseStats) {
        let state = std::mem::take(&mut self.state);
        if let Some(item) = state.into_current() {
            self.close_item(item);
        }

        let sheet = OrderSheet {
            items: self.items,
            customers: self.registry,
        };
        (sheet, self.stats)
    }
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self::new()
    }
}

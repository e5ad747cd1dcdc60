//! # Suggestion State
//!
//! The supplier product suggestion list and the hidden fields mirroring the
//! selected entry.
//!
//! ## Keystroke Flow
//! ```text
//! keystroke(text)
//!     │
//!     ├── mirror on?  scan CURRENT options for value == text
//!     │       ├── found  → hidden = {name, sku}
//!     │       └── none   → hidden = cleared
//!     │
//!     └── text non-empty? → schedule a lookup (see crate::debounce)
//!
//! payload arrives
//!     ├── JSON array → replace entries wholesale, re-render options
//!     └── otherwise  → ignored, list unchanged
//! ```
//!
//! The hidden fields are reconciled against the list as it is at keystroke
//! time, so they trail the list by one lookup.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::types::{HiddenSelection, SuggestionEntry};

/// One rendered suggestion option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SuggestionOption {
    /// Visible value: `[SKU] name` or `name`.
    pub value: String,
    /// Canonical name attribute.
    pub product_name: String,
    /// SKU attribute, absent when the entry has none.
    pub product_sku: Option<String>,
}

impl From<&SuggestionEntry> for SuggestionOption {
    fn from(entry: &SuggestionEntry) -> Self {
        SuggestionOption {
            value: entry.display_value(),
            product_name: entry.name.clone(),
            product_sku: entry.sku.clone(),
        }
    }
}

/// What a keystroke asks the driver to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeystrokeEffect {
    /// New hidden field values, `None` when mirroring is off.
    pub hidden: Option<HiddenSelection>,
    /// Whether a lookup should be scheduled for this text.
    pub schedule_lookup: bool,
}

/// Result of applying a search response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadOutcome {
    /// The list was replaced; these are the new options.
    Replaced(Vec<SuggestionOption>),
    /// The payload was not a sequence; the list is unchanged.
    Ignored,
}

/// Per-input suggestion state.
#[derive(Debug, Clone, Default)]
pub struct SuggestionState {
    entries: Vec<SuggestionEntry>,
    options: Vec<SuggestionOption>,
    hidden: HiddenSelection,
    mirror_selection: bool,
}

impl SuggestionState {
    pub fn new(mirror_selection: bool) -> Self {
        SuggestionState {
            mirror_selection,
            ..Default::default()
        }
    }

    pub fn entries(&self) -> &[SuggestionEntry] {
        &self.entries
    }

    pub fn options(&self) -> &[SuggestionOption] {
        &self.options
    }

    pub fn hidden(&self) -> &HiddenSelection {
        &self.hidden
    }

    /// Handles one keystroke with the input's full new text.
    pub fn on_keystroke(&mut self, text: &str) -> KeystrokeEffect {
        let hidden = self.mirror_selection.then(|| self.reconcile(text));
        KeystrokeEffect {
            hidden,
            schedule_lookup: !text.is_empty(),
        }
    }

    /// Mirrors the option whose visible value equals `text`, or clears.
    pub fn reconcile(&mut self, text: &str) -> HiddenSelection {
        self.hidden = self
            .entries
            .iter()
            .find(|entry| entry.display_value() == text)
            .map(HiddenSelection::from_entry)
            .unwrap_or_else(HiddenSelection::cleared);
        self.hidden.clone()
    }

    /// Applies a supplier search response.
    ///
    /// Array elements without a usable `name` are skipped; the array as a
    /// whole still replaces the list.
    pub fn apply_payload(&mut self, payload: Value) -> PayloadOutcome {
        let Value::Array(items) = payload else {
            return PayloadOutcome::Ignored;
        };

        self.entries = items.iter().filter_map(SuggestionEntry::from_json).collect();
        self.options = self.entries.iter().map(SuggestionOption::from).collect();
        PayloadOutcome::Replaced(self.options.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Row Templates
//!
//! Captures the shape of the first server-rendered row of each kind and
//! builds fresh rows from it.
//!
//! ```text
//! init:     body row 0 ──capture──► RowTemplate      (values cleared)
//!           foot vat 0 ──capture──► SummaryTemplate  (values cleared)
//!
//! later:    RowTemplate.instantiate()          ──► blank LineRow, no `required`
//!           SummaryTemplate.instantiate(r, a)  ──► VatSummaryRow for rate r
//! ```
//!
//! Appended rows never carry `required` constraints, so a trailing blank row
//! does not block form submission.

use crate::money::Money;
use crate::types::{LineRow, RequiredFields, VatRate, VatSummaryRow};

// =============================================================================
// Product Row Template
// =============================================================================

/// Prototype for new product rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RowTemplate {
    prototype: LineRow,
}

impl RowTemplate {
    /// Captures a row's shape, dropping its values.
    pub fn capture(row: &LineRow) -> Self {
        let mut prototype = row.clone();
        prototype.clear_values();
        RowTemplate { prototype }
    }

    /// Required flags of the captured row.
    pub fn captured_required(&self) -> RequiredFields {
        self.prototype.required
    }

    /// Builds a new blank row with required constraints stripped.
    pub fn instantiate(&self) -> LineRow {
        LineRow {
            required: RequiredFields::none(),
            ..self.prototype.clone()
        }
    }
}

// =============================================================================
// VAT Summary Row Template
// =============================================================================

/// Prototype for VAT summary rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryTemplate {
    prototype: VatSummaryRow,
}

impl SummaryTemplate {
    /// Captures a summary row's shape, dropping its values.
    pub fn capture(row: &VatSummaryRow) -> Self {
        let mut prototype = row.clone();
        prototype.rate.clear();
        prototype.amount.clear();
        SummaryTemplate { prototype }
    }

    /// Builds the summary row for one bucket.
    pub fn instantiate(&self, rate: VatRate, amount: Money, symbol: &str) -> VatSummaryRow {
        let mut row = self.prototype.clone();
        row.rate = rate.to_string();
        row.amount = amount.format(symbol);
        row
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Order Table Engine
//!
//! The state behind the order-line table: rows, per-rate VAT buckets, grand
//! totals and the footer view derived from them.
//!
//! ## Change Sweep
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One change event, start to finish                    │
//! │                                                                         │
//! │  set_cell(row, field, value)        (UI edit)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  begin_sweep() ← resets totals + buckets, bumps generation              │
//! │       │          emits one LookupRequest per non-empty row              │
//! │       │          appends a blank row if none is left                    │
//! │       │                                                                 │
//! │       ▼   (client awaits each lookup, in any order)                     │
//! │  apply_lookup(request, outcome)                                         │
//! │       ├── numeric  → write cells, bucket[rate] += vat, totals += row    │
//! │       ├── NaN      → clear the row's two output cells                   │
//! │       └── failed   → leave everything as it was                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  render_footer() ← pure: buckets + totals + seen rates → FooterView     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stale Results
//! A new sweep resets totals while lookups of the previous sweep may still be
//! in flight. With [`StaleResultPolicy::Accumulate`] a late result is added
//! to the new baseline (the page's long-standing behavior; every settled
//! lookup eventually wins). [`StaleResultPolicy::DiscardStale`] drops any
//! result whose sweep generation is not the current one.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::template::{RowTemplate, SummaryTemplate};
use crate::types::{Field, LineRow, PriceQuote, RequiredFields, VatRate, VatSummaryRow};
use crate::validation::format_number_input;
use crate::DEFAULT_CURRENCY_SYMBOL;

// =============================================================================
// Options
// =============================================================================

/// What to do with a lookup result from an earlier sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleResultPolicy {
    /// Add it to whatever the current totals are.
    #[default]
    Accumulate,
    /// Ignore it.
    #[serde(rename = "discard")]
    DiscardStale,
}

impl std::fmt::Display for StaleResultPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StaleResultPolicy::Accumulate => write!(f, "accumulate"),
            StaleResultPolicy::DiscardStale => write!(f, "discard"),
        }
    }
}

impl std::str::FromStr for StaleResultPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accumulate" => Ok(StaleResultPolicy::Accumulate),
            "discard" | "discard_stale" => Ok(StaleResultPolicy::DiscardStale),
            other => Err(format!(
                "Unknown stale result policy: '{}'. Valid options: accumulate, discard",
                other
            )),
        }
    }
}

/// Table construction options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    pub stale_results: StaleResultPolicy,
    pub currency_symbol: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            stale_results: StaleResultPolicy::default(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

// =============================================================================
// Skeleton
// =============================================================================

/// The server-rendered table the engine binds to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableSkeleton {
    /// Body rows; the first one is the product row template.
    pub rows: Vec<LineRow>,
    /// Pre-rendered VAT summary rows; the first one is the summary template.
    pub summary_rows: Vec<VatSummaryRow>,
}

impl TableSkeleton {
    /// One required product row and one VAT summary row, as the page ships.
    pub fn standard() -> Self {
        TableSkeleton {
            rows: vec![LineRow {
                required: RequiredFields::standard(),
                ..Default::default()
            }],
            summary_rows: vec![VatSummaryRow::default()],
        }
    }
}

// =============================================================================
// Buckets and Totals
// =============================================================================

/// Accumulated VAT amount per rate, ordered by ascending rate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VatBuckets(BTreeMap<VatRate, Money>);

impl VatBuckets {
    /// Adds an amount to a rate's bucket, creating it if absent.
    pub fn add(&mut self, rate: VatRate, amount: Money) {
        *self.0.entry(rate).or_default() += amount;
    }

    pub fn get(&self, rate: VatRate) -> Option<Money> {
        self.0.get(&rate).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VatRate, Money)> + '_ {
        self.0.iter().map(|(rate, amount)| (*rate, *amount))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum over every bucket.
    pub fn total(&self) -> Money {
        self.0.values().sum()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Running grand totals.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub ex_vat: Money,
    pub inc_vat: Money,
}

// =============================================================================
// Sweep & Lookups
// =============================================================================

/// One remote lookup the client must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    /// Row whose cells receive the result.
    pub row: usize,
    /// Sweep that issued the request.
    pub generation: u64,
    /// Lookup key.
    pub product_code: String,
}

/// Result of [`OrderTable::begin_sweep`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sweep {
    pub generation: u64,
    pub lookups: Vec<LookupRequest>,
    /// Index of the blank row appended by this sweep, if any.
    pub appended_row: Option<usize>,
}

/// What came back from the remote lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// A response body was received and parsed.
    Quote(PriceQuote),
    /// Network or transport failure; no data.
    Failed,
}

/// A row's share of the totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowContribution {
    pub rate: VatRate,
    pub vat_amount: Money,
    pub ex_vat: Money,
    pub inc_vat: Money,
}

/// What applying a lookup did to the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LookupEffect {
    /// The row has numeric values and was added to buckets and totals.
    Contributed(RowContribution),
    /// The row's data is not numeric; its output cells were cleared.
    Cleared,
    /// The lookup failed; nothing changed.
    Untouched,
    /// The result belongs to an older sweep and was dropped.
    Discarded,
}

impl LookupEffect {
    /// Returns true if the row or footer changed and should be re-rendered.
    pub fn needs_render(&self) -> bool {
        matches!(self, LookupEffect::Contributed(_) | LookupEffect::Cleared)
    }
}

// =============================================================================
// Footer View
// =============================================================================

/// One rendered VAT summary row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SummaryRowView {
    pub rate: VatRate,
    pub row: VatSummaryRow,
    /// First render of this rate: run the insertion animation.
    pub animate: bool,
}

/// The whole table foot. Summary rows always precede the totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FooterView {
    pub summary_rows: Vec<SummaryRowView>,
    pub total_ex_vat: String,
    pub total_inc_vat: String,
}

// =============================================================================
// Order Table
// =============================================================================

/// The order-line table engine.
#[derive(Debug, Clone)]
pub struct OrderTable {
    rows: Vec<LineRow>,
    row_template: RowTemplate,
    summary_template: SummaryTemplate,
    buckets: VatBuckets,
    totals: Totals,
    /// Rates whose summary row has finished its first animation.
    seen_rates: BTreeSet<VatRate>,
    generation: u64,
    options: TableOptions,
}

impl OrderTable {
    /// Binds to a server-rendered skeleton.
    ///
    /// Clears every pre-filled value, captures the first product row and the
    /// first VAT summary row as templates and drops the pre-rendered summary
    /// rows (they are regenerated from buckets).
    pub fn new(skeleton: TableSkeleton, options: TableOptions) -> CoreResult<Self> {
        let TableSkeleton {
            mut rows,
            summary_rows,
        } = skeleton;

        let first_row = rows.first().ok_or_else(|| CoreError::MissingTemplate {
            kind: "product".to_string(),
        })?;
        let first_summary = summary_rows
            .first()
            .ok_or_else(|| CoreError::MissingTemplate {
                kind: "vat".to_string(),
            })?;

        let row_template = RowTemplate::capture(first_row);
        let summary_template = SummaryTemplate::capture(first_summary);

        for row in &mut rows {
            row.clear_values();
        }

        Ok(OrderTable {
            rows,
            row_template,
            summary_template,
            buckets: VatBuckets::default(),
            totals: Totals::default(),
            seen_rates: BTreeSet::new(),
            generation: 0,
            options,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn rows(&self) -> &[LineRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> CoreResult<&LineRow> {
        self.rows.get(index).ok_or(CoreError::RowOutOfRange {
            index,
            len: self.rows.len(),
        })
    }

    pub fn buckets(&self) -> &VatBuckets {
        &self.buckets
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn has_rendered_rate(&self, rate: VatRate) -> bool {
        self.seen_rates.contains(&rate)
    }

    /// Number of rows whose values are all valid.
    pub fn complete_rows(&self) -> usize {
        self.rows.iter().filter(|row| row.is_complete()).count()
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Sets an input cell, as the user typing into the page would.
    pub fn set_cell(&mut self, index: usize, field: Field, value: impl Into<String>) -> CoreResult<()> {
        let len = self.rows.len();
        let row = self
            .rows
            .get_mut(index)
            .ok_or(CoreError::RowOutOfRange { index, len })?;
        row.set(field, value);
        Ok(())
    }

    /// True unless at least one row has every text input empty.
    pub fn is_row_needed(&self) -> bool {
        !self.rows.iter().any(LineRow::is_blank)
    }

    /// Starts a recompute after any change in the body.
    pub fn begin_sweep(&mut self) -> Sweep {
        self.generation += 1;
        self.buckets.clear();
        self.totals = Totals::default();

        let lookups = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.is_empty())
            .map(|(index, row)| LookupRequest {
                row: index,
                generation: self.generation,
                product_code: row.product_code.clone(),
            })
            .collect();

        let appended_row = if self.is_row_needed() {
            self.rows.push(self.row_template.instantiate());
            Some(self.rows.len() - 1)
        } else {
            None
        };

        Sweep {
            generation: self.generation,
            lookups,
            appended_row,
        }
    }

    // =========================================================================
    // Lookup Results
    // =========================================================================

    /// Applies one settled lookup to its row and the aggregates.
    ///
    /// ## Per-Row Math
    /// ```text
    /// unit_cost  = cost + assemblycosts
    /// vat_amount = (unit_cost × quantity / 100) × vat_rate
    /// subtotal   = unit_cost × quantity + vat_amount
    /// ```
    pub fn apply_lookup(&mut self, request: &LookupRequest, outcome: LookupOutcome) -> CoreResult<LookupEffect> {
        if self.options.stale_results == StaleResultPolicy::DiscardStale
            && request.generation != self.generation
        {
            return Ok(LookupEffect::Discarded);
        }

        let len = self.rows.len();
        let symbol = self.options.currency_symbol.clone();
        let row = self
            .rows
            .get_mut(request.row)
            .ok_or(CoreError::RowOutOfRange {
                index: request.row,
                len,
            })?;

        let quote = match outcome {
            LookupOutcome::Quote(quote) => quote,
            LookupOutcome::Failed => return Ok(LookupEffect::Untouched),
        };

        row.unit_cost = quote.unit_cost().map(format_number_input).unwrap_or_default();
        row.vat_rate = quote.vat.map(format_number_input).unwrap_or_default();

        let contribution = compute_contribution(row);
        match contribution {
            Some(c) => {
                row.vat_amount = c.vat_amount.format(&symbol);
                row.subtotal = c.inc_vat.format(&symbol);
                self.buckets.add(c.rate, c.vat_amount);
                self.totals.ex_vat += c.ex_vat;
                self.totals.inc_vat += c.inc_vat;
                Ok(LookupEffect::Contributed(c))
            }
            None => {
                row.clear_outputs();
                Ok(LookupEffect::Cleared)
            }
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Renders the table foot from buckets, totals and seen rates.
    ///
    /// Pure: calling it twice without state changes gives the same view.
    pub fn render_footer(&self) -> FooterView {
        let symbol = &self.options.currency_symbol;
        let summary_rows = self
            .buckets
            .iter()
            .map(|(rate, amount)| SummaryRowView {
                rate,
                row: self.summary_template.instantiate(rate, amount, symbol),
                animate: !self.seen_rates.contains(&rate),
            })
            .collect();

        FooterView {
            summary_rows,
            total_ex_vat: self.totals.ex_vat.format(symbol),
            total_inc_vat: self.totals.inc_vat.format(symbol),
        }
    }

    /// Completion callback of a summary row's first animation.
    pub fn mark_rate_rendered(&mut self, rate: VatRate) {
        self.seen_rates.insert(rate);
    }
}

/// Computes a row's contribution, `None` when any input is not numeric.
fn compute_contribution(row: &LineRow) -> Option<RowContribution> {
    let unit_cost = row.parsed_unit_cost()?;
    let rate = row.parsed_vat_rate()?;
    let quantity = row.parsed_quantity()?;

    let ex_vat = unit_cost * quantity;
    let vat_amount = (ex_vat / 100.0) * rate.percentage();
    let subtotal = ex_vat + vat_amount;

    Some(RowContribution {
        rate,
        vat_amount: Money::new(vat_amount)?,
        ex_vat: Money::new(ex_vat)?,
        inc_vat: Money::new(subtotal)?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

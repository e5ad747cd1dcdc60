//! # Insertion Animation
//!
//! View model for sliding a newly inserted row open.
//!
//! ```text
//!   begin()                        next frame tick           finish()
//!   ┌────────────────────────┐                        ┌────────────────────────┐
//!   │ row.collapsed = true   │ ─────────────────────► │ row.collapsed = false  │
//!   │ cell ─► [wrapper] cell │    (UI applies the     │ → CSS transition runs  │
//!   └────────────────────────┘     collapsed state)   └────────────────────────┘
//! ```
//!
//! Cell content is wrapped in an inner container so the transition can
//! animate the wrapper independently of table layout. The client drives the
//! frame tick and the completion callback.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{LineRow, VatRate, VatSummaryRow};

/// Which row an animation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "key", rename_all = "snake_case")]
pub enum RowTarget {
    /// Body row at this position.
    Line(usize),
    /// Foot summary row for this rate.
    Summary(VatRate),
}

/// One cell as the UI renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CellView {
    pub text: String,
    /// Content sits inside an inner wrapper element.
    pub wrapped: bool,
}

impl CellView {
    fn new(text: &str) -> Self {
        CellView {
            text: text.to_string(),
            wrapped: false,
        }
    }
}

/// One row as the UI renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RowView {
    pub cells: Vec<CellView>,
    /// The row carries the collapsed marker.
    pub collapsed: bool,
}

impl RowView {
    /// View of a body row, one cell per column.
    pub fn from_line(row: &LineRow) -> Self {
        let cells = [
            &row.product_code,
            &row.unit_cost,
            &row.vat_rate,
            &row.quantity,
            &row.vat_amount,
            &row.subtotal,
        ]
        .into_iter()
        .map(|text| CellView::new(text))
        .collect();
        RowView {
            cells,
            collapsed: false,
        }
    }

    /// View of a summary row: rate cell and amount cell.
    pub fn from_summary(row: &VatSummaryRow) -> Self {
        RowView {
            cells: vec![CellView::new(&row.rate), CellView::new(&row.amount)],
            collapsed: false,
        }
    }
}

/// Wraps a cell's content in an inner container.
///
/// Returns false if the cell was already wrapped.
pub fn wrap_inner(cell: &mut CellView) -> bool {
    if cell.wrapped {
        return false;
    }
    cell.wrapped = true;
    true
}

/// First phase: collapse the row and wrap every cell.
pub fn begin(row: &mut RowView) {
    row.collapsed = true;
    for cell in &mut row.cells {
        wrap_inner(cell);
    }
}

/// Second phase, one frame later: drop the collapsed marker.
pub fn finish(row: &mut RowView) {
    row.collapsed = false;
}

// =============================================================================
// Unit Tests
// =============================================================================

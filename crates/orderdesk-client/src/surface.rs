//! # UI Attachment Surfaces
//!
//! What the drivers call to show things. The page (or any other front end)
//! implements these; the drivers never touch a UI directly.
//!
//! ```text
//!  OrderLineTable ──► TableSurface       append_row / update_row
//!                                        write_line / render_footer
//!
//!  SuggestionInput ─► SuggestionSurface  replace_options / set_hidden
//!                                        attach_list
//!
//!  SuggestionInput ◄─ SupplierSource     current_supplier (read at search time)
//!
//!  both ────────────► FrameClock         next_frame (display refresh)
//! ```
//!
//! Surface methods are synchronous and must not block. Row writes, footer
//! renders, option lists and hidden fields are pushed while the driver holds
//! its state lock, so they land in the order the state changed. Animation
//! phases (`append_row` aside) are pushed from their own tasks after a frame
//! tick and may interleave with those renders.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, trace};

use orderdesk_core::animation::{RowTarget, RowView};
use orderdesk_core::{FooterView, HiddenSelection, LineRow, SuggestionOption};

/// The order table's body and foot.
pub trait TableSurface: Send + Sync {
    /// A new body row was appended at `index`.
    fn append_row(&self, index: usize, view: &RowView);

    /// A row's presentation changed (animation phases).
    fn update_row(&self, target: &RowTarget, view: &RowView);

    /// A body row's cells changed after a lookup.
    fn write_line(&self, index: usize, row: &LineRow);

    /// Replace every VAT summary row and both totals.
    fn render_footer(&self, footer: &FooterView);
}

/// The suggestion list, the input's list binding and the hidden fields.
pub trait SuggestionSurface: Send + Sync {
    /// Drop every option and show these instead.
    fn replace_options(&self, options: &[SuggestionOption]);

    /// Write the hidden product name and SKU fields.
    fn set_hidden(&self, hidden: &HiddenSelection);

    /// Bind the suggestion list to the input.
    fn attach_list(&self);
}

/// The supplier selector next to a suggestion input.
pub trait SupplierSource: Send + Sync {
    /// Identifier of the supplier selected right now.
    fn current_supplier(&self) -> String;
}

/// Source of "next display refresh" ticks.
#[async_trait]
pub trait FrameClock: Send + Sync {
    async fn next_frame(&self);
}

// =============================================================================
// Tokio Frame Clock
// =============================================================================

/// Default frame period (60 Hz).
pub const FRAME_PERIOD: Duration = Duration::from_millis(16);

/// Frame clock backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy)]
pub struct TokioFrameClock {
    period: Duration,
}

impl TokioFrameClock {
    pub fn new(period: Duration) -> Self {
        TokioFrameClock { period }
    }
}

impl Default for TokioFrameClock {
    fn default() -> Self {
        Self::new(FRAME_PERIOD)
    }
}

#[async_trait]
impl FrameClock for TokioFrameClock {
    async fn next_frame(&self) {
        tokio::time::sleep(self.period).await;
    }
}

// =============================================================================
// Logging Surface
// =============================================================================

/// Headless surface that only logs. Used by the `quote` binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSurface;

impl TableSurface for LoggingSurface {
    fn append_row(&self, index: usize, _view: &RowView) {
        debug!(index, "Row appended");
    }

    fn update_row(&self, target: &RowTarget, view: &RowView) {
        trace!(?target, collapsed = view.collapsed, "Row view updated");
    }

    fn write_line(&self, index: usize, row: &LineRow) {
        debug!(index, code = %row.product_code, subtotal = %row.subtotal, "Row written");
    }

    fn render_footer(&self, footer: &FooterView) {
        debug!(
            rates = footer.summary_rows.len(),
            total = %footer.total_inc_vat,
            "Footer rendered"
        );
    }
}

impl SuggestionSurface for LoggingSurface {
    fn replace_options(&self, options: &[SuggestionOption]) {
        debug!(count = options.len(), "Suggestions replaced");
    }

    fn set_hidden(&self, hidden: &HiddenSelection) {
        debug!(name = %hidden.name, sku = %hidden.sku, "Hidden selection set");
    }

    fn attach_list(&self) {
        debug!("Suggestion list attached");
    }
}

//! # Order Line Table Driver
//!
//! Runs [`OrderTable`] against a price lookup service, a UI surface and a
//! frame clock.
//!
//! ## Task Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        handle_change()                                  │
//! │                                                                         │
//! │  lock table ─► begin_sweep() ─► append blank row (collapsed) ─► unlock │
//! │                     │                        │                          │
//! │                     │                        └─► task: next_frame,      │
//! │                     │                            uncollapse             │
//! │                     ▼                                                   │
//! │   ┌──────────────┐ ┌──────────────┐ ┌──────────────┐                    │
//! │   │ lookup row 0 │ │ lookup row 2 │ │ lookup row 5 │  one task each,    │
//! │   └──────┬───────┘ └──────┬───────┘ └──────┬───────┘  never cancelled   │
//! │          ▼                ▼                ▼                            │
//! │     lock ─► apply_lookup ─► write_line ─► render_footer ─► unlock      │
//! │          │                                                              │
//! │          └─► new rates: collapse, next_frame, uncollapse, mark seen    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A change with no non-empty rows renders the reset footer right away,
//! since no lookup will do it.
//!
//! A newer change does not stop the lookups of an older one. What happens to
//! their late results is up to [`StaleResultPolicy`].
//!
//! [`StaleResultPolicy`]: orderdesk_core::StaleResultPolicy

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use orderdesk_core::animation::{self, RowTarget, RowView};
use orderdesk_core::order_table::{LookupRequest, SummaryRowView, TableSkeleton, Totals};
use orderdesk_core::{Field, FooterView, LineRow, LookupOutcome, OrderTable, PriceQuote, TableOptions};

use crate::error::ClientResult;
use crate::lookup::PriceLookup;
use crate::surface::{FrameClock, TableSurface};

struct Shared {
    table: Mutex<OrderTable>,
    lookup: Arc<dyn PriceLookup>,
    surface: Arc<dyn TableSurface>,
    clock: Arc<dyn FrameClock>,
}

/// One order-line table on the page.
#[derive(Clone)]
pub struct OrderLineTable {
    shared: Arc<Shared>,
}

/// Handle to the work started by one change.
#[derive(Debug)]
pub struct SweepHandle {
    generation: u64,
    lookups: usize,
    tasks: Vec<JoinHandle<()>>,
}

impl SweepHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of lookups this change issued.
    pub fn lookups(&self) -> usize {
        self.lookups
    }

    /// Waits for every lookup and animation of this change.
    pub async fn settled(self) {
        for task in self.tasks {
            if let Err(e) = task.await {
                if e.is_panic() {
                    error!(error = %e, "Table task panicked");
                }
            }
        }
    }
}

impl OrderLineTable {
    /// Binds to a table skeleton.
    pub fn new(
        skeleton: TableSkeleton,
        lookup: Arc<dyn PriceLookup>,
        surface: Arc<dyn TableSurface>,
        clock: Arc<dyn FrameClock>,
        options: TableOptions,
    ) -> ClientResult<Self> {
        let table = OrderTable::new(skeleton, options)?;
        Ok(OrderLineTable {
            shared: Arc::new(Shared {
                table: Mutex::new(table),
                lookup,
                surface,
                clock,
            }),
        })
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Sets a cell without recomputing.
    pub async fn set_cell(&self, row: usize, field: Field, value: &str) -> ClientResult<()> {
        self.shared.table.lock().await.set_cell(row, field, value)?;
        Ok(())
    }

    /// Sets a cell and handles the resulting change event.
    pub async fn edit(&self, row: usize, field: Field, value: &str) -> ClientResult<SweepHandle> {
        self.set_cell(row, field, value).await?;
        Ok(self.handle_change().await)
    }

    /// Handles a change anywhere in the table body.
    pub async fn handle_change(&self) -> SweepHandle {
        let mut table = self.shared.table.lock().await;
        let sweep = table.begin_sweep();
        debug!(
            generation = sweep.generation,
            lookups = sweep.lookups.len(),
            "Table sweep started"
        );

        let mut tasks = Vec::with_capacity(sweep.lookups.len() + 1);

        if let Some(index) = sweep.appended_row {
            if let Ok(row) = table.row(index) {
                let mut view = RowView::from_line(row);
                animation::begin(&mut view);
                self.shared.surface.append_row(index, &view);
                tasks.push(tokio::spawn(Arc::clone(&self.shared).finish_animation(
                    RowTarget::Line(index),
                    view,
                )));
            }
        }

        // Nothing will report back, so show the reset totals now.
        if sweep.lookups.is_empty() {
            self.shared.surface.render_footer(&table.render_footer());
        }
        drop(table);

        let lookups = sweep.lookups.len();
        for request in sweep.lookups {
            let shared = Arc::clone(&self.shared);
            tasks.push(tokio::spawn(shared.run_lookup(request)));
        }

        SweepHandle {
            generation: sweep.generation,
            lookups,
            tasks,
        }
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    pub async fn rows(&self) -> Vec<LineRow> {
        self.shared.table.lock().await.rows().to_vec()
    }

    pub async fn footer(&self) -> FooterView {
        self.shared.table.lock().await.render_footer()
    }

    pub async fn totals(&self) -> Totals {
        self.shared.table.lock().await.totals()
    }
}

impl Shared {
    async fn run_lookup(self: Arc<Self>, request: LookupRequest) {
        let outcome = match self.lookup.lookup_price(&request.product_code).await {
            Ok(body) => LookupOutcome::Quote(PriceQuote::from_json(&body)),
            Err(e) => {
                warn!(
                    row = request.row,
                    code = %request.product_code,
                    error = %e,
                    "Price lookup failed"
                );
                LookupOutcome::Failed
            }
        };

        let new_rates: Vec<SummaryRowView> = {
            let mut table = self.table.lock().await;
            let effect = match table.apply_lookup(&request, outcome) {
                Ok(effect) => effect,
                Err(e) => {
                    error!(row = request.row, error = %e, "Lookup result has no row");
                    return;
                }
            };
            debug!(row = request.row, generation = request.generation, ?effect, "Lookup applied");

            if !effect.needs_render() {
                return;
            }

            if let Ok(row) = table.row(request.row) {
                self.surface.write_line(request.row, row);
            }
            let footer = table.render_footer();
            self.surface.render_footer(&footer);
            footer.summary_rows.into_iter().filter(|r| r.animate).collect()
        };

        for summary in new_rates {
            let mut view = RowView::from_summary(&summary.row);
            animation::begin(&mut view);
            let target = RowTarget::Summary(summary.rate);
            self.surface.update_row(&target, &view);
            Arc::clone(&self).finish_animation(target, view).await;
            self.table.lock().await.mark_rate_rendered(summary.rate);
        }
    }

    async fn finish_animation(self: Arc<Self>, target: RowTarget, mut view: RowView) {
        self.clock.next_frame().await;
        animation::finish(&mut view);
        self.surface.update_row(&target, &view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex as StdMutex;

    use crate::error::ClientError;

    struct FixedLookup;

    #[async_trait]
    impl PriceLookup for FixedLookup {
        async fn lookup_price(&self, code: &str) -> ClientResult<Value> {
            match code {
                "DOWN" => Err(ClientError::Transport("connection refused".into())),
                _ => Ok(json!({"cost": 10, "assemblycosts": 2, "vat": 21})),
            }
        }
    }

    #[derive(Default)]
    struct Frames(StdMutex<Vec<String>>);

    impl TableSurface for Frames {
        fn append_row(&self, index: usize, view: &RowView) {
            self.0.lock().unwrap().push(format!("append {} {}", index, view.collapsed));
        }
        fn update_row(&self, target: &RowTarget, view: &RowView) {
            self.0.lock().unwrap().push(format!("update {:?} {}", target, view.collapsed));
        }
        fn write_line(&self, index: usize, row: &LineRow) {
            self.0.lock().unwrap().push(format!("line {} {}", index, row.subtotal));
        }
        fn render_footer(&self, footer: &FooterView) {
            self.0.lock().unwrap().push(format!("footer {}", footer.total_inc_vat));
        }
    }

    struct NoWait;

    #[async_trait]
    impl FrameClock for NoWait {
        async fn next_frame(&self) {}
    }

    fn driver(surface: Arc<Frames>) -> OrderLineTable {
        OrderLineTable::new(
            TableSkeleton::standard(),
            Arc::new(FixedLookup),
            surface,
            Arc::new(NoWait),
            TableOptions::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_edit_runs_lookup_and_renders() {
        let surface = Arc::new(Frames::default());
        let table = driver(Arc::clone(&surface));

        table.set_cell(0, Field::Quantity, "3").await.unwrap();
        let handle = table.edit(0, Field::ProductCode, "P-1").await.unwrap();
        assert_eq!(handle.lookups(), 1);
        handle.settled().await;

        let log = surface.0.lock().unwrap().clone();
        assert_eq!(log[0], "append 1 true");
        assert!(log.contains(&"update Line(1) false".to_string()));
        assert!(log.contains(&"line 0 € 43.56".to_string()));
        assert!(log.contains(&"footer € 43.56".to_string()));
        assert_eq!(table.footer().await.summary_rows.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_lookup_renders_nothing() {
        let surface = Arc::new(Frames::default());
        let table = driver(Arc::clone(&surface));

        table.set_cell(0, Field::Quantity, "3").await.unwrap();
        table.edit(0, Field::ProductCode, "DOWN").await.unwrap().settled().await;

        let log = surface.0.lock().unwrap().clone();
        assert!(log.iter().all(|entry| !entry.starts_with("line")));
        assert_eq!(table.totals().await, Totals::default());
    }

    #[tokio::test]
    async fn test_change_without_lookups_renders_reset_footer() {
        let surface = Arc::new(Frames::default());
        let table = driver(Arc::clone(&surface));

        table.set_cell(0, Field::Quantity, "3").await.unwrap();
        table.edit(0, Field::ProductCode, "P-1").await.unwrap().settled().await;
        let handle = table.edit(0, Field::ProductCode, "").await.unwrap();
        assert_eq!(handle.lookups(), 0);
        handle.settled().await;

        let log = surface.0.lock().unwrap().clone();
        assert_eq!(log.last().unwrap(), "footer € 0.00");
    }

    #[tokio::test]
    async fn test_edit_out_of_range_is_error() {
        let table = driver(Arc::new(Frames::default()));
        let err = table.edit(3, Field::Quantity, "1").await.unwrap_err();
        assert!(matches!(err, ClientError::Core(_)));
    }
}

//! In-memory services and surfaces shared by the driver tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use orderdesk_client::{ClientError, ClientResult, FrameClock, PriceLookup, SupplierSearch};
use orderdesk_client::{SuggestionSurface, SupplierSource, TableSurface};
use orderdesk_core::animation::{RowTarget, RowView};
use orderdesk_core::{FooterView, HiddenSelection, LineRow, SuggestionOption};

// =============================================================================
// Fake Catalog
// =============================================================================

/// Lookup service answering from fixed tables.
#[derive(Default)]
pub struct FakeCatalog {
    prices: HashMap<String, Value>,
    searches: HashMap<String, Value>,
    down: HashSet<String>,
    delays: HashMap<String, Duration>,
    pub price_calls: Mutex<Vec<String>>,
    pub search_calls: Mutex<Vec<(String, String)>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, code: &str, cost: f64, assembly: f64, vat: f64) -> Self {
        self.prices.insert(
            code.to_string(),
            json!({"cost": cost, "assemblycosts": assembly, "vat": vat}),
        );
        self
    }

    pub fn with_body(mut self, code: &str, body: Value) -> Self {
        self.prices.insert(code.to_string(), body);
        self
    }

    pub fn with_search(mut self, name: &str, body: Value) -> Self {
        self.searches.insert(name.to_string(), body);
        self
    }

    /// Requests for this key fail with a transport error.
    pub fn with_outage(mut self, key: &str) -> Self {
        self.down.insert(key.to_string());
        self
    }

    /// Requests for this key take `delay` to answer.
    pub fn with_delay(mut self, key: &str, delay: Duration) -> Self {
        self.delays.insert(key.to_string(), delay);
        self
    }

    pub fn price_calls(&self) -> Vec<String> {
        self.price_calls.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> Vec<(String, String)> {
        self.search_calls.lock().unwrap().clone()
    }

    async fn respond(&self, key: &str, table: &HashMap<String, Value>) -> ClientResult<Value> {
        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }
        if self.down.contains(key) {
            return Err(ClientError::Transport(format!("{} unreachable", key)));
        }
        table.get(key).cloned().ok_or(ClientError::Http {
            status: 404,
            url: key.to_string(),
        })
    }
}

#[async_trait]
impl PriceLookup for FakeCatalog {
    async fn lookup_price(&self, product_code: &str) -> ClientResult<Value> {
        self.price_calls.lock().unwrap().push(product_code.to_string());
        self.respond(product_code, &self.prices).await
    }
}

#[async_trait]
impl SupplierSearch for FakeCatalog {
    async fn find_products(&self, supplier: &str, name: &str) -> ClientResult<Value> {
        self.search_calls
            .lock()
            .unwrap()
            .push((supplier.to_string(), name.to_string()));
        self.respond(name, &self.searches).await
    }
}

// =============================================================================
// Recording Surfaces
// =============================================================================

/// Table surface keeping the latest state of everything it was shown.
#[derive(Default)]
pub struct RecordingTable {
    pub appended: Mutex<Vec<usize>>,
    pub lines: Mutex<HashMap<usize, LineRow>>,
    pub footers: Mutex<Vec<FooterView>>,
    pub row_updates: Mutex<Vec<(RowTarget, bool)>>,
}

impl RecordingTable {
    pub fn last_footer(&self) -> Option<FooterView> {
        self.footers.lock().unwrap().last().cloned()
    }

    pub fn line(&self, index: usize) -> Option<LineRow> {
        self.lines.lock().unwrap().get(&index).cloned()
    }

    pub fn updates_for(&self, target: RowTarget) -> Vec<bool> {
        self.row_updates
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| *t == target)
            .map(|(_, collapsed)| *collapsed)
            .collect()
    }
}

impl TableSurface for RecordingTable {
    fn append_row(&self, index: usize, _view: &RowView) {
        self.appended.lock().unwrap().push(index);
    }

    fn update_row(&self, target: &RowTarget, view: &RowView) {
        self.row_updates.lock().unwrap().push((*target, view.collapsed));
    }

    fn write_line(&self, index: usize, row: &LineRow) {
        self.lines.lock().unwrap().insert(index, row.clone());
    }

    fn render_footer(&self, footer: &FooterView) {
        self.footers.lock().unwrap().push(footer.clone());
    }
}

/// Suggestion surface keeping what the input currently shows.
#[derive(Default)]
pub struct RecordingSuggestions {
    pub options: Mutex<Vec<SuggestionOption>>,
    pub hidden: Mutex<Vec<HiddenSelection>>,
    pub renders: Mutex<usize>,
    pub attached: Mutex<usize>,
}

impl RecordingSuggestions {
    pub fn values(&self) -> Vec<String> {
        self.options.lock().unwrap().iter().map(|o| o.value.clone()).collect()
    }

    pub fn last_hidden(&self) -> Option<HiddenSelection> {
        self.hidden.lock().unwrap().last().cloned()
    }
}

impl SuggestionSurface for RecordingSuggestions {
    fn replace_options(&self, options: &[SuggestionOption]) {
        *self.options.lock().unwrap() = options.to_vec();
        *self.renders.lock().unwrap() += 1;
    }

    fn set_hidden(&self, hidden: &HiddenSelection) {
        self.hidden.lock().unwrap().push(hidden.clone());
    }

    fn attach_list(&self) {
        *self.attached.lock().unwrap() += 1;
    }
}

// =============================================================================
// Supplier Selector
// =============================================================================

/// Supplier selector the test can change at any time.
pub struct SelectedSupplier(Mutex<String>);

impl SelectedSupplier {
    pub fn new(supplier: &str) -> Self {
        SelectedSupplier(Mutex::new(supplier.to_string()))
    }

    pub fn select(&self, supplier: &str) {
        *self.0.lock().unwrap() = supplier.to_string();
    }
}

impl SupplierSource for SelectedSupplier {
    fn current_supplier(&self) -> String {
        self.0.lock().unwrap().clone()
    }
}

// =============================================================================
// Frame Clock
// =============================================================================

/// Frame clock that only yields to the scheduler.
pub struct InstantClock;

#[async_trait]
impl FrameClock for InstantClock {
    async fn next_frame(&self) {
        tokio::task::yield_now().await;
    }
}

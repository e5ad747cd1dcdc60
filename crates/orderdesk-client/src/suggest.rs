//! # Supplier Product Suggestion Driver
//!
//! Debounced type-ahead over a supplier's catalog.
//!
//! ## Keystroke Timeline
//! ```text
//!  key  key  key          key                 (quiet 300ms)
//!   │    │    │            │                        │
//!   ▼    ▼    ▼            ▼                        ▼
//!  [t1]─x                                                 x = cancelled
//!       [t2]─x
//!            [t3]─x
//!                         [t4]─────────────────────► fire(t4)
//!                                                      │
//!                                                      ▼
//!                        find_products(current_supplier(), text)
//!                                                      │
//!                                     array? ──► replace options
//!                                     other  ──► keep old options
//!                                     error  ──► warn!, keep old options
//! ```
//!
//! Hidden fields are reconciled synchronously on every keystroke, against
//! the options of the previous search. The supplier is read from the
//! selector when the timer fires, not when the key was pressed.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use orderdesk_core::debounce::{Debouncer, Ticket};
use orderdesk_core::suggestion::PayloadOutcome;
use orderdesk_core::{HiddenSelection, SuggestionOption, SuggestionState};

use crate::config::SuggestSettings;
use crate::lookup::SupplierSearch;
use crate::schedule::ScheduledTask;
use crate::surface::{SuggestionSurface, SupplierSource};

struct InputState {
    suggestions: SuggestionState,
    debouncer: Debouncer,
    timer: ScheduledTask,
    list_attached: bool,
}

struct Inner {
    state: Mutex<InputState>,
    search: Arc<dyn SupplierSearch>,
    surface: Arc<dyn SuggestionSurface>,
    supplier: Arc<dyn SupplierSource>,
    debounce: Duration,
}

/// One supplier product input on the page.
#[derive(Clone)]
pub struct SuggestionInput {
    inner: Arc<Inner>,
}

impl SuggestionInput {
    /// Binds to the input's suggestion surface and its supplier selector.
    pub fn new(
        search: Arc<dyn SupplierSearch>,
        surface: Arc<dyn SuggestionSurface>,
        supplier: Arc<dyn SupplierSource>,
        settings: &SuggestSettings,
    ) -> Self {
        SuggestionInput {
            inner: Arc::new(Inner {
                state: Mutex::new(InputState {
                    suggestions: SuggestionState::new(settings.mirror_selection),
                    debouncer: Debouncer::new(),
                    timer: ScheduledTask::idle(),
                    list_attached: false,
                }),
                search,
                surface,
                supplier,
                debounce: settings.debounce(),
            }),
        }
    }

    /// Handles one keystroke: `text` is the input's full new value.
    pub async fn on_input(&self, text: &str) {
        let mut state = self.inner.state.lock().await;

        let effect = state.suggestions.on_keystroke(text);
        if let Some(hidden) = &effect.hidden {
            self.inner.surface.set_hidden(hidden);
        }

        state.timer.cancel();
        state.debouncer.cancel();

        if effect.schedule_lookup {
            let ticket = state.debouncer.schedule();
            let inner = Arc::clone(&self.inner);
            let text = text.to_string();
            state.timer = ScheduledTask::after(self.inner.debounce, async move {
                inner.search_now(ticket, text).await;
            });
        }
    }

    /// Returns true while a search is waiting for the quiet interval.
    pub async fn is_pending(&self) -> bool {
        self.inner.state.lock().await.debouncer.is_pending()
    }

    pub async fn options(&self) -> Vec<SuggestionOption> {
        self.inner.state.lock().await.suggestions.options().to_vec()
    }

    pub async fn hidden(&self) -> HiddenSelection {
        self.inner.state.lock().await.suggestions.hidden().clone()
    }
}

impl Inner {
    async fn search_now(&self, ticket: Ticket, text: String) {
        if !self.state.lock().await.debouncer.fire(ticket) {
            debug!(ticket = ticket.value(), "Superseded search dropped");
            return;
        }

        let supplier = self.supplier.current_supplier();

        debug!(%supplier, %text, "Searching supplier products");
        let payload = match self.search.find_products(&supplier, &text).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(%supplier, %text, error = %e, "Supplier product search failed");
                return;
            }
        };

        let mut state = self.state.lock().await;
        match state.suggestions.apply_payload(payload) {
            PayloadOutcome::Replaced(options) => {
                self.surface.replace_options(&options);
                if !state.list_attached {
                    self.surface.attach_list();
                    state.list_attached = true;
                }
            }
            PayloadOutcome::Ignored => {
                debug!(%supplier, %text, "Search response is not a list, ignored");
            }
        }
    }
}

//! # orderdesk-core: Pure Logic for the Ordering Page
//!
//! This crate holds everything the ordering page computes, as plain data and
//! pure functions. Timers, network calls and the actual UI live in
//! `orderdesk-client`; this crate only describes what they should show.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        orderdesk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Page (UI attachment layer)                   │   │
//! │  │      order table body/foot   ──   supplier product input        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ TableSurface / SuggestionSurface       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 orderdesk-client (tokio drivers)                │   │
//! │  │     OrderLineTable ── per-row lookups, SuggestionInput ── timer │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ orderdesk-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌─────────────┐  ┌────────────┐  ┌──────────┐ │   │
//! │  │   │   types   │  │ order_table │  │ suggestion │  │ debounce │ │   │
//! │  │   │  LineRow  │  │ VatBuckets  │  │  entries   │  │ tickets  │ │   │
//! │  │   │  VatRate  │  │ FooterView  │  │  hidden    │  │          │ │   │
//! │  │   └───────────┘  └─────────────┘  └────────────┘  └──────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineRow, VatRate, PriceQuote, SuggestionEntry)
//! - [`money`] - Currency amounts and their 2-decimal display
//! - [`error`] - Domain error types
//! - [`validation`] - Input parsing and checks
//! - [`template`] - Row construction from captured templates
//! - [`animation`] - Insertion animation view model
//! - [`order_table`] - The order-line table engine
//! - [`suggestion`] - Suggestion list and hidden selection state
//! - [`debounce`] - Cancel-and-reschedule state machine
//!
//! ## Example Usage
//!
//! ```rust
//! use orderdesk_core::order_table::{LookupOutcome, OrderTable, TableOptions, TableSkeleton};
//! use orderdesk_core::types::{Field, PriceQuote};
//!
//! let mut table = OrderTable::new(TableSkeleton::standard(), TableOptions::default()).unwrap();
//! table.set_cell(0, Field::ProductCode, "BOLT-M8").unwrap();
//! table.set_cell(0, Field::Quantity, "3").unwrap();
//!
//! let sweep = table.begin_sweep();
//! let quote = PriceQuote::from_json(&serde_json::json!({
//!     "cost": 10, "assemblycosts": 2, "vat": 21
//! }));
//! table.apply_lookup(&sweep.lookups[0], LookupOutcome::Quote(quote)).unwrap();
//!
//! assert_eq!(table.render_footer().total_inc_vat, "€ 43.56");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod animation;
pub mod debounce;
pub mod error;
pub mod money;
pub mod order_table;
pub mod suggestion;
pub mod template;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order_table::{FooterView, LookupOutcome, OrderTable, StaleResultPolicy, TableOptions};
pub use suggestion::{SuggestionOption, SuggestionState};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency symbol used when none is configured.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "€";

/// Quiet interval, in milliseconds, before a suggestion lookup fires.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Longest product code accepted as a lookup key.
pub const MAX_PRODUCT_CODE_LEN: usize = 64;

/// Longest partial name sent to the supplier search.
pub const MAX_SEARCH_TEXT_LEN: usize = 100;

//! # orderdesk-client: Async Drivers for the Ordering Page
//!
//! Connects the pure engines of `orderdesk-core` to timers, HTTP lookups and
//! a UI attachment layer.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        orderdesk-client                                 │
//! │                                                                         │
//! │   page events                                                           │
//! │      │ change / keystroke                                               │
//! │      ▼                                                                  │
//! │  ┌──────────────────┐        ┌──────────────────┐                      │
//! │  │ OrderLineTable   │        │ SuggestionInput  │                      │
//! │  │ (table.rs)       │        │ (suggest.rs)     │                      │
//! │  └───┬─────────┬────┘        └───┬─────────┬────┘                      │
//! │      │         │                 │         │                            │
//! │      │  PriceLookup     SupplierSearch     │  ScheduledTask             │
//! │      │         ▼                 ▼         │  (schedule.rs)             │
//! │      │     ┌──────────────────────────┐    │                            │
//! │      │     │ HttpCatalog (http.rs)    │    │                            │
//! │      │     │ reqwest, JSON bodies     │    │                            │
//! │      │     └──────────────────────────┘    │                            │
//! │      ▼                                     ▼                            │
//! │   TableSurface                     SuggestionSurface   (surface.rs)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - TOML + environment configuration
//! - [`error`] - Client error types
//! - [`lookup`] - Remote service traits
//! - [`http`] - reqwest implementation of the services
//! - [`surface`] - UI attachment traits and the frame clock
//! - [`schedule`] - Cancellable delayed tasks
//! - [`table`] - Order-line table driver
//! - [`suggest`] - Supplier product suggestion driver

pub mod config;
pub mod error;
pub mod http;
pub mod lookup;
pub mod schedule;
pub mod suggest;
pub mod surface;
pub mod table;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpCatalog;
pub use lookup::{PriceLookup, SupplierSearch};
pub use schedule::ScheduledTask;
pub use suggest::SuggestionInput;
pub use surface::{
    FrameClock, LoggingSurface, SuggestionSurface, SupplierSource, TableSurface, TokioFrameClock,
};
pub use table::{OrderLineTable, SweepHandle};

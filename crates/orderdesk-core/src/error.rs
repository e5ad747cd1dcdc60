//! # Error Types
//!
//! Domain-specific error types for orderdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  orderdesk-core errors (this file)                                     │
//! │  ├── CoreError        - Table structure / row addressing failures      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  orderdesk-client errors (separate crate)                              │
//! │  └── ClientError      - Config, HTTP and decode failures               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → logged, swallowed   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookup data problems are NOT errors here: a malformed price response is a
//! normal outcome that clears the row's derived cells.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Order table errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The table skeleton has no row of the given kind to capture a template from.
    ///
    /// ## When This Occurs
    /// - The server-rendered body has no product row
    /// - The foot has no VAT summary row
    #[error("Table skeleton has no {kind} row to use as template")]
    MissingTemplate { kind: String },

    /// A row index does not address an existing row.
    #[error("Row {index} out of range (table has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Field value is not a finite number.
    #[error("{field} is not a number: '{value}'")]
    InvalidNumber { field: String, value: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

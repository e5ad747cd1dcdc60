//! # Domain Types
//!
//! Core domain types used by the order table and the suggestion input.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineRow      │   │   PriceQuote    │   │ SuggestionEntry │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product_code   │   │  cost           │   │  name           │       │
//! │  │  unit_cost      │   │  assemblycosts  │   │  sku (optional) │       │
//! │  │  vat_rate       │   │  vat            │   └─────────────────┘       │
//! │  │  quantity       │   └─────────────────┘                              │
//! │  │  vat_amount  ◄── output                  ┌─────────────────┐       │
//! │  │  subtotal    ◄── output                  │ HiddenSelection │       │
//! │  └─────────────────┘   ┌─────────────────┐   │  name, sku      │       │
//! │                        │    VatRate      │   └─────────────────┘       │
//! │                        │  percent (f64)  │                              │
//! │                        │  exact value    │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows have no identity beyond their position in the table. Their cells
//! hold raw text exactly as the page shows it; numbers are parsed on demand
//! with number-input semantics (see [`crate::validation::parse_number_input`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use ts_rs::TS;

use crate::validation::{format_number_input, parse_number_input};

// =============================================================================
// VAT Rate
// =============================================================================

/// VAT rate as the exact percentage the lookup returned.
///
/// The rate is the key of a VAT bucket, so it needs total equality and
/// ordering. Only finite, non-negative percentages are accepted, which makes
/// `f64::total_cmp` agree with numeric order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VatRate(f64);

impl VatRate {
    /// Creates a VAT rate from basis points (2100 bps = 21%).
    #[inline]
    pub fn from_bps(bps: u32) -> Self {
        VatRate(f64::from(bps) / 100.0)
    }

    /// Creates a VAT rate from a percentage.
    ///
    /// Returns `None` for negative or non-finite percentages. No rounding is
    /// applied: `5.555` stays `5.555`.
    ///
    /// ## Example
    /// ```rust
    /// use orderdesk_core::types::VatRate;
    ///
    /// assert_eq!(VatRate::from_percentage(21.0), Some(VatRate::from_bps(2100)));
    /// assert_eq!(VatRate::from_percentage(5.555).unwrap().percentage(), 5.555);
    /// assert!(VatRate::from_percentage(-1.0).is_none());
    /// assert!(VatRate::from_percentage(f64::NAN).is_none());
    /// ```
    pub fn from_percentage(pct: f64) -> Option<Self> {
        if !pct.is_finite() || pct < 0.0 {
            return None;
        }
        // Folds -0.0 into 0.0 so both land in one bucket.
        Some(VatRate(pct + 0.0))
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0
    }
}

impl PartialEq for VatRate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for VatRate {}

impl PartialOrd for VatRate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VatRate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::hash::Hash for VatRate {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// Renders the percentage the way a number input shows it: `21`, `5.5`,
/// `5.555`.
impl fmt::Display for VatRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_number_input(self.0))
    }
}

// =============================================================================
// Line Row
// =============================================================================

/// The editable input fields of a line row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Product identifier, the lookup key.
    ProductCode,
    /// Unit price ex-VAT (filled from the lookup).
    UnitCost,
    /// VAT percentage (filled from the lookup).
    VatRate,
    /// Ordered quantity.
    Quantity,
}

impl Field {
    /// All text input fields, in column order.
    pub const INPUTS: [Field; 4] = [
        Field::ProductCode,
        Field::UnitCost,
        Field::VatRate,
        Field::Quantity,
    ];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::ProductCode => write!(f, "product code"),
            Field::UnitCost => write!(f, "unit cost"),
            Field::VatRate => write!(f, "vat rate"),
            Field::Quantity => write!(f, "quantity"),
        }
    }
}

/// Which inputs of a row carry a `required` constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RequiredFields {
    pub product_code: bool,
    pub quantity: bool,
}

impl RequiredFields {
    /// Required flags of the server-rendered first row.
    pub const fn standard() -> Self {
        RequiredFields {
            product_code: true,
            quantity: true,
        }
    }

    /// No required constraints (appended rows).
    pub const fn none() -> Self {
        RequiredFields {
            product_code: false,
            quantity: false,
        }
    }

    /// Returns true if any input is required.
    pub const fn any(&self) -> bool {
        self.product_code || self.quantity
    }
}

/// One order line, cell by cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineRow {
    /// Product identifier (user-entered).
    pub product_code: String,
    /// Unit price ex-VAT (derived from the lookup).
    pub unit_cost: String,
    /// VAT percentage (derived from the lookup).
    pub vat_rate: String,
    /// Quantity (user-entered).
    pub quantity: String,
    /// Formatted VAT amount (output cell).
    pub vat_amount: String,
    /// Formatted subtotal including VAT (output cell).
    pub subtotal: String,
    /// Required constraints on the inputs.
    pub required: RequiredFields,
}

impl LineRow {
    /// Returns the raw text of an input field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::ProductCode => &self.product_code,
            Field::UnitCost => &self.unit_cost,
            Field::VatRate => &self.vat_rate,
            Field::Quantity => &self.quantity,
        }
    }

    /// Sets the raw text of an input field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::ProductCode => self.product_code = value,
            Field::UnitCost => self.unit_cost = value,
            Field::VatRate => self.vat_rate = value,
            Field::Quantity => self.quantity = value,
        }
    }

    /// Clears every input and output value, keeping the constraints.
    pub fn clear_values(&mut self) {
        for field in Field::INPUTS {
            self.set(field, String::new());
        }
        self.clear_outputs();
    }

    /// Clears the two derived display cells.
    pub fn clear_outputs(&mut self) {
        self.vat_amount.clear();
        self.subtotal.clear();
    }

    /// A row is empty when its product identifier is blank.
    pub fn is_empty(&self) -> bool {
        self.product_code.is_empty()
    }

    /// A row is blank when every text input is empty.
    pub fn is_blank(&self) -> bool {
        Field::INPUTS.iter().all(|field| self.get(*field).is_empty())
    }

    /// A row is complete when every value needed for its totals is valid.
    pub fn is_complete(&self) -> bool {
        !self.is_empty()
            && self.parsed_unit_cost().is_some()
            && self.parsed_vat_rate().is_some()
            && self.parsed_quantity().is_some()
    }

    /// Quantity as a number, `None` when blank or not numeric.
    pub fn parsed_quantity(&self) -> Option<f64> {
        parse_number_input(&self.quantity)
    }

    /// Unit cost as a number, `None` when blank or not numeric.
    pub fn parsed_unit_cost(&self) -> Option<f64> {
        parse_number_input(&self.unit_cost)
    }

    /// VAT rate cell as a rate, `None` when blank, negative or not numeric.
    pub fn parsed_vat_rate(&self) -> Option<VatRate> {
        parse_number_input(&self.vat_rate).and_then(VatRate::from_percentage)
    }
}

// =============================================================================
// VAT Summary Row
// =============================================================================

/// One row of the VAT summary in the table foot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VatSummaryRow {
    /// Rate cell text.
    pub rate: String,
    /// Formatted bucket amount.
    pub amount: String,
}

// =============================================================================
// Price Quote
// =============================================================================

/// Parsed response of the product price/VAT lookup.
///
/// Each field is `None` when the response lacks it or it is not numeric.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceQuote {
    pub cost: Option<f64>,
    pub assembly_costs: Option<f64>,
    pub vat: Option<f64>,
}

impl PriceQuote {
    /// Reads `cost`, `assemblycosts` and `vat` from a lookup response.
    ///
    /// ## Coercion Rules
    /// ```text
    /// ┌──────────────────────┬──────────────┐
    /// │ JSON value           │ Result       │
    /// ├──────────────────────┼──────────────┤
    /// │ 12.5                 │ Some(12.5)   │
    /// │ "12.5"               │ Some(12.5)   │
    /// │ "" or null           │ Some(0.0)    │
    /// │ true / false         │ Some(1 / 0)  │
    /// │ missing, "abc", [..] │ None         │
    /// └──────────────────────┴──────────────┘
    /// ```
    pub fn from_json(value: &Value) -> Self {
        PriceQuote {
            cost: coerce_number(value.get("cost")),
            assembly_costs: coerce_number(value.get("assemblycosts")),
            vat: coerce_number(value.get("vat")),
        }
    }

    /// Unit price ex-VAT: cost plus assembly costs.
    pub fn unit_cost(&self) -> Option<f64> {
        Some(self.cost? + self.assembly_costs?)
    }
}

fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Null => 0.0,
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::Number(n) => n.as_f64()?,
        Value::String(s) if s.trim().is_empty() => 0.0,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Array(_) | Value::Object(_) => return None,
    };
    number.is_finite().then_some(number)
}

// =============================================================================
// Suggestion Entry
// =============================================================================

/// One candidate item from the supplier product search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SuggestionEntry {
    /// Canonical product name.
    pub name: String,
    /// Supplier SKU, if the supplier has one for this item.
    pub sku: Option<String>,
}

impl SuggestionEntry {
    /// Reads an entry from one element of the search response.
    ///
    /// The SKU comes from `supplier_sku`, falling back to `sku`; empty SKUs
    /// count as absent. Returns `None` for elements without a usable name.
    pub fn from_json(value: &Value) -> Option<Self> {
        let name = scalar_text(value.get("name")?)?;
        let sku = ["supplier_sku", "sku"]
            .iter()
            .filter_map(|key| value.get(*key).and_then(scalar_text))
            .find(|sku| !sku.is_empty());
        Some(SuggestionEntry { name, sku })
    }

    /// Text shown in the suggestion list: `[SKU] name` or `name`.
    ///
    /// ## Example
    /// ```rust
    /// use orderdesk_core::types::SuggestionEntry;
    ///
    /// let entry = SuggestionEntry { name: "Hex bolt".into(), sku: Some("HB-8".into()) };
    /// assert_eq!(entry.display_value(), "[HB-8] Hex bolt");
    /// ```
    pub fn display_value(&self) -> String {
        match &self.sku {
            Some(sku) => format!("[{}] {}", sku, self.name),
            None => self.name.clone(),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// =============================================================================
// Hidden Selection
// =============================================================================

/// The two hidden fields mirroring the matched suggestion entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HiddenSelection {
    /// Canonical product name.
    pub name: String,
    /// SKU, empty when the entry has none.
    pub sku: String,
}

impl HiddenSelection {
    /// Both fields empty.
    pub fn cleared() -> Self {
        HiddenSelection::default()
    }

    /// Selection mirroring the given entry.
    pub fn from_entry(entry: &SuggestionEntry) -> Self {
        HiddenSelection {
            name: entry.name.clone(),
            sku: entry.sku.clone().unwrap_or_default(),
        }
    }

    /// Returns true if both fields are empty.
    pub fn is_cleared(&self) -> bool {
        self.name.is_empty() && self.sku.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

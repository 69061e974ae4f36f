//! # salesdash-core
//!
//! Core input model and traits for the salesdash dashboard generator.
//!
//! This crate provides:
//! - Input types: `DashboardInput`, `Kpis`, `DashboardData` and the per-sheet records
//! - A tabular projection (`TabularRecord`) used to lay records into sheet rows
//! - KPI card text formatting (see [`format`])
//! - The `Renderer` trait and error types
//!
//! ## Example
//!
//! ```rust
//! use salesdash_core::DashboardInput;
//!
//! let json = r#"{
//!     "kpis": { "totalSales": 1000.0, "totalTransactions": 10,
//!               "averageTransactionValue": 100.0, "avgRating": 7.0 },
//!     "dashboardData": { "productLineSales": [], "branchData": [],
//!                        "monthlyData": [], "customerData": [], "paymentData": [] }
//! }"#;
//!
//! let input = DashboardInput::from_json_str(json).unwrap();
//! assert_eq!(input.output_path(), "dashboard.xlsx");
//! ```

pub mod format;

use serde::{Deserialize, Serialize};
use std::io::Read;
use thiserror::Error;

pub use format::{format_count, format_currency, format_rating, group_thousands};

/// Output file used when the input document does not name one
pub const DEFAULT_OUTPUT_FILE: &str = "dashboard.xlsx";

// ============================================================================
// Input Document
// ============================================================================

/// A complete dashboard request: headline KPIs, per-dimension breakdowns and
/// an optional output path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardInput {
    pub kpis: Kpis,
    pub dashboard_data: DashboardData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
}

impl DashboardInput {
    /// Parse an input document from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, InputError> {
        serde_json::from_str(json).map_err(InputError::from)
    }

    /// Read the whole stream, then parse it
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, InputError> {
        let mut buffer = String::new();
        reader.read_to_string(&mut buffer)?;
        Self::from_json_str(&buffer)
    }

    /// Path the workbook should be written to
    pub fn output_path(&self) -> &str {
        self.output_file.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE)
    }
}

/// Pre-aggregated headline metrics
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub total_sales: f64,
    pub total_transactions: i64,
    pub average_transaction_value: f64,
    pub avg_rating: f64,
}

impl Kpis {
    /// The four KPI rows in sheet order
    pub fn rows(&self) -> Vec<KpiRow> {
        vec![
            KpiRow::new("Total Sales", self.total_sales),
            KpiRow::new("Total Transactions", self.total_transactions as f64),
            KpiRow::new("Avg Transaction Value", self.average_transaction_value),
            KpiRow::new("Avg Rating", self.avg_rating),
        ]
    }
}

/// Per-dimension breakdowns, one list per data sheet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub product_line_sales: Vec<ProductLineSales>,
    pub branch_data: Vec<BranchSales>,
    pub monthly_data: Vec<MonthlySales>,
    pub customer_data: Vec<CustomerSegment>,
    pub payment_data: Vec<PaymentMethodSales>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLineSales {
    pub name: String,
    pub value: f64,
    pub transactions: i64,
    pub avg_value: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BranchSales {
    pub branch: String,
    pub city: String,
    pub sales: f64,
    pub transactions: i64,
    pub rating: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlySales {
    pub month: String,
    pub sales: f64,
    pub transactions: i64,
}

/// Sales for one customer type / gender combination
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomerSegment {
    #[serde(rename = "type")]
    pub customer_type: String,
    pub gender: String,
    pub sales: f64,
    pub transactions: i64,
    pub rating: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodSales {
    pub method: String,
    pub sales: f64,
    pub transactions: i64,
}

/// One metric/value line of the KPI data sheet
#[derive(Clone, Debug, PartialEq)]
pub struct KpiRow {
    pub metric: &'static str,
    pub value: f64,
}

impl KpiRow {
    pub fn new(metric: &'static str, value: f64) -> Self {
        Self { metric, value }
    }
}

// ============================================================================
// Tabular Projection
// ============================================================================

/// A single cell value as written to a data sheet
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

/// A record that occupies one row of a data sheet.
///
/// `cells()` must return exactly one value per entry in `HEADERS`, in the
/// same order.
pub trait TabularRecord {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<CellValue>;
}

impl TabularRecord for KpiRow {
    const HEADERS: &'static [&'static str] = &["Metric", "Value"];

    fn cells(&self) -> Vec<CellValue> {
        vec![self.metric.into(), self.value.into()]
    }
}

impl TabularRecord for ProductLineSales {
    const HEADERS: &'static [&'static str] = &["Product Line", "Sales", "Transactions", "Avg Value"];

    fn cells(&self) -> Vec<CellValue> {
        vec![
            (&self.name).into(),
            self.value.into(),
            self.transactions.into(),
            self.avg_value.into(),
        ]
    }
}

impl TabularRecord for BranchSales {
    const HEADERS: &'static [&'static str] = &["Branch", "City", "Sales", "Transactions", "Rating"];

    fn cells(&self) -> Vec<CellValue> {
        vec![
            (&self.branch).into(),
            (&self.city).into(),
            self.sales.into(),
            self.transactions.into(),
            self.rating.into(),
        ]
    }
}

impl TabularRecord for MonthlySales {
    const HEADERS: &'static [&'static str] = &["Month", "Sales", "Transactions"];

    fn cells(&self) -> Vec<CellValue> {
        vec![(&self.month).into(), self.sales.into(), self.transactions.into()]
    }
}

impl TabularRecord for CustomerSegment {
    const HEADERS: &'static [&'static str] = &["Type", "Gender", "Sales", "Transactions", "Rating"];

    fn cells(&self) -> Vec<CellValue> {
        vec![
            (&self.customer_type).into(),
            (&self.gender).into(),
            self.sales.into(),
            self.transactions.into(),
            self.rating.into(),
        ]
    }
}

impl TabularRecord for PaymentMethodSales {
    const HEADERS: &'static [&'static str] = &["Payment Method", "Sales", "Transactions"];

    fn cells(&self) -> Vec<CellValue> {
        vec![(&self.method).into(), self.sales.into(), self.transactions.into()]
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Output renderer for dashboard documents
pub trait Renderer {
    type Output;

    /// Render an input document to the output format
    fn render(&self, input: &DashboardInput) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Input document error
#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Format error: {0}")]
    Format(String),
}

// ============================================================================
// Tests
// ============================================================================

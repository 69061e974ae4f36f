//! Chart wiring for the dashboard sheet
//!
//! Each dashboard chart is described by a [`ChartSpec`]: the chart type,
//! titles, the data-sheet ranges it reads and the Dashboard cell it is
//! anchored to. The Excel renderer turns these records into
//! `rust_xlsxwriter` charts.
//!
//! ## Range sizing
//!
//! By default ([`ChartRanges::Fixed`]) ranges use literal bounds sized for
//! the reference dataset:
//!
//! ```text
//! Product pie   : Product_Data!$A$2:$A$7  / $B$2:$B$7  (6 product lines)
//! Monthly line  : Monthly_Data!$A$2:$A$4  / $B$2:$B$4  (3 months)
//! Branch column : Branch_Data!$B$2:$B$4   / $C$2:$C$4  (3 branches, by city)
//! Payment pie   : Payment_Data!$A$2:$A$4  / $B$2:$B$4  (3 methods)
//! ```
//!
//! Shorter lists leave empty points and longer lists are cut off. With
//! [`ChartRanges::FromRecords`] every range ends at the last written row.

use rust_xlsxwriter::{ChartType, ColNum, RowNum};
use salesdash_core::DashboardInput;

use crate::excel::{BRANCH_SHEET, MONTHLY_SHEET, PAYMENT_SHEET, PRODUCT_SHEET};

/// Chart width in pixels (18 cm)
pub const CHART_WIDTH_PX: u32 = 680;
/// Chart height in pixels (12 cm)
pub const CHART_HEIGHT_PX: u32 = 454;

/// First Dashboard row used by charts (A8)
pub const CHART_ROW: RowNum = 7;
/// Rows between the top and bottom chart rows
pub const CHART_ROW_STRIDE: RowNum = 18;
/// Dashboard columns of the left and right chart columns (A and G)
pub const CHART_COLUMNS: [ColNum; 2] = [0, 6];

const FIXED_PRODUCT_ROWS: RowNum = 6;
const FIXED_DIMENSION_ROWS: RowNum = 3;

/// How chart ranges are bounded
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChartRanges {
    /// Literal bounds sized for 6 products and 3 months/branches/methods
    #[default]
    Fixed,
    /// Bounds follow the number of records written to each data sheet
    FromRecords,
}

/// Kind of chart placed on the dashboard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    Line,
    /// Vertical bars
    Column,
}

impl ChartKind {
    pub fn chart_type(self) -> ChartType {
        match self {
            ChartKind::Pie => ChartType::Pie,
            ChartKind::Line => ChartType::Line,
            ChartKind::Column => ChartType::Column,
        }
    }
}

/// A single cell (0-based row/column)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRef {
    pub row: RowNum,
    pub col: ColNum,
}

impl CellRef {
    pub const fn new(row: RowNum, col: ColNum) -> Self {
        Self { row, col }
    }

    /// A1-style address, e.g. `G26`
    pub fn a1(&self) -> String {
        format!("{}{}", col_to_letter(self.col), self.row + 1)
    }
}

/// A single-column range on a named sheet (0-based, inclusive)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellRange {
    pub sheet: &'static str,
    pub col: ColNum,
    pub first_row: RowNum,
    pub last_row: RowNum,
}

impl CellRange {
    pub fn new(sheet: &'static str, col: ColNum, first_row: RowNum, last_row: RowNum) -> Self {
        Self { sheet, col, first_row, last_row }
    }

    /// Absolute range formula, e.g. `Product_Data!$A$2:$A$7`
    pub fn formula(&self) -> String {
        let col = col_to_letter(self.col);
        format!(
            "{}!${col}${}:${col}${}",
            self.sheet,
            self.first_row + 1,
            self.last_row + 1
        )
    }

    /// Number of rows covered
    pub fn len(&self) -> u32 {
        self.last_row - self.first_row + 1
    }

    pub fn is_empty(&self) -> bool {
        self.last_row < self.first_row
    }

    /// Tuple form accepted by `rust_xlsxwriter` chart series
    pub fn as_tuple(&self) -> (&'static str, RowNum, ColNum, RowNum, ColNum) {
        (self.sheet, self.first_row, self.col, self.last_row, self.col)
    }
}

/// Everything needed to build and place one dashboard chart
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: &'static str,
    pub x_axis_title: Option<String>,
    pub y_axis_title: Option<String>,
    pub categories: CellRange,
    pub values: CellRange,
    /// Header cell used as the series name
    pub series_name: CellRef,
    /// Top-left Dashboard cell the chart is anchored to
    pub anchor: CellRef,
}

/// The four dashboard charts in placement order: product pie, monthly
/// line, branch column, payment pie.
pub fn dashboard_charts(input: &DashboardInput, ranges: ChartRanges, currency: &str) -> Vec<ChartSpec> {
    let data = &input.dashboard_data;
    let sales_axis = format!("Sales ({currency})");

    let last_row = |fixed: RowNum, records: usize| match ranges {
        ChartRanges::Fixed => fixed,
        // Header sits on row 0, so the last data row equals the record count
        ChartRanges::FromRecords => (records as RowNum).max(1),
    };

    let product_last = last_row(FIXED_PRODUCT_ROWS, data.product_line_sales.len());
    let monthly_last = last_row(FIXED_DIMENSION_ROWS, data.monthly_data.len());
    let branch_last = last_row(FIXED_DIMENSION_ROWS, data.branch_data.len());
    let payment_last = last_row(FIXED_DIMENSION_ROWS, data.payment_data.len());

    let [left, right] = CHART_COLUMNS;
    let bottom = CHART_ROW + CHART_ROW_STRIDE;

    vec![
        ChartSpec {
            kind: ChartKind::Pie,
            title: "Sales by Product Line",
            x_axis_title: None,
            y_axis_title: None,
            categories: CellRange::new(PRODUCT_SHEET, 0, 1, product_last),
            values: CellRange::new(PRODUCT_SHEET, 1, 1, product_last),
            series_name: CellRef::new(0, 1),
            anchor: CellRef::new(CHART_ROW, left),
        },
        ChartSpec {
            kind: ChartKind::Line,
            title: "Monthly Sales Trend",
            x_axis_title: Some("Month".to_string()),
            y_axis_title: Some(sales_axis.clone()),
            categories: CellRange::new(MONTHLY_SHEET, 0, 1, monthly_last),
            values: CellRange::new(MONTHLY_SHEET, 1, 1, monthly_last),
            series_name: CellRef::new(0, 1),
            anchor: CellRef::new(CHART_ROW, right),
        },
        ChartSpec {
            kind: ChartKind::Column,
            title: "Branch Performance",
            x_axis_title: None,
            y_axis_title: Some(sales_axis),
            // City column, not the branch code
            categories: CellRange::new(BRANCH_SHEET, 1, 1, branch_last),
            values: CellRange::new(BRANCH_SHEET, 2, 1, branch_last),
            series_name: CellRef::new(0, 2),
            anchor: CellRef::new(bottom, left),
        },
        ChartSpec {
            kind: ChartKind::Pie,
            title: "Payment Method Distribution",
            x_axis_title: None,
            y_axis_title: None,
            categories: CellRange::new(PAYMENT_SHEET, 0, 1, payment_last),
            values: CellRange::new(PAYMENT_SHEET, 1, 1, payment_last),
            series_name: CellRef::new(0, 1),
            anchor: CellRef::new(bottom, right),
        },
    ]
}

/// Convert column number to Excel letter (0 -> A, 25 -> Z, 26 -> AA)
pub fn col_to_letter(col: ColNum) -> String {
    let mut result = String::new();
    let mut n = col as u32;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

//! Excel dashboard renderer
//!
//! Generates an XLSX workbook with seven sheets, in tab order:
//! - Dashboard: title banner, four KPI cards, four charts and a Key Insights panel
//! - KPI_Data, Product_Data, Branch_Data, Monthly_Data, Customer_Data, Payment_Data:
//!   flat data sheets, one row per input record, read by the dashboard charts
//!
//! Nothing is computed here: totals and averages arrive pre-aggregated and
//! are written to cells unmodified. Only the KPI cards show formatted text.
//!
//! ## Example Output Structure
//!
//! ```text
//! Sheet: Dashboard
//! |            SUPERMARKET SALES DASHBOARD (A1:L1)             |
//! |  Comprehensive Sales Analytics and Performance Insights    |
//! |                                                            |
//! | Total Sales | Total Transactions | Avg Transaction | Avg Rating |
//! |  ₹322,967   |       1,000        |      ₹323       |   7.0/10   |
//! | [pie: A8]                    | [line: G8]                  |
//! | [column: A26]                | [pie: G26]                  |
//! |                  KEY INSIGHTS (A44:L44)                    |
//!
//! Sheet: Product_Data
//! | Product Line       | Sales    | Transactions | Avg Value |
//! |--------------------|----------|--------------|-----------|
//! | Food and beverages | 56144.84 | 174          | 322.67    |
//! ```

use rust_xlsxwriter::{Chart, ColNum, Format, FormatAlign, RowNum, Workbook, Worksheet, XlsxError};
use salesdash_core::{
    format_count, format_currency, format_rating, CellValue, DashboardInput, RenderError, Renderer,
    TabularRecord,
};
use tracing::debug;

use crate::charts::{dashboard_charts, ChartRanges, ChartSpec, CHART_HEIGHT_PX, CHART_WIDTH_PX};

pub const DASHBOARD_SHEET: &str = "Dashboard";
pub const KPI_SHEET: &str = "KPI_Data";
pub const PRODUCT_SHEET: &str = "Product_Data";
pub const BRANCH_SHEET: &str = "Branch_Data";
pub const MONTHLY_SHEET: &str = "Monthly_Data";
pub const CUSTOMER_SHEET: &str = "Customer_Data";
pub const PAYMENT_SHEET: &str = "Payment_Data";

/// Sheet names in workbook tab order
pub const SHEET_ORDER: [&str; 7] = [
    DASHBOARD_SHEET,
    KPI_SHEET,
    PRODUCT_SHEET,
    BRANCH_SHEET,
    MONTHLY_SHEET,
    CUSTOMER_SHEET,
    PAYMENT_SHEET,
];

const BLUE: u32 = 0x4472C4;
const GREEN: u32 = 0x70AD47;
const LIGHT_BLUE: u32 = 0x5B9BD5;
const AMBER: u32 = 0xFFC000;
const ORANGE: u32 = 0xED7D31;
const GREY: u32 = 0xA5A5A5;
const WHITE: u32 = 0xFFFFFF;
const SUBTITLE_GREY: u32 = 0x7F7F7F;

/// Header styling and column width for one data sheet
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataSheetStyle {
    pub name: &'static str,
    pub header_fill: u32,
    /// `None` keeps the default (black) font
    pub header_font_color: Option<u32>,
    pub header_font_size: f64,
    /// `None` keeps the default column width
    pub column_width: Option<f64>,
}

/// Data sheet styles in creation order
pub const DATA_SHEETS: [DataSheetStyle; 6] = [
    DataSheetStyle {
        name: KPI_SHEET,
        header_fill: BLUE,
        header_font_color: Some(WHITE),
        header_font_size: 12.0,
        column_width: None,
    },
    DataSheetStyle {
        name: PRODUCT_SHEET,
        header_fill: GREEN,
        header_font_color: Some(WHITE),
        header_font_size: 11.0,
        column_width: Some(25.0),
    },
    DataSheetStyle {
        name: BRANCH_SHEET,
        header_fill: AMBER,
        header_font_color: None,
        header_font_size: 11.0,
        column_width: Some(18.0),
    },
    DataSheetStyle {
        name: MONTHLY_SHEET,
        header_fill: LIGHT_BLUE,
        header_font_color: Some(WHITE),
        header_font_size: 11.0,
        column_width: Some(20.0),
    },
    DataSheetStyle {
        name: CUSTOMER_SHEET,
        header_fill: ORANGE,
        header_font_color: Some(WHITE),
        header_font_size: 11.0,
        column_width: Some(18.0),
    },
    DataSheetStyle {
        name: PAYMENT_SHEET,
        header_fill: GREY,
        header_font_color: Some(WHITE),
        header_font_size: 11.0,
        column_width: Some(22.0),
    },
];

// Dashboard layout (0-based rows and columns)
const LAST_DASHBOARD_COL: ColNum = 11;
const DASHBOARD_COL_WIDTH: f64 = 12.0;
const TITLE_ROW: RowNum = 0;
const TITLE_ROW_HEIGHT: f64 = 35.0;
const SUBTITLE_ROW: RowNum = 1;
const KPI_LABEL_ROW: RowNum = 3;
const KPI_VALUE_ROW: RowNum = 4;
const KPI_VALUE_ROW_HEIGHT: f64 = 30.0;
const KPI_CARD_WIDTH: ColNum = 3;
const INSIGHTS_ROW: RowNum = 43;
const INSIGHTS_HEADER_HEIGHT: f64 = 25.0;
const INSIGHT_ROW_HEIGHT: f64 = 20.0;

/// Key Insights bullets. Static text, not derived from the input values.
pub const INSIGHTS: [&str; 4] = [
    "• Food & Beverages leads in total sales (₹56,145)",
    "• Naypyitaw branch has highest sales (₹1,10,569) and rating (7.1/10)",
    "• March showed strong recovery with ₹1,09,456 in sales",
    "• Cash remains the preferred payment method (34.7% of total sales)",
];

/// Excel dashboard renderer
#[derive(Clone, Debug)]
pub struct ExcelDashboardRenderer {
    /// Currency glyph for KPI cards and chart axis titles
    pub currency: String,
    /// Title banner text
    pub title: String,
    /// Subtitle banner text
    pub subtitle: String,
    /// How chart ranges are bounded
    pub chart_ranges: ChartRanges,
}

impl Default for ExcelDashboardRenderer {
    fn default() -> Self {
        Self {
            currency: "₹".into(),
            title: "SUPERMARKET SALES DASHBOARD".into(),
            subtitle: "Comprehensive Sales Analytics and Performance Insights".into(),
            chart_ranges: ChartRanges::Fixed,
        }
    }
}

impl ExcelDashboardRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set currency glyph
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set title banner text
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set subtitle banner text
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Size chart ranges from the record counts instead of the fixed bounds
    pub fn fit_chart_ranges(mut self) -> Self {
        self.chart_ranges = ChartRanges::FromRecords;
        self
    }

    /// Chart wiring this renderer would use for `input`
    pub fn chart_specs(&self, input: &DashboardInput) -> Vec<ChartSpec> {
        dashboard_charts(input, self.chart_ranges, &self.currency)
    }

    /// KPI card label, display text and colour, left to right
    pub fn kpi_cards(&self, input: &DashboardInput) -> Vec<(&'static str, String, u32)> {
        let kpis = &input.kpis;
        vec![
            ("Total Sales", format_currency(kpis.total_sales, &self.currency), GREEN),
            ("Total Transactions", format_count(kpis.total_transactions), LIGHT_BLUE),
            (
                "Avg Transaction",
                format_currency(kpis.average_transaction_value, &self.currency),
                AMBER,
            ),
            ("Avg Rating", format_rating(kpis.avg_rating), ORANGE),
        ]
    }

    /// Build the complete in-memory workbook
    pub fn build_workbook(&self, input: &DashboardInput) -> Result<Workbook, RenderError> {
        let data = &input.dashboard_data;
        let [kpi, product, branch, monthly, customer, payment] = &DATA_SHEETS;

        let data_sheets = vec![
            write_data_sheet(kpi, &input.kpis.rows())?,
            write_data_sheet(product, &data.product_line_sales)?,
            write_data_sheet(branch, &data.branch_data)?,
            write_data_sheet(monthly, &data.monthly_data)?,
            write_data_sheet(customer, &data.customer_data)?,
            write_data_sheet(payment, &data.payment_data)?,
        ];

        // Composed after the data sheets but placed first in tab order
        let dashboard = self.build_dashboard(input)?;

        let mut workbook = Workbook::new();
        workbook.push_worksheet(dashboard);
        for sheet in data_sheets {
            workbook.push_worksheet(sheet);
        }

        Ok(workbook)
    }

    /// Generate Excel workbook bytes
    pub fn render_to_bytes(&self, input: &DashboardInput) -> Result<Vec<u8>, RenderError> {
        let mut workbook = self.build_workbook(input)?;

        let buffer = workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))?;

        Ok(buffer)
    }

    fn build_dashboard(&self, input: &DashboardInput) -> Result<Worksheet, RenderError> {
        let mut sheet = Worksheet::new();
        sheet.set_name(DASHBOARD_SHEET).map_err(xlsx_err)?;

        // Title and subtitle banners
        let title = Format::new()
            .set_bold()
            .set_font_size(20)
            .set_font_color(WHITE)
            .set_background_color(BLUE)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        let subtitle = Format::new()
            .set_italic()
            .set_font_size(12)
            .set_font_color(SUBTITLE_GREY)
            .set_align(FormatAlign::Center);

        sheet
            .merge_range(TITLE_ROW, 0, TITLE_ROW, LAST_DASHBOARD_COL, &self.title, &title)
            .map_err(xlsx_err)?;
        sheet.set_row_height(TITLE_ROW, TITLE_ROW_HEIGHT).map_err(xlsx_err)?;
        sheet
            .merge_range(SUBTITLE_ROW, 0, SUBTITLE_ROW, LAST_DASHBOARD_COL, &self.subtitle, &subtitle)
            .map_err(xlsx_err)?;

        self.write_kpi_cards(&mut sheet, input)?;

        for spec in self.chart_specs(input) {
            debug!(
                title = spec.title,
                anchor = %spec.anchor.a1(),
                values = %spec.values.formula(),
                "placing chart"
            );
            let chart = build_chart(&spec);
            sheet
                .insert_chart(spec.anchor.row, spec.anchor.col, &chart)
                .map_err(xlsx_err)?;
        }

        write_insights(&mut sheet)?;

        for col in 0..=LAST_DASHBOARD_COL {
            sheet.set_column_width(col, DASHBOARD_COL_WIDTH).map_err(xlsx_err)?;
        }

        Ok(sheet)
    }

    fn write_kpi_cards(&self, sheet: &mut Worksheet, input: &DashboardInput) -> Result<(), RenderError> {
        for (index, (label, value, color)) in self.kpi_cards(input).into_iter().enumerate() {
            let first_col = index as ColNum * KPI_CARD_WIDTH;
            let last_col = first_col + KPI_CARD_WIDTH - 1;

            let label_format = Format::new()
                .set_bold()
                .set_font_color(WHITE)
                .set_background_color(color)
                .set_align(FormatAlign::Center);
            let value_format = Format::new()
                .set_bold()
                .set_font_size(16)
                .set_font_color(color)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter);

            sheet
                .merge_range(KPI_LABEL_ROW, first_col, KPI_LABEL_ROW, last_col, label, &label_format)
                .map_err(xlsx_err)?;
            sheet
                .merge_range(KPI_VALUE_ROW, first_col, KPI_VALUE_ROW, last_col, &value, &value_format)
                .map_err(xlsx_err)?;
        }

        sheet
            .set_row_height(KPI_VALUE_ROW, KPI_VALUE_ROW_HEIGHT)
            .map_err(xlsx_err)?;

        Ok(())
    }
}

/// Write a header row and one row per record to a new sheet
fn write_data_sheet<R: TabularRecord>(
    style: &DataSheetStyle,
    records: &[R],
) -> Result<Worksheet, RenderError> {
    let mut sheet = Worksheet::new();
    sheet.set_name(style.name).map_err(xlsx_err)?;

    let mut header = Format::new()
        .set_bold()
        .set_font_size(style.header_font_size)
        .set_background_color(style.header_fill);
    if let Some(color) = style.header_font_color {
        header = header.set_font_color(color);
    }

    for (col, title) in R::HEADERS.iter().enumerate() {
        sheet
            .write_with_format(0, col as ColNum, *title, &header)
            .map_err(xlsx_err)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = index as RowNum + 1;
        for (col, cell) in record.cells().into_iter().enumerate() {
            let col = col as ColNum;
            match cell {
                CellValue::Text(text) => sheet.write_string(row, col, text),
                CellValue::Number(number) => sheet.write_number(row, col, number),
            }
            .map_err(xlsx_err)?;
        }
    }

    if let Some(width) = style.column_width {
        for col in 0..R::HEADERS.len() {
            sheet.set_column_width(col as ColNum, width).map_err(xlsx_err)?;
        }
    }

    debug!(sheet = style.name, rows = records.len(), "wrote data sheet");

    Ok(sheet)
}

fn build_chart(spec: &ChartSpec) -> Chart {
    let mut chart = Chart::new(spec.kind.chart_type());

    chart
        .add_series()
        .set_name((spec.values.sheet, spec.series_name.row, spec.series_name.col))
        .set_categories(spec.categories.as_tuple())
        .set_values(spec.values.as_tuple());

    chart.title().set_name(spec.title);
    if let Some(x_title) = &spec.x_axis_title {
        chart.x_axis().set_name(x_title.as_str());
    }
    if let Some(y_title) = &spec.y_axis_title {
        chart.y_axis().set_name(y_title.as_str());
    }

    chart.set_width(CHART_WIDTH_PX).set_height(CHART_HEIGHT_PX);
    chart
}

fn write_insights(sheet: &mut Worksheet) -> Result<(), RenderError> {
    let header = Format::new()
        .set_bold()
        .set_font_size(14)
        .set_font_color(WHITE)
        .set_background_color(GREEN)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let bullet = Format::new()
        .set_font_size(11)
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter);

    sheet
        .merge_range(INSIGHTS_ROW, 0, INSIGHTS_ROW, LAST_DASHBOARD_COL, "KEY INSIGHTS", &header)
        .map_err(xlsx_err)?;
    sheet
        .set_row_height(INSIGHTS_ROW, INSIGHTS_HEADER_HEIGHT)
        .map_err(xlsx_err)?;

    for (offset, text) in INSIGHTS.iter().enumerate() {
        let row = INSIGHTS_ROW + offset as RowNum + 1;
        sheet
            .merge_range(row, 0, row, LAST_DASHBOARD_COL, text, &bullet)
            .map_err(xlsx_err)?;
        sheet.set_row_height(row, INSIGHT_ROW_HEIGHT).map_err(xlsx_err)?;
    }

    Ok(())
}

fn xlsx_err(e: XlsxError) -> RenderError {
    RenderError::Format(e.to_string())
}

impl Renderer for ExcelDashboardRenderer {
    type Output = Vec<u8>;

    fn render(&self, input: &DashboardInput) -> Result<Vec<u8>, RenderError> {
        self.render_to_bytes(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use salesdash_core::{
        BranchSales, CustomerSegment, DashboardData, Kpis, MonthlySales, PaymentMethodSales,
        ProductLineSales,
    };

    fn create_test_input() -> DashboardInput {
        DashboardInput {
            kpis: Kpis {
                total_sales: 56144.9,
                total_transactions: 1000,
                average_transaction_value: 322.97,
                avg_rating: 7.12,
            },
            dashboard_data: DashboardData {
                product_line_sales: vec![ProductLineSales {
                    name: "Food and beverages".into(),
                    value: 56144.84,
                    transactions: 174,
                    avg_value: 322.67,
                }],
                branch_data: vec![BranchSales {
                    branch: "C".into(),
                    city: "Naypyitaw".into(),
                    sales: 110568.71,
                    transactions: 328,
                    rating: 7.07,
                }],
                monthly_data: vec![MonthlySales {
                    month: "March".into(),
                    sales: 109455.51,
                    transactions: 345,
                }],
                customer_data: vec![CustomerSegment {
                    customer_type: "Normal".into(),
                    gender: "Male".into(),
                    sales: 79394.0,
                    transactions: 240,
                    rating: 7.0,
                }],
                payment_data: vec![PaymentMethodSales {
                    method: "Cash".into(),
                    sales: 112206.57,
                    transactions: 344,
                }],
            },
            output_file: None,
        }
    }

    #[test]
    fn excel_renderer_creation() {
        let renderer = ExcelDashboardRenderer::new();
        assert_eq!(renderer.currency, "₹");
        assert_eq!(renderer.chart_ranges, ChartRanges::Fixed);
    }

    #[test]
    fn excel_renderer_with_options() {
        let renderer = ExcelDashboardRenderer::new()
            .currency("$")
            .title("STORE DASHBOARD")
            .subtitle("Q1")
            .fit_chart_ranges();

        assert_eq!(renderer.currency, "$");
        assert_eq!(renderer.title, "STORE DASHBOARD");
        assert_eq!(renderer.subtitle, "Q1");
        assert_eq!(renderer.chart_ranges, ChartRanges::FromRecords);
    }

    #[test]
    fn excel_produces_valid_output() {
        let renderer = ExcelDashboardRenderer::new();
        let bytes = renderer.render(&create_test_input()).unwrap();

        assert!(bytes.len() > 100);
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn workbook_has_sheets_in_tab_order() {
        let renderer = ExcelDashboardRenderer::new();
        let mut workbook = renderer.build_workbook(&create_test_input()).unwrap();

        let names: Vec<String> = workbook.worksheets().iter().map(|s| s.name()).collect();
        assert_eq!(names, SHEET_ORDER.to_vec());
    }

    #[test]
    fn kpi_cards_use_display_formats() {
        let renderer = ExcelDashboardRenderer::new();
        let cards = renderer.kpi_cards(&create_test_input());

        let shown: Vec<_> = cards.iter().map(|(label, value, _)| (*label, value.as_str())).collect();
        assert_eq!(
            shown,
            vec![
                ("Total Sales", "₹56,145"),
                ("Total Transactions", "1,000"),
                ("Avg Transaction", "₹323"),
                ("Avg Rating", "7.1/10"),
            ]
        );
    }

    #[test]
    fn kpi_card_palette_is_fixed() {
        let renderer = ExcelDashboardRenderer::new();
        let colors: Vec<u32> = renderer
            .kpi_cards(&create_test_input())
            .into_iter()
            .map(|(_, _, color)| color)
            .collect();
        assert_eq!(colors, vec![GREEN, LIGHT_BLUE, AMBER, ORANGE]);
    }

    #[test]
    fn four_charts_are_wired() {
        let renderer = ExcelDashboardRenderer::new();
        assert_eq!(renderer.chart_specs(&create_test_input()).len(), 4);
    }

    #[test]
    fn data_sheet_styles_follow_creation_order() {
        let names: Vec<_> = DATA_SHEETS.iter().map(|s| s.name).collect();
        assert_eq!(names, SHEET_ORDER[1..].to_vec());
    }

    #[test]
    fn branch_header_keeps_default_font() {
        let branch = DATA_SHEETS.iter().find(|s| s.name == BRANCH_SHEET).unwrap();
        assert_eq!(branch.header_font_color, None);
        assert_eq!(branch.header_fill, AMBER);
    }

    #[test]
    fn data_sheet_styles_are_pinned() {
        let styles: Vec<_> = DATA_SHEETS
            .iter()
            .map(|s| (s.name, s.header_fill, s.header_font_color, s.header_font_size, s.column_width))
            .collect();

        assert_eq!(
            styles,
            vec![
                (KPI_SHEET, 0x4472C4, Some(0xFFFFFF), 12.0, None),
                (PRODUCT_SHEET, 0x70AD47, Some(0xFFFFFF), 11.0, Some(25.0)),
                (BRANCH_SHEET, 0xFFC000, None, 11.0, Some(18.0)),
                (MONTHLY_SHEET, 0x5B9BD5, Some(0xFFFFFF), 11.0, Some(20.0)),
                (CUSTOMER_SHEET, 0xED7D31, Some(0xFFFFFF), 11.0, Some(18.0)),
                (PAYMENT_SHEET, 0xA5A5A5, Some(0xFFFFFF), 11.0, Some(22.0)),
            ]
        );
    }

    #[test]
    fn overlong_title_is_a_format_error() {
        let renderer = ExcelDashboardRenderer::new().title("X".repeat(40_000));
        let err = renderer.render(&create_test_input()).unwrap_err();

        assert!(matches!(err, RenderError::Format(_)));
        assert!(err.to_string().starts_with("Format error: "));
    }

    #[test]
    fn empty_lists_still_render() {
        let mut input = create_test_input();
        input.dashboard_data.product_line_sales.clear();
        input.dashboard_data.payment_data.clear();

        let renderer = ExcelDashboardRenderer::new();
        assert!(renderer.render(&input).is_ok());
        assert!(renderer.clone().fit_chart_ranges().render(&input).is_ok());
    }
}

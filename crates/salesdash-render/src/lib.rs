//! # salesdash-render
//!
//! Rendering backends for salesdash dashboards.
//!
//! This crate provides:
//! - The Excel dashboard workbook (data sheets, KPI cards, charts, insights)
//! - Chart wiring records that describe which cells each chart reads
//!
//! ## Example
//!
//! ```rust,ignore
//! use salesdash_core::{DashboardInput, Renderer};
//! use salesdash_render::ExcelDashboardRenderer;
//!
//! let input = DashboardInput::from_reader(std::io::stdin())?;
//! let xlsx_bytes = ExcelDashboardRenderer::new().render(&input)?;
//! std::fs::write(input.output_path(), xlsx_bytes)?;
//! ```

pub mod charts;
pub mod excel;

pub use charts::{CellRange, CellRef, ChartKind, ChartRanges, ChartSpec};
pub use excel::{ExcelDashboardRenderer, SHEET_ORDER};

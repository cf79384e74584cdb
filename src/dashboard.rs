//! Dashboard pages.
//!
//! [`render`] turns a mode, a set of dimensions, and the sales table into the
//! view model of one page. It holds no state between calls.

use crate::analysis::{self, aggregate, online_vs_store, recommend};
use crate::error::DashboardError;
use crate::models::{AggregationResult, Dimension, Mode, ProductTotals, SalesRecord, SalesTable};
use crate::report::Chart;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

/// Row limits for the pages that only show part of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Rows shown by the peek page.
    pub peek_rows: usize,
    /// Rows shown by the analysis page.
    pub preview_rows: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            peek_rows: 10,
            preview_rows: 5,
        }
    }
}

/// A titled slice of the sales table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataView {
    pub title: String,
    pub rows: Vec<SalesRecord>,
    /// Number of rows in the full table.
    pub total_rows: usize,
}

/// Everything one page displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub mode: Mode,
    pub title: String,
    pub dimensions: Vec<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<DataView>,
    /// Product totals table (peek page).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_totals: Option<ProductTotals>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<AggregationResult>,
    pub charts: Vec<Chart>,
    pub recommendations: Vec<String>,
    pub suggestions: Vec<String>,
    /// Parts of the page that were left out, with the reason.
    pub notices: Vec<String>,
}

impl Dashboard {
    fn new(mode: Mode, dimensions: Vec<Dimension>) -> Self {
        Self {
            mode,
            title: mode.title().to_string(),
            dimensions,
            data: None,
            product_totals: None,
            aggregation: None,
            charts: Vec::new(),
            recommendations: Vec::new(),
            suggestions: Vec::new(),
            notices: Vec::new(),
        }
    }
}

/// Metadata about a rendered page.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Input file the table was loaded from.
    pub data_path: String,
    /// Date and time of the render.
    pub generated_at: DateTime<Utc>,
    /// Number of records in the table.
    pub record_count: usize,
}

/// A rendered page with its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub dashboard: Dashboard,
}

/// Render one dashboard page.
pub fn render(
    mode: Mode,
    dimensions: &[Dimension],
    table: &SalesTable,
    options: &RenderOptions,
) -> Result<Dashboard, DashboardError> {
    let mut dimensions = dimensions.to_vec();
    dimensions.sort();
    dimensions.dedup();

    debug!("Rendering {} with dimensions {:?}", mode, dimensions);

    let mut page = Dashboard::new(mode, dimensions.clone());

    match mode {
        Mode::Home => {
            page.data = Some(data_view("Données des ventes", table.records(), table.len()));
        }
        Mode::Peek => {
            let result = aggregate(table, &[])?;
            page.data = Some(data_view(
                format!("Aperçu des {} premières lignes", options.peek_rows),
                table.head(options.peek_rows),
                table.len(),
            ));
            page.product_totals = Some(result.totals_by_product);
            page.charts
                .push(Chart::product_totals(&result.totals_by_product));
        }
        Mode::Visualisation => {
            let result = aggregate(table, &dimensions)?;
            page.charts = aggregation_charts(&result);

            // Always grouped by channel, whatever the selected dimensions.
            let by_channel = analysis::group_by(table, Dimension::Channel);
            match online_vs_store(&by_channel) {
                Ok(totals) => page.charts.push(Chart::online_vs_store(&totals)),
                Err(e) => {
                    warn!("Skipping online vs store chart: {}", e);
                    page.notices
                        .push(format!("Graphique en ligne vs en magasin omis : {}", e));
                }
            }
            page.aggregation = Some(result);
        }
        Mode::Analysis => {
            let result = aggregate(table, &dimensions)?;
            page.data = Some(data_view(
                "Aperçu des Données",
                table.head(options.preview_rows),
                table.len(),
            ));
            page.charts = aggregation_charts(&result);
            page.recommendations = recommend(&result);
            page.suggestions = analysis::suggestions()
                .iter()
                .map(|s| s.to_string())
                .collect();
            page.aggregation = Some(result);
        }
    }

    Ok(page)
}

fn data_view(title: impl Into<String>, rows: &[SalesRecord], total_rows: usize) -> DataView {
    DataView {
        title: title.into(),
        rows: rows.to_vec(),
        total_rows,
    }
}

/// Product chart, then one chart per populated dimension.
fn aggregation_charts(result: &AggregationResult) -> Vec<Chart> {
    let mut charts = vec![Chart::product_totals(&result.totals_by_product)];

    for dimension in [Dimension::Channel, Dimension::Region] {
        if let Some(groups) = result.by_dimension(dimension) {
            charts.push(Chart::grouped(dimension, groups));
        }
    }

    charts
}

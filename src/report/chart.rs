//! Bar charts of aggregated sales.
//!
//! Charts are plain data so they can be serialized as-is, and rendered as
//! horizontal text bars for the terminal and Markdown outputs.

use crate::models::{Dimension, GroupTotals, OnlineStoreTotals, ProductTotals};
use serde::Serialize;

/// Value-axis label shared by every chart.
pub const VALUE_AXIS_LABEL: &str = "Montant des ventes";

/// A single labeled bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

impl Bar {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Bars sharing a group label (one group per channel or region).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGroup {
    pub label: String,
    pub bars: Vec<Bar>,
}

/// Chart data layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Series {
    Simple { bars: Vec<Bar> },
    Grouped { groups: Vec<BarGroup> },
}

/// A titled bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub value_label: String,
    pub series: Series,
}

impl Chart {
    fn new(title: impl Into<String>, series: Series) -> Self {
        Self {
            title: title.into(),
            value_label: VALUE_AXIS_LABEL.to_string(),
            series,
        }
    }

    /// One bar per product.
    pub fn product_totals(totals: &ProductTotals) -> Self {
        Self::new(
            "Ventes Totales par Produit",
            Series::Simple {
                bars: product_bars(totals),
            },
        )
    }

    /// One group of product bars per channel or region.
    pub fn grouped(dimension: Dimension, groups: &GroupTotals) -> Self {
        let groups = groups
            .iter()
            .map(|(label, totals)| BarGroup {
                label: label.clone(),
                bars: product_bars(totals),
            })
            .collect();

        Self::new(
            format!("Ventes par {}", dimension.label()),
            Series::Grouped { groups },
        )
    }

    /// Online total against in-store total.
    pub fn online_vs_store(totals: &OnlineStoreTotals) -> Self {
        Self::new(
            "Ventes en ligne vs en magasin",
            Series::Simple {
                bars: vec![
                    Bar::new("En ligne", totals.online),
                    Bar::new("En magasin", totals.store),
                ],
            },
        )
    }

    /// Every bar in the chart, across groups.
    pub fn bars(&self) -> Box<dyn Iterator<Item = &Bar> + '_> {
        match &self.series {
            Series::Simple { bars } => Box::new(bars.iter()),
            Series::Grouped { groups } => Box::new(groups.iter().flat_map(|g| g.bars.iter())),
        }
    }

    /// Largest bar value, or 0 for an empty chart.
    pub fn max_value(&self) -> f64 {
        self.bars()
            .map(|b| b.value)
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }
}

fn product_bars(totals: &ProductTotals) -> Vec<Bar> {
    totals
        .iter()
        .map(|(product, value)| Bar::new(product.name(), value))
        .collect()
}

/// How text bars are drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Length of the longest bar, in characters.
    pub width: usize,
    /// Character a bar is made of.
    pub bar: char,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 40,
            bar: '█',
        }
    }
}

/// Format a sales amount: integers without decimals, others with two.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Number of bar characters for `value` when `max` spans `width` characters.
pub fn bar_length(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || !value.is_finite() || value <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round().min(width as f64) as usize
}

/// Render a chart as horizontal text bars.
pub fn render_text(chart: &Chart, style: &ChartStyle) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", chart.title));
    output.push_str(&format!("({})\n", chart.value_label));

    let max = chart.max_value();
    let label_width = chart
        .bars()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(0);

    match &chart.series {
        Series::Simple { bars } => {
            for bar in bars {
                output.push_str(&render_bar(bar, max, label_width, "  ", style));
            }
        }
        Series::Grouped { groups } => {
            for group in groups {
                output.push_str(&format!("  {}\n", group.label));
                for bar in &group.bars {
                    output.push_str(&render_bar(bar, max, label_width, "    ", style));
                }
            }
        }
    }

    output
}

fn render_bar(bar: &Bar, max: f64, label_width: usize, indent: &str, style: &ChartStyle) -> String {
    let length = bar_length(bar.value, max, style.width);
    let filled: String = std::iter::repeat(style.bar).take(length).collect();

    format!(
        "{}{:<label_width$} │{:<bar_width$} {}\n",
        indent,
        bar.label,
        filled,
        format_value(bar.value),
        label_width = label_width,
        bar_width = style.width,
    )
}

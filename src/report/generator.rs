//! Page report generation.
//!
//! This module renders a [`Report`] as terminal text, Markdown, or JSON.

use super::chart::{format_value, render_text, ChartStyle};
use crate::dashboard::{DataView, Report, ReportMetadata};
use crate::models::{Product, ProductTotals};
use anyhow::Result;

/// Generate the terminal rendering of a page.
pub fn generate_terminal_report(report: &Report, style: &ChartStyle) -> String {
    let page = &report.dashboard;
    let mut output = String::new();

    output.push_str(&section_header(&page.title));

    if let Some(ref data) = page.data {
        output.push_str(&subsection(&data.title));
        output.push_str(&text_table(data));
        output.push_str(&format!(
            "{} / {} lignes affichées\n",
            data.rows.len(),
            data.total_rows
        ));
    }

    if let Some(ref totals) = page.product_totals {
        output.push_str(&subsection("Répartition des ventes par produit"));
        for (product, value) in totals.iter() {
            output.push_str(&format!(
                "  {:<12} {}\n",
                product.name(),
                format_value(value)
            ));
        }
    }

    if !page.charts.is_empty() {
        output.push_str(&subsection("Graphiques des Ventes"));
        for chart in &page.charts {
            output.push_str(&render_text(chart, style));
            output.push('\n');
        }
    }

    if !page.recommendations.is_empty() {
        output.push_str(&subsection("Recommandations"));
        for rec in &page.recommendations {
            output.push_str(&format!("  - {}\n", rec));
        }
    }

    if !page.suggestions.is_empty() {
        output.push_str(&subsection("Suggestions pour l'Avenir"));
        for suggestion in &page.suggestions {
            output.push_str(&format!("  - {}\n", suggestion));
        }
    }

    for notice in &page.notices {
        output.push_str(&format!("\n⚠️  {}\n", notice));
    }

    output
}

fn section_header(title: &str) -> String {
    let rule = "═".repeat(80);
    format!("{}\n  {}\n{}\n", rule, title, rule)
}

fn subsection(title: &str) -> String {
    format!("\n{}\n{}\n", title, "─".repeat(70))
}

/// Fixed-width table of records.
fn text_table(data: &DataView) -> String {
    let mut headers = vec!["Channel".to_string(), "Region".to_string()];
    headers.extend(Product::ALL.iter().map(|p| p.name().to_string()));

    let rows: Vec<Vec<String>> = data
        .rows
        .iter()
        .map(|record| {
            let mut row = vec![record.channel.clone(), record.region.clone()];
            row.extend(record.sales.iter().map(|(_, v)| format_value(v)));
            row
        })
        .collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|i| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(headers[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |cells: &[String]| {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, width))| {
                // Labels left-aligned, quantities right-aligned.
                if i < 2 {
                    format!("{:<width$}", cell, width = width)
                } else {
                    format!("{:>width$}", cell, width = width)
                }
            })
            .collect();
        format!("  {}\n", line.join("  ").trim_end())
    };

    let mut table = format_row(&headers);
    let total_width: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    table.push_str(&format!("  {}\n", "─".repeat(total_width)));
    for row in &rows {
        table.push_str(&format_row(row));
    }

    table
}

/// Generate a complete Markdown page.
pub fn generate_markdown_report(report: &Report, style: &ChartStyle) -> String {
    let page = &report.dashboard;
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", page.title));
    output.push_str(&generate_metadata_section(&report.metadata, report));

    if let Some(ref data) = page.data {
        output.push_str(&generate_data_section(data));
    }

    if let Some(ref totals) = page.product_totals {
        output.push_str(&generate_totals_section(totals));
    }

    if !page.charts.is_empty() {
        output.push_str("## Graphiques des Ventes\n\n");
        for chart in &page.charts {
            output.push_str(&format!("### {}\n\n```text\n", chart.title));
            output.push_str(&render_text(chart, style));
            output.push_str("```\n\n");
        }
    }

    output.push_str(&generate_list_section(
        "Recommandations",
        &page.recommendations,
    ));
    output.push_str(&generate_list_section(
        "Suggestions pour l'Avenir",
        &page.suggestions,
    ));

    if !page.notices.is_empty() {
        for notice in &page.notices {
            output.push_str(&format!("> ⚠️ {}\n", notice));
        }
        output.push('\n');
    }

    output.push_str("---\n\n");
    output.push_str("*Généré par beans-dashboard*\n");

    output
}

fn generate_metadata_section(metadata: &ReportMetadata, report: &Report) -> String {
    let mut section = String::new();

    section.push_str("## Métadonnées\n\n");
    section.push_str(&format!("- **Page :** {}\n", report.dashboard.mode));
    section.push_str(&format!("- **Données :** `{}`\n", metadata.data_path));
    section.push_str(&format!(
        "- **Enregistrements :** {}\n",
        metadata.record_count
    ));

    let dimensions: Vec<&str> = report
        .dashboard
        .dimensions
        .iter()
        .map(|d| d.label())
        .collect();
    if !dimensions.is_empty() {
        section.push_str(&format!("- **Critères :** {}\n", dimensions.join(", ")));
    }

    section.push_str(&format!(
        "- **Généré le :** {}\n\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    section
}

fn generate_data_section(data: &DataView) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", data.title));
    section.push_str("| Channel | Region |");
    for product in Product::ALL {
        section.push_str(&format!(" {} |", product.name()));
    }
    section.push_str("\n|:---|:---|");
    section.push_str(&"---:|".repeat(Product::ALL.len()));
    section.push('\n');

    for record in &data.rows {
        section.push_str(&format!("| {} | {} |", record.channel, record.region));
        for (_, value) in record.sales.iter() {
            section.push_str(&format!(" {} |", format_value(value)));
        }
        section.push('\n');
    }

    section.push_str(&format!(
        "\n*{} / {} lignes affichées*\n\n",
        data.rows.len(),
        data.total_rows
    ));

    section
}

fn generate_totals_section(totals: &ProductTotals) -> String {
    let mut section = String::new();

    section.push_str("## Répartition des ventes par produit\n\n");
    section.push_str("| Produit | Ventes |\n");
    section.push_str("|:---|---:|\n");
    for (product, value) in totals.iter() {
        section.push_str(&format!(
            "| {} | {} |\n",
            product.name(),
            format_value(value)
        ));
    }
    section.push('\n');

    section
}

fn generate_list_section(title: &str, items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", title));
    for item in items {
        section.push_str(&format!("- {}\n", item));
    }
    section.push('\n');

    section
}

/// Generate a JSON page.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

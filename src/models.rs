//! Data models for the sales dashboard.
//!
//! This module contains the core data structures shared by the loader,
//! the analysis functions, and the report generators.

use clap::ValueEnum;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A coffee product tracked in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Product {
    Robusta,
    Arabica,
    Espresso,
    Lungo,
    Latte,
    Cappuccino,
}

impl Product {
    /// Canonical product order. Iteration and arg-max tie-breaks follow it.
    pub const ALL: [Product; 6] = [
        Product::Robusta,
        Product::Arabica,
        Product::Espresso,
        Product::Lungo,
        Product::Latte,
        Product::Cappuccino,
    ];

    /// Column header of this product in the input file.
    pub fn name(&self) -> &'static str {
        match self {
            Product::Robusta => "Robusta",
            Product::Arabica => "Arabica",
            Product::Espresso => "Espresso",
            Product::Lungo => "Lungo",
            Product::Latte => "Latte",
            Product::Cappuccino => "Cappuccino",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A grouping axis for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Sales channel (Online, Store, ...)
    #[value(alias = "canal")]
    #[serde(alias = "canal")]
    Channel,
    /// Geographic region
    #[value(alias = "région")]
    #[serde(alias = "région")]
    Region,
}

impl Dimension {
    /// Label shown in the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Channel => "Canal",
            Dimension::Region => "Région",
        }
    }

    /// Column header of this dimension in the input file.
    pub fn column(&self) -> &'static str {
        match self {
            Dimension::Channel => "Channel",
            Dimension::Region => "Region",
        }
    }

    /// The record's label along this dimension.
    pub fn key<'a>(&self, record: &'a SalesRecord) -> &'a str {
        match self {
            Dimension::Channel => &record.channel,
            Dimension::Region => &record.region,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Dashboard page to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Full data table
    #[value(alias = "accueil")]
    #[serde(alias = "accueil")]
    Home,
    /// Sales analysis with recommendations (default)
    #[default]
    #[value(alias = "analyse-des-ventes")]
    #[serde(alias = "analyse-des-ventes")]
    Analysis,
    /// First rows and product totals
    #[value(alias = "peek-at-the-data")]
    #[serde(alias = "peek-at-the-data")]
    Peek,
    /// All charts, including online vs store
    Visualisation,
}

impl Mode {
    /// Page heading.
    pub fn title(&self) -> &'static str {
        match self {
            Mode::Home => "Affichage des données des ventes de Beans & Pods",
            Mode::Analysis => "Analyse des Ventes de Beans & Pods",
            Mode::Peek => "Aperçu des données",
            Mode::Visualisation => "Graphiques des ventes",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Home => write!(f, "Accueil"),
            Mode::Analysis => write!(f, "Analyse des Ventes"),
            Mode::Peek => write!(f, "Peek at the Data"),
            Mode::Visualisation => write!(f, "Visualisation"),
        }
    }
}

/// Quantity per product, one slot per entry of [`Product::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProductTotals([f64; 6]);

impl ProductTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, product: Product) -> f64 {
        self.0[product.index()]
    }

    /// Add another set of quantities slot by slot.
    pub fn accumulate(&mut self, other: &ProductTotals) {
        for (slot, value) in self.0.iter_mut().zip(other.0.iter()) {
            *slot += value;
        }
    }

    /// Sum of the six product values.
    pub fn row_sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Iterate in canonical product order.
    pub fn iter(&self) -> impl Iterator<Item = (Product, f64)> + '_ {
        Product::ALL.iter().map(move |p| (*p, self.get(*p)))
    }
}

impl From<[f64; 6]> for ProductTotals {
    fn from(values: [f64; 6]) -> Self {
        Self(values)
    }
}

impl Serialize for ProductTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Product::ALL.len()))?;
        for (product, value) in self.iter() {
            map.serialize_entry(product.name(), &value)?;
        }
        map.end()
    }
}

/// One row of the input table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    /// Sales channel label.
    pub channel: String,
    /// Region label.
    pub region: String,
    /// Quantity sold per product.
    #[serde(flatten)]
    pub sales: ProductTotals,
}

impl SalesRecord {
    pub fn new(channel: impl Into<String>, region: impl Into<String>, sales: [f64; 6]) -> Self {
        Self {
            channel: channel.into(),
            region: region.into(),
            sales: ProductTotals::from(sales),
        }
    }
}

/// Ordered sequence of sales records, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
}

impl SalesTable {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first `n` records (or all of them if there are fewer).
    pub fn head(&self, n: usize) -> &[SalesRecord] {
        &self.records[..n.min(self.records.len())]
    }
}

impl From<Vec<SalesRecord>> for SalesTable {
    fn from(records: Vec<SalesRecord>) -> Self {
        Self::new(records)
    }
}

/// Per-group product totals, iterated in sorted label order.
pub type GroupTotals = BTreeMap<String, ProductTotals>;

/// The projections computed by one aggregation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    /// Totals per product across all records.
    pub totals_by_product: ProductTotals,
    /// Totals per channel, present only when channel grouping was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totals_by_channel: Option<GroupTotals>,
    /// Totals per region, present only when region grouping was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totals_by_region: Option<GroupTotals>,
}

impl AggregationResult {
    /// The grouped totals for a dimension, if that dimension was requested.
    pub fn by_dimension(&self, dimension: Dimension) -> Option<&GroupTotals> {
        match dimension {
            Dimension::Channel => self.totals_by_channel.as_ref(),
            Dimension::Region => self.totals_by_region.as_ref(),
        }
    }
}

/// Total online and in-store sales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OnlineStoreTotals {
    pub online: f64,
    pub store: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_order() {
        let names: Vec<_> = Product::ALL.iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            vec![
                "Robusta",
                "Arabica",
                "Espresso",
                "Lungo",
                "Latte",
                "Cappuccino"
            ]
        );
        assert!(Product::Robusta < Product::Cappuccino);
    }

    #[test]
    fn test_product_totals_row_sum() {
        let mut totals = ProductTotals::from([1.0, 2.0, 3.0, 0.0, 0.0, 4.0]);
        assert_eq!(totals.row_sum(), 10.0);

        totals.accumulate(&ProductTotals::from([1.0; 6]));
        assert_eq!(totals.get(Product::Arabica), 3.0);
        assert_eq!(totals.row_sum(), 16.0);
    }

    #[test]
    fn test_product_totals_serialize_in_canonical_order() {
        let totals = ProductTotals::from([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let json = serde_json::to_string(&totals).unwrap();
        assert_eq!(
            json,
            r#"{"Robusta":1.0,"Arabica":2.0,"Espresso":3.0,"Lungo":4.0,"Latte":5.0,"Cappuccino":6.0}"#
        );
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = SalesRecord::new("Online", "North", [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.starts_with(r#"{"channel":"Online","region":"North","Robusta":1.0"#));
    }

    #[test]
    fn test_table_head() {
        let table = SalesTable::new(vec![
            SalesRecord::new("Online", "North", [0.0; 6]),
            SalesRecord::new("Store", "South", [0.0; 6]),
        ]);
        assert_eq!(table.head(1).len(), 1);
        assert_eq!(table.head(10).len(), 2);
    }

    #[test]
    fn test_dimension_key() {
        let record = SalesRecord::new("Store", "East", [0.0; 6]);
        assert_eq!(Dimension::Channel.key(&record), "Store");
        assert_eq!(Dimension::Region.key(&record), "East");
    }

    #[test]
    fn test_mode_aliases_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: Mode,
            dims: Vec<Dimension>,
        }

        let parsed: Wrapper =
            toml::from_str("mode = \"accueil\"\ndims = [\"canal\", \"région\"]").unwrap();
        assert_eq!(parsed.mode, Mode::Home);
        assert_eq!(parsed.dims, vec![Dimension::Channel, Dimension::Region]);
    }
}

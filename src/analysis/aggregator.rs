//! Sales aggregation.
//!
//! Computes product totals over the whole table and grouped totals per
//! channel and per region.

use crate::error::DashboardError;
use crate::models::{
    AggregationResult, Dimension, GroupTotals, OnlineStoreTotals, ProductTotals, SalesTable,
};
use tracing::debug;

/// Channel label for online sales.
pub const ONLINE_CHANNEL: &str = "Online";
/// Channel label for in-store sales.
pub const STORE_CHANNEL: &str = "Store";

/// Aggregate the table along the requested dimensions.
///
/// Product totals are always computed. Grouped totals are computed only for
/// the dimensions present in `dimensions`.
pub fn aggregate(
    table: &SalesTable,
    dimensions: &[Dimension],
) -> Result<AggregationResult, DashboardError> {
    if table.is_empty() {
        return Err(DashboardError::InvalidInput(
            "cannot aggregate an empty sales table".to_string(),
        ));
    }

    let grouped = |dimension: Dimension| {
        dimensions
            .contains(&dimension)
            .then(|| group_by(table, dimension))
    };

    let result = AggregationResult {
        totals_by_product: total_by_product(table),
        totals_by_channel: grouped(Dimension::Channel),
        totals_by_region: grouped(Dimension::Region),
    };

    debug!(
        "Aggregated {} records (channels: {:?}, regions: {:?})",
        table.len(),
        result.totals_by_channel.as_ref().map(|g| g.len()),
        result.totals_by_region.as_ref().map(|g| g.len()),
    );

    Ok(result)
}

/// Column-wise sum of every product over all records.
pub fn total_by_product(table: &SalesTable) -> ProductTotals {
    let mut totals = ProductTotals::new();

    for record in table.records() {
        totals.accumulate(&record.sales);
    }

    totals
}

/// Partition records by their label along `dimension` and sum each partition.
pub fn group_by(table: &SalesTable, dimension: Dimension) -> GroupTotals {
    let mut grouped = GroupTotals::new();

    for record in table.records() {
        grouped
            .entry(dimension.key(record).to_string())
            .or_default()
            .accumulate(&record.sales);
    }

    grouped
}

/// Total online and in-store sales from per-channel totals.
pub fn online_vs_store(by_channel: &GroupTotals) -> Result<OnlineStoreTotals, DashboardError> {
    let row_sum = |label: &str| {
        by_channel
            .get(label)
            .map(ProductTotals::row_sum)
            .ok_or_else(|| DashboardError::MissingChannel {
                label: label.to_string(),
            })
    };

    Ok(OnlineStoreTotals {
        online: row_sum(ONLINE_CHANNEL)?,
        store: row_sum(STORE_CHANNEL)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, SalesRecord};

    fn scenario_table() -> SalesTable {
        SalesTable::new(vec![
            SalesRecord::new("Online", "North", [10.0, 5.0, 0.0, 0.0, 0.0, 0.0]),
            SalesRecord::new("Store", "South", [2.0, 20.0, 0.0, 0.0, 0.0, 0.0]),
        ])
    }

    fn mixed_table() -> SalesTable {
        SalesTable::new(vec![
            SalesRecord::new("Store", "South", [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
            SalesRecord::new("Online", "North", [6.0, 5.0, 4.0, 3.0, 2.0, 1.0]),
            SalesRecord::new("Store", "North", [0.5, 0.5, 0.5, 0.5, 0.5, 0.5]),
            SalesRecord::new("Online", "Central", [10.0, 0.0, 0.0, 0.0, 0.0, 7.0]),
        ])
    }

    #[test]
    fn test_scenario_totals() {
        let result =
            aggregate(&scenario_table(), &[Dimension::Channel, Dimension::Region]).unwrap();

        assert_eq!(
            result.totals_by_product,
            ProductTotals::from([12.0, 25.0, 0.0, 0.0, 0.0, 0.0])
        );

        let channels = result.totals_by_channel.unwrap();
        assert_eq!(channels["Online"].row_sum(), 15.0);
        assert_eq!(channels["Store"].row_sum(), 22.0);

        let regions = result.totals_by_region.unwrap();
        assert_eq!(regions["North"].get(Product::Robusta), 10.0);
        assert_eq!(regions["South"].get(Product::Arabica), 20.0);
    }

    #[test]
    fn test_product_totals_match_cell_sum() {
        let table = mixed_table();
        let result = aggregate(&table, &[]).unwrap();

        let cell_sum: f64 = table.records().iter().map(|r| r.sales.row_sum()).sum();
        assert_eq!(result.totals_by_product.row_sum(), cell_sum);
    }

    #[test]
    fn test_grouped_totals_partition_the_table() {
        let table = mixed_table();
        let result = aggregate(&table, &[Dimension::Channel, Dimension::Region]).unwrap();

        for groups in [result.totals_by_channel, result.totals_by_region] {
            let groups = groups.unwrap();
            for product in Product::ALL {
                let across_groups: f64 = groups.values().map(|t| t.get(product)).sum();
                assert_eq!(across_groups, result.totals_by_product.get(product));
            }
        }
    }

    #[test]
    fn test_only_requested_dimensions() {
        let table = mixed_table();

        let result = aggregate(&table, &[Dimension::Region]).unwrap();
        assert!(result.totals_by_channel.is_none());
        assert!(result.totals_by_region.is_some());

        let result = aggregate(&table, &[]).unwrap();
        assert!(result.totals_by_channel.is_none());
        assert!(result.totals_by_region.is_none());
    }

    #[test]
    fn test_group_keys_are_sorted_and_not_zero_filled() {
        let result = aggregate(&mixed_table(), &[Dimension::Region]).unwrap();
        let keys: Vec<_> = result.totals_by_region.unwrap().into_keys().collect();
        assert_eq!(keys, vec!["Central", "North", "South"]);
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let table = mixed_table();
        let dims = [Dimension::Channel, Dimension::Region];
        assert_eq!(
            aggregate(&table, &dims).unwrap(),
            aggregate(&table, &dims).unwrap()
        );
    }

    #[test]
    fn test_empty_table_is_invalid_input() {
        let err = aggregate(&SalesTable::default(), &[Dimension::Channel]).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput(_)));
    }

    #[test]
    fn test_online_vs_store() {
        let by_channel = group_by(&mixed_table(), Dimension::Channel);
        let totals = online_vs_store(&by_channel).unwrap();
        assert_eq!(totals.online, 38.0);
        assert_eq!(totals.store, 24.0);
    }

    #[test]
    fn test_online_vs_store_missing_store() {
        let table = SalesTable::new(vec![SalesRecord::new("Online", "North", [1.0; 6])]);
        let by_channel = group_by(&table, Dimension::Channel);

        match online_vs_store(&by_channel).unwrap_err() {
            DashboardError::MissingChannel { label } => assert_eq!(label, "Store"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

//! Recommendations derived from aggregated sales.

use crate::models::{AggregationResult, GroupTotals, Product, ProductTotals};

/// Data-collection suggestions shown under the recommendations.
pub const SUGGESTIONS: [&str; 4] = [
    "Collecter des informations sur les préférences des clients par produit (ex : goûts, types de boissons préférées).",
    "Analyser l'impact des promotions et des campagnes marketing sur les ventes.",
    "Suivre les comportements d'achat des clients en ligne (ex : fréquence des achats, panier moyen).",
    "Recueillir des avis clients sur les produits pour identifier des axes d'amélioration.",
];

/// Build the recommendation sentences: product, then channel, then region.
pub fn recommend(result: &AggregationResult) -> Vec<String> {
    let mut recommendations = Vec::with_capacity(3);

    if let Some(product) = top_product(&result.totals_by_product) {
        recommendations.push(format!(
            "Le produit le plus vendu est {}. Il faudrait faire une campagne dans cette zone pour augmenter les ventes.",
            product
        ));
    }

    if let Some(channel) = result.totals_by_channel.as_ref().and_then(top_group) {
        recommendations.push(format!(
            "Le canal de vente le plus performant est {}. Pour augmenter les ventes, on devrait faire une campagne de marketing.",
            channel
        ));
    }

    if let Some(region) = result.totals_by_region.as_ref().and_then(top_group) {
        recommendations.push(format!(
            "La région la plus performante est {}. Beans & Pods devrait s'installer davantage dans cette zone.",
            region
        ));
    }

    recommendations
}

/// The static data-collection suggestions.
pub fn suggestions() -> &'static [&'static str] {
    &SUGGESTIONS
}

/// Product with the largest total. Ties go to the earliest in [`Product::ALL`].
pub fn top_product(totals: &ProductTotals) -> Option<Product> {
    arg_max(totals.iter())
}

/// Group with the largest row sum. Ties go to the earliest key.
pub fn top_group(groups: &GroupTotals) -> Option<&str> {
    arg_max(
        groups
            .iter()
            .map(|(key, totals)| (key.as_str(), totals.row_sum())),
    )
}

/// First key holding the maximum value. NaN values never win.
fn arg_max<K>(values: impl IntoIterator<Item = (K, f64)>) -> Option<K> {
    let mut best: Option<(K, f64)> = None;

    for (key, value) in values {
        if value.is_nan() {
            continue;
        }
        let better = best.as_ref().map_or(true, |(_, current)| value > *current);
        if better {
            best = Some((key, value));
        }
    }

    best.map(|(key, _)| key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate;
    use crate::models::{Dimension, SalesRecord, SalesTable};

    fn scenario_table() -> SalesTable {
        SalesTable::new(vec![
            SalesRecord::new("Online", "North", [10.0, 5.0, 0.0, 0.0, 0.0, 0.0]),
            SalesRecord::new("Store", "South", [2.0, 20.0, 0.0, 0.0, 0.0, 0.0]),
        ])
    }

    #[test]
    fn test_scenario_recommendations() {
        let result =
            aggregate(&scenario_table(), &[Dimension::Channel, Dimension::Region]).unwrap();
        let recs = recommend(&result);

        assert_eq!(recs.len(), 3);
        assert!(recs[0].starts_with("Le produit le plus vendu est Arabica."));
        assert!(recs[1].starts_with("Le canal de vente le plus performant est Store."));
        assert!(recs[2].starts_with("La région la plus performante est South."));
    }

    #[test]
    fn test_no_channel_sentence_without_channel_dimension() {
        let table = scenario_table();

        let recs = recommend(&aggregate(&table, &[Dimension::Region]).unwrap());
        assert_eq!(recs.len(), 2);
        assert!(recs.iter().all(|r| !r.contains("canal")));
        assert!(recs[1].contains("South"));

        let recs = recommend(&aggregate(&table, &[]).unwrap());
        assert_eq!(recs.len(), 1);
    }

    #[test]
    fn test_empty_groups_are_skipped() {
        let mut result = aggregate(&scenario_table(), &[Dimension::Channel]).unwrap();
        result.totals_by_channel = Some(GroupTotals::new());
        assert_eq!(recommend(&result).len(), 1);
    }

    #[test]
    fn test_product_tie_breaks_on_canonical_order() {
        let totals = ProductTotals::from([1.0, 7.0, 3.0, 7.0, 7.0, 0.0]);
        for _ in 0..10 {
            assert_eq!(top_product(&totals), Some(Product::Arabica));
        }

        let all_equal = ProductTotals::from([4.0; 6]);
        assert_eq!(top_product(&all_equal), Some(Product::Robusta));
    }

    #[test]
    fn test_group_tie_breaks_on_first_key() {
        let mut groups = GroupTotals::new();
        groups.insert(
            "West".to_string(),
            ProductTotals::from([5.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        );
        groups.insert(
            "East".to_string(),
            ProductTotals::from([0.0, 0.0, 0.0, 0.0, 0.0, 5.0]),
        );
        groups.insert("North".to_string(), ProductTotals::from([0.5; 6]));

        assert_eq!(top_group(&groups), Some("East"));
    }

    #[test]
    fn test_arg_max_ignores_nan() {
        let totals = ProductTotals::from([f64::NAN, 2.0, f64::NAN, 3.0, 1.0, 0.0]);
        assert_eq!(top_product(&totals), Some(Product::Lungo));
    }

    #[test]
    fn test_suggestions_are_static() {
        assert_eq!(suggestions().len(), 4);
        assert!(suggestions()[1].contains("promotions"));
    }
}

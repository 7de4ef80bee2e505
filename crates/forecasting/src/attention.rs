use crate::model::ProductForecast;

/// How many forecasts the alerts view shows by default.
pub const DEFAULT_ATTENTION_LIMIT: usize = 5;

/// Below the reorder point, or the forecast says to order something.
pub fn needs_attention(forecast: &ProductForecast) -> bool {
    forecast.current_stock < forecast.reorder_point || forecast.recommended_order_quantity > 0
}

/// The forecasts most in need of a purchase order: those that need
/// attention, largest recommended order first, at most `limit` of them.
///
/// Ties keep their input order.
pub fn attention_list(forecasts: &[ProductForecast], limit: usize) -> Vec<&ProductForecast> {
    let mut flagged: Vec<&ProductForecast> = forecasts.iter().filter(|f| needs_attention(f)).collect();
    flagged.sort_by(|a, b| b.recommended_order_quantity.cmp(&a.recommended_order_quantity));
    flagged.truncate(limit);
    flagged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Trend;
    use stockcast_core::ProductId;

    fn fc(id: &str, stock: i64, reorder_point: i64, order: u64) -> ProductForecast {
        ProductForecast {
            product_id: ProductId::new(id).unwrap(),
            product_name: id.to_string(),
            current_stock: stock,
            reorder_point,
            forecasted_demand_total: 0,
            recommended_order_quantity: order,
            trend: Trend::Stable,
            confidence_percent: 90,
            historical: Vec::new(),
            forecast: Vec::new(),
        }
    }

    #[test]
    fn orders_by_recommended_quantity_descending() {
        let all = vec![fc("a", 50, 10, 20), fc("b", 50, 10, 0), fc("c", 50, 10, 90), fc("d", 50, 10, 40)];
        let ids: Vec<&str> = attention_list(&all, DEFAULT_ATTENTION_LIMIT)
            .iter()
            .map(|f| f.product_id.as_str())
            .collect();
        assert_eq!(ids, vec!["c", "d", "a"]);
    }

    #[test]
    fn below_reorder_point_is_flagged_without_an_order() {
        let all = vec![fc("a", 5, 10, 0), fc("b", 10, 10, 0)];
        let flagged = attention_list(&all, 5);
        // strictly below only; at the reorder point with nothing to order is fine
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].product_id.as_str(), "a");
    }

    #[test]
    fn truncates_to_limit_and_keeps_ties_stable() {
        let all: Vec<ProductForecast> = (0..8).map(|i| fc(&i.to_string(), 50, 10, 100)).collect();
        let ids: Vec<&str> = attention_list(&all, 3).iter().map(|f| f.product_id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2"]);
        assert!(attention_list(&all, 0).is_empty());
    }
}

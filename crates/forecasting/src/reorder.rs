use stockcast_catalog::Product;

/// Reorder recommendation: cover projected demand and end the horizon at the
/// reorder point.
///
/// `max(0, forecasted_demand - stock + reorder_point)`
#[derive(Debug, Clone, Copy, Default)]
pub struct ReorderAdvisor;

impl ReorderAdvisor {
    pub fn recommend(&self, product: &Product, forecasted_demand_total: u64) -> u64 {
        let raw = i128::from(forecasted_demand_total) - i128::from(product.stock)
            + i128::from(product.reorder_point);
        u64::try_from(raw.max(0)).unwrap_or(u64::MAX)
    }
}

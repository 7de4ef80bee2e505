use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use stockcast_core::{DomainError, DomainResult, Entity, ProductId};

use crate::product::Product;

/// An ordered set of products with unique ids.
///
/// Order is preserved: forecasts computed from a catalog come back in the
/// same order unless the caller re-sorts them.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    ///
    /// Numeric validation happens in the forecasting layer, per product.
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        let mut seen: HashSet<&ProductId> = HashSet::with_capacity(products.len());
        for p in &products {
            if !seen.insert(p.id()) {
                return Err(DomainError::conflict(format!(
                    "duplicate product id {} in catalog",
                    p.id()
                )));
            }
        }
        debug!(products = products.len(), "catalog loaded");
        Ok(Self { products })
    }

    /// The built-in demo catalog (ten office products).
    pub fn sample() -> Self {
        let rows: [(&str, &str, &str, &str, f64, i64, i64, &str, i64); 10] = [
            ("1", "Ergonomic Chair", "Furniture", "FRN-CH-001", 249.99, 45, 15, "Office Essentials", 14),
            ("2", "Standing Desk", "Furniture", "FRN-DSK-002", 399.99, 23, 10, "Office Essentials", 21),
            ("3", "Wireless Keyboard", "Electronics", "ELC-KB-003", 89.99, 65, 30, "TechGear Ltd", 7),
            ("4", "Wireless Mouse", "Electronics", "ELC-MS-004", 49.99, 78, 35, "TechGear Ltd", 7),
            ("5", "27\" Monitor", "Electronics", "ELC-MON-005", 299.99, 32, 12, "DisplayTech", 10),
            ("6", "Desk Lamp", "Accessories", "ACC-LMP-006", 39.99, 54, 20, "LightWorks", 5),
            ("7", "Laptop Stand", "Accessories", "ACC-STD-007", 29.99, 42, 18, "Office Essentials", 3),
            ("8", "Docking Station", "Electronics", "ELC-DOC-008", 129.99, 19, 8, "TechGear Ltd", 9),
            ("9", "Office Chair Mat", "Accessories", "ACC-MAT-009", 49.99, 37, 15, "Floor Solutions", 4),
            ("10", "Desk Organizer", "Accessories", "ACC-ORG-010", 24.99, 61, 25, "Office Essentials", 3),
        ];

        let products = rows
            .into_iter()
            .map(
                |(id, name, category, sku, price, stock, reorder_point, supplier, lead_time_days)| Product {
                    id: ProductId::new(id).unwrap_or_else(|_| unreachable!("sample ids are non-empty")),
                    name: name.to_string(),
                    category: category.to_string(),
                    sku: sku.to_string(),
                    price,
                    stock,
                    reorder_point,
                    supplier: supplier.to_string(),
                    lead_time_days,
                },
            )
            .collect();

        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Products at or below their reorder point, in catalog order.
    pub fn low_stock(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_low_stock())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn into_products(self) -> Vec<Product> {
        self.products
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::tests::product;
    use proptest::prelude::*;

    #[test]
    fn sample_catalog_has_ten_valid_products() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.len(), 10);
        for p in &catalog {
            assert_eq!(p.validate(), Ok(()), "sample product {} should be valid", p.id);
        }
        // Rebuilding through `new` proves the ids are unique.
        assert!(Catalog::new(catalog.clone().into_products()).is_ok());
    }

    #[test]
    fn sample_catalog_has_no_low_stock_items() {
        assert_eq!(Catalog::sample().low_stock().count(), 0);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new(vec![product("1", 5, 3), product("1", 9, 3)]).unwrap_err();
        match err {
            DomainError::Conflict(msg) if msg.contains("duplicate product id 1") => {}
            _ => panic!("Expected Conflict error for duplicate id"),
        }
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::sample();
        let id = ProductId::new("8").unwrap();
        assert_eq!(catalog.get(&id).map(|p| p.name.as_str()), Some("Docking Station"));
        assert!(catalog.get(&ProductId::new("404").unwrap()).is_none());
    }

    #[test]
    fn keeps_insertion_order() {
        let catalog = Catalog::new(vec![product("b", 1, 0), product("a", 1, 0)]).unwrap();
        let ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: low-stock selection matches the `stock <= reorder_point`
        /// predicate exactly.
        #[test]
        fn low_stock_matches_predicate(
            levels in prop::collection::vec((0i64..200, 0i64..200), 0..30)
        ) {
            let products: Vec<Product> = levels
                .iter()
                .enumerate()
                .map(|(i, (stock, rp))| product(&i.to_string(), *stock, *rp))
                .collect();
            let expected = levels.iter().filter(|(s, rp)| s <= rp).count();
            let catalog = Catalog::new(products).unwrap();
            prop_assert_eq!(catalog.low_stock().count(), expected);
        }
    }
}

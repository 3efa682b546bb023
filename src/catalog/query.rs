//! Read-only views over a store snapshot: filter, paginate, search, stats.
//!
//! # Design Decisions
//! - Every function takes `&[Product]` and returns owned results; none mutates
//! - Filters preserve input order, so combining them is order-independent
//! - Out-of-range pages are empty, never an error

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::product::Product;

/// Listing filters. `None` disables that filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

impl ProductFilter {
    /// Build from raw query values, applying the lenient stock parse.
    pub fn from_params(category: Option<&str>, in_stock: Option<&str>) -> Self {
        Self {
            category: category.map(str::to_owned),
            in_stock: in_stock.map(parse_stock_flag),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self
            .category
            .as_ref()
            .map_or(true, |c| product.category.to_lowercase() == c.to_lowercase());
        let stock_ok = self.in_stock.map_or(true, |s| product.in_stock == s);
        category_ok && stock_ok
    }

    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

/// `"true"` in any case is true; any other supplied value is false.
pub fn parse_stock_flag(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

/// Leading-integer parse: optional whitespace and sign, then digits; the rest is ignored.
fn leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Coerce a paging parameter: anything that is not a positive integer becomes `default`.
pub fn coerce_positive(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(leading_int)
        .filter(|n| *n >= 1)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(default)
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub products: Vec<Product>,
}

/// Slice `[(page-1)*limit, page*limit)` of `items`, clamped to its length.
///
/// `page` and `limit` must be at least 1.
pub fn paginate(items: Vec<Product>, page: usize, limit: usize) -> Page {
    let total = items.len();
    let start = page.saturating_sub(1).saturating_mul(limit).min(total);
    let end = page.saturating_mul(limit).min(total);

    Page {
        total,
        page,
        limit,
        products: items.into_iter().skip(start).take(end - start).collect(),
    }
}

/// Case-insensitive substring match against `name` only.
pub fn search_by_name(products: &[Product], term: &str) -> Vec<Product> {
    let needle = term.to_lowercase();
    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Aggregate counts over the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_products: usize,
    pub in_stock: usize,
    pub out_of_stock: usize,
    /// Keyed by exact category string; case variants are counted separately.
    pub categories: BTreeMap<String, usize>,
}

pub fn stats(products: &[Product]) -> CatalogStats {
    let in_stock = products.iter().filter(|p| p.in_stock).count();
    let mut categories = BTreeMap::new();
    for product in products {
        *categories.entry(product.category.clone()).or_insert(0) += 1;
    }

    CatalogStats {
        total_products: products.len(),
        in_stock,
        out_of_stock: products.len() - in_stock,
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed::demo_products;

    fn numbered(n: usize) -> Vec<Product> {
        (0..n)
            .map(|i| Product {
                id: i.to_string(),
                name: format!("Item {i}"),
                description: "d".into(),
                price: 1.0 + i as f64,
                category: if i % 2 == 0 { "Even" } else { "odd" }.into(),
                in_stock: i % 3 != 0,
            })
            .collect()
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_category_filter_case_insensitive() {
        let products = demo_products();
        let lower = ProductFilter::from_params(Some("electronics"), None).apply(&products);
        let mixed = ProductFilter::from_params(Some("ElEcTrOnIcS"), None).apply(&products);

        assert_eq!(ids(&lower), vec!["1", "2"]);
        assert_eq!(lower, mixed);
    }

    #[test]
    fn test_stock_filter_lenient() {
        assert!(parse_stock_flag("TRUE"));
        assert!(!parse_stock_flag("false"));
        assert!(!parse_stock_flag("yes"));
        assert!(!parse_stock_flag(""));

        let products = demo_products();
        let out = ProductFilter::from_params(None, Some("banana")).apply(&products);
        assert_eq!(ids(&out), vec!["3"]);
    }

    #[test]
    fn test_filters_commute() {
        let products = numbered(20);
        let by_category = ProductFilter::from_params(Some("even"), None);
        let by_stock = ProductFilter::from_params(None, Some("true"));
        let both = ProductFilter::from_params(Some("even"), Some("true"));

        let a = by_stock.apply(&by_category.apply(&products));
        let b = by_category.apply(&by_stock.apply(&products));
        assert_eq!(a, b);
        assert_eq!(a, both.apply(&products));
    }

    #[test]
    fn test_no_filter_keeps_everything() {
        let products = numbered(5);
        assert_eq!(ProductFilter::default().apply(&products), products);
    }

    #[test]
    fn test_pagination_slices() {
        let n = 23;
        for limit in [1, 5, 10, 30] {
            for page in 1..=6 {
                let result = paginate(numbered(n), page, limit);
                let start = ((page - 1) * limit).min(n);
                let end = (page * limit).min(n);
                let expected: Vec<String> = (start..end).map(|i| i.to_string()).collect();

                assert_eq!(result.total, n);
                assert_eq!(result.page, page);
                assert_eq!(result.limit, limit);
                assert_eq!(ids(&result.products), expected);
            }
        }
    }

    #[test]
    fn test_pagination_far_out_of_range() {
        let result = paginate(numbered(3), usize::MAX, usize::MAX);
        assert!(result.products.is_empty());
        assert_eq!(result.total, 3);
    }

    #[test]
    fn test_coerce_positive() {
        assert_eq!(coerce_positive(None, 1), 1);
        assert_eq!(coerce_positive(Some("3"), 1), 3);
        assert_eq!(coerce_positive(Some(" 2abc"), 1), 2);
        assert_eq!(coerce_positive(Some("abc"), 10), 10);
        assert_eq!(coerce_positive(Some("0"), 10), 10);
        assert_eq!(coerce_positive(Some("-4"), 10), 10);
        assert_eq!(coerce_positive(Some("+7"), 10), 7);
        assert_eq!(coerce_positive(Some(""), 10), 10);
    }

    #[test]
    fn test_search_matches_name_only() {
        let products = demo_products();
        assert_eq!(ids(&search_by_name(&products, "LAP")), vec!["1"]);
        assert_eq!(ids(&search_by_name(&products, "o")), vec!["1", "2", "3"]);
        // "kitchen" is a category, not part of any name
        assert!(search_by_name(&products, "kitchen").is_empty());
    }

    #[test]
    fn test_stats_demo() {
        let stats = stats(&demo_products());
        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.in_stock, 2);
        assert_eq!(stats.out_of_stock, 1);
        assert_eq!(
            stats.categories,
            BTreeMap::from([("electronics".to_string(), 2), ("kitchen".to_string(), 1)])
        );
    }

    #[test]
    fn test_stats_categories_case_sensitive() {
        let mut products = demo_products();
        products[0].category = "Electronics".into();

        let stats = stats(&products);
        assert_eq!(stats.categories.get("Electronics"), Some(&1));
        assert_eq!(stats.categories.get("electronics"), Some(&1));
    }

    #[test]
    fn test_stats_wire_format() {
        let json = serde_json::to_value(stats(&[])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalProducts": 0,
                "inStock": 0,
                "outOfStock": 0,
                "categories": {}
            })
        );
    }
}

//! # Catalog View
//!
//! Search and sort for the admin inventory table.
//!
//! ## Table Interaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  search: "do"                                                           │
//! │                                                                         │
//! │  ┌──────────────┬────────────┬────────────┐                            │
//! │  │ Name     ▲   │ Price      │ Quantity   │  ◄── click a header:       │
//! │  ├──────────────┼────────────┼────────────┤      same column flips     │
//! │  │ Dove         │ 25.00      │ 10         │      new column → asc      │
//! │  │ Dove         │ 30.00      │ 5          │                            │
//! │  └──────────────┴────────────┴────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Search Semantics
//! - Case-insensitive substring match on the name
//! - A query made only of digits (and at most one `.`) also matches the
//!   price text ("25.00") or quantity text ("10") containing it literally,
//!   so "5" finds a $25.00 item and an item with 15 left

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use ts_rs::TS;

use crate::types::Item;

/// Column the table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SortKey {
    Name,
    Price,
    Quantity,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Current table sort. `key == None` keeps catalog order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SortState {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortState {
    /// Applies a header click.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::catalog_view::{SortDirection, SortKey, SortState};
    ///
    /// let mut sort = SortState::default();
    /// sort.toggle(SortKey::Price);
    /// assert_eq!(sort.direction, SortDirection::Ascending);
    /// sort.toggle(SortKey::Price);
    /// assert_eq!(sort.direction, SortDirection::Descending);
    /// sort.toggle(SortKey::Name);
    /// assert_eq!(sort.direction, SortDirection::Ascending);
    /// ```
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == Some(key) {
            self.direction = self.direction.flipped();
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Search text plus sort, as held by the admin console.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogQuery {
    pub search: String,
    pub sort: SortState,
}

impl CatalogQuery {
    /// Filters then sorts a copy of `items`.
    pub fn apply(&self, items: &[Item]) -> Vec<Item> {
        let mut visible = filter_items(items, &self.search);
        if let Some(key) = self.sort.key {
            sort_items(&mut visible, key, self.sort.direction);
        }
        visible
    }
}

/// Checks whether an item matches a search query.
pub fn matches_query(item: &Item, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }

    if item.name.to_lowercase().contains(&query.to_lowercase()) {
        return true;
    }

    is_numeric_query(query)
        && (item.price().to_decimal_string().contains(query)
            || item.quantity.to_string().contains(query))
}

fn is_numeric_query(query: &str) -> bool {
    query.chars().any(|c| c.is_ascii_digit())
        && query.chars().all(|c| c.is_ascii_digit() || c == '.')
        && query.matches('.').count() <= 1
}

/// Returns the items matching `query`, in catalog order.
pub fn filter_items(items: &[Item], query: &str) -> Vec<Item> {
    items
        .iter()
        .filter(|item| matches_query(item, query))
        .cloned()
        .collect()
}

/// Sorts in place. Stable: equal keys keep their relative order in both
/// directions.
pub fn sort_items(items: &mut [Item], key: SortKey, direction: SortDirection) {
    items.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn compare(a: &Item, b: &Item, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Price => a.price_cents.cmp(&b.price_cents),
        SortKey::Quantity => a.quantity.cmp(&b.quantity),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemId;

    fn item(id: u64, name: &str, price_cents: i64, quantity: u32) -> Item {
        Item {
            id: ItemId(id),
            name: name.to_string(),
            category: "Soap".to_string(),
            price_cents,
            quantity,
            discount_applicable: false,
        }
    }

    fn catalog() -> Vec<Item> {
        vec![
            item(1, "Dove", 2500, 10),
            item(2, "Pantene", 3000, 10),
            item(4, "Lux", 1500, 10),
            item(5, "dove", 3000, 5),
        ]
    }

    fn ids(items: &[Item]) -> Vec<u64> {
        items.iter().map(|i| i.id.0).collect()
    }

    #[test]
    fn test_name_search_is_case_insensitive() {
        assert_eq!(ids(&filter_items(&catalog(), "DOVE")), vec![1, 5]);
        assert_eq!(ids(&filter_items(&catalog(), "ant")), vec![2]);
        assert_eq!(ids(&filter_items(&catalog(), "")), vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_numeric_search_matches_text() {
        // "25.00" contains "5", "15.00" contains "5", quantity 5 contains "5"
        assert_eq!(ids(&filter_items(&catalog(), "5")), vec![1, 4, 5]);
        assert_eq!(ids(&filter_items(&catalog(), "30.0")), vec![2, 5]);
        assert!(filter_items(&catalog(), "1.2.3").is_empty());
    }

    #[test]
    fn test_sort_price_ascending_is_stable() {
        let mut items = catalog();
        sort_items(&mut items, SortKey::Price, SortDirection::Ascending);
        // Pantene (2) and dove (5) share 30.00 and keep catalog order
        assert_eq!(ids(&items), vec![4, 1, 2, 5]);
    }

    #[test]
    fn test_sort_descending_is_stable() {
        let mut items = catalog();
        sort_items(&mut items, SortKey::Price, SortDirection::Descending);
        assert_eq!(ids(&items), vec![2, 5, 1, 4]);

        let mut items = catalog();
        sort_items(&mut items, SortKey::Quantity, SortDirection::Descending);
        assert_eq!(ids(&items), vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let mut items = catalog();
        sort_items(&mut items, SortKey::Name, SortDirection::Ascending);
        assert_eq!(ids(&items), vec![1, 5, 4, 2]);
    }

    #[test]
    fn test_query_apply() {
        let mut query = CatalogQuery {
            search: "o".to_string(),
            sort: SortState::default(),
        };
        query.sort.toggle(SortKey::Quantity);
        // Dove(10), dove(5); Pantene has no 'o'
        assert_eq!(ids(&query.apply(&catalog())), vec![5, 1]);
    }
}

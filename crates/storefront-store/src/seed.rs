//! # Sample Data
//!
//! The demo catalog, coupon and accounts a fresh storefront starts with.
//!
//! ## Accounts
//! | username | password | role     |
//! |----------|----------|----------|
//! | admin    | admin    | Admin    |
//! | John     | john     | Customer |
//! | Mark     | mark     | Customer |
//!
//! ## Catalog
//! Item id 3 is intentionally absent; new items continue from 6.

use storefront_core::{Coupon, Item, ItemId, Role, User};

/// Sample items, in catalog order.
pub fn sample_items() -> Vec<Item> {
    [
        (1, "Dove", "Conditioner", 2500, 10, true),
        (2, "Pantene", "Conditioner", 3000, 10, true),
        (4, "Lux", "Soap", 1500, 10, false),
        (5, "Dove", "Soap", 3000, 5, true),
    ]
    .into_iter()
    .map(
        |(id, name, category, price_cents, quantity, discount_applicable)| Item {
            id: ItemId(id),
            name: name.to_string(),
            category: category.to_string(),
            price_cents,
            quantity,
            discount_applicable,
        },
    )
    .collect()
}

pub fn sample_coupons() -> Vec<Coupon> {
    vec![Coupon {
        code: "PROMO10".to_string(),
        discount_percent: 10,
        remaining_uses: 10,
    }]
}

pub fn sample_users() -> Vec<User> {
    [
        (100, "admin", "admin", Role::Admin),
        (101, "John", "john", Role::Customer),
        (102, "Mark", "mark", Role::Customer),
    ]
    .into_iter()
    .map(|(id, username, password, role)| User {
        id,
        username: username.to_string(),
        password: password.to_string(),
        role,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_item_ids_unique() {
        let items = sample_items();
        let ids: HashSet<_> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn test_one_admin() {
        let admins = sample_users()
            .into_iter()
            .filter(|u| u.role == Role::Admin)
            .count();
        assert_eq!(admins, 1);
    }
}

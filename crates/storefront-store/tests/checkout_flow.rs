//! End-to-end shopping and admin flows through the public store API.

use chrono::{Duration, Utc};

use storefront_core::catalog_view::{CatalogQuery, SortKey};
use storefront_core::validation::ItemDraft;
use storefront_core::{CoreError, Coupon, Item, ItemId, Money, Role};
use storefront_store::Storefront;

fn single_item_store(price_cents: i64, quantity: u32, discount_applicable: bool) -> Storefront {
    let store = Storefront::new();
    store
        .catalog()
        .insert(Item {
            id: ItemId(1),
            name: "Pantene".to_string(),
            category: "Conditioner".to_string(),
            price_cents,
            quantity,
            discount_applicable,
        })
        .unwrap();
    store
}

#[test]
fn quantity_never_goes_negative() {
    let store = single_item_store(1500, 0, false);
    let mut cart = store.cart_engine();

    assert!(matches!(
        cart.add_to_cart(ItemId(1)),
        Err(CoreError::OutOfStock { .. })
    ));
    assert_eq!(store.catalog().get(ItemId(1)).unwrap().quantity, 0);
    assert!(cart.is_empty());
}

#[test]
fn add_then_remove_restores_quantity() {
    let store = Storefront::seeded().unwrap();
    let before = store.catalog().get(ItemId(4)).unwrap().quantity;

    let mut cart = store.cart_engine();
    cart.add_to_cart(ItemId(4)).unwrap();
    assert_eq!(store.catalog().get(ItemId(4)).unwrap().quantity, before - 1);

    cart.remove_from_cart(0).unwrap();
    assert_eq!(store.catalog().get(ItemId(4)).unwrap().quantity, before);
}

#[test]
fn checkout_empties_cart_and_second_checkout_fails() {
    let store = Storefront::seeded().unwrap();
    let mut cart = store.cart_engine();
    cart.add_to_cart(ItemId(2)).unwrap();

    cart.checkout("John").unwrap();
    assert!(cart.is_empty());
    assert!(cart.total().is_zero());
    assert_eq!(cart.checkout("John").unwrap_err(), CoreError::EmptyCart);
}

#[test]
fn single_use_coupon() {
    let store = single_item_store(1000, 5, false);
    store.coupons().insert(Coupon {
        code: "ONCE".to_string(),
        discount_percent: 10,
        remaining_uses: 1,
    })
    .unwrap();
    let mut cart = store.cart_engine();
    cart.add_to_cart(ItemId(1)).unwrap();

    cart.apply_coupon("ONCE").unwrap();
    assert!(matches!(
        cart.apply_coupon("ONCE"),
        Err(CoreError::InvalidCoupon(_))
    ));
    assert_eq!(cart.total().cents(), 900);
}

#[test]
fn discounted_last_unit() {
    let store = single_item_store(3000, 1, true);
    let mut cart = store.cart_engine();

    let line = cart.add_to_cart(ItemId(1)).unwrap();
    assert_eq!(line.final_price().to_decimal_string(), "27.00");
    assert_eq!(store.catalog().get(ItemId(1)).unwrap().quantity, 0);

    assert!(matches!(
        cart.add_to_cart(ItemId(1)),
        Err(CoreError::OutOfStock { .. })
    ));
}

#[test]
fn coupon_on_hundred_dollar_cart() {
    let store = single_item_store(10000, 1, false);
    store.coupons().insert(Coupon {
        code: "PROMO10".to_string(),
        discount_percent: 10,
        remaining_uses: 2,
    })
    .unwrap();
    let mut cart = store.cart_engine();
    cart.add_to_cart(ItemId(1)).unwrap();

    let redeemed = cart.apply_coupon("PROMO10").unwrap();
    assert_eq!(cart.total(), Money::from_cents(9000));
    assert_eq!(redeemed.remaining_uses, 1);

    // Second application compounds on the discounted total.
    cart.apply_coupon("PROMO10").unwrap();
    assert_eq!(cart.total(), Money::from_cents(8100));
}

#[test]
fn checkout_two_lines_records_order() {
    let store = Storefront::seeded().unwrap();
    let before = store.orders().len();
    let mut cart = store.cart_engine();
    cart.add_to_cart(ItemId(1)).unwrap(); // 22.50
    cart.add_to_cart(ItemId(4)).unwrap(); // 15.00

    let started = Utc::now();
    let order = cart.checkout("John").unwrap();

    assert_eq!(store.orders().len(), before + 1);
    assert_eq!(order.customer, "John");
    assert_eq!(order.lines.len(), 2);
    assert_eq!(order.total_cost, "37.50");
    assert!(order.placed_at >= started);
    assert_eq!(store.orders().orders_for("John"), vec![order]);
}

#[test]
fn price_sort_keeps_catalog_order_for_ties() {
    let store = Storefront::seeded().unwrap();
    let mut query = CatalogQuery::default();
    query.sort.toggle(SortKey::Price);

    let ids: Vec<u64> = store.catalog().query(&query).iter().map(|i| i.id.0).collect();
    // Pantene (2) and Dove Soap (5) are both 30.00
    assert_eq!(ids, vec![4, 1, 2, 5]);
}

#[test]
fn deleted_item_in_cart_still_checks_out() {
    let store = Storefront::seeded().unwrap();
    let mut cart = store.cart_engine();
    cart.add_to_cart(ItemId(5)).unwrap();

    store.catalog().remove_item(ItemId(5)).unwrap();

    let order = cart.checkout("Mark").unwrap();
    assert_eq!(order.lines[0].name, "Dove");
    assert_eq!(order.total_cost, "27.00");
}

#[test]
fn admin_adds_item_and_customer_buys_it() {
    let store = Storefront::seeded().unwrap();
    let admin = store.users().authenticate("admin", "admin").unwrap();
    assert_eq!(admin.role, Role::Admin);

    let draft = ItemDraft {
        name: "Sunsilk".to_string(),
        category: None,
        price: "12.5".to_string(),
        quantity: "2".to_string(),
        discount_applicable: false,
    };
    let item = store.catalog().add_item(draft.validate().unwrap());
    assert_eq!(item.id, ItemId(6));
    assert_eq!(item.category, "General");

    let customer = store.users().authenticate("Mark", "mark").unwrap();
    let mut cart = store.cart_engine();
    cart.add_to_cart(item.id).unwrap();
    cart.add_to_cart(item.id).unwrap();
    let order = cart.checkout(&customer.username).unwrap();
    assert_eq!(order.total_cost, "25.00");

    let report = store.sales_report(Duration::hours(24), 5, Utc::now());
    assert_eq!(report.top_sellers[0].name, "Sunsilk");
    assert_eq!(report.out_of_stock, vec!["Sunsilk".to_string()]);
}

#[test]
fn sessions_share_stock() {
    let store = single_item_store(1000, 1, false);
    let mut john = store.cart_engine();
    let mut mark = store.cart_engine();

    john.add_to_cart(ItemId(1)).unwrap();
    assert!(matches!(
        mark.add_to_cart(ItemId(1)),
        Err(CoreError::OutOfStock { .. })
    ));

    john.abandon();
    mark.add_to_cart(ItemId(1)).unwrap();
}

#[test]
fn recorded_order_serializes_for_the_frontend() {
    let store = Storefront::seeded().unwrap();
    let mut cart = store.cart_engine();
    cart.add_to_cart(ItemId(2)).unwrap();
    cart.apply_coupon("PROMO10").unwrap();
    let order = cart.checkout("John").unwrap();

    let json = serde_json::to_value(&order).unwrap();
    assert_eq!(json["customer"], "John");
    assert_eq!(json["totalCost"], "24.30");
    assert_eq!(json["discountCents"], 270);
    assert_eq!(json["lines"][0]["finalPriceCents"], 2700);

    let back: storefront_core::Order = serde_json::from_value(json).unwrap();
    assert_eq!(back, store.orders().list()[0]);
}

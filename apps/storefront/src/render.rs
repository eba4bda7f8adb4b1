//! # Table Rendering
//!
//! Turns command results into terminal tables.

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

use storefront_core::reporting::SalesReport;
use storefront_core::{Coupon, Item, Order};

use crate::commands::shop::CartResponse;
use crate::state::ConfigState;

fn finish(builder: Builder, numeric: std::ops::Range<usize>) -> String {
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(numeric), Alignment::right());
    table.to_string()
}

/// Item table for both consoles.
pub fn items(config: &ConfigState, items: &[Item]) -> String {
    if items.is_empty() {
        return "No items.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Category", "Price", "Qty", "Discount"]);
    for item in items {
        builder.push_record([
            item.id.to_string(),
            item.name.clone(),
            item.category.clone(),
            config.format_currency(item.price_cents),
            if item.in_stock() {
                item.quantity.to_string()
            } else {
                "Out of stock".to_string()
            },
            (if item.discount_applicable { "10%" } else { "" }).to_string(),
        ]);
    }
    finish(builder, 3..5)
}

/// Cart lines plus totals. Positions are 1-based, matching `remove`.
pub fn cart(config: &ConfigState, cart: &CartResponse) -> String {
    if cart.lines.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["#", "Item", "Price", "You Pay"]);
    for (position, line) in cart.lines.iter().enumerate() {
        builder.push_record([
            (position + 1).to_string(),
            line.name.clone(),
            config.format_currency(line.unit_price_cents),
            config.format_currency(line.final_price_cents),
        ]);
    }

    let mut out = finish(builder, 2..4);
    out.push_str(&format!(
        "\nSubtotal: {}",
        config.format_currency(cart.subtotal_cents)
    ));
    if !cart.redemptions.is_empty() {
        let codes: Vec<String> = cart
            .redemptions
            .iter()
            .map(|r| format!("{} ({})", r.code, r.rate))
            .collect();
        out.push_str(&format!(
            "\nCoupons:  -{}  {}",
            config.format_currency(cart.discount_cents),
            codes.join(", ")
        ));
    }
    out.push_str(&format!("\nTotal:    {}", config.format_currency(cart.total_cents)));
    out
}

pub fn coupons(coupons: &[Coupon]) -> String {
    if coupons.is_empty() {
        return "No coupons.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Code", "Discount", "Uses Left"]);
    for coupon in coupons {
        builder.push_record([
            coupon.code.clone(),
            coupon.rate().to_string(),
            if coupon.is_usable() {
                coupon.remaining_uses.to_string()
            } else {
                "expired".to_string()
            },
        ]);
    }
    finish(builder, 1..3)
}

pub fn orders(config: &ConfigState, orders: &[Order]) -> String {
    if orders.is_empty() {
        return "No orders yet.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Order", "Customer", "Items", "Total", "Placed"]);
    for order in orders {
        builder.push_record([
            order.id.chars().take(8).collect::<String>(),
            order.customer.clone(),
            order.lines.len().to_string(),
            config.format_currency(order.total_cents),
            order.placed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }
    finish(builder, 2..4)
}

pub fn report(config: &ConfigState, report: &SalesReport) -> String {
    let mut out = format!(
        "Sales in the last {}h: {} ({} of {} orders)\n",
        report.window_hours,
        config.format_currency(report.window_sales_cents),
        report.window_order_count,
        report.total_order_count
    );

    if report.top_sellers.is_empty() {
        out.push_str("No sales yet.");
    } else {
        let mut builder = Builder::default();
        builder.push_record(["Rank", "Item", "Units"]);
        for (rank, seller) in report.top_sellers.iter().enumerate() {
            builder.push_record([
                (rank + 1).to_string(),
                seller.name.clone(),
                seller.units.to_string(),
            ]);
        }
        out.push_str(&finish(builder, 2..3));
    }

    if !report.out_of_stock.is_empty() {
        out.push_str(&format!("\nOut of stock: {}", report.out_of_stock.join(", ")));
    }
    out
}

/// Thank-you screen after checkout.
pub fn receipt(config: &ConfigState, order: &Order) -> String {
    let mut out = format!(
        "Order placed successfully!\n\nThank You for Your Order!\n{}\n\n",
        config.store_name
    );

    let mut builder = Builder::default();
    builder.push_record(["Item", "Paid"]);
    for line in &order.lines {
        builder.push_record([line.name.clone(), config.format_currency(line.final_price_cents)]);
    }
    out.push_str(&finish(builder, 1..2));

    if order.discount_cents != 0 {
        out.push_str(&format!(
            "\nCoupons: -{}",
            config.format_currency(order.discount_cents)
        ));
    }
    out.push_str(&format!(
        "\nTotal: {}{}\nOrder {}",
        config.currency_symbol, order.total_cost, order.id
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::ItemId;

    fn item(quantity: u32) -> Item {
        Item {
            id: ItemId(4),
            name: "Lux".to_string(),
            category: "Soap".to_string(),
            price_cents: 1500,
            quantity,
            discount_applicable: false,
        }
    }

    #[test]
    fn test_items_table() {
        let config = ConfigState::default();
        let out = items(&config, &[item(10), item(0)]);
        assert!(out.contains("Lux"));
        assert!(out.contains("$15.00"));
        assert!(out.contains("Out of stock"));
        assert_eq!(items(&config, &[]), "No items.");
    }

    #[test]
    fn test_coupons_table_marks_expired() {
        let out = coupons(&[Coupon {
            code: "PROMO10".to_string(),
            discount_percent: 10,
            remaining_uses: 0,
        }]);
        assert!(out.contains("PROMO10"));
        assert!(out.contains("10%"));
        assert!(out.contains("expired"));
    }
}

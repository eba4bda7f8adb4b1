//! # Admin Commands
//!
//! Inventory console: the item table, add/delete/restock, coupons and the
//! sales report.
//!
//! ## Table State
//! The search text and sort column live in the session, so `items` always
//! shows the table the way the admin last left it.
//!
//! ```text
//! search "do"  ──► query.search = "do"      ──┐
//! sort price   ──► query.sort.toggle(Price) ──┼──► catalog.query(&query)
//! items        ──────────────────────────────-┘
//! ```

use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use storefront_core::catalog_view::SortKey;
use storefront_core::reporting::{sales_window, SalesReport};
use storefront_core::validation::{parse_restock_delta, validate_search_query, ItemDraft};
use storefront_core::{Coupon, Item, ItemId, Order, Role};

use crate::error::ApiError;
use crate::state::{ConfigState, DeleteConfirmation, Session};

/// Item awaiting delete confirmation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePrompt {
    pub item: Item,
    pub prompt: String,
}

/// Current table: filtered and sorted per the session's query.
pub fn list_items(session: &mut Session) -> Result<Vec<Item>, ApiError> {
    let query = session.admin_mut()?.query.clone();
    Ok(session.store().catalog().query(&query))
}

/// Sets the search text and returns the refreshed table.
///
/// An empty query clears the filter.
pub fn search(session: &mut Session, text: &str) -> Result<Vec<Item>, ApiError> {
    debug!(text = %text, "search command");
    let text = validate_search_query(text).map_err(|e| ApiError::validation(e.to_string()))?;
    session.admin_mut()?.query.search = text;
    list_items(session)
}

/// Header click: same column flips direction, new column sorts ascending.
pub fn sort(session: &mut Session, key: SortKey) -> Result<Vec<Item>, ApiError> {
    debug!(?key, "sort command");
    session.admin_mut()?.query.sort.toggle(key);
    list_items(session)
}

/// Validates the form and adds the item.
pub fn add_item(session: &mut Session, draft: ItemDraft) -> Result<Item, ApiError> {
    debug!(name = %draft.name, "add_item command");
    session.require(Role::Admin)?;
    let new_item = draft.validate()?;
    Ok(session.store().catalog().add_item(new_item))
}

/// First step of a delete: remembers the item and asks for confirmation.
pub fn request_delete(session: &mut Session, item_id: u64) -> Result<DeletePrompt, ApiError> {
    debug!(item_id, "request_delete command");
    session.require(Role::Admin)?;
    let item = session
        .store()
        .catalog()
        .get(ItemId(item_id))
        .ok_or_else(|| ApiError::not_found("Item", &item_id.to_string()))?;

    session.admin_mut()?.delete = DeleteConfirmation::Pending(item.id);
    Ok(DeletePrompt {
        prompt: format!(
            "Are you sure you want to delete {} (item {})? Type 'confirm' or 'cancel'.",
            item.name, item.id
        ),
        item,
    })
}

/// Deletes the pending item.
///
/// ## Errors
/// - `VALIDATION_ERROR` if nothing is pending
/// - `NOT_FOUND` if the item vanished in the meantime
pub fn confirm_delete(session: &mut Session) -> Result<Item, ApiError> {
    debug!("confirm_delete command");
    let admin = session.admin_mut()?;
    let pending = std::mem::take(&mut admin.delete);

    let DeleteConfirmation::Pending(item_id) = pending else {
        return Err(ApiError::validation("No delete is waiting for confirmation"));
    };
    session
        .store()
        .catalog()
        .remove_item(item_id)
        .ok_or_else(|| ApiError::not_found("Item", &item_id.to_string()))
}

/// Drops the pending delete. Returns whether one was pending.
pub fn cancel_delete(session: &mut Session) -> Result<bool, ApiError> {
    debug!("cancel_delete command");
    let admin = session.admin_mut()?;
    let was_pending = admin.delete != DeleteConfirmation::Idle;
    admin.delete = DeleteConfirmation::Idle;
    Ok(was_pending)
}

/// Adds stock. `amount` is the raw text from the restock field.
pub fn restock(session: &mut Session, item_id: u64, amount: &str) -> Result<Item, ApiError> {
    debug!(item_id, amount = %amount, "restock command");
    session.require(Role::Admin)?;
    let delta = parse_restock_delta(amount)?;
    Ok(session.store().catalog().restock(ItemId(item_id), delta)?)
}

pub fn list_coupons(session: &mut Session) -> Result<Vec<Coupon>, ApiError> {
    session.require(Role::Admin)?;
    Ok(session.store().coupons().list())
}

pub fn list_orders(session: &mut Session) -> Result<Vec<Order>, ApiError> {
    session.require(Role::Admin)?;
    Ok(session.store().orders().list())
}

/// Sales report. Overrides fall back to the configured window and limit.
pub fn sales_report(
    session: &mut Session,
    config: &ConfigState,
    window_hours: Option<i64>,
    top: Option<usize>,
) -> Result<SalesReport, ApiError> {
    session.require(Role::Admin)?;

    let window = sales_window(window_hours.unwrap_or(config.sales_window_hours))?;
    let top = top.unwrap_or(config.top_selling_limit);

    Ok(session.store().sales_report(window, top, Utc::now()))
}

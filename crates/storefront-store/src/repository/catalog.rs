//! # Catalog Repository
//!
//! The authoritative item list and its stock counts.
//!
//! ## Stock Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Who Touches `quantity`                              │
//! │                                                                         │
//! │  Admin restock (+n) ───────────────┐                                   │
//! │                                     ▼                                   │
//! │  Customer adds line ──► decrement_on_sale ──► quantity - 1              │
//! │                                     ▲            (fails at 0)           │
//! │  Customer removes line ─► increment_on_return ─► quantity + 1           │
//! │                                                                         │
//! │  Checkout does NOT touch stock: it was reserved line by line.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every check-and-change happens under one lock acquisition, so two
//! sessions racing for the last unit cannot both get it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use storefront_core::catalog_view::CatalogQuery;
use storefront_core::validation::NewItem;
use storefront_core::{CoreError, CoreResult, Item, ItemId, ValidationError};

#[derive(Debug, Default)]
struct CatalogInner {
    items: Vec<Item>,
    /// Highest id ever issued. Deleted ids are never handed out again.
    last_id: u64,
}

impl CatalogInner {
    fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn item_mut(&mut self, id: ItemId) -> CoreResult<&mut Item> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(CoreError::ItemNotFound(id))
    }
}

/// Repository for catalog items.
///
/// Cloning is cheap and every clone sees the same catalog.
///
/// ## Usage
/// ```rust
/// use storefront_store::CatalogRepository;
/// use storefront_core::validation::ItemDraft;
///
/// let catalog = CatalogRepository::new();
/// let draft = ItemDraft {
///     name: "Lux".to_string(),
///     category: Some("Soap".to_string()),
///     price: "15".to_string(),
///     quantity: "10".to_string(),
///     discount_applicable: false,
/// };
/// let item = catalog.add_item(draft.validate().unwrap());
///
/// let after = catalog.decrement_on_sale(item.id).unwrap();
/// assert_eq!(after.quantity, 9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogRepository {
    inner: Arc<Mutex<CatalogInner>>,
}

impl CatalogRepository {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CatalogInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts an item with a fixed id (used by seeding).
    ///
    /// ## Errors
    /// `Duplicate` if the id is already present.
    pub fn insert(&self, item: Item) -> CoreResult<()> {
        let mut inner = self.lock();
        if inner.position(item.id).is_some() {
            return Err(ValidationError::Duplicate {
                field: "item id".to_string(),
                value: item.id.to_string(),
            }
            .into());
        }
        inner.last_id = inner.last_id.max(item.id.0);
        inner.items.push(item);
        Ok(())
    }

    /// Adds a validated item and assigns it the next free id.
    pub fn add_item(&self, new_item: NewItem) -> Item {
        let mut inner = self.lock();
        inner.last_id += 1;

        let item = Item {
            id: ItemId(inner.last_id),
            name: new_item.name,
            category: new_item.category,
            price_cents: new_item.price.cents(),
            quantity: new_item.quantity,
            discount_applicable: new_item.discount_applicable,
        };
        inner.items.push(item.clone());

        info!(item_id = %item.id, name = %item.name, quantity = item.quantity, "Item added");
        item
    }

    /// Adds `delta` units of stock.
    ///
    /// ## Errors
    /// - `MustBePositive` when `delta <= 0`
    /// - `ItemNotFound` when the id is unknown
    /// - `OutOfRange` if the new count would overflow
    pub fn restock(&self, id: ItemId, delta: i64) -> CoreResult<Item> {
        if delta <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "restock quantity".to_string(),
            }
            .into());
        }

        let mut inner = self.lock();
        let item = inner.item_mut(id)?;

        let new_quantity = u32::try_from(delta)
            .ok()
            .and_then(|delta| item.quantity.checked_add(delta))
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 0,
                max: i64::from(u32::MAX),
            })?;
        item.quantity = new_quantity;

        info!(item_id = %id, delta, quantity = new_quantity, "Item restocked");
        Ok(item.clone())
    }

    /// Deletes an item. Returns `None` if it was not present.
    ///
    /// Cart lines already holding this item keep their snapshot.
    pub fn remove_item(&self, id: ItemId) -> Option<Item> {
        let mut inner = self.lock();
        let index = inner.position(id)?;
        let item = inner.items.remove(index);
        info!(item_id = %id, name = %item.name, "Item deleted");
        Some(item)
    }

    /// Takes one unit of stock for a cart line.
    ///
    /// Returns the item as it is after the decrement.
    ///
    /// ## Errors
    /// - `ItemNotFound` when the id is unknown
    /// - `OutOfStock` when `quantity == 0`; nothing changes
    pub fn decrement_on_sale(&self, id: ItemId) -> CoreResult<Item> {
        let mut inner = self.lock();
        let item = inner.item_mut(id)?;

        if !item.in_stock() {
            warn!(item_id = %id, name = %item.name, "Out of stock");
            return Err(CoreError::OutOfStock {
                item_id: id,
                name: item.name.clone(),
            });
        }

        item.quantity -= 1;
        debug!(item_id = %id, quantity = item.quantity, "Unit reserved");
        Ok(item.clone())
    }

    /// Puts one unit back after a cart line is removed.
    ///
    /// ## Errors
    /// `ItemNotFound` if the item was deleted while the line was in a cart.
    pub fn increment_on_return(&self, id: ItemId) -> CoreResult<Item> {
        let mut inner = self.lock();
        let item = inner.item_mut(id)?;
        item.quantity = item.quantity.saturating_add(1);
        debug!(item_id = %id, quantity = item.quantity, "Unit released");
        Ok(item.clone())
    }

    pub fn get(&self, id: ItemId) -> Option<Item> {
        let inner = self.lock();
        inner.items.iter().find(|item| item.id == id).cloned()
    }

    /// All items in insertion order.
    pub fn list(&self) -> Vec<Item> {
        self.lock().items.clone()
    }

    /// Items filtered and sorted for the admin table.
    pub fn query(&self, query: &CatalogQuery) -> Vec<Item> {
        let inner = self.lock();
        query.apply(&inner.items)
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

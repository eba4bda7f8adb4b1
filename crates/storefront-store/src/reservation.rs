//! # Inventory Reservation
//!
//! Ties cart lines to catalog stock: one line holds exactly one unit.
//!
//! ```text
//! add line    ──► reserve(id)  ──► catalog.decrement_on_sale
//! remove line ──► release(id)  ──► catalog.increment_on_return
//! checkout    ──► (nothing: units were already taken)
//! ```

use tracing::warn;

use storefront_core::{CoreResult, Item, ItemId};

use crate::repository::catalog::CatalogRepository;

/// Reserves and releases single units against the catalog.
#[derive(Debug, Clone)]
pub struct InventoryReservation {
    catalog: CatalogRepository,
}

impl InventoryReservation {
    pub fn new(catalog: CatalogRepository) -> Self {
        InventoryReservation { catalog }
    }

    /// Takes one unit. Returns the item after the decrement.
    ///
    /// ## Errors
    /// `ItemNotFound` or `OutOfStock`; stock is unchanged either way.
    pub fn reserve(&self, id: ItemId) -> CoreResult<Item> {
        self.catalog.decrement_on_sale(id)
    }

    /// Gives one unit back.
    ///
    /// Returns `false` when the item has since been deleted and there is
    /// nothing to return the unit to.
    pub fn release(&self, id: ItemId) -> bool {
        match self.catalog.increment_on_return(id) {
            Ok(_) => true,
            Err(err) => {
                warn!(item_id = %id, error = %err, "Could not return unit to stock");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::validation::NewItem;
    use storefront_core::{CoreError, Money};

    fn setup(quantity: u32) -> (CatalogRepository, InventoryReservation, ItemId) {
        let catalog = CatalogRepository::new();
        let item = catalog.add_item(NewItem {
            name: "Dove".to_string(),
            category: "Soap".to_string(),
            price: Money::from_cents(3000),
            quantity,
            discount_applicable: true,
        });
        let reservation = InventoryReservation::new(catalog.clone());
        (catalog, reservation, item.id)
    }

    #[test]
    fn test_reserve_then_release() {
        let (catalog, reservation, id) = setup(1);

        reservation.reserve(id).unwrap();
        assert_eq!(catalog.get(id).unwrap().quantity, 0);
        assert!(matches!(reservation.reserve(id), Err(CoreError::OutOfStock { .. })));

        assert!(reservation.release(id));
        assert_eq!(catalog.get(id).unwrap().quantity, 1);
    }

    #[test]
    fn test_release_after_delete() {
        let (catalog, reservation, id) = setup(1);
        reservation.reserve(id).unwrap();
        catalog.remove_item(id);
        assert!(!reservation.release(id));
    }
}

use std::collections::HashMap;

use minimart_core::{ItemId, StoreError, StoreResult};

use crate::item::Item;

/// Items every store starts with, in listing order.
pub const SEED_ITEMS: [(&str, &str, i64); 5] = [
    ("12345", "Apple", 100),
    ("67890", "Grapes", 75),
    ("35653", "Chicken Breast", 25),
    ("74523", "Bread", 32),
    ("59272", "Cheese", 15),
];

/// Ordered item store.
///
/// Listing order is insertion order; `index` maps ids to positions in `items`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    index: HashMap<ItemId, usize>,
}

impl Catalog {
    /// The fixed seed catalog.
    pub fn seeded() -> Self {
        Self::with_items(
            SEED_ITEMS
                .iter()
                .map(|(id, name, quantity)| Item::new(*id, *name, *quantity)),
        )
    }

    /// Build from arbitrary items. A repeated id keeps its first position and
    /// takes the last value.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut catalog = Self::default();
        for item in items {
            let existing = catalog.index.get(&item.id).copied();
            match existing {
                Some(pos) => catalog.items[pos] = item,
                None => {
                    catalog.index.insert(item.id.clone(), catalog.items.len());
                    catalog.items.push(item);
                }
            }
        }
        catalog
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.index.get(id).and_then(|&pos| self.items.get(pos))
    }

    /// Snapshot of all items in listing order.
    pub fn list(&self) -> Vec<Item> {
        self.items.clone()
    }

    /// Check that every `(id, quantity)` decrement, applied in order, would
    /// succeed. Nothing is modified.
    pub fn check_decrements<'a>(
        &self,
        lines: impl IntoIterator<Item = (&'a ItemId, i64)>,
    ) -> StoreResult<()> {
        let mut projected: HashMap<&ItemId, i64> = HashMap::new();
        for (id, quantity) in lines {
            let current = match projected.get(id) {
                Some(&q) => q,
                None => self
                    .get(id)
                    .map(|item| item.quantity)
                    .ok_or_else(|| StoreError::unknown_item(id.clone()))?,
            };
            let next = current
                .checked_sub(quantity)
                .ok_or_else(|| StoreError::QuantityOverflow(id.clone()))?;
            projected.insert(id, next);
        }
        Ok(())
    }

    /// Subtract `quantity` from the item's stock. There is no lower bound;
    /// only arithmetic overflow is rejected, leaving the stock unchanged.
    pub fn decrement(&mut self, id: &ItemId, quantity: i64) -> StoreResult<()> {
        let item = self
            .index
            .get(id)
            .and_then(|&pos| self.items.get_mut(pos))
            .ok_or_else(|| StoreError::unknown_item(id.clone()))?;

        item.quantity = item
            .quantity
            .checked_sub(quantity)
            .ok_or_else(|| StoreError::QuantityOverflow(id.clone()))?;
        if item.quantity < 0 {
            tracing::debug!(item_id = %id, quantity = item.quantity, "stock went negative");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn id(s: &str) -> ItemId {
        ItemId::from(s)
    }

    #[test]
    fn seeded_catalog_lists_five_items_in_seed_order() {
        let listed = Catalog::seeded().list();
        let summary: Vec<(&str, &str, i64)> = listed
            .iter()
            .map(|i| (i.id.as_str(), i.name.as_str(), i.quantity))
            .collect();
        assert_eq!(summary, SEED_ITEMS.to_vec());
    }

    #[test]
    fn decrement_reduces_quantity() {
        let mut catalog = Catalog::seeded();
        catalog.decrement(&id("12345"), 10).unwrap();
        assert_eq!(catalog.get(&id("12345")).unwrap().quantity, 90);
    }

    #[test]
    fn decrement_can_go_negative() {
        let mut catalog = Catalog::seeded();
        catalog.decrement(&id("59272"), 20).unwrap();
        assert_eq!(catalog.get(&id("59272")).unwrap().quantity, -5);
    }

    #[test]
    fn decrement_unknown_item_fails_without_side_effects() {
        let mut catalog = Catalog::seeded();
        let before = catalog.list();

        let err = catalog.decrement(&id("00000"), 1).unwrap_err();
        assert_eq!(err, StoreError::UnknownItem(id("00000")));
        assert_eq!(catalog.list(), before);
    }

    #[test]
    fn overflowing_decrement_is_rejected_and_keeps_stock() {
        let mut catalog = Catalog::seeded();

        let err = catalog.decrement(&id("12345"), i64::MIN).unwrap_err();
        assert_eq!(err, StoreError::QuantityOverflow(id("12345")));
        assert_eq!(catalog.get(&id("12345")).unwrap().quantity, 100);
    }

    #[test]
    fn check_decrements_accumulates_repeated_lines() {
        let catalog = Catalog::with_items([Item::new("low", "Low", i64::MIN + 10)]);
        let low = id("low");

        assert_eq!(catalog.check_decrements([(&low, 6), (&low, 4)]), Ok(()));
        assert_eq!(
            catalog.check_decrements([(&low, 6), (&low, 5)]),
            Err(StoreError::QuantityOverflow(id("low")))
        );
        assert_eq!(
            catalog.check_decrements([(&id("nope"), 1)]),
            Err(StoreError::UnknownItem(id("nope")))
        );
        assert_eq!(catalog.get(&low).unwrap().quantity, i64::MIN + 10);
    }

    #[test]
    fn repeated_ids_keep_first_position() {
        let catalog = Catalog::with_items([
            Item::new("a", "A", 1),
            Item::new("b", "B", 2),
            Item::new("a", "A2", 3),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.list()[0], Item::new("a", "A2", 3));
    }

    #[test]
    fn items_serialize_with_string_ids() {
        let json = serde_json::to_value(Catalog::seeded().list()).unwrap();
        assert_eq!(
            json[0],
            serde_json::json!({ "id": "12345", "name": "Apple", "quantity": 100 })
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: final quantity equals seed quantity minus the sum of
        /// all decrements, whatever their sign or size.
        #[test]
        fn decrements_are_plain_subtraction(
            amounts in prop::collection::vec(-1_000i64..1_000i64, 0..20)
        ) {
            let mut catalog = Catalog::seeded();
            let grapes = id("67890");
            for amount in &amounts {
                catalog.decrement(&grapes, *amount).unwrap();
            }
            let expected = 75 - amounts.iter().sum::<i64>();
            prop_assert_eq!(catalog.get(&grapes).unwrap().quantity, expected);
        }
    }
}

use serde::Serialize;

use minimart_core::ItemId;

/// A catalog entry.
///
/// `quantity` is signed: purchases are not floored at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub quantity: i64,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, quantity: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
        }
    }
}

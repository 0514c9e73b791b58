use serde::Deserialize;

use minimart_auth::{Purchase, UserDirectory};
use minimart_core::{IdGenerator, ItemId, PurchaseId, StoreError, StoreResult, Token};
use minimart_inventory::Catalog;

/// One requested line: which item and how many.
///
/// Quantities are 32-bit on the wire; larger values are rejected at
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderLine {
    pub id: ItemId,
    pub quantity: i32,
}

/// Checkout request.
///
/// The client-supplied `id` is accepted for compatibility but not stored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Order {
    #[serde(deserialize_with = "minimart_core::string_or_integer")]
    pub id: String,
    #[serde(default)]
    pub items: Option<Vec<OrderLine>>,
}

impl Order {
    pub fn new(id: impl Into<String>, items: Vec<OrderLine>) -> Self {
        Self {
            id: id.into(),
            items: Some(items),
        }
    }

    /// Requested lines in input order; a missing list is empty.
    pub fn lines(&self) -> &[OrderLine] {
        self.items.as_deref().unwrap_or_default()
    }
}

/// Decrement stock for every line and record a purchase on the token's user.
///
/// Every item id, every resulting stock level, and the token are checked
/// before anything is mutated, so a failed checkout changes neither the
/// catalog nor the user. Item errors are reported ahead of an unknown token.
pub fn checkout(
    users: &mut UserDirectory,
    catalog: &mut Catalog,
    ids: &dyn IdGenerator,
    token: &Token,
    order: &Order,
) -> StoreResult<Purchase> {
    let lines = order.lines();

    if let Some(missing) = lines.iter().find(|line| !catalog.contains(&line.id)) {
        return Err(StoreError::unknown_item(missing.id.clone()));
    }
    catalog.check_decrements(
        lines
            .iter()
            .map(|line| (&line.id, i64::from(line.quantity))),
    )?;
    let user = users.find_by_token_mut(token).ok_or(StoreError::UnknownToken)?;

    let mut bought = Vec::with_capacity(lines.len());
    for line in lines {
        catalog.decrement(&line.id, i64::from(line.quantity))?;
        bought.push(line.id.clone());
    }

    let purchase = Purchase::new(PurchaseId::new(ids.next_id()), bought);
    user.record_purchase(purchase.clone());

    tracing::debug!(
        order_id = %order.id,
        purchase_id = %purchase.id(),
        username = user.username(),
        lines = lines.len(),
        "checkout recorded"
    );

    Ok(purchase)
}

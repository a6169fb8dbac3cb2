//! # Cart store
//!
//! Owned state container for the shopping cart. Components that show cart
//! data (the header badge, the cart page) hold a reference to one
//! [`CartStore`] and listen on [`CartStore::subscribe`] instead of reading a
//! shared global.
//!
//! The cart identifier survives page loads through a [`CartStorage`]
//! collaborator; the store mints one the first time it is asked.

use crate::model::{Money, MoneyError, ProductId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

/// Event channel capacity. Slow subscribers skip to the latest state.
const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartId(pub String);

impl CartId {
    fn mint() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for CartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the cart identifier lives between sessions.
pub trait CartStorage: Send + Sync {
    fn load_cart_id(&self) -> Option<CartId>;
    fn save_cart_id(&self, id: &CartId);
    fn clear_cart_id(&self);
}

#[derive(Debug, Default)]
pub struct MemoryCartStorage {
    id: Mutex<Option<CartId>>,
}

impl MemoryCartStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryCartStorage {
    fn load_cart_id(&self) -> Option<CartId> {
        self.id.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    fn save_cart_id(&self, id: &CartId) {
        *self.id.lock().unwrap_or_else(|p| p.into_inner()) = Some(id.clone());
    }

    fn clear_cart_id(&self) {
        *self.id.lock().unwrap_or_else(|p| p.into_inner()) = None;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
        quantity: u32,
    ) -> Self {
        Self {
            product_id,
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    pub fn line_total(&self) -> Result<Money, MoneyError> {
        self.unit_price.checked_mul(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEvent {
    Changed { item_count: u32, subtotal: Money },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    #[error("{0} is not in the cart")]
    NotInCart(ProductId),

    #[error("cart total out of range: {0}")]
    Money(#[from] MoneyError),
}

fn summarize(lines: &BTreeMap<ProductId, CartLine>) -> Result<(u32, Money), CartError> {
    let mut count: u32 = 0;
    let mut subtotal = Money::ZERO;
    for line in lines.values() {
        count = count.checked_add(line.quantity).ok_or(MoneyError::Overflow)?;
        subtotal = subtotal.checked_add(line.line_total()?)?;
    }
    Ok((count, subtotal))
}

pub struct CartStore {
    storage: Arc<dyn CartStorage>,
    lines: Mutex<BTreeMap<ProductId, CartLine>>,
    event_tx: broadcast::Sender<CartEvent>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &*self.lock())
            .field("event_tx", &"<broadcast::Sender>")
            .finish()
    }
}

impl CartStore {
    pub fn new(storage: Arc<dyn CartStorage>) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            storage,
            lines: Mutex::new(BTreeMap::new()),
            event_tx,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.event_tx.subscribe()
    }

    /// The stored cart identifier, minting and saving a new one if absent.
    pub fn cart_id(&self) -> CartId {
        if let Some(id) = self.storage.load_cart_id() {
            return id;
        }
        let id = CartId::mint();
        self.storage.save_cart_id(&id);
        debug!(cart_id = %id, "Minted cart id");
        id
    }

    pub fn lines(&self) -> Vec<CartLine> {
        self.lock().values().cloned().collect()
    }

    /// Badge count: cakes, not distinct lines.
    pub fn item_count(&self) -> u32 {
        self.lock().values().map(|l| l.quantity).sum()
    }

    pub fn subtotal(&self) -> Result<Money, CartError> {
        summarize(&self.lock()).map(|(_, subtotal)| subtotal)
    }

    /// Adds a line, merging quantities with an existing line for the same
    /// product. The newest unit price wins.
    pub fn add(&self, line: CartLine) -> Result<(), CartError> {
        if line.quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        self.mutate(|lines| {
            match lines.get_mut(&line.product_id) {
                Some(existing) => {
                    existing.quantity = existing
                        .quantity
                        .checked_add(line.quantity)
                        .ok_or(MoneyError::Overflow)?;
                    existing.unit_price = line.unit_price;
                }
                None => {
                    lines.insert(line.product_id, line);
                }
            }
            Ok(())
        })
    }

    /// Setting a quantity of zero removes the line.
    pub fn set_quantity(&self, product_id: ProductId, quantity: u32) -> Result<(), CartError> {
        self.mutate(|lines| {
            if quantity == 0 {
                lines
                    .remove(&product_id)
                    .ok_or(CartError::NotInCart(product_id))?;
                return Ok(());
            }
            let line = lines
                .get_mut(&product_id)
                .ok_or(CartError::NotInCart(product_id))?;
            line.quantity = quantity;
            Ok(())
        })
    }

    pub fn remove(&self, product_id: ProductId) -> Result<CartLine, CartError> {
        let mut removed = None;
        self.mutate(|lines| {
            removed = lines.remove(&product_id);
            removed
                .as_ref()
                .map(|_| ())
                .ok_or(CartError::NotInCart(product_id))
        })?;
        removed.ok_or(CartError::NotInCart(product_id))
    }

    /// Empties the cart and forgets its identifier, e.g. after checkout.
    pub fn clear(&self) {
        let _ = self.mutate(|lines| {
            lines.clear();
            Ok(())
        });
        self.storage.clear_cart_id();
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<ProductId, CartLine>> {
        self.lines.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Applies `f` to a copy of the lines and commits only if it succeeds and
    /// the result still has a representable subtotal. Subscribers hear about
    /// every committed change.
    fn mutate<F>(&self, f: F) -> Result<(), CartError>
    where
        F: FnOnce(&mut BTreeMap<ProductId, CartLine>) -> Result<(), CartError>,
    {
        let event = {
            let mut guard = self.lock();
            let mut next = guard.clone();
            f(&mut next)?;
            let (item_count, subtotal) = summarize(&next)?;
            *guard = next;
            CartEvent::Changed {
                item_count,
                subtotal,
            }
        };
        debug!(?event, "Cart changed");
        // No receivers is fine; the badge may not be mounted yet.
        let _ = self.event_tx.send(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CartStore {
        CartStore::new(Arc::new(MemoryCartStorage::new()))
    }

    fn cake(id: u32, cents: i64, quantity: u32) -> CartLine {
        CartLine::new(ProductId(id), format!("Cake {id}"), Money::from_cents(cents), quantity)
    }

    #[test]
    fn test_add_notifies_subscribers() {
        let store = store();
        let mut rx = store.subscribe();

        store.add(cake(1, 3_800, 2)).unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            CartEvent::Changed {
                item_count: 2,
                subtotal: Money::from_cents(7_600)
            }
        );
    }

    #[test]
    fn test_add_merges_same_product() {
        let store = store();
        store.add(cake(1, 3_800, 1)).unwrap();
        store.add(cake(1, 3_800, 2)).unwrap();
        store.add(cake(2, 4_500, 1)).unwrap();

        assert_eq!(store.lines().len(), 2);
        assert_eq!(store.item_count(), 4);
        assert_eq!(store.subtotal().unwrap(), Money::from_cents(3 * 3_800 + 4_500));
    }

    #[test]
    fn test_failed_change_is_not_broadcast() {
        let store = store();
        let mut rx = store.subscribe();

        assert_eq!(
            store.set_quantity(ProductId(9), 3),
            Err(CartError::NotInCart(ProductId(9)))
        );
        assert_eq!(store.add(cake(1, 100, 0)), Err(CartError::ZeroQuantity));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_zero_quantity_removes_line() {
        let store = store();
        store.add(cake(1, 3_800, 2)).unwrap();
        store.set_quantity(ProductId(1), 0).unwrap();
        assert!(store.lines().is_empty());
    }

    #[test]
    fn test_cart_id_minted_once() {
        let storage = Arc::new(MemoryCartStorage::new());
        let store = CartStore::new(storage.clone());

        let id = store.cart_id();
        assert_eq!(store.cart_id(), id);
        assert_eq!(storage.load_cart_id(), Some(id));

        store.clear();
        assert_eq!(storage.load_cart_id(), None);
    }

    #[test]
    fn test_remove_returns_line() {
        let store = store();
        store.add(cake(3, 1_000, 1)).unwrap();
        let line = store.remove(ProductId(3)).unwrap();
        assert_eq!(line.product_id, ProductId(3));
        assert_eq!(store.item_count(), 0);
    }
}

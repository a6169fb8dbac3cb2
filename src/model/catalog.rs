/// A cake the storefront sells for pre-order.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for CakeProduct`](#impl-ActorEntity-for-CakeProduct) for details on:
/// - Creation parameters ([`ProductCreate`])
/// - Update parameters ([`ProductUpdate`])
use super::Money;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for catalog products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CakeProduct {
    pub id: ProductId,
    pub name: String,
    /// Price of one cake with the classic crust.
    pub base_price: Money,
    /// Inactive products stay listed for history but cannot be ordered.
    pub active: bool,
}

impl CakeProduct {
    pub fn new(id: ProductId, name: impl Into<String>, base_price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            base_price,
            active: true,
        }
    }
}

/// Payload for adding a product to the catalog.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub base_price: Money,
}

/// Payload for changing price or availability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub base_price: Option<Money>,
    pub active: Option<bool>,
}

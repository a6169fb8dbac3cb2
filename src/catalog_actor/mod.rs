//! # Catalog Actor
//!
//! Holds the cakes on sale. It has no dependencies and no custom actions; the
//! storefront reads it for base prices and the order actor reads it to
//! re-price submitted orders.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`CakeProduct`]
//! - [`error`] - [`CatalogError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, client) = catalog_actor::new(32);
//! tokio::spawn(actor.run(()));
//!
//! let id = client
//!     .create_product(ProductCreate {
//!         name: "Açaí Celebration Cake".to_string(),
//!         base_price: Money::from_cents(3_800),
//!     })
//!     .await?;
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CatalogClient;
use crate::framework::ResourceActor;
use crate::model::CakeProduct;

/// Creates a new catalog actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<CakeProduct>, CatalogClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, CatalogClient::new(generic_client))
}

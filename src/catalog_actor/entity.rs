//! [`ActorEntity`] implementation for [`CakeProduct`].

use super::CatalogError;
use crate::framework::ActorEntity;
use crate::model::{CakeProduct, Money, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;

fn check_price(price: Money) -> Result<(), CatalogError> {
    if price <= Money::ZERO {
        return Err(CatalogError::InvalidProduct(format!(
            "base price must be positive, got {price}"
        )));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for CakeProduct {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = CatalogError;

    fn assign_id(seq: u32, _params: &ProductCreate) -> ProductId {
        ProductId(seq)
    }

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, CatalogError> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(CatalogError::InvalidProduct("name is required".to_string()));
        }
        check_price(params.base_price)?;
        Ok(Self::new(id, name, params.base_price))
    }

    /// # Fields Updated
    /// - `base_price`: must stay positive
    /// - `active`: inactive products can no longer be ordered
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), CatalogError> {
        if let Some(price) = update.base_price {
            check_price(price)?;
            self.base_price = price;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), CatalogError> {
        Ok(())
    }
}

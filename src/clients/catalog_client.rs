//! # Catalog Client
//!
//! High-level API for the catalog actor.
use crate::catalog_actor::CatalogError;
use crate::clients::actor_client::{recover, ActorClient};
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{CakeProduct, Money, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<CakeProduct>,
}

impl CatalogClient {
    pub fn new(inner: ResourceClient<CakeProduct>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, CatalogError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Products that can currently be ordered.
    #[instrument(skip(self))]
    pub async fn active_products(&self) -> Result<Vec<CakeProduct>, CatalogError> {
        let products = self.list().await?;
        Ok(products.into_iter().filter(|p| p.active).collect())
    }

    /// Like `get`, but a missing product is an error.
    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<CakeProduct, CatalogError> {
        self.get(id).await?.ok_or(CatalogError::NotFound(id))
    }

    async fn update(&self, id: ProductId, update: ProductUpdate) -> Result<CakeProduct, CatalogError> {
        self.inner.update(id, update).await.map_err(|e| match e {
            FrameworkError::NotFound(_) => CatalogError::NotFound(id),
            e => Self::map_error(e),
        })
    }

    #[instrument(skip(self))]
    pub async fn set_price(&self, id: ProductId, price: Money) -> Result<CakeProduct, CatalogError> {
        let update = ProductUpdate {
            base_price: Some(price),
            ..Default::default()
        };
        self.update(id, update).await
    }

    #[instrument(skip(self))]
    pub async fn set_active(&self, id: ProductId, active: bool) -> Result<CakeProduct, CatalogError> {
        let update = ProductUpdate {
            active: Some(active),
            ..Default::default()
        };
        self.update(id, update).await
    }
}

#[async_trait]
impl ActorClient<CakeProduct> for CatalogClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<CakeProduct> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        recover(e)
    }
}

//! # Order Client
//!
//! High-level API for the order actor, and the storefront's
//! [`OrderPlacement`] implementation.
use crate::clients::actor_client::{recover, ActorClient};
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{CakeOrder, OrderId, OrderRequest, OrderStatus};
use crate::order_actor::{OrderAction, OrderError};
use crate::submission::{OrderPlacement, PlacementError};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the order actor.
///
/// Validation and slot reservation happen in the order actor's `on_create`
/// hook, not here.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<CakeOrder>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<CakeOrder>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, request), fields(slot = %request.slot_key()))]
    pub async fn create_order(&self, request: OrderRequest) -> Result<OrderId, OrderError> {
        debug!("Sending create_order to actor");
        self.inner.create(request).await.map_err(Self::map_error)
    }

    async fn act(&self, id: OrderId, action: OrderAction) -> Result<OrderStatus, OrderError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn advance(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        self.act(id, OrderAction::Advance).await
    }

    #[instrument(skip(self))]
    pub async fn cancel(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        self.act(id, OrderAction::Cancel).await
    }

    #[instrument(skip(self))]
    pub async fn refund(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        self.act(id, OrderAction::Refund).await
    }
}

#[async_trait]
impl ActorClient<CakeOrder> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<CakeOrder> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        recover(e)
    }
}

#[async_trait]
impl OrderPlacement for OrderClient {
    /// Field-level refusals go back to the customer; anything else is
    /// treated as the service being unreachable.
    async fn place_order(&self, request: OrderRequest) -> Result<OrderId, PlacementError> {
        match self.create_order(request).await {
            Ok(id) => {
                info!(order_id = %id, "Order accepted");
                Ok(id)
            }
            Err(OrderError::Validation(errors)) => Err(PlacementError::Validation(errors)),
            Err(e) => Err(PlacementError::Unavailable(e.to_string())),
        }
    }
}

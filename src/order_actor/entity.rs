//! [`ActorEntity`] implementation for [`CakeOrder`].

use super::{OrderAction, OrderContext, OrderError};
use crate::clients::ActorClient;
use crate::framework::ActorEntity;
use crate::model::{
    CakeOrder, Field, FieldError, FieldErrorCode, OrderId, OrderRequest, OrderStatus,
};
use crate::pricing;
use crate::slot_actor::SlotError;
use async_trait::async_trait;
use tracing::{info, warn};

impl CakeOrder {
    /// Server-side checks that need no reservation. Returns every failure.
    async fn validate(&self, ctx: &OrderContext) -> Result<Vec<FieldError>, OrderError> {
        let request = &self.request;
        let mut errors = Vec::new();

        let product = ctx
            .catalog
            .get(request.product_id)
            .await
            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?;
        let product = match product {
            Some(p) if p.active => Some(p),
            Some(_) => {
                errors.push(FieldError::new(
                    Field::Product,
                    "This cake is no longer available",
                ));
                None
            }
            None => {
                errors.push(FieldError::new(Field::Product, "Unknown product"));
                None
            }
        };

        if !ctx
            .gate
            .is_selectable(request.date, request.time_slot, ctx.clock.now())
        {
            errors.push(FieldError::new(
                Field::TimeSlot,
                format!(
                    "Pickup needs at least {} hours notice",
                    ctx.gate.lead_time().num_hours()
                ),
            ));
        }

        if !(1..=ctx.max_quantity).contains(&request.quantity) {
            errors.push(FieldError::new(
                Field::Quantity,
                format!("Choose between 1 and {} cakes", ctx.max_quantity),
            ));
        }

        let message_len = request
            .gift_message
            .as_deref()
            .map_or(0, |m| m.chars().count());
        if message_len > ctx.gift_message_max {
            errors.push(FieldError::new(
                Field::GiftMessage,
                format!(
                    "Gift message is limited to {} characters",
                    ctx.gift_message_max
                ),
            ));
        }

        errors.extend(request.contact.validate());

        if let Some(product) = product {
            match pricing::for_request(product.base_price, request) {
                Ok(price) if price.total == request.total => {}
                Ok(price) => errors.push(FieldError::new(
                    Field::Total,
                    format!("The price has changed to {}", price.total),
                )),
                Err(e) => errors.push(FieldError::new(Field::Quantity, e.to_string())),
            }
        }

        Ok(errors)
    }

    /// Books the slot, opening it first if nobody has booked it yet.
    async fn reserve_slot(&self, ctx: &OrderContext) -> Result<(), OrderError> {
        let key = self.request.slot_key();
        match ctx
            .slots
            .reserve_or_open(key, self.request.quantity, ctx.slot_capacity)
            .await
        {
            Ok(remaining) => {
                info!(order_id = %self.id, slot = %key, remaining, "Slot reserved");
                Ok(())
            }
            Err(SlotError::SoldOut { remaining: 0, .. }) => {
                Err(OrderError::Validation(vec![FieldError::new(
                    Field::TimeSlot,
                    "This pickup time just sold out",
                )
                .with_code(FieldErrorCode::SoldOut)]))
            }
            // The slot still has room; the customer can order fewer cakes.
            Err(SlotError::SoldOut { remaining, .. }) => {
                Err(OrderError::Validation(vec![FieldError::new(
                    Field::Quantity,
                    format!("Only {remaining} cakes left at this pickup time"),
                )
                .with_code(FieldErrorCode::LimitedCapacity { remaining })]))
            }
            Err(e) => Err(OrderError::ActorCommunicationError(e.to_string())),
        }
    }

    async fn release_slot(&self, ctx: &OrderContext) -> Result<(), OrderError> {
        ctx.slots
            .release(self.request.slot_key(), self.request.quantity)
            .await
            .map(|_| ())
            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))
    }
}

#[async_trait]
impl ActorEntity for CakeOrder {
    type Id = OrderId;
    type Create = OrderRequest;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = OrderStatus;
    type Context = OrderContext;
    type Error = OrderError;

    fn assign_id(seq: u32, _params: &OrderRequest) -> OrderId {
        OrderId(seq)
    }

    fn from_create_params(id: OrderId, params: OrderRequest) -> Result<Self, OrderError> {
        Ok(Self::new(id, params))
    }

    /// Validates the request against the catalog and the clock, then reserves
    /// the pickup slot. Any failure discards the order.
    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), OrderError> {
        let errors = self.validate(ctx).await?;
        if !errors.is_empty() {
            warn!(order_id = %self.id, errors = errors.len(), "Order rejected");
            return Err(OrderError::Validation(errors));
        }
        self.reserve_slot(ctx).await
    }

    async fn on_update(&mut self, _update: (), _ctx: &OrderContext) -> Result<(), OrderError> {
        Ok(())
    }

    /// Orders that still hold a slot give it back when deleted.
    async fn on_delete(&self, ctx: &OrderContext) -> Result<(), OrderError> {
        if self.status.holds_slot() {
            self.release_slot(ctx).await?;
        }
        Ok(())
    }

    /// # Actions
    /// - `Advance`: next fulfilment status
    /// - `Cancel`: `Placed | Preparing` → `Cancelled`, slot released
    /// - `Refund`: `Ready | PickedUp` → `Refunded`, slot released if not picked up
    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<OrderStatus, OrderError> {
        let from = self.status;
        let invalid = OrderError::InvalidTransition { from, action };

        let to = match action {
            OrderAction::Advance => from.next().ok_or(invalid)?,
            OrderAction::Cancel if from.can_cancel() => OrderStatus::Cancelled,
            OrderAction::Refund if from.can_refund() => OrderStatus::Refunded,
            OrderAction::Cancel | OrderAction::Refund => return Err(invalid),
        };

        if action != OrderAction::Advance && from.holds_slot() {
            self.release_slot(ctx).await?;
        }

        self.status = to;
        info!(order_id = %self.id, %from, %to, "Status changed");
        Ok(to)
    }
}

//! [`ActorEntity`] implementation for [`SlotCapacity`].
//!
//! The id is the slot's own [`SlotKey`], so opening the same `(date, slot)`
//! twice fails with [`FrameworkError::AlreadyExists`](crate::framework::FrameworkError::AlreadyExists).

use super::actions::{SlotAction, SlotActionResult};
use super::SlotError;
use crate::framework::ActorEntity;
use crate::model::{SlotCapacity, SlotKey, SlotOpen, SlotUpdate};
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
impl ActorEntity for SlotCapacity {
    type Id = SlotKey;
    type Create = SlotOpen;
    type Update = SlotUpdate;
    type Action = SlotAction;
    type ActionResult = SlotActionResult;
    type Context = ();
    type Error = SlotError;

    fn assign_id(_seq: u32, params: &SlotOpen) -> SlotKey {
        params.key
    }

    fn from_create_params(id: SlotKey, params: SlotOpen) -> Result<Self, SlotError> {
        Ok(Self {
            key: id,
            capacity: params.capacity,
            reserved: 0,
        })
    }

    async fn on_update(&mut self, update: SlotUpdate, _ctx: &()) -> Result<(), SlotError> {
        self.capacity = update.capacity;
        Ok(())
    }

    /// # Actions
    /// - `Remaining`: capacity minus reserved
    /// - `Reserve(n)`: books `n` cakes if they fit
    /// - `Release(n)`: returns up to `n` cakes; never below zero reserved
    async fn handle_action(
        &mut self,
        action: SlotAction,
        _ctx: &(),
    ) -> Result<SlotActionResult, SlotError> {
        match action {
            SlotAction::Remaining => Ok(SlotActionResult::Remaining(self.remaining())),
            SlotAction::Reserve(0) | SlotAction::Release(0) => Err(SlotError::InvalidQuantity(0)),
            SlotAction::Reserve(quantity) => {
                let remaining = self.remaining();
                if quantity > remaining {
                    return Err(SlotError::SoldOut {
                        key: self.key,
                        requested: quantity,
                        remaining,
                    });
                }
                self.reserved += quantity;
                debug!(slot = %self.key, reserved = self.reserved, "Reserved");
                Ok(SlotActionResult::Reserve(self.remaining()))
            }
            SlotAction::Release(quantity) => {
                self.reserved = self.reserved.saturating_sub(quantity);
                Ok(SlotActionResult::Release(self.remaining()))
            }
        }
    }
}

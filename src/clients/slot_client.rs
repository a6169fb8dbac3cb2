//! # Slot Client
//!
//! High-level API for the slot actor. Hides the
//! [`SlotAction`]/[`SlotActionResult`] pairing behind one method per action.
use crate::clients::actor_client::{recover, ActorClient};
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{SlotCapacity, SlotKey, SlotOpen};
use crate::slot_actor::{SlotAction, SlotActionResult, SlotError};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct SlotClient {
    inner: ResourceClient<SlotCapacity>,
}

impl SlotClient {
    pub fn new(inner: ResourceClient<SlotCapacity>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn open_slot(&self, key: SlotKey, capacity: u32) -> Result<SlotKey, SlotError> {
        debug!("Sending request");
        self.inner
            .create(SlotOpen { key, capacity })
            .await
            .map_err(Self::map_error)
    }

    async fn act(&self, key: SlotKey, action: SlotAction) -> Result<SlotActionResult, SlotError> {
        self.inner
            .perform_action(key, action)
            .await
            .map_err(|e| match e {
                FrameworkError::NotFound(_) => SlotError::NotOpen(key),
                e => Self::map_error(e),
            })
    }

    #[instrument(skip(self))]
    pub async fn remaining(&self, key: SlotKey) -> Result<u32, SlotError> {
        match self.act(key, SlotAction::Remaining).await? {
            SlotActionResult::Remaining(n) => Ok(n),
            other => Err(SlotError::ActorCommunicationError(format!(
                "unexpected result {other:?}"
            ))),
        }
    }

    /// Returns the capacity left after booking.
    #[instrument(skip(self))]
    pub async fn reserve(&self, key: SlotKey, quantity: u32) -> Result<u32, SlotError> {
        debug!("Reserving {} cakes at {}", quantity, key);
        match self.act(key, SlotAction::Reserve(quantity)).await? {
            SlotActionResult::Reserve(n) => Ok(n),
            other => Err(SlotError::ActorCommunicationError(format!(
                "unexpected result {other:?}"
            ))),
        }
    }

    #[instrument(skip(self))]
    pub async fn release(&self, key: SlotKey, quantity: u32) -> Result<u32, SlotError> {
        match self.act(key, SlotAction::Release(quantity)).await? {
            SlotActionResult::Release(n) => Ok(n),
            other => Err(SlotError::ActorCommunicationError(format!(
                "unexpected result {other:?}"
            ))),
        }
    }

    /// Reserves, opening the slot at `capacity` if it has never been booked.
    ///
    /// Another order may open the same slot between our two calls; that
    /// `AlreadyExists` is expected and the reservation is simply retried.
    #[instrument(skip(self))]
    pub async fn reserve_or_open(
        &self,
        key: SlotKey,
        quantity: u32,
        capacity: u32,
    ) -> Result<u32, SlotError> {
        match self.reserve(key, quantity).await {
            Err(SlotError::NotOpen(_)) => {
                match self.inner.create(SlotOpen { key, capacity }).await {
                    Ok(_) | Err(FrameworkError::AlreadyExists(_)) => {}
                    Err(e) => return Err(Self::map_error(e)),
                }
                self.reserve(key, quantity).await
            }
            result => result,
        }
    }

    /// Every slot with nothing left.
    #[instrument(skip(self))]
    pub async fn sold_out(&self) -> Result<BTreeSet<SlotKey>, SlotError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|s| s.remaining() == 0)
            .map(|s| s.key)
            .collect())
    }

    /// Slots on `date` with nothing left, for greying out the time picker.
    #[instrument(skip(self))]
    pub async fn sold_out_on(&self, date: NaiveDate) -> Result<BTreeSet<SlotKey>, SlotError> {
        let mut keys = self.sold_out().await?;
        keys.retain(|key| key.date == date);
        Ok(keys)
    }
}

#[async_trait]
impl ActorClient<SlotCapacity> for SlotClient {
    type Error = SlotError;

    fn inner(&self) -> &ResourceClient<SlotCapacity> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        recover(e)
    }
}

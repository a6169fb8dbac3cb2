//! # Slot Actor
//!
//! Tracks how many cakes each pickup slot can still take. Slots are keyed by
//! `(date, slot)` and opened lazily the first time an order books them.
//!
//! ## Custom Actions
//!
//! ```rust,ignore
//! let left = slot_client.remaining(key).await?;
//! slot_client.reserve(key, 2).await?;   // fails with SlotError::SoldOut when full
//! slot_client.release(key, 2).await?;
//! ```
//!
//! Every action on a slot runs inside the actor's single message loop, so two
//! orders racing for the last cake cannot both win.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::SlotClient;
use crate::framework::ResourceActor;
use crate::model::SlotCapacity;

/// Creates a new slot actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<SlotCapacity>, SlotClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, SlotClient::new(generic_client))
}

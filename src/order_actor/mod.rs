//! # Order Actor
//!
//! Accepts finished drafts as [`OrderRequest`](crate::model::OrderRequest)s and
//! owns the resulting [`CakeOrder`]s.
//!
//! ## Overview
//!
//! This is the only actor with dependencies. Its `on_create` hook re-checks
//! everything the wizard checked, against the catalog and the slot actor:
//!
//! 1. the product exists and is still on sale
//! 2. the pickup slot still clears the lead time
//! 3. quantity, gift message and contact details are valid
//! 4. the submitted total matches the catalog price
//! 5. the slot has room, which is then reserved
//!
//! Steps 1 to 4 are collected into one [`OrderError::Validation`] so the
//! customer sees every problem at once. The reservation runs last so a
//! rejected order never holds capacity.
//!
//! After placement, the back office moves orders along with [`OrderAction`]s.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`CakeOrder`]
//! - [`actions`] - [`OrderAction`] status changes
//! - [`error`] - [`OrderError`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::availability::{AvailabilityGate, Clock};
use crate::clients::{CatalogClient, OrderClient, SlotClient};
use crate::config::StorefrontConfig;
use crate::framework::ResourceActor;
use crate::model::CakeOrder;
use std::sync::Arc;

/// Dependencies injected into the order actor at `run()`.
#[derive(Clone)]
pub struct OrderContext {
    pub catalog: CatalogClient,
    pub slots: SlotClient,
    pub clock: Arc<dyn Clock>,
    pub gate: AvailabilityGate,
    pub slot_capacity: u32,
    pub max_quantity: u32,
    pub gift_message_max: usize,
}

impl OrderContext {
    pub fn new(
        catalog: CatalogClient,
        slots: SlotClient,
        clock: Arc<dyn Clock>,
        config: &StorefrontConfig,
    ) -> Self {
        Self {
            catalog,
            slots,
            clock,
            gate: AvailabilityGate::from_hours(config.lead_time_hours),
            slot_capacity: config.slot_capacity,
            max_quantity: config.max_quantity,
            gift_message_max: config.gift_message_max,
        }
    }
}

/// Creates a new order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<CakeOrder>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}

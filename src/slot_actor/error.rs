//! Error types for the slot actor.

use crate::model::SlotKey;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SlotError {
    #[error("{key} is sold out: requested {requested}, remaining {remaining}")]
    SoldOut {
        key: SlotKey,
        requested: u32,
        remaining: u32,
    },

    /// The slot has never been opened for booking.
    #[error("{0} is not open for booking")]
    NotOpen(SlotKey),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for SlotError {
    fn from(msg: String) -> Self {
        SlotError::ActorCommunicationError(msg)
    }
}

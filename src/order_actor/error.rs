//! Error types for the order actor.

use super::OrderAction;
use crate::model::{FieldError, OrderStatus};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The order was refused. Each entry names the field to fix.
    #[error("Order validation failed: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Validation(Vec<FieldError>),

    #[error("Cannot {action} an order that is {from}")]
    InvalidTransition { from: OrderStatus, action: OrderAction },

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}

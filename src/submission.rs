//! Sending a finished draft to the order service.
//!
//! The wizard is split into [`Wizard::begin_submission`] and
//! [`Wizard::finish_submission`] so a UI can render the in-flight state
//! between the two. [`submit`] runs both halves around one call to an
//! [`OrderPlacement`]. Nothing here retries on its own.

use crate::model::{FieldError, OrderId, OrderRequest};
use crate::wizard::{Step, Wizard, WizardError};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

/// The "create order" call.
#[async_trait]
pub trait OrderPlacement: Send + Sync {
    async fn place_order(&self, request: OrderRequest) -> Result<OrderId, PlacementError>;
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlacementError {
    /// The server refused the order. The customer has to change something.
    #[error("order rejected: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Validation(Vec<FieldError>),

    /// The call never got an answer. Safe to try again.
    #[error("order service unavailable: {0}")]
    Unavailable(String),
}

/// What the customer sees after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Confirmation screen. The draft has been discarded.
    Placed(OrderId),
    /// Error banner plus inline errors; `reopened` is the earliest step the
    /// errors point at and is now active.
    Rejected {
        errors: Vec<FieldError>,
        reopened: Step,
    },
    /// Retryable banner. The draft is untouched and submit is enabled again.
    Failed { message: String },
}

impl SubmitOutcome {
    pub fn order_id(&self) -> Option<OrderId> {
        match self {
            SubmitOutcome::Placed(id) => Some(*id),
            _ => None,
        }
    }
}

/// Submits the wizard's draft through `placement`.
///
/// Returns `Err` only when the draft cannot be submitted at all (incomplete,
/// stale, or already in flight); every answer from the service is an
/// [`SubmitOutcome`].
#[instrument(skip_all)]
pub async fn submit<P>(wizard: &mut Wizard, placement: &P) -> Result<SubmitOutcome, WizardError>
where
    P: OrderPlacement + ?Sized,
{
    let request = wizard.begin_submission()?;
    let result = placement.place_order(request).await;
    Ok(wizard.finish_submission(result))
}

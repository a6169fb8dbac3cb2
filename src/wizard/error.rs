//! Error types for the order wizard.

use super::Step;
use crate::availability::SlotAvailability;
use crate::model::{FieldError, MoneyError};
use thiserror::Error;

fn join(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors reported inline by the wizard. None of them lose entered data.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WizardError {
    /// Input was sent to a step that is not the active one.
    #[error("{step} is not open for editing")]
    StepLocked { step: Step, active: Option<Step> },

    /// Only completed steps can be reopened.
    #[error("{0} has not been completed yet")]
    StepNotComplete(Step),

    /// The chosen date has no selectable pickup slot.
    #[error("no pickup slots for this date: {0:?}")]
    DateUnavailable(SlotAvailability),

    /// One or more fields of the active step failed validation.
    #[error("{}", join(.0))]
    Invalid(Vec<FieldError>),

    /// There is no active step left to confirm.
    #[error("every step is already complete")]
    AllStepsComplete,

    /// Submission was attempted before every step was complete.
    #[error("{0} still needs to be completed")]
    Incomplete(Step),

    /// A submission is already waiting for the order service.
    #[error("order submission already in progress")]
    SubmissionInFlight,

    #[error("pricing failed: {0}")]
    Pricing(#[from] MoneyError),
}

impl WizardError {
    /// Field errors to render next to inputs, if any.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            WizardError::Invalid(errors) => errors,
            _ => &[],
        }
    }
}

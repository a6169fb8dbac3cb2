//! Wizard steps and their derived status.

use crate::model::Field;
use serde::Serialize;
use std::fmt;

/// The steps of the cake order form, in the only order they can be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Date,
    Time,
    Option,
    Quantity,
    AddOns,
    Contact,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Date,
        Step::Time,
        Step::Option,
        Step::Quantity,
        Step::AddOns,
        Step::Contact,
    ];

    pub const COUNT: usize = Step::ALL.len();

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Step> {
        Step::ALL.get(index).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Date => "Pickup date",
            Step::Time => "Pickup time",
            Step::Option => "Crust",
            Step::Quantity => "Quantity",
            Step::AddOns => "Extras",
            Step::Contact => "Contact details",
        }
    }

    /// The step a customer reopens to fix `field`.
    ///
    /// Product and total mismatches mean the catalog moved under the customer;
    /// they are sent back to the crust choice to review the new price.
    pub fn for_field(field: Field) -> Step {
        match field {
            Field::Date => Step::Date,
            Field::TimeSlot => Step::Time,
            Field::Option | Field::Product | Field::Total => Step::Option,
            Field::Quantity => Step::Quantity,
            Field::AddOns | Field::GiftMessage => Step::AddOns,
            Field::Name | Field::Email | Field::Phone => Step::Contact,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Not reachable yet. May still hold a value from before a reopen.
    Pending,
    /// The one step currently accepting input.
    Active,
    Complete,
}

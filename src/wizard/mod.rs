//! # Wizard Step Controller
//!
//! Drives the cake order form one step at a time. State is a confirmed prefix
//! of [`Step::ALL`]: steps before it are complete, the step at it is active,
//! the rest are pending. Reopening a step moves the prefix back, so every later
//! step is pending again while its value stays in the draft.
//!
//! The total is never stored. [`Wizard::price`] prices the current draft on
//! every call.

mod error;
mod step;

pub use error::WizardError;
pub use step::{Step, StepStatus};

use crate::availability::{AvailabilityGate, Clock, SlotAvailability};
use crate::config::StorefrontConfig;
use crate::model::{
    AddOn, CakeProduct, ContactInfo, CrustOption, Field, FieldError, FieldErrorCode, Money,
    OrderDraft, OrderId, OrderRequest, SlotKey, TimeSlot,
};
use crate::pricing::{self, PriceBreakdown};
use crate::submission::{PlacementError, SubmitOutcome};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct Wizard {
    product: CakeProduct,
    draft: OrderDraft,
    confirmed: usize,
    gate: AvailabilityGate,
    clock: Arc<dyn Clock>,
    max_quantity: u32,
    gift_message_max: usize,
    sold_out: BTreeSet<SlotKey>,
    /// Cakes still available in slots the order service reported as short.
    slot_limits: BTreeMap<SlotKey, u32>,
    in_flight: bool,
}

impl Wizard {
    pub fn new(product: CakeProduct, config: &StorefrontConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            product,
            draft: OrderDraft::new(),
            confirmed: 0,
            gate: AvailabilityGate::from_hours(config.lead_time_hours),
            clock,
            max_quantity: config.max_quantity,
            gift_message_max: config.gift_message_max,
            sold_out: BTreeSet::new(),
            slot_limits: BTreeMap::new(),
            in_flight: false,
        }
    }

    pub fn product(&self) -> &CakeProduct {
        &self.product
    }

    /// Swaps in a refreshed catalog record, e.g. after the server reported a
    /// price change. The displayed total follows immediately.
    pub fn set_product(&mut self, product: CakeProduct) {
        self.product = product;
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn status(&self, step: Step) -> StepStatus {
        use std::cmp::Ordering;
        match step.index().cmp(&self.confirmed) {
            Ordering::Less => StepStatus::Complete,
            Ordering::Equal => StepStatus::Active,
            Ordering::Greater => StepStatus::Pending,
        }
    }

    pub fn statuses(&self) -> [(Step, StepStatus); Step::COUNT] {
        Step::ALL.map(|step| (step, self.status(step)))
    }

    /// `None` once every step is complete.
    pub fn active_step(&self) -> Option<Step> {
        Step::from_index(self.confirmed)
    }

    pub fn is_complete(&self) -> bool {
        self.confirmed >= Step::COUNT
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn can_submit(&self) -> bool {
        self.is_complete() && !self.in_flight
    }

    pub fn price(&self) -> Result<PriceBreakdown, WizardError> {
        Ok(pricing::for_draft(self.product.base_price, &self.draft)?)
    }

    pub fn total(&self) -> Result<Money, WizardError> {
        self.price().map(|p| p.total)
    }

    /// Time picker state for `date` as of now.
    pub fn availability(&self, date: NaiveDate) -> SlotAvailability {
        self.gate.slots_for(date, self.clock.now(), &self.sold_out)
    }

    pub fn mark_sold_out(&mut self, key: SlotKey) {
        self.sold_out.insert(key);
    }

    /// Replaces what the wizard knows about full slots on `date` with the
    /// order service's current list. Keys for other dates are ignored.
    pub fn sync_sold_out(
        &mut self,
        date: NaiveDate,
        sold_out: impl IntoIterator<Item = SlotKey>,
    ) {
        self.sold_out.retain(|key| key.date != date);
        self.sold_out
            .extend(sold_out.into_iter().filter(|key| key.date == date));
    }

    // Step inputs

    /// Picks the pickup day. Fails with [`WizardError::DateUnavailable`] when
    /// the day has no selectable slot; the date is kept so the picker can
    /// show why.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<SlotAvailability, WizardError> {
        self.require_active(Step::Date)?;
        self.draft.date = Some(date);
        self.advance(Step::Date)?;
        Ok(self.availability(date))
    }

    pub fn select_time(&mut self, slot: TimeSlot) -> Result<(), WizardError> {
        self.require_active(Step::Time)?;
        self.draft.time_slot = Some(slot);
        self.advance(Step::Time)
    }

    pub fn select_option(&mut self, option: CrustOption) -> Result<(), WizardError> {
        self.require_active(Step::Option)?;
        self.draft.option = Some(option);
        self.advance(Step::Option)
    }

    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), WizardError> {
        self.require_active(Step::Quantity)?;
        self.draft.quantity = quantity;
        self.advance(Step::Quantity)
    }

    /// Replaces the add-on selection. The extras step holds two optional
    /// inputs, so it only completes on [`Wizard::confirm_active`].
    pub fn set_add_ons(&mut self, add_ons: impl IntoIterator<Item = AddOn>) -> Result<(), WizardError> {
        self.require_active(Step::AddOns)?;
        self.draft.add_ons = add_ons.into_iter().collect();
        Ok(())
    }

    /// Blank messages clear the field. Too-long messages are kept and
    /// reported so the customer can trim them.
    pub fn set_gift_message(&mut self, message: Option<String>) -> Result<(), WizardError> {
        self.require_active(Step::AddOns)?;
        self.draft.gift_message = message.filter(|m| !m.trim().is_empty());
        self.validate_step(Step::AddOns)
    }

    pub fn set_contact(&mut self, contact: ContactInfo) -> Result<(), WizardError> {
        self.require_active(Step::Contact)?;
        self.draft.contact = contact;
        self.advance(Step::Contact)
    }

    /// Confirms the value already held by the active step.
    pub fn confirm_active(&mut self) -> Result<(), WizardError> {
        let step = self.active_step().ok_or(WizardError::AllStepsComplete)?;
        self.require_active(step)?;
        self.advance(step)
    }

    /// Makes a completed step editable again. Every later step goes back to
    /// pending; no entered value is discarded.
    pub fn reopen(&mut self, step: Step) -> Result<(), WizardError> {
        if self.in_flight {
            return Err(WizardError::SubmissionInFlight);
        }
        if self.status(step) != StepStatus::Complete {
            return Err(WizardError::StepNotComplete(step));
        }
        self.confirmed = step.index();
        debug!(step = ?step, "Step reopened");
        Ok(())
    }

    // Submission

    /// Builds the order request and marks a submission in flight.
    ///
    /// Every step is checked again first: a slot can slip inside the lead
    /// time while the customer types. The first step that no longer holds is
    /// reopened and its error returned.
    pub fn begin_submission(&mut self) -> Result<OrderRequest, WizardError> {
        if self.in_flight {
            return Err(WizardError::SubmissionInFlight);
        }
        if let Some(step) = self.active_step() {
            return Err(WizardError::Incomplete(step));
        }
        for step in Step::ALL {
            if let Err(e) = self.validate_step(step) {
                self.confirmed = step.index();
                warn!(step = ?step, error = %e, "Draft no longer valid at submission");
                return Err(e);
            }
        }

        let draft = &self.draft;
        let request = OrderRequest {
            product_id: self.product.id,
            date: draft.date.ok_or(WizardError::Incomplete(Step::Date))?,
            time_slot: draft.time_slot.ok_or(WizardError::Incomplete(Step::Time))?,
            option: draft.option.ok_or(WizardError::Incomplete(Step::Option))?,
            quantity: draft.quantity,
            add_ons: draft.add_ons.iter().copied().collect(),
            gift_message: draft.gift_message.clone(),
            contact: draft.contact.clone(),
            total: self.total()?,
        };

        self.in_flight = true;
        info!(slot = %request.slot_key(), total = %request.total, "Submitting order");
        Ok(request)
    }

    /// Applies the order service's answer and clears the in-flight flag.
    pub fn finish_submission(&mut self, result: Result<OrderId, PlacementError>) -> SubmitOutcome {
        if !self.in_flight {
            warn!("Submission result received with nothing in flight");
        }
        self.in_flight = false;

        match result {
            Ok(order_id) => {
                info!(order_id = %order_id, "Order placed");
                self.draft = OrderDraft::new();
                self.confirmed = 0;
                SubmitOutcome::Placed(order_id)
            }
            Err(PlacementError::Validation(errors)) => {
                let reopened = errors
                    .iter()
                    .map(|e| Step::for_field(e.field))
                    .min()
                    .unwrap_or(Step::Contact);

                self.apply_capacity_errors(&errors);

                self.confirmed = self.confirmed.min(reopened.index());
                warn!(reopened = ?reopened, errors = errors.len(), "Order rejected");
                SubmitOutcome::Rejected { errors, reopened }
            }
            Err(PlacementError::Unavailable(message)) => {
                warn!(%message, "Order service unavailable");
                SubmitOutcome::Failed { message }
            }
        }
    }

    // Internals

    fn require_active(&self, step: Step) -> Result<(), WizardError> {
        if self.in_flight {
            return Err(WizardError::SubmissionInFlight);
        }
        if self.status(step) != StepStatus::Active {
            return Err(WizardError::StepLocked {
                step,
                active: self.active_step(),
            });
        }
        Ok(())
    }

    fn advance(&mut self, step: Step) -> Result<(), WizardError> {
        self.validate_step(step)?;
        self.confirmed = step.index() + 1;
        debug!(step = ?step, next = ?self.active_step(), "Step complete");
        Ok(())
    }

    fn chosen_slot(&self) -> Option<SlotKey> {
        Some(SlotKey::new(self.draft.date?, self.draft.time_slot?))
    }

    /// Remembers what the order service said about the chosen slot's
    /// capacity so the time and quantity steps refuse the same order again.
    fn apply_capacity_errors(&mut self, errors: &[FieldError]) {
        let Some(key) = self.chosen_slot() else {
            return;
        };
        for error in errors {
            match error.code {
                FieldErrorCode::SoldOut => {
                    self.slot_limits.remove(&key);
                    self.mark_sold_out(key);
                }
                FieldErrorCode::LimitedCapacity { remaining } => {
                    self.slot_limits.insert(key, remaining);
                }
                FieldErrorCode::Invalid => {}
            }
        }
    }

    /// Most cakes the chosen slot can take, and whether the slot is what
    /// limits it.
    fn quantity_limit(&self) -> (u32, bool) {
        match self.chosen_slot().and_then(|key| self.slot_limits.get(&key)) {
            Some(&remaining) if remaining < self.max_quantity => (remaining, true),
            _ => (self.max_quantity, false),
        }
    }

    fn validate_step(&self, step: Step) -> Result<(), WizardError> {
        match step {
            Step::Date => {
                let Some(date) = self.draft.date else {
                    return invalid(Field::Date, "Choose a pickup date");
                };
                let availability = self.availability(date);
                if availability.is_open() {
                    Ok(())
                } else {
                    Err(WizardError::DateUnavailable(availability))
                }
            }
            Step::Time => {
                let (Some(date), Some(slot)) = (self.draft.date, self.draft.time_slot) else {
                    return invalid(Field::TimeSlot, "Choose a pickup time");
                };
                if !self.gate.is_selectable(date, slot, self.clock.now()) {
                    invalid(
                        Field::TimeSlot,
                        format!(
                            "{} needs at least {} hours notice",
                            slot,
                            self.gate.lead_time().num_hours()
                        ),
                    )
                } else if self.sold_out.contains(&SlotKey::new(date, slot)) {
                    invalid(Field::TimeSlot, format!("{} is sold out", slot))
                } else {
                    Ok(())
                }
            }
            Step::Option => match self.draft.option {
                Some(_) => Ok(()),
                None => invalid(Field::Option, "Choose a crust"),
            },
            Step::Quantity => {
                let (limit, by_slot) = self.quantity_limit();
                if (1..=limit).contains(&self.draft.quantity) {
                    Ok(())
                } else if by_slot && self.draft.quantity > limit {
                    invalid(
                        Field::Quantity,
                        format!("Only {} cakes left at this pickup time", limit),
                    )
                } else {
                    invalid(
                        Field::Quantity,
                        format!("Choose between 1 and {} cakes", limit),
                    )
                }
            }
            Step::AddOns => {
                let length = self
                    .draft
                    .gift_message
                    .as_deref()
                    .map_or(0, |m| m.chars().count());
                if length > self.gift_message_max {
                    invalid(
                        Field::GiftMessage,
                        format!(
                            "Gift message is limited to {} characters",
                            self.gift_message_max
                        ),
                    )
                } else {
                    Ok(())
                }
            }
            Step::Contact => {
                let errors = self.draft.contact.validate();
                if errors.is_empty() {
                    Ok(())
                } else {
                    Err(WizardError::Invalid(errors))
                }
            }
        }
    }
}

fn invalid(field: Field, message: impl Into<String>) -> Result<(), WizardError> {
    Err(WizardError::Invalid(vec![FieldError::new(field, message)]))
}

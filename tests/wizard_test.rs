//! Customer-flow scenarios: a real wizard against a scripted order service.

use acai_storefront::availability::{FixedClock, SlotAvailability};
use acai_storefront::config::StorefrontConfig;
use acai_storefront::model::{
    AddOn, CakeProduct, ContactInfo, CrustOption, Field, FieldError, FieldErrorCode, Money,
    OrderId, OrderRequest, ProductId, SlotKey, TimeSlot,
};
use acai_storefront::submission::{submit, OrderPlacement, PlacementError, SubmitOutcome};
use acai_storefront::wizard::{Step, StepStatus, Wizard, WizardError};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

const BASE: Money = Money::from_cents(3_800);

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn two_days_out() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 21).unwrap()
}

fn setup() -> (Wizard, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(now()));
    let product = CakeProduct::new(ProductId(1), "Açaí Celebration Cake", BASE);
    let wizard = Wizard::new(product, &StorefrontConfig::default(), clock.clone());
    (wizard, clock)
}

fn contact() -> ContactInfo {
    ContactInfo::new("Ana Souza", "ana@example.com", "(555) 123-4567")
}

/// Date two days out, morning, classic, one cake, no extras, valid contact.
fn complete(wizard: &mut Wizard) {
    wizard.select_date(two_days_out()).unwrap();
    wizard.select_time(TimeSlot::Morning).unwrap();
    wizard.select_option(CrustOption::Classic).unwrap();
    wizard.set_quantity(1).unwrap();
    wizard.confirm_active().unwrap();
    wizard.set_contact(contact()).unwrap();
}

/// Answers `place_order` from a script and records each request.
#[derive(Default)]
struct ScriptedPlacement {
    answers: Mutex<VecDeque<Result<OrderId, PlacementError>>>,
    requests: Mutex<Vec<OrderRequest>>,
}

impl ScriptedPlacement {
    fn answering(answers: Vec<Result<OrderId, PlacementError>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            requests: Mutex::default(),
        }
    }

    fn requests(&self) -> Vec<OrderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderPlacement for ScriptedPlacement {
    async fn place_order(&self, request: OrderRequest) -> Result<OrderId, PlacementError> {
        self.requests.lock().unwrap().push(request);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted place_order call")
    }
}

// =============================================================================
// Pricing scenarios
// =============================================================================

#[test]
fn test_classic_single_cake_costs_base_price() {
    let (mut wizard, _) = setup();
    complete(&mut wizard);

    assert_eq!(wizard.total().unwrap(), BASE);
    assert_eq!(wizard.total().unwrap().to_string(), "$38.00");
}

#[test]
fn test_switching_option_adds_delta_exactly() {
    let (mut wizard, _) = setup();
    complete(&mut wizard);
    let before = wizard.total().unwrap();

    wizard.reopen(Step::Option).unwrap();
    wizard.select_option(CrustOption::Granola).unwrap();

    assert_eq!(
        wizard.total().unwrap(),
        before.checked_add(Money::from_cents(450)).unwrap()
    );
}

#[test]
fn test_doubling_quantity_doubles_total() {
    let (mut wizard, _) = setup();
    complete(&mut wizard);
    let single = wizard.total().unwrap();

    wizard.reopen(Step::Quantity).unwrap();
    wizard.set_quantity(2).unwrap();

    assert_eq!(wizard.total().unwrap(), single.checked_mul(2).unwrap());
}

#[test]
fn test_extras_are_charged_once() {
    let (mut wizard, _) = setup();
    wizard.select_date(two_days_out()).unwrap();
    wizard.select_time(TimeSlot::Afternoon).unwrap();
    wizard.select_option(CrustOption::Chocolate).unwrap();
    wizard.set_quantity(3).unwrap();
    wizard
        .set_add_ons([AddOn::Candles, AddOn::GreetingCard])
        .unwrap();

    let price = wizard.price().unwrap();
    assert_eq!(price.unit_price, Money::from_cents(4_100));
    assert_eq!(price.add_ons_total, Money::from_cents(550));
    assert_eq!(price.total, Money::from_cents(3 * 4_100 + 550));
}

// =============================================================================
// Step gating
// =============================================================================

#[test]
fn test_exactly_one_active_step_until_complete() {
    let (mut wizard, _) = setup();
    let active_count = |w: &Wizard| {
        w.statuses()
            .iter()
            .filter(|(_, s)| *s == StepStatus::Active)
            .count()
    };

    assert_eq!(active_count(&wizard), 1);
    wizard.select_date(two_days_out()).unwrap();
    assert_eq!(active_count(&wizard), 1);
    assert_eq!(wizard.active_step(), Some(Step::Time));

    complete_remaining(&mut wizard);
    assert_eq!(active_count(&wizard), 0);
    assert!(wizard
        .statuses()
        .iter()
        .all(|(_, s)| *s == StepStatus::Complete));
}

fn complete_remaining(wizard: &mut Wizard) {
    wizard.select_time(TimeSlot::Evening).unwrap();
    wizard.select_option(CrustOption::GlutenFree).unwrap();
    wizard.set_quantity(1).unwrap();
    wizard.confirm_active().unwrap();
    wizard.set_contact(contact()).unwrap();
}

#[test]
fn test_reopen_reverts_later_steps_and_keeps_values() {
    let (mut wizard, _) = setup();
    complete(&mut wizard);
    assert!(wizard.can_submit());

    wizard.reopen(Step::Time).unwrap();

    assert_eq!(wizard.status(Step::Date), StepStatus::Complete);
    assert_eq!(wizard.status(Step::Time), StepStatus::Active);
    for step in [Step::Option, Step::Quantity, Step::AddOns, Step::Contact] {
        assert_eq!(wizard.status(step), StepStatus::Pending, "{step:?}");
    }
    assert!(!wizard.can_submit());
    assert_eq!(wizard.draft().option, Some(CrustOption::Classic));
    assert_eq!(wizard.draft().contact, contact());

    // Later steps are locked even though their values survive.
    assert!(matches!(
        wizard.set_contact(contact()),
        Err(WizardError::StepLocked {
            step: Step::Contact,
            active: Some(Step::Time)
        })
    ));

    // Retained values are confirmed one step at a time.
    wizard.select_time(TimeSlot::Midday).unwrap();
    for _ in 0..4 {
        wizard.confirm_active().unwrap();
    }
    assert!(wizard.can_submit());
}

#[test]
fn test_invalid_contact_reports_each_field() {
    let (mut wizard, _) = setup();
    wizard.select_date(two_days_out()).unwrap();
    wizard.select_time(TimeSlot::Morning).unwrap();
    wizard.select_option(CrustOption::Classic).unwrap();
    wizard.set_quantity(1).unwrap();
    wizard.confirm_active().unwrap();

    let err = wizard
        .set_contact(ContactInfo::new(" ", "not-an-email", "123"))
        .unwrap_err();
    let fields: Vec<Field> = err.field_errors().iter().map(|e| e.field).collect();

    assert_eq!(fields, vec![Field::Name, Field::Email, Field::Phone]);
    assert_eq!(wizard.active_step(), Some(Step::Contact));
    assert!(!wizard.can_submit());
}

#[test]
fn test_quantity_above_maximum_rejected() {
    let (mut wizard, _) = setup();
    wizard.select_date(two_days_out()).unwrap();
    wizard.select_time(TimeSlot::Morning).unwrap();
    wizard.select_option(CrustOption::Classic).unwrap();

    assert!(matches!(
        wizard.set_quantity(11),
        Err(WizardError::Invalid(_))
    ));
    wizard.set_quantity(10).unwrap();
}

// =============================================================================
// Availability
// =============================================================================

#[test]
fn test_tomorrow_morning_selectable_with_enough_notice() {
    let (mut wizard, _) = setup();
    let tomorrow = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();

    // 09:00 today: tomorrow's 10:00 slot is 25h out, still fine.
    assert!(wizard.availability(tomorrow).slots().contains(&TimeSlot::Morning));

    wizard.select_date(tomorrow).unwrap();
    wizard.select_time(TimeSlot::Morning).unwrap();
}

#[test]
fn test_same_day_shows_advance_notice_state() {
    let (mut wizard, _) = setup();
    let today = now().date();

    let err = wizard.select_date(today).unwrap_err();
    let WizardError::DateUnavailable(availability) = err else {
        panic!("expected DateUnavailable");
    };
    assert_eq!(
        availability,
        SlotAvailability::AdvanceNoticeRequired {
            earliest: SlotKey::new(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(), TimeSlot::Morning)
        }
    );
    assert!(availability.notice().is_some());
}

// =============================================================================
// Submission
// =============================================================================

#[tokio::test]
async fn test_successful_submit_resets_draft() {
    let (mut wizard, _) = setup();
    complete(&mut wizard);
    let placement = ScriptedPlacement::answering(vec![Ok(OrderId(1))]);

    let outcome = submit(&mut wizard, &placement).await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Placed(OrderId(1)));
    let sent = placement.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].total, BASE);
    assert_eq!(sent[0].date, two_days_out());

    assert_eq!(wizard.active_step(), Some(Step::Date));
    assert_eq!(wizard.draft().date, None);
    assert!(!wizard.is_submitting());
}

#[tokio::test]
async fn test_submit_before_complete_is_refused() {
    let (mut wizard, _) = setup();
    wizard.select_date(two_days_out()).unwrap();
    let placement = ScriptedPlacement::default();

    let err = submit(&mut wizard, &placement).await.unwrap_err();

    assert_eq!(err, WizardError::Incomplete(Step::Time));
    assert!(placement.requests().is_empty());
}

#[test]
fn test_second_submission_while_in_flight_is_refused() {
    let (mut wizard, _) = setup();
    complete(&mut wizard);

    wizard.begin_submission().unwrap();
    assert!(!wizard.can_submit());
    assert_eq!(
        wizard.begin_submission(),
        Err(WizardError::SubmissionInFlight)
    );
    assert_eq!(
        wizard.reopen(Step::Date),
        Err(WizardError::SubmissionInFlight)
    );

    let outcome = wizard.finish_submission(Err(PlacementError::Unavailable(
        "connection reset".to_string(),
    )));
    assert_eq!(
        outcome,
        SubmitOutcome::Failed {
            message: "connection reset".to_string()
        }
    );
    assert!(wizard.can_submit());
}

#[tokio::test]
async fn test_network_failure_keeps_draft_for_retry() {
    let (mut wizard, _) = setup();
    complete(&mut wizard);
    let placement = ScriptedPlacement::answering(vec![
        Err(PlacementError::Unavailable("timeout".to_string())),
        Ok(OrderId(7)),
    ]);

    let first = submit(&mut wizard, &placement).await.unwrap();
    assert!(matches!(first, SubmitOutcome::Failed { .. }));
    assert_eq!(wizard.draft().time_slot, Some(TimeSlot::Morning));
    assert!(wizard.can_submit());

    let second = submit(&mut wizard, &placement).await.unwrap();
    assert_eq!(second.order_id(), Some(OrderId(7)));
    assert_eq!(placement.requests()[0], placement.requests()[1]);
}

#[tokio::test]
async fn test_sold_out_rejection_reopens_time_step() {
    let (mut wizard, _) = setup();
    complete(&mut wizard);
    let errors = vec![FieldError::new(Field::TimeSlot, "This pickup time just sold out")
        .with_code(FieldErrorCode::SoldOut)];
    let placement = ScriptedPlacement::answering(vec![Err(PlacementError::Validation(
        errors.clone(),
    ))]);

    let outcome = submit(&mut wizard, &placement).await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            errors,
            reopened: Step::Time
        }
    );
    assert_eq!(wizard.active_step(), Some(Step::Time));
    assert!(!wizard
        .availability(two_days_out())
        .slots()
        .contains(&TimeSlot::Morning));
    assert!(wizard.select_time(TimeSlot::Morning).is_err());
    wizard.select_time(TimeSlot::Midday).unwrap();
}

#[tokio::test]
async fn test_plain_time_slot_rejection_keeps_slot_open() {
    let (mut wizard, _) = setup();
    complete(&mut wizard);
    let placement = ScriptedPlacement::answering(vec![Err(PlacementError::Validation(vec![
        FieldError::new(Field::TimeSlot, "Pickup needs at least 24 hours notice"),
    ]))]);

    submit(&mut wizard, &placement).await.unwrap();

    assert_eq!(wizard.active_step(), Some(Step::Time));
    assert!(wizard
        .availability(two_days_out())
        .slots()
        .contains(&TimeSlot::Morning));
}

#[tokio::test]
async fn test_short_slot_reopens_quantity_and_caps_it() {
    let (mut wizard, _) = setup();
    complete(&mut wizard);
    wizard.reopen(Step::Quantity).unwrap();
    wizard.set_quantity(3).unwrap();
    for _ in 0..2 {
        wizard.confirm_active().unwrap();
    }
    let errors = vec![
        FieldError::new(Field::Quantity, "Only 1 cakes left at this pickup time")
            .with_code(FieldErrorCode::LimitedCapacity { remaining: 1 }),
    ];
    let placement = ScriptedPlacement::answering(vec![
        Err(PlacementError::Validation(errors.clone())),
        Ok(OrderId(3)),
    ]);

    let outcome = submit(&mut wizard, &placement).await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            errors,
            reopened: Step::Quantity
        }
    );
    assert_eq!(wizard.status(Step::Time), StepStatus::Complete);
    assert!(wizard
        .availability(two_days_out())
        .slots()
        .contains(&TimeSlot::Morning));

    let err = wizard.set_quantity(2).unwrap_err();
    assert_eq!(err.field_errors()[0].field, Field::Quantity);
    assert_eq!(wizard.active_step(), Some(Step::Quantity));

    wizard.set_quantity(1).unwrap();
    for _ in 0..2 {
        wizard.confirm_active().unwrap();
    }
    let retry = submit(&mut wizard, &placement).await.unwrap();
    assert_eq!(retry.order_id(), Some(OrderId(3)));
}

#[tokio::test]
async fn test_rejection_reopens_earliest_affected_step() {
    let (mut wizard, _) = setup();
    complete(&mut wizard);
    let placement = ScriptedPlacement::answering(vec![Err(PlacementError::Validation(vec![
        FieldError::new(Field::Email, "Mailbox does not exist"),
        FieldError::new(Field::Quantity, "Choose fewer cakes"),
    ]))]);

    let outcome = submit(&mut wizard, &placement).await.unwrap();

    assert!(matches!(
        outcome,
        SubmitOutcome::Rejected {
            reopened: Step::Quantity,
            ..
        }
    ));
    assert_eq!(wizard.status(Step::Option), StepStatus::Complete);
    assert_eq!(wizard.status(Step::Contact), StepStatus::Pending);
}

#[tokio::test]
async fn test_slot_expiring_before_submit_reopens_time() {
    let (mut wizard, clock) = setup();
    wizard
        .select_date(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap())
        .unwrap();
    wizard.select_time(TimeSlot::Afternoon).unwrap();
    wizard.select_option(CrustOption::Classic).unwrap();
    wizard.set_quantity(1).unwrap();
    wizard.confirm_active().unwrap();
    wizard.set_contact(contact()).unwrap();
    let placement = ScriptedPlacement::default();

    // Afternoon tomorrow is 30h out. After 7 hours only the evening slot
    // still clears the lead time.
    clock.advance(Duration::hours(7));
    let err = submit(&mut wizard, &placement).await.unwrap_err();

    assert_eq!(err.field_errors()[0].field, Field::TimeSlot);
    assert_eq!(wizard.active_step(), Some(Step::Time));
    assert!(placement.requests().is_empty());
    assert!(!wizard.is_submitting());
    wizard.select_time(TimeSlot::Evening).unwrap();
}

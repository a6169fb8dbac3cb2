//! The in-progress, unsubmitted selections for one cake order.

use super::{AddOn, CrustOption, TimeSlot};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use validator::ValidateEmail;

/// Names of the user-editable fields, shared by inline and server-side errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Date,
    TimeSlot,
    Option,
    Quantity,
    AddOns,
    GiftMessage,
    Name,
    Email,
    Phone,
    /// Not user-editable; the product went away or its price changed.
    Product,
    /// Not user-editable; the submitted total disagrees with the server.
    Total,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Date => "date",
            Field::TimeSlot => "time_slot",
            Field::Option => "option",
            Field::Quantity => "quantity",
            Field::AddOns => "add_ons",
            Field::GiftMessage => "gift_message",
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Product => "product",
            Field::Total => "total",
        };
        f.write_str(name)
    }
}

/// Why a field was refused, for callers that must act on more than the
/// message text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldErrorCode {
    #[default]
    Invalid,
    /// The pickup slot has no capacity left.
    SoldOut,
    /// The pickup slot has room, but for fewer cakes than requested.
    LimitedCapacity { remaining: u32 },
}

/// A validation failure attached to one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    #[serde(default)]
    pub code: FieldErrorCode,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            code: FieldErrorCode::Invalid,
            message: message.into(),
        }
    }

    pub fn with_code(mut self, code: FieldErrorCode) -> Self {
        self.code = code;
        self
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Contact details for pickup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Phone numbers are accepted with spaces, dashes, dots, parentheses and a
/// leading `+`, as long as 10 to 15 digits remain.
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=15;

impl ContactInfo {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Returns every problem at once so the form can mark all bad fields.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::new(Field::Name, "Name is required"));
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FieldError::new(Field::Email, "Email is required"));
        } else if !email.validate_email() {
            errors.push(FieldError::new(Field::Email, "Enter a valid email address"));
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            errors.push(FieldError::new(Field::Phone, "Phone number is required"));
        } else {
            let allowed = phone
                .chars()
                .enumerate()
                .all(|(i, c)| c.is_ascii_digit() || " -.()".contains(c) || (c == '+' && i == 0));
            let digits = phone.chars().filter(char::is_ascii_digit).count();
            if !allowed || !PHONE_DIGITS.contains(&digits) {
                errors.push(FieldError::new(Field::Phone, "Enter a valid phone number"));
            }
        }

        errors
    }
}

/// Everything the customer has picked so far.
///
/// Owned exclusively by the [`Wizard`](crate::wizard::Wizard); it only changes
/// through wizard operations and is thrown away after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub date: Option<NaiveDate>,
    pub time_slot: Option<TimeSlot>,
    pub option: Option<CrustOption>,
    pub quantity: u32,
    pub add_ons: BTreeSet<AddOn>,
    pub gift_message: Option<String>,
    pub contact: ContactInfo,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            date: None,
            time_slot: None,
            option: None,
            quantity: 1,
            add_ons: BTreeSet::new(),
            gift_message: None,
            contact: ContactInfo::default(),
        }
    }
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(errors: &[FieldError]) -> Vec<Field> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_valid_contact_passes() {
        let contact = ContactInfo::new("Ana Souza", "ana@example.com", "(555) 123-4567");
        assert!(contact.validate().is_empty());
    }

    #[test]
    fn test_empty_contact_reports_every_field() {
        let errors = ContactInfo::default().validate();
        assert_eq!(fields(&errors), vec![Field::Name, Field::Email, Field::Phone]);
    }

    #[test]
    fn test_bad_email_and_short_phone() {
        let contact = ContactInfo::new("Ana", "ana-at-example", "555-1234");
        let errors = contact.validate();
        assert_eq!(fields(&errors), vec![Field::Email, Field::Phone]);
    }

    #[test]
    fn test_phone_accepts_international_prefix_only_at_start() {
        assert!(ContactInfo::new("Ana", "a@b.co", "+55 11 91234 5678")
            .validate()
            .is_empty());
        assert_eq!(
            fields(&ContactInfo::new("Ana", "a@b.co", "11+912345678").validate()),
            vec![Field::Phone]
        );
    }

    #[test]
    fn test_new_draft_defaults_to_one_cake() {
        let draft = OrderDraft::new();
        assert_eq!(draft.quantity, 1);
        assert!(draft.date.is_none());
        assert!(draft.add_ons.is_empty());
    }

    #[test]
    fn test_error_code_on_the_wire() {
        let error = FieldError::new(Field::Quantity, "Only 1 cake left")
            .with_code(FieldErrorCode::LimitedCapacity { remaining: 1 });
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["code"]["kind"], "limited_capacity");
        assert_eq!(json["code"]["remaining"], 1);

        let plain: FieldError =
            serde_json::from_str(r#"{"field":"email","message":"Enter a valid email address"}"#)
                .unwrap();
        assert_eq!(plain.code, FieldErrorCode::Invalid);
    }
}

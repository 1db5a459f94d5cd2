//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! normalized/validated email, known status values) so that once a value
//! reaches the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
    /// Monetary amount or quantity could not be parsed or was out of range.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// Status string is not one of the known values.
    #[error("unknown status: {0}")]
    UnknownStatus(String),
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(UserId, "Identifier of the profile owning a record.");
id_newtype!(CustomerId, "Unique identifier for a customer.");
id_newtype!(LeadId, "Unique identifier for a lead.");
id_newtype!(SiteVisitId, "Unique identifier for a site visit.");
id_newtype!(EstimateId, "Unique identifier for an estimate.");
id_newtype!(EstimateItemId, "Unique identifier for an estimate line item.");
id_newtype!(JobId, "Unique identifier for a job.");
id_newtype!(MaterialId, "Unique identifier for a job material.");
id_newtype!(InvoiceId, "Unique identifier for an invoice.");
id_newtype!(PaymentId, "Unique identifier for a payment.");

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(CustomerName, "Customer name wrapper enforcing non-empty values.");
non_empty_string_newtype!(ProjectName, "Lead project name enforcing non-empty values.");
non_empty_string_newtype!(
    DocumentNumber,
    "Estimate, job or invoice number enforcing trimmed, non-empty values."
);
impl DocumentNumber {
    /// Next number in a `<prefix>-NNN` sequence given how many documents exist.
    pub fn suggest(prefix: &str, existing: usize) -> String {
        format!("{prefix}-{:03}", existing + 1)
    }
}

non_empty_string_newtype!(MaterialName, "Material name enforcing non-empty values.");
non_empty_string_newtype!(
    ItemDescription,
    "Estimate line item description enforcing non-empty values."
);

/// Free-form text sanitized of markup, e.g. notes and descriptions.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Notes(String);

impl Notes {
    /// Sanitizes and trims the value, returning `None` when nothing is left.
    pub fn parse<S: Into<String>>(value: S) -> Option<Self> {
        let sanitized = ammonia::clean(&value.into());
        NonEmptyString::new(sanitized)
            .ok()
            .map(|inner| Self(inner.into_inner()))
    }

    /// Borrow the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Notes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Loosely validated phone number kept as entered (trimmed).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Accepts digits, spaces and the usual `+-().` punctuation with at least
    /// seven digits.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = NonEmptyString::new(value)?.into_inner();
        let allowed = value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.'));
        let digits = value.chars().filter(char::is_ascii_digit).count();
        if !allowed || digits < 7 {
            return Err(TypeConstraintError::InvalidPhone);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for PhoneNumber {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Converts an optional raw string into a trimmed `Option<String>`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Selectable option rendered in templates.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Closed set of string-backed values such as statuses.
pub trait Choice: Copy + Eq + std::hash::Hash + 'static {
    /// Every value in display order.
    fn all() -> &'static [Self];
    /// Database representation.
    fn value(self) -> &'static str;
    /// Human readable label.
    fn label_text(self) -> &'static str;
}

/// Macro generating string-backed enums stored as snake_case text columns.
macro_rules! string_enum {
    ($name:ident, $doc:expr, { $($variant:ident => ($value:literal, $label:literal)),+ $(,)? }) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant in pipeline order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Database representation.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            /// Human readable label.
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            /// Options for `<select>` elements.
            pub fn options() -> Vec<ChoiceOption> {
                Self::ALL
                    .iter()
                    .map(|v| ChoiceOption {
                        value: v.as_str(),
                        label: v.label(),
                    })
                    .collect()
            }
        }

        impl Choice for $name {
            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn value(self) -> &'static str {
                self.as_str()
            }

            fn label_text(self) -> &'static str {
                self.label()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($value => Ok(Self::$variant),)+
                    other => Err(TypeConstraintError::UnknownStatus(other.to_string())),
                }
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

string_enum!(LeadStatus, "Position of a lead in the sales pipeline.", {
    New => ("new", "New"),
    Contacted => ("contacted", "Contacted"),
    Qualified => ("qualified", "Qualified"),
    EstimateSent => ("estimate_sent", "Estimate Sent"),
    Won => ("won", "Won"),
    Lost => ("lost", "Lost"),
});

impl LeadStatus {
    /// Statuses counted as active on the dashboard.
    pub const ACTIVE: &'static [Self] = &[
        Self::New,
        Self::Contacted,
        Self::Qualified,
        Self::EstimateSent,
    ];

    pub fn is_active(self) -> bool {
        Self::ACTIVE.contains(&self)
    }
}

impl Default for LeadStatus {
    fn default() -> Self {
        Self::New
    }
}

string_enum!(EstimateStatus, "Lifecycle of an estimate.", {
    Draft => ("draft", "Draft"),
    Sent => ("sent", "Sent"),
    Accepted => ("accepted", "Accepted"),
    Rejected => ("rejected", "Rejected"),
});

impl Default for EstimateStatus {
    fn default() -> Self {
        Self::Draft
    }
}

string_enum!(JobStatus, "Lifecycle of a job.", {
    Scheduled => ("scheduled", "Scheduled"),
    InProgress => ("in_progress", "In Progress"),
    Completed => ("completed", "Completed"),
    OnHold => ("on_hold", "On Hold"),
    Cancelled => ("cancelled", "Cancelled"),
});

impl Default for JobStatus {
    fn default() -> Self {
        Self::Scheduled
    }
}

string_enum!(InvoiceStatus, "Lifecycle of an invoice.", {
    Draft => ("draft", "Draft"),
    Sent => ("sent", "Sent"),
    Paid => ("paid", "Paid"),
    Overdue => ("overdue", "Overdue"),
    Cancelled => ("cancelled", "Cancelled"),
});

impl InvoiceStatus {
    /// Invoices awaiting payment.
    pub const PENDING: &'static [Self] = &[Self::Sent, Self::Overdue];
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        Self::Draft
    }
}

string_enum!(PaymentMethod, "How a payment was made.", {
    Cash => ("cash", "Cash"),
    Check => ("check", "Check"),
    CreditCard => ("credit_card", "Credit Card"),
    BankTransfer => ("bank_transfer", "Bank Transfer"),
    Other => ("other", "Other"),
});

impl Default for PaymentMethod {
    fn default() -> Self {
        Self::BankTransfer
    }
}

string_enum!(ProfileRole, "Role recorded on a user profile.", {
    Admin => ("admin", "Admin"),
    Manager => ("manager", "Manager"),
    Estimator => ("estimator", "Estimator"),
    Customer => ("customer", "Customer"),
});

impl Default for ProfileRole {
    fn default() -> Self {
        Self::Customer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_positive() {
        assert_eq!(CustomerId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(LeadId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(JobId::new(7).map(JobId::get), Ok(7));
    }

    #[test]
    fn document_numbers_are_zero_padded() {
        assert_eq!(DocumentNumber::suggest("EST", 0), "EST-001");
        assert_eq!(DocumentNumber::suggest("INV", 41), "INV-042");
        assert_eq!(DocumentNumber::suggest("JOB", 1234), "JOB-1235");
    }

    #[test]
    fn email_is_normalized() {
        let email = Email::new("  John@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "john@example.com");
        assert_eq!(Email::new("not-an-email"), Err(TypeConstraintError::InvalidEmail));
    }

    #[test]
    fn names_are_trimmed_and_non_empty() {
        assert_eq!(ProjectName::new("  Kitchen ").unwrap().as_str(), "Kitchen");
        assert_eq!(
            CustomerName::new("   "),
            Err(TypeConstraintError::EmptyString)
        );
    }

    #[test]
    fn notes_are_sanitized() {
        let notes = Notes::parse("<script>alert(1)</script>Call after 5pm").unwrap();
        assert_eq!(notes.as_str(), "Call after 5pm");
        assert!(Notes::parse("   ").is_none());
    }

    #[test]
    fn phone_numbers_require_digits() {
        assert!(PhoneNumber::new("(555) 123-4567").is_ok());
        assert_eq!(
            PhoneNumber::new("call me"),
            Err(TypeConstraintError::InvalidPhone)
        );
        assert_eq!(PhoneNumber::new("123"), Err(TypeConstraintError::InvalidPhone));
    }

    #[test]
    fn statuses_round_trip_through_database_values() {
        for status in JobStatus::ALL {
            assert_eq!(status.as_str().parse::<JobStatus>().unwrap(), *status);
        }
        assert_eq!(
            "estimate_sent".parse::<LeadStatus>().unwrap(),
            LeadStatus::EstimateSent
        );
        assert!(matches!(
            "archived".parse::<InvoiceStatus>(),
            Err(TypeConstraintError::UnknownStatus(_))
        ));
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let json = serde_json::to_string(&PaymentMethod::BankTransfer).unwrap();
        assert_eq!(json, "\"bank_transfer\"");
    }

    #[test]
    fn active_lead_statuses() {
        assert!(LeadStatus::Qualified.is_active());
        assert!(!LeadStatus::Won.is_active());
        assert!(!LeadStatus::Lost.is_active());
    }
}

//! Form definitions backing the HTML routes.
//!
//! Every form deserializes raw strings and converts into a typed payload via
//! `TryFrom`, so services only see validated domain values.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::money::{parse_money, parse_optional_money};

pub mod customers;
pub mod estimates;
pub mod invoices;
pub mod jobs;
pub mod leads;
pub mod materials;
pub mod payments;
pub mod settings;
pub mod site_visits;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid {0}")]
    InvalidId(&'static str),

    #[error("invalid {0}")]
    InvalidChoice(&'static str),

    #[error("{0} is required")]
    Required(&'static str),

    #[error("invalid amount in {0}")]
    InvalidAmount(&'static str),

    #[error("invalid date in {0}, expected YYYY-MM-DD")]
    InvalidDate(&'static str),

    #[error("invalid time, expected HH:MM")]
    InvalidTime,

    #[error("invalid csv file: {0}")]
    Csv(String),

    #[error("malformed form data: {0}")]
    Malformed(String),
}

/// Parses a required non-negative amount.
pub(crate) fn required_amount(raw: &str, field: &'static str) -> Result<Decimal, FormError> {
    if raw.trim().is_empty() {
        return Err(FormError::Required(field));
    }
    parse_money(raw).map_err(|_| FormError::InvalidAmount(field))
}

/// Parses an optional non-negative amount; blank input is `None`.
pub(crate) fn optional_amount(
    raw: &str,
    field: &'static str,
) -> Result<Option<Decimal>, FormError> {
    parse_optional_money(raw).map_err(|_| FormError::InvalidAmount(field))
}

/// Parses a required `YYYY-MM-DD` date.
pub(crate) fn required_date(raw: &str, field: &'static str) -> Result<NaiveDate, FormError> {
    optional_date(raw, field)?.ok_or(FormError::Required(field))
}

/// Parses an optional `YYYY-MM-DD` date; blank input is `None`.
pub(crate) fn optional_date(
    raw: &str,
    field: &'static str,
) -> Result<Option<NaiveDate>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| FormError::InvalidDate(field))
}

/// Parses an optional `HH:MM` time; blank input is `None`.
pub(crate) fn optional_time(raw: &str) -> Result<Option<NaiveTime>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map(Some)
        .map_err(|_| FormError::InvalidTime)
}

/// Parses a `<select>` value, falling back to `default` when blank.
pub(crate) fn choice_or<T: FromStr>(
    raw: &str,
    default: T,
    field: &'static str,
) -> Result<T, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default);
    }
    raw.parse().map_err(|_| FormError::InvalidChoice(field))
}

/// Trims the value, mapping blank input to `None`.
pub(crate) fn blank_to_none(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

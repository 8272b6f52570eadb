//! Field level checks shared by every write endpoint.
//!
//! Each check records its failure in a [`FieldErrors`] map instead of
//! returning early, so that a rejected request reports every bad field at once.
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::db::models::InvalidChoice;
use crate::db::models::publication::DATE_FORMAT;

/// Message for a missing field.
pub const REQUIRED: &str = "This field is required.";
/// Message for an empty or whitespace-only string.
pub const BLANK: &str = "This field may not be blank.";
/// Message for a malformed email address.
pub const INVALID_EMAIL: &str = "Enter a valid email address.";
/// Message for an attempt to change a primary key.
pub const IMMUTABLE: &str = "This field cannot be changed.";
/// Message for a malformed date.
pub const INVALID_DATE: &str =
    "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";
/// Message for a negative value where only non-negative ones are allowed.
pub const NEGATIVE: &str = "Ensure this value is greater than or equal to 0.";
/// Message for an explicit `null`.
pub const NULL: &str = "This field may not be null.";
/// Message for a text field sent as a boolean, array or object.
pub const INVALID_STRING: &str = "Not a valid string.";
/// Message for an integer field that does not hold an integer.
pub const INVALID_INTEGER: &str = "A valid integer is required.";

/// Maximum length of a stored email address.
pub const EMAIL_MAX_LENGTH: usize = 254;

/// Field name to list of messages, serialized as a JSON object.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Record a failure on `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// Errors with a single entry.
    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    /// Whether no failure has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` if nothing was recorded, otherwise the collected errors.
    ///
    /// # Errors
    /// Errors with `self` if any failure was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// One field of a request body, as sent.
///
/// Payload fields are read as raw JSON so that a value of the wrong type is
/// reported on its field instead of failing the whole body.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Field {
    /// The key is not in the body.
    #[default]
    Missing,
    /// The key is present with `null`.
    Null,
    /// Any other value.
    Given(Value),
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => Self::Null,
            value => Self::Given(value),
        })
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Self::Given(Value::from(value))
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Self::Given(Value::String(value))
    }
}

impl From<i64> for Field {
    fn from(value: i64) -> Self {
        Self::Given(Value::from(value))
    }
}

/// How an incoming write relates to the stored record.
#[derive(Debug)]
pub enum WriteMode<'rec, T> {
    /// New record: every field is required.
    Create,
    /// `PUT`: every mutable field is required, the key is fixed.
    Replace(&'rec T),
    /// `PATCH`: absent fields keep their stored value, the key is fixed.
    Patch(&'rec T),
}

impl<T> Clone for WriteMode<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for WriteMode<'_, T> {}

impl<'rec, T> WriteMode<'rec, T> {
    /// The stored record, if the write targets one.
    #[must_use]
    pub const fn existing(self) -> Option<&'rec T> {
        match self {
            Self::Create => None,
            Self::Replace(existing) | Self::Patch(existing) => Some(existing),
        }
    }

    /// The stored record whose values fill in absent fields. Only partial
    /// updates have one.
    #[must_use]
    pub const fn fallback(self) -> Option<&'rec T> {
        match self {
            Self::Create | Self::Replace(_) => None,
            Self::Patch(existing) => Some(existing),
        }
    }
}

lazy_static! {
    static ref EMAIL_RE: Regex = email_regex();
}

#[allow(clippy::expect_used)]
/// Local part, `@`, then a domain with at least one dot.
fn email_regex() -> Regex {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("Failed to compile regex!?!")
}

/// Whether `email` looks like a deliverable address.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Parse an ISO `YYYY-MM-DD` date.
///
/// # Errors
/// Errors if `value` is not a valid calendar date in that format.
pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
}

/// Fall back to the stored value of an absent field, or record `REQUIRED`.
fn absent<T>(errors: &mut FieldErrors, field: &str, fallback: Option<T>) -> Option<T> {
    if fallback.is_none() {
        errors.add(field, REQUIRED);
    }
    fallback
}

/// A body field after its JSON type is checked.
enum Read<T> {
    Absent,
    Rejected,
    Given(T),
}

/// Convert a present field, recording `NULL` or `invalid` when it cannot be.
fn read<T>(
    errors: &mut FieldErrors,
    field: &str,
    value: Field,
    convert: impl FnOnce(Value) -> Option<T>,
    invalid: &str,
) -> Read<T> {
    match value {
        Field::Missing => Read::Absent,
        Field::Null => {
            errors.add(field, NULL);
            Read::Rejected
        }
        Field::Given(given) => match convert(given) {
            Some(converted) => Read::Given(converted),
            None => {
                errors.add(field, invalid);
                Read::Rejected
            }
        },
    }
}

/// Strings as-is, numbers in their decimal form.
fn as_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Integral numbers, or strings holding one.
fn as_integer(value: Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Strings only.
fn as_string(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        _ => None,
    }
}

/// Check a string is not blank and fits `max_length` characters.
fn check_length(errors: &mut FieldErrors, field: &str, value: &str, max_length: usize) -> bool {
    if value.trim().is_empty() {
        errors.add(field, BLANK);
        return false;
    }
    if value.chars().count() > max_length {
        errors.add(
            field,
            format!("Ensure this field has no more than {max_length} characters."),
        );
        return false;
    }
    true
}

/// Primary key field. `existing` pins the value on updates.
pub fn primary_key(
    errors: &mut FieldErrors,
    field: &str,
    value: Field,
    existing: Option<&str>,
    max_length: usize,
) -> Option<String> {
    match (read(errors, field, value, as_text, INVALID_STRING), existing) {
        (Read::Rejected, _) => None,
        (Read::Given(given), Some(stored)) if given != stored => {
            errors.add(field, IMMUTABLE);
            None
        }
        (_, Some(stored)) => Some(stored.to_owned()),
        (Read::Given(given), None) => {
            check_length(errors, field, &given, max_length).then_some(given)
        }
        (Read::Absent, None) => absent(errors, field, None),
    }
}

/// Plain text field.
pub fn text(
    errors: &mut FieldErrors,
    field: &str,
    value: Field,
    fallback: Option<&str>,
    max_length: usize,
) -> Option<String> {
    match read(errors, field, value, as_text, INVALID_STRING) {
        Read::Given(given) => check_length(errors, field, &given, max_length).then_some(given),
        Read::Absent => absent(errors, field, fallback.map(str::to_owned)),
        Read::Rejected => None,
    }
}

/// Email field.
pub fn email(
    errors: &mut FieldErrors,
    field: &str,
    value: Field,
    fallback: Option<&str>,
) -> Option<String> {
    match read(errors, field, value, as_text, INVALID_STRING) {
        Read::Given(given) => {
            if !check_length(errors, field, &given, EMAIL_MAX_LENGTH) {
                return None;
            }
            if !is_valid_email(&given) {
                errors.add(field, INVALID_EMAIL);
                return None;
            }
            Some(given)
        }
        Read::Absent => absent(errors, field, fallback.map(str::to_owned)),
        Read::Rejected => None,
    }
}

/// Field restricted to the codes of an enumerated set.
pub fn choice<C: FromStr<Err = InvalidChoice>>(
    errors: &mut FieldErrors,
    field: &str,
    value: Field,
    fallback: Option<C>,
) -> Option<C> {
    // A non-string value is reported as an unknown code in its JSON form.
    let code = |given: Value| match given {
        Value::String(code) => Some(code),
        other => Some(other.to_string()),
    };
    match read(errors, field, value, code, INVALID_STRING) {
        Read::Given(code) => code
            .parse::<C>()
            .map_err(|err| errors.add(field, err.to_string()))
            .ok(),
        Read::Absent => absent(errors, field, fallback),
        Read::Rejected => None,
    }
}

/// Integer field that must not be negative.
pub fn non_negative(
    errors: &mut FieldErrors,
    field: &str,
    value: Field,
    fallback: Option<i64>,
) -> Option<i64> {
    match read(errors, field, value, as_integer, INVALID_INTEGER) {
        Read::Given(number) if number < 0 => {
            errors.add(field, NEGATIVE);
            None
        }
        Read::Given(number) => Some(number),
        Read::Absent => absent(errors, field, fallback),
        Read::Rejected => None,
    }
}

/// ISO date field.
pub fn date(
    errors: &mut FieldErrors,
    field: &str,
    value: Field,
    fallback: Option<NaiveDate>,
) -> Option<NaiveDate> {
    match read(errors, field, value, as_string, INVALID_DATE) {
        Read::Given(given) => parse_date(&given)
            .map_err(|_| errors.add(field, INVALID_DATE))
            .ok(),
        Read::Absent => absent(errors, field, fallback),
        Read::Rejected => None,
    }
}

use std::collections::BTreeMap;

use api_types::{Money, entry::DESCRIPTION_MAX_CHARS};
use chrono::NaiveDate;

use crate::app::form::Draft;

pub const DATE_REQUIRED: &str = "date is required";
pub const DATE_INVALID: &str = "date must be a valid YYYY-MM-DD date";
pub const DESCRIPTION_TOO_LONG: &str = "description exceeds 200 characters";
pub const AMOUNT_INVALID: &str = "amount must be a positive number greater than zero";
pub const AMOUNT_BELOW_CENT: &str = "amount must be at least 0.01";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Date,
    Description,
    Amount,
}

/// Field-level validation messages; empty when the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn insert(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Checks every rule independently and reports all violations.
pub fn validate(draft: &Draft) -> FieldErrors {
    let mut errors = FieldErrors::default();

    let date = draft.date.trim();
    if date.is_empty() {
        errors.insert(Field::Date, DATE_REQUIRED);
    } else if parse_date(date).is_none() {
        errors.insert(Field::Date, DATE_INVALID);
    }

    if draft.description.chars().count() > DESCRIPTION_MAX_CHARS {
        errors.insert(Field::Description, DESCRIPTION_TOO_LONG);
    }

    match draft.amount.parse::<Money>() {
        Ok(amount) if amount.is_positive() => {}
        Ok(amount) if amount == Money::ZERO && is_positive_number(&draft.amount) => {
            errors.insert(Field::Amount, AMOUNT_BELOW_CENT);
        }
        _ => errors.insert(Field::Amount, AMOUNT_INVALID),
    }

    errors
}

/// Positive amounts that still round to zero cents, e.g. `0.001`.
fn is_positive_number(raw: &str) -> bool {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .is_ok_and(|value| value > 0.0)
}

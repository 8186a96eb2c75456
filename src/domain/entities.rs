use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::infrastructure::config::{
    DEFAULT_DELIVERY_METHOD, DEFAULT_INVOICE_DUE_DATE, DEFAULT_INVOICE_TITLE,
};

/// An amount in the smallest denomination of `currency` (pence for GBP).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Money {
    pub amount: i64,
    pub currency: String,
}

impl Money {
    pub fn new(amount: i64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationType {
    MOBILE,
    PHYSICAL,
}

impl FromStr for LocationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MOBILE" => Ok(LocationType::MOBILE),
            "PHYSICAL" => Ok(LocationType::PHYSICAL),
            other => Err(format!("unknown location type {other}, expected MOBILE or PHYSICAL")),
        }
    }
}

/// The writable fields of a seller location, as sent in `{"location": {...}}`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LocationDetails {
    pub name: String,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    pub description: String,
    /// Without the leading `@`.
    pub instagram_username: String,
}

/// One entry of the `errors` array Square returns on failure.
///
/// The well-known fields are typed for convenience; anything else the remote
/// sends is kept in `extra` so the descriptor can be surfaced unchanged.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct ErrorDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ErrorDescriptor {
    /// A descriptor for a failure detected on this side of the wire.
    pub fn local(category: &str, code: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            category: Some(category.to_string()),
            code: Some(code.into()),
            detail,
            ..Self::default()
        }
    }
}

/// Result of a single round trip: the payload, or the remote's error list.
///
/// The error list is never empty.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T = Value> {
    Success(T),
    Error(Vec<ErrorDescriptor>),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    pub fn errors(&self) -> &[ErrorDescriptor] {
        match self {
            Outcome::Success(_) => &[],
            Outcome::Error(errors) => errors,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Error(errors) => Outcome::Error(errors),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Outcome::Success(value) => f(value),
            Outcome::Error(errors) => Outcome::Error(errors),
        }
    }

    pub fn into_result(self) -> Result<T, Vec<ErrorDescriptor>> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Error(errors) => Err(errors),
        }
    }
}

/// The three merchant fields the lookup reports.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MerchantSummary {
    pub business_name: String,
    pub country: String,
    pub language_code: String,
}

impl fmt::Display for MerchantSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name of business: {}\nMerchant Country: {}\nMerchant Language: {}",
            self.business_name, self.country, self.language_code
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceOptions {
    pub title: String,
    pub due_date: NaiveDate,
    pub delivery_method: String,
}

impl Default for InvoiceOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_INVOICE_TITLE.to_string(),
            due_date: *DEFAULT_INVOICE_DUE_DATE,
            delivery_method: DEFAULT_DELIVERY_METHOD.to_string(),
        }
    }
}

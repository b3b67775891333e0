//! Loosely-typed request scalars.
//!
//! The admin frontend sends ids and numbers either as JSON numbers or as
//! strings straight from form inputs, and lists either as arrays or as
//! comma-separated text. These types accept both and normalise them.

use chrono::NaiveDate;
use serde::Deserialize;

use super::ValidationError;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Numeric {
    Int(i64),
    Text(String),
}

impl Numeric {
    pub fn to_i64(&self, field: &'static str) -> Result<i64, ValidationError> {
        match self {
            Numeric::Int(n) => Ok(*n),
            Numeric::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Err(ValidationError::Missing { field });
                }
                s.parse().map_err(|_| ValidationError::InvalidFormat {
                    field,
                    reason: "must be an integer",
                })
            }
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            Numeric::Int(n) => n.to_string(),
            Numeric::Text(s) => s.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ListInput {
    Items(Vec<Numeric>),
    Joined(String),
}

impl ListInput {
    pub fn into_items(self) -> Vec<String> {
        match self {
            ListInput::Items(items) => items
                .iter()
                .map(Numeric::to_text)
                .filter(|s| !s.is_empty())
                .collect(),
            ListInput::Joined(text) => split_list(&text),
        }
    }
}

/// Splits a comma-joined column into its trimmed, non-empty elements.
pub fn split_list(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joins list items for storage. Commas inside items are dropped so the
/// stored value splits back into the same elements.
pub fn join_list(items: &[String]) -> String {
    items
        .iter()
        .map(|s| s.replace(',', " ").trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::Missing { field }),
    }
}

pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn required_id(value: Option<&Numeric>, field: &'static str) -> Result<i64, ValidationError> {
    value
        .ok_or(ValidationError::Missing { field })?
        .to_i64(field)
}

pub fn parse_date(value: &str, field: &'static str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidFormat {
        field,
        reason: "expected a YYYY-MM-DD date",
    })
}

pub fn required_date(value: Option<String>, field: &'static str) -> Result<NaiveDate, ValidationError> {
    let raw = required(value, field)?;
    parse_date(&raw, field)
}

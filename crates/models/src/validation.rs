//! Structural input rules shared by every entity.
//!
//! Rule functions return `Result<(), Violation>`; a [`Validator`] collects
//! violations under field names so callers get every failing field at once.
//! Nothing here touches storage.

use std::fmt;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::patch::Patch;

/// Earliest accepted founding year.
pub const MIN_FOUNDED_YEAR: i32 = 1900;

/// A single failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub rule: String,
    pub message: String,
}

/// Every field that failed validation for one payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: &str, violation: Violation) -> Self {
        Self(vec![violation.at(field)])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.field.as_str())
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn rule_for(&self, field: &str) -> Option<&str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.rule.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed")?;
        for (i, e) in self.0.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{} {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A broken rule, not yet attached to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule: &'static str,
    pub message: String,
}

impl Violation {
    fn new(rule: &'static str, message: impl Into<String>) -> Self {
        Self { rule, message: message.into() }
    }

    pub fn at(self, field: &str) -> FieldError {
        FieldError { field: field.to_string(), rule: self.rule.to_string(), message: self.message }
    }
}

/// Collects violations across the fields of one payload.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self { Self::default() }

    pub fn check(&mut self, field: &str, result: Result<(), Violation>) -> &mut Self {
        if let Err(v) = result {
            self.errors.push(v.at(field));
        }
        self
    }

    /// Every item must be non-empty; failures are reported as `field[i]`.
    pub fn check_items(&mut self, field: &str, items: &[String]) -> &mut Self {
        for (i, item) in items.iter().enumerate() {
            if let Err(v) = item_required(item) {
                self.errors.push(v.at(&format!("{field}[{i}]")));
            }
        }
        self
    }

    /// Partial-update fields that may be omitted but never cleared.
    pub fn check_not_null<T>(&mut self, field: &str, patch: &Patch<T>) -> &mut Self {
        if patch.is_null() {
            self.errors.push(Violation::new("not_null", "must not be null").at(field));
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() { Ok(()) } else { Err(ValidationErrors(self.errors)) }
    }
}

pub fn required(value: &str) -> Result<(), Violation> {
    if value.is_empty() {
        return Err(Violation::new("required", "is required"));
    }
    Ok(())
}

fn item_required(value: &str) -> Result<(), Violation> {
    if value.is_empty() {
        return Err(Violation::new("item_required", "must not be empty"));
    }
    Ok(())
}

/// Length in characters, not bytes.
pub fn min_length(value: &str, min: usize) -> Result<(), Violation> {
    if value.chars().count() < min {
        return Err(Violation::new("min_length", format!("must be at least {min} characters")));
    }
    Ok(())
}

pub fn slug(value: &str) -> Result<(), Violation> {
    let ok = !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    if !ok {
        return Err(Violation::new(
            "slug",
            "must contain only lowercase letters, numbers, and hyphens",
        ));
    }
    Ok(())
}

pub fn email(value: &str) -> Result<(), Violation> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(Violation::new("email", "must be a valid email address"))
    }
}

pub fn year_range(year: i32, min: i32, max: i32) -> Result<(), Violation> {
    if year < min || year > max {
        return Err(Violation::new("range", format!("must be between {min} and {max}")));
    }
    Ok(())
}

/// `1900..=current UTC year`.
pub fn founded_year(year: i32) -> Result<(), Violation> {
    year_range(year, MIN_FOUNDED_YEAR, Utc::now().year())
}

pub fn one_of(value: &str, allowed: &[&str]) -> Result<(), Violation> {
    if !allowed.contains(&value) {
        return Err(not_one_of(allowed));
    }
    Ok(())
}

pub fn not_one_of(allowed: &[&str]) -> Violation {
    Violation::new("one_of", format!("must be one of: {}", allowed.join(", ")))
}

/// `local@label.label`, with a letters-only TLD of at least two characters.
/// The local part may not end in `.` or `'`.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else { return false };
    if domain.contains('@') {
        return false;
    }

    let local_ok = local.chars().last().is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-'))
        && !local.starts_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '\'' | '+' | '-' | '.'));
    if !local_ok {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, hosts)) = labels.split_last() else { return false };
    if hosts.is_empty() {
        return false;
    }
    let hosts_ok = hosts.iter().all(|l| {
        l.chars().next().is_some_and(|c| c.is_ascii_alphanumeric())
            && l.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    hosts_ok && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Optional free text on create: `""` means "no value". Whitespace is kept.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

//! Registration payload and validation.
//!
//! [`RegistrationInput`] is the untrusted form submission as it arrives over
//! HTTP: every field may be missing. [`validate`] checks it without side
//! effects and reports every failing field at once. A payload that passes is
//! turned into a [`Registration`], whose string fields are already trimmed so
//! nothing downstream has to trim again.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const FIRST_NAME_REQUIRED: &str = "First name is required";
pub const LAST_NAME_REQUIRED: &str = "Last name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email format";
pub const PHONE_REQUIRED: &str = "Phone is required";
pub const PHONE_INVALID: &str = "Phone must be numeric and 10-15 digits";

/// A phone number, once separators are stripped, must be 10-15 ASCII digits.
static PHONE_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10,15}$").expect("valid regex"));

/// An email domain must end in a top-level domain of two or more letters
/// (or a punycode `xn--` label).
static EMAIL_TLD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^.]\.(?:[A-Za-z]{2,63}|xn--[A-Za-z0-9-]{1,59})$").expect("valid regex")
});

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A registration as submitted by the form. All fields are untrusted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInput {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// A validated, trimmed registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub tags: Vec<String>,
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Whether `email` is syntactically a valid address.
///
/// Dotless domains such as `a@b` are rejected.
pub fn is_valid_email(email: &str) -> bool {
    email.validate_email()
        && email
            .rsplit_once('@')
            .is_some_and(|(_, domain)| EMAIL_TLD_RE.is_match(domain))
}

/// Whether `phone` reduces to 10-15 digits once whitespace, `-`, `(`, `)`
/// and `+` are removed.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits: String = phone
        .chars()
        .filter(|c| !(c.is_whitespace() || matches!(c, '-' | '(' | ')' | '+')))
        .collect();
    PHONE_DIGITS_RE.is_match(&digits)
}

/// Trimmed view of an optional field; `None` when missing or blank.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Validate a registration payload.
///
/// Checks run in a fixed order (first name, last name, email, phone) and do
/// not short-circuit: every failing check contributes its message.
pub fn validate(input: &RegistrationInput) -> ValidationReport {
    let mut errors = Vec::new();

    if present(input.first_name.as_deref()).is_none() {
        errors.push(FIRST_NAME_REQUIRED.to_string());
    }
    if present(input.last_name.as_deref()).is_none() {
        errors.push(LAST_NAME_REQUIRED.to_string());
    }

    match present(input.email.as_deref()) {
        None => errors.push(EMAIL_REQUIRED.to_string()),
        Some(email) if !is_valid_email(email) => errors.push(EMAIL_INVALID.to_string()),
        Some(_) => {}
    }

    match present(input.phone.as_deref()) {
        None => errors.push(PHONE_REQUIRED.to_string()),
        Some(phone) if !is_valid_phone(phone) => errors.push(PHONE_INVALID.to_string()),
        Some(_) => {}
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

impl RegistrationInput {
    /// Copy of this input with every string field trimmed.
    pub fn trimmed(&self) -> Self {
        let trim = |v: &Option<String>| v.as_deref().map(|s| s.trim().to_string());
        Self {
            first_name: trim(&self.first_name),
            last_name: trim(&self.last_name),
            email: trim(&self.email),
            phone: trim(&self.phone),
            tags: self.tags.clone(),
        }
    }

    /// Trim, validate and convert into a [`Registration`].
    ///
    /// Missing tags become an empty list.
    pub fn into_registration(self) -> Result<Registration, CoreError> {
        let input = self.trimmed();
        let report = validate(&input);
        if !report.valid {
            return Err(CoreError::Validation(report.errors));
        }

        Ok(Registration {
            first_name: input.first_name.unwrap_or_default(),
            last_name: input.last_name.unwrap_or_default(),
            email: input.email.unwrap_or_default(),
            phone: input.phone.unwrap_or_default(),
            tags: input.tags.unwrap_or_default(),
        })
    }
}

impl Registration {
    /// Display name sent to the provisioning platform.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

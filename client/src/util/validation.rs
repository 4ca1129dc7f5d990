//! Form validation run before any network call.
//!
//! Messages are shown inline verbatim.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::sync::LazyLock;

use regex::Regex;

pub const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email address";
pub const MSG_PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters long";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Validated login form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Validated signup form (confirmation already checked).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Loose email shape: some non-blank run, `@`, non-blank run, `.`, non-blank run.
static EMAIL: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+"));

/// Loose email shape check: some `x@y.z` run without whitespace.
pub fn looks_like_email(input: &str) -> bool {
    match &*EMAIL {
        Ok(pattern) => pattern.is_match(input),
        Err(e) => {
            leptos::logging::warn!("email pattern failed to compile: {e}");
            false
        }
    }
}

/// Check login inputs.
///
/// # Errors
///
/// Returns the inline message for the first failing rule.
pub fn validate_login(email: &str, password: &str) -> Result<LoginForm, &'static str> {
    if email.is_empty() || password.is_empty() {
        return Err(MSG_FILL_ALL_FIELDS);
    }
    if !looks_like_email(email) {
        return Err(MSG_INVALID_EMAIL);
    }
    Ok(LoginForm { email: email.to_owned(), password: password.to_owned() })
}

/// Check signup inputs.
///
/// # Errors
///
/// Returns the inline message for the first failing rule.
pub fn validate_signup(name: &str, email: &str, password: &str, confirm: &str) -> Result<SignupForm, &'static str> {
    if name.is_empty() || email.is_empty() || password.is_empty() || confirm.is_empty() {
        return Err(MSG_FILL_ALL_FIELDS);
    }
    if !looks_like_email(email) {
        return Err(MSG_INVALID_EMAIL);
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(MSG_PASSWORD_TOO_SHORT);
    }
    if password != confirm {
        return Err(MSG_PASSWORD_MISMATCH);
    }
    Ok(SignupForm { name: name.to_owned(), email: email.to_owned(), password: password.to_owned() })
}

/// Trimmed, non-empty name for create dialogs.
pub fn required_name(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

//! # Form Validation
//!
//! Field rules checked before anything is sent: required fields, email
//! shape and password length. A [`Report`] collects every problem in a form
//! rather than stopping at the first, so all of them can be shown at once.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Minimum length of a password on the sign-up and login forms.
pub const MIN_PASSWORD_LEN: usize = 6;
/// Minimum length when choosing a new password.
pub const MIN_NEW_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
    PasswordTooShort { min: usize },
    PasswordMismatch,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Required => write!(f, "This field is required"),
            FieldError::InvalidEmail => write!(f, "Please enter a valid email address"),
            FieldError::PasswordTooShort { min } => write!(f, "Password must be at least {min} characters"),
            FieldError::PasswordMismatch => write!(f, "Passwords do not match"),
        }
    }
}

impl std::error::Error for FieldError {}

fn email_re() -> Option<&'static Regex> {
    static EMAIL_RE: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

/// Non-blank after trimming.
pub fn required(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        Err(FieldError::Required)
    } else {
        Ok(())
    }
}

/// `local@domain.tld` with no whitespace. Empty passes; pair with [`required`].
pub fn email(value: &str) -> Result<(), FieldError> {
    if value.is_empty() || email_re().is_some_and(|re| re.is_match(value)) {
        Ok(())
    } else {
        Err(FieldError::InvalidEmail)
    }
}

/// At least [`MIN_PASSWORD_LEN`] characters. Empty passes; pair with [`required`].
pub fn password(value: &str) -> Result<(), FieldError> {
    min_chars(value, MIN_PASSWORD_LEN)
}

fn min_chars(value: &str, min: usize) -> Result<(), FieldError> {
    if value.is_empty() || value.chars().count() >= min {
        Ok(())
    } else {
        Err(FieldError::PasswordTooShort { min })
    }
}

/// The change-password rules: the confirmation matches, and the new password
/// has at least [`MIN_NEW_PASSWORD_LEN`] characters. Both may fail together.
pub fn new_password(new: &str, confirm: &str) -> Report {
    let mut report = Report::default();
    if new != confirm {
        report.push("confirm_password", FieldError::PasswordMismatch);
    }
    if new.chars().count() < MIN_NEW_PASSWORD_LEN {
        report.push("new_password", FieldError::PasswordTooShort { min: MIN_NEW_PASSWORD_LEN });
    }
    report
}

/// Problems found in one form, in the order they were checked.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Report {
    issues: Vec<(String, FieldError)>,
}

impl Report {
    pub fn check(&mut self, field: &str, result: Result<(), FieldError>) -> &mut Self {
        if let Err(e) = result {
            self.push(field, e);
        }
        self
    }

    fn push(&mut self, field: &str, error: FieldError) {
        self.issues.push((field.to_string(), error));
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[(String, FieldError)] {
        &self.issues
    }

    /// `"<field>: <message>"` per problem.
    pub fn lines(&self) -> Vec<String> {
        self.issues.iter().map(|(field, e)| format!("{field}: {e}")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("  \t"), Err(FieldError::Required));
        assert_eq!(required(""), Err(FieldError::Required));
        assert!(required(" 42 ").is_ok());
    }

    #[test]
    fn test_email_shape() {
        assert!(email("ada@example.org").is_ok());
        assert!(email("").is_ok());
        for bad in ["ada", "ada@example", "ada @example.org", "@example.org", "ada@@example.org", "ada@example."] {
            assert_eq!(email(bad), Err(FieldError::InvalidEmail), "{bad}");
        }
    }

    #[test]
    fn test_password_length() {
        assert_eq!(password("12345"), Err(FieldError::PasswordTooShort { min: 6 }));
        assert!(password("123456").is_ok());
        assert!(password("").is_ok());
        assert_eq!(
            FieldError::PasswordTooShort { min: 6 }.to_string(),
            "Password must be at least 6 characters"
        );
    }

    #[test]
    fn test_new_password_reports_both_problems() {
        let report = new_password("short", "shorter");
        assert_eq!(
            report.lines(),
            vec![
                "confirm_password: Passwords do not match",
                "new_password: Password must be at least 8 characters",
            ]
        );
        assert!(new_password("longenough", "longenough").is_valid());
    }

    #[test]
    fn test_report_collects_every_field() {
        let mut report = Report::default();
        report
            .check("username", required(""))
            .check("email", email("nope"))
            .check("password", password("abcdef"));
        assert!(!report.is_valid());
        assert_eq!(report.issues().len(), 2);
        assert_eq!(report.issues()[1], ("email".to_string(), FieldError::InvalidEmail));
    }
}

use std::fmt;

use serde::Serialize;

/// Maximum length for email input (RFC 5321 address limit).
const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// A credential field of the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Password => "password",
        }
    }
}

/// Email and password as entered in the login form.
/// Serializes to the `{ "email", "password" }` body the backend expects.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Return the first empty field, if any
    pub fn missing_field(&self) -> Option<Field> {
        if self.email.is_empty() {
            Some(Field::Email)
        } else if self.password.is_empty() {
            Some(Field::Password)
        } else {
            None
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing_field().is_none()
    }

    /// Reset both fields to empty
    pub fn clear(&mut self) {
        self.email.clear();
        self.password.clear();
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"********")
            .finish()
    }
}

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if an email character should be accepted
pub fn can_add_email_char(current_len: usize, c: char) -> bool {
    current_len < MAX_EMAIL_LENGTH && is_valid_input_char(c)
}

/// Check if a password character should be accepted
pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field() {
        assert_eq!(Credentials::default().missing_field(), Some(Field::Email));
        assert_eq!(Credentials::new("", "pw").missing_field(), Some(Field::Email));
        assert_eq!(Credentials::new("a@b.com", "").missing_field(), Some(Field::Password));
        assert_eq!(Credentials::new("a@b.com", "pw").missing_field(), None);
        assert!(Credentials::new("a@b.com", "pw").is_complete());
    }

    #[test]
    fn test_clear() {
        let mut creds = Credentials::new("a@b.com", "pw123");
        creds.clear();
        assert!(creds.email.is_empty());
        assert!(creds.password.is_empty());
    }

    #[test]
    fn test_debug_masks_password() {
        let creds = Credentials::new("a@b.com", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("a@b.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_serializes_wire_body() {
        let json = serde_json::to_value(Credentials::new("a@b.com", "pw123")).unwrap();
        assert_eq!(json, serde_json::json!({"email": "a@b.com", "password": "pw123"}));
    }

    #[test]
    fn test_can_add_email_char() {
        assert!(can_add_email_char(0, 'a'));
        assert!(can_add_email_char(253, '@'));
        // Exceeds max length
        assert!(!can_add_email_char(254, 'a'));
        // Control characters rejected
        assert!(!can_add_email_char(0, '\x00'));
        assert!(!can_add_email_char(0, '\n'));
        assert!(!can_add_email_char(0, '\t'));
    }

    #[test]
    fn test_can_add_password_char() {
        assert!(can_add_password_char(0, 'a'));
        assert!(can_add_password_char(127, '!'));
        assert!(!can_add_password_char(128, 'a'));
        assert!(!can_add_password_char(0, '\r'));
    }
}

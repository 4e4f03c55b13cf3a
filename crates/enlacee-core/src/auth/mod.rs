//! Authentication module for credentials, session tokens and cookies.
//!
//! This module provides:
//! - `Credentials`: the email/password pair owned by the login form
//! - `SessionToken`: the backend-issued token with a one hour lifetime
//! - `CookieStore`: where the token is persisted after login

pub mod cookies;
pub mod credentials;
pub mod session;

pub use cookies::{Cookie, CookieOptions, CookieStore, FileCookieStore, MemoryCookieStore};
pub use credentials::{can_add_email_char, can_add_password_char, Credentials, Field};
pub use session::{SessionToken, SESSION_COOKIE_NAME};

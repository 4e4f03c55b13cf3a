//! Enlacee client core.
//!
//! Credential submission and session establishment for the Enlacee
//! backend: validate the form, `POST /login` once, store the issued token
//! as the `ENLACEE_TOKEN` cookie and redirect to `/admin` after a short
//! delay. Rendering and toast presentation live in the front end, which
//! plugs in through [`notify::Notifier`] and [`navigation::Navigator`].

pub mod api;
pub mod auth;
pub mod config;
pub mod login;
pub mod navigation;
pub mod notify;
pub mod schedule;

pub use api::{ApiClient, ApiError};
pub use auth::{Cookie, CookieOptions, CookieStore, Credentials, SessionToken};
pub use config::Config;
pub use login::{LoginError, LoginForm, LoginSettings, SessionSubmitter};
pub use navigation::{Navigator, Route};
pub use notify::{Notice, NoticeLevel, Notifier};

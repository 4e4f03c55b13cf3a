//! The sign-in flow.
//!
//! - `form`: pure state-transition function for the login form
//! - `submitter`: validates, calls the backend and stores the session cookie
//! - `controller`: `LoginForm`, which runs transitions and their effects

pub mod controller;
pub mod error;
pub mod form;
pub mod submitter;

pub use controller::{LoginForm, LoginSettings};
pub use error::LoginError;
pub use form::{transition, Effect, FormEvent, FormState, Phase, Transition};
pub use submitter::{LoginOutcome, SessionSubmitter};

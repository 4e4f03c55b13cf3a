//! Login form state machine.
//!
//! `transition` is a pure function from the current state and an event to
//! the next state plus the side effects the caller must perform. Phases move
//! `Idle -> Submitting -> (Succeeded | Failed)`, and editing a field after an
//! outcome returns the form to `Idle`.

use crate::auth::{Credentials, SessionToken};
use crate::navigation::Route;
use crate::notify::Notice;

/// Warning shown when a field is left empty
pub const VALIDATION_MESSAGE: &str = "Fill all the details!!";

/// Notice shown after the session cookie is stored
pub const SUCCESS_MESSAGE: &str = "Login Successful!!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub credentials: Credentials,
    pub phase: Phase,
}

impl FormState {
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(email, ""),
            phase: Phase::Idle,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }
}

#[derive(Debug, Clone)]
pub enum FormEvent {
    EmailChanged(String),
    PasswordChanged(String),
    SubmitRequested,
    LoginSucceeded(SessionToken),
    /// The backend refused the credentials with this message
    LoginRejected(String),
    /// Network, parse or storage failure
    LoginErrored,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Notify(Notice),
    /// Send these credentials to the backend and feed back the outcome
    Authenticate(Credentials),
    ScheduleNavigation(Route),
}

#[derive(Debug)]
pub struct Transition {
    pub state: FormState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn quiet(state: FormState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }
}

pub fn transition(mut state: FormState, event: FormEvent) -> Transition {
    match event {
        // Only one submission in flight; edits wait for the outcome
        FormEvent::EmailChanged(_) | FormEvent::PasswordChanged(_) | FormEvent::SubmitRequested
            if state.is_submitting() =>
        {
            Transition::quiet(state)
        }

        FormEvent::EmailChanged(email) => {
            state.credentials.email = email;
            state.phase = Phase::Idle;
            Transition::quiet(state)
        }
        FormEvent::PasswordChanged(password) => {
            state.credentials.password = password;
            state.phase = Phase::Idle;
            Transition::quiet(state)
        }

        FormEvent::SubmitRequested => {
            if !state.credentials.is_complete() {
                state.phase = Phase::Idle;
                return Transition {
                    state,
                    effects: vec![Effect::Notify(Notice::warning(VALIDATION_MESSAGE))],
                };
            }
            state.phase = Phase::Submitting;
            let credentials = state.credentials.clone();
            Transition {
                state,
                effects: vec![Effect::Authenticate(credentials)],
            }
        }

        // Outcomes only count for a submission in flight
        FormEvent::LoginSucceeded(_) | FormEvent::LoginRejected(_) | FormEvent::LoginErrored
            if !state.is_submitting() =>
        {
            Transition::quiet(state)
        }

        FormEvent::LoginSucceeded(_) => {
            state.phase = Phase::Succeeded;
            Transition {
                state,
                effects: vec![
                    Effect::Notify(Notice::success(SUCCESS_MESSAGE)),
                    Effect::ScheduleNavigation(Route::Admin),
                ],
            }
        }
        FormEvent::LoginRejected(message) => {
            state.credentials.clear();
            state.phase = Phase::Failed;
            Transition {
                state,
                effects: vec![Effect::Notify(Notice::error(format!("{}!!", message)))],
            }
        }
        FormEvent::LoginErrored => {
            state.phase = Phase::Idle;
            Transition::quiet(state)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoticeLevel;

    fn filled() -> FormState {
        FormState {
            credentials: Credentials::new("a@b.com", "pw123"),
            phase: Phase::Idle,
        }
    }

    fn submitting() -> FormState {
        transition(filled(), FormEvent::SubmitRequested).state
    }

    #[test]
    fn test_edits_update_fields() {
        let t = transition(FormState::default(), FormEvent::EmailChanged("a@b.com".into()));
        let t = transition(t.state, FormEvent::PasswordChanged("pw".into()));
        assert_eq!(t.state.credentials, Credentials::new("a@b.com", "pw"));
        assert_eq!(t.state.phase, Phase::Idle);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_submit_with_empty_field_only_warns() {
        for state in [
            FormState::default(),
            FormState::with_email("a@b.com"),
            FormState {
                credentials: Credentials::new("", "pw123"),
                phase: Phase::Idle,
            },
        ] {
            let t = transition(state, FormEvent::SubmitRequested);
            assert_eq!(t.state.phase, Phase::Idle);
            assert_eq!(t.effects.len(), 1);
            match &t.effects[0] {
                Effect::Notify(notice) => {
                    assert_eq!(notice.level, NoticeLevel::Warning);
                    assert_eq!(notice.message, VALIDATION_MESSAGE);
                }
                other => panic!("unexpected effect: {other:?}"),
            }
        }
    }

    #[test]
    fn test_submit_requests_authentication() {
        let t = transition(filled(), FormEvent::SubmitRequested);
        assert_eq!(t.state.phase, Phase::Submitting);
        assert_eq!(
            t.effects,
            vec![Effect::Authenticate(Credentials::new("a@b.com", "pw123"))]
        );
    }

    #[test]
    fn test_submitting_ignores_edits_and_resubmits() {
        let state = submitting();
        let t = transition(state.clone(), FormEvent::SubmitRequested);
        assert_eq!(t.state, state);
        assert!(t.effects.is_empty());

        let t = transition(state.clone(), FormEvent::PasswordChanged("other".into()));
        assert_eq!(t.state.credentials.password, "pw123");
    }

    #[test]
    fn test_success_notifies_and_navigates() {
        let t = transition(submitting(), FormEvent::LoginSucceeded(SessionToken::issue("T")));
        assert_eq!(t.state.phase, Phase::Succeeded);
        assert_eq!(
            t.effects,
            vec![
                Effect::Notify(Notice::success(SUCCESS_MESSAGE)),
                Effect::ScheduleNavigation(Route::Admin),
            ]
        );
    }

    #[test]
    fn test_rejection_clears_fields_and_shows_message() {
        let t = transition(submitting(), FormEvent::LoginRejected("bad credentials".into()));
        assert_eq!(t.state.phase, Phase::Failed);
        assert_eq!(t.state.credentials, Credentials::default());
        assert_eq!(
            t.effects,
            vec![Effect::Notify(Notice::error("bad credentials!!"))]
        );
    }

    #[test]
    fn test_unexpected_error_keeps_fields_silently() {
        let t = transition(submitting(), FormEvent::LoginErrored);
        assert_eq!(t.state.phase, Phase::Idle);
        assert_eq!(t.state.credentials, Credentials::new("a@b.com", "pw123"));
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_stale_outcome_ignored() {
        let t = transition(filled(), FormEvent::LoginRejected("late".into()));
        assert_eq!(t.state, filled());
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_edit_after_failure_returns_to_idle() {
        let failed = transition(submitting(), FormEvent::LoginRejected("nope".into())).state;
        let t = transition(failed, FormEvent::EmailChanged("x@y.com".into()));
        assert_eq!(t.state.phase, Phase::Idle);
    }
}

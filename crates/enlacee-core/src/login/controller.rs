//! Runs login form transitions and performs their effects.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::auth::{Cookie, CookieStore, Credentials};
use crate::navigation::{Navigator, Route};
use crate::notify::Notifier;
use crate::schedule::DelayedTask;

use super::form::{transition, Effect, FormEvent, FormState, Phase, Transition};
use super::{LoginError, LoginOutcome, SessionSubmitter};

/// Delay before leaving the form after a successful login, so the success
/// notice stays visible.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct LoginSettings {
    pub redirect_delay: Duration,
}

impl Default for LoginSettings {
    fn default() -> Self {
        Self {
            redirect_delay: REDIRECT_DELAY,
        }
    }
}

/// A login form session.
///
/// Dropping the form cancels a pending redirect.
pub struct LoginForm<S: CookieStore> {
    state: FormState,
    submitter: SessionSubmitter<S>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    settings: LoginSettings,
    redirect: Option<DelayedTask>,
    last_outcome: Option<LoginOutcome>,
}

impl<S: CookieStore> LoginForm<S> {
    pub fn new(
        submitter: SessionSubmitter<S>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            state: FormState::default(),
            submitter,
            notifier,
            navigator,
            settings: LoginSettings::default(),
            redirect: None,
            last_outcome: None,
        }
    }

    pub fn with_settings(mut self, settings: LoginSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Pre-fill the email field
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.state = FormState::with_email(email);
        self
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn credentials(&self) -> &Credentials {
        &self.state.credentials
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Token and payload of the last successful login
    pub fn last_outcome(&self) -> Option<&LoginOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn session_cookie(&self) -> Option<Cookie> {
        self.submitter.session_cookie()
    }

    pub fn redirect_pending(&self) -> bool {
        self.redirect.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Cancel a scheduled redirect, if any
    pub fn cancel_redirect(&mut self) {
        if let Some(task) = self.redirect.take() {
            task.cancel();
        }
    }

    pub async fn set_email(&mut self, email: impl Into<String>) {
        self.dispatch(FormEvent::EmailChanged(email.into())).await;
    }

    pub async fn set_password(&mut self, password: impl Into<String>) {
        self.dispatch(FormEvent::PasswordChanged(password.into())).await;
    }

    pub async fn submit(&mut self) {
        self.dispatch(FormEvent::SubmitRequested).await;
    }

    /// Feed an event through the state machine and carry out its effects.
    /// Returns once any login request it triggers has completed.
    pub async fn dispatch(&mut self, event: FormEvent) {
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            let Transition { state, effects } = transition(std::mem::take(&mut self.state), event);
            self.state = state;

            for effect in effects {
                match effect {
                    Effect::Notify(notice) => self.notifier.notify(notice),
                    Effect::Authenticate(credentials) => {
                        let outcome = self.authenticate(&credentials).await;
                        queue.push_back(outcome);
                    }
                    Effect::ScheduleNavigation(route) => self.schedule_navigation(route),
                }
            }
        }
    }

    async fn authenticate(&mut self, credentials: &Credentials) -> FormEvent {
        match self.submitter.submit(credentials).await {
            Ok(outcome) => {
                let token = outcome.token.clone();
                self.last_outcome = Some(outcome);
                FormEvent::LoginSucceeded(token)
            }
            Err(LoginError::Auth(message)) => {
                warn!(email = %credentials.email, message = %message, "Login rejected");
                FormEvent::LoginRejected(message)
            }
            Err(e) => {
                error!(error = %e, "Login error");
                FormEvent::LoginErrored
            }
        }
    }

    fn schedule_navigation(&mut self, route: Route) {
        self.cancel_redirect();
        let delay = self.settings.redirect_delay;
        debug!(route = %route, delay = ?delay, "Scheduling redirect");

        let navigator = Arc::clone(&self.navigator);
        self.redirect = Some(DelayedTask::spawn(delay, move || {
            navigator.navigate(route);
        }));
    }
}

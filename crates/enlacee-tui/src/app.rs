//! Application state management for the Enlacee sign-in client.
//!
//! `App` owns the login form, the current screen and the visible toast.
//! Notices and redirects raised by the core arrive over channels and are
//! applied on the UI loop in `check_background_tasks`.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use enlacee_core::auth::{can_add_email_char, can_add_password_char, FileCookieStore, SessionToken};
use enlacee_core::login::Phase;
use enlacee_core::{
    ApiClient, Config, LoginForm, Navigator, Notice, Notifier, Route, SessionSubmitter,
};

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Email,
    Password,
    Button,
    Register,
}

impl LoginFocus {
    pub fn next(&self) -> Self {
        match self {
            LoginFocus::Email => LoginFocus::Password,
            LoginFocus::Password => LoginFocus::Button,
            LoginFocus::Button => LoginFocus::Register,
            LoginFocus::Register => LoginFocus::Email,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            LoginFocus::Email => LoginFocus::Register,
            LoginFocus::Password => LoginFocus::Email,
            LoginFocus::Button => LoginFocus::Password,
            LoginFocus::Register => LoginFocus::Button,
        }
    }
}

/// A notice currently on screen
#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    pub shown_at: Instant,
}

impl Toast {
    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= self.notice.auto_close
    }
}

/// Forwards core notices and redirects to the UI loop
struct UiBridge {
    notices: mpsc::UnboundedSender<Notice>,
    routes: mpsc::UnboundedSender<Route>,
}

impl Notifier for UiBridge {
    fn notify(&self, notice: Notice) {
        if self.notices.send(notice).is_err() {
            debug!("Notice dropped, UI loop gone");
        }
    }
}

impl Navigator for UiBridge {
    fn navigate(&self, route: Route) {
        if self.routes.send(route).is_err() {
            debug!(route = %route, "Navigation dropped, UI loop gone");
        }
    }
}

/// Main application state container
pub struct App {
    pub config: Config,
    pub backend_url: String,
    pub form: LoginForm<FileCookieStore>,

    pub screen: Route,
    pub focus: LoginFocus,
    pub toast: Option<Toast>,
    pub quitting: bool,

    notice_rx: mpsc::UnboundedReceiver<Notice>,
    route_rx: mpsc::UnboundedReceiver<Route>,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let backend_url = config.backend_url();
        debug!(backend_url = %backend_url, "Backend configured");

        // A damaged cookie file only costs the stored session
        let cookies = FileCookieStore::open_or_empty(config.cache_dir()?);
        let api = ApiClient::new(&backend_url)?;

        let (notice_tx, notice_rx) = mpsc::unbounded_channel();
        let (route_tx, route_rx) = mpsc::unbounded_channel();
        let bridge = Arc::new(UiBridge {
            notices: notice_tx,
            routes: route_tx,
        });

        let mut form = LoginForm::new(SessionSubmitter::new(api, cookies), bridge.clone(), bridge);
        if let Some(ref email) = config.last_email {
            form = form.with_email(email.clone());
        }

        let focus = if form.credentials().email.is_empty() {
            LoginFocus::Email
        } else {
            LoginFocus::Password
        };

        // Skip the form while the stored session is still valid
        let screen = if form.session_cookie().is_some() {
            info!("Existing session found");
            Route::Admin
        } else {
            Route::Login
        };

        Ok(Self {
            config,
            backend_url,
            form,
            screen,
            focus,
            toast: None,
            quitting: false,
            notice_rx,
            route_rx,
        })
    }

    /// Submit the form, remembering the email once the login succeeds
    pub async fn attempt_login(&mut self) {
        let email = self.form.credentials().email.clone();
        self.form.submit().await;

        match self.form.phase() {
            Phase::Succeeded => {
                self.config.last_email = Some(email);
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }
            }
            Phase::Failed => self.focus = LoginFocus::Email,
            Phase::Idle | Phase::Submitting => {}
        }
    }

    pub async fn push_char(&mut self, c: char) {
        match self.focus {
            LoginFocus::Email => {
                let email = &self.form.credentials().email;
                if can_add_email_char(email.chars().count(), c) {
                    let mut email = email.clone();
                    email.push(c);
                    self.form.set_email(email).await;
                }
            }
            LoginFocus::Password => {
                let password = &self.form.credentials().password;
                if can_add_password_char(password.chars().count(), c) {
                    let mut password = password.clone();
                    password.push(c);
                    self.form.set_password(password).await;
                }
            }
            LoginFocus::Button | LoginFocus::Register => {}
        }
    }

    pub async fn pop_char(&mut self) {
        match self.focus {
            LoginFocus::Email => {
                let mut email = self.form.credentials().email.clone();
                email.pop();
                self.form.set_email(email).await;
            }
            LoginFocus::Password => {
                let mut password = self.form.credentials().password.clone();
                password.pop();
                self.form.set_password(password).await;
            }
            LoginFocus::Button | LoginFocus::Register => {}
        }
    }

    pub fn navigate(&mut self, route: Route) {
        info!(from = %self.screen, to = %route, "Navigating");
        self.screen = route;
    }

    /// Minutes left on the stored session, if any
    pub fn session_minutes_left(&self) -> Option<i64> {
        self.form
            .session_cookie()
            .map(|c| SessionToken::from_cookie(&c).minutes_until_expiry())
    }

    /// Apply notices and redirects raised since the last frame
    pub fn check_background_tasks(&mut self) {
        while let Ok(notice) = self.notice_rx.try_recv() {
            self.toast = Some(Toast {
                notice,
                shown_at: Instant::now(),
            });
        }

        while let Ok(route) = self.route_rx.try_recv() {
            self.navigate(route);
        }

        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }

        // An expired session sends the user back to the form
        if self.screen == Route::Admin && self.form.session_cookie().is_none() {
            self.navigate(Route::Login);
        }
    }

    pub fn quit(&mut self) {
        self.form.cancel_redirect();
        self.quitting = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_login_focus_cycles() {
        assert_eq!(LoginFocus::Email.next(), LoginFocus::Password);
        assert_eq!(LoginFocus::Register.next(), LoginFocus::Email); // Wraps around
        assert_eq!(LoginFocus::Email.prev(), LoginFocus::Register);
        assert_eq!(LoginFocus::Button.prev(), LoginFocus::Password);
    }

    #[test]
    fn test_toast_expiry() {
        let mut notice = Notice::success("Login Successful!!");
        notice.auto_close = Duration::ZERO;
        let toast = Toast {
            notice,
            shown_at: Instant::now(),
        };
        assert!(toast.is_expired());

        let toast = Toast {
            notice: Notice::success("Login Successful!!"),
            shown_at: Instant::now(),
        };
        assert!(!toast.is_expired());
    }
}

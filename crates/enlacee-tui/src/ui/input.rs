//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! login form events and screen changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use enlacee_core::Route;

use crate::app::{App, LoginFocus};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.screen {
        Route::Login => handle_login_input(app, key).await,
        Route::Register => Ok(handle_register_input(app, key)),
        Route::Admin => Ok(handle_admin_input(app, key)),
    }
}

async fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.quit();
            return Ok(true);
        }
        KeyCode::Down | KeyCode::Tab => {
            app.focus = app.focus.next();
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.focus = app.focus.prev();
        }
        KeyCode::Enter => match app.focus {
            LoginFocus::Email => {
                app.focus = LoginFocus::Password;
            }
            LoginFocus::Password | LoginFocus::Button => {
                app.attempt_login().await;
            }
            LoginFocus::Register => {
                app.navigate(Route::Register);
            }
        },
        KeyCode::Backspace => {
            app.pop_char().await;
        }
        KeyCode::Char(c) => {
            app.push_char(c).await;
        }
        _ => {}
    }
    Ok(false)
}

fn handle_register_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => {
            app.navigate(Route::Login);
        }
        KeyCode::Char('q') => {
            app.quit();
            return true;
        }
        _ => {}
    }
    false
}

fn handle_admin_input(app: &mut App, key: KeyEvent) -> bool {
    if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
        app.quit();
        return true;
    }
    false
}

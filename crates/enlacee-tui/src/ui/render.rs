use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use enlacee_core::Route;

use crate::app::{App, LoginFocus};

use super::styles;

/// Visible width of the email and password fields
const FIELD_WIDTH: usize = 24;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    match app.screen {
        Route::Login => render_login_form(frame, app, chunks[0]),
        Route::Register => render_register(frame, app, chunks[0]),
        Route::Admin => render_admin(frame, app, chunks[0]),
    }
    render_status_bar(frame, app, chunks[1]);

    if app.toast.is_some() {
        render_toast(frame, app);
    }
}

fn render_login_form(frame: &mut Frame, app: &App, area: Rect) {
    let area = centered_rect_fixed(48, 12, area);
    frame.render_widget(Clear, area);

    let credentials = app.form.credentials();
    let mut lines = vec![
        Line::from(Span::styled(
            "        Sign in to your account",
            styles::title_style(),
        )),
        Line::from(""),
    ];

    let email_focused = app.focus == LoginFocus::Email;
    lines.push(field_line("Email:    ", &tail(&credentials.email), email_focused));

    let masked = "*".repeat(credentials.password.chars().count().min(FIELD_WIDTH));
    let password_focused = app.focus == LoginFocus::Password;
    lines.push(field_line("Password: ", &masked, password_focused));

    // Sign in button (centered)
    lines.push(Line::from(""));
    let button_focused = app.focus == LoginFocus::Button;
    let button_style = if button_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let label = if button_focused {
        " ▶ Sign In ◀  "
    } else {
        "   Sign In    "
    };
    lines.push(Line::from(vec![
        Span::raw("              ["),
        Span::styled(label, button_style),
        Span::raw("]"),
    ]));

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("   Don't have an account yet? ", styles::muted_style()),
        Span::styled("Sign up", styles::link_style(app.focus == LoginFocus::Register)),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn field_line<'a>(label: &'a str, value: &str, focused: bool) -> Line<'a> {
    let style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let cursor = if focused { "▌" } else { "" };
    Line::from(vec![
        Span::raw("   "),
        Span::styled(format!("{}[", label), styles::muted_style()),
        Span::styled(format!("{:<width$}{}", value, cursor, width = FIELD_WIDTH), style),
        Span::styled("]", styles::muted_style()),
    ])
}

/// Last `FIELD_WIDTH` characters, so the cursor end stays visible
fn tail(value: &str) -> String {
    let count = value.chars().count();
    value.chars().skip(count.saturating_sub(FIELD_WIDTH)).collect()
}

fn render_register(frame: &mut Frame, app: &App, area: Rect) {
    let area = centered_rect_fixed(56, 8, area);
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled("  Create an account", styles::title_style())),
        Line::from(""),
        Line::from(Span::styled(
            format!("  Register at {}{}", app.backend_url.trim_end_matches('/'), Route::Register),
            styles::list_item_style(),
        )),
        Line::from(""),
        Line::from(Span::styled("  Enter: back to sign in   q: quit", styles::muted_style())),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_admin(frame: &mut Frame, app: &App, area: Rect) {
    let area = centered_rect_fixed(48, 7, area);
    frame.render_widget(Clear, area);

    let expiry = match app.session_minutes_left() {
        Some(minutes) => format!("  Session expires in {} min", minutes),
        None => "  Session expired".to_string(),
    };

    let lines = vec![
        Line::from(Span::styled("  Admin", styles::title_style())),
        Line::from(""),
        Line::from(Span::styled("  You are signed in.", styles::list_item_style())),
        Line::from(Span::styled(expiry, styles::muted_style())),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hint = match app.screen {
        Route::Login => "Tab: next field  Enter: sign in  Esc: quit",
        Route::Register => "Enter: back  q: quit",
        Route::Admin => "q: quit",
    };
    let text = format!(" {}  {}  {}", app.screen, app.backend_url, hint);
    frame.render_widget(
        Paragraph::new(text).style(styles::status_bar_style()),
        area,
    );
}

/// Toasts sit in the bottom-right corner, above the status bar
fn render_toast(frame: &mut Frame, app: &App) {
    let Some(ref toast) = app.toast else {
        return;
    };

    let outer = frame.area();
    let width = toast_width(&toast.notice.message).min(outer.width);
    let height = 3;
    let x = outer.x + outer.width.saturating_sub(width + 1);
    let y = outer.y + outer.height.saturating_sub(height + 1);
    let area = Rect::new(x, y, width, height.min(outer.height));

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::notice_style(toast.notice.level));
    let paragraph = Paragraph::new(Line::from(Span::styled(
        format!(" {}", toast.notice.message),
        styles::notice_style(toast.notice.level),
    )))
    .block(block);
    frame.render_widget(paragraph, area);
}

/// Message width plus border and padding, saturating for huge messages
fn toast_width(message: &str) -> u16 {
    u16::try_from(message.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(4)
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_keeps_end_of_long_input() {
        assert_eq!(tail("a@b.com"), "a@b.com");
        let long = "abcdefghijklmnopqrstuvwxyz@example.com";
        let shown = tail(long);
        assert_eq!(shown.chars().count(), FIELD_WIDTH);
        assert!(shown.ends_with("@example.com"));
    }

    #[test]
    fn test_toast_width_saturates() {
        assert_eq!(toast_width("Login Successful!!"), 22);
        assert_eq!(toast_width(&"x".repeat(65_532)), u16::MAX);
        assert_eq!(toast_width(&"x".repeat(70_000)), u16::MAX);
    }

    #[test]
    fn test_centered_rect_fixed_clamps() {
        let r = centered_rect_fixed(48, 12, Rect::new(0, 0, 100, 40));
        assert_eq!(r, Rect::new(26, 14, 48, 12));

        let r = centered_rect_fixed(48, 12, Rect::new(0, 0, 20, 5));
        assert_eq!(r.width, 20);
        assert_eq!(r.height, 5);
    }
}

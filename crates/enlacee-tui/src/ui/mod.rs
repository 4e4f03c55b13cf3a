//! Terminal UI module using ratatui.
//!
//! - `render`: screen rendering (login form, toasts, landing pages)
//! - `input`: Keyboard event handling
//! - `styles`: Color schemes and text styling

pub mod input;
pub mod render;
pub mod styles;

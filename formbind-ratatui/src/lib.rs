//! # formbind-ratatui
//!
//! Ratatui surface for formbind.
//!
//! Renders a [`formbind::ModalForm`] as a centered dialog: one bordered block
//! per field with its error on the bottom border, an error banner for
//! submission failures, and a submit button that is dimmed while the form is
//! untouched, invalid or submitting.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use formbind::{FieldDescriptor, ModalConfig, ModalForm};
//! use formbind_ratatui::RatatuiModalBackend;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut form = ModalForm::new(
//!         ModalConfig::new("New subject"),
//!         vec![FieldDescriptor::text("name", "Name").required()],
//!         store.create_handler(),
//!     )?;
//!
//!     RatatuiModalBackend::new().run(&mut form)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Keys
//!
//! - `Tab` / `↓` and `Shift+Tab` / `↑` move between fields and buttons
//! - `←` / `→` / `Space` cycle select and radio options, `Space` toggles checkboxes
//! - `Enter` on a button presses it, `F10` or `Ctrl+Enter` submits from anywhere
//! - `Esc` cancels

mod backend;
mod draw;
mod view;

pub use backend::{RatatuiFormError, RatatuiModalBackend, Theme};
pub use draw::draw_modal;
pub use view::{Focus, KeyAction, ModalView, control_input};

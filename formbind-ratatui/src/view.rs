//! Focus handling and key mapping for the modal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use formbind::{ControlInput, FieldKind, ModalForm, RenderHints};
use tracing::debug;

/// The focused element of the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Index into the form's field list.
    Field(usize),
    Submit,
    Cancel,
}

/// What the run loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Submit,
    Cancel,
}

/// Interaction state of the modal that the form itself does not track.
#[derive(Debug, Clone)]
pub struct ModalView {
    focus: Focus,
}

impl Default for ModalView {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalView {
    pub fn new() -> Self {
        Self {
            focus: Focus::Field(0),
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Move focus to the first enabled field.
    pub fn reset(&mut self, form: &ModalForm) {
        self.focus = Focus::Submit;
        let stops = focus_stops(form);
        if let Some(first) = stops.first() {
            self.focus = *first;
        }
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, form: &mut ModalForm, key: KeyEvent) -> KeyAction {
        match key.code {
            KeyCode::Esc => return KeyAction::Cancel,
            KeyCode::F(10) => return KeyAction::Submit,
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return KeyAction::Submit;
            }
            KeyCode::BackTab => self.previous(form),
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => self.previous(form),
            KeyCode::Tab | KeyCode::Down => self.next(form),
            KeyCode::Up => self.previous(form),
            KeyCode::Enter => match self.focus {
                Focus::Submit => return KeyAction::Submit,
                Focus::Cancel => return KeyAction::Cancel,
                Focus::Field(idx) => {
                    let multiline = form
                        .views()
                        .get(idx)
                        .is_some_and(|view| view.hints().multiline);
                    if multiline {
                        self.send(form, idx, ControlInput::Char('\n'));
                    } else {
                        self.next(form);
                    }
                }
            },
            _ => {
                if let Focus::Field(idx) = self.focus {
                    let input = form
                        .views()
                        .get(idx)
                        .and_then(|view| control_input(view.kind(), view.hints(), &key));
                    if let Some(input) = input {
                        self.send(form, idx, input);
                    }
                }
            }
        }

        KeyAction::None
    }

    fn send(&self, form: &mut ModalForm, idx: usize, input: ControlInput) {
        let Some(name) = form.views().get(idx).map(|view| view.name().to_string()) else {
            return;
        };

        if let Err(err) = form.input(&name, &input) {
            debug!(field = %name, error = %err, "input rejected");
        }
    }

    fn next(&mut self, form: &ModalForm) {
        let stops = focus_stops(form);
        let position = stops.iter().position(|stop| *stop == self.focus);
        self.focus = match position {
            Some(idx) => stops[(idx + 1) % stops.len()],
            None => stops.first().copied().unwrap_or(Focus::Submit),
        };
    }

    fn previous(&mut self, form: &ModalForm) {
        let stops = focus_stops(form);
        let position = stops.iter().position(|stop| *stop == self.focus);
        self.focus = match position {
            Some(0) | None => stops.last().copied().unwrap_or(Focus::Submit),
            Some(idx) => stops[idx - 1],
        };
    }
}

/// Enabled fields, then the buttons.
fn focus_stops(form: &ModalForm) -> Vec<Focus> {
    let mut stops: Vec<Focus> = form
        .views()
        .iter()
        .enumerate()
        .filter(|(_, view)| !view.is_disabled())
        .map(|(idx, _)| Focus::Field(idx))
        .collect();

    stops.push(Focus::Submit);
    if form.config().cancel_label().is_some() {
        stops.push(Focus::Cancel);
    }
    stops
}

/// Map a key press to the interaction it means for a field kind.
pub fn control_input(kind: &FieldKind, hints: &RenderHints, key: &KeyEvent) -> Option<ControlInput> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match kind {
        FieldKind::Text => match key.code {
            KeyCode::Char('u') if ctrl => Some(ControlInput::Clear),
            KeyCode::Char(c) if !ctrl => Some(ControlInput::Char(c)),
            KeyCode::Backspace => Some(ControlInput::Backspace),
            KeyCode::Delete => Some(ControlInput::Clear),
            KeyCode::Enter if hints.multiline => Some(ControlInput::Char('\n')),
            _ => None,
        },
        FieldKind::Checkbox => match key.code {
            KeyCode::Char(' ') => Some(ControlInput::Toggle),
            _ => None,
        },
        FieldKind::Select(_) | FieldKind::Radio(_) => match key.code {
            KeyCode::Left => Some(ControlInput::Previous),
            KeyCode::Right | KeyCode::Char(' ') => Some(ControlInput::Next),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formbind::{FieldDescriptor, FieldValue, ModalConfig, ScriptedSubmitter};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn form(config: ModalConfig) -> ModalForm {
        let mut form = ModalForm::new(
            config,
            vec![
                FieldDescriptor::text("name", "Name").required(),
                FieldDescriptor::text("code", "Code").disabled(true),
                FieldDescriptor::checkbox("active", "Active"),
                FieldDescriptor::select("opinion", "Opinion", [("GOOD", "Good"), ("BAD", "Bad")]),
            ],
            ScriptedSubmitter::new().handler(),
        )
        .unwrap();
        form.open();
        form
    }

    #[test]
    fn focus_skips_disabled_fields_and_wraps() {
        let mut form = form(ModalConfig::default().with_cancel_label("Cancel"));
        let mut view = ModalView::new();
        view.reset(&form);
        assert_eq!(view.focus(), Focus::Field(0));

        view.handle_key(&mut form, key(KeyCode::Tab));
        assert_eq!(view.focus(), Focus::Field(2));
        view.handle_key(&mut form, key(KeyCode::Down));
        view.handle_key(&mut form, key(KeyCode::Down));
        assert_eq!(view.focus(), Focus::Submit);
        view.handle_key(&mut form, key(KeyCode::Tab));
        assert_eq!(view.focus(), Focus::Cancel);
        view.handle_key(&mut form, key(KeyCode::Tab));
        assert_eq!(view.focus(), Focus::Field(0));
        view.handle_key(&mut form, key(KeyCode::BackTab));
        assert_eq!(view.focus(), Focus::Cancel);
    }

    #[test]
    fn typing_edits_the_focused_field() {
        let mut form = form(ModalConfig::default());
        let mut view = ModalView::new();
        view.reset(&form);

        for c in "Adaa".chars() {
            view.handle_key(&mut form, key(KeyCode::Char(c)));
        }
        view.handle_key(&mut form, key(KeyCode::Backspace));

        assert_eq!(form.engine().value("name"), Some(FieldValue::from("Ada")));
        assert!(form.state().touched);
    }

    #[test]
    fn space_and_arrows_drive_choices() {
        let mut form = form(ModalConfig::default());
        let mut view = ModalView::new();
        view.reset(&form);

        view.handle_key(&mut form, key(KeyCode::Tab));
        view.handle_key(&mut form, key(KeyCode::Char(' ')));
        view.handle_key(&mut form, key(KeyCode::Tab));
        view.handle_key(&mut form, key(KeyCode::Left));

        assert_eq!(form.engine().value("active"), Some(FieldValue::Bool(true)));
        assert_eq!(form.engine().value("opinion"), Some(FieldValue::from("BAD")));
    }

    #[test]
    fn enter_on_buttons_and_escape() {
        let mut form = form(ModalConfig::default());
        let mut view = ModalView::new();
        view.reset(&form);

        assert_eq!(view.handle_key(&mut form, key(KeyCode::Enter)), KeyAction::None);
        assert_eq!(view.focus(), Focus::Field(2));
        assert_eq!(view.handle_key(&mut form, key(KeyCode::F(10))), KeyAction::Submit);
        assert_eq!(view.handle_key(&mut form, key(KeyCode::Esc)), KeyAction::Cancel);

        view.handle_key(&mut form, key(KeyCode::Tab));
        view.handle_key(&mut form, key(KeyCode::Tab));
        assert_eq!(view.focus(), Focus::Submit);
        assert_eq!(view.handle_key(&mut form, key(KeyCode::Enter)), KeyAction::Submit);
    }

    #[test]
    fn multiline_text_takes_newlines() {
        let kind = FieldKind::Text;
        let multiline = RenderHints {
            multiline: true,
            ..RenderHints::default()
        };

        assert_eq!(
            control_input(&kind, &multiline, &key(KeyCode::Enter)),
            Some(ControlInput::Char('\n'))
        );
        assert_eq!(control_input(&kind, &RenderHints::default(), &key(KeyCode::Enter)), None);
        assert_eq!(
            control_input(
                &kind,
                &RenderHints::default(),
                &KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)
            ),
            Some(ControlInput::Clear)
        );
    }
}

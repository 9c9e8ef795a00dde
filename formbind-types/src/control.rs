use crate::{FieldKind, FieldValue, Options};

/// An interaction a rendering surface can report for a field.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlInput {
    /// A typed character.
    Char(char),

    /// Delete the last character.
    Backspace,

    /// Empty the field.
    Clear,

    /// Flip a checkbox.
    Toggle,

    /// Move to the next option.
    Next,

    /// Move to the previous option.
    Previous,

    /// Pick an option by key.
    Choose(String),

    /// Replace the value outright (e.g. paste, programmatic edit).
    Set(FieldValue),
}

/// Bind a value, emit a change.
///
/// Every field kind implements this: `display` turns the field's effective
/// value into what the control shows, and `apply` turns an interaction into
/// the raw value the control would emit, or `None` when the interaction
/// does not apply to this kind of control.
pub trait Control {
    fn display(&self, value: &FieldValue) -> FieldValue;

    fn apply(&self, current: &FieldValue, input: &ControlInput) -> Option<FieldValue>;
}

impl Control for FieldKind {
    fn display(&self, value: &FieldValue) -> FieldValue {
        match self {
            Self::Text => FieldValue::Text(value.to_text()),
            Self::Checkbox => FieldValue::Bool(value.as_bool().unwrap_or(false)),
            Self::Select(_) | Self::Radio(_) => match value {
                FieldValue::Blank => FieldValue::Blank,
                other => FieldValue::Text(other.to_text()),
            },
        }
    }

    fn apply(&self, current: &FieldValue, input: &ControlInput) -> Option<FieldValue> {
        match self {
            Self::Text => apply_text(current, input),
            Self::Checkbox => apply_checkbox(current, input),
            Self::Select(options) | Self::Radio(options) => apply_choice(options, current, input),
        }
    }
}

fn apply_text(current: &FieldValue, input: &ControlInput) -> Option<FieldValue> {
    let mut text = current.to_text();
    match input {
        ControlInput::Char(c) => text.push(*c),
        ControlInput::Backspace => {
            text.pop()?;
        }
        ControlInput::Clear => text.clear(),
        ControlInput::Set(value) => return Some(value.clone()),
        _ => return None,
    }
    Some(FieldValue::Text(text))
}

fn apply_checkbox(current: &FieldValue, input: &ControlInput) -> Option<FieldValue> {
    let checked = current.as_bool().unwrap_or(false);
    match input {
        ControlInput::Toggle | ControlInput::Char(' ') => Some(FieldValue::Bool(!checked)),
        ControlInput::Set(FieldValue::Bool(b)) => Some(FieldValue::Bool(*b)),
        _ => None,
    }
}

fn apply_choice(options: &Options, current: &FieldValue, input: &ControlInput) -> Option<FieldValue> {
    let position = current.as_str().and_then(|key| options.position(key));
    let last = options.len().checked_sub(1)?;

    let idx = match input {
        ControlInput::Next => match position {
            Some(idx) if idx < last => idx + 1,
            _ => 0,
        },
        ControlInput::Previous => match position {
            Some(0) | None => last,
            Some(idx) => idx - 1,
        },
        ControlInput::Choose(key) => options.position(key)?,
        ControlInput::Set(FieldValue::Text(key)) => options.position(key)?,
        _ => return None,
    };

    options.key_at(idx).map(FieldValue::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opinions() -> FieldKind {
        FieldKind::Select(Options::from([("GOOD", "Good"), ("BAD", "Bad")]))
    }

    #[test]
    fn text_editing() {
        let kind = FieldKind::Text;
        let typed = kind.apply(&FieldValue::Blank, &ControlInput::Char('a')).unwrap();
        assert_eq!(typed, FieldValue::Text("a".into()));

        let erased = kind.apply(&typed, &ControlInput::Backspace).unwrap();
        assert_eq!(erased, FieldValue::Text(String::new()));

        // nothing left to erase
        assert_eq!(kind.apply(&erased, &ControlInput::Backspace), None);
        assert_eq!(kind.apply(&typed, &ControlInput::Toggle), None);
    }

    #[test]
    fn text_display_of_blank_is_empty() {
        assert_eq!(
            FieldKind::Text.display(&FieldValue::Blank),
            FieldValue::Text(String::new())
        );
    }

    #[test]
    fn checkbox_toggles_from_blank() {
        let kind = FieldKind::Checkbox;
        assert_eq!(kind.display(&FieldValue::Blank), FieldValue::Bool(false));
        assert_eq!(
            kind.apply(&FieldValue::Blank, &ControlInput::Toggle),
            Some(FieldValue::Bool(true))
        );
        assert_eq!(kind.apply(&FieldValue::Bool(true), &ControlInput::Char('x')), None);
    }

    #[test]
    fn choice_cycles_through_options() {
        let kind = opinions();
        let first = kind.apply(&FieldValue::Blank, &ControlInput::Next).unwrap();
        assert_eq!(first, FieldValue::from("GOOD"));

        let second = kind.apply(&first, &ControlInput::Next).unwrap();
        assert_eq!(second, FieldValue::from("BAD"));

        let wrapped = kind.apply(&second, &ControlInput::Next).unwrap();
        assert_eq!(wrapped, FieldValue::from("GOOD"));

        let back = kind.apply(&FieldValue::Blank, &ControlInput::Previous).unwrap();
        assert_eq!(back, FieldValue::from("BAD"));
    }

    #[test]
    fn choice_rejects_unknown_keys() {
        let kind = opinions();
        assert_eq!(
            kind.apply(&FieldValue::Blank, &ControlInput::Choose("MEH".into())),
            None
        );
        assert_eq!(
            kind.apply(&FieldValue::Blank, &ControlInput::Choose("BAD".into())),
            Some(FieldValue::from("BAD"))
        );
    }
}

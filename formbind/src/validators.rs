//! Reusable field validators and the predicates behind them.
//!
//! Validators follow the descriptor contract: they only see non-blank values
//! and return the message to show, or `None`.

use std::sync::{Arc, LazyLock};

use formbind_types::{FieldValue, Validator};
use regex::Regex;

static FLOAT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("float regex is valid"));

static INT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+$").expect("int regex is valid"));

/// Up to two decimals, no sign.
static MONEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d\d?)?$").expect("money regex is valid"));

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[-!#$%&'*+/0-9=?A-Z^_a-z`{|}~](\.?[-!#$%&'*+/0-9=?A-Z^_a-z`{|}~])*@[a-zA-Z0-9](-*\.?[a-zA-Z0-9])*\.[a-zA-Z](-?[a-zA-Z0-9])+$",
    )
    .expect("email regex is valid")
});

const MAX_EMAIL_LENGTH: usize = 254;
const MAX_LOCAL_PART_LENGTH: usize = 64;
const MAX_DOMAIN_LABEL_LENGTH: usize = 63;

/// Wrap a closure as a shareable [`Validator`].
pub fn validator(f: impl Fn(&FieldValue) -> Option<String> + Send + Sync + 'static) -> Validator {
    Arc::new(f)
}

/// Run validators in order; the first message wins.
pub fn check_all(
    validators: impl IntoIterator<Item = Validator>,
) -> impl Fn(&FieldValue) -> Option<String> + Send + Sync + 'static {
    let validators: Vec<Validator> = validators.into_iter().collect();
    move |value| validators.iter().find_map(|check| check(value))
}

pub fn check_positive_float(value: &FieldValue) -> Option<String> {
    (!is_positive_float(value)).then(|| "Invalid number format".to_string())
}

pub fn check_money(value: &FieldValue) -> Option<String> {
    (!is_money(value)).then(|| "Invalid money format".to_string())
}

pub fn check_email(value: &FieldValue) -> Option<String> {
    (!is_email(value)).then(|| "Invalid email address".to_string())
}

/// Numbers above `max` fail. Values that are not numbers at all fail with
/// the number format message.
pub fn check_max(max: f64) -> impl Fn(&FieldValue) -> Option<String> + Send + Sync + 'static {
    move |value| {
        let Some(number) = parse_float(value) else {
            return Some("Invalid number format".to_string());
        };

        (number > max).then(|| format!("must be less than, or equal to {max}"))
    }
}

/// Text shorter than `min` or longer than `max` characters fails.
pub fn check_length(
    min: usize,
    max: Option<usize>,
) -> impl Fn(&FieldValue) -> Option<String> + Send + Sync + 'static {
    let mut message = format!("must contain min. {min}");
    if let Some(max) = max {
        message.push_str(&format!(", and max. {max}"));
    }
    message.push_str(" characters");

    move |value| {
        let length = value.to_text().chars().count();
        let too_long = max.is_some_and(|max| length > max);

        (length < min || too_long).then(|| message.clone())
    }
}

// === Predicates ===

/// `Blank`, or text with nothing but whitespace.
pub fn is_blank(value: &FieldValue) -> bool {
    value.is_blank()
}

pub fn is_float(value: &FieldValue) -> bool {
    numeric_text(value).is_some_and(|text| FLOAT_REGEX.is_match(&text))
}

pub fn is_int(value: &FieldValue) -> bool {
    numeric_text(value).is_some_and(|text| INT_REGEX.is_match(&text))
}

pub fn is_money(value: &FieldValue) -> bool {
    numeric_text(value).is_some_and(|text| MONEY_REGEX.is_match(&text))
}

pub fn is_email(value: &FieldValue) -> bool {
    let Some(text) = value.as_str() else {
        return false;
    };

    let Some((local, domain)) = text.rsplit_once('@') else {
        return false;
    };

    text.len() <= MAX_EMAIL_LENGTH
        && local.len() <= MAX_LOCAL_PART_LENGTH
        && domain
            .split('.')
            .all(|label| label.len() <= MAX_DOMAIN_LABEL_LENGTH)
        && EMAIL_REGEX.is_match(text)
}

pub fn is_positive_float(value: &FieldValue) -> bool {
    is_float(value) && parse_float(value).is_some_and(|n| n > 0.0)
}

pub fn is_zero_or_positive_float(value: &FieldValue) -> bool {
    is_float(value) && parse_float(value).is_some_and(|n| n >= 0.0)
}

pub fn is_positive_int(value: &FieldValue) -> bool {
    is_int(value) && parse_float(value).is_some_and(|n| n > 0.0)
}

pub fn is_zero_or_positive_int(value: &FieldValue) -> bool {
    is_int(value) && parse_float(value).is_some_and(|n| n >= 0.0)
}

/// Numbers and text are candidates for numeric checks, nothing else.
fn numeric_text(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Text(text) => Some(text.clone()),
        FieldValue::Int(_) | FieldValue::Float(_) => Some(value.to_text()),
        FieldValue::Blank | FieldValue::Bool(_) => None,
    }
}

pub(crate) fn parse_float(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Int(n) => Some(*n as f64),
        FieldValue::Float(n) => Some(*n),
        FieldValue::Text(text) if FLOAT_REGEX.is_match(text.trim()) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn floats_and_ints() {
        assert!(is_float(&text("-12.5")));
        assert!(is_float(&FieldValue::Int(3)));
        assert!(!is_float(&text("12.")));
        assert!(!is_float(&text("1e3")));
        assert!(!is_float(&FieldValue::Bool(true)));

        assert!(is_int(&text("-7")));
        assert!(!is_int(&text("7.0")));

        assert!(is_positive_int(&text("1")));
        assert!(!is_positive_int(&text("0")));
        assert!(is_zero_or_positive_int(&text("0")));
        assert!(!is_zero_or_positive_float(&text("-0.5")));
    }

    #[test]
    fn money() {
        assert!(is_money(&text("10")));
        assert!(is_money(&text("10.5")));
        assert!(is_money(&text("10.55")));
        assert!(!is_money(&text("10.555")));
        assert!(!is_money(&text("-1")));
        assert_eq!(check_money(&text("1,50")).as_deref(), Some("Invalid money format"));
    }

    #[test]
    fn emails() {
        assert!(is_email(&text("ada@example.com")));
        assert!(is_email(&text("first.last+tag@sub.example.org")));
        assert!(!is_email(&text("ada@localhost")));
        assert!(!is_email(&text("ada.@example.com")));
        assert!(!is_email(&text("@example.com")));
        assert!(!is_email(&FieldValue::Int(1)));
        assert_eq!(check_email(&text("nope")).as_deref(), Some("Invalid email address"));
    }

    #[test]
    fn max() {
        let check = check_max(100.0);
        assert_eq!(check(&text("100")), None);
        assert_eq!(
            check(&text("100.01")).as_deref(),
            Some("must be less than, or equal to 100")
        );
        assert_eq!(check(&text("lots")).as_deref(), Some("Invalid number format"));
    }

    #[test]
    fn length() {
        let bounded = check_length(2, Some(4));
        assert_eq!(bounded(&text("abc")), None);
        assert_eq!(
            bounded(&text("a")).as_deref(),
            Some("must contain min. 2, and max. 4 characters")
        );
        assert!(bounded(&text("abcde")).is_some());

        let open = check_length(3, None);
        assert_eq!(
            open(&text("ab")).as_deref(),
            Some("must contain min. 3 characters")
        );
    }

    #[test]
    fn first_failing_check_wins() {
        let check = check_all([validator(check_positive_float), validator(check_max(10.0))]);

        assert_eq!(check(&text("x")).as_deref(), Some("Invalid number format"));
        assert_eq!(
            check(&text("11")).as_deref(),
            Some("must be less than, or equal to 10")
        );
        assert_eq!(check(&text("9.5")), None);
    }
}

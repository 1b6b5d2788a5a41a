//! Registration form domain logic.
//!
//! This module holds the validate-then-submit workflow of the event
//! registration form: the pure validation rules, the browser-compatible
//! number conversion used for the age field, and the form state machine
//! (draft, current errors, last submitted record). The UI only renders what
//! this state exposes and forwards input events into it.

use crate::{
    FieldError, GuestAttendance, RegistrationError, RegistrationField, RegistrationRecord,
    ValidationErrors,
};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

/// One character outside the browser regex `\s` class.
///
/// Unicode `White_Space` differs from it: U+FEFF is whitespace here, U+0085 is not.
const NON_SPACE_CLASS: &str = concat!(
    r"[^\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}",
    r"\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]",
);

/// Something, an at sign, something, a dot, something. Searched, not anchored.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{0}+@{0}+\\.{0}+", NON_SPACE_CLASS))
        .expect("EMAIL_REGEX: invalid regex pattern")
});

/// Whitespace and line terminators as the browser trims them for `Number()`
fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Validate a draft record.
///
/// Returns only the fields that failed; an empty result means the record
/// can be submitted. Emptiness checks are on the raw string, so a value of
/// spaces counts as filled in.
pub fn validate(record: &RegistrationRecord) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if record.name.is_empty() {
        errors.insert(FieldError::NameRequired);
    }

    if record.email.is_empty() {
        errors.insert(FieldError::EmailRequired);
    } else if !is_valid_email(&record.email) {
        errors.insert(FieldError::EmailInvalid);
    }

    if record.age.is_empty() {
        errors.insert(FieldError::AgeRequired);
    } else {
        let age = parse_js_number(&record.age);
        // NaN fails this comparison too
        if !(age > 0.0) {
            errors.insert(FieldError::AgeNotPositive);
        }
    }

    if record.requires_guest_name() && record.guest_name.is_empty() {
        errors.insert(FieldError::GuestNameRequired);
    }

    errors
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Convert a string to a number the way a browser's `Number(value)` does.
///
/// Surrounding whitespace is ignored and a blank string is 0. Accepts signed
/// decimal literals with optional fraction and exponent, signed `Infinity`,
/// and unsigned `0x`/`0o`/`0b` integer literals. Anything else is NaN.
pub fn parse_js_number(input: &str) -> f64 {
    let trimmed = input.trim_matches(is_js_whitespace);

    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(value) = parse_radix_literal(trimmed) {
        return value;
    }

    // Rust's float grammar also takes "inf", "nan" and friends; the browser does not.
    let is_decimal_literal = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !is_decimal_literal {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// `Some` if the input has a radix prefix; NaN when the digits are bad
fn parse_radix_literal(input: &str) -> Option<f64> {
    let radix = match input.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };

    let digits = &input[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }

    let mut value = 0.0f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(digit) => value = value * f64::from(radix) + f64::from(digit),
            None => return Some(f64::NAN),
        }
    }
    Some(value)
}

/// Result of a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The draft was valid, copied to the last submitted record and reset
    Submitted,
    /// The draft was kept and the errors stored for display
    Rejected { error_count: usize },
}

/// State of the registration form.
///
/// One draft is edited in place; each input is a projection of one draft
/// field. Errors only change on submit, so a fixed field keeps showing its
/// message until the next attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    draft: RegistrationRecord,
    errors: ValidationErrors,
    last_submitted: Option<RegistrationRecord>,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &RegistrationRecord {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn last_submitted(&self) -> Option<&RegistrationRecord> {
        self.last_submitted.as_ref()
    }

    /// Overwrite one draft field. Errors and every other field are left alone.
    ///
    /// The attendance field only takes "Yes" or "No"; on any other value the
    /// draft is not modified.
    pub fn change_field(
        &mut self,
        field: RegistrationField,
        value: impl Into<String>,
    ) -> Result<(), RegistrationError> {
        let value = value.into();
        debug!(field = field.as_str(), "registration field changed");

        match field {
            RegistrationField::Name => self.draft.set_name(value),
            RegistrationField::Email => self.draft.set_email(value),
            RegistrationField::Age => self.draft.set_age(value),
            RegistrationField::AttendingWithGuest => {
                let attendance = value.parse::<GuestAttendance>()?;
                self.draft.set_attending_with_guest(attendance);
            }
            RegistrationField::GuestName => self.draft.set_guest_name(value),
        }
        Ok(())
    }

    /// Same as [`change_field`](Self::change_field), keyed by an input's `name` attribute
    pub fn change_named_field(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), RegistrationError> {
        let field = name.parse::<RegistrationField>()?;
        self.change_field(field, value)
    }

    /// Validate the draft and, if it passes, record it and start over.
    pub fn submit(&mut self) -> SubmitOutcome {
        let errors = validate(&self.draft);

        if !errors.is_empty() {
            let error_count = errors.len();
            debug!(error_count, "registration rejected");
            self.errors = errors;
            return SubmitOutcome::Rejected { error_count };
        }

        let submitted = std::mem::take(&mut self.draft);
        info!(
            attending_with_guest = submitted.attending_with_guest.as_str(),
            "registration submitted"
        );
        self.last_submitted = Some(submitted);
        self.errors = ValidationErrors::new();
        SubmitOutcome::Submitted
    }

    /// Whether the guest name input (and its error) is shown
    pub fn guest_fields_visible(&self) -> bool {
        self.draft.requires_guest_name()
    }

    /// Inline error under a field, if the last submit attempt flagged it
    pub fn error_for(&self, field: RegistrationField) -> Option<FieldError> {
        self.errors.get(field)
    }

    /// Summary of the last submitted record, absent until the first success
    pub fn summary(&self) -> Option<Vec<(&'static str, String)>> {
        self.last_submitted.as_ref().map(RegistrationRecord::summary_lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> RegistrationRecord {
        RegistrationRecord {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            age: "30".to_string(),
            attending_with_guest: GuestAttendance::No,
            guest_name: String::new(),
        }
    }

    fn fill(form: &mut RegistrationForm, values: &[(RegistrationField, &str)]) {
        for (field, value) in values {
            form.change_field(*field, *value).unwrap();
        }
    }

    #[test]
    fn test_validate_valid_record() {
        assert!(validate(&valid_record()).is_empty());
    }

    #[test]
    fn test_validate_required_fields() {
        let errors = validate(&RegistrationRecord::default());

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(RegistrationField::Name), Some(FieldError::NameRequired));
        assert_eq!(errors.get(RegistrationField::Email), Some(FieldError::EmailRequired));
        assert_eq!(errors.get(RegistrationField::Age), Some(FieldError::AgeRequired));
        assert!(!errors.contains(RegistrationField::GuestName));
        assert!(!errors.contains(RegistrationField::AttendingWithGuest));
    }

    #[test]
    fn test_validate_each_empty_field_reported_alone() {
        let mut record = valid_record();
        record.name.clear();
        assert_eq!(
            validate(&record).message(RegistrationField::Name).as_deref(),
            Some("Name is required")
        );

        let mut record = valid_record();
        record.email.clear();
        assert_eq!(
            validate(&record).message(RegistrationField::Email).as_deref(),
            Some("Email is required")
        );

        let mut record = valid_record();
        record.age.clear();
        let errors = validate(&record);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message(RegistrationField::Age).as_deref(), Some("Age is required"));
    }

    #[test]
    fn test_whitespace_is_not_empty() {
        let mut record = valid_record();
        record.name = " ".to_string();
        assert!(validate(&record).is_empty());
    }

    #[test]
    fn test_email_pattern() {
        for email in ["ann@x.com", "a@b.c", "first.last@sub.domain.org", "x y@a.b", "<a@b.c>"] {
            assert!(is_valid_email(email), "{email} should be accepted");
        }
        for email in ["bad", "ann@x", "@x.com", "ann@.com", "ann@x.", "a @b.c", "ann x.com"] {
            assert!(!is_valid_email(email), "{email} should be rejected");
        }

        let mut record = valid_record();
        record.email = "bad".to_string();
        assert_eq!(validate(&record).get(RegistrationField::Email), Some(FieldError::EmailInvalid));
    }

    #[test]
    fn test_parse_js_number() {
        assert_eq!(parse_js_number("30"), 30.0);
        assert_eq!(parse_js_number(" 42 "), 42.0);
        assert_eq!(parse_js_number("007"), 7.0);
        assert_eq!(parse_js_number("1.5"), 1.5);
        assert_eq!(parse_js_number(".5"), 0.5);
        assert_eq!(parse_js_number("5."), 5.0);
        assert_eq!(parse_js_number("+3"), 3.0);
        assert_eq!(parse_js_number("1e3"), 1000.0);
        assert_eq!(parse_js_number("0x1A"), 26.0);
        assert_eq!(parse_js_number("0b101"), 5.0);
        assert_eq!(parse_js_number("0o17"), 15.0);
        assert_eq!(parse_js_number("   "), 0.0);
        assert_eq!(parse_js_number("Infinity"), f64::INFINITY);
        assert_eq!(parse_js_number("-Infinity"), f64::NEG_INFINITY);

        let not_numbers = [
            "abc", "12abc", "inf", "NaN", "nan", "infinity", "1_000", "0x", "0xZZ", "-0x10", "1e",
            ".", "1,5",
        ];
        for input in not_numbers {
            assert!(parse_js_number(input).is_nan(), "{input} should be NaN");
        }
    }

    #[test]
    fn test_email_uses_browser_whitespace_set() {
        // BOM separates tokens in the browser; NEL is an ordinary character there
        assert!(!is_valid_email("a\u{feff}@b.c"));
        assert!(!is_valid_email("a@b.\u{feff}"));
        assert!(is_valid_email("a\u{85}@b.c"));
        assert!(is_valid_email("a@b.\u{85}"));
        assert!(!is_valid_email("a\u{3000}@b.c"));
    }

    #[test]
    fn test_parse_js_number_trims_browser_whitespace_only() {
        assert_eq!(parse_js_number("\u{feff}5\u{feff}"), 5.0);
        assert_eq!(parse_js_number("\u{a0}\u{2028}7\t"), 7.0);
        assert_eq!(parse_js_number("\u{feff}"), 0.0);
        assert!(parse_js_number("\u{85}5").is_nan());
        assert!(parse_js_number("5\u{85}").is_nan());

        let mut record = valid_record();
        record.age = "\u{85}5".to_string();
        assert_eq!(validate(&record).get(RegistrationField::Age), Some(FieldError::AgeNotPositive));
    }

    #[test]
    fn test_validate_age() {
        let age_error = |age: &str| {
            let mut record = valid_record();
            record.age = age.to_string();
            validate(&record).get(RegistrationField::Age)
        };

        for age in ["1", "30", "0.5", "007", " 12 ", "1e2", "Infinity", "0x10"] {
            assert_eq!(age_error(age), None, "{age} should be accepted");
        }
        for age in ["0", "-1", "-0", "abc", " ", "NaN", "-Infinity", "12abc"] {
            assert_eq!(
                age_error(age),
                Some(FieldError::AgeNotPositive),
                "{age} should be rejected"
            );
        }
        assert_eq!(
            FieldError::AgeNotPositive.to_string(),
            "Age must be a number greater than 0"
        );
    }

    #[test]
    fn test_guest_name_required_only_with_guest() {
        let mut record = valid_record();
        record.attending_with_guest = GuestAttendance::Yes;
        assert_eq!(
            validate(&record).get(RegistrationField::GuestName),
            Some(FieldError::GuestNameRequired)
        );

        record.guest_name = "Cy".to_string();
        assert!(validate(&record).is_empty());

        record.attending_with_guest = GuestAttendance::No;
        record.guest_name.clear();
        assert!(validate(&record).is_empty());
    }

    #[test]
    fn test_change_field_leaves_others_and_errors_untouched() {
        let mut form = RegistrationForm::new();
        assert_eq!(form.submit(), SubmitOutcome::Rejected { error_count: 3 });
        let errors_before = form.errors().clone();

        form.change_field(RegistrationField::Name, "Ann").unwrap();

        assert_eq!(form.draft().name, "Ann");
        assert_eq!(form.draft().email, "");
        assert_eq!(form.errors(), &errors_before);
        assert_eq!(form.error_for(RegistrationField::Name), Some(FieldError::NameRequired));
    }

    #[test]
    fn test_change_field_is_idempotent() {
        let mut once = RegistrationForm::new();
        once.change_field(RegistrationField::Email, "ann@x.com").unwrap();

        let mut many = RegistrationForm::new();
        for _ in 0..5 {
            many.change_field(RegistrationField::Email, "ann@x.com").unwrap();
        }

        assert_eq!(once, many);
    }

    #[test]
    fn test_change_named_field() {
        let mut form = RegistrationForm::new();
        form.change_named_field("attendingWithGuest", "Yes").unwrap();
        form.change_named_field("guestName", "Cy").unwrap();

        assert!(form.guest_fields_visible());
        assert_eq!(form.draft().guest_name, "Cy");

        assert_eq!(
            form.change_named_field("phone", "555"),
            Err(RegistrationError::UnknownField("phone".to_string()))
        );
        assert_eq!(
            form.change_named_field("attendingWithGuest", "Maybe"),
            Err(RegistrationError::InvalidAttendance("Maybe".to_string()))
        );
        assert_eq!(form.draft().attending_with_guest, GuestAttendance::Yes);
    }

    #[test]
    fn test_switching_guest_off_clears_guest_requirement() {
        let mut form = RegistrationForm::new();
        fill(
            &mut form,
            &[
                (RegistrationField::Name, "Ann"),
                (RegistrationField::Email, "ann@x.com"),
                (RegistrationField::Age, "30"),
                (RegistrationField::AttendingWithGuest, "Yes"),
            ],
        );

        assert_eq!(form.submit(), SubmitOutcome::Rejected { error_count: 1 });
        assert_eq!(
            form.error_for(RegistrationField::GuestName),
            Some(FieldError::GuestNameRequired)
        );

        form.change_field(RegistrationField::AttendingWithGuest, "No").unwrap();
        assert!(!form.guest_fields_visible());
        assert_eq!(form.submit(), SubmitOutcome::Submitted);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_scenario_valid_submission() {
        let mut form = RegistrationForm::new();
        fill(
            &mut form,
            &[
                (RegistrationField::Name, "Ann"),
                (RegistrationField::Email, "ann@x.com"),
                (RegistrationField::Age, "30"),
                (RegistrationField::AttendingWithGuest, "No"),
            ],
        );

        assert_eq!(form.submit(), SubmitOutcome::Submitted);
        assert!(form.errors().is_empty());
        assert_eq!(form.last_submitted(), Some(&valid_record()));
        assert_eq!(
            form.summary().unwrap(),
            vec![
                ("Name", "Ann".to_string()),
                ("Email", "ann@x.com".to_string()),
                ("Age", "30".to_string()),
                ("Attending with Guest", "No".to_string()),
            ]
        );

        // draft is back to defaults
        let draft = form.draft();
        assert_eq!(draft.name, "");
        assert_eq!(draft.email, "");
        assert_eq!(draft.age, "");
        assert_eq!(draft.attending_with_guest, GuestAttendance::No);
        assert_eq!(draft.guest_name, "");
    }

    #[test]
    fn test_scenario_invalid_submission() {
        let mut form = RegistrationForm::new();
        fill(
            &mut form,
            &[
                (RegistrationField::Name, ""),
                (RegistrationField::Email, "bad"),
                (RegistrationField::Age, "-1"),
                (RegistrationField::AttendingWithGuest, "Yes"),
                (RegistrationField::GuestName, ""),
            ],
        );
        let draft_before = form.draft().clone();

        assert_eq!(form.submit(), SubmitOutcome::Rejected { error_count: 4 });

        let expected: ValidationErrors = [
            FieldError::NameRequired,
            FieldError::EmailInvalid,
            FieldError::AgeNotPositive,
            FieldError::GuestNameRequired,
        ]
        .into_iter()
        .collect();
        assert_eq!(form.errors(), &expected);
        assert_eq!(form.draft(), &draft_before);
        assert!(form.last_submitted().is_none());
        assert!(form.summary().is_none());
    }

    #[test]
    fn test_rejected_submit_keeps_previous_summary() {
        let mut form = RegistrationForm::new();
        fill(
            &mut form,
            &[
                (RegistrationField::Name, "Ann"),
                (RegistrationField::Email, "ann@x.com"),
                (RegistrationField::Age, "30"),
            ],
        );
        assert_eq!(form.submit(), SubmitOutcome::Submitted);

        assert_eq!(form.submit(), SubmitOutcome::Rejected { error_count: 3 });
        assert_eq!(form.last_submitted(), Some(&valid_record()));
    }

    #[test]
    fn test_age_kept_verbatim() {
        let mut form = RegistrationForm::new();
        fill(
            &mut form,
            &[
                (RegistrationField::Name, "Bo"),
                (RegistrationField::Email, "bo@y.org"),
                (RegistrationField::Age, "007"),
                (RegistrationField::AttendingWithGuest, "Yes"),
                (RegistrationField::GuestName, "Cy"),
            ],
        );

        assert_eq!(form.submit(), SubmitOutcome::Submitted);
        let summary = form.summary().unwrap();
        assert!(summary.contains(&("Age", "007".to_string())));
        assert!(summary.contains(&("Guest Name", "Cy".to_string())));
    }

    /// Counts events; enough to see what the form emits without a full subscriber stack
    struct EventCounter(std::sync::Arc<std::sync::atomic::AtomicUsize>);

    impl tracing::Subscriber for EventCounter {
        fn enabled(&self, _: &tracing::Metadata<'_>) -> bool {
            true
        }
        fn new_span(&self, _: &tracing::span::Attributes<'_>) -> tracing::span::Id {
            tracing::span::Id::from_u64(1)
        }
        fn record(&self, _: &tracing::span::Id, _: &tracing::span::Record<'_>) {}
        fn record_follows_from(&self, _: &tracing::span::Id, _: &tracing::span::Id) {}
        fn event(&self, _: &tracing::Event<'_>) {
            self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }
        fn enter(&self, _: &tracing::span::Id) {}
        fn exit(&self, _: &tracing::span::Id) {}
    }

    #[test]
    fn test_form_events_reach_installed_subscriber() {
        let count = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let subscriber = EventCounter(count.clone());

        tracing::subscriber::with_default(subscriber, || {
            let mut form = RegistrationForm::new();
            assert_eq!(form.submit(), SubmitOutcome::Rejected { error_count: 3 });
            fill(
                &mut form,
                &[
                    (RegistrationField::Name, "Ann"),
                    (RegistrationField::Email, "ann@x.com"),
                    (RegistrationField::Age, "30"),
                ],
            );
            assert_eq!(form.submit(), SubmitOutcome::Submitted);
        });

        // one rejection, three field changes, one submission
        assert_eq!(count.load(std::sync::atomic::Ordering::SeqCst), 5);
    }
}

//! Client-side validation, applied before any request is sent.
//!
//! The rules and messages are the backend contract's: email format,
//! password 6–20 characters, title 3–30, description 5–150, limit date
//! between today and three years out. A failed validation aborts the
//! submission; the per-field messages are what the forms display.

use chrono::{Months, NaiveDate, SecondsFormat};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::NewTask;

/// Standard address pattern, matched case-insensitively.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$")
        .expect("email pattern is valid")
});

/// Per-field messages for the credential form. `None` means the field
/// passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialErrors {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl CredentialErrors {
    pub fn is_clean(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// Validates login / registration inputs.
pub fn validate_credentials(email: &str, password: &str) -> CredentialErrors {
    let mut errors = CredentialErrors::default();

    if email.is_empty() {
        errors.email = Some("El correo electrónico es requerido.".to_string());
    } else if !EMAIL_PATTERN.is_match(email) {
        errors.email = Some("Por favor, ingresa un correo electrónico válido.".to_string());
    }

    let password_len = password.chars().count();
    if password.is_empty() {
        errors.password = Some("La contraseña es requerida.".to_string());
    } else if !(6..=20).contains(&password_len) {
        errors.password =
            Some("La contraseña debe tener entre 6 y 20 caracteres.".to_string());
    }

    errors
}

/// A task draft as typed into the create form. The limit date is the raw
/// `YYYY-MM-DD` input.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub limit_date: String,
}

impl TaskDraft {
    pub fn clear(&mut self) {
        *self = TaskDraft::default();
    }

    /// Converts the draft into the creation payload. Returns `None` when
    /// the limit date does not parse; callers validate first.
    pub fn to_payload(&self) -> Option<NewTask> {
        Some(NewTask {
            title: self.title.clone(),
            description: self.description.clone(),
            limit_date: date_input_to_iso(&self.limit_date)?,
        })
    }
}

/// Per-field messages for the task create form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraftErrors {
    pub title: Option<String>,
    pub description: Option<String>,
    pub limit_date: Option<String>,
}

impl TaskDraftErrors {
    pub fn is_clean(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.limit_date.is_none()
    }
}

/// Validates a task draft against `today` (injected so tests are not
/// clock-dependent). The date bound is day-granular: today is accepted.
pub fn validate_draft(draft: &TaskDraft, today: NaiveDate) -> TaskDraftErrors {
    let mut errors = TaskDraftErrors::default();

    let title_len = draft.title.chars().count();
    if !(3..=30).contains(&title_len) {
        errors.title = Some("El título debe tener entre 3 y 30 caracteres.".to_string());
    }

    let description_len = draft.description.chars().count();
    if !(5..=150).contains(&description_len) {
        errors.description =
            Some("La descripción debe tener entre 5 y 150 caracteres.".to_string());
    }

    let horizon = today + Months::new(36);
    match NaiveDate::parse_from_str(&draft.limit_date, "%Y-%m-%d") {
        Ok(date) if date >= today && date <= horizon => {}
        _ => {
            errors.limit_date =
                Some("La fecha límite debe ser entre hoy y dentro de 3 años.".to_string());
        }
    }

    errors
}

/// `YYYY-MM-DD` input → midnight-UTC RFC 3339, the backend's wire format.
pub fn date_input_to_iso(input: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?.and_utc();
    Some(midnight.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Wire timestamp → the `YYYY-MM-DD` prefix shown in the edit form.
pub fn iso_to_date_input(iso: &str) -> String {
    iso.split('T').next().unwrap_or(iso).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    fn draft(title: &str, description: &str, limit_date: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            description: description.to_string(),
            limit_date: limit_date.to_string(),
        }
    }

    #[test]
    fn password_accepted_iff_between_6_and_20_chars() {
        let twenty = "a".repeat(20);
        let twenty_one = "a".repeat(21);
        for (password, ok) in [
            ("12345", false),
            ("123456", true),
            ("secret", true),
            (twenty.as_str(), true),
            (twenty_one.as_str(), false),
        ] {
            let errors = validate_credentials("a@b.com", password);
            assert_eq!(errors.password.is_none(), ok, "password {password:?}");
        }
    }

    #[test]
    fn short_password_message_is_exact() {
        let errors = validate_credentials("a@b.com", "short");
        assert_eq!(
            errors.password.as_deref(),
            Some("La contraseña debe tener entre 6 y 20 caracteres.")
        );
    }

    #[test]
    fn empty_fields_are_required() {
        let errors = validate_credentials("", "");
        assert_eq!(
            errors.email.as_deref(),
            Some("El correo electrónico es requerido.")
        );
        assert_eq!(errors.password.as_deref(), Some("La contraseña es requerida."));
    }

    #[test]
    fn email_accepted_iff_it_matches_the_pattern() {
        for (email, ok) in [
            ("a@b.com", true),
            ("USER.NAME+tag@sub.example.ORG", true),
            ("no-at-sign", false),
            ("a@b", false),
            ("a@b.c", false),
            ("a b@c.com", false),
        ] {
            let errors = validate_credentials(email, "secret");
            assert_eq!(errors.email.is_none(), ok, "email {email:?}");
        }
    }

    #[test]
    fn title_bounds_are_3_to_30() {
        let errors = validate_draft(&draft("Hi", "Get milk and eggs", "2026-08-26"), today());
        assert_eq!(
            errors.title.as_deref(),
            Some("El título debe tener entre 3 y 30 caracteres.")
        );

        let errors = validate_draft(&draft("Hey", "Get milk and eggs", "2026-08-26"), today());
        assert!(errors.title.is_none());

        let long = "x".repeat(31);
        let errors = validate_draft(&draft(&long, "Get milk and eggs", "2026-08-26"), today());
        assert!(errors.title.is_some());
    }

    #[test]
    fn description_bounds_are_5_to_150() {
        let errors = validate_draft(&draft("Buy groceries", "Meh", "2026-08-26"), today());
        assert_eq!(
            errors.description.as_deref(),
            Some("La descripción debe tener entre 5 y 150 caracteres.")
        );

        let errors = validate_draft(&draft("Buy groceries", "Milky", "2026-08-26"), today());
        assert!(errors.description.is_none());

        let long = "x".repeat(151);
        let errors = validate_draft(&draft("Buy groceries", &long, "2026-08-26"), today());
        assert!(errors.description.is_some());
    }

    #[test]
    fn limit_date_must_lie_between_today_and_three_years_out() {
        let message = "La fecha límite debe ser entre hoy y dentro de 3 años.";
        for (input, ok) in [
            ("2026-08-25", true),  // today
            ("2026-08-26", true),  // tomorrow
            ("2029-08-25", true),  // exactly three years
            ("2029-08-26", false), // one day past the horizon
            ("2026-08-24", false), // yesterday
            ("not-a-date", false),
            ("", false),
        ] {
            let errors = validate_draft(&draft("Buy groceries", "Get milk and eggs", input), today());
            assert_eq!(errors.limit_date.is_none(), ok, "date {input:?}");
            if !ok {
                assert_eq!(errors.limit_date.as_deref(), Some(message));
            }
        }
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        // 6 characters, 12 bytes
        let errors = validate_credentials("a@b.com", "ññññññ");
        assert!(errors.password.is_none());
    }

    #[test]
    fn draft_payload_round_trips_at_day_precision() {
        let payload = draft("Buy groceries", "Get milk and eggs", "2026-08-26")
            .to_payload()
            .unwrap();
        assert_eq!(payload.limit_date, "2026-08-26T00:00:00.000Z");
        assert_eq!(iso_to_date_input(&payload.limit_date), "2026-08-26");
    }

    #[test]
    fn unparseable_draft_date_yields_no_payload() {
        assert!(draft("Buy groceries", "Get milk and eggs", "soon").to_payload().is_none());
    }
}

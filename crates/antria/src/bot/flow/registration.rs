//! Patient registration: one message carrying `Name#NIK#BirthDate`.

use chrono::NaiveDate;
use tracing::error;

use crate::bot::dispatcher::BotContext;
use crate::bot::machine::Turn;
use crate::bot::session::DialogState;
use crate::bot::templates;
use crate::domain::{DomainError, NewPatient};

pub(crate) struct ParsedPatient {
    pub name: String,
    pub nik: String,
    pub birth_date: NaiveDate,
}

/// Parse `Name#NIK#BirthDate`: exactly three `#`-separated fields, each
/// trimmed; the NIK must be 16 digits and the birth date a real calendar
/// date written `YYYY-MM-DD`.
pub(crate) fn parse_patient_input(input: &str) -> Option<ParsedPatient> {
    let parts: Vec<&str> = input.split('#').map(str::trim).collect();
    let &[name, nik, birth_date] = parts.as_slice() else {
        return None;
    };

    if nik.len() != 16 || !nik.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if birth_date.len() != 10 {
        return None;
    }
    let birth_date = NaiveDate::parse_from_str(birth_date, "%Y-%m-%d").ok()?;

    Some(ParsedPatient {
        name: name.to_string(),
        nik: nik.to_string(),
        birth_date,
    })
}

pub(crate) async fn handle(ctx: &BotContext, key: &str, text: &str) -> Turn {
    let Some(parsed) = parse_patient_input(text) else {
        // Invalid input is retryable; the session stays put.
        return Turn::new(
            templates::registration_invalid_format(),
            DialogState::AwaitingRegistration,
        );
    };

    let result = ctx
        .domain
        .create_patient(NewPatient {
            name: parsed.name,
            nik: parsed.nik,
            phone: key.to_string(),
            birth_date: parsed.birth_date,
        })
        .await;

    match result {
        Ok(patient) => Turn::new(
            templates::registration_success(&patient.name, &patient.nik),
            DialogState::Idle,
        ),
        Err(DomainError::DuplicateNik { .. }) => {
            Turn::new(templates::duplicate_nik(), DialogState::Idle)
        }
        Err(err) => {
            error!(error = %err, "patient registration failed");
            Turn::new(templates::generic_error(), DialogState::Idle)
        }
    }
}

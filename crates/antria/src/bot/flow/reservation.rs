//! The reservation flow: doctor, date, time, then create.

use chrono::{Duration, Local, NaiveDate};
use tracing::error;

use crate::bot::dispatcher::BotContext;
use crate::bot::machine::{Resolution, Turn};
use crate::bot::session::DialogState;
use crate::bot::templates;
use crate::domain::{Doctor, NewReservation};

use super::parse_selection;

/// Bookable wall-clock slots, fixed for every doctor.
pub(crate) const TIME_SLOTS: [&str; 8] = [
    "08:00", "09:00", "10:00", "11:00", "13:00", "14:00", "15:00", "16:00",
];

/// The bookable window: the next 7 calendar days starting tomorrow.
pub(crate) fn upcoming_dates(from: NaiveDate) -> Vec<NaiveDate> {
    (1..=7).map(|offset| from + Duration::days(offset)).collect()
}

pub(crate) fn doctor_selection(patient_id: String, doctors: Vec<Doctor>, text: &str) -> Turn {
    let Some(idx) = parse_selection(text, doctors.len()) else {
        return Turn::new(
            templates::invalid_selection(doctors.len()),
            DialogState::AwaitingDoctorSelection {
                patient_id,
                doctors,
            },
        );
    };

    let doctor = &doctors[idx];
    // The window is generated once and carried in the session so the
    // validated list is always the one that was shown.
    let dates = upcoming_dates(Local::now().date_naive());

    Turn::new(
        templates::date_options(&doctor.name, &dates),
        DialogState::AwaitingDateSelection {
            patient_id,
            doctor_id: doctor.id.clone(),
            doctor_name: doctor.name.clone(),
            dates,
        },
    )
    .resolved(Resolution::Selection(idx + 1))
}

pub(crate) fn date_selection(
    patient_id: String,
    doctor_id: String,
    doctor_name: String,
    dates: Vec<NaiveDate>,
    text: &str,
) -> Turn {
    let Some(idx) = parse_selection(text, dates.len()) else {
        return Turn::new(
            templates::invalid_selection(dates.len()),
            DialogState::AwaitingDateSelection {
                patient_id,
                doctor_id,
                doctor_name,
                dates,
            },
        );
    };

    let date = dates[idx];
    Turn::new(
        templates::time_options(date, &TIME_SLOTS),
        DialogState::AwaitingTimeSelection {
            patient_id,
            doctor_id,
            doctor_name,
            date,
        },
    )
    .resolved(Resolution::Selection(idx + 1))
}

pub(crate) async fn time_selection(
    ctx: &BotContext,
    patient_id: String,
    doctor_id: String,
    doctor_name: String,
    date: NaiveDate,
    text: &str,
) -> Turn {
    let Some(idx) = parse_selection(text, TIME_SLOTS.len()) else {
        return Turn::new(
            templates::invalid_selection(TIME_SLOTS.len()),
            DialogState::AwaitingTimeSelection {
                patient_id,
                doctor_id,
                doctor_name,
                date,
            },
        );
    };

    let time = TIME_SLOTS[idx];
    let result = ctx
        .domain
        .create_reservation(NewReservation {
            patient_id,
            doctor_id,
            department_id: ctx.default_department_id.clone(),
            date,
            time: time.to_string(),
        })
        .await;

    let turn = match result {
        Ok(reservation) => Turn::new(
            templates::reservation_success(&doctor_name, date, time, &reservation.queue_number),
            DialogState::Idle,
        ),
        Err(err) => {
            error!(error = %err, "reservation creation failed");
            Turn::new(templates::reservation_failed(), DialogState::Idle)
        }
    };
    turn.resolved(Resolution::Selection(idx + 1))
}

//! Schedule browsing: pick a department or doctor, see its practice hours.
//!
//! Both selections are terminal: valid or not beyond the numeric check,
//! the schedule is rendered and the session returns to idle.

use crate::bot::machine::{Resolution, Turn};
use crate::bot::session::DialogState;
use crate::bot::templates;
use crate::domain::{Department, Doctor};

use super::parse_selection;

pub(crate) fn department_selection(departments: Vec<Department>, text: &str) -> Turn {
    match parse_selection(text, departments.len()) {
        Some(idx) => Turn::new(
            templates::department_schedule(&departments[idx]),
            DialogState::Idle,
        )
        .resolved(Resolution::Selection(idx + 1)),
        None => Turn::new(
            templates::invalid_selection(departments.len()),
            DialogState::AwaitingScheduleSelection { departments },
        ),
    }
}

pub(crate) fn doctor_schedule_selection(doctors: Vec<Doctor>, text: &str) -> Turn {
    match parse_selection(text, doctors.len()) {
        Some(idx) => Turn::new(templates::doctor_schedule(&doctors[idx]), DialogState::Idle)
            .resolved(Resolution::Selection(idx + 1)),
        None => Turn::new(
            templates::invalid_selection(doctors.len()),
            DialogState::AwaitingDoctorScheduleSelection { doctors },
        ),
    }
}

//! V1 API handlers.

mod bot;
mod departments;
mod doctors;
mod patients;
mod reservations;

pub use bot::bot_message;
pub use departments::{create_department, list_departments};
pub use doctors::{create_doctor, list_doctors};
pub use patients::{create_patient, get_patient, list_patients};
pub use reservations::{
    cancel_reservation, complete_reservation, confirm_reservation, list_reservations,
};

//! Clinic domain model: patients, doctors, departments, reservations.
//!
//! The bot core only consumes this layer through the [`DomainGateway`]
//! trait; the in-process [`memory::MemoryGateway`] is the default backing
//! store.

pub mod gateway;
pub mod memory;
pub mod queue;
pub mod seed;

pub use gateway::{DomainError, DomainGateway, NewPatient, NewReservation};
pub use memory::MemoryGateway;

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Generate a fresh entity id.
pub fn new_id() -> String {
    ulid::Ulid::new().to_string()
}

/// Canonical week-day keys, Monday first. Schedules are stored under these
/// keys and rendered in this order.
pub const WEEK_DAYS: &[&str] = &[
    "senin", "selasa", "rabu", "kamis", "jumat", "sabtu", "minggu",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub nik: String,
    /// Canonical `62…` phone number; unique per patient.
    pub phone: String,
    pub birth_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    #[serde(default)]
    pub schedule: WeeklySchedule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub schedule: WeeklySchedule,
    pub is_active: bool,
}

/// Practice hours per week day, e.g. `senin: ["08:00", "14:00"]` for an
/// opening and closing time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule(pub BTreeMap<String, Vec<String>>);

impl WeeklySchedule {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Days with hours, in calendar order rather than key order.
    pub fn ordered_days(&self) -> impl Iterator<Item = (&str, &[String])> {
        WEEK_DAYS
            .iter()
            .filter_map(|day| self.0.get(*day).map(|hours| (*day, hours.as_slice())))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    /// Reservations a patient can still act on (view in the queue, cancel).
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Pending | ReservationStatus::Confirmed
        )
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub department_id: String,
    /// Denormalized for rendering; reservations outlive doctor edits.
    pub doctor_name: String,
    pub date: NaiveDate,
    /// `HH:MM` wall-clock slot.
    pub time: String,
    pub queue_number: String,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

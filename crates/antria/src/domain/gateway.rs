//! The persistence boundary consumed by the bot core and the HTTP API.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use super::{Department, Doctor, Patient, Reservation};

#[derive(Debug, Error)]
pub enum DomainError {
    /// Uniqueness conflict on the national id number.
    #[error("duplicate NIK: {nik}")]
    DuplicateNik { nik: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Clone)]
pub struct NewPatient {
    pub name: String,
    pub nik: String,
    pub phone: String,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct NewReservation {
    pub patient_id: String,
    pub doctor_id: String,
    pub department_id: String,
    pub date: NaiveDate,
    pub time: String,
}

/// Domain persistence operations.
///
/// Implementations own their internal consistency: reservation creation
/// assigns the queue number atomically with the insert, so two concurrent
/// requests for the same doctor and date can never mint the same code.
#[async_trait]
pub trait DomainGateway: Send + Sync {
    async fn find_patient_by_phone(&self, phone: &str) -> Result<Option<Patient>, DomainError>;

    async fn create_patient(&self, new: NewPatient) -> Result<Patient, DomainError>;

    async fn list_active_departments(&self) -> Result<Vec<Department>, DomainError>;

    async fn list_doctors(&self) -> Result<Vec<Doctor>, DomainError>;

    /// All reservations of one patient, most recent date first.
    async fn list_reservations_for_patient(
        &self,
        patient_id: &str,
    ) -> Result<Vec<Reservation>, DomainError>;

    async fn create_reservation(&self, new: NewReservation) -> Result<Reservation, DomainError>;

    async fn cancel_reservation(&self, reservation_id: &str) -> Result<Reservation, DomainError>;
}

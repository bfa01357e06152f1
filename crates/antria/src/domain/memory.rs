//! In-process domain store.
//!
//! One mutex guards all tables. Reservation creation derives the queue
//! number and inserts the row under the same lock, which is what makes the
//! count-then-insert sequence safe against concurrent requests for the
//! same doctor and date.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::gateway::{DomainError, DomainGateway, NewPatient, NewReservation};
use super::queue::allocate_queue_number;
use super::seed::SeedData;
use super::{
    Department, Doctor, Patient, Reservation, ReservationStatus, WeeklySchedule, new_id,
};

#[derive(Default)]
struct Tables {
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    departments: Vec<Department>,
    reservations: Vec<Reservation>,
}

#[derive(Default)]
pub struct MemoryGateway {
    tables: Mutex<Tables>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: SeedData) -> Self {
        let store = Self::new();
        for doctor in seed.doctors {
            store.insert_doctor(doctor.name, doctor.specialty, doctor.schedule);
        }
        for department in seed.departments {
            store.insert_department(
                department.name,
                department.description,
                department.schedule,
                department.is_active,
            );
        }
        store
    }

    pub fn insert_doctor(
        &self,
        name: impl Into<String>,
        specialty: impl Into<String>,
        schedule: WeeklySchedule,
    ) -> Doctor {
        let doctor = Doctor {
            id: new_id(),
            name: name.into(),
            specialty: specialty.into(),
            schedule,
        };
        self.tables.lock().unwrap().doctors.push(doctor.clone());
        doctor
    }

    pub fn insert_department(
        &self,
        name: impl Into<String>,
        description: Option<String>,
        schedule: WeeklySchedule,
        is_active: bool,
    ) -> Department {
        let department = Department {
            id: new_id(),
            name: name.into(),
            description,
            schedule,
            is_active,
        };
        self.tables
            .lock()
            .unwrap()
            .departments
            .push(department.clone());
        department
    }

    /// Look up a department by name, creating an active one when missing.
    /// The binary uses this to guarantee the configured default department
    /// exists before the dispatcher starts.
    pub fn ensure_department(&self, name: &str) -> Department {
        let mut tables = self.tables.lock().unwrap();
        if let Some(existing) = tables.departments.iter().find(|d| d.name == name) {
            return existing.clone();
        }
        let department = Department {
            id: new_id(),
            name: name.to_string(),
            description: None,
            schedule: WeeklySchedule::default(),
            is_active: true,
        };
        tables.departments.push(department.clone());
        department
    }

    pub fn list_patients(&self) -> Vec<Patient> {
        self.tables.lock().unwrap().patients.clone()
    }

    /// Every department, active or not. The bot only sees active ones
    /// through the trait; the admin surface sees all.
    pub fn list_departments(&self) -> Vec<Department> {
        self.tables.lock().unwrap().departments.clone()
    }

    pub fn get_patient(&self, id: &str) -> Option<Patient> {
        self.tables
            .lock()
            .unwrap()
            .patients
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub fn list_reservations(&self) -> Vec<Reservation> {
        self.tables.lock().unwrap().reservations.clone()
    }

    pub fn set_reservation_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> Result<Reservation, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let reservation = tables
            .reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "reservation",
                id: id.to_string(),
            })?;
        reservation.status = status;
        Ok(reservation.clone())
    }
}

#[async_trait]
impl DomainGateway for MemoryGateway {
    async fn find_patient_by_phone(&self, phone: &str) -> Result<Option<Patient>, DomainError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .patients
            .iter()
            .find(|p| p.phone == phone)
            .cloned())
    }

    async fn create_patient(&self, new: NewPatient) -> Result<Patient, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.patients.iter().any(|p| p.nik == new.nik) {
            return Err(DomainError::DuplicateNik { nik: new.nik });
        }
        let patient = Patient {
            id: new_id(),
            name: new.name,
            nik: new.nik,
            phone: new.phone,
            birth_date: new.birth_date,
            created_at: Utc::now(),
        };
        tables.patients.push(patient.clone());
        Ok(patient)
    }

    async fn list_active_departments(&self) -> Result<Vec<Department>, DomainError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .departments
            .iter()
            .filter(|d| d.is_active)
            .cloned()
            .collect())
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, DomainError> {
        Ok(self.tables.lock().unwrap().doctors.clone())
    }

    async fn list_reservations_for_patient(
        &self,
        patient_id: &str,
    ) -> Result<Vec<Reservation>, DomainError> {
        let mut reservations: Vec<Reservation> = self
            .tables
            .lock()
            .unwrap()
            .reservations
            .iter()
            .filter(|r| r.patient_id == patient_id)
            .cloned()
            .collect();
        reservations.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(reservations)
    }

    async fn create_reservation(&self, new: NewReservation) -> Result<Reservation, DomainError> {
        let mut tables = self.tables.lock().unwrap();

        if !tables.patients.iter().any(|p| p.id == new.patient_id) {
            return Err(DomainError::NotFound {
                entity: "patient",
                id: new.patient_id,
            });
        }
        let doctor = tables
            .doctors
            .iter()
            .find(|d| d.id == new.doctor_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound {
                entity: "doctor",
                id: new.doctor_id.clone(),
            })?;

        let existing = tables
            .reservations
            .iter()
            .filter(|r| r.doctor_id == new.doctor_id && r.date == new.date)
            .count();
        let queue_number = allocate_queue_number(&doctor.specialty, existing);

        let reservation = Reservation {
            id: new_id(),
            patient_id: new.patient_id,
            doctor_id: new.doctor_id,
            department_id: new.department_id,
            doctor_name: doctor.name,
            date: new.date,
            time: new.time,
            queue_number,
            status: ReservationStatus::Pending,
            created_at: Utc::now(),
        };
        tables.reservations.push(reservation.clone());
        Ok(reservation)
    }

    async fn cancel_reservation(&self, reservation_id: &str) -> Result<Reservation, DomainError> {
        self.set_reservation_status(reservation_id, ReservationStatus::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;

    fn new_patient(nik: &str, phone: &str) -> NewPatient {
        NewPatient {
            name: "Budi Santoso".into(),
            nik: nik.into(),
            phone: phone.into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 15).unwrap(),
        }
    }

    async fn store_with_patient_and_doctor() -> (MemoryGateway, Patient, Doctor) {
        let store = MemoryGateway::new();
        let doctor = store.insert_doctor("dr. Sari", "Umum", WeeklySchedule::default());
        let patient = store
            .create_patient(new_patient("1234567890123456", "6281234567890"))
            .await
            .unwrap();
        (store, patient, doctor)
    }

    #[tokio::test]
    async fn duplicate_nik_is_a_conflict() {
        let store = MemoryGateway::new();
        store
            .create_patient(new_patient("1234567890123456", "6281"))
            .await
            .unwrap();
        let err = store
            .create_patient(new_patient("1234567890123456", "6282"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateNik { .. }));
    }

    #[tokio::test]
    async fn find_patient_by_phone() {
        let store = MemoryGateway::new();
        store
            .create_patient(new_patient("1234567890123456", "6281234567890"))
            .await
            .unwrap();
        assert!(
            store
                .find_patient_by_phone("6281234567890")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            store
                .find_patient_by_phone("6289999999999")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn queue_numbers_increment_per_doctor_and_date() {
        let (store, patient, doctor) = store_with_patient_and_doctor().await;
        let date = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();

        for expected in ["U-001", "U-002", "U-003"] {
            let reservation = store
                .create_reservation(NewReservation {
                    patient_id: patient.id.clone(),
                    doctor_id: doctor.id.clone(),
                    department_id: "dept".into(),
                    date,
                    time: "08:00".into(),
                })
                .await
                .unwrap();
            assert_eq!(reservation.queue_number, expected);
        }

        // Another date starts over.
        let other = store
            .create_reservation(NewReservation {
                patient_id: patient.id.clone(),
                doctor_id: doctor.id.clone(),
                department_id: "dept".into(),
                date: NaiveDate::from_ymd_opt(2026, 8, 11).unwrap(),
                time: "08:00".into(),
            })
            .await
            .unwrap();
        assert_eq!(other.queue_number, "U-001");
    }

    #[tokio::test]
    async fn concurrent_creation_never_duplicates_queue_numbers() {
        let (store, patient, doctor) = store_with_patient_and_doctor().await;
        let store = Arc::new(store);
        let date = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            let patient_id = patient.id.clone();
            let doctor_id = doctor.id.clone();
            handles.push(tokio::spawn(async move {
                store
                    .create_reservation(NewReservation {
                        patient_id,
                        doctor_id,
                        department_id: "dept".into(),
                        date,
                        time: "08:00".into(),
                    })
                    .await
                    .unwrap()
                    .queue_number
            }));
        }

        let mut numbers = Vec::new();
        for handle in handles {
            numbers.push(handle.await.unwrap());
        }
        numbers.sort();
        numbers.dedup();
        assert_eq!(numbers.len(), 16);
    }

    #[tokio::test]
    async fn cancel_marks_reservation_cancelled() {
        let (store, patient, doctor) = store_with_patient_and_doctor().await;
        let reservation = store
            .create_reservation(NewReservation {
                patient_id: patient.id.clone(),
                doctor_id: doctor.id.clone(),
                department_id: "dept".into(),
                date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
                time: "09:00".into(),
            })
            .await
            .unwrap();

        let cancelled = store.cancel_reservation(&reservation.id).await.unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);

        let err = store.cancel_reservation("missing").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn reservation_requires_known_doctor() {
        let store = MemoryGateway::new();
        let patient = store
            .create_patient(new_patient("1234567890123456", "6281"))
            .await
            .unwrap();
        let err = store
            .create_reservation(NewReservation {
                patient_id: patient.id,
                doctor_id: "missing".into(),
                department_id: "dept".into(),
                date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
                time: "08:00".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[test]
    fn ensure_department_is_idempotent() {
        let store = MemoryGateway::new();
        let first = store.ensure_department("Poli Umum");
        let second = store.ensure_department("Poli Umum");
        assert_eq!(first.id, second.id);
    }
}

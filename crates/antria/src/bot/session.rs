//! Per-user conversational sessions.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::domain::{Department, Doctor, Reservation};

/// The dialogue position of one user, with exactly the payload the next
/// handler is allowed to read. `Idle` carries nothing, so an idle session
/// can never leak context from an earlier flow.
#[derive(Debug, Clone, Default)]
pub enum DialogState {
    #[default]
    Idle,
    AwaitingRegistration,
    AwaitingScheduleSelection {
        departments: Vec<Department>,
    },
    AwaitingDoctorScheduleSelection {
        doctors: Vec<Doctor>,
    },
    AwaitingDoctorSelection {
        patient_id: String,
        doctors: Vec<Doctor>,
    },
    AwaitingDateSelection {
        patient_id: String,
        doctor_id: String,
        doctor_name: String,
        /// The 7-day window exactly as rendered to the user.
        dates: Vec<NaiveDate>,
    },
    AwaitingTimeSelection {
        patient_id: String,
        doctor_id: String,
        doctor_name: String,
        date: NaiveDate,
    },
    AwaitingCancelConfirmation {
        reservations: Vec<Reservation>,
    },
}

impl DialogState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DialogState::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DialogState::Idle => "IDLE",
            DialogState::AwaitingRegistration => "AWAITING_REGISTRATION",
            DialogState::AwaitingScheduleSelection { .. } => "AWAITING_SCHEDULE_SELECTION",
            DialogState::AwaitingDoctorScheduleSelection { .. } => {
                "AWAITING_DOCTOR_SCHEDULE_SELECTION"
            }
            DialogState::AwaitingDoctorSelection { .. } => "AWAITING_DOCTOR_SELECTION",
            DialogState::AwaitingDateSelection { .. } => "AWAITING_DATE_SELECTION",
            DialogState::AwaitingTimeSelection { .. } => "AWAITING_TIME_SELECTION",
            DialogState::AwaitingCancelConfirmation { .. } => "AWAITING_CANCEL_CONFIRMATION",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub state: DialogState,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    fn idle(now: DateTime<Utc>) -> Self {
        Self {
            state: DialogState::Idle,
            updated_at: now,
        }
    }
}

/// One session per normalized phone key.
///
/// Expiry is lazy: a stale entry is superseded by a fresh idle session on
/// the next [`get`](SessionStore::get), never purged in the background, so
/// entries for long-inactive users stay resident until process restart.
/// Sessions are tiny and bounded by phone-number cardinality; a periodic
/// sweep would be an extension, not a correctness fix.
pub struct SessionStore {
    ttl: Duration,
    sessions: DashMap<String, Session>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SessionStore {
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            ttl: Duration::from_std(ttl).unwrap_or_else(|_| Duration::minutes(5)),
            sessions: DashMap::new(),
            locks: DashMap::new(),
        }
    }

    /// The per-key mutex serializing message handling for one sender.
    /// Hold it across the whole read-modify-write of a dispatch turn.
    pub fn lock_handle(&self, key: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Never fails: absent or expired entries resolve to a fresh idle
    /// session. Refreshes the stored timestamp.
    pub fn get(&self, key: &str) -> Session {
        let now = Utc::now();
        let mut entry = self
            .sessions
            .entry(key.to_string())
            .or_insert_with(|| Session::idle(now));
        if now - entry.updated_at >= self.ttl {
            *entry = Session::idle(now);
        }
        entry.updated_at = now;
        entry.clone()
    }

    /// Replace the state and refresh the timestamp.
    pub fn update(&self, key: &str, state: DialogState) {
        self.sessions.insert(
            key.to_string(),
            Session {
                state,
                updated_at: Utc::now(),
            },
        );
    }

    /// Reset to idle.
    pub fn clear(&self, key: &str) {
        self.update(key, DialogState::Idle);
    }
}

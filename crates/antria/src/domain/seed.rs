//! YAML seed data for doctors and departments.
//!
//! The store starts empty on every boot; operators describe the clinic in a
//! seed file referenced from the config. A missing file is not an error,
//! it just means an empty clinic.

use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tokio::fs;

use super::WeeklySchedule;

#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub doctors: Vec<DoctorSeed>,
    #[serde(default)]
    pub departments: Vec<DepartmentSeed>,
}

#[derive(Debug, Deserialize)]
pub struct DoctorSeed {
    pub name: String,
    pub specialty: String,
    #[serde(default)]
    pub schedule: WeeklySchedule,
}

#[derive(Debug, Deserialize)]
pub struct DepartmentSeed {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub schedule: WeeklySchedule,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl SeedData {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let contents = match fs::read_to_string(path.as_ref()).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(SeedError::Io(e)),
        };
        Ok(serde_saphyr::from_str(&contents)?)
    }
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse seed file: {0}")]
    Yaml(#[from] serde_saphyr::Error),
}

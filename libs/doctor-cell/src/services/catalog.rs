use tracing::debug;

use crate::models::Doctor;

static BUNDLED_DOCTORS: &str = include_str!("../data/doctors.json");

/// The read-only, in-memory doctor directory.
///
/// Built once from externally supplied records; lookups never fail harder
/// than "not found".
pub struct DoctorCatalog {
    doctors: Vec<Doctor>,
}

impl DoctorCatalog {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        debug!("Loaded doctor catalog with {} entries", doctors.len());
        Self { doctors }
    }

    /// Parse a catalog from a JSON array of doctor records.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let doctors: Vec<Doctor> = serde_json::from_str(json)?;
        Ok(Self::new(doctors))
    }

    /// The seed directory shipped with the crate (twelve doctors).
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_DOCTORS).expect("bundled doctor data is valid JSON")
    }

    pub fn list(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn find_by_id(&self, id: i64) -> Option<&Doctor> {
        self.doctors.iter().find(|doctor| doctor.id == id)
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }
}

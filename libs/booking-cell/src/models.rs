use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use doctor_cell::models::Doctor;

/// Version written into the persisted payload. Bump on layout changes so old
/// state can be migrated instead of silently misread.
pub const BOOKING_SCHEMA_VERSION: u32 = 1;

/// An active appointment with one doctor, carrying a snapshot of the display
/// fields the doctor had at booking time. Field names stay camelCase on the
/// wire to match the existing persisted payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub doctor_id: i64,
    pub doctor_name: String,
    pub doctor_image: String,
    pub specialty: String,
    pub education: String,
    pub fee: u32,
    pub booked_at: DateTime<Utc>,
}

impl Booking {
    /// Build a fresh booking for `doctor`, snapshotting its display fields.
    pub fn for_doctor(doctor: &Doctor) -> Self {
        Self {
            id: Uuid::new_v4(),
            doctor_id: doctor.id,
            doctor_name: doctor.name.clone(),
            doctor_image: doctor.image.clone(),
            specialty: doctor.specialty.clone(),
            education: doctor.education.clone(),
            fee: doctor.fee,
            booked_at: Utc::now(),
        }
    }
}

/// The full set of active bookings, in booking order. Always persisted as a
/// whole; never partially updated.
pub type BookingCollection = Vec<Booking>;

/// On-disk envelope around the booking collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedBookings {
    pub schema_version: u32,
    pub bookings: BookingCollection,
}

impl PersistedBookings {
    pub fn new(bookings: BookingCollection) -> Self {
        Self {
            schema_version: BOOKING_SCHEMA_VERSION,
            bookings,
        }
    }
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("You have already booked an appointment with {doctor_name}")]
    AlreadyBooked { doctor_name: String },

    #[error("{doctor_name} is not available today")]
    DoctorUnavailable { doctor_name: String },

    #[error("Booking storage unavailable: {0}")]
    StorageUnavailable(String),
}

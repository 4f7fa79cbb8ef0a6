use std::sync::Arc;

use chrono::{Datelike, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use doctor_cell::models::Weekday;
use doctor_cell::services::availability::AvailabilityService;
use doctor_cell::services::catalog::DoctorCatalog;
use shared_config::AppConfig;

use crate::models::{Booking, BookingCollection, BookingError};
use crate::services::store::{BookingStore, JsonFileStore};

/// The business-rule core: creates bookings from doctor selections, rejects
/// duplicates, and reconciles cancellations. All state goes through the
/// injected store; `list` reads through on every call, so presentation code
/// re-fetches after each mutating call instead of observing events.
pub struct BookingService {
    catalog: Arc<DoctorCatalog>,
    availability: AvailabilityService,
    store: Box<dyn BookingStore>,
    enforce_availability: bool,
}

impl BookingService {
    pub fn new(config: &AppConfig, catalog: Arc<DoctorCatalog>) -> Self {
        Self::with_store(
            catalog,
            Box::new(JsonFileStore::new(&config.storage_path)),
            config.enforce_availability,
        )
    }

    pub fn with_store(
        catalog: Arc<DoctorCatalog>,
        store: Box<dyn BookingStore>,
        enforce_availability: bool,
    ) -> Self {
        Self {
            catalog,
            availability: AvailabilityService::new(),
            store,
            enforce_availability,
        }
    }

    /// Book an appointment with the given doctor.
    ///
    /// Per doctor the lifecycle is Unbooked -> Booked -> Unbooked: a second
    /// `book` while Booked fails with `AlreadyBooked` rather than creating a
    /// duplicate. With availability enforcement on (the default), a doctor
    /// not available on the current weekday is rejected at commit time, not
    /// just greyed out by the UI.
    pub fn book(&self, doctor_id: i64) -> Result<Booking, BookingError> {
        debug!("Booking appointment with doctor {}", doctor_id);

        let doctor = self
            .catalog
            .find_by_id(doctor_id)
            .ok_or(BookingError::DoctorNotFound)?;

        if self.enforce_availability {
            let today = Weekday::from(Utc::now().weekday());
            if !self.availability.is_available(doctor, today) {
                return Err(BookingError::DoctorUnavailable {
                    doctor_name: doctor.name.clone(),
                });
            }
        }

        let mut bookings = self.store.load();
        if bookings.iter().any(|booking| booking.doctor_id == doctor.id) {
            return Err(BookingError::AlreadyBooked {
                doctor_name: doctor.name.clone(),
            });
        }

        let booking = Booking::for_doctor(doctor);
        bookings.push(booking.clone());
        self.store.save(&bookings)?;

        info!("Appointment {} booked with {}", booking.id, booking.doctor_name);
        Ok(booking)
    }

    /// Cancel the booking with the given id.
    ///
    /// Idempotent: an id that matches nothing (already cancelled, stale page)
    /// is a successful no-op returning `None`. On removal the booking is
    /// returned so the caller can name the cancelled doctor.
    pub fn cancel(&self, booking_id: Uuid) -> Result<Option<Booking>, BookingError> {
        debug!("Cancelling booking {}", booking_id);

        let mut bookings = self.store.load();
        let Some(position) = bookings.iter().position(|booking| booking.id == booking_id) else {
            debug!("No booking {} to cancel", booking_id);
            return Ok(None);
        };

        let removed = bookings.remove(position);
        self.store.save(&bookings)?;

        info!("Cancelled appointment with {}", removed.doctor_name);
        Ok(Some(removed))
    }

    /// The current collection in booking order, read through from the store.
    pub fn list(&self) -> BookingCollection {
        self.store.load()
    }
}

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{Booking, BookingCollection, BookingError, PersistedBookings, BOOKING_SCHEMA_VERSION};

/// Durable load/save of the whole booking collection. The only seam through
/// which booking state ever reaches storage.
pub trait BookingStore {
    /// The persisted collection, or empty when no prior state exists or the
    /// payload cannot be parsed. Never fails the caller.
    fn load(&self) -> BookingCollection;

    /// Serialize and replace the stored payload. Callers never observe a
    /// partially written collection.
    fn save(&self, bookings: &BookingCollection) -> Result<(), BookingError>;
}

/// Payloads written before the version field was introduced were a bare array
/// of bookings; both forms load, and saves always write the versioned form.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredPayload {
    Versioned(PersistedBookings),
    Legacy(BookingCollection),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersistedBookingsRef<'a> {
    schema_version: u32,
    bookings: &'a [Booking],
}

/// File-backed store keeping the collection as one JSON document under a
/// well-known path. Saves go through a sibling temp file plus rename, so a
/// crash mid-write leaves the previous payload intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, raw: &str) -> Result<BookingCollection, serde_json::Error> {
        match serde_json::from_str(raw)? {
            StoredPayload::Versioned(payload) => {
                if payload.schema_version > BOOKING_SCHEMA_VERSION {
                    warn!(
                        "Booking state at {} has schema version {} (supported: {}), starting empty",
                        self.path.display(),
                        payload.schema_version,
                        BOOKING_SCHEMA_VERSION
                    );
                    return Ok(BookingCollection::new());
                }
                Ok(payload.bookings)
            }
            StoredPayload::Legacy(bookings) => {
                debug!("Loaded pre-versioning booking payload from {}", self.path.display());
                Ok(bookings)
            }
        }
    }

    fn write_atomic(&self, payload: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(payload.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)
    }
}

impl BookingStore for JsonFileStore {
    fn load(&self) -> BookingCollection {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No booking state at {}, starting empty", self.path.display());
                return BookingCollection::new();
            }
            Err(err) => {
                warn!("Could not read booking state from {}: {}", self.path.display(), err);
                return BookingCollection::new();
            }
        };

        self.parse(&raw).unwrap_or_else(|err| {
            // A poisoned single blob has no finer-grained recovery; heal to empty.
            warn!(
                "Corrupt booking state at {} ({}), recovering with empty collection",
                self.path.display(),
                err
            );
            BookingCollection::new()
        })
    }

    fn save(&self, bookings: &BookingCollection) -> Result<(), BookingError> {
        let payload = serde_json::to_string_pretty(&PersistedBookingsRef {
            schema_version: BOOKING_SCHEMA_VERSION,
            bookings,
        })
        .map_err(|err| BookingError::StorageUnavailable(err.to_string()))?;

        self.write_atomic(&payload)
            .map_err(|err| BookingError::StorageUnavailable(err.to_string()))?;

        debug!("Saved {} booking(s) to {}", bookings.len(), self.path.display());
        Ok(())
    }
}

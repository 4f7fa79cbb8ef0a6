use std::sync::Arc;

use assert_matches::assert_matches;
use booking_cell::models::{BookingCollection, BookingError};
use booking_cell::services::booking::BookingService;
use booking_cell::services::store::{BookingStore, JsonFileStore};
use doctor_cell::models::{Doctor, Weekday};
use doctor_cell::services::catalog::DoctorCatalog;
use tempfile::TempDir;
use uuid::Uuid;

fn test_doctor(id: i64, name: &str, availability: Vec<Weekday>) -> Doctor {
    Doctor {
        id,
        name: name.to_string(),
        specialty: "Cardiologist".to_string(),
        education: "MBBS, MD".to_string(),
        designation: "Consultant".to_string(),
        workplace: "National Heart Foundation Hospital".to_string(),
        experience: "10+ years".to_string(),
        fee: 1500,
        image: format!("https://example.com/doctor-{}.jpg", id),
        registration_number: format!("BMDC-{:05}", id),
        availability,
    }
}

// Doctor 3 has no availability on any weekday, so enforcement always rejects it.
fn test_catalog() -> Arc<DoctorCatalog> {
    Arc::new(DoctorCatalog::new(vec![
        test_doctor(1, "Dr. A", Weekday::ALL.to_vec()),
        test_doctor(2, "Dr. B", Weekday::ALL.to_vec()),
        test_doctor(3, "Dr. C", vec![]),
    ]))
}

fn service_in(dir: &TempDir) -> BookingService {
    BookingService::with_store(
        test_catalog(),
        Box::new(JsonFileStore::new(dir.path().join("bookings.json"))),
        true,
    )
}

#[test]
fn booking_lifecycle_for_one_doctor() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);

    let booking = service.book(1).unwrap();
    assert_eq!(booking.doctor_id, 1);

    let bookings = service.list();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].doctor_id, 1);

    let err = service.book(1).unwrap_err();
    assert_matches!(err, BookingError::AlreadyBooked { ref doctor_name } if doctor_name == "Dr. A");

    let removed = service.cancel(booking.id).unwrap().unwrap();
    assert_eq!(removed.id, booking.id);
    assert!(service.list().is_empty());
}

#[test]
fn unknown_doctor_is_rejected() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);

    let err = service.book(999).unwrap_err();
    assert_matches!(err, BookingError::DoctorNotFound);
    assert!(service.list().is_empty());
}

#[test]
fn booking_snapshots_doctor_display_fields() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);

    let booking = service.book(2).unwrap();
    assert_eq!(booking.doctor_name, "Dr. B");
    assert_eq!(booking.specialty, "Cardiologist");
    assert_eq!(booking.education, "MBBS, MD");
    assert_eq!(booking.fee, 1500);
    assert_eq!(booking.doctor_image, "https://example.com/doctor-2.jpg");
}

#[test]
fn duplicate_check_is_per_doctor() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);

    service.book(1).unwrap();
    service.book(2).unwrap();

    let bookings = service.list();
    assert_eq!(bookings.len(), 2);
    // Insertion order is booking order.
    assert_eq!(bookings[0].doctor_id, 1);
    assert_eq!(bookings[1].doctor_id, 2);
}

#[test]
fn cancel_removes_exactly_one_entry() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);

    let first = service.book(1).unwrap();
    service.book(2).unwrap();

    service.cancel(first.id).unwrap();

    let bookings = service.list();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].doctor_id, 2);
}

#[test]
fn cancel_of_unknown_id_is_an_idempotent_noop() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);
    service.book(1).unwrap();

    let stale_id = Uuid::new_v4();
    assert!(service.cancel(stale_id).unwrap().is_none());
    assert!(service.cancel(stale_id).unwrap().is_none());
    assert_eq!(service.list().len(), 1);
}

#[test]
fn unavailable_doctor_is_rejected_when_enforcement_is_on() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);

    let err = service.book(3).unwrap_err();
    assert_matches!(err, BookingError::DoctorUnavailable { ref doctor_name } if doctor_name == "Dr. C");
    assert!(service.list().is_empty());
}

#[test]
fn enforcement_can_be_disabled_to_match_the_ui_only_guard() {
    let dir = TempDir::new().unwrap();
    let service = BookingService::with_store(
        test_catalog(),
        Box::new(JsonFileStore::new(dir.path().join("bookings.json"))),
        false,
    );

    let booking = service.book(3).unwrap();
    assert_eq!(booking.doctor_id, 3);
}

#[test]
fn bookings_persist_across_service_instances() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bookings.json");

    let first = BookingService::with_store(
        test_catalog(),
        Box::new(JsonFileStore::new(&path)),
        true,
    );
    first.book(1).unwrap();

    let second = BookingService::with_store(
        test_catalog(),
        Box::new(JsonFileStore::new(&path)),
        true,
    );
    assert_eq!(second.list().len(), 1);
    assert_matches!(second.book(1).unwrap_err(), BookingError::AlreadyBooked { .. });
}

mockall::mock! {
    Store {}

    impl BookingStore for Store {
        fn load(&self) -> BookingCollection;
        fn save(&self, bookings: &BookingCollection) -> Result<(), BookingError>;
    }
}

#[test]
fn failed_save_surfaces_storage_unavailable() {
    let mut store = MockStore::new();
    store.expect_load().returning(BookingCollection::new);
    store
        .expect_save()
        .returning(|_| Err(BookingError::StorageUnavailable("disk full".to_string())));

    let service = BookingService::with_store(test_catalog(), Box::new(store), true);
    let err = service.book(1).unwrap_err();
    assert_matches!(err, BookingError::StorageUnavailable(_));
}

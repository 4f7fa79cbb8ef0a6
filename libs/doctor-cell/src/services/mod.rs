pub mod availability;
pub mod catalog;

pub use availability::AvailabilityService;
pub use catalog::DoctorCatalog;

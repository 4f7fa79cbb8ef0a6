use crate::models::{Doctor, Weekday};

/// Answers "is this doctor bookable on a given weekday".
///
/// The reference day is always caller-supplied; this service never reads the
/// clock, which keeps it pure and independently testable.
#[derive(Debug, Default, Clone, Copy)]
pub struct AvailabilityService;

impl AvailabilityService {
    pub fn new() -> Self {
        Self
    }

    pub fn is_available(&self, doctor: &Doctor, reference_day: Weekday) -> bool {
        doctor.availability.contains(&reference_day)
    }

    /// Days from `reference_day` to the doctor's next available weekday.
    ///
    /// Returns 0 when the doctor is available on the reference day itself and
    /// `None` when the doctor has no availability at all.
    pub fn days_until_available(&self, doctor: &Doctor, reference_day: Weekday) -> Option<u32> {
        doctor
            .availability
            .iter()
            .map(|&day| reference_day.days_until(day))
            .min()
    }
}

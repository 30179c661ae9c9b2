//! Booking and query failures surfaced to callers.

use chrono::NaiveDate;
use thiserror::Error;

/// Result alias used by every registry operation.
pub type BookingResult<T> = Result<T, BookingError>;

/// Reasons a registry query or booking is rejected.
///
/// Validation always happens before the registry is touched, so an error
/// never leaves a partially applied booking behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BookingError {
    /// A required query field was missing or the date range is inverted.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The booking starts before the current date.
    #[error("booking starting {start} is in the past (today is {today})")]
    PastDate {
        /// Requested start date.
        start: NaiveDate,
        /// Date the registry considered to be today.
        today: NaiveDate,
    },
    /// The car already has a booking or maintenance hold for these dates.
    #[error("{registration} is already booked from {start} to {end}")]
    OverlapConflict {
        /// Registration number of the contested car.
        registration: String,
        /// Start of the existing, conflicting booking.
        start: NaiveDate,
        /// End of the existing, conflicting booking.
        end: NaiveDate,
    },
    /// The booking references a car that is not part of the fleet.
    #[error("no car with registration {0} in the fleet")]
    UnknownCar(String),
}

impl BookingError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = BookingError::OverlapConflict {
            registration: "XX11 1UR".to_string(),
            start: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 5, 8).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "XX11 1UR is already booked from 2024-05-01 to 2024-05-08"
        );
        assert_eq!(
            BookingError::invalid("make is required").to_string(),
            "invalid argument: make is required"
        );
    }
}

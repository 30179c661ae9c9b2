#![warn(clippy::all, missing_docs)]

//! Booking logic for a car rental desk.
//!
//! This crate hosts the fleet and booking models, the availability and
//! overlap checks, blended group pricing, and the configuration and
//! fleet-file loading used by the `rental-desk` front end.

pub mod clock;
pub mod config;
pub mod error;
pub mod fleet;
pub mod interval;
pub mod models;
pub mod registry;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AppConfig;
pub use error::{BookingError, BookingResult};
pub use fleet::{FleetFile, SeedBooking};
pub use interval::DateRange;
pub use models::{Booking, Car, Criteria, Renter};
pub use registry::RentalRegistry;

#![allow(missing_docs)]

//! Seed fleet file: the cars to register and any bookings to replay.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    clock::Clock,
    models::{Booking, Car, Renter},
    registry::RentalRegistry,
};

/// On-disk fleet description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetFile {
    #[serde(default)]
    pub cars: Vec<Car>,
    #[serde(default)]
    pub bookings: Vec<SeedBooking>,
}

/// Booking stored in a fleet file, referring to its car by registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedBooking {
    pub registration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renter: Option<Renter>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Quoted price; the car's own price when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_cost: Option<f64>,
    #[serde(default)]
    pub maintenance: bool,
}

impl FleetFile {
    /// Load a fleet file, returning an empty fleet if it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("fleet file {} not found, starting empty", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read fleet {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse fleet {}", path.display()))
    }

    /// Persist the fleet, creating parent directories if needed.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create fleet directory {}", parent.display()))?;
        }

        let serialized = serde_json::to_string_pretty(self).context("failed to serialize fleet")?;
        fs::write(path, serialized)
            .with_context(|| format!("failed to write fleet {}", path.display()))
    }

    /// Build a registry holding these cars, then replay the bookings through
    /// the normal checks. Seed bookings that fail validation are skipped.
    pub fn into_registry(self, clock: impl Clock + 'static) -> RentalRegistry {
        let registry = RentalRegistry::with_clock(clock);
        for car in &self.cars {
            registry.add_car(car.clone());
        }

        for seed in self.bookings {
            let Some(car) = self
                .cars
                .iter()
                .find(|car| car.registration() == seed.registration)
            else {
                warn!("skipping seed booking for unknown car {}", seed.registration);
                continue;
            };
            let registration = seed.registration.clone();
            if let Err(err) = registry.add_booking(seed.into_booking(car.clone())) {
                warn!("skipping seed booking for {registration}: {err}");
            }
        }
        registry
    }
}

impl SeedBooking {
    fn into_booking(self, car: Car) -> Booking {
        let booking = match self.renter {
            Some(renter) if !self.maintenance => Booking::rental(car, renter, self.start, self.end),
            _ => Booking::maintenance(car, self.start, self.end),
        };
        match self.daily_cost {
            Some(cost) => booking.with_daily_cost(cost),
            None => booking,
        }
    }
}

#![allow(missing_docs)]

//! Shared domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::interval::DateRange;

/// A car in the rental fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    registration: String,
    /// Manufacturer (e.g. `VW`).
    pub make: String,
    /// Model name (e.g. `Golf`).
    pub model: String,
    /// Pricing tier shared by comparable models.
    pub rental_group: String,
    /// Daily rental price.
    pub cost_per_day: f64,
}

impl Car {
    /// Create a car keyed by its registration number.
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        registration: impl Into<String>,
        rental_group: impl Into<String>,
        cost_per_day: f64,
    ) -> Self {
        Self {
            registration: registration.into(),
            make: make.into(),
            model: model.into(),
            rental_group: rental_group.into(),
            cost_per_day,
        }
    }

    /// Registration number identifying the car. Fixed for the car's lifetime.
    pub fn registration(&self) -> &str {
        &self.registration
    }

    /// Returns a user-facing label such as `VW Golf (XX11 1UR)`.
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.make, self.model, self.registration)
    }
}

/// Person renting a car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Renter {
    pub surname: String,
    pub first_name: String,
    /// Driving licence identifier.
    pub licence: String,
    pub date_of_birth: NaiveDate,
}

impl Renter {
    pub fn new(
        surname: impl Into<String>,
        first_name: impl Into<String>,
        licence: impl Into<String>,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            surname: surname.into(),
            first_name: first_name.into(),
            licence: licence.into(),
            date_of_birth,
        }
    }
}

/// A reservation of one car over an inclusive date range.
///
/// Maintenance holds are bookings without a renter; they block the car
/// exactly like a rental does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    car: Car,
    renter: Option<Renter>,
    start: NaiveDate,
    end: NaiveDate,
    daily_cost: f64,
    maintenance: bool,
}

impl Booking {
    /// Rental at the car's current daily price.
    pub fn rental(car: Car, renter: Renter, start: NaiveDate, end: NaiveDate) -> Self {
        let daily_cost = car.cost_per_day;
        Self {
            car,
            renter: Some(renter),
            start,
            end,
            daily_cost,
            maintenance: false,
        }
    }

    /// Maintenance hold taking the car out of service.
    pub fn maintenance(car: Car, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            car,
            renter: None,
            start,
            end,
            daily_cost: 0.0,
            maintenance: true,
        }
    }

    /// Override the quoted daily price, e.g. with a blended group price.
    pub fn with_daily_cost(mut self, daily_cost: f64) -> Self {
        self.daily_cost = daily_cost;
        self
    }

    /// Snapshot of the car taken when the booking was built.
    pub fn car(&self) -> &Car {
        &self.car
    }

    pub fn registration(&self) -> &str {
        self.car.registration()
    }

    pub fn renter(&self) -> Option<&Renter> {
        self.renter.as_ref()
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn daily_cost(&self) -> f64 {
        self.daily_cost
    }

    pub fn is_maintenance(&self) -> bool {
        self.maintenance
    }

    /// Days occupied by the booking.
    pub fn period(&self) -> DateRange {
        DateRange::new(self.start, self.end)
    }
}

/// Search filter for [`crate::RentalRegistry::matching_cars`].
///
/// With neither make nor model set the whole fleet matches. A missing date
/// leaves that side of the requested period open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    pub make: Option<String>,
    pub model: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make(mut self, make: impl Into<String>) -> Self {
        self.make = Some(make.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn from_date(mut self, from: NaiveDate) -> Self {
        self.from = Some(from);
        self
    }

    pub fn to_date(mut self, to: NaiveDate) -> Self {
        self.to = Some(to);
        self
    }

    /// `true` when no make/model filter is present.
    pub fn is_unfiltered(&self) -> bool {
        self.make.is_none() && self.model.is_none()
    }

    /// `true` when the car's make and model both equal the requested ones.
    pub fn matches(&self, car: &Car) -> bool {
        self.make.as_deref() == Some(car.make.as_str())
            && self.model.as_deref() == Some(car.model.as_str())
    }

    /// Date filter, or `None` when no dates were given.
    pub fn period(&self) -> Option<DateRange> {
        if self.from.is_none() && self.to.is_none() {
            return None;
        }
        Some(DateRange::bounded_by(self.from, self.to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn golf() -> Car {
        Car::new("VW", "Golf", "XX11 1UR", "B2", 90.0)
    }

    #[test]
    fn rental_snapshots_current_price() {
        let renter = Renter::new(
            "Hydrogen",
            "Joe",
            "HYDRO010190JX8NM",
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        );
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let booking = Booking::rental(golf(), renter, start, start);
        assert_eq!(booking.daily_cost(), 90.0);
        assert!(!booking.is_maintenance());
        assert_eq!(booking.with_daily_cost(67.5).daily_cost(), 67.5);
    }

    #[test]
    fn maintenance_has_no_renter() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let booking = Booking::maintenance(golf(), start, start);
        assert!(booking.renter().is_none());
        assert!(booking.is_maintenance());
        assert_eq!(booking.registration(), "XX11 1UR");
    }

    #[test]
    fn criteria_needs_both_make_and_model() {
        assert!(Criteria::new().is_unfiltered());
        assert!(Criteria::new().make("VW").model("Golf").matches(&golf()));
        assert!(!Criteria::new().make("VW").matches(&golf()));
        assert!(!Criteria::new().make("VW").model("Polo").matches(&golf()));
    }

    #[test]
    fn criteria_period_only_when_dated() {
        assert!(Criteria::new().make("VW").period().is_none());
        let from = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let period = Criteria::new().from_date(from).period().unwrap();
        assert_eq!(period.start, from);
        assert_eq!(period.end, NaiveDate::MAX);
    }

    #[test]
    fn display_name_includes_registration() {
        assert_eq!(golf().display_name(), "VW Golf (XX11 1UR)");
    }
}

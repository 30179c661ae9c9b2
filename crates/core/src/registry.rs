//! Thread-safe fleet and booking registry.

use std::{collections::BTreeMap, sync::Arc};

use chrono::{Days, NaiveDate};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::{
    clock::{Clock, SystemClock},
    error::{BookingError, BookingResult},
    interval::DateRange,
    models::{Booking, Car, Criteria},
};

/// Default number of days ahead, exclusive, that count as "upcoming".
pub const DEFAULT_UPCOMING_WINDOW_DAYS: u64 = 8;

/// Registry of cars and their bookings.
///
/// Cloning yields another handle onto the same registry. Every operation
/// holds the registry lock for its whole duration, so two callers can never
/// both book the same car for overlapping days.
#[derive(Clone)]
pub struct RentalRegistry {
    inner: Arc<Mutex<Inner>>,
    clock: Arc<dyn Clock>,
    upcoming_window_days: u64,
}

#[derive(Default)]
struct Inner {
    cars: Vec<Car>,
    bookings: Vec<Booking>,
}

impl Default for RentalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RentalRegistry {
    /// Empty registry using the local wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Empty registry reading "today" from the given clock.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            clock: Arc::new(clock),
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
        }
    }

    /// Change how many days ahead [`Self::upcoming_rentals`] looks.
    pub fn with_upcoming_window(mut self, days: u64) -> Self {
        self.upcoming_window_days = days;
        self
    }

    /// The date currently treated as today.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Add a car to the fleet. Registration numbers are not checked for duplicates.
    pub fn add_car(&self, car: Car) {
        debug!("adding {} to fleet", car.display_name());
        self.inner.lock().cars.push(car);
    }

    /// Snapshot of the fleet in insertion order.
    pub fn cars(&self) -> Vec<Car> {
        self.inner.lock().cars.clone()
    }

    /// Snapshot of every accepted booking in acceptance order.
    pub fn bookings(&self) -> Vec<Booking> {
        self.inner.lock().bookings.clone()
    }

    /// Cars matching the criteria that are free for its period.
    pub fn matching_cars(&self, criteria: &Criteria) -> Vec<Car> {
        self.inner.lock().matching_cars(criteria)
    }

    /// Cars of the given make and model free for the whole `[start, end]` period.
    ///
    /// Every argument is required.
    pub fn available_cars(
        &self,
        make: Option<&str>,
        model: Option<&str>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> BookingResult<Vec<Car>> {
        let criteria = availability_criteria(make, model, start, end)?;
        Ok(self.inner.lock().matching_cars(&criteria))
    }

    /// Accept a booking after checking its dates, its car and existing bookings.
    pub fn add_booking(&self, booking: Booking) -> BookingResult<()> {
        let today = self.today();
        let mut inner = self.inner.lock();
        inner.add_booking(booking, today)
    }

    /// Bookings starting after today and inside the upcoming window, earliest first.
    pub fn upcoming_rentals(&self) -> Vec<Booking> {
        let today = self.today();
        let horizon = today
            .checked_add_days(Days::new(self.upcoming_window_days))
            .unwrap_or(NaiveDate::MAX);

        let inner = self.inner.lock();
        let mut upcoming: Vec<Booking> = inner
            .bookings
            .iter()
            .filter(|booking| booking.start() > today && booking.start() < horizon)
            .cloned()
            .collect();
        upcoming.sort_by_key(|booking| booking.start());
        upcoming
    }

    /// Take a car out of service for `[start, end]`.
    ///
    /// The hold is validated exactly like a rental, so it fails when the car
    /// is already booked for any of those days.
    pub fn register_car_maintenance(
        &self,
        car: &Car,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BookingResult<()> {
        let booking = Booking::maintenance(car.clone(), start, end);
        self.add_booking(booking)
    }

    /// Average daily price of each rental group across the fleet.
    pub fn blended_price(&self) -> BTreeMap<String, f64> {
        self.inner.lock().blended_price()
    }

    /// Like [`Self::available_cars`], but each returned car carries its group's
    /// blended price. The returned cars are copies and the fleet is left as is.
    pub fn matching_cars_with_blended_price(
        &self,
        make: Option<&str>,
        model: Option<&str>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> BookingResult<Vec<Car>> {
        let criteria = availability_criteria(make, model, start, end)?;
        let inner = self.inner.lock();
        let prices = inner.blended_price();
        Ok(inner
            .matching_cars(&criteria)
            .into_iter()
            .map(|mut car| {
                if let Some(price) = prices.get(&car.rental_group) {
                    car.cost_per_day = *price;
                }
                car
            })
            .collect())
    }
}

impl Inner {
    fn matching_cars(&self, criteria: &Criteria) -> Vec<Car> {
        if criteria.is_unfiltered() {
            return self.cars.clone();
        }

        let period = criteria.period();
        let cars: Vec<Car> = self
            .cars
            .iter()
            .filter(|car| criteria.matches(car))
            .filter(|car| match &period {
                Some(period) => self.conflict(car.registration(), period).is_none(),
                None => true,
            })
            .cloned()
            .collect();
        debug!(
            "{} car(s) match {:?} {:?}",
            cars.len(),
            criteria.make,
            criteria.model
        );
        cars
    }

    fn add_booking(&mut self, booking: Booking, today: NaiveDate) -> BookingResult<()> {
        if let Err(err) = self.validate(&booking, today) {
            warn!("rejected booking for {}: {err}", booking.registration());
            return Err(err);
        }

        info!(
            "accepted {} for {} from {} to {}",
            if booking.is_maintenance() {
                "maintenance"
            } else {
                "rental"
            },
            booking.registration(),
            booking.start(),
            booking.end()
        );
        self.bookings.push(booking);
        Ok(())
    }

    fn validate(&self, booking: &Booking, today: NaiveDate) -> BookingResult<()> {
        let period = booking.period();
        if period.is_inverted() {
            return Err(BookingError::invalid(format!(
                "end date {} precedes start date {}",
                period.end, period.start
            )));
        }
        if booking.start() < today {
            return Err(BookingError::PastDate {
                start: booking.start(),
                today,
            });
        }

        let registration = booking.registration();
        if !self
            .cars
            .iter()
            .any(|car| car.registration() == registration)
        {
            return Err(BookingError::UnknownCar(registration.to_string()));
        }

        if let Some(existing) = self.conflict(registration, &period) {
            return Err(BookingError::OverlapConflict {
                registration: registration.to_string(),
                start: existing.start(),
                end: existing.end(),
            });
        }
        Ok(())
    }

    /// First booking of the car overlapping `period`, if any.
    fn conflict(&self, registration: &str, period: &DateRange) -> Option<&Booking> {
        self.bookings
            .iter()
            .filter(|booking| booking.registration() == registration)
            .find(|booking| booking.period().overlaps(period))
    }

    fn blended_price(&self) -> BTreeMap<String, f64> {
        let mut totals: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for car in &self.cars {
            let entry = totals.entry(car.rental_group.clone()).or_insert((0.0, 0));
            entry.0 += car.cost_per_day;
            entry.1 += 1;
        }
        totals
            .into_iter()
            .map(|(group, (total, count))| (group, total / count as f64))
            .collect()
    }
}

fn availability_criteria(
    make: Option<&str>,
    model: Option<&str>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> BookingResult<Criteria> {
    let make = make.ok_or_else(|| BookingError::invalid("make is required"))?;
    let model = model.ok_or_else(|| BookingError::invalid("model is required"))?;
    let start = start.ok_or_else(|| BookingError::invalid("start date is required"))?;
    let end = end.ok_or_else(|| BookingError::invalid("end date is required"))?;
    if end < start {
        return Err(BookingError::invalid(format!(
            "end date {end} precedes start date {start}"
        )));
    }

    Ok(Criteria::new()
        .make(make)
        .model(model)
        .from_date(start)
        .to_date(end))
}

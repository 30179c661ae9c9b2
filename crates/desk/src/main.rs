mod commands;

use std::fs::{self, OpenOptions};

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

use commands::{CommandLine, Commands};
use rental_core::{
    config::{self, AppConfig},
    Booking, BookingError, Car, FleetFile, Renter, SystemClock,
};

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "rental-desk.log";

fn main() -> Result<()> {
    let commands = CommandLine::parse_args();
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;
    let fleet_path = commands.fleet.unwrap_or(config.fleet_path);
    let registry = FleetFile::load(&fleet_path)?
        .into_registry(SystemClock)
        .with_upcoming_window(config.upcoming_window_days);
    info!(
        "loaded {} car(s) and {} booking(s) from {}",
        registry.cars().len(),
        registry.bookings().len(),
        fleet_path.display()
    );

    match commands.command {
        Commands::Fleet => {
            print_cars(&registry.cars());
            Ok(())
        }
        Commands::Available {
            make,
            model,
            from,
            to,
            blended,
        } => {
            let cars = if blended {
                registry.matching_cars_with_blended_price(
                    make.as_deref(),
                    model.as_deref(),
                    from,
                    to,
                )?
            } else {
                registry.available_cars(make.as_deref(), model.as_deref(), from, to)?
            };
            print_cars(&cars);
            Ok(())
        }
        Commands::Prices => {
            for (group, price) in registry.blended_price() {
                println!("{group:<6} {price:>8.2}");
            }
            Ok(())
        }
        Commands::Upcoming => {
            for booking in registry.upcoming_rentals() {
                let who = match booking.renter() {
                    Some(renter) => format!("{} {}", renter.first_name, renter.surname),
                    None => "maintenance".to_string(),
                };
                println!(
                    "{} → {}  {:<24} {}",
                    booking.start(),
                    booking.end(),
                    booking.car().display_name(),
                    who
                );
            }
            Ok(())
        }
        Commands::Book {
            registration,
            from,
            to,
            maintenance,
            surname,
            first_name,
            licence,
            born,
        } => {
            let car = registry
                .cars()
                .into_iter()
                .find(|car| car.registration() == registration)
                .ok_or_else(|| BookingError::UnknownCar(registration.clone()))?;

            if maintenance {
                if let Err(err) = registry.register_car_maintenance(&car, from, to) {
                    warn!("maintenance hold for {registration} refused: {err}");
                    return Err(err.into());
                }
                println!("{}", accepted_line(&car.display_name(), from, to, true));
                return Ok(());
            }

            let renter = match (surname, first_name, licence, born) {
                (Some(surname), Some(first_name), Some(licence), Some(born)) => {
                    Renter::new(surname, first_name, licence, born)
                }
                _ => return Err(anyhow!("renter details are required for a rental")),
            };
            let label = car.display_name();
            if let Err(err) = registry.add_booking(Booking::rental(car, renter, from, to)) {
                warn!("rental of {registration} refused: {err}");
                return Err(err.into());
            }
            println!("{}", accepted_line(&label, from, to, false));
            Ok(())
        }
    }
}

/// The desk registry is rebuilt from the fleet file on every run, so an
/// accepted booking is never kept.
fn accepted_line(label: &str, from: NaiveDate, to: NaiveDate, maintenance: bool) -> String {
    let kind = if maintenance { "maintenance hold" } else { "booking" };
    format!("{label}: {kind} from {from} to {to} accepted (not saved)")
}

fn print_cars(cars: &[Car]) {
    if cars.is_empty() {
        println!("No cars found.");
        return;
    }
    for car in cars {
        println!(
            "{:<10} {:<8} {:<10} {:<4} {:>8.2}",
            car.registration(),
            car.make,
            car.model,
            car.rental_group,
            car.cost_per_day
        );
    }
}

/// Desk activity goes to stderr and is appended to `./logs/rental-desk.log`.
fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join(LOG_DIR);
    fs::create_dir_all(&log_dir)?;
    let desk_log = log_dir.join(LOG_FILE);

    let env_filter = EnvFilter::from_default_env();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr);

    let desk_log_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_ansi(false)
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&desk_log)
                .expect("failed to open rental-desk log")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(desk_log_layer)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_line_says_nothing_was_saved() {
        let from = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();

        assert_eq!(
            accepted_line("VW Golf (XX11 1UR)", from, to, false),
            "VW Golf (XX11 1UR): booking from 2024-05-01 to 2024-05-03 accepted (not saved)"
        );
        let hold = accepted_line("VW Polo (XX13 3UR)", from, to, true);
        assert!(hold.starts_with("VW Polo (XX13 3UR): maintenance hold"));
        assert!(!hold.contains("booked"));
    }
}

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rental-desk")]
#[command(about = "Front desk for the car rental registry.")]
pub struct CommandLine {
    /// Fleet file to load instead of the configured one
    #[arg(long, global = true)]
    pub fleet: Option<std::path::PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every car in the fleet
    #[command(alias = "f")]
    Fleet,
    /// Find cars of a make and model free for a period
    #[command(alias = "a")]
    Available {
        #[arg(long)]
        make: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Quote each car at its rental group's blended price
        #[arg(long)]
        blended: bool,
    },
    /// Show the blended daily price of each rental group
    #[command(alias = "p")]
    Prices,
    /// List rentals starting within the upcoming window
    #[command(alias = "u")]
    Upcoming,
    /// Check whether a booking would be accepted
    #[command(alias = "b")]
    Book {
        #[arg(long)]
        registration: String,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
        /// Book the car for maintenance instead of a rental
        #[arg(long)]
        maintenance: bool,
        #[arg(long, required_unless_present = "maintenance")]
        surname: Option<String>,
        #[arg(long, required_unless_present = "maintenance")]
        first_name: Option<String>,
        /// Driving licence identifier
        #[arg(long, required_unless_present = "maintenance")]
        licence: Option<String>,
        /// Date of birth
        #[arg(long, required_unless_present = "maintenance")]
        born: Option<NaiveDate>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

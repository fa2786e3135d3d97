use crate::core::{FleetConfig, DEFAULT_LATE_FEE_RATE};
use crate::types::{CarDetails, Money, RecordId};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Manage a car rental fleet stored in flat files
#[derive(Parser, Debug)]
#[command(name = "fleet-rental")]
#[command(about = "Manage cars, customers and rentals stored in flat files", long_about = None)]
pub struct CliArgs {
    /// Directory holding cars.txt, customers.txt and rentals.txt
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        env = "FLEET_DATA_DIR",
        default_value = ".",
        global = true
    )]
    pub data_dir: PathBuf,

    /// Fee charged per late day on return
    #[arg(
        long = "late-fee-rate",
        value_name = "AMOUNT",
        global = true,
        help = "Fee per late day (default: 500.00)"
    )]
    pub late_fee_rate: Option<Money>,

    /// Maximum records per collection
    #[arg(
        long = "capacity",
        value_name = "COUNT",
        global = true,
        help = "Maximum records per collection (default: unbounded)"
    )]
    pub capacity: Option<usize>,

    /// Accept rentals for customer ids that are not on the roster
    #[arg(long = "allow-unknown-customers", global = true)]
    pub allow_unknown_customers: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Car catalog management
    #[command(subcommand)]
    Car(CarCommand),

    /// Customer roster management
    #[command(subcommand)]
    Customer(CustomerCommand),

    /// Renting and returning cars
    #[command(subcommand)]
    Rental(RentalCommand),
}

#[derive(Subcommand, Debug)]
pub enum CarCommand {
    /// Add a car to the catalog
    Add(CarFields),

    /// List cars
    List {
        /// Only cars that can be rented now
        #[arg(long)]
        available: bool,

        /// Only cars with a damage report
        #[arg(long)]
        damaged: bool,
    },

    /// Find cars by model or plate substring
    Search { keyword: String },

    /// Replace a car's brand, model, plate and rent
    Update {
        id: RecordId,

        #[command(flatten)]
        fields: CarFields,
    },

    /// Remove a car from the catalog
    Delete { id: RecordId },

    /// Report damage on a car
    Damage { id: RecordId, report: String },

    /// Clear a car's damage report
    ClearDamage { id: RecordId },
}

#[derive(Args, Debug)]
pub struct CarFields {
    #[arg(long)]
    pub brand: String,

    #[arg(long)]
    pub model: String,

    #[arg(long)]
    pub plate: String,

    /// Rent per day
    #[arg(long = "rent", value_name = "AMOUNT")]
    pub rent_per_day: Money,
}

#[derive(Subcommand, Debug)]
pub enum CustomerCommand {
    /// Add a customer to the roster
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        address: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long)]
        license: String,
    },

    /// List customers
    List,
}

#[derive(Subcommand, Debug)]
pub enum RentalCommand {
    /// Rent an available car
    Rent {
        #[arg(long = "car", value_name = "CAR_ID")]
        car_id: RecordId,

        #[arg(long = "customer", value_name = "CUSTOMER_ID")]
        customer_id: RecordId,

        #[arg(long)]
        days: u32,

        /// Rental date (free text)
        #[arg(long)]
        date: String,
    },

    /// Return a rented car
    Return {
        id: RecordId,

        /// Actual return date (free text)
        #[arg(long)]
        date: String,

        #[arg(long = "late-days", default_value_t = 0)]
        late_days: u32,
    },

    /// List rentals
    List {
        /// Only rentals not yet returned
        #[arg(long)]
        active: bool,
    },
}

impl CliArgs {
    /// Build the fleet configuration from global flags
    pub fn to_config(&self) -> FleetConfig {
        FleetConfig::new(
            self.data_dir.clone(),
            self.late_fee_rate.unwrap_or(DEFAULT_LATE_FEE_RATE),
            self.capacity,
            !self.allow_unknown_customers,
        )
    }
}

impl From<CarFields> for CarDetails {
    fn from(fields: CarFields) -> Self {
        CarDetails::new(fields.brand, fields.model, fields.plate, fields.rent_per_day)
    }
}

//! Command dispatch
//!
//! Maps parsed subcommands onto [`Fleet`] operations and prints one plain
//! line per affected record.

use super::args::{CarCommand, CliArgs, Command, CustomerCommand, RentalCommand};
use crate::core::{Fleet, Storage};
use crate::io::FileStorage;
use crate::types::{Car, Customer, CustomerDetails, FleetError, Rental};
use std::io::Write;

/// Open the fleet in the configured data directory and run one command
pub fn run(args: CliArgs, output: &mut dyn Write) -> Result<(), String> {
    let config = args.to_config();
    let storage = FileStorage::new(config.data_dir.clone());
    let mut fleet = Fleet::open(storage, &config);

    execute(&mut fleet, args.command, output)
}

/// Run one command against an open fleet
///
/// # Errors
///
/// Returns the failing operation's message, or a message for output that
/// could not be written.
pub fn execute<S: Storage>(
    fleet: &mut Fleet<S>,
    command: Command,
    output: &mut dyn Write,
) -> Result<(), String> {
    let lines = match command {
        Command::Car(command) => car_command(fleet, command),
        Command::Customer(command) => customer_command(fleet, command),
        Command::Rental(command) => rental_command(fleet, command),
    }
    .map_err(|e| e.to_string())?;

    for line in lines {
        writeln!(output, "{}", line).map_err(|e| format!("Failed to write output: {}", e))?;
    }
    Ok(())
}

fn car_command<S: Storage>(
    fleet: &mut Fleet<S>,
    command: CarCommand,
) -> Result<Vec<String>, FleetError> {
    let lines = match command {
        CarCommand::Add(fields) => {
            let car = fleet.add_car(fields.into())?;
            vec![format!("Car added: {}", car_line(&car))]
        }
        CarCommand::List { available, damaged } => {
            let cars: Vec<&Car> = match (available, damaged) {
                (false, false) => fleet.cars().iter().collect(),
                (true, false) => fleet.available_cars(),
                (false, true) => fleet.damaged_cars(),
                (true, true) => fleet
                    .available_cars()
                    .into_iter()
                    .filter(|car| car.is_damaged())
                    .collect(),
            };
            cars.into_iter().map(car_line).collect()
        }
        CarCommand::Search { keyword } => {
            let found = fleet.search_cars(&keyword);
            if found.is_empty() {
                vec!["Car not found.".to_string()]
            } else {
                found.into_iter().map(car_line).collect()
            }
        }
        CarCommand::Update { id, fields } => {
            let car = fleet.update_car(id, fields.into())?;
            vec![format!("Car updated: {}", car_line(&car))]
        }
        CarCommand::Delete { id } => {
            let car = fleet.delete_car(id)?;
            vec![format!("Car deleted: {}", car_line(&car))]
        }
        CarCommand::Damage { id, report } => {
            let car = fleet.report_damage(id, &report)?;
            vec![format!("Damage reported: {}", car_line(&car))]
        }
        CarCommand::ClearDamage { id } => {
            let car = fleet.clear_damage(id)?;
            vec![format!("Damage cleared: {}", car_line(&car))]
        }
    };
    Ok(lines)
}

fn customer_command<S: Storage>(
    fleet: &mut Fleet<S>,
    command: CustomerCommand,
) -> Result<Vec<String>, FleetError> {
    let lines = match command {
        CustomerCommand::Add {
            name,
            address,
            phone,
            license,
        } => {
            let customer =
                fleet.add_customer(CustomerDetails::new(name, address, phone, license))?;
            vec![format!("Customer added: {}", customer_line(&customer))]
        }
        CustomerCommand::List => fleet.customers().iter().map(customer_line).collect(),
    };
    Ok(lines)
}

fn rental_command<S: Storage>(
    fleet: &mut Fleet<S>,
    command: RentalCommand,
) -> Result<Vec<String>, FleetError> {
    let lines = match command {
        RentalCommand::Rent {
            car_id,
            customer_id,
            days,
            date,
        } => {
            let rental = fleet.rent_car(car_id, customer_id, days, &date)?;
            vec![format!(
                "Car rented: {} | Total cost: {:.2}",
                rental_line(&rental),
                rental.total_cost
            )]
        }
        RentalCommand::Return {
            id,
            date,
            late_days,
        } => {
            let outcome = fleet.return_car(id, &date, late_days)?;
            let mut lines = vec![format!(
                "Car returned: {} | Total payment: {:.2}",
                rental_line(&outcome.rental),
                outcome.rental.total_cost
            )];
            if !outcome.car_restored {
                lines.push(format!(
                    "Warning: car {} no longer exists; availability not restored",
                    outcome.rental.car_id
                ));
            }
            lines
        }
        RentalCommand::List { active } => {
            let rentals: Vec<&Rental> = if active {
                fleet.active_rentals()
            } else {
                fleet.rentals().iter().collect()
            };
            rentals.into_iter().map(rental_line).collect()
        }
    };
    Ok(lines)
}

fn car_line(car: &Car) -> String {
    let mut line = format!(
        "ID:{} | {} {} | Plate:{} | Rent:{:.2} | {}",
        car.id,
        car.brand,
        car.model,
        car.plate,
        car.rent_per_day,
        if car.available { "Available" } else { "Rented" }
    );
    if car.is_damaged() {
        line.push_str(&format!(" | Damage: {}", car.damage_report));
    }
    line
}

fn customer_line(customer: &Customer) -> String {
    format!(
        "ID:{} | {} | {} | {} | {}",
        customer.id, customer.name, customer.address, customer.phone, customer.license
    )
}

fn rental_line(rental: &Rental) -> String {
    format!(
        "ID:{} | Car:{} | Cust:{} | Days:{} | Cost:{:.2} | Late fee:{:.2} | {} | Rent:{} | Return:{}",
        rental.id,
        rental.car_id,
        rental.customer_id,
        rental.rent_days,
        rental.total_cost,
        rental.late_fee,
        if rental.returned { "Returned" } else { "Active" },
        rental.rent_date,
        rental.return_date
    )
}

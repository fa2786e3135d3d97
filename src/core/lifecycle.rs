//! Rental lifecycle engine
//!
//! This module provides the RentalEngine that enforces the rent/return state
//! machine by coordinating the car, customer and rental stores.
//!
//! The engine enforces business rules such as:
//! - A car must exist and be available to be rented
//! - A rental is Active until returned, and Returned is terminal
//! - The cost is fixed at rental time; only the late fee is added on return
//!
//! The engine works purely in memory. Persistence is the caller's concern
//! (see [`crate::core::Fleet`]).

use crate::core::record_store::RecordStore;
use crate::types::{
    check_text, Car, Customer, FleetError, Money, Rental, RecordId, MONEY_SCALE,
};
use rust_decimal::Decimal;

/// Rules applied by the engine, taken from [`crate::core::FleetConfig`]
#[derive(Debug, Clone, PartialEq)]
pub struct LifecyclePolicy {
    /// Fee per late day
    pub late_fee_rate: Money,
    /// Whether a rental's customer id must exist on the roster
    pub require_known_customer: bool,
}

/// Result of a successful return
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnOutcome {
    /// The rental in its Returned state
    pub rental: Rental,
    /// False when the rented car no longer exists and could not be made available
    pub car_restored: bool,
}

/// Rental state machine over borrowed stores
pub struct RentalEngine<'a> {
    cars: &'a mut RecordStore<Car>,
    customers: &'a RecordStore<Customer>,
    rentals: &'a mut RecordStore<Rental>,
    policy: &'a LifecyclePolicy,
}

impl<'a> RentalEngine<'a> {
    pub fn new(
        cars: &'a mut RecordStore<Car>,
        customers: &'a RecordStore<Customer>,
        rentals: &'a mut RecordStore<Rental>,
        policy: &'a LifecyclePolicy,
    ) -> Self {
        RentalEngine {
            cars,
            customers,
            rentals,
            policy,
        }
    }

    /// Rent an available car
    ///
    /// Creates an Active rental costing `days * rent_per_day` and marks the
    /// car unavailable. All checks run before anything is changed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `days` is zero or `rent_date` cannot be stored
    /// - The car does not exist (`CarNotFound`)
    /// - The car is already rented (`CarUnavailable`)
    /// - The customer is unknown and the policy requires known customers
    /// - The rental store is full
    pub fn rent_car(
        &mut self,
        car_id: RecordId,
        customer_id: RecordId,
        days: u32,
        rent_date: &str,
    ) -> Result<Rental, FleetError> {
        if days == 0 {
            return Err(FleetError::InvalidDays { days });
        }
        check_text("rent_date", rent_date)?;

        let car = self.cars.find(car_id)?;
        if !car.available {
            return Err(FleetError::car_unavailable(car_id));
        }

        if self.policy.require_known_customer {
            self.customers.find(customer_id)?;
        }

        let total_cost = car
            .rent_per_day
            .checked_mul(Decimal::from(days))
            .ok_or_else(|| FleetError::invalid_amount("total_cost", car.rent_per_day))?
            .round_dp(MONEY_SCALE);

        let rental_id = self.rentals.insert(|id| {
            Ok(Rental::open(
                id,
                car_id,
                customer_id,
                days,
                total_cost,
                rent_date.to_string(),
            ))
        })?;

        self.cars.update(car_id, |car| {
            car.available = false;
            Ok(())
        })?;

        tracing::info!(rental = rental_id, car = car_id, customer = customer_id, %total_cost, "car rented");

        self.rentals.find(rental_id).cloned()
    }

    /// Return an active rental
    ///
    /// Charges `late_days * late_fee_rate`, closes the rental and makes the
    /// car available again. If the car has since been deleted, the return
    /// still succeeds and the outcome reports `car_restored = false`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The rental does not exist (`RentalNotFound`)
    /// - The rental was already returned (`RentalAlreadyReturned`)
    /// - `return_date` cannot be stored
    pub fn return_car(
        &mut self,
        rental_id: RecordId,
        return_date: &str,
        late_days: u32,
    ) -> Result<ReturnOutcome, FleetError> {
        check_text("return_date", return_date)?;

        let late_fee = self
            .policy
            .late_fee_rate
            .checked_mul(Decimal::from(late_days))
            .ok_or_else(|| FleetError::invalid_amount("late_fee", self.policy.late_fee_rate))?
            .round_dp(MONEY_SCALE);

        let rental = self.rentals.update(rental_id, |rental| {
            if rental.returned {
                return Err(FleetError::rental_already_returned(rental.id));
            }
            rental.late_fee = late_fee;
            rental.total_cost = rental
                .total_cost
                .checked_add(late_fee)
                .ok_or_else(|| FleetError::invalid_amount("total_cost", late_fee))?;
            rental.returned = true;
            rental.return_date = return_date.to_string();
            Ok(rental.clone())
        })?;

        let car_restored = match self.cars.update(rental.car_id, |car| {
            car.available = true;
            Ok(())
        }) {
            Ok(()) => true,
            Err(_) => {
                tracing::warn!(
                    rental = rental.id,
                    car = rental.car_id,
                    "returned rental references a car that no longer exists"
                );
                false
            }
        };

        tracing::info!(rental = rental.id, car = rental.car_id, %late_fee, total_cost = %rental.total_cost, "car returned");

        Ok(ReturnOutcome {
            rental,
            car_restored,
        })
    }
}

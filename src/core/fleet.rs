//! Fleet repository
//!
//! This module provides the Fleet that owns the car, customer and rental
//! stores and keeps their backing resources in sync with memory.
//!
//! # Write-Through Persistence
//!
//! Every mutating operation is followed by a synchronous full rewrite of the
//! collections it touched. Car edits rewrite the cars resource, adding a
//! customer rewrites the customers resource, and renting or returning rewrites
//! both cars and rentals.
//!
//! # Failure Atomicity
//!
//! Each mutating operation snapshots the collections it may touch. If the
//! operation fails, including when the save itself fails, the snapshot is
//! put back, so callers never observe a partial change. After a failed save
//! the restored state is written back on a best-effort basis.
//!
//! # Loading
//!
//! Loading is permissive: a missing or unreadable resource leaves its
//! collection empty and malformed lines are skipped.

use crate::core::config::FleetConfig;
use crate::core::lifecycle::{LifecyclePolicy, RentalEngine, ReturnOutcome};
use crate::core::record_store::RecordStore;
use crate::core::traits::Storage;
use crate::io::codec::{decode, encode, DelimitedRecord};
use crate::types::{
    check_text, Car, CarDetails, Collection, Customer, CustomerDetails, FleetError, Rental,
    RecordId,
};

/// Owner of all fleet state and its persistence
pub struct Fleet<S> {
    cars: RecordStore<Car>,
    customers: RecordStore<Customer>,
    rentals: RecordStore<Rental>,
    storage: S,
    policy: LifecyclePolicy,
}

impl<S: Storage> Fleet<S> {
    /// Create a Fleet and load every collection from `storage`
    pub fn open(storage: S, config: &FleetConfig) -> Self {
        let mut fleet = Fleet {
            cars: RecordStore::with_capacity(config.capacity),
            customers: RecordStore::with_capacity(config.capacity),
            rentals: RecordStore::with_capacity(config.capacity),
            storage,
            policy: LifecyclePolicy {
                late_fee_rate: config.late_fee_rate,
                require_known_customer: config.require_known_customer,
            },
        };
        fleet.reload();
        fleet
    }

    /// Replace in-memory state with what storage currently holds
    ///
    /// Each collection is truncated and rebuilt independently; a collection
    /// whose resource cannot be read starts empty. Car and customer ids still
    /// named by a rental stay reserved even if their record is gone.
    pub fn reload(&mut self) {
        self.cars.replace_all(load_collection(&self.storage));
        self.customers.replace_all(load_collection(&self.storage));
        self.rentals.replace_all(load_collection(&self.storage));

        let rentals = self.rentals.all();
        if let Some(car_id) = rentals.iter().map(|rental| rental.car_id).max() {
            self.cars.reserve_through(car_id);
        }
        if let Some(customer_id) = rentals.iter().map(|rental| rental.customer_id).max() {
            self.customers.reserve_through(customer_id);
        }

        tracing::info!(
            cars = self.cars.len(),
            customers = self.customers.len(),
            rentals = self.rentals.len(),
            "fleet loaded"
        );
    }

    /// Rewrite all three resources from memory
    pub fn save_all(&self) -> Result<(), FleetError> {
        self.persist(&Collection::ALL)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn policy(&self) -> &LifecyclePolicy {
        &self.policy
    }

    // ===================== Cars =====================

    /// Add an available, undamaged car
    pub fn add_car(&mut self, details: CarDetails) -> Result<Car, FleetError> {
        let details = details.validate()?;

        let car = self.with_cars(|cars| {
            let id = cars.insert(|id| Ok(Car::new(id, details)))?;
            cars.find(id).cloned()
        })?;

        tracing::info!(car = car.id, plate = %car.plate, "car added");
        Ok(car)
    }

    pub fn car(&self, id: RecordId) -> Result<&Car, FleetError> {
        self.cars.find(id)
    }

    /// All cars in catalog order
    pub fn cars(&self) -> &[Car] {
        self.cars.all()
    }

    pub fn available_cars(&self) -> Vec<&Car> {
        self.cars.filter(|car| car.available)
    }

    pub fn damaged_cars(&self) -> Vec<&Car> {
        self.cars.filter(Car::is_damaged)
    }

    /// Cars whose model or plate contains `keyword` (case-sensitive)
    pub fn search_cars(&self, keyword: &str) -> Vec<&Car> {
        self.cars.filter(|car| car.matches(keyword))
    }

    /// Overwrite a car's brand, model, plate and daily rent
    ///
    /// Availability and damage are left alone. Existing rentals keep the cost
    /// computed when they were created.
    pub fn update_car(&mut self, id: RecordId, details: CarDetails) -> Result<Car, FleetError> {
        let details = details.validate()?;

        self.with_cars(|cars| {
            cars.update(id, |car| {
                car.apply(details);
                Ok(car.clone())
            })
        })
    }

    /// Remove a car, keeping the order of the remaining cars
    ///
    /// A rented car may be deleted; returning its rental later still succeeds
    /// but reports that the car could not be restored.
    pub fn delete_car(&mut self, id: RecordId) -> Result<Car, FleetError> {
        let car = self.with_cars(|cars| cars.remove(id))?;

        if !car.available {
            tracing::warn!(car = car.id, "deleted a car that is currently rented");
        }
        Ok(car)
    }

    /// Record damage on a car, replacing any previous report
    ///
    /// Does not require the car to be rented and does not change availability.
    pub fn report_damage(&mut self, id: RecordId, report: &str) -> Result<Car, FleetError> {
        check_text("damage_report", report)?;

        self.with_cars(|cars| {
            cars.update(id, |car| {
                car.damage_report = report.to_string();
                Ok(car.clone())
            })
        })
    }

    /// Clear a car's damage report
    ///
    /// # Errors
    ///
    /// Returns `NoDamageReported` if the report is already empty.
    pub fn clear_damage(&mut self, id: RecordId) -> Result<Car, FleetError> {
        self.with_cars(|cars| {
            cars.update(id, |car| {
                if !car.is_damaged() {
                    return Err(FleetError::no_damage_reported(car.id));
                }
                car.damage_report.clear();
                Ok(car.clone())
            })
        })
    }

    // ===================== Customers =====================

    pub fn add_customer(&mut self, details: CustomerDetails) -> Result<Customer, FleetError> {
        let details = details.validate()?;

        let snapshot = self.customers.clone();
        let id = self
            .customers
            .insert(|id| Ok(Customer::new(id, details)))?;

        if let Err(e) = self.persist(&[Collection::Customers]) {
            self.customers = snapshot;
            self.resync(&[Collection::Customers]);
            return Err(e);
        }

        self.customers.find(id).cloned()
    }

    pub fn customer(&self, id: RecordId) -> Result<&Customer, FleetError> {
        self.customers.find(id)
    }

    pub fn customers(&self) -> &[Customer] {
        self.customers.all()
    }

    // ===================== Rentals =====================

    /// Rent an available car; see [`RentalEngine::rent_car`]
    pub fn rent_car(
        &mut self,
        car_id: RecordId,
        customer_id: RecordId,
        days: u32,
        rent_date: &str,
    ) -> Result<Rental, FleetError> {
        self.with_engine(|engine| engine.rent_car(car_id, customer_id, days, rent_date))
    }

    /// Return an active rental; see [`RentalEngine::return_car`]
    pub fn return_car(
        &mut self,
        rental_id: RecordId,
        return_date: &str,
        late_days: u32,
    ) -> Result<ReturnOutcome, FleetError> {
        self.with_engine(|engine| engine.return_car(rental_id, return_date, late_days))
    }

    pub fn rental(&self, id: RecordId) -> Result<&Rental, FleetError> {
        self.rentals.find(id)
    }

    pub fn rentals(&self) -> &[Rental] {
        self.rentals.all()
    }

    pub fn active_rentals(&self) -> Vec<&Rental> {
        self.rentals.filter(Rental::is_active)
    }

    /// The active rental holding a car, if any
    pub fn active_rental_for_car(&self, car_id: RecordId) -> Option<&Rental> {
        self.rentals
            .all()
            .iter()
            .find(|rental| rental.is_active() && rental.car_id == car_id)
    }

    // ===================== Persistence =====================

    /// Run a car mutation, then save cars; roll back on any failure
    fn with_cars<F, R>(&mut self, f: F) -> Result<R, FleetError>
    where
        F: FnOnce(&mut RecordStore<Car>) -> Result<R, FleetError>,
    {
        let snapshot = self.cars.clone();
        let value = match f(&mut self.cars) {
            Ok(value) => value,
            Err(e) => {
                self.cars = snapshot;
                return Err(e);
            }
        };

        if let Err(e) = self.persist(&[Collection::Cars]) {
            self.cars = snapshot;
            self.resync(&[Collection::Cars]);
            return Err(e);
        }
        Ok(value)
    }

    /// Run a lifecycle operation, then save cars and rentals; roll back on any failure
    fn with_engine<F, R>(&mut self, f: F) -> Result<R, FleetError>
    where
        F: FnOnce(&mut RentalEngine<'_>) -> Result<R, FleetError>,
    {
        let cars = self.cars.clone();
        let rentals = self.rentals.clone();

        let result = {
            let mut engine = RentalEngine::new(
                &mut self.cars,
                &self.customers,
                &mut self.rentals,
                &self.policy,
            );
            f(&mut engine)
        };

        let value = match result {
            Ok(value) => value,
            Err(e) => {
                self.cars = cars;
                self.rentals = rentals;
                return Err(e);
            }
        };

        if let Err(e) = self.persist(&[Collection::Cars, Collection::Rentals]) {
            self.cars = cars;
            self.rentals = rentals;
            self.resync(&[Collection::Cars, Collection::Rentals]);
            return Err(e);
        }
        Ok(value)
    }

    fn persist(&self, collections: &[Collection]) -> Result<(), FleetError> {
        for collection in collections {
            match collection {
                Collection::Cars => self.save(self.cars.all())?,
                Collection::Customers => self.save(self.customers.all())?,
                Collection::Rentals => self.save(self.rentals.all())?,
            }
        }
        Ok(())
    }

    fn save<T: DelimitedRecord>(&self, records: &[T]) -> Result<(), FleetError> {
        let bytes = encode(records)?;
        self.storage.write(T::COLLECTION, &bytes)
    }

    /// Best-effort rewrite after a rollback, so a partially completed save
    /// does not leave a resource ahead of memory
    fn resync(&self, collections: &[Collection]) {
        if let Err(e) = self.persist(collections) {
            tracing::warn!("could not resync storage after a failed operation: {}", e);
        }
    }
}

fn load_collection<T: DelimitedRecord, S: Storage>(storage: &S) -> Vec<T> {
    let collection = T::COLLECTION;
    match storage.read(collection) {
        Ok(Some(bytes)) => decode(&bytes),
        Ok(None) => {
            tracing::debug!(collection = %collection, "no stored data, starting empty");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!("{}; starting with no {}", e, collection);
            Vec::new()
        }
    }
}

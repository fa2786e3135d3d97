//! Car-related types for the fleet store
//!
//! This module defines the Car record and the editable subset of its fields
//! used when adding or updating a vehicle.

use super::{check_money, check_text, Collection, FleetError, Money, Record, RecordId};

/// A vehicle in the rental catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    /// Sequential identifier, unique among cars
    pub id: RecordId,

    pub brand: String,

    pub model: String,

    /// License plate (free text, duplicates permitted)
    pub plate: String,

    /// Daily rent, never negative
    pub rent_per_day: Money,

    /// Whether the car can be rented right now
    ///
    /// Flipped to false by a rental and back to true by its return. This flag
    /// is what keeps a car to at most one active rental.
    pub available: bool,

    /// Damage notes; the empty string means "no damage"
    pub damage_report: String,
}

impl Car {
    /// Create an available, undamaged car from validated details
    pub fn new(id: RecordId, details: CarDetails) -> Self {
        Car {
            id,
            brand: details.brand,
            model: details.model,
            plate: details.plate,
            rent_per_day: details.rent_per_day,
            available: true,
            damage_report: String::new(),
        }
    }

    /// Whether a damage report is on file
    pub fn is_damaged(&self) -> bool {
        !self.damage_report.is_empty()
    }

    /// Overwrite the editable fields, keeping availability and damage as they are
    pub fn apply(&mut self, details: CarDetails) {
        self.brand = details.brand;
        self.model = details.model;
        self.plate = details.plate;
        self.rent_per_day = details.rent_per_day;
    }

    /// Case-sensitive substring match on model or plate
    pub fn matches(&self, keyword: &str) -> bool {
        self.model.contains(keyword) || self.plate.contains(keyword)
    }
}

impl Record for Car {
    const COLLECTION: Collection = Collection::Cars;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Caller-supplied car fields for add and update
#[derive(Debug, Clone, PartialEq)]
pub struct CarDetails {
    pub brand: String,
    pub model: String,
    pub plate: String,
    pub rent_per_day: Money,
}

impl CarDetails {
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        plate: impl Into<String>,
        rent_per_day: Money,
    ) -> Self {
        CarDetails {
            brand: brand.into(),
            model: model.into(),
            plate: plate.into(),
            rent_per_day,
        }
    }

    /// Check the fields can be persisted and normalize the rent to 2 decimals
    pub fn validate(mut self) -> Result<Self, FleetError> {
        check_text("brand", &self.brand)?;
        check_text("model", &self.model)?;
        check_text("plate", &self.plate)?;
        self.rent_per_day = check_money("rent_per_day", self.rent_per_day)?;
        Ok(self)
    }
}

//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `car`: Fleet vehicles and the fields shared by add/update
//! - `customer`: Customer roster entries
//! - `rental`: Rental transactions and their lifecycle status
//! - `error`: Error types for the fleet store

pub mod car;
pub mod customer;
pub mod error;
pub mod rental;

pub use car::{Car, CarDetails};
pub use customer::{Customer, CustomerDetails};
pub use error::{ErrorKind, FleetError};
pub use rental::{Rental, RentalStatus, RETURN_DATE_PENDING};

use rust_decimal::Decimal;
use std::fmt;

/// Record identifier
///
/// Unique within its own collection only. Ids start at 1 and are never reused.
pub type RecordId = u32;

/// Currency amount, stored with 2 decimal places
pub type Money = Decimal;

/// Number of decimal places kept for every currency amount
pub const MONEY_SCALE: u32 = 2;

/// The three persisted entity collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Cars,
    Customers,
    Rentals,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Cars, Collection::Customers, Collection::Rentals];

    /// Build the not-found error matching this collection
    pub fn not_found(self, id: RecordId) -> FleetError {
        match self {
            Collection::Cars => FleetError::car_not_found(id),
            Collection::Customers => FleetError::customer_not_found(id),
            Collection::Rentals => FleetError::rental_not_found(id),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::Cars => "cars",
            Collection::Customers => "customers",
            Collection::Rentals => "rentals",
        };
        f.write_str(name)
    }
}

/// A record that lives in a [`crate::core::RecordStore`]
pub trait Record: Clone {
    /// Collection this record type persists to
    const COLLECTION: Collection;

    fn id(&self) -> RecordId;
}

/// Characters the flat-record format cannot carry inside a field
pub const FORBIDDEN_FIELD_CHARS: [char; 3] = ['|', '\n', '\r'];

/// Reject text the delimited format cannot store verbatim
pub(crate) fn check_text(field: &'static str, value: &str) -> Result<(), FleetError> {
    if let Some(c) = value.chars().find(|c| FORBIDDEN_FIELD_CHARS.contains(c)) {
        return Err(FleetError::invalid_field(
            field,
            &format!("must not contain {:?}", c),
        ));
    }
    Ok(())
}

/// Validate a currency amount and round it to the stored precision
pub(crate) fn check_money(field: &'static str, amount: Money) -> Result<Money, FleetError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(FleetError::invalid_amount(field, amount));
    }
    Ok(amount.round_dp(MONEY_SCALE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("Toyota")]
    #[case::empty("")]
    #[case::spaces("  scratched left door  ")]
    fn test_check_text_accepts(#[case] value: &str) {
        assert!(check_text("brand", value).is_ok());
    }

    #[rstest]
    #[case::delimiter("a|b")]
    #[case::newline("line\nbreak")]
    #[case::carriage_return("line\rbreak")]
    fn test_check_text_rejects(#[case] value: &str) {
        let err = check_text("brand", value).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[rstest]
    #[case(Decimal::new(100000, 2), Decimal::new(100000, 2))]
    #[case(Decimal::new(12345, 3), Decimal::new(1234, 2))]
    #[case(Decimal::ZERO, Decimal::ZERO)]
    fn test_check_money_rounds(#[case] input: Money, #[case] expected: Money) {
        assert_eq!(check_money("rent_per_day", input).unwrap(), expected);
    }

    #[test]
    fn test_check_money_rejects_negative() {
        let err = check_money("rent_per_day", Decimal::new(-1, 0)).unwrap_err();
        assert!(matches!(err, FleetError::InvalidAmount { .. }));
    }

    #[test]
    fn test_collection_not_found_matches_entity() {
        assert!(matches!(
            Collection::Cars.not_found(3),
            FleetError::CarNotFound { id: 3 }
        ));
        assert!(matches!(
            Collection::Rentals.not_found(4),
            FleetError::RentalNotFound { id: 4 }
        ));
    }
}

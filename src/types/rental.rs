//! Rental-related types for the fleet store
//!
//! A rental links one car to one customer for a number of days. Its cost is
//! fixed when the rental is created and only grows by the late fee on return.

use super::{Collection, Money, Record, RecordId};
use rust_decimal::Decimal;

/// Return date stored while a rental is still active
pub const RETURN_DATE_PENDING: &str = "N/A";

/// Lifecycle state of a rental
///
/// `Active` moves to `Returned` exactly once. `Returned` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalStatus {
    Active,
    Returned,
}

/// A rental transaction
#[derive(Debug, Clone, PartialEq)]
pub struct Rental {
    pub id: RecordId,

    /// The rented car
    pub car_id: RecordId,

    /// The renting customer
    pub customer_id: RecordId,

    /// Number of booked days, at least 1
    pub rent_days: u32,

    /// Booked cost plus any late fee
    ///
    /// Always equals `rent_days * rent_per_day` (at rental time) + `late_fee`.
    /// Never recomputed from the car's current rent.
    pub total_cost: Money,

    pub returned: bool,

    /// Free-text rental date
    pub rent_date: String,

    /// Free-text return date, [`RETURN_DATE_PENDING`] until returned
    pub return_date: String,

    /// Charge for late days, zero until return
    pub late_fee: Money,
}

impl Rental {
    /// Open a new active rental
    pub fn open(
        id: RecordId,
        car_id: RecordId,
        customer_id: RecordId,
        rent_days: u32,
        total_cost: Money,
        rent_date: String,
    ) -> Self {
        Rental {
            id,
            car_id,
            customer_id,
            rent_days,
            total_cost,
            returned: false,
            rent_date,
            return_date: RETURN_DATE_PENDING.to_string(),
            late_fee: Decimal::ZERO,
        }
    }

    pub fn status(&self) -> RentalStatus {
        if self.returned {
            RentalStatus::Returned
        } else {
            RentalStatus::Active
        }
    }

    pub fn is_active(&self) -> bool {
        !self.returned
    }

    /// Cost of the booked days alone
    pub fn base_cost(&self) -> Money {
        self.total_cost - self.late_fee
    }
}

impl Record for Rental {
    const COLLECTION: Collection = Collection::Rentals;

    fn id(&self) -> RecordId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_rental_is_active() {
        let rental = Rental::open(1, 2, 3, 3, Decimal::new(300000, 2), "2024-01-01".into());
        assert_eq!(rental.status(), RentalStatus::Active);
        assert_eq!(rental.return_date, RETURN_DATE_PENDING);
        assert_eq!(rental.late_fee, Decimal::ZERO);
        assert_eq!(rental.base_cost(), Decimal::new(3000, 0));
    }

    #[test]
    fn test_status_follows_returned_flag() {
        let mut rental = Rental::open(1, 1, 1, 1, Decimal::ONE, String::new());
        rental.returned = true;
        assert_eq!(rental.status(), RentalStatus::Returned);
        assert!(!rental.is_active());
    }
}

//! Runtime configuration for the fleet store

use crate::types::Money;
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Late fee charged per late day unless configured otherwise
pub const DEFAULT_LATE_FEE_RATE: Money = Decimal::from_parts(500, 0, 0, false, 0);

/// Configuration for a [`crate::core::Fleet`]
#[derive(Clone, Debug, PartialEq)]
pub struct FleetConfig {
    /// Directory holding `cars.txt`, `customers.txt` and `rentals.txt`
    pub data_dir: PathBuf,
    /// Fee per late day applied on return
    pub late_fee_rate: Money,
    /// Maximum live records per collection; `None` for unbounded
    pub capacity: Option<usize>,
    /// Reject rentals whose customer id is not on the roster
    pub require_known_customer: bool,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            late_fee_rate: DEFAULT_LATE_FEE_RATE,
            capacity: None,
            require_known_customer: true,
        }
    }
}

impl FleetConfig {
    /// Create a FleetConfig with custom values
    ///
    /// A negative late fee rate or a zero capacity falls back to the default
    /// with a warning.
    pub fn new(
        data_dir: impl Into<PathBuf>,
        late_fee_rate: Money,
        capacity: Option<usize>,
        require_known_customer: bool,
    ) -> Self {
        let default = Self::default();

        let late_fee_rate = if late_fee_rate.is_sign_negative() && !late_fee_rate.is_zero() {
            tracing::warn!(
                "Invalid late_fee_rate ({}), using default ({})",
                late_fee_rate,
                default.late_fee_rate
            );
            default.late_fee_rate
        } else {
            late_fee_rate.round_dp(crate::types::MONEY_SCALE)
        };

        let capacity = match capacity {
            Some(0) => {
                tracing::warn!("Invalid capacity (0), using unbounded collections");
                default.capacity
            }
            other => other,
        };

        Self {
            data_dir: data_dir.into(),
            late_fee_rate,
            capacity,
            require_known_customer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_config() {
        let config = FleetConfig::default();
        assert_eq!(config.late_fee_rate, Decimal::new(500, 0));
        assert_eq!(config.capacity, None);
        assert!(config.require_known_customer);
    }

    #[rstest]
    #[case::custom_rate(Decimal::new(75050, 2), Some(10), Decimal::new(75050, 2), Some(10))]
    #[case::zero_rate(Decimal::ZERO, None, Decimal::ZERO, None)]
    #[case::negative_rate_falls_back(Decimal::new(-1, 0), None, Decimal::new(500, 0), None)]
    #[case::zero_capacity_falls_back(Decimal::new(500, 0), Some(0), Decimal::new(500, 0), None)]
    fn test_new_validates(
        #[case] rate: Money,
        #[case] capacity: Option<usize>,
        #[case] expected_rate: Money,
        #[case] expected_capacity: Option<usize>,
    ) {
        let config = FleetConfig::new("data", rate, capacity, false);
        assert_eq!(config.late_fee_rate, expected_rate);
        assert_eq!(config.capacity, expected_capacity);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(!config.require_known_customer);
    }
}

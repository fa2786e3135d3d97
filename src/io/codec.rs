//! Flat-record codec for persisted collections
//!
//! Each collection is stored as one record per line, fields joined by `|`,
//! with no header line and no quoting or escaping:
//!
//! ```text
//! cars:      id|brand|model|plate|rentPerDay|isAvailable|damageReport
//! customers: id|name|address|phone|license
//! rentals:   id|carId|customerId|rentDays|totalCost|returned|rentDate|returnDate|lateFee
//! ```
//!
//! Currency amounts are written with 2 decimal places and flags as `0`/`1`.
//! Because nothing is escaped, text fields must not contain `|` or a line
//! break; encoding rejects such records instead of writing a corrupt line.
//!
//! Decoding is tolerant:
//! - blank lines are skipped
//! - missing trailing fields decode as empty text or zero, except a missing
//!   car availability flag, which decodes as available
//! - a record without a usable id is skipped with a warning
//! - a record repeating an earlier id is skipped with a warning
//! - currency amounts are rounded to 2 decimal places; negative or malformed
//!   amounts decode as zero
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{
    check_money, check_text, Car, Customer, FleetError, Money, Record, RecordId, Rental,
};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;
use std::str::FromStr;

/// Field separator of the flat-record format
pub const DELIMITER: u8 = b'|';

/// A record type with a fixed delimited field layout
pub trait DelimitedRecord: Record + Sized {
    /// Serializable row in persisted field order
    type Row<'a>: Serialize
    where
        Self: 'a;

    /// Borrow the record as a row, rejecting text the format cannot carry
    fn to_row(&self) -> Result<Self::Row<'_>, FleetError>;

    /// Rebuild a record from a possibly short row
    fn from_fields(fields: &Fields<'_>) -> Result<Self, String>;
}

/// Tolerant accessor over one decoded line
pub struct Fields<'r> {
    record: &'r StringRecord,
}

impl<'r> Fields<'r> {
    pub fn new(record: &'r StringRecord) -> Self {
        Fields { record }
    }

    fn raw(&self, index: usize) -> &'r str {
        self.record.get(index).unwrap_or("")
    }

    /// Leading id column; the only field that must be present and valid
    pub fn id(&self) -> Result<RecordId, String> {
        let raw = self.raw(0).trim();
        match raw.parse::<RecordId>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(format!("invalid record id '{}'", raw)),
        }
    }

    pub fn text(&self, index: usize) -> String {
        self.raw(index).to_string()
    }

    /// Unsigned integer column, zero when missing or malformed
    pub fn number(&self, index: usize) -> u32 {
        self.raw(index).trim().parse().unwrap_or(0)
    }

    /// Currency column at 2 decimal places, zero when missing, malformed or negative
    pub fn money(&self, index: usize) -> Money {
        Decimal::from_str(self.raw(index).trim())
            .ok()
            .and_then(|amount| check_money("amount", amount).ok())
            .unwrap_or(Decimal::ZERO)
    }

    /// `0`/`1` column; any other number is true, missing uses `default`
    pub fn flag(&self, index: usize, default: bool) -> bool {
        let raw = self.raw(index).trim();
        if raw.is_empty() {
            return default;
        }
        raw.parse::<i64>().map(|n| n != 0).unwrap_or(default)
    }
}

fn money_field(amount: Money) -> String {
    format!("{:.2}", amount)
}

fn flag_field(flag: bool) -> u8 {
    u8::from(flag)
}

#[derive(Serialize)]
pub struct CarRow<'a> {
    id: RecordId,
    brand: &'a str,
    model: &'a str,
    plate: &'a str,
    rent_per_day: String,
    available: u8,
    damage_report: &'a str,
}

impl DelimitedRecord for Car {
    type Row<'a> = CarRow<'a>;

    fn to_row(&self) -> Result<CarRow<'_>, FleetError> {
        check_text("brand", &self.brand)?;
        check_text("model", &self.model)?;
        check_text("plate", &self.plate)?;
        check_text("damage_report", &self.damage_report)?;

        Ok(CarRow {
            id: self.id,
            brand: &self.brand,
            model: &self.model,
            plate: &self.plate,
            rent_per_day: money_field(self.rent_per_day),
            available: flag_field(self.available),
            damage_report: &self.damage_report,
        })
    }

    fn from_fields(fields: &Fields<'_>) -> Result<Self, String> {
        Ok(Car {
            id: fields.id()?,
            brand: fields.text(1),
            model: fields.text(2),
            plate: fields.text(3),
            rent_per_day: fields.money(4),
            available: fields.flag(5, true),
            damage_report: fields.text(6),
        })
    }
}

#[derive(Serialize)]
pub struct CustomerRow<'a> {
    id: RecordId,
    name: &'a str,
    address: &'a str,
    phone: &'a str,
    license: &'a str,
}

impl DelimitedRecord for Customer {
    type Row<'a> = CustomerRow<'a>;

    fn to_row(&self) -> Result<CustomerRow<'_>, FleetError> {
        check_text("name", &self.name)?;
        check_text("address", &self.address)?;
        check_text("phone", &self.phone)?;
        check_text("license", &self.license)?;

        Ok(CustomerRow {
            id: self.id,
            name: &self.name,
            address: &self.address,
            phone: &self.phone,
            license: &self.license,
        })
    }

    fn from_fields(fields: &Fields<'_>) -> Result<Self, String> {
        Ok(Customer {
            id: fields.id()?,
            name: fields.text(1),
            address: fields.text(2),
            phone: fields.text(3),
            license: fields.text(4),
        })
    }
}

#[derive(Serialize)]
pub struct RentalRow<'a> {
    id: RecordId,
    car_id: RecordId,
    customer_id: RecordId,
    rent_days: u32,
    total_cost: String,
    returned: u8,
    rent_date: &'a str,
    return_date: &'a str,
    late_fee: String,
}

impl DelimitedRecord for Rental {
    type Row<'a> = RentalRow<'a>;

    fn to_row(&self) -> Result<RentalRow<'_>, FleetError> {
        check_text("rent_date", &self.rent_date)?;
        check_text("return_date", &self.return_date)?;

        Ok(RentalRow {
            id: self.id,
            car_id: self.car_id,
            customer_id: self.customer_id,
            rent_days: self.rent_days,
            total_cost: money_field(self.total_cost),
            returned: flag_field(self.returned),
            rent_date: &self.rent_date,
            return_date: &self.return_date,
            late_fee: money_field(self.late_fee),
        })
    }

    fn from_fields(fields: &Fields<'_>) -> Result<Self, String> {
        Ok(Rental {
            id: fields.id()?,
            car_id: fields.number(1),
            customer_id: fields.number(2),
            rent_days: fields.number(3),
            total_cost: fields.money(4),
            returned: fields.flag(5, false),
            rent_date: fields.text(6),
            return_date: fields.text(7),
            late_fee: fields.money(8),
        })
    }
}

/// Encode a whole collection, one line per record, in slice order
///
/// # Errors
///
/// Returns `InvalidField` if any text field contains the delimiter or a line
/// break; nothing is produced in that case.
pub fn encode<T: DelimitedRecord>(records: &[T]) -> Result<Vec<u8>, FleetError> {
    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for record in records {
        writer
            .serialize(record.to_row()?)
            .map_err(|e| FleetError::persistence(T::COLLECTION, e))?;
    }

    writer
        .into_inner()
        .map_err(|e| FleetError::persistence(T::COLLECTION, e))
}

/// Decode a whole collection, skipping lines that cannot be read
///
/// Skipped lines are logged with their line number and otherwise ignored.
/// When an id repeats, the first record with that id wins.
pub fn decode<T: DelimitedRecord>(bytes: &[u8]) -> Vec<T> {
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(bytes);

    let collection = T::COLLECTION;
    let mut records = Vec::new();
    let mut seen = HashSet::new();
    for result in reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!(collection = %collection, "skipping unreadable record: {}", FleetError::from(e));
                continue;
            }
        };

        let line = row.position().map(|pos| pos.line());
        match T::from_fields(&Fields::new(&row)) {
            Ok(record) if seen.insert(record.id()) => records.push(record),
            Ok(record) => {
                let error = FleetError::ParseError {
                    line,
                    message: format!("duplicate record id {}", record.id()),
                };
                tracing::warn!(collection = %collection, "skipping record: {}", error);
            }
            Err(message) => {
                let error = FleetError::ParseError { line, message };
                tracing::warn!(collection = %collection, "skipping record: {}", error);
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CarDetails, CustomerDetails, RETURN_DATE_PENDING};
    use rstest::rstest;

    fn sample_car() -> Car {
        Car::new(
            1,
            CarDetails::new("Toyota", "Vios", "ABC-123", Decimal::new(1000, 0)),
        )
    }

    #[test]
    fn test_encode_car_layout() {
        let mut damaged = sample_car();
        damaged.id = 2;
        damaged.available = false;
        damaged.damage_report = "cracked windshield".to_string();
        damaged.rent_per_day = Decimal::new(12505, 1);

        let bytes = encode(&[sample_car(), damaged]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "1|Toyota|Vios|ABC-123|1000.00|1|\n2|Toyota|Vios|ABC-123|1250.50|0|cracked windshield\n"
        );
    }

    #[test]
    fn test_encode_customer_layout() {
        let customer = Customer::new(
            3,
            CustomerDetails::new("Maria Santos", "12 Rizal St, Cebu", "0917-555", "N02-11"),
        );
        let bytes = encode(&[customer]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "3|Maria Santos|12 Rizal St, Cebu|0917-555|N02-11\n"
        );
    }

    #[test]
    fn test_encode_rental_layout() {
        let active = Rental::open(1, 1, 1, 3, Decimal::new(3000, 0), "2024-01-01".into());
        let mut returned = Rental::open(2, 4, 2, 1, Decimal::new(150000, 2), "2024-02-01".into());
        returned.returned = true;
        returned.return_date = "2024-02-03".into();
        returned.late_fee = Decimal::new(1000, 0);
        returned.total_cost = Decimal::new(2500, 0);

        let bytes = encode(&[active, returned]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "1|1|1|3|3000.00|0|2024-01-01|N/A|0.00\n2|4|2|1|2500.00|1|2024-02-01|2024-02-03|1000.00\n"
        );
    }

    #[test]
    fn test_encode_empty_collection() {
        let bytes = encode::<Car>(&[]).unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_encode_rejects_delimiter_in_text() {
        let mut car = sample_car();
        car.damage_report = "dent | scratch".to_string();

        let result = encode(&[car]);
        assert!(matches!(
            result,
            Err(FleetError::InvalidField { field: "damage_report", .. })
        ));
    }

    #[test]
    fn test_decode_car_line() {
        let cars: Vec<Car> = decode(b"2|Honda|City|XYZ 9|1500.50|0|flat tire\n");
        assert_eq!(cars.len(), 1);
        let car = &cars[0];
        assert_eq!(car.id, 2);
        assert_eq!(car.brand, "Honda");
        assert_eq!(car.plate, "XYZ 9");
        assert_eq!(car.rent_per_day, Decimal::new(150050, 2));
        assert!(!car.available);
        assert_eq!(car.damage_report, "flat tire");
    }

    #[test]
    fn test_decode_skips_blank_lines() {
        let cars: Vec<Car> = decode(b"\n1|A|B|C|10.00|1|\n\n\n2|D|E|F|20.00|1|\n\n");
        let ids: Vec<RecordId> = cars.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_decode_accepts_crlf_lines() {
        let customers: Vec<Customer> = decode(b"1|Ana|Davao|0918|L-1\r\n2|Ben|Iloilo|0919|L-2\r\n");
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].license, "L-1");
        assert_eq!(customers[1].name, "Ben");
    }

    #[rstest]
    #[case::id_only("4", "", Decimal::ZERO, true)]
    #[case::no_damage_column("4|Kia|Rio|P-1|800.00|0", "Rio", Decimal::new(800, 0), false)]
    #[case::no_flag_column("4|Kia|Rio|P-1|800.00", "Rio", Decimal::new(800, 0), true)]
    #[case::bad_money("4|Kia|Rio|P-1|cheap|1|", "Rio", Decimal::ZERO, true)]
    #[case::negative_money("4|Kia|Rio|P-1|-5.00|1|", "Rio", Decimal::ZERO, true)]
    #[case::extra_precision("4|Kia|Rio|P-1|1.006|1|", "Rio", Decimal::new(101, 2), true)]
    fn test_decode_car_missing_trailing_fields(
        #[case] line: &str,
        #[case] model: &str,
        #[case] rent: Money,
        #[case] available: bool,
    ) {
        let cars: Vec<Car> = decode(line.as_bytes());
        assert_eq!(cars.len(), 1);
        assert_eq!(cars[0].id, 4);
        assert_eq!(cars[0].model, model);
        assert_eq!(cars[0].rent_per_day, rent);
        assert_eq!(cars[0].available, available);
        assert_eq!(cars[0].damage_report, "");
    }

    #[test]
    fn test_decode_short_rental_defaults() {
        let rentals: Vec<Rental> = decode(b"5|2|3|4|2000.00\n");
        assert_eq!(rentals.len(), 1);
        let rental = &rentals[0];
        assert_eq!(rental.rent_days, 4);
        assert_eq!(rental.total_cost, Decimal::new(2000, 0));
        assert!(!rental.returned);
        assert_eq!(rental.rent_date, "");
        assert_eq!(rental.return_date, "");
        assert_eq!(rental.late_fee, Decimal::ZERO);
    }

    #[rstest]
    #[case::non_numeric_id(b"abc|Kia|Rio|P-1|800.00|1|\n2|Kia|Rio|P-2|800.00|1|\n".as_slice())]
    #[case::zero_id(b"0|Kia|Rio|P-1|800.00|1|\n2|Kia|Rio|P-2|800.00|1|\n".as_slice())]
    #[case::whitespace_line(b"   \n2|Kia|Rio|P-2|800.00|1|\n".as_slice())]
    #[case::duplicate_id(b"2|Kia|Rio|P-2|800.00|1|\n2|Ford|Ranger|P-9|900.00|1|\n".as_slice())]
    fn test_decode_skips_records_without_id(#[case] input: &[u8]) {
        let cars: Vec<Car> = decode(input);
        assert_eq!(cars.len(), 1);
        assert_eq!(cars[0].id, 2);
        assert_eq!(cars[0].plate, "P-2");
    }

    #[test]
    fn test_decoded_amounts_survive_re_encoding() {
        let rentals: Vec<Rental> = decode(b"1|1|1|2|2000.004|1|d1|d2|-3.00\n");
        assert_eq!(rentals[0].total_cost, Decimal::new(200000, 2));
        assert_eq!(rentals[0].late_fee, Decimal::ZERO);

        let bytes = encode(&rentals).unwrap();
        assert_eq!(decode::<Rental>(&bytes), rentals);
    }

    #[test]
    fn test_decode_keeps_quotes_verbatim() {
        let customers: Vec<Customer> = decode(b"1|\"Jun\" Cruz|Pasig|09|L\n");
        assert_eq!(customers[0].name, "\"Jun\" Cruz");
    }

    #[test]
    fn test_round_trip_preserves_all_fields() {
        let mut car = sample_car();
        car.damage_report = "scratch, rear bumper".to_string();
        let mut returned = Rental::open(7, 1, 2, 2, Decimal::new(2000, 0), "Jan 1".into());
        returned.returned = true;
        returned.return_date = "Jan 3".into();
        returned.late_fee = Decimal::new(500, 0);
        returned.total_cost = Decimal::new(2500, 0);
        let active = Rental::open(8, 3, 1, 1, Decimal::new(99999, 2), "Jan 5".into());
        let customer = Customer::new(2, CustomerDetails::new("Ana", "", "0918", "L-9"));

        let cars: Vec<Car> = decode(&encode(&[car.clone()]).unwrap());
        let customers: Vec<Customer> = decode(&encode(&[customer.clone()]).unwrap());
        let rentals: Vec<Rental> = decode(&encode(&[returned.clone(), active.clone()]).unwrap());

        assert_eq!(cars, vec![car]);
        assert_eq!(customers, vec![customer]);
        assert_eq!(rentals, vec![returned, active]);
        assert_eq!(rentals[1].return_date, RETURN_DATE_PENDING);
    }
}

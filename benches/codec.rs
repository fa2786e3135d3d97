//! Benchmark suite for the flat-record codec
//!
//! Measures encoding and decoding of a large car catalog and rental history
//! using the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use fleet_rental::io::{decode, encode};
use fleet_rental::{Car, CarDetails, Rental};
use rust_decimal::Decimal;

fn main() {
    divan::main();
}

fn catalog(size: u32) -> Vec<Car> {
    (1..=size)
        .map(|id| {
            let mut car = Car::new(
                id,
                CarDetails::new(
                    "Toyota",
                    format!("Model {}", id % 17),
                    format!("PLT-{:05}", id),
                    Decimal::new(i64::from(id % 50) * 10_000 + 99, 2),
                ),
            );
            car.available = id % 3 != 0;
            if id % 5 == 0 {
                car.damage_report = "scratch on rear bumper".to_string();
            }
            car
        })
        .collect()
}

fn history(size: u32) -> Vec<Rental> {
    (1..=size)
        .map(|id| {
            let mut rental = Rental::open(
                id,
                id % 100 + 1,
                id % 40 + 1,
                id % 7 + 1,
                Decimal::new(i64::from(id % 7 + 1) * 100_000, 2),
                "2024-01-01".to_string(),
            );
            if id % 2 == 0 {
                rental.returned = true;
                rental.return_date = "2024-01-09".to_string();
            }
            rental
        })
        .collect()
}

#[divan::bench(args = [100, 10_000])]
fn encode_cars(bencher: divan::Bencher, size: u32) {
    let cars = catalog(size);
    bencher.bench(|| encode(divan::black_box(&cars)).expect("Encoding failed"));
}

#[divan::bench(args = [100, 10_000])]
fn decode_cars(bencher: divan::Bencher, size: u32) {
    let bytes = encode(&catalog(size)).expect("Encoding failed");
    bencher.bench(|| decode::<Car>(divan::black_box(&bytes)));
}

#[divan::bench(args = [100, 10_000])]
fn decode_rentals(bencher: divan::Bencher, size: u32) {
    let bytes = encode(&history(size)).expect("Encoding failed");
    bencher.bench(|| decode::<Rental>(divan::black_box(&bytes)));
}

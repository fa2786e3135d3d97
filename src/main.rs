//! Fleet Rental CLI
//!
//! Command-line interface for managing a car rental fleet whose state is kept
//! in `cars.txt`, `customers.txt` and `rentals.txt`.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- car add --brand Toyota --model Vios --plate ABC-123 --rent 1000
//! cargo run -- customer add --name "Juan dela Cruz" --license N01-99
//! cargo run -- rental rent --car 1 --customer 1 --days 3 --date 2024-01-01
//! cargo run -- rental return 1 --date 2024-01-04 --late-days 2
//! cargo run -- --data-dir ./data car list --available
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default: `warn`); logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (unknown id, invalid state, unwritable data directory, etc.)

use fleet_rental::cli;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    // Parse command-line arguments using clap
    let args = cli::parse_args();

    let mut output = std::io::stdout();
    if let Err(e) = cli::run(args, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

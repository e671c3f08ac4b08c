//! # Seed Data Generator
//!
//! Populates the database with users, items, and bookings for development.
//!
//! ## Usage
//! ```bash
//! # 10 owners, each with 3 items (default)
//! cargo run -p shareit-db --bin seed
//!
//! # Custom amount
//! cargo run -p shareit-db --bin seed -- --owners 50
//!
//! # Specify database path
//! cargo run -p shareit-db --bin seed -- --db ./data/shareit.db
//! ```
//!
//! ## Generated Data
//! - One owner per `--owners`, each with three items (the third unavailable)
//! - One booker per owner
//! - For every available item, bookings relative to the current time:
//!   one finished and approved, one running and approved,
//!   one upcoming and waiting, one upcoming and rejected
//!
//! Logging follows `RUST_LOG` (default `info`).

use chrono::{DateTime, Duration, Utc};
use shareit_core::{ceil_to_millis, BookingStatus, NewBooking};
use shareit_db::{Database, DbConfig, DbResult};
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const ITEM_NAMES: &[(&str, &str)] = &[
    ("Cordless Drill", "18V, two batteries"),
    ("Camping Tent", "Sleeps four"),
    ("Pressure Washer", "Needs a garden hose"),
    ("Kayak", "Single seat, paddle included"),
    ("Ladder", "Extends to 6m"),
    ("Projector", "1080p, HDMI"),
];

/// (start offset hours, end offset hours, status)
const BOOKING_PLAN: &[(i64, i64, BookingStatus)] = &[
    (-72, -48, BookingStatus::Approved),
    (-2, 22, BookingStatus::Approved),
    (24, 48, BookingStatus::Waiting),
    (72, 96, BookingStatus::Rejected),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut owners: usize = 10;
    let mut db_path = String::from("./shareit_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--owners" | "-o" => {
                if i + 1 < args.len() {
                    owners = args[i + 1].parse().unwrap_or(10);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("ShareIt Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -o, --owners <N>   Number of item owners to generate (default: 10)");
                println!("  -d, --db <PATH>    Database file path (default: ./shareit_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    info!(db = %db_path, owners, "Seeding database");

    let db = Database::new(DbConfig::new(&db_path)).await?;

    let existing = db.users().count().await?;
    if existing > 0 {
        warn!(existing, "Database already has users, skipping seed");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let items_created = populate(&db, owners, ceil_to_millis(Utc::now())).await?;

    let bookings = db.bookings().count().await?;
    info!(
        users = owners * 2,
        items = items_created,
        bookings,
        elapsed = ?start.elapsed(),
        "Seed complete"
    );

    db.close().await;
    Ok(())
}

/// Inserts `owners` owners with their items and bookings around `now`.
///
/// Returns the number of items created. Stops at the first failed insert.
async fn populate(db: &Database, owners: usize, now: DateTime<Utc>) -> DbResult<usize> {
    let mut items_created = 0;

    for n in 0..owners {
        let owner = db
            .users()
            .insert(&format!("Owner {n}"), &format!("owner{n}@shareit.dev"))
            .await?;
        let booker = db
            .users()
            .insert(&format!("Booker {n}"), &format!("booker{n}@shareit.dev"))
            .await?;

        for k in 0..3 {
            let (name, description) = ITEM_NAMES[(n * 3 + k) % ITEM_NAMES.len()];
            let available = k != 2;
            let item = db.items().insert(owner.id, name, description, available).await?;
            items_created += 1;

            if !available {
                continue;
            }

            for (start_h, end_h, status) in BOOKING_PLAN {
                let booking = NewBooking {
                    item_id: item.id,
                    booker_id: booker.id,
                    start: now + Duration::hours(*start_h),
                    end: now + Duration::hours(*end_h),
                    status: *status,
                };
                db.bookings().insert(&booking).await?;
            }
        }
    }

    Ok(items_created)
}

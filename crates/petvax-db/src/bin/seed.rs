//! # Seed Data Generator
//!
//! Populates the database with demo pets for development.
//!
//! ## Usage
//! ```bash
//! # Generate 25 pets (default)
//! cargo run -p petvax-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p petvax-db --bin seed -- --count 200
//!
//! # Specify database path
//! cargo run -p petvax-db --bin seed -- --db ./data/petvax.db
//! ```
//!
//! Each pet gets a species, an owner with a ten-digit contact number and an
//! email address, and zero to three vaccinations dated in the past.

use std::env;

use anyhow::Context;
use chrono::{Duration, Utc};
use petvax_core::{Pet, Species, Vaccination};
use petvax_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

const PET_NAMES: &[&str] = &[
    "Rex", "Bella", "Max", "Luna", "Charlie", "Daisy", "Milo", "Coco", "Rocky", "Nala", "Oscar",
    "Pepper", "Simba", "Ziggy", "Biscuit",
];

const OWNERS: &[&str] = &[
    "Alice Moreau",
    "Bob Tanaka",
    "Carmen Diaz",
    "Deepak Rao",
    "Erin Walsh",
    "Farah Haddad",
];

/// Vaccines per species; the index cycles so runs are reproducible.
fn vaccines_for(species: Species) -> &'static [&'static str] {
    match species {
        Species::Dog => &["Rabies", "DHPP", "Leptospirosis", "Bordetella"],
        Species::Cat => &["Rabies", "FVRCP", "FeLV"],
        Species::SmallMammal => &["RHDV2", "Myxomatosis"],
        Species::Bird => &["Polyomavirus"],
        Species::Fish | Species::Reptile | Species::Other => &[],
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 25;
    let mut db_path = String::from("./petvax_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(25);
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
                println!("PetVax Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of pets to generate (default: 25)");
                println!("  -d, --db <PATH>    Database file path (default: ./petvax_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 PetVax Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("Pets:     {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("opening {db_path}"))?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.pets().list_all().await?.len();
    if existing > 0 {
        println!("⚠ Database already has {} pets", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let repo = db.pets();
    let mut generated = 0;
    for index in 0..count {
        let pet = generate_pet(index);
        if let Err(e) = repo.insert(&pet).await {
            eprintln!("Failed to insert {}: {}", pet.name, e);
            continue;
        }
        generated += 1;
    }

    println!("✓ Generated {} pets", generated);
    println!(
        "  Vaccination records: {}",
        repo.count_vaccinations().await?
    );

    let rabies = repo.find_by_vaccination("rabies").await?;
    println!("  Vaccinated against rabies: {}", rabies.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates one pet deterministically from its index.
fn generate_pet(index: usize) -> Pet {
    let species = Species::ALL[index % Species::ALL.len()];
    let owner = OWNERS[index % OWNERS.len()];
    let today = Utc::now().date_naive();

    let available = vaccines_for(species);
    let vaccinations = available
        .iter()
        .take(index % 4)
        .enumerate()
        .map(|(n, name)| Vaccination::new(*name, today - Duration::days(30 * (n as i64 + 1))))
        .collect();

    let first_name = owner.split(' ').next().unwrap_or(owner).to_lowercase();

    Pet {
        id: None,
        name: PET_NAMES[index % PET_NAMES.len()].to_string(),
        species,
        breed: None,
        owner_name: owner.to_string(),
        owner_contact: format!("555{:07}", index % 10_000_000),
        owner_email: format!("{first_name}@example.com"),
        vaccinations,
    }
}

//! # Seed Data Generator
//!
//! Populates the database with demo clients and products for development.
//!
//! ## Usage
//! ```bash
//! # Seed with defaults
//! cargo run -p venda-db --bin seed
//!
//! # Specify database path
//! cargo run -p venda-db --bin seed -- --db ./data/venda.db
//! ```
//!
//! Every product passes the same price validation the registry enforces,
//! so seeded data behaves exactly like operator-entered data.

use chrono::Utc;
use std::env;
use tracing::warn;
use uuid::Uuid;
use venda_core::{validation, Client, Metric, Product};
use venda_db::{Database, DbConfig};

/// (name, establishment_type, phone, maps_link)
const CLIENTS: &[(&str, &str, &str, Option<&str>)] = &[
    (
        "Padaria Central",
        "bakery",
        "555-0100",
        Some("https://maps.example/padaria-central"),
    ),
    ("Mercado do Bairro", "grocery", "555-0101", None),
    (
        "Restaurante Maré",
        "restaurant",
        "555-0102",
        Some("https://maps.example/mare"),
    ),
    ("Café Esquina", "cafe", "555-0103", None),
    ("Hotel Jardim", "hotel", "555-0104", None),
];

/// (name, maker, metric, label, price_cents, purchase_price_cents, stock_millis)
const PRODUCTS: &[(&str, &str, Metric, Option<&str>, i64, Option<i64>, i64)] = &[
    (
        "Wheat Flour Type 1",
        "Moinho Sul",
        Metric::Kilogram,
        Some("baking"),
        550,
        Some(320),
        250_000,
    ),
    (
        "Unsalted Butter",
        "Laticínios Serra",
        Metric::Kilogram,
        Some("dairy"),
        4200,
        Some(2900),
        40_500,
    ),
    (
        "Olive Oil Extra Virgin",
        "Quinta Velha",
        Metric::Liter,
        Some("oils"),
        3800,
        Some(2500),
        60_000,
    ),
    (
        "Dry Yeast",
        "FermentaMax",
        Metric::Gram,
        Some("baking"),
        4,
        Some(2),
        5_000_000,
    ),
    (
        "Espresso Blend Beans",
        "Torrefação Alta",
        Metric::Kilogram,
        Some("coffee"),
        6500,
        Some(4100),
        80_250,
    ),
    (
        "Sparkling Water Crate",
        "Fonte Clara",
        Metric::Unit,
        None,
        2400,
        Some(1700),
        120_000,
    ),
    (
        "Whole Milk",
        "Laticínios Serra",
        Metric::Liter,
        Some("dairy"),
        450,
        None,
        300_000,
    ),
    (
        "Sea Salt Coarse",
        "Salinas do Norte",
        Metric::Kilogram,
        None,
        300,
        Some(110),
        500_000,
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./venda_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Venda Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./venda_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Venda Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding clients...");

    let now = Utc::now();
    for (name, establishment_type, phone, maps_link) in CLIENTS {
        let client = Client {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            establishment_type: establishment_type.to_string(),
            phone: phone.to_string(),
            maps_link: maps_link.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        db.clients().insert(&client).await?;
    }
    println!("  {} clients", CLIENTS.len());

    println!("Seeding products...");

    let mut seeded = 0;
    for (name, maker, metric, label, price_cents, purchase_price_cents, stock_millis) in PRODUCTS {
        if let Err(e) =
            validation::validate_product_prices(*price_cents, *purchase_price_cents, *stock_millis)
        {
            warn!(product = name, error = %e, "Skipping invalid seed product");
            continue;
        }

        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: None,
            maker: maker.to_string(),
            metric: *metric,
            label: label.map(str::to_string),
            image: None,
            stock_millis: *stock_millis,
            price_cents: *price_cents,
            purchase_price_cents: *purchase_price_cents,
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await?;
        seeded += 1;
    }
    println!("  {} products", seeded);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

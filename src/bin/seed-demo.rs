//! Demo data seed script
//!
//! Inserts a small set of recipes and menus into PostgreSQL and plans two of
//! the menus into the current week.
//!
//! Usage:
//!   DATABASE_URL=... ./seed-demo [--reset]
//!
//! Environment variables:
//!   DATABASE_URL    PostgreSQL connection string (required)
//!   WEEK_START      first day of the week (default: sunday)

use anyhow::{Context, Result};
use chrono::Weekday;
use clap::Parser;
use std::env;

use mealplan_api::db::{self, demo, PgStore};

#[derive(Parser)]
#[command(name = "seed-demo", about = "Seed demo recipes, menus and calendar entries")]
struct Args {
    /// Remove every recipe, menu and calendar entry first
    #[arg(long)]
    reset: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL required")?;
    let week_start: Weekday = env::var("WEEK_START")
        .unwrap_or_else(|_| "sunday".to_string())
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid WEEK_START"))?;

    println!("=== Seed Demo Data ===");

    let pool = db::create_pool(&database_url, 5)
        .await
        .context("Failed to connect to database")?;
    db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;
    let store = PgStore::new(pool);

    if args.reset {
        println!("Clearing existing documents...");
        store.clear().await.context("Failed to clear collections")?;
    }

    let today = chrono::Local::now().date_naive();
    let summary = demo::seed(&store, today, week_start)
        .await
        .context("Failed to seed demo data")?;

    println!("  Recipes:          {}", summary.recipes);
    println!("  Menus:            {}", summary.menus);
    println!("  Calendar entries: {}", summary.calendar_entries);
    println!("Done.");

    Ok(())
}

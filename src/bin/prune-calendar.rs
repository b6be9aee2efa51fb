//! Delete calendar entries whose menu no longer exists.
//! Run periodically (e.g., via cron job: 0 3 * * * /app/prune-calendar)
//!
//! Usage: prune-calendar [--dry-run]
//!   --dry-run  : Only log the entries that would be deleted

use clap::Parser;
use mealplan_api::{
    config::Config,
    db,
    services::calendar::CalendarService,
};

#[derive(Parser)]
#[command(name = "prune-calendar", about = "Remove calendar entries that point at deleted menus")]
struct Args {
    /// Log what would be deleted without deleting anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;
    let store = db::connect(&config).await?;

    tracing::info!("Starting calendar prune job...");

    let count = CalendarService::prune_dangling(store.as_ref(), args.dry_run).await?;
    if args.dry_run {
        tracing::info!("Dry run: {} dangling calendar entries found", count);
    } else {
        tracing::info!("Deleted {} dangling calendar entries", count);
    }

    Ok(())
}

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use trivia_api::db::transfer::{export_data, import_data};
use trivia_api::db::queries::categories::create_category;
use trivia_api::db::{establish_connection, run_migrations};
use trivia_api::settings::Settings;
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Database path
    db_path: PathBuf,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import categories.csv and questions.csv from a directory
    Import { path: PathBuf },
    /// Export categories.csv and questions.csv into a directory
    Export { path: PathBuf },
    /// Create a category; the HTTP API only reads them
    AddCategory { name: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load settings")?;
    init_tracing(&settings.log_level);
    let pool = establish_connection(&cli.db_path.to_string_lossy())
        .await
        .context("Cannot connect to DB")?;
    run_migrations(&pool).await?;

    match cli.command {
        Commands::Export { path } => export_data(&pool, &path).await.context("Cannot export")?,
        Commands::Import { path } => import_data(&pool, &path).await.context("Cannot import")?,
        Commands::AddCategory { name } => {
            let id = create_category(&pool, &name)
                .await
                .context("Cannot create category")?;
            tracing::info!(id, "Created category {name}");
        }
    }
    Ok(())
}

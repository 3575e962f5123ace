use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod commands;
mod config;
mod db;

use api::ClassifierClient;
use commands::{
    AnalyzeCommand, ConfigCommand, FoodCommand, GoalsCommand, MealCommand, StatusCommand,
};
use config::Config;
use db::{init_db, SqliteStore};
use macrolog_core::{NutritionTracker, Settings};

#[derive(Parser)]
#[command(name = "macrolog")]
#[command(version)]
#[command(about = "A calorie and macro tracking application", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the day's calorie and macro totals
    Status(StatusCommand),

    /// Record and manage meals
    Meal(MealCommand),

    /// Manage the saved-foods catalog
    Food(FoodCommand),

    /// View or change calorie and macro goals
    Goals(GoalsCommand),

    /// Analyze a food photo via the classification service
    Analyze(AnalyzeCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "macrolog=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Status(cmd)) => {
            let tracker = open_tracker(&config).await?;
            cmd.run(&tracker)?;
        }
        Some(Commands::Meal(cmd)) => {
            let mut tracker = open_tracker(&config).await?;
            cmd.run(&mut tracker).await?;
        }
        Some(Commands::Food(cmd)) => {
            let client = ClassifierClient::new(&config.api_url);
            let mut tracker = open_tracker(&config).await?;
            cmd.run(&client, &mut tracker).await?;
        }
        Some(Commands::Goals(cmd)) => {
            let mut tracker = open_tracker(&config).await?;
            cmd.run(&mut tracker).await?;
        }
        Some(Commands::Analyze(cmd)) => {
            let client = ClassifierClient::new(&config.api_url);
            let mut tracker = open_tracker(&config).await?;
            cmd.run(&client, &mut tracker).await?;
        }
        Some(Commands::Config(cmd)) => {
            let client = ClassifierClient::new(&config.api_url);
            cmd.run(&config, &client).await?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

/// Opens the database and returns a ready tracker for the configured user.
async fn open_tracker(
    config: &Config,
) -> Result<NutritionTracker<SqliteStore>, Box<dyn std::error::Error>> {
    let pool = init_db(config.database_path.clone()).await?;
    let store = SqliteStore::new(pool, &config.user);

    let mut tracker = NutritionTracker::with_store(Settings::default(), store);
    tracker.init().await;
    Ok(tracker)
}

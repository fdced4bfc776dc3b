//! Directory Service - Usuario, Cliente and Emprendedor management.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use directory_service_lib::config::DirectoryConfig;
use directory_service_lib::{demo, Directory};

#[derive(Parser)]
#[command(name = "directory-service")]
#[command(about = "Usuario, cliente and emprendedor directory over in-memory stores")]
struct Cli {
    /// Start with empty stores instead of the fixture records
    #[arg(long, global = true)]
    no_seed: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scripted create/read/update/delete walkthrough
    Demo,
    /// Print the statistics of the three services as JSON
    Stats,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let mut config = DirectoryConfig::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.service.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    if cli.no_seed {
        config.seed_data = false;
    }

    let directory = Directory::from_config(&config)?;

    match cli.command {
        Commands::Demo => {
            demo::run(&directory).await?;
        }
        Commands::Stats => {
            let stats = directory.estadisticas().await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}

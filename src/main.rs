use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use tracing::info;

use cloud_containers::storage::{ContainerManager, StorageConfig};

#[derive(Parser)]
#[command(name = "cloud-containers")]
#[command(about = "Manage storage containers across providers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON storage configuration file ({"type": "...", "options": {...}})
    #[arg(short, long, global = true, conflicts_with = "backend")]
    config: Option<PathBuf>,

    /// Backend type (memory, filesystem)
    #[arg(short, long, global = true, env = "CLOUD_CONTAINERS_BACKEND")]
    backend: Option<String>,

    /// Backend option as key=value, repeatable
    #[arg(short, long = "option", global = true, value_parser = parse_option)]
    options: Vec<(String, String)>,
}

#[derive(Subcommand)]
enum Command {
    /// List all containers
    List,

    /// Show a container if it exists
    Get {
        /// Container name
        name: String,
    },

    /// Create a container, or keep the existing one
    Create {
        /// Container name
        name: String,
    },

    /// Delete a container if it exists
    Delete {
        /// Container name
        name: String,
    },
}

fn parse_option(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}

async fn load_config(cli: &Cli) -> Result<StorageConfig, Box<dyn Error + Send + Sync>> {
    let config = match (&cli.config, &cli.backend) {
        (Some(path), _) => {
            let json = tokio::fs::read_to_string(path).await?;
            StorageConfig::from_json(&json)?
        }
        (None, Some(backend)) => StorageConfig::try_new(backend)?,
        (None, None) => return Err("either --config or --backend is required".into()),
    };
    Ok(config.with_options(cli.options.iter().cloned().collect()))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli).await?;
    info!("Using {} storage", config.storage_type_str());

    let manager = ContainerManager::builder(config).build().await?;

    match cli.command {
        Command::List => {
            for container in manager.list().await? {
                println!("{}", container);
            }
        }
        Command::Get { name } => match manager.get(name.as_str()).await? {
            Some(container) => println!("{:#}", container),
            None => println!("Container '{}' does not exist", name),
        },
        Command::Create { name } => {
            let container = manager.create(name.as_str()).await?;
            println!("{}", container);
        }
        Command::Delete { name } => {
            manager.delete(name.as_str()).await?;
            println!("Deleted {}", name);
        }
    }

    Ok(())
}

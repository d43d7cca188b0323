use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mma_directory::api::state::AppState;
use mma_directory::config::AppConfig;
use mma_directory::directory::{EventQuery, FighterQuery};
use mma_directory::models::{EventId, FighterId};
use mma_directory::source::{DataSource, MemorySource, RestSource};
use mma_directory::views::{
    EventDetailView, EventListView, FighterDirectory, FighterProfileView, HomeView,
    RankingsQuery, RankingsView,
};

#[derive(Parser)]
#[command(name = "mma-directory")]
#[command(about = "Directory of MMA events, fighters and rankings")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Serve from a local JSON snapshot instead of the hosted backend
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the home page: upcoming and past events with the featured card
    Home,

    /// Print one event with its fight card
    Event {
        /// Event id
        id: String,
    },

    /// Print a fighter profile
    Fighter {
        /// Fighter id
        id: String,
    },

    /// List fighters
    Fighters {
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        weight_class: Option<String>,

        #[arg(long)]
        organization: Option<String>,

        /// Roster status exactly as stored, e.g. "Active" or "Champion"
        #[arg(long)]
        status: Option<String>,

        /// name, weight-class or record
        #[arg(long)]
        sort: Option<String>,
    },

    /// List events
    Events {
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        organization: Option<String>,

        /// Month label, e.g. "April 2024"
        #[arg(long)]
        month: Option<String>,

        /// name or month
        #[arg(long)]
        sort: Option<String>,
    },

    /// Print a rankings table
    Rankings {
        #[arg(long)]
        organization: Option<String>,

        /// Division name or "Pound-for-Pound"
        #[arg(long)]
        weight_class: Option<String>,

        #[arg(long)]
        search: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(cli.json_logs.then(|| fmt::layer().json()))
        .with((!cli.json_logs).then(fmt::layer))
        .init();

    tracing::info!("Starting mma-directory v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let source = open_source(&config, cli.snapshot.as_deref())?;

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let state = AppState::new(source, config);
            let app = mma_directory::api::build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Home => {
            print_json(&HomeView::load(source.as_ref(), Utc::now()).await)?;
        }
        Commands::Event { id } => {
            let id = EventId::new(id);
            match EventDetailView::load(source.as_ref(), &id).await {
                Some(view) => print_json(&view)?,
                None => bail!("Event {} not found", id),
            }
        }
        Commands::Fighter { id } => {
            let id = FighterId::new(id);
            match FighterProfileView::load(source.as_ref(), &id).await {
                Some(view) => print_json(&view)?,
                None => bail!("Fighter {} not found", id),
            }
        }
        Commands::Fighters {
            search,
            weight_class,
            organization,
            status,
            sort,
        } => {
            let query = FighterQuery {
                search,
                weight_class,
                organization,
                status,
                sort,
            };
            print_json(&FighterDirectory::load(source.as_ref(), &query).await?)?;
        }
        Commands::Events {
            search,
            organization,
            month,
            sort,
        } => {
            let query = EventQuery {
                search,
                organization,
                month,
                sort,
            };
            print_json(&EventListView::load(source.as_ref(), &query).await?)?;
        }
        Commands::Rankings {
            organization,
            weight_class,
            search,
        } => {
            let query = RankingsQuery {
                organization,
                weight_class,
                search,
            };
            print_json(&RankingsView::load(source.as_ref(), &query).await)?;
        }
    }

    Ok(())
}

fn open_source(config: &AppConfig, snapshot: Option<&Path>) -> Result<Arc<dyn DataSource>> {
    match snapshot {
        Some(path) => {
            let source = MemorySource::from_file(path)
                .with_context(|| format!("reading snapshot {}", path.display()))?;
            Ok(Arc::new(source))
        }
        None => {
            let source = RestSource::from_config(&config.data_source)
                .context("connecting to the data source")?;
            Ok(Arc::new(source))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

//! Ecodash CLI
//!
//! Command-line interface for the dashboard:
//! - Browse the technology catalog and compare technologies
//! - Show building-type rankings and their justifications
//! - Fetch carbon and energy-usage panels from the admin API
//! - Run the interactive shell or the JSON API server

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ecodash::api::{self, AppState};
use ecodash::catalog::ReferenceStore;
use ecodash::config::{generate_default_config, Config, LoggingConfig};
use ecodash::dashboard::Dashboard;
use ecodash::metrics::{MetricsClient, MetricsSource};
use ecodash::render;
use ecodash::shell;
use ecodash::state::SelectionState;
use ecodash::views::{compare, CarbonFootprintView, EnergyUsageView, FetchState};

#[derive(Parser)]
#[command(name = "ecodash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Renewable-energy and carbon-footprint dashboard")]
#[command(long_about = "Ecodash shows renewable technology costs, per-building-type recommendations\nand carbon/energy figures fetched from the admin API.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Admin API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Config file (default: standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the technology catalog
    Technologies,

    /// Show one technology in detail
    Technology {
        /// Technology name
        name: String,
    },

    /// Compare two technologies side by side
    Compare {
        left: String,
        right: String,
    },

    /// List building types, or show one building type's ranking
    Rankings {
        /// Building type (e.g., TownHouse)
        building: Option<String>,
        /// Show the justification for this rank (1-based)
        #[arg(short, long, requires = "building")]
        entry: Option<usize>,
    },

    /// Show average carbon payback and total emission
    Carbon,

    /// Show energy usage per source
    Energy {
        /// Highlight one source
        #[arg(short, long)]
        source: Option<String>,
    },

    /// Interactive dashboard shell
    Shell,

    /// Run the dashboard JSON API
    Serve {
        /// Host to bind (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive(&config.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Crate level from config; request traces from `TraceLayer` at debug
fn default_directive(level: &str) -> String {
    format!("ecodash={},tower_http=debug", level)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, discovered) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, None),
        None => {
            let found = Config::load_default();
            (found.config.clone(), Some(found))
        }
    };
    if let Some(url) = &cli.api_url {
        config.upstream.base_url = url.clone();
    }

    // Config is read before the subscriber exists, so its outcome is logged after
    init_logging(&config.logging);
    tracing::debug!("Ecodash v{}", env!("CARGO_PKG_VERSION"));
    if let Some(found) = &discovered {
        found.report();
    }

    let store = ReferenceStore::load_or_embedded(config.data.reference_path.as_deref().map(Path::new))
        .context("loading reference data")?;

    let format = cli.format;
    match cli.command {
        Commands::Technologies => {
            if format == OutputFormat::Json {
                print_json(&store.technologies())?;
            } else {
                let selection = SelectionState::default();
                print!("{}", render::technology_grid(store.technologies(), &selection));
            }
        }

        Commands::Technology { name } => {
            let tech = store.require_technology(&name)?;
            if format == OutputFormat::Json {
                print_json(tech)?;
            } else {
                print!("{}", render::technology_detail(tech));
            }
        }

        Commands::Compare { left, right } => {
            let left = store.require_technology(&left)?;
            let right = store.require_technology(&right)?;
            let cmp = compare(left, right);
            if format == OutputFormat::Json {
                print_json(&cmp)?;
            } else {
                print!("{}", render::comparison_table(&cmp));
            }
        }

        Commands::Rankings { building, entry } => match (building, entry) {
            (None, _) => {
                let types: Vec<&str> = store.building_types().collect();
                if format == OutputFormat::Json {
                    print_json(&types)?;
                } else {
                    print!("{}", render::building_types(types.into_iter()));
                }
            }
            (Some(building), None) => {
                let entries = store.require_ranking(&building)?;
                let name = store.canonical_building_type(&building).unwrap_or(&building);
                if format == OutputFormat::Json {
                    print_json(&entries)?;
                } else {
                    print!("{}", render::ranking_list(name, entries));
                }
            }
            (Some(building), Some(rank)) => {
                anyhow::ensure!(rank > 0, "rank starts at 1");
                let item = store.ranking_entry(&building, rank - 1)?;
                if format == OutputFormat::Json {
                    print_json(item)?;
                } else {
                    print!("{}", render::justification_dialog(rank - 1, item));
                }
            }
        },

        Commands::Carbon => {
            let source = metrics_source(&config)?;
            let mut view = CarbonFootprintView::mount(source);
            let state = view.settled().await;
            if format == OutputFormat::Json {
                print_json(&state)?;
            } else {
                print!("{}", render::carbon_cards(&state));
            }
            if state.is_failed() {
                std::process::exit(1);
            }
        }

        Commands::Energy { source: selected } => {
            let source = metrics_source(&config)?;
            let mut view = EnergyUsageView::mount(source);
            let state = view.settled().await;
            if let (Some(name), FetchState::Loaded(_)) = (&selected, &state) {
                view.select_source(name)?;
            }
            if format == OutputFormat::Json {
                print_json(&state)?;
            } else {
                print!("{}", render::energy_chart(&state, view.selected().as_ref()));
            }
            if state.is_failed() {
                std::process::exit(1);
            }
        }

        Commands::Shell => {
            let source = metrics_source(&config)?;
            let mut dashboard = Dashboard::new(store, source);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            shell::run(&mut dashboard, stdin).await?;
        }

        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let source = metrics_source(&config)?;
            tracing::info!(upstream = %config.upstream.base_url, "Starting dashboard API");
            api::serve(AppState::new(store, source, config.server.clone())).await?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn metrics_source(config: &Config) -> anyhow::Result<Arc<dyn MetricsSource>> {
    let client = MetricsClient::new(config.upstream.client_config())
        .context("creating admin API client")?;
    Ok(Arc::new(client))
}

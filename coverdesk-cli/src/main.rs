//! Coverdesk CLI - Command-line interface for the policy catalog

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use coverdesk_core::{Policy, PolicyCatalog, PolicyQuery};
use coverdesk_server::ServerConfig;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "coverdesk")]
#[command(about = "Coverdesk - Search and serve the insurance policy catalog")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Search policies with optional filters
    Search {
        /// Case-insensitive name substring
        #[arg(long)]
        name: Option<String>,

        /// Exact policy type (e.g. "Term Life")
        #[arg(long = "type")]
        policy_type: Option<String>,

        /// Minimum premium (inclusive)
        #[arg(long, allow_hyphen_values = true)]
        min_premium: Option<i64>,

        /// Maximum premium (inclusive)
        #[arg(long, allow_hyphen_values = true)]
        max_premium: Option<i64>,

        /// Minimum coverage (inclusive)
        #[arg(long, allow_hyphen_values = true)]
        min_coverage: Option<i64>,

        /// Sort by premium: asc or desc; other values keep catalog order
        #[arg(long)]
        sort: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a single policy by id
    Show {
        /// Policy id
        id: i64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List distinct policy types
    Types {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides the configured bind address port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The server installs its own subscriber
    if cli.verbose && !matches!(cli.command, Commands::Serve { .. }) {
        tracing_subscriber::fmt()
            .with_env_filter("coverdesk=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let catalog = PolicyCatalog::builtin();

    match cli.command {
        Commands::Search {
            name,
            policy_type,
            min_premium,
            max_premium,
            min_coverage,
            sort,
            format,
        } => {
            let query = PolicyQuery {
                name,
                policy_type,
                min_premium,
                max_premium,
                min_coverage,
                sort: None,
            };
            let query = match sort {
                Some(raw) => query.sort_raw(&raw),
                None => query,
            };
            search_command(&catalog, &query, format)?;
        }
        Commands::Show { id, format } => {
            show_command(&catalog, id, format)?;
        }
        Commands::Types { format } => {
            types_command(&catalog, format)?;
        }
        Commands::Serve { config, port } => {
            serve_command(config, port).await?;
        }
    }

    Ok(())
}

fn search_command(
    catalog: &PolicyCatalog,
    query: &PolicyQuery,
    format: OutputFormat,
) -> Result<()> {
    let start = Instant::now();
    let results = catalog.search(query);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        OutputFormat::Text => {
            println!("\n{} Policies", "═".blue().bold());
            if results.is_empty() {
                println!("{} No policies match the given filters", "!".yellow());
            }
            for policy in &results {
                print_policy(policy);
            }
            println!(
                "\n{} {} of {} policies ({:.3}ms)",
                "✓".green(),
                results.len(),
                catalog.len(),
                start.elapsed().as_secs_f64() * 1000.0
            );
        }
    }

    Ok(())
}

fn show_command(catalog: &PolicyCatalog, id: i64, format: OutputFormat) -> Result<()> {
    let policy = catalog
        .get(id)
        .with_context(|| format!("No policy with id {}", id))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(policy)?),
        OutputFormat::Text => print_policy(policy),
    }

    Ok(())
}

fn types_command(catalog: &PolicyCatalog, format: OutputFormat) -> Result<()> {
    let mut types = catalog.policy_types();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&types)?);
        }
        OutputFormat::Text => {
            types.sort();
            println!("\n{} Policy Types", "═".blue().bold());
            for policy_type in &types {
                println!("{} {}", "▸".blue(), policy_type);
            }
        }
    }

    Ok(())
}

async fn serve_command(config: Option<PathBuf>, port: Option<u16>) -> Result<()> {
    if let Some(path) = &config {
        println!(
            "{} Loading configuration from {}...",
            "→".blue(),
            path.display()
        );
    }

    let mut server_config = ServerConfig::load(config.as_deref())?;
    if let Some(port) = port {
        server_config = server_config.with_port(port)?;
    }

    println!(
        "{} Starting Coverdesk server on {}...",
        "→".blue(),
        server_config.bind_address
    );

    coverdesk_server::serve(server_config).await
}

fn print_policy(policy: &Policy) {
    println!(
        "{} {} {}",
        "▸".blue(),
        format!("#{}", policy.id).as_str().dimmed(),
        policy.name.bold()
    );
    println!("    Type: {}", policy.policy_type);
    println!("    Premium: {}", policy.premium);
    println!("    Coverage: {}", policy.coverage);
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use wander_core::{
    format_rupees, generate_itinerary, render_html, render_text, Catalog, PlanRequest,
};
use wander_observability::init_tracing;

#[derive(Debug, Parser)]
#[command(name = "wander")]
#[command(about = "WanderNow itinerary planner")]
struct Cli {
    /// JSON destination catalog to use instead of the built-in one.
    #[arg(long, env = "WANDER_CATALOG_PATH", global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a day-by-day itinerary.
    Plan {
        #[arg(long, default_value = "")]
        destination: String,
        /// Number of days. Invalid values are treated as 0.
        #[arg(long, default_value = "3", allow_hyphen_values = true)]
        days: String,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        budget: String,
        /// heritage, nightlife or adventure. Repeat to cycle through several.
        #[arg(long = "pref")]
        preferences: Vec<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List the destinations in the catalog.
    Destinations,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Html,
}

fn main() -> Result<()> {
    init_tracing("wander_cli");
    let cli = Cli::parse();

    let catalog = Catalog::load(cli.catalog.as_deref()).with_context(|| match &cli.catalog {
        Some(path) => format!("failed loading catalog from {}", path.display()),
        None => "failed loading built-in catalog".to_string(),
    })?;

    match cli.command {
        Command::Plan {
            destination,
            days,
            budget,
            preferences,
            format,
        } => {
            let request = PlanRequest::from_form(&destination, &days, &budget, preferences);
            let itinerary = generate_itinerary(&request, &catalog);

            match format {
                OutputFormat::Text => print!("{}", render_text(&itinerary)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&itinerary)?),
                OutputFormat::Html => println!("{}", render_html(&itinerary)),
            }
        }
        Command::Destinations => {
            for destination in catalog.destinations() {
                println!(
                    "{:<12} {:>8}/day  base {} days",
                    destination.name,
                    format_rupees(destination.cost_per_day),
                    destination.base_days
                );
            }
        }
    }

    Ok(())
}

mod render;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use anyhow::Context;
use clap::{Parser, Subcommand};
use parkfinder_core::{Area, Catalog, SelectionState, SortKey, ViewMode};
use parkfinder_geocode::{is_valid_postcode_format, submit_postcode, PostcodeClient};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "parkfinder")]
#[command(about = "Browse and rank outdoor calisthenics parks")]
struct Cli {
    /// Catalog YAML file (overrides PARKFINDER_CATALOG_PATH)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the five areas and how many parks each holds
    Areas,
    /// Filter, rank, and group parks
    List {
        /// Restrict to an area (repeatable): central, north, south, east, west
        #[arg(long = "area")]
        areas: Vec<Area>,
        /// Keep parks whose whole-star rating matches (repeatable)
        #[arg(long = "rating", value_parser = clap::value_parser!(u8).range(0..=5))]
        ratings: Vec<u8>,
        /// Sort key: rating, name, or distance. Defaults to distance when
        /// --postcode resolves, rating otherwise
        #[arg(long)]
        sort: Option<SortKey>,
        /// UK postcode to rank by proximity
        #[arg(long)]
        postcode: Option<String>,
        /// Collapse these rating buckets (repeatable)
        #[arg(long = "collapse")]
        collapsed: Vec<u8>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
        /// Map view instead of the list
        #[arg(long, conflicts_with = "json")]
        map: bool,
    },
    /// Resolve a postcode to coordinates
    Locate { postcode: String },
    /// Show one park in detail
    Show {
        /// Exact park name as listed
        name: String,
        /// Image to show, clamped to the available range
        #[arg(long, default_value = "0")]
        image: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = parkfinder_core::load_app_config_from_env().context("invalid configuration")?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let catalog_path = cli.catalog.unwrap_or_else(|| config.catalog_path.clone());
    tracing::debug!(env = %config.env, catalog = %catalog_path.display(), "starting");

    match cli.command {
        Commands::Areas => {
            let catalog = load(&catalog_path)?;
            render::print_areas(&catalog);
        }
        Commands::List {
            areas,
            ratings,
            sort,
            postcode,
            collapsed,
            json,
            map,
        } => {
            let catalog = load(&catalog_path)?;
            let state = initial_selection(&areas, &ratings, &collapsed, map);

            let mut state = if let Some(postcode) = postcode {
                let client = PostcodeClient::from_config(&config)?;
                let shared = Mutex::new(state);
                submit_postcode(&client, &shared, &postcode).await;
                shared.into_inner().unwrap_or_else(PoisonError::into_inner)
            } else {
                state
            };

            if let Some(sort) = sort {
                if !state.set_sort(sort) && state.last_error().is_none() {
                    tracing::warn!("distance sort needs --postcode; falling back to rating");
                }
            }

            if let Some(error) = state.last_error() {
                eprintln!("{error}");
            }

            let groups = state.query(&catalog);
            if json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
            } else {
                render::print_groups(&catalog, &state, &groups);
            }
        }
        Commands::Locate { postcode } => {
            if !is_valid_postcode_format(&postcode) {
                tracing::warn!(%postcode, "input does not look like a UK postcode; trying anyway");
            }
            let client = PostcodeClient::from_config(&config)?;
            let coord = client.resolve(&postcode).await?;
            println!("{:.6}, {:.6}", coord.latitude, coord.longitude);
        }
        Commands::Show { name, image } => {
            let catalog = load(&catalog_path)?;
            let id = catalog
                .find_by_name(&name)
                .ok_or_else(|| anyhow::anyhow!("no park named '{name}' in the catalog"))?;
            let mut state = SelectionState::new();
            render::print_venue(&catalog, &mut state, id, image);
        }
    }

    Ok(())
}

/// Selection state for one `list` run. Repeated flags select once rather than
/// toggling back off.
fn initial_selection(
    areas: &[Area],
    ratings: &[u8],
    collapsed: &[u8],
    map: bool,
) -> SelectionState {
    let mut state = SelectionState::new();
    for &area in areas.iter().collect::<BTreeSet<_>>() {
        state.toggle_area(area);
    }
    for &rating in ratings.iter().collect::<BTreeSet<_>>() {
        state.toggle_rating(rating);
    }
    for &bucket in collapsed.iter().collect::<BTreeSet<_>>() {
        state.toggle_bucket(bucket);
    }
    if map {
        state.set_view_mode(ViewMode::Map);
    }
    state
}

fn load(path: &std::path::Path) -> anyhow::Result<Catalog> {
    parkfinder_core::load_catalog(path)
        .with_context(|| format!("failed to load catalog from {}", path.display()))
}

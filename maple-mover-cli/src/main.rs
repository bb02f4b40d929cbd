use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow, bail};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use geo::point;
use indicatif::{ProgressBar, ProgressStyle};
use maple_mover_model::RouteSummary;
use maple_mover_transit::collaborators::{
    FixedLocation, LocationError, NearbyArrivals, SearchController, StopArrivals, StopDirectory,
};
use maple_mover_transit::defaults::{ARRIVALS_PER_ROUTE, MAX_NEARBY_STOPS, SEARCH_RADIUS_METERS};
use maple_mover_transit::geography::{TORONTO_CENTER, format_distance};
use maple_mover_transit::{PredictionSnapshot, RouteConfigDocument, StopCatalog, catalog_cache};
use maple_mover_ui::theme::Theme;
use maple_mover_ui::views::{ResultsOutcome, StopResults};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Catalogs older than this are still used, with a warning.
const STALE_CATALOG_DAYS: i64 = 30;

#[derive(Parser, Debug)]
#[command(name = "maple-mover", author, version, about, long_about = None)]
struct Cli {
    /// Subcommand/tool to run
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render one of the static pages
    Render {
        page: Page,

        /// Where to write the HTML (defaults to stdout)
        #[arg(env, long)]
        output: Option<PathBuf>,
    },
    /// Build or inspect a stop catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Render arrivals at the stops closest to a location
    Nearby {
        #[command(flatten)]
        data: DataArgs,

        /// Latitude to search around (defaults to downtown Toronto)
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude to search around (defaults to downtown Toronto)
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Search radius, in meters
        #[arg(env, long, default_value_t = SEARCH_RADIUS_METERS)]
        radius: f64,

        /// How many stops to show at most
        #[arg(env, long, default_value_t = MAX_NEARBY_STOPS)]
        max_stops: usize,

        /// Where to write the HTML (defaults to stdout)
        #[arg(env, long)]
        output: Option<PathBuf>,
    },
    /// Find stops by name or route number
    Search {
        query: String,

        #[command(flatten)]
        data: DataArgs,

        /// Print the matching route summaries as JSON instead of rendering a page
        #[arg(long)]
        json: bool,

        /// Where to write the output (defaults to stdout)
        #[arg(env, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Build a catalog from NextBus route configuration files
    Build {
        /// Route configuration JSON files (one route each, or several)
        #[arg(required = true)]
        route_configs: Vec<PathBuf>,

        /// Path to the catalog file (will be overwritten if it exists)
        #[arg(env = "CATALOG", long)]
        output: PathBuf,

        /// Disables progress output.
        #[arg(env, long)]
        no_progress: bool,
    },
    /// Summarize a catalog
    Info {
        #[arg(env)]
        catalog: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Page {
    /// The homepage with the featured routes
    Home,
    /// A single route card
    Card,
}

/// The offline data a lookup reads.
#[derive(Args, Debug)]
struct DataArgs {
    /// Path to a catalog written by `catalog build`
    #[arg(env, long)]
    catalog: PathBuf,

    /// Path to a NextBus prediction snapshot (one document or a list)
    #[arg(env, long)]
    predictions: PathBuf,

    /// How many arrivals to show per route
    #[arg(env, long, default_value_t = ARRIVALS_PER_ROUTE)]
    arrivals: usize,
}

impl DataArgs {
    fn load(&self) -> anyhow::Result<(StopCatalog, PredictionSnapshot)> {
        let cached = catalog_cache::load(&self.catalog)
            .with_context(|| format!("Failed to read catalog at {}", self.catalog.display()))?
            .ok_or_else(|| {
                anyhow!(
                    "No catalog at {}. Build one with `maple-mover catalog build`.",
                    self.catalog.display()
                )
            })?;

        let age_days = cached.age_days(Utc::now());
        if age_days > STALE_CATALOG_DAYS {
            warn!(age_days, "Stop catalog is stale; consider rebuilding it");
        }

        let predictions = PredictionSnapshot::load(&self.predictions).with_context(|| {
            format!(
                "Failed to read predictions at {}",
                self.predictions.display()
            )
        })?;
        if predictions.is_empty() {
            warn!("Prediction snapshot has no stops");
        }

        Ok((cached.catalog, predictions))
    }
}

fn to_stop_results(stops: Vec<StopArrivals<'_>>) -> Vec<StopResults> {
    stops
        .into_iter()
        .map(|found| StopResults {
            title: found.stop.title.clone(),
            distance: found.distance_meters.map(format_distance),
            routes: found.routes,
        })
        .collect()
}

fn write_output(contents: &str, output: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = output {
        fs::write(path, contents)
            .with_context(|| format!("Failed to write output to {}", path.display()))?;
        info!(path = %path.display(), bytes = contents.len(), "Wrote output");
    } else {
        print!("{contents}");
    }
    Ok(())
}

fn build_catalog(route_configs: &[PathBuf], output: &Path, no_progress: bool) -> anyhow::Result<()> {
    let progress_bar = if no_progress {
        None
    } else {
        let bar = ProgressBar::new(route_configs.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("[{elapsed}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
                .progress_chars("##-"),
        );
        bar.set_message("Reading route configurations...");
        Some(bar)
    };

    let mut catalog = StopCatalog::default();
    for path in route_configs {
        let document = RouteConfigDocument::load(path)
            .with_context(|| format!("Failed to read route configuration at {}", path.display()))?;
        for route in document.route {
            catalog.add_route_config(route);
        }
        progress_bar.as_ref().inspect(|bar| bar.inc(1));
    }
    progress_bar.inspect(ProgressBar::finish);

    if catalog.is_empty() {
        bail!("The route configurations contained no stops");
    }

    catalog_cache::save(&catalog, output)
        .with_context(|| format!("Failed to write catalog to {}", output.display()))?;
    info!(
        routes = catalog.route_count(),
        stops = catalog.stop_count(),
        path = %output.display(),
        "Catalog built"
    );
    Ok(())
}

/// Matching route summaries as JSON, or a results page.
fn search(query: &str, data: &DataArgs, json: bool, theme: &Theme) -> anyhow::Result<String> {
    let (catalog, predictions) = data.load()?;
    let directory =
        StopDirectory::new(&catalog, &predictions).with_arrivals_per_route(data.arrivals);

    if json {
        let routes: Vec<RouteSummary> = directory.search(query)?;
        return Ok(serde_json::to_string_pretty(&routes)?);
    }

    let stops = directory.stops_matching(query)?;
    let heading = format!("Results for \"{}\"", query.trim());
    Ok(maple_mover_ui::results_page(
        &heading,
        ResultsOutcome::from_stops(to_stop_results(stops)),
        theme,
    ))
}

fn catalog_info(path: &Path) -> anyhow::Result<()> {
    let cached = catalog_cache::load(path)
        .with_context(|| format!("Failed to read catalog at {}", path.display()))?
        .ok_or_else(|| anyhow!("No catalog at {}", path.display()))?;

    let summary = serde_json::json!({
        "version": catalog_cache::FORMAT_VERSION,
        "saved_at": cached.saved_at,
        "age_days": cached.age_days(Utc::now()),
        "routes": cached.catalog.route_count(),
        "stops": cached.catalog.stop_count(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        // Standard logger, configured via the RUST_LOG env variable
        .with(tracing_subscriber::fmt::layer().with_filter(EnvFilter::from_default_env()))
        .init();

    let cli = Cli::parse();
    let theme = Theme::default();

    match cli.command {
        Commands::Render { page, output } => {
            let html = match page {
                Page::Home => maple_mover_ui::home_page_with(
                    maple_mover_model::featured::featured_routes(),
                    &theme,
                ),
                Page::Card => maple_mover_ui::card_page_with(
                    maple_mover_model::featured::card_demo_route(),
                    &theme,
                ),
            };
            write_output(&html, output.as_deref())
        }
        Commands::Catalog { command } => match command {
            CatalogCommand::Build {
                route_configs,
                output,
                no_progress,
            } => build_catalog(&route_configs, &output, no_progress),
            CatalogCommand::Info { catalog } => catalog_info(&catalog),
        },
        Commands::Nearby {
            data,
            lat,
            lon,
            radius,
            max_stops,
            output,
        } => {
            let (catalog, predictions) = data.load()?;
            let directory =
                StopDirectory::new(&catalog, &predictions).with_arrivals_per_route(data.arrivals);
            let location = match (lat, lon) {
                (Some(lat), Some(lon)) => point!(x: lon, y: lat),
                _ => TORONTO_CENTER,
            };

            let outcome = match NearbyArrivals::new(FixedLocation(location))
                .with_radius(radius)
                .with_max_stops(max_stops)
                .find(&directory)
            {
                Ok(stops) => ResultsOutcome::from_stops(to_stop_results(stops)),
                Err(LocationError::OutsideServiceArea { lat, lon }) => {
                    warn!(lat, lon, "Location is outside the service area");
                    ResultsOutcome::OutsideServiceArea
                }
                Err(e) => return Err(e.into()),
            };

            let heading = format!("Routes near {:.4}, {:.4}", location.y(), location.x());
            write_output(
                &maple_mover_ui::results_page(&heading, outcome, &theme),
                output.as_deref(),
            )
        }
        Commands::Search {
            query,
            data,
            json,
            output,
        } => write_output(&search(&query, &data, json, &theme)?, output.as_deref()),
    }
}

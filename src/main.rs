use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;

use statemaps::api::{load_source, parse_regions};
use statemaps::config::FileConfig;
use statemaps::domain::{MetroTable, RegionSource};
use statemaps::geometry::{Canvas, RingSelection};
use statemaps::output::{BoundaryFormat, write_boundaries, write_metros_json, write_state_maps};
use statemaps::pipeline::{
    BatchOutcome, BoundaryOptions, MapOptions, build_boundaries, build_state_maps,
};

/// Generate simplified state boundaries and metro-marker SVG maps
///
/// Examples:
///   # TypeScript boundary module from the default US states GeoJSON
///   statemaps boundaries -o client/src/data/stateBoundaries.ts
///
///   # Boundaries with precomputed mask rings, from a local file
///   statemaps --input us-states.json boundaries --format json -o boundaries.json
///
///   # One SVG per state with metro dots on a larger canvas
///   statemaps maps -o attached_assets/state_maps --width 800 --height 600
#[derive(Parser, Debug)]
#[command(name = "statemaps")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches statemaps.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read geometry from a local GeoJSON file instead of downloading it
    #[arg(short = 'i', long, global = true)]
    input: Option<PathBuf>,

    /// GeoJSON source URL
    #[arg(long, global = true)]
    url: Option<String>,

    /// Feature property holding the region name
    #[arg(long, global = true)]
    name_property: Option<String>,

    /// Download again even if a cached copy exists
    #[arg(long, global = true)]
    refresh: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simplified boundary rings for map masks
    Boundaries {
        /// Output file
        #[arg(short = 'o', long, default_value = "stateBoundaries.ts")]
        output: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = BoundaryFormat::Ts)]
        format: BoundaryFormat,

        /// Maximum sampled points per boundary (a closing point may be added)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        budget: Option<u32>,

        /// How to pick the main polygon of a multi-polygon region
        #[arg(long, value_enum)]
        ring_selection: Option<RingSelection>,
    },

    /// State outline SVGs with metro dots
    Maps {
        /// Output directory
        #[arg(short = 'o', long, default_value = "state_maps")]
        output: PathBuf,

        /// Metro table JSON (defaults to the built-in table)
        #[arg(long)]
        metros: Option<PathBuf>,

        /// Canvas width in pixels
        #[arg(long)]
        width: Option<f64>,

        /// Canvas height in pixels
        #[arg(long)]
        height: Option<f64>,

        /// Padding on every side in pixels
        #[arg(long)]
        padding: Option<f64>,

        /// Decimate outlines to this many points per ring (default: full detail)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        outline_budget: Option<u32>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let mut file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            FileConfig::from_path(config_path)?
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load().unwrap_or_default()
    };

    if let Some(url) = args.url.clone() {
        file_config.source.url = url;
    }
    if let Some(name_property) = args.name_property.clone() {
        file_config.source.name_property = name_property;
    }

    let verbose = args.verbose || file_config.verbose;
    init_logging(verbose);

    println!("statemaps - State Boundary & Map Generator");
    println!("==========================================");
    println!();

    let regions = load_regions(&args, &file_config)?;

    match args.command {
        Command::Boundaries {
            output,
            format,
            budget,
            ring_selection,
        } => {
            let options = BoundaryOptions {
                budget: budget.map(|b| b as usize).unwrap_or(file_config.simplify_budget),
                selection: ring_selection.unwrap_or(file_config.ring_selection),
            };
            if options.budget == 0 {
                bail!("simplify_budget must be at least 1");
            }
            if verbose {
                println!("Configuration:");
                println!("  Simplify budget: {}", options.budget);
                println!("  Ring selection: {:?}", options.selection);
                println!("  Format: {:?}", format);
                println!("  Output: {}", output.display());
                println!();
            }

            let spinner = create_spinner("Simplifying boundaries...");
            let start = Instant::now();
            let outcome = build_boundaries(&regions, &options);
            spinner.finish_with_message(format!(
                "Simplified {} boundaries [{:.1}s]",
                outcome.processed(),
                start.elapsed().as_secs_f32()
            ));

            write_boundaries(&output, &outcome.items, format)
                .context("Failed to write boundaries")?;

            print_summary(&outcome);
            println!("Output: {}", output.display());
        }
        Command::Maps {
            output,
            metros,
            width,
            height,
            padding,
            outline_budget,
        } => {
            let metro_table = match metros {
                Some(path) => MetroTable::from_file(&path)?,
                None => MetroTable::builtin()?,
            };

            let defaults = file_config.canvas;
            let options = MapOptions {
                canvas: Canvas {
                    width: width.unwrap_or(defaults.width),
                    height: height.unwrap_or(defaults.height),
                    padding: padding.unwrap_or(defaults.padding),
                },
                markers: file_config.markers,
                outline_budget: outline_budget
                    .map(|b| b as usize)
                    .or(file_config.outline_budget),
            };
            if verbose {
                println!("Configuration:");
                println!(
                    "  Canvas: {}x{} (padding {})",
                    options.canvas.width, options.canvas.height, options.canvas.padding
                );
                println!("  Outline budget: {:?}", options.outline_budget);
                println!("  Metro regions: {}", metro_table.len());
                println!("  Output: {}", output.display());
                println!();
            }

            let spinner = create_spinner("Rendering state maps...");
            let start = Instant::now();
            let outcome = build_state_maps(&regions, &metro_table, &options);
            spinner.finish_with_message(format!(
                "Rendered {} maps [{:.1}s]",
                outcome.processed(),
                start.elapsed().as_secs_f32()
            ));

            let written = write_state_maps(&output, &outcome.items)
                .context("Failed to write state maps")?;
            if verbose {
                for (path, map) in written.iter().zip(&outcome.items) {
                    println!("  {} ({} metros)", path.display(), map.markers.len());
                }
            }
            let metros_path = write_metros_json(&output, &metro_table)?;

            print_summary(&outcome);
            println!("Output: {}", output.display());
            println!("Metros data: {}", metros_path.display());
        }
    }

    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_regions(args: &Args, config: &FileConfig) -> Result<Vec<RegionSource>> {
    let spinner = create_spinner("Loading region geometry...");
    let start = Instant::now();

    let body = match args.input {
        Some(ref path) => read_input(path)?,
        None => load_source(&config.source, args.refresh)
            .context("Failed to load geometry source")?,
    };
    let regions = parse_regions(&body, &config.source.name_property)?;

    if regions.is_empty() {
        bail!(
            "No regions found. Check that features carry a '{}' property (--name-property)",
            config.source.name_property
        );
    }

    spinner.finish_with_message(format!(
        "Loaded {} regions [{:.1}s]",
        regions.len(),
        start.elapsed().as_secs_f32()
    ));
    Ok(regions)
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read geometry file: {}", path.display()))
}

fn print_summary<T>(outcome: &BatchOutcome<T>) {
    println!();
    println!("Summary: {}", outcome.summary());
    for skip in &outcome.skipped {
        println!("  skipped {}: {}", skip.region, skip.reason);
    }
    println!();
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

use anyhow::{Context, Result};
use bonsai_core::{
    analysis,
    error::BonsaiError,
    simulation::{builder::SimulationBuilder, engine::TickInputs},
    store::BonsaiStore,
    weather::WeatherCycle,
};
use bonsai_schemas::species::Species;
use clap::Parser;
use rand::{rngs::SmallRng, SeedableRng};
use std::fs;
use std::path::Path;

mod caretaker;
mod config;

/// Runs an unattended caretaking session for one tree and prints the
/// resulting care report.
#[derive(Parser)]
#[command(name = "bonsai-app", about = "Virtual bonsai caretaking demo")]
struct Args {
    /// Owner of the tree.
    #[arg(long, default_value = "demo")]
    owner: String,

    /// Name of the tree. Loaded from the store when it exists, potted fresh
    /// otherwise.
    #[arg(long, default_value = "Kiyoshi")]
    name: String,

    /// Species for a freshly potted tree: pine, maple or juniper.
    #[arg(long, default_value = "pine")]
    species: String,

    /// Number of simulation ticks to run.
    #[arg(long, default_value_t = 200)]
    ticks: u64,

    /// Seed for the weather cycle and branch layouts.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Directory with species.yaml/styles.yaml catalog overrides.
    #[arg(long)]
    data_dir: Option<String>,

    /// Directory holding persisted trees.
    #[arg(long, default_value = "./data/trees")]
    store_dir: String,

    /// Directory for per-run output (time-series log).
    #[arg(long, default_value = "./data/runs")]
    out_dir: String,
}

/// Ticks between weather shifts.
const WEATHER_SHIFT_INTERVAL: u64 = 5;

fn main() -> Result<()> {
    let args = Args::parse();
    println!("--- Virtual Bonsai ---");

    let catalogs = match &args.data_dir {
        Some(dir) => config::Catalogs::load(dir)?,
        None => config::Catalogs::builtin(),
    };

    let species: Species = serde_yaml::from_str(&args.species)
        .with_context(|| format!("Unknown species '{}'", args.species))?;

    let store = BonsaiStore::new(&args.store_dir);
    let existing = match store.load(&args.owner, &args.name) {
        Ok(tree) => {
            println!("Loaded '{}' (age {:.0}, growth {:.1})", tree.name, tree.age, tree.growth);
            Some(tree)
        }
        Err(BonsaiError::TreeNotFound { .. }) => None,
        Err(e) => return Err(e.into()),
    };

    let run_dir = format!(
        "{}/{}_{}_{}",
        args.out_dir,
        args.owner,
        args.name,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    fs::create_dir_all(&run_dir)
        .with_context(|| format!("Failed to create output directory: {}", run_dir))?;
    let log_path = Path::new(&run_dir).join("timeseries.csv");
    let log_path = log_path.to_string_lossy().to_string();

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let mut weather = WeatherCycle::from_seed(args.seed);

    let builder = SimulationBuilder::new()
        .with_species_catalog(catalogs.species)
        .with_style_catalog(catalogs.styles)
        .with_timeseries_logging_to_file(&log_path);
    let builder = match existing {
        Some(tree) => builder.with_bonsai(tree),
        None => {
            println!("Potting a new {} named '{}'", args.species, args.name);
            builder.with_new_tree(&args.owner, &args.name, species)
        }
    };
    let mut engine = builder.build(&mut rng)?;

    let caretaker = caretaker::Caretaker::default();
    for tick in 1..=args.ticks {
        if (tick - 1) % WEATHER_SHIFT_INTERVAL == 0 {
            let condition = weather.advance();
            println!("--- The weather turned {} ---", condition);
        }
        engine.tick(&TickInputs::for_condition(weather.current()))?;
        caretaker.tend(&mut engine, tick)?;
    }

    let mut tree = engine.into_state();
    store.save(&mut tree)?;

    let report = analysis::care_report(&log_path)?;
    println!("Session complete. Log in '{}'", log_path);
    println!(
        "Ticks: {} | watered {}x, sunlight {}x, pruned {}x",
        report.total_ticks, report.times_watered, report.times_sunlight_given, report.times_pruned
    );
    println!(
        "Health: {:.0} (min {:.0}) | growth {:.1} | age {:.0}",
        report.final_health, report.min_health, report.final_growth, report.final_age
    );

    Ok(())
}

//! Gameprobe command-line interface.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use action_catalog::CatalogBuilder;
use gameprobe_cli::config::ProbeSettings;
use gameprobe_cli::descriptor::load_descriptor;
use gameprobe_cli::sim::SimulatedGame;
use gameprobe_core_types::ActionKind;
use interaction_engine::InteractionCycleEngine;
use perceiver_diff::{ArtifactDetector, ChangeDetector, StructuralDetector};

#[derive(Parser)]
#[command(
    name = "gameprobe",
    version,
    about = "Exploratory playability probing for browser games"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the action catalog built for a game descriptor
    Catalog {
        /// Descriptor file (YAML or JSON)
        #[arg(long)]
        descriptor: PathBuf,

        /// Emit the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the interaction engine against the built-in simulated game
    Simulate {
        /// Descriptor file (YAML or JSON)
        #[arg(long)]
        descriptor: PathBuf,

        /// Settings file (YAML); defaults apply when omitted
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Wall-clock budget for the run, e.g. "30s"
        #[arg(long, value_parser = humantime::parse_duration)]
        budget: Option<Duration>,

        /// Stop after this many cycles
        #[arg(long)]
        cycles: Option<u32>,

        /// Ask perception for visible actions ahead of each cycle
        #[arg(long)]
        observe_first: bool,

        /// Change-detection strategy for the run
        #[arg(long, value_enum, default_value = "structural")]
        detector: DetectorKind,
    },
}

/// Which snapshot-comparison strategy a run uses. Strategies are selected
/// once per run and never mixed.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum DetectorKind {
    Structural,
    Artifact,
}

impl DetectorKind {
    fn instantiate(self) -> Arc<dyn ChangeDetector> {
        match self {
            DetectorKind::Structural => Arc::new(StructuralDetector::new()),
            DetectorKind::Artifact => Arc::new(ArtifactDetector::new()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Catalog { descriptor, json } => cmd_catalog(&descriptor, json),
        Command::Simulate {
            descriptor,
            settings,
            budget,
            cycles,
            observe_first,
            detector,
        } => {
            cmd_simulate(
                &descriptor,
                settings.as_deref(),
                budget,
                cycles,
                observe_first,
                detector,
            )
            .await
        }
    }
}

fn cmd_catalog(descriptor_path: &Path, json: bool) -> Result<()> {
    let descriptor = load_descriptor(descriptor_path)?;
    let catalog = CatalogBuilder::build(&descriptor);

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    println!("Catalog for {} ({} actions):", descriptor.name, catalog.len());
    for (index, action) in catalog.iter().enumerate() {
        let detail = match action.kind {
            ActionKind::Key => action.value.clone().unwrap_or_default(),
            ActionKind::Click | ActionKind::Type => action.target.clone().unwrap_or_default(),
            ActionKind::Wait => format!("{}ms", action.duration_ms.unwrap_or(0)),
        };
        println!("  {:>2}. {:<6} {}", index + 1, action.kind.to_string(), detail);
    }
    Ok(())
}

async fn cmd_simulate(
    descriptor_path: &Path,
    settings_path: Option<&Path>,
    budget_override: Option<Duration>,
    cycles: Option<u32>,
    observe_first: bool,
    detector: DetectorKind,
) -> Result<()> {
    let descriptor = load_descriptor(descriptor_path)?;
    let settings = match settings_path {
        Some(path) => ProbeSettings::load(path)?,
        None => ProbeSettings::default(),
    };

    let mut budget = settings.budget();
    if let Some(duration) = budget_override {
        budget.time_budget_ms = duration.as_millis() as u64;
    }
    if let Some(count) = cycles {
        budget = budget.with_cycles(count);
    }

    let game = Arc::new(SimulatedGame::from_descriptor(&descriptor));
    let mut engine = InteractionCycleEngine::builder()
        .config(settings.engine_config())
        .actuator(game.clone())
        .perception(game.clone())
        .detector(detector.instantiate())
        .build()?;
    engine.build_catalog(&descriptor)?;

    info!(game = %descriptor.name, observe_first, "starting simulated run");
    let report = if observe_first {
        engine.run_until_observing(budget).await?
    } else {
        engine.run_until(budget).await?
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

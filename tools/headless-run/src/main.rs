//! headless-run: drive a LAST BELL run without a frontend.
//!
//! Usage:
//!   headless-run run --ticks 3600 --seed 7
//!   headless-run run --config tuning.json --content content.json
//!   headless-run check --config tuning.json --content content.json

use std::collections::BTreeMap;
use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;

use lastbell_core::commands::{InputIntent, PlayerCommand};
use lastbell_core::config::GameConfig;
use lastbell_core::content::ContentTables;
use lastbell_core::enums::{DeathCause, GamePhase, ItemKind};
use lastbell_core::events::GameEvent;
use lastbell_core::state::GameStateSnapshot;
use lastbell_sim::{SimConfig, SimulationEngine};

#[derive(Parser)]
#[command(author, version, about = "Headless LAST BELL simulation runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Play a scripted run and print a JSON summary
    Run {
        /// Number of ticks to simulate (60 per second)
        #[arg(long, default_value_t = 3600)]
        ticks: u64,
        /// RNG seed. Omit for an entropy-seeded run
        #[arg(long)]
        seed: Option<u64>,
        /// GameConfig JSON file
        #[arg(long)]
        config: Option<PathBuf>,
        /// ContentTables JSON file
        #[arg(long)]
        content: Option<PathBuf>,
    },
    /// Load and validate config and content files
    Check {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        content: Option<PathBuf>,
    },
}

/// What the runner reports once the run stops.
#[derive(Debug, Default, Serialize)]
struct RunSummary {
    seed: Option<u64>,
    ticks: u64,
    elapsed_secs: f64,
    phase: GamePhase,
    floor: u32,
    death: Option<DeathCause>,
    health: f32,
    sanity: f32,
    stamina: f32,
    battery: f32,
    inventory: Vec<ItemKind>,
    achievements: Vec<String>,
    max_segments_seen: usize,
    frontier_z: f32,
    events: BTreeMap<&'static str, u32>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();
    let result = match cli.cmd {
        Cmd::Run {
            ticks,
            seed,
            config,
            content,
        } => cmd_run(ticks, seed, config, content),
        Cmd::Check { config, content } => cmd_check(config, content),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn load_config(
    config: Option<PathBuf>,
    content: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<SimConfig, Box<dyn Error>> {
    let game = match config {
        Some(path) => {
            eprintln!("Loading config from {}...", path.display());
            GameConfig::from_json_file(&path)?
        }
        None => GameConfig::default(),
    };
    let content = match content {
        Some(path) => {
            eprintln!("Loading content from {}...", path.display());
            ContentTables::from_json_file(&path)?
        }
        None => ContentTables::default(),
    };
    let sim = SimConfig {
        game,
        content,
        seed,
    };
    sim.validate()?;
    Ok(sim)
}

// --- Check command ---

fn cmd_check(config: Option<PathBuf>, content: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let sim = load_config(config, content, None)?;
    eprintln!(
        "OK: {} puzzles, {} hacks, {} notes; window {} x {}m, lookahead {}m",
        sim.content.puzzles.len(),
        sim.content.hacks.len(),
        sim.content.lore_notes.len(),
        sim.game.max_segments,
        sim.game.segment_length,
        sim.game.lookahead,
    );
    Ok(())
}

// --- Run command ---

fn cmd_run(
    ticks: u64,
    seed: Option<u64>,
    config: Option<PathBuf>,
    content: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let sim = load_config(config, content, seed)?;
    let mut engine = SimulationEngine::new(sim);
    let mut summary = RunSummary {
        seed,
        ..Default::default()
    };

    eprintln!("Simulating up to {ticks} ticks...");
    let mut last = GameStateSnapshot::default();
    for tick in 0..ticks {
        let input = autopilot(&last, tick);
        let snap = engine.tick(input);
        record(&mut summary, &snap);

        match snap.phase {
            GamePhase::Hiding => engine.queue_command(PlayerCommand::ExitHiding),
            GamePhase::Puzzle | GamePhase::Hacking | GamePhase::Reading => {
                engine.queue_command(PlayerCommand::CloseModal)
            }
            _ => {}
        }
        let terminal = snap.phase.is_terminal();
        last = snap;
        if terminal {
            log::info!("run ended at tick {tick}");
            break;
        }
    }

    summary.ticks = last.time.tick;
    summary.elapsed_secs = last.time.elapsed_secs;
    summary.phase = last.phase;
    summary.floor = last.floor;
    summary.health = last.meters.health;
    summary.sanity = last.meters.sanity;
    summary.stamina = last.meters.stamina;
    summary.battery = last.meters.battery;
    summary.inventory = last.inventory.clone();
    summary.frontier_z = last.frontier_z;
    summary.achievements = last
        .achievements
        .iter()
        .filter(|a| a.unlocked)
        .map(|a| a.title.clone())
        .collect();

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Walk down the corridor, run while stamina allows, tap interact now and
/// then and sweep the view slowly from side to side.
fn autopilot(last: &GameStateSnapshot, tick: u64) -> InputIntent {
    let sweep = ((tick as f32) * 0.02).sin() * 0.01;
    InputIntent {
        move_forward: 1.0,
        running: last.meters.stamina > 30.0,
        interact: tick % 30 == 0 && last.hover_text.is_some(),
        yaw_delta: sweep,
        ..Default::default()
    }
}

fn record(summary: &mut RunSummary, snap: &GameStateSnapshot) {
    summary.max_segments_seen = summary.max_segments_seen.max(snap.segment_count);
    for event in &snap.events {
        let name = match event {
            GameEvent::Toast { .. } => "toast",
            GameEvent::Monologue { .. } => "monologue",
            GameEvent::AchievementUnlocked { .. } => "achievement",
            GameEvent::ModalOpened { .. } => "modal_opened",
            GameEvent::ModalClosed { .. } => "modal_closed",
            GameEvent::Sound { .. } => "sound",
            GameEvent::FlashlightDepleted => "flashlight_depleted",
            GameEvent::Death { cause } => {
                summary.death = Some(*cause);
                "death"
            }
            GameEvent::FloorReached { .. } => "floor_reached",
            GameEvent::Escaped { .. } => "escaped",
        };
        *summary.events.entry(name).or_default() += 1;
    }
}

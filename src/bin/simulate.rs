//! Headless round played by a simple bot.
//!
//! ```bash
//! RUST_LOG=debug cargo run --bin simulate -- --seed 7 --rapid
//! cargo run --bin simulate -- --config round.json
//! ```

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use whack_a_mole::{
    CellContent, DespawnProfile, EngineConfig, GameDriver, GameEngine, GameState,
    Screen, VirtualClock,
};

#[derive(Parser, Debug)]
#[command(about = "Play one whack-a-mole round with a bot on a virtual clock")]
struct Args {
    /// JSON file with an `EngineConfig`. Missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the RNG seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Use the fast despawn profile (200 ms, 40%).
    #[arg(long)]
    rapid: bool,
    /// How often the bot looks at the grid, in milliseconds.
    #[arg(long, default_value_t = 250)]
    reaction_ms: u64,
    /// Let the bot hit penalty moles too.
    #[arg(long)]
    careless: bool,
}

fn load_config(args: &Args) -> anyhow::Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.rapid {
        config.despawn = DespawnProfile::rapid();
    }
    Ok(config)
}

/// Pick a hole to hit: golden first, then plain, then (if careless) penalty.
fn choose_target(state: &GameState, careless: bool) -> Option<usize> {
    let find = |kind: CellContent| state.cells.iter().position(|&c| c == kind);

    find(CellContent::Golden)
        .or_else(|| find(CellContent::Plain))
        .or_else(|| if careless { find(CellContent::Penalty) } else { None })
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    info!("config: {:?}", config);

    let frames = Rc::new(Cell::new(0u64));
    let counter = Rc::clone(&frames);
    let engine = GameEngine::new(config)?
        .with_renderer(move |_: &GameState| counter.set(counter.get() + 1));

    let mut driver = GameDriver::new(engine, VirtualClock::new());
    driver.request_start();

    let step = Duration::from_millis(args.reaction_ms.max(1));
    let mut hits = 0u32;
    while driver.engine().state().game_started {
        driver.advance(step);
        if let Some(index) = choose_target(driver.engine().state(), args.careless) {
            if driver.request_whack(index).is_some() {
                hits += 1;
            }
        }
    }

    if let Screen::GameOver { final_score } = driver.engine().state().screen() {
        println!("final score: {} ({} hits, {} frames)", final_score, hits, frames.get());
        let mut share = |message: &str| println!("share: {}", message);
        driver.request_share(&mut share);
    }

    Ok(())
}

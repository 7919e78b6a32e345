//! raven-duel — two bots fight in a one-dimensional arena.
//!
//! Each bot picks its weapon with fuzzy logic, arbitrates between closing
//! in, attacking and retreating, and runs a small FSM (Hunting, Dead) with a
//! global Combatant state that counts kills.  Shots travel as delayed
//! `TakeDamage` telegrams whose delay is the projectile flight time.
//!
//! ```text
//! cargo run -p raven-duel -- [config.json]
//! RUST_LOG=debug cargo run -p raven-duel
//! ```

mod bot;

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ga_agent::AgentRegistry;
use ga_core::{AgentId, SimTime, Tick, ToolkitConfig, Vector2D};
use ga_message::DispatchStats;
use ga_sim::{TickReport, WorldBuilder, WorldObserver};

use bot::{Bot, MAX_HEALTH};

// ── Constants ─────────────────────────────────────────────────────────────────

const DUEL_SECS: f64 = 60.0;
const START_GAP: f64 = 800.0;

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct DuelObserver {
    ticks:       u64,
    telegrams:   usize,
    final_stats: Option<DispatchStats>,
}

impl WorldObserver<Bot> for DuelObserver {
    fn on_tick_end(&mut self, report: &TickReport, _agents: &AgentRegistry<Bot>) {
        self.ticks += 1;
        self.telegrams += report.messages.delivered;
    }

    fn on_run_end(&mut self, final_tick: Tick, stats: &DispatchStats) {
        info!(%final_tick, delivered = stats.delivered, dropped = stats.dropped(), "duel over");
        self.final_stats = Some(*stats);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    // 1. Configuration: JSON file from the command line, else defaults.
    let config = match std::env::args().nth(1) {
        Some(path) => ToolkitConfig::load_json(&path).with_context(|| format!("loading {path}"))?,
        None => ToolkitConfig::default(),
    };
    config.validate()?;

    println!("=== raven-duel ===");
    println!(
        "Duel: {DUEL_SECS}s at {:.0} Hz  |  seed {}  |  goals {}/s  weapons {}/s",
        1.0 / config.world.tick_secs,
        config.world.seed,
        config.arbitration.goal_updates_per_sec,
        config.arbitration.weapon_updates_per_sec,
    );
    println!();

    // 2. Two bots facing each other.
    let (red, blue) = (AgentId(0), AgentId(1));
    let mut world = WorldBuilder::new()
        .config(config.clone())
        .agent(Bot::new(red, "Red", Vector2D::new(0.0, 0.0), blue, &config)?)
        .agent(Bot::new(blue, "Blue", Vector2D::new(START_GAP, 0.0), red, &config)?)
        .build()?;

    // 3. Run.
    let mut observer = DuelObserver::default();
    let wall = Instant::now();
    world.run_until(SimTime(DUEL_SECS), &mut observer);
    let elapsed = wall.elapsed();

    // 4. Summary.
    println!(
        "{:<6} {:>6} {:>6} {:>6} {:>8}  {:<15} {}",
        "bot", "kills", "deaths", "shots", "health", "weapon", "state"
    );
    for bot in world.agents().iter() {
        println!(
            "{:<6} {:>6} {:>6} {:>6} {:>4}/{:<3}  {:<15} {}",
            bot.name,
            bot.kills,
            bot.deaths,
            bot.shots,
            bot.health,
            MAX_HEALTH,
            bot.weapon_name(),
            bot.state_name(),
        );
    }
    println!();

    let stats = observer.final_stats.unwrap_or_default();
    println!(
        "Ticks: {}  |  telegrams delivered: {}  |  unhandled: {}  |  merged duplicates: {}  |  still in flight: {}",
        observer.ticks,
        observer.telegrams,
        stats.unhandled,
        stats.deduplicated,
        world.pending_messages(),
    );
    println!("Wall time: {:.1} ms", elapsed.as_secs_f64() * 1e3);
    Ok(())
}

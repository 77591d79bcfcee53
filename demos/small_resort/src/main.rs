//! small_resort: a self-contained run of the piste resort simulation.
//!
//! Simulates a few hundred visitors on a hand-built two-lift resort and
//! writes CSV output to `output/small_resort`.
//!
//! ```text
//! cargo run -p small_resort                 # defaults
//! cargo run -p small_resort -- resort.toml  # ResortConfig overrides
//! RUST_LOG=debug cargo run -p small_resort  # per-decision logging
//! ```

mod network;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use piste_agent::{AgentContext, AgentStoreBuilder, Goal, GoalStep};
use piste_core::{AgentId, AgentRng, SimConfig};
use piste_decision::{GoalPlanner, Preference, PreferenceTable};
use piste_motion::Phase;
use piste_network::SkiNetwork;
use piste_output::{CsvWriter, SimOutputObserver};
use piste_sim::{ResortConfig, SimBuilder};

use network::{build_network, A_BASE};

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT: usize = 300;
const OUTPUT_DIR:  &str  = "output/small_resort";
/// Every N-th visitor asks for a lodge break halfway through the run.
const REST_EVERY:  usize = 7;

// ── Planner ───────────────────────────────────────────────────────────────────

/// Picks a random lift whose top serves a trail the visitor is comfortable
/// on, then that trail.
struct LapPlanner {
    prefs: PreferenceTable,
}

impl GoalPlanner for LapPlanner {
    fn plan(&self, ctx: &AgentContext, network: &SkiNetwork, rng: &mut AgentRng) -> Option<Goal> {
        let options: Vec<_> = network
            .lifts()
            .flat_map(|lift| {
                network
                    .trails_from_lift(lift.id)
                    .filter_map(|t| network.trail(t))
                    .filter(|t| matches!(self.prefs.get(ctx.skill, t.class), Preference::Allowed(_)))
                    .map(move |t| (lift.id, t.id))
            })
            .collect();
        let &(lift, trail) = rng.choose(&options)?;
        Some(Goal::new(vec![GoalStep::RideLift(lift), GoalStep::SkiTrail(trail)], Some(trail)))
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&str>) -> Result<ResortConfig> {
    let Some(path) = path else {
        return Ok(ResortConfig::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let config: ResortConfig = toml::from_str(&text).with_context(|| format!("parsing {path}"))?;
    log::info!("loaded config from {path}");
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args().nth(1);
    let resort = load_config(config_path.as_deref())?;
    resort.validate()?;
    let sim_config: SimConfig = resort.sim.clone();

    println!("=== small_resort: piste resort simulation ===");
    println!(
        "Agents: {AGENT_COUNT}  |  Ticks: {} × {} s  |  Seed: {}",
        sim_config.total_ticks, sim_config.tick_duration_secs, sim_config.seed
    );

    let (network, _lodge) = build_network()?;
    println!(
        "Resort: {} lifts, {} trails, {} lodges",
        network.lift_count(),
        network.trail_count(),
        network.lodge_count()
    );

    let (agents, rngs) = AgentStoreBuilder::new(AGENT_COUNT, sim_config.seed)
        .personality_spread(resort.decision.personality_spread)
        .build()?;
    let planner = LapPlanner { prefs: resort.preferences.clone() };

    let mut sim = SimBuilder::new(sim_config.clone(), network, agents, rngs, planner)
        .resort(resort)
        .initial_positions(vec![A_BASE; AGENT_COUNT])
        .build()?;

    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = SimOutputObserver::new(writer, &sim_config);

    let t0 = Instant::now();
    let half = sim_config.total_ticks / 2;
    sim.run_ticks(half, &mut obs)?;
    for i in (0..AGENT_COUNT).step_by(REST_EVERY) {
        sim.set_wants_rest(AgentId(i as u32), true)?;
    }
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    println!("Simulation complete in {:.3} s ({})", elapsed.as_secs_f64(), sim.clock);
    println!("Output written to {OUTPUT_DIR}/");
    println!();

    // Final phase breakdown.
    let mut counts: Vec<(&'static str, usize)> = Vec::new();
    for state in &sim.motion.states {
        match counts.iter_mut().find(|(name, _)| *name == state.phase.as_str()) {
            Some((_, n)) => *n += 1,
            None => counts.push((state.phase.as_str(), 1)),
        }
    }
    println!("{:<18} {:>6}", "Phase", "Agents");
    println!("{}", "-".repeat(25));
    for (name, n) in counts {
        println!("{name:<18} {n:>6}");
    }
    let resting = sim.motion.states.iter().filter(|s| matches!(s.phase, Phase::InLodge { .. })).count();
    log::info!("{resting} visitors in the lodge at close");

    Ok(())
}

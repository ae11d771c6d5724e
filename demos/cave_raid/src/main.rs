//! cave_raid — two heroes fight their way through a valley of goblin caves.
//!
//! Usage: `cave_raid [config.json]`
//!
//! The optional JSON file overrides any of `sim`, `behavior` and `scene`;
//! missing fields keep their defaults.  Set `RUST_LOG=debug` to watch every
//! chase transition and spawn decision.

use std::f32::consts::PI;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use adv_agent::{AgentKind, AgentSpec, AgentStore, AgentStoreBuilder};
use adv_behavior::BehaviorConfig;
use adv_core::{AgentHandle, Point2, SimConfig, Tick};
use adv_sim::{SceneConfig, Sim, SimBuilder, SimObserver, TickReport};
use adv_spatial::{Wall, WallIndex};

// ── Constants ─────────────────────────────────────────────────────────────────

const HERO_REACH:       f32 = 100.0;
const HERO_DAMAGE:      f32 = 25.0;
const HERO_SWING_SECS:  f64 = 0.5;
const LOG_EVERY_TICKS:  u64 = 600; // every 10 s at 60 Hz

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DemoConfig {
    sim:      SimConfig,
    behavior: BehaviorConfig,
    scene:    SceneConfig,
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing config {}", path.display()))
}

// ── Level ─────────────────────────────────────────────────────────────────────

fn build_level() -> AgentStore {
    // (x, y, heading): cave mouths face the heroes' approach.
    let caves = [(900.0, 600.0, PI), (1400.0, -300.0, 0.75 * PI), (2200.0, 200.0, PI)];
    AgentStoreBuilder::new()
        .agent(AgentSpec::new(AgentKind::Warrior, Point2::new(0.0, 0.0)))
        .agent(AgentSpec::new(AgentKind::Archer, Point2::new(-60.0, 40.0)))
        .agents(
            caves
                .iter()
                .map(|&(x, y, h)| AgentSpec::new(AgentKind::Cave, Point2::new(x, y)).heading(h)),
        )
        .agent(AgentSpec::new(AgentKind::Boss, Point2::new(2800.0, 0.0)))
        .build()
        .0
}

fn build_walls() -> Result<WallIndex> {
    let walls = [
        Wall::new(Point2::new(600.0, 200.0), Point2::new(600.0, 1000.0)),
        Wall::new(Point2::new(1200.0, -800.0), Point2::new(1200.0, -100.0)),
        Wall::new(Point2::new(1800.0, 400.0), Point2::new(2400.0, 400.0)),
    ];
    Ok(WallIndex::new(walls)?)
}

// ── Scripted heroes ───────────────────────────────────────────────────────────

/// Heroes are player-driven in the game; here they march east and swing at
/// the nearest enemy in reach.
struct HeroScript {
    heroes:     Vec<AgentHandle>,
    next_swing: f64,
    waypoint:   Point2,
}

impl HeroScript {
    fn new(agents: &AgentStore) -> Self {
        let heroes = agents.iter().filter(|a| a.kind.is_hero_like()).map(|a| a.handle).collect();
        Self { heroes, next_swing: 0.0, waypoint: Point2::new(3000.0, 0.0) }
    }

    fn advance(&mut self, sim: &mut Sim, dt: f32) -> Result<()> {
        self.heroes.retain(|&h| sim.agents.contains(h));
        let swing = sim.clock.elapsed_secs >= self.next_swing;
        if swing {
            self.next_swing = sim.clock.elapsed_secs + HERO_SWING_SECS;
        }

        for &hero in &self.heroes {
            let i = hero.index();
            if sim.agents.is_dying[i] {
                continue;
            }
            let pos = sim.agents.position[i];
            let step = sim.agents.movement_speed[i] * dt;
            sim.agents.heading[i] = pos.heading_to(self.waypoint);
            sim.agents.position[i] = pos.step_toward(self.waypoint, step);

            if !swing {
                continue;
            }
            let nearest = sim
                .agents
                .iter()
                .filter(|a| !a.kind.is_hero_like() && !a.is_dying)
                .map(|a| (a.position.distance(pos), a.handle))
                .filter(|(d, _)| *d <= HERO_REACH)
                .min_by(|a, b| a.0.total_cmp(&b.0));
            if let Some((_, enemy)) = nearest {
                sim.damage(enemy, HERO_DAMAGE)?;
            }
        }
        Ok(())
    }

    fn all_down(&self) -> bool {
        self.heroes.is_empty()
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct RaidLog {
    spawned:   usize,
    refused:   usize,
    hits:      usize,
    killed:    usize,
    despawned: usize,
}

impl SimObserver for RaidLog {
    fn on_tick_end(&mut self, tick: Tick, report: &TickReport, agents: &AgentStore) {
        self.spawned += report.spawned.len();
        self.refused += report.refused_spawns;
        self.hits += report.hits;
        self.killed += report.killed.len();
        self.despawned += report.despawned.len();

        if tick.0 % LOG_EVERY_TICKS == 0 {
            let goblins = agents.iter().filter(|a| a.kind == AgentKind::Goblin).count();
            info!(%tick, agents = agents.len(), goblins, hits = self.hits, "raid progress");
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick, agents: &AgentStore) {
        info!(
            %final_tick,
            survivors = agents.len(),
            spawned = self.spawned,
            refused = self.refused,
            hits = self.hits,
            killed = self.killed,
            despawned = self.despawned,
            "raid over"
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args().nth(1);
    let config = load_config(path.as_deref().map(Path::new))?;
    info!(seed = config.sim.seed, ticks = config.sim.total_ticks, "starting cave raid");

    let store = build_level();
    let mut script = HeroScript::new(&store);
    let mut sim = SimBuilder::new(config.sim, store)
        .behavior_config(config.behavior)
        .scene_config(config.scene)
        .sight(build_walls()?)
        .build()?;

    let t0 = Instant::now();
    let mut log = RaidLog::default();
    let dt = sim.config.tick_delta_secs;
    while sim.clock.current_tick < sim.config.end_tick() && !script.all_down() {
        script.advance(&mut sim, dt)?;
        sim.step(dt, &mut log)?;
    }
    log.on_sim_end(sim.clock.current_tick, &sim.agents);

    info!(
        elapsed_ms = t0.elapsed().as_millis() as u64,
        simulated_secs = sim.clock.elapsed_secs,
        heroes_standing = !script.all_down(),
        "done"
    );
    Ok(())
}

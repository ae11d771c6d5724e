//! Integration tests for adv-sim.

use adv_agent::{AgentKind, AgentSpec, AgentStore, AgentStoreBuilder};
use adv_behavior::{BehaviorConfig, BehaviorModel, Intent, TickIntents};
use adv_core::{AgentHandle, Point2, SimConfig, SimRng, Tick};
use adv_spatial::{OpenField, Wall, WallIndex};

use crate::{NoopObserver, Scene, SceneConfig, Scheduler, Sim, SimBuilder, SimObserver, TickReport};

// ── Helpers ───────────────────────────────────────────────────────────────────

const DT: f32 = 1.0 / 60.0;

fn p(x: f32, y: f32) -> Point2 {
    Point2::new(x, y)
}

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig { seed: 42, tick_delta_secs: DT, total_ticks }
}

fn level(specs: Vec<AgentSpec>) -> (AgentStore, Vec<AgentHandle>) {
    AgentStoreBuilder::new().agents(specs).build()
}

fn open_sim(specs: Vec<AgentSpec>) -> (Sim, Vec<AgentHandle>) {
    let (store, handles) = level(specs);
    let sim = SimBuilder::new(test_config(1_000), store).sight(OpenField).build().unwrap();
    (sim, handles)
}

fn goblin(x: f32, y: f32) -> AgentSpec {
    AgentSpec::new(AgentKind::Goblin, p(x, y))
}

fn hero(x: f32, y: f32) -> AgentSpec {
    AgentSpec::new(AgentKind::Warrior, p(x, y))
}

fn cave(x: f32, y: f32) -> AgentSpec {
    AgentSpec::new(AgentKind::Cave, p(x, y))
}

fn goblins_of(store: &AgentStore, cave: AgentHandle) -> usize {
    store.owned_by(cave).count()
}

/// Records every tick's intents and reports.
#[derive(Default)]
struct Recorder {
    started:  u64,
    intents:  Vec<TickIntents>,
    reports:  Vec<TickReport>,
    finished: Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.started += 1;
    }

    fn on_intents(&mut self, _tick: Tick, intents: &TickIntents) {
        self.intents.push(intents.clone());
    }

    fn on_tick_end(&mut self, _tick: Tick, report: &TickReport, _agents: &AgentStore) {
        self.reports.push(report.clone());
    }

    fn on_sim_end(&mut self, final_tick: Tick, _agents: &AgentStore) {
        self.finished = Some(final_tick);
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scheduler_tests {
    use super::*;

    #[test]
    fn heroes_get_no_controller() {
        let (store, h) = level(vec![hero(0.0, 0.0), goblin(10.0, 0.0), cave(500.0, 0.0)]);
        let mut scheduler = Scheduler::new(BehaviorConfig::default());
        assert_eq!(scheduler.adopt_all(&store), 2);
        assert!(!scheduler.contains(h[0]));
        assert!(!scheduler.adopt(&store, h[1]), "already adopted");
        assert!(scheduler.behavior(h[2]).unwrap().as_spawn().is_some());
    }

    #[test]
    fn intents_follow_creation_order() {
        let (store, h) = level(vec![hero(0.0, 0.0), goblin(100.0, 0.0), goblin(-100.0, 0.0)]);
        let mut scheduler = Scheduler::new(BehaviorConfig::default());
        scheduler.adopt(&store, h[2]);
        scheduler.adopt(&store, h[1]);
        let out = scheduler.tick(&store, Some(&OpenField), Tick(0), DT);
        let order: Vec<AgentHandle> = out.iter().map(|(a, _)| *a).collect();
        assert_eq!(order, vec![h[2], h[1]]);
        assert_eq!(out.for_agent(h[1]), vec![Intent::MoveToward(p(0.0, 0.0))]);
    }

    #[test]
    fn tick_never_mutates_agents() {
        let (store, _) = level(vec![hero(0.0, 0.0), goblin(100.0, 0.0), cave(900.0, 0.0)]);
        let before = store.position.clone();
        let mut scheduler = Scheduler::new(BehaviorConfig::default());
        scheduler.adopt_all(&store);
        for t in 0..5 {
            scheduler.tick(&store, Some(&OpenField), Tick(t), DT);
        }
        assert_eq!(store.position, before);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn despawned_controllers_are_dropped() {
        let (mut store, h) = level(vec![goblin(0.0, 0.0), goblin(10.0, 0.0)]);
        let mut scheduler = Scheduler::new(BehaviorConfig::default());
        scheduler.adopt_all(&store);
        store.remove(h[0]);
        let out = scheduler.tick(&store, Some(&OpenField), Tick(0), DT);
        assert_eq!(scheduler.len(), 1);
        assert!(out.for_agent(h[0]).is_empty());
    }

    #[test]
    fn reused_slot_does_not_inherit_controller() {
        let (mut store, h) = level(vec![goblin(0.0, 0.0)]);
        let mut scheduler = Scheduler::new(BehaviorConfig::default());
        scheduler.adopt_all(&store);
        store.remove(h[0]);
        let newcomer = store.insert(hero(0.0, 0.0));
        assert_eq!(newcomer.id, h[0].id);
        let out = scheduler.tick(&store, Some(&OpenField), Tick(0), DT);
        assert!(scheduler.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn stale_targets_cleared_before_update() {
        let (mut store, h) = level(vec![goblin(0.0, 0.0), hero(300.0, 0.0)]);
        let mut scheduler = Scheduler::new(BehaviorConfig::default());
        scheduler.adopt_all(&store);
        scheduler.tick(&store, Some(&OpenField), Tick(0), DT);
        assert_eq!(scheduler.behavior(h[0]).unwrap().target(), Some(h[1]));

        store.remove(h[1]);
        let out = scheduler.tick(&store, Some(&OpenField), Tick(1), DT);
        assert_eq!(scheduler.behavior(h[0]).unwrap().target(), None);
        assert_eq!(out.for_agent(h[0]), vec![Intent::Idle]);
    }

    #[test]
    fn register_replaces_in_place() {
        let (store, h) = level(vec![goblin(0.0, 0.0), goblin(5.0, 0.0)]);
        let mut scheduler = Scheduler::new(BehaviorConfig::default());
        scheduler.adopt_all(&store);
        let slow = adv_behavior::ChaseBehavior::new(10.0, 1.0);
        scheduler.register(h[0], slow.clone().into());
        assert_eq!(scheduler.len(), 2);
        assert_eq!(scheduler.iter().next().unwrap().0, h[0]);
        assert_eq!(scheduler.behavior(h[0]).unwrap().as_chase(), Some(&slow));
        assert!(scheduler.unregister(h[0]).is_some());
        assert!(scheduler.unregister(h[0]).is_none());
    }
}

// ── Scene ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scene_tests {
    use super::*;

    fn scene_for(store: &AgentStore) -> Scene {
        Scene::new(SceneConfig::default(), store)
    }

    fn one(tick: u64, agent: AgentHandle, intents: &[Intent]) -> TickIntents {
        let mut out = TickIntents::new(Tick(tick));
        for &intent in intents {
            out.push(agent, intent);
        }
        out
    }

    #[test]
    fn move_steps_by_speed_and_snaps() {
        let (mut store, h) = level(vec![goblin(0.0, 0.0)]);
        let mut scene = scene_for(&store);
        let mut rng = SimRng::new(1);

        let report = scene
            .apply(&mut store, &one(0, h[0], &[Intent::MoveToward(p(0.0, 100.0))]), 0.1, 0.1, &mut rng)
            .unwrap();
        assert_eq!(report.moved, 1);
        let pos = store.position[h[0].index()];
        assert!((pos.y - 20.0).abs() < 1e-4 && pos.x.abs() < 1e-4);
        assert!((store.heading[h[0].index()] - std::f32::consts::FRAC_PI_2).abs() < 1e-5);

        scene
            .apply(&mut store, &one(1, h[0], &[Intent::MoveToward(p(0.0, 25.0))]), 0.1, 0.2, &mut rng)
            .unwrap();
        assert_eq!(store.position[h[0].index()], p(0.0, 25.0));
    }

    #[test]
    fn attack_damages_hero_at_aim_point() {
        let (mut store, h) = level(vec![goblin(0.0, 0.0), hero(50.0, 0.0)]);
        let mut scene = scene_for(&store);
        let mut rng = SimRng::new(1);
        let intents = one(0, h[0], &[Intent::FaceToward(p(50.0, 0.0)), Intent::Attack]);
        let report = scene.apply(&mut store, &intents, DT, 0.0, &mut rng).unwrap();
        assert_eq!(report.hits, 1);
        assert_eq!(store.health[h[1].index()], 95.0);
        assert_eq!(scene.aim_point(h[0]), Some(p(50.0, 0.0)));
    }

    #[test]
    fn attack_without_aim_or_victim_misses() {
        let (mut store, h) = level(vec![goblin(0.0, 0.0), hero(200.0, 0.0)]);
        let mut scene = scene_for(&store);
        let mut rng = SimRng::new(1);
        let report = scene.apply(&mut store, &one(0, h[0], &[Intent::Attack]), DT, 0.0, &mut rng).unwrap();
        assert_eq!(report.hits, 0);

        let intents = one(1, h[0], &[Intent::FaceToward(p(50.0, 0.0)), Intent::Attack]);
        let report = scene.apply(&mut store, &intents, DT, 0.0, &mut rng).unwrap();
        assert_eq!(report.hits, 0);
        assert_eq!(store.health[h[1].index()], 100.0);
    }

    #[test]
    fn lethal_damage_marks_dying() {
        let (mut store, h) = level(vec![goblin(0.0, 0.0), hero(50.0, 0.0).health(3.0)]);
        let mut scene = scene_for(&store);
        let mut rng = SimRng::new(1);
        let intents = one(0, h[0], &[Intent::FaceToward(p(50.0, 0.0)), Intent::Attack]);
        let report = scene.apply(&mut store, &intents, DT, 0.0, &mut rng).unwrap();
        assert_eq!(report.killed, vec![h[1]]);
        assert_eq!(store.health[h[1].index()], 0.0);
        assert!(store.is_dying[h[1].index()]);
        assert!(!scene.apply_damage(&mut store, h[1], 10.0, 0.0).unwrap(), "already dying");
    }

    #[test]
    fn goblin_appears_at_cave_mouth() {
        let (mut store, h) = level(vec![cave(100.0, 0.0)]);
        let mut scene = scene_for(&store);
        let mut rng = SimRng::new(7);
        let report = scene.apply(&mut store, &one(0, h[0], &[Intent::GenerateSpawn]), DT, 0.0, &mut rng).unwrap();
        let goblin = report.spawned[0];
        let view = store.get(goblin).unwrap();
        assert_eq!(view.kind, AgentKind::Goblin);
        assert_eq!(view.owner, Some(h[0]));
        assert!((view.position.x - 167.5).abs() < 1e-3 && view.position.y.abs() < 1e-3);
        let speed = store.movement_speed[goblin.index()];
        assert!((0.0..200.0).contains(&speed));
        assert_eq!(scene.shared_allocated(), 1);
    }

    #[test]
    fn cave_pool_limits_spawns() {
        let (mut store, h) = level(vec![cave(0.0, 0.0)]);
        let config = SceneConfig { goblin_capacity: 2, ..SceneConfig::default() };
        let mut scene = Scene::new(config, &store);
        let mut rng = SimRng::new(1);
        let intents = one(0, h[0], &[Intent::GenerateSpawn; 3]);
        let report = scene.apply(&mut store, &intents, DT, 0.0, &mut rng).unwrap();
        assert_eq!(report.spawned.len(), 2);
        assert_eq!(report.refused_spawns, 1);
    }

    #[test]
    fn shared_capacity_limits_all_caves() {
        let (mut store, h) = level(vec![cave(0.0, 0.0), cave(1000.0, 0.0)]);
        let config = SceneConfig { goblin_capacity: 2, shared_goblin_capacity: 3, ..SceneConfig::default() };
        let mut scene = Scene::new(config, &store);
        let mut rng = SimRng::new(1);
        let mut intents = one(0, h[0], &[Intent::GenerateSpawn; 2]);
        intents.push(h[1], Intent::GenerateSpawn);
        intents.push(h[1], Intent::GenerateSpawn);
        let report = scene.apply(&mut store, &intents, DT, 0.0, &mut rng).unwrap();
        assert_eq!(report.spawned.len(), 3);
        assert_eq!(report.refused_spawns, 1);
        assert_eq!(goblins_of(&store, h[1]), 1);
    }

    #[test]
    fn corpses_linger_then_return_to_pool() {
        let (mut store, h) = level(vec![cave(0.0, 0.0)]);
        let mut scene = scene_for(&store);
        let mut rng = SimRng::new(1);
        let goblin = scene.spawn_goblin(&mut store, h[0], &mut rng).unwrap().unwrap();
        assert!(scene.apply_damage(&mut store, goblin, 500.0, 10.0).unwrap());

        assert!(scene.reap(&mut store, 11.0).is_empty());
        assert_eq!(goblins_of(&store, h[0]), 1, "dying goblin still occupies the pool");
        assert_eq!(scene.reap(&mut store, 11.75), vec![goblin]);
        assert!(!store.contains(goblin));
        assert_eq!(scene.shared_allocated(), 0);
    }

    #[test]
    fn destroyed_cave_stays_as_wreckage() {
        let (mut store, h) = level(vec![cave(0.0, 0.0)]);
        let mut scene = scene_for(&store);
        assert!(scene.apply_damage(&mut store, h[0], 100.0, 0.0).unwrap());
        assert!(scene.reap(&mut store, 1_000.0).is_empty());
        assert!(store.contains(h[0]));
    }

    #[test]
    fn unknown_agents_are_errors() {
        let (mut store, h) = level(vec![goblin(0.0, 0.0)]);
        let mut scene = scene_for(&store);
        scene.despawn(&mut store, h[0]).unwrap();
        assert!(scene.despawn(&mut store, h[0]).is_err());
        assert!(scene.apply_damage(&mut store, h[0], 1.0, 0.0).is_err());
    }

    #[test]
    fn despawned_agent_intents_do_not_block_the_rest() {
        let (mut store, h) = level(vec![goblin(0.0, 0.0), goblin(500.0, 0.0)]);
        let mut scene = scene_for(&store);
        let mut rng = SimRng::new(1);
        scene.despawn(&mut store, h[0]).unwrap();

        let mut intents = TickIntents::new(Tick(0));
        intents.push(h[0], Intent::MoveToward(p(0.0, 100.0)));
        intents.push(h[1], Intent::MoveToward(p(500.0, 100.0)));
        let report = scene.apply(&mut store, &intents, 0.1, 0.1, &mut rng).unwrap();

        assert_eq!(report.moved, 1);
        assert!(!store.contains(h[0]));
        let pos = store.position[h[1].index()];
        assert!((pos.y - 20.0).abs() < 1e-4 && (pos.x - 500.0).abs() < 1e-4);
    }

    #[test]
    fn config_validation() {
        assert!(SceneConfig::default().validate().is_ok());
        let bad = SceneConfig { attack_damage: -1.0, ..SceneConfig::default() };
        assert!(bad.validate().is_err());
        let bad = SceneConfig { goblin_capacity: 40, ..SceneConfig::default() };
        assert!(bad.validate().is_err());
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_and_adopts_non_heroes() {
        let (sim, _) = open_sim(vec![hero(0.0, 0.0), goblin(10.0, 0.0), cave(900.0, 0.0)]);
        assert_eq!(sim.scheduler.len(), 2);
        assert_eq!(sim.clock.current_tick, Tick(0));
    }

    #[test]
    fn rejects_bad_tick_delta() {
        let config = SimConfig { tick_delta_secs: 0.0, ..test_config(10) };
        assert!(SimBuilder::new(config, AgentStore::new()).build().is_err());
    }

    #[test]
    fn rejects_bad_behavior_config() {
        let mut behavior = BehaviorConfig::default();
        behavior.spawn.active_spawn_limit = 0;
        let result = SimBuilder::new(test_config(10), AgentStore::new()).behavior_config(behavior).build();
        assert!(matches!(result, Err(crate::SimError::Behavior(_))));
    }

    #[test]
    fn rejects_bad_scene_config() {
        let scene = SceneConfig { shared_goblin_capacity: 1, ..SceneConfig::default() };
        let result = SimBuilder::new(test_config(10), AgentStore::new()).scene_config(scene).build();
        assert!(matches!(result, Err(crate::SimError::Config(_))));
    }
}

// ── Runs ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_reaches_end_tick_and_calls_observer() {
        let (store, _) = level(vec![hero(0.0, 0.0), goblin(300.0, 0.0)]);
        let mut sim = SimBuilder::new(test_config(10), store).sight(OpenField).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.started, 10);
        assert_eq!(rec.intents.len(), 10);
        assert_eq!(rec.finished, Some(Tick(10)));
        assert!((sim.clock.elapsed_secs - 10.0 / 60.0).abs() < 1e-4);
    }

    #[test]
    fn stalled_frames_are_clamped() {
        let (mut sim, _) = open_sim(vec![]);
        sim.step(5.0, &mut NoopObserver).unwrap();
        assert!((sim.clock.elapsed_secs - 1.0 / 60.0).abs() < 1e-6);
        sim.step(-1.0, &mut NoopObserver).unwrap();
        assert!((sim.clock.elapsed_secs - 1.0 / 60.0).abs() < 1e-6);
        sim.step(0.5, &mut NoopObserver).unwrap();
        assert!((sim.clock.elapsed_secs - (0.5 + 1.0 / 60.0)).abs() < 1e-6);
        assert_eq!(sim.clock.current_tick, Tick(3));
    }

    #[test]
    fn goblin_hunts_down_hero() {
        let (mut sim, h) = open_sim(vec![goblin(0.0, 0.0), hero(500.0, 0.0)]);
        let mut rec = Recorder::default();
        sim.run_ticks(300, &mut rec).unwrap();

        assert!(!sim.agents.contains(h[1]), "hero killed and removed");
        let killed: Vec<AgentHandle> = rec.reports.iter().flat_map(|r| r.killed.clone()).collect();
        assert_eq!(killed, vec![h[1]]);
        let hits: usize = rec.reports.iter().map(|r| r.hits).sum();
        assert_eq!(hits, 20);

        let gob = sim.agents.get(h[0]).unwrap();
        assert!(gob.position.distance(p(500.0, 0.0)) <= 80.0);
        let last = rec.intents.last().unwrap();
        assert_eq!(last.for_agent(h[0]), vec![Intent::Idle]);
        assert_eq!(sim.scheduler.behavior(h[0]).unwrap().target(), None);
    }

    #[test]
    fn walls_hide_heroes() {
        let (store, h) = level(vec![goblin(0.0, 0.0), hero(300.0, 0.0)]);
        let walls = WallIndex::new(vec![Wall::new(p(150.0, -100.0), p(150.0, 100.0))]).unwrap();
        let mut sim = SimBuilder::new(test_config(10), store).sight(walls).build().unwrap();
        let report = sim.step(DT, &mut NoopObserver).unwrap();
        assert_eq!(report.moved, 0);
        assert_eq!(sim.agents.position[h[0].index()], p(0.0, 0.0));
    }

    #[test]
    fn without_sight_chasers_idle_but_caves_spawn() {
        let (store, h) = level(vec![goblin(0.0, 0.0), hero(300.0, 0.0), cave(-900.0, 0.0)]);
        let mut sim = SimBuilder::new(test_config(10), store).build().unwrap();
        let report = sim.step(DT, &mut NoopObserver).unwrap();
        assert_eq!(report.moved, 0);
        assert_eq!(report.spawned.len(), 1);
        assert_eq!(goblins_of(&sim.agents, h[2]), 1);
    }

    #[test]
    fn cave_fills_its_pool_and_stops() {
        let (mut sim, h) = open_sim(vec![cave(0.0, 0.0)]);
        let mut rec = Recorder::default();
        sim.run_ticks(1_500, &mut rec).unwrap();
        assert_eq!(goblins_of(&sim.agents, h[0]), 5);
        let refused: usize = rec.reports.iter().map(|r| r.refused_spawns).sum();
        assert_eq!(refused, 0);
        assert_eq!(sim.scheduler.len(), 6);
        assert_eq!(rec.reports[0].spawned.len(), 1, "empty cave spawns on the first tick");
    }

    #[test]
    fn killed_goblin_frees_a_pool_slot() {
        let (mut sim, h) = open_sim(vec![cave(0.0, 0.0)]);
        sim.run_ticks(1_500, &mut NoopObserver).unwrap();
        let victim = sim.agents.owned_by(h[0]).next().unwrap().handle;
        assert!(sim.damage(victim, 1_000.0).unwrap());

        sim.run_ticks(60, &mut NoopObserver).unwrap();
        assert!(sim.agents.contains(victim), "corpse still lingering");
        assert_eq!(goblins_of(&sim.agents, h[0]), 5);

        sim.run_ticks(120, &mut NoopObserver).unwrap();
        assert!(!sim.agents.contains(victim));
        assert!(!sim.scheduler.contains(victim));
        assert_eq!(goblins_of(&sim.agents, h[0]), 5, "cave refilled its pool");
    }

    #[test]
    fn shared_capacity_caps_the_scene() {
        let (store, _) = level(vec![cave(0.0, 0.0), cave(2000.0, 0.0)]);
        let scene = SceneConfig { goblin_capacity: 2, shared_goblin_capacity: 3, ..SceneConfig::default() };
        let mut sim = SimBuilder::new(test_config(10), store).scene_config(scene).build().unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(1_000, &mut rec).unwrap();
        assert_eq!(sim.scene.shared_allocated(), 3);
        assert_eq!(sim.agents.len(), 5);
        assert!(rec.reports.iter().any(|r| r.refused_spawns > 0));
    }

    #[test]
    fn dying_goblin_stops_moving() {
        let (mut sim, h) = open_sim(vec![goblin(0.0, 0.0), hero(500.0, 0.0)]);
        sim.damage(h[0], 1_000.0).unwrap();
        let report = sim.step(DT, &mut NoopObserver).unwrap();
        assert_eq!(report.moved, 0);
        assert_eq!(sim.agents.position[h[0].index()], p(0.0, 0.0));
    }

    #[test]
    fn despawned_target_is_forgotten() {
        let (mut sim, h) = open_sim(vec![goblin(0.0, 0.0), hero(500.0, 0.0)]);
        sim.step(DT, &mut NoopObserver).unwrap();
        assert_eq!(sim.scheduler.behavior(h[0]).unwrap().target(), Some(h[1]));
        sim.despawn(h[1]).unwrap();
        let mut rec = Recorder::default();
        sim.step(DT, &mut rec).unwrap();
        assert_eq!(sim.scheduler.behavior(h[0]).unwrap().target(), None);
        assert_eq!(rec.intents[0].for_agent(h[0]), vec![Intent::Idle]);
    }

    #[test]
    fn same_seed_same_raid() {
        let run = || {
            let (mut sim, _) = open_sim(vec![cave(0.0, 0.0), hero(600.0, 0.0)]);
            sim.run_ticks(600, &mut NoopObserver).unwrap();
            (sim.agents.position.clone(), sim.agents.movement_speed.clone())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn spawn_between_ticks_gets_a_behavior() {
        let (mut sim, _) = open_sim(vec![hero(0.0, 0.0)]);
        let boss = sim.spawn(AgentSpec::new(AgentKind::Boss, p(400.0, 0.0)));
        let chase = sim.scheduler.behavior(boss).unwrap().as_chase().unwrap().clone();
        assert_eq!(chase.attack_radius, 160.0);
        let report = sim.step(DT, &mut NoopObserver).unwrap();
        assert_eq!(report.moved, 1);
    }
}

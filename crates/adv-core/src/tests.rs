//! Unit tests for adv-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentHandle, AgentId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn handles_differ_by_generation() {
        let a = AgentHandle::new(AgentId(3), 0);
        let b = AgentHandle::new(AgentId(3), 1);
        assert_ne!(a, b);
        assert_eq!(a.index(), b.index());
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(AgentHandle::new(AgentId(7), 2).to_string(), "#7v2");
    }
}

#[cfg(test)]
mod geo {
    use crate::Point2;

    #[test]
    fn distance_is_euclidean() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
        assert!((b.distance(a) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn step_toward_caps_at_max_step() {
        let p = Point2::ORIGIN.step_toward(Point2::new(10.0, 0.0), 4.0);
        assert!((p.x - 4.0).abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
    }

    #[test]
    fn step_toward_snaps_when_close() {
        let target = Point2::new(1.0, 1.0);
        assert_eq!(Point2::ORIGIN.step_toward(target, 10.0), target);
        assert_eq!(target.step_toward(target, 0.0), target);
    }

    #[test]
    fn heading_points_at_target() {
        let h = Point2::ORIGIN.heading_to(Point2::new(0.0, 5.0));
        assert!((h - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        let dir = Point2::from_angle(h);
        assert!(dir.x.abs() < 1e-6 && (dir.y - 1.0).abs() < 1e-6);
    }
}

#[cfg(test)]
mod time {
    use crate::{MIN_UPDATE_INTERVAL_SECS, SimClock, SimConfig, Tick};

    #[test]
    fn clock_accumulates_seconds() {
        let mut clock = SimClock::new();
        clock.advance(0.5);
        clock.advance(0.25);
        assert_eq!(clock.current_tick, Tick(2));
        assert!((clock.elapsed_secs - 0.75).abs() < 1e-9);
    }

    #[test]
    fn stalled_frames_use_minimum_interval() {
        assert_eq!(SimClock::effective_delta(5.0), MIN_UPDATE_INTERVAL_SECS);
        assert_eq!(SimClock::effective_delta(0.5), 0.5);
        assert_eq!(SimClock::effective_delta(-1.0), 0.0);
        assert_eq!(SimClock::effective_delta(f32::NAN), 0.0);
    }

    #[test]
    fn sim_config_end_tick() {
        let cfg = SimConfig { total_ticks: 600, ..SimConfig::default() };
        assert_eq!(cfg.end_tick(), Tick(600));
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            assert_eq!(r1.unit_random(), r2.unit_random());
        }
    }

    #[test]
    fn unit_random_in_bounds() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let v = rng.unit_random();
            assert!((0.0..1.0).contains(&v));
        }
    }
}

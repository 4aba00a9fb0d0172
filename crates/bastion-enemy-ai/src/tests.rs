#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bastion_core::catalog::{SpeedBoost, TowerAttack};
    use bastion_core::components::*;
    use bastion_core::constants::DT;
    use bastion_core::enums::{EnemyKind, EnemyPhase};
    use bastion_core::types::{secs_to_ticks, TowerHandle};
    use glam::DVec3;

    use crate::assault::{self, TargetCheck};
    use crate::damage::{self, DamageOutcome};
    use crate::movement::{self, StepOutcome};
    use crate::status;

    fn make_enemy(health: u32, resistance: f64) -> EnemyState {
        EnemyState {
            kind: EnemyKind::Basic,
            phase: EnemyPhase::Walking,
            health,
            max_health: health,
            base_speed: 3.0,
            contact_damage: 1,
            bounty: 20,
            score_value: 10,
            damage_resistance: resistance,
        }
    }

    fn straight_path() -> PathFollower {
        let path: Arc<[DVec3]> = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
        ]
        .into();
        PathFollower::new(path)
    }

    // --- movement ---

    #[test]
    fn test_step_moves_at_speed() {
        let mut follower = straight_path();
        follower.next_vertex = 1;
        match movement::step_along_path(DVec3::ZERO, &mut follower, 3.0, DT) {
            StepOutcome::Moving(p) => assert!((p.x - 0.1).abs() < 1e-9, "moved {p:?}"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(follower.next_vertex, 1);
    }

    #[test]
    fn test_step_never_overshoots_vertex() {
        let mut follower = straight_path();
        follower.next_vertex = 1;
        let outcome = movement::step_along_path(DVec3::new(0.95, 0.0, 0.0), &mut follower, 30.0, DT);
        assert_eq!(outcome, StepOutcome::Moving(DVec3::new(1.0, 0.0, 0.0)));
        assert_eq!(follower.next_vertex, 2, "arrival advances to the next vertex");
    }

    #[test]
    fn test_walks_whole_path_to_exit() {
        let mut follower = straight_path();
        let mut pos = DVec3::ZERO;
        let mut ticks = 0;
        loop {
            ticks += 1;
            match movement::step_along_path(pos, &mut follower, 3.0, DT) {
                StepOutcome::Moving(p) => pos = p,
                StepOutcome::ReachedExit(p) => {
                    pos = p;
                    break;
                }
            }
            assert!(ticks < 1000, "never reached the exit");
        }
        assert!((pos.x - 2.0).abs() < 0.1);
        // 2 units at 3 u/s is 20 ticks, minus the epsilon shortcut.
        assert!((18..=21).contains(&ticks), "took {ticks} ticks");
    }

    #[test]
    fn test_zero_speed_stays_put() {
        let mut follower = straight_path();
        follower.next_vertex = 1;
        for _ in 0..100 {
            let out = movement::step_along_path(DVec3::ZERO, &mut follower, 0.0, DT);
            assert_eq!(out, StepOutcome::Moving(DVec3::ZERO));
        }
    }

    #[test]
    fn test_finished_follower_reports_exit() {
        let mut follower = straight_path();
        follower.next_vertex = 3;
        assert!(matches!(
            movement::step_along_path(DVec3::ZERO, &mut follower, 3.0, DT),
            StepOutcome::ReachedExit(_)
        ));
    }

    // --- damage ---

    #[test]
    fn test_mitigate_rounds_and_floors() {
        assert_eq!(damage::mitigate(10, 0.0), 10);
        assert_eq!(damage::mitigate(10, 0.25), 8);
        assert_eq!(damage::mitigate(40, 0.25), 30);
        assert_eq!(damage::mitigate(1, 0.9), 1, "floor at 1");
        assert_eq!(damage::mitigate(0, 0.25), 0);
    }

    #[test]
    fn test_damage_kills_at_zero() {
        let mut e = make_enemy(25, 0.0);
        assert_eq!(
            damage::apply_damage(&mut e, 10),
            DamageOutcome::Hurt { current: 15, max: 25 }
        );
        assert_eq!(
            damage::apply_damage(&mut e, 10),
            DamageOutcome::Hurt { current: 5, max: 25 }
        );
        assert_eq!(damage::apply_damage(&mut e, 10), DamageOutcome::Killed { max: 25 });
        assert_eq!(e.health, 0, "health clamps at zero");
        assert_eq!(e.phase, EnemyPhase::Dead);
    }

    #[test]
    fn test_damage_after_death_is_ignored() {
        let mut e = make_enemy(5, 0.0);
        assert!(matches!(damage::apply_damage(&mut e, 50), DamageOutcome::Killed { .. }));
        let snapshot = e.clone();
        for amount in [0, 1, 1000] {
            assert_eq!(damage::apply_damage(&mut e, amount), DamageOutcome::Ignored);
        }
        assert_eq!(e, snapshot);
    }

    #[test]
    fn test_damage_ignored_after_exit() {
        let mut e = make_enemy(100, 0.0);
        e.phase = EnemyPhase::ReachedExit;
        assert_eq!(damage::apply_damage(&mut e, 10), DamageOutcome::Ignored);
        assert_eq!(e.health, 100);
    }

    #[test]
    fn test_resistance_reduces_damage() {
        let mut e = make_enemy(300, 0.25);
        damage::apply_damage(&mut e, 40);
        assert_eq!(e.health, 270);
    }

    // --- status ---

    #[test]
    fn test_slow_window_and_revert() {
        let mut fx = StatusEffects::default();
        status::apply_slow(&mut fx, 0.5, 3.0);
        assert_eq!(status::effective_speed(4.0, &fx), 2.0);

        let ticks = secs_to_ticks(3.0);
        for i in 1..ticks {
            let t = status::tick(&mut fx);
            assert!(!t.slow_expired, "expired early at tick {i}");
            assert_eq!(status::effective_speed(4.0, &fx), 2.0);
        }
        assert!(status::tick(&mut fx).slow_expired);
        assert_eq!(status::effective_speed(4.0, &fx), 4.0);
    }

    #[test]
    fn test_second_slow_overwrites() {
        let mut fx = StatusEffects::default();
        status::apply_slow(&mut fx, 0.8, 10.0);
        status::apply_slow(&mut fx, 0.25, 1.0);
        assert_eq!(status::slow_multiplier(&fx), 0.75);
        for _ in 0..secs_to_ticks(1.0) {
            status::tick(&mut fx);
        }
        assert_eq!(status::slow_multiplier(&fx), 1.0, "later, shorter slow wins");
    }

    #[test]
    fn test_slow_factor_clamped() {
        let mut fx = StatusEffects::default();
        status::apply_slow(&mut fx, 1.7, 1.0);
        assert_eq!(status::slow_multiplier(&fx), 0.0);
        status::apply_slow(&mut fx, -1.0, 1.0);
        assert_eq!(status::slow_multiplier(&fx), 1.0);
    }

    #[test]
    fn test_zero_duration_slow_is_noop() {
        let mut fx = StatusEffects::default();
        status::apply_slow(&mut fx, 0.5, 0.0);
        assert!(fx.slow.is_none());
    }

    #[test]
    fn test_boost_cycle() {
        let params = SpeedBoost {
            interval_secs: 1.0,
            duration_secs: 0.5,
            multiplier: 1.5,
        };
        let mut fx = StatusEffects {
            slow: None,
            boost: Some(BoostCycle::new(params)),
        };
        for _ in 1..30 {
            assert!(!status::tick(&mut fx).boost_started);
        }
        assert!(status::tick(&mut fx).boost_started);
        assert_eq!(status::effective_speed(6.0, &fx), 9.0);

        for _ in 1..15 {
            assert!(!status::tick(&mut fx).boost_ended);
        }
        assert!(status::tick(&mut fx).boost_ended);
        assert_eq!(status::effective_speed(6.0, &fx), 6.0);
    }

    #[test]
    fn test_boost_independent_of_slow() {
        let params = SpeedBoost {
            interval_secs: 0.1,
            duration_secs: 10.0,
            multiplier: 2.0,
        };
        let mut fx = StatusEffects {
            slow: None,
            boost: Some(BoostCycle::new(params)),
        };
        for _ in 0..3 {
            status::tick(&mut fx);
        }
        status::apply_slow(&mut fx, 0.5, 0.1);
        assert_eq!(status::effective_speed(3.0, &fx), 3.0);
        for _ in 0..3 {
            status::tick(&mut fx);
        }
        assert_eq!(status::effective_speed(3.0, &fx), 6.0, "slow expiry keeps the boost");
    }

    // --- assault ---

    fn make_assault() -> TowerAssault {
        TowerAssault::new(TowerAttack {
            range: 2.0,
            attack_rate: 1.0,
            stun_secs: 3.0,
            damage: 0,
        })
    }

    #[test]
    fn test_assault_scans_immediately_then_on_interval() {
        let mut a = make_assault();
        assert!(assault::advance(&mut a, TargetCheck::NoTarget));
        let interval = secs_to_ticks(bastion_core::constants::TOWER_SCAN_INTERVAL_SECS);
        for _ in 1..interval {
            assert!(!assault::advance(&mut a, TargetCheck::NoTarget));
        }
        assert!(assault::advance(&mut a, TargetCheck::NoTarget));
    }

    #[test]
    fn test_assault_strikes_on_engage_then_waits_cooldown() {
        let mut a = make_assault();
        let tower = TowerHandle::from_bits(7);
        assert!(assault::advance(&mut a, TargetCheck::NoTarget));
        assault::engage(&mut a, tower);
        assert_eq!(assault::ready_strike(&mut a), Some(tower), "first strike is immediate");

        let mut strikes = 0;
        for _ in 0..30 {
            assert!(!assault::advance(&mut a, TargetCheck::InReach));
            if assault::ready_strike(&mut a).is_some() {
                strikes += 1;
            }
        }
        assert_eq!(strikes, 1, "one strike per second at rate 1");
    }

    #[test]
    fn test_assault_drops_lost_target() {
        let mut a = make_assault();
        assault::engage(&mut a, TowerHandle::from_bits(3));
        assault::advance(&mut a, TargetCheck::Lost);
        assert!(a.target.is_none());
        assert_eq!(assault::ready_strike(&mut a), None);
    }
}

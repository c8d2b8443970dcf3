//! Property-based tests over random key sequences.
//!
//! Every tick of every generated match is checked against the rules that
//! must hold no matter what the players press:
//! - Health stays within `[0, 100]`
//! - A knocked-out combatant stays down with every action flag cleared
//! - A grounded combatant stands exactly on a platform surface
//! - Combo count is zero whenever the combo window is closed
//! - A decided match never changes again

use proptest::prelude::*;

use crate::constants::{
    ATTACK_DURATION, HIT_FLASH_DURATION, INITIAL_PLAYER_HEALTH, PLAYER_1_KEYS, PLAYER_2_KEYS,
};
use crate::entity::CombatantId;
use crate::input::InputSnapshot;
use crate::simulation::{Simulation, StepOutcome};

use super::helpers::{face_off, idle};

/// Keys for two five-bit action masks, `[left, right, jump, attack, block]`.
fn snapshot(p1: u8, p2: u8) -> InputSnapshot {
    let mut keys = InputSnapshot::new();
    for bit in 0..5 {
        if p1 & (1 << bit) != 0 {
            keys.press(PLAYER_1_KEYS[bit]);
        }
        if p2 & (1 << bit) != 0 {
            keys.press(PLAYER_2_KEYS[bit]);
        }
    }
    keys
}

/// Held-key segments: both masks plus how many ticks they are held.
fn segments() -> impl Strategy<Value = Vec<(u8, u8, usize)>> {
    proptest::collection::vec((0u8..32, 0u8..32, 1usize..15), 5..60)
}

fn check_invariants(sim: &Simulation, was_ko: &mut [bool; 2]) -> Result<(), TestCaseError> {
    let tops: Vec<f32> = sim.arena().platforms().iter().map(|p| p.top()).collect();

    for id in CombatantId::ALL {
        let fighter = sim.combatant(id);

        prop_assert!(
            (0.0..=INITIAL_PLAYER_HEALTH).contains(&fighter.health),
            "{id} health {} out of range",
            fighter.health
        );
        prop_assert!(fighter.attack.timer() <= ATTACK_DURATION);
        prop_assert!(fighter.hit_flash <= HIT_FLASH_DURATION);
        if fighter.combo.timer() == 0 {
            prop_assert_eq!(fighter.combo.count(), 0);
        }

        if was_ko[id.index()] {
            prop_assert!(fighter.is_ko(), "{id} got back up");
        }
        if fighter.is_ko() {
            was_ko[id.index()] = true;
            prop_assert!(!fighter.grounded);
            prop_assert!(!fighter.blocking);
            prop_assert!(!fighter.is_attacking());
        }

        if fighter.grounded {
            let bottom = fighter.bottom();
            prop_assert!(
                tops.iter().any(|top| (bottom - top).abs() < 1e-3),
                "{id} grounded at bottom {bottom}, not on a platform"
            );
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn rules_hold_every_tick(gap in -30.0f32..80.0, plan in segments()) {
        let mut sim = face_off(gap);
        let mut was_ko = [false; 2];

        'outer: for (p1, p2, ticks) in plan {
            let keys = snapshot(p1, p2);
            for _ in 0..ticks {
                let outcome = sim.step(&keys);
                check_invariants(&sim, &mut was_ko)?;
                if outcome != StepOutcome::Running {
                    break 'outer;
                }
            }
        }
    }

    #[test]
    fn low_health_brawls_end_cleanly(
        hp in 1.0f32..25.0,
        plan in segments(),
    ) {
        let mut sim = face_off(0.0);
        for id in CombatantId::ALL {
            sim.arena_mut().combatant_mut(id).health = hp;
        }
        let mut was_ko = [false; 2];
        let mut decided = None;

        for (p1, p2, ticks) in plan {
            let keys = snapshot(p1, p2);
            for _ in 0..ticks {
                match sim.step(&keys) {
                    StepOutcome::MatchOver(outcome) => {
                        prop_assert!(decided.is_none(), "decided twice");
                        decided = Some(outcome);
                    }
                    StepOutcome::Halted => prop_assert!(decided.is_some()),
                    StepOutcome::Running => {}
                }
                check_invariants(&sim, &mut was_ko)?;
            }
        }

        if decided.is_some() {
            let frozen = sim.view().to_json().unwrap();
            prop_assert_eq!(idle(&mut sim, 10), StepOutcome::Halted);
            prop_assert_eq!(sim.view().to_json().unwrap(), frozen);
        }
    }

    #[test]
    fn friction_never_flips_direction(vx in -20.0f32..20.0) {
        let mut sim = face_off_far();
        sim.arena_mut().combatant_mut(CombatantId::One).velocity.x = vx;

        let mut last = vx;
        for _ in 0..120 {
            idle(&mut sim, 1);
            let now = sim.combatant(CombatantId::One).velocity.x;
            prop_assert!(now * vx >= 0.0, "{vx} became {now}");
            prop_assert!(now.abs() <= last.abs());
            last = now;
        }
        prop_assert!(last.abs() < 0.01);
    }
}

/// Player one well clear of player two, so they never touch.
fn face_off_far() -> Simulation {
    face_off(400.0)
}

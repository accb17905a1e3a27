// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::FakeClock;
use proptest::prelude::*;

#[test]
fn fresh_gate_fires_immediately() {
    let clock = FakeClock::new();
    let mut gate = IntervalGate::new(Duration::from_secs(10));
    assert_eq!(gate.interval(), Duration::from_secs(10));
    assert!(gate.can_fire(&clock));
}

#[test]
fn gate_fires_once_per_interval() {
    let clock = FakeClock::new();
    let mut gate = IntervalGate::new(Duration::from_secs(10));

    // t=0 fires, t=3/6/9 cool down, t=10 fires again
    assert!(gate.can_fire(&clock));
    for _ in 0..3 {
        clock.advance(Duration::from_secs(3));
        assert!(!gate.can_fire(&clock));
    }
    clock.advance(Duration::from_secs(1));
    assert!(gate.can_fire(&clock));
}

#[test]
fn false_evaluation_does_not_perturb_state() {
    let clock = FakeClock::new();
    let mut gate = IntervalGate::new(Duration::from_secs(10));
    assert!(gate.can_fire(&clock));
    let fired_at = gate.last_fire();

    clock.advance(Duration::from_secs(5));
    assert!(!gate.can_fire(&clock));
    assert_eq!(gate.last_fire(), fired_at);

    // The cooldown is measured from the original firing, not the failed poll
    clock.advance(Duration::from_secs(5));
    assert!(gate.can_fire(&clock));
}

#[test]
fn last_fire_only_advances() {
    let clock = FakeClock::new();
    let mut gate = IntervalGate::new(Duration::from_secs(2));

    let mut previous = None;
    for _ in 0..5 {
        if gate.can_fire(&clock) {
            let current = gate.last_fire();
            if let (Some(prev), Some(cur)) = (previous, current) {
                assert!(cur > prev);
            }
            previous = current;
        }
        clock.advance(Duration::from_secs(1));
    }
}

proptest! {
    // Never two true results with less than one interval of elapsed time
    // between them, for arbitrary poll cadences.
    #[test]
    fn gate_monotonicity(
        interval_secs in 1u64..120,
        steps in proptest::collection::vec(0u64..40, 1..64),
    ) {
        let clock = FakeClock::new();
        let interval = Duration::from_secs(interval_secs);
        let mut gate = IntervalGate::new(interval);
        let mut last_true: Option<Instant> = None;

        for step in steps {
            clock.advance(Duration::from_secs(step));
            if gate.can_fire(&clock) {
                let now = clock.now();
                if let Some(prev) = last_true {
                    prop_assert!(now.duration_since(prev) >= interval);
                }
                last_true = Some(now);
            }
        }
    }
}

use pale_harbor::clock::{DriftRates, SanityClock, MAX_SANITY};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Decrease(f32),
    Increase(f32),
    Tick(f64),
    Skip(f64),
    Meditate(bool),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0.0f32..250.0).prop_map(Op::Decrease),
        (0.0f32..250.0).prop_map(Op::Increase),
        (0.0f64..120.0).prop_map(Op::Tick),
        (0.0f64..30.0).prop_map(Op::Skip),
        any::<bool>().prop_map(Op::Meditate),
    ]
}

proptest! {
    #[test]
    fn sanity_and_hours_stay_in_range(
        start_hour in 0.0f64..24.0,
        start in 0.0f32..=100.0,
        ops in prop::collection::vec(op(), 1..60),
    ) {
        let mut clock = SanityClock::new(start_hour, start, DriftRates::default());
        for op in ops {
            match op {
                Op::Decrease(amount) => { clock.decrease(amount); }
                Op::Increase(amount) => { clock.increase(amount); }
                Op::Tick(dt) => {
                    clock.advance(dt);
                    clock.apply_drift(dt);
                }
                Op::Skip(hours) => clock.skip_hours(hours),
                Op::Meditate(unsafe_spot) => { let _ = clock.meditate(unsafe_spot); }
            }
            prop_assert!((0.0..=MAX_SANITY).contains(&clock.sanity()));
            prop_assert!((0.0..24.0).contains(&clock.hours()));
            prop_assert_eq!(clock.is_depleted(), clock.sanity() <= 0.0);
        }
    }

    #[test]
    fn refused_meditation_changes_nothing(hour in 0.0f64..6.0, sanity in 0.0f32..95.0) {
        let mut clock = SanityClock::new(hour, sanity, DriftRates::default());
        let before = clock.clone();
        prop_assert!(clock.meditate(false).is_err());
        prop_assert_eq!(clock, before);
    }
}

//! Property-based tests for the start-button debouncer.
//!
//! - The integrator never leaves `0..=MAXIMUM`
//! - The output only flips after `MAXIMUM` net samples in one direction
//! - A full press followed by a full release always settles released

use buzzer_core::{StartDebouncer, INTEGRATOR_MAXIMUM};
use proptest::prelude::*;

proptest! {
    /// Property: any raw sequence keeps the integrator bounded and only
    /// flips the output at the bounds
    #[test]
    fn prop_integrator_bounded_with_hysteresis(
        samples in prop::collection::vec(any::<bool>(), 0..256)
    ) {
        let mut debouncer = StartDebouncer::new();
        let mut presses_since_empty = 0;
        let mut releases_since_full = 0;

        for raw in samples {
            let before = debouncer.output();
            let after = debouncer.sample(raw);
            if raw {
                presses_since_empty += 1;
            } else {
                releases_since_full += 1;
            }

            prop_assert!(debouncer.integrator() <= INTEGRATOR_MAXIMUM);
            prop_assert_eq!(after, debouncer.output());
            if after && !before {
                prop_assert_eq!(debouncer.integrator(), INTEGRATOR_MAXIMUM);
                prop_assert!(presses_since_empty >= INTEGRATOR_MAXIMUM);
            }
            if !after && before {
                prop_assert_eq!(debouncer.integrator(), 0);
                prop_assert!(releases_since_full >= INTEGRATOR_MAXIMUM);
            }

            if debouncer.integrator() == 0 {
                presses_since_empty = 0;
            }
            if debouncer.integrator() == INTEGRATOR_MAXIMUM {
                releases_since_full = 0;
            }
        }
    }

    /// Property: whatever came before, MAXIMUM presses settle pressed and
    /// MAXIMUM releases after that settle released
    #[test]
    fn prop_press_then_release_settles_released(
        prefix in prop::collection::vec(any::<bool>(), 0..64)
    ) {
        let mut debouncer = StartDebouncer::new();
        for raw in prefix {
            debouncer.sample(raw);
        }

        let mut pressed = false;
        for _ in 0..INTEGRATOR_MAXIMUM {
            pressed = debouncer.sample(true);
        }
        prop_assert!(pressed);

        let mut released = true;
        for _ in 0..INTEGRATOR_MAXIMUM {
            released = debouncer.sample(false);
        }
        prop_assert!(!released);
        prop_assert_eq!(debouncer.integrator(), 0);
    }
}

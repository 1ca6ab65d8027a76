//! Leaky-integrator debounce for the start button.
//!
//! Kuhn's integrator: a bounded counter stepped up by "pressed" samples and
//! down by "released" samples. The output only flips at the two bounds, so
//! a press has to outweigh releases by `MAXIMUM` samples to register.

/// Time the start button must be held, in milliseconds
pub const DEBOUNCE_TIME_MS: u32 = 300;

/// Rate at which start-button edges are sampled
pub const SAMPLE_FREQUENCY_HZ: u32 = 10;

/// Integrator ceiling, rounded toward zero
pub const INTEGRATOR_MAXIMUM: u32 = DEBOUNCE_TIME_MS * SAMPLE_FREQUENCY_HZ / 1000;

/// Debouncer used for the start button
pub type StartDebouncer = Debouncer<INTEGRATOR_MAXIMUM>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer<const MAXIMUM: u32> {
    integrator: u32,
    output: bool,
}

impl<const MAXIMUM: u32> Default for Debouncer<MAXIMUM> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const MAXIMUM: u32> Debouncer<MAXIMUM> {
    pub fn new() -> Self {
        Self {
            integrator: 0,
            output: false,
        }
    }

    /// Feed one raw sample and return the settled output.
    ///
    /// Between the bounds the previous output is kept.
    pub fn sample(&mut self, raw: bool) -> bool {
        if raw {
            if self.integrator < MAXIMUM {
                self.integrator += 1;
            }
        } else if self.integrator > 0 {
            self.integrator -= 1;
        }

        if self.integrator == 0 {
            self.output = false;
        } else if self.integrator >= MAXIMUM {
            self.integrator = MAXIMUM;
            self.output = true;
        }
        self.output
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn integrator(&self) -> u32 {
        self.integrator
    }

    pub fn output(&self) -> bool {
        self.output
    }

    pub const fn maximum() -> u32 {
        MAXIMUM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maximum_matches_hardware_profile() {
        assert_eq!(INTEGRATOR_MAXIMUM, 3);
        assert_eq!(StartDebouncer::maximum(), 3);
    }

    #[test]
    fn settles_after_maximum_presses() {
        let mut debouncer = StartDebouncer::new();
        assert!(!debouncer.sample(true));
        assert!(!debouncer.sample(true));
        assert!(debouncer.sample(true));
        assert_eq!(debouncer.integrator(), 3);
    }

    #[test]
    fn full_hysteresis_cycle() {
        let mut debouncer = StartDebouncer::new();
        for _ in 0..3 {
            debouncer.sample(true);
        }
        assert!(debouncer.output());

        // stays pressed until the integrator drains to zero
        assert!(debouncer.sample(false));
        assert!(debouncer.sample(false));
        assert!(!debouncer.sample(false));
        assert_eq!(debouncer.integrator(), 0);
    }

    #[test]
    fn bounce_does_not_settle() {
        let mut debouncer = StartDebouncer::new();
        for raw in [true, false, true, false, true, true, false] {
            assert!(!debouncer.sample(raw));
        }
    }

    #[test]
    fn reset_returns_to_neutral() {
        let mut debouncer = StartDebouncer::new();
        for _ in 0..3 {
            debouncer.sample(true);
        }
        debouncer.reset();
        assert_eq!(debouncer.integrator(), 0);
        assert!(!debouncer.output());
        assert!(!debouncer.sample(true));
    }
}

//! Scripted board for tests and host simulation.
//!
//! Start-button samples and player buzzes are queued up front; every
//! blocking call pops the next scripted event. LED writes are recorded.

use std::collections::VecDeque;

use crate::hardware::GameHardware;
use crate::state::{Buzz, Led, LedState};

/// Failure injected by a script, or an exhausted script
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MockError {
    /// A scripted read/poll failure
    #[error("injected failure: {0}")]
    Injected(&'static str),
    /// A blocking call found nothing left to return
    #[error("no scripted {0} left")]
    ScriptExhausted(&'static str),
}

/// Mock board
///
/// All LEDs start unknown (`None`) until the machine writes them.
#[derive(Debug, Default)]
pub struct MockHardware {
    start_samples: VecDeque<Result<bool, MockError>>,
    buzzes: VecDeque<Result<Buzz, MockError>>,
    led_writes: Vec<(Led, LedState)>,
    failing_leds: Vec<Led>,
    arm_count: usize,
}

impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue raw start-button levels, one per edge
    pub fn push_start_samples(&mut self, samples: &[bool]) -> &mut Self {
        self.start_samples.extend(samples.iter().copied().map(Ok));
        self
    }

    /// Queue `count` pressed samples
    pub fn push_start_press(&mut self, count: usize) -> &mut Self {
        self.start_samples.extend((0..count).map(|_| Ok(true)));
        self
    }

    pub fn push_start_failure(&mut self) -> &mut Self {
        self.start_samples
            .push_back(Err(MockError::Injected("start button read")));
        self
    }

    pub fn push_buzz(&mut self, buzz: Buzz) -> &mut Self {
        self.buzzes.push_back(Ok(buzz));
        self
    }

    pub fn push_buzz_failure(&mut self) -> &mut Self {
        self.buzzes
            .push_back(Err(MockError::Injected("player button poll")));
        self
    }

    /// Make every write to `led` fail
    pub fn fail_led(&mut self, led: Led) -> &mut Self {
        self.failing_leds.push(led);
        self
    }

    /// Last state written to `led`
    pub fn led(&self, led: Led) -> Option<LedState> {
        self.led_writes
            .iter()
            .rev()
            .find(|(written, _)| *written == led)
            .map(|(_, state)| *state)
    }

    /// Number of times the player buttons were armed
    pub fn arm_count(&self) -> usize {
        self.arm_count
    }
}

impl GameHardware for MockHardware {
    type Error = MockError;

    fn wait_start_edge(&mut self) -> Result<bool, Self::Error> {
        self.start_samples
            .pop_front()
            .unwrap_or(Err(MockError::ScriptExhausted("start sample")))
    }

    fn arm_players(&mut self) -> Result<(), Self::Error> {
        self.arm_count += 1;
        Ok(())
    }

    fn wait_players(&mut self) -> Result<Buzz, Self::Error> {
        self.buzzes
            .pop_front()
            .unwrap_or(Err(MockError::ScriptExhausted("buzz")))
    }

    fn set_led(&mut self, led: Led, state: LedState) -> Result<(), Self::Error> {
        if self.failing_leds.contains(&led) {
            return Err(MockError::Injected("led write"));
        }
        self.led_writes.push((led, state));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_script_is_an_error() {
        let mut hardware = MockHardware::new();
        let err = hardware.wait_players().unwrap_err();
        assert_eq!(err, MockError::ScriptExhausted("buzz"));
        assert_eq!(err.to_string(), "no scripted buzz left");
    }

    #[test]
    fn failing_led_is_not_recorded() {
        let mut hardware = MockHardware::new();
        hardware.fail_led(Led::Player1);

        let err = hardware.set_led(Led::Player1, LedState::On).unwrap_err();
        assert_eq!(err.to_string(), "injected failure: led write");
        assert_eq!(hardware.led(Led::Player1), None);

        hardware.set_led(Led::Start, LedState::On).unwrap();
        assert_eq!(hardware.led(Led::Start), Some(LedState::On));
    }
}

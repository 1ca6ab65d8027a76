//! Board abstraction used by the state machine.

use core::fmt;

use crate::state::{Buzz, Led, LedState};

/// Inputs and outputs the game needs from the board
///
/// Implementations:
/// - `SysfsBoard` in the firmware crate (real GPIO lines)
/// - [`MockHardware`](crate::mock_hardware::MockHardware) for tests and the scenario harness
pub trait GameHardware {
    /// Error type for board operations
    type Error: fmt::Display + fmt::Debug;

    /// Block until the start button reports a rising edge
    ///
    /// # Returns
    /// The raw level read right after the edge, `true` when pressed
    fn wait_start_edge(&mut self) -> Result<bool, Self::Error>;

    /// Drop buzzes that arrived before the round started
    fn arm_players(&mut self) -> Result<(), Self::Error>;

    /// Block until at least one player button fires
    fn wait_players(&mut self) -> Result<Buzz, Self::Error>;

    fn set_led(&mut self, led: Led, state: LedState) -> Result<(), Self::Error>;
}

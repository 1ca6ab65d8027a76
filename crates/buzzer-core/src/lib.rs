//! Two-player buzzer game logic.
//! Hardware independent: runs on the board and on the host against a mock.

#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unreachable,
        clippy::unwrap_used
    )
)]

pub mod debounce;
pub mod hardware;
pub mod machine;
pub mod mock_hardware;
pub mod state;

pub use debounce::{Debouncer, StartDebouncer, INTEGRATOR_MAXIMUM};
pub use hardware::GameHardware;
pub use machine::{GameContext, Outcome, Transition, RETRY_BACKOFF};
pub use mock_hardware::{MockError, MockHardware};
pub use state::{Buzz, GameState, Led, LedState, Player, ScoreBoard};

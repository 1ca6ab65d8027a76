//! Round state machine and its dispatcher.
//!
//! [`GameContext`] owns everything a round touches: the board, the current
//! [`GameState`], the [`ScoreBoard`] and the start-button debouncer. Each
//! call to [`GameContext::step`] runs exactly one state handler to
//! completion and stores the state it selected.

use std::time::Duration;

use crate::debounce::StartDebouncer;
use crate::hardware::GameHardware;
use crate::state::{GameState, Led, LedState, Player, ScoreBoard};

/// Pause after a failed step before the state is re-entered
pub const RETRY_BACKOFF: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The handler completed and chose `to`
    Advanced,
    /// A board read or poll failed; the same state runs again
    Retried,
}

/// Record of one dispatcher step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: GameState,
    pub to: GameState,
    pub outcome: Outcome,
}

pub struct GameContext<H> {
    hardware: H,
    state: GameState,
    scores: ScoreBoard,
    debouncer: StartDebouncer,
}

impl<H: GameHardware> GameContext<H> {
    /// Fresh game in `Starting` with zero points
    pub fn new(hardware: H) -> Self {
        Self {
            hardware,
            state: GameState::Starting,
            scores: ScoreBoard::default(),
            debouncer: StartDebouncer::new(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn scores(&self) -> ScoreBoard {
        self.scores
    }

    pub fn debouncer(&self) -> &StartDebouncer {
        &self.debouncer
    }

    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hardware
    }

    /// Run the current state's handler once
    pub fn step(&mut self) -> Transition {
        let from = self.state;
        let result = match from {
            GameState::Starting => self.starting(),
            GameState::Running => self.running(),
            GameState::Player1Scored => Ok(self.scored(Player::One)),
            GameState::Player2Scored => Ok(self.scored(Player::Two)),
        };

        match result {
            Ok(to) => {
                if to != from {
                    log::debug!("{:?} -> {:?}", from, to);
                }
                self.state = to;
                Transition {
                    from,
                    to,
                    outcome: Outcome::Advanced,
                }
            }
            Err(err) => {
                log::warn!("{:?}: {}; retrying", from, err);
                Transition {
                    from,
                    to: from,
                    outcome: Outcome::Retried,
                }
            }
        }
    }

    /// Step until `done` accepts a transition, returning that transition
    pub fn run_until(&mut self, mut done: impl FnMut(&Transition) -> bool) -> Transition {
        loop {
            let transition = self.step();
            if done(&transition) {
                return transition;
            }
            if transition.outcome == Outcome::Retried {
                std::thread::sleep(RETRY_BACKOFF);
            }
        }
    }

    /// Play rounds forever
    pub fn run(&mut self) -> ! {
        log::info!("Game loop started in {:?}", self.state);
        loop {
            if self.step().outcome == Outcome::Retried {
                std::thread::sleep(RETRY_BACKOFF);
            }
        }
    }

    fn starting(&mut self) -> Result<GameState, H::Error> {
        let raw = self.hardware.wait_start_edge()?;
        if self.debouncer.sample(raw) {
            log::info!("Start pressed, round running");
            Ok(GameState::Running)
        } else {
            log::trace!(
                "start sample {} integrator={}",
                raw,
                self.debouncer.integrator()
            );
            Ok(GameState::Starting)
        }
    }

    fn running(&mut self) -> Result<GameState, H::Error> {
        self.hardware.arm_players()?;
        self.hardware.set_led(Led::Start, LedState::Off)?;
        let buzz = self.hardware.wait_players()?;
        match buzz.winner() {
            Some(player) => Ok(player.scored_state()),
            None => Ok(GameState::Running),
        }
    }

    // The point is recorded before any LED write so a failed write can
    // never count it twice.
    fn scored(&mut self, player: Player) -> GameState {
        let points = self.scores.award(player);
        log::info!(
            "{:?} scored ({} points) - score {}:{}",
            player,
            points,
            self.scores.player1,
            self.scores.player2
        );

        for (led, state) in [(player.led(), LedState::Off), (Led::Start, LedState::On)] {
            if let Err(err) = self.hardware.set_led(led, state) {
                log::warn!("{:?} LED write failed: {}", led, err);
            }
        }

        self.debouncer.reset();
        GameState::Starting
    }
}

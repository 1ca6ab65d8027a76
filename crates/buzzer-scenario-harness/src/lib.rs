//! Host-side scenario test harness for scripted game rounds.

use buzzer_core::{
    Buzz, GameContext, GameState, Led, LedState, MockHardware, Outcome, ScoreBoard, Transition,
};

/// Upper bound on steps for a single scripted action
const MAX_STEPS: usize = 64;

/// Couples a game context with a scripted mock board for scenario tests.
pub struct ScenarioHarness {
    game: GameContext<MockHardware>,
    history: Vec<Transition>,
}

impl Default for ScenarioHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioHarness {
    /// Fresh game in `Starting` on an empty script.
    pub fn new() -> Self {
        Self {
            game: GameContext::new(MockHardware::new()),
            history: Vec::new(),
        }
    }

    /// Run one state handler and record the transition.
    pub fn step(&mut self) -> Transition {
        let transition = self.game.step();
        log::trace!("{:?}", transition);
        self.history.push(transition);
        transition
    }

    /// Feed raw start-button samples, stepping once per sample.
    ///
    /// Returns the state after the last sample.
    pub fn start_samples(&mut self, samples: &[bool]) -> GameState {
        self.game.hardware_mut().push_start_samples(samples);
        for _ in samples {
            self.step();
        }
        self.state()
    }

    /// Hold the start button long enough to settle the debouncer.
    pub fn press_start(&mut self) -> GameState {
        let mut pressed = 0;
        while self.state() == GameState::Starting {
            assert!(pressed < MAX_STEPS, "start button never settled");
            self.game.hardware_mut().push_start_press(1);
            self.step();
            pressed += 1;
        }
        self.state()
    }

    /// Deliver one buzz to a running round and let the round finish.
    pub fn buzz(&mut self, buzz: Buzz) -> GameState {
        assert_eq!(self.state(), GameState::Running, "buzz outside a round");
        self.game.hardware_mut().push_buzz(buzz);
        let decided = self.step();
        if decided.to != GameState::Running {
            self.step();
        }
        self.state()
    }

    /// Start a round and buzz, returning the scored state that was visited.
    pub fn play_round(&mut self, buzz: Buzz) -> Option<GameState> {
        self.press_start();
        self.game.hardware_mut().push_buzz(buzz);
        let decided = self.step();
        if decided.to == GameState::Running {
            return None;
        }
        self.step();
        Some(decided.to)
    }

    pub fn state(&self) -> GameState {
        self.game.state()
    }

    pub fn scores(&self) -> ScoreBoard {
        self.game.scores()
    }

    pub fn led(&self, led: Led) -> Option<LedState> {
        self.game.hardware().led(led)
    }

    /// Every transition so far, oldest first.
    pub fn history(&self) -> &[Transition] {
        &self.history
    }

    /// Number of steps that had to be retried.
    pub fn retries(&self) -> usize {
        self.history
            .iter()
            .filter(|t| t.outcome == Outcome::Retried)
            .count()
    }

    /// Access the game for assertions.
    pub fn game(&self) -> &GameContext<MockHardware> {
        &self.game
    }

    /// Access the mock board for scenario setup.
    pub fn hardware_mut(&mut self) -> &mut MockHardware {
        self.game.hardware_mut()
    }
}

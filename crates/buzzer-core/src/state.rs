//! Game states, scores and the board outputs they drive.

/// Current step of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    /// Waiting for a debounced start-button press
    #[default]
    Starting,
    /// Start LED off, waiting for the first buzz
    Running,
    Player1Scored,
    Player2Scored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn scored_state(self) -> GameState {
        match self {
            Player::One => GameState::Player1Scored,
            Player::Two => GameState::Player2Scored,
        }
    }

    pub fn led(self) -> Led {
        match self {
            Player::One => Led::Player1,
            Player::Two => Led::Player2,
        }
    }
}

/// LEDs on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Led {
    Start,
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedState {
    On,
    Off,
}

impl LedState {
    /// Level to drive on the line. The board LEDs are active low.
    pub fn level(self) -> bool {
        match self {
            LedState::On => false,
            LedState::Off => true,
        }
    }
}

/// Result of one wait on the player buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Buzz {
    pub player1: bool,
    pub player2: bool,
}

impl Buzz {
    pub fn player1() -> Self {
        Self {
            player1: true,
            player2: false,
        }
    }

    pub fn player2() -> Self {
        Self {
            player1: false,
            player2: true,
        }
    }

    pub fn both() -> Self {
        Self {
            player1: true,
            player2: true,
        }
    }

    /// Player 1 wins ties
    pub fn winner(self) -> Option<Player> {
        if self.player1 {
            Some(Player::One)
        } else if self.player2 {
            Some(Player::Two)
        } else {
            None
        }
    }
}

/// Points collected since startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBoard {
    pub player1: u32,
    pub player2: u32,
}

impl ScoreBoard {
    pub fn award(&mut self, player: Player) -> u32 {
        let points = match player {
            Player::One => &mut self.player1,
            Player::Two => &mut self.player2,
        };
        *points = points.saturating_add(1);
        *points
    }

    pub fn points(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player1_wins_ties() {
        assert_eq!(Buzz::both().winner(), Some(Player::One));
        assert_eq!(Buzz::player2().winner(), Some(Player::Two));
        assert_eq!(Buzz::default().winner(), None);
    }

    #[test]
    fn leds_are_active_low() {
        assert!(!LedState::On.level());
        assert!(LedState::Off.level());
    }

    #[test]
    fn award_touches_one_player() {
        let mut scores = ScoreBoard::default();
        assert_eq!(scores.award(Player::Two), 1);
        assert_eq!(scores.award(Player::Two), 2);
        assert_eq!(scores.points(Player::One), 0);
        assert_eq!(scores.points(Player::Two), 2);
    }
}

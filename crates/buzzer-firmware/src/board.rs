//! Viola carrier board wiring over sysfs GPIO.

use core::fmt;

use buzzer_core::{Buzz, GameHardware, Led, LedState};
use embedded_hal::digital::OutputPin;
use gpio_sysfs::{
    wait_any, wait_for_edge, BuilderError, Edge, GpioLine, LineConfig, Readiness,
    SysfsInterface,
};

/// GPIO numbers of the game's buttons and LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardPins {
    pub start_led: u16,
    pub start_button: u16,
    pub player1_button: u16,
    pub player2_button: u16,
    pub player1_led: u16,
    pub player2_led: u16,
}

impl Default for BoardPins {
    fn default() -> Self {
        Self {
            start_led: 89,
            start_button: 88,
            player1_button: 90,
            player2_button: 91,
            player1_led: 92,
            player2_led: 93,
        }
    }
}

/// What a line is used for, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    StartLed,
    StartButton,
    Player1Button,
    Player2Button,
    Player1Led,
    Player2Led,
}

impl fmt::Display for LineRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineRole::StartLed => "start LED",
            LineRole::StartButton => "start button",
            LineRole::Player1Button => "player 1 button",
            LineRole::Player2Button => "player 2 button",
            LineRole::Player1Led => "player 1 LED",
            LineRole::Player2Led => "player 2 LED",
        };
        f.write_str(name)
    }
}

/// Board bring-up failure, fatal for the process
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("{role} (gpio{line}): {source}")]
    Config {
        role: LineRole,
        line: u16,
        #[source]
        source: BuilderError,
    },
    #[error("{role} (gpio{line}): {source}")]
    Gpio {
        role: LineRole,
        line: u16,
        #[source]
        source: gpio_sysfs::Error,
    },
}

impl StartupError {
    pub fn role(&self) -> LineRole {
        match self {
            StartupError::Config { role, .. } | StartupError::Gpio { role, .. } => *role,
        }
    }
}

/// All game lines, held open for the life of the process
pub struct SysfsBoard {
    start_led: GpioLine,
    start_button: GpioLine,
    player1_button: GpioLine,
    player2_button: GpioLine,
    player1_led: GpioLine,
    player2_led: GpioLine,
}

impl SysfsBoard {
    /// Export and configure every line
    ///
    /// Order: start LED (off), start button (pending edge discarded),
    /// player 1 button, player 2 button, player 1 LED (off), player 2 LED (off).
    /// Stops at the first failure without undoing earlier steps.
    pub fn setup(interface: &SysfsInterface, pins: &BoardPins) -> Result<Self, StartupError> {
        let start_led = open_led(interface, LineRole::StartLed, pins.start_led)?;
        let mut start_button = open_button(interface, LineRole::StartButton, pins.start_button)?;
        start_button
            .discard_pending()
            .map_err(|source| StartupError::Gpio {
                role: LineRole::StartButton,
                line: pins.start_button,
                source,
            })?;
        let player1_button =
            open_button(interface, LineRole::Player1Button, pins.player1_button)?;
        let player2_button =
            open_button(interface, LineRole::Player2Button, pins.player2_button)?;
        let player1_led = open_led(interface, LineRole::Player1Led, pins.player1_led)?;
        let player2_led = open_led(interface, LineRole::Player2Led, pins.player2_led)?;

        log::info!("Board ready: {:?}", pins);
        Ok(Self {
            start_led,
            start_button,
            player1_button,
            player2_button,
            player1_led,
            player2_led,
        })
    }

    fn led_line(&mut self, led: Led) -> &mut GpioLine {
        match led {
            Led::Start => &mut self.start_led,
            Led::Player1 => &mut self.player1_led,
            Led::Player2 => &mut self.player2_led,
        }
    }
}

fn open_led(
    interface: &SysfsInterface,
    role: LineRole,
    line: u16,
) -> Result<GpioLine, StartupError> {
    let config =
        LineConfig::output(line).map_err(|source| StartupError::Config { role, line, source })?;
    let mut led = GpioLine::open(interface, config)
        .map_err(|source| StartupError::Gpio { role, line, source })?;
    drive(&mut led, LedState::Off).map_err(|source| StartupError::Gpio { role, line, source })?;
    Ok(led)
}

fn open_button(
    interface: &SysfsInterface,
    role: LineRole,
    line: u16,
) -> Result<GpioLine, StartupError> {
    let config = LineConfig::input(line, Edge::Rising)
        .map_err(|source| StartupError::Config { role, line, source })?;
    GpioLine::open(interface, config).map_err(|source| StartupError::Gpio { role, line, source })
}

/// Map a wait over `[player 1, player 2]` onto a buzz
fn buzz_from(ready: &Readiness) -> Buzz {
    Buzz {
        player1: ready.is_ready(0),
        player2: ready.is_ready(1),
    }
}

fn drive(line: &mut GpioLine, state: LedState) -> Result<(), gpio_sysfs::Error> {
    if state.level() {
        line.set_high()
    } else {
        line.set_low()
    }
}

impl GameHardware for SysfsBoard {
    type Error = gpio_sysfs::Error;

    fn wait_start_edge(&mut self) -> Result<bool, Self::Error> {
        wait_for_edge(&mut self.start_button)
    }

    fn arm_players(&mut self) -> Result<(), Self::Error> {
        self.player1_button.discard_pending()?;
        self.player2_button.discard_pending()?;
        Ok(())
    }

    fn wait_players(&mut self) -> Result<Buzz, Self::Error> {
        let ready = wait_any(&mut [&mut self.player1_button, &mut self.player2_button])?;
        Ok(buzz_from(&ready))
    }

    fn set_led(&mut self, led: Led, state: LedState) -> Result<(), Self::Error> {
        log::debug!("{:?} LED {:?}", led, state);
        drive(self.led_line(led), state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buzzer_core::{GameState, Player};
    use gpio_sysfs::test_util::FakeSysfs;

    const ALL_LINES: [u16; 6] = [88, 89, 90, 91, 92, 93];

    #[test]
    fn setup_configures_every_line() {
        let sysfs = FakeSysfs::new(&ALL_LINES);
        SysfsBoard::setup(&sysfs.interface(), &BoardPins::default()).unwrap();

        for led in ["gpio89", "gpio92", "gpio93"] {
            assert_eq!(sysfs.read(&format!("{led}/direction")), "out");
            assert!(sysfs.read(&format!("{led}/value")).starts_with('1'));
        }
        for button in ["gpio88", "gpio90", "gpio91"] {
            assert_eq!(sysfs.read(&format!("{button}/direction")), "in");
            assert_eq!(sysfs.read(&format!("{button}/edge")), "rising");
        }
        // player 2 LED is the last line exported
        assert_eq!(sysfs.read("export"), "93");
    }

    #[test]
    fn setup_stops_at_first_failure() {
        let sysfs = FakeSysfs::new(&[89, 90, 91, 92, 93]);
        let err = match SysfsBoard::setup(&sysfs.interface(), &BoardPins::default()) {
            Ok(_) => panic!("setup should fail without gpio88"),
            Err(err) => err,
        };

        assert_eq!(err.role(), LineRole::StartButton);
        assert!(err.to_string().contains("start button (gpio88)"));
        assert!(err.to_string().contains("gpio88/direction"));
        assert_eq!(sysfs.read("export"), "88");
        // the start LED was already driven off, player lines never touched
        assert_eq!(sysfs.read("gpio89/direction"), "out");
        assert_eq!(sysfs.read("gpio92/direction"), "in");
    }

    #[test]
    fn invalid_pin_is_reported_before_io() {
        let sysfs = FakeSysfs::new(&ALL_LINES);
        let pins = BoardPins {
            player2_button: 120,
            ..BoardPins::default()
        };
        let err = match SysfsBoard::setup(&sysfs.interface(), &pins) {
            Ok(_) => panic!("three-digit line should be rejected"),
            Err(err) => err,
        };
        assert!(matches!(
            err,
            StartupError::Config {
                role: LineRole::Player2Button,
                source: BuilderError::InvalidLineNumber(120),
                ..
            }
        ));
    }

    #[test]
    fn leds_are_driven_active_low() {
        let sysfs = FakeSysfs::new(&ALL_LINES);
        let mut board = SysfsBoard::setup(&sysfs.interface(), &BoardPins::default()).unwrap();

        board.set_led(Led::Start, LedState::On).unwrap();
        assert!(sysfs.read("gpio89/value").starts_with('0'));
        board.set_led(Led::Player1, LedState::Off).unwrap();
        assert!(sysfs.read("gpio92/value").starts_with('1'));
        board.set_led(Led::Start, LedState::Off).unwrap();
        assert!(sysfs.read("gpio89/value").starts_with('1'));
    }

    #[test]
    fn arming_reads_both_player_lines() {
        let sysfs = FakeSysfs::new(&ALL_LINES);
        let mut board = SysfsBoard::setup(&sysfs.interface(), &BoardPins::default()).unwrap();
        board.arm_players().unwrap();

        sysfs.set_value(90, "x");
        let err = board.arm_players().unwrap_err();
        assert_eq!(err.line().map(|line| line.get()), Some(90));

        sysfs.set_value(90, "1\n");
        sysfs.set_value(91, "x");
        let err = board.arm_players().unwrap_err();
        assert_eq!(err.line().map(|line| line.get()), Some(91));
    }

    #[test]
    fn readiness_maps_to_buzz() {
        let both = buzz_from(&Readiness::from_flags(vec![true, true]));
        assert_eq!(both, Buzz::both());
        assert_eq!(both.winner(), Some(Player::One));
        assert_eq!(both.winner().map(Player::scored_state), Some(GameState::Player1Scored));

        let second = buzz_from(&Readiness::from_flags(vec![false, true]));
        assert_eq!(second, Buzz::player2());
        assert_eq!(second.winner(), Some(Player::Two));

        assert_eq!(buzz_from(&Readiness::default()), Buzz::default());
    }
}

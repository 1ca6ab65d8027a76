mod board;

use std::process::ExitCode;

use buzzer_core::GameContext;
use gpio_sysfs::SysfsInterface;

use board::{BoardPins, SysfsBoard};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("=== Buzzer game controller ===");
    let pins = BoardPins::default();
    let interface = SysfsInterface::new();
    log::info!("GPIO root: {}", interface.root().display());

    let board = match SysfsBoard::setup(&interface, &pins) {
        Ok(board) => board,
        Err(err) => {
            log::error!("Startup failed on the {}", err.role());
            eprintln!("buzzer-firmware: startup failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut game = GameContext::new(board);
    game.run()
}

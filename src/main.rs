//! Launches the two-player board.
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` to see every
//! accepted and rejected move, or `RUST_LOG=trace` to follow the trial moves.

use chess_rules::gui::run_gui;

fn main() {
    env_logger::init();
    if let Err(e) = run_gui() {
        eprintln!("Error running GUI: {}", e);
    }
}

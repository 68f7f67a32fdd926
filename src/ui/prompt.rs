//! "Press any key" prompt shown before the process exits

use console::{Style, Term};

/// Wait for a key press so a console window opened by double-click or UAC
/// relaunch stays readable. Does nothing when disabled or when stdout is not
/// an interactive terminal.
pub fn pause_for_key(enabled: bool) {
    let term = Term::stdout();
    if !should_pause(enabled, term.is_term()) {
        return;
    }

    println!();
    println!("{}", Style::new().dim().apply_to("Press any key to exit..."));
    if let Err(e) = term.read_key() {
        log::debug!("Could not read key press: {e}");
    }
}

fn should_pause(enabled: bool, is_term: bool) -> bool {
    enabled && is_term
}

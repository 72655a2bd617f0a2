use popcorn_core::HostDisplay;
use std::io::{self, IsTerminal, Write};

/// Terminal window title via the OSC 0 escape sequence. Quietly does nothing
/// when stdout is not a terminal.
#[derive(Default)]
pub struct TerminalTitle;

impl HostDisplay for TerminalTitle {
    fn set_title(&self, title: &str) {
        if !io::stdout().is_terminal() {
            return;
        }
        print!("\x1b]0;{}\x07", title);
        let _ = io::stdout().flush();
    }
}

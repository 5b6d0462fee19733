use std::io;
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{error, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Board terminal: ratatui over crossterm on stdout.
pub type BoardTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Holds the terminal in raw mode on the alternate screen while the game runs.
///
/// Call [`TerminalGuard::close`] on a clean exit to see restore errors. If
/// the guard is dropped early (an error unwinding through the loop), or the
/// process panics, the terminal is still put back and failures are logged.
pub struct TerminalGuard {
    terminal: BoardTerminal,
    restored: bool,
}

impl TerminalGuard {
    /// Switches the terminal into game mode.
    pub fn open() -> io::Result<Self> {
        install_panic_hook();
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self {
                terminal,
                restored: false,
            }),
            Err(error) => {
                if let Err(restore_error) = restore_terminal() {
                    warn!("failed to restore terminal after setup error: {restore_error}");
                }
                Err(error)
            }
        }
    }

    pub fn terminal_mut(&mut self) -> &mut BoardTerminal {
        &mut self.terminal
    }

    /// Leaves game mode, reporting the first restore failure.
    pub fn close(mut self) -> io::Result<()> {
        self.restored = true;
        restore_terminal()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.restored {
            return;
        }

        if let Err(error) = restore_terminal() {
            warn!("failed to restore terminal: {error}");
        }
    }
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        // Restore first so the default hook prints to a cooked terminal.
        let _ = restore_terminal();
        error!("panic: {panic_info}");
        default_hook(panic_info);
    }));
}

/// Puts the terminal back: cooked mode, visible cursor, main screen.
///
/// Every step is attempted even if an earlier one fails.
fn restore_terminal() -> io::Result<()> {
    let raw_mode = disable_raw_mode();

    let mut stdout = io::stdout();
    let screen = execute!(stdout, Show, LeaveAlternateScreen);

    raw_mode.and(screen)
}

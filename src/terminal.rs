//! Ownership of the raw-mode terminal while the quiz is on screen.

use std::io::{self, Stdout};
use std::panic;
use std::sync::Once;

use crossterm::{
    ExecutableCommand, cursor,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

pub type QuizTerminal = Terminal<CrosstermBackend<Stdout>>;

static PANIC_HOOK: Once = Once::new();

/// The quiz screen: raw mode on the alternate screen. Leaving it, through
/// [`Screen::leave`] or by dropping it, hands the shell back its terminal.
pub struct Screen {
    terminal: QuizTerminal,
    active: bool,
}

impl Screen {
    pub fn enter() -> io::Result<Self> {
        PANIC_HOOK.call_once(install_panic_hook);

        enable_raw_mode()?;
        let terminal = io::stdout()
            .execute(EnterAlternateScreen)
            .and_then(|_| Terminal::new(CrosstermBackend::new(io::stdout())));

        match terminal {
            Ok(terminal) => {
                tracing::debug!("entered quiz screen");
                Ok(Self {
                    terminal,
                    active: true,
                })
            }
            Err(err) => {
                if let Err(restore_err) = leave_screen() {
                    tracing::warn!(error = %restore_err, "restore after failed setup");
                }
                Err(err)
            }
        }
    }

    pub fn terminal(&mut self) -> &mut QuizTerminal {
        &mut self.terminal
    }

    pub fn leave(mut self) -> io::Result<()> {
        self.active = false;
        leave_screen()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        if self.active
            && let Err(err) = leave_screen()
        {
            tracing::error!(error = %err, "failed to restore terminal");
        }
    }
}

fn leave_screen() -> io::Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(LeaveAlternateScreen)?;
    stdout.execute(cursor::Show)?;
    tracing::debug!("left quiz screen");
    Ok(())
}

/// Panics inside the event loop would otherwise leave the shell in raw mode
/// with the message hidden on the alternate screen.
fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = leave_screen();
        tracing::error!(%info, "panic");
        previous(info);
    }));
}

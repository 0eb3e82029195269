//! # quiz-runner
//!
//! Terminal practice and exam sessions over a multiple-choice question set.
//!
//! Questions come from a plain text document and the correct letters from a
//! separate answer key. Practice mode walks every question and checks each
//! answer immediately; exam mode draws a random sample, accepts one answer
//! per question and scores the lot on submission.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_runner::{Quiz, QuizError, Settings};
//!
//! fn main() -> Result<(), QuizError> {
//!     let quiz = Quiz::load(&Settings::default())?;
//!     quiz.run()
//! }
//! ```

mod app;
pub mod config;
pub mod data;
pub mod models;
pub mod logging;
pub mod report;
pub mod session;
pub mod terminal;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use thiserror::Error;

pub use app::{App, InputMode, StatusLevel, StatusMessage};
pub use config::{CliArgs, ConfigError, Settings};
pub use data::{LoadError, QuestionBank};
pub use models::{AnswerKey, OptionLetter, Question, QuestionOption};
pub use session::{Mode, Session, SessionError, View};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Error)]
pub enum QuizError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to load quiz: {0}")]
    Load(#[from] LoadError),

    #[error("cannot open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to initialise logging: {0}")]
    Logging(String),

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// A loaded quiz, ready to run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    pub fn new(bank: QuestionBank, settings: &Settings) -> Self {
        Self {
            app: App::new(bank, settings),
        }
    }

    /// Read the question and answer documents named in `settings`.
    pub fn load(settings: &Settings) -> Result<Self, QuizError> {
        let bank = QuestionBank::load(&settings.questions, &settings.answers)?;
        Ok(Self::new(bank, settings))
    }

    /// Take over the terminal until the user quits. The terminal is restored
    /// even when the event loop fails.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut screen = terminal::Screen::enter()?;
        let result = run_event_loop(screen.terminal(), &mut self.app);
        finish_run(result, screen.leave())
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::QuizTerminal, app: &mut App) -> Result<(), QuizError> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key.code);
        }

        app.tick(Instant::now());
    }

    tracing::info!("quit requested");
    Ok(())
}

/// An event loop failure is what the caller sees; a failed terminal restore
/// is only returned when the loop itself succeeded.
fn finish_run(result: Result<(), QuizError>, restored: io::Result<()>) -> Result<(), QuizError> {
    match (result, restored) {
        (Err(err), Err(restore_err)) => {
            tracing::error!(error = %restore_err, "failed to restore terminal");
            Err(err)
        }
        (result, restored) => result.and(restored.map_err(QuizError::from)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_error(message: &str) -> io::Error {
        io::Error::other(message.to_string())
    }

    #[test]
    fn loop_error_wins_over_restore_error() {
        let result = finish_run(
            Err(QuizError::Io(io_error("draw failed"))),
            Err(io_error("restore failed")),
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("draw failed"));
    }

    #[test]
    fn restore_error_surfaces_after_clean_loop() {
        let err = finish_run(Ok(()), Err(io_error("restore failed"))).unwrap_err();
        assert!(err.to_string().contains("restore failed"));
    }

    #[test]
    fn clean_run_is_ok() {
        assert!(finish_run(Ok(()), Ok(())).is_ok());
        let err = finish_run(Err(QuizError::Logging("x".into())), Ok(())).unwrap_err();
        assert!(matches!(err, QuizError::Logging(_)));
    }
}

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::Settings;
use crate::data::QuestionBank;
use crate::models::OptionLetter;
use crate::report::{ExamReport, write_exam_report};
use crate::session::{AnswerOutcome, Correctness, Mode, Session, SessionError, View};

const MAX_JUMP_DIGITS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing a question position to jump to.
    Jump(String),
}

pub struct App {
    session: Session,
    rng: StdRng,
    advance_delay: Duration,
    export_path: Option<PathBuf>,
    cursor: usize,
    input: InputMode,
    pending_advance: Option<Instant>,
    status: Option<StatusMessage>,
    results_scroll: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(bank: QuestionBank, settings: &Settings) -> Self {
        Self::with_rng(bank, settings, StdRng::from_os_rng())
    }

    pub fn with_rng(bank: QuestionBank, settings: &Settings, rng: StdRng) -> Self {
        let mut app = Self {
            session: Session::new(bank, settings.exam_size),
            rng,
            advance_delay: settings.advance_delay,
            export_path: settings.export_results.clone(),
            cursor: 0,
            input: InputMode::Normal,
            pending_advance: None,
            status: None,
            results_scroll: 0,
            should_quit: false,
        };
        app.sync_cursor();
        app
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Highlighted option of the current question.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn input(&self) -> &InputMode {
        &self.input
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn results_scroll(&self) -> usize {
        self.results_scroll
    }

    pub fn is_advancing(&self) -> bool {
        self.pending_advance.is_some()
    }

    fn set_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            level,
            text: text.into(),
        });
    }

    fn report_error(&mut self, err: SessionError) {
        tracing::debug!(error = %err, "rejected action");
        self.set_status(StatusLevel::Warning, err.to_string());
    }

    /// Point the cursor at the recorded answer, or the first option.
    fn sync_cursor(&mut self) {
        self.cursor = match (self.session.current_question(), self.session.selected_letter()) {
            (Some(question), Some(letter)) => question.option_position(letter).unwrap_or(0),
            _ => 0,
        };
    }

    fn option_count(&self) -> usize {
        self.session
            .current_question()
            .map_or(0, |question| question.options.len())
    }

    /// Run a pending auto-advance once its deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.pending_advance
            && now >= deadline
        {
            self.pending_advance = None;
            if self.session.next() {
                self.sync_cursor();
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        self.handle_key_at(key, Instant::now());
    }

    pub fn handle_key_at(&mut self, key: KeyCode, now: Instant) {
        if let InputMode::Jump(_) = self.input {
            self.handle_jump_input(key);
            return;
        }

        self.status = None;

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.toggle_mode();
                return;
            }
            _ => {}
        }

        match self.session.view() {
            View::ExamResults => self.handle_results_key(key),
            view => self.handle_question_key(view, key, now),
        }
    }

    fn toggle_mode(&mut self) {
        let target = match self.session.mode() {
            Mode::Practice => Mode::Exam,
            Mode::Exam => Mode::Practice,
        };
        self.pending_advance = None;
        self.results_scroll = 0;
        self.session.switch_mode(target, &mut self.rng);
        self.sync_cursor();

        let text = match target {
            Mode::Practice => "Practice mode: all questions, answers checked immediately".to_string(),
            Mode::Exam => format!(
                "Exam mode: {} random questions, one attempt each",
                self.session.question_count()
            ),
        };
        self.set_status(StatusLevel::Info, text);
    }

    fn handle_question_key(&mut self, view: View, key: KeyCode, now: Instant) {
        match key {
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Right | KeyCode::Char('l') => self.navigate(Session::next),
            KeyCode::Left | KeyCode::Char('h') => self.navigate(Session::previous),
            KeyCode::Char('g') => self.input = InputMode::Jump(String::new()),
            KeyCode::Char('b') if view == View::ExamReview => {
                if let Err(err) = self.session.back_to_exam_results() {
                    self.report_error(err);
                }
                self.results_scroll = 0;
                self.sync_cursor();
            }
            KeyCode::Char('r') if view == View::Practice => self.start_practice_review(),
            KeyCode::Char('r') if view == View::PracticeReview => {
                if let Err(err) = self.session.exit_practice_review() {
                    self.report_error(err);
                }
                self.pending_advance = None;
                self.sync_cursor();
            }
            KeyCode::Char('s') if view == View::Exam => self.submit_exam(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let letter = self
                    .session
                    .current_question()
                    .and_then(|question| question.options.get(self.cursor))
                    .map(|option| option.letter);
                if let Some(letter) = letter {
                    self.select(letter, now);
                }
            }
            KeyCode::Char(c) => {
                if let Some(letter) = OptionLetter::from_char(c) {
                    self.select(letter, now);
                }
            }
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                let rows = self.session.exam_detail_rows().len();
                if self.results_scroll + 1 < rows {
                    self.results_scroll += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.results_scroll = self.results_scroll.saturating_sub(1);
            }
            KeyCode::Char('i') => match self.session.start_exam_review() {
                Ok(()) => self.sync_cursor(),
                Err(SessionError::NothingToReview) => {
                    self.set_status(StatusLevel::Success, "No incorrect answers in this exam!")
                }
                Err(err) => self.report_error(err),
            },
            KeyCode::Char('n') => {
                if let Err(err) = self.session.new_exam(&mut self.rng) {
                    self.report_error(err);
                }
                self.results_scroll = 0;
                self.sync_cursor();
            }
            _ => {}
        }
    }

    fn handle_jump_input(&mut self, key: KeyCode) {
        let InputMode::Jump(buffer) = &mut self.input else {
            return;
        };

        match key {
            KeyCode::Char(c) if c.is_ascii_digit() && buffer.len() < MAX_JUMP_DIGITS => {
                buffer.push(c);
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Esc => self.input = InputMode::Normal,
            KeyCode::Enter => {
                let target = buffer.parse::<usize>().ok();
                self.input = InputMode::Normal;
                match target {
                    Some(position) => {
                        self.pending_advance = None;
                        match self.session.jump_to(position) {
                            Ok(()) => self.sync_cursor(),
                            Err(err) => self.report_error(err),
                        }
                    }
                    None => self.set_status(StatusLevel::Warning, "Enter a question number"),
                }
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let count = self.option_count();
        if count == 0 {
            return;
        }
        self.cursor = (self.cursor as isize + delta).rem_euclid(count as isize) as usize;
    }

    fn navigate(&mut self, step: fn(&mut Session) -> bool) {
        self.pending_advance = None;
        if step(&mut self.session) {
            self.sync_cursor();
        }
    }

    fn select(&mut self, letter: OptionLetter, now: Instant) {
        if self.pending_advance.is_some() {
            return;
        }

        let outcome = match self.session.select(letter) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.report_error(err);
                return;
            }
        };

        if let Some(position) = self
            .session
            .current_question()
            .and_then(|question| question.option_position(letter))
        {
            self.cursor = position;
        }

        if outcome.should_advance() {
            self.pending_advance = Some(now + self.advance_delay);
        }

        match outcome {
            AnswerOutcome::Practice {
                completed: true, ..
            } => self.set_status(
                StatusLevel::Success,
                "Congratulations, you have finished every question!",
            ),
            AnswerOutcome::Practice {
                correctness: Correctness::Unknown,
                ..
            } => {
                let number = self
                    .session
                    .current_question()
                    .map(|question| question.number.clone())
                    .unwrap_or_default();
                self.set_status(
                    StatusLevel::Warning,
                    format!("No answer key entry for question {number}; check the answers file"),
                );
            }
            AnswerOutcome::Exam { advance: false } => self.set_status(
                StatusLevel::Info,
                "Last question answered; press s to finish the exam",
            ),
            _ => {}
        }
    }

    fn start_practice_review(&mut self) {
        match self.session.start_practice_review() {
            Ok(()) => {
                self.pending_advance = None;
                self.sync_cursor();
                self.set_status(
                    StatusLevel::Info,
                    format!(
                        "Reviewing {} questions missed on the first attempt",
                        self.session.question_count()
                    ),
                );
            }
            Err(SessionError::NothingToReview) => self.set_status(
                StatusLevel::Success,
                "No questions were answered wrongly on the first attempt",
            ),
            Err(err) => self.report_error(err),
        }
    }

    fn submit_exam(&mut self) {
        if let Err(err) = self.session.submit_exam() {
            self.report_error(err);
            return;
        }
        self.pending_advance = None;
        self.results_scroll = 0;
        self.sync_cursor();
        self.export_results();
    }

    fn export_results(&mut self) {
        let Some(path) = self.export_path.clone() else {
            return;
        };
        let Some(report) = ExamReport::from_session(&self.session) else {
            return;
        };

        match write_exam_report(&path, &report) {
            Ok(()) => self.set_status(
                StatusLevel::Info,
                format!("Results saved to {}", path.display()),
            ),
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "failed to export results");
                self.set_status(
                    StatusLevel::Error,
                    format!("Could not save results to {}: {err}", path.display()),
                );
            }
        }
    }
}

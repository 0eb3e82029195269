//! Practice/exam session state.
//!
//! A [`Session`] owns the loaded [`QuestionBank`] and everything that changes
//! while the user works through it: the active question list, the current
//! position, recorded answers and exam results. Every user interaction maps
//! to one method here; rendering only reads.

use std::collections::HashMap;

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::Serialize;
use thiserror::Error;

use crate::data::QuestionBank;
use crate::models::{OptionLetter, Question};

/// Number of questions drawn for an exam unless configured otherwise.
pub const DEFAULT_EXAM_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Practice,
    Exam,
}

/// What the session is currently presenting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// All questions, immediate feedback.
    Practice,
    /// Only questions answered wrongly on the first practice attempt.
    PracticeReview,
    /// Sampled exam in progress.
    Exam,
    /// Score summary of a submitted exam.
    ExamResults,
    /// Read-only walk through the wrongly answered exam questions.
    ExamReview,
}

impl View {
    pub fn mode(self) -> Mode {
        match self {
            View::Practice | View::PracticeReview => Mode::Practice,
            View::Exam | View::ExamResults | View::ExamReview => Mode::Exam,
        }
    }
}

/// Result of comparing a selection against the answer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Correctness {
    Correct,
    Incorrect,
    /// The answer key has no entry for the question.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Practice {
        correctness: Correctness,
        /// Correct answer with more questions ahead.
        advance: bool,
        /// Correct answer on the last question of the list.
        completed: bool,
    },
    Exam {
        advance: bool,
    },
}

impl AnswerOutcome {
    pub fn should_advance(&self) -> bool {
        match *self {
            AnswerOutcome::Practice { advance, .. } | AnswerOutcome::Exam { advance } => advance,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("there are no questions to show")]
    NoQuestions,

    #[error("question {position} does not exist (1-{len})")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("option {letter} is not offered for this question")]
    NoSuchOption { letter: OptionLetter },

    #[error("question {number} was already answered in this exam")]
    AlreadyAnswered { number: String },

    #[error("answers cannot be changed after the exam is submitted")]
    AnswersLocked,

    #[error("the exam can be submitted from the last question or once every question is answered")]
    SubmitNotAllowed,

    #[error("this action is only available in {0:?} mode")]
    WrongView(View),

    #[error("there are no incorrect answers to review")]
    NothingToReview,
}

/// Score summary of a submitted exam.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamResults {
    pub correct: usize,
    pub incorrect: usize,
    pub unanswered: usize,
    pub total: usize,
    pub percentage: f64,
    /// Numbers of the questions answered wrongly, in exam order.
    pub incorrect_questions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamAnswerStatus {
    Correct,
    Incorrect,
    Unanswered,
}

/// One line of the per-question exam breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExamDetailRow {
    pub position: usize,
    pub number: String,
    pub chosen: Option<OptionLetter>,
    pub correct: Option<OptionLetter>,
    pub status: ExamAnswerStatus,
}

/// First practice attempt of one bank question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstAttemptRow {
    pub position: usize,
    pub number: String,
    pub status: Option<Correctness>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressKind {
    /// Exam in progress: answered out of sampled.
    Answered,
    /// Walking through wrong exam answers.
    Reviewing,
    /// Current position in the active list.
    Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub kind: ProgressKind,
    pub done: usize,
    pub total: usize,
}

impl Progress {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.done as f64 / self.total as f64).clamp(0.0, 1.0)
        }
    }
}

pub struct Session {
    bank: QuestionBank,
    exam_size: usize,
    view: View,
    /// Indices into the bank for the list being presented.
    active: Vec<usize>,
    index: usize,
    feedback: Option<Correctness>,
    practice_answers: HashMap<String, OptionLetter>,
    statuses: HashMap<String, Correctness>,
    first_attempt: HashMap<String, Correctness>,
    exam_sample: Vec<usize>,
    exam_answers: HashMap<String, OptionLetter>,
    exam_results: Option<ExamResults>,
    exam_incorrect: Vec<usize>,
}

impl Session {
    /// Start a practice session over the whole bank.
    pub fn new(bank: QuestionBank, exam_size: usize) -> Self {
        let active = (0..bank.len()).collect();
        Self {
            bank,
            exam_size,
            view: View::Practice,
            active,
            index: 0,
            feedback: None,
            practice_answers: HashMap::new(),
            statuses: HashMap::new(),
            first_attempt: HashMap::new(),
            exam_sample: Vec::new(),
            exam_answers: HashMap::new(),
            exam_results: None,
            exam_incorrect: Vec::new(),
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn mode(&self) -> Mode {
        self.view.mode()
    }

    pub fn exam_size(&self) -> usize {
        self.exam_size
    }

    /// Zero-based position in the active list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn question_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.active.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.active
            .get(self.index)
            .and_then(|&bank_index| self.bank.question(bank_index))
    }

    /// Questions of the active list, in presentation order.
    pub fn active_questions(&self) -> impl Iterator<Item = &Question> {
        self.active.iter().filter_map(|&i| self.bank.question(i))
    }

    pub fn feedback(&self) -> Option<Correctness> {
        self.feedback
    }

    pub fn correct_answer(&self, question: &Question) -> Option<OptionLetter> {
        self.bank.key().get(&question.number)
    }

    /// Previously chosen letter for the current question in the current mode.
    pub fn selected_letter(&self) -> Option<OptionLetter> {
        let question = self.current_question()?;
        match self.mode() {
            Mode::Practice => self.practice_answers.get(&question.number).copied(),
            Mode::Exam => self.exam_answers.get(&question.number).copied(),
        }
    }

    /// True when the current question no longer accepts a selection.
    pub fn is_locked(&self) -> bool {
        match self.view {
            View::Practice | View::PracticeReview => false,
            View::ExamResults | View::ExamReview => true,
            View::Exam => self
                .current_question()
                .is_some_and(|q| self.exam_answers.contains_key(&q.number)),
        }
    }

    fn set_index(&mut self, index: usize) -> bool {
        if index == self.index {
            return false;
        }
        self.index = index;
        self.feedback = None;
        true
    }

    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.set_index(self.index + 1)
    }

    pub fn previous(&mut self) -> bool {
        match self.index.checked_sub(1) {
            Some(index) => self.set_index(index),
            None => false,
        }
    }

    /// Move to a 1-based position within the active list.
    pub fn jump_to(&mut self, position: usize) -> Result<(), SessionError> {
        let len = self.active.len();
        if position == 0 || position > len {
            return Err(SessionError::PositionOutOfRange { position, len });
        }
        self.set_index(position - 1);
        Ok(())
    }

    /// Record `letter` as the answer to the current question.
    pub fn select(&mut self, letter: OptionLetter) -> Result<AnswerOutcome, SessionError> {
        let question = self.current_question().ok_or(SessionError::NoQuestions)?;
        if !question.has_option(letter) {
            return Err(SessionError::NoSuchOption { letter });
        }
        let number = question.number.clone();
        let correct = self.bank.key().get(&number);
        let is_last = self.is_last();

        match self.view {
            View::Practice | View::PracticeReview => {
                let correctness = match correct {
                    None => Correctness::Unknown,
                    Some(expected) if expected == letter => Correctness::Correct,
                    Some(_) => Correctness::Incorrect,
                };

                self.practice_answers.insert(number.clone(), letter);
                self.first_attempt.entry(number.clone()).or_insert(correctness);
                self.statuses.insert(number.clone(), correctness);
                self.feedback = Some(correctness);

                tracing::debug!(%number, %letter, ?correctness, "practice answer");

                let correct_pick = correctness == Correctness::Correct;
                Ok(AnswerOutcome::Practice {
                    correctness,
                    advance: correct_pick && !is_last,
                    completed: correct_pick && is_last,
                })
            }
            View::Exam => {
                if self.exam_answers.contains_key(&number) {
                    return Err(SessionError::AlreadyAnswered { number });
                }
                tracing::debug!(%number, %letter, "exam answer");
                self.exam_answers.insert(number, letter);
                Ok(AnswerOutcome::Exam { advance: !is_last })
            }
            View::ExamResults | View::ExamReview => Err(SessionError::AnswersLocked),
        }
    }

    /// Live practice tally as `(correct, incorrect)`.
    pub fn practice_counts(&self) -> (usize, usize) {
        self.statuses
            .values()
            .fold((0, 0), |(correct, incorrect), status| match status {
                Correctness::Correct => (correct + 1, incorrect),
                Correctness::Incorrect => (correct, incorrect + 1),
                Correctness::Unknown => (correct, incorrect),
            })
    }

    pub fn first_attempt(&self, number: &str) -> Option<Correctness> {
        self.first_attempt.get(number).copied()
    }

    pub fn first_attempt_rows(&self) -> Vec<FirstAttemptRow> {
        self.bank
            .questions()
            .iter()
            .enumerate()
            .map(|(i, question)| FirstAttemptRow {
                position: i + 1,
                number: question.number.clone(),
                status: self.first_attempt(&question.number),
            })
            .collect()
    }

    pub fn exam_answered(&self) -> usize {
        self.exam_sample
            .iter()
            .filter_map(|&i| self.bank.question(i))
            .filter(|q| self.exam_answers.contains_key(&q.number))
            .count()
    }

    pub fn exam_results(&self) -> Option<&ExamResults> {
        self.exam_results.as_ref()
    }

    pub fn progress(&self) -> Progress {
        let total = self.active.len();
        match self.view {
            View::Exam => Progress {
                kind: ProgressKind::Answered,
                done: self.exam_answered(),
                total,
            },
            View::ExamReview => Progress {
                kind: ProgressKind::Reviewing,
                done: self.index + 1,
                total,
            },
            _ => Progress {
                kind: ProgressKind::Position,
                done: if total == 0 { 0 } else { self.index + 1 },
                total,
            },
        }
    }

    /// Switch between practice and exam. Every real transition starts the
    /// target mode from a clean slate; switching to the current mode does
    /// nothing.
    pub fn switch_mode<R: Rng + ?Sized>(&mut self, mode: Mode, rng: &mut R) {
        if mode == self.mode() {
            return;
        }

        self.clear_exam();
        match mode {
            Mode::Exam => self.begin_exam(rng),
            Mode::Practice => {
                self.practice_answers.clear();
                self.statuses.clear();
                self.first_attempt.clear();
                self.show_all_questions();
            }
        }
        tracing::info!(?mode, questions = self.active.len(), "switched mode");
    }

    fn clear_exam(&mut self) {
        self.exam_sample.clear();
        self.exam_answers.clear();
        self.exam_results = None;
        self.exam_incorrect.clear();
    }

    fn begin_exam<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let size = self.exam_size.min(self.bank.len());
        let indices: Vec<usize> = (0..self.bank.len()).collect();
        let mut sample: Vec<usize> = indices.choose_multiple(rng, size).copied().collect();
        sample.shuffle(rng);

        self.exam_sample = sample.clone();
        self.active = sample;
        self.view = View::Exam;
        self.index = 0;
        self.feedback = None;
    }

    fn show_all_questions(&mut self) {
        self.active = (0..self.bank.len()).collect();
        self.view = View::Practice;
        self.index = 0;
        self.feedback = None;
    }

    pub fn can_submit_exam(&self) -> bool {
        self.view == View::Exam
            && !self.active.is_empty()
            && (self.is_last() || self.exam_answered() == self.exam_sample.len())
    }

    /// Score the exam and show the results.
    pub fn submit_exam(&mut self) -> Result<&ExamResults, SessionError> {
        if self.view != View::Exam {
            return Err(SessionError::WrongView(View::Exam));
        }
        if !self.can_submit_exam() {
            return Err(SessionError::SubmitNotAllowed);
        }

        let mut correct = 0;
        let mut unanswered = 0;
        let mut wrong = Vec::new();

        for &bank_index in &self.exam_sample {
            let Some(question) = self.bank.question(bank_index) else {
                continue;
            };
            match self.exam_answers.get(&question.number) {
                None => unanswered += 1,
                Some(&chosen) if self.bank.key().get(&question.number) == Some(chosen) => {
                    correct += 1
                }
                Some(_) => wrong.push(bank_index),
            }
        }

        let total = self.exam_sample.len();
        let percentage = if total > 0 {
            correct as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        let results = ExamResults {
            correct,
            incorrect: wrong.len(),
            unanswered,
            total,
            percentage,
            incorrect_questions: wrong
                .iter()
                .filter_map(|&i| self.bank.question(i))
                .map(|q| q.number.clone())
                .collect(),
        };

        tracing::info!(
            correct,
            incorrect = results.incorrect,
            unanswered,
            percentage,
            "exam submitted"
        );

        self.exam_incorrect = wrong;
        self.active = self.exam_sample.clone();
        self.view = View::ExamResults;
        self.index = 0;
        self.feedback = None;
        Ok(&*self.exam_results.insert(results))
    }

    /// Discard the current exam and draw a fresh sample.
    pub fn new_exam<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SessionError> {
        if self.mode() != Mode::Exam {
            return Err(SessionError::WrongView(View::Exam));
        }
        self.clear_exam();
        self.begin_exam(rng);
        tracing::info!(questions = self.active.len(), "started new exam");
        Ok(())
    }

    pub fn exam_detail_rows(&self) -> Vec<ExamDetailRow> {
        self.exam_sample
            .iter()
            .filter_map(|&i| self.bank.question(i))
            .enumerate()
            .map(|(i, question)| {
                let chosen = self.exam_answers.get(&question.number).copied();
                let correct = self.bank.key().get(&question.number);
                let status = match chosen {
                    None => ExamAnswerStatus::Unanswered,
                    Some(letter) if Some(letter) == correct => ExamAnswerStatus::Correct,
                    Some(_) => ExamAnswerStatus::Incorrect,
                };
                ExamDetailRow {
                    position: i + 1,
                    number: question.number.clone(),
                    chosen,
                    correct,
                    status,
                }
            })
            .collect()
    }

    pub fn has_exam_mistakes(&self) -> bool {
        !self.exam_incorrect.is_empty()
    }

    pub fn start_exam_review(&mut self) -> Result<(), SessionError> {
        if self.view != View::ExamResults {
            return Err(SessionError::WrongView(View::ExamResults));
        }
        if self.exam_incorrect.is_empty() {
            return Err(SessionError::NothingToReview);
        }
        self.active = self.exam_incorrect.clone();
        self.view = View::ExamReview;
        self.index = 0;
        self.feedback = None;
        Ok(())
    }

    pub fn back_to_exam_results(&mut self) -> Result<(), SessionError> {
        if self.view != View::ExamReview {
            return Err(SessionError::WrongView(View::ExamReview));
        }
        self.active = self.exam_sample.clone();
        self.view = View::ExamResults;
        self.index = 0;
        self.feedback = None;
        Ok(())
    }

    /// Restrict practice to questions whose first attempt was wrong.
    pub fn start_practice_review(&mut self) -> Result<(), SessionError> {
        if self.view != View::Practice {
            return Err(SessionError::WrongView(View::Practice));
        }
        let review: Vec<usize> = self
            .bank
            .questions()
            .iter()
            .enumerate()
            .filter(|(_, q)| self.first_attempt(&q.number) == Some(Correctness::Incorrect))
            .map(|(i, _)| i)
            .collect();

        if review.is_empty() {
            return Err(SessionError::NothingToReview);
        }

        tracing::info!(questions = review.len(), "reviewing first-attempt mistakes");
        self.active = review;
        self.view = View::PracticeReview;
        self.index = 0;
        self.feedback = None;
        Ok(())
    }

    pub fn exit_practice_review(&mut self) -> Result<(), SessionError> {
        if self.view != View::PracticeReview {
            return Err(SessionError::WrongView(View::PracticeReview));
        }
        self.show_all_questions();
        Ok(())
    }
}

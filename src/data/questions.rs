//! Parser for the question document.
//!
//! The layout is line oriented:
//!
//! ```text
//! TEST 1
//! 501.What is the minimum height
//! of a guard rail?
//! A. 80
//! B. 90
//! C. 100
//! D. 110
//! ```
//!
//! `TEST n` lines are section headers and carry no data. A numbered line
//! opens a question whose text may continue over the following lines until
//! the first option, the next question or a header.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{OptionLetter, Question, QuestionOption};

static QUESTION_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(.*)$").expect("question pattern is valid"));

static OPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)([A-D])\.\s*(.*)$").expect("option pattern is valid"));

static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^TEST\s*\d+$").expect("header pattern is valid"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Parse every question found in `text`.
///
/// Lines that fit none of the recognised shapes are skipped, as are option
/// lines that appear before the first question.
pub fn parse_questions(text: &str) -> Vec<Question> {
    let mut questions = Vec::new();
    let mut current: Option<Question> = None;
    let mut collecting_text = false;

    for line in normalized_lines(text) {
        if SECTION_HEADER.is_match(&line) {
            collecting_text = false;
            continue;
        }

        if let Some(caps) = QUESTION_START.captures(&line) {
            if let Some(done) = current.take() {
                questions.push(done);
            }
            current = Some(Question {
                number: caps[1].to_string(),
                text: caps[2].trim().to_string(),
                options: Vec::new(),
            });
            collecting_text = true;
            continue;
        }

        if let Some(caps) = OPTION_LINE.captures(&line) {
            collecting_text = false;
            if let Some(question) = current.as_mut() {
                // The pattern only admits A-D.
                if let Some(letter) = caps[1].chars().next().and_then(OptionLetter::from_char) {
                    question.options.push(QuestionOption {
                        letter,
                        text: caps[2].trim().to_string(),
                    });
                }
            } else {
                tracing::debug!(line = %line, "option line before first question");
            }
            continue;
        }

        match current.as_mut() {
            Some(question) if collecting_text => {
                if !question.text.is_empty() {
                    question.text.push(' ');
                }
                question.text.push_str(&line);
            }
            _ => tracing::debug!(line = %line, "skipping unrecognised line"),
        }
    }

    if let Some(done) = current {
        questions.push(done);
    }

    questions
}

/// Non-empty lines with a leading BOM removed and whitespace collapsed.
fn normalized_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines().filter_map(|raw| {
        let stripped = raw.trim_start_matches('\u{feff}').trim();
        if stripped.is_empty() {
            None
        } else {
            Some(WHITESPACE_RUN.replace_all(stripped, " ").into_owned())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\u{feff}TEST 1
501.What is the minimum height
of a   guard rail?
A. 80
B.90
c. 100
D. 110

502.Which sign means danger?
A. Red triangle
B. Blue circle
TEST2
503.Last question
A. yes
B. no
";

    #[test]
    fn parses_numbers_text_and_options() {
        let questions = parse_questions(SAMPLE);
        assert_eq!(questions.len(), 3);

        let first = &questions[0];
        assert_eq!(first.number, "501");
        assert_eq!(first.text, "What is the minimum height of a guard rail?");
        assert_eq!(first.options.len(), 4);
        assert_eq!(first.options[1].text, "90");
        assert_eq!(first.options[2].letter, OptionLetter::C);
        assert_eq!(first.options[2].to_string(), "C. 100");

        assert_eq!(questions[1].number, "502");
        assert_eq!(questions[1].options.len(), 2);
        assert_eq!(questions[2].number, "503");
        assert_eq!(questions[2].text, "Last question");
    }

    #[test]
    fn skips_stray_lines_and_orphan_options() {
        let text = "A. orphan option
Some preface
7.Question seven
A. one
trailing note after options
B. two
";
        let questions = parse_questions(text);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "Question seven");
        assert_eq!(questions[0].options.len(), 2);
    }

    #[test]
    fn header_ends_question_text() {
        let text = "1.First
TEST 3
not part of the question
A. x
";
        let questions = parse_questions(text);
        assert_eq!(questions[0].text, "First");
        assert_eq!(questions[0].options.len(), 1);
    }

    #[test]
    fn header_without_digits_is_question_text() {
        let questions = parse_questions("1.First\nTESTING things\n");
        assert_eq!(questions[0].text, "First TESTING things");
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_questions("").is_empty());
        assert!(parse_questions("\n  \n").is_empty());
    }
}

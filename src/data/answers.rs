//! Parser for the answer key document: one `NUMBER: LETTER` pair per line.

use crate::models::{AnswerKey, OptionLetter};

pub fn parse_answer_key(text: &str) -> AnswerKey {
    let mut key = AnswerKey::new();

    for (line_no, raw) in text.lines().enumerate() {
        let line = raw.trim().trim_start_matches('\u{feff}');
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split(':').collect();
        let [number, letter] = parts.as_slice() else {
            tracing::warn!(line = line_no + 1, content = %line, "skipping malformed answer line");
            continue;
        };

        let number = number.trim();
        let Some(letter) = OptionLetter::parse(letter) else {
            tracing::warn!(line = line_no + 1, number, "answer letter outside A-D");
            continue;
        };

        if !key.insert(number, letter) {
            tracing::warn!(line = line_no + 1, number, "duplicate answer, keeping the first");
        }
    }

    key
}

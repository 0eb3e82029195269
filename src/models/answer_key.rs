use std::collections::HashMap;

use super::OptionLetter;

/// Correct option letter for each question number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerKey {
    answers: HashMap<String, OptionLetter>,
}

impl AnswerKey {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the answer for `number`. Returns `false` if the number was
    /// already present; the first entry is kept.
    pub fn insert(&mut self, number: &str, letter: OptionLetter) -> bool {
        let number = number.trim();
        if self.answers.contains_key(number) {
            return false;
        }
        self.answers.insert(number.to_string(), letter);
        true
    }

    pub fn get(&self, number: &str) -> Option<OptionLetter> {
        self.answers.get(number.trim()).copied()
    }

    pub fn contains(&self, number: &str) -> bool {
        self.answers.contains_key(number.trim())
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn numbers(&self) -> impl Iterator<Item = &str> {
        self.answers.keys().map(String::as_str)
    }
}

impl FromIterator<(String, OptionLetter)> for AnswerKey {
    fn from_iter<I: IntoIterator<Item = (String, OptionLetter)>>(iter: I) -> Self {
        let mut key = AnswerKey::new();
        for (number, letter) in iter {
            key.insert(&number, letter);
        }
        key
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label of a multiple-choice option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    pub const ALL: [OptionLetter; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Parse a single letter, ignoring case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            _ => None,
        }
    }

    /// Parse a letter as it appears in an answer key: surrounding whitespace
    /// and a byte-order mark are ignored, case is ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let cleaned = raw.trim().trim_start_matches('\u{feff}').trim();
        let mut chars = cleaned.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One answer choice of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub letter: OptionLetter,
    pub text: String,
}

impl fmt::Display for QuestionOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}.", self.letter)
        } else {
            write!(f, "{}. {}", self.letter, self.text)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier shared with the answer key, e.g. `"501"`.
    pub number: String,
    pub text: String,
    pub options: Vec<QuestionOption>,
}

impl Question {
    pub fn has_option(&self, letter: OptionLetter) -> bool {
        self.options.iter().any(|option| option.letter == letter)
    }

    /// Position of the option labelled `letter`, if present.
    pub fn option_position(&self, letter: OptionLetter) -> Option<usize> {
        self.options.iter().position(|option| option.letter == letter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_letters_case_insensitively() {
        assert_eq!(OptionLetter::parse(" b "), Some(OptionLetter::B));
        assert_eq!(OptionLetter::parse("\u{feff}D"), Some(OptionLetter::D));
        assert_eq!(OptionLetter::parse("e"), None);
        assert_eq!(OptionLetter::parse("ab"), None);
        assert_eq!(OptionLetter::parse(""), None);
    }

    #[test]
    fn option_displays_like_source_line() {
        let option = QuestionOption {
            letter: OptionLetter::C,
            text: "80".to_string(),
        };
        assert_eq!(option.to_string(), "C. 80");
    }
}

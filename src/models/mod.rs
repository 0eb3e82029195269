mod answer_key;
mod question;

pub use answer_key::AnswerKey;
pub use question::{OptionLetter, Question, QuestionOption};

//! Loading questions and the answer key from their source documents.

mod answers;
mod docx;
mod loader;
mod questions;

pub use answers::parse_answer_key;
pub use docx::{DocxError, docx_paragraphs, docx_text};
pub use loader::{LoadError, QuestionBank, load_answer_key, load_questions};
pub use questions::parse_questions;

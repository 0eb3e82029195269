use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::{DocxError, docx_text, parse_answer_key, parse_questions};
use crate::models::{AnswerKey, Question};

/// Failure to produce a usable question bank from the input documents.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to extract text from {}: {source}", path.display())]
    Docx {
        path: PathBuf,
        #[source]
        source: DocxError,
    },

    #[error("no questions could be parsed from {}; check the file format", path.display())]
    NoQuestions { path: PathBuf },

    #[error("no answers could be parsed from {}; check the file format", path.display())]
    NoAnswers { path: PathBuf },
}

fn io_error(path: &Path, source: io::Error) -> LoadError {
    match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    }
}

fn is_docx(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"))
}

/// Text of a document: plain UTF-8, or the paragraphs of a `.docx` file
/// one per line.
fn read_document(path: &Path) -> Result<String, LoadError> {
    if !is_docx(path) {
        return fs::read_to_string(path).map_err(|source| io_error(path, source));
    }

    let bytes = fs::read(path).map_err(|source| io_error(path, source))?;
    docx_text(&bytes).map_err(|source| LoadError::Docx {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_questions<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let path = path.as_ref();
    let questions = parse_questions(&read_document(path)?);

    if questions.is_empty() {
        return Err(LoadError::NoQuestions {
            path: path.to_path_buf(),
        });
    }

    tracing::info!(path = %path.display(), count = questions.len(), "loaded questions");
    Ok(questions)
}

pub fn load_answer_key<P: AsRef<Path>>(path: P) -> Result<AnswerKey, LoadError> {
    let path = path.as_ref();
    let key = parse_answer_key(&read_document(path)?);

    if key.is_empty() {
        return Err(LoadError::NoAnswers {
            path: path.to_path_buf(),
        });
    }

    tracing::info!(path = %path.display(), count = key.len(), "loaded answer key");
    Ok(key)
}

/// Questions and their answer key, loaded once and shared by the session.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    key: AnswerKey,
}

impl QuestionBank {
    /// Build a bank from already parsed parts. Later duplicates of a question
    /// number are dropped so numbers stay unique.
    pub fn new(questions: Vec<Question>, key: AnswerKey) -> Self {
        let mut unique: Vec<Question> = Vec::with_capacity(questions.len());
        for question in questions {
            if unique.iter().any(|q| q.number == question.number) {
                tracing::warn!(number = %question.number, "duplicate question number, keeping the first");
                continue;
            }
            if !key.contains(&question.number) {
                tracing::warn!(number = %question.number, "question has no answer key entry");
            }
            unique.push(question);
        }

        for number in key.numbers() {
            if !unique.iter().any(|q| q.number == number) {
                tracing::warn!(number, "answer key entry matches no question");
            }
        }

        Self {
            questions: unique,
            key,
        }
    }

    pub fn load<Q: AsRef<Path>, A: AsRef<Path>>(
        questions_path: Q,
        answers_path: A,
    ) -> Result<Self, LoadError> {
        let questions = load_questions(questions_path)?;
        let key = load_answer_key(answers_path)?;
        Ok(Self::new(questions, key))
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn key(&self) -> &AnswerKey {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OptionLetter;

    fn question(number: &str) -> Question {
        Question {
            number: number.to_string(),
            text: format!("Question {number}"),
            options: Vec::new(),
        }
    }

    #[test]
    fn duplicate_numbers_keep_first() {
        let mut first = question("1");
        first.text = "first".to_string();
        let key: AnswerKey = [("1".to_string(), OptionLetter::A)].into_iter().collect();

        let bank = QuestionBank::new(vec![first, question("1"), question("2")], key);
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.questions()[0].text, "first");
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_questions("definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));

        let err = load_questions("definitely/not/here.docx").unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[test]
    fn docx_is_recognised_by_extension() {
        assert!(is_docx(Path::new("sorular.docx")));
        assert!(is_docx(Path::new("bank/QUESTIONS.DOCX")));
        assert!(!is_docx(Path::new("questions.txt")));
        assert!(!is_docx(Path::new("docx")));
    }
}

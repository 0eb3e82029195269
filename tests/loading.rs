use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use crossterm::event::KeyCode;
use quiz_runner::{
    App, LoadError, Mode, OptionLetter, QuestionBank, Quiz, QuizError, Session, Settings, View,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

const QUESTIONS: &str = "TEST 1
501.Which class of fire involves
flammable liquids?
A. Class A
B. Class B
C. Class C
D. Class D
502.What colour are mandatory signs?
A. Red
B. Yellow
C. Blue
D. Green
TEST 2
503.How often must fire extinguishers be inspected?
A. Weekly
B. Monthly
C. Yearly
D. Never
";

const ANSWERS: &str = "501: B
502: c
503:B
999: A
";

fn write_fixture(dir: &Path, questions: &str, answers: &str) -> Settings {
    let questions_path = dir.join("questions.txt");
    let answers_path = dir.join("answers.txt");
    fs::write(&questions_path, questions).unwrap();
    fs::write(&answers_path, answers).unwrap();
    Settings {
        questions: questions_path,
        answers: answers_path,
        exam_size: 2,
        log_file: dir.join("quiz.log"),
        ..Settings::default()
    }
}

#[test]
fn loads_bank_from_documents() {
    let dir = TempDir::new().unwrap();
    let settings = write_fixture(dir.path(), QUESTIONS, ANSWERS);

    let bank = QuestionBank::load(&settings.questions, &settings.answers).unwrap();
    assert_eq!(bank.len(), 3);
    assert_eq!(
        bank.questions()[0].text,
        "Which class of fire involves flammable liquids?"
    );
    assert_eq!(bank.key().get("502"), Some(OptionLetter::C));
    assert_eq!(bank.key().len(), 4);
}

#[test]
fn missing_questions_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let mut settings = write_fixture(dir.path(), QUESTIONS, ANSWERS);
    settings.questions = dir.path().join("absent.txt");

    let err = Quiz::load(&settings).err().unwrap();
    assert!(matches!(err, QuizError::Load(LoadError::NotFound { .. })));
    assert!(err.to_string().contains("absent.txt"));
}

#[test]
fn unparseable_documents_are_rejected() {
    let dir = TempDir::new().unwrap();
    let settings = write_fixture(dir.path(), "no numbered lines here\n", ANSWERS);
    assert!(matches!(
        QuestionBank::load(&settings.questions, &settings.answers),
        Err(LoadError::NoQuestions { .. })
    ));

    let settings = write_fixture(dir.path(), QUESTIONS, "501 B\n\n");
    assert!(matches!(
        QuestionBank::load(&settings.questions, &settings.answers),
        Err(LoadError::NoAnswers { .. })
    ));
}

#[test]
fn practice_session_over_loaded_bank() {
    let dir = TempDir::new().unwrap();
    let settings = write_fixture(dir.path(), QUESTIONS, ANSWERS);
    let bank = QuestionBank::load(&settings.questions, &settings.answers).unwrap();
    let mut session = Session::new(bank, settings.exam_size);

    session.select(OptionLetter::A).unwrap();
    session.next();
    session.select(OptionLetter::C).unwrap();
    assert_eq!(session.practice_counts(), (1, 1));

    session.start_practice_review().unwrap();
    assert_eq!(session.current_question().unwrap().number, "501");

    let mut rng = StdRng::seed_from_u64(3);
    session.switch_mode(Mode::Exam, &mut rng);
    assert_eq!(session.question_count(), 2);
}

#[test]
fn submitted_exam_is_exported_as_json() {
    let dir = TempDir::new().unwrap();
    let export = dir.path().join("results.json");
    let mut settings = write_fixture(dir.path(), QUESTIONS, ANSWERS);
    settings.export_results = Some(export.clone());

    let bank = QuestionBank::load(&settings.questions, &settings.answers).unwrap();
    let mut app = App::with_rng(bank, &settings, StdRng::seed_from_u64(5));

    app.handle_key(KeyCode::Char('m'));
    app.handle_key(KeyCode::Char('a'));
    app.handle_key(KeyCode::Char('l'));
    app.handle_key(KeyCode::Char('s'));
    assert_eq!(app.session().view(), View::ExamResults);

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&export).unwrap()).unwrap();
    assert_eq!(json["results"]["total"], 2);
    assert_eq!(json["results"]["unanswered"], 1);
    assert_eq!(json["answers"].as_array().unwrap().len(), 2);
    assert_eq!(json["answers"][0]["chosen"], "A");
}

/// Minimal Word document with one paragraph per entry of `paragraphs`.
fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{p}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

#[test]
fn loads_questions_from_word_document() {
    let dir = TempDir::new().unwrap();
    let settings = write_fixture(dir.path(), QUESTIONS, ANSWERS);
    let docx_path = dir.path().join("questions.docx");
    let paragraphs: Vec<&str> = QUESTIONS.lines().collect();
    fs::write(&docx_path, docx_bytes(&paragraphs)).unwrap();

    let bank = QuestionBank::load(&docx_path, &settings.answers).unwrap();
    assert_eq!(bank.len(), 3);
    assert_eq!(
        bank.questions()[0].text,
        "Which class of fire involves flammable liquids?"
    );
    assert_eq!(bank.questions()[2].options.len(), 4);
}

#[test]
fn corrupt_word_document_is_reported() {
    let dir = TempDir::new().unwrap();
    let settings = write_fixture(dir.path(), QUESTIONS, ANSWERS);
    let docx_path = dir.path().join("questions.docx");
    fs::write(&docx_path, QUESTIONS).unwrap();

    let err = QuestionBank::load(&docx_path, &settings.answers).unwrap_err();
    assert!(matches!(err, LoadError::Docx { .. }));
    assert!(err.to_string().contains("questions.docx"));
}

//! Runtime settings: command-line flags layered over an optional TOML file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use crate::session::DEFAULT_EXAM_SIZE;

pub const DEFAULT_CONFIG_PATH: &str = "quiz.toml";
pub const DEFAULT_QUESTIONS_PATH: &str = "questions.txt";
pub const DEFAULT_ANSWERS_PATH: &str = "answers.txt";
pub const DEFAULT_LOG_PATH: &str = "quiz.log";
pub const DEFAULT_ADVANCE_DELAY_MS: u64 = 1000;

#[derive(Parser, Debug, Default)]
#[command(version, about = "Practice and exam runner for multiple-choice question sets", long_about = None)]
pub struct CliArgs {
    /// Text document with the questions
    #[arg(short, long)]
    pub questions: Option<PathBuf>,

    /// Answer key with one `NUMBER: LETTER` pair per line
    #[arg(short, long)]
    pub answers: Option<PathBuf>,

    /// TOML settings file (defaults to ./quiz.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of questions drawn for an exam
    #[arg(long)]
    pub exam_size: Option<usize>,

    /// Pause before moving on after an accepted answer, in milliseconds
    #[arg(long)]
    pub advance_delay_ms: Option<u64>,

    /// File receiving log output
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Write each submitted exam's results to this JSON file
    #[arg(long)]
    pub export_results: Option<PathBuf>,
}

/// Contents of the settings file. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub questions: Option<PathBuf>,
    pub answers: Option<PathBuf>,
    pub exam_size: Option<usize>,
    pub advance_delay_ms: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub export_results: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("exam size must be at least 1")]
    InvalidExamSize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub questions: PathBuf,
    pub answers: PathBuf,
    pub exam_size: usize,
    pub advance_delay: Duration,
    pub log_file: PathBuf,
    pub export_results: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            questions: PathBuf::from(DEFAULT_QUESTIONS_PATH),
            answers: PathBuf::from(DEFAULT_ANSWERS_PATH),
            exam_size: DEFAULT_EXAM_SIZE,
            advance_delay: Duration::from_millis(DEFAULT_ADVANCE_DELAY_MS),
            log_file: PathBuf::from(DEFAULT_LOG_PATH),
            export_results: None,
        }
    }
}

impl FileSettings {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }
}

impl Settings {
    /// Resolve settings from the command line. An explicitly named config
    /// file must exist; the default one is only read when present.
    pub fn resolve(args: &CliArgs) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => FileSettings::load(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    FileSettings::load(default_path)?
                } else {
                    FileSettings::default()
                }
            }
        };
        Self::merge(args, file)
    }

    /// Flags override file values, file values override defaults.
    pub fn merge(args: &CliArgs, file: FileSettings) -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        let exam_size = args
            .exam_size
            .or(file.exam_size)
            .unwrap_or(defaults.exam_size);
        if exam_size == 0 {
            return Err(ConfigError::InvalidExamSize);
        }

        let advance_delay = args
            .advance_delay_ms
            .or(file.advance_delay_ms)
            .map(Duration::from_millis)
            .unwrap_or(defaults.advance_delay);

        Ok(Self {
            questions: args
                .questions
                .clone()
                .or(file.questions)
                .unwrap_or(defaults.questions),
            answers: args
                .answers
                .clone()
                .or(file.answers)
                .unwrap_or(defaults.answers),
            exam_size,
            advance_delay,
            log_file: args
                .log_file
                .clone()
                .or(file.log_file)
                .unwrap_or(defaults.log_file),
            export_results: args.export_results.clone().or(file.export_results),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_flags_or_file() {
        let settings = Settings::merge(&CliArgs::default(), FileSettings::default()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.exam_size, 20);
        assert_eq!(settings.advance_delay, Duration::from_secs(1));
    }

    #[test]
    fn flags_override_file_values() {
        let file = FileSettings::from_toml(
            r#"
questions = "bank/questions.txt"
answers = "bank/answers.txt"
exam_size = 10
advance_delay_ms = 250
"#,
            Path::new("quiz.toml"),
        )
        .unwrap();
        let args =
            CliArgs::try_parse_from(["quiz-runner", "--exam-size", "5", "-q", "other.txt"]).unwrap();

        let settings = Settings::merge(&args, file).unwrap();
        assert_eq!(settings.questions, PathBuf::from("other.txt"));
        assert_eq!(settings.answers, PathBuf::from("bank/answers.txt"));
        assert_eq!(settings.exam_size, 5);
        assert_eq!(settings.advance_delay, Duration::from_millis(250));
    }

    #[test]
    fn rejects_zero_exam_size() {
        let args = CliArgs::try_parse_from(["quiz-runner", "--exam-size", "0"]).unwrap();
        let err = Settings::merge(&args, FileSettings::default()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidExamSize));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = FileSettings::from_toml("exam_sise = 3", Path::new("quiz.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let args = CliArgs {
            config: Some(PathBuf::from("no/such/quiz.toml")),
            ..CliArgs::default()
        };
        assert!(matches!(
            Settings::resolve(&args),
            Err(ConfigError::Read { .. })
        ));
    }
}

//! JSON export of submitted exams.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::session::{ExamDetailRow, ExamResults, Session};

#[derive(Debug, Serialize)]
pub struct ExamReport<'a> {
    pub results: &'a ExamResults,
    pub answers: Vec<ExamDetailRow>,
}

impl<'a> ExamReport<'a> {
    /// Report for the last submitted exam, if any.
    pub fn from_session(session: &'a Session) -> Option<Self> {
        let results = session.exam_results()?;
        Some(Self {
            results,
            answers: session.exam_detail_rows(),
        })
    }
}

pub fn write_exam_report(path: &Path, report: &ExamReport<'_>) -> io::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    tracing::info!(path = %path.display(), "exported exam results");
    Ok(())
}

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::session::{Correctness, ExamAnswerStatus, Session, View};

/// Fixed statistics on top, then a per-question list scrolled so that
/// `focus` stays in view.
struct SidebarContent {
    summary: Vec<Line<'static>>,
    rows: Vec<Line<'static>>,
    focus: Option<usize>,
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let content = match session.view() {
        View::Practice | View::PracticeReview => practice_content(session),
        View::Exam => SidebarContent {
            summary: vec![Line::from(format!(
                "Answered: {}/{}",
                session.exam_answered(),
                session.question_count()
            ))],
            rows: Vec::new(),
            focus: None,
        },
        View::ExamResults => exam_result_content(session, Some(app.results_scroll())),
        View::ExamReview => {
            let number = session.current_question().map(|q| q.number.clone());
            let focus = session
                .exam_detail_rows()
                .iter()
                .position(|row| Some(&row.number) == number.as_ref());
            exam_result_content(session, focus)
        }
    };
    let mut summary = vec![Line::from("STATISTICS".cyan().bold()), Line::from("")];
    summary.extend(content.summary);

    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Color::DarkGray)
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(summary.len() as u16),
        Constraint::Fill(1),
    ])
    .split(inner);

    let height = chunks[1].height as usize;
    let offset = scroll_offset(content.focus, content.rows.len(), height);

    frame.render_widget(Paragraph::new(summary), chunks[0]);
    frame.render_widget(
        Paragraph::new(content.rows).scroll((offset as u16, 0)),
        chunks[1],
    );
}

/// First row to show so that `focus` sits mid-window, never scrolling past
/// the end of the list.
fn scroll_offset(focus: Option<usize>, len: usize, height: usize) -> usize {
    let Some(focus) = focus else {
        return 0;
    };
    if height == 0 || len <= height {
        return 0;
    }
    focus.saturating_sub(height / 2).min(len - height)
}

fn practice_content(session: &Session) -> SidebarContent {
    let (correct, incorrect) = session.practice_counts();
    let summary = vec![
        Line::from(format!("Correct (live):   {correct}").green()),
        Line::from(format!("Incorrect (live): {incorrect}").yellow()),
        Line::from(""),
        Line::from("FIRST ATTEMPTS".cyan().bold()),
    ];

    let current = session.current_question().map(|q| q.number.as_str());
    let attempts = session.first_attempt_rows();
    let focus = attempts
        .iter()
        .position(|row| Some(row.number.as_str()) == current);

    let rows = attempts
        .iter()
        .map(|row| {
            let symbol = match row.status {
                Some(Correctness::Correct) => "✅".to_string().green(),
                Some(Correctness::Incorrect) => "❌".to_string().red(),
                Some(Correctness::Unknown) | None => "⚪".to_string().dark_gray(),
            };
            let label = format!("{:>3}. ({}) ", row.position, row.number);
            let label = if Some(row.number.as_str()) == current {
                label.cyan().bold()
            } else {
                Span::raw(label)
            };
            Line::from(vec![label, symbol])
        })
        .collect();

    SidebarContent {
        summary,
        rows,
        focus,
    }
}

fn exam_result_content(session: &Session, focus: Option<usize>) -> SidebarContent {
    let mut summary = Vec::new();
    if let Some(results) = session.exam_results() {
        summary.push(Line::from(format!("Correct:   {}", results.correct).green()));
        summary.push(Line::from(format!("Incorrect: {}", results.incorrect).yellow()));
        summary.push(Line::from(format!("Blank:     {}", results.unanswered).red()));
        summary.push(Line::from(""));
    }

    if !session.has_exam_mistakes() {
        summary.push(Line::from("No incorrect answers in this exam!".green()));
        summary.push(Line::from(""));
    }

    summary.push(Line::from("YOUR ANSWERS".cyan().bold()));

    let rows = session
        .exam_detail_rows()
        .into_iter()
        .map(|row| {
            let chosen = row.chosen.map_or_else(|| "blank".to_string(), |l| l.to_string());
            let correct = row.correct.map_or_else(|| "none".to_string(), |l| l.to_string());
            let symbol = match row.status {
                ExamAnswerStatus::Correct => "✅",
                ExamAnswerStatus::Incorrect => "❌",
                ExamAnswerStatus::Unanswered => "❓",
            };
            Line::from(format!(
                "{:>2}. ({}) {} | {} {}",
                row.position, row.number, chosen, correct, symbol
            ))
        })
        .collect();

    SidebarContent {
        summary,
        rows,
        focus,
    }
}

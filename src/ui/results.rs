use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::session::{ExamAnswerStatus, ExamDetailRow, ExamResults};

const QUESTION_PREVIEW_LENGTH: usize = 48;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(results) = app.session().exam_results() else {
        return;
    };

    let chunks = Layout::vertical([Constraint::Length(8), Constraint::Fill(1)])
        .margin(1)
        .split(area);

    render_score_summary(frame, chunks[0], results);
    render_question_breakdown(frame, chunks[1], app);
}

fn get_grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, results: &ExamResults) {
    let grade_color = get_grade_color(results.percentage);
    let content = vec![
        Line::from(Span::styled(
            "EXAM RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{:.2}%", results.percentage),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("Correct {}", results.correct), Style::default().fg(Color::Green)),
            Span::raw("   "),
            Span::styled(format!("Incorrect {}", results.incorrect), Style::default().fg(Color::Red)),
            Span::raw("   "),
            Span::styled(
                format!("Blank {}", results.unanswered),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw("   "),
            Span::styled(format!("of {}", results.total), Style::default().fg(Color::Gray)),
        ]),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn status_symbol(status: ExamAnswerStatus) -> (&'static str, Color) {
    match status {
        ExamAnswerStatus::Correct => ("+", Color::Green),
        ExamAnswerStatus::Incorrect => ("-", Color::Red),
        ExamAnswerStatus::Unanswered => ("?", Color::DarkGray),
    }
}

fn breakdown_line(row: &ExamDetailRow, text: &str) -> Line<'static> {
    let (symbol, color) = status_symbol(row.status);
    let chosen = row.chosen.map_or_else(|| "-".to_string(), |l| l.to_string());
    let correct = row.correct.map_or_else(|| "?".to_string(), |l| l.to_string());

    Line::from(vec![
        Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
        Span::styled(
            format!("{:2}. ({}) ", row.position, row.number),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{} / {}  ", chosen, correct),
            Style::default().fg(color).bold(),
        ),
        Span::styled(truncate_question(text), Style::default().fg(Color::Gray)),
    ])
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let lines: Vec<Line> = session
        .exam_detail_rows()
        .iter()
        .zip(session.active_questions())
        .map(|(row, question)| breakdown_line(row, &question.text))
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" chosen / correct ")
                .padding(Padding::horizontal(1)),
        )
        .scroll((app.results_scroll() as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_questions_are_truncated() {
        let text = "x".repeat(QUESTION_PREVIEW_LENGTH + 5);
        let preview = truncate_question(&text);
        assert_eq!(preview.chars().count(), QUESTION_PREVIEW_LENGTH + 3);
        assert!(preview.ends_with("..."));
        assert_eq!(truncate_question("short"), "short");
    }

    #[test]
    fn grade_colors_follow_percentage() {
        assert_eq!(get_grade_color(95.0), Color::Green);
        assert_eq!(get_grade_color(75.0), Color::Cyan);
        assert_eq!(get_grade_color(50.0), Color::Yellow);
        assert_eq!(get_grade_color(10.0), Color::Red);
    }
}

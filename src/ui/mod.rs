mod question;
mod results;
mod sidebar;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, InputMode, StatusLevel};
use crate::session::View;

const SIDEBAR_WIDTH: u16 = 36;
const TITLE: &str = "QUIZ RUNNER";

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let rows = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_header(frame, rows[0], app);

    let columns =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(SIDEBAR_WIDTH)]).split(rows[1]);

    match app.session().view() {
        View::ExamResults => results::render(frame, columns[0], app),
        _ => question::render(frame, columns[0], app),
    }
    sidebar::render(frame, columns[1], app);

    render_status(frame, rows[2], app);
    render_controls(frame, rows[3], app);
}

fn view_label(view: View) -> &'static str {
    match view {
        View::Practice => "Practice",
        View::PracticeReview => "Practice · first-attempt mistakes",
        View::Exam => "Exam",
        View::ExamResults => "Exam results",
        View::ExamReview => "Exam · reviewing incorrect answers",
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled(format!(" {TITLE} "), Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!(" {}", view_label(app.session().view())),
            Style::default().fg(Color::Gray),
        ),
    ]);
    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let Some(status) = app.status() else {
        return;
    };
    let color = match status.level {
        StatusLevel::Info => Color::Cyan,
        StatusLevel::Success => Color::Green,
        StatusLevel::Warning => Color::Yellow,
        StatusLevel::Error => Color::Red,
    };
    let widget = Paragraph::new(status.text.as_str())
        .alignment(Alignment::Center)
        .fg(color);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let hints = if let InputMode::Jump(_) = app.input() {
        "digits question number  ·  enter jump  ·  esc cancel"
    } else {
        match app.session().view() {
            View::Practice => {
                "j/k choose  ·  enter/a-d answer  ·  h/l prev/next  ·  g jump  ·  r review mistakes  ·  m exam  ·  q quit"
            }
            View::PracticeReview => {
                "j/k choose  ·  enter/a-d answer  ·  h/l prev/next  ·  g jump  ·  r all questions  ·  m exam  ·  q quit"
            }
            View::Exam => {
                "j/k choose  ·  enter/a-d answer  ·  h/l prev/next  ·  g jump  ·  s submit  ·  m practice  ·  q quit"
            }
            View::ExamResults => {
                "j/k scroll  ·  i review incorrect  ·  n new exam  ·  m practice  ·  q quit"
            }
            View::ExamReview => "h/l prev/next  ·  g jump  ·  b back to results  ·  m practice  ·  q quit",
        }
    };
    let widget = Paragraph::new(hints)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

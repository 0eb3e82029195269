use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::{App, InputMode};
use crate::models::{OptionLetter, Question};
use crate::session::{Correctness, ProgressKind, Session, View};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let Some(question) = session.current_question() else {
        let widget = Paragraph::new("There are no questions to show.")
            .alignment(Alignment::Center)
            .fg(Color::DarkGray);
        frame.render_widget(widget, area);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_heading(frame, chunks[0], session, question);
    render_question_text(frame, chunks[1], &question.text, session.view());
    render_options(frame, chunks[2], app, question);
    render_answer_info(frame, chunks[3], session, question);
    render_jump_input(frame, chunks[4], app);
    render_progress(frame, chunks[5], session);
}

fn render_heading(frame: &mut Frame, area: Rect, session: &Session, question: &Question) {
    let heading = format!(
        "{}. Question  (No. {})",
        session.index() + 1,
        question.number
    );
    let widget = Paragraph::new(heading).fg(Color::Cyan).bold();
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str, view: View) {
    let color = if view == View::ExamReview {
        Color::Yellow
    } else {
        Color::White
    };
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(color)
        .bold();
    frame.render_widget(widget, area);
}

/// Colour of an option given what is known about it in the current view.
fn option_style(session: &Session, question: &Question, letter: OptionLetter, cursor: bool) -> Style {
    let chosen = session.selected_letter() == Some(letter);
    let correct = session.correct_answer(question) == Some(letter);

    let color = match session.view() {
        View::ExamReview if correct => Color::Green,
        View::ExamReview if chosen => Color::Red,
        View::Practice | View::PracticeReview if chosen => match session.feedback() {
            Some(Correctness::Correct) => Color::Green,
            Some(Correctness::Incorrect) => Color::Red,
            Some(Correctness::Unknown) => Color::Yellow,
            None => Color::Blue,
        },
        View::Exam if chosen => Color::Blue,
        _ if cursor => Color::Cyan,
        _ => Color::Gray,
    };

    let style = Style::default().fg(color);
    if cursor || chosen { style.bold() } else { style }
}

fn render_options(frame: &mut Frame, area: Rect, app: &App, question: &Question) {
    let session = app.session();
    let locked = session.is_locked();
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let is_cursor = index == app.cursor() && !locked;
        let style = option_style(session, question, option.letter, is_cursor);
        let marker = if is_cursor { ">" } else { " " };
        let bullet = if session.selected_letter() == Some(option.letter) {
            "●"
        } else {
            "○"
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} {} ", marker, bullet), style),
            Span::styled(option.to_string(), style),
        ]));
        lines.push(Line::from(""));
    }

    let border_color = if locked { Color::DarkGray } else { Color::Gray };
    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(border_color)
            .padding(Padding::top(1)),
    );
    frame.render_widget(widget, area);
}

fn letter_or(letter: Option<OptionLetter>, fallback: &str) -> String {
    letter.map_or_else(|| fallback.to_string(), |l| l.to_string())
}

fn render_answer_info(frame: &mut Frame, area: Rect, session: &Session, question: &Question) {
    let lines: Vec<Line> = match session.view() {
        View::Practice | View::PracticeReview => match session.feedback() {
            Some(Correctness::Correct) => vec![Line::from("✅ Correct!".green().bold())],
            Some(Correctness::Incorrect) => vec![Line::from("❌ Wrong answer!".red().bold())],
            Some(Correctness::Unknown) => vec![Line::from(
                format!("No correct answer found for question {}.", question.number).yellow(),
            )],
            None => Vec::new(),
        },
        View::Exam => {
            let mut lines = Vec::new();
            if session.is_locked() {
                lines.push(Line::from("Answer recorded.".fg(Color::DarkGray)));
            }
            if session.can_submit_exam() {
                lines.push(Line::from("Press s to finish the exam.".cyan().bold()));
            }
            lines
        }
        View::ExamReview => {
            let chosen = session.selected_letter();
            let correct = session.correct_answer(question);
            vec![
                Line::from(vec![
                    Span::raw("Your answer: "),
                    Span::styled(letter_or(chosen, "blank"), Style::default().fg(Color::Red).bold()),
                    Span::raw(if chosen != correct { "  ❌" } else { "" }),
                ]),
                Line::from(vec![
                    Span::raw("Correct answer: "),
                    Span::styled(
                        letter_or(correct, "none"),
                        Style::default().fg(Color::Green).bold(),
                    ),
                    Span::raw("  ✅"),
                ]),
            ]
        }
        View::ExamResults => Vec::new(),
    };

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_jump_input(frame: &mut Frame, area: Rect, app: &App) {
    let InputMode::Jump(buffer) = app.input() else {
        return;
    };
    let line = Line::from(vec![
        Span::styled("Go to question: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{buffer}_"),
            Style::default().fg(Color::Cyan).bold(),
        ),
        Span::styled(
            format!("  (1-{})", app.session().question_count()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_progress(frame: &mut Frame, area: Rect, session: &Session) {
    let progress = session.progress();
    let label = match progress.kind {
        ProgressKind::Answered => format!("Answered {}/{}", progress.done, progress.total),
        ProgressKind::Reviewing => format!("Reviewing {}/{}", progress.done, progress.total),
        ProgressKind::Position => format!("Progress {}/{}", progress.done, progress.total),
    };
    let widget = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(progress.ratio())
        .label(label);
    frame.render_widget(widget, area);
}

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap},
};

use crate::{app::App, scoring, session::GamePhase};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.game.phase() {
            GamePhase::Setup => render_setup(self, area, buf),
            GamePhase::Playing => render_playing(self, area, buf),
            GamePhase::Results => render_results(self, area, buf),
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_italic() -> Style {
    Style::default()
        .add_modifier(Modifier::DIM)
        .add_modifier(Modifier::ITALIC)
}

fn player_label(name: &str) -> &str {
    if name.is_empty() {
        "anonymous"
    } else {
        name
    }
}

fn render_setup(app: &App, area: Rect, buf: &mut Buffer) {
    let config = app.game.config();
    let (min, max) = config.second_factor_range;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(Span::styled(
        format!("multitrainer - {}", player_label(&config.player_name)),
        bold().fg(Color::Cyan),
    ))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    Paragraph::new(Line::from(vec![
        Span::raw("practice factors: "),
        Span::styled(format!("{}_", app.factors_input), bold().fg(Color::Yellow)),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Factors"))
    .render(chunks[1], buf);

    Paragraph::new(vec![
        Line::from(format!("times {} to {}", min, max)),
        Line::from(format!(
            "{} questions, {:.0}s each",
            config.total_questions, config.time_per_question
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title("Settings"))
    .render(chunks[2], buf);

    let stats = if app.history().is_available() {
        format!("best {}   average {}", app.player_best, app.player_average)
    } else {
        "score history disabled".to_string()
    };
    Paragraph::new(Span::styled(stats, Style::default().fg(Color::Magenta)))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    if let Some(notice) = app.notice.as_ref() {
        Paragraph::new(Span::styled(notice.as_str(), bold().fg(Color::Red)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[4], buf);
    }

    Paragraph::new(Span::styled(
        "(enter) start / (up/down) questions / (left/right) seconds / (esc)ape",
        dim_italic(),
    ))
    .render(chunks[5], buf);
}

fn render_playing(app: &App, area: Rect, buf: &mut Buffer) {
    let (Some(session), Some(question)) = (app.game.session(), app.game.current_question()) else {
        return;
    };
    let budget = session.config().time_per_question;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(format!(
        "question {}/{}   score {}",
        session.current_question_index() + 1,
        session.questions().len(),
        session.total_score()
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    Paragraph::new(Line::from(vec![
        Span::styled(format!("{} = ", question.prompt()), bold()),
        Span::styled(
            format!("{}_", app.game.current_answer()),
            bold().fg(Color::Yellow),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL))
    .render(chunks[2], buf);

    let ratio = if budget > 0.0 {
        (app.game.time_remaining() / budget).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let color = if ratio >= crate::constants::BONUS_THRESHOLD_PERCENT {
        Color::Green
    } else if ratio > 0.25 {
        Color::Yellow
    } else {
        Color::Red
    };
    Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("time"))
        .gauge_style(Style::default().fg(color))
        .ratio(ratio)
        .label(format!("{:.1}s", app.game.time_remaining()))
        .render(chunks[3], buf);

    if let Some(outcome) = app.last_outcome {
        let (text, style) = if outcome.correct && outcome.bonus > 0 {
            (
                format!("correct! +{} with speed bonus", outcome.points),
                bold().fg(Color::Green),
            )
        } else if outcome.correct {
            (
                format!("correct! +{}", outcome.points),
                bold().fg(Color::Green),
            )
        } else {
            (
                format!("not quite, it was {}", outcome.correct_answer),
                bold().fg(Color::Red),
            )
        };
        Paragraph::new(Span::styled(text, style))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
    }

    Paragraph::new(Span::styled("(enter) answer / (esc)ape", dim_italic()))
        .render(chunks[6], buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(session) = app.game.session() else {
        return;
    };
    let questions = session.questions();
    let total = session.total_score();
    let max = scoring::max_score(questions.len());
    let title = match scoring::percentage(total, questions.len()) {
        Ok(pct) => format!("{} / {} points   {:.0}%", total, max, pct),
        Err(_) => format!("{} / {} points", total, max),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(Span::styled(title, bold().fg(Color::Cyan)))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    let feedback = scoring::feedback_message(total, questions.len())
        .unwrap_or("no questions could be built from these factors");
    Paragraph::new(Span::styled(feedback, bold()))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    Paragraph::new(format!(
        "{} correct   {} speed bonuses   best {}   average {}",
        scoring::correct_count(questions),
        scoring::bonus_count(questions),
        app.player_best,
        app.player_average,
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    let lines: Vec<Line> = questions
        .iter()
        .map(|q| {
            let (answer, style) = match q.player_answer {
                None => (
                    "-".to_string(),
                    Style::default().add_modifier(Modifier::DIM),
                ),
                Some(a) if q.is_correct() => (a.to_string(), Style::default().fg(Color::Green)),
                Some(a) => (a.to_string(), Style::default().fg(Color::Red)),
            };
            let mut spans = vec![
                Span::raw(format!("{} = {:>4}  ", q.prompt(), q.correct_answer())),
                Span::styled(format!("{:>6}", answer), style),
                Span::raw(format!("  +{}", scoring::score_of(q))),
            ];
            if q.bonus > 0 {
                spans.push(Span::styled(" ⚡", Style::default().fg(Color::Yellow)));
            }
            Line::from(spans)
        })
        .collect();
    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Questions"))
        .render(chunks[4], buf);

    Paragraph::new(Span::styled(
        "(r)eplay / (s)etup / (q)uit",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[5], buf);
}

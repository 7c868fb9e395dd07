pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::timer::{self, Clock};
use crate::view::{self, TimerStyle};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const HISTORY_ROWS: usize = 5;

fn title_line(app: &App<impl Clock>) -> Line<'static> {
    let header = view::header(app.run());
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    let mut spans = vec![Span::styled(header.title, bold_style)];
    if let Some(seed) = header.seed {
        spans.push(Span::raw(format!("   Seed: {seed}")));
    }
    if let Some((done, total)) = header.progress {
        spans.push(Span::raw(format!("   {done}/{total}")));
    }
    if header.blood_moon.is_active {
        spans.push(Span::styled(
            "   BLOOD MOON",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

/// Seed entry screen
pub fn render_picker(app: &App<impl Clock>, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(area);

    Paragraph::new(title_line(app))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let body = vec![
        Line::from("Enter a seed"),
        Line::from(Span::styled(
            format!("{}_", app.picker.input),
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )),
        Line::from(""),
        Line::from(format!("Preset: {}", app.picker.preset)),
    ];
    Paragraph::new(body)
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        "(enter) start / (tab) preset / (ctrl+r) random seed / (esc)ape",
        dim_style.add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);
}

/// Timer, current checkpoint and recent splits
pub fn render_run(app: &App<impl Clock>, area: Rect, buf: &mut Buffer) {
    let run = app.run();
    let help_lines = if app.manager.show_help() {
        app.keymap.hotkeys().len() as u16 + 1
    } else {
        1
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2),                   // title
            Constraint::Length(HISTORY_ROWS as u16), // history
            Constraint::Length(4),                   // current checkpoint
            Constraint::Length(2),                   // timer
            Constraint::Min(0),
            Constraint::Length(help_lines),
        ])
        .split(area);

    Paragraph::new(title_line(app))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let history = view::history(run);
    let rows = history
        .iter()
        .skip(history.len().saturating_sub(HISTORY_ROWS))
        .map(|row| {
            Line::from(format!(
                "{:>3}  {:<24} {:>10} {:>10}",
                row.index + 1,
                row.name,
                row.segment_text(),
                row.time_text()
            ))
        })
        .collect::<Vec<_>>();
    Paragraph::new(rows)
        .style(Style::default().add_modifier(Modifier::DIM))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    let details = view::split_details(run);
    let blood_moon = app.manager.blood_moon().is_active;
    let name_style = Style::default()
        .add_modifier(Modifier::BOLD)
        .fg(if blood_moon { Color::Red } else { Color::Reset });
    Paragraph::new(vec![
        Line::from(details.counter.map(|c| c.to_string()).unwrap_or_default()),
        Line::from(Span::styled(details.name, name_style)),
        Line::from(Span::styled(
            details.description,
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(chunks[2], buf);

    let time_style = match view::timer_style(run) {
        TimerStyle::Initial => Style::default().add_modifier(Modifier::DIM),
        TimerStyle::Running => Style::default().fg(Color::Green),
        TimerStyle::Paused => Style::default().fg(Color::Yellow),
        TimerStyle::Ended => Style::default().fg(Color::Cyan),
    }
    .add_modifier(Modifier::BOLD);
    Paragraph::new(Span::styled(
        timer::format_millis(app.manager.elapsed()),
        time_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    let italic_style = Style::default().add_modifier(Modifier::ITALIC);
    let help = if app.manager.show_help() {
        let mut lines = vec![Line::from(
            "All shrines except the Blood Moon have been shuffled.",
        )];
        lines.extend(app.keymap.hotkeys().into_iter().map(|(action, keys)| {
            Line::from(format!("{:>14}  {}", keys.join(" / "), action))
        }));
        lines
    } else {
        vec![Line::from("(space) start / split   (h) help   (esc)ape")]
    };
    Paragraph::new(help)
        .style(italic_style)
        .alignment(Alignment::Center)
        .render(chunks[5], buf);
}

impl<C: Clock> Widget for &App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen::<C>(self.run()).render(self, area, buf);
    }
}

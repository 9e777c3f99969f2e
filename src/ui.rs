//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, Mode};
use crate::audio::PlaybackInfo;
use crate::config::UiSettings;
use crate::session::{SessionState, format_mmss};
use crate::storage::KeyValueStore;
use crate::tracker::Tracker;

const INPUT_PLACEHOLDER: &str = "e.g. Smoking, Sugar, Procrastination";
const EMPTY_TEXT: &str = "No trackers yet. Add one above.";

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("a", "add tracker");
    map.insert("h/l", "prev/next");
    map.insert("m", "meditate");
    map.insert("r", "reset");
    map.insert("p", "pledge");
    map.insert("d", "delete");
    map.insert("q", "quit");
    map
});

/// Render the controls help text.
fn controls_text(mode: &Mode) -> String {
    match mode {
        Mode::EditGoal => "[enter] add tracker | [esc] cancel | [backspace] delete char".to_string(),
        Mode::ConfirmDelete { .. } => "[y] delete | [n/esc] keep".to_string(),
        Mode::Browse => {
            // Keep the rendered order stable and human-friendly.
            let order = ["a", "h/l", "m", "r", "p", "d", "q"];
            order
                .iter()
                .filter_map(|k| CONTROLS_MAP.get(k).map(|v| format!("[{k}] {v}")))
                .collect::<Vec<String>>()
                .join(" | ")
        }
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Window `[start, end)` of `total` cards that fits `visible` slots and keeps
/// `selected` in view, centered when possible.
fn card_window(total: usize, selected: usize, visible: usize) -> (usize, usize) {
    if total <= visible || visible == 0 {
        return (0, total);
    }
    let half = visible / 2;
    let mut start = selected.saturating_sub(half);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

/// Cursor column after `input` in the goal box, pinned inside its border.
fn input_cursor_x(area: Rect, input: &str) -> u16 {
    // Border + left padding precede the text.
    let typed = u16::try_from(input.chars().count()).unwrap_or(u16::MAX);
    area.x
        .saturating_add(2)
        .saturating_add(typed)
        .min(area.right().saturating_sub(2))
}

fn padded_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        })
}

fn tracker_card<'a, S: KeyValueStore>(app: &App<S>, tracker: &'a Tracker) -> Paragraph<'a> {
    let elapsed = app.elapsed(tracker.id).unwrap_or_default();
    let meditate = if app.session.is_active() {
        Span::from(format!("[m] {}", app.meditate_label())).dim()
    } else {
        Span::from(format!("[m] {}", app.meditate_label()))
    };

    let lines = vec![
        Line::from(vec![
            Span::from("Tracking: "),
            Span::from(tracker.goal.as_str()).bold(),
        ]),
        Line::from(""),
        Line::from(elapsed.days_text()).bold().alignment(Alignment::Center),
        Line::from(elapsed.clock_text()).alignment(Alignment::Center),
        Line::from(""),
        Line::from("[p] Pledge"),
        Line::from(meditate),
        Line::from("[r] Reset"),
        Line::from("[d] \u{2715} Delete"),
    ];

    Paragraph::new(lines).wrap(Wrap { trim: true })
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw<S: KeyValueStore>(
    frame: &mut Frame,
    app: &App<S>,
    playback: Option<&PlaybackInfo>,
    ui_settings: &UiSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(11),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" QUITTR ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Goal input
    {
        let editing = app.mode == Mode::EditGoal;
        let text = if app.goal_input.is_empty() && !editing {
            Span::from(INPUT_PLACEHOLDER).dim()
        } else {
            Span::from(app.goal_input.as_str())
        };
        let mut block = padded_block(" add tracker ");
        if editing {
            block = block.border_style(Style::default().add_modifier(Modifier::BOLD));
        }
        let area = chunks[1];
        frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);

        if editing {
            let x = input_cursor_x(area, &app.goal_input);
            frame.set_cursor_position(Position::new(x, area.y + 1));
        }
    }

    // Tracker cards
    {
        let area = chunks[2];
        let outer = Block::default().borders(Borders::ALL).title(" trackers ");
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let trackers = app.trackers();
        if trackers.is_empty() {
            let empty = Paragraph::new(EMPTY_TEXT)
                .alignment(Alignment::Center)
                .dim();
            frame.render_widget(empty, inner);
        } else {
            let card_width = ui_settings.card_width.max(1);
            let slots = ((inner.width / card_width) as usize).max(1);
            let (start, end) = card_window(trackers.len(), app.selected, slots);

            let constraints: Vec<Constraint> = (start..end)
                .map(|_| Constraint::Length(card_width))
                .collect();
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(constraints)
                .split(inner);

            for (cell, idx) in cells.iter().zip(start..end) {
                let tracker = &trackers[idx];
                let mut block = padded_block("");
                if idx == app.selected {
                    block = block
                        .border_style(Style::default().add_modifier(Modifier::BOLD))
                        .title(" > ");
                }
                frame.render_widget(tracker_card(app, tracker).block(block), *cell);
            }
        }
    }

    // Status line
    let status = {
        let mut parts: Vec<String> = Vec::new();
        match app.session.state() {
            SessionState::Running => {
                parts.push(format!("Meditating: {}", app.session.display()));
                if let Some(info) = playback {
                    if info.playing {
                        parts.push("Ambience: on".to_string());
                    } else if info.last_error.is_some() {
                        parts.push("Ambience: unavailable".to_string());
                    }
                }
            }
            SessionState::Idle => {
                parts.push(format!("{} tracker(s)", app.trackers().len()));
                parts.push(format!(
                    "meditation {}",
                    format_mmss(app.session.duration_secs())
                ));
            }
        }
        if let Some(msg) = &app.status {
            parts.push(msg.clone());
        }
        parts.join(" \u{2022} ")
    };
    let status_par = Paragraph::new(status)
        .block(padded_block(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[3]);

    let footer = Paragraph::new(controls_text(&app.mode))
        .block(padded_block(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    // Overlays keep the page visible under them.
    if let Mode::ConfirmDelete { prompt, .. } = &app.mode {
        let popup_area = centered_rect_sized(60, 6, chunks[2]);
        frame.render_widget(Clear, popup_area);
        let body = Paragraph::new(vec![
            Line::from(prompt.as_str()),
            Line::from(""),
            Line::from("[y] yes   [n] no"),
        ])
        .block(padded_block(" confirm "))
        .wrap(Wrap { trim: true });
        frame.render_widget(body, popup_area);
    }

    if let Some(notice) = &app.notice {
        let popup_area = centered_rect_sized(56, 6, frame.area());
        frame.render_widget(Clear, popup_area);
        let body = Paragraph::new(vec![
            Line::from(notice.as_str()),
            Line::from(""),
            Line::from("press any key").dim(),
        ])
        .alignment(Alignment::Center)
        .block(padded_block(" notice "))
        .wrap(Wrap { trim: true });
        frame.render_widget(body, popup_area);
    }
}

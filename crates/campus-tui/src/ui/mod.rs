//! TUI rendering — orchestrates all panes.

pub mod entity_page;

use campus_core::{Course, Entity, Professor, Severity, Student};
use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, Focus, Page, PageKind};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let tabs = [
    (PageKind::Students, Student::TITLE),
    (PageKind::Courses, Course::TITLE),
    (PageKind::Professors, Professor::TITLE),
  ];

  let mut left = vec![Span::styled(
    " campus ",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  )];
  for (kind, title) in tabs {
    let style = if kind == app.active {
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };
    left.push(Span::styled(format!(" {title} "), style));
    left.push(Span::raw(" "));
  }

  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  // Simple left-right header: pad the middle.
  let left_width: u16 = left.iter().map(|s| s.content.len() as u16).sum();
  let right_width = right.content.len() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let mut spans = left;
  spans.push(Span::raw(" ".repeat(pad as usize)));
  spans.push(right);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  match app.active {
    PageKind::Students => entity_page::draw(f, area, &app.students),
    PageKind::Courses => entity_page::draw(f, area, &app.courses),
    PageKind::Professors => entity_page::draw(f, area, &app.professors),
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let line = match app.active {
    PageKind::Students => status_line(&app.students),
    PageKind::Courses => status_line(&app.courses),
    PageKind::Professors => status_line(&app.professors),
  };

  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

fn status_line<E: Entity>(page: &Page<E>) -> Line<'_> {
  let (mode_label, hints) = if page.pending_delete.is_some() {
    ("CONFIRM", "y delete  n/Esc keep")
  } else {
    match page.focus {
      Focus::Form => (
        "FORM",
        "↑↓ fields  type to edit  Enter save  Esc cancel  Tab table",
      ),
      Focus::Table => (
        "TABLE",
        "↑↓/jk rows  e edit  d delete  r reload  1/2/3 pages  Tab form  q quit",
      ),
    }
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );

  // The status banner wins over the key hints while it is visible.
  let body_span = match page.controller.notice() {
    Some(notice) => {
      let color = match notice.severity {
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
        Severity::Info => Color::Cyan,
      };
      Span::styled(format!("  {}", notice.text), Style::default().fg(color))
    }
    None => Span::styled(format!("  {hints}"), Style::default().fg(Color::Gray)),
  };

  Line::from(vec![mode_span, body_span])
}

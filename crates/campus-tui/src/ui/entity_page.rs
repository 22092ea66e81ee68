//! One entity page — form pane, table pane, delete-confirmation modal.
//!
//! The table body comes straight from the controller's structured row
//! descriptions; this module never assembles rows from raw records.

use campus_core::{Entity, Mode, TableRow};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
};

use crate::app::{Focus, Page};

/// Render a full entity page into `area`.
pub fn draw<E: Entity>(f: &mut Frame, area: Rect, page: &Page<E>) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(34), Constraint::Percentage(66)])
    .split(area);

  draw_form(f, cols[0], page);
  draw_table(f, cols[1], page);

  if page.pending_delete.is_some() {
    draw_confirm(f, area, E::NOUN);
  }
}

// ─── Form pane ────────────────────────────────────────────────────────────────

fn draw_form<E: Entity>(f: &mut Frame, area: Rect, page: &Page<E>) {
  let title = match page.controller.mode() {
    Mode::Creating => format!(" New {} ", E::NOUN),
    Mode::Editing(_) => format!(" Edit {} ", E::NOUN),
  };

  let border = if page.focus == Focus::Form {
    Style::default().fg(Color::Cyan)
  } else {
    Style::default().fg(Color::DarkGray)
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(border);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines: Vec<Line> = Vec::new();
  for (i, field) in E::fields().iter().enumerate() {
    let focused = page.focus == Focus::Form && page.field_cursor == i;
    let locked = page.controller.is_locked(i);

    let label_style = if focused {
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };

    let mut spans = vec![
      Span::styled(format!("{:<12}", field.label), label_style),
      Span::raw(page.controller.form_value(i).to_string()),
    ];
    if focused && !locked {
      spans.push(Span::styled("_", Style::default().fg(Color::Cyan)));
    }
    if locked {
      spans.push(Span::styled(
        "  (locked)",
        Style::default().fg(Color::DarkGray),
      ));
    }

    lines.push(Line::from(spans));
    lines.push(Line::from(""));
  }

  f.render_widget(Paragraph::new(lines), inner);
}

// ─── Table pane ───────────────────────────────────────────────────────────────

fn draw_table<E: Entity>(f: &mut Frame, area: Rect, page: &Page<E>) {
  let count = page.controller.rows().len();

  let border = if page.focus == Focus::Table {
    Style::default().fg(Color::Cyan)
  } else {
    Style::default().fg(Color::DarkGray)
  };

  let block = Block::default()
    .title(format!(" {} ({count}) ", E::TITLE))
    .borders(Borders::ALL)
    .border_style(border);

  let header = Row::new(
    E::fields()
      .iter()
      .map(|field| Cell::from(field.label))
      .collect::<Vec<_>>(),
  )
  .style(
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );

  let body: Vec<Row> = page
    .controller
    .table_rows()
    .into_iter()
    .map(|row| match row {
      TableRow::Record { cells, .. } => {
        Row::new(cells.into_iter().map(Cell::from).collect::<Vec<_>>())
      }
      TableRow::Placeholder(text) => {
        Row::new(vec![Cell::from(text)])
          .style(Style::default().fg(Color::DarkGray))
      }
    })
    .collect();

  let column_count = E::fields().len() as u32;
  let widths =
    vec![Constraint::Ratio(1, column_count); column_count as usize];

  let table = Table::new(body, widths)
    .header(header)
    .block(block)
    .row_highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    );

  let mut state = TableState::default();
  state.select(
    (page.focus == Focus::Table && count > 0).then_some(page.table_cursor),
  );

  f.render_stateful_widget(table, area, &mut state);
}

// ─── Delete confirmation modal ────────────────────────────────────────────────

fn draw_confirm(f: &mut Frame, area: Rect, noun: &str) {
  let width = area.width.min(40);
  let height = 5u16;
  let modal = Rect {
    x:      area.x + (area.width.saturating_sub(width)) / 2,
    y:      area.y + (area.height.saturating_sub(height)) / 2,
    width,
    height,
  };

  let block = Block::default()
    .title(" Confirm ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));
  let inner = block.inner(modal);

  f.render_widget(Clear, modal);
  f.render_widget(block, modal);
  f.render_widget(
    Paragraph::new(vec![
      Line::from(format!("Delete this {noun}?")),
      Line::from(""),
      Line::from(Span::styled(
        "[y] delete   [n] keep",
        Style::default().fg(Color::Gray),
      )),
    ])
    .centered(),
    inner,
  );
}

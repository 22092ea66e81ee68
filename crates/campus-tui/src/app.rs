//! Application state and key dispatch.
//!
//! One [`Page`] per entity, each owning its controller. Keys are handled
//! serially: every action runs to completion (reload included) before the
//! next event is read, so a controller never has two remote calls in flight.

use std::sync::Arc;

use campus_core::{
  Course, Entity, EntityController, Mode, Professor, RowId, Student,
};
use campus_store_rest::RestStore;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ─── Page ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
  Students,
  Courses,
  Professors,
}

/// Which pane owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  Form,
  Table,
}

/// UI state for one entity page.
pub struct Page<E: Entity> {
  pub controller:     EntityController<E, RestStore>,
  pub focus:          Focus,
  pub field_cursor:   usize,
  pub table_cursor:   usize,
  /// Internal id awaiting delete confirmation, shown as a modal.
  pub pending_delete: Option<RowId>,
  loaded:             bool,
}

impl<E: Entity> Page<E> {
  fn new(store: Arc<RestStore>) -> Self {
    Self {
      controller: EntityController::new(store),
      focus: Focus::Form,
      field_cursor: 0,
      table_cursor: 0,
      pending_delete: None,
      loaded: false,
    }
  }

  /// Load the row set the first time the page becomes visible.
  pub async fn ensure_loaded(&mut self) {
    if !self.loaded {
      self.controller.load().await;
      self.loaded = true;
    }
  }

  fn cursor_row_id(&self) -> Option<RowId> {
    self.controller.rows().get(self.table_cursor).map(|row| row.id)
  }

  fn clamp_cursor(&mut self) {
    let len = self.controller.rows().len();
    if self.table_cursor >= len {
      self.table_cursor = len.saturating_sub(1);
    }
  }

  pub async fn handle_key(&mut self, key: KeyEvent) {
    // The delete modal owns the keyboard while it is up. Either answer
    // travels through the controller's Confirm seam; a decline is a no-op.
    if let Some(id) = self.pending_delete {
      match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
          self.pending_delete = None;
          self.controller.delete(id, &mut |_: &str| true).await;
          self.clamp_cursor();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
          self.pending_delete = None;
          self.controller.delete(id, &mut |_: &str| false).await;
        }
        _ => {}
      }
      return;
    }

    match self.focus {
      Focus::Form => self.handle_form_key(key).await,
      Focus::Table => self.handle_table_key(key).await,
    }
  }

  async fn handle_form_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Tab => self.focus = Focus::Table,

      // Move between fields.
      KeyCode::Up => self.field_cursor = self.field_cursor.saturating_sub(1),
      KeyCode::Down => {
        if self.field_cursor + 1 < E::fields().len() {
          self.field_cursor += 1;
        }
      }

      // Submit: create or update depending on the controller's mode.
      KeyCode::Enter => {
        self.controller.submit().await;
        self.clamp_cursor();
      }

      // Esc abandons an in-progress edit; otherwise it closes the banner.
      KeyCode::Esc => {
        if matches!(self.controller.mode(), Mode::Editing(_)) {
          self.controller.cancel_edit();
          self.field_cursor = 0;
        } else {
          self.controller.dismiss_notice();
        }
      }

      // Text entry. A locked field (the natural key during an edit) hands
      // back no buffer, so input to it is ignored.
      KeyCode::Backspace => {
        if let Some(value) = self.controller.form_value_mut(self.field_cursor) {
          value.pop();
        }
      }
      KeyCode::Char(c) => {
        if let Some(value) = self.controller.form_value_mut(self.field_cursor) {
          value.push(c);
        }
      }

      _ => {}
    }
  }

  async fn handle_table_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Tab => self.focus = Focus::Form,

      // Navigation over record rows (the placeholder is not navigable).
      KeyCode::Down | KeyCode::Char('j') => {
        if self.table_cursor + 1 < self.controller.rows().len() {
          self.table_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.table_cursor = self.table_cursor.saturating_sub(1);
      }

      // Edit the row under the cursor; jump to the first editable field.
      KeyCode::Char('e') | KeyCode::Enter => {
        if let Some(id) = self.cursor_row_id() {
          self.controller.begin_edit(id).await;
          self.focus = Focus::Form;
          self.field_cursor = 1;
        }
      }

      KeyCode::Char('d') => {
        self.pending_delete = self.cursor_row_id();
      }

      KeyCode::Char('r') => {
        self.controller.load().await;
        self.clamp_cursor();
      }

      _ => {}
    }
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Run `$body` with `$page` bound to the active page, whatever its entity.
macro_rules! active_page {
  ($app:expr, $page:ident => $body:expr) => {
    match $app.active {
      PageKind::Students => {
        let $page = &mut $app.students;
        $body
      }
      PageKind::Courses => {
        let $page = &mut $app.courses;
        $body
      }
      PageKind::Professors => {
        let $page = &mut $app.professors;
        $body
      }
    }
  };
}

/// Top-level application state: three pages, one active.
pub struct App {
  pub active:     PageKind,
  pub students:   Page<Student>,
  pub courses:    Page<Course>,
  pub professors: Page<Professor>,
}

impl App {
  pub fn new(store: Arc<RestStore>) -> Self {
    Self {
      active:     PageKind::Students,
      students:   Page::new(store.clone()),
      courses:    Page::new(store.clone()),
      professors: Page::new(store),
    }
  }

  /// Initial load for the page shown at startup.
  pub async fn init(&mut self) {
    self.students.ensure_loaded().await;
  }

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL)
      && key.code == KeyCode::Char('c')
    {
      return false;
    }

    // Quit and page switching live on the table pane — in the form pane
    // every printable character belongs to the field being edited.
    let in_table = active_page!(self, page => {
      page.focus == Focus::Table && page.pending_delete.is_none()
    });
    if in_table {
      match key.code {
        KeyCode::Char('q') => return false,
        KeyCode::Char('1') => {
          self.switch(PageKind::Students).await;
          return true;
        }
        KeyCode::Char('2') => {
          self.switch(PageKind::Courses).await;
          return true;
        }
        KeyCode::Char('3') => {
          self.switch(PageKind::Professors).await;
          return true;
        }
        _ => {}
      }
    }

    active_page!(self, page => page.handle_key(key).await);
    true
  }

  async fn switch(&mut self, kind: PageKind) {
    self.active = kind;
    active_page!(self, page => page.ensure_loaded().await);
  }
}

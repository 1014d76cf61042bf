//! The checks list page: server-backed table, single exclusive row
//! selection, and navigation to the add/edit pages.

use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use crate::api::CheckApi;
use crate::app::Nav;
use crate::types::{CheckId, CheckSummary};

pub struct ListPage {
    pub rows: Vec<CheckSummary>,
    pub cursor: usize,
    /// Index of the row carrying the selected marker. At most one row is
    /// selected; activating another row moves the marker.
    pub active_row: Option<usize>,
    pub status: Option<String>,
}

impl ListPage {
    pub fn load(api: &dyn CheckApi) -> Self {
        match api.list_checks() {
            Ok(rows) => Self {
                rows,
                cursor: 0,
                active_row: None,
                status: None,
            },
            Err(err) => {
                warn!(error = %format!("{err:#}"), "failed to load check list");
                Self {
                    rows: Vec::new(),
                    cursor: 0,
                    active_row: None,
                    status: Some(format!("failed to load checks: {err:#}")),
                }
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, api: &dyn CheckApi) -> Nav {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Nav::Quit,
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Enter => self.activate_cursor_row(),
            KeyCode::Char('e') => return Nav::ToEdit(self.selected_id()),
            KeyCode::Char('a') => return Nav::ToAdd,
            KeyCode::Char('r') => self.reload(api),
            _ => {}
        }
        Nav::None
    }

    fn reload(&mut self, api: &dyn CheckApi) {
        let reloaded = Self::load(api);
        self.rows = reloaded.rows;
        self.status = reloaded.status;
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
        // The previous selection may point at a different record now.
        self.active_row = None;
    }

    fn move_cursor(&mut self, delta: i64) {
        if self.rows.is_empty() {
            self.cursor = 0;
            return;
        }
        let last = (self.rows.len() - 1) as i64;
        self.cursor = (self.cursor as i64 + delta).clamp(0, last) as usize;
    }

    /// Select the row under the cursor, deselecting any previous one.
    /// Re-activating the selected row leaves it selected exactly once.
    fn activate_cursor_row(&mut self) {
        if self.cursor < self.rows.len() {
            self.active_row = Some(self.cursor);
        }
    }

    /// Identifier of the selected row, `0` when nothing is selected. The
    /// zero target is the server's to resolve.
    pub fn selected_id(&self) -> CheckId {
        self.active_row
            .and_then(|index| self.rows.get(index))
            .map(|row| CheckId(row.id))
            .unwrap_or(CheckId(0))
    }
}

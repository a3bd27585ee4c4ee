//! Application state for the terminal matrix editor.
//!
//! `App` assembles the component tree: it creates the bus, mounts the grid
//! holder, builds the cell editors row by row, and keeps the editors in
//! step with the grid through an explicit change observer.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::bus::{EventBus, Subscription};
use super::cell::CellEditor;
use super::grid::GridHolder;
use super::row::RowPresenter;
use crate::domain::{CellChange, Matrix, UpdateEvent};

/// Represents the current mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Navigation mode - arrow keys move the selection
    Normal,
    /// The selected cell has focus and receives typed text
    Editing,
    /// Help screen is displayed
    Help,
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use twobytwo::application::App;
///
/// let mut app = App::default();
/// app.start_editing();
/// app.type_char('7');
/// app.finish_editing();
/// assert_eq!(app.matrix().rows(), &[[7, 0], [0, 0]]);
/// ```
#[derive(Debug)]
pub struct App {
    /// Channel shared by the cell editors and the grid holder
    pub bus: EventBus<UpdateEvent>,
    /// Owner of the matrix values
    pub grid: GridHolder,
    /// Cell editors indexed as `cells[row][col]`
    pub cells: Vec<Vec<CellEditor>>,
    /// Currently selected row (zero-based)
    pub selected_row: usize,
    /// Currently selected column (zero-based)
    pub selected_col: usize,
    /// Current application mode
    pub mode: AppMode,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Changes reported by the grid that views have not picked up yet
    pending: Rc<RefCell<VecDeque<CellChange>>>,
    _view_observer: Subscription,
}

impl Default for App {
    fn default() -> Self {
        Self::with_bus(EventBus::new())
    }
}

impl App {
    /// Mounts the component tree on an existing bus.
    pub fn with_bus(bus: EventBus<UpdateEvent>) -> Self {
        let grid = GridHolder::mount(&bus);
        let values = grid.values();
        let cells = values
            .rows()
            .iter()
            .enumerate()
            .map(|(row, row_values)| RowPresenter::cells(row, row_values, &bus))
            .collect();

        let pending = Rc::new(RefCell::new(VecDeque::new()));
        let queue = Rc::clone(&pending);
        let view_observer = grid.observe(move |change: &CellChange| {
            queue.borrow_mut().push_back(*change);
        });

        Self {
            bus,
            grid,
            cells,
            selected_row: 0,
            selected_col: 0,
            mode: AppMode::Normal,
            help_scroll: 0,
            status_message: None,
            pending,
            _view_observer: view_observer,
        }
    }

    pub fn matrix(&self) -> Matrix {
        self.grid.values()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellEditor> {
        self.cells.get(row)?.get(col)
    }

    pub fn selected_cell(&self) -> Option<&CellEditor> {
        self.cell(self.selected_row, self.selected_col)
    }

    fn selected_cell_mut(&mut self) -> Option<&mut CellEditor> {
        self.cells.get_mut(self.selected_row)?.get_mut(self.selected_col)
    }

    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn col_count(&self) -> usize {
        self.cells.get(self.selected_row).map(Vec::len).unwrap_or(0)
    }

    /// Hands queued grid changes to the affected editors.
    ///
    /// Only the editors whose cell changed are refreshed. Returns the number
    /// of changes applied.
    pub fn sync_views(&mut self) -> usize {
        let changes: Vec<CellChange> = self.pending.borrow_mut().drain(..).collect();
        for change in &changes {
            if let Some(editor) = self
                .cells
                .get_mut(change.row)
                .and_then(|r| r.get_mut(change.col))
            {
                editor.set_value(change.value);
            }
        }
        if !changes.is_empty() {
            tracing::trace!(changes = changes.len(), "views synchronised");
        }
        changes.len()
    }

    /// Gives the selected cell focus.
    pub fn start_editing(&mut self) {
        if let Some(editor) = self.selected_cell_mut() {
            editor.focus();
            self.mode = AppMode::Editing;
            self.status_message = None;
        }
    }

    /// Takes focus away from the selected cell and returns to normal mode.
    pub fn finish_editing(&mut self) {
        self.sync_views();
        let (row, col) = (self.selected_row, self.selected_col);
        if let Some(editor) = self.selected_cell_mut() {
            editor.blur();
            let value = editor.value();
            self.status_message = Some(format!("Cell ({row}, {col}) = {value}"));
        }
        self.mode = AppMode::Normal;
    }

    /// Finishes the current cell and starts editing the next one in
    /// row-major order, wrapping to the first cell.
    pub fn edit_next_cell(&mut self) {
        self.finish_editing();
        let cols = self.col_count().max(1);
        let total = self.row_count() * cols;
        if total == 0 {
            return;
        }
        let next = (self.selected_row * cols + self.selected_col + 1) % total;
        self.selected_row = next / cols;
        self.selected_col = next % cols;
        self.start_editing();
    }

    pub fn type_char(&mut self, c: char) {
        if let Some(editor) = self.selected_cell_mut() {
            editor.insert_char(c);
        }
        self.sync_views();
    }

    pub fn backspace(&mut self) {
        if let Some(editor) = self.selected_cell_mut() {
            editor.backspace();
        }
        self.sync_views();
    }

    pub fn delete(&mut self) {
        if let Some(editor) = self.selected_cell_mut() {
            editor.delete();
        }
        self.sync_views();
    }

    pub fn cursor_left(&mut self) {
        if let Some(editor) = self.selected_cell_mut() {
            editor.move_left();
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(editor) = self.selected_cell_mut() {
            editor.move_right();
        }
    }

    pub fn cursor_home(&mut self) {
        if let Some(editor) = self.selected_cell_mut() {
            editor.move_home();
        }
    }

    pub fn cursor_end(&mut self) {
        if let Some(editor) = self.selected_cell_mut() {
            editor.move_end();
        }
    }

    /// Empties the selected cell, which stores zero.
    pub fn clear_selected_cell(&mut self) {
        if let Some(editor) = self.selected_cell_mut() {
            editor.clear();
        }
        self.sync_views();
    }

    pub fn move_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_row + 1 < self.row_count() {
            self.selected_row += 1;
        }
    }

    pub fn move_left(&mut self) {
        self.selected_col = self.selected_col.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.selected_col + 1 < self.col_count() {
            self.selected_col += 1;
        }
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }
}

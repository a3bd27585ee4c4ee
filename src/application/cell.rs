//! Single editable matrix cell.

use super::bus::{CELL_UPDATE, EventBus};
use crate::domain::{UpdateEvent, parse_cell_input};

/// Editable numeric field bound to one matrix position.
///
/// The editor keeps its own text buffer so the user can type freely. Every
/// change to the buffer is coerced to an integer and published on the bus
/// as an [`UpdateEvent`]; the editor never validates or writes the matrix
/// itself. The stored value comes back through [`CellEditor::set_value`].
#[derive(Debug)]
pub struct CellEditor {
    row: usize,
    col: usize,
    value: i64,
    text: String,
    /// Cursor position in characters, not bytes
    cursor: usize,
    focused: bool,
    refreshes: usize,
    bus: EventBus<UpdateEvent>,
}

impl CellEditor {
    pub fn new(row: usize, col: usize, value: i64, bus: EventBus<UpdateEvent>) -> Self {
        let text = value.to_string();
        let cursor = text.chars().count();
        Self {
            row,
            col,
            value,
            text,
            cursor,
            focused: false,
            refreshes: 0,
            bus,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Last value the grid reported for this cell.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Text shown in the field.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// How many times the grid has pushed a new value into this editor.
    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.cursor = self.text.chars().count();
    }

    /// Leaves the field.
    ///
    /// Fires the change hook (a diagnostic log line only) and resynchronises
    /// the text with the stored value, so leftovers like `"12abc"` display
    /// as `12`.
    pub fn blur(&mut self) {
        if !self.focused {
            return;
        }
        tracing::debug!(row = self.row, col = self.col, value = self.value, "cell changed");
        self.focused = false;
        self.text = self.value.to_string();
        self.cursor = self.text.chars().count();
    }

    /// Pushes the grid's value into the editor.
    ///
    /// While the field has focus the user's text is left untouched.
    pub fn set_value(&mut self, value: i64) {
        self.value = value;
        self.refreshes += 1;
        if !self.focused {
            self.text = value.to_string();
            self.cursor = self.text.chars().count();
        }
        tracing::trace!(row = self.row, col = self.col, value, "cell refreshed");
    }

    pub fn insert_char(&mut self, c: char) -> i64 {
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
        self.on_input()
    }

    /// Deletes the character before the cursor. Publishes only when
    /// something was removed.
    pub fn backspace(&mut self) -> Option<i64> {
        if self.cursor == 0 {
            return None;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
        Some(self.on_input())
    }

    /// Deletes the character under the cursor. Publishes only when
    /// something was removed.
    pub fn delete(&mut self) -> Option<i64> {
        if self.cursor >= self.text.chars().count() {
            return None;
        }
        let at = self.byte_offset(self.cursor);
        self.text.remove(at);
        Some(self.on_input())
    }

    /// Replaces the whole text, as a paste or a programmatic edit would.
    pub fn set_text(&mut self, text: &str) -> i64 {
        self.text = text.to_string();
        self.cursor = self.text.chars().count();
        self.on_input()
    }

    pub fn clear(&mut self) -> i64 {
        self.set_text("")
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    fn on_input(&mut self) -> i64 {
        let parsed = parse_cell_input(&self.text);
        let event = UpdateEvent::new(self.row as i64, self.col as i64, parsed);
        let delivered = self.bus.publish(CELL_UPDATE, &event);
        tracing::trace!(
            row = self.row,
            col = self.col,
            value = parsed,
            delivered,
            "cell input published"
        );
        parsed
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Subscription;
    use crate::test_support::capture_logs;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_bus() -> (
        EventBus<UpdateEvent>,
        Rc<RefCell<Vec<UpdateEvent>>>,
        Subscription,
    ) {
        let bus = EventBus::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        let sub = bus.subscribe(CELL_UPDATE, move |e: &UpdateEvent| sink.borrow_mut().push(*e));
        (bus, events, sub)
    }

    #[test]
    fn test_new_editor_shows_value() {
        let bus = EventBus::new();
        let editor = CellEditor::new(1, 0, 12, bus);
        assert_eq!(editor.text(), "12");
        assert_eq!(editor.value(), 12);
        assert_eq!((editor.row(), editor.col()), (1, 0));
        assert!(!editor.is_focused());
    }

    #[test]
    fn test_every_keystroke_publishes() {
        let (bus, events, _sub) = recording_bus();
        let mut editor = CellEditor::new(0, 1, 0, bus);
        editor.focus();
        editor.clear();
        editor.insert_char('4');
        editor.insert_char('2');

        assert_eq!(
            *events.borrow(),
            vec![
                UpdateEvent::new(0, 1, 0),
                UpdateEvent::new(0, 1, 4),
                UpdateEvent::new(0, 1, 42),
            ]
        );
    }

    #[test]
    fn test_non_numeric_text_publishes_zero() {
        let (bus, events, _sub) = recording_bus();
        let mut editor = CellEditor::new(1, 1, 7, bus);
        editor.focus();
        assert_eq!(editor.set_text("hello"), 0);
        assert_eq!(events.borrow().last(), Some(&UpdateEvent::new(1, 1, 0)));
    }

    #[test]
    fn test_publishes_even_when_value_unchanged() {
        let (bus, events, _sub) = recording_bus();
        let mut editor = CellEditor::new(0, 0, 0, bus);
        editor.focus();
        editor.insert_char('x');
        editor.insert_char('y');
        assert_eq!(events.borrow().len(), 2);
        assert!(events.borrow().iter().all(|e| e.value == 0));
    }

    #[test]
    fn test_backspace_and_delete() {
        let (bus, events, _sub) = recording_bus();
        let mut editor = CellEditor::new(0, 0, 123, bus);
        editor.focus();

        assert_eq!(editor.backspace(), Some(12));
        editor.move_home();
        assert_eq!(editor.backspace(), None);
        assert_eq!(editor.delete(), Some(2));
        editor.move_end();
        assert_eq!(editor.delete(), None);
        assert_eq!(editor.text(), "2");
        assert_eq!(events.borrow().len(), 2);
    }

    #[test]
    fn test_cursor_editing_in_the_middle() {
        let bus = EventBus::new();
        let mut editor = CellEditor::new(0, 0, 15, bus);
        editor.focus();
        editor.move_left();
        assert_eq!(editor.insert_char('0'), 105);
        assert_eq!(editor.text(), "105");
        assert_eq!(editor.cursor(), 2);

        editor.move_right();
        editor.move_right();
        assert_eq!(editor.cursor(), 3);
    }

    #[test]
    fn test_multibyte_text_does_not_break_cursor() {
        let bus = EventBus::new();
        let mut editor = CellEditor::new(0, 0, 0, bus);
        editor.focus();
        editor.set_text("é9");
        editor.move_left();
        editor.insert_char('ü');
        assert_eq!(editor.text(), "éü9");
        assert_eq!(editor.backspace(), Some(0));
        assert_eq!(editor.text(), "é9");
    }

    #[test]
    fn test_set_value_keeps_focused_text() {
        let bus = EventBus::new();
        let mut editor = CellEditor::new(0, 0, 0, bus);
        editor.focus();
        editor.set_text("12abc");
        editor.set_value(12);
        assert_eq!(editor.text(), "12abc");
        assert_eq!(editor.value(), 12);
        assert_eq!(editor.refresh_count(), 1);
    }

    #[test]
    fn test_set_value_refreshes_unfocused_text() {
        let bus = EventBus::new();
        let mut editor = CellEditor::new(0, 0, 0, bus);
        editor.set_value(-8);
        assert_eq!(editor.text(), "-8");
    }

    #[test]
    fn test_blur_logs_and_resyncs_text() {
        let bus = EventBus::new();
        let mut editor = CellEditor::new(1, 0, 0, bus);
        editor.focus();
        editor.set_text("12abc");
        editor.set_value(12);

        let (_, logs) = capture_logs(|| editor.blur());
        assert!(logs.contains("cell changed"));
        assert!(!editor.is_focused());
        assert_eq!(editor.text(), "12");
        assert_eq!(editor.value(), 12);
    }

    #[test]
    fn test_blur_does_not_publish() {
        let (bus, events, _sub) = recording_bus();
        let mut editor = CellEditor::new(0, 0, 3, bus);
        editor.focus();
        editor.blur();
        editor.blur();
        assert!(events.borrow().is_empty());
    }
}

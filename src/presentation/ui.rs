use crate::application::{App, AppMode, CellEditor};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Width of one rendered cell, borders included.
const CELL_WIDTH: u16 = 16;
/// Height of one rendered cell, borders included.
const CELL_HEIGHT: u16 = 3;

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_matrix(f, app, chunks[1]);
    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!(
        "twobytwo - 2x2 Matrix Editor | Cell: ({}, {})",
        app.selected_row, app.selected_col
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_matrix(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Matrix");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            app.cells
                .iter()
                .map(|_| Constraint::Length(CELL_HEIGHT))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(inner);

    for (row, editors) in app.cells.iter().enumerate() {
        render_row(f, app, editors, row, row_areas[row]);
    }
}

/// Lays out one row of editors side by side.
fn render_row(f: &mut Frame, app: &App, editors: &[CellEditor], row: usize, area: Rect) {
    let col_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            editors
                .iter()
                .map(|_| Constraint::Length(CELL_WIDTH))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(area);

    for (col, editor) in editors.iter().enumerate() {
        let selected = row == app.selected_row && col == app.selected_col;
        render_cell(f, editor, selected, col_areas[col]);
    }
}

fn render_cell(f: &mut Frame, editor: &CellEditor, selected: bool, area: Rect) {
    let border_style = if editor.is_focused() {
        Style::default().fg(Color::Green)
    } else if selected {
        Style::default().fg(Color::LightBlue)
    } else {
        Style::default()
    };
    let text_style = if selected && !editor.is_focused() {
        Style::default().bg(Color::Blue).fg(Color::White)
    } else {
        Style::default()
    };

    let input = Paragraph::new(editor.text().to_string())
        .style(text_style)
        .block(Block::default().borders(Borders::ALL).border_style(border_style));
    f.render_widget(input, area);

    if editor.is_focused() && area.width > 2 && area.height > 2 {
        let offset = u16::try_from(editor.cursor()).unwrap_or(u16::MAX);
        let x = area.x.saturating_add(1).saturating_add(offset).min(area.right() - 2);
        f.set_cursor_position((x, area.y + 1));
    }
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "Arrows/hjkl: move | Enter: edit | Backspace: clear | F1/?: help | q: quit".to_string()
            }
        }
        AppMode::Editing => {
            let text = app.selected_cell().map(CellEditor::text).unwrap_or_default();
            format!("Editing: {} (Enter/Esc to finish, Tab for next cell)", text)
        }
        AppMode::Help => "↑↓/jk: scroll | Home: top | Esc/q: close help".to_string(),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Editing => Style::default().fg(Color::Green),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(input, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width / 5 * 4,
        height: area.height / 5 * 4,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("twobytwo Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"TWOBYTWO MATRIX EDITOR

=== VALUES ===
• Every cell holds an integer; the matrix starts as all zeros
• Typing updates the matrix immediately, keystroke by keystroke
• Text is read as a base-10 integer: leading spaces and one sign are
  allowed, anything after the digits is ignored ("12abc" -> 12)
• Text without a leading number stores 0

=== NAVIGATION ===
Arrow keys      Move between cells (hjkl also work)
Enter/F2        Edit selected cell
Backspace/Del   Clear selected cell to 0
F1 or ?         Show this help
q               Quit

=== EDITING ===
Enter/Esc       Leave the cell; the field shows the stored value
Tab             Leave the cell and edit the next one
←/→ Home/End    Move the text cursor
Backspace/Del   Delete a character

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text
Home            Jump to top of help text
Esc/F1/?/q      Close this help window"#;

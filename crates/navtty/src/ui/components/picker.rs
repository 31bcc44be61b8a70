use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::ui::Component;
use crate::ui::text::truncate_with_ellipsis;

const EMPTY_RESULTS_TEXT: &str = "No matching rows";
const FILTER_PREFIX: &str = "> ";
const FOOTER_TEXT: &str = "Enter: select | Esc: cancel | type to filter";

/// Full-screen selection list: a title, a typing filter, and a windowed
/// row list with the highlighted row kept visible.
pub struct Picker<'a> {
    query: &'a str,
    rows: &'a [&'a String],
    selected_index: usize,
    title: &'a str,
}

impl<'a> Picker<'a> {
    /// Creates one picker page over already-filtered rows.
    pub fn new(title: &'a str, query: &'a str, rows: &'a [&'a String], selected_index: usize) -> Self {
        Self {
            query,
            rows,
            selected_index,
            title,
        }
    }
}

impl Component for Picker<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let title_width = usize::from(area.width.saturating_sub(4));
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", truncate_with_ellipsis(self.title, title_width)));
        f.render_widget(Clear, area);
        f.render_widget(block, area);

        let layout = Layout::default()
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .margin(1)
            .split(area);
        let filter_area = layout[0];
        let list_area = layout[1];
        let footer_area = layout[2];

        let filter_line = Line::from(vec![
            Span::styled(
                FILTER_PREFIX,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(self.query),
        ]);
        f.render_widget(Paragraph::new(filter_line), filter_area);

        let max_visible = usize::from(list_area.height);
        let lines = list_lines(self.rows, self.selected_index, max_visible);
        f.render_widget(Paragraph::new(lines), list_area);

        let footer = Paragraph::new(FOOTER_TEXT).style(Style::default().fg(Color::Gray));
        f.render_widget(footer, footer_area);

        let cursor_x = filter_area
            .x
            .saturating_add(u16::try_from(FILTER_PREFIX.width()).unwrap_or(0))
            .saturating_add(u16::try_from(self.query.width()).unwrap_or(u16::MAX));
        f.set_cursor_position((cursor_x, filter_area.y));
    }
}

/// Builds the windowed row lines and highlights the selected row.
///
/// When the selection moves past `max_visible`, the window shifts down so
/// the selected row stays on screen.
fn list_lines(rows: &[&String], selected_index: usize, max_visible: usize) -> Vec<Line<'static>> {
    if rows.is_empty() {
        return vec![Line::from(Span::styled(
            EMPTY_RESULTS_TEXT,
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let clamped_index = selected_index.min(rows.len().saturating_sub(1));
    let start_index = window_start_index(rows.len(), clamped_index, max_visible);

    rows.iter()
        .skip(start_index)
        .take(max_visible)
        .enumerate()
        .map(|(offset, row)| {
            let absolute_index = start_index + offset;
            let marker = if absolute_index == clamped_index { ">" } else { " " };
            let text = format!("{marker} {row}");

            if absolute_index == clamped_index {
                Line::from(Span::styled(
                    text,
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(text, Style::default().fg(Color::White)))
            }
        })
        .collect()
}

/// Returns the first visible row index for a fixed-height sliding window.
fn window_start_index(row_count: usize, selected_index: usize, max_visible: usize) -> usize {
    let selected_index = selected_index.min(row_count.saturating_sub(1));

    selected_index.saturating_add(1).saturating_sub(max_visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn test_list_lines_show_empty_hint_without_rows() {
        // Arrange
        let empty: Vec<&String> = Vec::new();

        // Act
        let lines = list_lines(&empty, 0, 10);

        // Assert
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans[0].content.as_ref(), EMPTY_RESULTS_TEXT);
    }

    #[test]
    fn test_list_lines_mark_only_the_selected_row() {
        // Arrange
        let owned = rows(&["..", "a.txt", "> New file"]);
        let borrowed: Vec<&String> = owned.iter().collect();

        // Act
        let lines = list_lines(&borrowed, 1, 10);

        // Assert
        assert!(lines[0].spans[0].content.starts_with("  .."));
        assert!(lines[1].spans[0].content.starts_with("> a.txt"));
        assert!(lines[2].spans[0].content.starts_with("  > New file"));
    }

    #[test]
    fn test_list_lines_keep_selection_visible_in_a_small_window() {
        // Arrange
        let owned = rows(&["r0", "r1", "r2", "r3", "r4", "r5"]);
        let borrowed: Vec<&String> = owned.iter().collect();

        // Act
        let lines = list_lines(&borrowed, 4, 3);

        // Assert
        assert_eq!(lines.len(), 3);
        assert!(lines[0].spans[0].content.contains("r2"));
        assert!(lines[2].spans[0].content.contains("r4"));
        assert!(lines[2].spans[0].content.starts_with("> "));
    }

    #[test]
    fn test_window_start_index_stays_at_zero_for_short_lists() {
        // Arrange & Act & Assert
        assert_eq!(window_start_index(3, 2, 10), 0);
        assert_eq!(window_start_index(10, 9, 4), 6);
    }

    #[test]
    fn test_picker_render_draws_title_rows_and_footer() {
        // Arrange
        let backend = ratatui::backend::TestBackend::new(60, 12);
        let mut terminal = ratatui::Terminal::new(backend).expect("failed to create terminal");
        let owned = rows(&["..", "a.txt", "> New file"]);
        let borrowed: Vec<&String> = owned.iter().collect();
        let picker = Picker::new("/proj", "", &borrowed, 0);

        // Act
        terminal
            .draw(|f| {
                let area = f.area();
                Component::render(&picker, f, area);
            })
            .expect("failed to draw");

        // Assert
        let buffer = terminal.backend().buffer();
        let text: String = buffer
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(text.contains("/proj"));
        assert!(text.contains("a.txt"));
        assert!(text.contains("> New file"));
        assert!(text.contains("Esc: cancel"));
    }
}

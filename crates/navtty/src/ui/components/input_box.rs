use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::ui::Component;
use crate::ui::text::truncate_with_ellipsis;

const INPUT_PREFIX: &str = "> ";
const FOOTER_TEXT: &str = "Enter: accept | Esc: cancel";
const OVERLAY_HEIGHT: u16 = 5;
const OVERLAY_WIDTH_PERCENT: u16 = 60;
const MIN_OVERLAY_WIDTH: u16 = 40;

/// Centered one-line text input popup.
pub struct InputBox<'a> {
    /// Cursor position in characters from the start of `text`.
    cursor: usize,
    placeholder: &'a str,
    text: &'a str,
}

impl<'a> InputBox<'a> {
    /// Creates one input popup with the cursor at `cursor` characters.
    pub fn new(placeholder: &'a str, text: &'a str, cursor: usize) -> Self {
        Self {
            cursor,
            placeholder,
            text,
        }
    }
}

impl Component for InputBox<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let width = (area.width * OVERLAY_WIDTH_PERCENT / 100)
            .max(MIN_OVERLAY_WIDTH)
            .min(area.width);
        let height = OVERLAY_HEIGHT.min(area.height);
        let popup_area = Rect::new(
            area.x + (area.width.saturating_sub(width)) / 2,
            area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        );

        let title_width = usize::from(popup_area.width.saturating_sub(4));
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(
                " {} ",
                truncate_with_ellipsis(self.placeholder, title_width)
            ));
        f.render_widget(Clear, popup_area);
        f.render_widget(block, popup_area);

        let layout = Layout::default()
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
            .margin(1)
            .split(popup_area);
        let input_area = layout[0];
        let footer_area = layout[2];

        let input_line = Line::from(vec![
            Span::styled(
                INPUT_PREFIX,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(self.text),
        ]);
        f.render_widget(Paragraph::new(input_line), input_area);
        f.render_widget(
            Paragraph::new(FOOTER_TEXT).style(Style::default().fg(Color::Gray)),
            footer_area,
        );

        let before_cursor: String = self.text.chars().take(self.cursor).collect();
        let cursor_x = input_area
            .x
            .saturating_add(u16::try_from(INPUT_PREFIX.width()).unwrap_or(0))
            .saturating_add(u16::try_from(before_cursor.width()).unwrap_or(u16::MAX));
        f.set_cursor_position((cursor_x, input_area.y));
    }
}

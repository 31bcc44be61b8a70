use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::ui::Component;

const FOOTER_TEXT: &str = "press any key";
const MIN_OVERLAY_HEIGHT: u16 = 6;
const MIN_OVERLAY_WIDTH: u16 = 34;
const OVERLAY_HEIGHT_PERCENT: u16 = 26;
const OVERLAY_WIDTH_PERCENT: u16 = 56;

/// Centered error popup, dismissed by any key.
pub struct MessageOverlay<'a> {
    message: &'a str,
}

impl<'a> MessageOverlay<'a> {
    /// Creates one error popup for `message`.
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl Component for MessageOverlay<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let width = (area.width * OVERLAY_WIDTH_PERCENT / 100)
            .max(MIN_OVERLAY_WIDTH)
            .min(area.width);
        let height = (area.height * OVERLAY_HEIGHT_PERCENT / 100)
            .max(MIN_OVERLAY_HEIGHT)
            .min(area.height);
        let popup_area = Rect::new(
            area.x + (area.width.saturating_sub(width)) / 2,
            area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        );

        let paragraph = Paragraph::new(self.message)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(Span::styled(" Error ", Style::default().fg(Color::Red)))
                    .title_bottom(Span::styled(
                        format!(" {FOOTER_TEXT} "),
                        Style::default().fg(Color::Gray),
                    )),
            );

        f.render_widget(Clear, popup_area);
        f.render_widget(paragraph, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_overlay_render_wraps_long_messages() {
        // Arrange
        let backend = ratatui::backend::TestBackend::new(80, 16);
        let mut terminal = ratatui::Terminal::new(backend).expect("failed to create terminal");
        let message = "Failed to paste a.txt: permission denied while copying into a \
                       read-only target directory";
        let overlay = MessageOverlay::new(message);

        // Act
        terminal
            .draw(|f| {
                let area = f.area();
                Component::render(&overlay, f, area);
            })
            .expect("failed to draw");

        // Assert
        let buffer = terminal.backend().buffer();
        let text: String = buffer
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(text.contains("Error"));
        assert!(text.contains("Failed to paste"));
        assert!(text.contains(FOOTER_TEXT));
    }
}

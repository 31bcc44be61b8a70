use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ui::Component;
use crate::ui::text::truncate_with_ellipsis;

const MIN_OVERLAY_HEIGHT: u16 = 7;
const MIN_OVERLAY_WIDTH: u16 = 30;
const OVERLAY_HEIGHT_PERCENT: u16 = 20;
const OVERLAY_WIDTH_PERCENT: u16 = 44;

/// Centered confirmation popup used before destructive actions.
///
/// The safe No option renders first and starts selected; the question is
/// truncated to one line so the choices stay visible.
pub struct ConfirmOverlay<'a> {
    question: &'a str,
    selected_yes: bool,
}

impl<'a> ConfirmOverlay<'a> {
    /// Creates one confirmation popup for `question`.
    pub fn new(question: &'a str, selected_yes: bool) -> Self {
        Self {
            question,
            selected_yes,
        }
    }
}

impl Component for ConfirmOverlay<'_> {
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

        let question_width = usize::from(popup_area.width.saturating_sub(4));
        let question = truncate_with_ellipsis(self.question, question_width);

        let selected_style = Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let unselected_style = Style::default().fg(Color::White);
        let (no_style, yes_style) = if self.selected_yes {
            (unselected_style, selected_style)
        } else {
            (selected_style, unselected_style)
        };

        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(question, Style::default().fg(Color::White))),
            Line::from(""),
            Line::from(vec![
                Span::styled(" No ", no_style),
                Span::styled("   ", Style::default()),
                Span::styled(" Yes ", yes_style),
            ]),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(Span::styled(
                    " Confirm ",
                    Style::default().fg(Color::Yellow),
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
    fn test_confirm_overlay_render_shows_both_choices() {
        // Arrange
        let backend = ratatui::backend::TestBackend::new(100, 20);
        let mut terminal = ratatui::Terminal::new(backend).expect("failed to create terminal");
        let overlay = ConfirmOverlay::new("Are you sure you want to delete the \"sub\" folder?", false);

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
        assert!(text.contains("No"));
        assert!(text.contains("Yes"));
        assert!(text.contains("delete"));
    }

    #[test]
    fn test_confirm_overlay_render_keeps_choices_for_long_questions() {
        // Arrange
        let backend = ratatui::backend::TestBackend::new(80, 16);
        let mut terminal = ratatui::Terminal::new(backend).expect("failed to create terminal");
        let question = "Are you sure you want to delete the \"a directory with an absurdly long \
                        name that would otherwise push the buttons off screen\" folder?";
        let overlay = ConfirmOverlay::new(question, true);

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
        assert!(text.contains("Yes"));
        assert!(text.contains("No"));
        assert!(text.contains("..."));
    }
}

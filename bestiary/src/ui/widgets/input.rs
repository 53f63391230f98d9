//! Search box widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::ViewerTheme;

/// Single-line query input
pub struct InputWidget<'a> {
    content: &'a str,
    cursor_position: usize,
    theme: &'a ViewerTheme,
    placeholder: &'a str,
    is_active: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(content: &'a str, theme: &'a ViewerTheme) -> Self {
        Self {
            content,
            cursor_position: content.chars().count(),
            theme,
            placeholder: "Search monsters by name...",
            is_active: false,
        }
    }

    pub fn cursor_position(mut self, pos: usize) -> Self {
        self.cursor_position = pos;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(" Search ", self.theme.title_style(self.is_active)))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.is_active));

        let inner = block.inner(area);
        block.render(area, buf);

        let prompt = Span::styled("/ ", self.theme.query_style());

        let line = if self.content.is_empty() && !self.is_active {
            Line::from(vec![
                prompt,
                Span::styled(self.placeholder, self.theme.hint_style()),
            ])
        } else if !self.is_active {
            Line::from(vec![
                prompt,
                Span::styled(self.content, self.theme.query_style()),
            ])
        } else {
            // Character-based slicing keeps multi-byte input intact
            let before_cursor: String = self.content.chars().take(self.cursor_position).collect();
            let at_cursor = self
                .content
                .chars()
                .nth(self.cursor_position)
                .map(|c| c.to_string())
                .unwrap_or_else(|| " ".to_string());
            let after_cursor: String = self.content.chars().skip(self.cursor_position + 1).collect();

            Line::from(vec![
                prompt,
                Span::styled(before_cursor, self.theme.query_style()),
                Span::styled(
                    at_cursor,
                    Style::default()
                        .add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
                        .fg(self.theme.query_text),
                ),
                Span::styled(after_cursor, self.theme.query_style()),
            ])
        };

        Paragraph::new(line).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_placeholder_when_empty_and_inactive() {
        let theme = ViewerTheme::default();
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);

        InputWidget::new("", &theme).render(area, &mut buf);

        assert!(row_text(&buf, 1).contains("Search monsters by name..."));
    }

    #[test]
    fn test_shows_query_text() {
        let theme = ViewerTheme::default();
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);

        InputWidget::new("drágon", &theme)
            .active(true)
            .cursor_position(2)
            .render(area, &mut buf);

        assert!(row_text(&buf, 1).contains("/ drágon"));
    }
}

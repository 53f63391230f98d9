//! Stat block display widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::scrollbar,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget, Wrap},
};

use bestiary_core::{Card, Node};

use crate::ui::theme::ViewerTheme;

/// Widget showing the rendered stat blocks of the current results
pub struct MonsterListWidget<'a> {
    cards: &'a [Card],
    scroll: usize,
    theme: &'a ViewerTheme,
    focused: bool,
    empty_message: &'a str,
}

impl<'a> MonsterListWidget<'a> {
    pub fn new(cards: &'a [Card], theme: &'a ViewerTheme) -> Self {
        Self {
            cards,
            scroll: 0,
            theme,
            focused: false,
            empty_message: "No monsters to show. Press / to search.",
        }
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }
}

/// Rows available for text inside `area`: the bordered block's interior
/// minus the scrollbar column.
fn text_area(area: Rect) -> Rect {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    Rect {
        width: inner.width.saturating_sub(1),
        ..inner
    }
}

fn wrapped(lines: Vec<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(lines).wrap(Wrap { trim: false })
}

/// Largest scroll offset that still fills the widget when drawn in `area`,
/// counted in wrapped rows.
pub fn max_scroll(cards: &[Card], theme: &ViewerTheme, area: Rect) -> usize {
    let text = text_area(area);
    if text.width == 0 {
        return 0;
    }
    let total = wrapped(card_lines(cards, theme)).line_count(text.width);
    total.saturating_sub(text.height as usize)
}

/// Styled lines for all cards, one blank line after each.
pub fn card_lines(cards: &[Card], theme: &ViewerTheme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for card in cards {
        push_card(card, 0, theme, &mut lines);
        lines.push(Line::from(""));
    }
    lines
}

fn push_card(card: &Card, depth: usize, theme: &ViewerTheme, out: &mut Vec<Line<'static>>) {
    let indent = "  ".repeat(depth);

    for node in &card.nodes {
        let text = match node {
            Node::Title(text)
            | Node::Heading(text)
            | Node::Subheading(text)
            | Node::Line(text)
            | Node::Paragraph(text) => text,
            Node::Card(nested) => {
                push_card(nested, depth + 1, theme, out);
                continue;
            }
        };

        if text.is_empty() {
            out.push(Line::from(""));
        } else {
            out.push(Line::from(vec![
                Span::raw(indent.clone()),
                Span::styled(text.clone(), theme.node_style(node)),
            ]));
        }
    }
}

impl Widget for MonsterListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.focused {
            " Monsters [j/k scroll] "
        } else {
            " Monsters "
        };

        let block = Block::default()
            .title(Span::styled(title, self.theme.title_style(self.focused)))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.cards.is_empty() {
            let line = Line::from(Span::styled(self.empty_message, self.theme.hint_style()));
            Paragraph::new(line).render(inner, buf);
            return;
        }

        let text = text_area(area);
        let paragraph = wrapped(card_lines(self.cards, self.theme));

        // Scroll offsets count wrapped rows
        let visible_height = text.height as usize;
        let total_lines = paragraph.line_count(text.width);
        let max_scroll = total_lines.saturating_sub(visible_height);
        let scroll = self.scroll.min(max_scroll);

        paragraph
            .scroll((scroll.min(u16::MAX as usize) as u16, 0))
            .render(text, buf);

        if total_lines > visible_height {
            let scrollbar_area = Rect {
                x: inner.x + inner.width.saturating_sub(1),
                y: inner.y,
                width: 1,
                height: inner.height,
            };

            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .thumb_style(Style::default().fg(Color::DarkGray))
                .track_style(Style::default().fg(Color::Black))
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(scroll);

            scrollbar.render(scrollbar_area, buf, &mut scrollbar_state);

            // Hint at bottom if more content below
            if scroll < max_scroll {
                let remaining = max_scroll - scroll;
                let hint = format!(" ↓{remaining} more ");
                let hint_y = inner.y + inner.height.saturating_sub(1);
                let hint_style = self.theme.hint_style();
                for (i, ch) in hint.chars().enumerate() {
                    let x = inner.x + (i as u16);
                    if x < inner.x + inner.width.saturating_sub(2) {
                        buf[(x, hint_y)].set_char(ch).set_style(hint_style);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bestiary_core::render_results;
    use bestiary_core::testing::{sample_dragon, sample_goblin};

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn render_to_buffer(cards: &[Card], scroll: usize, area: Rect) -> Buffer {
        let theme = ViewerTheme::default();
        let mut buf = Buffer::empty(area);
        MonsterListWidget::new(cards, &theme)
            .scroll(scroll)
            .render(area, &mut buf);
        buf
    }

    /// Text columns only: no borders, no scrollbar.
    fn text_rows(buf: &Buffer) -> Vec<String> {
        let text = text_area(buf.area);
        (text.y..text.y + text.height)
            .map(|y| {
                (text.x..text.x + text.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_bottom_of_wrapped_card_is_reachable() {
        let cards = render_results(&[sample_dragon()]);
        let buf = render_to_buffer(&cards, usize::MAX, Rect::new(0, 0, 40, 20));

        let rows = text_rows(&buf);
        let screen = rows.join("\n");
        assert!(screen.contains("Magma Eruption"), "lair action not shown:\n{screen}");

        let last = rows.iter().rev().find(|row| !row.trim().is_empty()).unwrap();
        assert!(last.ends_with("of it."), "last row was {last:?}");
    }

    #[test]
    fn test_max_scroll_counts_wrapped_rows() {
        let theme = ViewerTheme::default();
        let cards = render_results(&[sample_dragon()]);
        let area = Rect::new(0, 0, 40, 20);
        let visible = text_area(area).height as usize;

        let unwrapped = card_lines(&cards, &theme).len().saturating_sub(visible);
        assert!(max_scroll(&cards, &theme, area) > unwrapped);
    }

    #[test]
    fn test_max_scroll_matches_widget_clamp() {
        let theme = ViewerTheme::default();
        let cards = render_results(&[sample_dragon()]);
        let area = Rect::new(0, 0, 40, 20);
        let max = max_scroll(&cards, &theme, area);

        assert_eq!(
            render_to_buffer(&cards, max, area),
            render_to_buffer(&cards, usize::MAX, area)
        );
        assert_ne!(
            text_rows(&render_to_buffer(&cards, max - 1, area)),
            text_rows(&render_to_buffer(&cards, max, area))
        );
    }

    #[test]
    fn test_short_card_needs_no_scroll() {
        let theme = ViewerTheme::default();
        let cards = render_results(&[bestiary_core::Monster::new("Rat")]);
        assert_eq!(max_scroll(&cards, &theme, Rect::new(0, 0, 80, 30)), 0);
    }

    #[test]
    fn test_nested_cards_are_indented() {
        let theme = ViewerTheme::default();
        let cards = render_results(&[sample_goblin()]);
        let text: Vec<String> = card_lines(&cards, &theme)
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();

        assert_eq!(text[0], "Goblin");
        assert!(text.contains(&"  Scimitar".to_string()));
        assert_eq!(text.last().map(String::as_str), Some(""));
    }

    #[test]
    fn test_empty_results_show_message() {
        let theme = ViewerTheme::default();
        let area = Rect::new(0, 0, 50, 5);
        let mut buf = Buffer::empty(area);

        MonsterListWidget::new(&[], &theme)
            .empty_message("Nothing here")
            .render(area, &mut buf);

        assert!(row_text(&buf, 1).contains("Nothing here"));
    }

    #[test]
    fn test_renders_first_card_title() {
        let theme = ViewerTheme::default();
        let cards = render_results(&[sample_goblin()]);
        let area = Rect::new(0, 0, 60, 10);
        let mut buf = Buffer::empty(area);

        MonsterListWidget::new(&cards, &theme).render(area, &mut buf);

        assert!(row_text(&buf, 1).contains("Goblin"));
    }
}

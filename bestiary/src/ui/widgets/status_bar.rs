//! Status bar widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use bestiary_core::{SearchController, SearchStatus};

use crate::app::InputMode;
use crate::ui::theme::ViewerTheme;

/// Status bar showing the mode and the state of the last search
pub struct StatusBarWidget<'a> {
    search: &'a SearchController,
    input_mode: InputMode,
    theme: &'a ViewerTheme,
    message: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(search: &'a SearchController, input_mode: InputMode, theme: &'a ViewerTheme) -> Self {
        Self {
            search,
            input_mode,
            theme,
            message: None,
        }
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Input mode indicator (vim-style)
        let (input_mode_text, input_mode_style) = match self.input_mode {
            InputMode::Normal => ("NORMAL", Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
            InputMode::Insert => ("INSERT", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        };

        let query_text = match self.search.shown_query() {
            Some("") => "all monsters".to_string(),
            Some(name) => format!("\"{name}\""),
            None => "no search yet".to_string(),
        };

        let mut spans = vec![
            Span::styled(format!("-- {input_mode_text} --"), input_mode_style),
            Span::raw(" | "),
            Span::styled(query_text, self.theme.query_style()),
            Span::raw(" | "),
            Span::raw(format!("Page {}", self.search.page())),
            Span::raw(" | "),
            Span::raw(format!("{} shown", self.search.results().len())),
        ];

        match self.search.status() {
            SearchStatus::Idle => {}
            SearchStatus::Pending => {
                spans.push(Span::raw(" | "));
                spans.push(Span::styled("Searching...", self.theme.pending_style()));
            }
            SearchStatus::Failed(error) => {
                spans.push(Span::raw(" | "));
                spans.push(Span::styled(format!("Search failed: {error}"), self.theme.failure_style()));
            }
        }

        if let Some(msg) = self.message {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(msg, Style::default().add_modifier(Modifier::DIM)));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// Hotkey bar widget
pub struct HotkeyBarWidget {
    input_mode: InputMode,
}

impl HotkeyBarWidget {
    pub fn new(input_mode: InputMode) -> Self {
        Self { input_mode }
    }
}

impl Widget for HotkeyBarWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hotkeys = match self.input_mode {
            InputMode::Normal => vec![
                ("/:search", true),
                ("j/k:scroll", true),
                ("n/p:page", true),
                ("g/G:top/bottom", false),
                ("?:help", false),
                ("q:quit", false),
            ],
            InputMode::Insert => vec![
                ("Esc:normal", true),
                ("Enter:search", true),
                ("↑↓:history", false),
            ],
        };

        let spans: Vec<Span> = hotkeys
            .iter()
            .flat_map(|(text, primary)| {
                let style = if *primary {
                    Style::default()
                } else {
                    Style::default().add_modifier(Modifier::DIM)
                };
                vec![Span::styled(*text, style), Span::raw("  ")]
            })
            .collect();

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bestiary_core::testing::{sample_goblin, MockSearch};

    fn row_text(buf: &Buffer) -> String {
        (0..buf.area.width).map(|x| buf[(x, 0)].symbol()).collect()
    }

    #[test]
    fn test_before_first_search() {
        let theme = ViewerTheme::default();
        let search = SearchController::default();
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);

        StatusBarWidget::new(&search, InputMode::Normal, &theme).render(area, &mut buf);

        let text = row_text(&buf);
        assert!(text.contains("-- NORMAL --"));
        assert!(text.contains("no search yet"));
    }

    #[tokio::test]
    async fn test_shows_query_and_failure() {
        let theme = ViewerTheme::default();
        let service = MockSearch::new(vec![sample_goblin()]);
        let mut search = SearchController::default();
        search.set_query("gob");
        search.submit(&service).await;

        service.fail_next(bestiary_core::ApiError::Network("connection refused".to_string()));
        search.submit(&service).await;

        let area = Rect::new(0, 0, 120, 1);
        let mut buf = Buffer::empty(area);
        StatusBarWidget::new(&search, InputMode::Insert, &theme).render(area, &mut buf);

        let text = row_text(&buf);
        assert!(text.contains("\"gob\""));
        assert!(text.contains("1 shown"));
        assert!(text.contains("Search failed"));
    }
}

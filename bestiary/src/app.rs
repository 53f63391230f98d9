//! Main application state and logic

use std::collections::VecDeque;

use bestiary_core::{render_results, Card, SearchController, SearchOutcome, SearchReply, SearchWorker};
use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::ui::theme::ViewerTheme;
use crate::ui::layout::AppLayout;
use crate::ui::widgets::monster_list;
use crate::ui::Overlay;

const HISTORY_LIMIT: usize = 100;

/// Vim-style input modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal mode - navigation and hotkeys (default)
    #[default]
    Normal,
    /// Insert mode - editing the search text
    Insert,
}

/// Main application state
pub struct App {
    pub search: SearchController,
    worker: SearchWorker,
    replies: mpsc::UnboundedReceiver<SearchReply>,
    service_label: String,

    // Rendered stat blocks for `search.results()`
    cards: Vec<Card>,
    // Area the stat blocks are drawn in, and the scroll limit it allows
    results_area: Rect,
    max_scroll: usize,

    // UI state
    pub theme: ViewerTheme,
    overlay: Option<Overlay>,
    pub scroll: usize,

    // Input state
    pub input_mode: InputMode,
    input_buffer: String,
    cursor_position: usize,
    pub input_history: VecDeque<String>,
    pub history_index: Option<usize>,
    pub saved_input: Option<String>,

    // Status
    status_message: Option<String>,
}

impl App {
    /// Create the application around a search worker and its reply channel.
    pub fn new(
        worker: SearchWorker,
        replies: mpsc::UnboundedReceiver<SearchReply>,
        page_size: u32,
        service_label: impl Into<String>,
    ) -> Self {
        Self {
            search: SearchController::new(page_size),
            worker,
            replies,
            service_label: service_label.into(),
            cards: Vec::new(),
            results_area: AppLayout::calculate(Rect::new(0, 0, 80, 24)).results_area,
            max_scroll: 0,
            theme: ViewerTheme::default(),
            overlay: None,
            scroll: 0,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            cursor_position: 0,
            input_history: VecDeque::with_capacity(HISTORY_LIMIT),
            history_index: None,
            saved_input: None,
            status_message: None,
        }
    }

    /// Search for the text in the input box. An empty box lists everything.
    pub fn submit_search(&mut self) {
        let query = self.submit_input();
        self.search.set_query(query);
        let ticket = self.search.begin_search();
        self.worker.dispatch(ticket);
        self.clear_status();
    }

    /// Request the page after the one shown.
    pub fn next_page(&mut self) {
        match self.search.next_page() {
            Some(ticket) => {
                self.worker.dispatch(ticket);
                self.clear_status();
            }
            None => self.set_status("Run a search first"),
        }
    }

    /// Request the page before the one shown.
    pub fn prev_page(&mut self) {
        match self.search.previous_page() {
            Some(ticket) => {
                self.worker.dispatch(ticket);
                self.clear_status();
            }
            None => self.set_status("Already on the first page"),
        }
    }

    /// Apply every reply that has arrived. Returns true if anything changed.
    pub fn poll_replies(&mut self) -> bool {
        let mut changed = false;
        while let Ok(reply) = self.replies.try_recv() {
            changed |= self.apply_reply(reply) != SearchOutcome::Stale;
        }
        changed
    }

    /// Hand one reply to the controller and refresh the rendered cards.
    pub fn apply_reply(&mut self, reply: SearchReply) -> SearchOutcome {
        let outcome = self.search.complete(reply.ticket, reply.result);

        match outcome {
            SearchOutcome::Applied(count) => {
                self.cards = render_results(self.search.results());
                self.scroll = 0;
                self.refresh_max_scroll();
                let noun = if count == 1 { "monster" } else { "monsters" };
                self.set_status(format!("Found {count} {noun}"));
            }
            // The status bar reports the failure from the controller
            SearchOutcome::Failed => self.clear_status(),
            SearchOutcome::Stale => {}
        }

        outcome
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn service_label(&self) -> &str {
        &self.service_label
    }

    /// Record the area the stat blocks will be drawn in. The scroll limit
    /// depends on its width (wrapping) and height.
    pub fn set_results_area(&mut self, area: Rect) {
        if area != self.results_area {
            self.results_area = area;
            self.refresh_max_scroll();
        }
    }

    fn refresh_max_scroll(&mut self) {
        self.max_scroll = monster_list::max_scroll(&self.cards, &self.theme, self.results_area);
        self.scroll = self.scroll.min(self.max_scroll);
    }

    /// Largest scroll offset, in wrapped rows, for the current results area.
    pub fn max_scroll(&self) -> usize {
        self.max_scroll
    }

    /// Scroll the stat blocks up
    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.min(self.max_scroll()).saturating_sub(lines);
    }

    /// Scroll the stat blocks down
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// Take the input box content as a query and record it in history.
    /// The box keeps its text so the query stays visible.
    pub fn submit_input(&mut self) -> String {
        let input = self.input_buffer.clone();

        if !input.is_empty() && self.input_history.front() != Some(&input) {
            self.input_history.push_front(input.clone());
            if self.input_history.len() > HISTORY_LIMIT {
                self.input_history.pop_back();
            }
        }
        self.history_index = None;
        self.saved_input = None;

        input
    }

    /// Handle a typed character (unicode-safe)
    pub fn type_char(&mut self, c: char) {
        let byte_pos = self
            .input_buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len());
        self.input_buffer.insert(byte_pos, c);
        self.cursor_position += 1;
    }

    /// Handle backspace (unicode-safe)
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position) {
                self.input_buffer
                    .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    /// Handle delete (unicode-safe)
    pub fn delete(&mut self) {
        if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position) {
            self.input_buffer
                .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.input_buffer.chars().count();
        self.cursor_position = (self.cursor_position + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input_buffer.chars().count();
    }

    /// Navigate to previous input in history
    pub fn history_prev(&mut self) {
        if self.input_history.is_empty() {
            return;
        }

        // Save current input if we're just starting to browse history
        if self.history_index.is_none() && !self.input_buffer.is_empty() {
            self.saved_input = Some(self.input_buffer.clone());
        }

        let idx = match self.history_index {
            None => 0,
            Some(i) if i + 1 < self.input_history.len() => i + 1,
            Some(i) => i,
        };

        if let Some(entry) = self.input_history.get(idx) {
            self.input_buffer = entry.clone();
            self.cursor_end();
            self.history_index = Some(idx);
        }
    }

    /// Navigate to next input in history
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(0) => {
                self.input_buffer = self.saved_input.take().unwrap_or_default();
                self.cursor_end();
                self.history_index = None;
            }
            Some(i) => {
                if let Some(entry) = self.input_history.get(i - 1) {
                    self.input_buffer = entry.clone();
                    self.cursor_end();
                    self.history_index = Some(i - 1);
                }
            }
        }
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        if self.overlay == Some(Overlay::Help) {
            self.overlay = None;
        } else {
            self.overlay = Some(Overlay::Help);
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Set input buffer content and move cursor to end (unicode-safe)
    pub fn set_input(&mut self, content: impl Into<String>) {
        self.input_buffer = content.into();
        self.cursor_end();
    }
}

//! Render orchestration for the viewer

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, InputMode};
use crate::ui::layout::{centered_rect_fixed, AppLayout};
use crate::ui::widgets::{HotkeyBarWidget, InputWidget, MonsterListWidget, StatusBarWidget};

/// Overlay types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Help,
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = AppLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);
    render_input(frame, app, layout.input_area);

    let empty_message = if app.search.is_pending() {
        "Searching..."
    } else if app.search.shown_query().is_some() {
        "No monsters match this search."
    } else {
        "No monsters to show. Press / to search."
    };

    let list = MonsterListWidget::new(app.cards(), &app.theme)
        .scroll(app.scroll)
        .focused(app.input_mode == InputMode::Normal)
        .empty_message(empty_message);
    frame.render_widget(list, layout.results_area);

    let status = StatusBarWidget::new(&app.search, app.input_mode, &app.theme)
        .message(app.status_message());
    frame.render_widget(status, layout.status_bar);

    frame.render_widget(HotkeyBarWidget::new(app.input_mode), layout.hotkey_bar);

    if let Some(overlay) = app.overlay() {
        render_overlay(frame, app, overlay, area);
    }
}

/// Render the title bar
fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(" Bestiary | {} ", app.service_label());

    let line = Line::from(Span::styled(
        title,
        Style::default()
            .fg(app.theme.foreground)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the search box
fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = app.input_mode == InputMode::Insert;

    let input_widget = InputWidget::new(app.input_buffer(), &app.theme)
        .cursor_position(app.cursor_position())
        .active(is_active);

    frame.render_widget(input_widget, area);
}

/// Render overlay
fn render_overlay(frame: &mut Frame, app: &App, overlay: Overlay, area: Rect) {
    match overlay {
        Overlay::Help => render_help_overlay(frame, app, area),
    }
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(50, 22, area);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::UNDERLINED),
        ))
    };

    let help_text = vec![
        Line::from(Span::styled(
            " Bestiary - Help ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section("Input Modes:"),
        Line::from("  / or i  Edit the search (INSERT mode)"),
        Line::from("  Enter   Run the search"),
        Line::from("  Esc     Return to NORMAL mode"),
        Line::from("  ↑/↓     Previous searches (INSERT mode)"),
        Line::from(""),
        section("Navigation (NORMAL mode):"),
        Line::from("  j/k or ↑/↓     Scroll up/down"),
        Line::from("  PgUp/PgDn      Scroll by page"),
        Line::from("  g/G            Jump to top/bottom"),
        Line::from("  n/p            Next/previous page of results"),
        Line::from("  Mouse wheel    Scroll stat blocks"),
        Line::from(""),
        section("Other:"),
        Line::from("  ?       Toggle this help"),
        Line::from("  q       Quit"),
        Line::from("  Ctrl+C  Quit from any mode"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or q to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}

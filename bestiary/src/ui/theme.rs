//! Color theme and styling for the bestiary viewer

use ratatui::style::{Color, Modifier, Style};

use bestiary_core::Node;

/// Viewer color theme
#[derive(Debug, Clone)]
pub struct ViewerTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Stat block colors
    pub title_text: Color,
    pub heading_text: Color,
    pub subheading_text: Color,
    pub body_text: Color,
    pub prose_text: Color,

    // Status colors
    pub query_text: Color,
    pub pending: Color,
    pub failure: Color,
    pub hint_text: Color,
}

impl Default for ViewerTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            title_text: Color::LightRed,
            heading_text: Color::Yellow,
            subheading_text: Color::LightYellow,
            body_text: Color::White,
            prose_text: Color::Gray,

            query_text: Color::Cyan,
            pending: Color::Yellow,
            failure: Color::Red,
            hint_text: Color::DarkGray,
        }
    }
}

impl ViewerTheme {
    /// Style for one display node. Nested cards take the style of their
    /// own nodes, so `Card` falls back to body text.
    pub fn node_style(&self, node: &Node) -> Style {
        match node {
            Node::Title(_) => Style::default()
                .fg(self.title_text)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            Node::Heading(_) => Style::default()
                .fg(self.heading_text)
                .add_modifier(Modifier::BOLD),
            Node::Subheading(_) => Style::default()
                .fg(self.subheading_text)
                .add_modifier(Modifier::ITALIC | Modifier::BOLD),
            Node::Line(_) => Style::default().fg(self.body_text),
            Node::Paragraph(_) => Style::default().fg(self.prose_text),
            Node::Card(_) => Style::default().fg(self.body_text),
        }
    }

    /// Style for the query text in the input box
    pub fn query_style(&self) -> Style {
        Style::default().fg(self.query_text)
    }

    pub fn pending_style(&self) -> Style {
        Style::default()
            .fg(self.pending)
            .add_modifier(Modifier::BOLD)
    }

    pub fn failure_style(&self) -> Style {
        Style::default()
            .fg(self.failure)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for hints and secondary information
    pub fn hint_style(&self) -> Style {
        Style::default()
            .fg(self.hint_text)
            .add_modifier(Modifier::DIM)
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Get title style
    pub fn title_style(&self, focused: bool) -> Style {
        let style = Style::default().fg(if focused {
            self.border_focused
        } else {
            self.foreground
        });

        if focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}

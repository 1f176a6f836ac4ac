//! # TitleBar Component
//!
//! Single-line header: application name, the backend we're talking to, and
//! the current status message. Purely presentational — all fields are props
//! copied from core state each frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub struct TitleBar {
    /// Backend model name when the health probe answered, else its URL.
    pub backend_label: String,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(backend_label: String, status_message: String) -> Self {
        Self {
            backend_label,
            status_message,
        }
    }

    fn line(&self) -> Line<'static> {
        let mut spans = vec![
            Span::styled(
                "Protoscope",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" — Clinical Component Identifier ({})", self.backend_label)),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.status_message.clone(),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered_text(bar: &TitleBar) -> String {
        bar.line()
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect()
    }

    #[test]
    fn includes_backend_and_status() {
        let bar = TitleBar::new("gpt-4o-mini".to_string(), "Ready".to_string());
        let text = rendered_text(&bar);
        assert!(text.contains("gpt-4o-mini"));
        assert!(text.contains("| Ready"));
    }

    #[test]
    fn omits_separator_when_status_empty() {
        let bar = TitleBar::new("http://localhost:5000".to_string(), String::new());
        let text = rendered_text(&bar);
        assert!(!text.contains('|'));
    }
}

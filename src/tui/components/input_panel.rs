//! # InputPanel Component
//!
//! The left panel: tab strip (Text / File), the active input surface, and
//! its footer.
//!
//! Text tab: a multi-line paste area with a character counter and the
//! sample catalog. File tab: a path prompt that stands in for the browser's
//! drop zone — the selected file is shown with its size, mirroring the
//! original picker card.
//!
//! The panel is a transient component; the buffers it displays live in the
//! core `Session` (editing happens through reducer actions, not here).

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::core::samples::SAMPLES;
use crate::core::state::{InputTab, Session};
use crate::tui::component::Component;
use crate::tui::components::text_wrap::wrap_text_lines;

/// Bytes → human-readable size, matching the picker card ("1.5 KB", "2.3 MB").
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Thousands-separated character count ("12,345").
pub fn format_char_count(count: usize) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Last `max` characters of `s`, prefixed with `…` when truncated.
/// Keeps the tail visible while a long path is being typed.
fn tail(s: &str, max: usize) -> String {
    let count = s.chars().count();
    if count <= max {
        return s.to_string();
    }
    let skip = count - max.saturating_sub(1);
    let mut out = String::from("…");
    out.extend(s.chars().skip(skip));
    out
}

pub struct InputPanel<'a> {
    pub session: &'a Session,
    /// Whether keystrokes currently land in this panel.
    pub editing: bool,
}

impl<'a> InputPanel<'a> {
    pub fn new(session: &'a Session, editing: bool) -> Self {
        Self { session, editing }
    }

    fn tabs_line(&self) -> Line<'static> {
        let tab_style = |active: bool| {
            if active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            }
        };
        Line::from(vec![
            Span::styled(" Text ", tab_style(self.session.active_tab == InputTab::Text)),
            Span::raw("  "),
            Span::styled(" File ", tab_style(self.session.active_tab == InputTab::File)),
            Span::styled("   (Tab to switch)", Style::default().fg(Color::DarkGray)),
        ])
    }

    fn render_text_tab(&self, frame: &mut Frame, area: Rect) {
        let [body_area, count_area, samples_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1 + SAMPLES.len() as u16),
        ])
        .areas(area);

        // Show the tail of the buffer so the latest input stays visible.
        let mut lines = wrap_text_lines(&self.session.input_text, body_area.width);
        let visible = body_area.height as usize;
        if lines.len() > visible {
            lines.drain(..lines.len() - visible);
        }
        if self.session.input_text.is_empty() {
            frame.render_widget(
                Paragraph::new("Paste clinical protocol text here...")
                    .style(Style::default().fg(Color::DarkGray)),
                body_area,
            );
        } else {
            let text: Vec<Line> = lines.into_iter().map(Line::raw).collect();
            frame.render_widget(Paragraph::new(text), body_area);
        }

        let count = format!(
            "{} characters",
            format_char_count(self.session.input_text.chars().count())
        );
        frame.render_widget(
            Paragraph::new(count)
                .style(Style::default().fg(Color::DarkGray))
                .right_aligned(),
            count_area,
        );

        let mut sample_lines = vec![Line::from(Span::styled(
            format!("Sample Clinical Texts ({} examples)", SAMPLES.len()),
            Style::default().fg(Color::DarkGray),
        ))];
        for (index, sample) in SAMPLES.iter().enumerate() {
            sample_lines.push(Line::from(vec![
                Span::styled(
                    format!("  Alt+{} ", index + 1),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(sample.title),
            ]));
        }
        frame.render_widget(Paragraph::new(sample_lines), samples_area);
    }

    fn render_file_tab(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = match &self.session.selected_file {
            Some(file) => {
                let mut lines = vec![
                    Line::from(vec![
                        Span::styled("✔ ", Style::default().fg(Color::Green)),
                        Span::styled(file.name(), Style::default().add_modifier(Modifier::BOLD)),
                    ]),
                ];
                if let Some(size) = file.size {
                    lines.push(Line::from(Span::styled(
                        format_file_size(size),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
                lines.push(Line::raw(""));
                lines.push(Line::from(Span::styled(
                    "Enter to analyze • Ctrl+X to remove",
                    Style::default().fg(Color::DarkGray),
                )));
                lines
            }
            None => {
                let prompt_width = area.width.saturating_sub(6) as usize;
                let path_line = if self.session.file_input.is_empty() && !self.editing {
                    Line::from(Span::styled(
                        "Path: (type a file path)",
                        Style::default().fg(Color::DarkGray),
                    ))
                } else {
                    Line::from(vec![
                        Span::styled("Path: ", Style::default().fg(Color::DarkGray)),
                        Span::raw(tail(&self.session.file_input, prompt_width)),
                    ])
                };
                vec![
                    path_line,
                    Line::raw(""),
                    Line::from(Span::styled(
                        "Type a path to a document and press Enter to select it",
                        Style::default().fg(Color::DarkGray),
                    )),
                    Line::from(Span::styled(
                        "Supported: PDF, DOCX, TXT (max 16MB)",
                        Style::default().fg(Color::DarkGray),
                    )),
                ]
            }
        };
        frame.render_widget(Paragraph::new(lines), area);
    }
}

impl Component for InputPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.editing {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(" Input ")
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [tabs_area, content_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(inner);
        frame.render_widget(Paragraph::new(self.tabs_line()), tabs_area);

        match self.session.active_tab {
            InputTab::Text => self.render_text_tab(frame, content_area),
            InputTab::File => self.render_file_tab(frame, content_area),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_session;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn file_size_units() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2 * 1024 * 1024), "2.0 MB");
    }

    #[test]
    fn char_count_thousands_separators() {
        assert_eq!(format_char_count(0), "0");
        assert_eq!(format_char_count(999), "999");
        assert_eq!(format_char_count(1000), "1,000");
        assert_eq!(format_char_count(1234567), "1,234,567");
    }

    #[test]
    fn tail_keeps_short_strings_intact() {
        assert_eq!(tail("short", 10), "short");
    }

    #[test]
    fn tail_truncates_from_the_front() {
        let truncated = tail("/very/long/path/to/protocol.pdf", 14);
        assert!(truncated.starts_with('…'));
        assert!(truncated.ends_with("protocol.pdf"));
        assert!(truncated.chars().count() <= 14);
    }

    #[test]
    fn renders_both_tabs_without_panicking() {
        let backend = TestBackend::new(50, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut session = test_session();

        terminal
            .draw(|f| InputPanel::new(&session, true).render(f, f.area()))
            .unwrap();

        session.active_tab = InputTab::Text;
        session.input_text = "Some clinical text.\n".repeat(30);
        terminal
            .draw(|f| InputPanel::new(&session, false).render(f, f.area()))
            .unwrap();
    }
}

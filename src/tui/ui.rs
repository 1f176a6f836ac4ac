//! Frame layout: title bar on top, input panel beside the results panel,
//! key hints at the bottom. The results panel owns the error banner, the
//! loading spinner, the empty states, and the card list.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::core::state::{InputTab, Session};
use crate::tui::component::Component;
use crate::tui::components::text_wrap::wrap_text_lines;
use crate::tui::components::{CardList, InputPanel, TitleBar};
use crate::tui::{InputMode, TuiState};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn draw_ui(frame: &mut Frame, session: &Session, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min, Percentage};

    let [title_area, main_area, hints_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    let backend_label = session
        .backend_model
        .clone()
        .unwrap_or_else(|| session.backend.name().to_string());
    TitleBar::new(backend_label, session.status_message.clone()).render(frame, title_area);

    let [input_area, results_area] =
        Layout::horizontal([Percentage(42), Percentage(58)]).areas(main_area);

    InputPanel::new(session, tui.input_mode == InputMode::Edit).render(frame, input_area);
    draw_results(frame, results_area, session, tui, spinner_frame);

    frame.render_widget(
        Paragraph::new(key_hints(tui.input_mode)).style(Style::default().fg(Color::DarkGray)),
        hints_area,
    );
}

fn draw_results(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    tui: &mut TuiState,
    spinner_frame: usize,
) {
    let border_style = if tui.input_mode == InputMode::Browse {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(" Identified Components ")
        .padding(Padding::horizontal(1));
    if let Some(stats) = &session.stats {
        block = block.title(
            Line::from(Span::styled(
                format!(" {} ", stats.badge()),
                Style::default().fg(Color::Cyan),
            ))
            .right_aligned(),
        );
    }
    let mut inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    // Persistent error banner until the next submission attempt.
    if let Some(error) = &session.error {
        let lines: Vec<Line> = wrap_text_lines(error, inner.width)
            .into_iter()
            .map(Line::raw)
            .collect();
        let banner_height = (lines.len() as u16).min(4);
        let [banner_area, rest] =
            Layout::vertical([Constraint::Length(banner_height + 1), Constraint::Min(0)])
                .areas(inner);
        frame.render_widget(
            Paragraph::new(lines).style(
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ),
            banner_area,
        );
        inner = rest;
    }

    if session.is_loading {
        let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        frame.render_widget(
            Paragraph::new(format!("{spinner} Analyzing..."))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Cyan)),
            center_line(inner),
        );
        return;
    }

    if session.components.is_empty() {
        // With a fresh zero-component result the stats badge already says
        // "0 found"; only the untouched session gets the onboarding text.
        if session.error.is_none() && session.stats.is_none() {
            frame.render_widget(
                Paragraph::new(empty_state_text(session.active_tab))
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray)),
                center_line(inner),
            );
        }
        return;
    }

    CardList::new(
        &mut tui.card_list,
        &session.components,
        session.expanded,
        session.copied,
    )
    .render(frame, inner);
}

/// Middle row of `area`, for one-line centered messages.
fn center_line(area: Rect) -> Rect {
    let y = area.y + area.height / 2;
    Rect::new(area.x, y.min(area.y + area.height.saturating_sub(1)), area.width, 1)
}

fn empty_state_text(tab: InputTab) -> &'static str {
    match tab {
        InputTab::Text => "Enter clinical text and press Enter to analyze",
        InputTab::File => "Select a PDF, DOCX, or TXT file and press Enter to analyze",
    }
}

fn key_hints(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Edit => {
            " Enter analyze · Tab switch input · Ctrl+J newline · Alt+1-3 samples · Ctrl+E export · Esc results · Ctrl+C quit"
        }
        InputMode::Browse => {
            " ↑/↓ select · Enter/Space expand · c copy · e export · i edit input · q quit"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ComponentType;
    use crate::test_support::{sample_component, test_session, test_stats};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(session: &Session, tui: &mut TuiState) {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, session, tui, 0)).unwrap();
    }

    #[test]
    fn test_draw_ui_initial_state() {
        let session = test_session();
        let mut tui = TuiState::new();
        draw(&session, &mut tui);
    }

    #[test]
    fn test_draw_ui_with_results_and_error_states() {
        let mut session = test_session();
        let mut tui = TuiState::new();

        session.components = vec![
            sample_component(ComponentType::Safety, "AE Reporting"),
            sample_component(ComponentType::Ethics, "Consent"),
        ];
        session.stats = Some(test_stats());
        session.expanded = Some(0);
        session.copied = Some(1);
        draw(&session, &mut tui);

        session.components.clear();
        session.error = Some("Server error: model timed out".to_string());
        draw(&session, &mut tui);

        session.error = None;
        session.is_loading = true;
        draw(&session, &mut tui);
    }

    #[test]
    fn empty_state_differs_per_tab() {
        assert_ne!(
            empty_state_text(InputTab::Text),
            empty_state_text(InputTab::File)
        );
    }
}

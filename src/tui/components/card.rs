//! # Card Component
//!
//! Renders one classified excerpt as a color-coded, bordered card:
//!
//! ```text
//! ╭ safety ──────────────────────────────── 93% ╮
//! │ Dose Modification for Toxicity Management   │
//! │ Page 3 • Section 5.2                        │
//! │ Dose interruption and/or reduction may be   │
//! │ implemented at any time for any grade...    │
//! │ Reuse: medium   ▼ expand                    │
//! ╰─────────────────────────────────────────────╯
//! ```
//!
//! Collapsed cards show the first few body lines; expanded cards show the
//! full body plus the model's rationale. [`Card::calculate_height`] predicts
//! rendered height from the same pre-wrapped lines the renderer draws, so
//! the parent list can lay out its scroll view without rendering twice.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::api::{ComponentType, IdentifiedComponent, Location, ReusePotential};
use crate::tui::components::text_wrap::wrap_text_lines;

/// Body lines shown while collapsed (the web-era card faded out after a
/// couple of hundred characters; three terminal lines is the equivalent).
const COLLAPSED_TEXT_LINES: usize = 3;
/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// Accent color for each category. Unknown categories borrow the
/// `study_section` accent but keep their own label.
pub fn type_color(kind: ComponentType) -> Color {
    match kind {
        ComponentType::Boilerplate => Color::Blue,
        ComponentType::Definition => Color::Green,
        ComponentType::StudySection | ComponentType::Unknown => Color::Yellow,
        ComponentType::DrugInfo => Color::Magenta,
        ComponentType::Safety => Color::Red,
        ComponentType::Procedure => Color::LightBlue,
        ComponentType::CsrStructure => Color::LightMagenta,
        ComponentType::Statistical => Color::Cyan,
        ComponentType::RegulatoryGuidance => Color::LightGreen,
        ComponentType::Ethics => Color::LightYellow,
    }
}

/// Confidence badge color: ≥0.90 green, ≥0.80 yellow, below that red.
pub fn confidence_color(confidence: f64) -> Color {
    if confidence >= 0.9 {
        Color::Green
    } else if confidence >= 0.8 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn reuse_color(reuse: ReusePotential) -> Color {
    match reuse {
        ReusePotential::High => Color::Green,
        ReusePotential::Medium => Color::Yellow,
        ReusePotential::Low => Color::Red,
        ReusePotential::Unspecified => Color::DarkGray,
    }
}

fn format_location(location: &Location) -> String {
    let mut parts = Vec::new();
    if let Some(page) = location.page {
        parts.push(format!("Page {page}"));
    }
    if let Some(section) = location.section.as_deref().filter(|s| !s.is_empty()) {
        parts.push(section.to_string());
    }
    parts.join(" • ")
}

/// A transient component: created fresh each frame with the data it needs.
/// Selection, expansion and the copied badge are tracked by the parent
/// `CardList` and passed in as flags.
#[derive(Clone, Copy)]
pub struct Card<'a> {
    pub component: &'a IdentifiedComponent,
    pub is_selected: bool,
    pub is_expanded: bool,
    pub is_copied: bool,
}

/// The inner lines of a card, pre-wrapped to the content width. Built once
/// per card and shared by rendering and height calculation.
struct CardBody {
    title: Vec<String>,
    location: Option<String>,
    text: Vec<String>,
    text_truncated: bool,
    rationale: Vec<String>,
}

impl CardBody {
    fn build(component: &IdentifiedComponent, content_width: u16, expanded: bool) -> Self {
        let title = wrap_text_lines(component.title.trim(), content_width);
        let location = component.location_badge().map(format_location);

        let all_text = wrap_text_lines(component.text.trim(), content_width);
        let text_truncated = !expanded && all_text.len() > COLLAPSED_TEXT_LINES;
        let text = if expanded {
            all_text
        } else {
            all_text.into_iter().take(COLLAPSED_TEXT_LINES).collect()
        };

        let rationale = if expanded && !component.rationale.trim().is_empty() {
            wrap_text_lines(
                &format!("Rationale: {}", component.rationale.trim()),
                content_width,
            )
        } else {
            Vec::new()
        };

        CardBody {
            title,
            location,
            text,
            text_truncated,
            rationale,
        }
    }

    /// Content lines: title + location + body + meta line + rationale.
    fn line_count(&self) -> usize {
        self.title.len()
            + usize::from(self.location.is_some())
            + self.text.len()
            + 1
            + self.rationale.len()
    }
}

impl<'a> Card<'a> {
    pub fn new(
        component: &'a IdentifiedComponent,
        is_selected: bool,
        is_expanded: bool,
        is_copied: bool,
    ) -> Self {
        Self {
            component,
            is_selected,
            is_expanded,
            is_copied,
        }
    }

    /// Predict the rendered height of a card at the given outer width.
    pub fn calculate_height(component: &IdentifiedComponent, width: u16, expanded: bool) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding; still occupy a row.
            return 1;
        }
        let body = CardBody::build(component, content_width, expanded);
        body.line_count() as u16 + VERTICAL_OVERHEAD
    }

    fn meta_line(&self, body: &CardBody) -> Line<'static> {
        let reuse = self.component.reuse_potential;
        let mut spans = vec![Span::styled(
            format!("Reuse: {}", reuse.label()),
            Style::default().fg(reuse_color(reuse)),
        )];

        if self.is_copied {
            spans.push(Span::raw("   "));
            spans.push(Span::styled(
                "✓ Copied",
                Style::default().fg(Color::Green),
            ));
        }

        let hint = if self.is_expanded {
            "▲ collapse"
        } else if body.text_truncated {
            "▼ expand"
        } else {
            ""
        };
        if !hint.is_empty() {
            spans.push(Span::raw("   "));
            spans.push(Span::styled(hint, Style::default().fg(Color::DarkGray)));
        }

        Line::from(spans)
    }
}

impl Widget for Card<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let accent = type_color(self.component.kind);
        let border_style = if self.is_selected {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(accent).add_modifier(Modifier::DIM)
        };

        let confidence_pct = (self.component.confidence * 100.0).round() as u32;
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(
                Line::from(Span::styled(
                    format!(" {} ", self.component.kind.label()),
                    Style::default().fg(Color::Black).bg(accent),
                ))
                .left_aligned(),
            )
            .title(
                Line::from(Span::styled(
                    format!(" {confidence_pct}% "),
                    Style::default().fg(confidence_color(self.component.confidence)),
                ))
                .right_aligned(),
            )
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(area);
        block.render(area, buf);

        let body = CardBody::build(self.component, inner.width, self.is_expanded);

        let mut lines: Vec<Line> = Vec::new();
        for title_line in &body.title {
            lines.push(Line::from(Span::styled(
                title_line.clone(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )));
        }
        if let Some(location) = &body.location {
            lines.push(Line::from(Span::styled(
                location.clone(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        for text_line in &body.text {
            lines.push(Line::raw(text_line.clone()));
        }
        lines.push(self.meta_line(&body));
        for rationale_line in &body.rationale {
            lines.push(Line::from(Span::styled(
                rationale_line.clone(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        // Lines are pre-wrapped; no Paragraph wrapping wanted.
        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_component;

    fn long_component() -> IdentifiedComponent {
        let mut comp = sample_component(ComponentType::Safety, "AE Reporting");
        comp.text = "word ".repeat(200);
        comp.rationale = "Standard regulatory language seen across protocols.".to_string();
        comp
    }

    // ==========================================================================
    // calculate_height
    // ==========================================================================

    #[test]
    fn collapsed_height_caps_body_lines() {
        let comp = long_component();
        // title(1) + text(3 capped) + meta(1) + borders(2)
        assert_eq!(Card::calculate_height(&comp, 80, false), 7);
    }

    #[test]
    fn expanded_height_grows_with_body_and_rationale() {
        let comp = long_component();
        let collapsed = Card::calculate_height(&comp, 80, false);
        let expanded = Card::calculate_height(&comp, 80, true);
        assert!(expanded > collapsed);
    }

    #[test]
    fn location_badge_adds_one_line() {
        let mut comp = sample_component(ComponentType::Ethics, "Consent");
        let without = Card::calculate_height(&comp, 80, false);
        comp.location = Some(Location {
            page: Some(3),
            section: Some("Section 5.1".to_string()),
        });
        let with = Card::calculate_height(&comp, 80, false);
        assert_eq!(with, without + 1);
    }

    #[test]
    fn empty_rationale_adds_nothing_when_expanded() {
        let comp = sample_component(ComponentType::Definition, "AE Definition");
        assert!(comp.rationale.is_empty());
        // Short text: collapsed and expanded heights agree.
        assert_eq!(
            Card::calculate_height(&comp, 80, false),
            Card::calculate_height(&comp, 80, true)
        );
    }

    #[test]
    fn zero_width_returns_minimum() {
        let comp = sample_component(ComponentType::Safety, "x");
        assert_eq!(Card::calculate_height(&comp, 0, false), 1);
        assert_eq!(Card::calculate_height(&comp, HORIZONTAL_OVERHEAD, false), 1);
    }

    // ==========================================================================
    // Colors and badges
    // ==========================================================================

    #[test]
    fn confidence_thresholds() {
        assert_eq!(confidence_color(0.95), Color::Green);
        assert_eq!(confidence_color(0.9), Color::Green);
        assert_eq!(confidence_color(0.85), Color::Yellow);
        assert_eq!(confidence_color(0.8), Color::Yellow);
        assert_eq!(confidence_color(0.5), Color::Red);
    }

    #[test]
    fn unknown_type_borrows_study_section_color() {
        assert_eq!(
            type_color(ComponentType::Unknown),
            type_color(ComponentType::StudySection)
        );
    }

    #[test]
    fn every_known_type_has_a_distinct_color() {
        use ComponentType::*;
        let kinds = [
            Boilerplate,
            Definition,
            StudySection,
            DrugInfo,
            Safety,
            Procedure,
            CsrStructure,
            Statistical,
            RegulatoryGuidance,
            Ethics,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in kinds.iter().skip(i + 1) {
                assert_ne!(type_color(*a), type_color(*b), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn location_formatting() {
        assert_eq!(
            format_location(&Location {
                page: Some(3),
                section: Some("12.2 ADVERSE EVENTS".to_string()),
            }),
            "Page 3 • 12.2 ADVERSE EVENTS"
        );
        assert_eq!(
            format_location(&Location {
                page: Some(3),
                section: None,
            }),
            "Page 3"
        );
        assert_eq!(
            format_location(&Location {
                page: None,
                section: Some("Synopsis".to_string()),
            }),
            "Synopsis"
        );
    }

    #[test]
    fn truncation_hint_only_when_text_overflows() {
        let short = sample_component(ComponentType::Safety, "short");
        let body = CardBody::build(&short, 76, false);
        assert!(!body.text_truncated);

        let body = CardBody::build(&long_component(), 76, false);
        assert!(body.text_truncated);

        let body = CardBody::build(&long_component(), 76, true);
        assert!(!body.text_truncated);
    }
}

use serde::{Deserialize, Serialize};

/// Category tag assigned to a classified excerpt.
///
/// The backend's taxonomy covers ten categories spanning protocol,
/// CSR, and ICH-guideline content. Values it may add later (or typos in a
/// hand-edited response) deserialize to [`ComponentType::Unknown`] so a
/// single odd component never fails the whole response.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
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
    #[serde(other)]
    Unknown,
}

impl ComponentType {
    /// Human-readable label for the card badge (underscores become spaces).
    pub fn label(self) -> &'static str {
        match self {
            ComponentType::Boilerplate => "boilerplate",
            ComponentType::Definition => "definition",
            ComponentType::StudySection => "study section",
            ComponentType::DrugInfo => "drug info",
            ComponentType::Safety => "safety",
            ComponentType::Procedure => "procedure",
            ComponentType::CsrStructure => "csr structure",
            ComponentType::Statistical => "statistical",
            ComponentType::RegulatoryGuidance => "regulatory guidance",
            ComponentType::Ethics => "ethics",
            ComponentType::Unknown => "unknown",
        }
    }
}

/// Backend-assigned tag for how broadly an excerpt could be reused.
/// Display-only; unknown values fall back to [`ReusePotential::Unspecified`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReusePotential {
    High,
    Medium,
    Low,
    #[serde(other)]
    Unspecified,
}

impl ReusePotential {
    pub fn label(self) -> &'static str {
        match self {
            ReusePotential::High => "high",
            ReusePotential::Medium => "medium",
            ReusePotential::Low => "low",
            ReusePotential::Unspecified => "unspecified",
        }
    }
}

/// Where an excerpt was found in the source document. Both fields are
/// optional — text analysis has no pages, and the model does not always
/// recognize a section heading.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Location {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub section: Option<String>,
}

impl Location {
    /// True when there is nothing worth showing in the location badge.
    pub fn is_empty(&self) -> bool {
        self.page.is_none() && self.section.as_deref().map_or(true, str::is_empty)
    }
}

/// One classified excerpt returned by the backend. Never mutated client-side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IdentifiedComponent {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    pub title: String,
    pub text: String,
    /// Model confidence in [0, 1].
    pub confidence: f64,
    pub reuse_potential: ReusePotential,
    /// Free-text explanation, shown only when the card is expanded.
    /// The backend sends an empty string when it has nothing to say.
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub location: Option<Location>,
}

impl IdentifiedComponent {
    /// Location, if present and non-empty.
    pub fn location_badge(&self) -> Option<&Location> {
        self.location.as_ref().filter(|loc| !loc.is_empty())
    }
}

/// Response body shared by `/api/identify` and `/api/upload`.
///
/// The upload endpoint extends the identify shape with file-level fields
/// (`total_pages`, `filename`, `text_length`, `truncated`); those default to
/// absent/false when parsing an identify response.
#[derive(Deserialize, Debug)]
pub struct AnalysisResponse {
    pub components: Vec<IdentifiedComponent>,
    pub total_components: usize,
    pub model: String,
    pub method: String,
    pub examples_used: u32,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub text_length: Option<usize>,
    /// True when the backend discarded content beyond its processing limit.
    #[serde(default)]
    pub truncated: bool,
}

impl AnalysisResponse {
    /// Split into the component list and the derived summary stats.
    pub fn into_parts(self) -> (Vec<IdentifiedComponent>, AnalysisStats) {
        let stats = AnalysisStats {
            total: self.total_components,
            model: self.model,
            method: self.method,
            examples_used: self.examples_used,
            total_pages: self.total_pages,
            filename: self.filename,
            text_length: self.text_length,
            truncated: self.truncated,
        };
        (self.components, stats)
    }
}

/// Summary derived from the last successful analysis, shown as a badge in
/// the results panel and used to name the export file.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisStats {
    pub total: usize,
    pub model: String,
    pub method: String,
    pub examples_used: u32,
    pub total_pages: Option<u32>,
    pub filename: Option<String>,
    pub text_length: Option<usize>,
    pub truncated: bool,
}

impl AnalysisStats {
    /// Badge text: `"12 found • 34 pages • protocol.pdf • (truncated)"`.
    /// File-only parts are simply omitted for text analyses.
    pub fn badge(&self) -> String {
        let mut parts = vec![format!("{} found", self.total)];
        if let Some(pages) = self.total_pages {
            parts.push(format!("{pages} pages"));
        }
        if let Some(name) = &self.filename {
            parts.push(name.clone());
        }
        if self.truncated {
            parts.push("(truncated)".to_string());
        }
        parts.join(" • ")
    }
}

/// Response of the backend health probe (`GET /`).
#[derive(Deserialize, Debug, Clone)]
pub struct ServiceHealth {
    pub status: String,
    pub service: String,
    pub version: String,
    pub model: String,
    pub examples: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_type_round_trips_snake_case() {
        let json = serde_json::to_string(&ComponentType::CsrStructure).unwrap();
        assert_eq!(json, r#""csr_structure""#);
        let back: ComponentType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ComponentType::CsrStructure);
    }

    #[test]
    fn unrecognized_component_type_falls_back_to_unknown() {
        let kind: ComponentType = serde_json::from_str(r#""pharmacovigilance""#).unwrap();
        assert_eq!(kind, ComponentType::Unknown);
        assert_eq!(kind.label(), "unknown");
    }

    #[test]
    fn unrecognized_reuse_potential_falls_back() {
        let reuse: ReusePotential = serde_json::from_str(r#""very-high""#).unwrap();
        assert_eq!(reuse, ReusePotential::Unspecified);
    }

    #[test]
    fn component_parses_with_minimal_fields() {
        // Identify responses omit location; rationale may be missing entirely.
        let json = r#"{
            "type": "safety",
            "title": "AE Reporting",
            "text": "All AEs must be recorded...",
            "confidence": 0.93,
            "reuse_potential": "high"
        }"#;
        let comp: IdentifiedComponent = serde_json::from_str(json).unwrap();
        assert_eq!(comp.kind, ComponentType::Safety);
        assert!(comp.rationale.is_empty());
        assert!(comp.location.is_none());
    }

    #[test]
    fn location_with_nulls_is_empty() {
        let json = r#"{"page": null, "section": null}"#;
        let loc: Location = serde_json::from_str(json).unwrap();
        assert!(loc.is_empty());
    }

    #[test]
    fn location_badge_filters_empty_locations() {
        let mut comp: IdentifiedComponent = serde_json::from_str(
            r#"{"type":"ethics","title":"t","text":"x","confidence":0.9,"reuse_potential":"low"}"#,
        )
        .unwrap();
        comp.location = Some(Location::default());
        assert!(comp.location_badge().is_none());

        comp.location = Some(Location {
            page: Some(3),
            section: None,
        });
        assert_eq!(comp.location_badge().unwrap().page, Some(3));
    }

    /// Contract test against the upload response shape.
    #[test]
    fn upload_response_parses_file_fields() {
        let json = r#"{
            "success": true,
            "components": [],
            "total_components": 0,
            "model": "gpt-4o-mini",
            "method": "few-shot",
            "examples_used": 18,
            "total_pages": 42,
            "filename": "protocol.pdf",
            "text_length": 50000,
            "truncated": true
        }"#;
        let resp: AnalysisResponse = serde_json::from_str(json).unwrap();
        let (components, stats) = resp.into_parts();
        assert!(components.is_empty());
        assert_eq!(stats.total_pages, Some(42));
        assert_eq!(stats.filename.as_deref(), Some("protocol.pdf"));
        assert!(stats.truncated);
    }

    /// Identify responses carry none of the file fields; they must default.
    #[test]
    fn identify_response_defaults_file_fields() {
        let json = r#"{
            "components": [],
            "total_components": 0,
            "model": "gpt-4o-mini",
            "method": "few-shot",
            "examples_used": 18
        }"#;
        let resp: AnalysisResponse = serde_json::from_str(json).unwrap();
        assert!(resp.total_pages.is_none());
        assert!(resp.filename.is_none());
        assert!(!resp.truncated);
    }

    #[test]
    fn stats_badge_formats_all_parts() {
        let stats = AnalysisStats {
            total: 12,
            model: "gpt-4o-mini".to_string(),
            method: "few-shot".to_string(),
            examples_used: 18,
            total_pages: Some(34),
            filename: Some("protocol.pdf".to_string()),
            text_length: Some(50000),
            truncated: true,
        };
        assert_eq!(stats.badge(), "12 found • 34 pages • protocol.pdf • (truncated)");
    }

    #[test]
    fn stats_badge_text_analysis_shows_count_only() {
        let stats = AnalysisStats {
            total: 0,
            model: "m".to_string(),
            method: "few-shot".to_string(),
            examples_used: 18,
            total_pages: None,
            filename: None,
            text_length: None,
            truncated: false,
        };
        assert_eq!(stats.badge(), "0 found");
    }
}

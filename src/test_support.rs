//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{
    AnalysisBackend, AnalysisResponse, AnalysisStats, ApiError, ComponentType,
    IdentifiedComponent, ReusePotential, ServiceHealth,
};
use crate::core::config::ResolvedConfig;
use crate::core::state::Session;

/// A backend stub for tests that never touch the network.
pub struct NoopBackend;

#[async_trait]
impl AnalysisBackend for NoopBackend {
    fn name(&self) -> &str {
        "noop"
    }

    async fn identify(&self, _text: &str) -> Result<AnalysisResponse, ApiError> {
        Ok(empty_response())
    }

    async fn upload(&self, _path: &Path) -> Result<AnalysisResponse, ApiError> {
        Ok(empty_response())
    }

    async fn health(&self) -> Result<ServiceHealth, ApiError> {
        Err(ApiError::Network("noop backend".to_string()))
    }
}

fn empty_response() -> AnalysisResponse {
    serde_json::from_value(serde_json::json!({
        "components": [],
        "total_components": 0,
        "model": "test-model",
        "method": "few-shot",
        "examples_used": 18
    }))
    .expect("static test response must parse")
}

/// Creates a test Session with a NoopBackend and default config.
pub fn test_session() -> Session {
    Session::new(Arc::new(NoopBackend), &ResolvedConfig::default())
}

/// A component fixture with the given category and title.
pub fn sample_component(kind: ComponentType, title: &str) -> IdentifiedComponent {
    IdentifiedComponent {
        kind,
        title: title.to_string(),
        text: format!("Excerpt body for {title}."),
        confidence: 0.95,
        reuse_potential: ReusePotential::Medium,
        rationale: String::new(),
        location: None,
    }
}

/// Stats as the backend would report them for an upload.
pub fn test_stats() -> AnalysisStats {
    AnalysisStats {
        total: 1,
        model: "test-model".to_string(),
        method: "few-shot".to_string(),
        examples_used: 18,
        total_pages: None,
        filename: Some("protocol.pdf".to_string()),
        text_length: Some(1200),
        truncated: false,
    }
}

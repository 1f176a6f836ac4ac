//! # Session State
//!
//! Core session state for protoscope. This module contains domain state
//! only - no TUI-specific types. Presentation state lives in the `tui`
//! module.
//!
//! ```text
//! Session
//! ├── backend: Arc<dyn AnalysisBackend>   // classification service
//! ├── active_tab: InputTab                // Text | File input mode
//! ├── input_text: String                  // pasted clinical text
//! ├── file_input: String                  // path being typed
//! ├── selected_file: Option<SelectedFile> // validated upload candidate
//! ├── components: Vec<IdentifiedComponent>// last successful result
//! ├── is_loading: bool                    // request in flight
//! ├── error: Option<String>               // banner message
//! ├── stats: Option<AnalysisStats>        // summary of last result
//! ├── expanded: Option<usize>             // at most one expanded card
//! ├── copied: Option<usize>               // transient "copied" badge
//! └── request_seq / copy_seq              // stale-completion guards
//! ```
//!
//! State changes only happen through `update(session, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::path::PathBuf;
use std::sync::Arc;

use crate::api::{AnalysisBackend, AnalysisStats, IdentifiedComponent};
use crate::core::config::ResolvedConfig;

/// File extensions the backend can ingest. Checked as a case-insensitive
/// suffix of the file name, both at selection time and before submission.
pub const ALLOWED_EXTENSIONS: [&str; 3] = [".pdf", ".docx", ".txt"];

/// True if `name` ends with one of [`ALLOWED_EXTENSIONS`], ignoring case.
pub fn has_allowed_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    ALLOWED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Which input mode is active. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTab {
    Text,
    File,
}

/// A file that passed the extension check and is ready to upload.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub path: PathBuf,
    /// Size in bytes, if it could be read at selection time. Display only.
    pub size: Option<u64>,
}

impl SelectedFile {
    /// File name for display and the export artifact.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

pub struct Session {
    pub backend: Arc<dyn AnalysisBackend>,
    pub active_tab: InputTab,
    pub input_text: String,
    pub file_input: String,
    pub selected_file: Option<SelectedFile>,
    pub components: Vec<IdentifiedComponent>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub stats: Option<AnalysisStats>,
    /// Index of the sole expanded card, if any.
    pub expanded: Option<usize>,
    /// Index showing the transient "copied" badge, if any.
    pub copied: Option<usize>,
    pub status_message: String,
    /// Model name reported by the startup health probe, if it answered.
    pub backend_model: Option<String>,
    /// Where export artifacts are written.
    pub export_dir: PathBuf,
    /// Sequence number of the most recently dispatched analysis. A
    /// settlement is applied only when its tag matches this value, so a
    /// slow response from an earlier submission can never overwrite a
    /// newer one.
    pub request_seq: u64,
    /// Same idea for the copied badge: a newer copy replaces the pending
    /// 2-second expiry of an older one.
    pub copy_seq: u64,
}

impl Session {
    pub fn new(backend: Arc<dyn AnalysisBackend>, config: &ResolvedConfig) -> Self {
        Self {
            backend,
            // The upload flow is the primary path, same default as the tab order.
            active_tab: InputTab::File,
            input_text: String::new(),
            file_input: String::new(),
            selected_file: None,
            components: Vec::new(),
            is_loading: false,
            error: None,
            stats: None,
            expanded: None,
            copied: None,
            status_message: String::from("Ready"),
            backend_model: None,
            export_dir: config.export_dir.clone(),
            request_seq: 0,
            copy_seq: 0,
        }
    }

    /// The buffer being edited in the active tab.
    pub fn active_buffer_mut(&mut self) -> &mut String {
        match self.active_tab {
            InputTab::Text => &mut self.input_text,
            InputTab::File => &mut self.file_input,
        }
    }
}

//! # Actions
//!
//! Everything that can happen in protoscope becomes an `Action`.
//! User presses Enter on the Text tab? That's `Action::Submit`.
//! The backend answers? That's `Action::AnalysisFinished { .. }`.
//!
//! The `update()` function takes the current session and an action, mutates
//! the session, and returns the side effect (if any) the caller must
//! perform. No I/O here - requests, clipboard writes and file writes all
//! happen in the TUI layer.
//!
//! ```text
//! Session + Action  →  update()  →  Session' + Effect
//! ```
//!
//! Async completions (`AnalysisFinished`, `CopyBadgeExpired`) carry the
//! sequence number they were dispatched with; `update()` discards any
//! completion whose tag is no longer current. That is the entire
//! overlapping-request policy: no cancellation, just "only the latest
//! dispatch may settle".

use std::path::PathBuf;

use log::{debug, info};

use crate::api::{AnalysisStats, IdentifiedComponent};
use crate::core::samples;
use crate::core::state::{has_allowed_extension, InputTab, SelectedFile, Session};

/// Validation messages shown without contacting the backend.
pub const ERR_EMPTY_TEXT: &str = "Please enter some clinical text to analyze";
pub const ERR_NO_FILE: &str = "Please select a file to analyze";
pub const ERR_BAD_FILE_TYPE: &str = "Invalid file type. Please upload PDF, DOCX, or TXT files.";

/// What an analysis request carries to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisPayload {
    Text(String),
    File(PathBuf),
}

/// The successful half of a settlement.
#[derive(Debug)]
pub struct AnalysisSuccess {
    pub components: Vec<IdentifiedComponent>,
    pub stats: AnalysisStats,
}

#[derive(Debug)]
pub enum Action {
    /// Switch the input mode. Never clears results.
    SwitchTab(InputTab),
    /// Append a character to the active tab's buffer.
    InputChar(char),
    /// Remove the last character from the active tab's buffer.
    Backspace,
    /// Bracketed paste into the active tab's buffer.
    Paste(String),
    /// Clear the active tab's buffer.
    ClearInput,
    /// Validate and select a file for upload. `size` is display-only
    /// metadata gathered by the caller.
    SelectFile { path: PathBuf, size: Option<u64> },
    /// Drop the current file selection.
    ClearSelectedFile,
    /// Copy a built-in sample into the text buffer.
    LoadSample(usize),
    /// Run the analysis for the active tab.
    Submit,
    /// An analysis request settled. `seq` is the tag it was dispatched with.
    AnalysisFinished {
        seq: u64,
        outcome: Result<AnalysisSuccess, String>,
    },
    /// Expand/collapse the card at the given index.
    ToggleExpand(usize),
    /// Copy a card's excerpt to the clipboard.
    CopyCard(usize),
    /// The 2-second copied-badge timer fired.
    CopyBadgeExpired { seq: u64 },
    /// Write the current component list to a JSON file.
    ExportRequested,
    /// The export write finished (performed by the TUI layer).
    ExportFinished(Result<PathBuf, String>),
    /// Backend health probe settled. `None` means unreachable.
    HealthChecked(Option<crate::api::ServiceHealth>),
    Quit,
}

/// Side effects `update()` asks the caller to perform.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// Spawn a backend request tagged with `seq`.
    SpawnAnalysis { seq: u64, payload: AnalysisPayload },
    /// Write `text` to the clipboard and start the badge expiry timer.
    CopyToClipboard { text: String, seq: u64 },
    /// Serialize the current components to the export directory.
    Export,
    Quit,
}

pub fn update(session: &mut Session, action: Action) -> Effect {
    match action {
        Action::SwitchTab(tab) => {
            session.active_tab = tab;
            Effect::None
        }

        Action::InputChar(c) => {
            session.active_buffer_mut().push(c);
            Effect::None
        }

        Action::Backspace => {
            session.active_buffer_mut().pop();
            Effect::None
        }

        Action::Paste(text) => {
            session.active_buffer_mut().push_str(&text);
            Effect::None
        }

        Action::ClearInput => {
            session.active_buffer_mut().clear();
            Effect::None
        }

        Action::SelectFile { path, size } => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if has_allowed_extension(&name) {
                session.status_message = format!("Selected {name}");
                session.selected_file = Some(SelectedFile { path, size });
                session.error = None;
            } else {
                // A bad pick never disturbs an earlier valid selection.
                session.error = Some(ERR_BAD_FILE_TYPE.to_string());
            }
            Effect::None
        }

        Action::ClearSelectedFile => {
            session.selected_file = None;
            Effect::None
        }

        Action::LoadSample(index) => {
            if let Some(sample) = samples::get(index) {
                session.input_text = sample.text.to_string();
                session.active_tab = InputTab::Text;
                session.components.clear();
                session.error = None;
                session.stats = None;
                session.expanded = None;
                session.copied = None;
                session.status_message = format!("Loaded sample: {}", sample.title);
            }
            Effect::None
        }

        Action::Submit => {
            if session.is_loading {
                return Effect::None;
            }

            let payload = match session.active_tab {
                InputTab::Text => {
                    if session.input_text.trim().is_empty() {
                        session.error = Some(ERR_EMPTY_TEXT.to_string());
                        return Effect::None;
                    }
                    AnalysisPayload::Text(session.input_text.clone())
                }
                InputTab::File => match &session.selected_file {
                    Some(file) => AnalysisPayload::File(file.path.clone()),
                    None => {
                        session.error = Some(ERR_NO_FILE.to_string());
                        return Effect::None;
                    }
                },
            };

            session.request_seq += 1;
            session.is_loading = true;
            session.error = None;
            session.components.clear();
            session.stats = None;
            session.expanded = None;
            session.copied = None;
            session.status_message = String::from("Analyzing...");
            info!("Dispatching analysis #{}", session.request_seq);
            Effect::SpawnAnalysis {
                seq: session.request_seq,
                payload,
            }
        }

        Action::AnalysisFinished { seq, outcome } => {
            if seq != session.request_seq {
                // A newer submission superseded this one; discard the
                // settlement whether it succeeded or failed.
                debug!(
                    "Discarding stale analysis #{} (current #{})",
                    seq, session.request_seq
                );
                return Effect::None;
            }
            session.is_loading = false;
            match outcome {
                Ok(success) => {
                    session.status_message =
                        format!("{} components identified", success.stats.total);
                    session.components = success.components;
                    session.stats = Some(success.stats);
                }
                Err(message) => {
                    session.error = Some(message);
                    session.status_message = String::from("Analysis failed");
                }
            }
            Effect::None
        }

        Action::ToggleExpand(index) => {
            if index < session.components.len() {
                session.expanded = if session.expanded == Some(index) {
                    None
                } else {
                    Some(index)
                };
            }
            Effect::None
        }

        Action::CopyCard(index) => match session.components.get(index) {
            Some(component) => {
                session.copy_seq += 1;
                session.copied = Some(index);
                Effect::CopyToClipboard {
                    text: component.text.clone(),
                    seq: session.copy_seq,
                }
            }
            None => Effect::None,
        },

        Action::CopyBadgeExpired { seq } => {
            if seq == session.copy_seq {
                session.copied = None;
            }
            Effect::None
        }

        Action::ExportRequested => {
            if session.components.is_empty() {
                session.status_message = String::from("Nothing to export yet");
                Effect::None
            } else {
                Effect::Export
            }
        }

        Action::ExportFinished(result) => {
            session.status_message = match result {
                Ok(path) => format!("Exported to {}", path.display()),
                Err(message) => format!("Export failed: {message}"),
            };
            Effect::None
        }

        Action::HealthChecked(health) => {
            match health {
                Some(h) => {
                    session.status_message =
                        format!("Connected to {} v{}", h.service, h.version);
                    session.backend_model = Some(h.model);
                }
                None => {
                    session.status_message =
                        format!("Backend unreachable at {}", session.backend.name());
                }
            }
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

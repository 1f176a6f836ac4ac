//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Loading**: draws every ~80ms so the spinner stays smooth.
//! - **Idle**: sleeps up to 500ms, only redraws on events or background
//!   actions.
//!
//! ## Input Modes
//!
//! - **Edit**: keystrokes edit the active input (text or file path);
//!   Enter submits, Esc switches to Browse.
//! - **Browse**: arrow keys walk the result cards; Enter/Space expands,
//!   `c` copies, `e` exports, `q` quits. Typing anything else returns to
//!   Edit and forwards the keystroke.

pub mod component;
pub mod components;
pub mod event;
pub mod ui;

use std::io::{Write, stdout};
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use log::{debug, info, warn};

use crate::api::{AnalysisBackend, HttpBackend};
use crate::core::action::{Action, AnalysisPayload, AnalysisSuccess, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::export;
use crate::core::state::{InputTab, Session};
use crate::tui::component::EventHandler;
use crate::tui::components::CardListState;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// How long the per-card "✓ Copied" badge stays up.
const COPY_BADGE_DURATION: Duration = Duration::from_secs(2);

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Text editing in the input panel. Esc switches to Browse.
    Edit,
    /// Navigate result cards with arrow keys. Typing switches back to Edit.
    Browse,
}

/// TUI-specific presentation state (not part of core session logic)
pub struct TuiState {
    pub card_list: CardListState,
    pub input_mode: InputMode,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            card_list: CardListState::new(),
            input_mode: InputMode::Edit, // User expects to type immediately
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Mouse capture is only used for wheel scrolling in the results list.
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse capture, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend: Arc<dyn AnalysisBackend> =
        Arc::new(HttpBackend::new(config.backend_base_url.clone()));
    let mut app = Session::new(backend, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    spawn_health_probe(&app, tx.clone());

    // Spinner timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    loop {
        let animating = app.is_loading;
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short while the spinner runs, long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits regardless of mode
            if matches!(event, TuiEvent::ForceQuit) {
                should_quit |= apply(&mut app, &tx, Action::Quit);
                continue;
            }

            // Mode-independent controls
            match &event {
                TuiEvent::SwitchTab => {
                    let next = match app.active_tab {
                        InputTab::Text => InputTab::File,
                        InputTab::File => InputTab::Text,
                    };
                    should_quit |= apply(&mut app, &tx, Action::SwitchTab(next));
                    continue;
                }
                TuiEvent::Export => {
                    should_quit |= apply(&mut app, &tx, Action::ExportRequested);
                    continue;
                }
                TuiEvent::LoadSample(index) => {
                    // The sample catalog is only offered in text mode.
                    if app.active_tab == InputTab::Text {
                        should_quit |= apply(&mut app, &tx, Action::LoadSample(*index));
                    }
                    continue;
                }
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown => {
                    tui.card_list.handle_event(&event);
                    continue;
                }
                _ => {}
            }

            // Modal event dispatch
            match tui.input_mode {
                InputMode::Edit => match event {
                    TuiEvent::Escape => {
                        tui.input_mode = InputMode::Browse;
                        if tui.card_list.selected.is_none() && !app.components.is_empty() {
                            tui.card_list.selected = Some(0);
                        }
                    }
                    TuiEvent::Submit => {
                        // On the File tab, Enter first turns the typed path
                        // into a selection; with a selection it submits.
                        if app.active_tab == InputTab::File
                            && app.selected_file.is_none()
                            && !app.file_input.trim().is_empty()
                        {
                            let path = PathBuf::from(app.file_input.trim());
                            let size = std::fs::metadata(&path).ok().map(|m| m.len());
                            should_quit |= apply(&mut app, &tx, Action::SelectFile { path, size });
                        } else {
                            should_quit |= apply(&mut app, &tx, Action::Submit);
                        }
                    }
                    TuiEvent::InputChar(c) => {
                        // Newlines make no sense in a file path
                        if !(c == '\n' && app.active_tab == InputTab::File) {
                            should_quit |= apply(&mut app, &tx, Action::InputChar(c));
                        }
                    }
                    TuiEvent::Paste(text) => {
                        should_quit |= apply(&mut app, &tx, Action::Paste(text));
                    }
                    TuiEvent::Backspace => {
                        should_quit |= apply(&mut app, &tx, Action::Backspace);
                    }
                    TuiEvent::ClearInput => {
                        should_quit |= apply(&mut app, &tx, Action::ClearInput);
                    }
                    TuiEvent::ClearFile => {
                        should_quit |= apply(&mut app, &tx, Action::ClearSelectedFile);
                    }
                    _ => {}
                },
                InputMode::Browse => match event {
                    TuiEvent::Escape | TuiEvent::InputChar('i') => {
                        tui.input_mode = InputMode::Edit;
                    }
                    TuiEvent::InputChar('q') => {
                        should_quit |= apply(&mut app, &tx, Action::Quit);
                    }
                    TuiEvent::InputChar('c') => {
                        if let Some(index) = tui.card_list.selected {
                            should_quit |= apply(&mut app, &tx, Action::CopyCard(index));
                        }
                    }
                    TuiEvent::InputChar('e') => {
                        should_quit |= apply(&mut app, &tx, Action::ExportRequested);
                    }
                    TuiEvent::Submit | TuiEvent::InputChar(' ') => {
                        if let Some(index) = tui.card_list.selected {
                            should_quit |= apply(&mut app, &tx, Action::ToggleExpand(index));
                        }
                    }
                    TuiEvent::CursorUp => {
                        tui.card_list.select_prev(app.components.len());
                    }
                    TuiEvent::CursorDown => {
                        tui.card_list.select_next(app.components.len());
                    }
                    // Any other typing returns to Edit and forwards the key
                    TuiEvent::InputChar(c) => {
                        tui.input_mode = InputMode::Edit;
                        should_quit |= apply(&mut app, &tx, Action::InputChar(c));
                    }
                    TuiEvent::Paste(text) => {
                        tui.input_mode = InputMode::Edit;
                        should_quit |= apply(&mut app, &tx, Action::Paste(text));
                    }
                    _ => {}
                },
            }
        }

        // Handle background task actions (request settlements, timers)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            should_quit |= apply(&mut app, &tx, action);
        }

        // A new submission may have replaced the component list; drop a
        // selection that no longer points at a card.
        if tui
            .card_list
            .selected
            .is_some_and(|index| index >= app.components.len())
        {
            tui.card_list.selected = None;
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Run an action through the reducer and perform the resulting effect.
/// Returns true when the app should quit.
fn apply(app: &mut Session, tx: &mpsc::Sender<Action>, action: Action) -> bool {
    match update(app, action) {
        Effect::Quit => true,
        Effect::None => false,
        Effect::SpawnAnalysis { seq, payload } => {
            spawn_analysis(app, seq, payload, tx.clone());
            false
        }
        Effect::CopyToClipboard { text, seq } => {
            if osc52_copy(&text) {
                spawn_copy_timer(seq, tx.clone());
                false
            } else {
                // Copy is a convenience; failure is log-only, but the badge
                // must not stick around claiming success.
                warn!("Clipboard write failed (OSC 52)");
                apply(app, tx, Action::CopyBadgeExpired { seq })
            }
        }
        Effect::Export => {
            let result = export::write_export(&app.components, app.stats.as_ref(), &app.export_dir)
                .map_err(|e| e.to_string());
            apply(app, tx, Action::ExportFinished(result))
        }
    }
}

/// Copy text to the system clipboard via the OSC 52 escape sequence.
/// Works in most modern terminals without a native clipboard dependency.
fn osc52_copy(text: &str) -> bool {
    use base64::Engine;
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    let mut out = stdout();
    write!(out, "\x1b]52;c;{encoded}\x07")
        .and_then(|_| out.flush())
        .is_ok()
}

fn spawn_analysis(app: &Session, seq: u64, payload: AnalysisPayload, tx: mpsc::Sender<Action>) {
    info!("Spawning analysis request #{seq}");
    let backend = app.backend.clone();

    tokio::spawn(async move {
        let outcome = match payload {
            AnalysisPayload::Text(text) => backend.identify(&text).await.map_err(|e| {
                warn!("identify #{seq} failed: {e}");
                e.user_message("Failed to identify components")
            }),
            AnalysisPayload::File(path) => backend.upload(&path).await.map_err(|e| {
                warn!("upload #{seq} failed: {e}");
                e.user_message("Failed to process file")
            }),
        }
        .map(|response| {
            let (components, stats) = response.into_parts();
            AnalysisSuccess { components, stats }
        });

        if tx.send(Action::AnalysisFinished { seq, outcome }).is_err() {
            warn!("Failed to send analysis result #{seq}: receiver dropped");
        }
    });
}

/// Schedule the copied-badge expiry. The reducer compares the tag against
/// the current copy sequence, so a timer from an overwritten copy is inert.
fn spawn_copy_timer(seq: u64, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        tokio::time::sleep(COPY_BADGE_DURATION).await;
        // Send failure just means the UI is gone
        let _ = tx.send(Action::CopyBadgeExpired { seq });
    });
}

/// One-shot startup probe so the title bar can show the backend's model
/// (or an "unreachable" status) without blocking the first frame.
fn spawn_health_probe(app: &Session, tx: mpsc::Sender<Action>) {
    let backend = app.backend.clone();
    tokio::spawn(async move {
        match backend.health().await {
            Ok(health) => {
                info!(
                    "Backend healthy: {} v{} ({})",
                    health.service, health.version, health.model
                );
                let _ = tx.send(Action::HealthChecked(Some(health)));
            }
            Err(e) => {
                warn!("Backend health probe failed: {e}");
                let _ = tx.send(Action::HealthChecked(None));
            }
        }
    });
}

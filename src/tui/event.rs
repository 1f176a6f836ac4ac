use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

/// TUI-specific input events
pub enum TuiEvent {
    // Always-on controls
    ForceQuit, // Ctrl+C
    Escape,
    Resize,

    // Editing / submission
    Submit, // Enter
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    ClearInput, // Ctrl+U
    ClearFile,  // Ctrl+X - drop the selected file
    SwitchTab,  // Tab - toggle Text/File input mode
    Export,     // Ctrl+E
    /// Alt+1..3 - load a built-in sample (zero-based index)
    LoadSample(usize),

    // Results navigation
    CursorUp,
    CursorDown,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).unwrap_or(false) {
        return None;
    }
    match event::read().ok()? {
        Event::Key(key_event) => {
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                // Ctrl+J inserts newline (ASCII LF; Ctrl+Enter sends this in most terminals)
                (KeyModifiers::CONTROL, KeyCode::Char('j')) => Some(TuiEvent::InputChar('\n')),
                (KeyModifiers::CONTROL, KeyCode::Char('u')) => Some(TuiEvent::ClearInput),
                (KeyModifiers::CONTROL, KeyCode::Char('x')) => Some(TuiEvent::ClearFile),
                (KeyModifiers::CONTROL, KeyCode::Char('e')) => Some(TuiEvent::Export),
                (KeyModifiers::ALT, KeyCode::Char(c @ '1'..='3')) => {
                    Some(TuiEvent::LoadSample(c as usize - '1' as usize))
                }
                (_, KeyCode::Tab) => Some(TuiEvent::SwitchTab),
                (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
                (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
                (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
                (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

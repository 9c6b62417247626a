//! Span-wise navigation over annotated documents.
//!
//! Arrow keys move the caret by whole annotation spans instead of getting
//! trapped inside markup internals, and Delete/Backspace removes the span
//! under the caret. Interception only happens while the caret is inside a
//! span; everywhere else every key passes through to the host surface so
//! normal typing is never surprised.

use crate::session::{AnnotationSession, Cursor};

/// Key events the navigation editor can see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Left arrow key
    Left,
    /// Right arrow key
    Right,
    /// Delete key
    Delete,
    /// Backspace key
    Backspace,
    /// Any character key
    Char(char),
    /// Enter/Return key
    Enter,
}

/// Result of processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorResult {
    /// Key was handled; the session caret (and possibly document) changed
    Handled,
    /// The span under the caret was removed, replaced by this character
    Removed(char),
    /// Key not handled; pass through to the host editing surface
    PassThrough,
}

/// Per-keypress state machine for caret movement between annotation spans.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavigationEditor;

impl NavigationEditor {
    pub fn new() -> Self {
        Self
    }

    /// Process one key event against the session.
    pub fn process_key(&mut self, key: KeyEvent, session: &mut AnnotationSession) -> EditorResult {
        let Cursor::InSpan { node } = session.cursor() else {
            // Outside annotations nothing is intercepted.
            return EditorResult::PassThrough;
        };

        match key {
            KeyEvent::Right => {
                match session.document().next_span_after(node) {
                    Some(next) => session.set_cursor(Cursor::InSpan { node: next }),
                    // Last span: land immediately after it.
                    None => session.set_cursor(Cursor::Outside {
                        node: node + 1,
                        offset: 0,
                    }),
                }
                EditorResult::Handled
            }
            KeyEvent::Left => {
                match session.document().prev_span_before(node) {
                    Some(prev) => session.set_cursor(Cursor::InSpan { node: prev }),
                    // First span: land immediately before it.
                    None => session.set_cursor(Cursor::Outside { node, offset: 0 }),
                }
                EditorResult::Handled
            }
            KeyEvent::Delete | KeyEvent::Backspace => {
                match session.document_mut().remove_span(node) {
                    Some(ch) => {
                        // Caret right after the restored plain character.
                        session.set_cursor(Cursor::Outside { node, offset: 1 });
                        EditorResult::Removed(ch)
                    }
                    None => EditorResult::PassThrough,
                }
            }
            KeyEvent::Char(_) | KeyEvent::Enter => EditorResult::PassThrough,
        }
    }
}

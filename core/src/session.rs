//! Annotation editing session.
//!
//! `AnnotationSession` owns the document being edited plus the logical caret
//! position. It is deliberately independent of any rendering DOM: the host
//! surface maps its own selection to and from [`Cursor`] values.

use crate::span::AnnotatedDocument;

/// Logical caret position within an annotated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Caret in ordinary content: before node `node`, or `offset` characters
    /// into it when the node is a literal run.
    Outside { node: usize, offset: usize },
    /// Caret logically inside the annotation span at node index `node`.
    InSpan { node: usize },
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor::Outside { node: 0, offset: 0 }
    }
}

/// Editing session combining a document with a caret.
#[derive(Debug, Clone, Default)]
pub struct AnnotationSession {
    document: AnnotatedDocument,
    cursor: Cursor,
}

impl AnnotationSession {
    /// Create a session over a document, caret at the start.
    pub fn new(document: AnnotatedDocument) -> Self {
        Self {
            document,
            cursor: Cursor::default(),
        }
    }

    /// The document being edited.
    pub fn document(&self) -> &AnnotatedDocument {
        &self.document
    }

    /// Mutable access to the document.
    pub fn document_mut(&mut self) -> &mut AnnotatedDocument {
        &mut self.document
    }

    /// Current caret position.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Move the caret.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// Place the caret inside the span at `node`, if that node is a span.
    /// Returns false otherwise, leaving the caret alone.
    pub fn focus_span(&mut self, node: usize) -> bool {
        if self.document.span_at(node).is_some() {
            self.cursor = Cursor::InSpan { node };
            true
        } else {
            false
        }
    }

    /// Whether the caret is currently inside an annotation span.
    pub fn in_span(&self) -> bool {
        matches!(self.cursor, Cursor::InSpan { .. })
    }
}

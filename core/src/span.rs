//! Structured annotation model.
//!
//! This module provides:
//! - `AnnotatedSpan`: One ideograph paired with its candidate readings
//! - `Node`: Either a span or a literal text run
//! - `AnnotatedDocument`: An ordered node sequence covering the source text
//!   exactly once

use serde::{Deserialize, Serialize};

/// A single annotated ideograph.
///
/// `readings` is never empty: construction falls back to the bare character
/// when no reading is known, so the character still displays un-annotated
/// instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedSpan {
    /// The bare ideograph this span annotates
    pub character: char,

    /// Candidate readings, most common first
    pub readings: Vec<String>,

    /// The reading currently displayed
    pub selected: String,
}

impl AnnotatedSpan {
    /// Create a span from a character and its candidate readings.
    ///
    /// The first reading becomes the selection. An empty candidate list
    /// degrades to `[character]`.
    pub fn new(character: char, readings: Vec<String>) -> Self {
        let readings = if readings.is_empty() {
            vec![character.to_string()]
        } else {
            readings
        };
        let selected = readings[0].clone();
        Self {
            character,
            readings,
            selected,
        }
    }

    /// Whether this character has more than one candidate reading and thus
    /// needs disambiguation.
    pub fn is_multi_reading(&self) -> bool {
        self.readings.len() > 1
    }

    /// Set the displayed reading.
    ///
    /// Membership in `readings` is intentionally not enforced: callers may
    /// install a reading from a manual edit that was never in the candidate
    /// list. Validation, if wanted, is the caller's job.
    pub fn update_reading<S: Into<String>>(&mut self, reading: S) {
        self.selected = reading.into();
    }
}

/// One element of an annotated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// An annotated ideograph
    Span(AnnotatedSpan),
    /// A literal run of non-annotated text (whitespace included)
    Text(String),
}

impl Node {
    /// The plain-text content this node contributes.
    pub fn plain(&self) -> String {
        match self {
            Node::Span(span) => span.character.to_string(),
            Node::Text(text) => text.clone(),
        }
    }

    /// View this node as a span, if it is one.
    pub fn as_span(&self) -> Option<&AnnotatedSpan> {
        match self {
            Node::Span(span) => Some(span),
            Node::Text(_) => None,
        }
    }
}

/// An ordered sequence of spans and literal runs.
///
/// Invariant: concatenating `plain()` over all nodes in order reproduces the
/// original input text exactly (the round-trip law).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    nodes: Vec<Node>,
}

impl AnnotatedDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create a document from pre-built nodes.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// All nodes in document order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a span node.
    pub fn push_span(&mut self, span: AnnotatedSpan) {
        self.nodes.push(Node::Span(span));
    }

    /// Append a literal run, merging into a trailing text node if present.
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Node::Text(existing)) = self.nodes.last_mut() {
            existing.push_str(text);
        } else {
            self.nodes.push(Node::Text(text.to_string()));
        }
    }

    /// The original plain text, ignoring all annotation.
    pub fn plain_text(&self) -> String {
        self.nodes.iter().map(Node::plain).collect()
    }

    /// The span at the given node index, if that node is a span.
    pub fn span_at(&self, index: usize) -> Option<&AnnotatedSpan> {
        self.nodes.get(index).and_then(Node::as_span)
    }

    /// Node indices of every span, in document order.
    pub fn span_indices(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_span().map(|_| i))
            .collect()
    }

    /// Iterate over all spans in document order.
    pub fn spans(&self) -> impl Iterator<Item = &AnnotatedSpan> {
        self.nodes.iter().filter_map(Node::as_span)
    }

    /// Index of the next span strictly after `index`, in document order.
    pub fn next_span_after(&self, index: usize) -> Option<usize> {
        self.nodes
            .iter()
            .enumerate()
            .skip(index + 1)
            .find_map(|(i, n)| n.as_span().map(|_| i))
    }

    /// Index of the previous span strictly before `index`.
    pub fn prev_span_before(&self, index: usize) -> Option<usize> {
        self.nodes
            .iter()
            .enumerate()
            .take(index)
            .rev()
            .find_map(|(i, n)| n.as_span().map(|_| i))
    }

    /// Set the displayed reading of the span at `index`.
    ///
    /// Returns false if the node does not exist or is not a span. Like
    /// `AnnotatedSpan::update_reading`, candidate-list membership is not
    /// checked.
    pub fn update_reading<S: Into<String>>(&mut self, index: usize, reading: S) -> bool {
        match self.nodes.get_mut(index) {
            Some(Node::Span(span)) => {
                span.update_reading(reading);
                true
            }
            _ => false,
        }
    }

    /// Replace the span at `index` with its bare character, in place.
    ///
    /// Returns the character so the caller can reposition a cursor right
    /// after it.
    pub fn remove_span(&mut self, index: usize) -> Option<char> {
        match self.nodes.get(index) {
            Some(Node::Span(span)) => {
                let ch = span.character;
                self.nodes[index] = Node::Text(ch.to_string());
                Some(ch)
            }
            _ => None,
        }
    }
}

//! Multi-reading disambiguation prompt state.
//!
//! One controller instance owns the open/closed state that used to live in
//! module-global flags, so several editors on one page cannot leak prompts
//! into each other. The controller never touches the document itself: it
//! hands the caller a [`DialogAction`] to apply.

use crate::span::AnnotatedSpan;
use tracing::info;

/// The data a disambiguation surface presents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// The ideograph being disambiguated
    pub character: char,
    /// The reading currently displayed (marked in the list)
    pub current: String,
    /// All candidate readings, in dictionary order
    pub readings: Vec<String>,
}

/// Outcome of asking to open a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// Prompt opened with these choices
    Opened(Prompt),
    /// Another prompt is already open; the request is a no-op
    AlreadyOpen,
    /// Only one reading exists, nothing to disambiguate; informational
    /// message only, no state change
    SingleReading(String),
}

/// The user's decision in an open prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Pick this reading
    Select(String),
    /// Remove the annotation entirely
    Remove,
    /// Close without acting
    Dismiss,
}

/// What the caller should apply to the span after a prompt resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogAction {
    /// Set the span's displayed reading
    Select(String),
    /// Replace the span with its bare character
    Remove,
}

/// Owns the single-open invariant for disambiguation prompts.
#[derive(Debug, Clone, Default)]
pub struct DisambiguationController {
    open: Option<Prompt>,
}

impl DisambiguationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a prompt is currently open.
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// The open prompt, if any.
    pub fn prompt(&self) -> Option<&Prompt> {
        self.open.as_ref()
    }

    /// Request a prompt for a span.
    ///
    /// A second request while one is open is a no-op until the first is
    /// dismissed. A single-reading span produces only an informational
    /// message, since there is nothing to disambiguate.
    pub fn open(&mut self, span: &AnnotatedSpan) -> OpenOutcome {
        if self.open.is_some() {
            return OpenOutcome::AlreadyOpen;
        }
        if !span.is_multi_reading() {
            let message = format!(
                "\"{}\" has only one reading: {}",
                span.character, span.selected
            );
            info!(%message, "single-reading span, no prompt");
            return OpenOutcome::SingleReading(message);
        }
        let prompt = Prompt {
            character: span.character,
            current: span.selected.clone(),
            readings: span.readings.clone(),
        };
        self.open = Some(prompt.clone());
        OpenOutcome::Opened(prompt)
    }

    /// Resolve the open prompt with the user's choice.
    ///
    /// Produces exactly one of select/remove, or nothing on dismissal.
    /// Always closes; resolving with no prompt open returns None.
    pub fn resolve(&mut self, choice: Choice) -> Option<DialogAction> {
        self.open.take()?;
        match choice {
            Choice::Select(reading) => Some(DialogAction::Select(reading)),
            Choice::Remove => Some(DialogAction::Remove),
            Choice::Dismiss => None,
        }
    }
}

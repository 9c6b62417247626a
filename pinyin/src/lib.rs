//! pinyin-ruby crate root
//!
//! Pinyin front-end for the annotation core: a static reading table, a
//! ready-made [`Annotator`] over it, and the cached question-bank client.
//!
//! Public API exported here:
//! - `PinyinDict` from `dict`
//! - `QuestionBankClient`, `Transport`, `HttpTransport` from `client`
//! - `annotator()` / `annotator_with_config()` constructors

pub mod client;
pub mod dict;

pub use client::{HttpTransport, QuestionBankClient, Transport};
pub use dict::PinyinDict;

// Convenience re-exports for common types used by callers.
pub use annotate_core::{
    AnnotatedDocument, AnnotatedSpan, AnnotationSession, Annotator, Choice, Config, Cursor,
    DialogAction, DisambiguationController, EditorResult, KeyEvent, NavigationEditor, Node,
    OpenOutcome, Prompt, TtlCache,
};

/// A pinyin annotator with the default configuration.
pub fn annotator() -> Annotator<PinyinDict> {
    Annotator::new(PinyinDict::new())
}

/// A pinyin annotator with an explicit configuration.
pub fn annotator_with_config(config: Config) -> Annotator<PinyinDict> {
    Annotator::with_config(PinyinDict::new(), config)
}

//! Generic annotation engine.
//!
//! `Annotator` composes a pronunciation dictionary with the structured
//! document model and the markup boundary. It is generic over the dictionary
//! so language crates (pinyin, zhuyin, ...) plug in their own tables while
//! sharing classification, fallback and caching behavior.

use crate::dict::ReadingDict;
use crate::error::AnnotateError;
use crate::markup;
use crate::span::{AnnotatedDocument, AnnotatedSpan};
use crate::utils;
use crate::Config;
use std::cell::RefCell;
use std::num::NonZeroUsize;
use tracing::{debug, warn};

/// Annotation engine combining a dictionary with the document model.
///
/// Annotation is an enhancement, never a blocker: every dictionary failure
/// degrades to the bare character so plain-text editing keeps working.
pub struct Annotator<D> {
    dict: D,
    config: Config,
    // Memoizes char -> readings; the dictionary is pure so entries never
    // go stale, the LRU bound only limits memory.
    lookup_cache: RefCell<lru::LruCache<char, Vec<String>>>,
    cache_hits: RefCell<usize>,
    cache_misses: RefCell<usize>,
}

impl<D: ReadingDict> Annotator<D> {
    /// Create a new annotator with the default configuration.
    pub fn new(dict: D) -> Self {
        Self::with_config(dict, Config::default())
    }

    /// Create a new annotator with an explicit configuration.
    pub fn with_config(dict: D, config: Config) -> Self {
        let capacity = NonZeroUsize::new(config.max_lookup_cache_size)
            .unwrap_or_else(|| NonZeroUsize::new(1024).unwrap());
        Self {
            dict,
            config,
            lookup_cache: RefCell::new(lru::LruCache::new(capacity)),
            cache_hits: RefCell::new(0),
            cache_misses: RefCell::new(0),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// All candidate readings for a single character.
    ///
    /// Non-CJK input returns `[ch]` immediately, no lookup attempted. A
    /// dictionary error or empty result also degrades to `[ch]`; the failure
    /// is logged and swallowed, never propagated.
    pub fn lookup_readings(&self, ch: char) -> Vec<String> {
        if !utils::is_cjk(ch) {
            return vec![ch.to_string()];
        }

        if let Some(cached) = self.lookup_cache.borrow_mut().get(&ch) {
            *self.cache_hits.borrow_mut() += 1;
            return cached.clone();
        }
        *self.cache_misses.borrow_mut() += 1;

        let readings = match self.dict.readings(ch) {
            Ok(list) if !list.is_empty() => list,
            Ok(_) => {
                warn!(%ch, "dictionary returned no readings, using bare character");
                vec![ch.to_string()]
            }
            Err(err) => {
                warn!(%ch, %err, "reading lookup failed, using bare character");
                vec![ch.to_string()]
            }
        };

        self.lookup_cache.borrow_mut().put(ch, readings.clone());
        readings
    }

    /// (hits, misses) counters for the lookup memo.
    pub fn cache_stats(&self) -> (usize, usize) {
        (*self.cache_hits.borrow(), *self.cache_misses.borrow())
    }

    /// Build the structured document for a text.
    ///
    /// Each CJK ideograph becomes a span carrying its full candidate list
    /// with the first reading selected; everything else accumulates into
    /// literal runs.
    pub fn annotate_document(&self, text: &str) -> AnnotatedDocument {
        let mut doc = AnnotatedDocument::new();
        for ch in utils::normalize(text).chars() {
            if utils::is_cjk(ch) {
                let readings = self.lookup_readings(ch);
                doc.push_span(AnnotatedSpan::new(ch, readings));
            } else {
                doc.push_text(&ch.to_string());
            }
        }
        doc
    }

    /// Annotate a text, producing ruby markup.
    ///
    /// Stripping the markup back out (`remove_annotations`) yields the
    /// original input exactly.
    pub fn annotate(&self, text: &str) -> String {
        let doc = self.annotate_document(text);
        debug!(
            spans = doc.spans().count(),
            nodes = doc.len(),
            "annotated text"
        );
        markup::document_to_markup(&doc, &self.config.ruby_class)
    }

    /// Annotate the current selection, rejecting an empty one.
    ///
    /// The empty-selection case is the one annotation error that reaches the
    /// user (as a warning); nothing is mutated.
    pub fn annotate_selection(&self, selection: &str) -> Result<String, AnnotateError> {
        if selection.trim().is_empty() {
            return Err(AnnotateError::EmptySelection);
        }
        Ok(self.annotate(selection))
    }

    /// Strip all annotations from markup, recovering the plain text.
    pub fn remove_annotations(&self, markup: &str) -> String {
        markup::remove_annotations(markup)
    }

    /// Rebuild the structured document from markup.
    ///
    /// Spans whose stored candidate list is absent or unparseable get their
    /// readings re-derived through this annotator's dictionary.
    pub fn parse_markup(&self, markup: &str) -> AnnotatedDocument {
        markup::parse_markup(markup, |ch| self.lookup_readings(ch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    /// Dictionary stub: knows a handful of characters, errors on '坏',
    /// returns an empty list for '空'.
    struct MockDict;

    impl ReadingDict for MockDict {
        fn readings(&self, ch: char) -> anyhow::Result<Vec<String>> {
            match ch {
                '你' => Ok(vec!["nǐ".into()]),
                '好' => Ok(vec!["hǎo".into(), "hào".into()]),
                '行' => Ok(vec!["xíng".into(), "háng".into()]),
                '坏' => Err(anyhow!("simulated dictionary failure")),
                '空' => Ok(vec![]),
                _ => Err(anyhow!("unknown character")),
            }
        }
    }

    fn annotator() -> Annotator<MockDict> {
        Annotator::new(MockDict)
    }

    #[test]
    fn test_lookup_non_cjk_short_circuits() {
        let a = annotator();
        assert_eq!(a.lookup_readings('A'), vec!["A".to_string()]);
        assert_eq!(a.lookup_readings(' '), vec![" ".to_string()]);
        // Short-circuit path never touches the cache.
        assert_eq!(a.cache_stats(), (0, 0));
    }

    #[test]
    fn test_lookup_failure_falls_back_to_character() {
        let a = annotator();
        assert_eq!(a.lookup_readings('坏'), vec!["坏".to_string()]);
        assert_eq!(a.lookup_readings('空'), vec!["空".to_string()]);
    }

    #[test]
    fn test_lookup_never_empty() {
        let a = annotator();
        for ch in ['你', '好', '坏', '空', '未', 'A'] {
            assert!(!a.lookup_readings(ch).is_empty(), "empty for {ch}");
        }
    }

    #[test]
    fn test_lookup_memoization() {
        let a = annotator();
        a.lookup_readings('你');
        assert_eq!(a.cache_stats(), (0, 1));
        a.lookup_readings('你');
        assert_eq!(a.cache_stats(), (1, 1));
    }

    #[test]
    fn test_round_trip_mixed_text() {
        let a = annotator();
        for text in ["你好", "A行B", "你 好 world!", "", "no cjk here", "  你"] {
            let markup = a.annotate(text);
            assert_eq!(a.remove_annotations(&markup), text, "failed for {text:?}");
        }
    }

    #[test]
    fn test_annotate_document_structure() {
        let a = annotator();
        let doc = a.annotate_document("A行B");
        assert_eq!(doc.len(), 3);
        let span = doc.span_at(1).unwrap();
        assert_eq!(span.character, '行');
        assert_eq!(span.readings.len(), 2);
        assert_eq!(span.selected, "xíng");
    }

    #[test]
    fn test_annotate_selection_empty_is_error() {
        let a = annotator();
        assert!(matches!(
            a.annotate_selection(""),
            Err(AnnotateError::EmptySelection)
        ));
        assert!(matches!(
            a.annotate_selection("   "),
            Err(AnnotateError::EmptySelection)
        ));
        assert!(a.annotate_selection("你").is_ok());
    }

    #[test]
    fn test_parse_markup_round_trips_document() {
        let a = annotator();
        let doc = a.annotate_document("你好 ok");
        let markup = a.annotate("你好 ok");
        assert_eq!(a.parse_markup(&markup), doc);
    }
}

//! annotate-core
//!
//! Annotation model, ruby markup serialization, cursor navigation and TTL
//! caching shared by language-specific crates (pinyin-ruby, and future
//! zhuyin/furigana front-ends).
//!
//! The in-memory representation is always the structured
//! [`AnnotatedDocument`]; the HTML ruby form is produced and consumed only at
//! the serialization boundary in [`markup`].
//!
//! Public API:
//! - `AnnotatedSpan` / `AnnotatedDocument` - Structured annotation model
//! - `Annotator` - Text -> annotated markup engine, generic over a dictionary
//! - `ReadingDict` - Pronunciation dictionary seam
//! - `NavigationEditor` / `AnnotationSession` - Span-wise cursor movement
//! - `DisambiguationController` - Multi-reading selection prompt state
//! - `TtlCache` - Per-entry-expiry memoization for read-mostly lookups
//! - `Config` - Configuration and tuning knobs

use serde::{Deserialize, Serialize};

pub mod span;
pub use span::{AnnotatedDocument, AnnotatedSpan, Node};

pub mod dict;
pub use dict::ReadingDict;

pub mod markup;

pub mod engine;
pub use engine::Annotator;

pub mod session;
pub use session::{AnnotationSession, Cursor};

pub mod editor;
pub use editor::{EditorResult, KeyEvent, NavigationEditor};

pub mod dialog;
pub use dialog::{Choice, DialogAction, DisambiguationController, OpenOutcome, Prompt};

pub mod cache;
pub use cache::{make_key, Clock, SystemClock, TtlCache};

pub mod error;
pub use error::AnnotateError;

/// Generic configuration for the annotation core.
///
/// Language-specific options (dictionary paths, table overrides, etc.)
/// belong in the language crates, not here.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default TTL for cached fetches, in milliseconds (5 minutes)
    pub default_ttl_ms: u64,

    /// Period of the background cache sweep, in seconds
    pub sweep_interval_secs: u64,

    /// Maximum number of entries in the char -> readings lookup memo
    pub max_lookup_cache_size: usize,

    /// CSS class stamped on every emitted ruby element
    pub ruby_class: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // 5 minutes matches the reference-data endpoints' freshness needs
            default_ttl_ms: 5 * 60 * 1000,
            sweep_interval_secs: 60,
            max_lookup_cache_size: 1024,
            ruby_class: "pinyin-ruby".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Utility helpers.
pub mod utils {
    /// Normalize input strings (NFC), leaving whitespace intact so the
    /// round-trip law holds for padded input.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>()
    }

    /// Whether a character is a CJK unified ideograph, i.e. one annotatable
    /// unit. Matches the U+4E00..=U+9FFF block the annotation engine covers.
    pub fn is_cjk(ch: char) -> bool {
        ('\u{4e00}'..='\u{9fff}').contains(&ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.default_ttl_ms, 300_000);
        assert_eq!(cfg.sweep_interval_secs, 60);
        assert_eq!(cfg.ruby_class, "pinyin-ruby");
    }

    #[test]
    fn test_config_toml_round_trip() {
        let cfg = Config::default();
        let s = cfg.to_toml_string().unwrap();
        let back = Config::from_toml_str(&s).unwrap();
        assert_eq!(back.default_ttl_ms, cfg.default_ttl_ms);
        assert_eq!(back.max_lookup_cache_size, cfg.max_lookup_cache_size);
    }

    #[test]
    fn test_is_cjk() {
        assert!(utils::is_cjk('你'));
        assert!(utils::is_cjk('行'));
        assert!(!utils::is_cjk('A'));
        assert!(!utils::is_cjk(' '));
        assert!(!utils::is_cjk('ñ'));
    }
}

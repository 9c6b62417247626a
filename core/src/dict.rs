//! Pronunciation dictionary seam.

/// Trait that pronunciation dictionaries must implement to work with the
/// generic [`Annotator`](crate::Annotator).
///
/// Implementations return every known reading for a single character, most
/// common first, in syllable-with-tone-mark notation. A lookup may fail; the
/// engine treats any error as "no reading available" and falls back to the
/// bare character, so implementations should not paper over their own errors.
pub trait ReadingDict {
    /// All candidate readings for `ch`, ordered most common first.
    fn readings(&self, ch: char) -> anyhow::Result<Vec<String>>;
}

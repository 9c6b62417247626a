//! Error taxonomy for the annotation core.
//!
//! Annotation errors degrade to "no annotation" wherever possible: a failed
//! reading lookup or a malformed attribute is recovered locally and only
//! logged. The variants here cover the cases that do reach a caller, plus
//! the recovered ones so diagnostics have a stable shape.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnnotateError {
    /// The user invoked annotate/remove with nothing selected. Surfaced as a
    /// warning; no state change happens.
    #[error("nothing selected")]
    EmptySelection,

    /// A stored candidate-reading attribute failed to parse as JSON.
    /// Recovered by re-running the dictionary lookup; never fatal.
    #[error("malformed reading attribute: {raw}")]
    MalformedReadingAttribute { raw: String },

    /// The dictionary call failed or returned nothing for a character.
    /// Recovered by falling back to the bare character; never fatal.
    #[error("no reading available for '{ch}'")]
    ReadingLookup { ch: char },
}

//! Ruby markup serialization boundary.
//!
//! The wire contract other components depend on: each annotated character is
//! emitted as a self-contained `<ruby>` element carrying the displayed
//! reading (`data-pinyin` and `<rt>`), the bare character (`data-char` and
//! `<rb>`), and the full candidate-reading list serialized as entity-escaped
//! JSON in `data-pinyin-options`. A zero-width marker entity follows every
//! span so a caret can land between two adjacent annotated characters.
//!
//! The attribute JSON is the durable round-trip source of truth for the
//! candidate list; when it is absent or unparseable the caller re-derives
//! readings through a fresh dictionary lookup.

use crate::span::{AnnotatedDocument, AnnotatedSpan, Node};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// Zero-width marker appended after each ruby element. Without it some
/// rendering surfaces make inter-span caret placement impossible.
pub const ZERO_WIDTH_MARKER: &str = "&#8203;";

/// Non-breaking-space literal standing in for ordinary spaces, which the
/// host rendering surface would otherwise collapse.
pub const NBSP: &str = "&nbsp;";

static RUBY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<ruby\b(?P<attrs>[^>]*)>(?P<inner>.*?)</ruby>(?:&#8203;|\u{200B})?")
        .expect("ruby regex")
});

static RB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<rb[^>]*>(?P<text>.*?)</rb>").expect("rb regex"));

static DATA_CHAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"data-char="(?P<v>[^"]*)""#).expect("data-char regex"));

static DATA_PINYIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"data-pinyin="(?P<v>[^"]*)""#).expect("data-pinyin regex"));

static DATA_OPTIONS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"data-pinyin-options="(?P<v>[^"]*)""#).expect("options regex"));

/// Escape a literal run for embedding in markup. Spaces become `&nbsp;`.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            ' ' => out.push_str(NBSP),
            _ => out.push(ch),
        }
    }
    out
}

/// Reverse of [`escape_text`]: collapse entities and zero-width markers back
/// to plain text.
pub fn unescape_text(text: &str) -> String {
    text.replace(ZERO_WIDTH_MARKER, "")
        .replace('\u{200B}', "")
        .replace(NBSP, " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

/// Serialize one span as a ruby element (marker included).
fn span_to_markup(span: &AnnotatedSpan, ruby_class: &str) -> String {
    // Literal JSON with entity-escaped quotes, per the wire contract.
    let options = serde_json::to_string(&span.readings)
        .unwrap_or_else(|_| "[]".to_string())
        .replace('"', "&quot;");
    format!(
        "<ruby class=\"{cls}\" data-pinyin=\"{py}\" data-char=\"{ch}\" data-pinyin-options=\"{opts}\"><rt>{py}</rt><rb>{ch}</rb></ruby>{marker}",
        cls = ruby_class,
        py = span.selected,
        ch = span.character,
        opts = options,
        marker = ZERO_WIDTH_MARKER,
    )
}

/// Serialize a document to annotated markup.
pub fn document_to_markup(doc: &AnnotatedDocument, ruby_class: &str) -> String {
    let mut out = String::new();
    for node in doc.nodes() {
        match node {
            Node::Span(span) => out.push_str(&span_to_markup(span, ruby_class)),
            Node::Text(text) => out.push_str(&escape_text(text)),
        }
    }
    out
}

/// Strip every annotation from markup, leaving the plain text.
///
/// Each ruby element is replaced by its bare character (`<rb>` content,
/// falling back to `data-char`); zero-width markers are dropped and
/// non-breaking spaces become ordinary spaces. Markup containing no
/// annotations passes through with only entity unescaping applied.
pub fn remove_annotations(markup: &str) -> String {
    let stripped = RUBY_RE.replace_all(markup, |caps: &regex::Captures| {
        bare_character(&caps["attrs"], &caps["inner"])
    });
    unescape_text(&stripped)
}

fn bare_character(attrs: &str, inner: &str) -> String {
    if let Some(caps) = RB_RE.captures(inner) {
        return caps["text"].to_string();
    }
    if let Some(caps) = DATA_CHAR_RE.captures(attrs) {
        return caps["v"].to_string();
    }
    // No rb element and no data-char: nothing recoverable.
    warn!("ruby element without rb or data-char, dropping");
    String::new()
}

/// Parse annotated markup back into a structured document.
///
/// `relookup` supplies fresh readings when the stored candidate list is
/// absent or fails to parse (it is never consulted otherwise).
pub fn parse_markup<F>(markup: &str, relookup: F) -> AnnotatedDocument
where
    F: Fn(char) -> Vec<String>,
{
    let mut doc = AnnotatedDocument::new();
    let mut last_end = 0;

    for caps in RUBY_RE.captures_iter(markup) {
        let whole = caps.get(0).expect("match");
        if whole.start() > last_end {
            doc.push_text(&unescape_text(&markup[last_end..whole.start()]));
        }
        last_end = whole.end();

        let attrs = &caps["attrs"];
        let inner = &caps["inner"];
        let bare = bare_character(attrs, inner);
        let Some(ch) = bare.chars().next() else {
            continue;
        };

        let readings = parse_options_attr(attrs).unwrap_or_else(|| relookup(ch));
        let mut span = AnnotatedSpan::new(ch, readings);
        if let Some(sel) = DATA_PINYIN_RE.captures(attrs) {
            // May legitimately be outside the candidate list (manual edits).
            span.update_reading(&sel["v"]);
        }
        doc.push_span(span);
    }

    if last_end < markup.len() {
        doc.push_text(&unescape_text(&markup[last_end..]));
    }
    doc
}

/// Decode the `data-pinyin-options` attribute. None means the caller should
/// re-derive via dictionary lookup.
fn parse_options_attr(attrs: &str) -> Option<Vec<String>> {
    let raw = DATA_OPTIONS_RE.captures(attrs)?["v"].to_string();
    let json = raw.replace("&quot;", "\"");
    match serde_json::from_str::<Vec<String>>(&json) {
        Ok(list) if !list.is_empty() => Some(list),
        Ok(_) => None,
        Err(err) => {
            warn!(raw = %raw, %err, "malformed reading attribute, re-deriving");
            None
        }
    }
}

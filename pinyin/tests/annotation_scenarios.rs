// pinyin/tests/annotation_scenarios.rs
//
// Engine behavior with the real reading table: span structure, multi-reading
// defaults, disambiguation no-ops and the round-trip law.

use pinyin_ruby::{
    annotator, AnnotationSession, Choice, DisambiguationController, EditorResult, KeyEvent,
    NavigationEditor, OpenOutcome,
};

#[test]
fn nihao_produces_two_spans_with_markers() {
    let engine = annotator();
    let markup = engine.annotate("你好");

    let doc = engine.annotate_document("你好");
    let spans: Vec<_> = doc.spans().collect();
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].character, '你');
    assert_eq!(spans[1].character, '好');
    for span in &spans {
        assert!(!span.readings.is_empty());
    }

    // A zero-width marker follows each span so the caret can land between
    // adjacent annotated characters.
    assert_eq!(markup.matches("&#8203;").count(), 2);
    assert_eq!(engine.remove_annotations(&markup), "你好");
}

#[test]
fn multi_reading_character_defaults_to_first_reading() {
    let engine = annotator();

    let readings = engine.lookup_readings('行');
    assert!(readings.len() >= 2);

    let doc = engine.annotate_document("A行B");
    assert_eq!(doc.plain_text(), "A行B");
    let span = doc.spans().next().unwrap();
    assert_eq!(span.character, '行');
    assert_eq!(span.selected, readings[0]);
    assert_eq!(span.readings, readings);
}

#[test]
fn single_reading_prompt_is_informational_only() {
    let engine = annotator();
    let doc = engine.annotate_document("你");
    let span = doc.spans().next().unwrap().clone();
    assert_eq!(span.readings.len(), 1);

    let mut dialog = DisambiguationController::new();
    let outcome = dialog.open(&span);
    assert!(matches!(outcome, OpenOutcome::SingleReading(ref m) if m.contains('你')));
    assert!(!dialog.is_open());
    // Nothing to resolve, nothing changed.
    assert_eq!(dialog.resolve(Choice::Remove), None);
}

#[test]
fn round_trip_law_over_mixed_input() {
    let engine = annotator();
    let samples = [
        "",
        "你好",
        "A行B",
        "汉语拼音 hanyu pinyin",
        "第1题: 你 好 吗?",
        "punctuation, only!",
        "  leading and trailing  ",
        "生僻字龘不在表里",
    ];
    for text in samples {
        let markup = engine.annotate(text);
        assert_eq!(engine.remove_annotations(&markup), text, "failed for {text:?}");
    }
}

#[test]
fn unknown_character_degrades_to_bare_reading() {
    let engine = annotator();
    // 龘 is not in the table: the lookup failure is swallowed and the
    // character becomes its own "reading".
    assert_eq!(engine.lookup_readings('龘'), vec!["龘".to_string()]);

    let doc = engine.annotate_document("龘");
    let span = doc.spans().next().unwrap();
    assert_eq!(span.selected, "龘");
    assert!(!span.is_multi_reading());
}

#[test]
fn navigation_and_removal_with_real_dictionary() {
    let engine = annotator();
    let doc = engine.annotate_document("你好");
    let mut session = AnnotationSession::new(doc);
    let mut editor = NavigationEditor::new();

    assert!(session.focus_span(0));
    assert_eq!(
        editor.process_key(KeyEvent::Right, &mut session),
        EditorResult::Handled
    );
    assert_eq!(
        editor.process_key(KeyEvent::Delete, &mut session),
        EditorResult::Removed('好')
    );
    assert_eq!(session.document().plain_text(), "你好");
    assert_eq!(session.document().span_indices(), vec![0]);
}

#[test]
fn markup_survives_reparse_after_manual_reading_edit() {
    let engine = annotator();
    let mut doc = engine.annotate_document("行");
    // A reading outside the candidate list, as a manual edit would produce.
    assert!(doc.update_reading(0, "hang4"));

    let markup = annotate_core::markup::document_to_markup(&doc, "pinyin-ruby");
    let reparsed = engine.parse_markup(&markup);
    let span = reparsed.span_at(0).unwrap();
    assert_eq!(span.selected, "hang4");
    // The stored candidate list is intact and still offers the real readings.
    assert!(span.readings.contains(&"xíng".to_string()));
}

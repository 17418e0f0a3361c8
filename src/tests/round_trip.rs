use crate::{
    parse_document, write_document, AnnotationKind, BratError, Document, DocumentDisplay,
    ReadOptions,
};

use super::fixtures::{GENIA_ANN, GENIA_TEXT};

fn genia() -> Document {
    parse_document(GENIA_ANN, &ReadOptions::strict())
        .unwrap()
        .with_doc_id("PMID-9119783")
        .with_text(GENIA_TEXT)
}

#[test]
fn write_reproduces_grouped_input() {
    assert_eq!(write_document(&genia()), GENIA_ANN);
}

#[test]
fn reparse_is_equal() {
    let doc = genia();
    let again = parse_document(&write_document(&doc), &ReadOptions::strict())
        .unwrap()
        .with_doc_id("PMID-9119783")
        .with_text(GENIA_TEXT);
    assert_eq!(doc, again);
}

#[test]
fn counts_by_kind() {
    let doc = genia();
    assert_eq!(doc.count(AnnotationKind::Entity), 5);
    assert_eq!(doc.count(AnnotationKind::Event), 2);
    assert_eq!(doc.count(AnnotationKind::Attribute), 1);
    assert_eq!(doc.count(AnnotationKind::Equiv), 1);
    assert_eq!(doc.count(AnnotationKind::Note), 1);
    assert_eq!(doc.count(AnnotationKind::Relation), 0);
}

#[test]
fn offsets_match_text() {
    let doc = genia();
    for entity in doc.entities() {
        assert_eq!(doc.covered_text(entity).as_deref(), Some(entity.text()));
    }
}

#[test]
fn nested_event_argument_resolves() {
    let doc = genia();
    let outer = doc.get_event("E1").unwrap();
    let inner = doc.get_event(outer.argument("Theme").unwrap()).unwrap();
    assert_eq!(inner.type_name(), "Gene_expression");
    assert_eq!(doc.get_entity(inner.trigger()).unwrap().text(), "production");
}

#[test]
fn ron_dump_round_trips() {
    let doc = genia();
    let restored = Document::from_ron_string(&doc.to_ron_string().unwrap()).unwrap();
    assert_eq!(doc, restored);
}

#[test]
fn strict_read_rejects_event_trigger_on_event() {
    let input = format!("{}E3\tBinding:E1 Theme:T1\n", GENIA_ANN);
    assert!(parse_document(&input, &ReadOptions::default()).is_ok());
    assert!(matches!(
        parse_document(&input, &ReadOptions::strict()),
        Err(BratError::WrongKind {
            expected: AnnotationKind::Entity,
            found: AnnotationKind::Event,
            ..
        })
    ));
}

#[test]
fn display_with_events() {
    let doc = genia();
    let rendered = DocumentDisplay::new(&doc).with_events().to_string();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], GENIA_TEXT);
    // five entity lines plus one arrow per event argument
    assert_eq!(lines.len(), 1 + 5 + 2);
    assert!(lines.iter().any(|l| l.trim_start() == "└─E1 Theme─>E2"));
    assert!(lines.iter().any(|l| l.trim_start() == "└─E2 Theme─>T2"));
}

use crate::{parse_document, write_document, BratError, Document, ReadOptions};

use super::fixtures::{GENIA_ANN, GENIA_TEXT};

fn reordered() -> Document {
    parse_document(GENIA_ANN, &ReadOptions::strict())
        .unwrap()
        .with_text(GENIA_TEXT)
        .reorder_entities_by_offset()
        .unwrap()
}

#[test]
fn entities_are_numbered_by_start_offset() {
    let doc = reordered();
    let entities: Vec<(&str, &str)> = doc.entities().map(|e| (e.id(), e.text())).collect();
    assert_eq!(
        entities,
        vec![
            ("T0", "BMP-6"),
            ("T1", "BMP-6"),
            ("T2", "consecutive"),
            ("T3", "production"),
            ("T4", "Id1"),
        ]
    );
}

#[test]
fn references_follow_the_new_ids() {
    let doc = reordered();
    assert_eq!(
        write_document(&doc),
        "T0\tProtein 30 35\tBMP-6\n\
         T1\tProtein 94 99\tBMP-6\n\
         T2\tPositive_regulation 135 146\tconsecutive\n\
         T3\tGene_expression 147 157\tproduction\n\
         T4\tProtein 161 164\tId1\n\
         E1\tPositive_regulation:T2 Theme:E2\n\
         E2\tGene_expression:T3 Theme:T4\n\
         A1\tSpeculation E1\n\
         *\tEquiv T0 T1\n\
         #1\tAnnotatorNotes T1\tsecond mention of the ligand\n"
    );
    assert!(doc.validate_references().is_ok());
}

#[test]
fn reorder_is_stable_once_sorted() {
    let once = reordered();
    let twice = once.reorder_entities_by_offset().unwrap();
    assert_eq!(once, twice);
}

#[test]
fn dangling_argument_fails() {
    let input = format!("{}R1\tCoref Anaphor:T1 Antecedent:T9\n", GENIA_ANN);
    let doc = parse_document(&input, &ReadOptions::default()).unwrap();
    assert_eq!(
        doc.reorder_entities_by_offset(),
        Err(BratError::UnknownId { id: "T9".into() })
    );
}

//! Data model and line codec for brat standoff annotations.
//!
//! A brat `.ann` file lists the annotations of one text document, one per
//! line, referencing the text by character offsets:
//!
//! ```text
//! T1	Organization 0 4	Sony
//! T3	Organization 33 41	Ericsson
//! E1	MERGE-ORG:T2 Org1:T1 Org2:T3
//! A1	Negation E1
//! #1	AnnotatorNotes T1	this annotation is suspect
//! *	Equiv T1 T3
//! ```
//!
//! ## Usage
//!
//! ```
//! use brat_standoff::{parse_document, write_document, ReadOptions};
//!
//! let doc = parse_document("T1\tOrganization 0 4\tSony\n", &ReadOptions::default()).unwrap();
//! assert_eq!(doc.get_entity("T1").unwrap().text(), "Sony");
//! assert_eq!(write_document(&doc), "T1\tOrganization 0 4\tSony\n");
//! ```
//!
//! ## Modules
//!
//! - [`annotation`] - The six annotation kinds and their id rules
//! - [`Document`] - Id-indexed store of one document's annotations
//! - [`codec`] - Line parser and serializer
//! - [`DocumentDisplay`] - Text with entity underlines, for snapshots and debugging
//! - [`BratError`] - Error taxonomy shared by the model and the codec

pub mod annotation;
pub mod codec;
mod display;
mod document;
mod errors;

pub use annotation::{
    Annotation, AnnotationKind, Arguments, Attribute, Entity, EquivRelation, Event, Note,
    Relation, Span, EQUIV_ID, EQUIV_TYPE,
};
pub use codec::{parse_document, parse_line, write_document, ReadOptions};
pub use display::DocumentDisplay;
pub use document::Document;
pub use errors::{BratError, BratResult};

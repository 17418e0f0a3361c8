//! Merging of brat standoff documents.
//!
//! Several annotators, or several tools, often annotate the same text. This
//! crate unions their documents into one, reassigning ids per kind and
//! collapsing annotations that are equivalent across sources.
//!
//! ## Usage
//!
//! ```
//! use brat_merge::merge;
//! use brat_standoff::{parse_document, ReadOptions};
//!
//! let a = parse_document("T1\tProtein 0 4\tBMP6\n", &ReadOptions::default()).unwrap();
//! let b = parse_document("T7\tProtein 0 4\tBMP6\nT8\tProtein 9 12\tId1\n", &ReadOptions::default()).unwrap();
//!
//! let merged = merge([&a, &b]).unwrap();
//! assert_eq!(merged.entities().count(), 2);
//! ```
//!
//! ## Equivalence
//!
//! - Entities: equal total span.
//! - Events and relations: same type, and every role of either side is filled
//!   by an equivalent entity on the other side. Arguments that are not
//!   entities cannot be compared and fail the merge.
//! - Equivalence sets: at least one member in common.
//! - Attributes: same type and values on the same merged annotation.
//! - Notes: same type and text on the same merged annotation.

mod equivalence;
mod merger;

pub use equivalence::{
    entities_equivalent, equivs_equivalent, events_equivalent, relations_equivalent,
};
pub use merger::{merge, MergeStats, Merger, Tally};

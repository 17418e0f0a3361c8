//! The line-oriented `.ann` text format.
//!
//! Each annotation occupies one line: an id, a tab, a body whose grammar is
//! chosen by the first character of the id, and for text-bound kinds a second
//! tab followed by free text. [`parse_line`] and [`parse_document`] read it;
//! the [`Display`](std::fmt::Display) impls and [`write_document`] produce it.
//!
//! The codec works on strings only. File handling lives with the caller.

mod parser;
mod writer;

pub use parser::{parse_document, parse_line};
pub use writer::write_document;

/// Options for [`parse_document`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Check with [`Document::validate_references`](crate::Document::validate_references)
    /// once every line is read.
    pub strict_references: bool,
}

impl ReadOptions {
    pub fn strict() -> Self {
        Self {
            strict_references: true,
        }
    }
}

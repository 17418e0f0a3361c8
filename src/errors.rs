//! Error types for the annotation model, document store and codec.
//!
//! Every condition here is unrecoverable at the point it is raised: nothing in
//! this crate retries or patches up a failed parse, insert or lookup.

use thiserror::Error;

use crate::annotation::AnnotationKind;

/// Errors raised by the model, the document store and the codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BratError {
    /// A line does not match the grammar for its kind marker.
    #[error("malformed line{}: {message}: {line:?}", line_suffix(.line_number))]
    MalformedLine {
        line: String,
        message: String,
        /// 1-based line number, when the line came from a whole document.
        line_number: Option<usize>,
    },

    /// An id does not carry the prefix its kind requires, or is empty.
    #[error("invalid id {id:?}: expected an id starting with {expected}")]
    InvalidId { id: String, expected: String },

    /// The id is already present in the document.
    #[error("duplicate id {id:?}")]
    DuplicateId { id: String },

    /// A lookup or remap could not resolve the id.
    #[error("unknown id {id:?}")]
    UnknownId { id: String },

    /// A typed accessor resolved the id to another kind of annotation.
    #[error("{id:?} resolves to {found}, expected {expected}")]
    WrongKind {
        id: String,
        expected: AnnotationKind,
        found: AnnotationKind,
    },

    /// A relation/event argument is not an entity, so it cannot be matched.
    #[error("recursive matching is not supported: {id} has non-entity argument {argument:?}")]
    UnsupportedRecursiveMatch { id: String, argument: String },

    /// Mutation of a field that is fixed for the annotation kind.
    #[error("unsupported operation: {operation}")]
    UnsupportedOperation { operation: String },

    /// An equivalence relation has no members; it could not be written as a
    /// readable line.
    #[error("equivalence relation without members")]
    EmptyEquivalence,

    /// An entity span is empty, inverted, or the entity has no span at all.
    #[error("invalid span [{start}, {end})")]
    InvalidSpan { start: i64, end: i64 },
}

fn line_suffix(line_number: &Option<usize>) -> String {
    match line_number {
        Some(n) => format!(" at line {}", n),
        None => String::new(),
    }
}

impl BratError {
    pub(crate) fn malformed(line: &str, message: impl Into<String>) -> Self {
        BratError::MalformedLine {
            line: line.to_string(),
            message: message.into(),
            line_number: None,
        }
    }

    pub(crate) fn unknown(id: &str) -> Self {
        BratError::UnknownId { id: id.to_string() }
    }

    /// Attach a 1-based line number to a `MalformedLine` error.
    ///
    /// Other variants are returned unchanged.
    pub fn at_line(self, number: usize) -> Self {
        match self {
            BratError::MalformedLine { line, message, .. } => BratError::MalformedLine {
                line,
                message,
                line_number: Some(number),
            },
            other => other,
        }
    }
}

/// Result type for annotation operations.
pub type BratResult<T> = Result<T, BratError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_line_message() {
        let err = BratError::malformed("x", "expected a tab-separated body");
        assert_eq!(
            err.to_string(),
            "malformed line: expected a tab-separated body: \"x\""
        );

        let err = err.at_line(7);
        assert_eq!(
            err.to_string(),
            "malformed line at line 7: expected a tab-separated body: \"x\""
        );
    }

    #[test]
    fn test_at_line_leaves_other_errors_alone() {
        let err = BratError::unknown("T9").at_line(3);
        assert_eq!(err, BratError::UnknownId { id: "T9".into() });
    }

    #[test]
    fn test_wrong_kind_message() {
        let err = BratError::WrongKind {
            id: "R1".into(),
            expected: AnnotationKind::Entity,
            found: AnnotationKind::Relation,
        };
        assert_eq!(err.to_string(), "\"R1\" resolves to relation, expected entity");
    }
}

//! Text-bound annotations.

use std::collections::BTreeSet;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::{check_id, AnnotationKind};
use crate::errors::{BratError, BratResult};

/// Half-open character offset interval `[start, end)` into the document text.
///
/// Offsets count Unicode scalar values, not bytes. Deserialization goes
/// through [`Span::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawSpan")]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// A span must cover at least one character.
    pub fn new(start: usize, end: usize) -> BratResult<Self> {
        if start >= end {
            return Err(BratError::InvalidSpan {
                start: start as i64,
                end: end as i64,
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Move both offsets by `offset`; fails if either would become negative.
    pub fn shifted(&self, offset: i64) -> BratResult<Self> {
        let start = self.start as i64 + offset;
        let end = self.end as i64 + offset;
        if start < 0 {
            return Err(BratError::InvalidSpan { start, end });
        }
        Span::new(start as usize, end as usize)
    }
}

#[derive(Deserialize)]
struct RawSpan {
    start: usize,
    end: usize,
}

impl TryFrom<RawSpan> for Span {
    type Error = BratError;

    fn try_from(raw: RawSpan) -> BratResult<Self> {
        Span::new(raw.start, raw.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.start, self.end)
    }
}

/// A typed mention of one or more (possibly discontinuous) text spans.
///
/// ```text
/// T1	Organization 0 4	Sony
/// T3	Organization 33 41	Ericsson
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    id: String,
    type_name: String,
    /// Fragments, ascending by (start, end). Never empty.
    spans: BTreeSet<Span>,
    text: String,
}

impl Entity {
    pub fn new(
        id: impl Into<String>,
        type_name: impl Into<String>,
        span: Span,
        text: impl Into<String>,
    ) -> BratResult<Self> {
        Self::with_spans(id, type_name, [span], text)
    }

    /// Create an entity over several fragments; at least one is required.
    pub fn with_spans(
        id: impl Into<String>,
        type_name: impl Into<String>,
        spans: impl IntoIterator<Item = Span>,
        text: impl Into<String>,
    ) -> BratResult<Self> {
        let id = id.into();
        check_id(AnnotationKind::Entity, &id)?;
        let entity = Self {
            id,
            type_name: type_name.into(),
            spans: spans.into_iter().collect(),
            text: text.into(),
        };
        entity.check_spans()?;
        Ok(entity)
    }

    pub(crate) fn check_spans(&self) -> BratResult<()> {
        if self.spans.is_empty() {
            return Err(BratError::InvalidSpan { start: 0, end: 0 });
        }
        match self.spans.iter().find(|s| s.start >= s.end) {
            Some(s) => Err(BratError::InvalidSpan {
                start: s.start as i64,
                end: s.end as i64,
            }),
            None => Ok(()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> BratResult<()> {
        let id = id.into();
        check_id(AnnotationKind::Entity, &id)?;
        self.id = id;
        Ok(())
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn set_type(&mut self, type_name: impl Into<String>) -> BratResult<()> {
        self.type_name = type_name.into();
        Ok(())
    }

    /// The literal text spanned by the annotation.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Fragments in ascending order.
    pub fn spans(&self) -> impl Iterator<Item = &Span> + '_ {
        self.spans.iter()
    }

    pub fn span_count(&self) -> usize {
        self.spans.len()
    }

    pub fn is_discontinuous(&self) -> bool {
        self.spans.len() > 1
    }

    pub fn add_span(&mut self, span: Span) {
        self.spans.insert(span);
    }

    /// From the smallest start to the largest end over all fragments.
    pub fn total_span(&self) -> Span {
        let start = self.spans.iter().map(|s| s.start).min().unwrap_or(0);
        let end = self.spans.iter().map(|s| s.end).max().unwrap_or(0);
        Span { start, end }
    }

    pub fn begin(&self) -> usize {
        self.total_span().start
    }

    pub fn end(&self) -> usize {
        self.total_span().end
    }

    /// Copy of this entity with every fragment moved by `offset` characters.
    pub fn shifted(&self, offset: i64) -> BratResult<Self> {
        let spans = self
            .spans
            .iter()
            .map(|s| s.shifted(offset))
            .collect::<BratResult<BTreeSet<_>>>()?;
        Ok(Self {
            spans,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize) -> Span {
        Span::new(start, end).unwrap()
    }

    fn base() -> Entity {
        let mut entity = Entity::new("T1", "TYPE", span(48, 53), "ABC").unwrap();
        entity.add_span(span(56, 57));
        entity
    }

    #[test]
    fn test_span_rejects_empty_and_inverted() {
        assert_eq!(
            Span::new(4, 4),
            Err(BratError::InvalidSpan { start: 4, end: 4 })
        );
        assert!(Span::new(5, 4).is_err());
        assert_eq!(span(0, 4).len(), 4);
        assert!(span(0, 4).contains(3));
        assert!(!span(0, 4).contains(4));
    }

    #[test]
    fn test_all_fields() {
        let entity = base();
        assert_eq!(entity.id(), "T1");
        assert_eq!(entity.type_name(), "TYPE");
        assert_eq!(entity.text(), "ABC");
        assert_eq!(entity.begin(), 48);
        assert_eq!(entity.end(), 57);
        assert_eq!(entity.total_span(), span(48, 57));
        assert!(entity.is_discontinuous());
        assert_eq!(
            entity.spans().copied().collect::<Vec<_>>(),
            vec![span(48, 53), span(56, 57)]
        );
    }

    #[test]
    fn test_equality_is_structural() {
        let entity = base();
        assert_eq!(entity, entity.clone());

        let mut diff_id = base();
        diff_id.set_id("T2").unwrap();
        assert_ne!(entity, diff_id);

        let mut diff_type = base();
        diff_type.set_type("TYPE2").unwrap();
        assert_ne!(entity, diff_type);

        let mut diff_span = base();
        diff_span.add_span(span(23, 30));
        assert_ne!(entity, diff_span);

        let mut diff_text = base();
        diff_text.set_text("DEF");
        assert_ne!(entity, diff_text);
    }

    #[test]
    fn test_set_id_requires_t_prefix() {
        let mut entity = base();
        assert!(matches!(entity.set_id("E21"), Err(BratError::InvalidId { .. })));
        assert!(matches!(entity.set_id(""), Err(BratError::InvalidId { .. })));
        assert_eq!(entity.id(), "T1");
        assert!(entity.set_id("T21").is_ok());
    }

    #[test]
    fn test_requires_at_least_one_span() {
        let result = Entity::with_spans("T1", "Protein", Vec::new(), "");
        assert!(matches!(result, Err(BratError::InvalidSpan { .. })));
    }

    #[test]
    fn test_shifted() {
        let entity = base().shifted(2).unwrap();
        assert_eq!(entity.total_span(), span(50, 59));

        let entity = base().shifted(-48).unwrap();
        assert_eq!(entity.begin(), 0);

        assert!(matches!(
            base().shifted(-49),
            Err(BratError::InvalidSpan { start: -1, end: 4 })
        ));
    }

    #[test]
    fn test_check_spans_rejects_inverted_span() {
        let mut entity = base();
        entity.spans.insert(Span { start: 9, end: 5 });
        assert_eq!(
            entity.check_spans(),
            Err(BratError::InvalidSpan { start: 9, end: 5 })
        );
    }
}

//! The annotation kinds of the brat standoff format.
//!
//! Every annotation has an id whose first character encodes its kind and a
//! free-form type label. The kinds form a closed set, modelled as the
//! [`Annotation`] sum type:
//!
//! | Kind | Id prefix |
//! |---|---|
//! | [`Entity`] | `T` |
//! | [`Relation`] | `R` |
//! | [`Event`] | `E` |
//! | [`Attribute`] | `A` (legacy `M`) |
//! | [`Note`] | `#` |
//! | [`EquivRelation`] | always `*` |
//!
//! References between annotations (relation arguments, event triggers, the
//! `ref_id` of attributes and notes, equivalence members) are plain id
//! strings looked up in the owning [`Document`](crate::Document).

mod arguments;
mod attribute;
mod entity;
mod equiv;
mod note;
mod relation;

use serde::{Deserialize, Serialize};

use crate::errors::{BratError, BratResult};

pub use arguments::Arguments;
pub use attribute::Attribute;
pub use entity::{Entity, Span};
pub use equiv::{EquivRelation, EQUIV_ID, EQUIV_TYPE};
pub use note::Note;
pub use relation::{Event, Relation};

/// Discriminant of the annotation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnnotationKind {
    Entity,
    Relation,
    Event,
    Attribute,
    Note,
    Equiv,
}

impl AnnotationKind {
    /// Id prefixes accepted for this kind. The first one is canonical.
    pub fn prefixes(self) -> &'static [char] {
        match self {
            AnnotationKind::Entity => &['T'],
            AnnotationKind::Relation => &['R'],
            AnnotationKind::Event => &['E'],
            AnnotationKind::Attribute => &['A', 'M'],
            AnnotationKind::Note => &['#'],
            AnnotationKind::Equiv => &['*'],
        }
    }

    /// Kind encoded by the first character of a line or id.
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            'T' => Some(AnnotationKind::Entity),
            'R' => Some(AnnotationKind::Relation),
            'E' => Some(AnnotationKind::Event),
            'A' | 'M' => Some(AnnotationKind::Attribute),
            '#' => Some(AnnotationKind::Note),
            '*' => Some(AnnotationKind::Equiv),
            _ => None,
        }
    }

    /// Build a fresh id of this kind from a sequence number, e.g. `T3`.
    pub fn id_for(self, n: usize) -> String {
        format!("{}{}", self.prefixes()[0], n)
    }

    fn expected_prefix(self) -> String {
        self.prefixes()
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

impl std::fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AnnotationKind::Entity => "entity",
            AnnotationKind::Relation => "relation",
            AnnotationKind::Event => "event",
            AnnotationKind::Attribute => "attribute",
            AnnotationKind::Note => "note",
            AnnotationKind::Equiv => "equivalence relation",
        };
        f.write_str(name)
    }
}

/// Check that `id` is non-empty and starts with one of the prefixes of `kind`.
pub(crate) fn check_id(kind: AnnotationKind, id: &str) -> BratResult<()> {
    match id.chars().next() {
        Some(first) if kind.prefixes().contains(&first) => Ok(()),
        _ => Err(BratError::InvalidId {
            id: id.to_string(),
            expected: kind.expected_prefix(),
        }),
    }
}

/// One annotation of any kind.
///
/// Equality and hashing are structural over every field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Annotation {
    Entity(Entity),
    Relation(Relation),
    Event(Event),
    Attribute(Attribute),
    Note(Note),
    Equiv(EquivRelation),
}

impl Annotation {
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Annotation::Entity(_) => AnnotationKind::Entity,
            Annotation::Relation(_) => AnnotationKind::Relation,
            Annotation::Event(_) => AnnotationKind::Event,
            Annotation::Attribute(_) => AnnotationKind::Attribute,
            Annotation::Note(_) => AnnotationKind::Note,
            Annotation::Equiv(_) => AnnotationKind::Equiv,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Annotation::Entity(a) => a.id(),
            Annotation::Relation(a) => a.id(),
            Annotation::Event(a) => a.id(),
            Annotation::Attribute(a) => a.id(),
            Annotation::Note(a) => a.id(),
            Annotation::Equiv(a) => a.id(),
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Annotation::Entity(a) => a.type_name(),
            Annotation::Relation(a) => a.type_name(),
            Annotation::Event(a) => a.type_name(),
            Annotation::Attribute(a) => a.type_name(),
            Annotation::Note(a) => a.type_name(),
            Annotation::Equiv(a) => a.type_name(),
        }
    }

    /// Replace the id, enforcing the prefix of this kind.
    pub fn set_id(&mut self, id: impl Into<String>) -> BratResult<()> {
        match self {
            Annotation::Entity(a) => a.set_id(id),
            Annotation::Relation(a) => a.set_id(id),
            Annotation::Event(a) => a.set_id(id),
            Annotation::Attribute(a) => a.set_id(id),
            Annotation::Note(a) => a.set_id(id),
            Annotation::Equiv(a) => a.set_id(id),
        }
    }

    pub fn set_type(&mut self, type_name: impl Into<String>) -> BratResult<()> {
        match self {
            Annotation::Entity(a) => a.set_type(type_name),
            Annotation::Relation(a) => a.set_type(type_name),
            Annotation::Event(a) => a.set_type(type_name),
            Annotation::Attribute(a) => a.set_type(type_name),
            Annotation::Note(a) => a.set_type(type_name),
            Annotation::Equiv(a) => a.set_type(type_name),
        }
    }

    /// Re-check the id prefix and span invariants.
    ///
    /// Constructors already enforce these; this is for values that arrived
    /// through deserialization.
    pub fn validate(&self) -> BratResult<()> {
        match self {
            Annotation::Entity(e) => {
                check_id(AnnotationKind::Entity, e.id())?;
                e.check_spans()
            }
            Annotation::Equiv(q) if q.is_empty() => Err(BratError::EmptyEquivalence),
            Annotation::Equiv(_) => Ok(()),
            other => check_id(other.kind(), other.id()),
        }
    }

    /// Ids this annotation refers to, in a stable order.
    pub fn references(&self) -> Vec<&str> {
        match self {
            Annotation::Entity(_) => Vec::new(),
            Annotation::Relation(r) => r.arguments().ids().collect(),
            Annotation::Event(e) => std::iter::once(e.trigger())
                .chain(e.arguments().ids())
                .collect(),
            Annotation::Attribute(a) => vec![a.ref_id()],
            Annotation::Note(n) => vec![n.ref_id()],
            Annotation::Equiv(q) => q.members().collect(),
        }
    }

    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            Annotation::Entity(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_relation(&self) -> Option<&Relation> {
        match self {
            Annotation::Relation(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_event(&self) -> Option<&Event> {
        match self {
            Annotation::Event(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_attribute(&self) -> Option<&Attribute> {
        match self {
            Annotation::Attribute(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_note(&self) -> Option<&Note> {
        match self {
            Annotation::Note(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_equiv(&self) -> Option<&EquivRelation> {
        match self {
            Annotation::Equiv(q) => Some(q),
            _ => None,
        }
    }
}

impl From<Entity> for Annotation {
    fn from(e: Entity) -> Self {
        Annotation::Entity(e)
    }
}

impl From<Relation> for Annotation {
    fn from(r: Relation) -> Self {
        Annotation::Relation(r)
    }
}

impl From<Event> for Annotation {
    fn from(e: Event) -> Self {
        Annotation::Event(e)
    }
}

impl From<Attribute> for Annotation {
    fn from(a: Attribute) -> Self {
        Annotation::Attribute(a)
    }
}

impl From<Note> for Annotation {
    fn from(n: Note) -> Self {
        Annotation::Note(n)
    }
}

impl From<EquivRelation> for Annotation {
    fn from(q: EquivRelation) -> Self {
        Annotation::Equiv(q)
    }
}

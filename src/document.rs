//! The identifier-indexed annotation store.
//!
//! A [`Document`] owns every annotation of one source text. It is built up by
//! appending annotations and is never partially removed from; operations that
//! rewrite ids, like [`Document::reorder_entities_by_offset`], produce a new
//! document.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::annotation::{
    Annotation, AnnotationKind, Attribute, Entity, EquivRelation, Event, Note, Relation,
};
use crate::errors::{BratError, BratResult};

/// Annotations of one document plus its source text and id.
///
/// Equality is structural and ignores the order in which annotations were
/// added.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(into = "DocumentSnapshot", try_from = "DocumentSnapshot")]
pub struct Document {
    doc_id: Option<String>,
    text: Option<String>,
    /// All annotations in insertion order.
    annotations: Vec<Annotation>,
    /// id -> position in `annotations`. Equivalence relations share the id
    /// `*` and are not indexed.
    index: HashMap<String, usize>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doc_id(mut self, doc_id: impl Into<String>) -> Self {
        self.doc_id = Some(doc_id.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Usually the file name the annotations were read from.
    pub fn doc_id(&self) -> Option<&str> {
        self.doc_id.as_deref()
    }

    pub fn set_doc_id(&mut self, doc_id: Option<String>) {
        self.doc_id = doc_id;
    }

    /// The source text the annotation offsets point into.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }

    /// Append an annotation.
    ///
    /// Fails with `DuplicateId` if the id is already present, and with
    /// `EmptyEquivalence` for an equivalence relation without members.
    /// References are not checked here; see [`Document::validate_references`].
    pub fn add(&mut self, annotation: impl Into<Annotation>) -> BratResult<()> {
        let annotation = annotation.into();
        if let Annotation::Equiv(equiv) = &annotation {
            if equiv.is_empty() {
                return Err(BratError::EmptyEquivalence);
            }
        } else {
            let id = annotation.id();
            if self.index.contains_key(id) {
                return Err(BratError::DuplicateId { id: id.to_string() });
            }
            self.index.insert(id.to_string(), self.annotations.len());
        }
        self.annotations.push(annotation);
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> BratResult<&Annotation> {
        self.index
            .get(id)
            .map(|&idx| &self.annotations[idx])
            .ok_or_else(|| BratError::unknown(id))
    }

    pub fn get_entity(&self, id: &str) -> BratResult<&Entity> {
        let annotation = self.get(id)?;
        annotation
            .as_entity()
            .ok_or_else(|| wrong_kind(id, AnnotationKind::Entity, annotation))
    }

    pub fn get_relation(&self, id: &str) -> BratResult<&Relation> {
        let annotation = self.get(id)?;
        annotation
            .as_relation()
            .ok_or_else(|| wrong_kind(id, AnnotationKind::Relation, annotation))
    }

    pub fn get_event(&self, id: &str) -> BratResult<&Event> {
        let annotation = self.get(id)?;
        annotation
            .as_event()
            .ok_or_else(|| wrong_kind(id, AnnotationKind::Event, annotation))
    }

    pub fn get_attribute(&self, id: &str) -> BratResult<&Attribute> {
        let annotation = self.get(id)?;
        annotation
            .as_attribute()
            .ok_or_else(|| wrong_kind(id, AnnotationKind::Attribute, annotation))
    }

    pub fn get_note(&self, id: &str) -> BratResult<&Note> {
        let annotation = self.get(id)?;
        annotation
            .as_note()
            .ok_or_else(|| wrong_kind(id, AnnotationKind::Note, annotation))
    }

    /// All annotations in insertion order.
    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> + '_ {
        self.annotations.iter()
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.annotations.iter().filter_map(Annotation::as_entity)
    }

    pub fn relations(&self) -> impl Iterator<Item = &Relation> + '_ {
        self.annotations.iter().filter_map(Annotation::as_relation)
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> + '_ {
        self.annotations.iter().filter_map(Annotation::as_event)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> + '_ {
        self.annotations.iter().filter_map(Annotation::as_attribute)
    }

    pub fn notes(&self) -> impl Iterator<Item = &Note> + '_ {
        self.annotations.iter().filter_map(Annotation::as_note)
    }

    pub fn equiv_relations(&self) -> impl Iterator<Item = &EquivRelation> + '_ {
        self.annotations.iter().filter_map(Annotation::as_equiv)
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Number of annotations of one kind.
    pub fn count(&self, kind: AnnotationKind) -> usize {
        self.annotations.iter().filter(|a| a.kind() == kind).count()
    }

    /// Notes attached to `ref_id`, in insertion order.
    pub fn notes_for(&self, ref_id: &str) -> Vec<&Note> {
        self.notes().filter(|n| n.ref_id() == ref_id).collect()
    }

    /// Attributes marking `ref_id`, in insertion order.
    pub fn attributes_for(&self, ref_id: &str) -> Vec<&Attribute> {
        self.attributes().filter(|a| a.ref_id() == ref_id).collect()
    }

    pub fn entities_of_type<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities().filter(move |e| e.type_name() == type_name)
    }

    /// Relations whose type is one of `types`.
    pub fn relations_of_types<'a>(&'a self, types: &'a [&str]) -> impl Iterator<Item = &'a Relation> + 'a {
        self.relations().filter(move |r| types.contains(&r.type_name()))
    }

    /// The first entity whose total span is exactly `[start, end)`.
    pub fn entity_at(&self, start: usize, end: usize) -> Option<&Entity> {
        self.entities()
            .find(|e| e.begin() == start && e.end() == end)
    }

    /// Text covered by the entity's spans, fragments joined by a space.
    ///
    /// `None` if the document has no text or a span runs past its end.
    pub fn covered_text(&self, entity: &Entity) -> Option<String> {
        let chars: Vec<char> = self.text.as_deref()?.chars().collect();
        let mut fragments = Vec::with_capacity(entity.span_count());
        for span in entity.spans() {
            let fragment = chars.get(span.start()..span.end())?;
            fragments.push(fragment.iter().collect::<String>());
        }
        Some(fragments.join(" "))
    }

    /// Check that every reference resolves.
    ///
    /// Event triggers must be entities. Returns the first failure found,
    /// walking annotations in insertion order.
    pub fn validate_references(&self) -> BratResult<()> {
        for annotation in &self.annotations {
            if let Annotation::Event(event) = annotation {
                self.get_entity(event.trigger())?;
            }
            for id in annotation.references() {
                self.get(id)?;
            }
        }
        Ok(())
    }

    /// Rebuild the document with entities renumbered `T0..Tn-1` by start offset.
    ///
    /// Every reference to an entity is rewritten to the new id. Other
    /// annotations keep their ids, so references to them stay valid. A
    /// reference to an id that is not in the document fails with `UnknownId`.
    pub fn reorder_entities_by_offset(&self) -> BratResult<Document> {
        let mut entities: Vec<&Entity> = self.entities().collect();
        entities.sort_by_key(|e| e.begin());

        let mut id_map: HashMap<&str, String> = HashMap::with_capacity(self.index.len());
        for (i, entity) in entities.iter().enumerate() {
            id_map.insert(entity.id(), AnnotationKind::Entity.id_for(i));
        }
        for annotation in &self.annotations {
            if !matches!(annotation, Annotation::Entity(_) | Annotation::Equiv(_)) {
                id_map.insert(annotation.id(), annotation.id().to_string());
            }
        }
        let remap = |id: &str| -> BratResult<String> {
            id_map.get(id).cloned().ok_or_else(|| BratError::unknown(id))
        };

        let mut reordered = Document {
            doc_id: self.doc_id.clone(),
            text: self.text.clone(),
            ..Document::default()
        };
        for entity in entities {
            let mut renumbered = entity.clone();
            renumbered.set_id(remap(entity.id())?)?;
            reordered.add(renumbered)?;
        }
        for event in self.events() {
            let arguments = event.arguments().try_remap(remap)?;
            reordered.add(
                event
                    .clone()
                    .with_trigger(remap(event.trigger())?)
                    .with_arguments(arguments),
            )?;
        }
        for relation in self.relations() {
            let arguments = relation.arguments().try_remap(remap)?;
            reordered.add(relation.clone().with_arguments(arguments))?;
        }
        for equiv in self.equiv_relations() {
            let members = equiv
                .members()
                .map(remap)
                .collect::<BratResult<Vec<_>>>()?;
            reordered.add(EquivRelation::from_members(members))?;
        }
        for attribute in self.attributes() {
            reordered.add(attribute.clone().with_ref_id(remap(attribute.ref_id())?))?;
        }
        for note in self.notes() {
            reordered.add(note.clone().with_ref_id(remap(note.ref_id())?))?;
        }

        tracing::debug!(
            doc_id = ?self.doc_id,
            entities = reordered.count(AnnotationKind::Entity),
            "reordered entities by offset"
        );
        Ok(reordered)
    }

    /// Pretty RON dump of the document.
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(10)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        ron::ser::to_string_pretty(self, config)
    }

    /// Parse a document from its RON dump; ids are re-checked on the way in.
    pub fn from_ron_string(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }
}

fn wrong_kind(id: &str, expected: AnnotationKind, found: &Annotation) -> BratError {
    BratError::WrongKind {
        id: id.to_string(),
        expected,
        found: found.kind(),
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        if self.doc_id != other.doc_id
            || self.text != other.text
            || self.annotations.len() != other.annotations.len()
        {
            return false;
        }
        let mut counts: HashMap<&Annotation, usize> = HashMap::new();
        for annotation in &self.annotations {
            *counts.entry(annotation).or_insert(0) += 1;
        }
        for annotation in &other.annotations {
            match counts.get_mut(annotation) {
                Some(n) if *n > 0 => *n -= 1,
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Document {}

/// Serialized form of a [`Document`]; the index is rebuilt on load.
#[derive(Serialize, Deserialize)]
struct DocumentSnapshot {
    doc_id: Option<String>,
    text: Option<String>,
    annotations: Vec<Annotation>,
}

impl From<Document> for DocumentSnapshot {
    fn from(doc: Document) -> Self {
        Self {
            doc_id: doc.doc_id,
            text: doc.text,
            annotations: doc.annotations,
        }
    }
}

impl TryFrom<DocumentSnapshot> for Document {
    type Error = BratError;

    fn try_from(snapshot: DocumentSnapshot) -> BratResult<Self> {
        let mut doc = Document {
            doc_id: snapshot.doc_id,
            text: snapshot.text,
            ..Document::default()
        };
        for annotation in snapshot.annotations {
            annotation.validate()?;
            doc.add(annotation)?;
        }
        Ok(doc)
    }
}

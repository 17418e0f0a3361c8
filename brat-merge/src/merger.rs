use std::collections::HashMap;

use brat_standoff::{
    AnnotationKind, Arguments, BratError, BratResult, Document, EquivRelation, Event, Relation,
};

use crate::equivalence::{
    entities_equivalent, equivs_equivalent, events_equivalent, relations_equivalent,
    resolve_entity,
};

/// How many annotations of one kind were matched to an existing one, and how
/// many were copied in with a fresh id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub reused: usize,
    pub copied: usize,
}

impl Tally {
    fn record(&mut self, reused: bool) {
        if reused {
            self.reused += 1;
        } else {
            self.copied += 1;
        }
    }
}

/// Outcome of merging one source document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub entities: Tally,
    pub events: Tally,
    pub relations: Tally,
    pub attributes: Tally,
    pub equivalences: Tally,
    pub notes: Tally,
}

impl MergeStats {
    fn tallies(&self) -> [Tally; 6] {
        [
            self.entities,
            self.events,
            self.relations,
            self.attributes,
            self.equivalences,
            self.notes,
        ]
    }

    pub fn reused(&self) -> usize {
        self.tallies().iter().map(|t| t.reused).sum()
    }

    pub fn copied(&self) -> usize {
        self.tallies().iter().map(|t| t.copied).sum()
    }
}

/// Accumulates source documents into one merged document.
///
/// Ids in the merged document are reassigned per kind, starting at zero
/// (`T0`, `E0`, `R0`, `A0`, `#0`). An incoming annotation equivalent to one
/// already merged reuses that annotation's id instead of being copied.
///
/// Kinds are merged in dependency order: entities, events, relations,
/// attributes, equivalence sets, notes. Each later step looks up the new ids
/// recorded by the earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    target: Document,
}

impl Merger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one source document.
    ///
    /// On error the merger is left as it was before the call.
    pub fn add_document(&mut self, source: &Document) -> BratResult<MergeStats> {
        let mut target = self.target.clone();
        let stats = SourceMerge {
            source,
            target: &mut target,
            id_map: HashMap::new(),
            stats: MergeStats::default(),
        }
        .run()?;
        self.target = target;

        tracing::debug!(
            doc_id = ?source.doc_id(),
            reused = stats.reused(),
            copied = stats.copied(),
            "merged source document"
        );
        Ok(stats)
    }

    pub fn document(&self) -> &Document {
        &self.target
    }

    pub fn into_document(self) -> Document {
        self.target
    }
}

/// Merge documents in order into a fresh document.
pub fn merge<'a, I>(docs: I) -> BratResult<Document>
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut merger = Merger::new();
    for doc in docs {
        merger.add_document(doc)?;
    }
    Ok(merger.into_document())
}

/// State of merging a single source document.
struct SourceMerge<'a> {
    source: &'a Document,
    target: &'a mut Document,
    /// source id -> merged id
    id_map: HashMap<String, String>,
    stats: MergeStats,
}

impl<'a> SourceMerge<'a> {
    fn run(mut self) -> BratResult<MergeStats> {
        self.adopt_metadata();
        self.merge_entities()?;
        self.merge_events()?;
        self.merge_relations()?;
        self.merge_attributes()?;
        self.merge_equivs()?;
        self.merge_notes()?;
        Ok(self.stats)
    }

    fn adopt_metadata(&mut self) {
        let source = self.source;
        if self.target.doc_id().is_none() {
            self.target.set_doc_id(source.doc_id().map(str::to_string));
        }
        let source_text = source.text();
        match self.target.text() {
            None => self.target.set_text(source_text.map(str::to_string)),
            Some(kept) => {
                if source_text.map_or(false, |text| text != kept) {
                    tracing::warn!(
                        doc_id = ?source.doc_id(),
                        "source text differs from the merged text; keeping the first"
                    );
                }
            }
        }
    }

    fn remap(&self, id: &str) -> BratResult<String> {
        self.id_map
            .get(id)
            .cloned()
            .ok_or_else(|| BratError::UnknownId { id: id.to_string() })
    }

    fn fresh_id(&self, kind: AnnotationKind) -> String {
        kind.id_for(self.target.count(kind))
    }

    fn merge_entities(&mut self) -> BratResult<()> {
        let source = self.source;
        for entity in source.entities() {
            let existing = self
                .target
                .entities()
                .find(|e| entities_equivalent(entity, e))
                .map(|e| e.id().to_string());
            self.stats.entities.record(existing.is_some());

            let new_id = match existing {
                Some(id) => {
                    tracing::trace!(source = entity.id(), target = %id, "equivalent entity");
                    id
                }
                None => {
                    let id = self.fresh_id(AnnotationKind::Entity);
                    let mut copy = entity.clone();
                    copy.set_id(id.clone())?;
                    self.target.add(copy)?;
                    id
                }
            };
            self.id_map.insert(entity.id().to_string(), new_id);
        }
        Ok(())
    }

    fn merge_events(&mut self) -> BratResult<()> {
        let source = self.source;
        for event in source.events() {
            resolve_entity(source, event.id(), event.trigger())?;
            let trigger = self.remap(event.trigger())?;
            let mut existing = None;
            for candidate in self.target.events() {
                if events_equivalent(event, candidate, source, self.target)? {
                    existing = Some(candidate.id().to_string());
                    break;
                }
            }
            self.stats.events.record(existing.is_some());

            let new_id = match existing {
                Some(id) => {
                    tracing::trace!(source = event.id(), target = %id, "equivalent event");
                    id
                }
                None => {
                    let id = self.fresh_id(AnnotationKind::Event);
                    let arguments = self.remap_arguments(event.id(), event.arguments())?;
                    self.target
                        .add(Event::new(id.clone(), event.type_name(), trigger, arguments)?)?;
                    id
                }
            };
            self.id_map.insert(event.id().to_string(), new_id);
        }
        Ok(())
    }

    fn merge_relations(&mut self) -> BratResult<()> {
        let source = self.source;
        for relation in source.relations() {
            let mut existing = None;
            for candidate in self.target.relations() {
                if relations_equivalent(relation, candidate, source, self.target)? {
                    existing = Some(candidate.id().to_string());
                    break;
                }
            }
            self.stats.relations.record(existing.is_some());

            let new_id = match existing {
                Some(id) => {
                    tracing::trace!(source = relation.id(), target = %id, "equivalent relation");
                    id
                }
                None => {
                    let id = self.fresh_id(AnnotationKind::Relation);
                    let arguments = self.remap_arguments(relation.id(), relation.arguments())?;
                    self.target
                        .add(Relation::new(id.clone(), relation.type_name(), arguments)?)?;
                    id
                }
            };
            self.id_map.insert(relation.id().to_string(), new_id);
        }
        Ok(())
    }

    /// Arguments of a copied event or relation. Only entity arguments can be
    /// carried over.
    fn remap_arguments(
        &self,
        owner: &str,
        arguments: &Arguments,
    ) -> BratResult<Arguments> {
        arguments.try_remap(|id| {
            resolve_entity(self.source, owner, id)?;
            self.remap(id)
        })
    }

    fn merge_attributes(&mut self) -> BratResult<()> {
        let source = self.source;
        for attribute in source.attributes() {
            let ref_id = self.remap(attribute.ref_id())?;
            let existing = self
                .target
                .attributes_for(&ref_id)
                .into_iter()
                .find(|a| {
                    a.type_name() == attribute.type_name() && a.values().eq(attribute.values())
                })
                .map(|a| a.id().to_string());
            self.stats.attributes.record(existing.is_some());

            let new_id = match existing {
                Some(id) => id,
                None => {
                    let id = self.fresh_id(AnnotationKind::Attribute);
                    let mut copy = attribute.clone().with_ref_id(ref_id);
                    copy.set_id(id.clone())?;
                    self.target.add(copy)?;
                    id
                }
            };
            self.id_map.insert(attribute.id().to_string(), new_id);
        }
        Ok(())
    }

    fn merge_equivs(&mut self) -> BratResult<()> {
        let source = self.source;
        for equiv in source.equiv_relations() {
            let members = equiv
                .members()
                .map(|id| self.remap(id))
                .collect::<BratResult<Vec<_>>>()?;
            let mut matched = false;
            for candidate in self.target.equiv_relations() {
                if equivs_equivalent(equiv, candidate, source, self.target)? {
                    matched = true;
                    break;
                }
            }
            self.stats.equivalences.record(matched);

            if !matched {
                self.target.add(EquivRelation::from_members(members))?;
            }
        }
        Ok(())
    }

    fn merge_notes(&mut self) -> BratResult<()> {
        let source = self.source;
        for note in source.notes() {
            let existing = self.id_map.get(note.ref_id()).and_then(|ref_id| {
                self.target
                    .notes_for(ref_id)
                    .into_iter()
                    .find(|n| n.type_name() == note.type_name() && n.text() == note.text())
                    .map(|n| n.id().to_string())
            });
            self.stats.notes.record(existing.is_some());

            let new_id = match existing {
                Some(id) => id,
                None => {
                    let id = self.fresh_id(AnnotationKind::Note);
                    let mut copy = note.clone().with_ref_id(self.remap(note.ref_id())?);
                    copy.set_id(id.clone())?;
                    self.target.add(copy)?;
                    id
                }
            };
            self.id_map.insert(note.id().to_string(), new_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brat_standoff::{parse_document, write_document, ReadOptions};

    fn doc(input: &str) -> Document {
        parse_document(input, &ReadOptions::default()).unwrap()
    }

    #[test]
    fn test_ids_are_renumbered_from_zero() {
        let source = doc("T5\tOrganization 0 4\tSony\n\
                          T9\tOrganization 9 17\tEricsson\n\
                          R3\tPartner Arg1:T5 Arg2:T9\n\
                          #4\tAnnotatorNotes R3\tannounced 2001\n");
        let merged = merge([&source]).unwrap();
        assert_eq!(
            write_document(&merged),
            "T0\tOrganization 0 4\tSony\n\
             T1\tOrganization 9 17\tEricsson\n\
             R0\tPartner Arg1:T0 Arg2:T1\n\
             #0\tAnnotatorNotes R0\tannounced 2001\n"
        );
    }

    #[test]
    fn test_stats_for_repeated_source() {
        let source = doc("T1\tOrganization 0 4\tSony\n\
                          T2\tOrganization 9 17\tEricsson\n\
                          R1\tPartner Arg1:T1 Arg2:T2\n");
        let mut merger = Merger::new();
        let first = merger.add_document(&source).unwrap();
        assert_eq!(first.copied(), 3);
        assert_eq!(first.reused(), 0);

        let second = merger.add_document(&source).unwrap();
        insta::assert_debug_snapshot!(second, @r###"
        MergeStats {
            entities: Tally {
                reused: 2,
                copied: 0,
            },
            events: Tally {
                reused: 0,
                copied: 0,
            },
            relations: Tally {
                reused: 1,
                copied: 0,
            },
            attributes: Tally {
                reused: 0,
                copied: 0,
            },
            equivalences: Tally {
                reused: 0,
                copied: 0,
            },
            notes: Tally {
                reused: 0,
                copied: 0,
            },
        }
        "###);
    }

    #[test]
    fn test_failed_merge_leaves_merger_untouched() {
        let good = doc("T1\tOrganization 0 4\tSony\n");
        let bad = doc("T1\tOrganization 9 17\tEricsson\n#1\tAnnotatorNotes T7\tdangling\n");

        let mut merger = Merger::new();
        merger.add_document(&good).unwrap();
        assert_eq!(
            merger.add_document(&bad),
            Err(BratError::UnknownId { id: "T7".into() })
        );
        assert_eq!(merger.document().len(), 1);
        assert!(merger.document().entity_at(9, 17).is_none());
    }

    #[test]
    fn test_metadata_from_first_source() {
        let a = Document::new().with_text("Sony and Ericsson");
        let b = Document::new()
            .with_doc_id("second")
            .with_text("something else");
        let merged = merge([&a, &b]).unwrap();
        assert_eq!(merged.doc_id(), Some("second"));
        assert_eq!(merged.text(), Some("Sony and Ericsson"));
    }
}

//! When is an annotation from one document the same as one in another?
//!
//! Equivalence is contextual: arguments are ids, and an id only means
//! something inside its own document. Every predicate here therefore takes the
//! candidate with the document it comes from and the existing annotation with
//! the document it lives in.

use brat_standoff::{Arguments, BratError, BratResult, Document, Entity, EquivRelation, Event, Relation};

/// Two entities are equivalent iff their total spans are equal.
///
/// Types and texts are not compared.
pub fn entities_equivalent(candidate: &Entity, existing: &Entity) -> bool {
    candidate.total_span() == existing.total_span()
}

/// Types match and every role of either event has an equivalent entity
/// filling the same role in the other. Triggers are not compared.
pub fn events_equivalent(
    candidate: &Event,
    existing: &Event,
    source: &Document,
    target: &Document,
) -> BratResult<bool> {
    if candidate.type_name() != existing.type_name() {
        return Ok(false);
    }
    let a = Side::new(candidate.id(), candidate.arguments(), source);
    let b = Side::new(existing.id(), existing.arguments(), target);
    Ok(a.contained_in(&b)? && b.contained_in(&a)?)
}

/// Same rule as [`events_equivalent`], for relations.
pub fn relations_equivalent(
    candidate: &Relation,
    existing: &Relation,
    source: &Document,
    target: &Document,
) -> BratResult<bool> {
    if candidate.type_name() != existing.type_name() {
        return Ok(false);
    }
    let a = Side::new(candidate.id(), candidate.arguments(), source);
    let b = Side::new(existing.id(), existing.arguments(), target);
    Ok(a.contained_in(&b)? && b.contained_in(&a)?)
}

/// Two equivalence sets match iff at least one member of each resolves to an
/// equivalent entity in the other.
///
/// This is looser than the rule for events and relations: one overlapping
/// member is enough.
pub fn equivs_equivalent(
    candidate: &EquivRelation,
    existing: &EquivRelation,
    source: &Document,
    target: &Document,
) -> BratResult<bool> {
    if candidate.type_name() != existing.type_name() {
        return Ok(false);
    }
    for member in candidate.members() {
        let left = resolve_entity(source, candidate.id(), member)?;
        for other in existing.members() {
            let right = resolve_entity(target, existing.id(), other)?;
            if entities_equivalent(left, right) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// One side of a relation or event comparison.
struct Side<'a> {
    owner: &'a str,
    arguments: &'a Arguments,
    doc: &'a Document,
}

impl<'a> Side<'a> {
    fn new(owner: &'a str, arguments: &'a Arguments, doc: &'a Document) -> Self {
        Side {
            owner,
            arguments,
            doc,
        }
    }

    /// Every role here is filled in `other` by an equivalent entity.
    fn contained_in(&self, other: &Side<'_>) -> BratResult<bool> {
        for (role, id) in self.arguments.iter() {
            let mine = resolve_entity(self.doc, self.owner, id)?;
            let theirs = match other.arguments.get(role) {
                Some(theirs) => resolve_entity(other.doc, other.owner, theirs)?,
                None => return Ok(false),
            };
            if !entities_equivalent(mine, theirs) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Look up an argument that must be an entity.
pub(crate) fn resolve_entity<'d>(doc: &'d Document, owner: &str, id: &str) -> BratResult<&'d Entity> {
    match doc.get(id)?.as_entity() {
        Some(entity) => Ok(entity),
        None => Err(BratError::UnsupportedRecursiveMatch {
            id: owner.to_string(),
            argument: id.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brat_standoff::{parse_document, ReadOptions};

    fn doc(input: &str) -> Document {
        parse_document(input, &ReadOptions::default()).unwrap()
    }

    #[test]
    fn test_entities_compare_total_span_only() {
        let d = doc("T1\tProtein 0 4\tSony\n\
                     T2\tOrganization 0 4\tSONY\n\
                     T3\tProtein 0 2;3 4\tSo y\n\
                     T4\tProtein 0 5\tSony,\n");
        let t = |id| d.get_entity(id).unwrap();
        assert!(entities_equivalent(t("T1"), t("T2")));
        assert!(entities_equivalent(t("T1"), t("T3")));
        assert!(!entities_equivalent(t("T1"), t("T4")));
    }

    #[test]
    fn test_events_across_id_spaces() {
        let source = doc("T1\tOrganization 0 4\tSony\n\
                          T2\tMERGE-ORG 27 40\tjoint venture\n\
                          T3\tOrganization 9 17\tEricsson\n\
                          E1\tMERGE-ORG:T2 Org1:T1 Org2:T3\n");
        let target = doc("T0\tOrganization 9 17\tEricsson\n\
                          T1\tOrganization 0 4\tSony\n\
                          T2\tMERGE-ORG 27 40\tjoint venture\n\
                          E0\tMERGE-ORG:T2 Org1:T1 Org2:T0\n\
                          E1\tMERGE-ORG:T2 Org1:T0 Org2:T1\n\
                          E2\tMERGE-ORG:T2 Org1:T1\n\
                          E3\tSPLIT-ORG:T2 Org1:T1 Org2:T0\n");
        let candidate = source.get_event("E1").unwrap();
        let existing = |id| target.get_event(id).unwrap();

        assert!(events_equivalent(candidate, existing("E0"), &source, &target).unwrap());
        // roles swapped
        assert!(!events_equivalent(candidate, existing("E1"), &source, &target).unwrap());
        // containment must hold both ways
        assert!(!events_equivalent(candidate, existing("E2"), &source, &target).unwrap());
        assert!(!events_equivalent(existing("E2"), candidate, &target, &source).unwrap());
        assert!(!events_equivalent(candidate, existing("E3"), &source, &target).unwrap());
    }

    #[test]
    fn test_relation_with_event_argument_is_unsupported() {
        let d = doc("T1\tProtein 0 4\tSony\n\
                     T2\tTrigger 5 8\tand\n\
                     E1\tBinding:T2 Theme:T1\n\
                     R1\tCause Arg1:E1 Arg2:T1\n");
        let relation = d.get_relation("R1").unwrap();
        assert_eq!(
            relations_equivalent(relation, relation, &d, &d),
            Err(BratError::UnsupportedRecursiveMatch {
                id: "R1".into(),
                argument: "E1".into(),
            })
        );
    }

    #[test]
    fn test_dangling_argument_is_unknown() {
        let d = doc("T1\tProtein 0 4\tSony\nR1\tPartner Arg1:T1 Arg2:T9\n");
        let relation = d.get_relation("R1").unwrap();
        assert_eq!(
            relations_equivalent(relation, relation, &d, &d),
            Err(BratError::UnknownId { id: "T9".into() })
        );
    }

    #[test]
    fn test_equivs_match_on_any_member() {
        let source = doc("T1\tOrganization 0 4\tSony\n\
                          T2\tOrganization 50 54\tSony\n\
                          *\tEquiv T1 T2\n");
        let target = doc("T0\tOrganization 50 54\tSony\n\
                          T1\tOrganization 60 64\tSony\n\
                          T2\tOrganization 70 74\tSony\n\
                          *\tEquiv T0 T1\n\
                          *\tEquiv T2 T1\n");
        let candidate = source.equiv_relations().next().unwrap();
        let existing: Vec<&EquivRelation> = target.equiv_relations().collect();
        assert!(equivs_equivalent(candidate, existing[0], &source, &target).unwrap());
        assert!(!equivs_equivalent(candidate, existing[1], &source, &target).unwrap());
    }
}

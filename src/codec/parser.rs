//! Line parser for the standoff grammar.
//!
//! ```text
//! T<id> \t <type> <start> <end>[;<start> <end>...] \t <text>
//! R<id> \t <type> <role>:<id> ...
//! E<id> \t <type>:<trigger> <role>:<id> ...
//! A<id> \t <type> <ref> [value ...]          (legacy M<id> too)
//! #<id> \t <type> <ref> \t <text>
//! *     \t Equiv <id> <id> ...
//! ```

use crate::annotation::{
    Annotation, AnnotationKind, Arguments, Attribute, Entity, EquivRelation, Event, Note,
    Relation, Span, EQUIV_ID, EQUIV_TYPE,
};
use crate::document::Document;
use crate::errors::{BratError, BratResult};

use super::ReadOptions;

/// Parse a single annotation line. The first character selects the kind.
pub fn parse_line(line: &str) -> BratResult<Annotation> {
    let marker = line
        .chars()
        .next()
        .ok_or_else(|| BratError::malformed(line, "empty line"))?;
    let kind = AnnotationKind::from_marker(marker)
        .ok_or_else(|| BratError::malformed(line, format!("unknown kind marker {:?}", marker)))?;

    let annotation = match kind {
        AnnotationKind::Entity => parse_entity(line)?.into(),
        AnnotationKind::Relation => parse_relation(line)?.into(),
        AnnotationKind::Event => parse_event(line)?.into(),
        AnnotationKind::Attribute => parse_attribute(line)?.into(),
        AnnotationKind::Note => parse_note(line)?.into(),
        AnnotationKind::Equiv => parse_equiv(line)?.into(),
    };
    Ok(annotation)
}

/// Parse a whole annotation file into a document.
///
/// Blank lines are skipped. The first malformed line aborts parsing and is
/// reported with its 1-based line number. Kinds may appear in any order.
pub fn parse_document(input: &str, options: &ReadOptions) -> BratResult<Document> {
    let mut doc = Document::new();
    for (idx, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let annotation = parse_line(line).map_err(|e| e.at_line(idx + 1))?;
        doc.add(annotation)?;
    }

    if options.strict_references {
        doc.validate_references()?;
    }

    tracing::debug!(
        annotations = doc.len(),
        entities = doc.count(AnnotationKind::Entity),
        strict = options.strict_references,
        "parsed standoff annotations"
    );
    Ok(doc)
}

/// Split on tabs and require exactly `expected` fields.
fn fields(line: &str, expected: usize) -> BratResult<Vec<&str>> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != expected {
        return Err(BratError::malformed(
            line,
            format!(
                "expected {} tab-separated fields, found {}",
                expected,
                fields.len()
            ),
        ));
    }
    let id = fields[0];
    if id.is_empty() || id.chars().any(char::is_whitespace) {
        return Err(BratError::malformed(line, format!("invalid id field {:?}", id)));
    }
    Ok(fields)
}

fn parse_entity(line: &str) -> BratResult<Entity> {
    let f = fields(line, 3)?;
    let (type_name, offsets) = f[1]
        .split_once(' ')
        .ok_or_else(|| BratError::malformed(line, "missing offsets after entity type"))?;

    let spans = offsets
        .split(';')
        .map(|fragment| parse_span(line, fragment))
        .collect::<BratResult<Vec<_>>>()?;

    Entity::with_spans(f[0], type_name, spans, f[2])
}

fn parse_span(line: &str, fragment: &str) -> BratResult<Span> {
    let malformed = || BratError::malformed(line, format!("invalid span {:?}", fragment));
    let (start, end) = fragment.trim().split_once(' ').ok_or_else(malformed)?;
    let start: usize = start.parse().map_err(|_| malformed())?;
    let end: usize = end.parse().map_err(|_| malformed())?;
    Span::new(start, end).map_err(|_| malformed())
}

/// `ROLE:ID` tokens; the split is on the first colon.
fn parse_arguments<'a>(line: &str, tokens: impl Iterator<Item = &'a str>) -> BratResult<Arguments> {
    let mut arguments = Arguments::new();
    for token in tokens {
        let (role, id) = match token.split_once(':') {
            Some((role, id)) if !role.is_empty() && !id.is_empty() => (role, id),
            _ => {
                return Err(BratError::malformed(
                    line,
                    format!("expected ROLE:ID, found {:?}", token),
                ))
            }
        };
        if arguments.contains_role(role) {
            return Err(BratError::malformed(line, format!("duplicate role {:?}", role)));
        }
        arguments = arguments.with(role, id);
    }
    Ok(arguments)
}

fn parse_relation(line: &str) -> BratResult<Relation> {
    let f = fields(line, 2)?;
    let mut tokens = f[1].split_whitespace();
    let type_name = tokens
        .next()
        .ok_or_else(|| BratError::malformed(line, "missing relation type"))?;
    let arguments = parse_arguments(line, tokens)?;
    Relation::new(f[0], type_name, arguments)
}

fn parse_event(line: &str) -> BratResult<Event> {
    let f = fields(line, 2)?;
    let mut tokens = f[1].split_whitespace();
    let head = tokens
        .next()
        .ok_or_else(|| BratError::malformed(line, "missing event type"))?;
    let (type_name, trigger) = match head.split_once(':') {
        Some((t, trigger)) if !t.is_empty() && !trigger.is_empty() => (t, trigger),
        _ => {
            return Err(BratError::malformed(
                line,
                format!("expected TYPE:TRIGGER, found {:?}", head),
            ))
        }
    };
    let arguments = parse_arguments(line, tokens)?;
    Event::new(f[0], type_name, trigger, arguments)
}

fn parse_attribute(line: &str) -> BratResult<Attribute> {
    let f = fields(line, 2)?;
    let mut tokens = f[1].split_whitespace();
    let (type_name, ref_id) = match (tokens.next(), tokens.next()) {
        (Some(t), Some(r)) => (t, r),
        _ => return Err(BratError::malformed(line, "expected TYPE REF [VALUE ...]")),
    };
    Ok(tokens.fold(Attribute::new(f[0], type_name, ref_id)?, |attribute, value| {
        attribute.with_value(value)
    }))
}

fn parse_note(line: &str) -> BratResult<Note> {
    let f = fields(line, 3)?;
    let tokens: Vec<&str> = f[1].split_whitespace().collect();
    match tokens.as_slice() {
        [type_name, ref_id] => Note::new(f[0], *type_name, *ref_id, f[2]),
        _ => Err(BratError::malformed(line, "expected TYPE REF before the note text")),
    }
}

fn parse_equiv(line: &str) -> BratResult<EquivRelation> {
    let f = fields(line, 2)?;
    if f[0] != EQUIV_ID {
        return Err(BratError::malformed(
            line,
            format!("equivalence id must be {:?}", EQUIV_ID),
        ));
    }
    let mut tokens = f[1].split_whitespace();
    if tokens.next() != Some(EQUIV_TYPE) {
        return Err(BratError::malformed(
            line,
            format!("equivalence type must be {:?}", EQUIV_TYPE),
        ));
    }
    let equiv = EquivRelation::from_members(tokens);
    if equiv.is_empty() {
        return Err(BratError::malformed(line, "equivalence without members"));
    }
    Ok(equiv)
}

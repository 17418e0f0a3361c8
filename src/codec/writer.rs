use std::fmt::{self, Display, Write as _};

use crate::annotation::{Annotation, Arguments, Attribute, Entity, EquivRelation, Event, Note, Relation};
use crate::document::Document;

fn write_arguments(f: &mut fmt::Formatter<'_>, arguments: &Arguments) -> fmt::Result {
    for (role, id) in arguments.iter() {
        write!(f, " {}:{}", role, id)?;
    }
    Ok(())
}

impl Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{} ", self.id(), self.type_name())?;
        for (i, span) in self.spans().enumerate() {
            if i > 0 {
                f.write_char(';')?;
            }
            write!(f, "{}", span)?;
        }
        write!(f, "\t{}", self.text())
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.id(), self.type_name())?;
        write_arguments(f, self.arguments())
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}:{}", self.id(), self.type_name(), self.trigger())?;
        write_arguments(f, self.arguments())
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{} {}", self.id(), self.type_name(), self.ref_id())?;
        for value in self.values() {
            write!(f, " {}", value)?;
        }
        Ok(())
    }
}

impl Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{} {}\t{}",
            self.id(),
            self.type_name(),
            self.ref_id(),
            self.text()
        )
    }
}

impl Display for EquivRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.id(), self.type_name())?;
        for member in self.members() {
            write!(f, " {}", member)?;
        }
        Ok(())
    }
}

impl Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Annotation::Entity(a) => a.fmt(f),
            Annotation::Relation(a) => a.fmt(f),
            Annotation::Event(a) => a.fmt(f),
            Annotation::Attribute(a) => a.fmt(f),
            Annotation::Note(a) => a.fmt(f),
            Annotation::Equiv(a) => a.fmt(f),
        }
    }
}

impl Annotation {
    /// The annotation as one line of the standoff format, without a newline.
    pub fn to_brat_string(&self) -> String {
        self.to_string()
    }
}

/// Serialize every annotation, one per line.
///
/// Lines are grouped by kind: entities, relations, events, attributes,
/// equivalence relations, notes. Within a group insertion order is kept.
pub fn write_document(doc: &Document) -> String {
    let mut out = String::new();
    doc.entities().for_each(|a| push_line(&mut out, a));
    doc.relations().for_each(|a| push_line(&mut out, a));
    doc.events().for_each(|a| push_line(&mut out, a));
    doc.attributes().for_each(|a| push_line(&mut out, a));
    doc.equiv_relations().for_each(|a| push_line(&mut out, a));
    doc.notes().for_each(|a| push_line(&mut out, a));
    out
}

fn push_line(out: &mut String, annotation: &impl Display) {
    // writing into a String cannot fail
    let _ = writeln!(out, "{}", annotation);
}

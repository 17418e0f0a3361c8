use std::collections::HashMap;
use std::fmt::Write;

use unicode_width::UnicodeWidthChar;

use crate::annotation::{Entity, Span};
use crate::document::Document;

/// Renders a document as its text with entity underlines beneath it.
///
/// ```text
/// Sony and Ericsson formed a joint venture
/// ╰──╯ T1 Organization
///          ╰──────╯ T3 Organization
///                            ╰───────────╯ T2 MERGE-ORG
///                              └─E1 Org1─>T1
///                              └─E1 Org2─>T3
/// ```
///
/// Entities are listed by offset. Event arguments hang under the trigger,
/// relation arguments under the entity filling the first role. Newlines in
/// the text show as `↵`.
pub struct DocumentDisplay<'a> {
    doc: &'a Document,
    show_events: bool,
    show_relations: bool,
}

struct Arrow {
    owner: String,
    role: String,
    target: String,
}

impl<'a> DocumentDisplay<'a> {
    pub fn new(doc: &'a Document) -> Self {
        DocumentDisplay {
            doc,
            show_events: false,
            show_relations: false,
        }
    }

    pub fn with_events(mut self) -> Self {
        self.show_events = true;
        self
    }

    pub fn with_relations(mut self) -> Self {
        self.show_relations = true;
        self
    }

    /// Arrows keyed by the id of the entity they hang under.
    fn arrows(&self) -> HashMap<&'a str, Vec<Arrow>> {
        let mut arrows: HashMap<&'a str, Vec<Arrow>> = HashMap::new();
        if self.show_events {
            for event in self.doc.events() {
                for (role, target) in event.arguments().iter() {
                    arrows.entry(event.trigger()).or_default().push(Arrow {
                        owner: event.id().to_string(),
                        role: role.to_string(),
                        target: target.to_string(),
                    });
                }
            }
        }
        if self.show_relations {
            for relation in self.doc.relations() {
                let mut arguments = relation.arguments().iter();
                let anchor = match arguments.next() {
                    Some((_, anchor)) => anchor,
                    None => continue,
                };
                for (role, target) in arguments {
                    arrows.entry(anchor).or_default().push(Arrow {
                        owner: relation.id().to_string(),
                        role: role.to_string(),
                        target: target.to_string(),
                    });
                }
            }
        }
        arrows
    }
}

// 0    5    10   - char offsets
// Sony↵and Ericsson
// ╰──╯ T1 Organization
//      ╰─╯ T4 Conj
//          ╰──────╯ T3 Organization
impl<'a> std::fmt::Display for DocumentDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = self.doc.text().unwrap_or("");

        let (opening_line, char_cols) = char_columns(text);
        f.write_str(&opening_line)?;

        let col = |offset: usize| -> usize {
            match char_cols.get(offset) {
                Some(col) => *col,
                // past the end of the text: one column per char
                None => char_cols[char_cols.len() - 1] + (offset + 1 - char_cols.len()),
            }
        };

        let mut entities: Vec<&Entity> = self.doc.entities().collect();
        entities.sort_by(|a, b| {
            (a.begin(), a.end(), a.id()).cmp(&(b.begin(), b.end(), b.id()))
        });

        let arrows = self.arrows();
        for entity in entities {
            f.write_char('\n')?;
            f.write_str(&underline(entity.spans(), &col))?;
            write!(f, " {} {}", entity.id(), entity.type_name())?;

            let arrow_indent = col(entity.begin()) + 2;
            for arrow in arrows.get(entity.id()).into_iter().flatten() {
                f.write_char('\n')?;
                for _ in 0..arrow_indent {
                    f.write_char(' ')?;
                }
                write!(f, "└─{} {}─>{}", arrow.owner, arrow.role, arrow.target)?;
            }
        }

        Ok(())
    }
}

/// The printable text line, and the display column where each char starts.
///
/// The column list has one extra entry: the width of the whole line.
fn char_columns(text: &str) -> (String, Vec<usize>) {
    let mut line = String::with_capacity(text.len());
    let mut cols = Vec::with_capacity(text.len() + 1);
    let mut width = 0;
    cols.push(width);
    for c in text.chars() {
        let c = if c == '\n' { '↵' } else { c };
        line.push(c);
        width += UnicodeWidthChar::width(c).unwrap_or(0);
        cols.push(width);
    }
    (line, cols)
}

/// `╰───╯` under each fragment; a one-column fragment is just `╰`.
fn underline<'s>(spans: impl Iterator<Item = &'s Span>, col: &impl Fn(usize) -> usize) -> String {
    let mut cells: Vec<char> = Vec::new();
    for span in spans {
        let start = col(span.start());
        let end = col(span.end()).max(start + 1);
        if cells.len() < end {
            cells.resize(end, ' ');
        }
        cells[start] = '╰';
        for cell in &mut cells[start + 1..end] {
            *cell = '─';
        }
        if end - start > 1 {
            cells[end - 1] = '╯';
        }
    }
    cells.into_iter().collect()
}

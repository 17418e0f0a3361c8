//! Free-text notes attached to another annotation.

use serde::{Deserialize, Serialize};

use super::{check_id, AnnotationKind};
use crate::errors::BratResult;

/// ```text
/// #1	AnnotatorNotes T1	this annotation is suspect
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    id: String,
    type_name: String,
    ref_id: String,
    text: String,
}

impl Note {
    pub fn new(
        id: impl Into<String>,
        type_name: impl Into<String>,
        ref_id: impl Into<String>,
        text: impl Into<String>,
    ) -> BratResult<Self> {
        let id = id.into();
        check_id(AnnotationKind::Note, &id)?;
        Ok(Self {
            id,
            type_name: type_name.into(),
            ref_id: ref_id.into(),
            text: text.into(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> BratResult<()> {
        let id = id.into();
        check_id(AnnotationKind::Note, &id)?;
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

    /// Id of the annotation the note is attached to.
    pub fn ref_id(&self) -> &str {
        &self.ref_id
    }

    pub fn with_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = ref_id.into();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

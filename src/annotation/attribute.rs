//! Attributes (and legacy modifications) attached to other annotations.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{check_id, AnnotationKind};
use crate::errors::BratResult;

/// A binary flag or multi-valued attribute on another annotation.
///
/// ```text
/// A1	Negation E1
/// A2	Confidence E2 L1
/// ```
///
/// A binary attribute has no values; its presence is the flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    id: String,
    type_name: String,
    ref_id: String,
    values: BTreeSet<String>,
}

impl Attribute {
    pub fn new(
        id: impl Into<String>,
        type_name: impl Into<String>,
        ref_id: impl Into<String>,
    ) -> BratResult<Self> {
        let id = id.into();
        check_id(AnnotationKind::Attribute, &id)?;
        Ok(Self {
            id,
            type_name: type_name.into(),
            ref_id: ref_id.into(),
            values: BTreeSet::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Accepts both `A` and the legacy `M` prefix.
    pub fn set_id(&mut self, id: impl Into<String>) -> BratResult<()> {
        let id = id.into();
        check_id(AnnotationKind::Attribute, &id)?;
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

    /// Id of the annotation this attribute marks.
    pub fn ref_id(&self) -> &str {
        &self.ref_id
    }

    pub fn with_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = ref_id.into();
        self
    }

    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.iter().map(String::as_str)
    }

    pub fn has_value(&self, value: &str) -> bool {
        self.values.contains(value)
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values.insert(value.into());
        self
    }

    pub fn is_flag(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BratError;

    fn base() -> Attribute {
        Attribute::new("A2", "Confidence", "E2").unwrap().with_value("L1")
    }

    #[test]
    fn test_fields() {
        let attribute = base();
        assert_eq!(attribute.id(), "A2");
        assert_eq!(attribute.type_name(), "Confidence");
        assert_eq!(attribute.ref_id(), "E2");
        assert!(attribute.has_value("L1"));
        assert!(!attribute.is_flag());
        assert!(Attribute::new("A1", "Negation", "E1").unwrap().is_flag());
    }

    #[test]
    fn test_equality() {
        assert_eq!(base(), base());
        assert_ne!(base(), base().with_ref_id("E3"));
        assert_ne!(base(), base().with_value("L12"));
        // values form a set
        assert_eq!(base(), base().with_value("L1"));
    }

    #[test]
    fn test_set_id_accepts_legacy_prefix() {
        let mut attribute = base();
        assert!(attribute.set_id("M4").is_ok());
        assert!(attribute.set_id("A5").is_ok());
        assert!(matches!(attribute.set_id("#1"), Err(BratError::InvalidId { .. })));
        assert_eq!(attribute.id(), "A5");
    }
}

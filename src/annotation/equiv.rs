//! Equivalence sets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::{BratError, BratResult};

/// Id shared by every equivalence relation.
pub const EQUIV_ID: &str = "*";
/// Type of every equivalence relation.
pub const EQUIV_TYPE: &str = "Equiv";

/// A symmetric, transitive group of annotations denoting the same referent.
///
/// ```text
/// T1	Organization 0 43	International Business Machines Corporation
/// T2	Organization 45 48	IBM
/// *	Equiv T1 T2
/// ```
///
/// Id and type are constants; [`set_id`](Self::set_id) and
/// [`set_type`](Self::set_type) always fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquivRelation {
    members: BTreeSet<String>,
}

impl EquivRelation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_members<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn id(&self) -> &str {
        EQUIV_ID
    }

    pub fn type_name(&self) -> &str {
        EQUIV_TYPE
    }

    pub fn set_id(&mut self, _id: impl Into<String>) -> BratResult<()> {
        Err(BratError::UnsupportedOperation {
            operation: format!("the id of an equivalence relation is always {}", EQUIV_ID),
        })
    }

    pub fn set_type(&mut self, _type_name: impl Into<String>) -> BratResult<()> {
        Err(BratError::UnsupportedOperation {
            operation: format!(
                "the type of an equivalence relation is always {}",
                EQUIV_TYPE
            ),
        })
    }

    pub fn members(&self) -> impl Iterator<Item = &str> + '_ {
        self.members.iter().map(String::as_str)
    }

    pub fn contains_member(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    pub fn with_member(mut self, id: impl Into<String>) -> Self {
        self.members.insert(id.into());
        self
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

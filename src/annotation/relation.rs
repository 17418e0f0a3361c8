//! Relations and events: typed annotations with `ROLE:ID` arguments.

use serde::{Deserialize, Serialize};

use super::{check_id, AnnotationKind, Arguments};
use crate::errors::BratResult;

/// A typed relation between annotations, without a trigger.
///
/// ```text
/// R1	Origin Arg1:T3 Arg2:T4
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    id: String,
    type_name: String,
    arguments: Arguments,
}

impl Relation {
    pub fn new(
        id: impl Into<String>,
        type_name: impl Into<String>,
        arguments: Arguments,
    ) -> BratResult<Self> {
        let id = id.into();
        check_id(AnnotationKind::Relation, &id)?;
        Ok(Self {
            id,
            type_name: type_name.into(),
            arguments,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> BratResult<()> {
        let id = id.into();
        check_id(AnnotationKind::Relation, &id)?;
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

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    /// The id filling `role`.
    pub fn argument(&self, role: &str) -> Option<&str> {
        self.arguments.get(role)
    }

    pub fn contains_role(&self, role: &str) -> bool {
        self.arguments.contains_role(role)
    }

    pub fn with_argument(mut self, role: impl Into<String>, id: impl Into<String>) -> Self {
        self.arguments = self.arguments.with(role, id);
        self
    }

    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = arguments;
        self
    }
}

/// An event anchored by a trigger entity, with `ROLE:ID` arguments.
///
/// ```text
/// T2	MERGE-ORG 14 27	joint venture
/// E1	MERGE-ORG:T2 Org1:T1 Org2:T3
/// ```
///
/// Several events may share one trigger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    id: String,
    type_name: String,
    trigger: String,
    arguments: Arguments,
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        type_name: impl Into<String>,
        trigger: impl Into<String>,
        arguments: Arguments,
    ) -> BratResult<Self> {
        let id = id.into();
        check_id(AnnotationKind::Event, &id)?;
        Ok(Self {
            id,
            type_name: type_name.into(),
            trigger: trigger.into(),
            arguments,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> BratResult<()> {
        let id = id.into();
        check_id(AnnotationKind::Event, &id)?;
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

    /// Id of the entity marking the words that state the event.
    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    pub fn with_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.trigger = trigger.into();
        self
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    pub fn argument(&self, role: &str) -> Option<&str> {
        self.arguments.get(role)
    }

    pub fn contains_role(&self, role: &str) -> bool {
        self.arguments.contains_role(role)
    }

    pub fn with_argument(mut self, role: impl Into<String>, id: impl Into<String>) -> Self {
        self.arguments = self.arguments.with(role, id);
        self
    }

    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = arguments;
        self
    }
}

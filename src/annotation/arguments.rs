//! Role-to-id argument lists shared by relations and events.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::BratResult;

/// `ROLE:ID` pairs of a relation or event, unique by role.
///
/// Kept in role order so serialization is deterministic. The list is never
/// handed out mutably: changes go through [`Arguments::with`] and
/// [`Arguments::try_remap`], which produce a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Arguments(BTreeMap<String, String>);

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `role` bound to `id`, replacing any earlier binding.
    pub fn with(mut self, role: impl Into<String>, id: impl Into<String>) -> Self {
        self.0.insert(role.into(), id.into());
        self
    }

    /// The id filling `role`.
    pub fn get(&self, role: &str) -> Option<&str> {
        self.0.get(role).map(String::as_str)
    }

    pub fn contains_role(&self, role: &str) -> bool {
        self.0.contains_key(role)
    }

    /// `(role, id)` pairs in role order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(r, id)| (r.as_str(), id.as_str()))
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rewrite every id through `remap`, stopping at the first failure.
    pub fn try_remap<F>(&self, mut remap: F) -> BratResult<Self>
    where
        F: FnMut(&str) -> BratResult<String>,
    {
        self.0
            .iter()
            .map(|(role, id)| Ok((role.clone(), remap(id)?)))
            .collect::<BratResult<BTreeMap<_, _>>>()
            .map(Arguments)
    }
}

impl<R: Into<String>, I: Into<String>> FromIterator<(R, I)> for Arguments {
    fn from_iter<T: IntoIterator<Item = (R, I)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(role, id)| (role.into(), id.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BratError;

    #[test]
    fn test_with_replaces_role() {
        let args = Arguments::new().with("Theme", "T1").with("Theme", "T2");
        assert_eq!(args.len(), 1);
        assert_eq!(args.get("Theme"), Some("T2"));
    }

    #[test]
    fn test_iteration_is_role_ordered() {
        let args: Arguments = vec![("Org2", "T3"), ("Org1", "T1")].into_iter().collect();
        assert_eq!(args.roles().collect::<Vec<_>>(), vec!["Org1", "Org2"]);
        assert_eq!(args.ids().collect::<Vec<_>>(), vec!["T1", "T3"]);
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let original = Arguments::new().with("Arg1", "T1");
        let extended = original.clone().with("Arg2", "T2");
        assert_eq!(original.len(), 1);
        assert_eq!(extended.len(), 2);
    }

    #[test]
    fn test_try_remap() {
        let args = Arguments::new().with("Arg1", "T1").with("Arg2", "T2");
        let remapped = args
            .try_remap(|id| Ok(id.replace('T', "T1")))
            .unwrap();
        assert_eq!(remapped.get("Arg1"), Some("T11"));
        assert_eq!(remapped.get("Arg2"), Some("T12"));

        let failed = args.try_remap(|id| {
            Err(BratError::UnknownId { id: id.to_string() })
        });
        assert_eq!(failed, Err(BratError::UnknownId { id: "T1".into() }));
    }
}

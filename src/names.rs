use std::collections::{BTreeSet, HashMap};

use crate::store::{Person, PersonId};

/// Maps lowercased display names to the people carrying them.
/// Names are not unique, so each key holds a set of ids.
#[derive(Debug, Default)]
pub struct NameIndex {
    names: HashMap<String, BTreeSet<PersonId>>,
}

impl NameIndex {
    pub fn build<'a>(people: impl IntoIterator<Item = &'a Person>) -> Self {
        let mut names: HashMap<String, BTreeSet<PersonId>> = HashMap::new();
        for person in people {
            names
                .entry(normalize(&person.name))
                .or_default()
                .insert(person.id.clone());
        }
        NameIndex { names }
    }

    /// Exact, case-insensitive match. Empty when nobody has the name; more
    /// than one id when the name is ambiguous. Ids come back sorted.
    pub fn resolve(&self, name: &str) -> Vec<PersonId> {
        self.names
            .get(&normalize(name))
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.to_lowercase()
}

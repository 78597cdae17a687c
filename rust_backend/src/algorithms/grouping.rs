//! Partitioning of occurrence fragments by identity key.
//!
//! Groups keep discovery order (first time a key is seen) and, inside each
//! group, the order in which fragments arrived. Nothing is filtered here:
//! fragments with empty week sets still land in their group and simply
//! contribute no cells during compression.

use std::collections::HashMap;

use crate::core::domain::{IdentityKey, OccurrenceRecord};

/// All fragments sharing one identity key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentGroup {
    pub key: IdentityKey,
    pub fragments: Vec<OccurrenceRecord>,
}

/// Insertion-ordered mapping from identity key to its fragments.
#[derive(Debug, Clone, Default)]
pub struct FragmentGroups {
    groups: Vec<FragmentGroup>,
    index: HashMap<IdentityKey, usize>,
}

impl FragmentGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment to its group, opening a new group on first sight.
    pub fn insert(&mut self, fragment: OccurrenceRecord) {
        let key = fragment.identity_key();
        match self.index.get(&key) {
            Some(&slot) => self.groups[slot].fragments.push(fragment),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push(FragmentGroup {
                    key,
                    fragments: vec![fragment],
                });
            }
        }
    }

    pub fn get(&self, key: &IdentityKey) -> Option<&[OccurrenceRecord]> {
        self.index
            .get(key)
            .map(|&slot| self.groups[slot].fragments.as_slice())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of fragments across all groups.
    pub fn fragment_count(&self) -> usize {
        self.groups.iter().map(|g| g.fragments.len()).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FragmentGroup> {
        self.groups.iter()
    }
}

impl IntoIterator for FragmentGroups {
    type Item = FragmentGroup;
    type IntoIter = std::vec::IntoIter<FragmentGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<'a> IntoIterator for &'a FragmentGroups {
    type Item = &'a FragmentGroup;
    type IntoIter = std::slice::Iter<'a, FragmentGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Buckets fragments by `(course, teacher, location, weekday)`.
pub struct FragmentGrouper;

impl FragmentGrouper {
    pub fn group<I>(fragments: I) -> FragmentGroups
    where
        I: IntoIterator<Item = OccurrenceRecord>,
    {
        let mut groups = FragmentGroups::new();
        for fragment in fragments {
            groups.insert(fragment);
        }
        groups
    }
}

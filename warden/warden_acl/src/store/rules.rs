//! Ad-hoc rule storage.

use std::collections::HashMap;
use std::fmt;

use crate::model::Test;

/// The verb tests registered for one canonical name.
pub struct RuleSet<U> {
    tests: HashMap<String, Test<U>>,
}

impl<U> RuleSet<U> {
    fn new() -> Self {
        Self {
            tests: HashMap::new(),
        }
    }

    /// The test for a verb.
    pub fn test(&self, verb: &str) -> Option<&Test<U>> {
        self.tests.get(verb)
    }

    /// The verbs in this set, in no particular order.
    pub fn verbs(&self) -> impl Iterator<Item = &str> {
        self.tests.keys().map(String::as_str)
    }

    /// The number of verbs.
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Whether the set has no verbs left.
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

impl<U> fmt::Debug for RuleSet<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.tests.iter()).finish()
    }
}

/// Rule sets indexed by canonical name.
pub struct RuleStore<U> {
    sets: HashMap<String, RuleSet<U>>,
}

impl<U> RuleStore<U> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            sets: HashMap::new(),
        }
    }

    /// Store a test for a verb, creating the name's set if needed.
    ///
    /// Returns the test previously stored for that verb.
    pub fn insert(&mut self, name: &str, verb: impl Into<String>, test: Test<U>) -> Option<Test<U>> {
        self.sets
            .entry(name.to_string())
            .or_insert_with(RuleSet::new)
            .tests
            .insert(verb.into(), test)
    }

    /// The rule set for a name.
    pub fn get(&self, name: &str) -> Option<&RuleSet<U>> {
        self.sets.get(name)
    }

    /// Remove one verb's test. The set stays in place even when emptied.
    pub fn remove_verb(&mut self, name: &str, verb: &str) -> Option<Test<U>> {
        self.sets.get_mut(name)?.tests.remove(verb)
    }

    /// Remove the whole rule set for a name.
    pub fn remove(&mut self, name: &str) -> Option<RuleSet<U>> {
        self.sets.remove(name)
    }

    /// Remove every rule set.
    pub fn clear(&mut self) {
        self.sets.clear();
    }

    /// The names that have rule sets, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    /// The number of rule sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl<U> Default for RuleStore<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> fmt::Debug for RuleStore<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.sets.iter()).finish()
    }
}

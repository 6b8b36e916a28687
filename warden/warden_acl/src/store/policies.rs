//! Policy storage.

use std::collections::HashMap;
use std::fmt;

use crate::model::Policy;

/// Policies indexed by canonical name.
pub struct PolicyStore<U> {
    policies: HashMap<String, Policy<U>>,
}

impl<U> PolicyStore<U> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            policies: HashMap::new(),
        }
    }

    /// Store a policy, returning the one it replaces.
    pub fn insert(&mut self, name: &str, policy: Policy<U>) -> Option<Policy<U>> {
        self.policies.insert(name.to_string(), policy)
    }

    /// The policy for a name.
    pub fn get(&self, name: &str) -> Option<&Policy<U>> {
        self.policies.get(name)
    }

    /// Remove the policy for a name.
    pub fn remove(&mut self, name: &str) -> Option<Policy<U>> {
        self.policies.remove(name)
    }

    /// Remove every policy.
    pub fn clear(&mut self) {
        self.policies.clear();
    }

    /// The names that have policies, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.policies.keys().map(String::as_str)
    }

    /// The number of policies.
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl<U> Default for PolicyStore<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> fmt::Debug for PolicyStore<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.policies.iter()).finish()
    }
}

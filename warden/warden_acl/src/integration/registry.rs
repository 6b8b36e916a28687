//! Explicit type-to-name registrations.

use std::any::TypeId;
use std::collections::HashMap;

use crate::model::TypeKey;

/// Canonical names registered for types.
///
/// Entries are keyed by type identity, never by the type's name, so two
/// distinct types that happen to share a declared name can map to different
/// canonical names.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    names: HashMap<TypeId, String>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a name for a type, returning the name it replaces.
    pub fn insert(&mut self, kind: TypeKey, name: impl Into<String>) -> Option<String> {
        self.names.insert(kind.id(), name.into())
    }

    /// The name registered for a type.
    pub fn name_of(&self, kind: &TypeKey) -> Option<&str> {
        self.names.get(&kind.id()).map(String::as_str)
    }

    /// Remove every registration.
    pub fn clear(&mut self) {
        self.names.clear();
    }
}

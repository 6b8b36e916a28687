//! Verb object mappers.
//!
//! A mapper turns a verb object into a canonical name. The default mapper
//! uses the name given directly, then the registry, then the type's declared
//! name. Replacing the mapper on an engine replaces all of that; the new
//! mapper still receives the registry and may consult it.

use std::sync::Arc;

use serde_json::Value;

use super::registry::Registry;
use crate::model::{VerbObject, GLOBAL_RULE};

/// A replaceable verb object mapper. `None` means the verb object could not
/// be resolved.
pub type Mapper = Arc<dyn Fn(&VerbObject<'_>, &Registry) -> Option<String> + Send + Sync>;

/// Wrap a function as a [`Mapper`].
///
/// ```
/// use warden_acl::{mapper, Acl, VerbObject};
///
/// let mut acl: Acl<()> = Acl::new();
/// acl.verb_object_mapper = mapper(|verb_object, _registry| match verb_object {
///     VerbObject::Name(name) => Some(name.to_lowercase()),
///     _ => None,
/// });
/// assert_eq!(acl.verb_object_name("Post").unwrap(), "post");
/// ```
pub fn mapper<F>(f: F) -> Mapper
where
    F: Fn(&VerbObject<'_>, &Registry) -> Option<String> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// The mapper engines start with. See [`map_verb_object`].
pub fn default_mapper() -> Mapper {
    mapper(map_verb_object)
}

/// Default resolution.
///
/// 1. A name is returned unchanged.
/// 2. A type, or an instance of a type, registered in the registry resolves
///    to the registered name.
/// 3. Otherwise the type's declared name is used. Anonymous types have none
///    and do not resolve.
pub fn map_verb_object(verb_object: &VerbObject<'_>, registry: &Registry) -> Option<String> {
    match verb_object {
        VerbObject::Global => Some(GLOBAL_RULE.to_string()),
        VerbObject::Name(name) => Some(name.to_string()),
        VerbObject::Type(kind) | VerbObject::Instance { kind, .. } => {
            let name = registry.name_of(kind).unwrap_or_else(|| kind.declared_name());
            (!name.is_empty()).then(|| name.to_string())
        }
    }
}

/// A mapper for plain JSON data objects tagged with a discriminator field.
///
/// Names pass through unchanged. Instances must be [`serde_json::Value`]
/// objects whose `field` holds a string; the registry is not consulted.
///
/// ```
/// use serde_json::json;
/// use warden_acl::{type_field_mapper, Acl, VerbObject};
///
/// let mut acl: Acl<()> = Acl::new();
/// acl.verb_object_mapper = type_field_mapper("type");
///
/// let book = json!({ "title": "The Silmarillion", "type": "book" });
/// assert_eq!(acl.verb_object_name(VerbObject::instance(&book)).unwrap(), "book");
/// ```
pub fn type_field_mapper(field: impl Into<String>) -> Mapper {
    let field = field.into();
    mapper(move |verb_object, _| match verb_object {
        VerbObject::Global => Some(GLOBAL_RULE.to_string()),
        VerbObject::Name(name) => Some(name.to_string()),
        _ => verb_object
            .downcast_ref::<Value>()?
            .get(&field)?
            .as_str()
            .map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeKey;
    use serde_json::json;

    struct Apple;

    #[test]
    fn test_names_pass_through() {
        let registry = Registry::new();
        assert_eq!(
            map_verb_object(&VerbObject::name("Apple"), &registry).as_deref(),
            Some("Apple")
        );
        assert_eq!(
            map_verb_object(&VerbObject::Global, &registry).as_deref(),
            Some(GLOBAL_RULE)
        );
    }

    #[test]
    fn test_types_and_instances_use_declared_name() {
        let registry = Registry::new();
        let apple = Apple;
        assert_eq!(
            map_verb_object(&VerbObject::of::<Apple>(), &registry).as_deref(),
            Some("Apple")
        );
        assert_eq!(
            map_verb_object(&VerbObject::instance(&apple), &registry).as_deref(),
            Some("Apple")
        );
    }

    #[test]
    fn test_registry_wins_over_declared_name() {
        let mut registry = Registry::new();
        registry.insert(TypeKey::of::<Apple>(), "Fruit");
        let apple = Apple;
        assert_eq!(
            map_verb_object(&VerbObject::of::<Apple>(), &registry).as_deref(),
            Some("Fruit")
        );
        assert_eq!(
            map_verb_object(&VerbObject::instance(&apple), &registry).as_deref(),
            Some("Fruit")
        );
    }

    #[test]
    fn test_anonymous_types_do_not_resolve() {
        let registry = Registry::new();
        let pair = (1u8, 2u8);
        assert!(map_verb_object(&VerbObject::instance(&pair), &registry).is_none());
    }

    #[test]
    fn test_type_field_mapper() {
        let mapper = type_field_mapper("type");
        let registry = Registry::new();
        let book = json!({ "type": "book", "authorId": 1 });
        let untyped = json!({ "authorId": 1 });
        let apple = Apple;

        assert_eq!(mapper(&VerbObject::instance(&book), &registry).as_deref(), Some("book"));
        assert_eq!(mapper(&VerbObject::name("book"), &registry).as_deref(), Some("book"));
        assert!(mapper(&VerbObject::instance(&untyped), &registry).is_none());
        assert!(mapper(&VerbObject::instance(&apple), &registry).is_none());
    }
}

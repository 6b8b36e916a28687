//! The rule engine.
//!
//! [`Acl`] owns the rule store, the policy store, and the type registry, and
//! answers "can this user perform this verb on this verb object" questions
//! against them.

mod aggregator;
mod evaluator;
mod registration;
mod user;

pub use user::UserAcl;

use std::fmt;

use crate::config::AclOptions;
use crate::error::{Error, Result};
use crate::integration::{default_mapper, Mapper, Registry};
use crate::model::{Policy, VerbObject, GLOBAL_RULE};
use crate::store::{PolicyStore, RuleSet, RuleStore};

/// Authorization rules and policies for users of type `U`.
///
/// ```
/// use warden_acl::{Acl, Test, VerbObject};
///
/// struct User {
///     id: u64,
/// }
///
/// struct Post {
///     owner_id: u64,
/// }
///
/// let mut acl = Acl::new();
/// acl.allow("create", VerbObject::of::<Post>())?
///     .rule("edit", VerbObject::of::<Post>(), Test::with(|user: &User, post: &Post| post.owner_id == user.id))?;
///
/// let post = Post { owner_id: 1 };
/// assert!(acl.can(&User { id: 1 }, "edit", VerbObject::instance(&post), &[])?);
/// assert!(!acl.can(&User { id: 2 }, "edit", VerbObject::instance(&post), &[])?);
/// assert!(acl.can(&User { id: 2 }, "create", VerbObject::of::<Post>(), &[])?);
/// # Ok::<(), warden_acl::Error>(())
/// ```
///
/// The engine has no internal synchronization. Registration and removal take
/// `&mut self`; share an engine across threads behind a lock.
pub struct Acl<U> {
    /// Resolves verb objects to canonical names. Replace it to change how
    /// every verb object is named; the replacement is the sole authority.
    pub verb_object_mapper: Mapper,

    strict: bool,
    rules: RuleStore<U>,
    policies: PolicyStore<U>,
    registry: Registry,
}

impl<U> Acl<U> {
    /// Create a lenient engine.
    pub fn new() -> Self {
        Self::with_options(AclOptions::default())
    }

    /// Create an engine with the given options.
    ///
    /// # Arguments
    ///
    /// * `options` - Engine options.
    ///
    /// # Returns
    ///
    /// An engine with no rules, no policies, and the default mapper.
    pub fn with_options(options: AclOptions) -> Self {
        Self {
            verb_object_mapper: default_mapper(),
            strict: options.strict,
            rules: RuleStore::new(),
            policies: PolicyStore::new(),
            registry: Registry::new(),
        }
    }

    /// Whether unknown verb objects and verbs are errors.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Switch strict mode on or off.
    pub fn set_strict(&mut self, strict: bool) -> &mut Self {
        self.strict = strict;
        self
    }

    /// The type registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// All ad-hoc rule sets.
    pub fn rules(&self) -> &RuleStore<U> {
        &self.rules
    }

    /// All policies.
    pub fn policies(&self) -> &PolicyStore<U> {
        &self.policies
    }

    /// The rule set stored for a canonical name, even when a policy shadows it.
    pub fn rule_set(&self, name: &str) -> Option<&RuleSet<U>> {
        self.rules.get(name)
    }

    /// The policy stored for a canonical name.
    pub fn policy_for(&self, name: &str) -> Option<&Policy<U>> {
        self.policies.get(name)
    }

    /// The canonical name a verb object resolves to.
    pub fn verb_object_name<'o>(&self, verb_object: impl Into<VerbObject<'o>>) -> Result<String> {
        self.resolve(&verb_object.into())
    }

    fn resolve(&self, verb_object: &VerbObject<'_>) -> Result<String> {
        if verb_object.is_global() {
            return Ok(GLOBAL_RULE.to_string());
        }

        (self.verb_object_mapper)(verb_object, &self.registry)
            .ok_or_else(|| Error::UnresolvedVerbObject(verb_object.to_string()))
    }
}

impl<U> Default for Acl<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> fmt::Debug for Acl<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Acl")
            .field("strict", &self.strict)
            .field("rules", &self.rules)
            .field("policies", &self.policies)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

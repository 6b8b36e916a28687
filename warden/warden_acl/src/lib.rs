//! # Warden ACL
//!
//! `warden_acl` decides whether a user may perform a verb on a verb object,
//! using rules and policies registered in process.
//!
//! Key concepts:
//!
//! 1. **Verb**: The action being authorized, such as `"edit"`.
//!
//! 2. **Verb Object**: The target of the verb. A plain name, a type, or a
//!    concrete instance, each resolved to a canonical name by the mapper.
//!
//! 3. **Rule**: A test attached to a verb for a canonical name. Tests are
//!    fixed answers or predicates over the user, the verb object, and any
//!    extra arguments.
//!
//! 4. **Policy**: A group of tests for one canonical name with an optional
//!    `before_all` hook. A policy shadows the ad-hoc rules of its name.
//!
//! 5. **Strict Mode**: Unknown verb objects and verbs become errors instead
//!    of silent denials.
//!
//! ```
//! use warden_acl::{Acl, Policy, Test, VerbObject};
//!
//! struct User {
//!     id: u64,
//!     manager: bool,
//! }
//!
//! struct Job {
//!     owner_id: u64,
//! }
//!
//! let mut acl = Acl::new();
//! acl.policy(
//!     Policy::new()
//!         .before_all(|_verb, user: &User, _, _, _| user.manager.then_some(true))
//!         .verb("view", Test::with(|user: &User, job: &Job| job.owner_id == user.id)),
//!     VerbObject::of::<Job>(),
//! )?;
//!
//! let job = Job { owner_id: 2 };
//! let manager = User { id: 1, manager: true };
//! let worker = User { id: 3, manager: false };
//! assert!(acl.user(&manager).can("view", VerbObject::instance(&job), &[])?);
//! assert!(!acl.user(&worker).can("view", VerbObject::instance(&job), &[])?);
//! # Ok::<(), warden_acl::Error>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod integration;
pub mod model;
pub mod store;

// Re-export key types for convenience
pub use config::AclOptions;
pub use engine::{Acl, UserAcl};
pub use error::{Error, Result};
pub use integration::{default_mapper, map_verb_object, mapper, type_field_mapper, Mapper, Registry};
pub use model::{
    Arg, AsyncHook, AsyncPredicate, BeforeAll, BoxFuture, Hook, Policy, Predicate, Test, TypeKey,
    VerbObject, Verbs, GLOBAL_RULE,
};
pub use store::{PolicyStore, RuleSet, RuleStore};

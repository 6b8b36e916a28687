//! Rule engine data model.
//!
//! This module defines verb objects, verb tests, and policies.

pub mod policy;
pub mod verb_object;
pub mod verbs;

pub use policy::{AsyncHook, BeforeAll, Hook, Policy};
pub use test::{AsyncPredicate, BoxFuture, Predicate, Test};
pub use verb_object::{Arg, TypeKey, VerbObject, GLOBAL_RULE};
pub use verbs::Verbs;

//! Policies.
//!
//! A policy groups the tests for one canonical name and may carry a
//! `before_all` hook that runs ahead of every verb. Once registered, a policy
//! takes precedence over any ad-hoc rules stored for the same name.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::test::{BoxFuture, Test};
use super::verb_object::{Arg, VerbObject};
use super::verbs::Verbs;
use crate::error::{Error, Result};

/// A synchronous pre-check: `(verb, user, verb_object, canonical_name, extra)`.
///
/// `Some(decision)` ends the evaluation; `None` defers to the verb's test.
pub type Hook<U> =
    Arc<dyn Fn(&str, &U, &VerbObject<'_>, &str, &[Arg<'_>]) -> Option<bool> + Send + Sync>;

/// An asynchronous pre-check with the same inputs and meaning as [`Hook`].
pub type AsyncHook<U> = Arc<
    dyn for<'a> Fn(
            &'a str,
            &'a U,
            &'a VerbObject<'a>,
            &'a str,
            &'a [Arg<'a>],
        ) -> BoxFuture<'a, Option<bool>>
        + Send
        + Sync,
>;

/// The `before_all` hook of a policy.
pub enum BeforeAll<U> {
    /// A synchronous hook.
    Sync(Hook<U>),

    /// An asynchronous hook. Only async entry points can run it.
    Async(AsyncHook<U>),
}

impl<U> BeforeAll<U> {
    pub(crate) fn run(
        &self,
        verb: &str,
        user: &U,
        verb_object: &VerbObject<'_>,
        name: &str,
        extra: &[Arg<'_>],
    ) -> Result<Option<bool>> {
        match self {
            Self::Sync(hook) => Ok(hook(verb, user, verb_object, name, extra)),
            Self::Async(_) => Err(Error::AsyncTest(verb.to_string())),
        }
    }

    pub(crate) async fn run_async(
        &self,
        verb: &str,
        user: &U,
        verb_object: &VerbObject<'_>,
        name: &str,
        extra: &[Arg<'_>],
    ) -> Option<bool> {
        match self {
            Self::Sync(hook) => hook(verb, user, verb_object, name, extra),
            Self::Async(hook) => hook(verb, user, verb_object, name, extra).await,
        }
    }
}

impl<U> Clone for BeforeAll<U> {
    fn clone(&self) -> Self {
        match self {
            Self::Sync(hook) => Self::Sync(Arc::clone(hook)),
            Self::Async(hook) => Self::Async(Arc::clone(hook)),
        }
    }
}

impl<U> fmt::Debug for BeforeAll<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(_) => write!(f, "Sync(..)"),
            Self::Async(_) => write!(f, "Async(..)"),
        }
    }
}

/// A group of verb tests for one canonical name.
///
/// ```
/// use warden_acl::{Policy, Test};
///
/// struct User {
///     admin: bool,
/// }
///
/// let policy: Policy<User> = Policy::new()
///     .before_all(|_verb, user: &User, _verb_object, _name, _extra| user.admin.then_some(true))
///     .verb("view", true)
///     .verb(["edit", "delete"], false);
///
/// assert!(policy.has_before_all());
/// assert!(policy.test("edit").is_some());
/// assert!(policy.test("archive").is_none());
/// ```
pub struct Policy<U> {
    before_all: Option<BeforeAll<U>>,
    tests: HashMap<String, Test<U>>,
}

impl<U> Policy<U> {
    /// An empty policy.
    pub fn new() -> Self {
        Self {
            before_all: None,
            tests: HashMap::new(),
        }
    }

    /// Attach a test to one or more verbs, replacing earlier tests for them.
    pub fn verb(mut self, verbs: impl Into<Verbs>, test: impl Into<Test<U>>) -> Self {
        let test = test.into();
        for verb in verbs.into() {
            self.tests.insert(verb, test.clone());
        }
        self
    }

    /// Set a synchronous `before_all` hook.
    pub fn before_all<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &U, &VerbObject<'_>, &str, &[Arg<'_>]) -> Option<bool> + Send + Sync + 'static,
    {
        self.before_all = Some(BeforeAll::Sync(Arc::new(hook)));
        self
    }

    /// Set an asynchronous `before_all` hook.
    pub fn before_all_async<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(
                &'a str,
                &'a U,
                &'a VerbObject<'a>,
                &'a str,
                &'a [Arg<'a>],
            ) -> BoxFuture<'a, Option<bool>>
            + Send
            + Sync
            + 'static,
    {
        self.before_all = Some(BeforeAll::Async(Arc::new(hook)));
        self
    }

    /// The test for a verb.
    pub fn test(&self, verb: &str) -> Option<&Test<U>> {
        self.tests.get(verb)
    }

    /// The `before_all` hook, if any.
    pub fn hook(&self) -> Option<&BeforeAll<U>> {
        self.before_all.as_ref()
    }

    /// Whether a `before_all` hook is set.
    pub fn has_before_all(&self) -> bool {
        self.before_all.is_some()
    }

    /// The verbs this policy has tests for, in no particular order.
    pub fn verbs(&self) -> impl Iterator<Item = &str> {
        self.tests.keys().map(String::as_str)
    }
}

impl<U> Default for Policy<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> Clone for Policy<U> {
    fn clone(&self) -> Self {
        Self {
            before_all: self.before_all.clone(),
            tests: self.tests.clone(),
        }
    }
}

impl<U> fmt::Debug for Policy<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("before_all", &self.before_all)
            .field("tests", &self.tests)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct User {
        admin: bool,
    }

    fn run_hook(policy: &Policy<User>, verb: &str, user: &User) -> Option<bool> {
        policy
            .hook()
            .unwrap()
            .run(verb, user, &VerbObject::name("Job"), "Job", &[])
            .unwrap()
    }

    #[test]
    fn test_verbs_share_a_test() {
        let policy: Policy<User> = Policy::new().verb(["view", "list"], true);
        let mut verbs: Vec<&str> = policy.verbs().collect();
        verbs.sort_unstable();
        assert_eq!(verbs, vec!["list", "view"]);
        assert!(matches!(policy.test("list"), Some(Test::Fixed(true))));
    }

    #[test]
    fn test_later_verb_overwrites() {
        let policy: Policy<User> = Policy::new().verb("edit", true).verb("edit", false);
        assert!(matches!(policy.test("edit"), Some(Test::Fixed(false))));
    }

    #[test]
    fn test_before_all_decides_or_defers() {
        let policy: Policy<User> = Policy::new().before_all(|verb, user: &User, _, _, _| {
            if user.admin {
                Some(true)
            } else if verb == "beLazy" {
                Some(false)
            } else {
                None
            }
        });

        let admin = User { admin: true };
        let worker = User { admin: false };
        assert_eq!(run_hook(&policy, "edit", &admin), Some(true));
        assert_eq!(run_hook(&policy, "beLazy", &worker), Some(false));
        assert_eq!(run_hook(&policy, "edit", &worker), None);
    }

    #[test]
    fn test_async_hook_refuses_sync_run() {
        let policy: Policy<User> = Policy::new()
            .before_all_async(|_, user: &User, _, _, _| Box::pin(async move { Some(user.admin) }));
        let user = User { admin: true };
        let result = policy
            .hook()
            .unwrap()
            .run("view", &user, &VerbObject::Global, "GLOBAL_RULE", &[]);
        assert!(matches!(result, Err(Error::AsyncTest(_))));
    }

    #[test]
    fn test_empty_policy() {
        let policy: Policy<User> = Policy::default();
        assert!(!policy.has_before_all());
        assert_eq!(policy.verbs().count(), 0);
    }
}

//! Authorization decisions.
//!
//! A decision resolves the verb object's canonical name, prefers the name's
//! policy over its ad-hoc rules, gives the policy's `before_all` hook the first
//! word, and finally evaluates the verb's test.

use log::{debug, warn};

use super::Acl;
use crate::error::{Error, Result};
use crate::model::{Arg, BeforeAll, Policy, Test, VerbObject};
use crate::store::RuleSet;

/// Where the tests for a canonical name come from.
enum Entry<'s, U> {
    Policy(&'s Policy<U>),
    Rules(&'s RuleSet<U>),
}

impl<'s, U> Entry<'s, U> {
    fn before_all(&self) -> Option<&'s BeforeAll<U>> {
        match *self {
            Self::Policy(policy) => policy.hook(),
            Self::Rules(_) => None,
        }
    }

    fn test(&self, verb: &str) -> Option<&'s Test<U>> {
        match *self {
            Self::Policy(policy) => policy.test(verb),
            Self::Rules(rules) => rules.test(verb),
        }
    }
}

impl<U> Acl<U> {
    /// Whether `user` may perform `verb` on `verb_object`.
    ///
    /// `extra` is passed unchanged to the `before_all` hook and the verb's
    /// test. Unknown verb objects and verbs deny, or fail in strict mode.
    /// Asynchronous tests and hooks cannot be evaluated here; use
    /// [`can_async`](Self::can_async).
    ///
    /// # Arguments
    ///
    /// * `user` - The user asking.
    /// * `verb` - The action.
    /// * `verb_object` - A name, a type, an instance, or [`VerbObject::Global`].
    /// * `extra` - Extra arguments for the hook and the test.
    ///
    /// # Returns
    ///
    /// * `Ok(bool)` - Whether the action is allowed.
    /// * `Err` - If the verb object cannot be resolved, an asynchronous test or
    ///   hook is reached, or strict mode rejects an unknown verb object or verb.
    pub fn can<'o>(
        &self,
        user: &U,
        verb: &str,
        verb_object: impl Into<VerbObject<'o>>,
        extra: &[Arg<'_>],
    ) -> Result<bool> {
        let verb_object = verb_object.into();
        let name = self.resolve(&verb_object)?;
        let Some(entry) = self.entry(&name)? else {
            return Ok(false);
        };

        if let Some(hook) = entry.before_all() {
            if let Some(allowed) = hook.run(verb, user, &verb_object, &name, extra)? {
                debug!("{} on {} decided by before_all: {}", verb, name, allowed);
                return Ok(allowed);
            }
        }

        let allowed = match entry.test(verb) {
            Some(test) => test.evaluate(verb, user, &verb_object, &name, extra)?,
            None => self.unknown_verb(verb, &name)?,
        };
        debug!("{} on {}: {}", verb, name, allowed);
        Ok(allowed)
    }

    /// Like [`can`](Self::can), awaiting asynchronous hooks and tests.
    ///
    /// The hook and the test are awaited one after the other; the test is
    /// never started when the hook decides.
    pub async fn can_async<'o>(
        &self,
        user: &U,
        verb: &str,
        verb_object: impl Into<VerbObject<'o>>,
        extra: &[Arg<'_>],
    ) -> Result<bool> {
        let verb_object = verb_object.into();
        let name = self.resolve(&verb_object)?;
        let Some(entry) = self.entry(&name)? else {
            return Ok(false);
        };

        if let Some(hook) = entry.before_all() {
            if let Some(allowed) = hook.run_async(verb, user, &verb_object, &name, extra).await {
                debug!("{} on {} decided by before_all: {}", verb, name, allowed);
                return Ok(allowed);
            }
        }

        let allowed = match entry.test(verb) {
            Some(test) => test.evaluate_async(user, &verb_object, &name, extra).await,
            None => self.unknown_verb(verb, &name)?,
        };
        debug!("{} on {}: {}", verb, name, allowed);
        Ok(allowed)
    }

    fn entry(&self, name: &str) -> Result<Option<Entry<'_, U>>> {
        if let Some(policy) = self.policies.get(name) {
            return Ok(Some(Entry::Policy(policy)));
        }
        if let Some(rules) = self.rules.get(name) {
            return Ok(Some(Entry::Rules(rules)));
        }

        if self.strict {
            warn!("no rules for verb object {}", name);
            return Err(Error::UnknownVerbObject(name.to_string()));
        }
        debug!("no rules for verb object {}; denying", name);
        Ok(None)
    }

    fn unknown_verb(&self, verb: &str, name: &str) -> Result<bool> {
        if self.strict {
            warn!("unknown verb {} on {}", verb, name);
            return Err(Error::UnknownVerb(verb.to_string()));
        }
        debug!("unknown verb {} on {}; denying", verb, name);
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeKey;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct User {
        id: u32,
        is_admin: bool,
    }

    struct Post {
        owner_id: u32,
    }

    struct Apple;

    fn user(id: u32) -> User {
        User { id, is_admin: false }
    }

    #[test]
    fn test_owner_rule() {
        let mut acl = Acl::new();
        acl.rule(
            "edit",
            VerbObject::of::<Post>(),
            Test::with(|user: &User, post: &Post| post.owner_id == user.id),
        )
        .unwrap();

        let post = Post { owner_id: 1 };
        assert!(acl.can(&user(1), "edit", VerbObject::instance(&post), &[]).unwrap());
        assert!(!acl.can(&user(2), "edit", VerbObject::instance(&post), &[]).unwrap());
    }

    #[test]
    fn test_global_rule() {
        let mut acl = Acl::new();
        acl.global_rule("purgeInactive", Test::user(|user: &User| user.is_admin));

        let admin = User { id: 1, is_admin: true };
        assert!(acl.can(&admin, "purgeInactive", VerbObject::Global, &[]).unwrap());
        assert!(!acl.can(&user(2), "purgeInactive", VerbObject::Global, &[]).unwrap());
    }

    #[test]
    fn test_registered_name_is_used() {
        let mut acl: Acl<User> = Acl::new();
        acl.register(TypeKey::of::<Apple>(), "Fruit");
        acl.rule("eat", VerbObject::of::<Apple>(), Test::func(|_, _, name, _| name == "Fruit"))
            .unwrap();

        let apple = Apple;
        assert!(acl.can(&user(1), "eat", VerbObject::instance(&apple), &[]).unwrap());
        assert_eq!(acl.verb_object_name(VerbObject::instance(&apple)).unwrap(), "Fruit");
    }

    #[test]
    fn test_unknown_verb_object() {
        let mut acl: Acl<User> = Acl::new();
        assert!(!acl.can(&user(1), "eat", "Apple", &[]).unwrap());

        acl.set_strict(true);
        let result = acl.can(&user(1), "eat", "Apple", &[]);
        assert!(matches!(result, Err(Error::UnknownVerbObject(name)) if name == "Apple"));
    }

    #[test]
    fn test_unknown_verb() {
        let mut acl: Acl<User> = Acl::new();
        acl.allow("eat", "Apple").unwrap();
        assert!(!acl.can(&user(1), "juggle", "Apple", &[]).unwrap());

        acl.set_strict(true);
        let result = acl.can(&user(1), "juggle", "Apple", &[]);
        assert!(matches!(result, Err(Error::UnknownVerb(verb)) if verb == "juggle"));
    }

    #[test]
    fn test_before_all_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut acl: Acl<User> = Acl::new();
        acl.policy(
            Policy::new()
                .before_all(|_, user: &User, _, _, _| user.is_admin.then_some(true))
                .verb(
                    "edit",
                    Test::func(move |_, _, _, _| {
                        counter.fetch_add(1, Ordering::SeqCst);
                        false
                    }),
                ),
            "Post",
        )
        .unwrap();

        let admin = User { id: 1, is_admin: true };
        assert!(acl.can(&admin, "edit", "Post", &[]).unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(!acl.can(&user(2), "edit", "Post", &[]).unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_async_test_in_sync_call() {
        let mut acl: Acl<User> = Acl::new();
        acl.rule("eat", "Apple", Test::user_async(|user: &User| Box::pin(async move { user.is_admin })))
            .unwrap();

        let result = acl.can(&user(1), "eat", "Apple", &[]);
        assert!(matches!(result, Err(Error::AsyncTest(_))));
    }
}

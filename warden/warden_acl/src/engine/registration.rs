//! Registering and removing rules, policies, and type names.

use log::trace;

use super::Acl;
use crate::error::Result;
use crate::model::{Policy, Test, TypeKey, VerbObject, Verbs, GLOBAL_RULE};

impl<U> Acl<U> {
    /// Attach a test to one or more verbs of a verb object.
    ///
    /// Passing [`VerbObject::Global`] stores the test under the global rule
    /// scope. Other verbs already stored for the same name are kept; a verb
    /// registered again is overwritten.
    ///
    /// # Arguments
    ///
    /// * `verbs` - One verb or a list of verbs.
    /// * `verb_object` - The verb object the rule is about.
    /// * `test` - A fixed answer or a test function.
    ///
    /// # Returns
    ///
    /// * `Ok(&mut Self)` - The engine, for chaining.
    /// * `Err` - If the verb object cannot be resolved.
    pub fn rule<'o>(
        &mut self,
        verbs: impl Into<Verbs>,
        verb_object: impl Into<VerbObject<'o>>,
        test: impl Into<Test<U>>,
    ) -> Result<&mut Self> {
        let name = self.resolve(&verb_object.into())?;
        self.insert_rules(&name, verbs.into(), test.into());
        Ok(self)
    }

    /// Allow one or more verbs on a verb object unconditionally.
    pub fn allow<'o>(
        &mut self,
        verbs: impl Into<Verbs>,
        verb_object: impl Into<VerbObject<'o>>,
    ) -> Result<&mut Self> {
        self.rule(verbs, verb_object, true)
    }

    /// Attach a test to verbs that are not about any verb object.
    ///
    /// ```
    /// use warden_acl::{Acl, Test, VerbObject};
    ///
    /// struct User {
    ///     is_admin: bool,
    /// }
    ///
    /// let mut acl = Acl::new();
    /// acl.global_rule("purgeInactive", Test::user(|user: &User| user.is_admin));
    ///
    /// let admin = User { is_admin: true };
    /// assert!(acl.can(&admin, "purgeInactive", VerbObject::Global, &[]).unwrap());
    /// ```
    pub fn global_rule(&mut self, verbs: impl Into<Verbs>, test: impl Into<Test<U>>) -> &mut Self {
        self.insert_rules(GLOBAL_RULE, verbs.into(), test.into());
        self
    }

    fn insert_rules(&mut self, name: &str, verbs: Verbs, test: Test<U>) {
        for verb in verbs {
            trace!("rule {} on {}: {:?}", verb, name, test);
            self.rules.insert(name, verb, test.clone());
        }
    }

    /// Register a policy for a verb object.
    ///
    /// The policy replaces any earlier policy for the same name and shadows
    /// the name's ad-hoc rules, which stay stored.
    ///
    /// # Arguments
    ///
    /// * `policy` - A [`Policy`] or any type converting into one.
    /// * `verb_object` - The verb object the policy governs.
    ///
    /// # Returns
    ///
    /// * `Ok(&mut Self)` - The engine, for chaining.
    /// * `Err` - If the verb object cannot be resolved.
    pub fn policy<'o>(
        &mut self,
        policy: impl Into<Policy<U>>,
        verb_object: impl Into<VerbObject<'o>>,
    ) -> Result<&mut Self> {
        let name = self.resolve(&verb_object.into())?;
        let policy = policy.into();
        trace!("policy on {}: {:?}", name, policy);
        if self.policies.insert(&name, policy).is_some() {
            trace!("replaced previous policy on {}", name);
        }
        Ok(self)
    }

    /// Register a policy type, built with its no-argument constructor.
    ///
    /// ```
    /// use warden_acl::{Acl, Policy, VerbObject};
    ///
    /// struct Job;
    ///
    /// #[derive(Default)]
    /// struct JobPolicy;
    ///
    /// impl From<JobPolicy> for Policy<()> {
    ///     fn from(_: JobPolicy) -> Self {
    ///         Policy::new().verb("view", true)
    ///     }
    /// }
    ///
    /// let mut acl = Acl::new();
    /// acl.policy_type::<JobPolicy>(VerbObject::of::<Job>()).unwrap();
    /// assert!(acl.can(&(), "view", VerbObject::of::<Job>(), &[]).unwrap());
    /// ```
    pub fn policy_type<P>(&mut self, verb_object: VerbObject<'_>) -> Result<&mut Self>
    where
        P: Default + Into<Policy<U>>,
    {
        self.policy(P::default(), verb_object)
    }

    /// Map a type to a canonical name, overriding its declared name.
    ///
    /// Applies to the type itself and to its instances. Existing rules are
    /// left untouched.
    pub fn register(&mut self, kind: TypeKey, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        trace!("register {} as {}", kind.type_name(), name);
        self.registry.insert(kind, name);
        self
    }

    /// Remove ad-hoc rules for a verb object.
    ///
    /// With a verb, only that verb's test is removed and the possibly empty
    /// rule set stays. Without one, the whole rule set goes.
    pub fn remove_rules<'o>(
        &mut self,
        verb_object: impl Into<VerbObject<'o>>,
        verb: Option<&str>,
    ) -> Result<&mut Self> {
        let name = self.resolve(&verb_object.into())?;
        match verb {
            Some(verb) => {
                if self.rules.remove_verb(&name, verb).is_some() {
                    trace!("removed rule {} on {}", verb, name);
                }
            }
            None => {
                if self.rules.remove(&name).is_some() {
                    trace!("removed rules on {}", name);
                }
            }
        }
        Ok(self)
    }

    /// Remove the policy for a verb object.
    ///
    /// Ad-hoc rules it was shadowing become authoritative again.
    pub fn remove_policy<'o>(&mut self, verb_object: impl Into<VerbObject<'o>>) -> Result<&mut Self> {
        let name = self.resolve(&verb_object.into())?;
        if self.policies.remove(&name).is_some() {
            trace!("removed policy on {}", name);
        }
        Ok(self)
    }

    /// Remove both the rules and the policy for a verb object.
    pub fn remove_all<'o>(&mut self, verb_object: impl Into<VerbObject<'o>>) -> Result<&mut Self> {
        let verb_object = verb_object.into();
        self.remove_rules(verb_object, None)?;
        self.remove_policy(verb_object)
    }

    /// Remove all rules, policies, and registrations.
    ///
    /// Strict mode and the mapper are kept.
    pub fn reset(&mut self) -> &mut Self {
        self.rules.clear();
        self.policies.clear();
        self.registry.clear();
        trace!("reset rules, policies and registry");
        self
    }
}

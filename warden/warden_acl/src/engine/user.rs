//! An engine bound to one user.

use super::Acl;
use crate::error::Result;
use crate::model::{Arg, VerbObject};

/// An [`Acl`] bound to a user, so checks read as `user_acl.can("edit", post)`.
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
/// acl.rule("edit", VerbObject::of::<Post>(), Test::with(|user: &User, post: &Post| post.owner_id == user.id))?;
///
/// let user = User { id: 3 };
/// let post = Post { owner_id: 3 };
/// assert!(acl.user(&user).can("edit", VerbObject::instance(&post), &[])?);
/// # Ok::<(), warden_acl::Error>(())
/// ```
pub struct UserAcl<'a, U> {
    acl: &'a Acl<U>,
    user: &'a U,
}

impl<U> Acl<U> {
    /// Bind this engine to a user.
    pub fn user<'a>(&'a self, user: &'a U) -> UserAcl<'a, U> {
        UserAcl { acl: self, user }
    }
}

impl<'a, U> UserAcl<'a, U> {
    /// The bound user.
    pub fn user(&self) -> &'a U {
        self.user
    }

    /// The engine checks go to.
    pub fn acl(&self) -> &'a Acl<U> {
        self.acl
    }

    /// See [`Acl::can`].
    pub fn can<'o>(
        &self,
        verb: &str,
        verb_object: impl Into<VerbObject<'o>>,
        extra: &[Arg<'_>],
    ) -> Result<bool> {
        self.acl.can(self.user, verb, verb_object, extra)
    }

    /// See [`Acl::some`].
    pub fn some(&self, verb: &str, verb_objects: &[VerbObject<'_>], extra: &[Arg<'_>]) -> Result<bool> {
        self.acl.some(self.user, verb, verb_objects, extra)
    }

    /// See [`Acl::every`].
    pub fn every(&self, verb: &str, verb_objects: &[VerbObject<'_>], extra: &[Arg<'_>]) -> Result<bool> {
        self.acl.every(self.user, verb, verb_objects, extra)
    }

    /// See [`Acl::can_async`].
    pub async fn can_async<'o>(
        &self,
        verb: &str,
        verb_object: impl Into<VerbObject<'o>>,
        extra: &[Arg<'_>],
    ) -> Result<bool> {
        self.acl.can_async(self.user, verb, verb_object, extra).await
    }

    /// See [`Acl::some_async`].
    pub async fn some_async(
        &self,
        verb: &str,
        verb_objects: &[VerbObject<'_>],
        extra: &[Arg<'_>],
    ) -> Result<bool> {
        self.acl.some_async(self.user, verb, verb_objects, extra).await
    }

    /// See [`Acl::every_async`].
    pub async fn every_async(
        &self,
        verb: &str,
        verb_objects: &[VerbObject<'_>],
        extra: &[Arg<'_>],
    ) -> Result<bool> {
        self.acl.every_async(self.user, verb, verb_objects, extra).await
    }
}

impl<U> Clone for UserAcl<'_, U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U> Copy for UserAcl<'_, U> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Test;

    struct User {
        name: &'static str,
    }

    #[test]
    fn test_bound_checks() {
        let mut acl: Acl<User> = Acl::new();
        acl.rule("wave", VerbObject::Global, Test::user(|user: &User| user.name == "ann"))
            .unwrap();

        let ann = User { name: "ann" };
        let bob = User { name: "bob" };
        assert!(acl.user(&ann).can("wave", VerbObject::Global, &[]).unwrap());
        assert!(!acl.user(&bob).can("wave", VerbObject::Global, &[]).unwrap());
        assert_eq!(acl.user(&bob).user().name, "bob");
    }

    #[test]
    fn test_bound_some_and_every() {
        let mut acl: Acl<User> = Acl::new();
        acl.allow("eat", "Apple").unwrap();
        acl.rule("eat", "Pear", false).unwrap();

        let ann = User { name: "ann" };
        let bound = acl.user(&ann);
        let copy = bound;
        let objects = [VerbObject::name("Apple"), VerbObject::name("Pear")];
        assert!(bound.some("eat", &objects, &[]).unwrap());
        assert!(!copy.every("eat", &objects, &[]).unwrap());
    }
}

//! Decisions over several verb objects.
//!
//! Verb objects are checked in order, one at a time, and the first decisive
//! answer ends the walk. Errors from a check end it as well.

use super::Acl;
use crate::error::Result;
use crate::model::{Arg, VerbObject};

impl<U> Acl<U> {
    /// Whether `user` may perform `verb` on at least one of the verb objects.
    ///
    /// An empty slice gives `false`.
    ///
    /// # Arguments
    ///
    /// * `user` - The user asking.
    /// * `verb` - The action.
    /// * `verb_objects` - The verb objects, checked in order.
    /// * `extra` - Extra arguments passed to every check.
    ///
    /// # Returns
    ///
    /// * `Ok(bool)` - `true` at the first allowed verb object.
    /// * `Err` - The first error raised by a check; later verb objects are
    ///   not checked.
    pub fn some(
        &self,
        user: &U,
        verb: &str,
        verb_objects: &[VerbObject<'_>],
        extra: &[Arg<'_>],
    ) -> Result<bool> {
        for verb_object in verb_objects {
            if self.can(user, verb, *verb_object, extra)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether `user` may perform `verb` on every one of the verb objects.
    ///
    /// An empty slice gives `true`.
    pub fn every(
        &self,
        user: &U,
        verb: &str,
        verb_objects: &[VerbObject<'_>],
        extra: &[Arg<'_>],
    ) -> Result<bool> {
        for verb_object in verb_objects {
            if !self.can(user, verb, *verb_object, extra)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Like [`some`](Self::some), awaiting each check before starting the next.
    pub async fn some_async(
        &self,
        user: &U,
        verb: &str,
        verb_objects: &[VerbObject<'_>],
        extra: &[Arg<'_>],
    ) -> Result<bool> {
        for verb_object in verb_objects {
            if self.can_async(user, verb, *verb_object, extra).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Like [`every`](Self::every), awaiting each check before starting the next.
    pub async fn every_async(
        &self,
        user: &U,
        verb: &str,
        verb_objects: &[VerbObject<'_>],
        extra: &[Arg<'_>],
    ) -> Result<bool> {
        for verb_object in verb_objects {
            if !self.can_async(user, verb, *verb_object, extra).await? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

//! Rule and policy storage.
//!
//! Both stores are keyed by canonical name and hold at most one entry per
//! name. They are plain in-memory maps; the engine owns them and mutates them
//! only through `&mut` access.

mod policies;
mod rules;

pub use policies::PolicyStore;
pub use rules::{RuleSet, RuleStore};

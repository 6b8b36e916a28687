//! Verb object resolution.
//!
//! This module maps verb objects to the canonical names rules and policies
//! are stored under.

pub mod mapper;
pub mod registry;

pub use mapper::{default_mapper, map_verb_object, mapper, type_field_mapper, Mapper};
pub use registry::Registry;

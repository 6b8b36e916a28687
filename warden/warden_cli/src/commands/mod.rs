//! Command implementations
//!
//! Each submodule holds the arguments and the implementation of one
//! subcommand.

pub mod check;
pub mod inspect;

pub use check::{execute_check, CheckArgs};
pub use inspect::{execute_inspect, InspectArgs};

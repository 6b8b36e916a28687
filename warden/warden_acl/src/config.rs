//! Engine options.
//!
//! Options can be built in code or loaded from TOML, e.g.
//!
//! ```toml
//! strict = true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Construction options for [`Acl`](crate::Acl).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AclOptions {
    /// Fail on unknown verb objects and verbs instead of denying.
    pub strict: bool,
}

impl AclOptions {
    /// Options with strict mode enabled.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Parse options from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read options from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

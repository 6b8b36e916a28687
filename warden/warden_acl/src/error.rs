//! Error types for the Warden access control engine.
//!
//! Unknown verb objects and unknown verbs only surface as errors when the
//! engine runs in strict mode; otherwise they are silent denials. Resolution
//! failures and asynchronous tests reached through a synchronous entry point
//! are programmer errors and are always reported.

use thiserror::Error;

/// Root error type for the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// No rule set or policy exists for the canonical name (strict mode only)
    #[error("No rules for verb object \"{0}\"")]
    UnknownVerbObject(String),

    /// The rule set or policy has no test for the verb (strict mode only)
    #[error("Unknown verb \"{0}\"")]
    UnknownVerb(String),

    /// The mapper could not derive a canonical name for the verb object
    #[error("Unable to resolve a name for verb object {0}")]
    UnresolvedVerbObject(String),

    /// A synchronous decision reached an asynchronous test or hook
    #[error("Test for verb \"{0}\" is asynchronous; use an async entry point")]
    AsyncTest(String),

    /// Options could not be parsed
    #[error("Invalid options: {0}")]
    Config(#[from] toml::de::Error),

    /// Options could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_names() {
        let error = Error::UnknownVerbObject("Apple".to_string());
        assert_eq!(error.to_string(), "No rules for verb object \"Apple\"");

        let error = Error::UnknownVerb("eat".to_string());
        assert_eq!(error.to_string(), "Unknown verb \"eat\"");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: Error = io.into();
        assert!(matches!(error, Error::Io(_)));
    }
}

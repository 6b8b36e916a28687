//! One or more verbs.

use std::vec;

/// The verbs a rule or policy test is attached to.
///
/// Converts from a single verb or from an ordered collection of verbs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verbs(Vec<String>);

impl Verbs {
    /// Iterate over the verbs in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Whether there are no verbs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Verbs {
    type Item = String;
    type IntoIter = vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<&str> for Verbs {
    fn from(verb: &str) -> Self {
        Self(vec![verb.to_string()])
    }
}

impl From<String> for Verbs {
    fn from(verb: String) -> Self {
        Self(vec![verb])
    }
}

impl From<&String> for Verbs {
    fn from(verb: &String) -> Self {
        Self(vec![verb.clone()])
    }
}

impl From<&[&str]> for Verbs {
    fn from(verbs: &[&str]) -> Self {
        Self(verbs.iter().map(|verb| verb.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Verbs {
    fn from(verbs: [&str; N]) -> Self {
        Self(verbs.iter().map(|verb| verb.to_string()).collect())
    }
}

impl From<Vec<&str>> for Verbs {
    fn from(verbs: Vec<&str>) -> Self {
        Self(verbs.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Verbs {
    fn from(verbs: Vec<String>) -> Self {
        Self(verbs)
    }
}

impl From<&[String]> for Verbs {
    fn from(verbs: &[String]) -> Self {
        Self(verbs.to_vec())
    }
}

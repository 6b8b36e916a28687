//! Declarative rule files
//!
//! A rule file is TOML describing rules and policies over JSON users and
//! JSON verb objects:
//!
//! ```toml
//! strict = false
//! type_field = "type"
//!
//! [[rule]]
//! verbs = ["view", "create"]
//! object = "Post"
//!
//! [[rule]]
//! verbs = "edit"
//! object = "Post"
//! test = { owner = { object_field = "ownerId", user_field = "id" } }
//!
//! [[rule]]
//! verbs = "purgeInactive"
//! test = { user_flag = "isAdmin" }
//!
//! [[policy]]
//! object = "Comment"
//! before_all = { user_flag = "isAdmin" }
//! verbs = { view = true, edit = { owner = { object_field = "authorId", user_field = "id" } } }
//! ```
//!
//! A rule without `object` is a global rule; a rule without `test` allows.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use warden_acl::{type_field_mapper, Acl, AclOptions, Policy, Test, VerbObject, Verbs};

/// Errors raised while loading a rule file
#[derive(Debug, Error)]
pub enum RuleFileError {
    /// The file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not a valid rule file
    #[error("invalid rule file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A rule lists no verbs
    #[error("rule on {0} lists no verbs")]
    NoVerbs(String),

    /// The engine rejected a rule or policy
    #[error(transparent)]
    Acl(#[from] warden_acl::Error),
}

/// One verb or a list of verbs
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VerbList {
    One(String),
    Many(Vec<String>),
}

impl VerbList {
    fn to_verbs(&self) -> Verbs {
        match self {
            Self::One(verb) => Verbs::from(verb),
            Self::Many(verbs) => Verbs::from(verbs.as_slice()),
        }
    }
}

/// A condition over the JSON user and verb object
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// The user field is truthy
    UserFlag(String),

    /// The user field equals a value
    UserEquals { field: String, value: Value },

    /// A field of the verb object equals a field of the user
    Owner {
        object_field: String,
        user_field: String,
    },
}

impl Condition {
    /// Whether the condition holds.
    ///
    /// Conditions on object fields do not hold unless the verb object is a
    /// JSON instance.
    pub fn holds(&self, user: &Value, verb_object: &VerbObject<'_>) -> bool {
        match self {
            Self::UserFlag(field) => user.get(field).is_some_and(truthy),
            Self::UserEquals { field, value } => user.get(field) == Some(value),
            Self::Owner {
                object_field,
                user_field,
            } => {
                let owner = verb_object
                    .downcast_ref::<Value>()
                    .and_then(|object| object.get(object_field));
                match (owner, user.get(user_field)) {
                    (Some(owner), Some(id)) => !owner.is_null() && owner == id,
                    _ => false,
                }
            }
        }
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The test attached to verbs: a fixed answer or a condition
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TestEntry {
    Fixed(bool),
    Condition(Condition),
}

impl Default for TestEntry {
    fn default() -> Self {
        Self::Fixed(true)
    }
}

impl TestEntry {
    fn to_test(&self) -> Test<Value> {
        match self {
            Self::Fixed(allowed) => Test::Fixed(*allowed),
            Self::Condition(condition) => {
                let condition = condition.clone();
                Test::func(move |user: &Value, verb_object, _, _| {
                    condition.holds(user, verb_object)
                })
            }
        }
    }
}

/// A `[[rule]]` table
#[derive(Debug, Clone, Deserialize)]
pub struct RuleEntry {
    pub verbs: VerbList,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub test: TestEntry,
}

/// A `[[policy]]` table
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyEntry {
    pub object: String,
    #[serde(default)]
    pub before_all: Option<Condition>,
    #[serde(default)]
    pub verbs: BTreeMap<String, TestEntry>,
}

impl PolicyEntry {
    fn to_policy(&self) -> Policy<Value> {
        let mut policy = Policy::new();
        if let Some(condition) = &self.before_all {
            let condition = condition.clone();
            policy = policy.before_all(move |_, user: &Value, verb_object, _, _| {
                condition.holds(user, verb_object).then_some(true)
            });
        }
        for (verb, test) in &self.verbs {
            policy = policy.verb(verb.as_str(), test.to_test());
        }
        policy
    }
}

fn default_type_field() -> String {
    "type".to_string()
}

/// A parsed rule file
#[derive(Debug, Clone, Deserialize)]
pub struct RuleFile {
    #[serde(flatten)]
    pub options: AclOptions,
    #[serde(default = "default_type_field")]
    pub type_field: String,
    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleEntry>,
    #[serde(default, rename = "policy")]
    pub policies: Vec<PolicyEntry>,
}

impl RuleFile {
    /// Parse a rule file from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, RuleFileError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a rule file
    pub fn load(path: &Path) -> Result<Self, RuleFileError> {
        let text = fs::read_to_string(path).map_err(|source| RuleFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self::from_toml_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            rules = file.rules.len(),
            policies = file.policies.len(),
            "loaded rule file"
        );
        Ok(file)
    }

    /// Build an engine holding every rule and policy of the file
    pub fn build(&self) -> Result<Acl<Value>, RuleFileError> {
        let mut acl = Acl::with_options(self.options);
        acl.verb_object_mapper = type_field_mapper(self.type_field.as_str());

        for rule in &self.rules {
            let verbs = rule.verbs.to_verbs();
            let object = match &rule.object {
                Some(name) => VerbObject::name(name),
                None => VerbObject::Global,
            };
            if verbs.is_empty() {
                return Err(RuleFileError::NoVerbs(object.to_string()));
            }
            acl.rule(verbs, object, rule.test.to_test())?;
        }

        for entry in &self.policies {
            acl.policy(entry.to_policy(), entry.object.as_str())?;
        }

        Ok(acl)
    }
}

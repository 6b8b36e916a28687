//! The check command
//!
//! Loads a rule file and decides a single question against it.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;
use warden_acl::{AclOptions, VerbObject};

use crate::ruleset::RuleFile;

/// Arguments for the check command
#[derive(Args)]
pub struct CheckArgs {
    /// Path to the rule file
    #[clap(long)]
    pub rules: PathBuf,

    /// The user, as a JSON value
    #[clap(long)]
    pub user: String,

    /// The verb to check
    #[clap(long)]
    pub verb: String,

    /// The verb object, by name. Omit both object flags for a global rule
    #[clap(long, conflicts_with = "object_json")]
    pub object: Option<String>,

    /// The verb object, as a JSON value carrying the type field
    #[clap(long)]
    pub object_json: Option<String>,

    /// Engine options file, replacing the options of the rule file
    #[clap(long)]
    pub options: Option<PathBuf>,

    /// Fail on unknown verb objects and verbs instead of denying
    #[clap(long)]
    pub strict: bool,
}

/// Decide the question and print `allowed` or `denied`
pub fn execute_check(args: &CheckArgs) -> Result<bool> {
    let mut file = RuleFile::load(&args.rules)?;
    if let Some(path) = &args.options {
        file.options = AclOptions::from_file(path)
            .with_context(|| format!("failed to load options from {}", path.display()))?;
    }
    let mut acl = file.build()?;
    if args.strict {
        acl.set_strict(true);
    }

    let user: Value = serde_json::from_str(&args.user).context("invalid --user JSON")?;
    let instance: Option<Value> = args
        .object_json
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .context("invalid --object-json JSON")?;

    let verb_object = match (&instance, &args.object) {
        (Some(value), _) => VerbObject::instance(value),
        (None, Some(name)) => VerbObject::name(name),
        (None, None) => VerbObject::Global,
    };

    let allowed = acl
        .can(&user, &args.verb, verb_object, &[])
        .with_context(|| format!("cannot decide \"{}\" on {}", args.verb, verb_object))?;
    tracing::info!(verb = %args.verb, object = %verb_object, allowed, "checked");

    println!("{}", if allowed { "allowed" } else { "denied" });
    Ok(allowed)
}

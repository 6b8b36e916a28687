//! The inspect command
//!
//! Prints what a rule file registers, one canonical name at a time.

use anyhow::Result;
use clap::Args;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::PathBuf;
use warden_acl::Acl;

use crate::ruleset::RuleFile;

/// Arguments for the inspect command
#[derive(Args)]
pub struct InspectArgs {
    /// Path to the rule file
    #[clap(long)]
    pub rules: PathBuf,
}

/// Print every canonical name with its rule verbs and policy verbs
pub fn execute_inspect(args: &InspectArgs) -> Result<()> {
    let file = RuleFile::load(&args.rules)?;
    let acl = file.build()?;

    println!("strict: {}", acl.is_strict());
    println!("type field: {}", file.type_field);
    print!("{}", describe(&acl));
    Ok(())
}

fn sorted<'a>(verbs: impl Iterator<Item = &'a str>) -> String {
    let verbs: BTreeSet<&str> = verbs.collect();
    verbs.into_iter().collect::<Vec<_>>().join(", ")
}

/// Render the names of an engine in sorted order
pub fn describe(acl: &Acl<Value>) -> String {
    let names: BTreeSet<&str> = acl.rules().names().chain(acl.policies().names()).collect();

    let mut out = String::new();
    for name in names {
        out.push_str(name);
        out.push('\n');
        if let Some(rules) = acl.rule_set(name) {
            out.push_str(&format!("  rules: {}\n", sorted(rules.verbs())));
        }
        if let Some(policy) = acl.policy_for(name) {
            out.push_str(&format!("  policy: {}\n", sorted(policy.verbs())));
            if policy.has_before_all() {
                out.push_str("  before_all: yes\n");
            }
        }
    }
    out
}

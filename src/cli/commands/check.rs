use anyhow::{Ok, Result};
use clap::ValueEnum;

use super::super::args::CheckCommand;
use super::{CommandResult, CommandSummary, helper::finish};

use crate::{
    core::CheckContext,
    issues::Issue,
    rules::{
        inconsistent::check_inconsistent_components_issues,
        unused::check_unused_components_issues,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CheckRule {
    Unused,
    Inconsistent,
}

impl CheckRule {
    pub fn all() -> Vec<CheckRule> {
        vec![CheckRule::Unused, CheckRule::Inconsistent]
    }
}

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.common)?;

    let checks = if cmd.checks.is_empty() {
        CheckRule::all()
    } else {
        cmd.checks.clone()
    };

    let mut all_issues: Vec<Issue> = Vec::new();

    for check in checks {
        match check {
            CheckRule::Unused => {
                let issues = check_unused_components_issues(&ctx);
                all_issues.extend(issues.into_iter().map(Issue::UnusedComponent));
            }
            CheckRule::Inconsistent => {
                let issues = check_inconsistent_components_issues(&ctx);
                all_issues.extend(issues.into_iter().map(Issue::InconsistentComponent));
            }
        }
    }

    all_issues.extend(ctx.parse_errors().into_iter().map(Issue::ParseError));

    Ok(finish(
        CommandSummary::Check,
        all_issues,
        ctx.sources.len(),
        ctx.scenes.len(),
    ))
}

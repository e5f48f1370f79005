use anyhow::Result;

use super::super::args::CheckCommand;
use super::{
    helper::finish,
    {CommandResult, CommandSummary},
};

use crate::{core::CheckContext, issues::Issue, rules::check_unused_data_issues};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.args.common)?;
    Ok(run_checks(&ctx))
}

/// Run every rule against an already-built context.
pub fn run_checks(ctx: &CheckContext) -> CommandResult {
    let mut all_issues: Vec<Issue> = check_unused_data_issues(ctx)
        .into_iter()
        .map(Issue::UnusedData)
        .collect();

    let parse_errors = ctx.parse_errors();
    all_issues.extend(parse_errors.iter().map(|i| Issue::ParseError(i.clone())));

    finish(CommandSummary::Check, all_issues, ctx.files.len(), true)
}

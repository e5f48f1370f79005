//! `no-unused-data` rule.
//!
//! Reports keys returned by a component's `data()` that no markup-bound
//! expression of the same component references. Components without a
//! `<template>` are never reported: their state may be consumed by a render
//! function or a parent.

use colored::Colorize;
use rayon::prelude::*;

use crate::{
    core::{
        CheckContext, ParsedComponent, SourceLocation,
        analysis::{DeclaredStateKey, UsageSet, UsageWalker},
    },
    issues::{Severity, UnusedDataIssue},
};

/// A markup expression the walker could not look into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedExpression {
    pub kind: &'static str,
    pub location: SourceLocation,
}

/// Outcome of checking one component.
#[derive(Debug, Default)]
pub struct ComponentReport<'a> {
    pub unused: Vec<&'a DeclaredStateKey>,
    pub unsupported: Vec<UnsupportedExpression>,
}

/// Declared keys absent from `usages`, or nothing when the component has no markup.
pub fn find_unused<'a>(
    has_markup: bool,
    declared: &'a [DeclaredStateKey],
    usages: &UsageSet,
) -> Vec<&'a DeclaredStateKey> {
    if !has_markup {
        return Vec::new();
    }
    declared
        .iter()
        .filter(|key| !usages.contains(&key.name))
        .collect()
}

/// Walk every bound expression of `component` into one usage set and diff
/// it against the declared keys.
pub fn check_component(component: &ParsedComponent) -> ComponentReport<'_> {
    let mut walker = UsageWalker::new();
    let mut unsupported = Vec::new();

    for binding in &component.bindings {
        unsupported.extend(
            walker
                .walk(&binding.expression)
                .into_iter()
                .map(|kind| UnsupportedExpression {
                    kind,
                    location: binding.location.clone(),
                }),
        );
    }

    let usages = walker.into_usages();
    ComponentReport {
        unused: find_unused(component.has_markup(), &component.declared, &usages),
        unsupported,
    }
}

pub fn check_unused_data_issues(ctx: &CheckContext) -> Vec<UnusedDataIssue> {
    let Some(severity) = ctx.config.rules.no_unused_data.severity() else {
        return Vec::new();
    };
    let verbose = ctx.verbose;

    let (issues, unsupported): (Vec<_>, Vec<_>) = ctx
        .parsed_components()
        .par_iter()
        .map(|(_, component)| {
            let report = check_component(component);
            (to_issues(&report, severity), report.unsupported)
        })
        .unzip();

    if verbose {
        log_blind_spots(ctx, unsupported.into_iter().flatten());
    }

    let mut issues: Vec<UnusedDataIssue> = issues.into_iter().flatten().collect();
    issues.sort_by(|a, b| a.context.location.cmp(&b.context.location));
    issues
}

fn to_issues(report: &ComponentReport<'_>, severity: Severity) -> Vec<UnusedDataIssue> {
    report
        .unused
        .iter()
        .map(|key| UnusedDataIssue {
            context: key.context.clone(),
            name: key.name.clone(),
            severity,
        })
        .collect()
}

/// Verbose diagnostics: expressions that were skipped or not traversed, so
/// names used only there may be reported as unused.
fn log_blind_spots(ctx: &CheckContext, unsupported: impl Iterator<Item = UnsupportedExpression>) {
    let mut lines: Vec<(SourceLocation, String)> = unsupported
        .map(|u| {
            let message = format!(
                "{} is not analysed; names used inside it are not counted",
                u.kind
            );
            (u.location, message)
        })
        .collect();

    for component in ctx.parsed_components().values() {
        for skipped in &component.skipped_bindings {
            lines.push((
                skipped.location.clone(),
                format!("binding skipped: {}", skipped.error),
            ));
        }
    }

    lines.sort();
    for (location, message) in lines {
        eprintln!(
            "{} {}:{}:{} - {}",
            "warning:".bold().yellow(),
            location.file_path,
            location.line,
            location.col,
            message
        );
    }
}

//! Per-file front end: turns the text of a `.vue` file into everything the
//! unused-data rule needs (markup presence, declared keys, bound expressions).

use std::sync::Arc;

use anyhow::{Result, bail};
use swc_common::SourceMap;

use crate::core::{
    LineIndex, SourceLocation,
    analysis::{
        declared::{DeclaredStateKey, extract_declared_state},
        node::MarkupExpression,
    },
    parsers::{
        binding::parse_binding,
        script::parse_script_block,
        sfc::{DocumentFragment, parse_sfc},
        template::scan_template,
    },
};

/// Template languages whose markup can be scanned.
const MARKUP_LANGS: &[&str] = &["html"];

/// One parsed expression bound in the template.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupBinding {
    pub expression: MarkupExpression,
    pub location: SourceLocation,
}

/// A binding site whose text is not a valid expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBinding {
    pub location: SourceLocation,
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct ParsedComponent {
    pub file_path: String,
    pub fragment: DocumentFragment,
    pub declared: Vec<DeclaredStateKey>,
    pub bindings: Vec<MarkupBinding>,
    pub skipped_bindings: Vec<SkippedBinding>,
}

impl ParsedComponent {
    /// Whether the component has a top-level `<template>`.
    pub fn has_markup(&self) -> bool {
        self.fragment.has_template()
    }
}

/// Parse a single-file component.
///
/// Fails when the script block does not parse or the template cannot be
/// scanned (external `src`, non-HTML `lang`). Invalid individual bindings do
/// not fail the component; they are returned in `skipped_bindings`.
pub fn parse_component(code: &str, file_path: &str) -> Result<ParsedComponent> {
    let fragment = parse_sfc(code);

    let declared = match fragment.script() {
        Some(script) => {
            let source_map = Arc::new(SourceMap::default());
            let parsed = parse_script_block(code, script, file_path, source_map)?;
            extract_declared_state(&parsed.module, &parsed.source_map, file_path)
        }
        None => Vec::new(),
    };

    let mut bindings = Vec::new();
    let mut skipped_bindings = Vec::new();

    if let Some(template) = fragment.template() {
        if template.has_attr("src") {
            bail!("External template (src=\"...\") cannot be checked");
        }
        if let Some(lang) = template.lang()
            && !MARKUP_LANGS.contains(&lang)
        {
            bail!("Unsupported template lang \"{}\"", lang);
        }

        let line_index = LineIndex::new(code);
        for site in scan_template(template) {
            let (line, col) = line_index.line_col(code, site.offset);
            let location = SourceLocation::new(file_path, line, col);
            match parse_binding(&site) {
                Ok(expressions) => bindings.extend(expressions.into_iter().map(|expression| {
                    MarkupBinding {
                        expression,
                        location: location.clone(),
                    }
                })),
                Err(e) => skipped_bindings.push(SkippedBinding {
                    location,
                    error: e.to_string(),
                }),
            }
        }
    }

    Ok(ParsedComponent {
        file_path: file_path.to_string(),
        fragment,
        declared,
        bindings,
        skipped_bindings,
    })
}

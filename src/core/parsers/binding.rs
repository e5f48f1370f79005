//! Parse the text of a markup binding site into [`MarkupExpression`]s.
//!
//! Binding values are plain JavaScript with two Vue extensions:
//! - filter sequences in interpolations and `v-bind` (`price | currency('$')`)
//! - iteration bindings in `v-for` (`(item, index) in items`)
//!
//! `v-on` handlers may also be statement lists (`a = 1; save()`).

use std::sync::LazyLock;

use anyhow::{Result, anyhow, bail};
use regex::Regex;
use swc_common::{FileName, GLOBALS, Globals, SourceMap};
use swc_ecma_ast::{Callee, Expr, ExprStmt, ParenExpr, Script, Stmt};
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

use crate::core::{
    analysis::node::{Filter, FilterSequence, IterationBinding, MarkupExpression},
    parsers::template::{BindingKind, TemplateBinding},
};

/// Characters after which `/` is a division operator rather than a regex start.
static VALID_DIVISION_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w).+\-_$\]]$").expect("Invalid regex pattern"));

/// `alias in collection` / `alias of collection`.
static ITERATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*(.*?)\s+(?:in|of)\s+(.*?)\s*$").expect("Invalid regex pattern")
});

const DIRECTIVE_BIND: &str = "v-bind";
const DIRECTIVE_FOR: &str = "v-for";
const DIRECTIVE_ON: &str = "v-on";

/// Parse one binding site.
///
/// Most sites yield a single expression; `v-on` statement lists yield one per
/// expression statement.
pub fn parse_binding(binding: &TemplateBinding) -> Result<Vec<MarkupExpression>> {
    let source = binding.source.as_str();
    match &binding.kind {
        BindingKind::Interpolation => Ok(vec![parse_filtered(source)?]),
        BindingKind::DynamicArgument => {
            Ok(vec![MarkupExpression::Expression(parse_expression(source)?)])
        }
        BindingKind::Directive { name } => match name.as_str() {
            DIRECTIVE_BIND => Ok(vec![parse_filtered(source)?]),
            DIRECTIVE_FOR => Ok(vec![MarkupExpression::Iteration(parse_iteration(source)?)]),
            DIRECTIVE_ON => parse_handler(source),
            _ => Ok(vec![MarkupExpression::Expression(parse_expression(source)?)]),
        },
    }
}

/// Parse `code` as exactly one JavaScript expression.
pub fn parse_expression(code: &str) -> Result<Box<Expr>> {
    // The newline keeps a trailing `//` comment from swallowing the paren.
    let script = parse_script_text(format!("({}\n)", code))?;
    let mut body = script.body.into_iter();
    match (body.next(), body.next()) {
        (Some(Stmt::Expr(ExprStmt { expr, .. })), None) => match *expr {
            Expr::Paren(ParenExpr { expr, .. }) => Ok(expr),
            _ => bail!("Not a single expression: {}", code.trim()),
        },
        _ => bail!("Not a single expression: {}", code.trim()),
    }
}

fn parse_script_text(code: String) -> Result<Script> {
    GLOBALS.set(&Globals::new(), || {
        let source_map = SourceMap::default();
        let source_file = source_map.new_source_file(FileName::Anon.into(), code);
        let mut parser = Parser::new(
            Syntax::Typescript(TsSyntax::default()),
            StringInput::from(&*source_file),
            None,
        );
        let script = parser
            .parse_script()
            .map_err(|e| anyhow!("Failed to parse expression: {:?}", e.kind()))?;
        if let Some(e) = parser.take_errors().into_iter().next() {
            bail!("Failed to parse expression: {:?}", e.kind());
        }
        Ok(script)
    })
}

fn parse_filtered(source: &str) -> Result<MarkupExpression> {
    let Some((base, filters)) = split_filters(source) else {
        return Ok(MarkupExpression::Expression(parse_expression(source)?));
    };

    let expression = parse_expression(base)?;
    let filters = filters
        .into_iter()
        .map(parse_filter)
        .collect::<Result<Vec<_>>>()?;

    Ok(MarkupExpression::Filters(FilterSequence {
        expression,
        filters,
    }))
}

fn parse_filter(segment: &str) -> Result<Filter> {
    let expr = parse_expression(segment)?;
    match *expr {
        Expr::Call(call) => match call.callee {
            Callee::Expr(callee) => Ok(Filter {
                callee,
                arguments: Some(call.args),
            }),
            _ => bail!("Invalid filter: {}", segment.trim()),
        },
        other => Ok(Filter {
            callee: Box::new(other),
            arguments: None,
        }),
    }
}

/// Split `value | f1 | f2(x)` on top-level single pipes.
///
/// Pipes inside strings, template literals, regex literals and brackets do
/// not split, and `||` is never a filter pipe. Returns `None` when the text
/// has no filter.
fn split_filters(source: &str) -> Option<(&str, Vec<&str>)> {
    let bytes = source.as_bytes();
    let mut quote: Option<u8> = None;
    let mut in_regex = false;
    let (mut paren, mut square, mut curly) = (0usize, 0usize, 0usize);
    let mut segments = Vec::new();
    let mut last = 0;
    let mut prev = 0u8;

    for (i, &c) in bytes.iter().enumerate() {
        if let Some(q) = quote {
            if c == q && prev != b'\\' {
                quote = None;
            }
        } else if in_regex {
            if c == b'/' && prev != b'\\' {
                in_regex = false;
            }
        } else {
            match c {
                b'"' | b'\'' | b'`' => quote = Some(c),
                b'|' if prev != b'|'
                    && bytes.get(i + 1) != Some(&b'|')
                    && paren == 0
                    && square == 0
                    && curly == 0 =>
                {
                    segments.push(&source[last..i]);
                    last = i + 1;
                }
                b'(' => paren += 1,
                b')' => paren = paren.saturating_sub(1),
                b'[' => square += 1,
                b']' => square = square.saturating_sub(1),
                b'{' => curly += 1,
                b'}' => curly = curly.saturating_sub(1),
                b'/' => {
                    let before = source[..i].trim_end().chars().last();
                    let is_division = before.is_some_and(|p| {
                        let mut buf = [0u8; 4];
                        VALID_DIVISION_CHAR.is_match(p.encode_utf8(&mut buf))
                    });
                    if !is_division {
                        in_regex = true;
                    }
                }
                _ => {}
            }
        }
        prev = c;
    }

    if segments.is_empty() {
        return None;
    }
    let base = segments.remove(0);
    segments.push(&source[last..]);
    Some((base, segments))
}

fn parse_iteration(source: &str) -> Result<IterationBinding> {
    let captures = ITERATION
        .captures(source)
        .ok_or_else(|| anyhow!("Invalid v-for expression: {}", source.trim()))?;
    let alias = captures.get(1).map_or("", |m| m.as_str()).trim();
    let collection = captures.get(2).map_or("", |m| m.as_str());

    Ok(IterationBinding {
        alias: alias.to_string(),
        collection: parse_expression(collection)?,
    })
}

/// `v-on` values: a handler expression, or a statement list whose
/// expression statements are analysed individually.
fn parse_handler(source: &str) -> Result<Vec<MarkupExpression>> {
    if let Ok(expr) = parse_expression(source) {
        return Ok(vec![MarkupExpression::Expression(expr)]);
    }

    let script = parse_script_text(source.to_string())?;
    Ok(script
        .body
        .into_iter()
        .filter_map(|stmt| match stmt {
            Stmt::Expr(ExprStmt { expr, .. }) => Some(MarkupExpression::Expression(expr)),
            _ => None,
        })
        .collect())
}

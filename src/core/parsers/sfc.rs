//! Single-file component block splitter.
//!
//! Splits a `.vue` file into its top-level blocks (`<template>`, `<script>`,
//! `<style>` and custom blocks). The resulting [`DocumentFragment`] is what
//! the markup presence check inspects.

use super::html::{Attribute, find_close_tag, read_start_tag};

pub const TEMPLATE_BLOCK: &str = "template";
pub const SCRIPT_BLOCK: &str = "script";

/// One top-level block of a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SfcBlock {
    /// Lowercased tag name (`template`, `script`, `style`, `i18n`, ...).
    pub name: String,
    pub attrs: Vec<Attribute>,
    /// Raw text between the start and end tag.
    pub content: String,
    /// Byte offset of `content` inside the whole file.
    pub content_start: usize,
}

impl SfcBlock {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    pub fn lang(&self) -> Option<&str> {
        self.attr("lang")
    }
}

/// Top-level fragment list of a component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFragment {
    pub children: Vec<SfcBlock>,
}

impl DocumentFragment {
    /// Markup presence: true iff a top-level `<template>` block exists.
    pub fn has_template(&self) -> bool {
        self.children.iter().any(|b| b.name == TEMPLATE_BLOCK)
    }

    pub fn template(&self) -> Option<&SfcBlock> {
        self.children.iter().find(|b| b.name == TEMPLATE_BLOCK)
    }

    /// The classic `<script>` block. `<script setup>` cannot declare `data()`,
    /// so it is only used when no classic block exists.
    pub fn script(&self) -> Option<&SfcBlock> {
        let mut scripts = self.children.iter().filter(|b| b.name == SCRIPT_BLOCK);
        let first = scripts.next()?;
        if !first.has_attr("setup") {
            return Some(first);
        }
        scripts.find(|b| !b.has_attr("setup")).or(Some(first))
    }
}

/// Split `source` into its top-level blocks.
///
/// Text outside blocks and HTML comments are skipped. A block whose end tag is
/// missing runs to the end of the file.
pub fn parse_sfc(source: &str) -> DocumentFragment {
    let lower = source.to_ascii_lowercase();
    let mut children = Vec::new();
    let mut pos = 0;

    while let Some(found) = source[pos..].find('<') {
        let at = pos + found;
        let rest = &source[at..];

        if rest.starts_with("<!--") {
            pos = source[at..]
                .find("-->")
                .map(|p| at + p + 3)
                .unwrap_or(source.len());
            continue;
        }

        let Some(tag) = read_start_tag(source, at) else {
            pos = at + 1;
            continue;
        };
        let name = tag.name.to_ascii_lowercase();

        if tag.self_closing {
            children.push(SfcBlock {
                name,
                attrs: tag.attrs,
                content: String::new(),
                content_start: tag.end,
            });
            pos = tag.end;
            continue;
        }

        let nested = name == TEMPLATE_BLOCK;
        let (content_end, next) = find_close_tag(&lower, tag.end, &name, nested)
            .unwrap_or((source.len(), source.len()));

        children.push(SfcBlock {
            name,
            attrs: tag.attrs,
            content: source[tag.end..content_end].to_string(),
            content_start: tag.end,
        });
        pos = next;
    }

    DocumentFragment { children }
}

//! Template binding scanner.
//!
//! Walks the `<template>` block and yields every site whose text is a bound
//! expression: `{{ }}` interpolations, directive attribute values
//! (`v-*`, `:prop`, `@event`) and dynamic directive arguments (`:[key]`).
//! Slot-scope declarations are skipped because their values declare aliases
//! rather than reference state.

use crate::core::parsers::{
    html::{Attribute, decode_entities, find_close_tag, read_start_tag},
    sfc::SfcBlock,
};

const INTERPOLATION_OPEN: &str = "{{";
const INTERPOLATION_CLOSE: &str = "}}";

/// Elements whose content is raw text, never markup or interpolation.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Elements whose content is text but still interpolated.
const ESCAPABLE_TEXT_ELEMENTS: &[&str] = &["textarea", "title"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingKind {
    Interpolation,
    /// The bracketed argument of a dynamic directive, `:[key]` or `@[event]`.
    DynamicArgument,
    /// Normalised directive name: `v-bind`, `v-on`, `v-if`, `v-for`, ...
    Directive { name: String },
}

/// One markup-bound expression site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateBinding {
    pub kind: BindingKind,
    /// Expression text with HTML entities decoded.
    pub source: String,
    /// Byte offset of the first non-blank expression character in the file.
    pub offset: usize,
}

/// Collect all binding sites of a template block, in document order.
pub fn scan_template(block: &SfcBlock) -> Vec<TemplateBinding> {
    let content = block.content.as_str();
    let lower = content.to_ascii_lowercase();
    let base = block.content_start;
    let mut bindings = Vec::new();
    let mut pos = 0;

    while pos < content.len() {
        let next_tag = content[pos..].find('<').map(|p| pos + p);
        let next_mustache = content[pos..].find(INTERPOLATION_OPEN).map(|p| pos + p);

        match (next_tag, next_mustache) {
            (Some(at), Some(open)) if at < open => {
                pos = scan_tag(content, &lower, at, base, &mut bindings);
            }
            (_, Some(open)) => match scan_interpolation(content, open, base, &mut bindings) {
                Some(next) => pos = next,
                None => break,
            },
            (Some(at), None) => pos = scan_tag(content, &lower, at, base, &mut bindings),
            (None, None) => break,
        }
    }

    bindings
}

/// Record the interpolation opening at `open`; `None` when it is never closed.
fn scan_interpolation(
    content: &str,
    open: usize,
    base: usize,
    bindings: &mut Vec<TemplateBinding>,
) -> Option<usize> {
    let inner = open + INTERPOLATION_OPEN.len();
    let close = content[inner..].find(INTERPOLATION_CLOSE)?;
    let raw = &content[inner..inner + close];
    push_binding(bindings, BindingKind::Interpolation, raw, base + inner);
    Some(inner + close + INTERPOLATION_CLOSE.len())
}

/// Handle the markup starting at `at` (a `<`) and return where scanning resumes.
fn scan_tag(
    content: &str,
    lower: &str,
    at: usize,
    base: usize,
    bindings: &mut Vec<TemplateBinding>,
) -> usize {
    let rest = &content[at..];
    if rest.starts_with("<!--") {
        return rest
            .find("-->")
            .map(|p| at + p + 3)
            .unwrap_or(content.len());
    }
    if rest.starts_with("</") {
        return rest.find('>').map(|p| at + p + 1).unwrap_or(content.len());
    }

    let Some(tag) = read_start_tag(content, at) else {
        return at + 1;
    };
    let name = tag.name.to_ascii_lowercase();
    let verbatim = tag.attrs.iter().any(|a| a.name == "v-pre");

    if !verbatim {
        for attr in &tag.attrs {
            if let Some((argument, offset)) = dynamic_argument(attr) {
                push_binding(bindings, BindingKind::DynamicArgument, argument, base + offset);
            }
            if let Some(directive) = directive_name(&attr.name) {
                push_attribute(bindings, attr, directive, base);
            }
        }
    }

    if tag.self_closing {
        return tag.end;
    }
    if verbatim || RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
        return find_close_tag(lower, tag.end, &name, verbatim)
            .map(|(_, end)| end)
            .unwrap_or(content.len());
    }
    if ESCAPABLE_TEXT_ELEMENTS.contains(&name.as_str()) {
        return scan_escapable_text(content, lower, tag.end, &name, base, bindings);
    }
    tag.end
}

/// Scan the text of an escapable element for interpolations only; tags
/// inside it are literal text.
fn scan_escapable_text(
    content: &str,
    lower: &str,
    from: usize,
    name: &str,
    base: usize,
    bindings: &mut Vec<TemplateBinding>,
) -> usize {
    let (close_start, close_end) =
        find_close_tag(lower, from, name, false).unwrap_or((content.len(), content.len()));
    let text = &content[..close_start];
    let mut pos = from;
    while let Some(open) = text[pos..].find(INTERPOLATION_OPEN).map(|p| pos + p) {
        match scan_interpolation(text, open, base, bindings) {
            Some(next) => pos = next,
            None => break,
        }
    }
    close_end
}

fn push_attribute(
    bindings: &mut Vec<TemplateBinding>,
    attr: &Attribute,
    directive: String,
    base: usize,
) {
    if let Some(value) = &attr.value {
        push_binding(
            bindings,
            BindingKind::Directive { name: directive },
            value,
            base + attr.value_start,
        );
    }
}

fn push_binding(bindings: &mut Vec<TemplateBinding>, kind: BindingKind, raw: &str, offset: usize) {
    let trimmed = raw.trim_start();
    if trimmed.trim_end().is_empty() {
        return;
    }
    bindings.push(TemplateBinding {
        kind,
        source: decode_entities(raw),
        offset: offset + (raw.len() - trimmed.len()),
    });
}

/// The `[..]` argument of a directive attribute and its byte offset in the
/// scanned source, e.g. `key` in `v-bind:[key]`, `:[key]`, `@[event]` or `#[slot]`.
fn dynamic_argument(attr: &Attribute) -> Option<(&str, usize)> {
    let name = attr.name.as_str();
    let is_directive = name.starts_with("v-") || name.starts_with([':', '.', '@', '#']);
    if !is_directive {
        return None;
    }
    let open = name.find('[')?;
    let close = open + name[open..].find(']')?;
    Some((&name[open + 1..close], attr.name_start + open + 1))
}

/// Normalise an attribute name to the directive it denotes.
///
/// `:x`, `.x` and `v-bind:x` become `v-bind`; `@x` and `v-on:x` become
/// `v-on`; `v-name:arg.modifier` becomes `v-name`. Plain attributes and
/// slot-scope declarations return `None`.
fn directive_name(attr: &str) -> Option<String> {
    match attr.as_bytes().first()? {
        b':' | b'.' => return Some("v-bind".to_string()),
        b'@' => return Some("v-on".to_string()),
        _ => {}
    }
    if matches!(attr, "slot-scope" | "scope") {
        return None;
    }
    let directive = attr.strip_prefix("v-")?;
    let name = directive.split([':', '.']).next().unwrap_or(directive);
    match name {
        "" | "slot" | "pre" | "cloak" | "once" => None,
        _ => Some(format!("v-{name}")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::parsers::sfc::parse_sfc;

    fn scan(source: &str) -> Vec<(String, String)> {
        let fragment = parse_sfc(source);
        scan_template(fragment.template().unwrap())
            .into_iter()
            .map(|b| {
                let kind = match b.kind {
                    BindingKind::Interpolation => "{{}}".to_string(),
                    BindingKind::DynamicArgument => "[]".to_string(),
                    BindingKind::Directive { name } => name,
                };
                (kind, b.source)
            })
            .collect()
    }

    fn pair(kind: &str, source: &str) -> (String, String) {
        (kind.to_string(), source.to_string())
    }

    #[test]
    fn test_scan_interpolations_and_directives() {
        let found = scan(
            r#"<template>
  <div :class="cls" v-if="visible" @click.stop="toggle()" v-model:title="title" .prop="p">
    {{ message }} and {{ other | upper }}
  </div>
</template>"#,
        );
        assert_eq!(
            found,
            vec![
                pair("v-bind", "cls"),
                pair("v-if", "visible"),
                pair("v-on", "toggle()"),
                pair("v-model", "title"),
                pair("v-bind", "p"),
                pair("{{}}", " message "),
                pair("{{}}", " other | upper "),
            ]
        );
    }

    #[test]
    fn test_scan_skips_plain_attrs_and_slot_scopes() {
        let found = scan(
            r#"<template>
  <list title="x" v-else v-slot:item="{ row }" #footer="f" slot-scope="s" :a=""></list>
</template>"#,
        );
        assert!(found.is_empty(), "{:?}", found);
    }

    #[test]
    fn test_scan_skips_comments_and_v_pre() {
        let found = scan(
            r#"<template>
  <!-- {{ commented }} -->
  <span v-pre>{{ raw }} <b>{{ rawer }}</b></span>
  <p>{{ kept }}</p>
</template>"#,
        );
        assert_eq!(found, vec![pair("{{}}", " kept ")]);
    }

    #[test]
    fn test_scan_decodes_entities() {
        let found = scan(r#"<template><p v-if="a &amp;&amp; b &lt; c"></p></template>"#);
        assert_eq!(found, vec![pair("v-if", "a && b < c")]);
    }

    #[test]
    fn test_binding_offset_points_into_file() {
        let source = "<template>\n  <p :title=\" heading \">{{  body }}</p>\n</template>";
        let fragment = parse_sfc(source);
        let bindings = scan_template(fragment.template().unwrap());

        assert_eq!(&source[bindings[0].offset..bindings[0].offset + 7], "heading");
        assert_eq!(&source[bindings[1].offset..bindings[1].offset + 4], "body");
    }

    #[test]
    fn test_scan_dynamic_arguments() {
        let found = scan(
            r#"<template>
  <a :[attr]="val" v-bind:[other].prop="x" @[evt]="go" v-on:[name]></a>
  <list #[slotName]="{ row }" data-x="[plain]"></list>
</template>"#,
        );
        assert_eq!(
            found,
            vec![
                pair("[]", "attr"),
                pair("v-bind", "val"),
                pair("[]", "other"),
                pair("v-bind", "x"),
                pair("[]", "evt"),
                pair("v-on", "go"),
                pair("[]", "name"),
                pair("[]", "slotName"),
            ]
        );
    }

    #[test]
    fn test_dynamic_argument_offset_points_into_file() {
        let source = "<template>\n  <a :[attr]=\"v\"></a>\n</template>";
        let fragment = parse_sfc(source);
        let bindings = scan_template(fragment.template().unwrap());

        assert_eq!(bindings[0].kind, BindingKind::DynamicArgument);
        assert_eq!(&source[bindings[0].offset..bindings[0].offset + 4], "attr");
    }

    #[test]
    fn test_scan_textarea_interpolates_but_skips_tags() {
        let found = scan(
            r#"<template>
  <textarea :rows="rows">{{ note }} <b :x="ignored">{{ more }}</b></textarea>
  <style>.a { color: red }</style>
  <p>{{ after }}</p>
</template>"#,
        );
        assert_eq!(
            found,
            vec![
                pair("v-bind", "rows"),
                pair("{{}}", " note "),
                pair("{{}}", " more "),
                pair("{{}}", " after "),
            ]
        );
    }

    #[test]
    fn test_scan_mustache_before_and_after_tags() {
        let found = scan("<template>{{ first }}<br/>{{ last }}</template>");
        assert_eq!(found, vec![pair("{{}}", " first "), pair("{{}}", " last ")]);
    }
}

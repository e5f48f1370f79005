//! Minimal HTML tag reader shared by the SFC block splitter and the
//! template binding scanner.
//!
//! Only what the analysis needs: tag names, attributes with the byte offset
//! of their value, and self-closing detection. Entities are decoded on
//! demand with [`decode_entities`].

/// One attribute of a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// Byte offset of the first name character in the scanned source.
    pub name_start: usize,
    /// Raw (undecoded) attribute value, `None` for bare attributes like `v-else`.
    pub value: Option<String>,
    /// Byte offset of the first value character in the scanned source.
    pub value_start: usize,
}

/// A parsed start tag such as `<div :class="cls" v-if="ok">`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub self_closing: bool,
    /// Byte offset just past the closing `>`.
    pub end: usize,
}

fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
}

/// Read a start tag beginning at `start` (which must point at `<`).
///
/// Returns `None` when the bytes at `start` do not form a start tag, or when
/// the tag is never closed.
pub fn read_start_tag(source: &str, start: usize) -> Option<StartTag> {
    let bytes = source.as_bytes();
    let len = bytes.len();
    if bytes.get(start) != Some(&b'<') || !bytes.get(start + 1)?.is_ascii_alphabetic() {
        return None;
    }

    let mut i = start + 1;
    let name_start = i;
    while i < len && is_tag_name_byte(bytes[i]) {
        i += 1;
    }
    let name = source[name_start..i].to_string();
    let mut attrs = Vec::new();

    loop {
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len {
            return None;
        }
        match bytes[i] {
            b'>' => {
                return Some(StartTag {
                    name,
                    attrs,
                    self_closing: false,
                    end: i + 1,
                });
            }
            b'/' if bytes.get(i + 1) == Some(&b'>') => {
                return Some(StartTag {
                    name,
                    attrs,
                    self_closing: true,
                    end: i + 2,
                });
            }
            b'/' | b'=' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let attr_start = i;
        while i < len
            && !bytes[i].is_ascii_whitespace()
            && bytes[i] != b'='
            && bytes[i] != b'>'
            && !(bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'>'))
        {
            i += 1;
        }
        let attr_name = source[attr_start..i].to_string();

        let mut j = i;
        while j < len && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if j < len && bytes[j] == b'=' {
            j += 1;
            while j < len && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if j < len && (bytes[j] == b'"' || bytes[j] == b'\'') {
                let quote = bytes[j] as char;
                let value_start = j + 1;
                let value_end = value_start + source[value_start..].find(quote)?;
                attrs.push(Attribute {
                    name: attr_name,
                    name_start: attr_start,
                    value: Some(source[value_start..value_end].to_string()),
                    value_start,
                });
                i = value_end + 1;
            } else {
                let value_start = j;
                while j < len && !bytes[j].is_ascii_whitespace() && bytes[j] != b'>' {
                    j += 1;
                }
                attrs.push(Attribute {
                    name: attr_name,
                    name_start: attr_start,
                    value: Some(source[value_start..j].to_string()),
                    value_start,
                });
                i = j;
            }
        } else {
            attrs.push(Attribute {
                name: attr_name,
                name_start: attr_start,
                value: None,
                value_start: i,
            });
        }
    }
}

fn is_tag_boundary(b: Option<&u8>) -> bool {
    match b {
        None => true,
        Some(b) => b.is_ascii_whitespace() || matches!(b, b'>' | b'/'),
    }
}

/// Find the end tag closing an element named `name`, starting the search at `from`.
///
/// `lower` must be the ASCII-lowercased source (same byte offsets). When
/// `nested` is true, same-name start tags met on the way are balanced, which
/// is required for `<template>` blocks that contain `<template v-if>`.
///
/// Returns `(close_start, close_end)` where `close_end` is past the `>`.
pub fn find_close_tag(
    lower: &str,
    from: usize,
    name: &str,
    nested: bool,
) -> Option<(usize, usize)> {
    let bytes = lower.as_bytes();
    let open_pat = format!("<{}", name);
    let close_pat = format!("</{}", name);
    let mut depth = 0usize;
    let mut i = from;

    loop {
        let close = i + lower.get(i..)?.find(&close_pat)?;

        if nested {
            let mut k = i;
            while let Some(p) = lower[k..close].find(&open_pat) {
                let after = k + p + open_pat.len();
                if is_tag_boundary(bytes.get(after)) {
                    depth += 1;
                }
                k = after;
            }
        }

        let after = close + close_pat.len();
        if !is_tag_boundary(bytes.get(after)) {
            i = after;
            continue;
        }
        if depth == 0 {
            let end = lower[after..]
                .find('>')
                .map(|p| after + p + 1)
                .unwrap_or(lower.len());
            return Some((close, end));
        }
        depth -= 1;
        i = after;
    }
}

/// Decode the handful of HTML entities that commonly appear inside bound
/// expressions (`&&` written as `&amp;&amp;`, comparisons as `&lt;`, quotes).
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

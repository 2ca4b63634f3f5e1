/*
 * text.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Escaping and entity decoding for HTML text and attribute values.
 */

//! Escaping and entity decoding.
//!
//! Text nodes keep their markup form (entities intact) so that untouched
//! parts of a document serialize exactly as they were read. These helpers
//! convert between that form and plain strings.

use std::borrow::Cow;

use quick_xml::escape::{partial_escape, resolve_predefined_entity, unescape_with};

/// The five XML entities plus the named ones LaTeXML emits.
fn resolve_html_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "nbsp" => "\u{a0}",
        "thinsp" => "\u{2009}",
        "ensp" => "\u{2002}",
        "emsp" => "\u{2003}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "hellip" => "\u{2026}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "times" => "\u{d7}",
        "copy" => "\u{a9}",
        "larrhk" => "\u{21a9}",
        "ZeroWidthSpace" => "\u{200b}",
        _ => return resolve_predefined_entity(name),
    })
}

/// Decode character references in `raw`.
///
/// Unknown entities and stray ampersands are kept literally; the references
/// around them are still decoded.
pub fn decode(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }
    if let Ok(decoded) = unescape_with(raw, resolve_html_entity) {
        return decoded;
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match reference_len(tail).and_then(|len| {
            let decoded = unescape_with(&tail[..len], resolve_html_entity).ok()?;
            Some((len, decoded))
        }) {
            Some((len, decoded)) => {
                out.push_str(&decoded);
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Length of the `&name;` or `&#n;` reference at the start of `s`.
fn reference_len(s: &str) -> Option<usize> {
    let semi = s.get(1..)?.find(';')?;
    let name = &s[1..1 + semi];
    let well_formed = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '#');
    well_formed.then_some(semi + 2)
}

/// Escape text content for use between tags (`&`, `<`, `>`).
pub fn escape_text(text: &str) -> Cow<'_, str> {
    partial_escape(text)
}

/// Escape an attribute value for a double-quoted attribute.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    let escaped = partial_escape(value);
    if escaped.contains('"') {
        Cow::Owned(escaped.replace('"', "&quot;"))
    } else {
        escaped
    }
}

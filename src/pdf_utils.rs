//! Shared lopdf helpers used by the default parser backend.

use std::borrow::Cow;

use lopdf::{Dictionary, Document, Object};

/// Page tree depth beyond which `/Parent` chains are treated as broken.
const MAX_PARENT_DEPTH: usize = 32;

const WHITESPACE: &[u8] = b"\0\t\n\x0c\r ";
const DELIMITERS: &[u8] = b"()<>[]{}/%";

/// Resolve a value that might be inline or a reference to a dictionary.
pub fn resolve_dict<'a>(document: &'a Document, value: &'a Object) -> Option<&'a Dictionary> {
    match value.as_reference() {
        Ok(id) => document.get_object(id).ok().and_then(|o| o.as_dict().ok()),
        Err(_) => value.as_dict().ok(),
    }
}

/// Resolve a value that might be inline or a reference to an array.
pub fn resolve_array<'a>(document: &'a Document, value: &'a Object) -> Option<&'a Vec<Object>> {
    match value.as_reference() {
        Ok(id) => document.get_object(id).ok().and_then(|o| o.as_array().ok()),
        Err(_) => value.as_array().ok(),
    }
}

/// Returns `true` when `value` is `null` itself or a reference that does not
/// resolve to anything other than `null`.
pub fn is_null(document: &Document, value: &Object) -> bool {
    match value {
        Object::Null => true,
        Object::Reference(id) => !matches!(document.get_object(*id), Ok(o) if !matches!(o, Object::Null)),
        _ => false,
    }
}

/// Concatenated string bytes carried by a text operator's operands.
///
/// `TJ` takes an array mixing strings and kerning numbers; the other
/// text-showing operators take plain strings.
pub fn shown_text(operands: &[Object]) -> Vec<u8> {
    let mut out = Vec::new();
    for operand in operands {
        match operand {
            Object::String(bytes, _) => out.extend_from_slice(bytes),
            Object::Array(items) => {
                for item in items {
                    if let Object::String(bytes, _) = item {
                        out.extend_from_slice(bytes);
                    }
                }
            }
            _ => {}
        }
    }
    out
}

/// Look up `key` on a page dictionary, walking up `/Parent` for attributes
/// the page tree lets pages inherit (such as `/Resources`).
pub fn inherited<'a>(
    document: &'a Document,
    page: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    let mut node = page;
    for _ in 0..MAX_PARENT_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        node = resolve_dict(document, node.get(b"Parent").ok()?)?;
    }
    None
}

/// Remove inline images (`BI` ... `ID` data `EI`) from a content stream.
///
/// The image data between `ID` and `EI` is raw binary that the content
/// lexer cannot tokenize. Each image is replaced by a single space. Input
/// without inline images is returned unchanged.
pub fn strip_inline_images(content: &[u8]) -> Cow<'_, [u8]> {
    let mut out = Vec::new();
    let mut copied = 0;
    let mut i = 0;
    let mut string_depth = 0usize;

    while i < content.len() {
        let byte = content[i];
        if string_depth > 0 {
            match byte {
                b'\\' => i += 1,
                b'(' => string_depth += 1,
                b')' => string_depth -= 1,
                _ => {}
            }
            i += 1;
            continue;
        }

        match byte {
            b'(' => string_depth = 1,
            b'%' => {
                while i < content.len() && !matches!(content[i], b'\r' | b'\n') {
                    i += 1;
                }
                continue;
            }
            b'B' if is_token_at(content, i, b"BI") => {
                if let Some(end) = inline_image_end(content, i + 2) {
                    out.extend_from_slice(&content[copied..i]);
                    out.push(b' ');
                    copied = end;
                    i = end;
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }

    if copied == 0 {
        return Cow::Borrowed(content);
    }
    out.extend_from_slice(&content[copied..]);
    Cow::Owned(out)
}

/// Offset just past the `EI` closing the inline image whose dictionary
/// starts at `from`.
fn inline_image_end(content: &[u8], from: usize) -> Option<usize> {
    let data_start = (from..content.len().saturating_sub(2))
        .find(|&j| is_token_at(content, j, b"ID"))?
        + 3;

    (data_start..content.len().saturating_sub(1))
        .find(|&k| {
            &content[k..k + 2] == b"EI"
                && (k == data_start || WHITESPACE.contains(&content[k - 1]))
                && content.get(k + 2).map_or(true, |b| WHITESPACE.contains(b))
        })
        .map(|k| k + 2)
}

/// `true` when the operator `token` starts at `at` and is delimited on both
/// sides. A preceding `/` makes it a name, not an operator.
fn is_token_at(content: &[u8], at: usize, token: &[u8]) -> bool {
    if !content[at..].starts_with(token) {
        return false;
    }
    let before_ok = at == 0 || {
        let b = content[at - 1];
        b != b'/' && (WHITESPACE.contains(&b) || DELIMITERS.contains(&b))
    };
    let after_ok = content
        .get(at + token.len())
        .map_or(true, |b| WHITESPACE.contains(b) || DELIMITERS.contains(b));
    before_ok && after_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    #[test]
    fn strips_binary_inline_image() {
        let content = b"BT (A) Tj ET q BI /W 2 /H 1 /BPC 8 /CS /G ID \x00\xff(\x7f EI Q BT (B) Tj ET";
        let stripped = strip_inline_images(content);
        assert_eq!(&stripped[..], b"BT (A) Tj ET q   Q BT (B) Tj ET");
    }

    #[test]
    fn leaves_streams_without_inline_images_borrowed() {
        let content = b"BT /BI 1 Tf (BI ID EI) Tj ET % BI ID x EI";
        assert!(matches!(strip_inline_images(content), Cow::Borrowed(_)));
    }

    #[test]
    fn unterminated_inline_image_is_kept() {
        let content = b"q BI /W 1 ID \x00\x01";
        assert_eq!(&strip_inline_images(content)[..], &content[..]);
    }

    #[test]
    fn inherited_walks_parent_chain() {
        let mut document = Document::with_version("1.5");
        let parent = document.add_object(lopdf::dictionary! {
            "Type" => "Pages",
            "Resources" => lopdf::dictionary! { "Font" => lopdf::dictionary! {} },
        });
        let page = lopdf::dictionary! { "Type" => "Page", "Parent" => parent };

        assert!(inherited(&document, &page, b"Resources").is_some());
        assert!(inherited(&document, &page, b"MediaBox").is_none());
    }
}

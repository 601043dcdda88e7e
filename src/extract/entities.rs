//! HTML5 character reference decoding.
//!
//! Named references ending in `;` are looked up through `html_escape`. On
//! top of that this handles what the HTML5 tokenizer does and `html_escape`
//! does not: the legacy names that are valid without a semicolon (`&amp`,
//! `&copy`), numeric references without a semicolon, the windows-1252
//! remapping of `&#128;`..`&#159;`, and U+FFFD for out-of-range numbers.

use std::borrow::Cow;

/// Longest name the decoder looks at after `&`.
const MAX_NAME_CHARS: usize = 32;

/// Names that decode even without a trailing semicolon.
const LEGACY_NAMES: [&str; 106] = [
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren",
    "deg", "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34",
    "gt", "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr", "micro",
    "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm", "oslash",
    "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy", "sup1",
    "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml", "uuml",
    "yacute", "yen", "yuml",
];

/// windows-1252 characters for `&#128;`..`&#159;`. Bytes windows-1252
/// leaves undefined keep their C1 code point.
const WINDOWS_1252_HIGH: [char; 32] = [
    '\u{20ac}', '\u{81}', '\u{201a}', '\u{192}', '\u{201e}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{2c6}', '\u{2030}', '\u{160}', '\u{2039}', '\u{152}', '\u{8d}', '\u{17d}', '\u{8f}',
    '\u{90}', '\u{2018}', '\u{2019}', '\u{201c}', '\u{201d}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{2dc}', '\u{2122}', '\u{161}', '\u{203a}', '\u{153}', '\u{9d}', '\u{17e}', '\u{178}',
];

/// Decode every character reference in `text` in a single pass.
///
/// Unrecognized references are kept verbatim. Decoded output is never
/// scanned again, so `&amp;amp;` becomes `&amp;`.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        let consumed = if let Some(body) = after.strip_prefix('#') {
            decode_numeric(body, &mut out).map(|n| n + 1)
        } else {
            decode_named(after, &mut out)
        };

        match consumed {
            Some(n) => rest = &after[n..],
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}

/// Decode `[xX]hex;?` or `digits;?` after `&#`, returning the bytes consumed.
fn decode_numeric(body: &str, out: &mut String) -> Option<usize> {
    let (digits_start, radix) = match body.as_bytes().first() {
        Some(b'x' | b'X') => (1, 16),
        _ => (0, 10),
    };

    let digits = &body[digits_start..];
    let len = digits
        .bytes()
        .take_while(|b| (*b as char).is_digit(radix))
        .count();
    if len == 0 {
        return None;
    }

    let value = digits[..len].chars().fold(0u32, |acc, c| {
        let digit = c.to_digit(radix).unwrap_or(0);
        acc.saturating_mul(radix).saturating_add(digit)
    });
    if let Some(ch) = numeric_char(value) {
        out.push(ch);
    }

    let semicolon = usize::from(digits[len..].starts_with(';'));
    Some(digits_start + len + semicolon)
}

/// Character for a numeric reference; `None` drops it from the output.
fn numeric_char(value: u32) -> Option<char> {
    match value {
        0 => Some('\u{fffd}'),
        0x0d => Some('\r'),
        0x80..=0x9f => Some(WINDOWS_1252_HIGH[(value - 0x80) as usize]),
        0xd800..=0xdfff => Some('\u{fffd}'),
        v if v > 0x10ffff => Some('\u{fffd}'),
        0x01..=0x08 | 0x0b | 0x0e..=0x1f | 0x7f | 0xfdd0..=0xfdef => None,
        v if v & 0xfffe == 0xfffe => None,
        v => char::from_u32(v),
    }
}

/// Decode a named reference, falling back to the longest legacy prefix.
fn decode_named(after: &str, out: &mut String) -> Option<usize> {
    let name_len: usize = after
        .chars()
        .take_while(|c| !matches!(c, '\t' | '\n' | '\x0c' | ' ' | '<' | '&' | '#' | ';'))
        .take(MAX_NAME_CHARS)
        .map(char::len_utf8)
        .sum();
    if name_len == 0 {
        return None;
    }

    let with_semicolon = after[name_len..].starts_with(';');
    let name = &after[..name_len];

    if with_semicolon {
        if let Some(value) = lookup_terminated(name) {
            out.push_str(&value);
            return Some(name_len + 1);
        }
    } else if is_legacy(name) {
        out.push_str(&lookup_legacy(name));
        return Some(name_len);
    }

    // `&copyright` decodes its `&copy` prefix and keeps the remainder
    let full_len = name_len + usize::from(with_semicolon);
    (2..full_len)
        .rev()
        .filter_map(|end| after.get(..end))
        .find(|prefix| is_legacy(prefix))
        .map(|prefix| {
            out.push_str(&lookup_legacy(prefix));
            prefix.len()
        })
}

fn is_legacy(name: &str) -> bool {
    LEGACY_NAMES.binary_search(&name).is_ok()
}

fn lookup_terminated(name: &str) -> Option<String> {
    let reference = format!("&{name};");
    match html_escape::decode_html_entities(&reference) {
        Cow::Owned(value) if value != reference => Some(value),
        _ => None,
    }
}

fn lookup_legacy(name: &str) -> String {
    lookup_terminated(name).unwrap_or_else(|| format!("&{name}"))
}

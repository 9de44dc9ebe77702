//! Character reference decoding.
//!
//! Covers the HTML 4 named entities plus decimal and hexadecimal numeric
//! references. Anything that does not decode is left in the text verbatim.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Names for U+00A0 through U+00FF, in code point order.
static LATIN_1: [&str; 96] = [
    "nbsp", "iexcl", "cent", "pound", "curren", "yen", "brvbar", "sect", "uml", "copy", "ordf",
    "laquo", "not", "shy", "reg", "macr", "deg", "plusmn", "sup2", "sup3", "acute", "micro",
    "para", "middot", "cedil", "sup1", "ordm", "raquo", "frac14", "frac12", "frac34", "iquest",
    "Agrave", "Aacute", "Acirc", "Atilde", "Auml", "Aring", "AElig", "Ccedil", "Egrave", "Eacute",
    "Ecirc", "Euml", "Igrave", "Iacute", "Icirc", "Iuml", "ETH", "Ntilde", "Ograve", "Oacute",
    "Ocirc", "Otilde", "Ouml", "times", "Oslash", "Ugrave", "Uacute", "Ucirc", "Uuml", "Yacute",
    "THORN", "szlig", "agrave", "aacute", "acirc", "atilde", "auml", "aring", "aelig", "ccedil",
    "egrave", "eacute", "ecirc", "euml", "igrave", "iacute", "icirc", "iuml", "eth", "ntilde",
    "ograve", "oacute", "ocirc", "otilde", "ouml", "divide", "oslash", "ugrave", "uacute",
    "ucirc", "uuml", "yacute", "thorn", "yuml",
];

/// Greek capitals from U+0391; U+03A2 is unassigned.
static GREEK_UPPER: [&str; 25] = [
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota", "Kappa",
    "Lambda", "Mu", "Nu", "Xi", "Omicron", "Pi", "Rho", "", "Sigma", "Tau", "Upsilon", "Phi",
    "Chi", "Psi", "Omega",
];

/// Greek small letters from U+03B1.
static GREEK_LOWER: [&str; 25] = [
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
    "lambda", "mu", "nu", "xi", "omicron", "pi", "rho", "sigmaf", "sigma", "tau", "upsilon",
    "phi", "chi", "psi", "omega",
];

/// Markup-significant, special, and symbol entities outside the contiguous
/// ranges above.
static SCATTERED: [(&str, u32); 60] = [
    ("quot", 0x22),
    ("amp", 0x26),
    ("apos", 0x27),
    ("lt", 0x3C),
    ("gt", 0x3E),
    ("OElig", 0x152),
    ("oelig", 0x153),
    ("Scaron", 0x160),
    ("scaron", 0x161),
    ("Yuml", 0x178),
    ("fnof", 0x192),
    ("circ", 0x2C6),
    ("tilde", 0x2DC),
    ("thetasym", 0x3D1),
    ("upsih", 0x3D2),
    ("piv", 0x3D6),
    ("ensp", 0x2002),
    ("emsp", 0x2003),
    ("thinsp", 0x2009),
    ("zwnj", 0x200C),
    ("zwj", 0x200D),
    ("lrm", 0x200E),
    ("rlm", 0x200F),
    ("ndash", 0x2013),
    ("mdash", 0x2014),
    ("lsquo", 0x2018),
    ("rsquo", 0x2019),
    ("sbquo", 0x201A),
    ("ldquo", 0x201C),
    ("rdquo", 0x201D),
    ("bdquo", 0x201E),
    ("dagger", 0x2020),
    ("Dagger", 0x2021),
    ("bull", 0x2022),
    ("hellip", 0x2026),
    ("permil", 0x2030),
    ("prime", 0x2032),
    ("Prime", 0x2033),
    ("lsaquo", 0x2039),
    ("rsaquo", 0x203A),
    ("oline", 0x203E),
    ("frasl", 0x2044),
    ("euro", 0x20AC),
    ("trade", 0x2122),
    ("larr", 0x2190),
    ("uarr", 0x2191),
    ("rarr", 0x2192),
    ("darr", 0x2193),
    ("harr", 0x2194),
    ("sum", 0x2211),
    ("minus", 0x2212),
    ("radic", 0x221A),
    ("infin", 0x221E),
    ("asymp", 0x2248),
    ("ne", 0x2260),
    ("equiv", 0x2261),
    ("le", 0x2264),
    ("ge", 0x2265),
    ("loz", 0x25CA),
    ("hearts", 0x2665),
];

/// Entities that are also recognised without a trailing semicolon.
const LEGACY: [&str; 4] = ["amp", "lt", "gt", "quot"];

/// Longest entity name in the table ("thetasym").
const MAX_NAME_LEN: usize = 8;

static NAMED_ENTITIES: LazyLock<HashMap<&'static str, char>> = LazyLock::new(|| {
    let ranges = [
        (0xA0, LATIN_1.as_slice()),
        (0x391, GREEK_UPPER.as_slice()),
        (0x3B1, GREEK_LOWER.as_slice()),
    ];
    let mut table = HashMap::new();
    for (start, names) in ranges {
        for (code, name) in (start..).zip(names) {
            if let (false, Some(c)) = (name.is_empty(), char::from_u32(code)) {
                let _ = table.insert(*name, c);
            }
        }
    }
    for (name, code) in SCATTERED {
        if let Some(c) = char::from_u32(code) {
            let _ = table.insert(name, c);
        }
    }
    table
});

/// Look up a named character reference, without the leading `&` or the
/// trailing `;`.
#[must_use]
pub fn lookup_entity(name: &str) -> Option<char> {
    NAMED_ENTITIES.get(name).copied()
}

/// Decode every character reference in `input`.
///
/// Unknown names and malformed references are kept as written. Numeric
/// references to zero, surrogates, or values past U+10FFFF decode to U+FFFD.
#[must_use]
pub fn unescape(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }
    let mut output = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        output.push_str(&rest[..amp]);
        let reference = &rest[amp + 1..];
        if let Some((decoded, consumed)) = decode_reference(reference) {
            output.push(decoded);
            rest = &reference[consumed..];
        } else {
            output.push('&');
            rest = reference;
        }
    }
    output.push_str(rest);
    Cow::Owned(output)
}

/// Decode the reference at the start of `input` (just after the `&`).
/// Returns the character and the number of bytes consumed.
fn decode_reference(input: &str) -> Option<(char, usize)> {
    if let Some(numeric) = input.strip_prefix('#') {
        let (decoded, consumed) = decode_numeric(numeric)?;
        return Some((decoded, consumed + 1));
    }
    let name_len = input
        .bytes()
        .take(MAX_NAME_LEN + 1)
        .take_while(u8::is_ascii_alphanumeric)
        .count();
    if name_len == 0 || name_len > MAX_NAME_LEN {
        return None;
    }
    let name = &input[..name_len];
    let decoded = lookup_entity(name)?;
    if input[name_len..].starts_with(';') {
        Some((decoded, name_len + 1))
    } else if LEGACY.contains(&name) {
        Some((decoded, name_len))
    } else {
        None
    }
}

fn decode_numeric(input: &str) -> Option<(char, usize)> {
    let (digits, radix, prefix) = match input.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16, 1),
        None => (input, 10, 0),
    };
    let digit_len = digits
        .bytes()
        .take_while(|b| char::from(*b).is_digit(radix))
        .count();
    if digit_len == 0 {
        return None;
    }
    let decoded = u32::from_str_radix(&digits[..digit_len], radix)
        .ok()
        .filter(|code| *code != 0)
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    let semicolon = usize::from(digits[digit_len..].starts_with(';'));
    Some((decoded, prefix + digit_len + semicolon))
}

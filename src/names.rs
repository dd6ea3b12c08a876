//! Canonical display names and wiki ids.
//!
//! The wiki titles every page with a title-cased name and addresses it with an id derived from that
//! name. Two names that canonicalize to the same string point to the same page, so every lookup in
//! the crate compares ids produced by [`slug`] rather than raw names.

use once_cell::sync::Lazy;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WORD_START_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[\w']").unwrap());

/// Characters dropped or normalized before title-casing, so that casing sees the final word boundaries.
const PUNCTUATION_FIXUPS: &[(&str, &str)] =
    &[("`", ""), ("#", ""), ("\u{2019}", "'"), ("\u{201d}", "\""), ("\u{201c}", "\"")];

/// Literal fixups applied, in order, after title-casing.
const REPLACEMENTS: &[(&str, &str)] = &[
    ("'D ", "'d "),
    ("'Ll ", "'ll "),
    ("'S ", "'s "),
    ("'T ", "'t "),
    ("Ww1", "WW1"),
    ("Ww2", "WW2"),
    ("Ww3", "WW3"),
];

// Characters left as-is in ids, on top of the alphanumerics and `_.-~`.
const ID_ESCAPE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b':')
    .remove(b'/')
    .remove(b'(')
    .remove(b')')
    .remove(b'%')
    .remove(b',');

/// Lowercases a token and uppercases the first character of every word in it. Quotes count as word
/// boundaries, so `"hello"` becomes `"Hello"`.
pub fn capitalize(token: &str) -> String {
    let lowered = token.to_lowercase();
    WORD_START_REGEX
        .replace_all(&lowered, |caps: &regex::Captures| caps[0].to_uppercase())
        .into_owned()
}

/// Title-cases like the wiki does for info labels: a letter is uppercased when the character
/// before it is not a letter.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Converts a free-text artist, album or song name into the wiki's display form.
pub fn canonicalize(raw_name: &str) -> String {
    let mut name: String = raw_name.nfc().collect();
    for (from, to) in PUNCTUATION_FIXUPS {
        name = name.replace(from, to);
    }
    let mut canonical = name
        .trim()
        .split(' ')
        .map(|token| if token == token.to_uppercase() { token.to_string() } else { capitalize(token) })
        .collect::<Vec<_>>()
        .join(" ");
    for (from, to) in REPLACEMENTS {
        canonical = canonical.replace(from, to);
    }
    canonical
}

/// Returns the wiki id of a name, used in page paths. Underscores and spaces are the same character
/// to the wiki, so `a_b` and `a b` share an id.
pub fn slug(name: &str) -> String {
    let canonical = canonicalize(&name.replace('_', " ")).replace(' ', "_");
    utf8_percent_encode(&canonical, ID_ESCAPE_SET).to_string()
}

/// Turns an id back into a readable name. `slug(&display_name(&slug(x))) == slug(x)`.
pub fn display_name(id: &str) -> String {
    percent_decode_str(id).decode_utf8_lossy().replace('_', " ")
}

/// Whether two names refer to the same wiki page.
pub fn same_name(a: &str, b: &str) -> bool {
    slug(a) == slug(b)
}

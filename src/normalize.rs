//! Folding of multi-language tokens to canonical ASCII.
//!
//! A [`Normalizer`] maps a raw token to its canonical form, or rejects it.
//! The canonical form is the merge key for every word in the pipeline and
//! always matches `^[a-z]+$`.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

lazy_static! {
    static ref CANONICAL_FORM: Regex = Regex::new("^[a-z]+$").unwrap();
}

/// Maps raw tokens to their canonical form.
///
/// Implementations must be pure: the same token always yields the same
/// result, and no state is mutated. Ingestion treats `None` identically to
/// "not alphabetic".
pub trait Normalizer: Send + Sync {
    /// Normalize `token`, returning `None` if it has no valid canonical form.
    fn normalize(&self, token: &str) -> Option<String>;
}

/// Check whether `form` is a valid canonical form.
pub fn is_canonical(form: &str) -> bool {
    CANONICAL_FORM.is_match(form)
}

/// The default normalizer: folds accented and language-specific letters to
/// lowercase ASCII and rejects anything that does not end up alphabetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiFolder;

impl AsciiFolder {
    pub fn new() -> Self {
        AsciiFolder
    }

    /// Fold a whole word without validating it.
    pub fn fold_word(&self, word: &str) -> String {
        let mut folded = String::with_capacity(word.len());
        for c in word.chars() {
            fold_char(c, &mut folded);
        }
        folded
    }
}

impl Normalizer for AsciiFolder {
    fn normalize(&self, token: &str) -> Option<String> {
        let folded = self.fold_word(token);
        is_canonical(&folded).then_some(folded)
    }
}

/// Explicit replacements for letters whose decomposition does not reduce to
/// the expected ASCII letter (or that do not decompose at all).
fn table_lookup(c: char) -> Option<&'static str> {
    let mapped = match c {
        // Turkish
        'ç' | 'Ç' => "c",
        'ş' | 'Ş' => "s",
        'ğ' | 'Ğ' => "g",
        'ı' | 'İ' => "i",
        // German
        'ä' | 'Ä' => "a",
        'ö' | 'Ö' => "o",
        'ü' | 'Ü' => "u",
        'ß' => "ss",
        // French
        'à' | 'â' => "a",
        'æ' | 'Æ' => "ae",
        'é' | 'è' | 'ê' | 'ë' => "e",
        'î' | 'ï' => "i",
        'ô' => "o",
        'œ' | 'Œ' => "oe",
        'ù' | 'û' => "u",
        'ÿ' => "y",
        // Spanish
        'á' => "a",
        'í' => "i",
        'ó' => "o",
        'ú' => "u",
        'ñ' | 'Ñ' => "n",
        // Portuguese
        'ã' => "a",
        'õ' => "o",
        // Polish
        'ą' => "a",
        'ć' => "c",
        'ę' => "e",
        'ł' | 'Ł' => "l",
        'ń' => "n",
        'ś' => "s",
        'ź' | 'ż' => "z",
        // Czech/Slovak
        'č' => "c",
        'ď' => "d",
        'ě' => "e",
        'ň' => "n",
        'ř' => "r",
        'š' => "s",
        'ť' => "t",
        'ů' => "u",
        'ž' => "z",
        // Nordic
        'å' | 'Å' => "a",
        'ø' | 'Ø' => "o",
        // Romanian
        'ă' => "a",
        'ț' => "t",
        'ș' => "s",
        _ => return None,
    };
    Some(mapped)
}

fn fold_char(c: char, out: &mut String) {
    if c.is_ascii() {
        out.push(c.to_ascii_lowercase());
        return;
    }

    if let Some(mapped) = table_lookup(c) {
        out.push_str(mapped);
        return;
    }

    let lower: Vec<char> = c.to_lowercase().collect();
    if let [single] = lower.as_slice()
        && let Some(mapped) = table_lookup(*single)
    {
        out.push_str(mapped);
        return;
    }

    // Decompose and keep the ASCII base letters.
    let before = out.len();
    for d in std::iter::once(c).nfd() {
        if !is_combining_mark(d) && d.is_ascii() {
            out.push(d.to_ascii_lowercase());
        }
    }
    if out.len() > before {
        return;
    }

    out.extend(lower);
}

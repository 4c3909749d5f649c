//! Rune-count preserving normalization.
//!
//! Each scalar is replaced by its NFKC form when that form is a single scalar
//! and kept as is otherwise. Offsets computed on the normalized text therefore
//! line up scalar for scalar with the caller's input.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalizes `text` without changing its scalar count.
pub fn normalize(text: &str) -> String {
    text.chars().map(normalize_scalar).collect()
}

/// Lowercases `text` scalar by scalar, keeping the first scalar of any
/// multi-scalar expansion.
pub(crate) fn lowercase(text: &str) -> String {
    text.chars()
        .map(|scalar| scalar.to_lowercase().next().unwrap_or(scalar))
        .collect()
}

fn normalize_scalar(scalar: char) -> char {
    if scalar.is_ascii() || is_combining_mark(scalar) {
        return scalar;
    }

    let mut composed = std::iter::once(scalar).nfkc();
    match (composed.next(), composed.next()) {
        (Some(single), None) => single,
        _ => scalar,
    }
}

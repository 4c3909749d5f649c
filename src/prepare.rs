use crate::constants::SEPARATOR;
use crate::normalizer::{lowercase, normalize};

/// Scalar buffer the segmenter runs over.
///
/// The buffer is the normalized text with whitespace replaced by
/// [`SEPARATOR`] and, when padded, one synthetic separator in front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedText {
    scalars: Vec<char>,
    padded: bool,
}

impl PreparedText {
    /// Buffer scalars, including the injected separator.
    pub fn scalars(&self) -> &[char] {
        &self.scalars
    }

    /// Whether a leading separator was injected.
    pub fn is_padded(&self) -> bool {
        self.padded
    }

    /// Number of injected scalars (0 or 1).
    pub fn padding(&self) -> usize {
        usize::from(self.padded)
    }

    /// Buffer without the injected separator, as a string.
    ///
    /// Offsets from [`crate::Sentencepiece::tokenize_to_offsets`] index this
    /// text in scalar units.
    pub fn unpadded_text(&self) -> String {
        self.scalars.iter().skip(self.padding()).collect()
    }

    /// Number of scalars in the buffer.
    pub fn len(&self) -> usize {
        self.scalars.len()
    }

    /// Returns `true` for an empty buffer.
    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty()
    }
}

/// Builds the segmenter buffer for `text`.
pub(crate) fn prepare_text(
    text: &str,
    apply_normalization: bool,
    to_lowercase: bool,
) -> PreparedText {
    let mut normalized = if apply_normalization {
        normalize(text)
    } else {
        text.to_string()
    };
    if to_lowercase {
        normalized = lowercase(&normalized);
    }

    let padded = matches!(normalized.chars().next(), Some(first) if first != SEPARATOR);
    let mut scalars = Vec::with_capacity(normalized.len() + usize::from(padded));
    if padded {
        scalars.push(SEPARATOR);
    }
    scalars.extend(normalized.chars().map(scrub_scalar));

    PreparedText { scalars, padded }
}

fn scrub_scalar(scalar: char) -> char {
    if is_scrubbed(scalar) {
        ' '
    } else if scalar.is_whitespace() {
        SEPARATOR
    } else {
        scalar
    }
}

/// Control characters (NUL included) and private-use characters become plain spaces.
fn is_scrubbed(scalar: char) -> bool {
    (scalar.is_control() && !scalar.is_whitespace()) || is_private_use(scalar)
}

fn is_private_use(scalar: char) -> bool {
    matches!(
        scalar,
        '\u{E000}'..='\u{F8FF}' | '\u{F0000}'..='\u{FFFFD}' | '\u{100000}'..='\u{10FFFD}'
    )
}

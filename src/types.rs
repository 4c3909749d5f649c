use std::env;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_CONTROL_PATTERN, DEFAULT_UNKNOWN_PIECE, SPM_LOWERCASE_ENV};
use crate::discovery::discover_default_vocab_path;

/// A piece of the tokenized text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// Vocabulary id.
    pub id: i32,
    /// Piece text, taken from the prepared buffer (separators included).
    pub text: String,
}

/// A piece plus its scalar span in the normalized text.
///
/// `start`/`end` count scalars (Rust `str.chars()` index space) in
/// [`crate::PreparedText::unpadded_text`], not bytes of the caller's input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenOffset {
    /// Vocabulary id.
    pub id: i32,
    /// Piece text, taken from the prepared buffer before offset correction.
    pub text: String,
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

/// Options for building a [`crate::Sentencepiece`].
#[derive(Debug, Clone)]
pub struct SentencepieceConfig {
    /// Vocabulary export to load with [`crate::Sentencepiece::from_config`].
    pub vocab_path: Option<PathBuf>,
    /// Lowercase the input before segmentation.
    pub lowercase: bool,
    /// Apply the rune-count preserving normalizer.
    pub normalize: bool,
    /// Drop offset tokens that only covered the injected separator.
    pub drop_empty_leading: bool,
    /// Piece name marking the unknown id in a vocabulary export.
    pub unknown_piece: String,
    /// Regex selecting control words in a vocabulary export.
    pub control_pattern: String,
}

impl Default for SentencepieceConfig {
    /// Defaults from [`SentencepieceConfig::new`], overlaid with `SPM_VOCAB_PATH`,
    /// `SPM_LOWERCASE` and the well-known vocabulary locations.
    fn default() -> Self {
        let mut config = Self::new();
        config.vocab_path = discover_default_vocab_path();
        if let Ok(value) = env::var(SPM_LOWERCASE_ENV) {
            config.lowercase = parse_flag(&value);
        }
        config
    }
}

impl SentencepieceConfig {
    /// Built-in defaults without consulting the environment.
    pub fn new() -> Self {
        Self {
            vocab_path: None,
            lowercase: false,
            normalize: true,
            drop_empty_leading: true,
            unknown_piece: DEFAULT_UNKNOWN_PIECE.to_string(),
            control_pattern: DEFAULT_CONTROL_PATTERN.to_string(),
        }
    }

    /// Sets the vocabulary export path.
    pub fn with_vocab_path(mut self, vocab_path: impl AsRef<Path>) -> Self {
        self.vocab_path = Some(vocab_path.as_ref().to_path_buf());
        self
    }

    /// Enables or disables lowercasing.
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Enables or disables normalization.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Keeps (`false`) or drops (`true`) offset tokens that end at zero after correction.
    pub fn with_drop_empty_leading(mut self, drop_empty_leading: bool) -> Self {
        self.drop_empty_leading = drop_empty_leading;
        self
    }

    /// Sets the piece name that marks the unknown id.
    pub fn with_unknown_piece(mut self, unknown_piece: impl Into<String>) -> Self {
        self.unknown_piece = unknown_piece.into();
        self
    }

    /// Sets the regex selecting control words.
    pub fn with_control_pattern(mut self, control_pattern: impl Into<String>) -> Self {
        self.control_pattern = control_pattern.into();
        self
    }
}

/// `1`, `true`, `yes` and `on`, in any case, are truthy.
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

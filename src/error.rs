use std::fmt;

/// Error type returned by the fallible spm-viterbi APIs.
///
/// Segmentation itself never fails; only model construction from external
/// input can.
#[derive(Debug)]
pub enum SentencepieceError {
    /// Reading a vocabulary file failed.
    Io(std::io::Error),
    /// User-provided arguments were invalid.
    InvalidArgument(String),
    /// A vocabulary line could not be parsed.
    Parse {
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },
    /// No vocabulary path was configured or discovered.
    MissingVocabPath,
    /// The control-word pattern is not a valid regular expression.
    Pattern(regex::Error),
}

impl fmt::Display for SentencepieceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentencepieceError::Io(error) => write!(f, "failed to read vocabulary: {error}"),
            SentencepieceError::InvalidArgument(message) => {
                write!(f, "invalid argument: {message}")
            }
            SentencepieceError::Parse { line, message } => {
                write!(f, "vocabulary line {line}: {message}")
            }
            SentencepieceError::MissingVocabPath => write!(
                f,
                "no vocabulary path configured (set SPM_VOCAB_PATH or SentencepieceConfig::with_vocab_path)"
            ),
            SentencepieceError::Pattern(error) => {
                write!(f, "invalid control-word pattern: {error}")
            }
        }
    }
}

impl std::error::Error for SentencepieceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SentencepieceError::Io(error) => Some(error),
            SentencepieceError::Pattern(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SentencepieceError {
    fn from(value: std::io::Error) -> Self {
        SentencepieceError::Io(value)
    }
}

impl From<regex::Error> for SentencepieceError {
    fn from(value: regex::Error) -> Self {
        SentencepieceError::Pattern(value)
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SentencepieceError>;

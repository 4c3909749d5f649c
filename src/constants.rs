//! Constants shared by the preparer, the segmenter and the vocabulary loader.

/// Word-boundary marker substituted for whitespace and prepended to every input (`▁`, U+2581).
pub const SEPARATOR: char = '\u{2581}';
/// Piece name that marks the unknown id in a vocabulary export.
pub const DEFAULT_UNKNOWN_PIECE: &str = "<unk>";
/// Default pattern for vocabulary entries that are control words (`<s>`, `<cls>`, `[CLS]`, ...).
pub const DEFAULT_CONTROL_PATTERN: &str = r"^(<[^<>\s]+>|\[[A-Z_]+\])$";
/// Score that marks a position of the Viterbi table as unreached.
pub const UNREACHED_SCORE: f32 = f32::MIN;

/// Environment variable holding an explicit vocabulary path.
pub const SPM_VOCAB_PATH_ENV: &str = "SPM_VOCAB_PATH";
/// Environment variable toggling lowercase mode (`1`, `true`, `yes`, `on`; case-insensitive).
pub const SPM_LOWERCASE_ENV: &str = "SPM_LOWERCASE";

pub(crate) const VOCAB_FILE_NAME: &str = "spiece.vocab";

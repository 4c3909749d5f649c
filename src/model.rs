use std::collections::HashMap;
use std::path::Path;

use crate::error::{Result, SentencepieceError};
use crate::offsets::{make_tokens, resolve_offsets, ResolveOptions};
use crate::prepare::{prepare_text, PreparedText};
use crate::trie::Trie;
use crate::types::{SentencepieceConfig, Token, TokenOffset};
use crate::viterbi::{decode_backward, decode_forward};
use crate::vocab::{read_vocab_file, EntryClassifier, EntryKind, VocabEntry};

/// Unigram tokenizer model: vocabulary trie plus segmentation settings.
///
/// Mutation takes `&mut self`, so a model can only be shared once it is fully
/// built. Tokenization takes `&self` and allocates its tables per call, so one
/// model can serve any number of threads (`&Sentencepiece` or
/// `Arc<Sentencepiece>`).
#[derive(Debug, Clone)]
pub struct Sentencepiece {
    trie: Trie,
    unknown: i32,
    control_words: HashMap<String, i32>,
    config: SentencepieceConfig,
}

impl Sentencepiece {
    /// Creates an empty model.
    pub fn new(lowercase: bool) -> Self {
        Self::with_config(SentencepieceConfig::new().with_lowercase(lowercase))
    }

    /// Creates an empty model with explicit settings.
    pub fn with_config(config: SentencepieceConfig) -> Self {
        Self {
            trie: Trie::new(),
            unknown: 0,
            control_words: HashMap::new(),
            config,
        }
    }

    /// Loads the vocabulary named by `config.vocab_path`.
    pub fn from_config(config: SentencepieceConfig) -> Result<Self> {
        let path = config
            .vocab_path
            .clone()
            .ok_or(SentencepieceError::MissingVocabPath)?;
        Self::from_vocab_file(path, config)
    }

    /// Loads a plain-text vocabulary export.
    pub fn from_vocab_file(path: impl AsRef<Path>, config: SentencepieceConfig) -> Result<Self> {
        let entries = read_vocab_file(path.as_ref())?;
        let model = Self::from_vocab_entries(entries, config)?;
        log::debug!(
            "loaded vocabulary from {}: {} pieces",
            path.as_ref().display(),
            model.len()
        );
        Ok(model)
    }

    /// Builds a model from parsed vocabulary entries.
    ///
    /// The entry named `config.unknown_piece` sets the unknown id and entries
    /// matching `config.control_pattern` become control words; neither is
    /// inserted into the trie. A negative id is rejected with
    /// [`SentencepieceError::InvalidArgument`].
    pub fn from_vocab_entries(
        entries: impl IntoIterator<Item = VocabEntry>,
        config: SentencepieceConfig,
    ) -> Result<Self> {
        let classifier = EntryClassifier::from_config(&config)?;
        let mut model = Self::with_config(config);
        let mut has_unknown = false;

        for entry in entries {
            if entry.id < 0 {
                return Err(SentencepieceError::InvalidArgument(format!(
                    "piece {:?} has negative id {}",
                    entry.piece, entry.id
                )));
            }
            match classifier.classify(&entry.piece) {
                EntryKind::Unknown => {
                    model.set_unknown_index(entry.id);
                    has_unknown = true;
                }
                EntryKind::Control => model.set_control_word(entry.piece, entry.id),
                EntryKind::Normal => {
                    if model.trie.get(&entry.piece).is_some() {
                        log::warn!("duplicate piece {:?}, keeping id {}", entry.piece, entry.id);
                    }
                    model.insert(&entry.piece, entry.score, entry.id);
                }
            }
        }

        if !has_unknown {
            log::warn!(
                "vocabulary has no {:?} piece, unknown id stays {}",
                model.config.unknown_piece,
                model.unknown
            );
        }
        log::debug!(
            "built model: {} pieces, unknown id {}, {} control words",
            model.len(),
            model.unknown,
            model.control_words.len()
        );
        Ok(model)
    }

    /// Adds a piece. Re-inserting a piece overwrites its score and id.
    pub fn insert(&mut self, piece: &str, score: f32, id: i32) {
        self.trie.insert(piece, score, id);
    }

    /// Sets the id emitted for scalars no piece covers.
    pub fn set_unknown_index(&mut self, id: i32) {
        self.unknown = id;
    }

    /// Id emitted for scalars no piece covers.
    pub fn unknown_index(&self) -> i32 {
        self.unknown
    }

    /// Registers a literal control word. Control words never take part in segmentation.
    pub fn set_control_word(&mut self, word: impl Into<String>, id: i32) {
        self.control_words.insert(word.into(), id);
    }

    /// Looks up a control word by exact match.
    pub fn control_word(&self, word: &str) -> Option<i32> {
        self.control_words.get(word).copied()
    }

    /// Whether input is lowercased before segmentation.
    pub fn lowercase(&self) -> bool {
        self.config.lowercase
    }

    /// Settings this model was built with.
    pub fn config(&self) -> &SentencepieceConfig {
        &self.config
    }

    /// Vocabulary trie.
    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    /// Number of pieces in the trie.
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    /// Returns `true` when no piece has been inserted.
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Runs the text preparation step on its own.
    pub fn prepare(&self, text: &str) -> PreparedText {
        prepare_text(text, self.config.normalize, self.config.lowercase)
    }

    /// Splits `text` into pieces.
    ///
    /// Token texts come from the prepared buffer, so the first token keeps the
    /// injected separator.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let prepared = self.prepare(text);
        make_tokens(self.tokenize_prepared(&prepared, false))
    }

    /// Splits `text` into piece ids.
    pub fn tokenize_to_ids(&self, text: &str) -> Vec<i32> {
        self.tokenize(text)
            .into_iter()
            .map(|token| token.id)
            .collect()
    }

    /// Splits `text` into pieces with scalar offsets.
    ///
    /// Offsets index [`PreparedText::unpadded_text`]: the normalized text with
    /// whitespace replaced by the separator, without the injected separator.
    pub fn tokenize_to_offsets(&self, text: &str) -> Vec<TokenOffset> {
        let prepared = self.prepare(text);
        self.tokenize_prepared(&prepared, prepared.is_padded())
    }

    fn tokenize_prepared(&self, prepared: &PreparedText, adjust_padding: bool) -> Vec<TokenOffset> {
        let segments = decode_forward(&self.trie, prepared.scalars(), self.unknown);
        let path = decode_backward(&segments);
        let tokens = resolve_offsets(
            &path,
            prepared.scalars(),
            ResolveOptions {
                unknown_id: self.unknown,
                adjust_padding,
                drop_empty_leading: self.config.drop_empty_leading,
            },
        );
        log::trace!(
            "tokenized {} scalars into {} tokens (path score {:?})",
            prepared.len(),
            tokens.len(),
            path.last().map(|segment| segment.score)
        );
        tokens
    }
}

#[cfg(test)]
mod model_tests {
    use super::Sentencepiece;
    use crate::types::{SentencepieceConfig, Token};
    use crate::vocab::VocabEntry;
    use crate::SentencepieceError;

    fn token(id: i32, text: &str) -> Token {
        Token {
            id,
            text: text.to_string(),
        }
    }

    fn entry(piece: &str, score: f32, id: i32) -> VocabEntry {
        VocabEntry {
            piece: piece.to_string(),
            score,
            id,
        }
    }

    #[test]
    fn single_piece_covers_word_with_separator() {
        let mut model = Sentencepiece::new(false);
        model.insert("▁this", -4.0, 52);
        assert_eq!(model.tokenize("this"), vec![token(52, "▁this")]);
        assert_eq!(model.tokenize_to_ids("this"), vec![52]);
    }

    #[test]
    fn lone_punctuation_keeps_separator_token() {
        let mut model = Sentencepiece::new(true);
        model.set_unknown_index(1);
        model.insert("▁", -3.0, 13);
        model.insert(".", -3.2, 9);

        assert_eq!(model.tokenize("."), vec![token(13, "▁"), token(9, ".")]);

        let offsets = model.tokenize_to_offsets(".");
        assert_eq!(offsets.len(), 1);
        assert_eq!(offsets[0].text, ".");
        assert_eq!((offsets[0].start, offsets[0].end), (0, 1));
    }

    #[test]
    fn run_of_unknown_scalars_emits_one_token() {
        let mut model = Sentencepiece::new(false);
        model.insert("▁", -2.0, 17);
        model.insert("a", -2.0, 5);

        let tokens = model.tokenize("a🤔🤔");
        assert_eq!(tokens, vec![token(17, "▁"), token(5, "a"), token(0, "🤔")]);
    }

    #[test]
    fn empty_text_yields_no_tokens() {
        let mut model = Sentencepiece::new(false);
        model.insert("▁", -1.0, 3);
        assert!(model.tokenize("").is_empty());
        assert!(model.tokenize_to_ids("").is_empty());
        assert!(model.tokenize_to_offsets("").is_empty());
    }

    #[test]
    fn empty_vocabulary_degrades_to_unknown() {
        let mut model = Sentencepiece::new(false);
        model.set_unknown_index(7);
        assert!(model.is_empty());
        assert_eq!(model.tokenize_to_ids("abc"), vec![7]);
    }

    #[test]
    fn control_words_bypass_segmentation() {
        let mut model = Sentencepiece::new(false);
        model.set_control_word("<cls>", 3);
        assert_eq!(model.control_word("<cls>"), Some(3));
        assert_eq!(model.control_word("<sep>"), None);
        assert!(model.tokenize_to_ids("<cls>").iter().all(|&id| id != 3));
    }

    #[test]
    fn lowercase_model_matches_lowercase_pieces() {
        let mut model = Sentencepiece::new(true);
        model.insert("▁this", -1.0, 48);
        assert!(model.lowercase());
        assert_eq!(model.tokenize_to_ids("THIS"), vec![48]);
    }

    #[test]
    fn from_vocab_entries_classifies_pieces() {
        let entries = vec![
            entry("<pad>", 0.0, 0),
            entry("<unk>", 0.0, 1),
            entry("[CLS]", 0.0, 2),
            entry("▁", -3.0, 3),
            entry("▁hi", -5.0, 4),
        ];
        let model = Sentencepiece::from_vocab_entries(entries, SentencepieceConfig::new())
            .expect("model should build");

        assert_eq!(model.unknown_index(), 1);
        assert_eq!(model.control_word("[CLS]"), Some(2));
        assert_eq!(model.control_word("<pad>"), Some(0));
        assert_eq!(model.len(), 2);
        assert_eq!(model.tokenize_to_ids("hi"), vec![4]);
    }

    #[test]
    fn from_vocab_entries_rejects_negative_id() {
        let entries = vec![entry("<unk>", 0.0, 0), entry("▁hi", -5.0, -2)];
        let result = Sentencepiece::from_vocab_entries(entries, SentencepieceConfig::new());
        assert!(matches!(
            result,
            Err(SentencepieceError::InvalidArgument(message)) if message.contains("-2")
        ));
    }

    #[test]
    fn from_config_without_path_fails() {
        let result = Sentencepiece::from_config(SentencepieceConfig::new());
        assert!(matches!(result, Err(SentencepieceError::MissingVocabPath)));
    }

    #[test]
    fn model_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Sentencepiece>();
    }
}

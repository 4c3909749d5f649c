#![deny(missing_docs)]

//! Unigram subword tokenizer with Viterbi segmentation.
//!
//! Text is split into the vocabulary pieces whose summed scores are highest,
//! found by a forward pass over a trie-indexed vocabulary and a backward
//! traceback. Output matches SentencePiece-style unigram models id for id.
//!
//! ## Quick Start
//! ```
//! use spm_viterbi::Sentencepiece;
//!
//! let mut model = Sentencepiece::new(false);
//! model.insert("▁this", -4.0, 52);
//! model.insert("▁is", -3.0, 27);
//!
//! let tokens = model.tokenize("this is");
//! assert_eq!(model.tokenize_to_ids("this is"), vec![52, 27]);
//! assert_eq!(tokens[0].text, "▁this");
//! ```
//!
//! ## Loading A Vocabulary
//! Plain-text exports (`piece<TAB>score`, id = line number) load through
//! [`Sentencepiece::from_vocab_file`] or [`Sentencepiece::from_config`].
//!
//! ```no_run
//! use spm_viterbi::{Sentencepiece, SentencepieceConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SentencepieceConfig::default()
//!         .with_vocab_path("/path/to/spiece.vocab")
//!         .with_lowercase(true);
//!     let model = Sentencepiece::from_config(config)?;
//!     let _ids = model.tokenize_to_ids("Hello world");
//!     Ok(())
//! }
//! ```
//!
//! ## Offset And Unit Rules
//! - Offsets are scalar indices (based on `str.chars()`), not byte indices.
//! - They index the prepared text returned by [`PreparedText::unpadded_text`]:
//!   normalized, lowercased if configured, whitespace replaced by `▁`.
//! - Every input gets a leading `▁` unless it already starts with one. Plain
//!   [`Sentencepiece::tokenize`] keeps it in the first token's text;
//!   [`Sentencepiece::tokenize_to_offsets`] shifts offsets to hide it.
//! - A run of consecutive unknown scalars yields one token covering only the
//!   run's first scalar.
//!
//! ## Environment Variables
//! - `SPM_VOCAB_PATH`: vocabulary used by [`SentencepieceConfig::default`].
//! - `SPM_LOWERCASE`: `1`/`true`/`yes`/`on` (any case) turns on lowercasing in the default config.

mod constants;
mod discovery;
mod error;
mod model;
mod normalizer;
mod offsets;
mod prepare;
mod trie;
mod types;
mod viterbi;
mod vocab;

pub use constants::*;
pub use error::{Result, SentencepieceError};
pub use model::Sentencepiece;
pub use normalizer::normalize;
pub use prepare::PreparedText;
pub use trie::{PrefixMatch, PrefixMatches, Trie, TrieNode};
pub use types::{SentencepieceConfig, Token, TokenOffset};
pub use vocab::{parse_vocab, read_vocab_file, VocabEntry};

#[cfg(test)]
mod test_support;

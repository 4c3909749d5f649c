//! Reader for plain-text vocabulary exports.
//!
//! Each line is `piece<TAB>score`; the zero-based line number is the piece id.
//! A line without a tab is a piece with score `0.0`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regex::Regex;

use crate::error::{Result, SentencepieceError};
use crate::types::SentencepieceConfig;

/// One vocabulary line.
#[derive(Debug, Clone, PartialEq)]
pub struct VocabEntry {
    /// Piece text.
    pub piece: String,
    /// Unigram score (log probability).
    pub score: f32,
    /// Piece id.
    pub id: i32,
}

/// How a vocabulary entry takes part in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryKind {
    Unknown,
    Control,
    Normal,
}

/// Splits entries into unknown, control and normal pieces.
pub(crate) struct EntryClassifier {
    unknown_piece: String,
    control: Regex,
}

impl EntryClassifier {
    pub(crate) fn from_config(config: &SentencepieceConfig) -> Result<Self> {
        Ok(Self {
            unknown_piece: config.unknown_piece.clone(),
            control: Regex::new(&config.control_pattern)?,
        })
    }

    pub(crate) fn classify(&self, piece: &str) -> EntryKind {
        if piece == self.unknown_piece {
            EntryKind::Unknown
        } else if self.control.is_match(piece) {
            EntryKind::Control
        } else {
            EntryKind::Normal
        }
    }
}

/// Parses a vocabulary export.
pub fn parse_vocab(reader: impl BufRead) -> Result<Vec<VocabEntry>> {
    let mut entries = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        entries.push(parse_line(line.trim_end_matches('\r'), index)?);
    }
    Ok(entries)
}

/// Reads and parses a vocabulary export from disk.
pub fn read_vocab_file(path: impl AsRef<Path>) -> Result<Vec<VocabEntry>> {
    let file = File::open(path.as_ref())?;
    parse_vocab(BufReader::new(file))
}

fn parse_line(line: &str, index: usize) -> Result<VocabEntry> {
    let line_number = index + 1;
    let id = i32::try_from(index).map_err(|_| SentencepieceError::Parse {
        line: line_number,
        message: format!("piece id exceeds {}", i32::MAX),
    })?;

    let (piece, score) = match line.split_once('\t') {
        Some((piece, score)) => {
            let score = score
                .trim()
                .parse::<f32>()
                .map_err(|error| SentencepieceError::Parse {
                    line: line_number,
                    message: format!("invalid score {score:?}: {error}"),
                })?;
            (piece, score)
        }
        None => (line, 0.0),
    };

    if piece.is_empty() {
        return Err(SentencepieceError::Parse {
            line: line_number,
            message: "empty piece".to_string(),
        });
    }

    Ok(VocabEntry {
        piece: piece.to_string(),
        score,
        id,
    })
}

#[cfg(test)]
mod vocab_tests {
    use super::{parse_vocab, read_vocab_file, EntryClassifier, EntryKind};
    use crate::error::SentencepieceError;
    use crate::test_support::{make_temp_dir, remove_tree};
    use crate::types::SentencepieceConfig;
    use std::fs;
    use std::io::Cursor;

    #[test]
    fn parses_pieces_scores_and_line_ids() {
        let text = "<unk>\t0\n<s>\t0\n▁the\t-3.5\r\nthe\t-8.25\nx\n";
        let entries = parse_vocab(Cursor::new(text)).expect("vocab should parse");

        assert_eq!(entries.len(), 5);
        assert_eq!(entries[2].piece, "▁the");
        assert_eq!(entries[2].score, -3.5);
        assert_eq!(entries[2].id, 2);
        assert_eq!(entries[3].score, -8.25);
        assert_eq!(entries[4].piece, "x");
        assert_eq!(entries[4].score, 0.0);
    }

    #[test]
    fn reports_line_of_bad_score() {
        let error = parse_vocab(Cursor::new("a\t-1\nb\tnot-a-number\n"))
            .expect_err("score should be rejected");
        assert!(matches!(error, SentencepieceError::Parse { line: 2, .. }));
    }

    #[test]
    fn rejects_empty_piece() {
        let error = parse_vocab(Cursor::new("a\t-1\n\n")).expect_err("blank line is invalid");
        assert!(matches!(error, SentencepieceError::Parse { line: 2, .. }));
    }

    #[test]
    fn read_vocab_file_reports_missing_file() {
        let dir = make_temp_dir("vocab-missing");
        let error = read_vocab_file(dir.join("absent.vocab")).expect_err("missing file");
        assert!(matches!(error, SentencepieceError::Io(_)));
        remove_tree(&dir);
    }

    #[test]
    fn read_vocab_file_reads_from_disk() {
        let dir = make_temp_dir("vocab-read");
        let path = dir.join("spiece.vocab");
        fs::write(&path, "<unk>\t0\n▁a\t-1\n").expect("failed to write vocab");

        let entries = read_vocab_file(&path).expect("vocab should load");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].piece, "▁a");
        remove_tree(&dir);
    }

    #[test]
    fn classifier_separates_unknown_control_and_normal() {
        let classifier =
            EntryClassifier::from_config(&SentencepieceConfig::new()).expect("default pattern");
        assert_eq!(classifier.classify("<unk>"), EntryKind::Unknown);
        assert_eq!(classifier.classify("<cls>"), EntryKind::Control);
        assert_eq!(classifier.classify("</s>"), EntryKind::Control);
        assert_eq!(classifier.classify("[CLS]"), EntryKind::Control);
        assert_eq!(classifier.classify("▁the"), EntryKind::Normal);
        assert_eq!(classifier.classify("<"), EntryKind::Normal);
        assert_eq!(classifier.classify("[a]"), EntryKind::Normal);
    }

    #[test]
    fn classifier_rejects_invalid_pattern() {
        let config = SentencepieceConfig::new().with_control_pattern("(");
        assert!(matches!(
            EntryClassifier::from_config(&config),
            Err(SentencepieceError::Pattern(_))
        ));
    }
}

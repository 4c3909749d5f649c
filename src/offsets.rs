use crate::types::{Token, TokenOffset};
use crate::viterbi::Segment;

/// How the best path is turned into offset tokens.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolveOptions {
    pub(crate) unknown_id: i32,
    /// Shift offsets left by one to hide an injected leading separator.
    pub(crate) adjust_padding: bool,
    /// Drop segments whose shifted end is zero.
    pub(crate) drop_empty_leading: bool,
}

/// Converts the best path into tokens with text and scalar offsets.
///
/// A segment carrying the unknown id that directly follows another unknown
/// segment is not emitted, so a run of unknown scalars yields a single token
/// for its first scalar.
pub(crate) fn resolve_offsets(
    path: &[Segment],
    scalars: &[char],
    options: ResolveOptions,
) -> Vec<TokenOffset> {
    let mut tokens = Vec::with_capacity(path.len());
    let mut previous_unknown = false;

    for segment in path {
        let is_unknown = segment.id == options.unknown_id;
        let suppressed = previous_unknown && is_unknown;
        previous_unknown = is_unknown;
        if suppressed {
            continue;
        }

        let Some(start) = segment.start else {
            continue;
        };
        let text: String = scalars[start..segment.end].iter().collect();
        let (start, end) = if options.adjust_padding {
            (start.saturating_sub(1), segment.end.saturating_sub(1))
        } else {
            (start, segment.end)
        };
        if options.adjust_padding && options.drop_empty_leading && end == 0 {
            continue;
        }

        tokens.push(TokenOffset {
            id: segment.id,
            text,
            start,
            end,
        });
    }

    tokens
}

/// Drops offsets, keeping id and text.
pub(crate) fn make_tokens(offsets: Vec<TokenOffset>) -> Vec<Token> {
    offsets
        .into_iter()
        .map(|offset| Token {
            id: offset.id,
            text: offset.text,
        })
        .collect()
}

//! Best-path segmentation over a prepared scalar buffer.
//!
//! The forward pass fills one [`Segment`] per buffer position with the best
//! known way to reach it; the backward pass follows the `start` links from the
//! end of the buffer to recover the path.

use crate::constants::UNREACHED_SCORE;
use crate::trie::Trie;

/// A candidate piece covering `start..end` of the buffer.
///
/// `start` is `None` for positions that no piece has reached yet, which is
/// always the case for position 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Segment {
    pub(crate) score: f32,
    pub(crate) id: i32,
    pub(crate) start: Option<usize>,
    pub(crate) end: usize,
}

impl Segment {
    fn unreached(unknown_id: i32) -> Self {
        Self {
            score: 0.0,
            id: unknown_id,
            start: None,
            end: 0,
        }
    }
}

/// Runs the forward pass and returns the segment table (length `scalars.len() + 1`).
pub(crate) fn decode_forward(trie: &Trie, scalars: &[char], unknown_id: i32) -> Vec<Segment> {
    let size = scalars.len() + 1;
    let mut scores = vec![UNREACHED_SCORE; size];
    let mut segments = vec![Segment::unreached(unknown_id); size];
    scores[0] = 0.0;

    for start in 0..scalars.len() {
        for found in trie.common_prefix_search(&scalars[start..]) {
            let end = start + found.depth;
            let candidate = scores[start] + found.score;
            if candidate > scores[end] {
                segments[end] = Segment {
                    score: candidate,
                    id: found.id,
                    start: Some(start),
                    end,
                };
                scores[end] = candidate;
            }
        }

        // An unreachable next position falls back to a one-scalar unknown piece.
        // Resetting its score to zero keeps the sentinel from leaking forward.
        if scores[start + 1] <= UNREACHED_SCORE {
            segments[start + 1] = Segment {
                score: UNREACHED_SCORE,
                id: unknown_id,
                start: Some(start),
                end: start + 1,
            };
            scores[start + 1] = 0.0;
        }
    }

    segments
}

/// Follows the `start` links back from the last position and returns the path left to right.
pub(crate) fn decode_backward(segments: &[Segment]) -> Vec<Segment> {
    let mut best = Vec::new();
    let Some(mut position) = segments.len().checked_sub(1) else {
        return best;
    };

    while let Some(start) = segments[position].start {
        best.push(segments[position]);
        position = start;
    }

    best.reverse();
    best
}

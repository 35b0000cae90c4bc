use std::collections::{HashMap, HashSet};

use crate::models::MovieCard;

/// Final size of every recommendation response
pub const MAX_RESULTS: usize = 12;
/// Per-source cap applied before the chat-path merge
pub const CHAT_PREMERGE_CAP: usize = 24;

/// The boost constants carried over from the original ranking logic.
/// Deliberately configurable rather than rationalised.
#[derive(Debug, Clone, Copy)]
pub struct RankerWeights {
    /// Score injected for candidates surfaced only by collaborative overlap
    pub collab_only_score: f64,
    /// Flat boost when content and collaborative signals agree
    pub overlap_boost: f64,
}

impl Default for RankerWeights {
    fn default() -> Self {
        Self {
            collab_only_score: 100.0,
            overlap_boost: 30.0,
        }
    }
}

/// A movie projection paired with its request-scoped score and provenance
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub card: MovieCard,
    pub score: f64,
    pub common_genres: Vec<String>,
    pub common_cast: usize,
    /// True when collaborative overlap contributed to this entry
    pub collaborative: bool,
}

impl ScoredCandidate {
    fn collaborative_only(card: MovieCard, score: f64) -> Self {
        Self {
            card,
            score,
            common_genres: Vec::new(),
            common_cast: 0,
            collaborative: true,
        }
    }
}

/// Merges content-scored candidates with collaborative candidates.
///
/// Collaborative-only candidates enter with a fixed injected score so they
/// surface prominently; candidates found by both methods keep their content
/// score plus a flat agreement boost. The sort is stable, so equal scores
/// keep insertion order.
pub fn merge_scored(
    content: Vec<ScoredCandidate>,
    collaborative: Vec<MovieCard>,
    weights: RankerWeights,
    limit: usize,
) -> Vec<ScoredCandidate> {
    let mut merged: Vec<ScoredCandidate> = Vec::with_capacity(content.len());
    let mut index: HashMap<i64, usize> = HashMap::new();

    for candidate in content {
        index.insert(candidate.card.id, merged.len());
        merged.push(candidate);
    }
    for card in collaborative {
        if let Some(&at) = index.get(&card.id) {
            merged[at].score += weights.overlap_boost;
            merged[at].collaborative = true;
        } else {
            index.insert(card.id, merged.len());
            merged.push(ScoredCandidate::collaborative_only(
                card,
                weights.collab_only_score,
            ));
        }
    }

    merged.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    merged.truncate(limit);
    merged
}

/// Merges the chat path's unscored candidate lists by identity.
///
/// Content-query order is preserved and collaborative-only candidates are
/// appended behind it; the filtered content query already encodes the
/// requester's intent, so no score reshuffling happens here.
pub fn merge_by_identity(
    content: Vec<MovieCard>,
    collaborative: Vec<MovieCard>,
    limit: usize,
) -> Vec<MovieCard> {
    let mut seen: HashSet<i64> = HashSet::new();
    let mut merged: Vec<MovieCard> = Vec::with_capacity(content.len());

    for card in content.into_iter().chain(collaborative) {
        if seen.insert(card.id) {
            merged.push(card);
        }
    }
    merged.truncate(limit);
    merged
}

use crate::{
    error::AppResult,
    models::Movie,
    store::{Filter, MovieQuery, RecordStore, Sort},
};

use super::ranker::{CHAT_PREMERGE_CAP, MAX_RESULTS};

/// Minimum vote count for the chat path's primary and fallback queries
const CHAT_VOTE_FLOOR: i64 = 5;

/// Popularity-ordered catalog fallback for the more-like-this path.
///
/// Used both when the seed movie does not exist (no exclusion) and when a
/// known seed yields no candidates (seed excluded).
pub async fn popular_catalog(
    store: &dyn RecordStore,
    exclude_seed: Option<i64>,
) -> AppResult<Vec<Movie>> {
    let mut clauses = vec![Filter::has_poster()];
    if let Some(seed_id) = exclude_seed {
        clauses.push(Filter::ids_not_in(&[seed_id]));
    }

    store
        .find_movies(
            MovieQuery::new(Filter::And(clauses))
                .sort(Sort::Popularity)
                .limit(MAX_RESULTS),
        )
        .await
}

/// First chat relaxation tier: drop genre, mood, and person constraints and
/// retry on language alone, keeping the dislike exclusion.
pub async fn relaxed_language(
    store: &dyn RecordStore,
    languages: &[String],
    disliked: &[i64],
    sort: Sort,
) -> AppResult<Vec<Movie>> {
    let mut clauses = vec![Filter::languages_any(languages), Filter::has_poster()];
    if !disliked.is_empty() {
        clauses.push(Filter::ids_not_in(disliked));
    }

    store
        .find_movies(
            MovieQuery::new(Filter::And(clauses))
                .sort(sort)
                .limit(CHAT_PREMERGE_CAP),
        )
        .await
}

/// Final chat tier: generic popular movies, still excluding dislikes
pub async fn popular_chat(
    store: &dyn RecordStore,
    disliked: &[i64],
    sort: Sort,
) -> AppResult<Vec<Movie>> {
    let mut clauses = vec![
        Filter::vote_count_over(CHAT_VOTE_FLOOR),
        Filter::has_poster(),
    ];
    if !disliked.is_empty() {
        clauses.push(Filter::ids_not_in(disliked));
    }

    store
        .find_movies(
            MovieQuery::new(Filter::And(clauses))
                .sort(sort)
                .limit(MAX_RESULTS),
        )
        .await
}

/// The chat path's primary content filter: every extracted signal plus the
/// popularity floor, poster requirement, and dislike exclusion
pub fn chat_vote_floor() -> Filter {
    Filter::vote_count_over(CHAT_VOTE_FLOOR)
}

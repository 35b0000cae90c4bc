use crate::{
    error::AppResult,
    models::{Movie, User},
    store::{Filter, MovieQuery, RecordStore, Sort},
};

use super::ranker::CHAT_PREMERGE_CAP;

/// Candidate movies other fans of the seed also liked.
///
/// Anonymous requests skip collaborative filtering entirely. Candidate ids
/// keep first-seen order across fans; the seed itself is never a candidate.
pub async fn seed_candidates(
    store: &dyn RecordStore,
    seed_id: i64,
    user_id: Option<&str>,
) -> AppResult<Vec<Movie>> {
    if user_id.is_none() {
        return Ok(Vec::new());
    }

    let fans = store.users_liking_any(&[seed_id]).await?;
    let mut candidate_ids: Vec<i64> = Vec::new();
    for fan in &fans {
        for &movie_id in &fan.liked_movies {
            if movie_id != seed_id && !candidate_ids.contains(&movie_id) {
                candidate_ids.push(movie_id);
            }
        }
    }
    if candidate_ids.is_empty() {
        return Ok(Vec::new());
    }

    store
        .find_movies(MovieQuery::new(Filter::And(vec![
            Filter::ids_in(&candidate_ids),
            Filter::has_poster(),
        ])))
        .await
}

/// Candidate movies liked by users who share at least one like with the
/// requester, excluding everything the requester already reacted to.
pub async fn profile_candidates(
    store: &dyn RecordStore,
    user: &User,
    sort: Sort,
) -> AppResult<Vec<Movie>> {
    if user.liked_movies.is_empty() {
        return Ok(Vec::new());
    }

    let peers = store.users_liking_any(&user.liked_movies).await?;
    let mut candidate_ids: Vec<i64> = Vec::new();
    for peer in &peers {
        if peer.id == user.id {
            continue;
        }
        for &movie_id in &peer.liked_movies {
            if !user.likes(movie_id)
                && !user.dislikes(movie_id)
                && !candidate_ids.contains(&movie_id)
            {
                candidate_ids.push(movie_id);
            }
        }
    }
    if candidate_ids.is_empty() {
        return Ok(Vec::new());
    }

    store
        .find_movies(
            MovieQuery::new(Filter::And(vec![
                Filter::ids_in(&candidate_ids),
                Filter::has_poster(),
            ]))
            .sort(sort)
            .limit(CHAT_PREMERGE_CAP),
        )
        .await
}

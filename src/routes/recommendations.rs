use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    cached,
    db::CacheKey,
    engine::{ChatPreferences, ChatReply},
    error::AppResult,
    middleware::request_id::RequestId,
    models::SimilarMovie,
    state::AppState,
};

/// Requester identity header; auth mechanics live with the user service
const USER_ID_HEADER: &str = "x-user-id";

const SIMILAR_CACHE_TTL: u64 = 3600; // 1 hour

fn user_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Handler for the more-like-this endpoint
pub async fn more_like_this(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(movie_id): Path<i64>,
    headers: HeaderMap,
) -> AppResult<Json<Vec<SimilarMovie>>> {
    let user_id = user_from_headers(&headers);

    tracing::info!(
        request_id = %request_id,
        movie_id,
        known_user = user_id.is_some(),
        "Processing more-like-this request"
    );

    // Anonymous responses carry no user-specific data, so they are safe to
    // cache per seed movie
    let results = match (&state.cache, user_id.as_deref()) {
        (Some(cache), None) => {
            cached!(
                cache,
                CacheKey::SimilarMovies(movie_id),
                SIMILAR_CACHE_TTL,
                state.recommender.similar_movies(movie_id, None)
            )
        }
        (_, user) => state.recommender.similar_movies(movie_id, user).await,
    }?;

    tracing::info!(
        request_id = %request_id,
        movie_id,
        results = results.len(),
        "More-like-this completed"
    );

    Ok(Json(results))
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub preferences: ChatPreferences,
}

/// Handler for the conversational recommendation endpoint
pub async fn chat(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    headers: HeaderMap,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatReply>> {
    let user_id = user_from_headers(&headers);

    tracing::info!(
        request_id = %request_id,
        query_len = request.query.len(),
        known_user = user_id.is_some(),
        "Processing chat recommendation request"
    );

    let reply = state
        .recommender
        .chat(&request.query, &request.preferences, user_id.as_deref())
        .await?;

    tracing::info!(
        request_id = %request_id,
        results = reply.results.len(),
        "Chat recommendation completed"
    );

    Ok(Json(reply))
}

//! The recommendation and similarity scoring engine.
//!
//! Turns a seed movie or a free-text query plus user history into a ranked,
//! deduplicated movie list. All computation is pure; the only effects are
//! reads through the injected record store.

use std::sync::Arc;

use serde::Serialize;

use crate::{
    error::AppResult,
    models::{ChatMovie, Movie, MovieCard, SimilarMovie},
    store::{Field, Filter, MovieQuery, RecordStore, Value},
};

pub mod collab;
pub mod compose;
pub mod extract;
pub mod fallback;
pub mod ranker;
pub mod similarity;
pub mod tables;
pub mod text;

pub use compose::{FixedGreeting, GreetingPicker, RandomGreeting};
pub use extract::{ChatPreferences, Extraction, SortIntent};
pub use ranker::{RankerWeights, MAX_RESULTS};
pub use tables::Lookups;

use ranker::{ScoredCandidate, CHAT_PREMERGE_CAP};

/// Reply body of the conversational recommendation operation
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub results: Vec<ChatMovie>,
    pub message: String,
    pub found_genres: Vec<String>,
    pub found_people: Vec<String>,
    pub detected_moods: Vec<String>,
    pub found_languages: Vec<String>,
    pub liked_movies: Vec<i64>,
    pub disliked_movies: Vec<i64>,
}

impl ChatReply {
    fn canned(message: &str) -> Self {
        Self {
            results: Vec::new(),
            message: message.to_string(),
            found_genres: Vec::new(),
            found_people: Vec::new(),
            detected_moods: Vec::new(),
            found_languages: Vec::new(),
            liked_movies: Vec::new(),
            disliked_movies: Vec::new(),
        }
    }
}

/// The hybrid recommendation service behind both public operations
pub struct Recommender {
    store: Arc<dyn RecordStore>,
    lookups: Arc<Lookups>,
    weights: RankerWeights,
    greetings: Arc<dyn GreetingPicker>,
}

fn round2(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

fn unscored_entries(movies: &[Movie]) -> Vec<SimilarMovie> {
    movies
        .iter()
        .map(|movie| SimilarMovie {
            movie: MovieCard::from(movie),
            score: 0.0,
            common_genres: Vec::new(),
            common_cast: 0,
        })
        .collect()
}

impl Recommender {
    pub fn new(
        store: Arc<dyn RecordStore>,
        lookups: Arc<Lookups>,
        weights: RankerWeights,
        greetings: Arc<dyn GreetingPicker>,
    ) -> Self {
        Self {
            store,
            lookups,
            weights,
            greetings,
        }
    }

    /// More-like-this: content-scores the full catalog against the seed,
    /// merges in collaborative candidates, and falls back to popular movies
    /// when the seed is unknown or nothing relates to it.
    pub async fn similar_movies(
        &self,
        seed_id: i64,
        user_id: Option<&str>,
    ) -> AppResult<Vec<SimilarMovie>> {
        let store = self.store.as_ref();

        let Some(seed) = store.movie_by_id(seed_id).await? else {
            tracing::warn!(seed_id, "Seed movie not found, serving popular fallback");
            let fallback = fallback::popular_catalog(store, None).await?;
            return Ok(unscored_entries(&fallback));
        };

        // Full catalog scan; tractable at current catalog sizes
        let candidates = store
            .find_movies(MovieQuery::new(Filter::And(vec![
                Filter::ids_not_in(&[seed_id]),
                Filter::has_poster(),
            ])))
            .await?;

        let mut content: Vec<ScoredCandidate> = Vec::new();
        for movie in &candidates {
            let pair = similarity::score_pair(&seed, movie);
            if pair.is_related() {
                content.push(ScoredCandidate {
                    card: MovieCard::from(movie),
                    score: round2(pair.total),
                    common_genres: pair.common_genres,
                    common_cast: pair.common_cast,
                    collaborative: false,
                });
            }
        }

        let collaborative = collab::seed_candidates(store, seed_id, user_id).await?;
        let collaborative_cards: Vec<MovieCard> =
            collaborative.iter().map(MovieCard::from).collect();

        tracing::info!(
            seed_id,
            scanned = candidates.len(),
            content = content.len(),
            collaborative = collaborative_cards.len(),
            "Similarity candidates gathered"
        );

        let ranked = ranker::merge_scored(content, collaborative_cards, self.weights, MAX_RESULTS);
        if ranked.is_empty() {
            let fallback = fallback::popular_catalog(store, Some(seed_id)).await?;
            return Ok(unscored_entries(&fallback));
        }

        Ok(ranked
            .into_iter()
            .map(|candidate| SimilarMovie {
                movie: candidate.card,
                score: candidate.score,
                common_genres: candidate.common_genres,
                common_cast: candidate.common_cast,
            })
            .collect())
    }

    /// Conversational recommendations: extract signals, query the catalog,
    /// merge collaborative candidates, and compose a reply message.
    pub async fn chat(
        &self,
        query_text: &str,
        preferences: &ChatPreferences,
        user_id: Option<&str>,
    ) -> AppResult<ChatReply> {
        let store = self.store.as_ref();
        let query = query_text.to_lowercase();

        // General Q&A runs before any extraction or ranking
        if let Some(reply) = self.lookups.general_reply(&query) {
            return Ok(ChatReply::canned(reply));
        }

        let people = store.people().await?;
        let extraction = extract::extract(&query, preferences, &people, &self.lookups);
        let sort = SortIntent::detect(&query).to_sort();

        let user = match user_id {
            Some(id) => store.user_by_id(id).await?,
            None => None,
        };
        let liked_ids = user
            .as_ref()
            .map(|u| u.liked_movies.clone())
            .unwrap_or_default();
        let disliked_ids = user
            .as_ref()
            .map(|u| u.disliked_movies.clone())
            .unwrap_or_default();

        let mut clauses = vec![fallback::chat_vote_floor(), Filter::has_poster()];
        if !extraction.found_genres.is_empty() {
            clauses.push(Filter::genres_any(&extraction.found_genres));
        }
        if !extraction.found_people.is_empty() {
            let person_ids: Vec<i64> = people
                .iter()
                .filter(|p| extraction.found_people.contains(&p.name))
                .map(|p| p.id)
                .collect();
            clauses.push(Filter::people_any(&person_ids));
        }
        if !extraction.found_languages.is_empty() {
            clauses.push(Filter::languages_any(&extraction.found_languages));
        }
        // Every detected mood restricts on its own genre list as well
        for mood in &extraction.detected_moods {
            if let Some(genres) = self.lookups.genres_for_mood(mood) {
                clauses.push(Filter::In(
                    Field::Genres,
                    genres.iter().map(|g| Value::from(*g)).collect(),
                ));
            }
        }
        if !disliked_ids.is_empty() {
            clauses.push(Filter::ids_not_in(&disliked_ids));
        }

        let mut movies = store
            .find_movies(
                MovieQuery::new(Filter::And(clauses))
                    .sort(sort)
                    .limit(CHAT_PREMERGE_CAP),
            )
            .await?;

        // Relaxation tier: language-only retry before giving up
        if movies.is_empty() && !extraction.found_languages.is_empty() {
            movies =
                fallback::relaxed_language(store, &extraction.found_languages, &disliked_ids, sort)
                    .await?;
        }

        let collaborative = match &user {
            Some(u) => collab::profile_candidates(store, u, sort).await?,
            None => Vec::new(),
        };

        tracing::info!(
            moods = extraction.detected_moods.len(),
            genres = extraction.found_genres.len(),
            languages = extraction.found_languages.len(),
            people = extraction.found_people.len(),
            content = movies.len(),
            collaborative = collaborative.len(),
            "Chat candidates gathered"
        );

        let content_cards: Vec<MovieCard> = movies.iter().map(MovieCard::from).collect();
        let collaborative_cards: Vec<MovieCard> =
            collaborative.iter().map(MovieCard::from).collect();
        let mut cards = ranker::merge_by_identity(content_cards, collaborative_cards, MAX_RESULTS);

        let personalized = user_id.is_some() && !cards.is_empty();
        let mut message = compose::compose_message(
            &extraction,
            personalized,
            &self.lookups,
            self.greetings.as_ref(),
        );

        if cards.is_empty() {
            let fallback = fallback::popular_chat(store, &disliked_ids, sort).await?;
            cards = fallback.iter().map(MovieCard::from).collect();
            message = compose::no_match_message().to_string();
        }

        let results: Vec<ChatMovie> = cards
            .into_iter()
            .map(|card| ChatMovie {
                liked: liked_ids.contains(&card.id),
                disliked: disliked_ids.contains(&card.id),
                movie: card,
            })
            .collect();

        Ok(ChatReply {
            results,
            message,
            found_genres: extraction.found_genres,
            found_people: extraction.found_people,
            detected_moods: extraction.detected_moods,
            found_languages: extraction.found_languages,
            liked_movies: liked_ids,
            disliked_movies: disliked_ids,
        })
    }
}

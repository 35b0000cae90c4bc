use serde::{Deserialize, Serialize};

/// A user record as exposed by the record store.
///
/// Only the reaction sets matter to the engine; account fields live with the
/// user-management service. Reads are best-effort: a like-set may change
/// concurrently with an in-flight recommendation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub liked_movies: Vec<i64>,
    pub disliked_movies: Vec<i64>,
}

impl User {
    pub fn likes(&self, movie_id: i64) -> bool {
        self.liked_movies.contains(&movie_id)
    }

    pub fn dislikes(&self, movie_id: i64) -> bool {
        self.disliked_movies.contains(&movie_id)
    }
}

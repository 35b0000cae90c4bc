use async_trait::async_trait;
use std::cmp::Ordering;

use crate::{
    error::AppResult,
    models::{Movie, PersonRef, User},
};

use super::{Field, Filter, MovieQuery, RecordStore, Sort, Value};

/// In-memory record store.
///
/// Interprets the filter AST directly and defines the reference semantics
/// adapters must match: `In` on a set-valued field means overlap, `Equals`
/// means containment, `Range` bounds are inclusive. Backs the integration
/// tests and local development without a database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    movies: Vec<Movie>,
    users: Vec<User>,
    people: Vec<PersonRef>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(mut self, movies: Vec<Movie>) -> Self {
        self.movies = movies;
        self
    }

    pub fn with_users(mut self, users: Vec<User>) -> Self {
        self.users = users;
        self
    }

    pub fn with_people(mut self, people: Vec<PersonRef>) -> Self {
        self.people = people;
        self
    }
}

fn matches(movie: &Movie, filter: &Filter) -> bool {
    match filter {
        Filter::Equals(field, value) => match field {
            Field::Id => value.as_int() == Some(movie.id),
            Field::Genres => value
                .as_str()
                .is_some_and(|g| movie.genres.iter().any(|have| have == g)),
            Field::CastIds => value.as_int().is_some_and(|id| movie.cast_ids.contains(&id)),
            Field::DirectorId => movie.director_id.is_some() && movie.director_id == value.as_int(),
            Field::OriginalLanguage => movie.original_language.as_deref() == value.as_str(),
            Field::PosterPath => movie.poster_path.as_deref() == value.as_str(),
            Field::VoteCount => value.as_int() == Some(movie.vote_count),
        },
        Filter::In(field, values) => values
            .iter()
            .any(|v| matches(movie, &Filter::Equals(*field, v.clone()))),
        Filter::NotIn(field, values) => !values
            .iter()
            .any(|v| matches(movie, &Filter::Equals(*field, v.clone()))),
        Filter::Exists(field) => match field {
            Field::PosterPath => movie.poster_path.is_some(),
            Field::DirectorId => movie.director_id.is_some(),
            Field::OriginalLanguage => movie.original_language.is_some(),
            Field::Id | Field::Genres | Field::CastIds | Field::VoteCount => true,
        },
        Filter::Range { field, min, max } => {
            let actual = match field {
                Field::VoteCount => movie.vote_count,
                Field::Id => movie.id,
                _ => return false,
            };
            let above = min
                .as_ref()
                .and_then(Value::as_int)
                .map_or(true, |m| actual >= m);
            let below = max
                .as_ref()
                .and_then(Value::as_int)
                .map_or(true, |m| actual <= m);
            above && below
        }
        Filter::And(filters) => filters.iter().all(|f| matches(movie, f)),
        Filter::Or(filters) => filters.iter().any(|f| matches(movie, f)),
    }
}

fn sort_movies(movies: &mut [Movie], sort: Sort) {
    match sort {
        Sort::Popularity => movies.sort_by(|a, b| b.vote_count.cmp(&a.vote_count)),
        Sort::RatingThenPopularity => movies.sort_by(|a, b| {
            let rating_a = a.vote_average.unwrap_or(f64::NEG_INFINITY);
            let rating_b = b.vote_average.unwrap_or(f64::NEG_INFINITY);
            rating_b
                .partial_cmp(&rating_a)
                .unwrap_or(Ordering::Equal)
                .then(b.vote_count.cmp(&a.vote_count))
        }),
        Sort::YearThenPopularity => movies.sort_by(|a, b| {
            b.release_year
                .cmp(&a.release_year)
                .then(b.vote_count.cmp(&a.vote_count))
        }),
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn movie_by_id(&self, id: i64) -> AppResult<Option<Movie>> {
        Ok(self.movies.iter().find(|m| m.id == id).cloned())
    }

    async fn find_movies(&self, query: MovieQuery) -> AppResult<Vec<Movie>> {
        let mut found: Vec<Movie> = self
            .movies
            .iter()
            .filter(|m| matches(m, &query.filter))
            .cloned()
            .collect();
        sort_movies(&mut found, query.sort);
        if let Some(limit) = query.limit {
            found.truncate(limit);
        }
        Ok(found)
    }

    async fn user_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    async fn users_liking_any(&self, movie_ids: &[i64]) -> AppResult<Vec<User>> {
        Ok(self
            .users
            .iter()
            .filter(|u| u.liked_movies.iter().any(|id| movie_ids.contains(id)))
            .cloned()
            .collect())
    }

    async fn people(&self) -> AppResult<Vec<PersonRef>> {
        Ok(self.people.clone())
    }
}

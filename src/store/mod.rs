//! Record-store abstraction
//!
//! The engine treats persisted movies, users, and people as an external
//! collaborator behind this trait: adapters translate the typed filter AST
//! to their native query form. Everything here is read-only from the
//! engine's perspective; like/dislike writes belong to the user-management
//! service.

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Movie, PersonRef, User},
};

mod filter;
pub mod memory;
pub mod postgres;

pub use filter::{Field, Filter, MovieQuery, Sort, Value};
pub use memory::MemoryStore;
pub use postgres::PgRecordStore;

/// Query capabilities the recommendation engine consumes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch a single movie by catalog id
    async fn movie_by_id(&self, id: i64) -> AppResult<Option<Movie>>;

    /// Fetch movies matching a typed filter, ordered and capped
    async fn find_movies(&self, query: MovieQuery) -> AppResult<Vec<Movie>>;

    /// Fetch a single user with their reaction sets
    async fn user_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// Fetch users whose liked set overlaps any of the given movie ids
    async fn users_liking_any(&self, movie_ids: &[i64]) -> AppResult<Vec<User>>;

    /// The full person name catalog used for person detection
    async fn people(&self) -> AppResult<Vec<PersonRef>>;
}

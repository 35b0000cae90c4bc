use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    error::AppResult,
    models::{Movie, PersonRef, User},
};

use super::{Field, Filter, MovieQuery, RecordStore, Sort, Value};

const MOVIE_COLUMNS: &str = "id, title, original_title, genres, cast_ids, director_id, \
     producer_ids, vote_average, vote_count, release_year, original_language, overview, \
     poster_path, backdrop_path, trailer_url";

/// PostgreSQL record store.
///
/// Translates the filter AST to SQL: set-valued columns are Postgres arrays,
/// so `In` becomes an `&&` overlap test and `Equals` a `@>` containment test.
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn column(field: Field) -> &'static str {
    match field {
        Field::Id => "id",
        Field::Genres => "genres",
        Field::CastIds => "cast_ids",
        Field::DirectorId => "director_id",
        Field::OriginalLanguage => "original_language",
        Field::PosterPath => "poster_path",
        Field::VoteCount => "vote_count",
    }
}

fn is_set_column(field: Field) -> bool {
    matches!(field, Field::Genres | Field::CastIds)
}

fn is_int_column(field: Field) -> bool {
    matches!(
        field,
        Field::Id | Field::CastIds | Field::DirectorId | Field::VoteCount
    )
}

fn int_values(values: &[Value]) -> Vec<i64> {
    values.iter().filter_map(Value::as_int).collect()
}

fn str_values(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    match filter {
        Filter::Equals(field, value) => {
            if is_set_column(*field) {
                qb.push(column(*field)).push(" @> ");
                if is_int_column(*field) {
                    qb.push_bind(int_values(std::slice::from_ref(value)));
                } else {
                    qb.push_bind(str_values(std::slice::from_ref(value)));
                }
            } else {
                qb.push(column(*field)).push(" = ");
                match value {
                    Value::Int(v) => qb.push_bind(*v),
                    Value::Str(v) => qb.push_bind(v.clone()),
                };
            }
        }
        Filter::In(field, values) => push_membership(qb, *field, values),
        Filter::NotIn(field, values) => {
            qb.push("NOT (");
            push_membership(qb, *field, values);
            qb.push(")");
        }
        Filter::Exists(field) => {
            qb.push(column(*field)).push(" IS NOT NULL");
        }
        Filter::Range { field, min, max } => {
            qb.push("(");
            let mut first = true;
            if let Some(min) = min.as_ref().and_then(Value::as_int) {
                qb.push(column(*field)).push(" >= ");
                qb.push_bind(min);
                first = false;
            }
            if let Some(max) = max.as_ref().and_then(Value::as_int) {
                if !first {
                    qb.push(" AND ");
                }
                qb.push(column(*field)).push(" <= ");
                qb.push_bind(max);
                first = false;
            }
            if first {
                qb.push("TRUE");
            }
            qb.push(")");
        }
        Filter::And(filters) => push_group(qb, filters, " AND "),
        Filter::Or(filters) => push_group(qb, filters, " OR "),
    }
}

fn push_membership(qb: &mut QueryBuilder<'_, Postgres>, field: Field, values: &[Value]) {
    if is_set_column(field) {
        qb.push(column(field)).push(" && ");
    } else {
        qb.push(column(field)).push(" = ANY(");
    }
    if is_int_column(field) {
        qb.push_bind(int_values(values));
    } else {
        qb.push_bind(str_values(values));
    }
    if !is_set_column(field) {
        qb.push(")");
    }
}

fn push_group(qb: &mut QueryBuilder<'_, Postgres>, filters: &[Filter], separator: &str) {
    if filters.is_empty() {
        qb.push("TRUE");
        return;
    }
    qb.push("(");
    for (i, filter) in filters.iter().enumerate() {
        if i > 0 {
            qb.push(separator);
        }
        push_filter(qb, filter);
    }
    qb.push(")");
}

fn order_by(sort: Sort) -> &'static str {
    match sort {
        Sort::Popularity => " ORDER BY vote_count DESC",
        Sort::RatingThenPopularity => {
            " ORDER BY vote_average DESC NULLS LAST, vote_count DESC"
        }
        Sort::YearThenPopularity => " ORDER BY release_year DESC NULLS LAST, vote_count DESC",
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn movie_by_id(&self, id: i64) -> AppResult<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>(&format!(
            "SELECT {} FROM movies WHERE id = $1",
            MOVIE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(movie)
    }

    async fn find_movies(&self, query: MovieQuery) -> AppResult<Vec<Movie>> {
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM movies WHERE ", MOVIE_COLUMNS));
        push_filter(&mut qb, &query.filter);
        qb.push(order_by(query.sort));
        if let Some(limit) = query.limit {
            qb.push(" LIMIT ");
            qb.push_bind(limit as i64);
        }

        let movies = qb.build_query_as::<Movie>().fetch_all(&self.pool).await?;
        Ok(movies)
    }

    async fn user_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, liked_movies, disliked_movies FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn users_liking_any(&self, movie_ids: &[i64]) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, liked_movies, disliked_movies FROM users WHERE liked_movies && $1",
        )
        .bind(movie_ids.to_vec())
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn people(&self) -> AppResult<Vec<PersonRef>> {
        let people = sqlx::query_as::<_, PersonRef>("SELECT id, name FROM people")
            .fetch_all(&self.pool)
            .await?;
        Ok(people)
    }
}

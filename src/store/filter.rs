/// Movie record fields addressable by query filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Genres,
    CastIds,
    DirectorId,
    OriginalLanguage,
    PosterPath,
    VoteCount,
}

/// A filter operand value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Str(String),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            Value::Int(_) => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

/// A typed query filter that store adapters translate to their native form.
///
/// Set-valued fields (genres, cast ids) use overlap semantics for `In` and
/// containment for `Equals`. `Range` bounds are inclusive.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Equals(Field, Value),
    In(Field, Vec<Value>),
    NotIn(Field, Vec<Value>),
    Exists(Field),
    Range {
        field: Field,
        min: Option<Value>,
        max: Option<Value>,
    },
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    pub fn ids_in(ids: &[i64]) -> Self {
        Filter::In(Field::Id, ids.iter().map(|&id| id.into()).collect())
    }

    pub fn ids_not_in(ids: &[i64]) -> Self {
        Filter::NotIn(Field::Id, ids.iter().map(|&id| id.into()).collect())
    }

    pub fn genres_any(genres: &[String]) -> Self {
        Filter::In(
            Field::Genres,
            genres.iter().map(|g| g.as_str().into()).collect(),
        )
    }

    pub fn languages_any(codes: &[String]) -> Self {
        Filter::In(
            Field::OriginalLanguage,
            codes.iter().map(|c| c.as_str().into()).collect(),
        )
    }

    /// Movies featuring any of the given people, as cast or director
    pub fn people_any(person_ids: &[i64]) -> Self {
        let values: Vec<Value> = person_ids.iter().map(|&id| id.into()).collect();
        Filter::Or(vec![
            Filter::In(Field::CastIds, values.clone()),
            Filter::In(Field::DirectorId, values),
        ])
    }

    pub fn has_poster() -> Self {
        Filter::Exists(Field::PosterPath)
    }

    /// Strictly more than `count` votes
    pub fn vote_count_over(count: i64) -> Self {
        Filter::Range {
            field: Field::VoteCount,
            min: Some((count + 1).into()),
            max: None,
        }
    }
}

/// Result ordering applied by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    /// vote_count descending
    Popularity,
    /// vote_average descending, then vote_count
    RatingThenPopularity,
    /// release_year descending, then vote_count
    YearThenPopularity,
}

/// A movie query: filter, ordering, and optional result cap
#[derive(Debug, Clone)]
pub struct MovieQuery {
    pub filter: Filter,
    pub sort: Sort,
    pub limit: Option<usize>,
}

impl MovieQuery {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            sort: Sort::Popularity,
            limit: None,
        }
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

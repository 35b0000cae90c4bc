use serde::{Deserialize, Serialize};

/// A catalog movie record as stored by the record store.
///
/// The recommendation engine only ever reads these; all optional fields
/// contribute zero to similarity scoring when absent.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub original_title: Option<String>,
    pub genres: Vec<String>,
    pub cast_ids: Vec<i64>,
    pub director_id: Option<i64>,
    pub producer_ids: Vec<i64>,
    pub vote_average: Option<f64>,
    pub vote_count: i64,
    /// 4-digit year kept as a string; non-numeric values are tolerated
    pub release_year: Option<String>,
    pub original_language: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub trailer_url: Option<String>,
}

impl Movie {
    /// Release year parsed as an integer, if present and numeric
    pub fn release_year_num(&self) -> Option<i32> {
        self.release_year.as_deref().and_then(|y| y.parse().ok())
    }
}

/// The projection of a movie returned by the recommendation endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieCard {
    pub id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_year: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: i64,
    pub genres: Vec<String>,
    pub overview: Option<String>,
    pub trailer_url: Option<String>,
    pub original_language: Option<String>,
}

impl From<&Movie> for MovieCard {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
            backdrop_path: movie.backdrop_path.clone(),
            release_year: movie.release_year.clone(),
            vote_average: movie.vote_average,
            vote_count: movie.vote_count,
            genres: movie.genres.clone(),
            overview: movie.overview.clone(),
            trailer_url: movie.trailer_url.clone(),
            original_language: movie.original_language.clone(),
        }
    }
}

/// A content-scored entry in a more-like-this response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarMovie {
    #[serde(flatten)]
    pub movie: MovieCard,
    /// Additive similarity score, rounded to 2 decimals
    pub score: f64,
    /// Genres shared with the seed, in the seed's order
    pub common_genres: Vec<String>,
    /// Number of cast members shared with the seed
    pub common_cast: usize,
}

/// A chat recommendation entry, stamped with the requester's reactions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMovie {
    #[serde(flatten)]
    pub movie: MovieCard,
    pub liked: bool,
    pub disliked: bool,
}

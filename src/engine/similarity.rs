use std::collections::HashSet;

use crate::models::Movie;

use super::text::token_set_ratio;

/// Component weights for pairwise content similarity
const GENRE_WEIGHT: f64 = 40.0;
const DIRECTOR_BONUS: f64 = 20.0;
const CAST_MEMBER_BONUS: f64 = 4.0;
const CAST_OVERLAP_CAP: usize = 5;
const RATING_WEIGHT: f64 = 10.0;
const TITLE_WEIGHT: f64 = 10.0;
const OVERVIEW_WEIGHT: f64 = 5.0;
const RECENCY_BONUS: f64 = 3.0;
const RECENCY_WINDOW_YEARS: i32 = 3;

/// The outcome of scoring one candidate against a seed movie
#[derive(Debug, Clone, PartialEq)]
pub struct PairScore {
    /// Sum of all component contributions; no upper bound
    pub total: f64,
    /// Genres shared with the seed, in the seed's order
    pub common_genres: Vec<String>,
    /// Number of shared cast members (uncapped count)
    pub common_cast: usize,
}

impl PairScore {
    /// A zero score means "no relation"; such candidates are dropped from
    /// content-based results
    pub fn is_related(&self) -> bool {
        self.total > 0.0
    }
}

/// Scores how similar `candidate` is to `seed`.
///
/// Pure and deterministic. Each component contributes zero when the fields
/// it needs are absent; nothing here errors on malformed records.
pub fn score_pair(seed: &Movie, candidate: &Movie) -> PairScore {
    let mut total = 0.0;

    // Genre overlap (Jaccard), zero when the union is empty
    let seed_genres: HashSet<&str> = seed.genres.iter().map(String::as_str).collect();
    let candidate_genres: HashSet<&str> = candidate.genres.iter().map(String::as_str).collect();
    let union = seed_genres.union(&candidate_genres).count();
    let common_genres: Vec<String> = seed
        .genres
        .iter()
        .filter(|g| candidate_genres.contains(g.as_str()))
        .cloned()
        .collect();
    if union > 0 {
        total += common_genres.len() as f64 / union as f64 * GENRE_WEIGHT;
    }

    // Same director
    if let (Some(seed_director), Some(candidate_director)) =
        (seed.director_id, candidate.director_id)
    {
        if seed_director == candidate_director {
            total += DIRECTOR_BONUS;
        }
    }

    // Shared cast, capped
    let candidate_cast: HashSet<i64> = candidate.cast_ids.iter().copied().collect();
    let common_cast = seed
        .cast_ids
        .iter()
        .filter(|id| candidate_cast.contains(id))
        .count();
    total += common_cast.min(CAST_OVERLAP_CAP) as f64 * CAST_MEMBER_BONUS;

    // Rating closeness, only when both sides are rated
    if let (Some(seed_rating), Some(candidate_rating)) =
        (seed.vote_average, candidate.vote_average)
    {
        total += (RATING_WEIGHT - (seed_rating - candidate_rating).abs()).max(0.0);
    }

    // Title and overview text similarity
    total += token_set_ratio(&seed.title, &candidate.title) / 100.0 * TITLE_WEIGHT;
    total += token_set_ratio(
        seed.overview.as_deref().unwrap_or(""),
        candidate.overview.as_deref().unwrap_or(""),
    ) / 100.0
        * OVERVIEW_WEIGHT;

    // Recency: both years must parse as integers
    if let (Some(seed_year), Some(candidate_year)) =
        (seed.release_year_num(), candidate.release_year_num())
    {
        if (seed_year - candidate_year).abs() <= RECENCY_WINDOW_YEARS {
            total += RECENCY_BONUS;
        }
    }

    PairScore {
        total,
        common_genres,
        common_cast,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_movie(id: i64) -> Movie {
        Movie {
            id,
            title: String::new(),
            original_title: None,
            genres: vec![],
            cast_ids: vec![],
            director_id: None,
            producer_ids: vec![],
            vote_average: None,
            vote_count: 0,
            release_year: None,
            original_language: None,
            overview: None,
            poster_path: None,
            backdrop_path: None,
            trailer_url: None,
        }
    }

    #[test]
    fn test_reference_scenario_scores_52_5() {
        let seed = Movie {
            genres: vec!["Action".to_string(), "Adventure".to_string()],
            director_id: Some(10),
            vote_average: Some(7.0),
            release_year: Some("2010".to_string()),
            ..bare_movie(1)
        };
        let candidate = Movie {
            genres: vec!["Action".to_string()],
            director_id: Some(10),
            vote_average: Some(7.5),
            release_year: Some("2012".to_string()),
            ..bare_movie(2)
        };

        let score = score_pair(&seed, &candidate);
        // jaccard 1/2 * 40 = 20, director 20, rating 9.5, recency 3
        assert!((score.total - 52.5).abs() < 1e-9, "got {}", score.total);
        assert_eq!(score.common_genres, vec!["Action"]);
        assert_eq!(score.common_cast, 0);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let seed = Movie {
            genres: vec!["Drama".to_string()],
            overview: Some("a quiet family drama".to_string()),
            vote_average: Some(6.8),
            ..bare_movie(1)
        };
        let candidate = Movie {
            genres: vec!["Drama".to_string(), "Romance".to_string()],
            overview: Some("a family torn apart".to_string()),
            vote_average: Some(7.1),
            ..bare_movie(2)
        };

        let first = score_pair(&seed, &candidate);
        let second = score_pair(&seed, &candidate);
        assert_eq!(first, second);
        assert!(first.total >= 0.0);
    }

    #[test]
    fn test_genre_component_is_symmetric() {
        let a = Movie {
            genres: vec!["Action".to_string(), "Crime".to_string()],
            ..bare_movie(1)
        };
        let b = Movie {
            genres: vec!["Crime".to_string(), "Thriller".to_string(), "Drama".to_string()],
            ..bare_movie(2)
        };

        // Only the genre component can contribute for these records
        assert_eq!(score_pair(&a, &b).total, score_pair(&b, &a).total);
    }

    #[test]
    fn test_unrelated_bare_movies_score_zero() {
        let a = bare_movie(1);
        let b = bare_movie(2);
        let score = score_pair(&a, &b);
        assert_eq!(score.total, 0.0);
        assert!(!score.is_related());
    }

    #[test]
    fn test_cast_overlap_is_capped() {
        let seed = Movie {
            cast_ids: (1..=8).collect(),
            ..bare_movie(1)
        };
        let candidate = Movie {
            cast_ids: (1..=8).collect(),
            ..bare_movie(2)
        };

        let score = score_pair(&seed, &candidate);
        assert_eq!(score.common_cast, 8);
        // 5 shared members counted at most: 20 for cast, plus recency/rating absent
        assert_eq!(score.total, 20.0);
    }

    #[test]
    fn test_rating_gap_beyond_ten_contributes_zero() {
        let seed = Movie {
            vote_average: Some(10.0),
            ..bare_movie(1)
        };
        let candidate = Movie {
            vote_average: Some(0.0),
            ..bare_movie(2)
        };

        assert_eq!(score_pair(&seed, &candidate).total, 0.0);
    }

    #[test]
    fn test_missing_years_earn_no_recency_bonus() {
        let seed = Movie {
            release_year: Some("unknown".to_string()),
            ..bare_movie(1)
        };
        let candidate = bare_movie(2);
        assert_eq!(score_pair(&seed, &candidate).total, 0.0);
    }

    #[test]
    fn test_identical_titles_contribute_full_weight() {
        let seed = Movie {
            title: "Blade Runner".to_string(),
            ..bare_movie(1)
        };
        let candidate = Movie {
            title: "Blade Runner".to_string(),
            ..bare_movie(2)
        };

        assert_eq!(score_pair(&seed, &candidate).total, TITLE_WEIGHT);
    }
}

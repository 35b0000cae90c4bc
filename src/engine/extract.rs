use serde::{Deserialize, Serialize};

use crate::models::PersonRef;
use crate::store::Sort;

use super::tables::Lookups;
use super::text::partial_ratio;

/// Fuzzy threshold for person name detection, on the 0-100 ratio scale
const PERSON_MATCH_THRESHOLD: f64 = 85.0;

/// Explicit preference overrides sent alongside a chat query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatPreferences {
    pub mood: Option<String>,
    pub genre: Option<String>,
    pub language: Option<String>,
    pub person: Option<String>,
}

/// Structured signals extracted from one query; consumed immediately by
/// filter construction and message composition
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Extraction {
    pub detected_moods: Vec<String>,
    pub found_genres: Vec<String>,
    pub found_languages: Vec<String>,
    pub found_people: Vec<String>,
}

impl Extraction {
    pub fn has_signals(&self) -> bool {
        !self.detected_moods.is_empty()
            || !self.found_genres.is_empty()
            || !self.found_languages.is_empty()
            || !self.found_people.is_empty()
    }
}

/// Requested result ordering inferred from the query wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIntent {
    TopRated,
    Newest,
}

impl SortIntent {
    pub fn detect(query: &str) -> Self {
        if query.contains("new") || query.contains("latest") {
            SortIntent::Newest
        } else {
            SortIntent::TopRated
        }
    }

    pub fn to_sort(self) -> Sort {
        match self {
            SortIntent::TopRated => Sort::RatingThenPopularity,
            SortIntent::Newest => Sort::YearThenPopularity,
        }
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|have| have == value) {
        list.push(value.to_string());
    }
}

fn normalized(pref: &Option<String>) -> Option<String> {
    pref.as_deref()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
}

/// Extracts moods, genres, languages, and people from a lowercased query.
///
/// Signal types are detected independently but always in the same order
/// (moods, genres, languages, people) so repeated calls are reproducible.
pub fn extract(
    query: &str,
    preferences: &ChatPreferences,
    people: &[PersonRef],
    lookups: &Lookups,
) -> Extraction {
    let mut extraction = Extraction::default();

    // Moods: the mood word itself or any of its mapped genre names
    for (mood, genres) in lookups.moods() {
        let hit = query.contains(mood)
            || genres.iter().any(|g| query.contains(&g.to_lowercase()));
        if hit {
            push_unique(&mut extraction.detected_moods, mood);
        }
    }
    if let Some(pref_mood) = normalized(&preferences.mood) {
        if lookups.is_known_mood(&pref_mood) {
            push_unique(&mut extraction.detected_moods, &pref_mood);
        }
    }

    // Genres: canonical names in the query or the explicit preference,
    // then genres implied by every detected mood, discovery order
    let pref_genre = normalized(&preferences.genre);
    for genre in lookups.genre_names() {
        let lower = genre.to_lowercase();
        if query.contains(&lower) || pref_genre.as_deref() == Some(lower.as_str()) {
            push_unique(&mut extraction.found_genres, genre);
        }
    }
    for mood in extraction.detected_moods.clone() {
        if let Some(genres) = lookups.genres_for_mood(&mood) {
            for genre in genres {
                push_unique(&mut extraction.found_genres, genre);
            }
        }
    }

    // Languages: any alias in the query, or an explicit preference by
    // alias or bare code
    let pref_lang = normalized(&preferences.language);
    for (code, aliases) in lookups.languages() {
        let in_query = aliases.iter().any(|alias| query.contains(alias));
        let in_pref = pref_lang
            .as_deref()
            .is_some_and(|p| p == code || aliases.contains(&p));
        if in_query || in_pref {
            push_unique(&mut extraction.found_languages, code);
        }
    }

    // People: every catalog name fuzzily present in the query or matching
    // the explicit preference; no early exit, a query may name several
    let pref_person = normalized(&preferences.person);
    for person in people {
        let name = person.name.to_lowercase();
        let query_hit = partial_ratio(&name, query) >= PERSON_MATCH_THRESHOLD;
        let pref_hit = pref_person
            .as_deref()
            .is_some_and(|p| partial_ratio(&name, p) >= PERSON_MATCH_THRESHOLD);
        if query_hit || pref_hit {
            push_unique(&mut extraction.found_people, &person.name);
        }
    }

    extraction
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Vec<PersonRef> {
        vec![
            PersonRef {
                id: 31,
                name: "Tom Hanks".to_string(),
            },
            PersonRef {
                id: 6384,
                name: "Keanu Reeves".to_string(),
            },
            PersonRef {
                id: 525,
                name: "Christopher Nolan".to_string(),
            },
        ]
    }

    #[test]
    fn test_scary_and_dark_moods_and_genres() {
        let lookups = Lookups::new();
        let extraction = extract(
            "i want something scary and dark",
            &ChatPreferences::default(),
            &[],
            &lookups,
        );

        assert_eq!(extraction.detected_moods, vec!["scary", "dark"]);
        for genre in ["Horror", "Thriller", "Mystery", "Crime"] {
            assert!(
                extraction.found_genres.iter().any(|g| g == genre),
                "missing {}",
                genre
            );
        }
        let mut deduped = extraction.found_genres.clone();
        deduped.dedup();
        assert_eq!(deduped, extraction.found_genres, "duplicate genres found");
    }

    #[test]
    fn test_bollywood_maps_to_hindi() {
        let lookups = Lookups::new();
        let extraction = extract(
            "show me a bollywood movie",
            &ChatPreferences::default(),
            &[],
            &lookups,
        );
        assert_eq!(extraction.found_languages, vec!["hi"]);
    }

    #[test]
    fn test_person_detected_from_query() {
        let lookups = Lookups::new();
        let extraction = extract(
            "movies with tom hanks please",
            &ChatPreferences::default(),
            &people(),
            &lookups,
        );
        assert_eq!(extraction.found_people, vec!["Tom Hanks"]);
    }

    #[test]
    fn test_multiple_people_no_early_exit() {
        let lookups = Lookups::new();
        let extraction = extract(
            "anything with tom hanks or keanu reeves",
            &ChatPreferences::default(),
            &people(),
            &lookups,
        );
        assert_eq!(extraction.found_people, vec!["Tom Hanks", "Keanu Reeves"]);
    }

    #[test]
    fn test_preference_overrides_add_signals() {
        let lookups = Lookups::new();
        let preferences = ChatPreferences {
            mood: Some("Epic".to_string()),
            genre: Some("western".to_string()),
            language: Some("telugu".to_string()),
            person: Some("christopher nolan".to_string()),
        };
        let extraction = extract("anything good", &preferences, &people(), &lookups);

        assert!(extraction.detected_moods.iter().any(|m| m == "epic"));
        assert!(extraction.found_genres.iter().any(|g| g == "Western"));
        assert_eq!(extraction.found_languages, vec!["te"]);
        assert_eq!(extraction.found_people, vec!["Christopher Nolan"]);
    }

    #[test]
    fn test_unknown_preference_mood_ignored() {
        let lookups = Lookups::new();
        let preferences = ChatPreferences {
            mood: Some("grumpy".to_string()),
            ..Default::default()
        };
        let extraction = extract("a movie", &preferences, &[], &lookups);
        assert!(extraction.detected_moods.is_empty());
    }

    #[test]
    fn test_genre_mention_implies_mood() {
        let lookups = Lookups::new();
        let extraction = extract(
            "a horror movie tonight",
            &ChatPreferences::default(),
            &[],
            &lookups,
        );
        // "horror" is a mapped genre of both scary and dark
        assert!(extraction.detected_moods.iter().any(|m| m == "scary"));
        assert!(extraction.detected_moods.iter().any(|m| m == "dark"));
        assert!(extraction.found_genres.iter().any(|g| g == "Horror"));
    }

    #[test]
    fn test_empty_query_yields_nothing() {
        let lookups = Lookups::new();
        let extraction = extract("", &ChatPreferences::default(), &people(), &lookups);
        assert!(!extraction.has_signals());
    }

    #[test]
    fn test_sort_intent_detection() {
        assert_eq!(SortIntent::detect("best action movies"), SortIntent::TopRated);
        assert_eq!(SortIntent::detect("latest releases"), SortIntent::Newest);
        assert_eq!(SortIntent::detect("new thrillers"), SortIntent::Newest);
        assert_eq!(SortIntent::detect("anything"), SortIntent::TopRated);
    }
}

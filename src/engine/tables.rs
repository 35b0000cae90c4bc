use std::collections::HashMap;

/// Static vocabulary tables behind query interpretation and message
/// composition. Built once at startup and injected into the engine; nothing
/// here changes at runtime.

/// Mood vocabulary, each mood mapped to its ordered genre list
const MOOD_GENRES: &[(&str, &[&str])] = &[
    ("happy", &["Comedy", "Family", "Animation", "Adventure", "Music"]),
    ("sad", &["Drama", "Romance", "Music", "History"]),
    ("excited", &["Action", "Adventure", "Thriller", "Science Fiction"]),
    ("scary", &["Horror", "Thriller", "Mystery"]),
    ("romantic", &["Romance", "Drama", "Comedy"]),
    ("inspiring", &["Documentary", "Biography", "Drama", "History"]),
    ("mystery", &["Mystery", "Crime", "Thriller", "Science Fiction"]),
    ("chill", &["Animation", "Family", "Comedy"]),
    ("dark", &["Crime", "Thriller", "Horror", "Mystery"]),
    ("epic", &["Adventure", "Action", "Fantasy", "War"]),
    ("funny", &["Comedy", "Family", "Animation"]),
    ("uplifting", &["Comedy", "Family", "Animation", "Music"]),
    ("tragic", &["Drama", "History", "War"]),
    ("adventurous", &["Adventure", "Action", "Fantasy"]),
    ("biographical", &["Biography", "Documentary", "Drama"]),
    ("historical", &["History", "War", "Drama"]),
    ("suspenseful", &["Thriller", "Mystery", "Crime"]),
    ("fantastical", &["Fantasy", "Science Fiction", "Adventure"]),
];

/// Canonical genre vocabulary recognised in queries
const GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Animation",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "History",
    "Horror",
    "Music",
    "Mystery",
    "Romance",
    "Science Fiction",
    "Thriller",
    "War",
    "Western",
    "Biography",
];

/// Language codes with the aliases a query may use for them
const LANGUAGE_ALIASES: &[(&str, &[&str])] = &[
    ("en", &["english", "hollywood"]),
    ("hi", &["hindi", "bollywood"]),
    ("te", &["telugu", "tollywood", "te"]),
    ("ta", &["tamil", "kollywood", "ta"]),
    ("ml", &["malayalam", "ml"]),
    ("kn", &["kannada", "kn"]),
];

/// Display names for language codes used in composed messages
const LANGUAGE_DISPLAY: &[(&str, &str)] = &[
    ("en", "English"),
    ("hi", "Hindi"),
    ("te", "Telugu"),
    ("ta", "Tamil"),
    ("ml", "Malayalam"),
    ("kn", "Kannada"),
    ("fr", "French"),
    ("es", "Spanish"),
    ("de", "German"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
    ("it", "Italian"),
    ("ru", "Russian"),
    ("bn", "Bengali"),
    ("mr", "Marathi"),
    ("pa", "Punjabi"),
    ("gu", "Gujarati"),
    ("ur", "Urdu"),
];

/// Ordered general-Q&A pattern groups. A `None` reply means the group only
/// marks recommendation phrasing and extraction should proceed.
const GENERAL_QA: &[(&[&str], Option<&str>)] = &[
    (
        &["who are you", "what are you", "your name", "who made you", "what is cinescope"],
        Some("I'm CineScope's movie assistant bot! I help you discover movies and answer your questions about our platform."),
    ),
    (
        &["how does this work", "how do i use", "how to use", "help", "what can you do"],
        Some("You can ask me for movie recommendations by genre, mood, language, or even by your favorite actor or director. Try asking: 'Recommend a happy comedy in Hindi' or 'Show me movies with Tom Hanks'."),
    ),
    (
        &["who is the founder", "who created", "who developed"],
        Some("CineScope was developed by a passionate team of movie lovers and developers."),
    ),
    (
        &["thank you", "thanks", "thx"],
        Some("You're welcome! Let me know if you need more movie suggestions."),
    ),
    (
        &["hello", "hi", "hey"],
        Some("Hello! How can I help you find your next favorite movie?"),
    ),
    (
        &["what is your favorite movie", "favorite movie"],
        Some("I love all movies equally, but I can help you find your favorite!"),
    ),
    (
        &["can you recommend", "suggest me", "find me", "show me"],
        None,
    ),
];

/// Whole-word phrase search. Short patterns like "hi" must not fire inside
/// words like "something", so both ends of a match have to sit on a
/// non-alphanumeric boundary.
fn contains_phrase(query: &str, phrase: &str) -> bool {
    let mut start = 0;
    while let Some(pos) = query[start..].find(phrase) {
        let begin = start + pos;
        let end = begin + phrase.len();
        let left_ok = query[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let right_ok = query[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if left_ok && right_ok {
            return true;
        }
        start = begin + 1;
        if start >= query.len() {
            break;
        }
    }
    false
}

/// Immutable lookup tables, constructed once and shared by every request
#[derive(Debug)]
pub struct Lookups {
    genre_moods: HashMap<String, Vec<String>>,
}

impl Default for Lookups {
    fn default() -> Self {
        Self::new()
    }
}

impl Lookups {
    pub fn new() -> Self {
        // Inverse genre -> moods lookup, in mood-table order
        let mut genre_moods: HashMap<String, Vec<String>> = HashMap::new();
        for (mood, genres) in MOOD_GENRES {
            for genre in *genres {
                genre_moods
                    .entry(genre.to_string())
                    .or_default()
                    .push(mood.to_string());
            }
        }
        Self { genre_moods }
    }

    /// Moods with their genre lists, in fixed table order
    pub fn moods(&self) -> impl Iterator<Item = (&'static str, &'static [&'static str])> {
        MOOD_GENRES.iter().map(|(mood, genres)| (*mood, *genres))
    }

    pub fn is_known_mood(&self, mood: &str) -> bool {
        MOOD_GENRES.iter().any(|(name, _)| *name == mood)
    }

    pub fn genres_for_mood(&self, mood: &str) -> Option<&'static [&'static str]> {
        MOOD_GENRES
            .iter()
            .find(|(name, _)| *name == mood)
            .map(|(_, genres)| *genres)
    }

    pub fn moods_for_genre(&self, genre: &str) -> &[String] {
        self.genre_moods.get(genre).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn genre_names(&self) -> &'static [&'static str] {
        GENRES
    }

    /// Language codes with their query aliases, in fixed table order
    pub fn languages(&self) -> impl Iterator<Item = (&'static str, &'static [&'static str])> {
        LANGUAGE_ALIASES.iter().map(|(code, aliases)| (*code, *aliases))
    }

    /// Human-readable name for a language code; capitalizes unknown codes
    pub fn display_language(&self, code: &str) -> String {
        LANGUAGE_DISPLAY
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, display)| display.to_string())
            .unwrap_or_else(|| {
                let mut chars = code.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
    }

    /// First matching general-Q&A group's canned reply, if any.
    ///
    /// Runs before all other extraction; a matching group with no reply
    /// defers to the recommendation flow, exactly like no match at all.
    pub fn general_reply(&self, query: &str) -> Option<&'static str> {
        for (patterns, reply) in GENERAL_QA {
            if patterns.iter().any(|p| contains_phrase(query, p)) {
                return *reply;
            }
        }
        None
    }
}

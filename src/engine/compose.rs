use rand::Rng;

use super::extract::Extraction;
use super::tables::Lookups;

const GREETINGS: &[&str] = &[
    "Here's something you might love!",
    "Check these out!",
    "I've picked these for you!",
    "Hope you find your next favorite movie!",
    "Enjoy these recommendations!",
    "Let me know if you want something different!",
];

/// Chooses the greeting index. Randomness only ever affects the greeting,
/// never the data, and is injected so composition is testable when seeded.
pub trait GreetingPicker: Send + Sync {
    fn pick(&self, choices: usize) -> usize;
}

/// Production picker backed by the thread-local RNG
pub struct RandomGreeting;

impl GreetingPicker for RandomGreeting {
    fn pick(&self, choices: usize) -> usize {
        rand::thread_rng().gen_range(0..choices)
    }
}

/// Always picks the same greeting; used by tests and deterministic setups
pub struct FixedGreeting(pub usize);

impl GreetingPicker for FixedGreeting {
    fn pick(&self, choices: usize) -> usize {
        self.0.min(choices.saturating_sub(1))
    }
}

/// Builds the conversational reply for a recommendation result.
///
/// Clause fragments follow the extraction in a fixed order: people, genres,
/// moods, languages. With no extracted signals the message falls back to a
/// personalized or generic popular-movies phrasing.
pub fn compose_message(
    extraction: &Extraction,
    personalized: bool,
    lookups: &Lookups,
    picker: &dyn GreetingPicker,
) -> String {
    let greeting = GREETINGS[picker.pick(GREETINGS.len())];

    let mut parts: Vec<String> = Vec::new();
    if !extraction.found_people.is_empty() {
        parts.push("movies with your favorite actors or directors".to_string());
    }
    if !extraction.found_genres.is_empty() {
        parts.push(format!("{} movies", extraction.found_genres.join(", ")));
    }
    if !extraction.detected_moods.is_empty() {
        parts.push(format!("for a {} mood", extraction.detected_moods.join(", ")));
    }
    if !extraction.found_languages.is_empty() {
        let display: Vec<String> = extraction
            .found_languages
            .iter()
            .map(|code| lookups.display_language(code))
            .collect();
        parts.push(format!("in {}", display.join(", ")));
    }

    if !parts.is_empty() {
        format!("{} Here are some {}!", greeting, parts.join(", "))
    } else if personalized {
        format!(
            "{} Based on your likes and similar users, you might enjoy these movies!",
            greeting
        )
    } else {
        format!("{} Here are some popular movies you might enjoy!", greeting)
    }
}

/// Message used when nothing matched even after filter relaxation
pub fn no_match_message() -> &'static str {
    "Sorry, I couldn't find any matches for your request. Here are some popular movies instead!"
}

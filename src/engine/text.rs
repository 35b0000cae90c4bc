//! Fuzzy string ratios on a 0-100 scale.
//!
//! Both ratios tolerate word reordering and partial overlap; both return 0
//! when either input carries no comparable text, so missing title/overview
//! fields contribute nothing to a similarity score.

use std::collections::BTreeSet;

fn tokens(input: &str) -> BTreeSet<String> {
    input
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn joined(tokens: &BTreeSet<String>) -> String {
    tokens.iter().cloned().collect::<Vec<_>>().join(" ")
}

fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b) * 100.0
}

/// Token-set similarity: compares the sorted shared tokens against each
/// side's full sorted token string and keeps the best of the three ratios.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a = tokens(a);
    let tokens_b = tokens(b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let shared: BTreeSet<String> = tokens_a.intersection(&tokens_b).cloned().collect();
    let only_a: BTreeSet<String> = tokens_a.difference(&tokens_b).cloned().collect();
    let only_b: BTreeSet<String> = tokens_b.difference(&tokens_a).cloned().collect();

    let base = joined(&shared);
    let with_a = [base.clone(), joined(&only_a)]
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    let with_b = [base.clone(), joined(&only_b)]
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");

    levenshtein_ratio(&base, &with_a)
        .max(levenshtein_ratio(&base, &with_b))
        .max(levenshtein_ratio(&with_a, &with_b))
}

/// Best-window similarity: slides the shorter string across the longer one
/// and keeps the best alignment. Symmetric in its arguments.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if shorter.is_empty() {
        return 0.0;
    }
    let needle: String = shorter.iter().collect();
    if shorter.len() == longer.len() {
        let haystack: String = longer.iter().collect();
        return levenshtein_ratio(&needle, &haystack);
    }

    let mut best: f64 = 0.0;
    for window in longer.windows(shorter.len()) {
        let segment: String = window.iter().collect();
        best = best.max(levenshtein_ratio(&needle, &segment));
        if best >= 100.0 {
            break;
        }
    }
    best
}

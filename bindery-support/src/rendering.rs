//! Text rendering utilities for human-friendly error messages.
//!
//! Provides helpers to format dependency chains and to suggest
//! close matches for misspelled abstract names.

/// Renders a dependency chain as a readable string.
///
/// # Examples
/// ```
/// use bindery_support::rendering::render_chain;
///
/// let chain = vec!["user.service", "user.repo", "db"];
/// assert_eq!(render_chain(&chain), "user.service -> user.repo -> db");
/// ```
pub fn render_chain(chain: &[impl AsRef<str>]) -> String {
    chain
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Generates "did you mean?" suggestions for an unknown abstract name.
///
/// Compares the requested name against the registered ones and returns
/// up to `max_suggestions` close matches, best first.
///
/// # Examples
/// ```
/// use bindery_support::rendering::suggest_similar;
///
/// let available = vec!["logger", "log.channel", "db"];
/// let hits = suggest_similar("loger", &available, 3);
/// assert_eq!(hits[0], "logger");
/// ```
pub fn suggest_similar(
    requested: &str,
    available: &[impl AsRef<str>],
    max_suggestions: usize,
) -> Vec<String> {
    let requested_lower = requested.to_lowercase();

    let mut scored: Vec<(&str, usize)> = available
        .iter()
        .map(|s| s.as_ref())
        .filter_map(|name| {
            let name_lower = name.to_lowercase();

            // Exact substring match (highest priority)
            if name_lower.contains(&requested_lower)
                || requested_lower.contains(&name_lower)
            {
                return Some((name, 100));
            }

            if close_match(&requested_lower, &name_lower) {
                return Some((name, 80));
            }

            // Common prefix
            let common = name_lower
                .chars()
                .zip(requested_lower.chars())
                .take_while(|(a, b)| a == b)
                .count();

            if common >= 3 {
                return Some((name, common * 10));
            }

            None
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Simple check if two strings are "close enough" (edit distance <= 2).
fn close_match(a: &str, b: &str) -> bool {
    if a.chars().count().abs_diff(b.chars().count()) > 2 {
        return false;
    }
    edit_distance(a, b) <= 2
}

/// Levenshtein distance over chars, single-row DP.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut current = Vec::with_capacity(b.len() + 1);
        current.push(i + 1);
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            let deletion = prev[j + 1] + 1;
            let insertion = current[j] + 1;
            current.push(substitution.min(deletion).min(insertion));
        }
        prev = current;
    }
    prev[b.len()]
}

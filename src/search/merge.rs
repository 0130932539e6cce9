use std::collections::HashSet;

use super::types::Candidate;

/// Union of the first `limit` titles from each edition, preserving each
/// list's order. A title present in both editions is attributed to the local
/// edition, which is listed first.
pub fn merge_candidates(
    local: &[String],
    local_lang: &str,
    cross: &[String],
    cross_lang: &str,
    limit: usize,
) -> Vec<Candidate> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut candidates = Vec::new();

    for (titles, lang) in [(local, local_lang), (cross, cross_lang)] {
        for title in titles.iter().take(limit) {
            if seen.insert(title) {
                candidates.push(Candidate {
                    title: title.clone(),
                    lang: lang.to_string(),
                });
            }
        }
    }

    candidates
}

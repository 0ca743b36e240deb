//! Fuzzy ranking of catalog search results.
//!
//! Search returns several plausible candidates for a track; this module
//! picks the one whose `"artist title"` string best matches the query, with
//! catalog popularity breaking exact-score ties (equal textual similarity
//! should prefer the more canonical release).

use strsim::normalized_levenshtein;

use super::domain::RemoteCandidate;

/// Partial similarity between two strings, 0-100, case-insensitive.
///
/// The shorter string is aligned against every contiguous same-length window
/// of the longer one; the best window's normalized Levenshtein similarity is
/// the score. A query that appears verbatim inside a longer candidate string
/// therefore scores 100.
pub fn partial_similarity(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if shorter.is_empty() {
        // Degenerate: an empty needle matches nothing meaningfully
        return if longer.is_empty() { 100 } else { 0 };
    }

    let needle: String = shorter.iter().collect();
    let mut best = 0.0f64;
    for window in longer.windows(shorter.len()) {
        let haystack: String = window.iter().collect();
        let sim = normalized_levenshtein(&needle, &haystack);
        if sim > best {
            best = sim;
        }
    }

    (best * 100.0).round() as u8
}

/// Pick the best candidate for `query`, or `None` when the list is empty.
///
/// The running best starts as "no best yet": the first candidate is accepted
/// unconditionally, so a first candidate with score 0 and popularity 0 still
/// wins over nothing. After that a candidate takes over on a strictly higher
/// score, or on an equal score with strictly higher popularity. Full ties
/// keep the earlier candidate.
pub fn best_match<'a>(candidates: &'a [RemoteCandidate], query: &str) -> Option<&'a RemoteCandidate> {
    let mut best: Option<(&RemoteCandidate, u8)> = None;

    for candidate in candidates {
        let target = format!("{} {}", candidate.artist_name, candidate.name);
        let score = partial_similarity(query, &target);

        let takes_over = match best {
            None => true,
            Some((incumbent, best_score)) => {
                score > best_score
                    || (score == best_score && candidate.popularity > incumbent.popularity)
            }
        };

        if takes_over {
            best = Some((candidate, score));
        }
    }

    best.map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(uri: &str, artist: &str, name: &str, popularity: u32) -> RemoteCandidate {
        RemoteCandidate {
            uri: uri.to_string(),
            name: name.to_string(),
            artist_name: artist.to_string(),
            popularity,
        }
    }

    #[test]
    fn test_similarity_exact_match() {
        assert_eq!(partial_similarity("yesterday", "yesterday"), 100);
    }

    #[test]
    fn test_similarity_is_case_insensitive() {
        assert_eq!(partial_similarity("YESTERDAY", "yesterday"), 100);
    }

    #[test]
    fn test_similarity_substring_scores_full() {
        // The query appears verbatim inside the longer candidate string
        assert_eq!(
            partial_similarity("The Beatles Yesterday", "The Beatles Yesterday - Remastered 2009"),
            100
        );
    }

    #[test]
    fn test_similarity_disjoint_strings_score_low() {
        assert!(partial_similarity("abcdefgh", "zzzzzzzz") < 30);
    }

    #[test]
    fn test_similarity_empty_needle() {
        assert_eq!(partial_similarity("", "anything"), 0);
        assert_eq!(partial_similarity("", ""), 100);
    }

    #[test]
    fn test_best_match_empty_list() {
        assert!(best_match(&[], "The Beatles Yesterday").is_none());
    }

    #[test]
    fn test_best_match_prefers_textual_similarity() {
        let candidates = vec![
            candidate("u1", "Beatles Tribute Band", "Yesterdaze", 95),
            candidate("u2", "The Beatles", "Yesterday", 10),
        ];
        let best = best_match(&candidates, "The Beatles Yesterday").unwrap();
        assert_eq!(best.uri, "u2");
    }

    #[test]
    fn test_best_match_popularity_breaks_ties() {
        // Identical artist/name strings, so identical scores
        let candidates = vec![
            candidate("album", "The Beatles", "Yesterday", 40),
            candidate("compilation", "The Beatles", "Yesterday", 80),
        ];
        let best = best_match(&candidates, "The Beatles Yesterday").unwrap();
        assert_eq!(best.uri, "compilation");
    }

    #[test]
    fn test_best_match_full_tie_keeps_earlier() {
        let candidates = vec![
            candidate("first", "The Beatles", "Yesterday", 50),
            candidate("second", "The Beatles", "Yesterday", 50),
        ];
        let best = best_match(&candidates, "The Beatles Yesterday").unwrap();
        assert_eq!(best.uri, "first");
    }

    #[test]
    fn test_best_match_accepts_zero_score_zero_popularity() {
        // A lone candidate with nothing going for it still beats the sentinel
        let candidates = vec![candidate("u1", "zzzz", "zzzz", 0)];
        assert!(best_match(&candidates, "abcdefgh ijklmnop").is_some());
    }

    /// Property-based tests using proptest
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_candidate() -> impl Strategy<Value = RemoteCandidate> {
            ("[a-z0-9]{1,12}", "[a-zA-Z ]{1,20}", "[a-zA-Z ]{1,20}", 0u32..=100).prop_map(
                |(uri, artist, name, popularity)| RemoteCandidate {
                    uri,
                    name,
                    artist_name: artist,
                    popularity,
                },
            )
        }

        proptest! {
            /// best_match returns none iff the candidate list is empty
            #[test]
            fn none_iff_empty(
                candidates in prop::collection::vec(arb_candidate(), 0..8),
                query in "[a-zA-Z ]{0,30}",
            ) {
                let result = best_match(&candidates, &query);
                prop_assert_eq!(result.is_none(), candidates.is_empty());
            }

            /// Scores stay within 0..=100
            #[test]
            fn similarity_is_bounded(a in ".{0,40}", b in ".{0,40}") {
                prop_assert!(partial_similarity(&a, &b) <= 100);
            }

            /// Similarity is symmetric in its arguments
            #[test]
            fn similarity_is_symmetric(a in ".{0,30}", b in ".{0,30}") {
                prop_assert_eq!(partial_similarity(&a, &b), partial_similarity(&b, &a));
            }
        }
    }
}

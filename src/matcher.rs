//! Fuzzy ranking of repository names

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32String};

/// Ranks candidates against a query.
///
/// Fuzzy mode matches the query characters in order with gaps; exact mode
/// requires each whitespace-separated query word as a substring. Candidates
/// that don't match are left out, and equal scores keep the order the
/// candidates were added in.
pub struct FuzzyMatcher {
    pattern: Pattern,
    matcher: Matcher,
    candidates: Vec<String>,
}

impl FuzzyMatcher {
    pub fn new(query: &str, exact: bool) -> Self {
        let kind = if exact {
            AtomKind::Substring
        } else {
            AtomKind::Fuzzy
        };
        Self {
            pattern: Pattern::new(query, CaseMatching::Smart, Normalization::Smart, kind),
            matcher: Matcher::new(Config::DEFAULT.match_paths()),
            candidates: Vec::new(),
        }
    }

    /// Best match first.
    pub fn ranked(&mut self) -> Vec<String> {
        let mut scored: Vec<(u32, &String)> = Vec::with_capacity(self.candidates.len());
        for candidate in &self.candidates {
            let haystack = Utf32String::from(candidate.as_str());
            if let Some(score) = self.pattern.score(haystack.slice(..), &mut self.matcher) {
                scored.push((score, candidate));
            }
        }

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored
            .into_iter()
            .map(|(_, candidate)| candidate.clone())
            .collect()
    }
}

impl Extend<String> for FuzzyMatcher {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.candidates.extend(iter);
    }
}

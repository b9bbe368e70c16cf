//! Approximate substring matching.
//!
//! The matcher computes, for a query pattern and a field, the smallest
//! optimal string alignment distance between the pattern and *any*
//! substring of the field. Insertions, deletions, substitutions and swaps of
//! two adjacent characters each cost one edit. Leading and trailing field
//! text is free, which is what makes the match location irrelevant.
//!
//! A field matches when `errors / pattern_len <= threshold`.
//!
//! # Example
//!
//! ```
//! use storyshelf_search::FuzzyMatcher;
//!
//! let matcher = FuzzyMatcher::new(0.3);
//! let pattern = matcher.pattern("stroy").unwrap();
//!
//! // One adjacent swap in five characters: 0.2
//! assert_eq!(matcher.score_str(&pattern, "A short story"), Some(0.2));
//! assert_eq!(matcher.score_str(&pattern, "Rebase tutorial"), None);
//! ```

/// Fold text for case-insensitive comparison.
pub fn fold(text: &str) -> Vec<char> {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// A prepared, case-folded query pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    chars: Vec<char>,
    max_errors: usize,
}

impl Pattern {
    /// Number of characters in the folded pattern.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false; empty patterns are never constructed.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Maximum number of edits a matching field may need.
    pub fn max_errors(&self) -> usize {
        self.max_errors
    }
}

/// Threshold-bounded approximate substring matcher.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FuzzyMatcher {
    threshold: f64,
}

impl FuzzyMatcher {
    /// Create a matcher. The threshold is clamped to `[0.0, 1.0]`.
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_nan() {
            0.0
        } else {
            threshold.clamp(0.0, 1.0)
        };
        Self { threshold }
    }

    /// The effective threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Prepare a pattern. Returns `None` for an empty query.
    ///
    /// The query is used as given; callers decide whether to trim.
    pub fn pattern(&self, query: &str) -> Option<Pattern> {
        let chars = fold(query);
        if chars.is_empty() {
            return None;
        }
        // Small epsilon so that e.g. 0.3 * 10 does not land on 2.999...
        let max_errors = (self.threshold * chars.len() as f64 + 1e-9).floor() as usize;
        Some(Pattern { chars, max_errors })
    }

    /// Score a pattern against already-folded field text.
    ///
    /// Returns `Some(errors / pattern_len)` if the field matches, `None`
    /// otherwise.
    pub fn score(&self, pattern: &Pattern, text: &[char]) -> Option<f64> {
        let errors = substring_distance(&pattern.chars, text, pattern.max_errors)?;
        Some(errors as f64 / pattern.chars.len() as f64)
    }

    /// Convenience wrapper that folds `text` first.
    pub fn score_str(&self, pattern: &Pattern, text: &str) -> Option<f64> {
        self.score(pattern, &fold(text))
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_THRESHOLD)
    }
}

/// Smallest OSA distance between `pattern` and any substring of `text`,
/// or `None` if it exceeds `max_errors`.
///
/// Column-wise dynamic programming over the text with three rolling
/// columns (the third one feeds the transposition case).
fn substring_distance(pattern: &[char], text: &[char], max_errors: usize) -> Option<usize> {
    let m = pattern.len();
    if m == 0 {
        return Some(0);
    }
    if text.len() >= m && text.windows(m).any(|w| w == pattern) {
        return Some(0);
    }

    // d[i][0] = i: matching i pattern chars against nothing.
    let mut before_prev: Vec<usize> = (0..=m).collect();
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut cur: Vec<usize> = vec![0; m + 1];
    let mut best = m;

    for j in 1..=text.len() {
        // d[0][j] = 0: the match may start anywhere in the text.
        cur[0] = 0;
        for i in 1..=m {
            let substitution = prev[i - 1] + usize::from(pattern[i - 1] != text[j - 1]);
            let skip_text = prev[i] + 1;
            let skip_pattern = cur[i - 1] + 1;
            let mut value = substitution.min(skip_text).min(skip_pattern);
            if i > 1
                && j > 1
                && pattern[i - 1] == text[j - 2]
                && pattern[i - 2] == text[j - 1]
            {
                value = value.min(before_prev[i - 2] + 1);
            }
            cur[i] = value;
        }
        best = best.min(cur[m]);
        if best == 0 {
            break;
        }
        std::mem::swap(&mut before_prev, &mut prev);
        std::mem::swap(&mut prev, &mut cur);
    }

    (best <= max_errors).then_some(best)
}

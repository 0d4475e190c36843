//! Lexical Similarity Scoring
//!
//! Single scoring scale for the whole pipeline: integer scores in 0..=100,
//! one acceptance cutoff. The scorer is a capability injected into the
//! resolver so alternative metrics (or pinned test doubles) can be swapped
//! in without touching resolution logic.

/// Top of the similarity scale
pub const MAX_SCORE: u32 = 100;

/// Default acceptance cutoff for fuzzy matching
pub const DEFAULT_THRESHOLD: u32 = 80;

/// Scoring capability consulted during fuzzy resolution
pub trait SimilarityScorer {
    /// Score how alike two strings are, from 0 (disjoint) to 100 (equal)
    fn score(&self, a: &str, b: &str) -> u32;
}

/// Default scorer: edit-distance ratio over characters
///
/// `100 * (max_len - levenshtein(a, b)) / max_len`, with two empty strings
/// scoring 100.
#[derive(Debug, Default, Clone, Copy)]
pub struct EditDistanceScorer;

impl SimilarityScorer for EditDistanceScorer {
    fn score(&self, a: &str, b: &str) -> u32 {
        let longest = a.chars().count().max(b.chars().count());
        if longest == 0 {
            return MAX_SCORE;
        }
        let distance = levenshtein(a, b);
        (MAX_SCORE as usize * (longest - distance) / longest) as u32
    }
}

/// Pick the candidate closest to `query`, at or above `threshold`
///
/// Candidates must arrive in a deterministic order; a later candidate only
/// replaces the current best on a strictly higher score, so ties resolve to
/// the earliest candidate.
pub fn best_match<'a, I, S>(
    scorer: &S,
    query: &str,
    candidates: I,
    threshold: u32,
) -> Option<(&'a str, u32)>
where
    I: IntoIterator<Item = &'a str>,
    S: SimilarityScorer + ?Sized,
{
    let mut best: Option<(&'a str, u32)> = None;
    for candidate in candidates {
        let score = scorer.score(query, candidate);
        if score < threshold {
            continue;
        }
        match best {
            Some((_, held)) if held >= score => {}
            _ => best = Some((candidate, score)),
        }
    }
    best
}

/// Levenshtein distance with the two-row dynamic program
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

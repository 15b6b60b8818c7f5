//! Delimiter guessing from a sample line

use crate::common::{Error, Result};

/// Picks the candidate that occurs most often in `sample`.
///
/// Counting is a plain character count and ignores quoting. Ties, including
/// the all-zero case, go to the candidate listed first, so the result depends
/// on candidate order. Fails only when `candidates` is empty.
pub fn guess(sample: &str, candidates: &[char]) -> Result<char> {
    let mut best: Option<(char, usize)> = None;

    for &candidate in candidates {
        let count = sample.chars().filter(|&c| c == candidate).count();
        match best {
            Some((_, best_count)) if count <= best_count => {},
            _ => best = Some((candidate, count)),
        }
    }

    best.map(|(c, _)| c)
        .ok_or_else(|| Error::config("cannot guess a delimiter from an empty candidate set"))
}

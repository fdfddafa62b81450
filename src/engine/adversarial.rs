//! Adversarial candidate partitioning
//!
//! The adversarial engine never commits to an answer. Instead, every guess
//! partitions the surviving candidates by the feedback each would produce,
//! and the engine keeps whichever group is largest - the reply that leaves
//! the guesser with the least information.
//!
//! Tie-break: when two groups have equal size, the group whose feedback was
//! first produced while scanning candidates in canonical word-set order wins.
//! This makes every adversarial game fully reproducible.

use crate::core::{Feedback, Word};
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Partition candidates by the feedback they would produce for `guess`
///
/// Returns `(feedback, group)` pairs ordered by first appearance of each
/// feedback in the candidate scan. Scoring is parallelized; the
/// order-preserving collect keeps grouping deterministic.
///
/// # Examples
/// ```
/// use worduel::core::Word;
/// use worduel::engine::adversarial::partition;
///
/// let guess = Word::new("crane").unwrap();
/// let candidates = vec![
///     Word::new("slate").unwrap(),
///     Word::new("irate").unwrap(),
///     Word::new("grate").unwrap(),
/// ];
///
/// let groups = partition(&guess, &candidates);
/// // irate and grate answer crane identically, slate does not
/// assert_eq!(groups.len(), 2);
/// ```
#[must_use]
pub fn partition(guess: &Word, candidates: &[Word]) -> Vec<(Feedback, Vec<Word>)> {
    let feedbacks: Vec<Feedback> = candidates
        .par_iter()
        .map(|candidate| Feedback::score(guess, candidate))
        .collect();

    let mut groups: Vec<(Feedback, Vec<Word>)> = Vec::new();
    let mut positions: FxHashMap<u8, usize> = FxHashMap::default();

    for (candidate, feedback) in candidates.iter().zip(feedbacks) {
        if let Some(&i) = positions.get(&feedback.key()) {
            groups[i].1.push(candidate.clone());
        } else {
            positions.insert(feedback.key(), groups.len());
            groups.push((feedback, vec![candidate.clone()]));
        }
    }

    groups
}

/// Select the largest group, breaking ties in favor of the earliest group
///
/// # Panics
/// Panics if `groups` is empty. Partitioning a non-empty candidate set always
/// yields at least one group, so an empty input is an internal logic error,
/// not a recoverable condition.
#[must_use]
pub fn largest_group(groups: Vec<(Feedback, Vec<Word>)>) -> (Feedback, Vec<Word>) {
    assert!(
        !groups.is_empty(),
        "cannot select a group from an empty partition"
    );

    let mut iter = groups.into_iter();
    let mut best = iter.next().expect("asserted non-empty above");
    for group in iter {
        // Strict comparison keeps the first-encountered group on ties
        if group.1.len() > best.1.len() {
            best = group;
        }
    }
    best
}

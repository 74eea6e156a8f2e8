//! Entropy-based ranking of next guesses.
//!
//! A guess is worth as much as the information its feedback is expected to
//! reveal: the entropy of the distribution of feedback patterns it produces
//! across the words still in play. Higher entropy means fewer expected
//! remaining candidates.

use crate::feedback::FeedbackPattern;
use fxhash::FxHashMap as HashMap;
use rayon::prelude::*;
use std::cmp::Ordering;

/// Result of analyzing a potential guess
#[derive(Debug, Clone, PartialEq)]
pub struct GuessAnalysis {
    pub word: String,
    pub entropy: f64,
    pub expected_remaining: f64,
    pub is_possible_answer: bool,
}

/// Entropy, in bits, of the feedback `guess` produces over `candidates`.
pub fn entropy_for_word(guess: &str, candidates: &[String]) -> f64 {
    let n = candidates.len() as f64;
    if n <= 1.0 {
        return 0.0;
    }

    let mut pattern_counts: HashMap<FeedbackPattern, u32> = HashMap::default();
    for answer in candidates {
        *pattern_counts
            .entry(FeedbackPattern::generate(answer, guess))
            .or_default() += 1;
    }

    pattern_counts
        .values()
        .map(|&count| {
            let p = count as f64 / n;
            -p * p.log2()
        })
        .sum()
}

/// The `n` guesses from `guesses` with the highest entropy over
/// `candidates`, best first. Ties go to guesses that could be the answer.
///
/// With two candidates or fewer no guess can beat naming a candidate, so the
/// single entry returned is the first candidate.
pub fn rank_guesses(guesses: &[String], candidates: &[String], n: usize) -> Vec<GuessAnalysis> {
    if candidates.is_empty() || n == 0 {
        return vec![];
    }

    if candidates.len() <= 2 {
        return vec![GuessAnalysis {
            word: candidates[0].clone(),
            entropy: (candidates.len() - 1) as f64,
            expected_remaining: 1.0,
            is_possible_answer: true,
        }];
    }

    let mut analyses: Vec<GuessAnalysis> = guesses
        .par_iter()
        .map(|word| {
            let entropy = entropy_for_word(word, candidates);
            GuessAnalysis {
                word: word.clone(),
                entropy,
                expected_remaining: candidates.len() as f64 / 2_f64.powf(entropy),
                is_possible_answer: candidates.contains(word),
            }
        })
        .collect();

    analyses.sort_by(|a, b| match b.entropy.partial_cmp(&a.entropy) {
        Some(Ordering::Equal) => b
            .is_possible_answer
            .cmp(&a.is_possible_answer)
            .then_with(|| a.word.cmp(&b.word)),
        Some(ord) => ord,
        None => Ordering::Equal,
    });

    analyses.truncate(n);
    analyses
}

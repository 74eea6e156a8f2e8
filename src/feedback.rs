//! Feedback calculation for guesses.
//!
//! This module handles computing the feedback pattern (exact match, present
//! elsewhere, absent) for a guess against a hidden reference word.

use crate::alphabet::{self, SYMBOL_SLOTS};
use thiserror::Error;

/// Represents the feedback for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Correct letter in correct position (green, `+`)
    Correct,
    /// Letter occurs elsewhere in the reference (yellow, `|`)
    Present,
    /// No unmatched occurrence left in the reference (gray, `/`)
    Absent,
}

impl Feedback {
    /// Canonical one-character rendering.
    pub fn to_char(self) -> char {
        match self {
            Feedback::Correct => '+',
            Feedback::Present => '|',
            Feedback::Absent => '/',
        }
    }

    pub fn to_emoji(self) -> char {
        match self {
            Feedback::Correct => '🟩',
            Feedback::Present => '🟨',
            Feedback::Absent => '⬛',
        }
    }

    /// Parse from a character (`+|/`, g=green, y=yellow, b=black/gray, or 2/1/0)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            '+' | 'g' | '2' => Some(Feedback::Correct),
            '|' | 'y' | '1' => Some(Feedback::Present),
            '/' | 'b' | 'x' | '0' => Some(Feedback::Absent),
            _ => None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid feedback character {found:?} at position {position}")]
    InvalidChar { position: usize, found: char },
    #[error("feedback has length {found}, expected {expected}")]
    Length { expected: usize, found: usize },
}

/// The feedback for a whole guess, one entry per position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FeedbackPattern(Vec<Feedback>);

impl FeedbackPattern {
    pub fn new(feedbacks: Vec<Feedback>) -> Self {
        Self(feedbacks)
    }

    /// Calculate the feedback for `guess` against the hidden `reference`.
    ///
    /// Exact matches are settled first and removed from the pool of
    /// reference symbols; the remaining positions are then resolved left to
    /// right, so earlier duplicates of a symbol claim the leftover
    /// occurrences before later ones do. Only the common prefix of the two
    /// words is compared.
    pub fn generate(reference: &str, guess: &str) -> Self {
        let reference = reference.as_bytes();
        let guess = guess.as_bytes();
        let len = reference.len().min(guess.len());

        let mut feedback: Vec<Option<Feedback>> = vec![None; len];
        let mut unmatched = [0usize; SYMBOL_SLOTS];

        for i in 0..len {
            let idx = alphabet::index(reference[i]);
            unmatched[idx] += 1;
            if reference[i] == guess[i] {
                feedback[i] = Some(Feedback::Correct);
                unmatched[idx] -= 1;
            }
        }

        let resolved = feedback
            .into_iter()
            .zip(guess)
            .map(|(fb, &g)| {
                fb.unwrap_or_else(|| {
                    let idx = alphabet::index(g);
                    if unmatched[idx] > 0 {
                        unmatched[idx] -= 1;
                        Feedback::Present
                    } else {
                        Feedback::Absent
                    }
                })
            })
            .collect();

        Self(resolved)
    }

    /// Parse a pattern like `+|//+`, `gybbg` or `21002`.
    pub fn parse(s: &str, expected_len: usize) -> Result<Self, ParseError> {
        let feedbacks = s
            .chars()
            .enumerate()
            .map(|(position, c)| {
                Feedback::from_char(c).ok_or(ParseError::InvalidChar { position, found: c })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if feedbacks.len() != expected_len {
            return Err(ParseError::Length {
                expected: expected_len,
                found: feedbacks.len(),
            });
        }
        Ok(Self(feedbacks))
    }

    pub fn as_slice(&self) -> &[Feedback] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if this pattern represents a win (all correct)
    pub fn is_win(&self) -> bool {
        self.0.iter().all(|&f| f == Feedback::Correct)
    }

    /// Display as emoji string
    pub fn to_emoji_string(&self) -> String {
        self.0.iter().map(|f| f.to_emoji()).collect()
    }
}

impl FromIterator<Feedback> for FeedbackPattern {
    fn from_iter<T: IntoIterator<Item = Feedback>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for FeedbackPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: String = self.0.iter().map(|fb| fb.to_char()).collect();
        write!(f, "{}", rendered)
    }
}

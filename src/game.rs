//! One game against a shared dictionary.
//!
//! A [`Game`] borrows its [`Dictionary`] mutably for as long as it lives:
//! pruning writes epoch stamps into the shared trie, and only one game at a
//! time may do that.

use crate::analysis::{self, GuessAnalysis};
use crate::dictionary::{Dictionary, DictionaryError};
use crate::feedback::FeedbackPattern;
use crate::hints::{Hints, HintsError};
use crate::prune;
use crate::trie::{Epoch, Words};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum GameError {
    #[error("reference {0:?} is not in the dictionary")]
    UnknownReference(String),
    #[error(transparent)]
    Word(#[from] DictionaryError),
    #[error(transparent)]
    Hints(#[from] HintsError),
    #[error("the game is already over")]
    Over,
}

/// What happened to one guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The guess is not a dictionary word; no attempt was used.
    NotInDictionary,
    Solved { attempts: usize },
    Feedback {
        pattern: FeedbackPattern,
        remaining: usize,
    },
    /// The last attempt was used without finding the reference.
    Lost {
        pattern: FeedbackPattern,
        remaining: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug)]
pub struct Game<'d> {
    dictionary: &'d mut Dictionary,
    epoch: Epoch,
    reference: String,
    hints: Hints,
    history: Vec<(String, FeedbackPattern)>,
    remaining: usize,
    status: Status,
    hard_mode: bool,
}

impl<'d> Game<'d> {
    pub(crate) fn new(dictionary: &'d mut Dictionary, epoch: Epoch, reference: String) -> Self {
        let hints = Hints::new(dictionary.word_len());
        let remaining = dictionary.len();
        Self {
            dictionary,
            epoch,
            reference,
            hints,
            history: Vec::new(),
            remaining,
            status: Status::InProgress,
            hard_mode: false,
        }
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn hints(&self) -> &Hints {
        &self.hints
    }

    pub fn history(&self) -> &[(String, FeedbackPattern)] {
        &self.history
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn guesses_left(&self) -> usize {
        self.dictionary
            .config()
            .max_guesses
            .saturating_sub(self.history.len())
    }

    /// Words still compatible, as of the last fold.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn set_hard_mode(&mut self, enabled: bool) {
        self.hard_mode = enabled;
    }

    pub fn is_hard_mode(&self) -> bool {
        self.hard_mode
    }

    /// Play one attempt against the hidden reference.
    pub fn guess(&mut self, word: &str) -> Result<GuessOutcome, GameError> {
        if self.status != Status::InProgress {
            return Err(GameError::Over);
        }
        self.dictionary.validate(word)?;
        if !self.dictionary.contains(word) {
            return Ok(GuessOutcome::NotInDictionary);
        }

        let pattern = FeedbackPattern::generate(&self.reference, word);
        self.record(word, pattern)
    }

    /// Fold feedback obtained elsewhere and prune the dictionary with it.
    /// The attempt counts against the game like any other guess. Returns the
    /// number of words still compatible.
    pub fn apply_feedback(
        &mut self,
        guess: &str,
        pattern: FeedbackPattern,
    ) -> Result<usize, GameError> {
        if self.status != Status::InProgress {
            return Err(GameError::Over);
        }
        self.dictionary.validate(guess)?;
        self.record(guess, pattern)?;
        Ok(self.remaining)
    }

    /// Spend one attempt: fold, prune and settle the game status.
    fn record(
        &mut self,
        word: &str,
        pattern: FeedbackPattern,
    ) -> Result<GuessOutcome, GameError> {
        self.hints.fold(word, &pattern)?;
        self.remaining = prune::update_filter(self.dictionary.trie_mut(), &self.hints, self.epoch);
        debug!(
            epoch = %self.epoch,
            guess = word,
            feedback = %pattern,
            remaining = self.remaining,
            "applied feedback"
        );
        self.history.push((word.to_owned(), pattern.clone()));

        let remaining = self.remaining;
        if pattern.is_win() {
            self.status = Status::Won;
            info!(epoch = %self.epoch, attempts = self.history.len(), "game won");
            return Ok(GuessOutcome::Solved {
                attempts: self.history.len(),
            });
        }
        if self.guesses_left() == 0 {
            self.status = Status::Lost;
            info!(epoch = %self.epoch, remaining, "game lost");
            return Ok(GuessOutcome::Lost { pattern, remaining });
        }
        Ok(GuessOutcome::Feedback { pattern, remaining })
    }

    /// Add a word to the shared dictionary mid-game. It shows up among this
    /// game's candidates only if it agrees with everything learned so far.
    pub fn insert(&mut self, word: &str) -> Result<bool, GameError> {
        let compatible = self.hints.compatible(word);
        let epoch = if compatible {
            Epoch::UNFILTERED
        } else {
            self.epoch
        };
        let fresh = self.dictionary.insert_with(word, epoch)?;
        if fresh && compatible {
            self.remaining += 1;
        }
        Ok(fresh)
    }

    /// The words still compatible, in alphabet order.
    pub fn candidates(&self) -> Words<'_> {
        self.dictionary.trie().enumerate(self.epoch)
    }

    /// Rank the `n` most informative next guesses. In hard mode only the
    /// remaining candidates are considered.
    pub fn suggest(&self, n: usize) -> Vec<GuessAnalysis> {
        let candidates: Vec<String> = self.candidates().collect();
        if self.hard_mode {
            analysis::rank_guesses(&candidates, &candidates, n)
        } else {
            let guesses: Vec<String> = self.dictionary.words().collect();
            analysis::rank_guesses(&guesses, &candidates, n)
        }
    }
}

//! Everything a game has learned about its hidden word.
//!
//! Per position the set keeps either a forced symbol or the set of symbols
//! still allowed there. Per symbol it keeps an occurrence requirement, a
//! lower bound until an absent feedback pins it to an exact count.

use crate::alphabet::{self, Symbol, SymbolSet, SYMBOL_SLOTS};
use crate::feedback::{Feedback, FeedbackPattern};
use thiserror::Error;
use tracing::trace;

/// How often a symbol must occur in a compatible word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occurrence {
    AtLeast(usize),
    Exactly(usize),
}

impl Occurrence {
    pub fn admits(self, count: usize) -> bool {
        match self {
            Occurrence::AtLeast(n) => count >= n,
            Occurrence::Exactly(n) => count == n,
        }
    }

    /// Whether `count` can still grow into an admissible value.
    pub fn has_room_for(self, count: usize) -> bool {
        match self {
            Occurrence::AtLeast(_) => true,
            Occurrence::Exactly(n) => count <= n,
        }
    }

    pub fn minimum(self) -> usize {
        match self {
            Occurrence::AtLeast(n) | Occurrence::Exactly(n) => n,
        }
    }
}

impl Default for Occurrence {
    fn default() -> Self {
        Occurrence::AtLeast(0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HintsError {
    #[error("guess has length {guess} and feedback {feedback}, expected {expected}")]
    Length {
        expected: usize,
        guess: usize,
        feedback: usize,
    },
    #[error("position {position} is already known to hold {known:?}, not {claimed:?}")]
    ForcedConflict {
        position: usize,
        known: char,
        claimed: char,
    },
    #[error("{symbol:?} is already known to occur exactly {known} times, not {claimed}")]
    CountConflict {
        symbol: char,
        known: usize,
        claimed: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hints {
    forced: Vec<Option<Symbol>>,
    allowed: Vec<SymbolSet>,
    occurrences: [Occurrence; SYMBOL_SLOTS],
}

impl Hints {
    pub fn new(len: usize) -> Self {
        Self {
            forced: vec![None; len],
            allowed: vec![SymbolSet::ALL; len],
            occurrences: [Occurrence::default(); SYMBOL_SLOTS],
        }
    }

    /// Forget everything and resize for words of length `len`.
    pub fn reset(&mut self, len: usize) {
        self.forced.clear();
        self.forced.resize(len, None);
        self.allowed.clear();
        self.allowed.resize(len, SymbolSet::ALL);
        self.occurrences = [Occurrence::default(); SYMBOL_SLOTS];
    }

    pub fn word_len(&self) -> usize {
        self.forced.len()
    }

    pub fn forced(&self, position: usize) -> Option<Symbol> {
        self.forced[position]
    }

    pub fn allowed(&self, position: usize) -> SymbolSet {
        match self.forced[position] {
            Some(symbol) => SymbolSet::only(symbol),
            None => self.allowed[position],
        }
    }

    pub fn occurrence(&self, symbol: Symbol) -> Occurrence {
        self.occurrences[symbol.index()]
    }

    /// Whether `symbol` may stand at `position`. Out-of-range positions and
    /// symbols outside the alphabet are never permitted.
    pub fn permits(&self, position: usize, symbol: Symbol) -> bool {
        if !symbol.is_valid() {
            return false;
        }
        match self.forced.get(position) {
            Some(Some(forced)) => *forced == symbol,
            Some(None) => self.allowed[position].contains(symbol),
            None => false,
        }
    }

    /// Requirements indexed by alphabet slot, including the invalid one.
    pub(crate) fn occurrences(&self) -> &[Occurrence; SYMBOL_SLOTS] {
        &self.occurrences
    }

    /// Fold one guess and its feedback into the set.
    ///
    /// The fold is checked before anything changes; a rejected fold leaves
    /// the set as it was.
    pub fn fold(&mut self, guess: &str, feedback: &FeedbackPattern) -> Result<(), HintsError> {
        let guess = guess.as_bytes();
        let feedback = feedback.as_slice();
        if guess.len() != self.word_len() || feedback.len() != self.word_len() {
            return Err(HintsError::Length {
                expected: self.word_len(),
                guess: guess.len(),
                feedback: feedback.len(),
            });
        }

        let mut total = [0usize; SYMBOL_SLOTS];
        for (&b, &fb) in guess.iter().zip(feedback) {
            if fb != Feedback::Absent {
                total[alphabet::index(b)] += 1;
            }
        }

        self.check_fold(guess, feedback, &total)?;

        let mut running = [0usize; SYMBOL_SLOTS];
        for (position, (&b, &fb)) in guess.iter().zip(feedback).enumerate() {
            let symbol = Symbol::from_byte(b);
            let idx = symbol.index();
            match fb {
                Feedback::Correct => {
                    self.forced[position] = Some(symbol);
                    running[idx] += 1;
                    self.raise_lower_bound(idx, running[idx]);
                }
                Feedback::Present => {
                    self.allowed[position].remove(symbol);
                    running[idx] += 1;
                    self.raise_lower_bound(idx, running[idx]);
                }
                Feedback::Absent => {
                    self.allowed[position].remove(symbol);
                    self.occurrences[idx] = Occurrence::Exactly(total[idx]);
                }
            }
        }

        trace!(guess = %String::from_utf8_lossy(guess), "folded feedback");
        Ok(())
    }

    fn raise_lower_bound(&mut self, idx: usize, count: usize) {
        if let Occurrence::AtLeast(n) = self.occurrences[idx] {
            if count > n {
                self.occurrences[idx] = Occurrence::AtLeast(count);
            }
        }
    }

    fn check_fold(
        &self,
        guess: &[u8],
        feedback: &[Feedback],
        total: &[usize; SYMBOL_SLOTS],
    ) -> Result<(), HintsError> {
        let display = |b: u8| b as char;
        for (position, (&b, &fb)) in guess.iter().zip(feedback).enumerate() {
            let symbol = Symbol::from_byte(b);
            let idx = symbol.index();
            match (fb, self.forced[position]) {
                (Feedback::Correct, Some(known)) if known != symbol => {
                    return Err(HintsError::ForcedConflict {
                        position,
                        known: known.to_byte().map_or('?', display),
                        claimed: display(b),
                    });
                }
                _ => {}
            }

            let claimed = if fb == Feedback::Absent {
                Occurrence::Exactly(total[idx])
            } else {
                Occurrence::AtLeast(total[idx])
            };
            match (self.occurrences[idx], claimed) {
                (Occurrence::Exactly(known), Occurrence::Exactly(n)) if known != n => {
                    return Err(HintsError::CountConflict {
                        symbol: display(b),
                        known,
                        claimed: n,
                    });
                }
                (Occurrence::Exactly(known), Occurrence::AtLeast(n)) if n > known => {
                    return Err(HintsError::CountConflict {
                        symbol: display(b),
                        known,
                        claimed: n,
                    });
                }
                (Occurrence::AtLeast(known), Occurrence::Exactly(n)) if n < known => {
                    return Err(HintsError::CountConflict {
                        symbol: display(b),
                        known,
                        claimed: n,
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Whether `word` satisfies every positional and occurrence constraint.
    pub fn compatible(&self, word: &str) -> bool {
        let word = word.as_bytes();
        if word.len() != self.word_len() {
            return false;
        }

        let mut counts = [0usize; SYMBOL_SLOTS];
        for (position, &b) in word.iter().enumerate() {
            let symbol = Symbol::from_byte(b);
            if !self.permits(position, symbol) {
                return false;
            }
            counts[symbol.index()] += 1;
        }

        self.occurrences
            .iter()
            .zip(&counts)
            .all(|(req, &count)| req.admits(count))
    }
}

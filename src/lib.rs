//! # Wordtrie
//!
//! A Wordle-style deduction engine over a compressed-trie dictionary.
//!
//! One [`Trie`] is shared by any number of games played one after another.
//! Each game folds the feedback it receives into its [`Hints`] and prunes the
//! trie with them; pruning never deletes nodes, it stamps them with the
//! game's [`Epoch`], so the next game starts from the full dictionary without
//! a rebuild.

pub mod alphabet;
pub mod analysis;
pub mod arena;
pub mod config;
pub mod dictionary;
pub mod feedback;
pub mod game;
pub mod hints;
pub mod prune;
pub mod trie;

pub use alphabet::{Symbol, ALPHABET_SIZE};
pub use analysis::GuessAnalysis;
pub use arena::Arena;
pub use config::Config;
pub use dictionary::{Dictionary, DictionaryError};
pub use feedback::{Feedback, FeedbackPattern, ParseError};
pub use game::{Game, GameError, GuessOutcome, Status};
pub use hints::{Hints, HintsError, Occurrence};
pub use prune::update_filter;
pub use trie::{Epoch, NodeId, Trie, TrieError};

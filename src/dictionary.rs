//! A validated fixed-length word list stored in a [`Trie`].
//!
//! The dictionary also hands out epochs: every game started with
//! [`Dictionary::new_game`] gets a fresh one, so stamps left behind by
//! earlier games never hide anything from later ones.

use crate::alphabet;
use crate::config::Config;
use crate::game::{Game, GameError};
use crate::trie::{Epoch, Trie, TrieError, Words};
use std::io::BufRead;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("{word:?} has length {found}, expected {expected}")]
    Length {
        word: String,
        expected: usize,
        found: usize,
    },
    #[error("{word:?} has {found:?} at position {position}, which is not a legal symbol")]
    InvalidSymbol {
        word: String,
        position: usize,
        found: char,
    },
    #[error(transparent)]
    Trie(#[from] TrieError),
    #[error("failed to read word list: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct Dictionary {
    config: Config,
    trie: Trie,
    len: usize,
    last_epoch: Epoch,
}

impl Dictionary {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            trie: Trie::with_block_size(config.arena_block_size),
            len: 0,
            last_epoch: Epoch::UNFILTERED,
        }
    }

    pub fn from_words<I, S>(config: Config, words: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Self::new(config);
        for word in words {
            dictionary.insert(word.as_ref())?;
        }
        Ok(dictionary)
    }

    /// Load one word per line; blank lines are skipped and surrounding
    /// whitespace ignored.
    pub fn from_reader<R: BufRead>(config: Config, reader: R) -> Result<Self, DictionaryError> {
        let mut dictionary = Self::new(config);
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                dictionary.insert(word)?;
            }
        }
        info!(
            words = dictionary.len,
            nodes = dictionary.trie.node_count(),
            "dictionary loaded"
        );
        Ok(dictionary)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn word_len(&self) -> usize {
        self.config.word_len
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    /// Check that `word` could be stored: right length, legal symbols only.
    pub fn validate(&self, word: &str) -> Result<(), DictionaryError> {
        if let Some((position, found)) = alphabet::first_invalid(word) {
            return Err(DictionaryError::InvalidSymbol {
                word: word.to_owned(),
                position,
                found,
            });
        }
        if word.len() != self.config.word_len {
            return Err(DictionaryError::Length {
                word: word.to_owned(),
                expected: self.config.word_len,
                found: word.len(),
            });
        }
        Ok(())
    }

    /// Add a word visible to every game. Returns whether it was new.
    pub fn insert(&mut self, word: &str) -> Result<bool, DictionaryError> {
        self.insert_with(word, Epoch::UNFILTERED)
    }

    pub(crate) fn insert_with(&mut self, word: &str, epoch: Epoch) -> Result<bool, DictionaryError> {
        self.validate(word)?;
        let fresh = self.trie.insert(word, epoch)?;
        if fresh {
            self.len += 1;
        }
        Ok(fresh)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.trie.search(word)
    }

    /// Every stored word in alphabet order.
    pub fn words(&self) -> Words<'_> {
        self.trie.enumerate(Epoch::UNFILTERED)
    }

    /// Start a game whose hidden word is `reference`.
    pub fn new_game(&mut self, reference: &str) -> Result<Game<'_>, GameError> {
        self.validate(reference)?;
        if !self.contains(reference) {
            return Err(GameError::UnknownReference(reference.to_owned()));
        }
        let epoch = self.next_epoch();
        debug!(%epoch, reference, "starting game");
        Ok(Game::new(self, epoch, reference.to_owned()))
    }

    pub(crate) fn trie_mut(&mut self) -> &mut Trie {
        &mut self.trie
    }

    fn next_epoch(&mut self) -> Epoch {
        self.last_epoch = self.last_epoch.next();
        self.last_epoch
    }
}

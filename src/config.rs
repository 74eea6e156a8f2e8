/// Settings shared by a dictionary and every game played against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Length every dictionary word must have.
    pub word_len: usize,
    /// Attempts a game allows before it is lost.
    pub max_guesses: usize,
    /// Initial block size of the arena holding trie pieces.
    pub arena_block_size: usize,
}

impl Config {
    pub fn with_word_len(word_len: usize) -> Self {
        Self {
            word_len,
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_len: 5,
            max_guesses: 6,
            arena_block_size: 4096,
        }
    }
}

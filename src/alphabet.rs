//! The closed 64-symbol word alphabet.
//!
//! Symbols map to dense indices in byte order: `-`, `0`-`9`, `A`-`Z`, `_`,
//! `a`-`z`. Anything else maps to [`Symbol::INVALID`], which never satisfies
//! a positional or occurrence requirement.

/// Number of legal symbols.
pub const ALPHABET_SIZE: usize = 64;

/// Slots needed by per-symbol tables that must tolerate [`Symbol::INVALID`].
pub(crate) const SYMBOL_SLOTS: usize = ALPHABET_SIZE + 1;

/// A dense alphabet index in `0..ALPHABET_SIZE`, or the invalid sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u8);

impl Symbol {
    /// Sentinel for bytes outside the alphabet.
    pub const INVALID: Self = Symbol(ALPHABET_SIZE as u8);

    pub fn from_byte(b: u8) -> Self {
        match b {
            b'-' => Symbol(0),
            b'0'..=b'9' => Symbol(b - b'0' + 1),
            b'A'..=b'Z' => Symbol(b - b'A' + 11),
            b'_' => Symbol(37),
            b'a'..=b'z' => Symbol(b - b'a' + 38),
            _ => Self::INVALID,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        (index < ALPHABET_SIZE).then(|| Symbol(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    pub fn to_byte(self) -> Option<u8> {
        match self.0 {
            0 => Some(b'-'),
            i @ 1..=10 => Some(b'0' + i - 1),
            i @ 11..=36 => Some(b'A' + i - 11),
            37 => Some(b'_'),
            i @ 38..=63 => Some(b'a' + i - 38),
            _ => None,
        }
    }
}

/// Dense index of a byte, `ALPHABET_SIZE` when it is not a legal symbol.
pub fn index(b: u8) -> usize {
    Symbol::from_byte(b).index()
}

/// Position and byte of the first symbol outside the alphabet, if any.
pub fn first_invalid(word: &str) -> Option<(usize, char)> {
    word.char_indices()
        .find(|&(_, c)| !c.is_ascii() || !Symbol::from_byte(c as u8).is_valid())
}

/// A set of alphabet symbols packed into one machine word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolSet(u64);

impl SymbolSet {
    pub const ALL: Self = SymbolSet(u64::MAX);
    pub const EMPTY: Self = SymbolSet(0);

    pub fn only(symbol: Symbol) -> Self {
        if symbol.is_valid() {
            SymbolSet(1 << symbol.index())
        } else {
            Self::EMPTY
        }
    }

    pub fn contains(self, symbol: Symbol) -> bool {
        symbol.is_valid() && self.0 & (1 << symbol.index()) != 0
    }

    pub fn remove(&mut self, symbol: Symbol) {
        if symbol.is_valid() {
            self.0 &= !(1 << symbol.index());
        }
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Symbol> {
        (0..ALPHABET_SIZE)
            .filter(move |&i| self.0 & (1 << i) != 0)
            .map(|i| Symbol(i as u8))
    }
}

//! Path-compressed radix trie holding the dictionary.
//!
//! Node records live in one growable store addressed by [`NodeId`]; the bytes
//! of each node's piece live in an [`Arena`]. Nothing is ever removed.
//! Instead every node carries an [`Epoch`] stamp: a node stamped with the
//! epoch of a game is invisible, together with its subtree, to queries made
//! for that game, and visible to every other game.

use crate::alphabet::Symbol;
use crate::arena::{Arena, ArenaStats, Span};
use thiserror::Error;

/// Generation tag identifying one game against a shared trie.
///
/// Epoch 0 is reserved: it never filters anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Epoch(pub u64);

impl Epoch {
    pub const UNFILTERED: Self = Epoch(0);

    pub fn is_unfiltered(self) -> bool {
        self == Self::UNFILTERED
    }

    pub fn next(self) -> Self {
        Epoch(self.0 + 1)
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: Self = NodeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrieError {
    /// The trie holds a prefix-free set; a word may not extend, or be
    /// extended by, another stored word.
    #[error("{word:?} is a prefix of, or extends, a stored word")]
    PrefixConflict { word: String },
}

#[derive(Debug, Clone)]
struct Node {
    piece: Span,
    stamp: Epoch,
    child: Option<NodeId>,
    sibling: Option<NodeId>,
}

impl Node {
    fn new(piece: Span, stamp: Epoch) -> Self {
        Self {
            piece,
            stamp,
            child: None,
            sibling: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Trie {
    arena: Arena,
    nodes: Vec<Node>,
    /// The root doubles as the leaf for the empty word.
    empty_word: bool,
}

impl Trie {
    pub fn new() -> Self {
        Self::with_block_size(4096)
    }

    pub fn with_block_size(block_size: usize) -> Self {
        Self {
            arena: Arena::new(block_size),
            nodes: vec![Node::new(Span::default(), Epoch::UNFILTERED)],
            empty_word: false,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn piece(&self, id: NodeId) -> &[u8] {
        self.arena.get(self.nodes[id.index()].piece)
    }

    pub fn stamp(&self, id: NodeId) -> Epoch {
        self.nodes[id.index()].stamp
    }

    pub(crate) fn set_stamp(&mut self, id: NodeId, epoch: Epoch) {
        self.nodes[id.index()].stamp = epoch;
    }

    pub(crate) fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].child
    }

    pub(crate) fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].sibling
    }

    /// Children of `id` in ascending order of their leading symbol.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.first_child(id), move |&c| self.next_sibling(c))
    }

    /// Whether `id` terminates a stored word.
    pub fn is_word(&self, id: NodeId) -> bool {
        self.first_child(id).is_none() && (id != NodeId::ROOT || self.empty_word)
    }

    pub fn is_filtered(&self, id: NodeId, epoch: Epoch) -> bool {
        !epoch.is_unfiltered() && self.stamp(id) == epoch
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn arena_stats(&self) -> ArenaStats {
        self.arena.stats()
    }

    /// Insert `word`, returning whether it was not stored before.
    ///
    /// Nodes created for the word are stamped with `epoch`, so a non-zero
    /// epoch hides the word from that game from the start. Inserting with
    /// [`Epoch::UNFILTERED`] also clears the stamp of every node on the
    /// word's path.
    pub fn insert(&mut self, word: &str, epoch: Epoch) -> Result<bool, TrieError> {
        let bytes = word.as_bytes();
        let conflict = || TrieError::PrefixConflict {
            word: word.to_owned(),
        };

        if bytes.is_empty() {
            if self.first_child(NodeId::ROOT).is_some() {
                return Err(conflict());
            }
            let fresh = !self.empty_word;
            self.empty_word = true;
            if fresh || epoch.is_unfiltered() {
                self.set_stamp(NodeId::ROOT, epoch);
            }
            return Ok(fresh);
        }
        if self.empty_word {
            return Err(conflict());
        }

        // Stamps are cleared only once the insertion is known to succeed.
        let mut path = Vec::new();
        let mut node = NodeId::ROOT;
        let mut offset = 0;
        let fresh = loop {
            path.push(node);
            let piece = self.piece(node);
            let rest = &bytes[offset..];
            let matched = piece.iter().zip(rest).take_while(|(a, b)| a == b).count();

            if matched < piece.len() {
                if matched == rest.len() {
                    return Err(conflict());
                }
                self.split(node, matched, &rest[matched..], epoch);
                break true;
            }

            offset += matched;
            let has_children = self.first_child(node).is_some();
            if offset == bytes.len() {
                if has_children {
                    return Err(conflict());
                }
                break false;
            }
            if !has_children && node != NodeId::ROOT {
                return Err(conflict());
            }

            match self.find_child(node, bytes[offset]) {
                Some(child) => node = child,
                None => {
                    let leaf = self.push_node(&bytes[offset..], epoch);
                    self.attach_child(node, leaf);
                    break true;
                }
            }
        };

        if epoch.is_unfiltered() {
            for id in path {
                self.set_stamp(id, Epoch::UNFILTERED);
            }
        }
        Ok(fresh)
    }

    /// Whether `word` was inserted, regardless of stamps.
    pub fn search(&self, word: &str) -> bool {
        let bytes = word.as_bytes();
        if bytes.is_empty() {
            return self.empty_word;
        }

        let mut node = NodeId::ROOT;
        let mut offset = 0;
        loop {
            let piece = self.piece(node);
            if !bytes[offset..].starts_with(piece) {
                return false;
            }
            offset += piece.len();
            if offset == bytes.len() {
                return self.is_word(node);
            }
            match self.find_child(node, bytes[offset]) {
                Some(child) => node = child,
                None => return false,
            }
        }
    }

    /// Number of words not hidden from `epoch`.
    pub fn size(&self, epoch: Epoch) -> usize {
        self.count_from(NodeId::ROOT, epoch)
    }

    fn count_from(&self, id: NodeId, epoch: Epoch) -> usize {
        if self.is_filtered(id, epoch) {
            return 0;
        }
        if self.first_child(id).is_none() {
            return self.is_word(id) as usize;
        }
        self.children(id).map(|c| self.count_from(c, epoch)).sum()
    }

    /// Lazily walk the words not hidden from `epoch`, in alphabet order.
    pub fn enumerate(&self, epoch: Epoch) -> Words<'_> {
        Words {
            trie: self,
            epoch,
            stack: vec![(NodeId::ROOT, 0)],
            buffer: Vec::new(),
        }
    }

    fn find_child(&self, parent: NodeId, leading: u8) -> Option<NodeId> {
        self.children(parent).find(|&c| self.piece(c)[0] == leading)
    }

    fn push_node(&mut self, piece: &[u8], stamp: Epoch) -> NodeId {
        let span = self.arena.alloc_copy(piece);
        self.push_span(span, stamp)
    }

    fn push_span(&mut self, piece: Span, stamp: Epoch) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(piece, stamp));
        id
    }

    /// Keep `matched` bytes of `node`'s piece; its tail and children move
    /// into a new child, and `rest` becomes a sibling of that child.
    fn split(&mut self, node: NodeId, matched: usize, rest: &[u8], epoch: Epoch) {
        let Node {
            piece,
            stamp,
            child,
            ..
        } = self.nodes[node.index()].clone();

        let tail = self.push_span(piece.suffix(matched), stamp);
        self.nodes[tail.index()].child = child;
        let leaf = self.push_node(rest, epoch);

        let head = &mut self.nodes[node.index()];
        head.piece = piece.prefix(matched);
        head.child = None;
        self.attach_child(node, tail);
        self.attach_child(node, leaf);
    }

    /// Link `id` among `parent`'s children, keeping them sorted.
    fn attach_child(&mut self, parent: NodeId, id: NodeId) {
        let key = Symbol::from_byte(self.piece(id)[0]);
        let leading = |trie: &Self, c: NodeId| Symbol::from_byte(trie.piece(c)[0]);

        match self.first_child(parent) {
            Some(first) if leading(self, first) < key => {
                let mut prev = first;
                while let Some(next) = self.next_sibling(prev) {
                    if leading(self, next) >= key {
                        break;
                    }
                    prev = next;
                }
                self.nodes[id.index()].sibling = self.next_sibling(prev);
                self.nodes[prev.index()].sibling = Some(id);
            }
            first => {
                self.nodes[id.index()].sibling = first;
                self.nodes[parent.index()].child = Some(id);
            }
        }
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator returned by [`Trie::enumerate`].
pub struct Words<'t> {
    trie: &'t Trie,
    epoch: Epoch,
    stack: Vec<(NodeId, usize)>,
    buffer: Vec<u8>,
}

impl Iterator for Words<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while let Some((id, depth)) = self.stack.pop() {
            if self.trie.is_filtered(id, self.epoch) {
                continue;
            }
            self.buffer.truncate(depth);
            self.buffer.extend_from_slice(self.trie.piece(id));

            if self.trie.first_child(id).is_none() {
                if self.trie.is_word(id) {
                    return Some(String::from_utf8_lossy(&self.buffer).into_owned());
                }
                continue;
            }

            let depth = self.buffer.len();
            let children: Vec<NodeId> = self.trie.children(id).collect();
            self.stack.extend(children.into_iter().rev().map(|c| (c, depth)));
        }
        None
    }
}

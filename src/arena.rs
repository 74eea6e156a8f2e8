//! Bump allocation of byte regions out of growable fixed-size blocks.
//!
//! Regions are never freed one by one; every block is released together when
//! the [`Arena`] is dropped. Handles are plain [`Span`] values resolved back
//! through the arena, so a region stays valid for as long as the arena lives.

use tracing::trace;

/// Handle to a region handed out by [`Arena::allocate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    block: u32,
    offset: u32,
    len: u32,
}

impl Span {
    pub fn len(self) -> usize {
        self.len as usize
    }

    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    /// The sub-region starting `from` bytes in.
    pub fn suffix(self, from: usize) -> Span {
        debug_assert!(from <= self.len());
        Span {
            block: self.block,
            offset: self.offset + from as u32,
            len: self.len - from as u32,
        }
    }

    /// The first `len` bytes of the region.
    pub fn prefix(self, len: usize) -> Span {
        debug_assert!(len <= self.len());
        Span {
            len: len as u32,
            ..self
        }
    }
}

#[derive(Debug, Clone)]
struct Block {
    bytes: Box<[u8]>,
    cursor: usize,
}

impl Block {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: vec![0; capacity].into_boxed_slice(),
            cursor: 0,
        }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.cursor
    }
}

/// Occupancy snapshot of an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaStats {
    pub blocks: usize,
    pub block_size: usize,
    pub bytes_used: usize,
    pub bytes_reserved: usize,
}

#[derive(Debug, Clone)]
pub struct Arena {
    /// The last block is the head that serves new requests.
    blocks: Vec<Block>,
    block_size: usize,
}

impl Arena {
    pub fn new(block_size: usize) -> Self {
        Self {
            blocks: vec![Block::with_capacity(block_size)],
            block_size,
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Reserve `size` contiguous bytes.
    ///
    /// A request larger than the current block size permanently raises the
    /// block size, so every later block is at least that large too.
    pub fn allocate(&mut self, size: usize) -> Span {
        if size > self.block_size {
            trace!(from = self.block_size, to = size, "growing arena block size");
            self.block_size = size;
        }

        if self.head().remaining() < size {
            trace!(block_size = self.block_size, blocks = self.blocks.len() + 1, "new arena block");
            self.blocks.push(Block::with_capacity(self.block_size));
        }

        let block = self.blocks.len() - 1;
        let head = &mut self.blocks[block];
        let offset = head.cursor;
        head.cursor += size;
        Span {
            block: block as u32,
            offset: offset as u32,
            len: size as u32,
        }
    }

    /// Reserve a region and fill it with `bytes`.
    pub fn alloc_copy(&mut self, bytes: &[u8]) -> Span {
        let span = self.allocate(bytes.len());
        self.get_mut(span).copy_from_slice(bytes);
        span
    }

    pub fn get(&self, span: Span) -> &[u8] {
        let start = span.offset as usize;
        &self.blocks[span.block as usize].bytes[start..start + span.len()]
    }

    pub fn get_mut(&mut self, span: Span) -> &mut [u8] {
        let start = span.offset as usize;
        &mut self.blocks[span.block as usize].bytes[start..start + span.len()]
    }

    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            blocks: self.blocks.len(),
            block_size: self.block_size,
            bytes_used: self.blocks.iter().map(|b| b.cursor).sum(),
            bytes_reserved: self.blocks.iter().map(|b| b.bytes.len()).sum(),
        }
    }

    fn head(&self) -> &Block {
        // Never empty: `new` seeds one block and nothing removes blocks.
        &self.blocks[self.blocks.len() - 1]
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(4096)
    }
}

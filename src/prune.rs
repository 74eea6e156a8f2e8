//! Prune the trie down to the words a game's hints still allow.
//!
//! The walk threads one buffer of running symbol counts through the
//! recursion. Each call adds the symbols of its own piece and takes them back
//! out before returning, so siblings always start from their parent's counts.

use crate::alphabet::{self, Symbol, SYMBOL_SLOTS};
use crate::hints::Hints;
use crate::trie::{Epoch, NodeId, Trie};
use tracing::debug;

type Counts = [usize; SYMBOL_SLOTS];

/// Count the words compatible with `hints`, stamping every incompatible
/// node with `epoch` on the way.
///
/// Stamped subtrees are skipped in O(1) by later calls for the same epoch,
/// which is sound because hints within one game only ever tighten. With
/// [`Epoch::UNFILTERED`] nothing is recorded and the call only counts.
pub fn update_filter(trie: &mut Trie, hints: &Hints, epoch: Epoch) -> usize {
    let mut counts = [0; SYMBOL_SLOTS];
    let compatible = visit(trie, hints, epoch, NodeId::ROOT, 0, &mut counts);
    debug!(%epoch, compatible, nodes = trie.node_count(), "filter updated");
    compatible
}

fn visit(
    trie: &mut Trie,
    hints: &Hints,
    epoch: Epoch,
    id: NodeId,
    position: usize,
    counts: &mut Counts,
) -> usize {
    if trie.is_filtered(id, epoch) {
        return 0;
    }

    let piece = trie.piece(id);
    let piece_len = piece.len();
    let taken = admit(piece, position, hints, counts);
    if taken < piece_len {
        release(piece, taken + 1, counts);
        exclude(trie, id, epoch);
        return 0;
    }

    let end = position + piece_len;
    let compatible = if trie.first_child(id).is_none() {
        let complete = trie.is_word(id)
            && end == hints.word_len()
            && hints
                .occurrences()
                .iter()
                .zip(counts.iter())
                .all(|(req, &count)| req.admits(count));
        if complete {
            if !epoch.is_unfiltered() {
                trie.set_stamp(id, Epoch::UNFILTERED);
            }
            1
        } else {
            exclude(trie, id, epoch);
            0
        }
    } else {
        let mut sum = 0;
        let mut child = trie.first_child(id);
        while let Some(c) = child {
            sum += visit(trie, hints, epoch, c, end, counts);
            child = trie.next_sibling(c);
        }
        if sum == 0 {
            exclude(trie, id, epoch);
        }
        sum
    };

    release(trie.piece(id), piece_len, counts);
    compatible
}

/// Add `piece` to the running counts symbol by symbol, stopping at the first
/// symbol the hints reject. Returns how many symbols were accepted; the
/// rejected one, if any, has been counted too.
fn admit(piece: &[u8], position: usize, hints: &Hints, counts: &mut Counts) -> usize {
    for (offset, &b) in piece.iter().enumerate() {
        let symbol = Symbol::from_byte(b);
        let idx = symbol.index();
        counts[idx] += 1;
        if !hints.permits(position + offset, symbol)
            || !hints.occurrence(symbol).has_room_for(counts[idx])
        {
            return offset;
        }
    }
    piece.len()
}

fn release(piece: &[u8], upto: usize, counts: &mut Counts) {
    for &b in &piece[..upto] {
        counts[alphabet::index(b)] -= 1;
    }
}

fn exclude(trie: &mut Trie, id: NodeId, epoch: Epoch) {
    if !epoch.is_unfiltered() {
        trie.set_stamp(id, epoch);
    }
}

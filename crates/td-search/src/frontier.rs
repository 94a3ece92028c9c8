use std::cmp::Ordering;
use std::collections::BinaryHeap;

use td_core::NodeId;

#[derive(Copy, Clone, Debug)]
pub(crate) struct FrontierEntry {
    pub(crate) f: f64,
    pub(crate) g: f64,
    pub(crate) node: NodeId,
    seq: u64,
}

// Min-heap by f, then by insertion order (reversed from standard BinaryHeap).
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Open list.  Duplicates of a node are allowed; stale ones are skipped on
/// pop by the caller's closed-set check.
#[derive(Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_seq: u64,
}

impl Frontier {
    pub(crate) fn push(&mut self, node: NodeId, g: f64, h: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(FrontierEntry { f: g + h, g, node, seq });
    }

    pub(crate) fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}

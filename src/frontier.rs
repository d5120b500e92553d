//! Min-priority frontier built on the standard [BinaryHeap].
//!
//! [BinaryHeap] is a max-heap with no ordering guarantee between equal keys,
//! so entries carry their own [Ord] that inverts the estimated cost and breaks
//! ties by insertion sequence. Equal-priority cells therefore pop in the order
//! they were discovered, making runs reproducible across platforms and
//! standard library versions.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A discovered-but-not-finalized cell: the estimated total cost through it
/// and its index in the grid's cell arena.
#[derive(Debug)]
struct FrontierEntry {
    estimated_cost: u32,
    seq: u64,
    index: usize,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost == other.estimated_cost && self.seq == other.seq
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Orders per estimated cost first; among equal estimates the oldest
        // entry wins, giving first-in-first-out tie-breaking.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.seq.cmp(&self.seq),
            s => s,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Frontier {
        Frontier {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, estimated_cost: u32, index: usize) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(FrontierEntry {
            estimated_cost,
            seq,
            index,
        });
    }

    /// Removes and returns the arena index with the smallest estimated cost.
    pub fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|entry| entry.index)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

//  FRONTIER.rs
//    by Lut99
//
//  Created:
//    07 Oct 2026, 14:02:55
//  Last edited:
//    14 Oct 2026, 16:21:30
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the open list of the A* search.
//

use std::cmp::Ordering;
use std::collections::BinaryHeap;


/***** HELPERS *****/
/// A single entry in the [`Frontier`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Entry {
    /// The estimated total cost through this node.
    pub f:    u64,
    /// The cost of reaching this node.
    pub g:    u64,
    /// When this entry was pushed.
    pub seq:  u64,
    /// The node in the search's arena.
    pub node: usize,
}
impl Ord for Entry {
    /// Orders entries such that the _smallest_ `f`, then `g`, then `seq` is the greatest, because
    /// [`BinaryHeap`] pops the greatest element first.
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f).then_with(|| other.g.cmp(&self.g)).then_with(|| other.seq.cmp(&self.seq))
    }
}
impl PartialOrd for Entry {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}





/***** LIBRARY *****/
/// A priority queue of nodes, ordered by ascending `f`, then ascending `g`, then in the order
/// they were pushed.
///
/// The last key makes the order total, and thus the search deterministic, without needing any
/// order on states.
#[derive(Clone, Debug, Default)]
pub(crate) struct Frontier {
    /// The entries themselves.
    heap: BinaryHeap<Entry>,
    /// The sequence number of the next entry.
    next: u64,
}
impl Frontier {
    /// Constructor for an empty Frontier.
    #[inline]
    pub fn new() -> Self { Self::default() }

    /// Adds a node.
    ///
    /// # Arguments
    /// - `f`: The estimated total cost through the node.
    /// - `g`: The cost of reaching the node.
    /// - `node`: The node's index in the search's arena.
    #[inline]
    pub fn push(&mut self, f: u64, g: u64, node: usize) {
        self.heap.push(Entry { f, g, seq: self.next, node });
        self.next += 1;
    }

    /// Removes the most promising node.
    ///
    /// # Returns
    /// Its [`Entry`], or [`None`] if the frontier is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<Entry> { self.heap.pop() }

    /// Returns the number of entries, stale ones included.
    #[inline]
    #[allow(unused)]
    pub fn len(&self) -> usize { self.heap.len() }
}





/***** TESTS *****/

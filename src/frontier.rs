//! Open and closed lists for A* search.
//!
//! - `Frontier`: the open list, a min-priority queue of node ids keyed by `f`.
//! - `VisitedSet`: the closed list of board configurations already expanded.
//!
//! Neither structure removes duplicates on insertion. A board may sit in the frontier several
//! times; the search discards the stale copies when it pops them and finds the board already
//! visited.
use crate::engine::BoardKey;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// Index of a search node in the solver's arena.
///
/// Ids are handed out in creation order, so a larger id means a more recently generated node.
pub type NodeId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FrontierEntry {
    f: u32,
    id: NodeId,
}

// `BinaryHeap` is a max-heap: the "greatest" entry has the lowest `f` and, among equal `f`,
// the highest id.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of generated but not yet expanded nodes.
///
/// Pops the node with the lowest `f`; ties go to the most recently pushed node.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::frontier::Frontier;
///
/// let mut frontier = Frontier::new();
/// frontier.push(5, 0);
/// frontier.push(3, 1);
/// frontier.push(3, 2);
/// assert_eq!(frontier.pop(), Some(2));
/// assert_eq!(frontier.pop(), Some(1));
/// assert_eq!(frontier.pop(), Some(0));
/// assert_eq!(frontier.pop(), None);
/// ```
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds node `id` with total estimated cost `f`.
    pub fn push(&mut self, f: u32, id: NodeId) {
        self.heap.push(FrontierEntry { f, id });
    }

    /// Removes and returns the id of the highest-priority node.
    pub fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|entry| entry.id)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Set of board configurations that have been expanded.
#[derive(Debug, Default)]
pub struct VisitedSet {
    boards: HashSet<BoardKey>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &BoardKey) -> bool {
        self.boards.contains(key)
    }

    /// Marks `key` as visited. Returns `false` if it already was.
    pub fn insert(&mut self, key: BoardKey) -> bool {
        self.boards.insert(key)
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

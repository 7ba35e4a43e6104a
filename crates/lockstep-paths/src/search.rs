use std::collections::{BinaryHeap, HashMap, HashSet};

use lockstep_core::{Path, Position};

use crate::reconstruct::reconstruct;
use crate::traits::{Heuristic, Traversable};

/// Index of a node in one unit's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A discovered position with its costs and a backward link.
///
/// Nodes are appended to the arena and never modified, so a parent link
/// stays valid for the whole search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchNode {
    pub pos: Position,
    pub g: i32,
    pub h: i32,
    pub parent: Option<NodeId>,
}

impl SearchNode {
    #[inline]
    pub fn f(&self) -> i32 {
        self.g + self.h
    }
}

/// Open-set entry, ordered for `BinaryHeap` so that the smallest `f` pops
/// first, then the smallest `h`, then the earliest insertion.
#[derive(Clone, Copy, Eq, PartialEq)]
struct OpenEntry {
    f: i32,
    h: i32,
    seq: u64,
    node: NodeId,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// One unit's A* bookkeeping: node arena, open set, closed set and the
/// best known node per position.
///
/// Relaxation pushes a fresh entry instead of decreasing a key, so the open
/// set may hold stale duplicates; [`pop`](Self::pop) drops entries whose
/// position is already closed.
#[derive(Debug, Clone)]
pub struct SearchState {
    target: Position,
    nodes: Vec<SearchNode>,
    open: BinaryHeap<OpenEntry>,
    closed: HashSet<Position>,
    best: HashMap<Position, NodeId>,
    seq: u64,
    expansions: usize,
}

impl std::fmt::Debug for OpenEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}(f={}, h={})", self.node.0, self.f, self.h)
    }
}

impl SearchState {
    /// Seed a search at `start` heading for `target`.
    pub fn new<H: Heuristic>(start: Position, target: Position, heuristic: &H) -> Self {
        let mut state = Self {
            target,
            nodes: Vec::new(),
            open: BinaryHeap::new(),
            closed: HashSet::new(),
            best: HashMap::new(),
            seq: 0,
            expansions: 0,
        };
        state.insert(SearchNode {
            pos: start,
            g: 0,
            h: heuristic.estimate(start, target),
            parent: None,
        });
        state
    }

    pub fn target(&self) -> Position {
        self.target
    }

    /// Whether no entry is queued, stale or not.
    pub fn is_open_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    pub fn is_closed(&self, p: Position) -> bool {
        self.closed.contains(&p)
    }

    /// Whether `p` has ever been inserted into the open set.
    pub fn is_discovered(&self, p: Position) -> bool {
        self.best.contains_key(&p)
    }

    /// Best known cost from the start to `p`, if discovered.
    pub fn best_g(&self, p: Position) -> Option<i32> {
        self.best.get(&p).map(|&id| self.nodes[id.0].g)
    }

    /// Number of nodes moved into the closed set.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    pub fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[SearchNode] {
        &self.nodes
    }

    /// Pop the best open node, discarding entries for closed positions.
    pub fn pop(&mut self) -> Option<NodeId> {
        while let Some(entry) = self.open.pop() {
            if self.closed.contains(&self.nodes[entry.node.0].pos) {
                continue;
            }
            return Some(entry.node);
        }
        None
    }

    /// Close `id` and relax its 4-connected neighbours.
    ///
    /// A neighbour is skipped when `model` rejects it, when it is already
    /// closed, or when `blocked` reports it occupied. Returns how many
    /// neighbours were inserted or improved.
    pub fn expand<T, H>(
        &mut self,
        id: NodeId,
        model: &T,
        heuristic: &H,
        blocked: impl Fn(Position) -> bool,
    ) -> usize
    where
        T: Traversable + ?Sized,
        H: Heuristic,
    {
        let current = self.nodes[id.0];
        self.closed.insert(current.pos);
        self.expansions += 1;

        let mut relaxed = 0;
        for np in current.pos.neighbors_4() {
            if !model.is_valid(np) || self.closed.contains(&np) || blocked(np) {
                continue;
            }
            if self.relax(np, id, heuristic) {
                relaxed += 1;
            }
        }
        relaxed
    }

    /// Record `pos` as reached through `parent` if that is the first or a
    /// strictly cheaper way there.
    fn relax<H: Heuristic>(&mut self, pos: Position, parent: NodeId, heuristic: &H) -> bool {
        let g = self.nodes[parent.0].g + 1;
        if self.best_g(pos).is_some_and(|known| known <= g) {
            return false;
        }
        self.insert(SearchNode {
            pos,
            g,
            h: heuristic.estimate(pos, self.target),
            parent: Some(parent),
        });
        true
    }

    fn insert(&mut self, node: SearchNode) {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.best.insert(node.pos, id);
        self.open.push(OpenEntry {
            f: node.f(),
            h: node.h,
            seq: self.seq,
            node: id,
        });
        self.seq += 1;
    }

    /// Path from the start to the node `id`.
    pub fn path_to(&self, id: NodeId) -> Path {
        reconstruct(&self.nodes, id)
    }
}

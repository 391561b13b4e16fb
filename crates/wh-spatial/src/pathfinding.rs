//! Pathfinding trait and default A* implementation.
//!
//! # Pluggability
//!
//! The simulation calls pathfinding through the [`PathFinder`] trait, so
//! applications can swap in another search without touching the actors.
//! The default [`AStar`] is parameterised by a [`Heuristic`]; the default
//! heuristic is [`SquaredDistance`].
//!
//! # Determinism
//!
//! The open set is an insertion-ordered list and the node with the lowest
//! `f` is chosen with a strict `<` scan, so ties always go to the node that
//! was discovered first.  Neighbours are generated in the fixed order
//! down, up, right, left.  Together these make every search reproducible.
//!
//! # Occupied goals
//!
//! Actor cells are blocked, including the cell of the parcel or truck being
//! targeted.  [`find_path_to_occupied`] unblocks the goal for the duration
//! of one search and restores it afterwards.

use std::collections::VecDeque;

use wh_core::Vector;

use crate::{Board, SpatialError, SpatialResult};

/// Neighbour offsets, in generation order.
const DIRECTIONS: [Vector; 4] = [Vector::DOWN, Vector::UP, Vector::RIGHT, Vector::LEFT];

// ── Path ──────────────────────────────────────────────────────────────────────

/// An ordered list of cells to step through.
///
/// Excludes the start cell and includes the goal: an adjacent goal yields a
/// one-step path, and a search from a cell to itself yields an empty path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    steps: VecDeque<Vector>,
}

impl Path {
    pub fn new(steps: impl IntoIterator<Item = Vector>) -> Self {
        Self { steps: steps.into_iter().collect() }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` if start and goal are the same cell.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The next cell to step onto.
    pub fn head(&self) -> Option<Vector> {
        self.steps.front().copied()
    }

    /// The goal cell.
    pub fn destination(&self) -> Option<Vector> {
        self.steps.back().copied()
    }

    /// Consume and return the next step.
    pub fn advance(&mut self) -> Option<Vector> {
        self.steps.pop_front()
    }

    pub fn steps(&self) -> impl Iterator<Item = Vector> + '_ {
        self.steps.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<Vector> {
        self.steps.iter().copied().collect()
    }
}

// ── Heuristic ─────────────────────────────────────────────────────────────────

/// Cost-to-goal estimate used to order the A* open set.
///
/// Only heuristics that never overestimate the remaining step count
/// guarantee a shortest path; others still find *a* path when one exists.
pub trait Heuristic {
    fn estimate(&self, node: Vector, goal: Vector) -> f32;
}

/// Squared Euclidean distance to the goal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredDistance;

impl Heuristic for SquaredDistance {
    #[inline]
    fn estimate(&self, node: Vector, goal: Vector) -> f32 {
        node.squared_distance(goal) as f32
    }
}

impl<F> Heuristic for F
where
    F: Fn(Vector, Vector) -> f32,
{
    #[inline]
    fn estimate(&self, node: Vector, goal: Vector) -> f32 {
        self(node, goal)
    }
}

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable search engine.
pub trait PathFinder {
    /// Compute a path from `from` to `to` through unblocked cells.
    ///
    /// `from` itself is never checked for blockage (the searching actor
    /// stands on it).  `from == to` yields an empty path rather than an
    /// error.
    fn find_path(&self, board: &Board, from: Vector, to: Vector) -> SpatialResult<Path>;
}

impl<P: PathFinder + ?Sized> PathFinder for &P {
    fn find_path(&self, board: &Board, from: Vector, to: Vector) -> SpatialResult<Path> {
        (**self).find_path(board, from, to)
    }
}

// ── AStar ─────────────────────────────────────────────────────────────────────

/// A* over the 4-connected grid with unit step cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar<H = SquaredDistance> {
    heuristic: H,
}

impl AStar {
    /// A* with the default [`SquaredDistance`] heuristic.
    pub fn new() -> Self {
        Self { heuristic: SquaredDistance }
    }
}

impl<H: Heuristic> AStar<H> {
    pub fn with_heuristic(heuristic: H) -> Self {
        Self { heuristic }
    }
}

impl<H: Heuristic> PathFinder for AStar<H> {
    fn find_path(&self, board: &Board, from: Vector, to: Vector) -> SpatialResult<Path> {
        astar(board, from, to, &self.heuristic)
    }
}

/// Search with the default heuristic.
pub fn resolve(board: &Board, start: Vector, end: Vector) -> SpatialResult<Path> {
    astar(board, start, end, &SquaredDistance)
}

/// Search with a caller-supplied heuristic.
pub fn resolve_with<H: Heuristic>(
    board:     &Board,
    start:     Vector,
    end:       Vector,
    heuristic: &H,
) -> SpatialResult<Path> {
    astar(board, start, end, heuristic)
}

/// Search towards a goal cell that is itself blocked by the entity standing
/// on it.  The goal's blocked flag is cleared for the search and restored
/// immediately afterwards, whatever the outcome.
pub fn find_path_to_occupied<P: PathFinder + ?Sized>(
    finder: &P,
    board:  &mut Board,
    from:   Vector,
    to:     Vector,
) -> SpatialResult<Path> {
    let was_blocked = {
        let cell = board.cell_mut(to).ok_or(SpatialError::OutOfBounds(to))?;
        std::mem::replace(&mut cell.blocked, false)
    };
    let result = finder.find_path(board, from, to);
    if let Some(cell) = board.cell_mut(to) {
        cell.blocked = was_blocked;
    }
    result
}

// ── A* internals ──────────────────────────────────────────────────────────────

struct Node {
    position: Vector,
    parent:   Option<usize>,
    /// Steps from the start.
    g: u32,
    f: f32,
}

fn astar<H: Heuristic + ?Sized>(
    board:     &Board,
    start:     Vector,
    end:       Vector,
    heuristic: &H,
) -> SpatialResult<Path> {
    if !board.contains(start) {
        return Err(SpatialError::OutOfBounds(start));
    }
    if !board.contains(end) {
        return Err(SpatialError::OutOfBounds(end));
    }

    let width = board.width() as usize;
    let index = |pos: Vector| pos.y as usize * width + pos.x as usize;

    // Arena of every node ever created; `open` holds arena indices in
    // discovery order.
    let mut nodes: Vec<Node> = vec![Node { position: start, parent: None, g: 0, f: 0.0 }];
    let mut open: Vec<usize> = vec![0];
    let mut closed = vec![false; width * board.height() as usize];

    while !open.is_empty() {
        // Lowest f wins; strict `<` keeps the first-discovered node on ties.
        let mut best_slot = 0;
        for (slot, &node) in open.iter().enumerate().skip(1) {
            if nodes[node].f < nodes[open[best_slot]].f {
                best_slot = slot;
            }
        }
        let current = open.remove(best_slot);
        let position = nodes[current].position;

        if position == end {
            return Ok(reconstruct(&nodes, current));
        }
        if std::mem::replace(&mut closed[index(position)], true) {
            continue;
        }

        let g = nodes[current].g + 1;
        for direction in DIRECTIONS {
            let next = position + direction;
            if board.is_blocked(next) || closed[index(next)] {
                continue;
            }
            let queued = open.iter().find(|&&n| nodes[n].position == next);
            if queued.is_some_and(|&n| nodes[n].g <= g) {
                continue;
            }
            nodes.push(Node {
                position: next,
                parent:   Some(current),
                g,
                f:        g as f32 + heuristic.estimate(next, end),
            });
            open.push(nodes.len() - 1);
        }
    }

    Err(SpatialError::NoPath { from: start, to: end })
}

fn reconstruct(nodes: &[Node], goal: usize) -> Path {
    let mut steps = VecDeque::new();
    let mut cur = goal;
    while let Some(parent) = nodes[cur].parent {
        steps.push_front(nodes[cur].position);
        cur = parent;
    }
    Path { steps }
}

use crate::engine::{Board, Direction};
use crate::frontier::{Frontier, NodeId, VisitedSet};
use crate::heuristics::Heuristic;
use tracing::{debug, trace};

/// A generated search state: a board plus its costs and a link to the node it came from.
///
/// Nodes are stored in an arena owned by the search, and `parent` is an index into it, so
/// any number of nodes can share an ancestor without copying the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchNode {
    /// Total estimated cost, `g + h`.
    pub f: u32,
    /// Number of moves from the initial board.
    pub g: u32,
    pub board: Board,
    /// `None` only for the root.
    pub parent: Option<NodeId>,
}

/// Represents a solution found by the solver.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    /// Number of distinct boards expanded (V).
    pub expanded: usize,
    /// Visited boards plus frontier entries at the moment the goal was popped (N).
    pub peak_nodes: usize,
    /// Boards from the initial board to the goal, both included.
    pub path: Vec<Board>,
}

impl Solution {
    /// Number of moves in the solution (d).
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Effective branching factor `b = N^(1/d)`, or 0.0 when the initial board is the goal.
    pub fn branching_factor(&self) -> f64 {
        let depth = self.depth();
        if depth == 0 {
            0.0
        } else {
            (self.peak_nodes as f64).powf(1.0 / depth as f64)
        }
    }

    pub fn initial(&self) -> Option<&Board> {
        self.path.first()
    }

    pub fn goal(&self) -> Option<&Board> {
        self.path.last()
    }

    /// The blank's moves that turn each board of the path into the next.
    pub fn moves(&self) -> Vec<Direction> {
        self.path
            .windows(2)
            .filter_map(|pair| {
                Direction::ALL
                    .into_iter()
                    .find(|&direction| pair[0].successor(direction) == Some(pair[1]))
            })
            .collect()
    }
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    /// The goal was popped from the frontier.
    Solved(Solution),
    /// The frontier ran dry: the goal is not reachable from the initial board.
    Exhausted {
        /// Number of distinct boards expanded before giving up.
        expanded: usize,
    },
}

impl SearchOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            SearchOutcome::Exhausted { .. } => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved(_))
    }

    pub fn expanded(&self) -> usize {
        match self {
            SearchOutcome::Solved(solution) => solution.expanded,
            SearchOutcome::Exhausted { expanded } => *expanded,
        }
    }
}

/// A* search over 8-puzzle boards.
///
/// One instance runs one search. It owns the node arena, the frontier, the visited set and the
/// expansion counter; nothing is shared between searches.
pub struct AStar {
    heuristic: Heuristic,
    nodes: Vec<SearchNode>,
    frontier: Frontier,
    visited: VisitedSet,
    expanded: usize,
}

impl AStar {
    pub fn new(heuristic: Heuristic) -> Self {
        AStar {
            heuristic,
            nodes: Vec::new(),
            frontier: Frontier::new(),
            visited: VisitedSet::new(),
            expanded: 0,
        }
    }

    /// Stores a new node and pushes it onto the frontier. Its arena index is its id, which
    /// grows by one per node and breaks ties between equal `f` values.
    fn add_node(&mut self, g: u32, board: Board, parent: Option<NodeId>) -> NodeId {
        let f = g + self.heuristic.evaluate(&board);
        let id = self.nodes.len();
        self.nodes.push(SearchNode {
            f,
            g,
            board,
            parent,
        });
        self.frontier.push(f, id);
        id
    }

    /// Boards from the root to node `id`.
    fn path_to(&self, id: NodeId) -> Vec<Board> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.nodes[node_id];
            path.push(node.board);
            current = node.parent;
        }
        path.reverse();
        path
    }

    /// Searches from `initial` until the goal is popped or the frontier is empty.
    ///
    /// Successors are pushed whether or not their board was already visited; a popped node
    /// whose board is in the visited set is dropped without being counted as an expansion.
    pub fn run(mut self, initial: &Board) -> SearchOutcome {
        debug!(heuristic = %self.heuristic, "starting A* search");
        self.add_node(0, *initial, None);

        while let Some(id) = self.frontier.pop() {
            let node = self.nodes[id];

            if node.board.is_goal() {
                let peak_nodes = self.visited.len() + self.frontier.len();
                debug!(
                    expanded = self.expanded,
                    peak_nodes,
                    depth = node.g,
                    generated = self.nodes.len(),
                    "goal reached"
                );
                return SearchOutcome::Solved(Solution {
                    expanded: self.expanded,
                    peak_nodes,
                    path: self.path_to(id),
                });
            }

            if !self.visited.insert(node.board.identity()) {
                continue;
            }
            self.expanded += 1;
            trace!(id, f = node.f, g = node.g, "expanding");

            for (_, child) in node.board.successors() {
                self.add_node(node.g + 1, child, Some(id));
            }
        }

        debug!(
            expanded = self.expanded,
            generated = self.nodes.len(),
            "frontier exhausted without reaching the goal"
        );
        SearchOutcome::Exhausted {
            expanded: self.expanded,
        }
    }
}

/// Solves `board` with A* using `heuristic`.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::Board;
/// use eight_puzzle_solver::heuristics::Heuristic;
/// use eight_puzzle_solver::solver::solve;
///
/// let board = Board::from_grid([[1, 2, 5], [3, 4, 0], [6, 7, 8]]).unwrap();
/// let solution = solve(&board, Heuristic::Manhattan).solution().cloned().unwrap();
/// assert_eq!(solution.depth(), 3);
/// assert!(solution.goal().unwrap().is_goal());
/// ```
pub fn solve(board: &Board, heuristic: Heuristic) -> SearchOutcome {
    AStar::new(heuristic).run(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{BoardKey, GOAL_GRID};
    use std::collections::{HashMap, VecDeque};

    /// Number of boards reachable from the goal: half of the 9! permutations.
    const REACHABLE_BOARDS: usize = 181_440;

    fn board(grid: BoardKey) -> Board {
        Board::from_grid(grid).unwrap()
    }

    fn solved(board: &Board, heuristic: Heuristic) -> Solution {
        match solve(board, heuristic) {
            SearchOutcome::Solved(solution) => solution,
            SearchOutcome::Exhausted { expanded } => {
                panic!("no solution after {} expansions for\n{}", expanded, board)
            }
        }
    }

    /// Breadth-first distances from the goal to every reachable board. Moves are reversible,
    /// so this is also the distance from each board to the goal.
    fn bfs_distances() -> HashMap<BoardKey, usize> {
        let mut distances = HashMap::new();
        let mut queue = VecDeque::new();
        distances.insert(GOAL_GRID, 0);
        queue.push_back(Board::goal());

        while let Some(current) = queue.pop_front() {
            let distance = distances[&current.identity()];
            for (_, next) in current.successors() {
                if !distances.contains_key(&next.identity()) {
                    distances.insert(next.identity(), distance + 1);
                    queue.push_back(next);
                }
            }
        }
        distances
    }

    fn assert_valid_path(solution: &Solution, start: &Board) {
        assert_eq!(solution.initial(), Some(start));
        assert!(solution.goal().unwrap().is_goal());
        for pair in solution.path.windows(2) {
            assert!(
                pair[0].successors().any(|(_, next)| next == pair[1]),
                "consecutive boards are not one slide apart:\n{}\n{}",
                pair[0],
                pair[1]
            );
        }
        assert_eq!(solution.moves().len(), solution.depth());
    }

    #[test]
    fn test_goal_board_is_trivially_solved() {
        for h in Heuristic::ALL {
            let solution = solved(&Board::goal(), h);
            assert_eq!(solution.expanded, 0);
            assert_eq!(solution.peak_nodes, 0);
            assert_eq!(solution.depth(), 0);
            assert_eq!(solution.path, vec![Board::goal()]);
            assert_eq!(solution.branching_factor(), 0.0);
            assert!(solution.moves().is_empty());
        }
    }

    #[test]
    fn test_one_slide_from_goal() {
        // The blank swapped with the tile below it in the goal.
        let start = board([[3, 1, 2], [0, 4, 5], [6, 7, 8]]);
        for h in Heuristic::ALL {
            let solution = solved(&start, h);
            assert_eq!(solution.depth(), 1);
            assert_eq!(solution.path.len(), 2);
            assert_eq!(solution.moves(), vec![Direction::Up]);
            assert_valid_path(&solution, &start);
        }
    }

    #[test]
    fn test_known_instance_statistics() {
        let start = board([[1, 2, 5], [3, 4, 0], [6, 7, 8]]);
        let solution = solved(&start, Heuristic::Manhattan);

        assert_eq!(solution.expanded, 3);
        assert_eq!(solution.peak_nodes, 8);
        assert_eq!(solution.depth(), 3);
        assert!((solution.branching_factor() - 2.0).abs() < 1e-9);
        assert_eq!(
            solution.moves(),
            vec![Direction::Up, Direction::Left, Direction::Left]
        );
        assert_valid_path(&solution, &start);
    }

    #[test]
    fn test_known_instance_same_depth_for_admissible_heuristics() {
        let start = board([[1, 2, 5], [3, 4, 0], [6, 7, 8]]);
        let null = solved(&start, Heuristic::Null);
        let misplaced = solved(&start, Heuristic::MisplacedTiles);
        let manhattan = solved(&start, Heuristic::Manhattan);

        assert_eq!(null.depth(), 3);
        assert_eq!(misplaced.depth(), 3);
        assert_eq!(manhattan.depth(), 3);

        assert!(null.expanded >= misplaced.expanded);
        assert!(misplaced.expanded >= manhattan.expanded);
        assert!(null.expanded > manhattan.expanded);
    }

    #[test]
    fn test_informed_heuristics_never_expand_more_than_null() {
        // Both estimates are consistent and zero only at the goal, so they expand a subset of
        // the boards closer than the optimal depth, all of which uniform-cost search expands.
        for seed in [11u64, 12, 13] {
            let start = Board::goal().scramble_with_seed(seed, 60);
            let null = solved(&start, Heuristic::Null).expanded;
            let misplaced = solved(&start, Heuristic::MisplacedTiles).expanded;
            let manhattan = solved(&start, Heuristic::Manhattan).expanded;
            assert!(null >= misplaced, "seed {}: {} < {}", seed, null, misplaced);
            assert!(null >= manhattan, "seed {}: {} < {}", seed, null, manhattan);
        }
    }

    #[test]
    fn test_admissible_heuristics_match_bfs_oracle() {
        let distances = bfs_distances();
        assert_eq!(distances.len(), REACHABLE_BOARDS);

        for seed in 0..12u64 {
            let start = Board::goal().scramble_with_seed(seed, 14 + seed as usize);
            let optimal = distances[&start.identity()];
            for h in [Heuristic::Null, Heuristic::MisplacedTiles, Heuristic::Manhattan] {
                let solution = solved(&start, h);
                assert_eq!(
                    solution.depth(),
                    optimal,
                    "heuristic {} on seed {}:\n{}",
                    h,
                    seed,
                    start
                );
                assert_valid_path(&solution, &start);
            }
        }
    }

    #[test]
    fn test_blank_penalty_heuristic_finds_valid_path() {
        for seed in 0..10u64 {
            let start = Board::goal().scramble_with_seed(seed, 30);
            let solution = solved(&start, Heuristic::ManhattanBlankPenalty);
            assert_valid_path(&solution, &start);
        }
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let start = Board::goal().scramble_with_seed(2024, 40);
        for h in Heuristic::ALL {
            let first = solved(&start, h);
            let second = solved(&start, h);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_each_board_expanded_at_most_once() {
        let start = Board::goal().scramble_with_seed(5, 24);
        let mut search = AStar::new(Heuristic::MisplacedTiles);
        search.add_node(0, start, None);

        // Drive the loop by hand to inspect the arena alongside the counters.
        let mut expanded_boards = Vec::new();
        while let Some(id) = search.frontier.pop() {
            let node = search.nodes[id];
            if node.board.is_goal() {
                break;
            }
            if !search.visited.insert(node.board.identity()) {
                continue;
            }
            search.expanded += 1;
            expanded_boards.push(node.board.identity());
            for (_, child) in node.board.successors() {
                search.add_node(node.g + 1, child, Some(id));
            }
        }

        let distinct: std::collections::HashSet<BoardKey> =
            expanded_boards.iter().copied().collect();
        assert_eq!(distinct.len(), expanded_boards.len());
        assert_eq!(search.visited.len(), search.expanded);

        // The hand-driven loop agrees with `run`.
        assert_eq!(search.expanded, solved(&start, Heuristic::MisplacedTiles).expanded);
    }

    #[test]
    fn test_parents_point_to_earlier_nodes() {
        let start = Board::goal().scramble_with_seed(8, 20);
        let mut search = AStar::new(Heuristic::Manhattan);
        let root = search.add_node(0, start, None);
        assert_eq!(root, 0);
        for (_, child) in start.successors() {
            let id = search.add_node(1, child, Some(root));
            assert_eq!(search.nodes[id].parent, Some(root));
            assert_eq!(search.path_to(id), vec![start, child]);
        }
        assert_eq!(search.frontier.len(), search.nodes.len());
    }

    #[test]
    fn test_unsolvable_board_exhausts_reachable_component() {
        // Two adjacent non-blank tiles of the goal swapped: an odd permutation.
        let start = board([[0, 2, 1], [3, 4, 5], [6, 7, 8]]);
        assert!(!start.is_solvable());

        let outcome = solve(&start, Heuristic::Manhattan);
        assert!(!outcome.is_solved());
        assert!(outcome.solution().is_none());
        assert_eq!(outcome, SearchOutcome::Exhausted { expanded: REACHABLE_BOARDS });
        assert_eq!(outcome.expanded(), REACHABLE_BOARDS);
    }
}

//! Perfect maze generation
//!
//! A randomized depth-first traversal carves a spanning tree through the
//! grid: every cell is reachable from every other by exactly one path.
//! The traversal runs on an explicit stack so grid size never touches the
//! call stack, but visits cells in exactly the order a recursive walk would.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{MazeError, MazeResult};

/// Source of uniform draws for the generator
pub trait RandomSource {
    /// Uniform draw in `[0, bound)`. `bound` is always at least 1.
    fn next_below(&mut self, bound: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn next_below(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }
}

/// Replays a fixed sequence of draws
///
/// Each draw is clamped into range. Once the sequence runs out every draw is
/// `bound - 1`, which leaves a Fisher-Yates shuffle as the identity.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    draws: Vec<usize>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(draws: Vec<usize>) -> Self {
        Self { draws, cursor: 0 }
    }

    /// Never shuffles: neighbors are always tried up, right, down, left
    pub fn identity() -> Self {
        Self::default()
    }

    /// Number of draws requested so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_below(&mut self, bound: usize) -> usize {
        let last = bound.saturating_sub(1);
        let draw = self.draws.get(self.cursor).copied().unwrap_or(last);
        self.cursor += 1;
        draw.min(last)
    }
}

/// Grid direction from a cell to one of its four neighbors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Unshuffled neighbor order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];
}

/// A grid cell, 0-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Neighbor in `dir`, if it lies inside a `rows x cols` grid
    pub fn step(self, dir: Direction, rows: usize, cols: usize) -> Option<Cell> {
        let (row, col) = match dir {
            Direction::Up => (self.row.checked_sub(1)?, self.col),
            Direction::Right => (self.row, self.col + 1),
            Direction::Down => (self.row + 1, self.col),
            Direction::Left => (self.row, self.col.checked_sub(1)?),
        };
        (row < rows && col < cols).then_some(Cell { row, col })
    }
}

/// One wall slot between two adjacent cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Boundary {
    /// Between `(row, col)` and `(row, col + 1)`
    Vertical { row: usize, col: usize },
    /// Between `(row, col)` and `(row + 1, col)`
    Horizontal { row: usize, col: usize },
}

impl Boundary {
    /// The boundary crossed when leaving `cell` towards `dir`
    ///
    /// Only meaningful when the neighbor exists.
    pub fn between(cell: Cell, dir: Direction) -> Self {
        match dir {
            Direction::Up => Boundary::Horizontal {
                row: cell.row - 1,
                col: cell.col,
            },
            Direction::Down => Boundary::Horizontal {
                row: cell.row,
                col: cell.col,
            },
            Direction::Left => Boundary::Vertical {
                row: cell.row,
                col: cell.col - 1,
            },
            Direction::Right => Boundary::Vertical {
                row: cell.row,
                col: cell.col,
            },
        }
    }
}

/// Which walls between adjacent cells have been removed
///
/// `true` means open passage. Entries only ever go from closed to open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWallState")]
pub struct WallState {
    rows: usize,
    cols: usize,
    /// `rows x (cols - 1)`
    vertical_open: Vec<Vec<bool>>,
    /// `(rows - 1) x cols`
    horizontal_open: Vec<Vec<bool>>,
}

/// Unchecked serde form of `WallState`
#[derive(Deserialize)]
struct RawWallState {
    rows: usize,
    cols: usize,
    vertical_open: Vec<Vec<bool>>,
    horizontal_open: Vec<Vec<bool>>,
}

impl TryFrom<RawWallState> for WallState {
    type Error = MazeError;

    /// Matrices must be `rows x (cols - 1)` and `(rows - 1) x cols`
    fn try_from(raw: RawWallState) -> MazeResult<Self> {
        let RawWallState {
            rows,
            cols,
            vertical_open,
            horizontal_open,
        } = raw;
        let invalid = MazeError::InvalidDimension { rows, cols };
        if rows == 0 || cols == 0 {
            return Err(invalid);
        }
        let shaped = |m: &[Vec<bool>], height: usize, width: usize| {
            m.len() == height && m.iter().all(|line| line.len() == width)
        };
        if !shaped(&vertical_open, rows, cols - 1) || !shaped(&horizontal_open, rows - 1, cols) {
            return Err(invalid);
        }
        Ok(Self {
            rows,
            cols,
            vertical_open,
            horizontal_open,
        })
    }
}

impl WallState {
    /// A grid with every wall in place
    pub fn closed(rows: usize, cols: usize) -> MazeResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimension { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            vertical_open: vec![vec![false; cols - 1]; rows],
            horizontal_open: vec![vec![false; cols]; rows - 1],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn vertical_open(&self) -> &[Vec<bool>] {
        &self.vertical_open
    }

    pub fn horizontal_open(&self) -> &[Vec<bool>] {
        &self.horizontal_open
    }

    pub fn is_open(&self, boundary: Boundary) -> bool {
        match boundary {
            Boundary::Vertical { row, col } => self.vertical_open[row][col],
            Boundary::Horizontal { row, col } => self.horizontal_open[row][col],
        }
    }

    /// Open a boundary. Returns false if it was already open.
    fn open(&mut self, boundary: Boundary) -> bool {
        let slot = match boundary {
            Boundary::Vertical { row, col } => &mut self.vertical_open[row][col],
            Boundary::Horizontal { row, col } => &mut self.horizontal_open[row][col],
        };
        !std::mem::replace(slot, true)
    }

    /// Total interior wall slots
    pub fn boundary_count(&self) -> usize {
        self.rows * (self.cols - 1) + (self.rows - 1) * self.cols
    }

    pub fn open_count(&self) -> usize {
        self.vertical_open
            .iter()
            .chain(&self.horizontal_open)
            .flatten()
            .filter(|open| **open)
            .count()
    }

    pub fn closed_count(&self) -> usize {
        self.boundary_count() - self.open_count()
    }

    /// Whether the ball can move from `cell` towards `dir`
    pub fn passage(&self, cell: Cell, dir: Direction) -> bool {
        cell.step(dir, self.rows, self.cols).is_some() && self.is_open(Boundary::between(cell, dir))
    }

    /// Cells reachable from `cell` through one open boundary
    pub fn open_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL.into_iter().filter_map(move |dir| {
            self.passage(cell, dir)
                .then(|| cell.step(dir, self.rows, self.cols))
                .flatten()
        })
    }
}

impl fmt::Display for WallState {
    /// ASCII art, one `+---+` box per cell
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+{}", "---+".repeat(self.cols))?;
        for row in 0..self.rows {
            write!(f, "|")?;
            for col in 0..self.cols {
                let open = col + 1 < self.cols && self.vertical_open[row][col];
                write!(f, "   {}", if open { ' ' } else { '|' })?;
            }
            writeln!(f)?;
            write!(f, "+")?;
            for col in 0..self.cols {
                let open = row + 1 < self.rows && self.horizontal_open[row][col];
                write!(f, "{}+", if open { "   " } else { "---" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A finished maze plus how it was carved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeTrace {
    pub start: Cell,
    pub walls: WallState,
    /// Boundaries in the order they were opened
    pub carved: Vec<Boundary>,
}

/// Stack frame of the depth-first walk
struct Frame {
    cell: Cell,
    neighbors: [Direction; 4],
    next: usize,
}

/// Unbiased in-place Fisher-Yates shuffle
fn shuffle<T, R: RandomSource>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.next_below(i + 1);
        items.swap(i, j);
    }
}

/// Mark `cell` visited and push its frame. Re-entry is a no-op.
fn enter<R: RandomSource>(
    cell: Cell,
    visited: &mut [Vec<bool>],
    stack: &mut Vec<Frame>,
    rng: &mut R,
) {
    if visited[cell.row][cell.col] {
        return;
    }
    visited[cell.row][cell.col] = true;

    // Fresh permutation per visit, drawn on entry like a recursive call would
    let mut neighbors = Direction::ALL;
    shuffle(&mut neighbors, rng);
    stack.push(Frame {
        cell,
        neighbors,
        next: 0,
    });
}

/// Generate a maze from a uniformly random start cell
pub fn generate_maze<R: RandomSource>(rows: usize, cols: usize, rng: &mut R) -> MazeResult<WallState> {
    generate_maze_traced(rows, cols, rng).map(|trace| trace.walls)
}

/// Generate a maze from a random start, keeping the carve order
pub fn generate_maze_traced<R: RandomSource>(
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> MazeResult<MazeTrace> {
    if rows == 0 || cols == 0 {
        return Err(MazeError::InvalidDimension { rows, cols });
    }
    let row = rng.next_below(rows);
    let col = rng.next_below(cols);
    carve(rows, cols, Cell::new(row, col), rng)
}

/// Generate a maze starting the walk at `start`
pub fn generate_maze_from<R: RandomSource>(
    rows: usize,
    cols: usize,
    start: Cell,
    rng: &mut R,
) -> MazeResult<WallState> {
    carve(rows, cols, start, rng).map(|trace| trace.walls)
}

fn carve<R: RandomSource>(rows: usize, cols: usize, start: Cell, rng: &mut R) -> MazeResult<MazeTrace> {
    let mut walls = WallState::closed(rows, cols)?;
    if start.row >= rows || start.col >= cols {
        return Err(MazeError::StartOutOfBounds {
            row: start.row,
            col: start.col,
        });
    }

    let mut visited = vec![vec![false; cols]; rows];
    let mut stack = Vec::with_capacity(rows * cols);
    let mut carved = Vec::with_capacity(rows * cols - 1);

    enter(start, &mut visited, &mut stack, rng);

    while let Some(frame) = stack.last_mut() {
        let Some(&dir) = frame.neighbors.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let cell = frame.cell;

        let Some(next) = cell.step(dir, rows, cols) else {
            continue;
        };
        if visited[next.row][next.col] {
            continue;
        }

        let boundary = Boundary::between(cell, dir);
        let fresh = walls.open(boundary);
        debug_assert!(fresh, "boundary {boundary:?} opened twice");
        carved.push(boundary);

        // Descend before trying the next neighbor
        enter(next, &mut visited, &mut stack, rng);
    }

    log::debug!(
        "Generated {}x{} maze from ({}, {}) with {} passages",
        rows,
        cols,
        start.row,
        start.col,
        carved.len()
    );

    Ok(MazeTrace {
        start,
        walls,
        carved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::VecDeque;

    fn reachable(walls: &WallState, from: Cell) -> usize {
        let mut seen = vec![vec![false; walls.cols()]; walls.rows()];
        let mut queue = VecDeque::from([from]);
        seen[from.row][from.col] = true;
        let mut count = 0;
        while let Some(cell) = queue.pop_front() {
            count += 1;
            for next in walls.open_neighbors(cell) {
                if !seen[next.row][next.col] {
                    seen[next.row][next.col] = true;
                    queue.push_back(next);
                }
            }
        }
        count
    }

    #[test]
    fn test_identity_shuffle_3x3_from_center() {
        let mut rng = ScriptedRandom::identity();
        let walls = generate_maze_from(3, 3, Cell::new(1, 1), &mut rng).unwrap();

        assert_eq!(
            walls.vertical_open(),
            &[vec![false, true], vec![false, false], vec![true, true]]
        );
        assert_eq!(
            walls.horizontal_open(),
            &[vec![true, true, true], vec![true, false, true]]
        );
        assert_eq!(walls.open_count(), 8);
    }

    #[test]
    fn test_identity_shuffle_carve_order() {
        let mut rng = ScriptedRandom::identity();
        let trace = carve(3, 3, Cell::new(1, 1), &mut rng).unwrap();
        assert_eq!(
            trace.carved,
            vec![
                Boundary::Horizontal { row: 0, col: 1 },
                Boundary::Vertical { row: 0, col: 1 },
                Boundary::Horizontal { row: 0, col: 2 },
                Boundary::Horizontal { row: 1, col: 2 },
                Boundary::Vertical { row: 2, col: 1 },
                Boundary::Vertical { row: 2, col: 0 },
                Boundary::Horizontal { row: 1, col: 0 },
                Boundary::Horizontal { row: 0, col: 0 },
            ]
        );
        // Three swaps per visited cell
        assert_eq!(rng.consumed(), 9 * 3);
    }

    #[test]
    fn test_identity_shuffle_ascii() {
        let mut rng = ScriptedRandom::identity();
        let walls = generate_maze_from(3, 3, Cell::new(1, 1), &mut rng).unwrap();
        let expected = "\
+---+---+---+
|   |       |
+   +   +   +
|   |   |   |
+   +---+   +
|           |
+---+---+---+
";
        assert_eq!(walls.to_string(), expected);
    }

    #[test]
    fn test_scripted_draws_change_shape() {
        // First cell: i=3 swaps with 0, so Left comes first
        let mut rng = ScriptedRandom::new(vec![0]);
        let trace = carve(1, 3, Cell::new(0, 1), &mut rng).unwrap();
        assert_eq!(trace.carved[0], Boundary::Vertical { row: 0, col: 0 });
        assert_eq!(trace.walls.open_count(), 2);
    }

    #[test]
    fn test_single_cell() {
        let mut rng = Pcg32::seed_from_u64(7);
        let trace = generate_maze_traced(1, 1, &mut rng).unwrap();
        assert_eq!(trace.start, Cell::new(0, 0));
        assert!(trace.carved.is_empty());
        assert_eq!(trace.walls.boundary_count(), 0);
        assert_eq!(trace.walls.open_count(), 0);
        assert_eq!(trace.walls.to_string(), "+---+\n|   |\n+---+\n");
    }

    #[test]
    fn test_invalid_dimensions() {
        let mut rng = ScriptedRandom::identity();
        assert_eq!(
            generate_maze(0, 4, &mut rng),
            Err(MazeError::InvalidDimension { rows: 0, cols: 4 })
        );
        assert_eq!(
            generate_maze(4, 0, &mut rng),
            Err(MazeError::InvalidDimension { rows: 4, cols: 0 })
        );
        // Rejected before any draw
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_start_out_of_bounds() {
        let mut rng = ScriptedRandom::identity();
        assert_eq!(
            generate_maze_from(2, 2, Cell::new(2, 0), &mut rng),
            Err(MazeError::StartOutOfBounds { row: 2, col: 0 })
        );
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = generate_maze(12, 16, &mut Pcg32::seed_from_u64(42)).unwrap();
        let b = generate_maze(12, 16, &mut Pcg32::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);

        let c = generate_maze(12, 16, &mut Pcg32::seed_from_u64(43)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_spanning_tree() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let walls = generate_maze(6, 8, &mut rng).unwrap();
        assert_eq!(walls.open_count(), 6 * 8 - 1);
        assert_eq!(reachable(&walls, Cell::new(0, 0)), 6 * 8);
    }

    #[test]
    fn test_large_grid_does_not_recurse() {
        let mut rng = Pcg32::seed_from_u64(1);
        let walls = generate_maze(300, 300, &mut rng).unwrap();
        assert_eq!(walls.open_count(), 300 * 300 - 1);
    }

    #[test]
    fn test_passage_respects_grid_edges() {
        let mut rng = ScriptedRandom::identity();
        let walls = generate_maze_from(3, 3, Cell::new(1, 1), &mut rng).unwrap();
        assert!(!walls.passage(Cell::new(0, 0), Direction::Up));
        assert!(!walls.passage(Cell::new(0, 0), Direction::Left));
        assert!(walls.passage(Cell::new(0, 0), Direction::Down));
        assert!(walls.passage(Cell::new(1, 0), Direction::Up));
        assert!(!walls.passage(Cell::new(0, 0), Direction::Right));
    }

    #[test]
    fn test_deserialize_round_trip() {
        let walls = generate_maze(4, 5, &mut Pcg32::seed_from_u64(11)).unwrap();
        let json = serde_json::to_string(&walls).unwrap();
        let back: WallState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, walls);
    }

    #[test]
    fn test_deserialize_rejects_bad_shapes() {
        // Missing a vertical row
        let short = r#"{"rows":2,"cols":2,"vertical_open":[[true]],"horizontal_open":[[false,false]]}"#;
        assert!(serde_json::from_str::<WallState>(short).is_err());

        // Missing the horizontal row
        let no_horizontal = r#"{"rows":2,"cols":2,"vertical_open":[[true],[false]],"horizontal_open":[]}"#;
        assert!(serde_json::from_str::<WallState>(no_horizontal).is_err());

        // Ragged row
        let ragged = r#"{"rows":2,"cols":2,"vertical_open":[[true],[false,true]],"horizontal_open":[[false,false]]}"#;
        assert!(serde_json::from_str::<WallState>(ragged).is_err());

        let empty = r#"{"rows":0,"cols":3,"vertical_open":[],"horizontal_open":[]}"#;
        assert!(serde_json::from_str::<WallState>(empty).is_err());

        let ok = r#"{"rows":2,"cols":2,"vertical_open":[[true],[false]],"horizontal_open":[[false,true]]}"#;
        let walls: WallState = serde_json::from_str(ok).unwrap();
        assert_eq!(walls.closed_count(), 2);
        assert!(walls.is_open(Boundary::Horizontal { row: 0, col: 1 }));
    }
}

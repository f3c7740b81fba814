//! Maze generation: randomized frontier growth plus an optional braiding
//! pass.
//!
//! The generator grows a perfect maze on the odd-coordinate sublattice:
//! every carved corridor is exactly one tile wide and parallel corridors
//! are always separated by a wall, with no post-processing. [`MazeGen::braid`]
//! can then delete a few interior walls to reintroduce cycles.

use std::collections::HashSet;
use std::fmt;

use murk_core::Point;
use rand::{Rng, RngExt};

use crate::grid::TileGrid;
use crate::ordered_set::OrderedSet;

/// Smallest grid (per axis, after odd-normalization) the generator accepts.
/// Anything below this has no room for frontier seeds.
pub const MIN_MAZE_SIZE: i32 = 5;

/// Maze generator operating on a [`TileGrid`] of all-wall tiles.
pub struct MazeGen<R: Rng> {
    pub rng: R,
    pub grid: TileGrid,
}

impl<R: Rng> MazeGen<R> {
    /// Create a new generator owning the given grid.
    pub fn with_grid(grid: TileGrid, rng: R) -> Self {
        Self { rng, grid }
    }

    /// Carve a perfect maze into the grid.
    ///
    /// Starting from `(1, 1)`, repeatedly pick a random frontier cell, join
    /// it to the maze through the wall between it and a random already-carved
    /// distance-2 neighbor, and add its own uncarved distance-2 neighbors to
    /// the frontier. The frontier empties exactly when every odd-coordinate
    /// cell has been incorporated, so the open subgraph is a tree spanning
    /// the whole lattice.
    ///
    /// Returns the number of carved (open) tiles.
    pub fn carve(&mut self) -> Result<usize, GenError> {
        let (w, h) = (self.grid.width(), self.grid.height());
        if w < MIN_MAZE_SIZE || h < MIN_MAZE_SIZE {
            return Err(GenError::TooSmall {
                width: w,
                height: h,
            });
        }

        let start = Point::new(1, 1);
        self.grid.open(start);

        let mut in_maze: HashSet<Point> = HashSet::new();
        in_maze.insert(start);

        let mut frontier = OrderedSet::new();
        frontier.insert(Point::new(3, 1));
        frontier.insert(Point::new(1, 3));

        let mut carved = 1usize;

        while let Some(cell) = frontier.random(&mut self.rng) {
            let neighbors = self.lattice_neighbors(cell);
            let joined: Vec<Point> = neighbors
                .iter()
                .copied()
                .filter(|n| in_maze.contains(n))
                .collect();

            // Every frontier cell was seeded next to a carved one, but be
            // tolerant of an empty pick rather than panicking.
            let Some(&target) = joined.get(self.rng.random_range(0..joined.len().max(1))) else {
                frontier.remove(cell);
                continue;
            };

            // Open the wall midway between the frontier cell and its target,
            // then the frontier cell itself.
            let wall = Point::new((cell.x + target.x) / 2, (cell.y + target.y) / 2);
            self.grid.open(wall);
            self.grid.open(cell);
            carved += 2;

            in_maze.insert(cell);
            frontier.remove(cell);

            for n in neighbors {
                if !in_maze.contains(&n) {
                    frontier.insert(n);
                }
            }
        }

        Ok(carved)
    }

    /// Knock out interior walls with probability `chance` each, turning the
    /// perfect maze into a braided one. Removing a wall only ever adds
    /// passages, so connectivity is preserved. Border walls are kept.
    ///
    /// Returns the number of walls opened.
    pub fn braid(&mut self, chance: f64) -> usize {
        let (w, h) = (self.grid.width(), self.grid.height());
        let walls: Vec<Point> = self
            .grid
            .iter()
            .filter(|t| t.is_wall)
            .map(|t| t.pos)
            .collect();

        let mut opened = 0;
        for p in walls {
            if p.x == 0 || p.y == 0 || p.x == w - 1 || p.y == h - 1 {
                continue;
            }
            if self.rng.random::<f64>() < chance {
                self.grid.open(p);
                opened += 1;
            }
        }
        opened
    }

    /// Distance-2 cardinal neighbors of `p` strictly inside the border.
    /// Staying inside the border is what bounds the growth: the outermost
    /// ring is never a candidate, so it stays wall.
    fn lattice_neighbors(&self, p: Point) -> Vec<Point> {
        const DIRS: [Point; 4] = [
            Point::new(2, 0),
            Point::new(0, 2),
            Point::new(-2, 0),
            Point::new(0, -2),
        ];
        let (w, h) = (self.grid.width(), self.grid.height());
        DIRS.iter()
            .map(|&d| p + d)
            .filter(|n| n.x > 0 && n.y > 0 && n.x < w - 1 && n.y < h - 1)
            .collect()
    }
}

/// Errors from maze generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenError {
    /// The grid is too small to seed a frontier.
    TooSmall { width: i32, height: i32 },
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::TooSmall { width, height } => write!(
                f,
                "maze grid {width}x{height} is too small (minimum {MIN_MAZE_SIZE}x{MIN_MAZE_SIZE})"
            ),
        }
    }
}

impl std::error::Error for GenError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::collections::VecDeque;

    fn generate(width: i32, height: i32, seed: u64) -> TileGrid {
        let mut mg = MazeGen::with_grid(TileGrid::new(width, height), SmallRng::seed_from_u64(seed));
        mg.carve().unwrap();
        mg.grid
    }

    /// Flood fill from (1,1) over open 4-adjacency, independent of any
    /// pathfinding code.
    fn reachable(grid: &TileGrid) -> HashSet<Point> {
        let start = Point::new(1, 1);
        let mut seen = HashSet::new();
        if grid.is_wall(start) {
            return seen;
        }
        seen.insert(start);
        let mut queue = VecDeque::from([start]);
        while let Some(p) = queue.pop_front() {
            for n in p.neighbors_4() {
                if !grid.is_wall(n) && seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        seen
    }

    #[test]
    fn rejects_degenerate_sizes() {
        let mut mg = MazeGen::with_grid(TileGrid::new(3, 3), SmallRng::seed_from_u64(0));
        assert_eq!(
            mg.carve(),
            Err(GenError::TooSmall {
                width: 3,
                height: 3
            })
        );
    }

    #[test]
    fn every_open_tile_is_reachable() {
        for seed in 0..5 {
            let grid = generate(31, 31, seed);
            let seen = reachable(&grid);
            let open = grid.open_tiles().count();
            assert_eq!(seen.len(), open, "seed {seed}: disconnected maze");
        }
    }

    #[test]
    fn carved_maze_is_a_tree() {
        // A perfect maze has exactly openCount - 1 open-to-open adjacencies.
        for seed in 0..5 {
            let grid = generate(21, 21, seed);
            let open: Vec<Point> = grid.open_tiles().map(|t| t.pos).collect();
            let mut edges = 0usize;
            for &p in &open {
                for n in [p.shift(1, 0), p.shift(0, 1)] {
                    if !grid.is_wall(n) {
                        edges += 1;
                    }
                }
            }
            assert_eq!(edges, open.len() - 1, "seed {seed}: open subgraph has a cycle");
        }
    }

    #[test]
    fn spans_every_odd_cell() {
        let grid = generate(15, 15, 3);
        for y in (1..grid.height()).step_by(2) {
            for x in (1..grid.width()).step_by(2) {
                assert!(!grid.is_wall(Point::new(x, y)), "({x}, {y}) left uncarved");
            }
        }
    }

    #[test]
    fn border_stays_wall() {
        let grid = generate(30, 30, 9);
        let (w, h) = (grid.width(), grid.height());
        for t in grid.iter() {
            if t.pos.x == 0 || t.pos.y == 0 || t.pos.x == w - 1 || t.pos.y == h - 1 {
                assert!(t.is_wall, "border tile {} carved open", t.pos);
            }
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate(25, 25, 1234);
        let b = generate(25, 25, 1234);
        for p in a.bounds() {
            assert_eq!(a.is_wall(p), b.is_wall(p));
        }
    }

    #[test]
    fn braid_only_opens_interior_walls() {
        let mut mg =
            MazeGen::with_grid(TileGrid::new(21, 21), SmallRng::seed_from_u64(77));
        mg.carve().unwrap();
        let open_before = mg.grid.open_tiles().count();
        let opened = mg.braid(0.2);
        assert_eq!(mg.grid.open_tiles().count(), open_before + opened);

        // Still one connected component, and the border is intact.
        let seen = reachable(&mg.grid);
        assert_eq!(seen.len(), mg.grid.open_tiles().count());
        let (w, h) = (mg.grid.width(), mg.grid.height());
        for t in mg.grid.iter() {
            if t.pos.x == 0 || t.pos.y == 0 || t.pos.x == w - 1 || t.pos.y == h - 1 {
                assert!(t.is_wall);
            }
        }
    }

    #[test]
    fn braid_zero_chance_changes_nothing() {
        let mut mg = MazeGen::with_grid(TileGrid::new(15, 15), SmallRng::seed_from_u64(5));
        mg.carve().unwrap();
        let before: Vec<bool> = mg.grid.iter().map(|t| t.is_wall).collect();
        assert_eq!(mg.braid(0.0), 0);
        let after: Vec<bool> = mg.grid.iter().map(|t| t.is_wall).collect();
        assert_eq!(before, after);
    }
}

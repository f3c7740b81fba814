//! The [`TileGrid`] type — a flat, fixed-size grid of wall/open tiles.

use murk_core::{Point, Range};
use rand::{Rng, RngExt};

/// A unit cell of the maze: a position and a wall flag.
///
/// A tile's position never changes after creation; only `is_wall` mutates,
/// and only from `true` to `false` (carving).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub pos: Point,
    pub is_wall: bool,
}

/// A fixed-size 2D grid of [`Tile`]s backed by flat row-major storage.
///
/// Dimensions are normalized to odd integers (even input is incremented by
/// one) so the distance-2 generation lattice has a well-defined layout.
/// After generation the border rows and columns are always walls, which
/// bounds both carving and pathfinding without explicit boundary checks.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Create a grid of all-wall tiles. Even dimensions round up to odd;
    /// non-positive dimensions are clamped to 1.
    pub fn new(width: i32, height: i32) -> Self {
        let width = normalize_odd(width);
        let height = normalize_odd(height);
        let tiles = Range::new(0, 0, width, height)
            .iter()
            .map(|pos| Tile { pos, is_wall: true })
            .collect();
        Self {
            width,
            height,
            tiles,
        }
    }

    /// Width (always odd).
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height (always odd).
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The bounding range of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height {
            Some((p.y * self.width + p.x) as usize)
        } else {
            None
        }
    }

    /// The tile at `p`, or `None` out of range. Callers must treat `None`
    /// as not traversable.
    #[inline]
    pub fn at(&self, p: Point) -> Option<&Tile> {
        self.idx(p).map(|i| &self.tiles[i])
    }

    /// Whether `p` is a wall. Out-of-range positions count as walls.
    #[inline]
    pub fn is_wall(&self, p: Point) -> bool {
        self.at(p).is_none_or(|t| t.is_wall)
    }

    /// Carve the tile at `p` open. No-op out of range.
    ///
    /// Only the generator carves; the wall flag never flips back.
    pub(crate) fn open(&mut self, p: Point) {
        if let Some(i) = self.idx(p) {
            self.tiles[i].is_wall = false;
        }
    }

    /// Row-major iterator over all tiles in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Iterator over the open (non-wall) tiles.
    pub fn open_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|t| !t.is_wall)
    }

    /// A uniformly random open tile position, or `None` if the grid has no
    /// open tile within the sampling budget.
    pub fn random_open(&self, rng: &mut impl Rng) -> Option<Point> {
        for _ in 0..1000 {
            let p = Point::new(
                rng.random_range(0..self.width),
                rng.random_range(0..self.height),
            );
            if !self.is_wall(p) {
                return Some(p);
            }
        }
        None
    }
}

#[inline]
fn normalize_odd(n: i32) -> i32 {
    let n = n.max(1);
    if n % 2 == 0 { n + 1 } else { n }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_dimensions_round_up_to_odd() {
        let g = TileGrid::new(10, 10);
        assert_eq!(g.width(), 11);
        assert_eq!(g.height(), 11);
    }

    #[test]
    fn odd_dimensions_unchanged() {
        let g = TileGrid::new(11, 11);
        assert_eq!(g.width(), 11);
        assert_eq!(g.height(), 11);
    }

    #[test]
    fn starts_all_walls() {
        let g = TileGrid::new(7, 7);
        assert_eq!(g.iter().count(), 49);
        assert!(g.iter().all(|t| t.is_wall));
    }

    #[test]
    fn out_of_range_lookup() {
        let g = TileGrid::new(5, 5);
        assert!(g.at(Point::new(-1, 0)).is_none());
        assert!(g.at(Point::new(5, 0)).is_none());
        assert!(g.at(Point::new(0, 5)).is_none());
        assert!(g.is_wall(Point::new(99, 99)));
    }

    #[test]
    fn tiles_know_their_position() {
        let g = TileGrid::new(5, 5);
        for p in g.bounds() {
            assert_eq!(g.at(p).map(|t| t.pos), Some(p));
        }
    }

    #[test]
    fn open_flips_wall_once() {
        let mut g = TileGrid::new(5, 5);
        let p = Point::new(1, 1);
        g.open(p);
        assert!(!g.is_wall(p));
        // out of range is a no-op
        g.open(Point::new(-1, -1));
    }

    #[test]
    fn random_open_finds_an_open_tile() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let mut g = TileGrid::new(5, 5);
        g.open(Point::new(3, 3));
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(g.random_open(&mut rng), Some(Point::new(3, 3)));
    }

    #[test]
    fn random_open_on_solid_grid_is_none() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let g = TileGrid::new(5, 5);
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(g.random_open(&mut rng), None);
    }
}

//! The keyboard-driven player: continuous movement against maze walls.

use murk_core::{Point, Vec2};
use murk_maze::TileGrid;

/// Player collision square, as a fraction of a tile.
pub const PLAYER_SIZE: f32 = 0.8;

/// Fraction of the collision square actually checked against walls; a
/// little slack lets the player slide into corridor mouths without
/// pixel-perfect alignment.
const LENIENCE: f32 = 0.9;

/// The player's continuous position in tile units.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
}

impl Player {
    /// Place the player at the maze start tile.
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(1.0, 1.0),
        }
    }

    /// The tile the player is nearest to.
    #[inline]
    pub fn tile(&self) -> Point {
        self.pos.round()
    }

    /// Attempt to move by `(dx, dy)`, resolving each axis independently so
    /// that sliding along a wall works. An axis move is allowed only when
    /// the two leading corners of the leniated collision square land on
    /// open tiles; out-of-range tiles count as walls.
    pub fn move_by(&mut self, dx: f32, dy: f32, grid: &TileGrid) {
        let new_x = self.pos.x + dx;
        let new_y = self.pos.y + dy;

        let near = (1.0 - LENIENCE * PLAYER_SIZE) / 2.0;
        let far = (1.0 + LENIENCE * PLAYER_SIZE) / 2.0;
        let left = (new_x + near).floor() as i32;
        let right = (new_x + far).floor() as i32;
        let top = (new_y + near).floor() as i32;
        let bottom = (new_y + far).floor() as i32;

        let open = |x: i32, y: i32| !grid.is_wall(Point::new(x, y));

        if (dx < 0.0 && open(left, top) && open(left, bottom))
            || (dx > 0.0 && open(right, top) && open(right, bottom))
            || dx == 0.0
        {
            self.pos.x = new_x;
        }

        if (dy < 0.0 && open(left, top) && open(right, top))
            || (dy > 0.0 && open(left, bottom) && open(right, bottom))
            || dy == 0.0
        {
            self.pos.y = new_y;
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

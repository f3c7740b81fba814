use murk_core::Point;

/// Minimal pathfinding interface — provides neighbor enumeration.
///
/// An edge exists from `p` to every point pushed into `buf`, with uniform
/// cost 1. Walls and out-of-range positions are simply never pushed.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

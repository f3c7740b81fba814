//! **murk-core** — geometry primitives shared across the *murk* maze-chase
//! engine.
//!
//! This crate provides the foundational types used by the maze, pathfinding
//! and game crates: an integer tile coordinate ([`Point`]), a half-open
//! rectangle with row-major iteration ([`Range`]), and a float position in
//! tile units ([`Vec2`]) for entities that move continuously between tiles.

pub mod geom;
pub mod vec2;

pub use geom::{Point, Range, RangeIter};
pub use vec2::Vec2;

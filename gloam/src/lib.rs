//! Gloam — a maze-chase game built on the murk engine.
//!
//! The player carries a small flickering aura of visibility through a
//! procedurally generated maze, racing wandering chasers to a portal tile.
//! This crate holds the simulation: entities, waypoint navigation, player
//! collision and the session state machine. Rendering and input live in
//! the terminal front-end binary.

pub mod entity;
pub mod game;
pub mod navigator;
pub mod player;

pub use game::{Game, GameConfig, InputState, Outcome};

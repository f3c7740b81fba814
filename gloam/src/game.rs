//! Core session state: maze, player, entities and the simulation tick.

use murk_core::{Point, Vec2};
use murk_maze::{GenError, MazeGen, TileGrid};
use murk_paths::{PathFinder, Pather, manhattan};
use rand::rngs::SmallRng;
use rand::{RngExt, SeedableRng};

use crate::entity::{Entity, Role};
use crate::player::{PLAYER_SIZE, Player};

/// Session parameters. Speeds are in tiles per second, radii in tiles.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub maze_width: i32,
    pub maze_height: i32,
    pub player_speed: f32,
    pub chaser_speed: f32,
    pub chaser_count: usize,
    pub aura_radius: f32,
    pub flicker_radius: f32,
    /// Angular speed of the aura's cosine flicker, radians per second.
    pub flicker_speed: f32,
    /// Probability that each interior wall is knocked out after carving.
    pub braid_chance: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            maze_width: 30,
            maze_height: 30,
            player_speed: 2.5,
            chaser_speed: 2.0,
            chaser_count: 3,
            aura_radius: 1.5,
            flicker_radius: 0.04,
            flicker_speed: 6.25,
            braid_chance: 0.01,
        }
    }
}

/// Direction keys held down this tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// How the run stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Playing,
    /// The player reached the portal.
    Escaped,
    /// A chaser touched the player.
    Caught,
}

/// 4-connected open adjacency over the maze grid, for the pathfinder.
pub struct MazePather<'a> {
    pub grid: &'a TileGrid,
}

impl Pather for MazePather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.neighbors_4() {
            if !self.grid.is_wall(n) {
                buf.push(n);
            }
        }
    }
}

/// One game session.
///
/// Owns the grid, the player, the entities and the pathfinder. The grid is
/// written once per generation and read-only afterwards; every chaser owns
/// its movement queue and plans independently, so a tick never shares
/// mutable state between entities.
pub struct Game {
    pub grid: TileGrid,
    pub player: Player,
    pub entities: Vec<Entity>,
    pub outcome: Outcome,
    /// Current (flickered) visibility radius around the player.
    pub aura_radius: f32,
    /// Current aura brightness in `0.2..=1.0`.
    pub aura_intensity: f32,
    pub config: GameConfig,
    finder: PathFinder,
    rng: SmallRng,
    elapsed: f32,
}

impl Game {
    /// Create a session from OS entropy.
    pub fn new(config: GameConfig) -> Result<Self, GenError> {
        Self::with_rng(config, rand::make_rng())
    }

    /// Create a session with a caller-supplied generator (seedable for
    /// deterministic runs).
    pub fn with_rng(config: GameConfig, mut rng: SmallRng) -> Result<Self, GenError> {
        let grid = generate(&config, &mut rng)?;
        let mut game = Self {
            grid,
            player: Player::new(),
            entities: Vec::new(),
            outcome: Outcome::Playing,
            aura_radius: config.aura_radius,
            aura_intensity: 1.0,
            config,
            finder: PathFinder::new(),
            rng,
            elapsed: 0.0,
        };
        game.spawn_entities();
        Ok(game)
    }

    /// Tear the session down to a fresh maze.
    ///
    /// The grid is regenerated wholesale before entities are replaced, so
    /// no plan ever runs against a half-rebuilt maze: the fresh chasers
    /// start idle and only replan inside the next [`tick`](Self::tick).
    pub fn reset(&mut self) -> Result<(), GenError> {
        self.grid = generate(&self.config, &mut self.rng)?;
        self.player = Player::new();
        self.spawn_entities();
        self.outcome = Outcome::Playing;
        self.aura_radius = self.config.aura_radius;
        self.aura_intensity = 1.0;
        self.elapsed = 0.0;
        log::info!("maze regenerated, session reset");
        Ok(())
    }

    /// Advance the simulation by `dt` seconds.
    pub fn tick(&mut self, dt: f32, input: InputState) {
        if self.outcome != Outcome::Playing {
            return;
        }
        self.elapsed += dt;

        // Aura: slow cosine swell plus a bounded random shimmer.
        self.aura_radius = self.config.aura_radius
            + self.config.flicker_radius * (self.elapsed * self.config.flicker_speed).cos();
        let jitter = 0.15 * (self.rng.random::<f32>() - 0.5);
        self.aura_intensity = (self.aura_intensity + jitter).clamp(0.2, 1.0);

        // Player movement, one axis per input direction.
        let step = self.config.player_speed * dt;
        if input.left {
            self.player.move_by(-step, 0.0, &self.grid);
        }
        if input.right {
            self.player.move_by(step, 0.0, &self.grid);
        }
        if input.up {
            self.player.move_by(0.0, -step, &self.grid);
        }
        if input.down {
            self.player.move_by(0.0, step, &self.grid);
        }

        // Chasers: idle ones pick a fresh random destination and replan;
        // everyone then follows their own queue.
        let pather = MazePather { grid: &self.grid };
        for ent in self.entities.iter_mut() {
            let Role::Chaser(nav) = &mut ent.role else {
                continue;
            };
            if nav.is_idle() {
                if let Some(target) = self.grid.random_open(&mut self.rng) {
                    let from = ent.pos.round();
                    match self.finder.find_path(&pather, from, target) {
                        Some(path) => {
                            log::debug!("chaser at {from} heads for {target}");
                            nav.follow(path);
                        }
                        // No route: stay idle and roll another target next
                        // tick.
                        None => log::debug!("chaser at {from} found no route to {target}"),
                    }
                }
            }
            nav.advance(&mut ent.pos, dt);
        }

        // Contact: the portal is entity 0, so escaping wins a tie.
        for ent in &self.entities {
            if ent.collides(self.player.pos, PLAYER_SIZE) {
                self.outcome = match ent.role {
                    Role::Portal => Outcome::Escaped,
                    Role::Chaser(_) => Outcome::Caught,
                };
                log::info!("run over: {:?}", self.outcome);
                break;
            }
        }
    }

    /// Where the portal sits: the far corner cell of the lattice.
    pub fn portal_tile(&self) -> Point {
        Point::new(self.grid.width() - 2, self.grid.height() - 2)
    }

    fn spawn_entities(&mut self) {
        self.entities.clear();
        let portal = self.portal_tile();
        self.entities.push(Entity::portal(Vec2::from(portal)));

        let start = Point::new(1, 1);
        let min_dist = (self.grid.width() + self.grid.height()) / 4;
        for _ in 0..self.config.chaser_count {
            let spawn = (0..100).find_map(|_| {
                self.grid
                    .random_open(&mut self.rng)
                    .filter(|&p| p != portal && manhattan(p, start) >= min_dist)
            });
            match spawn {
                Some(p) => self
                    .entities
                    .push(Entity::chaser(Vec2::from(p), self.config.chaser_speed)),
                None => log::warn!("no spawn tile far enough from the start"),
            }
        }
    }
}

fn generate(config: &GameConfig, rng: &mut SmallRng) -> Result<TileGrid, GenError> {
    let grid = TileGrid::new(config.maze_width, config.maze_height);
    let mut mg = MazeGen::with_grid(grid, &mut *rng);
    mg.carve()?;
    mg.braid(config.braid_chance);
    Ok(mg.grid)
}

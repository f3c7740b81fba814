//! Uniform-cost Dijkstra shortest path between two tiles.

use std::collections::{HashMap, HashSet};

use murk_core::Point;

use crate::frontier::PriorityFrontier;
use crate::traits::Pather;

/// Single-source shortest-path search over a [`Pather`].
///
/// All search state — tentative distances, predecessor links, the visited
/// set and the open queue — is scoped to one [`find_path`](Self::find_path)
/// call; the struct only retains the allocations between calls. Each query
/// runs from scratch: with tens-by-tens mazes and replans only on path
/// exhaustion, there is nothing worth caching.
pub struct PathFinder {
    dist: HashMap<Point, i32>,
    prev: HashMap<Point, Point>,
    visited: HashSet<Point>,
    open: PriorityFrontier<Point, ()>,
    nbuf: Vec<Point>,
}

impl PathFinder {
    /// Create a new pathfinder.
    pub fn new() -> Self {
        Self {
            dist: HashMap::new(),
            prev: HashMap::new(),
            visited: HashSet::new(),
            open: PriorityFrontier::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Compute the shortest path from `from` to `to`.
    ///
    /// Returns the full tile sequence including both endpoints, or `None`
    /// if `to` is unreachable (walled off, or itself a wall). Callers treat
    /// `None` as "no route" and pick a different destination; it is never
    /// an error.
    pub fn find_path<P: Pather>(&mut self, pather: &P, from: Point, to: Point) -> Option<Vec<Point>> {
        if from == to {
            return Some(vec![from]);
        }

        self.dist.clear();
        self.prev.clear();
        self.visited.clear();
        self.open.clear();

        self.dist.insert(from, 0);
        self.open.insert(from, (), 0);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some((current, (), d)) = self.open.extract_min() {
            if !self.visited.insert(current) {
                continue;
            }
            // Stop as soon as the target is settled; its distance is final.
            if current == to {
                break;
            }

            nbuf.clear();
            pather.neighbors(current, &mut nbuf);

            for &np in nbuf.iter() {
                if self.visited.contains(&np) {
                    continue;
                }
                let alt = d + 1;
                let known = self.dist.get(&np).copied();
                if known.is_none_or(|cur| alt < cur) {
                    self.dist.insert(np, alt);
                    self.prev.insert(np, current);
                    match known {
                        None => self.open.insert(np, (), alt),
                        Some(_) => self.open.decrease_priority(np, alt),
                    }
                }
            }
        }

        self.nbuf = nbuf;

        // Walk predecessor links backward; a break in the chain means the
        // target was never reached.
        if !self.prev.contains_key(&to) {
            return None;
        }
        let mut path = vec![to];
        let mut cur = to;
        while cur != from {
            match self.prev.get(&cur) {
                Some(&p) => {
                    path.push(p);
                    cur = p;
                }
                None => return None,
            }
        }
        path.reverse();
        Some(path)
    }
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::new()
    }
}

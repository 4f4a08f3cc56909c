use alloc::vec::Vec;
use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::*;

/// Randomness consumed by the layout generators.
pub trait BombSource {
    /// Uniform coordinates on a `size` by `size` grid.
    fn pick_coords(&mut self, size: Coord) -> Coord2;

    /// Uniform value in `[0, 1)`.
    fn fraction(&mut self) -> f64;
}

impl<S: BombSource + ?Sized> BombSource for &mut S {
    fn pick_coords(&mut self, size: Coord) -> Coord2 {
        (**self).pick_coords(size)
    }

    fn fraction(&mut self) -> f64 {
        (**self).fraction()
    }
}

/// Seeded pseudo random source used for real play.
#[derive(Clone, Debug)]
pub struct SeededSource {
    rng: SmallRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl BombSource for SeededSource {
    fn pick_coords(&mut self, size: Coord) -> Coord2 {
        (self.rng.random_range(0..size), self.rng.random_range(0..size))
    }

    fn fraction(&mut self) -> f64 {
        self.rng.random()
    }
}

/// Replays fixed coordinates and fractions in order, wrapping around when exhausted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScriptedSource {
    coords: Vec<Coord2>,
    fractions: Vec<f64>,
    next_coords: usize,
    next_fraction: usize,
}

impl ScriptedSource {
    pub fn new(coords: impl Into<Vec<Coord2>>) -> Self {
        Self {
            coords: coords.into(),
            ..Default::default()
        }
    }

    pub fn with_fractions(mut self, fractions: impl Into<Vec<f64>>) -> Self {
        self.fractions = fractions.into();
        self
    }
}

impl BombSource for ScriptedSource {
    fn pick_coords(&mut self, size: Coord) -> Coord2 {
        if self.coords.is_empty() || size == 0 {
            return (0, 0);
        }
        let (row, col) = self.coords[self.next_coords % self.coords.len()];
        self.next_coords += 1;
        (row % size, col % size)
    }

    fn fraction(&mut self) -> f64 {
        if self.fractions.is_empty() {
            return 0.0;
        }
        let fraction = self.fractions[self.next_fraction % self.fractions.len()];
        self.next_fraction += 1;
        fraction
    }
}

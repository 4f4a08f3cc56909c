#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use config::*;
pub use countdown::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;
pub use view::*;

mod cell;
mod config;
mod countdown;
mod engine;
mod error;
mod generator;
mod session;
mod types;
mod view;

/// Where the bombs of one round sit. Immutable once generated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BombLayout {
    bomb_mask: Array2<bool>,
    bomb_count: CellCount,
}

impl BombLayout {
    pub fn from_bomb_mask(bomb_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = bomb_mask.dim();
        if rows != cols || rows > usize::from(Coord::MAX) {
            return Err(GameError::InvalidGridSize);
        }

        let bomb_count = bomb_mask
            .iter()
            .filter(|&&is_bomb| is_bomb)
            .count()
            .try_into()
            .map_err(|_| GameError::TooManyBombs)?;
        Ok(Self {
            bomb_mask,
            bomb_count,
        })
    }

    pub fn from_bomb_coords(size: Coord, bomb_coords: &[Coord2]) -> Result<Self> {
        let mut bomb_mask: Array2<bool> = Array2::default((size, size).to_nd_index());

        for &coords in bomb_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            bomb_mask[coords.to_nd_index()] = true;
        }

        Self::from_bomb_mask(bomb_mask)
    }

    /// Generators always produce a square mask no wider than `Coord::MAX`.
    pub(crate) fn from_generated(bomb_mask: Array2<bool>, bomb_count: CellCount) -> Self {
        Self {
            bomb_mask,
            bomb_count,
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Side length of the square grid.
    pub fn size(&self) -> Coord {
        // the constructors reject anything wider than `Coord::MAX`
        self.bomb_mask.nrows() as Coord
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.bomb_count
    }

    pub fn total_cells(&self) -> CellCount {
        square(self.size())
    }

    pub fn bomb_count(&self) -> CellCount {
        self.bomb_count
    }

    pub fn contains_bomb(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn iter_bombs(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.bomb_mask
            .indexed_iter()
            .filter(|&(_, &is_bomb)| is_bomb)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.bomb_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for BombLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.bomb_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitBomb,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitBomb => true,
            Won => true,
        }
    }

    pub const fn ends_round(self) -> bool {
        matches!(self, Self::HitBomb | Self::Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn layout_from_coords_counts_unique_bombs() {
        let layout = BombLayout::from_bomb_coords(3, &[(0, 0), (2, 1), (0, 0)]).unwrap();

        assert_eq!(layout.size(), 3);
        assert_eq!(layout.bomb_count(), 2);
        assert_eq!(layout.safe_cell_count(), 7);
        assert!(layout.contains_bomb((2, 1)));
        assert!(!layout.contains_bomb((1, 2)));
        assert_eq!(layout.iter_bombs().collect::<Vec<_>>(), [(0, 0), (2, 1)]);
    }

    #[test]
    fn layout_rejects_out_of_bounds_bomb() {
        assert_eq!(
            BombLayout::from_bomb_coords(3, &[(3, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn layout_rejects_non_square_mask() {
        let mask: Array2<bool> = Array2::default([2, 3]);
        assert_eq!(
            BombLayout::from_bomb_mask(mask),
            Err(GameError::InvalidGridSize)
        );
    }

    #[test]
    fn validate_coords_checks_both_axes() {
        let layout = BombLayout::from_bomb_coords(5, &[]).unwrap();
        assert_eq!(layout.validate_coords((4, 4)), Ok((4, 4)));
        assert_eq!(layout.validate_coords((5, 0)), Err(GameError::InvalidCoords));
        assert_eq!(layout.validate_coords((0, 5)), Err(GameError::InvalidCoords));
    }
}

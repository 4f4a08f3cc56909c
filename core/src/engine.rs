use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl RoundState {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// One round: a fixed bomb layout plus the cells the player has uncovered so far.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundEngine {
    layout: BombLayout,
    ruleset: Ruleset,
    grid: Array2<Cell>,
    revealed_safe: Saturating<CellCount>,
    state: RoundState,
    triggered_bomb: Option<Coord2>,
}

impl RoundEngine {
    pub fn new(layout: BombLayout, ruleset: Ruleset) -> Self {
        let grid = layout.to_cells();
        Self {
            layout,
            ruleset,
            grid,
            revealed_safe: Saturating(0),
            state: Default::default(),
            triggered_bomb: None,
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn ruleset(&self) -> Ruleset {
        self.ruleset
    }

    pub fn layout(&self) -> &BombLayout {
        &self.layout
    }

    pub fn size(&self) -> Coord {
        self.layout.size()
    }

    pub fn bomb_count(&self) -> CellCount {
        self.layout.bomb_count()
    }

    pub fn safe_cells_left(&self) -> CellCount {
        self.layout.safe_cell_count() - self.revealed_safe.0
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid[coords.to_nd_index()]
    }

    pub fn triggered_bomb(&self) -> Option<Coord2> {
        self.triggered_bomb
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.layout.validate_coords(coords)?;

        if self.grid[coords.to_nd_index()].is_revealed() {
            return Ok(RevealOutcome::NoChange);
        }
        self.check_playing()?;

        let cell = &mut self.grid[coords.to_nd_index()];
        cell.reveal();

        if cell.is_bomb() {
            log::debug!("bomb revealed at {:?}", coords);
            self.triggered_bomb = Some(coords);
            if matches!(self.ruleset, Ruleset::Infection) {
                let infected = self.infect_neighbors(coords);
                log::debug!("infected {} neighbour(s): {:?}", infected.len(), infected);
            }
            self.state = RoundState::Lost;
            return Ok(RevealOutcome::HitBomb);
        }

        self.revealed_safe += 1;
        log::trace!(
            "safe cell revealed at {:?}, {} left",
            coords,
            self.safe_cells_left()
        );

        if self.all_safe_revealed() {
            self.state = RoundState::Won;
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    fn infect_neighbors(&mut self, coords: Coord2) -> SmallVec<[Coord2; 8]> {
        let infected: SmallVec<[Coord2; 8]> = self.layout.iter_neighbors(coords).collect();
        for &pos in &infected {
            self.grid[pos.to_nd_index()].infect();
        }
        infected
    }

    fn all_safe_revealed(&self) -> bool {
        self.grid
            .iter()
            .all(|cell| cell.is_bomb() || cell.is_revealed())
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_over() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

impl BombLayout {
    fn to_cells(&self) -> Array2<Cell> {
        let size = self.size();
        Array2::from_shape_fn((size, size).to_nd_index(), |(row, col)| {
            Cell::new(self[(row as Coord, col as Coord)])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(size: Coord, bombs: &[Coord2], ruleset: Ruleset) -> RoundEngine {
        RoundEngine::new(BombLayout::from_bomb_coords(size, bombs).unwrap(), ruleset)
    }

    #[test]
    fn new_round_has_nothing_revealed() {
        let engine = engine(3, &[(0, 2)], Ruleset::Scatter);

        assert_eq!(engine.state(), RoundState::Playing);
        assert_eq!(engine.safe_cells_left(), 8);
        assert!(engine.cell_at((0, 2)).is_bomb());
        assert!(!engine.cell_at((0, 2)).is_revealed());
        assert!(!engine.cell_at((1, 1)).is_bomb());
    }

    #[test]
    fn reveal_safe_cell_keeps_playing() {
        let mut engine = engine(3, &[(0, 0)], Ruleset::Scatter);

        assert_eq!(engine.reveal((2, 2)).unwrap(), RevealOutcome::Revealed);
        assert!(engine.cell_at((2, 2)).is_revealed());
        assert_eq!(engine.state(), RoundState::Playing);
        assert_eq!(engine.safe_cells_left(), 7);
    }

    #[test]
    fn reveal_twice_is_no_change() {
        let mut engine = engine(3, &[(0, 0)], Ruleset::Scatter);
        engine.reveal((1, 1)).unwrap();
        let before = engine.clone();

        assert_eq!(engine.reveal((1, 1)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(engine, before);
    }

    #[test]
    fn scatter_bomb_loses_without_infection() {
        let mut engine = engine(3, &[(1, 1), (0, 0)], Ruleset::Scatter);

        assert_eq!(engine.reveal((1, 1)).unwrap(), RevealOutcome::HitBomb);
        assert_eq!(engine.state(), RoundState::Lost);
        assert_eq!(engine.triggered_bomb(), Some((1, 1)));
        assert!(engine.cell_at((1, 1)).is_revealed());
        assert!(!engine.cell_at((0, 1)).is_revealed());
        assert!(!engine.cell_at((0, 1)).is_infected());
    }

    #[test]
    fn infection_bomb_infects_all_neighbors() {
        let mut engine = engine(3, &[(1, 1)], Ruleset::Infection);

        assert_eq!(engine.reveal((1, 1)).unwrap(), RevealOutcome::HitBomb);
        assert_eq!(engine.state(), RoundState::Lost);
        for coords in [
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 2),
            (2, 0),
            (2, 1),
            (2, 2),
        ] {
            let cell = engine.cell_at(coords);
            assert!(cell.is_revealed(), "{coords:?} not revealed");
            assert!(cell.is_infected(), "{coords:?} not infected");
        }
        assert!(!engine.cell_at((1, 1)).is_infected());
    }

    #[test]
    fn infection_at_corner_stays_in_bounds() {
        let mut engine = engine(5, &[(0, 0)], Ruleset::Infection);

        engine.reveal((0, 0)).unwrap();

        assert!(engine.cell_at((0, 1)).is_infected());
        assert!(engine.cell_at((1, 0)).is_infected());
        assert!(engine.cell_at((1, 1)).is_infected());
        assert!(!engine.cell_at((0, 2)).is_infected());
        assert!(!engine.cell_at((2, 2)).is_revealed());
    }

    #[test]
    fn last_safe_cell_wins() {
        let mut engine = engine(2, &[(0, 0)], Ruleset::Scatter);

        assert_eq!(engine.reveal((0, 1)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(engine.reveal((1, 0)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(engine.reveal((1, 1)).unwrap(), RevealOutcome::Won);
        assert_eq!(engine.state(), RoundState::Won);
        assert!(engine.state().is_won());
        assert_eq!(engine.triggered_bomb(), None);
    }

    #[test]
    fn finished_round_rejects_new_reveals() {
        let mut engine = engine(3, &[(0, 0)], Ruleset::Scatter);
        engine.reveal((0, 0)).unwrap();

        assert_eq!(engine.reveal((2, 2)), Err(GameError::AlreadyEnded));
        assert_eq!(engine.reveal((0, 0)).unwrap(), RevealOutcome::NoChange);
        assert!(!engine.cell_at((2, 2)).is_revealed());
    }

    #[test]
    fn out_of_bounds_reveal_is_an_error() {
        let mut engine = engine(3, &[(0, 0)], Ruleset::Scatter);
        assert_eq!(engine.reveal((3, 0)), Err(GameError::InvalidCoords));
    }
}

use serde::{Deserialize, Serialize};

use crate::*;

/// How bombs are placed and what revealing one does.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ruleset {
    /// Several bombs, covering 15% to 25% of the grid.
    #[default]
    Scatter,
    /// A single bomb that infects its neighbours when revealed.
    Infection,
}

/// The fixed grid sizes offered to the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn grid_size(self) -> Coord {
        use Difficulty::*;
        match self {
            Easy => 3,
            Medium => 5,
            Hard => 7,
        }
    }

    pub const fn label(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "Easy (3 x 3)",
            Medium => "Medium (5 x 5)",
            Hard => "Hard (7 x 7)",
        }
    }

    pub fn from_grid_size(grid_size: Coord) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.grid_size() == grid_size)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub grid_size: Coord,
    pub ruleset: Ruleset,
    /// Lets the view tag bomb cells for automated testing.
    pub expose_bombs: bool,
    /// Bomb position for the first round under [`Ruleset::Infection`].
    pub initial_bomb_location: Option<Coord2>,
}

impl GameConfig {
    /// Smallest side that still leaves room for one bomb and one safe cell.
    pub const MIN_GRID_SIZE: Coord = 2;

    pub const fn new_unchecked(grid_size: Coord, ruleset: Ruleset) -> Self {
        Self {
            grid_size,
            ruleset,
            expose_bombs: false,
            initial_bomb_location: None,
        }
    }

    pub fn new(grid_size: Coord, ruleset: Ruleset) -> Self {
        Self::new_unchecked(grid_size.max(Self::MIN_GRID_SIZE), ruleset)
    }

    pub fn with_expose_bombs(mut self, expose_bombs: bool) -> Self {
        self.expose_bombs = expose_bombs;
        self
    }

    pub fn with_initial_bomb_location(mut self, coords: Coord2) -> Result<Self> {
        if coords.0 >= self.grid_size || coords.1 >= self.grid_size {
            return Err(GameError::InvalidCoords);
        }
        self.initial_bomb_location = Some(coords);
        Ok(self)
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.grid_size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(Difficulty::default().grid_size(), Ruleset::default())
    }
}

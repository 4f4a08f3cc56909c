use crate::*;

/// What a single tile shows to the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileView {
    Hidden,
    Safe,
    Bomb,
    Infected,
}

impl TileView {
    pub const fn is_revealed(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

impl From<Cell> for TileView {
    fn from(cell: Cell) -> Self {
        if !cell.is_revealed() {
            Self::Hidden
        } else if cell.is_infected() {
            Self::Infected
        } else if cell.is_bomb() {
            Self::Bomb
        } else {
            Self::Safe
        }
    }
}

/// The popup shown over the grid, if any.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Banner {
    ConfirmReset,
    Won { restart_in: u8 },
    Lost { restart_in: u8 },
}

impl<S> GameSession<S> {
    pub fn tile_at(&self, coords: Coord2) -> TileView {
        self.engine().cell_at(coords).into()
    }

    /// Whether the view may tag this tile as a bomb for automated testing.
    pub fn exposes_bomb_at(&self, coords: Coord2) -> bool {
        self.config().expose_bombs && self.engine().cell_at(coords).is_bomb()
    }

    /// Whether this is the bomb that ended the round.
    pub fn is_triggered_bomb(&self, coords: Coord2) -> bool {
        self.engine().triggered_bomb() == Some(coords)
    }

    pub fn banner(&self) -> Option<Banner> {
        if self.is_confirming_reset() {
            return Some(Banner::ConfirmReset);
        }

        let restart_in = self.countdown().unwrap_or(0);
        match self.engine().state() {
            RoundState::Playing => None,
            RoundState::Won => Some(Banner::Won { restart_in }),
            RoundState::Lost => Some(Banner::Lost { restart_in }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expose_bombs: bool) -> GameSession<ScriptedSource> {
        let config = GameConfig::new(3, Ruleset::Infection)
            .with_expose_bombs(expose_bombs)
            .with_initial_bomb_location((0, 0))
            .unwrap();
        GameSession::new(config, ScriptedSource::new([(2, 2)]))
    }

    #[test]
    fn tiles_follow_cell_state() {
        let mut session = session(false);
        assert_eq!(session.tile_at((1, 1)), TileView::Hidden);
        assert!(!session.tile_at((1, 1)).is_revealed());
        assert!(!session.is_triggered_bomb((0, 0)));

        session.reveal((2, 2)).unwrap();
        assert_eq!(session.tile_at((2, 2)), TileView::Safe);
        assert!(session.tile_at((2, 2)).is_revealed());

        session.reveal((0, 0)).unwrap();
        assert_eq!(session.tile_at((0, 0)), TileView::Bomb);
        assert_eq!(session.tile_at((1, 1)), TileView::Infected);
        assert_eq!(session.tile_at((0, 1)), TileView::Infected);
        assert_eq!(session.tile_at((2, 2)), TileView::Safe);
        assert_eq!(session.tile_at((2, 1)), TileView::Hidden);
        assert!(session.is_triggered_bomb((0, 0)));
        assert!(!session.is_triggered_bomb((1, 1)));
    }

    #[test]
    fn bombs_are_only_exposed_when_configured() {
        let hidden = session(false);
        assert!(!hidden.exposes_bomb_at((0, 0)));

        let exposed = session(true);
        assert!(exposed.exposes_bomb_at((0, 0)));
        assert!(!exposed.exposes_bomb_at((1, 1)));
        assert_eq!(exposed.tile_at((0, 0)), TileView::Hidden);
    }

    #[test]
    fn banner_tracks_round_and_confirmation() {
        let mut session = session(false);
        assert_eq!(session.banner(), None);

        session.reveal((0, 0)).unwrap();
        assert_eq!(session.banner(), Some(Banner::Lost { restart_in: 5 }));
        session.tick();
        assert_eq!(session.banner(), Some(Banner::Lost { restart_in: 4 }));

        session.request_reset();
        assert_eq!(session.banner(), Some(Banner::ConfirmReset));
        session.cancel_reset();
        assert_eq!(session.banner(), Some(Banner::Lost { restart_in: 4 }));
    }

    #[test]
    fn banner_reports_win() {
        let mut session = session(false);
        for row in 0..3 {
            for col in 0..3 {
                if (row, col) != (0, 0) {
                    session.reveal((row, col)).unwrap();
                }
            }
        }
        assert_eq!(session.banner(), Some(Banner::Won { restart_in: 5 }));
    }
}

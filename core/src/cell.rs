use serde::{Deserialize, Serialize};

/// One grid cell. Only `revealed` and `infected` ever change, and only from false to true.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    is_bomb: bool,
    is_revealed: bool,
    is_infected: bool,
}

impl Cell {
    pub const fn new(is_bomb: bool) -> Self {
        Self {
            is_bomb,
            is_revealed: false,
            is_infected: false,
        }
    }

    pub const fn is_bomb(self) -> bool {
        self.is_bomb
    }

    pub const fn is_revealed(self) -> bool {
        self.is_revealed
    }

    pub const fn is_infected(self) -> bool {
        self.is_infected
    }

    pub(crate) fn reveal(&mut self) {
        self.is_revealed = true;
    }

    pub(crate) fn infect(&mut self) {
        self.is_revealed = true;
        self.is_infected = true;
    }
}

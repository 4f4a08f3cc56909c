use crate::*;
pub use scatter::*;
pub use single::*;
pub use source::*;

mod scatter;
mod single;
mod source;

pub trait LayoutGenerator {
    fn generate<S: BombSource>(self, size: Coord, source: &mut S) -> BombLayout;
}

impl Ruleset {
    /// Generates a fresh layout with this ruleset's placement strategy.
    ///
    /// `location` only applies to [`Ruleset::Infection`]; out of bounds locations are ignored.
    pub fn generate_layout<S: BombSource>(
        self,
        size: Coord,
        location: Option<Coord2>,
        source: &mut S,
    ) -> BombLayout {
        let layout = match self {
            Ruleset::Scatter => ScatterLayoutGenerator.generate(size, source),
            Ruleset::Infection => SingleBombLayoutGenerator::new(location).generate(size, source),
        };
        log::debug!(
            "generated {:?} layout {}x{} with {} bomb(s)",
            self,
            size,
            size,
            layout.bomb_count()
        );
        layout
    }
}

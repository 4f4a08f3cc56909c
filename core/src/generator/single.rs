use super::*;

/// Places exactly one bomb, either at a fixed location or at a uniformly sampled one.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SingleBombLayoutGenerator {
    location: Option<Coord2>,
}

impl SingleBombLayoutGenerator {
    pub fn new(location: Option<Coord2>) -> Self {
        Self { location }
    }
}

impl LayoutGenerator for SingleBombLayoutGenerator {
    fn generate<S: BombSource>(self, size: Coord, source: &mut S) -> BombLayout {
        let mut bomb_mask: Array2<bool> = Array2::default((size, size).to_nd_index());
        if size == 0 {
            return BombLayout::from_generated(bomb_mask, 0);
        }

        let coords = match self.location {
            Some(coords) if coords.0 < size && coords.1 < size => coords,
            Some(coords) => {
                log::warn!(
                    "Bomb location {:?} is outside a {}x{} grid, sampling instead",
                    coords,
                    size,
                    size
                );
                source.pick_coords(size)
            }
            None => source.pick_coords(size),
        };
        bomb_mask[coords.to_nd_index()] = true;
        BombLayout::from_generated(bomb_mask, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn fixed_location_is_used() {
        let mut source = ScriptedSource::new([(0, 0)]);
        let layout = SingleBombLayoutGenerator::new(Some((1, 1))).generate(3, &mut source);

        assert_eq!(layout.bomb_count(), 1);
        assert_eq!(layout.iter_bombs().collect::<Vec<_>>(), [(1, 1)]);
    }

    #[test]
    fn out_of_bounds_location_falls_back_to_source() {
        let mut source = ScriptedSource::new([(2, 0)]);
        let layout = SingleBombLayoutGenerator::new(Some((5, 5))).generate(3, &mut source);

        assert_eq!(layout.iter_bombs().collect::<Vec<_>>(), [(2, 0)]);
    }

    #[test]
    fn sampled_layout_has_exactly_one_bomb() {
        let mut source = SeededSource::new(3);
        for size in [3, 5, 7] {
            for _ in 0..16 {
                let layout = SingleBombLayoutGenerator::default().generate(size, &mut source);
                assert_eq!(layout.size(), size);
                assert_eq!(layout.bomb_count(), 1);
                assert_eq!(layout.iter_bombs().count(), 1);
            }
        }
    }
}

use hashbrown::HashSet;

use super::*;

/// Places between 15% and 25% of the grid as bombs by rejection sampling unique coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScatterLayoutGenerator;

impl ScatterLayoutGenerator {
    const BASE_RATIO: f64 = 0.15;
    const SPREAD_RATIO: f64 = 0.10;

    /// Sampling budget per cell before giving up on the random source.
    const ATTEMPTS_PER_CELL: u32 = 64;

    /// `max(1, floor(total * 0.15 + fraction * total * 0.10))`, capped so at least one cell stays safe.
    pub fn bomb_count(total_cells: CellCount, fraction: f64) -> CellCount {
        let total = f64::from(total_cells);
        let fraction = fraction.clamp(0.0, 1.0);
        // float to int casts truncate, which is floor for non-negative values
        let count = (total * Self::BASE_RATIO + fraction * total * Self::SPREAD_RATIO) as CellCount;
        count.max(1).min(total_cells.saturating_sub(1))
    }
}

impl LayoutGenerator for ScatterLayoutGenerator {
    fn generate<S: BombSource>(self, size: Coord, source: &mut S) -> BombLayout {
        let total_cells = square(size);
        let bomb_count = Self::bomb_count(total_cells, source.fraction());
        let target = usize::from(bomb_count);

        let mut bombs: HashSet<Coord2> = HashSet::with_capacity(target);
        let max_attempts = u32::from(total_cells) * Self::ATTEMPTS_PER_CELL;
        let mut attempts = 0;
        while bombs.len() < target && attempts < max_attempts {
            attempts += 1;
            bombs.insert(source.pick_coords(size));
        }

        let mut bomb_mask: Array2<bool> = Array2::default((size, size).to_nd_index());
        for &coords in &bombs {
            bomb_mask[coords.to_nd_index()] = true;
        }

        if bombs.len() < target {
            log::warn!(
                "Bomb sampling gave up after {} attempts with {} of {} bombs, filling the rest in order",
                attempts,
                bombs.len(),
                target
            );
            let missing = target - bombs.len();
            bomb_mask
                .iter_mut()
                .filter(|is_bomb| !**is_bomb)
                .take(missing)
                .for_each(|is_bomb| *is_bomb = true);
        }

        log::trace!("scatter sampling took {} attempts", attempts);
        BombLayout::from_generated(bomb_mask, bomb_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bomb_count_stays_within_bounds() {
        for size in 2..=16 {
            let total = square(size);
            let upper = (total as usize * 25).div_ceil(100) as CellCount;
            for step in 0..=10 {
                let fraction = f64::from(step) / 10.0;
                let count = ScatterLayoutGenerator::bomb_count(total, fraction);
                assert!(count >= 1, "size {size} fraction {fraction}");
                assert!(count <= upper, "size {size} fraction {fraction}");
                assert!(count < total, "size {size} fraction {fraction}");
            }
        }
    }

    #[test]
    fn bomb_count_matches_presets() {
        assert_eq!(ScatterLayoutGenerator::bomb_count(9, 0.0), 1);
        assert_eq!(ScatterLayoutGenerator::bomb_count(25, 0.0), 3);
        assert_eq!(ScatterLayoutGenerator::bomb_count(25, 0.99), 6);
        assert_eq!(ScatterLayoutGenerator::bomb_count(49, 0.5), 9);
    }

    #[test]
    fn tiny_grid_keeps_a_safe_cell() {
        assert_eq!(ScatterLayoutGenerator::bomb_count(1, 0.9), 0);
        assert_eq!(ScatterLayoutGenerator::bomb_count(4, 0.9), 1);
    }

    #[test]
    fn generate_places_scripted_unique_bombs() {
        // 25 cells at fraction 0 gives 3 bombs, the repeated (0, 0) is rejected
        let mut source = ScriptedSource::new([(0, 0), (0, 0), (2, 3), (4, 4), (1, 1)]);

        let layout = ScatterLayoutGenerator.generate(5, &mut source);

        assert_eq!(layout.size(), 5);
        assert_eq!(layout.bomb_count(), 3);
        assert!(layout.contains_bomb((0, 0)));
        assert!(layout.contains_bomb((2, 3)));
        assert!(layout.contains_bomb((4, 4)));
        assert!(!layout.contains_bomb((1, 1)));
    }

    #[test]
    fn generate_fills_in_order_when_source_is_stuck() {
        let mut source = ScriptedSource::new([(1, 1)]).with_fractions([0.99]);

        let layout = ScatterLayoutGenerator.generate(5, &mut source);

        assert_eq!(layout.bomb_count(), 6);
        assert_eq!(layout.iter_bombs().count(), 6);
        assert!(layout.contains_bomb((1, 1)));
        assert!(layout.contains_bomb((0, 0)));
        assert!(layout.contains_bomb((0, 4)));
    }

    #[test]
    fn generate_with_seeded_source_respects_bounds() {
        let mut source = SeededSource::new(7);
        for size in [3, 5, 7] {
            for _ in 0..32 {
                let layout = ScatterLayoutGenerator.generate(size, &mut source);
                let total = square(size);
                assert_eq!(layout.total_cells(), total);
                assert_eq!(layout.iter_bombs().count(), usize::from(layout.bomb_count()));
                assert!(layout.bomb_count() >= 1);
                assert!(usize::from(layout.bomb_count()) <= (usize::from(total) * 25).div_ceil(100));
            }
        }
    }
}

use rand::seq::SliceRandom;
use rand::Rng;

use super::config::FoodPlacement;
use super::state::Position;

/// Draw a cell for the next food item.
///
/// With [`FoodPlacement::Uniform`] x and y are drawn independently from
/// `[0, grid_size)` and `excluded` is ignored, so food can appear under the
/// snake. [`FoodPlacement::AvoidSnake`] draws uniformly from the cells not in
/// `excluded`, falling back to a uniform draw when every cell is taken.
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    grid_size: i32,
    excluded: &[Position],
    policy: FoodPlacement,
) -> Position {
    match policy {
        FoodPlacement::Uniform => uniform_cell(rng, grid_size),
        FoodPlacement::AvoidSnake => {
            let free: Vec<Position> = (0..grid_size)
                .flat_map(|y| (0..grid_size).map(move |x| Position::new(x, y)))
                .filter(|cell| !excluded.iter().any(|taken| taken.same_cell(*cell)))
                .collect();

            match free.choose(rng) {
                Some(cell) => *cell,
                None => uniform_cell(rng, grid_size),
            }
        }
    }
}

fn uniform_cell<R: Rng + ?Sized>(rng: &mut R, grid_size: i32) -> Position {
    let x = rng.gen_range(0..grid_size);
    let y = rng.gen_range(0..grid_size);
    Position::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_uniform_stays_on_grid() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let food = place_food(&mut rng, 5, &[], FoodPlacement::Uniform);
            assert!((0..5).contains(&food.x));
            assert!((0..5).contains(&food.y));
            assert_eq!(food.z, 0);
        }
    }

    #[test]
    fn test_uniform_reaches_every_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [[false; 3]; 3];
        for _ in 0..500 {
            let food = place_food(&mut rng, 3, &[], FoodPlacement::Uniform);
            seen[food.y as usize][food.x as usize] = true;
        }
        assert!(seen.iter().flatten().all(|hit| *hit));
    }

    #[test]
    fn test_uniform_may_land_on_excluded_cell() {
        // On a 2x2 grid with three cells taken, a non-excluding draw is
        // bound to hit a taken cell sooner or later.
        let excluded = [Position::new(0, 0), Position::new(1, 0), Position::new(0, 1)];
        let mut rng = StdRng::seed_from_u64(3);
        let hit_snake = (0..200)
            .map(|_| place_food(&mut rng, 2, &excluded, FoodPlacement::Uniform))
            .any(|food| excluded.contains(&food));
        assert!(hit_snake);
    }

    #[test]
    fn test_avoid_snake_picks_free_cell() {
        let excluded = [Position::new(0, 0), Position::new(1, 0), Position::new(0, 1)];
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let food = place_food(&mut rng, 2, &excluded, FoodPlacement::AvoidSnake);
            assert_eq!(food, Position::new(1, 1));
        }
    }

    #[test]
    fn test_avoid_snake_full_grid_falls_back() {
        let excluded = [
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(0, 1),
            Position::new(1, 1),
        ];
        let mut rng = StdRng::seed_from_u64(5);
        let food = place_food(&mut rng, 2, &excluded, FoodPlacement::AvoidSnake);
        assert!(excluded.contains(&food));
    }
}

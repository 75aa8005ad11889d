use crate::board::{Cell, Grid};
use crate::direction::Direction;
use std::collections::{HashSet, VecDeque};

/// Counts the passable cells reachable from `start`, `start` included.
///
/// Breadth-first fill. Neighbors are pushed without filtering and rejected
/// when dequeued, so an occupied or out-of-bounds `start` yields 0.
pub fn reachable_area(grid: &Grid, start: Cell) -> i32 {
    let mut queue: VecDeque<Cell> = VecDeque::new();
    let mut visited: HashSet<Cell> = HashSet::new();
    let mut area = 0;

    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if visited.contains(&current) || !grid.is_passable(current) {
            continue;
        }

        visited.insert(current);
        area += 1;

        for d in Direction::ALL {
            queue.push_back(current + d.vector());
        }
    }

    area
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_grid(rng: &mut StdRng, width: i32, height: i32, fill: f64) -> Grid {
        let mut g = Grid::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if rng.gen_bool(fill) {
                    g.set(Cell::new(x, y), rng.gen_range(1..=9));
                }
            }
        }
        g
    }

    #[test]
    fn empty_grid_is_fully_reachable() {
        let g = Grid::new(7, 4);
        for y in 0..4 {
            for x in 0..7 {
                assert_eq!(reachable_area(&g, Cell::new(x, y)), 28);
            }
        }
    }

    #[test]
    fn out_of_bounds_start_is_zero() {
        let g = Grid::new(5, 5);

        assert_eq!(reachable_area(&g, Cell::new(-1, 0)), 0);
        assert_eq!(reachable_area(&g, Cell::new(0, 5)), 0);
        assert_eq!(reachable_area(&g, Cell::new(100, 100)), 0);
    }

    #[test]
    fn occupied_start_is_zero() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let g = random_grid(&mut rng, 8, 8, 0.4);
            for y in 0..8 {
                for x in 0..8 {
                    let c = Cell::new(x, y);
                    if !g.is_passable(c) {
                        assert_eq!(reachable_area(&g, c), 0);
                    }
                }
            }
        }
    }

    #[test]
    fn wall_splits_regions() {
        // column x = 2 is a wall on a 5x3 grid
        let mut g = Grid::new(5, 3);
        for y in 0..3 {
            g.set(Cell::new(2, y), 1);
        }

        assert_eq!(reachable_area(&g, Cell::new(0, 0)), 6);
        assert_eq!(reachable_area(&g, Cell::new(4, 2)), 6);
    }

    #[test]
    fn diagonal_gaps_do_not_connect() {
        // __ 1
        // 1 __
        let mut g = Grid::new(2, 2);
        g.set(Cell::new(1, 0), 1);
        g.set(Cell::new(0, 1), 1);

        assert_eq!(reachable_area(&g, Cell::new(0, 0)), 1);
        assert_eq!(reachable_area(&g, Cell::new(1, 1)), 1);
    }

    #[test]
    fn unreachable_markers_do_not_matter() {
        let mut g = Grid::new(6, 6);
        for y in 0..6 {
            g.set(Cell::new(3, y), 1);
        }
        g.set(Cell::new(5, 5), 2);
        let before = reachable_area(&g, Cell::new(0, 0));

        let mut relabeled = g.clone();
        relabeled.set(Cell::new(5, 5), 9);
        relabeled.set(Cell::new(4, 0), 3);

        assert_eq!(reachable_area(&relabeled, Cell::new(0, 0)), before);
        assert_eq!(before, 18);
    }

    #[test]
    fn repeated_calls_agree() {
        let mut rng = StdRng::seed_from_u64(11);
        let g = random_grid(&mut rng, 12, 9, 0.3);
        for y in 0..9 {
            for x in 0..12 {
                let c = Cell::new(x, y);
                assert_eq!(reachable_area(&g, c), reachable_area(&g, c));
            }
        }
    }

    #[test]
    fn cells_in_one_region_share_an_area() {
        let mut rng = StdRng::seed_from_u64(5);
        let g = random_grid(&mut rng, 10, 10, 0.35);
        for y in 0..10 {
            for x in 0..10 {
                let c = Cell::new(x, y);
                let area = reachable_area(&g, c);
                for d in Direction::ALL {
                    let n = c + d.vector();
                    if area > 0 && g.is_passable(n) {
                        assert_eq!(reachable_area(&g, n), area);
                    }
                }
            }
        }
    }
}

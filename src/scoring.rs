use crate::board::{Cell, Grid};
use crate::direction::Direction;
use crate::territory::reachable_area;

/// Returned when no candidate move is legal.
pub const FALLBACK_DIRECTION: Direction = Direction::North;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MoveCandidate {
    pub direction: Direction,
    pub score: i32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScoringMode {
    /// Score is the reachable area after the move.
    Safety,
    /// Score is the reachable area minus the distance to the opponent's
    /// predicted cell.
    Aggression { predicted: Cell },
}

impl ScoringMode {
    fn score(&self, grid: &Grid, next: Cell) -> i32 {
        let area = reachable_area(grid, next);
        match self {
            ScoringMode::Safety => area,
            ScoringMode::Aggression { predicted } => area - next.manhattan_distance(predicted),
        }
    }
}

/// Scores every legal move from `head`, in enumeration order.
pub fn candidate_moves(grid: &Grid, head: Cell, mode: ScoringMode) -> Vec<MoveCandidate> {
    Direction::ALL
        .into_iter()
        .filter_map(|direction| {
            let next = head + direction.vector();
            if !grid.is_passable(next) {
                return None;
            }

            Some(MoveCandidate {
                direction,
                score: mode.score(grid, next),
            })
        })
        .collect()
}

/// Highest score wins; equal scores keep their enumeration order.
pub fn find_best_move(mut candidates: Vec<MoveCandidate>) -> Direction {
    if candidates.is_empty() {
        return FALLBACK_DIRECTION;
    }

    // stable, so ties keep N, E, S, W order
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates[0].direction
}

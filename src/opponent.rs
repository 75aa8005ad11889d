use crate::board::{Cell, GameState, Grid, Player};
use crate::direction::Direction;
use crate::territory::reachable_area;

/// Head of the closest other player by Manhattan distance. On equal distance
/// the player listed first in the snapshot wins.
pub fn nearest_opponent_head(state: &GameState, me: &Player) -> Option<Cell> {
    let mut nearest: Option<(Cell, i32)> = None;

    for player in &state.players {
        if player.name == me.name {
            continue;
        }

        let dist = player.position.manhattan_distance(&me.position);
        match nearest {
            Some((_, best)) if dist >= best => {}
            _ => nearest = Some((player.position, dist)),
        }
    }

    nearest.map(|(head, _)| head)
}

/// Guesses where the opponent at `head` moves next: the neighbor with the
/// most reachable area. A boxed-in opponent is predicted to stay put.
pub fn predict_opponent_move(grid: &Grid, head: Cell) -> Cell {
    let mut predicted = head;
    let mut best_area = 0;

    for d in Direction::ALL {
        let next = head + d.vector();
        if !grid.is_passable(next) {
            continue;
        }

        let area = reachable_area(grid, next);
        if area > best_area {
            best_area = area;
            predicted = next;
        }
    }

    predicted
}

use crate::board::{GameState, Player};
use crate::connection::Connection;
use crate::direction::{Direction, NO_PREVIOUS_MOVE};
use crate::error::{ConnectionError, EngineError};
use crate::opponent::{nearest_opponent_head, predict_opponent_move};
use crate::scoring::{candidate_moves, find_best_move, ScoringMode};
use log::{debug, info, warn};

/// Picks a move for `me` against one snapshot. Chases the nearest opponent's
/// predicted cell when there is one, otherwise only guards territory.
pub fn decide_move(state: &GameState, me: &Player) -> Direction {
    let mode = match nearest_opponent_head(state, me) {
        Some(head) => ScoringMode::Aggression {
            predicted: predict_opponent_move(&state.grid, head),
        },
        None => ScoringMode::Safety,
    };

    let candidates = candidate_moves(&state.grid, me.position, mode);
    debug!("frame {} mode {:?} candidates {:?}", state.frame, mode, candidates);

    find_best_move(candidates)
}

/// One bot's decision loop. Holds nothing across ticks except the last move,
/// which is only reported back to the server.
#[derive(Debug, Clone)]
pub struct Bot {
    name: String,
    previous: Option<Direction>,
    ticks: u64,
}

impl Bot {
    pub fn create(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            previous: None,
            ticks: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn previous_direction(&self) -> Option<Direction> {
        self.previous
    }

    pub fn previous_code(&self) -> i32 {
        self.previous.map_or(NO_PREVIOUS_MOVE, Direction::code)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Resolves this bot in `state`, decides and records the move. Fails
    /// without touching the recorded move if the bot is not in the roster.
    pub fn tick(&mut self, state: &GameState) -> Result<Direction, EngineError> {
        let me = state.find_player(&self.name)?;
        let direction = decide_move(state, me);

        self.previous = Some(direction);
        self.ticks += 1;
        Ok(direction)
    }

    /// Runs ticks until the connection reports the session is over. A tick
    /// with a malformed snapshot, or where this bot is missing from it, is
    /// skipped, not answered.
    pub fn run<C: Connection>(&mut self, conn: &mut C) -> Result<u64, ConnectionError> {
        while conn.is_active() {
            let state = match conn.receive_state() {
                Ok(s) => s,
                Err(ConnectionError::SessionEnded) => break,
                Err(ConnectionError::Snapshot(e)) => {
                    warn!("{}: skipping snapshot: {}", self.name, e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            match self.tick(&state) {
                Ok(direction) => {
                    debug!("{}: frame {} -> {}", self.name, state.frame, direction.as_str());
                    conn.send_move(direction, self.previous_code())?;
                }
                Err(e) => warn!("{}: skipping frame {}: {}", self.name, state.frame, e),
            }
        }

        info!("{}: session ended after {} moves", self.name, self.ticks);
        Ok(self.ticks)
    }
}

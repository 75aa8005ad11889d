use crate::board::{self, Cell, GameState, Grid, Marker};
use crate::direction::Direction;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BotInfo {
    pub name: String,
    pub version: String,
}

#[derive(Serialize, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct MoveResponse {
    pub r#move: Direction,
    pub previous: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct PlayerMessage {
    pub name: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct StateMessage {
    pub width: i32,
    pub height: i32,
    /// Row-major occupancy markers.
    pub cells: Vec<Marker>,
    pub players: Vec<PlayerMessage>,
    #[serde(default)]
    pub frame: u64,
}

/// Lines sent from the bot to the game server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Join { name: String },
    Move { direction: Direction, previous: i32 },
}

/// Lines sent from the game server to the bot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    State(StateMessage),
    Rejected { reason: String },
    End,
}

pub fn message_to_state(msg: StateMessage) -> Result<GameState, EngineError> {
    let grid = Grid::from_cells(msg.width, msg.height, msg.cells)?;
    let players = msg
        .players
        .into_iter()
        .map(|p| board::Player::create(p.name, Cell::new(p.x, p.y)))
        .collect();

    Ok(GameState::create(grid, players, msg.frame))
}

pub fn state_to_message(state: &GameState) -> StateMessage {
    StateMessage {
        width: state.grid.width(),
        height: state.grid.height(),
        cells: state.grid.cells().to_vec(),
        players: state
            .players
            .iter()
            .map(|p| PlayerMessage {
                name: p.name.clone(),
                x: p.position.x,
                y: p.position.y,
            })
            .collect(),
        frame: state.frame,
    }
}

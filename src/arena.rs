// Local light-cycle match for running bots against each other without a
// game server. Trails never clear; any move into an occupied or off-grid
// cell, or two heads meeting, eliminates.

use crate::board::{Cell, GameState, Grid, Marker, Player};
use crate::direction::Direction;
use crate::driver::Bot;
use crate::protocol::{state_to_message, ServerMessage};
use log::{debug, log_enabled, trace, Level};
use rand::{seq::SliceRandom, Rng};

#[derive(Debug, Clone)]
struct Contender {
    name: String,
    position: Cell,
    marker: Marker,
    heading: Direction,
    alive: bool,
}

#[derive(Debug, Clone)]
pub struct Arena {
    pub grid: Grid,
    contenders: Vec<Contender>,
    pub frame: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub frames: u64,
    pub survivors: Vec<String>,
}

pub type Move = (String, Direction);

impl Arena {
    /// Seats each name on a distinct random cell. Names that do not fit on
    /// the grid are left out.
    pub fn create<R: Rng>(width: i32, height: i32, names: &[String], rng: &mut R) -> Self {
        let mut free: Vec<Cell> = (0..height)
            .flat_map(|y| (0..width).map(move |x| Cell::new(x, y)))
            .collect();
        free.shuffle(rng);

        let mut grid = Grid::new(width, height);
        let contenders = names
            .iter()
            .zip(free)
            .enumerate()
            .map(|(i, (name, position))| {
                let marker = i as Marker + 1;
                grid.set(position, marker);
                Contender {
                    name: name.clone(),
                    position,
                    marker,
                    heading: Direction::North,
                    alive: true,
                }
            })
            .collect();

        Self {
            grid,
            contenders,
            frame: 0,
        }
    }

    /// Seats players at fixed cells, for reproducible setups.
    pub fn with_players(mut grid: Grid, players: &[Player]) -> Self {
        let contenders = players
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let marker = i as Marker + 1;
                grid.set(p.position, marker);
                Contender {
                    name: p.name.clone(),
                    position: p.position,
                    marker,
                    heading: Direction::North,
                    alive: true,
                }
            })
            .collect();

        Self {
            grid,
            contenders,
            frame: 0,
        }
    }

    pub fn snapshot(&self) -> GameState {
        let players = self
            .contenders
            .iter()
            .filter(|c| c.alive)
            .map(|c| Player::create(c.name.clone(), c.position))
            .collect();

        GameState::create(self.grid.clone(), players, self.frame)
    }

    pub fn alive(&self) -> Vec<String> {
        self.contenders
            .iter()
            .filter(|c| c.alive)
            .map(|c| c.name.clone())
            .collect()
    }

    pub fn is_over(&self) -> bool {
        let alive = self.contenders.iter().filter(|c| c.alive).count();
        alive == 0 || (self.contenders.len() > 1 && alive <= 1)
    }

    /// Applies one frame of simultaneous moves. A player with no move keeps
    /// its previous heading.
    pub fn advance(&mut self, moves: &[Move]) {
        let targets: Vec<Option<Cell>> = self
            .contenders
            .iter_mut()
            .map(|c| {
                if !c.alive {
                    return None;
                }
                if let Some((_, d)) = moves.iter().find(|m| m.0 == c.name) {
                    c.heading = *d;
                }
                Some(c.position + c.heading.vector())
            })
            .collect();

        let mut eliminated = vec![false; self.contenders.len()];
        for (i, target) in targets.iter().enumerate() {
            let Some(target) = target else { continue };

            if !self.grid.is_passable(*target) {
                eliminated[i] = true;
            }

            let head_on = targets
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && other.as_ref() == Some(target));
            if head_on {
                eliminated[i] = true;
            }
        }

        for (i, c) in self.contenders.iter_mut().enumerate() {
            let Some(target) = targets[i] else { continue };

            if eliminated[i] {
                debug!("frame {}: {} eliminated at {:?}", self.frame, c.name, target);
                c.alive = false;
                continue;
            }

            self.grid.set(target, c.marker);
            c.position = target;
        }

        self.frame += 1;
    }

    /// Plays until one player is left or `max_frames` pass. Contenders without
    /// a bot wander at random. At trace level every frame is logged as the
    /// state line a game server would send.
    pub fn play<R: Rng>(&mut self, bots: &mut [Bot], rng: &mut R, max_frames: u64) -> MatchOutcome {
        while !self.is_over() && self.frame < max_frames {
            let state = self.snapshot();
            if log_enabled!(Level::Trace) {
                if let Ok(line) = serde_json::to_string(&ServerMessage::State(state_to_message(&state))) {
                    trace!("{}", line);
                }
            }
            let mut moves: Vec<Move> = vec![];

            for c in self.contenders.iter().filter(|c| c.alive) {
                match bots.iter_mut().find(|b| b.name() == c.name) {
                    Some(bot) => {
                        if let Ok(d) = bot.tick(&state) {
                            moves.push((c.name.clone(), d));
                        }
                    }
                    None => moves.push((c.name.clone(), rng.gen())),
                }
            }

            self.advance(&moves);
        }

        MatchOutcome {
            frames: self.frame,
            survivors: self.alive(),
        }
    }
}

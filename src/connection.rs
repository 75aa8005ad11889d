use crate::board::GameState;
use crate::direction::Direction;
use crate::error::ConnectionError;
use crate::protocol::{message_to_state, ClientMessage, ServerMessage};
use log::{info, warn};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;

/// Link to the game server as seen by the decision loop.
pub trait Connection {
    /// Blocks until the next snapshot arrives. Returns
    /// `ConnectionError::SessionEnded` once the server is done.
    fn receive_state(&mut self) -> Result<GameState, ConnectionError>;

    /// Fire-and-forget; no acknowledgement is read back.
    fn send_move(&mut self, direction: Direction, previous: i32) -> Result<(), ConnectionError>;

    fn is_active(&self) -> bool;
}

/// JSON-lines session over any reader/writer pair.
pub struct LineConnection<R, W> {
    reader: R,
    writer: W,
    active: bool,
}

pub type TcpConnection = LineConnection<BufReader<TcpStream>, TcpStream>;

impl TcpConnection {
    /// Opens a session for `name`. No retry on failure.
    pub fn connect(addr: &str, name: &str) -> Result<Self, ConnectionError> {
        let stream = TcpStream::connect(addr).map_err(|source| ConnectionError::Connect {
            addr: addr.to_string(),
            source,
        })?;
        stream.set_nodelay(true)?;
        let reader = BufReader::new(stream.try_clone()?);

        let conn = LineConnection::join(reader, stream, name)?;
        info!("{}: connected to {}", name, addr);
        Ok(conn)
    }
}

impl<R: BufRead, W: Write> LineConnection<R, W> {
    /// Sends the join line and returns a live session.
    pub fn join(reader: R, writer: W, name: &str) -> Result<Self, ConnectionError> {
        let mut conn = Self {
            reader,
            writer,
            active: true,
        };
        conn.write_message(&ClientMessage::Join {
            name: name.to_string(),
        })?;

        Ok(conn)
    }

    fn write_message(&mut self, msg: &ClientMessage) -> Result<(), ConnectionError> {
        let mut line = serde_json::to_string(msg)?;
        line.push('\n');
        if let Err(e) = self.writer.write_all(line.as_bytes()).and_then(|_| self.writer.flush()) {
            self.active = false;
            return Err(e.into());
        }

        Ok(())
    }

    fn read_message(&mut self) -> Result<ServerMessage, ConnectionError> {
        let mut line = String::new();
        loop {
            line.clear();
            let read = match self.reader.read_line(&mut line) {
                Ok(n) => n,
                Err(e) => {
                    self.active = false;
                    return Err(e.into());
                }
            };

            if read == 0 {
                self.active = false;
                return Err(ConnectionError::SessionEnded);
            }

            if !line.trim().is_empty() {
                break;
            }
        }

        Ok(serde_json::from_str(line.trim())?)
    }
}

impl<R: BufRead, W: Write> Connection for LineConnection<R, W> {
    fn receive_state(&mut self) -> Result<GameState, ConnectionError> {
        match self.read_message()? {
            ServerMessage::State(msg) => Ok(message_to_state(msg)?),
            ServerMessage::End => {
                self.active = false;
                Err(ConnectionError::SessionEnded)
            }
            ServerMessage::Rejected { reason } => {
                warn!("server rejected session: {}", reason);
                self.active = false;
                Err(ConnectionError::Rejected(reason))
            }
        }
    }

    fn send_move(&mut self, direction: Direction, previous: i32) -> Result<(), ConnectionError> {
        self.write_message(&ClientMessage::Move {
            direction,
            previous,
        })
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

pub mod arena;
pub mod board;
pub mod connection;
pub mod direction;
pub mod driver;
pub mod error;
pub mod opponent;
pub mod protocol;
pub mod scoring;
pub mod territory;

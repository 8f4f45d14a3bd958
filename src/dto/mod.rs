//! Wire-level data transfer objects shared by the WebSocket and HTTP edges.

pub mod game;
pub mod health;
pub mod validation;
pub mod ws;

//! The Pale Harbor: a top-down horror runtime where a sanity meter bends
//! everything the player sees, hears and reads.

pub mod camera;
pub mod clock;
pub mod config;
pub mod data;
pub mod dialogue;
pub mod ecs;
pub mod effects;
pub mod error;
pub mod field;
pub mod game;
pub mod input;
pub mod map;
pub mod player;
pub mod ports;
pub mod render;
pub mod scripted_input;
pub mod world;

pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use game::{Game, GamePhase};

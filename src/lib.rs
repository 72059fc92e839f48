//! Simulation core of a top-down arcade survival shooter.
//!
//! The crate is split like the game itself: plain entity data, one module per
//! behaviour (player, enemies, projectiles, spawning, collisions,
//! progression), and [`game::Game`] tying them together once per tick.
//! Presentation only ever sees the snapshots in [`snapshot`].

pub mod clock;
pub mod collision;
pub mod config;
pub mod constants;
pub mod effects;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod game;
pub mod player;
pub mod pool;
pub mod progression;
pub mod projectile;
pub mod snapshot;
pub mod spawn;
pub mod vec2;

pub use error::{Error, Result};

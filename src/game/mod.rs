// src/game/mod.rs
mod engine;
pub mod manager;

pub use engine::*;
pub use manager::*;

//! CLI infrastructure for the terminal front end
//!
//! The commands here are the "UI collaborator" of the engine: they read
//! moves, call into the game state and the players, and render the results.

pub mod commands;
pub mod output;

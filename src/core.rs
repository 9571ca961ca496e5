pub mod definitions;
pub mod engine;
pub mod game;
pub mod pieces;
pub mod utils;
pub mod variants;

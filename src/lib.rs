pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod game;
pub mod render;
pub mod status;

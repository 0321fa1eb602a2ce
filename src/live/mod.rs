//! Adapter for the live client data API served by the running game

mod client;
mod game;
mod models;
mod skins;

pub use client::LiveClient;
pub use game::LiveGame;
pub use skins::SkinResolver;

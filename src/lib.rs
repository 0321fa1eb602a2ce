pub mod app;
pub mod cli;
pub mod constants;
pub mod discord;
pub mod error;
pub mod launcher;
pub mod lcu;
pub mod live;
pub mod logging;
pub mod model;
pub mod presence;
pub mod process;
pub mod settings;

pub use error::{Error, Result};

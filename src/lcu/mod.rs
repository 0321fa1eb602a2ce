//! Adapter for the local League client API (REST and event bus)

mod base_data;
mod client;
mod connection;
mod credentials;
mod events;
mod handlers;
mod models;

pub use client::{LcuClient, LcuHandle};
pub use connection::run_event_loop;
pub use credentials::LcuCredentials;
pub use events::{parse_frame, route_for, EventKind, LcuEvent, Route, ROUTES};
pub use handlers::{apply, Applied};

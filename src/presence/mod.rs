mod debounce;
mod dispatcher;
mod gate;
mod manager;
mod traits;
pub mod views;

pub use debounce::{UpdateScheduler, DEBOUNCE_WINDOW};
pub use dispatcher::{dispatch, Branch};
pub use gate::{PresenceGate, PushOutcome};
pub use manager::{unix_now, PresenceManager, IN_GAME_INTERVAL};
pub use traits::{LiveGameSource, PhaseSource, PresenceProvider};

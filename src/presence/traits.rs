use async_trait::async_trait;

use crate::error::PushError;
use crate::model::{LiveGameSample, Phase, PresenceView};

/// Trait for presence displays (Discord)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresenceProvider: Send + Sync {
    /// Returns the name of this presence provider (for logging)
    fn name(&self) -> &'static str;

    /// Replace the displayed activity with `view`
    async fn update_presence(&self, view: &PresenceView) -> Result<(), PushError>;

    /// Clear all presence data
    async fn clear_presence(&self) -> Result<(), PushError>;
}

/// Polls the current gameflow phase, used to decide when a match is over
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhaseSource: Send + Sync {
    /// `None` when the client API could not be reached
    async fn current_phase(&self) -> Option<Phase>;
}

/// Samples the live game API while a match is running
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LiveGameSource: Send + Sync {
    /// `silent` suppresses the one-time detection announcements
    async fn sample(&self, silent: bool) -> Option<LiveGameSample>;

    /// Forget anything cached for the previous match
    fn reset(&self);
}

//! Suppresses pushes that would not change what Discord shows

use std::sync::Arc;

use tokio::sync::Mutex;

use super::traits::PresenceProvider;
use crate::error::PushError;
use crate::model::PresenceView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Pushed,
    /// Identical to the last successful push; the provider was not called
    Unchanged,
}

/// Wraps a provider and remembers the last view it accepted
pub struct PresenceGate {
    provider: Arc<dyn PresenceProvider>,
    last: Mutex<Option<PresenceView>>,
}

impl PresenceGate {
    pub fn new(provider: Arc<dyn PresenceProvider>) -> Self {
        Self {
            provider,
            last: Mutex::new(None),
        }
    }

    /// Pushes `view` unless it equals the last accepted one. Failures are
    /// logged and returned; `last` only moves on success so the next request
    /// retries the same view.
    pub async fn push(&self, view: PresenceView) -> Result<PushOutcome, PushError> {
        let mut last = self.last.lock().await;
        if last.as_ref() == Some(&view) {
            tracing::trace!("Presence unchanged, skipping push");
            return Ok(PushOutcome::Unchanged);
        }

        match self.provider.update_presence(&view).await {
            Ok(()) => {
                tracing::debug!(
                    details = %view.details,
                    state = %view.state,
                    "Updated {} presence",
                    self.provider.name()
                );
                *last = Some(view);
                Ok(PushOutcome::Pushed)
            }
            Err(e) => {
                tracing::warn!("Failed to update {} presence: {}", self.provider.name(), e);
                Err(e)
            }
        }
    }

    pub async fn clear(&self) -> Result<(), PushError> {
        let mut last = self.last.lock().await;
        *last = None;
        self.provider.clear_presence().await
    }

    /// Forget the last view, e.g. after the provider reconnected
    pub async fn reset(&self) {
        *self.last.lock().await = None;
    }

    pub async fn last(&self) -> Option<PresenceView> {
        self.last.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::traits::MockPresenceProvider;

    fn view(state: &str) -> PresenceView {
        PresenceView {
            details: "Ranked Flex".to_string(),
            state: state.to_string(),
            start: 1,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn identical_views_are_pushed_once() {
        let mut provider = MockPresenceProvider::new();
        provider.expect_name().return_const("Discord");
        provider
            .expect_update_presence()
            .times(1)
            .returning(|_| Ok(()));

        let gate = PresenceGate::new(Arc::new(provider));
        assert_eq!(gate.push(view("In Queue")).await, Ok(PushOutcome::Pushed));
        assert_eq!(gate.push(view("In Queue")).await, Ok(PushOutcome::Unchanged));
    }

    #[tokio::test]
    async fn failed_push_is_retried_next_time() {
        let mut provider = MockPresenceProvider::new();
        provider.expect_name().return_const("Discord");
        let mut calls = 0;
        provider.expect_update_presence().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(PushError::Disconnected)
            } else {
                Ok(())
            }
        });

        let gate = PresenceGate::new(Arc::new(provider));
        assert_eq!(
            gate.push(view("In Queue")).await,
            Err(PushError::Disconnected)
        );
        assert!(gate.last().await.is_none());
        assert_eq!(gate.push(view("In Queue")).await, Ok(PushOutcome::Pushed));
    }

    #[tokio::test]
    async fn reset_forces_the_next_push() {
        let mut provider = MockPresenceProvider::new();
        provider.expect_name().return_const("Discord");
        provider
            .expect_update_presence()
            .times(2)
            .returning(|_| Ok(()));

        let gate = PresenceGate::new(Arc::new(provider));
        gate.push(view("In Champ Select")).await.unwrap();
        gate.reset().await;
        assert_eq!(
            gate.push(view("In Champ Select")).await,
            Ok(PushOutcome::Pushed)
        );
    }
}

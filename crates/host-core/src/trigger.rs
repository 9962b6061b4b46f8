//! Trigger-control capability contract.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

/// Stateless user input that requests the floating viewer.
///
/// The only observable attribute is the enabled flag, mutated exclusively by
/// the controller to prevent concurrent floating-viewer requests.
pub trait TriggerControl: Send + Sync {
    fn set_enabled(&self, enabled: bool);

    fn is_enabled(&self) -> bool;
}

/// Channel-backed trigger control.
///
/// Activations are delivered over a bounded channel to the controller's run
/// loop. A disabled trigger emits no activations, matching the host-button
/// semantics the controller relies on while a request is in flight.
pub struct ChannelTrigger {
    enabled: AtomicBool,
    tx: Mutex<Option<mpsc::Sender<()>>>,
}

impl ChannelTrigger {
    /// Create a trigger and the activation receiver for the run loop.
    pub fn channel(capacity: usize) -> (Arc<Self>, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(capacity);
        let trigger = Arc::new(Self {
            enabled: AtomicBool::new(true),
            tx: Mutex::new(Some(tx)),
        });
        (trigger, rx)
    }

    /// Activate the trigger. Returns `true` if the activation was delivered.
    ///
    /// Activations while disabled, after close, or past the channel capacity
    /// are dropped.
    pub fn activate(&self) -> bool {
        if !self.is_enabled() {
            tracing::debug!("Activation ignored: trigger disabled");
            return false;
        }
        let guard = match self.tx.lock() {
            Ok(guard) => guard,
            Err(_) => return false,
        };
        let Some(tx) = guard.as_ref() else {
            tracing::debug!("Activation ignored: trigger closed");
            return false;
        };
        match tx.try_send(()) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "Activation dropped");
                false
            }
        }
    }

    /// Drop the activation channel. The run loop ends once the queue drains.
    pub fn close(&self) {
        if let Ok(mut guard) = self.tx.lock() {
            guard.take();
        }
    }
}

impl TriggerControl for ChannelTrigger {
    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn activation_delivered_while_enabled() {
        let (trigger, mut rx) = ChannelTrigger::channel(4);
        assert!(trigger.is_enabled());
        assert!(trigger.activate());
        assert!(rx.recv().await.is_some());
    }

    #[tokio::test]
    async fn disabled_trigger_drops_activations() {
        let (trigger, mut rx) = ChannelTrigger::channel(4);
        trigger.set_enabled(false);
        assert!(!trigger.activate());
        trigger.set_enabled(true);
        assert!(trigger.activate());
        // Only the post-enable activation arrives.
        assert!(rx.recv().await.is_some());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn full_channel_drops_instead_of_blocking() {
        let (trigger, _rx) = ChannelTrigger::channel(1);
        assert!(trigger.activate());
        assert!(!trigger.activate());
    }

    #[tokio::test]
    async fn close_ends_the_activation_stream() {
        let (trigger, mut rx) = ChannelTrigger::channel(4);
        assert!(trigger.activate());
        trigger.close();
        assert!(!trigger.activate());
        // Queued activation drains, then the channel reports closed.
        assert!(rx.recv().await.is_some());
        assert!(rx.recv().await.is_none());
    }
}

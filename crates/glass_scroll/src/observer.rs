//! Viewport observer
//!
//! Watches the hosted content area through two independent notifiers: size
//! changes don't imply structural mutation and vice versa, so both are
//! subscribed. Dropping the observer releases both subscriptions.

use std::sync::Arc;

use glass_core::{ElementId, MutationObserver, NotifyCallback, ObserverHandle, SizeObserver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Subscription {
    target: ElementId,
    size: ObserverHandle,
    mutation: ObserverHandle,
}

/// Paired size and mutation subscriptions on one element
pub struct ViewportObserver {
    size_observer: Arc<dyn SizeObserver>,
    mutation_observer: Arc<dyn MutationObserver>,
    subscription: Option<Subscription>,
}

impl ViewportObserver {
    pub fn new(
        size_observer: Arc<dyn SizeObserver>,
        mutation_observer: Arc<dyn MutationObserver>,
    ) -> Self {
        Self {
            size_observer,
            mutation_observer,
            subscription: None,
        }
    }

    /// Start observing `target`, replacing any previous subscription
    pub fn observe(
        &mut self,
        target: ElementId,
        on_resize: NotifyCallback,
        on_mutation: NotifyCallback,
    ) {
        self.disconnect();

        let size = self.size_observer.subscribe(target, on_resize);
        let mutation = self.mutation_observer.subscribe(target, on_mutation);
        tracing::trace!(?target, "viewport observer subscribed");

        self.subscription = Some(Subscription {
            target,
            size,
            mutation,
        });
    }

    /// Release both subscriptions. No-op when not observing.
    pub fn disconnect(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.size_observer.unsubscribe(subscription.size);
            self.mutation_observer.unsubscribe(subscription.mutation);
            tracing::trace!(target = ?subscription.target, "viewport observer disconnected");
        }
    }

    pub fn is_observing(&self) -> bool {
        self.subscription.is_some()
    }

    /// Element currently observed
    pub fn target(&self) -> Option<ElementId> {
        self.subscription.map(|s| s.target)
    }
}

impl Drop for ViewportObserver {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl std::fmt::Debug for ViewportObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportObserver")
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}

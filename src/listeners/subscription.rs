//! # Disposers returned by listener registration.
//!
//! - [`Subscription`]: the disposer. `dispose()` may be called any number of times;
//!   only the first call removes the listener. Dropping it does **not** unregister.
//! - [`SubscriptionGuard`]: scoped acquisition; disposes exactly once when dropped
//!   (the owner's teardown path).
//! - [`SubscriptionSet`]: a bag of subscriptions owned by one component and disposed
//!   together.

use std::fmt;
use std::sync::Weak;

use tracing::debug;

use super::{ListenerId, ListenerRegistry};
use crate::events::EventKind;

/// Disposer for one listener registration.
#[derive(Clone)]
pub struct Subscription {
    id: ListenerId,
    kind: EventKind,
    registry: Weak<ListenerRegistry>,
}

impl Subscription {
    pub(crate) fn new(id: ListenerId, kind: EventKind, registry: Weak<ListenerRegistry>) -> Self {
        Self { id, kind, registry }
    }

    /// Handle of the registration.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Event the listener is registered for.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Removes the listener. Repeated calls are no-ops.
    pub fn dispose(&self) {
        if let Some(registry) = self.registry.upgrade() {
            if registry.unregister(self.kind, self.id) {
                debug!(event = %self.kind, listener = self.id.get(), "listener disposed");
            }
        }
    }

    /// True while the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.contains(self.kind, self.id))
    }

    /// Converts the disposer into a guard that disposes on drop.
    #[must_use = "dropping the guard immediately disposes the listener"]
    pub fn guard(self) -> SubscriptionGuard {
        SubscriptionGuard {
            subscription: Some(self),
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Disposes its subscription when dropped.
#[derive(Debug)]
pub struct SubscriptionGuard {
    subscription: Option<Subscription>,
}

impl SubscriptionGuard {
    /// Borrow the underlying disposer.
    pub fn subscription(&self) -> Option<&Subscription> {
        self.subscription.as_ref()
    }

    /// Detaches the guard without disposing; the listener stays registered.
    pub fn release(mut self) -> Option<Subscription> {
        self.subscription.take()
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        if let Some(sub) = self.subscription.take() {
            sub.dispose();
        }
    }
}

/// Subscriptions owned together and disposed together (on `dispose_all` or drop).
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subscription to the set.
    pub fn push(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Disposes every subscription, in insertion order, and empties the set.
    pub fn dispose_all(&mut self) {
        for sub in self.subscriptions.drain(..) {
            sub.dispose();
        }
    }

    /// Number of subscriptions held.
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// True if the set holds nothing.
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl Extend<Subscription> for SubscriptionSet {
    fn extend<I: IntoIterator<Item = Subscription>>(&mut self, iter: I) {
        self.subscriptions.extend(iter);
    }
}

impl FromIterator<Subscription> for SubscriptionSet {
    fn from_iter<I: IntoIterator<Item = Subscription>>(iter: I) -> Self {
        Self {
            subscriptions: iter.into_iter().collect(),
        }
    }
}

impl Drop for SubscriptionSet {
    fn drop(&mut self) {
        self.dispose_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{BadgeUpdated, Ready};

    #[test]
    fn guard_disposes_exactly_once_on_drop() {
        let registry = ListenerRegistry::new();
        let sub = registry.register::<BadgeUpdated, _>(|_| {});
        let handle = sub.clone();

        {
            let _guard = sub.guard();
            assert!(handle.is_active());
        }

        assert!(!handle.is_active());
        handle.dispose();
        assert_eq!(registry.listener_count(EventKind::BadgeUpdated), 0);
    }

    #[test]
    fn released_guard_keeps_listener() {
        let registry = ListenerRegistry::new();
        let guard = registry.register::<BadgeUpdated, _>(|_| {}).guard();

        let sub = guard.release().unwrap();
        assert!(sub.is_active());
    }

    #[test]
    fn set_disposes_everything_on_drop() {
        let registry = ListenerRegistry::new();
        let set: SubscriptionSet = vec![
            registry.register::<BadgeUpdated, _>(|_| {}),
            registry.register::<Ready, _>(|_| {}),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);

        drop(set);
        assert!(registry.is_empty());
    }
}

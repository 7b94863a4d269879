//! # ListenerRegistry: ordered, reentrancy-safe fan-out per event.
//!
//! [`ListenerRegistry`] keeps, per [`EventKind`], the callbacks registered for it in
//! registration order and delivers payloads to them synchronously.
//!
//! ## Architecture
//! ```text
//! register::<E>(cb) ──► table[E::KIND].push(Entry { id, cb }) ──► Subscription
//!
//! dispatch::<E>(&payload)
//!     │ lock ─► clone entries of table[E::KIND] ─► unlock      (stable snapshot)
//!     ├──► cb1(&payload)   ── panic → logged, next listener
//!     ├──► cb2(&payload)
//!     └──► cbN(&payload)
//! ```
//!
//! ## Rules
//! - **Ordering**: listeners of one event run strictly in registration order.
//! - **Snapshot**: the lock is never held while a callback runs; callbacks may register
//!   or dispose listeners (even for the event in flight). Additions are not delivered
//!   the in-flight event; removals do not skip entries already in the snapshot.
//! - **Isolation**: a panicking callback is caught, logged and swallowed; dispatch
//!   never propagates a listener failure to the producer.
//! - **Idempotent removal**: removing an unknown or already-removed entry is a no-op.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{error, trace};

use super::Subscription;
use crate::events::{Event, EventKind};

/// Global sequence for listener handles.
static LISTENER_SEQ: AtomicU64 = AtomicU64::new(1);

/// Opaque handle identifying one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        Self(LISTENER_SEQ.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value (for logs).
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Type-erased callback; the typed wrapper downcasts the payload.
pub(crate) type Callback = Arc<dyn Fn(&dyn Any) + Send + Sync + 'static>;

struct Entry {
    id: ListenerId,
    callback: Callback,
}

/// Per-event ordered collections of listener callbacks.
#[derive(Default)]
pub struct ListenerRegistry {
    table: Mutex<HashMap<EventKind, Vec<Entry>>>,
}

impl ListenerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers `callback` for event `E` and returns its disposer.
    ///
    /// The callback is stored, never invoked during registration.
    pub fn register<E, F>(self: &Arc<Self>, callback: F) -> Subscription
    where
        E: Event,
        F: Fn(&E::Payload) + Send + Sync + 'static,
    {
        let erased: Callback = Arc::new(move |payload: &dyn Any| {
            if let Some(payload) = payload.downcast_ref::<E::Payload>() {
                callback(payload);
            }
        });
        self.register_erased(E::KIND, erased)
    }

    pub(crate) fn register_erased(self: &Arc<Self>, kind: EventKind, callback: Callback) -> Subscription {
        let id = ListenerId::next();
        self.table()
            .entry(kind)
            .or_default()
            .push(Entry { id, callback });
        trace!(event = %kind, listener = id.get(), "listener registered");
        Subscription::new(id, kind, Arc::downgrade(self))
    }

    /// Removes the entry; returns `false` if it was not present.
    pub(crate) fn unregister(&self, kind: EventKind, id: ListenerId) -> bool {
        let mut table = self.table();
        let Some(entries) = table.get_mut(&kind) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|e| e.id != id);
        let removed = entries.len() != before;
        if entries.is_empty() {
            table.remove(&kind);
        }
        removed
    }

    pub(crate) fn contains(&self, kind: EventKind, id: ListenerId) -> bool {
        self.table()
            .get(&kind)
            .is_some_and(|entries| entries.iter().any(|e| e.id == id))
    }

    /// Delivers `payload` to every listener of `E`; returns how many completed without panicking.
    pub(crate) fn dispatch<E: Event>(&self, payload: &E::Payload) -> usize {
        self.dispatch_erased(E::KIND, payload)
    }

    fn dispatch_erased(&self, kind: EventKind, payload: &dyn Any) -> usize {
        let snapshot: Vec<(ListenerId, Callback)> = self
            .table()
            .get(&kind)
            .map(|entries| {
                entries
                    .iter()
                    .map(|e| (e.id, Arc::clone(&e.callback)))
                    .collect()
            })
            .unwrap_or_default();

        trace!(event = %kind, listeners = snapshot.len(), "dispatching event");

        let mut delivered = 0;
        for (id, callback) in snapshot {
            match panic::catch_unwind(AssertUnwindSafe(|| callback(payload))) {
                Ok(()) => delivered += 1,
                Err(panic) => {
                    error!(
                        event = %kind,
                        listener = id.get(),
                        panic = %panic_message(panic.as_ref()),
                        "listener panicked; continuing dispatch"
                    );
                }
            }
        }
        delivered
    }

    /// Number of listeners currently registered for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.table().get(&kind).map_or(0, Vec::len)
    }

    /// True if no listener is registered for any event.
    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    fn table(&self) -> MutexGuard<'_, HashMap<EventKind, Vec<Entry>>> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table();
        let mut map = f.debug_map();
        for (kind, entries) in table.iter() {
            map.entry(&kind.as_str(), &entries.len());
        }
        map.finish()
    }
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::events::{BadgeUpdated, NotificationSettingsChanged, Unlaunched};

    fn recorder() -> Arc<Mutex<Vec<String>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    #[test]
    fn delivers_in_registration_order_with_identical_payload() {
        let registry = ListenerRegistry::new();
        let seen = recorder();

        for name in ["l1", "l2", "l3"] {
            let seen = Arc::clone(&seen);
            registry.register::<BadgeUpdated, _>(move |badge| {
                seen.lock().unwrap().push(format!("{name}:{badge}"));
            });
        }

        let delivered = registry.dispatch::<BadgeUpdated>(&7);

        assert_eq!(delivered, 3);
        assert_eq!(*seen.lock().unwrap(), vec!["l1:7", "l2:7", "l3:7"]);
    }

    #[test]
    fn other_events_are_not_delivered() {
        let registry = ListenerRegistry::new();
        let seen = recorder();
        let s = Arc::clone(&seen);
        registry.register::<BadgeUpdated, _>(move |_| s.lock().unwrap().push("badge".into()));

        assert_eq!(registry.dispatch::<NotificationSettingsChanged>(&true), 0);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn disposed_listener_is_excluded_and_double_dispose_is_noop() {
        let registry = ListenerRegistry::new();
        let seen = recorder();

        let s1 = Arc::clone(&seen);
        let first = registry.register::<Unlaunched, _>(move |_| s1.lock().unwrap().push("a".into()));
        let s2 = Arc::clone(&seen);
        registry.register::<Unlaunched, _>(move |_| s2.lock().unwrap().push("b".into()));

        first.dispose();
        first.dispose();
        assert!(!first.is_active());

        registry.dispatch::<Unlaunched>(&());
        registry.dispatch::<Unlaunched>(&());
        assert_eq!(*seen.lock().unwrap(), vec!["b", "b"]);
        assert_eq!(registry.listener_count(EventKind::Unlaunched), 1);
    }

    #[test]
    fn panicking_listener_does_not_stop_fan_out() {
        let registry = ListenerRegistry::new();
        let seen = recorder();

        registry.register::<BadgeUpdated, _>(|_| panic!("listener bug"));
        let s = Arc::clone(&seen);
        registry.register::<BadgeUpdated, _>(move |b| s.lock().unwrap().push(b.to_string()));

        let delivered = registry.dispatch::<BadgeUpdated>(&1);

        assert_eq!(delivered, 1);
        assert_eq!(*seen.lock().unwrap(), vec!["1"]);
    }

    #[test]
    fn registration_during_dispatch_sees_only_later_events() {
        let registry = ListenerRegistry::new();
        let seen = recorder();

        let r = Arc::clone(&registry);
        let s = Arc::clone(&seen);
        registry.register::<BadgeUpdated, _>(move |badge| {
            s.lock().unwrap().push(format!("outer:{badge}"));
            let inner_seen = Arc::clone(&s);
            r.register::<BadgeUpdated, _>(move |badge| {
                inner_seen.lock().unwrap().push(format!("inner:{badge}"));
            });
        });

        registry.dispatch::<BadgeUpdated>(&1);
        assert_eq!(*seen.lock().unwrap(), vec!["outer:1"]);

        registry.dispatch::<BadgeUpdated>(&2);
        assert_eq!(*seen.lock().unwrap(), vec!["outer:1", "outer:2", "inner:2"]);
    }

    #[test]
    fn removal_during_dispatch_keeps_snapshot_intact() {
        let registry = ListenerRegistry::new();
        let seen = recorder();
        let victim: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let v = Arc::clone(&victim);
        let s = Arc::clone(&seen);
        registry.register::<BadgeUpdated, _>(move |_| {
            s.lock().unwrap().push("first".into());
            if let Some(sub) = v.lock().unwrap().as_ref() {
                sub.dispose();
            }
        });
        let s = Arc::clone(&seen);
        let second = registry.register::<BadgeUpdated, _>(move |_| s.lock().unwrap().push("second".into()));
        *victim.lock().unwrap() = Some(second);

        registry.dispatch::<BadgeUpdated>(&0);
        registry.dispatch::<BadgeUpdated>(&0);

        assert_eq!(*seen.lock().unwrap(), vec!["first", "second", "first"]);
    }

    #[test]
    fn listener_may_dispose_itself() {
        let registry = ListenerRegistry::new();
        let calls = Arc::new(AtomicU64::new(0));
        let own: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let c = Arc::clone(&calls);
        let o = Arc::clone(&own);
        let sub = registry.register::<BadgeUpdated, _>(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            if let Some(sub) = o.lock().unwrap().as_ref() {
                sub.dispose();
            }
        });
        *own.lock().unwrap() = Some(sub);

        registry.dispatch::<BadgeUpdated>(&0);
        registry.dispatch::<BadgeUpdated>(&0);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn disposal_after_registry_dropped_is_noop() {
        let registry = ListenerRegistry::new();
        let sub = registry.register::<BadgeUpdated, _>(|_| {});
        drop(registry);

        sub.dispose();
        assert!(!sub.is_active());
    }
}

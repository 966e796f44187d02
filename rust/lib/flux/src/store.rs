use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::trace;

use crate::pattern;
use crate::value::{StateValue, SubscriptionId};

/// Callback type for state change notifications.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

/// A state type that lives at a fixed path.
///
/// ```ignore
/// #[derive(Clone)]
/// struct AppRoute(Route);
/// impl State for AppRoute { const PATH: &'static str = "app/route"; }
/// ```
pub trait State: Any + Clone + Send + Sync {
    const PATH: &'static str;
}

/// Per-path state store with pattern-based subscriptions.
///
/// - `set(path, value)` stores a value and notifies all matching subscribers
///   synchronously, on the calling thread, before returning.
/// - `get(path)` reads the current value (Arc clone, cheap).
/// - `put` / `read` are the typed forms keyed by [`State::PATH`].
pub struct StateStore {
    values: RwLock<BTreeMap<String, StateValue>>,
    subscribers: RwLock<Vec<Subscriber>>,
    next_id: AtomicU64,
}

#[derive(Clone)]
struct Subscriber {
    id: SubscriptionId,
    pattern: String,
    handler: ChangeHandler,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Set a typed value at the given path and notify matching subscribers.
    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        self.set_value(path, StateValue::new(value));
    }

    /// Set a pre-built StateValue and notify matching subscribers.
    pub fn set_value(&self, path: &str, value: StateValue) {
        {
            let mut values = self.values.write().unwrap();
            values.insert(path.to_string(), value.clone());
        }

        // Snapshot the matching handlers so none of them runs under our lock;
        // a handler is free to read or write the store.
        let matching: Vec<ChangeHandler> = {
            let subs = self.subscribers.read().unwrap();
            subs.iter()
                .filter(|s| pattern::matches(&s.pattern, path))
                .map(|s| s.handler.clone())
                .collect()
        };
        trace!(path, subscribers = matching.len(), "state set");
        for handler in matching {
            handler(path, &value);
        }
    }

    /// Get the current state value at the given path.
    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.values.read().unwrap().get(path).cloned()
    }

    /// Remove the value at the given path. Does NOT notify subscribers.
    pub fn remove(&self, path: &str) -> Option<StateValue> {
        self.values.write().unwrap().remove(path)
    }

    /// Store a typed state at its own path.
    pub fn put<S: State>(&self, value: S) {
        self.set(S::PATH, value);
    }

    /// Read a typed state from its own path.
    ///
    /// Returns `None` when nothing is stored or the stored type differs.
    pub fn read<S: State>(&self) -> Option<S> {
        self.get(S::PATH)
            .and_then(|v| v.downcast_ref::<S>().cloned())
    }

    /// Read-modify-write a typed state, starting from `Default` if absent.
    /// Publishes (and notifies) the new value and returns it.
    pub fn update<S, F>(&self, f: F) -> S
    where
        S: State + Default,
        F: FnOnce(&mut S),
    {
        let mut state = self.read::<S>().unwrap_or_default();
        f(&mut state);
        self.put(state.clone());
        state
    }

    /// Subscribe to state changes matching the given pattern.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.write().unwrap().push(Subscriber {
            id,
            pattern: pattern.to_string(),
            handler: Arc::new(handler),
        });
        id
    }

    /// Unsubscribe a handler. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.write().unwrap().retain(|s| s.id != id);
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Counter(u32);

    impl State for Counter {
        const PATH: &'static str = "test/counter";
    }

    fn counting_subscriber(store: &StateStore, pattern: &str) -> Arc<AtomicU64> {
        let count = Arc::new(AtomicU64::new(0));
        let count_c = count.clone();
        store.subscribe(pattern, move |_, _| {
            count_c.fetch_add(1, Ordering::Relaxed);
        });
        count
    }

    #[test]
    fn set_and_get() {
        let store = StateStore::new();
        store.set("app/route", "/login".to_string());
        let v = store.get("app/route").unwrap();
        assert_eq!(v.downcast_ref::<String>(), Some(&"/login".to_string()));
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn set_overwrites() {
        let store = StateStore::new();
        store.set("n", 1u32);
        store.set("n", 2u32);
        assert_eq!(store.get("n").unwrap().downcast_ref::<u32>(), Some(&2));
    }

    #[test]
    fn typed_put_read_update() {
        let store = StateStore::new();
        assert!(store.read::<Counter>().is_none());

        store.put(Counter(3));
        assert_eq!(store.read::<Counter>(), Some(Counter(3)));

        let next = store.update::<Counter, _>(|c| c.0 += 1);
        assert_eq!(next, Counter(4));
        assert_eq!(store.read::<Counter>(), Some(Counter(4)));
    }

    #[test]
    fn update_starts_from_default() {
        let store = StateStore::new();
        let c = store.update::<Counter, _>(|c| c.0 += 10);
        assert_eq!(c, Counter(10));
    }

    #[test]
    fn read_wrong_type_is_none() {
        let store = StateStore::new();
        store.set(Counter::PATH, "not a counter".to_string());
        assert!(store.read::<Counter>().is_none());
    }

    #[test]
    fn subscriber_notified_synchronously() {
        let store = StateStore::new();
        let count = counting_subscriber(&store, "auth/state");
        store.set("auth/state", 1u32);
        // No await, no thread: already delivered.
        assert_eq!(count.load(Ordering::Relaxed), 1);
        store.set("auth/other", 1u32);
        assert_eq!(count.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn wildcard_subscribers() {
        let store = StateStore::new();
        let app = counting_subscriber(&store, "app/+");
        let all = counting_subscriber(&store, "#");

        store.set("app/route", 1u32);
        store.set("app/notice", 2u32);
        store.set("page/collections", 3u32);

        assert_eq!(app.load(Ordering::Relaxed), 2);
        assert_eq!(all.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn subscriber_receives_value() {
        let store = StateStore::new();
        let seen = Arc::new(RwLock::new(None::<u32>));
        let seen_c = seen.clone();
        store.subscribe("n", move |path, value| {
            assert_eq!(path, "n");
            *seen_c.write().unwrap() = value.downcast_ref::<u32>().copied();
        });
        store.set("n", 42u32);
        assert_eq!(*seen.read().unwrap(), Some(42));
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let store = StateStore::new();
        let count = Arc::new(AtomicU64::new(0));
        let count_c = count.clone();
        let id = store.subscribe("n", move |_, _| {
            count_c.fetch_add(1, Ordering::Relaxed);
        });
        let other = counting_subscriber(&store, "n");

        store.set("n", 1u32);
        store.unsubscribe(id);
        store.set("n", 2u32);

        assert_eq!(count.load(Ordering::Relaxed), 1);
        assert_eq!(other.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn handler_may_write_back_into_store() {
        let store = Arc::new(StateStore::new());
        let store_c = store.clone();
        store.subscribe("auth/state", move |_, _| {
            store_c.set("app/route", "/".to_string());
        });
        store.set("auth/state", 1u32);
        assert!(store.get("app/route").is_some());
    }

    #[test]
    fn remove_is_silent() {
        let store = StateStore::new();
        store.set("n", 1u32);
        let count = counting_subscriber(&store, "n");
        assert!(store.remove("n").is_some());
        assert!(store.remove("n").is_none());
        assert_eq!(count.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn concurrent_set_with_subscriber() {
        use std::thread;

        let store = Arc::new(StateStore::new());
        let total = counting_subscriber(&store, "#");

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = store.clone();
                thread::spawn(move || {
                    for i in 0..100u32 {
                        store.set(&format!("thread/{}/{}", t, i), i);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(total.load(Ordering::Relaxed), 400);
        assert_eq!(store.get("thread/3/99").unwrap().downcast_ref::<u32>(), Some(&99));
    }
}

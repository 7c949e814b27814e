//! Name-keyed listener registry.
//!
//! Each recognizer owns its own dispatcher; there is no shared global registry.
//! Closures have no identity of their own, so `on`/`once` hand back a [`ListenerId`]
//! that is later passed to `off`.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Handle identifying one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Callback<P> = Box<dyn FnMut(&P)>;

struct ListenerEntry<P> {
    id: ListenerId,
    once: bool,
    callback: Callback<P>,
}

/// Registry mapping event keys to ordered listener lists.
pub struct EventDispatcher<K, P> {
    listeners: HashMap<K, Vec<ListenerEntry<P>>>,
    next_id: u64,
}

impl<K, P> EventDispatcher<K, P>
where
    K: Eq + Hash + Copy,
{
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            next_id: 0,
        }
    }

    /// Register `listener` for `key`. Registering the same closure twice yields two
    /// independent registrations.
    pub fn on<F>(&mut self, key: K, listener: F) -> ListenerId
    where
        F: FnMut(&P) + 'static,
    {
        self.register(key, false, Box::new(listener))
    }

    /// Register `listener` for a single emission of `key`.
    pub fn once<F>(&mut self, key: K, listener: F) -> ListenerId
    where
        F: FnMut(&P) + 'static,
    {
        self.register(key, true, Box::new(listener))
    }

    /// Remove a registration. Returns false when `id` is not registered under `key`.
    pub fn off(&mut self, key: K, id: ListenerId) -> bool {
        let Some(entries) = self.listeners.get_mut(&key) else {
            return false;
        };
        let Some(index) = entries.iter().position(|entry| entry.id == id) else {
            return false;
        };
        entries.remove(index);
        if entries.is_empty() {
            self.listeners.remove(&key);
        }
        true
    }

    /// Invoke every listener registered for `key`, in registration order. Returns how
    /// many listeners ran.
    pub fn emit(&mut self, key: K, payload: &P) -> usize {
        let Some(entries) = self.listeners.get_mut(&key) else {
            return 0;
        };

        let mut invoked = 0;
        entries.retain_mut(|entry| {
            (entry.callback)(payload);
            invoked += 1;
            !entry.once
        });
        if entries.is_empty() {
            self.listeners.remove(&key);
        }
        invoked
    }

    pub fn listener_count(&self, key: K) -> usize {
        self.listeners.get(&key).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Drop every registration.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    fn register(&mut self, key: K, once: bool, callback: Callback<P>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.entry(key).or_default().push(ListenerEntry {
            id,
            once,
            callback,
        });
        id
    }
}

impl<K, P> Default for EventDispatcher<K, P>
where
    K: Eq + Hash + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P> fmt::Debug for EventDispatcher<K, P>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<(&K, usize)> = self
            .listeners
            .iter()
            .map(|(key, entries)| (key, entries.len()))
            .collect();
        f.debug_struct("EventDispatcher")
            .field("listeners", &counts)
            .finish()
    }
}

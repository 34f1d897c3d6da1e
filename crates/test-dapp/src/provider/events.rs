use alloy_primitives::{Address, map::HashMap};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

/// The provider events the page subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "chainChanged")]
    ChainChanged,
    #[serde(rename = "networkChanged")]
    NetworkChanged,
    #[serde(rename = "accountsChanged")]
    AccountsChanged,
}

impl EventKind {
    pub const ALL: [Self; 3] = [Self::ChainChanged, Self::NetworkChanged, Self::AccountsChanged];

    /// The EIP-1193 event name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ChainChanged => "chainChanged",
            Self::NetworkChanged => "networkChanged",
            Self::AccountsChanged => "accountsChanged",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event emitted by a provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderEvent {
    /// `0x`-prefixed hex chain id.
    ChainChanged(String),
    /// Decimal network id.
    NetworkChanged(String),
    AccountsChanged(Vec<Address>),
}

impl ProviderEvent {
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::ChainChanged(_) => EventKind::ChainChanged,
            Self::NetworkChanged(_) => EventKind::NetworkChanged,
            Self::AccountsChanged(_) => EventKind::AccountsChanged,
        }
    }
}

/// Callback registered with [`EventEmitter::on`].
pub type Listener = Arc<dyn Fn(&ProviderEvent) + Send + Sync>;

/// Handle returned on registration, needed to remove the listener again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listener bookkeeping for a provider.
#[derive(Default)]
pub struct EventEmitter {
    next_id: AtomicU64,
    listeners: Mutex<HashMap<EventKind, Vec<(ListenerId, Listener)>>>,
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.lock();
        let counts: Vec<_> = listeners.iter().map(|(kind, l)| (*kind, l.len())).collect();
        f.debug_struct("EventEmitter").field("listeners", &counts).finish()
    }
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for events of `kind`.
    pub fn on(&self, kind: EventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().entry(kind).or_default().push((id, listener));
        trace!(target: "provider", %kind, ?id, "added listener");
        id
    }

    /// Removes a listener, returning whether it was registered.
    pub fn remove_listener(&self, kind: EventKind, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let Some(registered) = listeners.get_mut(&kind) else { return false };
        let before = registered.len();
        registered.retain(|(listener_id, _)| *listener_id != id);
        let removed = registered.len() != before;
        if removed {
            trace!(target: "provider", %kind, ?id, "removed listener");
        }
        removed
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.lock().get(&kind).map_or(0, Vec::len)
    }

    /// Calls every listener registered for the event's kind.
    ///
    /// Listeners are invoked outside the lock so they may register or remove listeners.
    pub fn emit(&self, event: &ProviderEvent) {
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .get(&event.kind())
            .map(|l| l.iter().map(|(_, listener)| listener.clone()).collect())
            .unwrap_or_default();
        debug!(target: "provider", kind = %event.kind(), listeners = listeners.len(), "emit");
        for listener in listeners {
            listener(event);
        }
    }
}

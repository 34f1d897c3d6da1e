//! EIP-6963 multi-wallet discovery.
//!
//! Wallets announce themselves with `eip6963:announceProvider`. A page that subscribes late
//! dispatches `eip6963:requestProvider` and every installed wallet announces again.
//!
//! Reference: <https://eips.ethereum.org/EIPS/eip-6963>

use crate::registry::ProviderDetail;
use parking_lot::Mutex;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// Event wallets dispatch to announce themselves.
pub const ANNOUNCE_PROVIDER_EVENT: &str = "eip6963:announceProvider";
/// Event pages dispatch to ask wallets to announce.
pub const REQUEST_PROVIDER_EVENT: &str = "eip6963:requestProvider";

/// The window-level event bus connecting wallets and pages.
#[derive(Debug, Default)]
pub struct Eip6963Discovery {
    wallets: Mutex<Vec<ProviderDetail>>,
    subscribers: Mutex<Vec<UnboundedSender<ProviderDetail>>>,
}

impl Eip6963Discovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a wallet. It announces itself right away and answers later requests.
    pub fn install(&self, detail: ProviderDetail) {
        debug!(
            target: "eip6963",
            name = %detail.info.name,
            uuid = %detail.info.uuid,
            "wallet installed"
        );
        self.wallets.lock().push(detail.clone());
        self.announce(detail);
    }

    /// Listens for `eip6963:announceProvider`.
    pub fn subscribe(&self) -> UnboundedReceiver<ProviderDetail> {
        let (tx, rx) = unbounded_channel();
        self.subscribers.lock().push(tx);
        rx
    }

    /// Dispatches `eip6963:requestProvider`, making every installed wallet announce.
    pub fn request_providers(&self) {
        let wallets = self.wallets.lock().clone();
        trace!(target: "eip6963", wallets = wallets.len(), "{REQUEST_PROVIDER_EVENT}");
        for detail in wallets {
            self.announce(detail);
        }
    }

    fn announce(&self, detail: ProviderDetail) {
        trace!(target: "eip6963", name = %detail.info.name, "{ANNOUNCE_PROVIDER_EVENT}");
        // drop subscribers whose page went away
        self.subscribers.lock().retain(|tx| tx.send(detail.clone()).is_ok());
    }
}

//! The EIP-1193 provider surface the page talks to.

mod events;
pub use events::{EventEmitter, EventKind, Listener, ListenerId, ProviderEvent};

mod local;
pub use local::LocalProvider;

mod request;
pub use request::{EthereumRequest, RequestArguments};

use crate::error::{DappError, ProviderRpcError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::{fmt, sync::Arc};

/// Shared handle to a wallet provider.
pub type ProviderHandle = Arc<dyn Eip1193Provider>;

/// An object implementing the wallet request/event interface.
///
/// Reference: <https://eips.ethereum.org/EIPS/eip-1193>
#[async_trait]
pub trait Eip1193Provider: Send + Sync + fmt::Debug {
    /// Submits a request to the wallet.
    async fn request(
        &self,
        args: RequestArguments,
    ) -> Result<serde_json::Value, ProviderRpcError>;

    /// Subscribes to provider events of `kind`.
    fn on(&self, kind: EventKind, listener: Listener) -> ListenerId;

    /// Unsubscribes a listener previously returned by [`Eip1193Provider::on`].
    fn remove_listener(&self, kind: EventKind, id: ListenerId) -> bool;

    /// Legacy MetaMask flag that stops the page from reloading on network changes.
    fn set_auto_refresh_on_network_change(&self, _enabled: bool) {}
}

/// Sends a typed request and decodes the response.
pub async fn request<T: DeserializeOwned>(
    provider: &dyn Eip1193Provider,
    request: EthereumRequest,
) -> Result<T> {
    let method = request.method();
    let args = request.into_arguments()?;
    trace!(target: "provider", method, "request");
    let value = provider.request(args).await?;
    serde_json::from_value(value).map_err(|source| DappError::InvalidResponse { method, source })
}

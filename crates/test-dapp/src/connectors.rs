//! WalletConnect and SDK connectors.
//!
//! A connector hands the page a provider that does not live in the window. Once connected,
//! its provider is registered under the connector's name, next to the EIP-6963 wallets.

use crate::{
    error::{DappError, Result},
    form::Button,
    provider::ProviderHandle,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::fmt;

/// Label of a connector button while connected.
pub const DISCONNECT_LABEL: &str = "Disconnect";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectorKind {
    WalletConnect,
    Sdk,
}

impl ConnectorKind {
    /// Name the connector's provider is registered under.
    pub const fn provider_name(&self) -> &'static str {
        match self {
            Self::WalletConnect => "wallet-connect",
            Self::Sdk => "sdk-connect",
        }
    }

    pub const fn button(&self) -> Button {
        match self {
            Self::WalletConnect => Button::WalletConnect,
            Self::Sdk => Button::SdkConnect,
        }
    }

    pub const fn connect_label(&self) -> &'static str {
        match self {
            Self::WalletConnect => "Wallet Connect",
            Self::Sdk => "SDK Connect",
        }
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.provider_name())
    }
}

/// A way of reaching a wallet other than the injected provider.
#[async_trait]
pub trait Connector: Send + Sync + fmt::Debug {
    fn kind(&self) -> ConnectorKind;

    /// Opens the session and returns its provider.
    async fn connect(&self) -> Result<ProviderHandle>;

    /// Closes the session.
    async fn disconnect(&self) -> Result<()>;
}

/// A connector whose session hands out a provider that already exists, e.g. a local wallet.
#[derive(Debug)]
pub struct StaticConnector {
    kind: ConnectorKind,
    provider: ProviderHandle,
    connected: Mutex<bool>,
}

impl StaticConnector {
    pub fn new(kind: ConnectorKind, provider: ProviderHandle) -> Self {
        Self { kind, provider, connected: Mutex::new(false) }
    }

    pub fn is_connected(&self) -> bool {
        *self.connected.lock()
    }
}

#[async_trait]
impl Connector for StaticConnector {
    fn kind(&self) -> ConnectorKind {
        self.kind
    }

    async fn connect(&self) -> Result<ProviderHandle> {
        let mut connected = self.connected.lock();
        if *connected {
            return Err(DappError::Connector {
                connector: self.kind.provider_name(),
                reason: "session already open".to_string(),
            });
        }
        *connected = true;
        Ok(self.provider.clone())
    }

    async fn disconnect(&self) -> Result<()> {
        *self.connected.lock() = false;
        Ok(())
    }
}

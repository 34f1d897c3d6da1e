use crate::{connectors::ConnectorKind, network::ChainState};
use alloy_primitives::Address;
use itertools::Itertools;
use serde::Serialize;

/// Account and chain state mirrored from the active provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DappState {
    /// Connected accounts; empty when disconnected.
    pub accounts: Vec<Address>,
    pub chain: ChainState,
    /// Decimal network id from `net_version` / `networkChanged`.
    pub network_id: String,
    pub wallet_connect_connected: bool,
    pub sdk_connected: bool,
    /// The `scrollTo` request was handled.
    pub scroll_to_handled: bool,
}

impl DappState {
    pub fn is_connected(&self) -> bool {
        !self.accounts.is_empty()
    }

    /// The accounts as shown on the page.
    pub fn accounts_text(&self) -> String {
        self.accounts.iter().join(",")
    }

    pub fn is_connector_connected(&self, kind: ConnectorKind) -> bool {
        match kind {
            ConnectorKind::WalletConnect => self.wallet_connect_connected,
            ConnectorKind::Sdk => self.sdk_connected,
        }
    }

    pub fn set_connector_connected(&mut self, kind: ConnectorKind, connected: bool) {
        match kind {
            ConnectorKind::WalletConnect => self.wallet_connect_connected = connected,
            ConnectorKind::Sdk => self.sdk_connected = connected,
        }
    }
}

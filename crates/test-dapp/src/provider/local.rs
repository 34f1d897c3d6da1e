use super::{
    Eip1193Provider, EthereumRequest, EventEmitter, EventKind, Listener, ListenerId,
    ProviderEvent, RequestArguments,
};
use crate::error::ProviderRpcError;
use alloy_primitives::{Address, ChainId, hex};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Value, json};

/// An in-process wallet backed by local private keys.
///
/// Behaves like an injected browser wallet: accounts stay hidden until the page calls
/// `eth_requestAccounts`, and chain or account changes are announced through the provider
/// events.
#[derive(Debug)]
pub struct LocalProvider {
    signers: Vec<PrivateKeySigner>,
    state: RwLock<WalletState>,
    events: EventEmitter,
}

#[derive(Debug)]
struct WalletState {
    chain_id: ChainId,
    /// Whether the user approved the page's connection request.
    authorized: bool,
    /// Answer every prompt with a 4001 rejection.
    reject_prompts: bool,
    auto_refresh_on_network_change: bool,
}

impl LocalProvider {
    pub fn new(signers: Vec<PrivateKeySigner>, chain_id: ChainId) -> Self {
        Self {
            signers,
            state: RwLock::new(WalletState {
                chain_id,
                authorized: false,
                reject_prompts: false,
                auto_refresh_on_network_change: true,
            }),
            events: EventEmitter::new(),
        }
    }

    /// A wallet holding a single freshly generated key.
    pub fn random(chain_id: ChainId) -> Self {
        Self::new(vec![PrivateKeySigner::random()], chain_id)
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.signers.iter().map(|signer| signer.address()).collect()
    }

    pub fn chain_id(&self) -> ChainId {
        self.state.read().chain_id
    }

    pub fn is_authorized(&self) -> bool {
        self.state.read().authorized
    }

    pub fn auto_refresh_on_network_change(&self) -> bool {
        self.state.read().auto_refresh_on_network_change
    }

    /// Makes every following user prompt fail with a rejection.
    pub fn set_reject_prompts(&self, reject: bool) {
        self.state.write().reject_prompts = reject;
    }

    /// Moves the wallet to another chain, emitting `chainChanged` and `networkChanged`.
    pub fn switch_chain(&self, chain_id: ChainId) {
        self.state.write().chain_id = chain_id;
        debug!(target: "provider", chain_id, "local wallet switched chain");
        self.events.emit(&ProviderEvent::ChainChanged(format!("{chain_id:#x}")));
        self.events.emit(&ProviderEvent::NetworkChanged(chain_id.to_string()));
    }

    /// Disconnects the page, emitting an empty `accountsChanged`.
    pub fn revoke_accounts(&self) {
        self.state.write().authorized = false;
        self.events.emit(&ProviderEvent::AccountsChanged(Vec::new()));
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.events.listener_count(kind)
    }

    fn exposed_accounts(&self) -> Vec<Address> {
        if self.is_authorized() { self.addresses() } else { Vec::new() }
    }

    fn request_accounts(&self) -> Result<Vec<Address>, ProviderRpcError> {
        let newly_authorized = {
            let mut state = self.state.write();
            if state.reject_prompts {
                return Err(ProviderRpcError::user_rejected());
            }
            !std::mem::replace(&mut state.authorized, true)
        };
        let accounts = self.addresses();
        if newly_authorized {
            self.events.emit(&ProviderEvent::AccountsChanged(accounts.clone()));
        }
        Ok(accounts)
    }

    async fn sign_typed_data_v4(
        &self,
        address: Address,
        data: &alloy_dyn_abi::TypedData,
    ) -> Result<String, ProviderRpcError> {
        let (authorized, reject) = {
            let state = self.state.read();
            (state.authorized, state.reject_prompts)
        };
        let signer = self
            .signers
            .iter()
            .find(|signer| signer.address() == address)
            .filter(|_| authorized)
            .ok_or_else(ProviderRpcError::unauthorized)?;
        if reject {
            return Err(ProviderRpcError::user_rejected());
        }
        let signature = signer
            .sign_dynamic_typed_data(data)
            .await
            .map_err(|e| ProviderRpcError::internal_error_with(e.to_string()))?;
        Ok(hex::encode_prefixed(signature.as_bytes()))
    }
}

#[async_trait]
impl Eip1193Provider for LocalProvider {
    async fn request(&self, args: RequestArguments) -> Result<Value, ProviderRpcError> {
        let request = EthereumRequest::try_from(&args)?;
        debug!(target: "provider", method = request.method(), "local wallet request");
        match request {
            EthereumRequest::Accounts => Ok(json!(self.exposed_accounts())),
            EthereumRequest::RequestAccounts => Ok(json!(self.request_accounts()?)),
            EthereumRequest::ChainId => Ok(json!(format!("{:#x}", self.chain_id()))),
            EthereumRequest::NetVersion => Ok(json!(self.chain_id().to_string())),
            EthereumRequest::SignTypedDataV4(address, data) => {
                Ok(json!(self.sign_typed_data_v4(address, &data).await?))
            }
        }
    }

    fn on(&self, kind: EventKind, listener: Listener) -> ListenerId {
        self.events.on(kind, listener)
    }

    fn remove_listener(&self, kind: EventKind, id: ListenerId) -> bool {
        self.events.remove_listener(kind, id)
    }

    fn set_auto_refresh_on_network_change(&self, enabled: bool) {
        self.state.write().auto_refresh_on_network_change = enabled;
    }
}

//! The page controller.
//!
//! [`Dapp`] owns everything the page knows: the provider registry, the active provider and
//! the listeners bound to it, the mirrored account/chain state and the form view. Page
//! actions are `&mut self` methods, so they run one at a time.

use crate::{
    config::PageConfig,
    connectors::{Connector, DISCONNECT_LABEL},
    discovery::Eip6963Discovery,
    error::{DappError, Result},
    form::{self, ActiveProviderView, Button, FormView, OnboardAction},
    network::ChainState,
    provider::{
        EthereumRequest, EventKind, ListenerId, ProviderEvent, ProviderHandle, request,
    },
    registry::{ProviderCard, ProviderDetail, ProviderInfo, ProviderRegistry, Registration},
    state::DappState,
    typed_data,
};
use alloy_dyn_abi::TypedData;
use alloy_primitives::Address;
use itertools::Itertools;
use std::{sync::Arc, time::Duration};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use uuid::Uuid;

/// Name shown for the window-injected provider.
pub const WINDOW_PROVIDER_NAME: &str = "window.ethereum";

/// Shown when a provider answers `eth_accounts` with nothing.
pub const NO_ACCOUNTS_TEXT: &str = "Not able to get accounts";

/// A request to bring a page element into view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrollRequest {
    pub element_id: String,
    /// Wait this long before scrolling.
    pub delay: Option<Duration>,
}

#[derive(Debug)]
struct ActiveProvider {
    detail: ProviderDetail,
    listeners: Vec<(EventKind, ListenerId)>,
}

/// Provider events tagged with the activation they were emitted under.
type TaggedEvent = (u64, ProviderEvent);

#[derive(Debug)]
pub struct Dapp {
    config: PageConfig,
    registry: ProviderRegistry,
    cards: Vec<ProviderCard>,
    /// The injected `window.ethereum`, if any.
    window_provider: Option<ProviderHandle>,
    active: Option<ActiveProvider>,
    /// Bumped on every provider switch; events from older activations are dropped.
    generation: u64,
    state: DappState,
    form: FormView,
    events_tx: UnboundedSender<TaggedEvent>,
    events_rx: UnboundedReceiver<TaggedEvent>,
    announcements: Option<UnboundedReceiver<ProviderDetail>>,
    pending_scroll: Option<ScrollRequest>,
}

impl Dapp {
    pub fn new(config: PageConfig, window_provider: Option<ProviderHandle>) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        Self {
            config,
            registry: ProviderRegistry::new(),
            cards: Vec::new(),
            window_provider,
            active: None,
            generation: 0,
            state: DappState::default(),
            form: FormView::new(),
            events_tx,
            events_rx,
            announcements: None,
            pending_scroll: None,
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn state(&self) -> &DappState {
        &self.state
    }

    pub fn form(&self) -> &FormView {
        &self.form
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// The rendered provider list.
    pub fn provider_cards(&self) -> &[ProviderCard] {
        &self.cards
    }

    pub fn active_provider(&self) -> Option<&ProviderDetail> {
        self.active.as_ref().map(|active| &active.detail)
    }

    /// Whether a provider is available to talk to.
    pub fn is_installed(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    /// Types into the merkle-tree input.
    pub fn set_merkle_tree(&mut self, value: impl Into<String>) {
        self.form.merkle_tree = value.into();
    }

    /// Takes the scroll the page still has to perform.
    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        self.pending_scroll.take()
    }

    fn provider(&self) -> Option<ProviderHandle> {
        self.active.as_ref().map(|active| active.detail.provider.clone())
    }

    /// Page entry point: use the injected provider, discover EIP-6963 wallets, then switch to
    /// the first one announced.
    pub async fn initialize(&mut self, discovery: &Eip6963Discovery) {
        self.use_window_provider().await;
        self.detect_eip6963(discovery);
        if let Some(first) = self.registry.first().cloned() {
            self.set_active_provider(first).await;
        }
    }

    // --- provider registry ---

    /// Subscribes to announcements and asks every installed wallet to announce itself.
    pub fn detect_eip6963(&mut self, discovery: &Eip6963Discovery) {
        self.announcements = Some(discovery.subscribe());
        discovery.request_providers();
        self.process_announcements();
    }

    /// Handles an `eip6963:announceProvider` event.
    pub fn handle_announcement(&mut self, detail: ProviderDetail) -> Option<Registration> {
        if detail.info.uuid.is_empty() {
            debug!(target: "dapp", name = %detail.info.name, "ignoring announcement without uuid");
            return None;
        }
        self.form.eip6963_warning_visible = false;
        self.form.eip6963_section_visible = true;
        Some(self.handle_new_provider_detail(detail))
    }

    pub fn handle_new_provider_detail(&mut self, detail: ProviderDetail) -> Registration {
        let registration = self.registry.register(detail);
        if registration == Registration::Added {
            self.render_provider_details();
        }
        registration
    }

    pub fn remove_provider_detail(&mut self, name: &str) -> Option<ProviderDetail> {
        let removed = self.registry.remove(name)?;
        self.render_provider_details();
        Some(removed)
    }

    fn render_provider_details(&mut self) {
        self.cards = self.registry.render();
    }

    // --- active provider ---

    /// The "Use <name>" button of a provider card.
    pub async fn use_provider(&mut self, uuid: &str) -> Result<()> {
        let detail = self
            .registry
            .get(uuid)
            .cloned()
            .ok_or_else(|| DappError::UnknownProvider(uuid.to_string()))?;
        self.set_active_provider(detail).await;
        Ok(())
    }

    /// Switches to the window-injected provider, or to the "not installed" state without one.
    pub async fn use_window_provider(&mut self) {
        let info = ProviderInfo::new("", WINDOW_PROVIDER_NAME);
        self.activate(info, self.window_provider.clone()).await;
    }

    /// Makes `detail` the active provider.
    pub async fn set_active_provider(&mut self, detail: ProviderDetail) {
        self.activate(detail.info, Some(detail.provider)).await;
    }

    async fn activate(&mut self, info: ProviderInfo, provider: Option<ProviderHandle>) {
        self.close_provider();
        self.generation += 1;
        debug!(
            target: "dapp",
            name = %info.name,
            uuid = %info.uuid,
            generation = self.generation,
            "activating provider"
        );
        self.active = provider.map(|provider| ActiveProvider {
            detail: ProviderDetail::new(info.clone(), provider),
            listeners: Vec::new(),
        });
        self.initialize_provider().await;

        if let Some(provider) = self.provider() {
            match request::<Vec<Address>>(provider.as_ref(), EthereumRequest::Accounts).await {
                Ok(accounts) => self.handle_new_accounts(accounts),
                Err(err) => error!(target: "dapp", %err, "error on init when getting accounts"),
            }
        }

        let icon_html = if info.icon.is_empty() {
            String::new()
        } else {
            format!(r#"<img src="{}" height="90" width="90" />"#, info.icon)
        };
        self.form.active_provider =
            ActiveProviderView { uuid: info.uuid, name: info.name, icon_html };
        self.update_form_elements();
    }

    /// Resets mirrored state and detaches from the active provider.
    ///
    /// Must be called before the active provider changes.
    fn close_provider(&mut self) {
        self.handle_new_accounts(Vec::new());
        // network first, so the cleared chain does not fall back to the old network id
        self.handle_new_network("");
        self.handle_new_chain("");
        if let Some(active) = self.active.take() {
            for (kind, id) in active.listeners {
                if !active.detail.provider.remove_listener(kind, id) {
                    warn!(target: "dapp", %kind, "listener was already gone from provider");
                }
            }
        }
    }

    /// Binds the active provider. Must be called after the active provider changes.
    async fn initialize_provider(&mut self) {
        self.update_form_elements();

        let Some(provider) = self.provider() else {
            self.handle_scroll_to(false);
            return;
        };
        provider.set_auto_refresh_on_network_change(false);
        self.refresh_network_and_chain_id().await;

        let generation = self.generation;
        let listeners = EventKind::ALL
            .into_iter()
            .map(|kind| {
                let tx = self.events_tx.clone();
                let id = provider.on(
                    kind,
                    Arc::new(move |event: &ProviderEvent| {
                        let _ = tx.send((generation, event.clone()));
                    }),
                );
                (kind, id)
            })
            .collect();
        if let Some(active) = &mut self.active {
            active.listeners = listeners;
        }
    }

    /// Queries `eth_chainId` and `net_version` from the active provider.
    pub async fn refresh_network_and_chain_id(&mut self) {
        if let Err(err) = self.try_refresh_network_and_chain_id().await {
            error!(target: "dapp", %err, "failed to get network and chain id");
        }
    }

    async fn try_refresh_network_and_chain_id(&mut self) -> Result<()> {
        let provider = self.provider().ok_or(DappError::NoActiveProvider)?;
        let chain_id: String = request(provider.as_ref(), EthereumRequest::ChainId).await?;
        self.handle_new_chain(&chain_id);
        let network_id: String = request(provider.as_ref(), EthereumRequest::NetVersion).await?;
        self.handle_new_network(&network_id);
        Ok(())
    }

    // --- state mirror ---

    /// Applies queued EIP-6963 announcements and provider events, returning how many were
    /// applied.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = self.process_announcements();
        while let Ok((generation, event)) = self.events_rx.try_recv() {
            if generation != self.generation {
                trace!(
                    target: "dapp",
                    generation,
                    kind = %event.kind(),
                    "dropping event from detached provider"
                );
                continue;
            }
            self.handle_event(event);
            applied += 1;
        }
        applied
    }

    fn process_announcements(&mut self) -> usize {
        let Some(rx) = self.announcements.as_mut() else { return 0 };
        let mut received = Vec::new();
        while let Ok(detail) = rx.try_recv() {
            received.push(detail);
        }
        let count = received.len();
        for detail in received {
            self.handle_announcement(detail);
        }
        count
    }

    fn handle_event(&mut self, event: ProviderEvent) {
        match event {
            ProviderEvent::ChainChanged(chain_id) => self.handle_new_chain(&chain_id),
            ProviderEvent::NetworkChanged(network_id) => self.handle_new_network(&network_id),
            ProviderEvent::AccountsChanged(accounts) => self.handle_new_accounts(accounts),
        }
    }

    pub fn handle_new_accounts(&mut self, accounts: Vec<Address>) {
        self.state.accounts = accounts;
        self.update_form_elements();
    }

    pub fn handle_new_chain(&mut self, chain_id: &str) {
        self.state.chain = ChainState::from_chain_id(chain_id, &self.state.network_id);
        // wait until the warning is rendered or not to improve accuracy
        if !self.state.scroll_to_handled {
            self.handle_scroll_to(true);
        }
    }

    pub fn handle_new_network(&mut self, network_id: &str) {
        self.state.network_id = network_id.to_string();
    }

    fn handle_scroll_to(&mut self, delay: bool) {
        let Some(element_id) = self.config.scroll_to.clone() else { return };
        self.state.scroll_to_handled = true;
        info!(target: "dapp", %element_id, "attempting to scroll to element");
        if !form::has_element(&element_id) {
            warn!(target: "dapp", %element_id, "cannot find element");
            return;
        }
        let delay = delay.then_some(self.config.scroll_delay);
        self.pending_scroll = Some(ScrollRequest { element_id, delay });
    }

    // --- form ---

    /// Updates button state. Must be called after the provider or connected accounts change.
    pub fn update_form_elements(&mut self) {
        self.form.update(self.is_installed(), self.is_connected());
    }

    /// Click on the onboard button.
    pub async fn click_onboard(&mut self) {
        match self.form.onboard_action {
            OnboardAction::Install => {
                info!(
                    target: "dapp",
                    forwarder_origin = ?self.config.forwarder_origin,
                    "starting onboarding"
                );
                self.form.start_onboarding();
            }
            OnboardAction::RequestAccounts => self.connect().await,
            OnboardAction::None => {}
        }
    }

    /// `eth_requestAccounts`
    pub async fn connect(&mut self) {
        let result = match self.provider() {
            Some(provider) => {
                request::<Vec<Address>>(provider.as_ref(), EthereumRequest::RequestAccounts).await
            }
            None => Err(DappError::NoActiveProvider),
        };
        match result {
            Ok(accounts) => self.handle_new_accounts(accounts),
            Err(err) => error!(target: "dapp", %err, "failed to request accounts"),
        }
    }

    /// The `eth_accounts` button.
    pub async fn get_accounts(&mut self) {
        let result = match self.provider() {
            Some(provider) => {
                request::<Option<Vec<Address>>>(provider.as_ref(), EthereumRequest::Accounts).await
            }
            None => Err(DappError::NoActiveProvider),
        };
        self.form.get_accounts_result = match result {
            Ok(Some(accounts)) => accounts.iter().join(","),
            Ok(None) => NO_ACCOUNTS_TEXT.to_string(),
            Err(err) => {
                error!(target: "dapp", %err, "failed to get accounts");
                err.display_text()
            }
        };
    }

    fn first_account(&self) -> Result<Address> {
        self.state.accounts.first().copied().ok_or(DappError::NotConnected)
    }

    /// The payload signed and verified by the typed-data buttons.
    pub fn typed_data(&self) -> Result<TypedData> {
        let root = typed_data::parse_merkle_root(&self.form.merkle_tree)?;
        typed_data::merkle_root_typed_data(root)
    }

    /// The "Sign" button: `eth_signTypedData_v4` from the first account.
    pub async fn sign_typed_data_v4(&mut self) {
        match self.try_sign_typed_data_v4().await {
            Ok(signature) => {
                self.form.sign_typed_data_v4_result = signature;
                self.form.set_disabled(Button::SignTypedDataV4Verify, false);
            }
            Err(err) => {
                error!(target: "dapp", %err, "failed to sign typed data");
                self.form.sign_typed_data_v4_result = err.display_text();
            }
        }
    }

    async fn try_sign_typed_data_v4(&self) -> Result<String> {
        let provider = self.provider().ok_or(DappError::NoActiveProvider)?;
        let from = self.first_account()?;
        let data = self.typed_data()?;
        request(provider.as_ref(), EthereumRequest::SignTypedDataV4(from, data)).await
    }

    /// The "Verify" button: recovers the signer of the shown signature.
    ///
    /// Returns whether the signer is the first connected account.
    pub fn verify_typed_data_v4(&mut self) -> bool {
        match self.recover_signer() {
            Ok((from, recovered)) if recovered == from => {
                info!(target: "dapp", %recovered, "successfully verified signer");
                self.form.sign_typed_data_v4_verify_result = recovered.to_string();
                true
            }
            Ok((from, recovered)) => {
                info!(target: "dapp", %recovered, %from, "failed to verify signer");
                false
            }
            Err(err) => {
                error!(target: "dapp", %err, "failed to recover signer");
                self.form.sign_typed_data_v4_verify_result = err.display_text();
                false
            }
        }
    }

    fn recover_signer(&self) -> Result<(Address, Address)> {
        let from = self.first_account()?;
        let data = self.typed_data()?;
        let recovered =
            typed_data::recover_typed_signature(&data, &self.form.sign_typed_data_v4_result)?;
        Ok((from, recovered))
    }

    // --- connectors ---

    /// The WalletConnect / SDK button: connects when disconnected and vice versa.
    pub async fn toggle_connector(&mut self, connector: &dyn Connector) {
        let kind = connector.kind();
        if self.state.is_connector_connected(kind) {
            if let Err(err) = connector.disconnect().await {
                error!(target: "dapp", %kind, %err, "failed to disconnect");
                return;
            }
            let removed = self.remove_provider_detail(kind.provider_name());
            self.state.set_connector_connected(kind, false);
            self.form.set_label(kind.button(), kind.connect_label());
            let was_active = removed.is_some_and(|removed| {
                self.active_provider().is_some_and(|active| active.info.uuid == removed.info.uuid)
            });
            if was_active {
                self.use_window_provider().await;
            }
            return;
        }

        match connector.connect().await {
            Ok(provider) => {
                let info = ProviderInfo::new(Uuid::new_v4().to_string(), kind.provider_name());
                let detail = ProviderDetail::new(info, provider);
                self.handle_new_provider_detail(detail.clone());
                self.state.set_connector_connected(kind, true);
                self.form.set_label(kind.button(), DISCONNECT_LABEL);
                self.set_active_provider(detail).await;
            }
            Err(err) => error!(target: "dapp", %kind, %err, "failed to connect"),
        }
    }
}

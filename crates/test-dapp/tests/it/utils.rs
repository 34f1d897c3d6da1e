use std::sync::Arc;
use test_dapp::{
    Dapp, Eip6963Discovery, LocalProvider, PageConfig, ProviderDetail, ProviderHandle,
    ProviderInfo,
};

pub const CHAIN_ID: u64 = 1337;

/// A local wallet together with the detail it announces.
pub struct Wallet {
    pub provider: Arc<LocalProvider>,
    pub detail: ProviderDetail,
}

impl Wallet {
    pub fn new(uuid: &str, name: &str) -> Self {
        let provider = Arc::new(LocalProvider::random(CHAIN_ID));
        let info = ProviderInfo::new(uuid, name).with_rdns(format!("io.test.{name}"));
        let detail = ProviderDetail::new(info, provider.clone());
        Self { provider, detail }
    }

    pub fn handle(&self) -> ProviderHandle {
        self.provider.clone()
    }

    pub fn uuid(&self) -> &str {
        &self.detail.info.uuid
    }
}

/// A page without an injected provider whose discovery bus holds `wallets`.
pub async fn page_with(wallets: &[&Wallet]) -> (Dapp, Eip6963Discovery) {
    crate::init_tracing();
    let discovery = Eip6963Discovery::new();
    for wallet in wallets {
        discovery.install(wallet.detail.clone());
    }
    let mut dapp = Dapp::new(PageConfig::default(), None);
    dapp.initialize(&discovery).await;
    (dapp, discovery)
}

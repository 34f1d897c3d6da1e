#[macro_use]
extern crate tracing;

use alloy_primitives::hex;
use alloy_signer_local::PrivateKeySigner;
use clap::Parser;
use eyre::Result;
use serde_json::json;
use std::sync::Arc;
use test_dapp::{
    Dapp, Eip6963Discovery, LocalProvider, PageConfig, ProviderDetail, ProviderHandle,
    ProviderInfo,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use uuid::Uuid;

mod args;

use args::Args;

fn main() -> Result<()> {
    subscriber();
    let args = Args::parse();
    run(args)
}

/// Logs to stderr, filtered by `RUST_LOG`.
fn subscriber() {
    let _ = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn run(args: Args) -> Result<()> {
    let Args { url, private_key, chain_id, wallets, merkle_root } = args;

    let signer = private_key.unwrap_or_else(PrivateKeySigner::random);
    let injected = Arc::new(LocalProvider::new(vec![signer], chain_id));

    let discovery = Eip6963Discovery::new();
    discovery.install(ProviderDetail::new(
        ProviderInfo::new(Uuid::new_v4().to_string(), "Injected Wallet")
            .with_rdns("io.test-dapp.injected"),
        injected.clone(),
    ));
    for i in 1..=wallets {
        let info = ProviderInfo::new(Uuid::new_v4().to_string(), format!("Local Wallet {i}"))
            .with_rdns(format!("io.test-dapp.local-{i}"));
        discovery.install(ProviderDetail::new(info, Arc::new(LocalProvider::random(chain_id))));
    }

    let config = PageConfig::from_url(&url);
    debug!(?config, "page config");
    let window_provider: ProviderHandle = injected;
    let mut dapp = Dapp::new(config, Some(window_provider));
    dapp.initialize(&discovery).await;

    dapp.click_onboard().await;
    dapp.process_pending();
    dapp.get_accounts().await;

    dapp.set_merkle_tree(hex::encode_prefixed(merkle_root));
    dapp.sign_typed_data_v4().await;
    let verified = dapp.verify_typed_data_v4();
    dapp.process_pending();

    if let Some(scroll) = dapp.take_scroll_request() {
        info!(element_id = %scroll.element_id, delay = ?scroll.delay, "scroll requested");
    }

    let page = json!({
        "state": dapp.state(),
        "form": dapp.form(),
        "providers": dapp.provider_cards(),
    });
    println!("{}", serde_json::to_string_pretty(&page)?);

    if !verified {
        eyre::bail!(
            "signature could not be verified: {}",
            dapp.form().sign_typed_data_v4_verify_result
        );
    }
    Ok(())
}

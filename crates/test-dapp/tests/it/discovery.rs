use crate::utils::{Wallet, page_with};
use std::sync::Arc;
use test_dapp::{LocalProvider, ProviderDetail, ProviderInfo, Registration};

#[tokio::test(flavor = "multi_thread")]
async fn registers_each_wallet_once() {
    let a = Wallet::new("uuid-a", "Wallet A");
    let b = Wallet::new("uuid-b", "Wallet B");
    let (mut dapp, discovery) = page_with(&[&a, &b]).await;

    assert_eq!(dapp.registry().len(), 2);
    assert_eq!(dapp.provider_cards().len(), 2);
    assert_eq!(dapp.provider_cards()[1].button_label, "Use Wallet B");
    assert!(dapp.form().eip6963_section_visible);
    assert!(!dapp.form().eip6963_warning_visible);

    // the first announced wallet becomes active
    assert_eq!(dapp.active_provider().unwrap().info.uuid, a.uuid());
    assert_eq!(dapp.form().active_provider.name, "Wallet A");

    // wallets answering a second request are ignored
    discovery.request_providers();
    assert_eq!(dapp.process_pending(), 2);
    assert_eq!(dapp.registry().len(), 2);
    assert_eq!(dapp.provider_cards().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn late_wallets_are_picked_up() {
    let a = Wallet::new("uuid-a", "Wallet A");
    let (mut dapp, discovery) = page_with(&[&a]).await;
    assert_eq!(dapp.registry().len(), 1);

    let late = Wallet::new("uuid-late", "Late Wallet");
    discovery.install(late.detail.clone());
    assert_eq!(dapp.process_pending(), 1);
    assert_eq!(dapp.registry().len(), 2);
    assert!(dapp.registry().get("uuid-late").is_some());

    // registering a wallet does not switch to it
    assert_eq!(dapp.active_provider().unwrap().info.uuid, a.uuid());
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_uuid_keeps_first_detail() {
    let a = Wallet::new("uuid-a", "Wallet A");
    let (mut dapp, _discovery) = page_with(&[&a]).await;

    let impostor = ProviderDetail::new(
        ProviderInfo::new("uuid-a", "Impostor"),
        Arc::new(LocalProvider::random(1)),
    );
    assert_eq!(
        dapp.handle_announcement(impostor),
        Some(Registration::Duplicate { metadata_mismatch: true })
    );
    assert_eq!(
        dapp.handle_announcement(a.detail.clone()),
        Some(Registration::Duplicate { metadata_mismatch: false })
    );
    assert_eq!(dapp.registry().len(), 1);
    assert_eq!(dapp.registry().first().unwrap().info.name, "Wallet A");
}

#[tokio::test(flavor = "multi_thread")]
async fn ignores_announcement_without_uuid() {
    let (mut dapp, _discovery) = page_with(&[]).await;
    assert!(dapp.form().eip6963_warning_visible);

    let nameless = ProviderDetail::new(
        ProviderInfo::new("", "No Uuid"),
        Arc::new(LocalProvider::random(1)),
    );
    assert_eq!(dapp.handle_announcement(nameless), None);
    assert!(dapp.registry().is_empty());
    assert!(dapp.form().eip6963_warning_visible);
    assert!(!dapp.form().eip6963_section_visible);
}

#[tokio::test(flavor = "multi_thread")]
async fn removes_provider_by_name() {
    let a = Wallet::new("uuid-a", "Wallet A");
    let b = Wallet::new("uuid-b", "Wallet B");
    let (mut dapp, _discovery) = page_with(&[&a, &b]).await;

    assert!(dapp.remove_provider_detail("Wallet B").is_some());
    assert!(dapp.remove_provider_detail("Wallet B").is_none());
    assert_eq!(dapp.registry().len(), 1);
    assert_eq!(dapp.provider_cards().len(), 1);
    assert_eq!(dapp.provider_cards()[0].uuid, "uuid-a");
}

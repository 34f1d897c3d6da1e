use crate::utils::Wallet;
use test_dapp::{
    Dapp, PageConfig, WINDOW_PROVIDER_NAME,
    connectors::{Connector, ConnectorKind, DISCONNECT_LABEL, StaticConnector},
    provider::EventKind,
};

#[tokio::test(flavor = "multi_thread")]
async fn toggles_wallet_connect_session() {
    let window = Wallet::new("uuid-window", "Window");
    let remote = Wallet::new("uuid-remote", "Remote");
    let connector = StaticConnector::new(ConnectorKind::WalletConnect, remote.handle());
    let button = ConnectorKind::WalletConnect.button();

    let mut dapp = Dapp::new(PageConfig::default(), Some(window.handle()));
    dapp.use_window_provider().await;
    assert_eq!(dapp.form().button(button).label, "Wallet Connect");

    dapp.toggle_connector(&connector).await;
    assert!(connector.is_connected());
    assert!(dapp.state().wallet_connect_connected);
    assert_eq!(dapp.form().button(button).label, DISCONNECT_LABEL);
    assert_eq!(dapp.registry().len(), 1);
    let active = dapp.active_provider().unwrap();
    assert_eq!(active.info.name, "wallet-connect");
    assert!(!active.info.uuid.is_empty());
    assert_eq!(remote.provider.listener_count(EventKind::AccountsChanged), 1);
    assert_eq!(window.provider.listener_count(EventKind::AccountsChanged), 0);

    dapp.toggle_connector(&connector).await;
    assert!(!connector.is_connected());
    assert!(!dapp.state().wallet_connect_connected);
    assert_eq!(dapp.form().button(button).label, "Wallet Connect");
    assert!(dapp.registry().is_empty());
    assert_eq!(dapp.form().active_provider.name, WINDOW_PROVIDER_NAME);
    assert!(dapp.is_installed());
    assert_eq!(remote.provider.listener_count(EventKind::AccountsChanged), 0);
    assert_eq!(window.provider.listener_count(EventKind::AccountsChanged), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn disconnecting_inactive_session_keeps_provider() {
    let window = Wallet::new("uuid-window", "Window");
    let remote = Wallet::new("uuid-remote", "Remote");
    let connector = StaticConnector::new(ConnectorKind::Sdk, remote.handle());

    let mut dapp = Dapp::new(PageConfig::default(), Some(window.handle()));
    dapp.toggle_connector(&connector).await;
    assert!(dapp.state().sdk_connected);
    assert_eq!(dapp.active_provider().unwrap().info.name, "sdk-connect");

    let other = Wallet::new("uuid-other", "Other");
    dapp.set_active_provider(other.detail.clone()).await;

    dapp.toggle_connector(&connector).await;
    assert!(!dapp.state().sdk_connected);
    assert_eq!(dapp.active_provider().unwrap().info.uuid, "uuid-other");
    assert_eq!(dapp.form().button(ConnectorKind::Sdk.button()).label, "SDK Connect");
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_connect_changes_nothing() {
    let remote = Wallet::new("uuid-remote", "Remote");
    let connector = StaticConnector::new(ConnectorKind::WalletConnect, remote.handle());
    // a session opened elsewhere
    connector.connect().await.unwrap();

    let mut dapp = Dapp::new(PageConfig::default(), None);
    dapp.use_window_provider().await;
    dapp.toggle_connector(&connector).await;

    assert!(!dapp.state().wallet_connect_connected);
    assert!(dapp.registry().is_empty());
    assert!(!dapp.is_installed());
    assert_eq!(dapp.form().button(ConnectorKind::WalletConnect.button()).label, "Wallet Connect");
}

use crate::utils::{Wallet, page_with};
use test_dapp::{
    Dapp, PageConfig,
    form::{
        Button, ONBOARD_CONNECT, ONBOARD_CONNECTED, ONBOARD_IN_PROGRESS, ONBOARD_INSTALL,
        OnboardAction,
    },
};

#[tokio::test(flavor = "multi_thread")]
async fn onboarding_without_wallet() {
    let mut dapp = Dapp::new(PageConfig::default(), None);
    dapp.use_window_provider().await;

    let form = dapp.form();
    assert_eq!(form.onboard_action, OnboardAction::Install);
    assert_eq!(form.button(Button::Connect).label, ONBOARD_INSTALL);
    assert!(form.is_enabled(Button::Connect));
    assert!(!form.is_enabled(Button::SignTypedDataV4));
    assert!(!form.is_enabled(Button::SignTypedDataV4Verify));

    dapp.click_onboard().await;
    assert!(dapp.form().onboarding_in_progress());
    assert!(!dapp.form().is_enabled(Button::Connect));

    // still nothing to talk to
    dapp.use_window_provider().await;
    assert_eq!(dapp.form().button(Button::Connect).label, ONBOARD_IN_PROGRESS);

    let wallet = Wallet::new("uuid-a", "Wallet A");
    dapp.set_active_provider(wallet.detail.clone()).await;
    assert_eq!(dapp.form().onboard_action, OnboardAction::RequestAccounts);
    assert_eq!(dapp.form().button(Button::Connect).label, ONBOARD_CONNECT);
    assert!(dapp.form().is_enabled(Button::Connect));
}

#[tokio::test(flavor = "multi_thread")]
async fn connect_and_revoke() {
    let a = Wallet::new("uuid-a", "Wallet A");
    let (mut dapp, _discovery) = page_with(&[&a]).await;
    assert_eq!(dapp.form().onboard_action, OnboardAction::RequestAccounts);

    dapp.click_onboard().await;
    let form = dapp.form();
    assert_eq!(form.button(Button::Connect).label, ONBOARD_CONNECTED);
    assert!(!form.is_enabled(Button::Connect));
    assert!(form.is_enabled(Button::SignTypedDataV4));
    // nothing signed yet
    assert!(!form.is_enabled(Button::SignTypedDataV4Verify));

    dapp.get_accounts().await;
    let account = a.provider.addresses()[0];
    assert_eq!(dapp.form().get_accounts_result, account.to_string());
    assert_eq!(dapp.state().accounts_text(), account.to_string());

    a.provider.revoke_accounts();
    assert_eq!(dapp.process_pending(), 2);
    let form = dapp.form();
    assert!(!dapp.is_connected());
    assert!(!form.is_enabled(Button::SignTypedDataV4));
    assert!(form.get_accounts_result.is_empty());
    assert_eq!(form.onboard_action, OnboardAction::RequestAccounts);
    assert_eq!(form.button(Button::Connect).label, ONBOARD_CONNECT);
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_connect_keeps_page_disconnected() {
    let a = Wallet::new("uuid-a", "Wallet A");
    let (mut dapp, _discovery) = page_with(&[&a]).await;

    a.provider.set_reject_prompts(true);
    dapp.click_onboard().await;
    assert!(!dapp.is_connected());
    assert!(!a.provider.is_authorized());
    assert_eq!(dapp.form().onboard_action, OnboardAction::RequestAccounts);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_accounts_without_provider() {
    let mut dapp = Dapp::new(PageConfig::default(), None);
    dapp.get_accounts().await;
    assert_eq!(dapp.form().get_accounts_result, "Error: no provider is active");
}

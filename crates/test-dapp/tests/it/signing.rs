use crate::utils::{Wallet, page_with};
use test_dapp::form::Button;

const ROOT: &str = "0xabababababababababababababababababababababababababababababababab";

#[tokio::test(flavor = "multi_thread")]
async fn sign_and_verify_merkle_root() {
    let a = Wallet::new("uuid-a", "Wallet A");
    let (mut dapp, _discovery) = page_with(&[&a]).await;
    dapp.click_onboard().await;
    dapp.set_merkle_tree(ROOT);

    dapp.sign_typed_data_v4().await;
    let signature = dapp.form().sign_typed_data_v4_result.clone();
    assert!(signature.starts_with("0x"), "{signature}");
    assert_eq!(signature.len(), 2 + 65 * 2);
    assert!(dapp.form().is_enabled(Button::SignTypedDataV4Verify));

    assert!(dapp.verify_typed_data_v4());
    assert_eq!(
        dapp.form().sign_typed_data_v4_verify_result,
        a.provider.addresses()[0].to_string()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_merkle_root() {
    let a = Wallet::new("uuid-a", "Wallet A");
    let (mut dapp, _discovery) = page_with(&[&a]).await;
    dapp.click_onboard().await;
    dapp.set_merkle_tree("not a root");

    dapp.sign_typed_data_v4().await;
    assert_eq!(
        dapp.form().sign_typed_data_v4_result,
        "Error: invalid merkle root `not a root`: expected 32 bytes of hex"
    );
    assert!(!dapp.form().is_enabled(Button::SignTypedDataV4Verify));
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_signature_is_rendered() {
    let a = Wallet::new("uuid-a", "Wallet A");
    let (mut dapp, _discovery) = page_with(&[&a]).await;
    dapp.click_onboard().await;
    dapp.set_merkle_tree(ROOT);

    a.provider.set_reject_prompts(true);
    dapp.sign_typed_data_v4().await;
    assert_eq!(dapp.form().sign_typed_data_v4_result, "Error: User rejected the request.");
    assert!(!dapp.form().is_enabled(Button::SignTypedDataV4Verify));
}

#[tokio::test(flavor = "multi_thread")]
async fn signing_requires_an_account() {
    let a = Wallet::new("uuid-a", "Wallet A");
    let (mut dapp, _discovery) = page_with(&[&a]).await;
    dapp.set_merkle_tree(ROOT);

    dapp.sign_typed_data_v4().await;
    assert_eq!(dapp.form().sign_typed_data_v4_result, "Error: no account is connected");
}

#[tokio::test(flavor = "multi_thread")]
async fn signature_from_other_account_does_not_verify() {
    let a = Wallet::new("uuid-a", "Wallet A");
    let b = Wallet::new("uuid-b", "Wallet B");
    let (mut dapp, _discovery) = page_with(&[&a, &b]).await;
    dapp.click_onboard().await;
    dapp.set_merkle_tree(ROOT);
    dapp.sign_typed_data_v4().await;

    dapp.use_provider(b.uuid()).await.unwrap();
    dapp.click_onboard().await;
    assert_eq!(dapp.state().accounts, b.provider.addresses());

    assert!(!dapp.verify_typed_data_v4());
    assert!(dapp.form().sign_typed_data_v4_verify_result.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn verify_without_signature() {
    let a = Wallet::new("uuid-a", "Wallet A");
    let (mut dapp, _discovery) = page_with(&[&a]).await;
    dapp.click_onboard().await;
    dapp.set_merkle_tree(ROOT);

    assert!(!dapp.verify_typed_data_v4());
    assert!(dapp.form().sign_typed_data_v4_verify_result.starts_with("Error: "));
}

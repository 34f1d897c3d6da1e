use crate::utils::Wallet;
use std::time::Duration;
use test_dapp::{Dapp, PageConfig, ScrollRequest};
use url::Url;

const DELAY: Duration = Duration::from_millis(10);

fn config(query: &str) -> PageConfig {
    let url = Url::parse(&format!("http://localhost:9011/{query}")).unwrap();
    PageConfig::from_url(&url).with_scroll_delay(DELAY)
}

#[tokio::test(flavor = "multi_thread")]
async fn scrolls_once_with_delay_on_first_activation() {
    let a = Wallet::new("uuid-a", "Wallet A");
    let mut dapp = Dapp::new(config("?scrollTo=signTypedDataV4"), Some(a.handle()));
    // clearing the chain before binding the provider counts as the first chain update
    dapp.use_window_provider().await;

    assert!(dapp.state().scroll_to_handled);
    assert_eq!(
        dapp.take_scroll_request(),
        Some(ScrollRequest { element_id: "signTypedDataV4".to_string(), delay: Some(DELAY) })
    );
    assert_eq!(dapp.take_scroll_request(), None);

    a.provider.switch_chain(5);
    dapp.process_pending();
    assert_eq!(dapp.take_scroll_request(), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn scrolls_without_delay_when_not_installed() {
    let mut dapp = Dapp::new(config("?scrollTo=getAccountsResult"), None);
    dapp.use_window_provider().await;

    assert_eq!(
        dapp.take_scroll_request(),
        Some(ScrollRequest { element_id: "getAccountsResult".to_string(), delay: None })
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_element_is_not_scrolled_to() {
    let a = Wallet::new("uuid-a", "Wallet A");
    let mut dapp = Dapp::new(config("?scrollTo=doesNotExist"), Some(a.handle()));
    dapp.use_window_provider().await;

    assert!(dapp.state().scroll_to_handled);
    assert_eq!(dapp.take_scroll_request(), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn no_scroll_without_query() {
    let a = Wallet::new("uuid-a", "Wallet A");
    let mut dapp = Dapp::new(config(""), Some(a.handle()));
    dapp.use_window_provider().await;

    assert!(!dapp.state().scroll_to_handled);
    assert_eq!(dapp.take_scroll_request(), None);
}

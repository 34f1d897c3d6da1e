use alloy_primitives::{B256, ChainId};
use alloy_signer_local::PrivateKeySigner;
use clap::Parser;
use url::Url;

/// Drive the wallet demo page headlessly against local wallets.
#[derive(Clone, Debug, Parser)]
#[command(name = "test-dapp", version, next_display_order = None)]
pub struct Args {
    /// The page URL. Its query sets `contract`, `decimals` and `scrollTo`.
    #[arg(long, default_value = "http://localhost:9011/")]
    pub url: Url,

    /// Private key of the injected wallet. A random key is used when omitted.
    #[arg(long, env = "TEST_DAPP_PRIVATE_KEY", value_name = "HEX")]
    pub private_key: Option<PrivateKeySigner>,

    /// The chain the wallets start on.
    #[arg(long, default_value_t = 1337, value_name = "CHAIN_ID")]
    pub chain_id: ChainId,

    /// Number of EIP-6963 wallets to install next to the injected one.
    #[arg(long, default_value_t = 2, value_name = "NUM")]
    pub wallets: usize,

    /// The merkle root to sign.
    #[arg(
        long,
        default_value = "0x1111111111111111111111111111111111111111111111111111111111111111"
    )]
    pub merkle_root: B256,
}

//! # test-dapp
//!
//! A headless model of a wallet demo page, following:
//! - [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193): Ethereum Provider JavaScript API
//! - [EIP-6963](https://eips.ethereum.org/EIPS/eip-6963): Multi Injected Provider Discovery
//! - [EIP-712](https://eips.ethereum.org/EIPS/eip-712): Typed structured data hashing and signing
//!
//! ## Architecture
//!
//! 1. Wallets announce themselves on an [`Eip6963Discovery`] bus and land in the
//!    [`ProviderRegistry`], deduplicated by uuid.
//! 2. The [`Dapp`] controller keeps at most one active provider. Switching clears the mirrored
//!    account/chain state, detaches the old listeners and binds `chainChanged`,
//!    `networkChanged` and `accountsChanged` on the new provider.
//! 3. Page actions (connect, `eth_accounts`, typed-data sign and verify) update the
//!    [`FormView`], which a renderer reads.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate tracing;

// used by the binary
use clap as _;
use eyre as _;
use tracing_subscriber as _;

pub mod config;
pub mod connectors;
pub mod discovery;
pub mod error;
pub mod form;
pub mod network;
pub mod provider;
pub mod registry;
pub mod state;
pub mod typed_data;

mod dapp;
pub use dapp::{Dapp, NO_ACCOUNTS_TEXT, ScrollRequest, WINDOW_PROVIDER_NAME};

pub use config::PageConfig;
pub use discovery::Eip6963Discovery;
pub use error::{DappError, ProviderRpcError};
pub use form::FormView;
pub use provider::{Eip1193Provider, LocalProvider, ProviderHandle};
pub use registry::{ProviderDetail, ProviderInfo, ProviderRegistry, Registration};

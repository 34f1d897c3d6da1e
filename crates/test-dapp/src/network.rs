//! Chain id parsing and network naming.

use alloy_chains::Chain;
use serde::Serialize;

/// Chain id that turns on the mainnet warning.
pub const MAINNET_CHAIN_ID: &str = "0x1";

/// Width of the zero-padded hex chain id shown on the page.
const PADDED_CHAIN_ID_DIGITS: usize = 77;

/// Chain information mirrored from the active provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainState {
    /// Chain id as reported by the provider, e.g. `0x1`.
    pub chain_id: String,
    /// Integer chain id, falling back to the network id when the hex id does not parse.
    pub chain_id_int: Option<u64>,
    /// `0x`-prefixed chain id left-padded with zeroes.
    pub chain_id_padded: Option<String>,
    /// Name of the network, if known.
    pub network_name: Option<String>,
    /// Whether the page shows the "you are on mainnet" warning.
    pub mainnet_warning: bool,
}

impl ChainState {
    /// Derives the chain state from a reported chain id and the last known network id.
    pub fn from_chain_id(chain_id: &str, network_id: &str) -> Self {
        let chain_id_int = parse_hex_chain_id(chain_id).or_else(|| parse_network_id(network_id));
        Self {
            chain_id: chain_id.to_string(),
            chain_id_int,
            chain_id_padded: chain_id_int.map(pad_chain_id),
            network_name: chain_id_int.and_then(network_name),
            mainnet_warning: chain_id == MAINNET_CHAIN_ID,
        }
    }
}

/// Parses a hex chain id, with or without `0x` prefix.
///
/// Zero is treated as unparsed, so it falls back to the network id like any other bad value.
pub fn parse_hex_chain_id(chain_id: &str) -> Option<u64> {
    let digits = chain_id.trim();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);
    u64::from_str_radix(digits, 16).ok().filter(|id| *id != 0)
}

/// Parses a decimal network id.
pub fn parse_network_id(network_id: &str) -> Option<u64> {
    network_id.trim().parse::<u64>().ok().filter(|id| *id != 0)
}

pub fn pad_chain_id(chain_id: u64) -> String {
    format!("0x{chain_id:0>width$x}", width = PADDED_CHAIN_ID_DIGITS)
}

/// Looks up a human readable name for `chain_id`.
pub fn network_name(chain_id: u64) -> Option<String> {
    Chain::from_id(chain_id).named().map(|named| named.to_string())
}

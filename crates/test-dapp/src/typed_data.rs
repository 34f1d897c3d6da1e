//! The fixed EIP-712 payload the page signs, and signer recovery.

use crate::error::{DappError, Result};
use alloy_dyn_abi::TypedData;
use alloy_primitives::{Address, B256, Signature, hex};
use serde_json::json;

/// EIP-712 domain name.
pub const DOMAIN_NAME: &str = "Sphinx";
/// EIP-712 domain version.
pub const DOMAIN_VERSION: &str = "1.0.0";
/// Primary type of the signed payload.
pub const PRIMARY_TYPE: &str = "MerkleRoot";

/// Parses the merkle-tree input field.
pub fn parse_merkle_root(input: &str) -> Result<B256> {
    input.trim().parse::<B256>().map_err(|_| DappError::InvalidMerkleRoot(input.to_string()))
}

/// Builds the `MerkleRoot { bytes32 root }` payload under the `Sphinx` domain.
pub fn merkle_root_typed_data(root: B256) -> Result<TypedData> {
    let data = json!({
        "domain": {
            "name": DOMAIN_NAME,
            "version": DOMAIN_VERSION,
        },
        "message": {
            "root": root,
        },
        "primaryType": PRIMARY_TYPE,
        "types": {
            "EIP712Domain": [
                { "name": "name", "type": "string" },
                { "name": "version", "type": "string" },
            ],
            "MerkleRoot": [{ "name": "root", "type": "bytes32" }],
        },
    });
    Ok(serde_json::from_value(data)?)
}

/// Recovers the address that produced `signature` over `data`.
///
/// `signature` is the `0x`-hex 65-byte string returned by `eth_signTypedData_v4`.
pub fn recover_typed_signature(data: &TypedData, signature: &str) -> Result<Address> {
    let bytes = hex::decode(signature.trim())?;
    let signature = Signature::try_from(bytes.as_slice())?;
    let digest = data.eip712_signing_hash()?;
    Ok(signature.recover_address_from_prehash(&digest)?)
}

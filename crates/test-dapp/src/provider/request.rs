use crate::error::ProviderRpcError;
use alloy_dyn_abi::TypedData;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// The untyped `{ method, params }` object passed to an EIP-1193 `request`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestArguments {
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl RequestArguments {
    pub fn new(method: impl Into<String>) -> Self {
        Self { method: method.into(), params: None }
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    fn params_array(&self) -> &[Value] {
        match &self.params {
            Some(Value::Array(params)) => params,
            _ => &[],
        }
    }
}

/// The provider methods the page uses.
///
/// Reference: <https://eips.ethereum.org/EIPS/eip-1193>
#[derive(Clone, Debug)]
pub enum EthereumRequest {
    /// `eth_accounts`
    Accounts,
    /// `eth_requestAccounts`
    RequestAccounts,
    /// `eth_chainId`
    ChainId,
    /// `net_version`
    NetVersion,
    /// `eth_signTypedData_v4`
    SignTypedDataV4(Address, TypedData),
}

impl EthereumRequest {
    pub const fn method(&self) -> &'static str {
        match self {
            Self::Accounts => "eth_accounts",
            Self::RequestAccounts => "eth_requestAccounts",
            Self::ChainId => "eth_chainId",
            Self::NetVersion => "net_version",
            Self::SignTypedDataV4(..) => "eth_signTypedData_v4",
        }
    }

    /// Encodes the request the way wallets expect it.
    ///
    /// Typed data goes over the wire as a JSON string, like `JSON.stringify` in a dapp.
    pub fn into_arguments(self) -> Result<RequestArguments, serde_json::Error> {
        let args = RequestArguments::new(self.method());
        Ok(match self {
            Self::Accounts | Self::RequestAccounts | Self::ChainId | Self::NetVersion => args,
            Self::SignTypedDataV4(from, data) => {
                args.with_params(json!([from, serde_json::to_string(&data)?]))
            }
        })
    }
}

impl TryFrom<&RequestArguments> for EthereumRequest {
    type Error = ProviderRpcError;

    fn try_from(args: &RequestArguments) -> Result<Self, Self::Error> {
        Ok(match args.method.as_str() {
            "eth_accounts" => Self::Accounts,
            "eth_requestAccounts" => Self::RequestAccounts,
            "eth_chainId" => Self::ChainId,
            "net_version" => Self::NetVersion,
            "eth_signTypedData_v4" => {
                let [from, data] = args.params_array() else {
                    return Err(ProviderRpcError::invalid_params(
                        "expected [address, typedData] params",
                    ));
                };
                let from: Address = serde_json::from_value(from.clone())
                    .map_err(|e| {
                        ProviderRpcError::invalid_params(format!("invalid address: {e}"))
                    })?;
                let data = match data {
                    Value::String(s) => serde_json::from_str::<TypedData>(s),
                    other => serde_json::from_value::<TypedData>(other.clone()),
                }
                .map_err(|e| ProviderRpcError::invalid_params(format!("invalid typed data: {e}")))?;
                Self::SignTypedDataV4(from, data)
            }
            other => return Err(ProviderRpcError::unsupported_method(other)),
        })
    }
}

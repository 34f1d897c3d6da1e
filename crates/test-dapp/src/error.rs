//! Provider and page errors.

use alloy_primitives::{SignatureError, hex::FromHexError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;

/// Result alias used throughout the page model.
pub type Result<T, E = DappError> = std::result::Result<T, E>;

/// An error returned by an EIP-1193 provider `request`.
///
/// The `Display` impl is the bare message, which is what the page renders after `Error: `.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ProviderRpcError {
    pub code: ErrorCode,
    /// error message
    pub message: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ProviderRpcError {
    /// New [`ProviderRpcError`] with the given [`ErrorCode`].
    pub const fn new(code: ErrorCode) -> Self {
        Self { message: Cow::Borrowed(code.message()), code, data: None }
    }

    /// Creates a new error with the given code and a custom message.
    pub fn with_message<M>(code: ErrorCode, message: M) -> Self
    where
        M: Into<String>,
    {
        Self { code, message: message.into().into(), data: None }
    }

    /// The user rejected the request.
    pub const fn user_rejected() -> Self {
        Self::new(ErrorCode::UserRejectedRequest)
    }

    /// The requested method and/or account has not been authorized by the user.
    pub const fn unauthorized() -> Self {
        Self::new(ErrorCode::Unauthorized)
    }

    /// The provider does not support the requested method.
    pub fn unsupported_method(method: &str) -> Self {
        Self::with_message(
            ErrorCode::UnsupportedMethod,
            format!("The provider does not support the requested method: {method}"),
        )
    }

    /// Creates a new `InvalidParams` error.
    pub fn invalid_params<M>(message: M) -> Self
    where
        M: Into<String>,
    {
        Self::with_message(ErrorCode::InvalidParams, message)
    }

    /// Creates a new `InternalError` error with a message.
    pub fn internal_error_with<M>(message: M) -> Self
    where
        M: Into<String>,
    {
        Self::with_message(ErrorCode::InternalError, message)
    }
}

/// JSON-RPC and EIP-1193 provider error codes.
///
/// See <https://eips.ethereum.org/EIPS/eip-1193#provider-errors>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    /// The user rejected the request.
    UserRejectedRequest,
    /// The requested method and/or account has not been authorized by the user.
    Unauthorized,
    /// The provider does not support the requested method.
    UnsupportedMethod,
    /// The provider is disconnected from all chains.
    Disconnected,
    /// The provider is not connected to the requested chain.
    ChainDisconnected,
    /// invalid method parameter.
    InvalidParams,
    /// internal call error
    InternalError,
    /// Anything else a wallet might answer with.
    Other(i64),
}

impl ErrorCode {
    /// Returns the error code as `i64`
    pub const fn code(&self) -> i64 {
        match *self {
            Self::UserRejectedRequest => 4001,
            Self::Unauthorized => 4100,
            Self::UnsupportedMethod => 4200,
            Self::Disconnected => 4900,
            Self::ChainDisconnected => 4901,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
            Self::Other(c) => c,
        }
    }

    /// Returns the message associated with the error
    pub const fn message(&self) -> &'static str {
        match *self {
            Self::UserRejectedRequest => "User rejected the request.",
            Self::Unauthorized => {
                "The requested account and/or method has not been authorized by the user."
            }
            Self::UnsupportedMethod => "The requested method is not supported by this provider.",
            Self::Disconnected => "The provider is disconnected from all chains.",
            Self::ChainDisconnected => "The provider is disconnected from the specified chain.",
            Self::InvalidParams => "Invalid params",
            Self::InternalError => "Internal error",
            Self::Other(_) => "Provider error",
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.code())
    }
}

impl<'a> Deserialize<'a> for ErrorCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'a>,
    {
        i64::deserialize(deserializer).map(Into::into)
    }
}

impl From<i64> for ErrorCode {
    fn from(code: i64) -> Self {
        match code {
            4001 => Self::UserRejectedRequest,
            4100 => Self::Unauthorized,
            4200 => Self::UnsupportedMethod,
            4900 => Self::Disconnected,
            4901 => Self::ChainDisconnected,
            -32602 => Self::InvalidParams,
            -32603 => Self::InternalError,
            _ => Self::Other(code),
        }
    }
}

/// Errors surfaced by page actions.
#[derive(Debug, thiserror::Error)]
pub enum DappError {
    #[error(transparent)]
    Rpc(#[from] ProviderRpcError),
    #[error("no provider is active")]
    NoActiveProvider,
    #[error("no provider with uuid `{0}` was announced")]
    UnknownProvider(String),
    #[error("no account is connected")]
    NotConnected,
    #[error("unexpected response to `{method}`: {source}")]
    InvalidResponse {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid merkle root `{0}`: expected 32 bytes of hex")]
    InvalidMerkleRoot(String),
    #[error(transparent)]
    TypedData(#[from] alloy_dyn_abi::Error),
    #[error(transparent)]
    Signature(#[from] SignatureError),
    #[error(transparent)]
    InvalidHex(#[from] FromHexError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("{connector} connector failed: {reason}")]
    Connector { connector: &'static str, reason: String },
}

impl DappError {
    /// The text a result element shows for this error.
    pub fn display_text(&self) -> String {
        format!("Error: {self}")
    }
}

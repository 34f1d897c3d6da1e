//! Registry of wallet providers announced through EIP-6963.

use crate::provider::ProviderHandle;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Wallet metadata from an EIP-6963 announcement.
///
/// Reference: <https://eips.ethereum.org/EIPS/eip-6963#provider-info>
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub uuid: String,
    pub name: String,
    /// Data URI of the wallet icon.
    pub icon: String,
    /// Reverse DNS identifier, e.g. `io.metamask`.
    pub rdns: String,
}

impl ProviderInfo {
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self { uuid: uuid.into(), name: name.into(), ..Default::default() }
    }

    pub fn with_rdns(mut self, rdns: impl Into<String>) -> Self {
        self.rdns = rdns.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    fn same_metadata(&self, other: &Self) -> bool {
        self.name == other.name && self.rdns == other.rdns && self.icon == other.icon
    }
}

/// A provider together with its announced metadata.
#[derive(Clone, Debug)]
pub struct ProviderDetail {
    pub info: ProviderInfo,
    pub provider: ProviderHandle,
}

impl ProviderDetail {
    pub fn new(info: ProviderInfo, provider: ProviderHandle) -> Self {
        Self { info, provider }
    }
}

/// What happened to an announcement handed to [`ProviderRegistry::register`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    Added,
    /// A provider with the same uuid was already registered.
    Duplicate {
        /// The announcement disagreed with the registered name, rdns or icon.
        metadata_mismatch: bool,
    },
}

/// One entry of the rendered provider list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProviderCard {
    pub uuid: String,
    /// Pretty-printed `{ info, provider }` JSON.
    pub content: String,
    pub button_label: String,
}

/// Providers announced to the page, in announcement order, unique by uuid.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    details: Vec<ProviderDetail>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `detail` unless a provider with the same uuid is already registered.
    pub fn register(&mut self, detail: ProviderDetail) -> Registration {
        let new = &detail.info;
        if let Some(existing) = self.details.iter().find(|d| d.info.uuid == new.uuid) {
            let existing = &existing.info;
            let metadata_mismatch = !existing.same_metadata(new);
            if metadata_mismatch {
                error!(
                    target: "registry",
                    uuid = %existing.uuid,
                    name = %new.name,
                    rdns = %new.rdns,
                    icon = %new.icon,
                    previous_name = %existing.name,
                    previous_rdns = %existing.rdns,
                    previous_icon = %existing.icon,
                    "received provider detail with metadata that does not match the provider \
                     previously announced under the same uuid"
                );
            }
            debug!(
                target: "registry",
                uuid = %existing.uuid,
                name = %new.name,
                rdns = %new.rdns,
                "ignoring provider detail that was already received"
            );
            return Registration::Duplicate { metadata_mismatch };
        }

        debug!(target: "registry", uuid = %new.uuid, name = %new.name, "registered provider");
        self.details.push(detail);
        Registration::Added
    }

    /// Removes the first provider named `name`.
    pub fn remove(&mut self, name: &str) -> Option<ProviderDetail> {
        let Some(index) = self.details.iter().position(|d| d.info.name == name) else {
            debug!(target: "registry", name, "provider detail not found");
            return None;
        };
        let removed = self.details.remove(index);
        debug!(target: "registry", name, "provider detail removed");
        Some(removed)
    }

    pub fn get(&self, uuid: &str) -> Option<&ProviderDetail> {
        self.details.iter().find(|d| d.info.uuid == uuid)
    }

    pub fn first(&self) -> Option<&ProviderDetail> {
        self.details.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProviderDetail> {
        self.details.iter()
    }

    pub fn len(&self) -> usize {
        self.details.len()
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    /// Renders one card per registered provider.
    pub fn render(&self) -> Vec<ProviderCard> {
        self.details
            .iter()
            .map(|detail| {
                let content = json!({ "info": detail.info, "provider": "..." });
                ProviderCard {
                    uuid: detail.info.uuid.clone(),
                    content: serde_json::to_string_pretty(&content).unwrap_or_default(),
                    button_label: format!("Use {}", detail.info.name),
                }
            })
            .collect()
    }
}

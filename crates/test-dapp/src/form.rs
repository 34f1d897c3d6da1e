//! View model of the page's buttons and result fields.

use alloy_primitives::map::HashMap;
use serde::Serialize;
use std::fmt;

/// The buttons on the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Button {
    /// The onboard / connect button.
    Connect,
    GetAccounts,
    WalletConnect,
    SdkConnect,
    UseWindowProvider,
    SignTypedDataV4,
    SignTypedDataV4Verify,
}

impl Button {
    pub const ALL: [Self; 7] = [
        Self::Connect,
        Self::GetAccounts,
        Self::WalletConnect,
        Self::SdkConnect,
        Self::UseWindowProvider,
        Self::SignTypedDataV4,
        Self::SignTypedDataV4Verify,
    ];

    /// Element id on the page.
    pub const fn element_id(&self) -> &'static str {
        match self {
            Self::Connect => "connectButton",
            Self::GetAccounts => "getAccounts",
            Self::WalletConnect => "walletConnect",
            Self::SdkConnect => "sdkConnect",
            Self::UseWindowProvider => "useWindowProviderButton",
            Self::SignTypedDataV4 => "signTypedDataV4",
            Self::SignTypedDataV4Verify => "signTypedDataV4Verify",
        }
    }

    const fn default_label(&self) -> &'static str {
        match self {
            Self::Connect => ONBOARD_CONNECT,
            Self::GetAccounts => "eth_accounts",
            Self::WalletConnect => "Wallet Connect",
            Self::SdkConnect => "SDK Connect",
            Self::UseWindowProvider => "Use window.ethereum",
            Self::SignTypedDataV4 => "Sign",
            Self::SignTypedDataV4Verify => "Verify",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Buttons that require a connected account.
pub const ALL_CONNECTED_BUTTONS: [Button; 2] =
    [Button::SignTypedDataV4, Button::SignTypedDataV4Verify];

/// Buttons that become available as soon as an account is connected.
pub const INITIAL_CONNECTED_BUTTONS: [Button; 1] = [Button::SignTypedDataV4];

pub const ONBOARD_INSTALL: &str = "Click here to install MetaMask!";
pub const ONBOARD_IN_PROGRESS: &str = "Onboarding in progress";
pub const ONBOARD_CONNECTED: &str = "Connected";
pub const ONBOARD_CONNECT: &str = "Connect";

/// Ids of the other elements that can be scrolled to.
const STATIC_ELEMENT_IDS: &[&str] = &[
    "eip6963",
    "eip6963Warning",
    "activeProviderUUID",
    "activeProviderName",
    "activeProviderIcon",
    "providers",
    "network",
    "chainId",
    "accounts",
    "warning",
    "getAccountsResult",
    "merkleTree",
    "signTypedDataV4Result",
    "signTypedDataV4VerifyResult",
];

/// Whether the page has an element with id `id`.
pub fn has_element(id: &str) -> bool {
    STATIC_ELEMENT_IDS.contains(&id) || Button::ALL.iter().any(|b| b.element_id() == id)
}

/// What the onboard button does when clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OnboardAction {
    /// No provider: start the wallet onboarding flow.
    Install,
    /// Provider present but no account: `eth_requestAccounts`.
    RequestAccounts,
    None,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ButtonState {
    pub label: String,
    pub disabled: bool,
}

/// The active-provider panel.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ActiveProviderView {
    pub uuid: String,
    pub name: String,
    /// `<img>` markup, empty when the provider has no icon.
    pub icon_html: String,
}

/// Buttons and result fields of the page.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    buttons: HashMap<Button, ButtonState>,
    pub onboard_action: OnboardAction,
    pub get_accounts_result: String,
    /// Contents of the merkle-tree input.
    pub merkle_tree: String,
    pub sign_typed_data_v4_result: String,
    pub sign_typed_data_v4_verify_result: String,
    pub active_provider: ActiveProviderView,
    /// The EIP-6963 provider list is shown.
    pub eip6963_section_visible: bool,
    /// The "no EIP-6963 support detected" warning is shown.
    pub eip6963_warning_visible: bool,
}

impl Default for FormView {
    fn default() -> Self {
        let buttons = Button::ALL
            .iter()
            .map(|button| {
                let disabled = ALL_CONNECTED_BUTTONS.contains(button);
                (*button, ButtonState { label: button.default_label().to_string(), disabled })
            })
            .collect();
        Self {
            buttons,
            onboard_action: OnboardAction::None,
            get_accounts_result: String::new(),
            merkle_tree: String::new(),
            sign_typed_data_v4_result: String::new(),
            sign_typed_data_v4_verify_result: String::new(),
            active_provider: ActiveProviderView::default(),
            eip6963_section_visible: false,
            eip6963_warning_visible: true,
        }
    }
}

impl FormView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn button(&self, button: Button) -> &ButtonState {
        &self.buttons[&button]
    }

    pub fn is_enabled(&self, button: Button) -> bool {
        !self.button(button).disabled
    }

    pub fn set_disabled(&mut self, button: Button, disabled: bool) {
        self.button_mut(button).disabled = disabled;
    }

    pub fn set_label(&mut self, button: Button, label: impl Into<String>) {
        self.button_mut(button).label = label.into();
    }

    fn button_mut(&mut self, button: Button) -> &mut ButtonState {
        self.buttons.entry(button).or_insert_with(|| ButtonState {
            label: button.default_label().to_string(),
            disabled: false,
        })
    }

    /// Applies the enablement policy. Must run whenever the provider or accounts change.
    pub fn update(&mut self, installed: bool, connected: bool) {
        if !installed || !connected {
            for button in ALL_CONNECTED_BUTTONS {
                self.set_disabled(button, true);
            }
            self.clear_display_elements();
        }
        if connected {
            for button in INITIAL_CONNECTED_BUTTONS {
                self.set_disabled(button, false);
            }
        }
        self.update_onboard(installed, connected);
    }

    fn update_onboard(&mut self, installed: bool, connected: bool) {
        let (label, disabled, action) = if !installed {
            (ONBOARD_INSTALL, false, OnboardAction::Install)
        } else if connected {
            (ONBOARD_CONNECTED, true, OnboardAction::None)
        } else {
            (ONBOARD_CONNECT, false, OnboardAction::RequestAccounts)
        };
        // an onboarding flow that is already running keeps its label until a provider shows up
        if action == OnboardAction::Install && self.onboarding_in_progress() {
            return;
        }
        self.set_label(Button::Connect, label);
        self.set_disabled(Button::Connect, disabled);
        self.onboard_action = action;
    }

    /// Marks the onboarding flow as started.
    pub fn start_onboarding(&mut self) {
        self.set_label(Button::Connect, ONBOARD_IN_PROGRESS);
        self.set_disabled(Button::Connect, true);
        self.onboard_action = OnboardAction::None;
    }

    pub fn onboarding_in_progress(&self) -> bool {
        self.button(Button::Connect).label == ONBOARD_IN_PROGRESS
    }

    fn clear_display_elements(&mut self) {
        self.get_accounts_result.clear();
    }
}

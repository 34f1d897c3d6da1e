//! Page configuration read from the page URL.

use alloy_primitives::Address;
use std::time::Duration;
use url::Url;

/// Decimals assumed for the sample token when the query does not say.
pub const DEFAULT_TOKEN_DECIMALS: u8 = 18;

/// Origin of the local onboarding forwarder used while developing on `localhost`.
pub const LOCAL_FORWARDER_ORIGIN: &str = "http://localhost:9010";

/// How long a scroll requested after a chain update waits for the warning banner to render.
pub const SCROLL_DELAY: Duration = Duration::from_secs(1);

/// Settings derived from the page URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageConfig {
    /// `?contract=`, kept only when it is a valid address.
    pub contract: Option<Address>,
    /// `?decimals=`
    pub decimals: u8,
    /// `?scrollTo=`, id of the element to bring into view once the page settles.
    pub scroll_to: Option<String>,
    pub forwarder_origin: Option<Url>,
    pub scroll_delay: Duration,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            contract: None,
            decimals: DEFAULT_TOKEN_DECIMALS,
            scroll_to: None,
            forwarder_origin: None,
            scroll_delay: SCROLL_DELAY,
        }
    }
}

impl PageConfig {
    /// Reads the `contract`, `decimals` and `scrollTo` query parameters.
    pub fn from_url(url: &Url) -> Self {
        let mut config = Self::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "contract" => config.contract = parse_address(&value),
                "decimals" if !value.is_empty() => match value.parse() {
                    Ok(decimals) => config.decimals = decimals,
                    Err(err) => warn!(target: "config", %value, %err, "ignoring invalid decimals"),
                },
                "scrollTo" if !value.is_empty() => config.scroll_to = Some(value.into_owned()),
                _ => {}
            }
        }
        if url.host_str() == Some("localhost") {
            config.forwarder_origin = Url::parse(LOCAL_FORWARDER_ORIGIN).ok();
        }
        config
    }

    pub fn with_scroll_delay(mut self, delay: Duration) -> Self {
        self.scroll_delay = delay;
        self
    }
}

/// Accepts all-lowercase or all-uppercase hex addresses, and mixed case only with a valid
/// checksum.
fn parse_address(value: &str) -> Option<Address> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    let mixed_case = digits.chars().any(|c| c.is_ascii_lowercase())
        && digits.chars().any(|c| c.is_ascii_uppercase());
    let parsed = if mixed_case {
        Address::parse_checksummed(value, None).ok()
    } else {
        value.parse().ok()
    };
    if parsed.is_none() {
        debug!(target: "config", value, "ignoring invalid contract address");
    }
    parsed
}

//! Gateway configuration: provider application identity, callback URL, scope, and TTLs.

// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
// self
use crate::_prelude::*;

/// Application identifier registered with the third-party provider.
pub const DEFAULT_APP_ID: &str = "7454";
/// Callback URL the provider redirects back to after user consent.
pub const DEFAULT_CALLBACK_URL: &str =
	"https://app7454.acapp.acwing.com.cn/settings/acwing/acapp/receive_code/";
/// Permission scope requested from the provider.
pub const DEFAULT_SCOPE: &str = "userinfo";
/// Validity window of an issued state token.
pub const DEFAULT_STATE_TTL: Duration = Duration::seconds(7_200);

/// Characters left literal when rendering the callback URL into the redirect payload.
///
/// Matches the conventional loose URL quoting used by the deployed clients: unreserved
/// characters plus `/` pass through, everything else (including `:`) is percent-encoded.
const CALLBACK_QUOTE_SET: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'/').remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Configuration and validation failures raised by the gateway.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ConfigError {
	/// Application identifier was empty or whitespace.
	#[error("Application identifier cannot be empty.")]
	EmptyAppId,
	/// Scope string was empty or contains whitespace.
	#[error("Scope `{scope}` is not a single non-empty scope value.")]
	InvalidScope {
		/// The offending scope string.
		scope: String,
	},
	/// Built-in callback URL literal cannot be parsed.
	#[error("Callback URL is invalid.")]
	InvalidCallback {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// State token lifetime must be positive.
	#[error("State token TTL must be positive, got {seconds} seconds.")]
	NonPositiveTtl {
		/// The rejected lifetime in whole seconds.
		seconds: i64,
	},
}

/// Validated gateway configuration injected into [`LoginFlow`](crate::flows::LoginFlow).
///
/// The historical deployment hardcoded these four values in the handler body; they are
/// hoisted here so alternative providers and test fixtures can substitute their own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginConfig {
	/// Application identifier sent in the authorization request payload.
	pub app_id: String,
	/// Callback URL the provider redirects to; rendered percent-encoded in payloads.
	pub callback_url: Url,
	/// Requested permission scope.
	pub scope: String,
	/// Lifetime of issued state tokens in the shared store.
	pub state_ttl: Duration,
}
impl LoginConfig {
	/// Creates a configuration after validating every field.
	pub fn new(
		app_id: impl Into<String>,
		callback_url: Url,
		scope: impl Into<String>,
		state_ttl: Duration,
	) -> Result<Self, ConfigError> {
		let app_id = app_id.into();
		let scope = scope.into();

		if app_id.trim().is_empty() {
			return Err(ConfigError::EmptyAppId);
		}
		if scope.is_empty() || scope.chars().any(char::is_whitespace) {
			return Err(ConfigError::InvalidScope { scope });
		}
		if !state_ttl.is_positive() {
			return Err(ConfigError::NonPositiveTtl { seconds: state_ttl.whole_seconds() });
		}

		Ok(Self { app_id, callback_url, scope, state_ttl })
	}

	/// Builds the configuration matching the historical deployment constants.
	pub fn defaults() -> Result<Self, ConfigError> {
		let callback_url = Url::parse(DEFAULT_CALLBACK_URL)
			.map_err(|source| ConfigError::InvalidCallback { source })?;

		Self::new(DEFAULT_APP_ID, callback_url, DEFAULT_SCOPE, DEFAULT_STATE_TTL)
	}

	/// Renders the callback URL percent-encoded for the redirect payload.
	pub fn encoded_callback(&self) -> String {
		utf8_percent_encode(self.callback_url.as_str(), CALLBACK_QUOTE_SET).to_string()
	}
}

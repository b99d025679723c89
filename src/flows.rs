//! Login flow facade: authorization request issuance and callback state validation.
//!
//! [`LoginFlow::apply_code`] mirrors the deployed `apply_code/` handler: draw a state
//! token, record it in the shared store for the callback window, and hand the client
//! everything it needs to redirect the user to the provider's authorization page.
//! [`LoginFlow::receive_code`] covers the store-facing half of the callback: the
//! presented token must match an unexpired entry and is consumed on first use.

// self
use crate::{
	_prelude::*,
	config::LoginConfig,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	store::StateStore,
	token::StateToken,
};

/// Marker carried in the `result` field of success payloads.
pub const RESULT_SUCCESS: &str = "success";

/// Parameters a client needs to redirect the user to the provider's authorization page.
///
/// Every field serializes as a string; `result` is always [`RESULT_SUCCESS`] since no
/// failure path is modeled in the payload itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
	/// Outcome marker, always [`RESULT_SUCCESS`].
	pub result: String,
	/// Application identifier registered with the provider.
	pub appid: String,
	/// Percent-encoded callback URL.
	pub redirect_uri: String,
	/// Requested permission scope.
	pub scope: String,
	/// Freshly issued state token; present in the store when the payload is returned.
	pub state: StateToken,
}

/// Query parameters the provider appends when redirecting back to the callback route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackQuery {
	/// Authorization code to be exchanged by the wider application.
	pub code: Option<String>,
	/// State token issued earlier by [`LoginFlow::apply_code`].
	pub state: String,
}

/// Acknowledgment returned once the callback's state token checked out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackAck {
	/// Outcome marker, always [`RESULT_SUCCESS`].
	pub result: String,
	/// Authorization code passed through for the subsequent token exchange.
	pub code: Option<String>,
	/// The validated (and now consumed) state token.
	pub state: StateToken,
}

/// Coordinates the two settings login operations against an injected state store.
#[derive(Clone)]
pub struct LoginFlow {
	/// Shared store holding issued state tokens until they expire or are consumed.
	pub store: Arc<dyn StateStore>,
	/// Validated gateway configuration.
	pub config: LoginConfig,
}
impl LoginFlow {
	/// Creates a flow over the provided store and configuration.
	pub fn new(store: Arc<dyn StateStore>, config: LoginConfig) -> Self {
		Self { store, config }
	}

	/// Issues an authorization request: generates a state token, records it in the store
	/// with the configured time-to-live, and returns the redirect parameters.
	///
	/// The store write completes before the payload is returned; no stronger atomicity is
	/// guaranteed. Store failures propagate as [`Error::Storage`].
	pub async fn apply_code(&self) -> Result<AuthorizationRequest> {
		const KIND: FlowKind = FlowKind::ApplyCode;

		let span = FlowSpan::new(KIND, "apply_code");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let state = StateToken::generate();

				self.store.put(&state, self.config.state_ttl).await?;

				Ok(AuthorizationRequest {
					result: RESULT_SUCCESS.into(),
					appid: self.config.app_id.clone(),
					redirect_uri: self.config.encoded_callback(),
					scope: self.config.scope.clone(),
					state,
				})
			})
			.await;

		obs::record_flow_outcome(
			KIND,
			if result.is_ok() { FlowOutcome::Success } else { FlowOutcome::Failure },
		);

		result
	}

	/// Validates and consumes the state token presented by the provider callback.
	///
	/// Tokens are single-use: a replayed, expired, or never-issued token yields
	/// [`Error::UnknownState`]; a malformed one yields [`Error::State`] before the store
	/// is consulted. The authorization code itself is passed through untouched.
	pub async fn receive_code(&self, query: CallbackQuery) -> Result<CallbackAck> {
		const KIND: FlowKind = FlowKind::ReceiveCode;

		let span = FlowSpan::new(KIND, "receive_code");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let CallbackQuery { code, state } = query;
				let state = StateToken::new(&state)?;

				if !self.store.consume(&state).await? {
					return Err(Error::UnknownState { state: state.into() });
				}

				Ok(CallbackAck { result: RESULT_SUCCESS.into(), code, state })
			})
			.await;

		obs::record_flow_outcome(
			KIND,
			if result.is_ok() { FlowOutcome::Success } else { FlowOutcome::Failure },
		);

		result
	}
}
impl Debug for LoginFlow {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginFlow").field("config", &self.config).finish()
	}
}

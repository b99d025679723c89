//! Gateway-level error types shared across flows, routes, and stores.

// self
use crate::_prelude::*;

/// Gateway-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical gateway error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] crate::config::ConfigError),
	/// State token failed shape validation.
	#[error(transparent)]
	State(#[from] crate::token::StateTokenError),

	/// Callback presented a state token the store does not recognize.
	///
	/// Covers tokens that were never issued, already consumed, or expired past
	/// their time-to-live window; the store cannot distinguish the three.
	#[error("State token `{state}` is unknown or has expired.")]
	UnknownState {
		/// The rejected state value as received from the callback.
		state: String,
	},
}

//! Storage contract and built-in store implementation for issued state tokens.

pub mod memory;

pub use memory::MemoryStateStore;

// self
use crate::{_prelude::*, token::StateToken};

/// Boxed future returned by [`StateStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Capability contract for the shared time-limited state token store.
///
/// The gateway only ever writes one entry per `apply_code` invocation and consumes one
/// entry per callback; backends are free to share the keyspace with other processes as
/// long as keys expire after their time-to-live.
pub trait StateStore
where
	Self: Send + Sync,
{
	/// Records a freshly issued token with the provided time-to-live.
	fn put<'a>(&'a self, state: &'a StateToken, ttl: Duration) -> StoreFuture<'a, ()>;

	/// Returns whether an unexpired entry exists for the token.
	fn exists<'a>(&'a self, state: &'a str) -> StoreFuture<'a, bool>;

	/// Removes the entry for the token, returning whether an unexpired entry was present.
	fn consume<'a>(&'a self, state: &'a str) -> StoreFuture<'a, bool>;

	/// Returns the remaining time-to-live of an unexpired entry, if any.
	fn remaining<'a>(&'a self, state: &'a str) -> StoreFuture<'a, Option<Duration>>;
}

/// Error type produced by [`StateStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
	/// Entries must carry a positive time-to-live.
	#[error("Entry TTL must be positive, got {seconds} seconds.")]
	InvalidTtl {
		/// The rejected lifetime in whole seconds.
		seconds: i64,
	},
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;
	use crate::error::Error;

	#[test]
	fn store_error_converts_into_gateway_error_with_source() {
		let store_error = StoreError::Backend { message: "cache unreachable".into() };
		let gateway_error: Error = store_error.clone().into();

		assert!(matches!(gateway_error, Error::Storage(_)));
		assert!(gateway_error.to_string().contains("cache unreachable"));

		let source = StdError::source(&gateway_error)
			.expect("Gateway error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}
}

//! Thread-safe in-memory [`StateStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	store::{StateStore, StoreError, StoreFuture},
	token::StateToken,
};

type EntryMap = Arc<RwLock<HashMap<String, OffsetDateTime>>>;

/// Thread-safe store that keeps token expiries in-process for tests and demos.
///
/// Expired entries are dropped lazily: reads treat them as absent and write paths purge
/// them opportunistically.
#[derive(Clone, Debug, Default)]
pub struct MemoryStateStore(EntryMap);
impl MemoryStateStore {
	/// Number of entries currently held, expired ones included.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns true when no entries are held.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	fn put_now(map: EntryMap, state: String, ttl: Duration) -> Result<(), StoreError> {
		if !ttl.is_positive() {
			return Err(StoreError::InvalidTtl { seconds: ttl.whole_seconds() });
		}

		let now = OffsetDateTime::now_utc();
		let mut guard = map.write();

		guard.retain(|_, expires_at| *expires_at > now);
		guard.insert(state, now + ttl);

		Ok(())
	}

	fn remaining_now(map: EntryMap, state: &str) -> Option<Duration> {
		let now = OffsetDateTime::now_utc();
		let remaining = *map.read().get(state)? - now;

		remaining.is_positive().then_some(remaining)
	}

	fn consume_now(map: EntryMap, state: &str) -> bool {
		let now = OffsetDateTime::now_utc();

		match map.write().remove(state) {
			Some(expires_at) => expires_at > now,
			None => false,
		}
	}
}
impl StateStore for MemoryStateStore {
	fn put<'a>(&'a self, state: &'a StateToken, ttl: Duration) -> StoreFuture<'a, ()> {
		let map = self.0.clone();
		let state = state.as_str().to_owned();

		Box::pin(async move { Self::put_now(map, state, ttl) })
	}

	fn exists<'a>(&'a self, state: &'a str) -> StoreFuture<'a, bool> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::remaining_now(map, state).is_some()) })
	}

	fn consume<'a>(&'a self, state: &'a str) -> StoreFuture<'a, bool> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::consume_now(map, state)) })
	}

	fn remaining<'a>(&'a self, state: &'a str) -> StoreFuture<'a, Option<Duration>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::remaining_now(map, state)) })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn fixture_token() -> StateToken {
		StateToken::new("13572468").expect("Token fixture should be valid.")
	}

	#[test]
	fn put_rejects_non_positive_ttl() {
		let store = MemoryStateStore::default();
		let map = store.0.clone();
		let err = MemoryStateStore::put_now(map, fixture_token().into(), Duration::ZERO)
			.expect_err("Zero TTL must be rejected.");

		assert_eq!(err, StoreError::InvalidTtl { seconds: 0 });
		assert!(store.is_empty());
	}

	#[test]
	fn expired_entries_read_as_absent() {
		let store = MemoryStateStore::default();
		let token = fixture_token();

		// Backdate the expiry directly; the async surface is exercised by integration tests.
		store.0.write().insert(token.as_str().to_owned(), OffsetDateTime::now_utc());

		assert!(MemoryStateStore::remaining_now(store.0.clone(), &token).is_none());
		assert!(!MemoryStateStore::consume_now(store.0.clone(), &token));
	}

	#[test]
	fn writes_purge_expired_entries() {
		let store = MemoryStateStore::default();

		store.0.write().insert("00000000".into(), OffsetDateTime::now_utc());

		MemoryStateStore::put_now(store.0.clone(), fixture_token().into(), Duration::seconds(60))
			.expect("Putting a fresh entry should succeed.");

		assert_eq!(store.len(), 1);
	}
}

//! Third-party login gateway slice—issue OAuth-style authorization requests backed by
//! cache-stored state tokens, and serve the matching `settings` routes over axum.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod error;
pub mod flows;
pub mod obs;
#[cfg(feature = "axum")]
pub mod routes;
pub mod store;
pub mod token;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and fixtures for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::LoginConfig,
		flows::LoginFlow,
		store::{MemoryStateStore, StateStore},
	};

	/// Builds the default gateway configuration used across tests.
	pub fn test_config() -> LoginConfig {
		LoginConfig::defaults().expect("Built-in gateway configuration should be valid.")
	}

	/// Constructs a [`LoginFlow`] backed by an in-memory state store, returning the store
	/// handle so tests can inspect entries directly.
	pub fn build_memory_flow() -> (LoginFlow, Arc<MemoryStateStore>) {
		build_memory_flow_with(test_config())
	}

	/// Same as [`build_memory_flow`] but with a caller-provided configuration.
	pub fn build_memory_flow_with(config: LoginConfig) -> (LoginFlow, Arc<MemoryStateStore>) {
		let store_backend = Arc::new(MemoryStateStore::default());
		let store: Arc<dyn StateStore> = store_backend.clone();
		let flow = LoginFlow::new(store, config);

		(flow, store_backend)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "axum")] pub use axum;
pub use url;
#[cfg(test)] use {color_eyre as _, http_body_util as _, serde_json as _, tokio as _, tower as _};

//! Boots the login gateway on localhost and serves the two settings routes.
//!
//! Try it with `curl http://127.0.0.1:8000/apply_code/`, then feed the returned `state`
//! back through `http://127.0.0.1:8000/receive_code?code=demo&state=<state>`.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
// self
use oauth2_login_gateway::{
	axum,
	config::LoginConfig,
	flows::LoginFlow,
	routes,
	store::{MemoryStateStore, StateStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let store: Arc<dyn StateStore> = Arc::new(MemoryStateStore::default());
	let flow = Arc::new(LoginFlow::new(store, LoginConfig::defaults()?));
	let app = routes::router(flow);
	let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;

	println!("Serving settings login routes on http://{}.", listener.local_addr()?);

	axum::serve(listener, app).await?;

	Ok(())
}

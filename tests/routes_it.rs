// std
use std::sync::Arc;
// crates.io
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
// self
use oauth2_login_gateway::{
	axum::{
		Router,
		body::Body,
		http::{Request, StatusCode},
	},
	config::LoginConfig,
	flows::LoginFlow,
	routes::{self, APPLY_CODE_PATH, RECEIVE_CODE_PATH},
	store::{MemoryStateStore, StateStore},
};

fn make_router() -> (Router, Arc<MemoryStateStore>) {
	let store_backend = Arc::new(MemoryStateStore::default());
	let store: Arc<dyn StateStore> = store_backend.clone();
	let config = LoginConfig::defaults().expect("Built-in configuration should be valid.");
	let flow = Arc::new(LoginFlow::new(store, config));

	(routes::router(flow), store_backend)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
	let request = Request::builder()
		.uri(uri)
		.body(Body::empty())
		.expect("Request fixture should build successfully.");
	let response = app
		.clone()
		.oneshot(request)
		.await
		.expect("Router should produce a response for every request.");
	let status = response.status();
	let bytes = response
		.into_body()
		.collect()
		.await
		.expect("Response body should be collectable.")
		.to_bytes();
	let json = serde_json::from_slice(&bytes).expect("Response body should be valid JSON.");

	(status, json)
}

#[tokio::test]
async fn apply_code_route_serves_the_payload() {
	let (app, store) = make_router();
	let (status, json) = get_json(&app, APPLY_CODE_PATH).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["result"], "success");
	assert_eq!(json["appid"], "7454");
	assert_eq!(json["scope"], "userinfo");

	let state = json["state"].as_str().expect("`state` field should be a string.");

	assert_eq!(state.len(), 8);
	assert!(state.bytes().all(|b| b.is_ascii_digit()));
	assert!(
		store
			.exists(state)
			.await
			.expect("Existence check against the backing store should succeed.")
	);

	let redirect_uri =
		json["redirect_uri"].as_str().expect("`redirect_uri` field should be a string.");

	assert!(redirect_uri.starts_with("https%3A//"));
}

#[tokio::test]
async fn receive_code_route_consumes_the_issued_state() {
	let (app, _) = make_router();
	let (_, issued) = get_json(&app, APPLY_CODE_PATH).await;
	let state = issued["state"].as_str().expect("`state` field should be a string.").to_owned();
	let uri = format!("{RECEIVE_CODE_PATH}?code=abc&state={state}");
	let (status, json) = get_json(&app, &uri).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json["result"], "success");
	assert_eq!(json["code"], "abc");
	assert_eq!(json["state"], state.as_str());

	// The token is single-use; replaying the same callback must fail.
	let (status, json) = get_json(&app, &uri).await;

	assert_eq!(status, StatusCode::FORBIDDEN);
	assert_eq!(json["error"], "unknown or expired state");
}

#[tokio::test]
async fn receive_code_route_rejects_unknown_and_malformed_states() {
	let (app, _) = make_router();
	let (status, json) = get_json(&app, "/receive_code?state=00000000").await;

	assert_eq!(status, StatusCode::FORBIDDEN);
	assert_eq!(json["error"], "unknown or expired state");

	let (status, json) = get_json(&app, "/receive_code?state=not-a-token").await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(json["error"], "malformed state");
}

#[tokio::test]
async fn receive_code_route_requires_a_state_parameter() {
	let (app, _) = make_router();
	let request = Request::builder()
		.uri(RECEIVE_CODE_PATH)
		.body(Body::empty())
		.expect("Request fixture should build successfully.");
	let response = app
		.oneshot(request)
		.await
		.expect("Router should produce a response for every request.");

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unmatched_paths_fall_through_to_404() {
	let (app, _) = make_router();
	let request = Request::builder()
		.uri("/does_not_exist")
		.body(Body::empty())
		.expect("Request fixture should build successfully.");
	let response = app
		.oneshot(request)
		.await
		.expect("Router should produce a response for every request.");

	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

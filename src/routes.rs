//! Route table wiring the two settings paths to their handlers.
//!
//! axum has no named-route registry, so the symbolic names other parts of the
//! application use for reverse lookup are exported as constants next to the paths.

// crates.io
use axum::{
	Json, Router,
	extract::{Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde_json::json;
// self
use crate::{
	_prelude::*,
	flows::{AuthorizationRequest, CallbackAck, CallbackQuery, LoginFlow},
};

/// Path of the authorization request route.
pub const APPLY_CODE_PATH: &str = "/apply_code/";
/// Symbolic name of the authorization request route.
pub const APPLY_CODE_ROUTE_NAME: &str = "settings_qq_apply_code";
/// Path of the provider callback route.
pub const RECEIVE_CODE_PATH: &str = "/receive_code";
/// Symbolic name of the provider callback route.
pub const RECEIVE_CODE_ROUTE_NAME: &str = "settings_qq_receive_code";

/// Builds the settings login router over a shared [`LoginFlow`].
///
/// Unmatched paths fall through to axum's default 404 handling.
pub fn router(flow: Arc<LoginFlow>) -> Router {
	Router::new()
		.route(APPLY_CODE_PATH, get(apply_code))
		.route(RECEIVE_CODE_PATH, get(receive_code))
		.with_state(flow)
}

async fn apply_code(
	State(flow): State<Arc<LoginFlow>>,
) -> Result<Json<AuthorizationRequest>, Error> {
	Ok(Json(flow.apply_code().await?))
}

async fn receive_code(
	State(flow): State<Arc<LoginFlow>>,
	Query(query): Query<CallbackQuery>,
) -> Result<Json<CallbackAck>, Error> {
	Ok(Json(flow.receive_code(query).await?))
}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let (status, label) = match &self {
			Error::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage error"),
			Error::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "configuration error"),
			Error::State(_) => (StatusCode::BAD_REQUEST, "malformed state"),
			Error::UnknownState { .. } => (StatusCode::FORBIDDEN, "unknown or expired state"),
		};
		let body = Json(json!({
			"error": label,
			"message": self.to_string(),
		}));

		(status, body).into_response()
	}
}

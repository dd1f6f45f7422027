use axum::{
    Extension, Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::action::Action;
use crate::auth::Session;
use crate::dispatch::{Access, dispatch};
use crate::error::{DispatchError, json_error};
use crate::state::AppState;

/// With the session gate switched off there is no caller identity and every
/// action is allowed.
fn access_for(state: &AppState, session: Option<&Session>) -> Access {
    Access {
        read_only: state.config.read_only,
        admin: !state.config.require_session || session.is_some_and(Session::is_admin),
    }
}

/// `POST /api/db`: decode `{action, ...}` and run it.
pub async fn db_action(
    State(state): State<AppState>,
    session: Option<Extension<Session>>,
    body: Bytes,
) -> Response {
    let parsed = serde_json::from_slice::<serde_json::Value>(&body)
        .map_err(|e| DispatchError::InvalidPayload(e.to_string()))
        .and_then(Action::parse);

    let action = match parsed {
        Ok(a) => a,
        Err(e) => {
            tracing::warn!(error = %e, "rejected dispatcher request");
            return e.into_response();
        }
    };

    let access = access_for(&state, session.as_deref());
    match dispatch(&state.db, action, access).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn method_not_allowed() -> Response {
    json_error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn json_error(code: StatusCode, message: impl Into<String>) -> Response {
    (
        code,
        Json(ErrorBody {
            success: None,
            message: message.into(),
            error: None,
        }),
    )
        .into_response()
}

/// Failure inside a store function.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
    #[error("password hashing failed: {0}")]
    Password(String),
}

/// Everything the dispatcher can answer with besides success.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Invalid action")]
    InvalidAction,
    #[error("Invalid request payload: {0}")]
    InvalidPayload(String),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Service is in read-only mode")]
    ReadOnly,
    #[error("Admin role required")]
    AdminRequired,
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl DispatchError {
    pub fn store(context: &'static str, source: impl Into<StoreError>) -> Self {
        Self::Store {
            context,
            source: source.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidAction | Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::ReadOnly | Self::AdminRequired => StatusCode::FORBIDDEN,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            Self::InvalidPayload(reason) => ErrorBody {
                success: None,
                message: "Invalid request payload".to_string(),
                error: Some(reason.clone()),
            },
            Self::InvalidCredentials => ErrorBody {
                success: Some(false),
                message: self.to_string(),
                error: None,
            },
            Self::Store { context, source } => ErrorBody {
                success: None,
                message: context.to_string(),
                error: Some(source.to_string()),
            },
            Self::InvalidAction | Self::NotFound(_) | Self::ReadOnly | Self::AdminRequired => {
                ErrorBody {
                    success: None,
                    message: self.to_string(),
                    error: None,
                }
            }
        }
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

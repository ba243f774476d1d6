//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use foosball_core::{ValidationError, store::IngestError};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  /// The submitted match was rejected; nothing was stored.
  #[error("invalid match: {0}")]
  Validation(#[from] ValidationError),

  /// The request body was not a well-formed match entry.
  #[error("invalid request body: {}", .0.body_text())]
  Body(#[from] JsonRejection),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

impl<E> From<IngestError<E>> for ApiError
where
  E: std::error::Error + Send + Sync + 'static,
{
  fn from(e: IngestError<E>) -> Self {
    match e {
      IngestError::Validation(v) => Self::Validation(v),
      IngestError::Store(s) => Self::store(s),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::Body(rejection) => rejection.status(),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}

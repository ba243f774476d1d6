//! JSON REST API for the foosball match tracker.
//!
//! Exposes an axum [`Router`] backed by any [`foosball_core::store::MatchStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", foosball_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod matches;
pub mod stats;

use std::sync::Arc;

use axum::{Router, routing::get};
use foosball_core::store::MatchStore;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Build the API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: MatchStore + 'static,
{
  Router::new()
    .route("/matches", get(matches::list::<S>).post(matches::create::<S>))
    .route("/matches/{id}", get(matches::get_one::<S>))
    .route("/stats", get(stats::handler::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use foosball_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use super::*;

  async fn make_router() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = router
      .clone()
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
  }

  fn entry(teams: [&str; 2], scores: [i64; 2]) -> Value {
    json!({
      "date": "2024-05-04",
      "teams": teams,
      "scores": scores,
      "comments": ["", ""],
    })
  }

  #[tokio::test]
  async fn empty_store_lists_nothing() {
    let router = make_router().await;
    let (status, body) = send(&router, "GET", "/matches", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(&router, "GET", "/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
  }

  #[tokio::test]
  async fn create_normalizes_and_returns_201() {
    let router = make_router().await;
    let (status, body) = send(
      &router,
      "POST",
      "/matches",
      Some(entry(["Bob Alice", "Dave Carol"], [10, 7])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["sides"][0]["team"], "Alice Bob");
    assert_eq!(body["sides"][1]["team"], "Carol Dave");
    assert_eq!(body["sides"][0]["score"], 10);
    assert_eq!(body["date"], "2024-05-04");

    let id = body["match_id"].as_str().unwrap().to_owned();
    let (status, fetched) = send(&router, "GET", &format!("/matches/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body);
  }

  #[tokio::test]
  async fn invalid_entry_is_422_and_not_stored() {
    let router = make_router().await;
    let (status, body) = send(
      &router,
      "POST",
      "/matches",
      Some(json!({
        "date": "2024-05-04",
        "teams": ["Alice Bob", "Carol Dave"],
        "scores": [10],
        "comments": ["", ""],
      })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("disagree in length"));

    let (_, listed) = send(&router, "GET", "/matches", None).await;
    assert_eq!(listed, json!([]));
  }

  #[tokio::test]
  async fn negative_score_is_422() {
    let router = make_router().await;
    let (status, _) = send(
      &router,
      "POST",
      "/matches",
      Some(entry(["A", "B"], [3, -1])),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  }

  #[tokio::test]
  async fn text_score_is_parsed_like_the_cli() {
    let router = make_router().await;
    let (status, body) = send(
      &router,
      "POST",
      "/matches",
      Some(json!({
        "date": "2024-05-04",
        "teams": ["Alice Bob", "Carol Dave"],
        "scores": [10, "7"],
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["sides"][1]["score"], 7);
    assert_eq!(body["sides"][1]["comment"], "");
  }

  #[tokio::test]
  async fn non_numeric_score_is_a_json_validation_error() {
    let router = make_router().await;
    for scores in [json!([10, "ten"]), json!([1.5, 2])] {
      let (status, body) = send(
        &router,
        "POST",
        "/matches",
        Some(json!({
          "date": "2024-05-04",
          "teams": ["Alice Bob", "Carol Dave"],
          "scores": scores,
          "comments": ["", ""],
        })),
      )
      .await;
      assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "scores {scores}");
      let message = body["error"].as_str().unwrap();
      assert!(message.contains("is not an integer"), "{message}");
    }

    let (_, listed) = send(&router, "GET", "/matches", None).await;
    assert_eq!(listed, json!([]));
  }

  #[tokio::test]
  async fn malformed_body_is_a_json_error() {
    let router = make_router().await;
    let (status, body) = send(
      &router,
      "POST",
      "/matches",
      Some(json!({ "date": "not a date", "teams": ["A", "B"], "scores": [1, 2] })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().starts_with("invalid request body"));
  }

  #[tokio::test]
  async fn missing_match_is_404() {
    let router = make_router().await;
    let (status, body) = send(
      &router,
      "GET",
      "/matches/00000000-0000-4000-8000-000000000000",
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn stats_are_sorted_on_request() {
    let router = make_router().await;
    for (teams, scores) in [
      (["Alice Bob", "Carol Dave"], [10, 7]),
      (["Dave Carol", "Bob Alice"], [5, 9]),
      (["Erin", "Alice Bob"], [30, 2]),
    ] {
      let (status, _) =
        send(&router, "POST", "/matches", Some(entry(teams, scores))).await;
      assert_eq!(status, StatusCode::CREATED);
    }

    let (status, rows) = send(&router, "GET", "/stats?sort=total_score", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
      rows,
      json!([
        { "team": "Erin",       "matches": 1, "total_score": 30, "average_score": 30.0 },
        { "team": "Alice Bob",  "matches": 3, "total_score": 21, "average_score": 7.0 },
        { "team": "Carol Dave", "matches": 2, "total_score": 12, "average_score": 6.0 },
      ])
    );

    let (_, rows) = send(&router, "GET", "/stats", None).await;
    let names: Vec<_> = rows
      .as_array()
      .unwrap()
      .iter()
      .map(|r| r["team"].as_str().unwrap())
      .collect();
    assert_eq!(names, ["Alice Bob", "Carol Dave", "Erin"]);
  }
}

//! HTTP routes.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use questscribe_domain::TurnResult;
use questscribe_shared::{
    ErrorResponse, GameActionRequest, HealthResponse, IndexResponse, StatsResponse,
};

use crate::app::App;
use crate::infrastructure::ports::RepoError;
use crate::use_cases::session::GameActionError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/stats", get(get_stats))
        .route("/api/game-action", post(game_action))
}

async fn index() -> Json<IndexResponse> {
    let endpoints = BTreeMap::from([
        (
            "GET /api/stats".to_string(),
            "Characters and logs for the dashboard".to_string(),
        ),
        (
            "POST /api/game-action".to_string(),
            "Send a player action, get narrative + updated stats".to_string(),
        ),
        ("GET /api/health".to_string(), "Health check".to_string()),
    ]);
    Json(IndexResponse {
        message: "API is running. Use the frontend at http://localhost:5173".to_string(),
        endpoints,
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

async fn get_stats(State(app): State<Arc<App>>) -> Result<Json<StatsResponse>, ApiError> {
    let stats = app.use_cases.session.stats.execute().await?;
    Ok(Json(stats))
}

/// A body that is not a JSON object is treated like one without an action.
/// Loosely-typed fields inside an object are coerced by the request DTO.
async fn game_action(
    State(app): State<Arc<App>>,
    body: Result<Json<GameActionRequest>, JsonRejection>,
) -> Result<Json<TurnResult>, ApiError> {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable game-action body");
            GameActionRequest::default()
        }
    };

    let result = app
        .use_cases
        .session
        .play
        .execute(
            body.action.as_deref().unwrap_or_default(),
            body.stats,
            body.player_id,
        )
        .await?;
    Ok(Json(result))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("Internal error")),
                )
                    .into_response()
            }
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<GameActionError> for ApiError {
    fn from(e: GameActionError) -> Self {
        match e {
            GameActionError::EmptyAction => ApiError::BadRequest(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use chrono::{TimeZone, Utc};
    use serde_json::Value;
    use tower::ServiceExt;

    use questscribe_domain::MISSING_CREDENTIALS_NARRATIVE;

    use crate::app::AppPorts;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{
        MockCompendiumRepo, MockPlayerStatsRepo, MockSessionStore, MockTurnHistoryRepo,
    };
    use crate::infrastructure::session_store::InMemorySessionStore;
    use crate::use_cases::turn::Narrator;

    fn test_router_with_session(session: Arc<dyn crate::infrastructure::ports::SessionStore>) -> Router {
        let mut compendium = MockCompendiumRepo::new();
        compendium.expect_lookup_entry().returning(|_| Ok(None));
        compendium.expect_lookup_monster_stats().returning(|_| Ok(None));
        let mut player_stats = MockPlayerStatsRepo::new();
        player_stats.expect_persist().returning(|_| Ok(()));
        player_stats.expect_get().returning(|_| Ok(None));
        let mut history = MockTurnHistoryRepo::new();
        history.expect_record_turn().returning(|_| Ok(()));

        let app = App::new(
            AppPorts {
                compendium: Arc::new(compendium),
                player_stats: Arc::new(player_stats),
                history: Arc::new(history),
                session,
                clock: Arc::new(FixedClock(
                    Utc.with_ymd_and_hms(2025, 2, 2, 10, 0, 0).unwrap(),
                )),
            },
            Narrator::disabled(),
        );
        routes().with_state(Arc::new(app))
    }

    fn test_router() -> Router {
        test_router_with_session(Arc::new(InMemorySessionStore::new()))
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_action(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/game-action")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = test_router()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn index_lists_endpoints() {
        let response = test_router()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = json_body(response).await;
        assert!(body["message"].as_str().unwrap().starts_with("API is running"));
        assert_eq!(body["endpoints"]["GET /api/health"], "Health check");
    }

    #[tokio::test]
    async fn missing_action_is_a_bad_request() {
        let response = test_router()
            .oneshot(post_action(r#"{"stats": {"hp": 3}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "Missing 'action' in request body"})
        );
    }

    #[tokio::test]
    async fn unparseable_body_is_a_bad_request() {
        let response = test_router().oneshot(post_action("not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn whole_float_stats_are_accepted() {
        let response = test_router()
            .oneshot(post_action(
                r#"{"action": "I attack the goblin", "stats": {"hp": 10.0, "gold": 4.0}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let turn = json_body(response).await;
        assert_eq!(turn["stats"]["hp"], 10);
        assert_eq!(turn["stats"]["gold"], 4);
    }

    #[tokio::test]
    async fn negative_stats_are_clamped_to_zero() {
        let response = test_router()
            .oneshot(post_action(
                r#"{"action": "I attack the goblin", "stats": {"hp": -3, "xp": 5}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let turn = json_body(response).await;
        assert_eq!(turn["stats"]["hp"], 0);
        assert_eq!(turn["stats"]["xp"], 5);
    }

    #[tokio::test]
    async fn numeric_player_id_is_accepted() {
        let response = test_router()
            .oneshot(post_action(
                r#"{"action": "I attack the goblin", "player_id": 42}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let turn = json_body(response).await;
        assert_eq!(turn["stats"]["player_id"], "42");
        assert_eq!(turn["narrative"], MISSING_CREDENTIALS_NARRATIVE);
    }

    #[tokio::test]
    async fn game_action_updates_stats_and_log() {
        let router = test_router();

        let response = router
            .clone()
            .oneshot(post_action(
                r#"{"action": "I search the chest", "stats": {"hp": 9, "gold": 2}, "player_id": "p-9"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let turn = json_body(response).await;
        assert_eq!(turn["narrative"], MISSING_CREDENTIALS_NARRATIVE);
        assert_eq!(turn["stats"]["hp"], 9);
        assert_eq!(turn["stats"]["gold"], 2);
        assert_eq!(turn["stats"]["player_id"], "p-9");
        assert!(turn.get("monster").is_none());

        let response = router
            .oneshot(Request::get("/api/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let stats = json_body(response).await;

        assert_eq!(stats["characters"][0]["hp"], 9);
        assert_eq!(stats["characters"][0]["gold"], 2);
        assert_eq!(stats["logs"][0]["role"], "user");
        assert_eq!(stats["logs"][0]["content"], "I search the chest");
        assert_eq!(stats["logs"][0]["timestamp"], "10:00:00");
        assert_eq!(stats["logs"][1]["role"], "dm");
    }

    #[tokio::test]
    async fn session_failure_on_stats_is_internal_error() {
        let mut session = MockSessionStore::new();
        session
            .expect_snapshot()
            .returning(|| Err(RepoError::database("snapshot", "gone")));

        let response = test_router_with_session(Arc::new(session))
            .oneshot(Request::get("/api/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "Internal error"})
        );
    }
}

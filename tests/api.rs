//! End-to-end tests: the full router on an ephemeral port, driven over HTTP.

#![allow(clippy::panic)]

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};

use playrush_gateway::api::build_app;
use playrush_gateway::app_state::AppState;
use playrush_gateway::config::GatewayConfig;
use playrush_gateway::domain::UserId;
use playrush_gateway::identity::SignedTokenVerifier;
use playrush_gateway::store::{MemoryStore, StoreHandle};

const TOKEN_KEY: &[u8] = b"integration-test-signing-key-32b";
const ADMIN_KEY: &str = "admin-secret";

struct TestServer {
    base: String,
    client: reqwest::Client,
    tokens: SignedTokenVerifier,
}

impl TestServer {
    async fn start(store: StoreHandle) -> Self {
        let config = GatewayConfig {
            admin_api_key: Some(ADMIN_KEY.to_string()),
            ..GatewayConfig::default()
        };
        let identity = Arc::new(SignedTokenVerifier::new(TOKEN_KEY.to_vec()));
        let app = build_app(AppState::new(store, identity, config));

        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind failed");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("no local addr");
        };
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base: format!("http://{addr}"),
            client: reqwest::Client::new(),
            tokens: SignedTokenVerifier::new(TOKEN_KEY.to_vec()),
        }
    }

    async fn memory() -> Self {
        Self::start(StoreHandle::new(Arc::new(MemoryStore::new()))).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    fn token(&self, user: &str) -> String {
        let Ok(user_id) = UserId::parse(user) else {
            panic!("bad user id");
        };
        let Ok(token) = self.tokens.issue(&user_id, chrono::Duration::hours(1)) else {
            panic!("token issue failed");
        };
        token
    }

    /// Registers a game and returns `(game_id, api_key)`.
    async fn register_game(&self, name: &str) -> (String, String) {
        let (status, body) = self
            .send(
                self.client
                    .post(self.url("/api/v1/admin/games"))
                    .header("x-admin-key", ADMIN_KEY)
                    .json(&json!({"name": name, "description": "test game"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let (Some(id), Some(key)) = (body["data"]["id"].as_str(), body["data"]["apiKey"].as_str())
        else {
            panic!("registration response missing id or apiKey: {body}");
        };
        (id.to_string(), key.to_string())
    }

    async fn submit(&self, user: &str, game_id: &str, api_key: &str, score: Value) -> (StatusCode, Value) {
        self.send(
            self.client
                .post(self.url("/api/v1/submit-score"))
                .bearer_auth(self.token(user))
                .header("x-api-key", api_key)
                .json(&json!({"gameId": game_id, "score": score})),
        )
        .await
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.send(self.client.get(self.url(path))).await
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> (StatusCode, Value) {
        let Ok(response) = request.send().await else {
            panic!("request failed");
        };
        let status = response.status();
        let Ok(body) = response.json::<Value>().await else {
            panic!("response body is not JSON");
        };
        (status, body)
    }
}

#[tokio::test]
async fn submit_requires_bearer_token() {
    let server = TestServer::memory().await;
    let (status, body) = server
        .send(
            server
                .client
                .post(server.url("/api/v1/submit-score"))
                .json(&json!({"gameId": "g1", "score": 10})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn submit_rejects_bad_scores_before_api_key_check() {
    let server = TestServer::memory().await;
    for score in [json!(-1), json!("abc"), json!(1.5), Value::Null] {
        let (status, body) = server
            .send(
                server
                    .client
                    .post(server.url("/api/v1/submit-score"))
                    .bearer_auth(server.token("u1"))
                    .json(&json!({"gameId": "g1", "score": score})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "score {score}: {body}");
    }

    let (status, body) = server
        .send(
            server
                .client
                .post(server.url("/api/v1/submit-score"))
                .bearer_auth(server.token("u1"))
                .json(&json!({"score": 10})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Missing gameId"));
}

#[tokio::test]
async fn rejected_scores_leave_boards_untouched() {
    let server = TestServer::memory().await;
    let (game_id, key) = server.register_game("Snake").await;

    for score in [json!(-1), json!("abc")] {
        let (status, body) = server.submit("alice", &game_id, &key, score.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "score {score}: {body}");
        assert_eq!(body["success"], json!(false));
    }

    let (status, body) = server.get(&format!("/api/v1/leaderboard/{game_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, body) = server.get("/api/v1/leaderboard/global").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn malformed_limit_uses_error_envelope() {
    let server = TestServer::memory().await;
    for path in [
        "/api/v1/leaderboard/global?limit=abc",
        "/api/v1/leaderboard/g1?limit=-5",
        "/api/v1/games?limit=abc",
    ] {
        let Ok(response) = server.client.get(server.url(path)).send().await else {
            panic!("request failed");
        };
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        assert_eq!(content_type.as_deref(), Some("application/json"), "{path}");
        let Ok(body) = response.json::<Value>().await else {
            panic!("response body is not JSON");
        };
        assert_eq!(body["success"], json!(false), "{path}");
        assert!(body["error"].as_str().is_some_and(|e| e.contains("limit")), "{body}");
    }
}

#[tokio::test]
async fn submit_checks_api_key() {
    let server = TestServer::memory().await;
    let (game_id, _key) = server.register_game("Snake").await;

    let (status, _) = server
        .send(
            server
                .client
                .post(server.url("/api/v1/submit-score"))
                .bearer_auth(server.token("u1"))
                .json(&json!({"gameId": game_id, "score": 10})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = server.submit("u1", &game_id, "wrong-key", json!(10)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = server.submit("u1", "no-such-game", "wrong-key", json!(10)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn best_score_and_totals_follow_accepted_submissions() {
    let server = TestServer::memory().await;
    let (game_id, key) = server.register_game("Snake").await;

    let (status, body) = server.submit("alice", &game_id, &key, json!(100)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["accepted"], json!(true));
    assert_eq!(body["data"]["bestScore"], json!(100));

    let (status, body) = server.submit("alice", &game_id, &key, json!(80)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["accepted"], json!(false));
    assert_eq!(body["data"]["bestScore"], json!(100));

    let (_, body) = server.submit("alice", &game_id, &key, json!(150)).await;
    assert_eq!(body["data"]["accepted"], json!(true));
    let (_, _) = server.submit("bob", &game_id, &key, json!(120)).await;

    let (status, body) = server.get(&format!("/api/v1/leaderboard/{game_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!([
            {"userId": "alice", "displayName": "Anonymous Player", "score": 150, "rank": 1},
            {"userId": "bob", "displayName": "Anonymous Player", "score": 120, "rank": 2},
        ])
    );

    let (_, body) = server.get("/api/v1/leaderboard/global").await;
    assert_eq!(body["data"][0]["userId"], json!("alice"));
    assert_eq!(body["data"][0]["totalPoints"], json!(250));
    assert_eq!(body["data"][1]["totalPoints"], json!(120));

    let (_, body) = server.get("/api/v1/leaderboard/global?limit=1").await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn rank_endpoint_reports_position_or_null() {
    let server = TestServer::memory().await;
    let (game_id, key) = server.register_game("Tetris").await;
    server.submit("alice", &game_id, &key, json!(10)).await;
    server.submit("bob", &game_id, &key, json!(20)).await;

    let (_, body) = server
        .get(&format!("/api/v1/leaderboard/{game_id}/rank/alice"))
        .await;
    assert_eq!(body["data"]["rank"], json!(2));

    let (status, body) = server
        .get(&format!("/api/v1/leaderboard/{game_id}/rank/carol"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["rank"], Value::Null);
}

#[tokio::test]
async fn accepted_scores_post_community_activity() {
    let server = TestServer::memory().await;
    let (game_id, key) = server.register_game("Pong").await;
    server.submit("alice", &game_id, &key, json!(42)).await;
    server.submit("alice", &game_id, &key, json!(1)).await;

    let (status, body) = server.get("/api/v1/community/recent-activity").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["points"], json!(42));
}

#[tokio::test]
async fn profiles_are_private_and_editable_by_owner() {
    let server = TestServer::memory().await;

    let (status, _) = server
        .send(
            server
                .client
                .get(server.url("/api/v1/users/bob"))
                .bearer_auth(server.token("alice")),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = server
        .send(
            server
                .client
                .put(server.url("/api/v1/users/alice"))
                .bearer_auth(server.token("alice"))
                .json(&json!({"displayName": "Al"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let (status, body) = server
        .send(
            server
                .client
                .put(server.url("/api/v1/users/alice"))
                .bearer_auth(server.token("alice"))
                .json(&json!({"displayName": "  Alice  "})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["displayName"], json!("Alice"));
    assert_eq!(body["data"]["totalPoints"], json!(0));
}

#[tokio::test]
async fn admin_registration_requires_admin_key() {
    let server = TestServer::memory().await;
    let (status, _) = server
        .send(
            server
                .client
                .post(server.url("/api/v1/admin/games"))
                .json(&json!({"name": "Snake"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = server
        .send(
            server
                .client
                .post(server.url("/api/v1/admin/games"))
                .header("x-admin-key", "nope")
                .json(&json!({"name": "Snake"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    server.register_game("Snake").await;
    let (_, body) = server.get("/api/v1/games").await;
    assert_eq!(body["data"][0]["name"], json!("Snake"));
    assert!(body["data"][0].get("apiKey").is_none());
}

#[tokio::test]
async fn system_endpoints_and_fallback() {
    let server = TestServer::memory().await;

    let (status, body) = server.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["services"]["database"], json!("connected"));

    let (_, body) = server.get("/").await;
    assert_eq!(body["message"], json!("Playrush Backend Server"));

    let (_, body) = server.get("/api/v1/health").await;
    assert_eq!(body["status"], json!("OK"));

    let (status, body) = server.get("/api/v1/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "error": "Route not found"}));

    let Ok(response) = server.client.get(server.url("/")).send().await else {
        panic!("request failed");
    };
    assert_eq!(
        response
            .headers()
            .get("x-content-type-options")
            .and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );
}

#[tokio::test]
async fn missing_store_answers_database_unavailable() {
    let server = TestServer::start(StoreHandle::unavailable()).await;

    let (status, body) = server.submit("alice", "g1", "key", json!(10)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("Database service not available"));

    let (status, _) = server.get("/api/v1/leaderboard/global").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = server.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["services"]["database"], json!("disconnected"));
}

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use omniagent::web::{WebServer, WebServerConfig};
use omniagent_agents::AgentRegistry;
use omniagent_api::{Dispatcher, DispatcherConfig, HttpTransport, ERROR_NOTICE};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app(base_url: &str) -> Router {
    let transport = HttpTransport::new(Some(Duration::from_secs(5)), false).unwrap();
    let dispatcher = Dispatcher::new(
        Arc::new(AgentRegistry::builtin()),
        Arc::new(transport),
        DispatcherConfig {
            base_url: base_url.to_string(),
            simulated_delay: Duration::from_millis(1),
            ..DispatcherConfig::default()
        },
    );
    WebServer::new(WebServerConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        dispatcher: Arc::new(dispatcher),
        transcript_dir: None,
    })
    .router()
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create(app: &Router, body: Value) -> String {
    let (status, info) = call(app, "POST", "/api/sessions", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    info["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_list_agents() {
    let app = app("http://127.0.0.1:1");
    let (status, body) = call(&app, "GET", "/api/agents", None).await;

    assert_eq!(status, StatusCode::OK);
    let agents = body["agents"].as_array().unwrap();
    let ids: Vec<&str> = agents.iter().map(|a| a["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["quality", "flkh", "omni"]);
    assert_eq!(agents[2]["name"], "Omni Agent");
    assert_eq!(agents[2]["team"], true);
    assert_eq!(agents[0]["team"], false);
}

#[tokio::test]
async fn test_create_session_rejects_unknown_agent() {
    let app = app("http://127.0.0.1:1");
    let (status, body) = call(&app, "POST", "/api/sessions", Some(json!({"agent_id": "ghost"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "unknown agent: ghost", "status": 400}));
}

#[tokio::test]
async fn test_create_session_rejects_bad_team_mode() {
    let app = app("http://127.0.0.1:1");
    let (status, body) = call(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({"agent_id": "omni", "team_mode": "swarm"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown team mode: swarm");
}

#[tokio::test]
async fn test_omni_conversation_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/team/ask"))
        .and(body_json(json!({
            "query": "Plan the release",
            "model_id": "o3-mini",
            "team_mode": "coordinate"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "**Plan** ready"})))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(&server.uri());
    let (status, info) = call(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({"agent_id": "omni", "team_mode": "coordinate"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(info["team_mode"], "coordinate");
    assert_eq!(info["busy"], false);
    assert_eq!(
        info["messages"][0]["content"],
        "Hello! I'm the Omni Agent. How can I assist you today? I'm operating in coordinate mode."
    );
    let id = info["session_id"].as_str().unwrap().to_string();

    let (status, reply) = call(
        &app,
        "POST",
        &format!("/api/sessions/{}/messages", id),
        Some(json!({"text": "Plan the release"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["role"], "assistant");
    assert_eq!(reply["content"], "**Plan** ready");
    assert!(reply["html"].as_str().unwrap().contains("<strong>Plan</strong>"));

    let (status, info) = call(&app, "GET", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let messages = info["messages"].as_array().unwrap();
    let roles: Vec<&str> = messages.iter().map(|m| m["role"].as_str().unwrap()).collect();
    assert_eq!(roles, vec!["assistant", "user", "assistant"]);
    assert!(messages[1].get("html").is_none());
}

#[tokio::test]
async fn test_failed_agent_call_still_answers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/safety/ask"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(&server.uri());
    let id = create(&app, json!({"agent_id": "flkh"})).await;

    let (status, reply) = call(
        &app,
        "POST",
        &format!("/api/sessions/{}/messages", id),
        Some(json!({"text": "is this safe?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["content"], ERROR_NOTICE);
}

#[tokio::test]
async fn test_message_errors() {
    let app = app("http://127.0.0.1:1");
    let id = create(&app, json!({"agent_id": "quality"})).await;

    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/sessions/{}/messages", id),
        Some(json!({"text": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "message is empty");

    let (status, _) = call(
        &app,
        "POST",
        &format!("/api/sessions/{}/messages", uuid::Uuid::new_v4()),
        Some(json!({"text": "hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, info) = call(&app, "GET", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(info["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_second_message_while_pending_conflicts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/quality/ask"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"answer": "slow answer"}))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let app = app(&server.uri());
    let id = create(&app, json!({"agent_id": "quality"})).await;
    let uri = format!("/api/sessions/{}/messages", id);

    let first = {
        let app = app.clone();
        let uri = uri.clone();
        tokio::spawn(async move { call(&app, "POST", &uri, Some(json!({"text": "first"}))).await })
    };
    tokio::time::sleep(Duration::from_millis(150)).await;

    let (_, info) = call(&app, "GET", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(info["busy"], true);

    let (status, body) = call(&app, "POST", &uri, Some(json!({"text": "second"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);

    let (status, reply) = first.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["content"], "slow answer");

    let (_, info) = call(&app, "GET", &format!("/api/sessions/{}", id), None).await;
    let contents: Vec<&str> = info["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["content"].as_str().unwrap())
        .collect();
    assert_eq!(
        contents,
        vec![
            "Hello! I'm the Quality Agent. How can I assist you today?",
            "first",
            "slow answer"
        ]
    );
}

#[tokio::test]
async fn test_delete_session() {
    let app = app("http://127.0.0.1:1");
    let id = create(&app, json!({"agent_id": "omni"})).await;
    let uri = format!("/api/sessions/{}", id);

    let (status, body) = call(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = call(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

//! Integration tests for the REST API.
//!
//! Requests go through the full router: JSON extraction, config resolution,
//! services, repositories and error mapping. Provider replies come from a
//! scripted gateway, or from a wiremock server behind the real client.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use domain_modeler::adapters::http::{
    api_router, ActiveLlmConfig, LlmHandlers, ModelingHandlers, RouterOptions,
};
use domain_modeler::adapters::llm::{LlmClient, LlmClientConfig, MockLlmGateway};
use domain_modeler::adapters::repositories::{LlmConfigRepository, ModelingWorkspace};
use domain_modeler::adapters::storage::InMemoryStore;
use domain_modeler::application::services::{
    ModelExtractionService, ModelGenerationService, ModelRefinementService,
};
use domain_modeler::ports::LlmGateway;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app(gateway: Arc<dyn LlmGateway>) -> Router {
    let active = ActiveLlmConfig::new(
        LlmConfigRepository::new(Arc::new(InMemoryStore::new(LlmConfigRepository::STORE_NAME))),
        None,
    );
    let workspace = ModelingWorkspace::open(|name| Arc::new(InMemoryStore::new(name)));

    api_router(
        LlmHandlers::new(Arc::clone(&gateway), active.clone()),
        ModelingHandlers::new(
            Arc::new(ModelExtractionService::new(Arc::clone(&gateway))),
            Arc::new(ModelGenerationService::new(Arc::clone(&gateway))),
            Arc::new(ModelRefinementService::new(gateway)),
            workspace,
            active,
        ),
        RouterOptions::default(),
    )
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(app, method, uri, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn save_config(app: &Router, provider: &str, api_key: &str) {
    let (status, _) = send(
        app,
        Method::PUT,
        "/api/llm/config",
        Some(json!({"provider": provider, "apiKey": api_key, "model": "test-model"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

const MODEL_REPLY: &str = r#"Here is the model:
```json
{
  "entities": [
    {"name": "Order", "properties": {"Total": {"name": "Money", "value": null}}}
  ],
  "valueObjects": [{"name": "Money"}],
  "aggregates": [{"name": "Orders", "root": {"name": "Order"}}],
  "events": [{"name": "OrderPlaced", "description": "An order was placed"}],
  "commands": [
    {"name": "PlaceOrder", "description": "", "triggeredEvent": {"name": "OrderPlaced"}}
  ]
}
```"#;

// =============================================================================
// LLM configuration
// =============================================================================

#[tokio::test]
async fn config_lifecycle() {
    let app = app(Arc::new(MockLlmGateway::new()));

    let (status, body) = send(&app, Method::GET, "/api/llm/config", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    save_config(&app, "openai", "sk-test").await;

    let (status, body) = send(&app, Method::GET, "/api/llm/config", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], "openai");
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["hasApiKey"], true);
    assert!(body.get("apiKey").is_none());

    let (status, _) = send(&app, Method::DELETE, "/api/llm/config", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, "/api/llm/config", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_config_is_rejected() {
    let app = app(Arc::new(MockLlmGateway::new()));

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/llm/config",
        Some(json!({"provider": "anthropic", "apiKey": "k", "model": "m", "temperature": 1.5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "Temperature must be between 0 and 1");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/llm/config",
        Some(json!({"provider": "acme", "apiKey": "k", "model": "m"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("acme"));
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = app(Arc::new(MockLlmGateway::new()));

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/llm/config",
        Some(json!({"provider": "anthropic"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn validate_key_and_list_models() {
    let gateway = MockLlmGateway::new()
        .with_valid_key("sk-good")
        .with_models(&["gpt-4", "gpt-3.5-turbo"]);
    let app = app(Arc::new(gateway));

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/llm/validate",
        Some(json!({"provider": "openai", "apiKey": "sk-good"})),
    )
    .await;
    assert_eq!(body["valid"], true);

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/llm/validate",
        Some(json!({"provider": "openai", "apiKey": "sk-bad"})),
    )
    .await;
    assert_eq!(body["valid"], false);

    save_config(&app, "openai", "sk-good").await;

    let (status, body) = send(&app, Method::GET, "/api/llm/models", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], "openai");
    assert_eq!(body["models"], json!(["gpt-4", "gpt-3.5-turbo"]));

    // The saved key belongs to openai and is not sent elsewhere.
    let (_, body) = send(&app, Method::GET, "/api/llm/models?provider=anthropic", None).await;
    assert_eq!(body["models"], json!([]));
}

// =============================================================================
// Modeling
// =============================================================================

#[tokio::test]
async fn modeling_requires_a_config() {
    let gateway = MockLlmGateway::new();
    let app = app(Arc::new(gateway.clone()));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/modeling/extract",
        Some(json!({"input": "Customers place orders"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "API key is required");
    assert_eq!(gateway.call_count(), 0);
}

#[tokio::test]
async fn blank_input_is_rejected_before_calling_provider() {
    let gateway = MockLlmGateway::new();
    let app = app(Arc::new(gateway.clone()));
    save_config(&app, "anthropic", "sk-test").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/modeling/extract",
        Some(json!({"input": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "input is required");
    assert_eq!(gateway.call_count(), 0);
}

#[tokio::test]
async fn extract_generate_export_and_clear() {
    let gateway = MockLlmGateway::new()
        .with_response(r#"[{"name": "Order", "description": "A purchase request"}]"#)
        .with_response(r#"["Place an order", "Cancel an order"]"#)
        .with_response(MODEL_REPLY);
    let app = app(Arc::new(gateway.clone()));
    save_config(&app, "anthropic", "sk-test").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/modeling/extract",
        Some(json!({"input": "Customers place and cancel orders"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["terms"][0]["name"], "Order");
    assert_eq!(body["useCases"], json!(["Place an order", "Cancel an order"]));

    let (_, terms) = send(&app, Method::GET, "/api/modeling/terms", None).await;
    assert_eq!(terms, json!([{"name": "Order", "description": "A purchase request"}]));

    let (_, use_cases) = send(&app, Method::GET, "/api/modeling/use-cases", None).await;
    assert_eq!(use_cases.as_array().unwrap().len(), 2);

    let (status, model) = send(&app, Method::POST, "/api/modeling/generate", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(model["entities"][0]["name"], "Order");
    assert_eq!(gateway.call_count(), 3);

    // Generation read the stored vocabulary.
    let prompt = gateway.last_call().unwrap();
    assert!(prompt.user_prompt().contains("A purchase request"));
    assert!(prompt.user_prompt().contains("Cancel an order"));

    let (_, entities) = send(&app, Method::GET, "/api/modeling/entities", None).await;
    assert_eq!(entities.as_array().unwrap().len(), 1);
    let (_, commands) = send(&app, Method::GET, "/api/modeling/commands", None).await;
    assert_eq!(commands[0]["triggeredEvent"]["name"], "OrderPlaced");

    let (status, markdown) =
        send_raw(&app, Method::GET, "/api/modeling/export/markdown", None).await;
    assert_eq!(status, StatusCode::OK);
    let markdown = String::from_utf8(markdown).unwrap();
    assert!(markdown.starts_with("# Domain Model"));
    assert!(markdown.contains("### Order"));
    assert!(markdown.contains("- Triggers: OrderPlaced"));

    let (_, diagram) = send_raw(&app, Method::GET, "/api/modeling/export/diagram", None).await;
    let diagram = String::from_utf8(diagram).unwrap();
    assert!(diagram.contains("<<AggregateRoot>> Order"));
    assert!(diagram.contains("Order --> Money"));

    let (status, _) = send(&app, Method::DELETE, "/api/modeling", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, entities) = send(&app, Method::GET, "/api/modeling/entities", None).await;
    assert_eq!(entities, json!([]));
    let (_, terms) = send(&app, Method::GET, "/api/modeling/terms", None).await;
    assert_eq!(terms, json!([]));
}

#[tokio::test]
async fn failed_generation_keeps_stored_model() {
    let gateway = MockLlmGateway::new()
        .with_response(MODEL_REPLY)
        .with_response("I cannot help with that.");
    let app = app(Arc::new(gateway));
    save_config(&app, "anthropic", "sk-test").await;

    send(&app, Method::POST, "/api/modeling/generate", Some(json!({}))).await;
    let (status, model) = send(&app, Method::POST, "/api/modeling/generate", Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(model["entities"], json!([]));

    let (_, entities) = send(&app, Method::GET, "/api/modeling/entities", None).await;
    assert_eq!(entities.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn refine_falls_back_to_current_model() {
    let gateway = MockLlmGateway::new()
        .with_response(MODEL_REPLY)
        .with_response("not json at all");
    let app = app(Arc::new(gateway));
    save_config(&app, "anthropic", "sk-test").await;

    let (_, generated) = send(&app, Method::POST, "/api/modeling/generate", Some(json!({}))).await;
    let (status, refined) = send(
        &app,
        Method::POST,
        "/api/modeling/refine",
        Some(json!({"instruction": "Rename Order to Purchase"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(refined["entities"], generated["entities"]);
}

#[tokio::test]
async fn refine_stores_the_refined_model() {
    let gateway = MockLlmGateway::new()
        .with_response(MODEL_REPLY)
        .with_response(r#"{"entities": [{"name": "Purchase"}]}"#);
    let app = app(Arc::new(gateway));
    save_config(&app, "anthropic", "sk-test").await;

    send(&app, Method::POST, "/api/modeling/generate", Some(json!({}))).await;
    send(
        &app,
        Method::POST,
        "/api/modeling/refine",
        Some(json!({"instruction": "Rename Order to Purchase"})),
    )
    .await;

    let (_, entities) = send(&app, Method::GET, "/api/modeling/entities", None).await;
    assert_eq!(entities[0]["name"], "Purchase");
    let (_, commands) = send(&app, Method::GET, "/api/modeling/commands", None).await;
    assert_eq!(commands, json!([]));
}

#[tokio::test]
async fn questions_use_request_vocabulary() {
    let gateway = MockLlmGateway::new().with_response(r#"["Who approves refunds?"]"#);
    let app = app(Arc::new(gateway.clone()));
    save_config(&app, "anthropic", "sk-test").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/modeling/questions",
        Some(json!({
            "terms": [{"name": "Refund", "description": "Money returned"}],
            "useCases": ["Request refund"],
            "userInputHistory": ["Shop sells shoes"]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"], json!(["Who approves refunds?"]));
    assert!(gateway.last_call().unwrap().user_prompt().contains("Request refund"));
}

// =============================================================================
// Real client against a mocked provider
// =============================================================================

#[tokio::test]
async fn suggestions_through_anthropic_client() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": "[\"Add a Customer entity\"]"}],
            "usage": {"input_tokens": 12, "output_tokens": 8}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = LlmClient::new(LlmClientConfig::default().with_anthropic_base_url(server.uri()))
        .unwrap();
    let app = app(Arc::new(client));
    save_config(&app, "anthropic", "sk-ant").await;

    let (status, body) = send(&app, Method::POST, "/api/modeling/suggestions", Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestions"], json!(["Add a Customer entity"]));
}

#[tokio::test]
async fn provider_failure_degrades_to_empty_suggestions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"type": "authentication_error", "message": "invalid x-api-key"}
        })))
        .mount(&server)
        .await;

    let client = LlmClient::new(LlmClientConfig::default().with_anthropic_base_url(server.uri()))
        .unwrap();
    let app = app(Arc::new(client));
    save_config(&app, "anthropic", "sk-bad").await;

    let (status, body) = send(&app, Method::POST, "/api/modeling/suggestions", Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestions"], json!([]));
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app(Arc::new(MockLlmGateway::new()));
    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

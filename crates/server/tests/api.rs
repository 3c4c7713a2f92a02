use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use server::{build_router, ServerConfig, ServerState};
use std::sync::Arc;
use tower::ServiceExt;

const RACECAR_ID: &str = "e00f9ef51a95f6e854862eed28dc0f1a68f154d9f75ddd841ab00de6ede9209b";

fn app() -> Router {
    build_router(Arc::new(ServerState::new(ServerConfig::default())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, value: &str) -> Value {
    let (status, body) = send(app, Method::POST, "/strings", Some(json!({ "value": value }))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

#[tokio::test]
async fn root_reports_running() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "String Analyzer API is running 🚀");
}

#[tokio::test]
async fn health_counts_stored_strings() {
    let app = app();
    create(&app, "one").await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["stored_strings"], 1);
}

#[tokio::test]
async fn create_returns_full_record() {
    let app = app();
    let body = create(&app, "racecar").await;

    assert_eq!(body["id"], RACECAR_ID);
    assert_eq!(body["value"], "racecar");
    let props = &body["properties"];
    assert_eq!(props["length"], 7);
    assert_eq!(props["is_palindrome"], true);
    assert_eq!(props["unique_characters"], 4);
    assert_eq!(props["word_count"], 1);
    assert_eq!(props["sha256_hash"], RACECAR_ID);
    assert_eq!(
        props["character_frequency_map"],
        json!({ "a": 2, "c": 2, "e": 1, "r": 2 })
    );
    assert!(body["created_at"].as_str().unwrap().ends_with("+00:00"));
}

#[tokio::test]
async fn get_by_id_returns_stored_record() {
    let app = app();
    let created = create(&app, "racecar").await;
    let (status, fetched) = send(&app, Method::GET, &format!("/strings/{RACECAR_ID}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn duplicate_is_conflict() {
    let app = app();
    create(&app, "hello").await;
    let (status, body) = send(&app, Method::POST, "/strings", Some(json!({ "value": "hello" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "String already exists");
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn invalid_values_are_rejected() {
    let app = app();
    for payload in [json!({ "value": "   " }), json!({}), json!({ "value": null })] {
        let (status, body) = send(&app, Method::POST, "/strings", Some(payload.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
        assert_eq!(body["detail"], "Missing or empty 'value' field");
    }

    let (status, body) = send(&app, Method::POST, "/strings", Some(json!({ "value": 42 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "Value must be a string");

    let (_, listing) = send(&app, Method::GET, "/strings", None).await;
    assert_eq!(listing["count"], 0);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/strings")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_applies_filters_in_insertion_order() {
    let app = app();
    for value in ["racecar", "hello world", "level", "noon at night"] {
        create(&app, value).await;
    }

    let (status, body) = send(&app, Method::GET, "/strings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 4);
    assert_eq!(body["data"][0]["value"], "racecar");
    assert_eq!(body["data"][3]["value"], "noon at night");

    let (status, body) = send(
        &app,
        Method::GET,
        "/strings?is_palindrome=true&word_count=1&min_length=6",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["value"], "racecar");
    assert_eq!(body["filters_applied"]["is_palindrome"], true);
    assert_eq!(body["filters_applied"]["min_length"], 6);
    assert!(body["filters_applied"]["max_length"].is_null());

    let (_, body) = send(&app, Method::GET, "/strings?contains_character=w", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["value"], "hello world");
}

#[tokio::test]
async fn bad_filter_arguments() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/strings?contains_character=ab", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "contains_character must be a single character");

    let (status, _) = send(&app, Method::GET, "/strings?min_length=abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn natural_language_queries() {
    let app = app();
    for value in ["racecar", "hello", "abcdefgh", "a"] {
        create(&app, value).await;
    }

    let (status, body) = send(
        &app,
        Method::GET,
        "/strings/filter-by-natural-language?query=show%20me%20palindromes",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["interpreted_query"]["original"], "show me palindromes");
    assert_eq!(
        body["interpreted_query"]["parsed_filters"],
        json!({ "is_palindrome": true })
    );

    let (_, body) = send(
        &app,
        Method::GET,
        "/strings/filter-by-natural-language?query=strings%20longer%20than%205",
        None,
    )
    .await;
    assert_eq!(body["interpreted_query"]["parsed_filters"], json!({ "min_length": 6 }));
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["value"], "racecar");
    assert_eq!(body["data"][1]["value"], "abcdefgh");
}

#[tokio::test]
async fn natural_language_rejects_unknown_and_missing_query() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::GET,
        "/strings/filter-by-natural-language?query=gibberish%20xyz",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Unable to parse natural language query: gibberish xyz"
    );

    let (status, _) = send(&app, Method::GET, "/strings/filter-by-natural-language", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn delete_by_value() {
    let app = app();
    create(&app, "racecar").await;

    let (status, body) = send(&app, Method::DELETE, "/strings/racecar", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, body) = send(&app, Method::GET, &format!("/strings/{RACECAR_ID}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "String not found");

    let (status, _) = send(&app, Method::DELETE, "/strings/racecar", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_decodes_percent_encoded_value() {
    let app = app();
    create(&app, "hello world").await;
    let (status, _) = send(&app, Method::DELETE, "/strings/hello%20world", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, listing) = send(&app, Method::GET, "/strings", None).await;
    assert_eq!(listing["count"], 0);
}

#[tokio::test]
async fn delete_value_shadowed_by_static_route() {
    let app = app();
    create(&app, "filter-by-natural-language").await;

    let (status, _) = send(
        &app,
        Method::DELETE,
        "/strings/filter-by-natural-language",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, listing) = send(&app, Method::GET, "/strings", None).await;
    assert_eq!(listing["count"], 0);

    let (status, body) = send(
        &app,
        Method::DELETE,
        "/strings/filter-by-natural-language",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "String not found");
}

#[tokio::test]
async fn huge_length_bound_matches_nothing() {
    let app = app();
    create(&app, "racecar").await;
    let (status, body) = send(
        &app,
        Method::GET,
        "/strings/filter-by-natural-language?query=longer%20than%2099999999999999999999",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(
        body["interpreted_query"]["parsed_filters"],
        json!({ "min_length": i64::MAX })
    );
}

#[tokio::test]
async fn palindrome_flag_spellings() {
    let app = app();
    for value in ["racecar", "hello"] {
        create(&app, value).await;
    }
    for (flag, expected) in [("True", "racecar"), ("1", "racecar"), ("no", "hello")] {
        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/strings?is_palindrome={flag}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{flag}");
        assert_eq!(body["count"], 1, "{flag}");
        assert_eq!(body["data"][0]["value"], expected);
    }

    let (status, _) = send(&app, Method::GET, "/strings?is_palindrome=maybe", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let app = app();
    let request = Request::builder()
        .uri("/")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc-123");
}

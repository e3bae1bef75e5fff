#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use cafe_wifi::config::Config;
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const API_KEY: &str = "test-api-key";

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;
    config.security.secret_key = "test-secret-key".to_string();
    config.security.api_key = API_KEY.to_string();
    config
}

pub async fn spawn_app() -> Router {
    let state = cafe_wifi::api::create_app_state_from_config(test_config(), None)
        .await
        .expect("Failed to create app state");
    cafe_wifi::api::router(state)
}

pub fn form_body(fields: &[(&str, &str)]) -> Body {
    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish();
    Body::from(encoded)
}

pub fn form_request(method: &str, uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(form_body(fields))
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Adds a cafe through `POST /api/add`, using the API's short field names.
pub async fn add_cafe(app: &Router, name: &str, loc: &str) -> Response<Body> {
    let map_url = format!("https://maps.example.com/{}", name.replace(' ', "-"));
    send(
        app,
        form_request(
            "POST",
            "/api/add",
            &[
                ("name", name),
                ("map_url", map_url.as_str()),
                ("img_url", "https://images.example.com/cafe.jpg"),
                ("loc", loc),
                ("seats", "20-30"),
                ("sockets", "1"),
                ("toilet", "1"),
                ("wifi", "1"),
                ("calls", ""),
                ("coffee_price", "£2.40"),
            ],
        ),
    )
    .await
}

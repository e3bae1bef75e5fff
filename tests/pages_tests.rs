mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{add_cafe, body_json, body_string, form_body, get, send, spawn_app};

fn session_cookie(response: &axum::http::Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

fn csrf_token(html: &str) -> String {
    let marker = r#"name="csrf_token" value=""#;
    let start = html.find(marker).expect("csrf field") + marker.len();
    let end = html[start..].find('"').unwrap();
    html[start..start + end].to_string()
}

fn post_add(cookie: Option<&str>, fields: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/add")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(form_body(fields)).unwrap()
}

/// Opens the add page and returns the session cookie plus its CSRF token.
async fn open_form(app: &axum::Router) -> (String, String) {
    let response = get(app, "/add").await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);
    let html = body_string(response).await;
    (cookie, csrf_token(&html))
}

#[tokio::test]
async fn test_home_page() {
    let app = spawn_app().await;

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
    assert!(response.headers().contains_key("x-request-id"));
    let html = body_string(response).await;
    assert!(html.contains("Coffee &amp; Wifi"));
    assert!(html.contains(r#"href="/cafes""#));
}

#[tokio::test]
async fn test_cafes_page_lists_rows() {
    let app = spawn_app().await;

    let html = body_string(get(&app, "/cafes").await).await;
    assert!(html.contains("No cafes yet."));

    add_cafe(&app, "Old Spike", "Peckham").await;
    add_cafe(&app, "Ground", "Peckham").await;

    let response = get(&app, "/cafes").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;

    assert!(html.contains("<th>name</th>"));
    assert!(html.contains("<th>coffee_price</th>"));
    assert!(!html.contains("<th>id</th>"));
    assert!(html.contains(r#"href="https://maps.example.com/Old-Spike""#));
    let ground = html.find("Ground").unwrap();
    let old_spike = html.find("Old Spike").unwrap();
    assert!(ground < old_spike);
}

#[tokio::test]
async fn test_add_form_submission() {
    let app = spawn_app().await;
    let (cookie, token) = open_form(&app).await;
    assert!(!token.is_empty());

    let response = send(
        &app,
        post_add(
            Some(&cookie),
            &[
                ("csrf_token", token.as_str()),
                ("name", "Lord Morpeth"),
                ("map_url", "https://maps.app.goo.gl/morpeth"),
                ("img_url", "https://images.example.com/morpeth.jpg"),
                ("location", "Hackney"),
                ("seats", "10-20"),
                ("has_wifi", "y"),
                ("coffee_price", "£2.20"),
            ],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/cafes");

    let all = body_json(get(&app, "/api/all").await).await;
    let cafe = &all[0];
    assert_eq!(cafe["name"], "Lord Morpeth");
    assert_eq!(cafe["has_wifi"], true);
    assert_eq!(cafe["has_toilet"], false);
    assert_eq!(cafe["has_sockets"], false);
    assert_eq!(cafe["coffee_price"], "£2.20");
}

#[tokio::test]
async fn test_add_form_rejects_invalid_url() {
    let app = spawn_app().await;
    let (cookie, token) = open_form(&app).await;

    let response = send(
        &app,
        post_add(
            Some(&cookie),
            &[
                ("csrf_token", token.as_str()),
                ("name", "Broken Link Cafe"),
                ("map_url", "not a url"),
                ("img_url", "https://images.example.com/x.jpg"),
                ("location", "Soho"),
                ("seats", "5"),
            ],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_string(response).await;
    assert!(html.contains("Please enter a valid URL."));
    assert!(html.contains(r#"value="Broken Link Cafe""#));
    assert!(html.contains(r#"name="map_url" value="not a url" class="invalid""#));
    assert!(!html.contains(r#"name="img_url" value="https://images.example.com/x.jpg" class"#));

    assert_eq!(body_json(get(&app, "/api/all").await).await, serde_json::json!([]));

    // Resubmitting the corrected form from the re-rendered page goes through
    let token = csrf_token(&html);
    let response = send(
        &app,
        post_add(
            Some(&cookie),
            &[
                ("csrf_token", token.as_str()),
                ("name", "Broken Link Cafe"),
                ("map_url", "https://maps.example.com/broken-link"),
                ("img_url", "https://images.example.com/x.jpg"),
                ("location", "Soho"),
                ("seats", "5"),
            ],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/cafes");

    let all = body_json(get(&app, "/api/all").await).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0]["map_url"], "https://maps.example.com/broken-link");
}

#[tokio::test]
async fn test_add_form_duplicate_name() {
    let app = spawn_app().await;
    add_cafe(&app, "Ground", "Peckham").await;
    let (cookie, token) = open_form(&app).await;

    let response = send(
        &app,
        post_add(
            Some(&cookie),
            &[
                ("csrf_token", token.as_str()),
                ("name", "Ground"),
                ("map_url", "https://maps.example.com/ground-2"),
                ("img_url", "https://images.example.com/ground.jpg"),
                ("location", "Camberwell"),
                ("seats", "5"),
            ],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_string(response).await.contains("A cafe with this name already exists."));
}

#[tokio::test]
async fn test_add_form_requires_csrf_token() {
    let app = spawn_app().await;
    let (cookie, _) = open_form(&app).await;

    let fields = [
        ("name", "Sneaky Cafe"),
        ("map_url", "https://maps.example.com/sneaky"),
        ("img_url", "https://images.example.com/sneaky.jpg"),
        ("location", "Soho"),
        ("seats", "5"),
    ];

    let response = send(&app, post_add(Some(&cookie), &fields)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut forged = fields.to_vec();
    forged.push(("csrf_token", "forged"));
    let response = send(&app, post_add(Some(&cookie), &forged)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // A token from another session is not accepted either
    let (_, other_token) = open_form(&app).await;
    let mut foreign = fields.to_vec();
    foreign.push(("csrf_token", other_token.as_str()));
    let response = send(&app, post_add(None, &foreign)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(body_json(get(&app, "/api/all").await).await, serde_json::json!([]));
}

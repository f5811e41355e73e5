use axum::body::{to_bytes, Body};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bazaar::config::BazaarConfig;
use bazaar::http::{router, AppState};
use bazaar::lifecycle::MarketSystem;
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

struct Response {
    status: StatusCode,
    set_cookie: Option<String>,
    body: Value,
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    Response {
        status,
        set_cookie,
        body,
    }
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn with_json(method: Method, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn login_request(username: &str, password: &str) -> Request<Body> {
    let credentials = BASE64.encode(format!("{username}:{password}"));
    Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(AUTHORIZATION, format!("Basic {credentials}"))
        .body(Body::empty())
        .unwrap()
}

/// Registers `username` and returns the `Cookie` header value of a fresh session.
async fn sign_up(app: &Router, username: &str) -> String {
    let password = format!("{username}-password");
    let created = send(
        app,
        with_json(
            Method::POST,
            "/api/users",
            None,
            json!({ "username": username, "password": password }),
        ),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let login = send(app, login_request(username, &password)).await;
    assert_eq!(login.status, StatusCode::OK);
    let set_cookie = login.set_cookie.expect("login sets a cookie");
    set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

/// Two users with one item each: test1 lists (1.0, tag1 tag2), test2 lists
/// (2.0, tag2 tag3).
async fn marketplace() -> (MarketSystem, Router, String, Vec<Value>) {
    let system = MarketSystem::new(&BazaarConfig::default());
    let app = router(AppState::new(&system));

    let mut items = vec![];
    let mut cookie = String::new();
    for (name, price, tags) in [("test1", 1.0, ["tag1", "tag2"]), ("test2", 2.0, ["tag2", "tag3"])] {
        cookie = sign_up(&app, name).await;
        let created = send(
            &app,
            with_json(
                Method::POST,
                "/api/items",
                Some(&cookie),
                json!({
                    "price": price,
                    "tags": tags,
                    "description": format!("{name}'s item description"),
                }),
            ),
        )
        .await;
        assert_eq!(created.status, StatusCode::CREATED);
        items.push(created.body);
    }
    (system, app, cookie, items)
}

/// The router holds client clones, so it has to go before the actors can stop.
async fn stop(system: MarketSystem, app: Router) {
    drop(app);
    tokio::time::timeout(Duration::from_secs(5), system.shutdown())
        .await
        .expect("actors did not stop")
        .unwrap();
}

fn ids(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_shutdown_waits_for_router_clients() {
    let system = MarketSystem::new(&BazaarConfig::default());
    let app = router(AppState::new(&system));

    let pending = tokio::time::timeout(Duration::from_millis(200), system.shutdown()).await;
    assert!(pending.is_err(), "actors stopped while the router still held clients");
    drop(app);
}

#[tokio::test]
async fn test_item_endpoints_require_a_session() {
    let (system, app, _, items) = marketplace().await;
    let id = items[0]["id"].as_str().unwrap();

    for uri in [
        "/api/items".to_string(),
        "/api/items?orderBy=price&limit=oops".to_string(),
        "/api/items/count".to_string(),
        "/api/items/tags".to_string(),
        format!("/api/items/{id}"),
        "/api/profile".to_string(),
        "/api/profile/items".to_string(),
    ] {
        let response = send(&app, get(&uri, None)).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{uri}");

        let response = send(&app, get(&uri, Some("session=forged"))).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{uri}");
    }
    stop(system, app).await;
}

#[tokio::test]
async fn test_list_and_filter_items() {
    let (system, app, cookie, items) = marketplace().await;
    let first = items[0]["id"].as_str().unwrap();
    let second = items[1]["id"].as_str().unwrap();
    let owner = items[0]["owner"].as_str().unwrap();

    let all = send(&app, get("/api/items", Some(&cookie))).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(ids(&all.body), vec![first, second]);

    let cases = [
        (format!("/api/items?owner={owner}"), vec![first]),
        ("/api/items?price=2".to_string(), vec![second]),
        ("/api/items?priceMin=1.5".to_string(), vec![second]),
        ("/api/items?priceMax=1.5".to_string(), vec![first]),
        ("/api/items?tags=tag1".to_string(), vec![first]),
        ("/api/items?tags=tag1,tag3".to_string(), vec![first, second]),
        ("/api/items?tags=tag1&tags=tag3".to_string(), vec![first, second]),
        ("/api/items?text=TEST2".to_string(), vec![second]),
        ("/api/items?tags=tag2&priceMax=1".to_string(), vec![first]),
        ("/api/items?text=nothing-like-this".to_string(), vec![]),
    ];
    for (uri, expected) in cases {
        let response = send(&app, get(&uri, Some(&cookie))).await;
        assert_eq!(response.status, StatusCode::OK, "{uri}");
        assert_eq!(ids(&response.body), expected, "{uri}");
    }
    stop(system, app).await;
}

#[tokio::test]
async fn test_sort_paginate_and_project() {
    let (system, app, cookie, items) = marketplace().await;
    let first = items[0]["id"].as_str().unwrap();
    let second = items[1]["id"].as_str().unwrap();

    let desc = send(&app, get("/api/items?orderBy=price&order=desc", Some(&cookie))).await;
    assert_eq!(ids(&desc.body), vec![second, first]);
    let asc = send(&app, get("/api/items?orderBy=price&order=ASC", Some(&cookie))).await;
    assert_eq!(ids(&asc.body), vec![first, second]);

    let page = send(
        &app,
        get(
            "/api/items?orderBy=price&order=asc&offset=1&limit=1&fields=description,price",
            Some(&cookie),
        ),
    )
    .await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(
        page.body,
        json!([{ "id": second, "description": "test2's item description", "price": 2.0 }])
    );
    stop(system, app).await;
}

#[tokio::test]
async fn test_count_and_tag_frequency() {
    let (system, app, cookie, _) = marketplace().await;

    let count = send(&app, get("/api/items/count?tags=tag2", Some(&cookie))).await;
    assert_eq!(count.status, StatusCode::OK);
    assert_eq!(count.body, json!(2));

    // paging never changes a count
    let count = send(&app, get("/api/items/count?priceMin=2&limit=0&offset=5", Some(&cookie))).await;
    assert_eq!(count.body, json!(1));

    let tags = send(&app, get("/api/items/tags", Some(&cookie))).await;
    assert_eq!(
        tags.body,
        json!([
            { "tag": "tag2", "count": 2 },
            { "tag": "tag1", "count": 1 },
            { "tag": "tag3", "count": 1 },
        ])
    );
    stop(system, app).await;
}

#[tokio::test]
async fn test_malformed_parameters_are_bad_requests() {
    let (system, app, cookie, _) = marketplace().await;

    for (uri, param) in [
        ("/api/items?priceMin=cheap", "priceMin"),
        ("/api/items?price=1&price=2", "price"),
        ("/api/items?offset=-1", "offset"),
        ("/api/items?limit=ten", "limit"),
        ("/api/items?order=sideways", "order"),
        ("/api/items?orderBy=tags", "orderBy"),
        ("/api/items?orderBy=colour", "orderBy"),
        ("/api/items?fields=id,colour", "fields"),
        ("/api/items?owner=someone", "owner"),
        ("/api/items/count?priceMax=NaN", "priceMax"),
    ] {
        let response = send(&app, get(uri, Some(&cookie))).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{uri}");
        let message = response.body["error"].as_str().unwrap();
        assert!(message.contains(&format!("`{param}`")), "{uri}: {message}");
    }
    stop(system, app).await;
}

#[tokio::test]
async fn test_item_by_id_and_ownership() {
    let (system, app, cookie, items) = marketplace().await;
    // the cookie belongs to test2, the second owner
    let theirs = items[0]["id"].as_str().unwrap();
    let mine = items[1]["id"].as_str().unwrap();

    let found = send(&app, get(&format!("/api/items/{mine}"), Some(&cookie))).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body, items[1]);

    for missing in ["/api/items/item_99", "/api/items/not-an-id"] {
        let response = send(&app, get(missing, Some(&cookie))).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{missing}");
    }

    let patch = with_json(
        Method::PATCH,
        &format!("/api/items/{theirs}"),
        Some(&cookie),
        json!({ "price": 0.5 }),
    );
    assert_eq!(send(&app, patch).await.status, StatusCode::FORBIDDEN);

    let patched = send(
        &app,
        with_json(
            Method::PATCH,
            &format!("/api/items/{mine}"),
            Some(&cookie),
            json!({ "price": null, "tags": ["sale"] }),
        ),
    )
    .await;
    assert_eq!(patched.status, StatusCode::OK);
    assert_eq!(patched.body["price"], Value::Null);
    assert_eq!(patched.body["tags"], json!(["sale"]));

    let delete = |id: &str| {
        Request::builder()
            .method(Method::DELETE)
            .uri(format!("/api/items/{id}"))
            .header(COOKIE, cookie.as_str())
            .body(Body::empty())
            .unwrap()
    };
    assert_eq!(send(&app, delete(theirs)).await.status, StatusCode::FORBIDDEN);
    assert_eq!(send(&app, delete(mine)).await.status, StatusCode::NO_CONTENT);
    assert_eq!(send(&app, delete(mine)).await.status, StatusCode::NOT_FOUND);

    let own = send(&app, get("/api/profile/items", Some(&cookie))).await;
    assert_eq!(own.body, json!([]));
    stop(system, app).await;
}

#[tokio::test]
async fn test_invalid_item_is_rejected() {
    let (system, app, cookie, _) = marketplace().await;

    for body in [
        json!({ "description": "   " }),
        json!({ "description": "negative", "price": -1.0 }),
    ] {
        let response = send(&app, with_json(Method::POST, "/api/items", Some(&cookie), body)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }
    let count = send(&app, get("/api/items/count", Some(&cookie))).await;
    assert_eq!(count.body, json!(2));
    stop(system, app).await;
}

#[tokio::test]
async fn test_unreadable_bodies_get_json_errors() {
    let (system, app, cookie, items) = marketplace().await;
    let mine = items[1]["id"].as_str().unwrap();

    let missing_field = send(
        &app,
        with_json(Method::POST, "/api/items", Some(&cookie), json!({ "price": 3 })),
    )
    .await;
    assert_eq!(missing_field.status, StatusCode::UNPROCESSABLE_ENTITY);
    let message = missing_field.body["error"].as_str().unwrap();
    assert!(message.contains("description"), "{message}");

    let wrong_type = send(
        &app,
        with_json(
            Method::PATCH,
            &format!("/api/items/{mine}"),
            Some(&cookie),
            json!({ "tags": "not-a-list" }),
        ),
    )
    .await;
    assert_eq!(wrong_type.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(wrong_type.body["error"].is_string());

    let broken = Request::builder()
        .method(Method::POST)
        .uri("/api/items")
        .header(CONTENT_TYPE, "application/json")
        .header(COOKIE, cookie.as_str())
        .body(Body::from("{\"description\": "))
        .unwrap();
    let broken = send(&app, broken).await;
    assert_eq!(broken.status, StatusCode::BAD_REQUEST);
    assert!(broken.body["error"].is_string());

    let not_json = Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .body(Body::from("username=dave"))
        .unwrap();
    let not_json = send(&app, not_json).await;
    assert_eq!(not_json.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(not_json.body["error"].is_string());

    let count = send(&app, get("/api/items/count", Some(&cookie))).await;
    assert_eq!(count.body, json!(2));
    stop(system, app).await;
}

#[tokio::test]
async fn test_profile_shows_signed_in_user() {
    let system = MarketSystem::new(&BazaarConfig::default());
    let app = router(AppState::new(&system));
    let cookie = sign_up(&app, "erin").await;

    let profile = send(&app, get("/api/profile", Some(&cookie))).await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.body["username"], "erin");
    assert!(profile.body["id"].as_str().unwrap().starts_with("user_"));
    assert!(profile.body.get("password").is_none());

    let anonymous = send(&app, get("/api/profile", None)).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert!(anonymous.body["error"].is_string());
    stop(system, app).await;
}

#[tokio::test]
async fn test_register_login_and_logout() {
    let system = MarketSystem::new(&BazaarConfig::default());
    let app = router(AppState::new(&system));

    let cookie = sign_up(&app, "carol").await;

    let again = send(
        &app,
        with_json(
            Method::POST,
            "/api/users",
            None,
            json!({ "username": " carol ", "password": "other" }),
        ),
    )
    .await;
    assert_eq!(again.status, StatusCode::CONFLICT);

    let fresh = send(&app, login_request("carol", "carol-password")).await;
    assert!(fresh.set_cookie.unwrap().contains("Max-Age=86400"));

    let wrong = send(&app, login_request("carol", "guess")).await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert!(wrong.set_cookie.is_none());

    let missing = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&app, missing).await.status, StatusCode::UNAUTHORIZED);

    assert_eq!(send(&app, get("/api/items", Some(&cookie))).await.status, StatusCode::OK);

    let logout = || {
        Request::builder()
            .method(Method::POST)
            .uri("/api/auth/logout")
            .header(COOKIE, cookie.as_str())
            .body(Body::empty())
            .unwrap()
    };
    let response = send(&app, logout()).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.set_cookie.unwrap().contains("Max-Age=0"));
    assert_eq!(send(&app, logout()).await.status, StatusCode::NO_CONTENT);

    assert_eq!(
        send(&app, get("/api/items", Some(&cookie))).await.status,
        StatusCode::UNAUTHORIZED
    );
    stop(system, app).await;
}

#[tokio::test]
async fn test_sessions_expire() {
    let config = BazaarConfig {
        session_ttl_secs: 1,
        ..BazaarConfig::default()
    };
    let system = MarketSystem::new(&config);
    let app = router(AppState::new(&system));
    let cookie = sign_up(&app, "frank").await;

    assert_eq!(send(&app, get("/api/profile", Some(&cookie))).await.status, StatusCode::OK);
    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert_eq!(
        send(&app, get("/api/profile", Some(&cookie))).await.status,
        StatusCode::UNAUTHORIZED
    );

    // a new login still works after the old session was swept
    let again = send(&app, login_request("frank", "frank-password")).await;
    assert_eq!(again.status, StatusCode::OK);
    stop(system, app).await;
}

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use viewgate::config::Config;

const EXAMPLE: &str = include_str!("../config.example.toml");

fn app() -> Router {
    let config = Config::parse(EXAMPLE).expect("example config parses");
    viewgate::app(&config).expect("example config builds")
}

async fn send(method: Method, uri: &str, cookie: Option<&str>) -> Response {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }

    app().oneshot(request.body(Body::empty()).unwrap()).await.unwrap()
}

async fn body(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn example_config_loads() {
    let config = Config::parse(EXAMPLE).unwrap();
    assert_eq!(config.routes.len(), 4);
    assert_eq!(config.http.port, 3000);
}

#[tokio::test]
async fn index_renders_with_logged_out_notice() {
    let response = send(Method::GET, "/?logged-out", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body(response).await;
    assert!(html.contains("<title>home - viewgate</title>"));
    assert!(html.contains("You have been logged out."));
}

#[tokio::test]
async fn logout_then_home_round_trip() {
    let response = send(Method::GET, "/logout", Some("pvt-session=abc; other=xyz")).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/?logged-out");

    let cleared: Vec<_> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_owned())
        .collect();
    assert_eq!(cleared.len(), 1);
    assert!(cleared[0].starts_with("pvt-session="));
}

#[tokio::test]
async fn logout_honours_redirect_parameter() {
    let response = send(Method::GET, "/logout?redirect=/home", None).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/home");
}

#[tokio::test]
async fn account_requires_private_cookie() {
    let response = send(Method::GET, "/account", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login?redirect=%2Faccount");
}

#[tokio::test]
async fn account_renders_for_private_cookie_holder() {
    let response = send(
        Method::GET,
        "/account",
        Some("pvt-session=abc; pvt-user=ferris"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");

    let html = body(response).await;
    assert!(html.contains("ferris"));
    assert!(html.contains("pvt-session"));
    assert!(html.contains("href=\"/logout\""));
}

#[tokio::test]
async fn debug_view_spreads_every_local() {
    let response = send(Method::GET, "/debug/routing", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body(response).await;
    for key in ["section", "agent", "path", "now"] {
        assert!(html.contains(key), "missing {}", key);
    }
    assert!(html.contains("&quot;routing&quot;"));
    assert!(html.contains("&quot;/debug/routing&quot;"));
}

#[tokio::test]
async fn unmatched_routes_fall_through() {
    let response = send(Method::GET, "/does-not-exist", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body(response).await.is_empty());

    let response = send(Method::POST, "/does-not-exist", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json: Value = serde_json::from_str(&body(response).await).unwrap();
    assert_eq!(json, json!({ "error": "unhandled post route" }));
}

#[tokio::test]
async fn earlier_entries_keep_overlapping_paths() {
    let config = Config::parse(
        r#"
            [http]
            host = "127.0.0.1"
            port = 3000

            [[routes]]
            route = "/debug/*"
            view = "inspect"
            locals = { rest = { param = "wildcard" } }

            [[routes]]
            route = "/debug/routing"
            view = "page"
            locals = { title = "Routing" }

            [[routes]]
            route = "/:page"
            view = "inspect"
            locals = { page = { param = "page" } }

            [[routes]]
            route = "/about"
            view = "page"
            locals = { title = "About" }
        "#,
    )
    .unwrap();
    let app = viewgate::app(&config).unwrap();

    let request = Request::builder().uri("/about").body(Body::empty()).unwrap();
    let html = body(app.clone().oneshot(request).await.unwrap()).await;
    assert!(html.contains("&quot;about&quot;"));
    assert!(!html.contains("<title>About - viewgate</title>"));

    let request = Request::builder().uri("/debug/routing").body(Body::empty()).unwrap();
    let html = body(app.oneshot(request).await.unwrap()).await;
    assert!(html.contains("&quot;routing&quot;"));
    assert!(!html.contains("<title>Routing - viewgate</title>"));
}

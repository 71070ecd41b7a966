use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, test, web};
use serde_json::{Value, json};

use stormdesk::gateway::{GatewayConfig, RouteTable, proxy};

/// Upstream that echoes what it received.
async fn echo(req: HttpRequest, body: web::Bytes) -> HttpResponse {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    HttpResponse::Ok()
        .insert_header(("x-upstream", "echo"))
        .json(json!({
            "method": req.method().as_str(),
            "path": req.path(),
            "query": req.query_string(),
            "body": String::from_utf8_lossy(&body),
            "forwardedFor": header("x-forwarded-for"),
            "forwardedHost": header("x-forwarded-host"),
            "forwardedProto": header("x-forwarded-proto"),
            "custom": header("x-custom"),
            "connection": header("connection"),
        }))
}

fn start_upstream() -> u16 {
    let server = HttpServer::new(|| App::new().default_service(web::to(echo)))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind upstream");
    let port = server.addrs()[0].port();
    actix_web::rt::spawn(server.run());
    port
}

fn table_for(destination: &str) -> RouteTable {
    let config = GatewayConfig::from_toml(&format!(
        r#"
        [routes.api-route]
        cluster = "api"
        path = "/api/{{**catch-all}}"

        [clusters.api]
        destination = "{destination}"
        "#
    ))
    .expect("valid config");
    RouteTable::from_config(&config).expect("valid table")
}

macro_rules! init_gateway {
    ($table:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($table))
                .app_data(web::Data::new(reqwest::Client::new()))
                .configure(proxy::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_forwards_matching_requests() {
    let port = start_upstream();
    let app = init_gateway!(table_for(&format!("http://127.0.0.1:{port}")));

    let req = test::TestRequest::post()
        .uri("/api/products?page=2")
        .insert_header(("x-custom", "kept"))
        .insert_header(("connection", "keep-alive"))
        .insert_header(("x-forwarded-for", "10.1.1.1"))
        .peer_addr("10.2.2.2:5000".parse().expect("socket addr"))
        .set_payload("hello")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("x-upstream")
            .and_then(|value| value.to_str().ok()),
        Some("echo")
    );

    let echoed: Value = test::read_body_json(resp).await;
    assert_eq!(echoed["method"], "POST");
    assert_eq!(echoed["path"], "/api/products");
    assert_eq!(echoed["query"], "page=2");
    assert_eq!(echoed["body"], "hello");
    assert_eq!(echoed["custom"], "kept");
    assert_eq!(echoed["forwardedFor"], "10.1.1.1, 10.2.2.2");
    assert_eq!(echoed["forwardedProto"], "http");
    assert!(echoed["forwardedHost"].is_string());
    assert_ne!(echoed["connection"], "keep-alive");
}

#[actix_web::test]
async fn test_unmatched_path_is_not_found() {
    let app = init_gateway!(table_for("http://127.0.0.1:9"));

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/metrics").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_unreachable_upstream_is_bad_gateway() {
    // Port 9 (discard) is not expected to accept HTTP connections locally.
    let app = init_gateway!(table_for("http://127.0.0.1:9"));

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/products").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let problem: Value = test::read_body_json(resp).await;
    assert_eq!(problem["status"], 502);
}

#[actix_web::test]
async fn test_local_endpoints_are_not_proxied() {
    let app = init_gateway!(table_for("http://127.0.0.1:9"));

    let health: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/health").to_request(),
    )
    .await;
    assert_eq!(health["status"], "Healthy");

    let status: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(status["service"], "stormdesk-gateway");
}

//! `ReqwestTransport` against a local actix-web stub of the Kounta API.
//!
//! The stub binds an ephemeral port, so these run without any network
//! access. `live_api_smoke_test` talks to the real API and is ignored unless
//! credentials are supplied:
//!
//!   KOUNTA_CLIENT_ID=... KOUNTA_CLIENT_SECRET=... KOUNTA_REDIRECT_URL=... \
//!   KOUNTA_ACCESS_TOKEN=... cargo test --test transport_test -- --include-ignored

use std::collections::HashMap;
use std::time::Duration;

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use kounta_client::{KountaClient, KountaConfig, KountaError, ReqwestTransport, WebHook};
use serde_json::{json, Value};

const TOKEN: &str = "tok-123";

fn authorized(req: &HttpRequest) -> bool {
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        == Some(&format!("Bearer {}", TOKEN)[..])
}

async fn company(req: HttpRequest) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    HttpResponse::Ok().json(json!({"id": 44, "name": "Corner Cafe"}))
}

async fn moved_company() -> HttpResponse {
    HttpResponse::Found()
        .insert_header(("Location", "/v1/companies/me"))
        .finish()
}

async fn see_other_company(body: web::Bytes) -> HttpResponse {
    assert!(!body.is_empty(), "the original POST carried a body");
    HttpResponse::SeeOther()
        .insert_header(("Location", "/v1/companies/me"))
        .finish()
}

async fn temporary_redirect() -> HttpResponse {
    HttpResponse::TemporaryRedirect()
        .insert_header(("Location", "/echo"))
        .finish()
}

async fn permanent_redirect() -> HttpResponse {
    HttpResponse::PermanentRedirect()
        .insert_header(("Location", "/echo"))
        .finish()
}

async fn echo(req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    HttpResponse::Ok().json(json!({"method": req.method().as_str(), "body": body.into_inner()}))
}

async fn redirect_loop() -> HttpResponse {
    HttpResponse::Found()
        .insert_header(("Location", "/loop"))
        .finish()
}

async fn token(form: web::Form<HashMap<String, String>>) -> HttpResponse {
    match form.get("grant_type").map(String::as_str) {
        Some("refresh_token") if form.get("refresh_token").map(String::as_str) == Some("r-1") => {
            HttpResponse::Ok().json(json!({
                "access_token": "a-2",
                "refresh_token": "r-2",
                "expires_in": 3600,
                "token_type": "bearer"
            }))
        }
        _ => HttpResponse::BadRequest().json(json!({"error": "invalid_grant"})),
    }
}

async fn products(req: HttpRequest, query: web::Query<HashMap<String, String>>) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    match query.get("page").map(String::as_str) {
        None => {
            let next = format!(
                "http://{}/v1/companies/44/categories/9/products?page=2",
                req.connection_info().host()
            );
            HttpResponse::Ok()
                .insert_header(("X-Next-Page", next))
                .json(json!([{"id": 1, "name": "Latte"}, {"id": 2, "name": "Mocha"}]))
        }
        Some("2") => HttpResponse::Ok().json(json!([{"id": 3, "name": "Chai"}])),
        Some(_) => HttpResponse::NotFound().finish(),
    }
}

async fn create_webhook(req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    if body["topic"] == "orders/completed" && body["filter"]["site_ids"] == json!([3]) {
        HttpResponse::Created().json(json!({"id": 3901}))
    } else {
        HttpResponse::UnprocessableEntity().finish()
    }
}

/// Start the stub on an ephemeral port and return its base URL.
fn start_stub() -> String {
    let server = HttpServer::new(|| {
        App::new()
            .route("/v1/companies/me", web::get().to(company))
            .route("/old/companies/me", web::get().to(moved_company))
            .route("/post/companies/me", web::post().to(see_other_company))
            .route("/loop", web::get().to(redirect_loop))
            .route("/post/temporary", web::post().to(temporary_redirect))
            .route("/post/permanent", web::post().to(permanent_redirect))
            .route("/echo", web::post().to(echo))
            .route("/v1/token.json", web::post().to(token))
            .route(
                "/v1/companies/44/categories/9/products",
                web::get().to(products),
            )
            .route(
                "/v1/companies/44/webhooks.json",
                web::post().to(create_webhook),
            )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind the stub server");

    let addr = server.addrs()[0];
    tokio::spawn(server.run());
    format!("http://{}", addr)
}

fn stub_client(base: &str) -> KountaClient<ReqwestTransport> {
    let config = KountaConfig::new("client-1", "s3cret", "https://example.com/callback")
        .with_base_url(base)
        .with_timeout(Duration::from_secs(5));
    KountaClient::connect(config).unwrap()
}

#[tokio::test]
async fn get_sends_bearer_token() {
    let base = start_stub();
    let client = stub_client(&base);

    let company = client.company(TOKEN).await.unwrap();
    assert_eq!(company.id, 44);

    let err = client.company("wrong").await.unwrap_err();
    assert!(matches!(err, KountaError::Unauthorized(_)));
}

#[tokio::test]
async fn redirect_keeps_authorization() {
    use kounta_client::{ApiRequest, RequestBody, Transport};
    use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
    use reqwest::{Method, StatusCode, Url};

    let base = start_stub();
    let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", TOKEN)).unwrap(),
    );

    let response = transport
        .execute(ApiRequest {
            method: Method::GET,
            url: Url::parse(&format!("{}/old/companies/me", base)).unwrap(),
            headers: headers.clone(),
            body: RequestBody::Empty,
        })
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(body["name"], "Corner Cafe");

    let response = transport
        .execute(ApiRequest {
            method: Method::POST,
            url: Url::parse(&format!("{}/post/companies/me", base)).unwrap(),
            headers,
            body: RequestBody::Json(json!({"ping": true})),
        })
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn temporary_and_permanent_redirects_replay_post_body() {
    use kounta_client::{ApiRequest, RequestBody, Transport};
    use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
    use reqwest::{Method, StatusCode, Url};

    let base = start_stub();
    let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", TOKEN)).unwrap(),
    );

    for path in ["/post/temporary", "/post/permanent"] {
        let response = transport
            .execute(ApiRequest {
                method: Method::POST,
                url: Url::parse(&format!("{}{}", base, path)).unwrap(),
                headers: headers.clone(),
                body: RequestBody::Json(json!({"topic": "orders/completed"})),
            })
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::OK, "redirect from {}", path);

        let echoed: Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(echoed["method"], "POST");
        assert_eq!(echoed["body"]["topic"], "orders/completed");
    }
}

#[tokio::test]
async fn redirect_loop_gives_up() {
    use kounta_client::{ApiRequest, RequestBody, Transport};
    use reqwest::header::HeaderMap;
    use reqwest::{Method, Url};

    let base = start_stub();
    let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();

    let err = transport
        .execute(ApiRequest {
            method: Method::GET,
            url: Url::parse(&format!("{}/loop", base)).unwrap(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, KountaError::TooManyRedirects(_)));
}

#[tokio::test]
async fn refresh_token_sends_form() {
    let base = start_stub();
    let client = stub_client(&base);

    let tokens = client.refresh_token("r-1").await.unwrap();
    assert_eq!(tokens.access_token, "a-2");
    assert_eq!(tokens.token_type.as_deref(), Some("bearer"));

    let err = client.refresh_token("unknown").await.unwrap_err();
    assert!(matches!(err, KountaError::Status { .. }));
}

#[tokio::test]
async fn products_follow_next_page_header() {
    let base = start_stub();
    let client = stub_client(&base);

    let products = client.products(TOKEN, 44, 9).await.unwrap();
    assert_eq!(
        products.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec!["Latte", "Mocha", "Chai"]
    );
}

#[tokio::test]
async fn create_webhook_posts_json() {
    let base = start_stub();
    let client = stub_client(&base);

    let hook = WebHook::sale_completed("https://example.com/hooks/sale", vec![3]);
    client.create_webhook(TOKEN, 44, &hook).await.unwrap();

    let other = WebHook::sale_completed("https://example.com/hooks/sale", vec![4]);
    let err = client.create_webhook(TOKEN, 44, &other).await.unwrap_err();
    assert!(matches!(err, KountaError::Status { .. }));
}

#[tokio::test]
#[ignore = "requires Kounta credentials in the environment"]
async fn live_api_smoke_test() {
    let config = KountaConfig::from_env().expect("KOUNTA_* variables must be set");
    let token = std::env::var("KOUNTA_ACCESS_TOKEN").expect("KOUNTA_ACCESS_TOKEN must be set");
    let client = KountaClient::connect(config).unwrap();

    let company = client.company(&token).await.expect("Failed to get company");
    let sites = client.sites(&token, company.id).await.expect("Failed to get sites");
    println!("company {} has {} sites", company.name, sites.len());

    if let Some(site) = sites.first() {
        let orders = client
            .complete_orders(&token, company.id, site.id, None)
            .await
            .expect("Failed to get orders");
        for order in orders {
            println!("order {} tax {:.2}", order.id, order.total_tax());
        }
    }
}

//! End-to-end HTTP tests through the full middleware stack
//! Run: cargo test -p catalog-server --test http_api

mod common;

use axum::Router;
use axum::body::Body;
use catalog_server::{Config, ServerState};
use common::{open_db, seed_catalog};
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use shared::models::FeaturedSpecsUpdate;
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    _tmp: TempDir,
    state: ServerState,
}

impl TestApp {
    async fn new(admin_rate_limit: u32) -> Self {
        let (tmp, db) = open_db().await;
        seed_catalog(&db).await;
        let mut config = Config::with_overrides(tmp.path().to_string_lossy(), 0);
        config.admin_rate_limit = admin_rate_limit;
        let state = ServerState::new(config, db);
        Self { _tmp: tmp, state }
    }

    fn router(&self) -> Router {
        catalog_server::routes::build_app(&self.state).with_state(self.state.clone())
    }

    fn token(&self, role: &str) -> String {
        self.state
            .jwt_service
            .generate_token("user:1", "ops", role)
            .unwrap()
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.router().oneshot(req).await.unwrap();
        let status = response.status();
        assert!(response.headers().contains_key("x-request-id"));
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn admin(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-forwarded-for", "203.0.113.7");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let req = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(req).await
    }
}

const FEATURED: &str = "/api/admin/categories/graphics-cards/featured-specs";

#[tokio::test]
async fn health_reports_database() {
    let app = TestApp::new(60).await;
    let (status, body) = app.get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn listing_returns_products_pagination_and_facets() {
    let app = TestApp::new(60).await;
    let (status, body) = app
        .get("/api/products?category=graphics-cards&sort=price_asc&limit=2&spec%5Bvram%5D=8GB,12GB")
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["pagination"]["total"], 2);
    assert_eq!(body["pagination"]["pages"], 1);
    assert_eq!(body["products"][0]["slug"], "rtx-4060");
    assert_eq!(body["categoryKey"], "graphics-cards");
    assert_eq!(body["featuredMode"], "default_all");
    assert_eq!(body["featuredSpecKeys"], json!([]));
    assert!(body["facets"]["specs"]["Vram"].is_array());
    assert!(body["facets"]["price"]["min"].is_number());
}

#[tokio::test]
async fn facets_endpoint_omits_products() {
    let app = TestApp::new(60).await;
    let (status, body) = app.get("/api/products/facets?brand=amd").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert!(body.get("products").is_none());
    assert!(body.get("pagination").is_none());
    assert_eq!(body["facets"]["brands"][0]["value"], "amd");
}

#[tokio::test]
async fn invalid_listing_parameters_are_rejected() {
    let app = TestApp::new(60).await;

    let (status, body) = app.get("/api/products?minPrice=cheap").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);

    let (status, _) = app.get("/api/products?availability=sold_out").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 非法分页参数回落默认值
    let (status, body) = app.get("/api/products?page=-1&limit=abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 20);
}

#[tokio::test]
async fn admin_routes_require_admin_token() {
    let app = TestApp::new(60).await;

    let (status, body) = app.admin("GET", FEATURED, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, _) = app.admin("GET", FEATURED, Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let viewer = app.token("viewer");
    let (status, body) = app.admin("GET", FEATURED, Some(&viewer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2003);
}

#[tokio::test]
async fn featured_specs_round_trip_over_http() {
    let app = TestApp::new(60).await;
    let token = app.token("admin");

    let (status, body) = app
        .admin(
            "GET",
            "/api/admin/categories/graphics-cards/spec-keys",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["availableSpecKeys"], json!(["Chipset", "Vram", "Wattage"]));

    let (status, body) = app
        .admin(
            "PUT",
            FEATURED,
            Some(&token),
            Some(
                serde_json::to_value(FeaturedSpecsUpdate {
                    featured_spec_keys: vec!["VRAM".into(), "vram".into()],
                })
                .unwrap(),
            ),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "categoryKey": "graphics-cards",
            "featuredSpecKeys": ["Vram"],
            "mode": "restricted"
        })
    );

    // 公共列表只暴露 featured 的 spec facet
    let (_, listing) = app.get("/api/products/facets?category=graphics-cards").await;
    assert_eq!(listing["featuredMode"], "restricted");
    let spec_keys: Vec<&str> = listing["facets"]["specs"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(spec_keys, vec!["Vram"]);

    let (status, body) = app
        .admin(
            "PUT",
            FEATURED,
            Some(&token),
            Some(json!({ "featuredSpecKeys": "Vram" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "featuredSpecKeys");

    let (status, body) = app.admin("DELETE", FEATURED, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "default_all");

    let (status, body) = app.admin("DELETE", FEATURED, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6201);

    let (status, body) = app
        .admin(
            "PUT",
            "/api/admin/categories/keyboards/featured-specs",
            Some(&token),
            Some(json!({ "featuredSpecKeys": ["Switch"] })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6101);
}

#[tokio::test]
async fn admin_routes_are_rate_limited() {
    let app = TestApp::new(2).await;
    let token = app.token("admin");

    for _ in 0..2 {
        let (status, _) = app.admin("GET", FEATURED, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, body) = app.admin("GET", FEATURED, Some(&token), None).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["code"], 2101);
    assert!(body["details"]["retry_after_secs"].is_number());

    // 公共接口不受限流影响
    let (status, _) = app.get("/api/products/facets").await;
    assert_eq!(status, StatusCode::OK);
}

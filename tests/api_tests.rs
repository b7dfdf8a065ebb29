use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;
use vitrina::config::{Config, MailTransportConfig};

struct TestApp {
    router: Router,
    state: std::sync::Arc<vitrina::api::AppState>,
    outbox: std::path::PathBuf,
    _storage_dir: tempfile::TempDir,
    _mail_dir: tempfile::TempDir,
}

async fn spawn_app() -> TestApp {
    let storage_dir = tempfile::tempdir().expect("Failed to create storage dir");
    let mail_dir = tempfile::tempdir().expect("Failed to create mail dir");

    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.storage.root = storage_dir.path().to_string_lossy().to_string();
    config.mail.transport = MailTransportConfig::File {
        path: mail_dir.path().to_string_lossy().to_string(),
    };

    let state = vitrina::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");

    TestApp {
        router: vitrina::api::router(state.clone()),
        state,
        outbox: mail_dir.path().to_path_buf(),
        _storage_dir: storage_dir,
        _mail_dir: mail_dir,
    }
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn put_json(uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_json_auth(uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_auth(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

fn delete_auth(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Registers the admin account and returns a bearer token.
async fn register_admin(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/register",
            json!({
                "username": "admin",
                "email": "admin@example.com",
                "password": "super-secret-1"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    body["data"]["token"].as_str().unwrap().to_string()
}

/// Pulls the verification code out of the mail files the file transport
/// wrote.
fn code_from_outbox(outbox: &std::path::Path) -> String {
    let mut contents = String::new();
    for entry in std::fs::read_dir(outbox).unwrap() {
        let path = entry.unwrap().path();
        if path.is_file() {
            contents.push_str(&std::fs::read_to_string(&path).unwrap_or_default());
            contents.push('\n');
        }
    }

    let marker = "code is: ";
    let start = contents
        .find(marker)
        .expect("No verification code found in outbox")
        + marker.len();
    let code: String = contents[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    assert_eq!(code.len(), 6, "Expected a six digit code, got '{code}'");
    code
}

// A 1x1 transparent PNG.
const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

// A minimal PDF header, enough for the codec path.
const PDF_DATA_URI: &str = "data:application/pdf;base64,JVBERi0xLjQKJSVFT0YK";

#[tokio::test]
async fn registration_issues_token_and_locks() {
    let app = spawn_app().await;

    let token = register_admin(&app.router).await;
    assert!(!token.is_empty());

    // Second registration is rejected outright.
    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/api/auth/register",
            json!({
                "username": "intruder",
                "email": "intruder@example.com",
                "password": "another-pass-1"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn login_and_me_flow() {
    let app = spawn_app().await;
    register_admin(&app.router).await;

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            json!({"username": "admin", "password": "super-secret-1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let token = body["data"]["token"].as_str().unwrap();
    assert_eq!(body["data"]["token_type"], "Bearer");

    let response = app
        .router
        .clone()
        .oneshot(get_auth("/api/auth/me", token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["username"], "admin");
    assert_eq!(body["data"]["role"], "admin");
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let app = spawn_app().await;
    register_admin(&app.router).await;

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            json!({"username": "admin", "password": "wrong-password"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_require_token() {
    let app = spawn_app().await;

    let response = app
        .router
        .clone()
        .oneshot(get("/api/customers"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .router
        .clone()
        .oneshot(get_auth("/api/customers", "not-a-real-token"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_returns_new_token() {
    let app = spawn_app().await;
    let token = register_admin(&app.router).await;

    let response = app
        .router
        .clone()
        .oneshot(post_json_auth("/api/auth/refresh", &token, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["data"]["token"].is_string());
}

#[tokio::test]
async fn password_reset_full_lifecycle() {
    let app = spawn_app().await;
    register_admin(&app.router).await;

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/api/auth/send-code-email",
            json!({"email": "admin@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let code = code_from_outbox(&app.outbox);

    // Wrong code is unauthorized, not gone.
    let wrong = if code == "111111" { "222222" } else { "111111" };
    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/api/auth/change-password",
            json!({"email": "admin@example.com", "code": wrong, "new_password": "brand-new-pass-1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/api/auth/change-password",
            json!({"email": "admin@example.com", "code": code, "new_password": "brand-new-pass-1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The code is single use.
    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/api/auth/change-password",
            json!({"email": "admin@example.com", "code": code, "new_password": "yet-another-pass"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Old password no longer works, new one does.
    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            json!({"username": "admin", "password": "super-secret-1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            json!({"username": "admin", "password": "brand-new-pass-1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn send_code_for_unknown_email_is_not_found() {
    let app = spawn_app().await;
    register_admin(&app.router).await;

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/api/auth/send-code-email",
            json!({"email": "nobody@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn change_password_rejects_expired_code() {
    let app = spawn_app().await;
    register_admin(&app.router).await;

    // Seed a code whose expiry has already passed.
    let stale = (chrono::Utc::now() - chrono::Duration::minutes(1)).to_rfc3339();
    app.state
        .store
        .set_reset_code("admin@example.com", "123456", &stale)
        .await
        .unwrap();

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/api/auth/change-password",
            json!({"email": "admin@example.com", "code": "123456", "new_password": "brand-new-pass-1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::GONE);

    // Expiry does not consume the code; it stays stored until replaced.
    let user = app
        .state
        .store
        .get_user_by_email("admin@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.password_reset_code.as_deref(), Some("123456"));
}

#[tokio::test]
async fn register_validates_input() {
    let app = spawn_app().await;

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/api/auth/register",
            json!({"username": "admin", "email": "not-an-email", "password": "super-secret-1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/api/auth/register",
            json!({"username": "admin", "email": "admin@example.com", "password": "short"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn customer_lead_capture_and_admin_listing() {
    let app = spawn_app().await;
    let token = register_admin(&app.router).await;

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/api/customers",
            json!({
                "name": "Maria",
                "lastname": "Quispe",
                "cellphone": "999888777",
                "district": "Miraflores",
                "email": "maria@example.com",
                "message": "Interested in industrial valves"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["active"], true);
    let customer_id = body["data"]["id"].as_i64().unwrap();

    let response = app
        .router
        .clone()
        .oneshot(get_auth("/api/customers", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let response = app
        .router
        .clone()
        .oneshot(put_json(
            &format!("/api/customers/{customer_id}/active"),
            &token,
            json!({"active": false}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["active"], false);
}

#[tokio::test]
async fn category_and_subcategory_crud() {
    let app = spawn_app().await;
    let token = register_admin(&app.router).await;

    let response = app
        .router
        .clone()
        .oneshot(post_json_auth(
            "/api/categories",
            &token,
            json!({"name": "Valves"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let category_id = body["data"]["id"].as_i64().unwrap();

    // Duplicate names conflict.
    let response = app
        .router
        .clone()
        .oneshot(post_json_auth(
            "/api/categories",
            &token,
            json!({"name": "Valves"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .router
        .clone()
        .oneshot(post_json_auth(
            &format!("/api/categories/{category_id}/subcategories"),
            &token,
            json!({"name": "Ball valves"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Listing is public.
    let response = app
        .router
        .clone()
        .oneshot(get(&format!("/api/categories/{category_id}/subcategories")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["name"], "Ball valves");

    let response = app
        .router
        .clone()
        .oneshot(delete_auth("/api/subcategories/Ball%20valves", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn product_lifecycle_with_media() {
    let app = spawn_app().await;
    let token = register_admin(&app.router).await;

    // Category + subcategory for the product to hang off.
    let response = app
        .router
        .clone()
        .oneshot(post_json_auth(
            "/api/categories",
            &token,
            json!({"name": "Pumps"}),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    let category_id = body["data"]["id"].as_i64().unwrap();

    app.router
        .clone()
        .oneshot(post_json_auth(
            &format!("/api/categories/{category_id}/subcategories"),
            &token,
            json!({"name": "Centrifugal"}),
        ))
        .await
        .unwrap();

    let response = app
        .router
        .clone()
        .oneshot(post_json_auth(
            "/api/products",
            &token,
            json!({
                "name": "HydroMax 3000",
                "characteristics": "Stainless steel housing",
                "benefits": ["Low maintenance", "Energy efficient"],
                "compatibility": "Industrial piping",
                "use_case": "Water treatment plants",
                "price": 1499.99,
                "stock": 12,
                "subcategories": ["Centrifugal"],
                "images": [PNG_DATA_URI]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let product_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["benefits"][0], "Low maintenance");
    assert_eq!(body["data"]["subcategories"][0], "Centrifugal");
    let image_url = body["data"]["images"][0].as_str().unwrap();
    assert!(image_url.contains("/storage/products/"));
    assert!(image_url.ends_with(".png"));

    // Duplicate names conflict.
    let response = app
        .router
        .clone()
        .oneshot(post_json_auth(
            "/api/products",
            &token,
            json!({
                "name": "HydroMax 3000",
                "characteristics": "dup",
                "compatibility": "dup",
                "price": 1.0,
                "stock": 1
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Public detail fetch by name.
    let response = app
        .router
        .clone()
        .oneshot(get("/api/products/HydroMax%203000"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Partial update.
    let response = app
        .router
        .clone()
        .oneshot(put_json(
            &format!("/api/products/{product_id}"),
            &token,
            json!({"price": 1299.0, "status": false}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["price"], 1299.0);
    assert_eq!(body["data"]["status"], false);

    let response = app
        .router
        .clone()
        .oneshot(delete_auth(&format!("/api/products/{product_id}"), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .router
        .clone()
        .oneshot(get("/api/products/HydroMax%203000"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_create_persists_pdf_reference() {
    let app = spawn_app().await;
    let token = register_admin(&app.router).await;

    let response = app
        .router
        .clone()
        .oneshot(post_json_auth(
            "/api/products",
            &token,
            json!({
                "name": "AquaSeal 200",
                "characteristics": "Two component sealant",
                "compatibility": "PVC piping",
                "price": 24.5,
                "stock": 40,
                "pdf": PDF_DATA_URI
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let pdf_url = body["data"]["pdf_url"].as_str().unwrap();
    assert!(pdf_url.contains("/storage/pdfs/"));
    assert!(pdf_url.ends_with(".pdf"));

    // The stored row carries the reference, not just the create response.
    let response = app
        .router
        .clone()
        .oneshot(get("/api/products/AquaSeal%20200"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["pdf_url"].as_str(), Some(pdf_url));
}

#[tokio::test]
async fn product_rejects_malformed_media() {
    let app = spawn_app().await;
    let token = register_admin(&app.router).await;

    let response = app
        .router
        .clone()
        .oneshot(post_json_auth(
            "/api/products",
            &token,
            json!({
                "name": "BadMedia",
                "characteristics": "x",
                "compatibility": "x",
                "price": 1.0,
                "stock": 1,
                "images": ["data:image/tiff;base64,aGVsbG8="]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn about_us_singleton_and_values() {
    let app = spawn_app().await;
    let token = register_admin(&app.router).await;

    // Seeded row is readable without auth.
    let response = app.router.clone().oneshot(get("/api/about-us")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .router
        .clone()
        .oneshot(put_json(
            "/api/about-us",
            &token,
            json!({"mission": "Serve industry", "vision": "Lead the region"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["mission"], "Serve industry");

    let response = app
        .router
        .clone()
        .oneshot(post_json_auth(
            "/api/about-us/values",
            &token,
            json!({"value": "Integrity"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .router
        .clone()
        .oneshot(put_json(
            "/api/about-us/values/0",
            &token,
            json!({"value": "Honesty"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"][0], "Honesty");

    let response = app
        .router
        .clone()
        .oneshot(delete_auth("/api/about-us/values/5", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn question_crud_smoke() {
    let app = spawn_app().await;
    let token = register_admin(&app.router).await;

    let response = app
        .router
        .clone()
        .oneshot(post_json_auth(
            "/api/questions",
            &token,
            json!({"question": "Do you ship nationwide?", "answer": "Yes."}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let response = app.router.clone().oneshot(get("/api/questions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .router
        .clone()
        .oneshot(put_json(
            &format!("/api/questions/{id}"),
            &token,
            json!({"answer": "Yes, within 48 hours."}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .router
        .clone()
        .oneshot(delete_auth(&format!("/api/questions/{id}"), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn testimonial_rating_is_validated() {
    let app = spawn_app().await;
    let token = register_admin(&app.router).await;

    let response = app
        .router
        .clone()
        .oneshot(post_json_auth(
            "/api/testimonials",
            &token,
            json!({
                "customer_name": "Jorge",
                "description": "Great service",
                "date": "2026-08-01",
                "rating": 9
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn info_contact_singleton_update() {
    let app = spawn_app().await;
    let token = register_admin(&app.router).await;

    let response = app
        .router
        .clone()
        .oneshot(get("/api/info-contact"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .router
        .clone()
        .oneshot(put_json(
            "/api/info-contact",
            &token,
            json!({"cellphone": "+51 999 111 222", "email": "sales@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["cellphone"], "+51 999 111 222");
}

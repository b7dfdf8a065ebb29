use axum::{
    Json, Router,
    extract::State,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::{JwtManager, Mailer, MediaStore, PasswordResetService, SeaOrmPasswordResetService};

mod about_us;
pub mod auth;
mod blogs;
mod categories;
mod customers;
mod error;
mod info_contact;
mod policies;
mod products;
mod promotions;
mod questions;
mod services;
mod testimonials;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,

    pub config: Config,

    pub media: Arc<MediaStore>,

    pub jwt: Arc<JwtManager>,

    pub password_reset: Arc<dyn PasswordResetService>,
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let media = Arc::new(MediaStore::new(
        &config.storage.root,
        &config.storage_public_base(),
    ));

    let jwt = Arc::new(JwtManager::new(
        config.auth.jwt_secret.as_bytes(),
        config.auth.token_ttl_minutes,
    ));

    let mailer = Arc::new(Mailer::new(&config.mail)?);

    let password_reset: Arc<dyn PasswordResetService> =
        Arc::new(SeaOrmPasswordResetService::new(store.clone(), mailer));

    Ok(Arc::new(AppState {
        store,
        config,
        media,
        jwt,
        password_reset,
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();
    let storage_root = state.config.storage.root.clone();

    let admin_routes = create_admin_router(state.clone());
    let protected_routes = create_protected_router(state.clone());

    let api_router = Router::new()
        .merge(admin_routes)
        .merge(protected_routes)
        .route("/health", get(health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/send-code-email", post(auth::send_code_email))
        .route("/auth/change-password", post(auth::change_password))
        .route("/products", get(products::list_products))
        .route("/products/{id}", get(products::get_product))
        .route("/blogs", get(blogs::list_blogs))
        .route("/blogs/{id}", get(blogs::get_blog))
        .route("/categories", get(categories::list_categories))
        .route(
            "/categories/{id}/subcategories",
            get(categories::list_subcategories),
        )
        .route("/categories/{id}/blogs", get(blogs::list_blogs_for_category))
        .route("/services", get(services::list_services))
        .route("/services/{id}", get(services::get_service))
        .route("/testimonials", get(testimonials::list_testimonials))
        .route("/testimonials/{id}", get(testimonials::get_testimonial))
        .route("/policies", get(policies::list_policies))
        .route("/policies/{id}", get(policies::get_policy))
        .route("/about-us", get(about_us::get_about_us))
        .route("/about-us-home", get(about_us::get_about_us_home))
        .route("/info-contact", get(info_contact::get_info_contact))
        .route("/questions", get(questions::list_questions))
        .route("/customers", post(customers::create_customer))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .nest_service(
            "/storage",
            tower_http::services::ServeDir::new(storage_root),
        )
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    state.store.ping().await?;
    Ok(Json(ApiResponse::success(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))))
}

/// Routes that only need a valid token.
fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/me", get(auth::get_current_user))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}

/// Mutation routes, restricted to the admin role.
fn create_admin_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/products", post(products::create_product))
        .route("/products/{id}", put(products::update_product))
        .route("/products/{id}/pdf", put(products::update_product_pdf))
        .route("/products/{id}", delete(products::delete_product))
        .route("/blogs", post(blogs::create_blog))
        .route("/blogs/{id}", put(blogs::update_blog))
        .route("/blogs/{id}", delete(blogs::delete_blog))
        .route("/categories", post(categories::create_category))
        .route("/categories/{id}", put(categories::update_category))
        .route("/categories/{id}", delete(categories::delete_category))
        .route(
            "/categories/{id}/subcategories",
            post(categories::create_subcategory),
        )
        .route(
            "/subcategories/{name}",
            delete(categories::delete_subcategory),
        )
        .route("/promotions", get(promotions::list_promotions))
        .route("/promotions/{id}", get(promotions::get_promotion))
        .route("/promotions", post(promotions::create_promotion))
        .route("/promotions/{id}", put(promotions::update_promotion))
        .route("/promotions/{id}", delete(promotions::delete_promotion))
        .route("/services", post(services::create_service))
        .route("/services/{id}", put(services::update_service))
        .route("/services/{id}", delete(services::delete_service))
        .route("/testimonials", post(testimonials::create_testimonial))
        .route("/testimonials/{id}", put(testimonials::update_testimonial))
        .route(
            "/testimonials/{id}",
            delete(testimonials::delete_testimonial),
        )
        .route("/policies", post(policies::create_policy))
        .route("/policies/{id}", put(policies::update_policy))
        .route("/policies/{id}", delete(policies::delete_policy))
        .route("/questions", post(questions::create_question))
        .route("/questions/{id}", put(questions::update_question))
        .route("/questions/{id}", delete(questions::delete_question))
        .route("/customers", get(customers::list_customers))
        .route("/customers/{id}", get(customers::get_customer))
        .route("/customers/{id}/active", put(customers::set_customer_active))
        .route("/customers/{id}", delete(customers::delete_customer))
        .route("/about-us", put(about_us::update_about_us))
        .route("/about-us/values", post(about_us::add_value))
        .route("/about-us/values/{index}", put(about_us::update_value))
        .route("/about-us/values/{index}", delete(about_us::delete_value))
        .route("/about-us/image", put(about_us::update_about_us_image))
        .route("/about-us-home", put(about_us::update_about_us_home))
        .route("/info-contact", put(info_contact::update_info_contact))
        .layer(middleware::from_fn(auth::require_admin))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}

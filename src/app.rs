use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    handler::Handler,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::database::Store;
use crate::handlers::{cats, dogs, health, pages};
use crate::views::ViewRenderer;

/// Per-process dependencies handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub views: Arc<ViewRenderer>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, views: ViewRenderer) -> Self {
        Self {
            store,
            views: Arc::new(views),
        }
    }
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        .merge(page_routes())
        .merge(cat_routes())
        .merge(dog_routes())
        .route("/health", get(health::health));

    // Missing assets get the same rendered 404 page as unknown routes
    if let Some(dir) = &config.views.static_dir {
        let assets = ServeDir::new(dir).not_found_service(pages::not_found.with_state(state.clone()));
        router = router.nest_service("/public", assets);
    }

    let mut router = router
        .fallback(pages::not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/page1", get(pages::page1))
        .route("/page2", get(pages::page2))
        .route("/page3", get(pages::page3))
        .route("/page4", get(pages::page4))
}

fn cat_routes() -> Router<AppState> {
    Router::new()
        .route("/getName", get(cats::get_name))
        .route("/setName", post(cats::set_name))
        .route("/searchName", get(cats::search_name))
        .route("/updateLast", post(cats::update_last))
}

fn dog_routes() -> Router<AppState> {
    Router::new()
        .route("/setDogName", post(dogs::set_dog_name))
        .route("/searchDogName", post(dogs::search_dog_name))
}

/// Permissive when no origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    }
}

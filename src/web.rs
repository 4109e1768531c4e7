//! Web server for the outfit roulette front end
//!
//! Provides REST API endpoints for the catalog, outfit rolls, slot re-rolls,
//! share messages and the hosted image listing.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::catalog::CatalogLoad;
use crate::formatters::{format_share_message, share_url};
use crate::image_host::{ImageHostClient, ImageListing, DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::models::{
    Category, CategoryIndex, SelectedOutfit, BUDGET_STEP, DEFAULT_BUDGET, MAX_BUDGET, MIN_BUDGET,
};
use crate::selector::{select_slot, SlotResult};
use crate::session::OutfitSession;

/// Shared application state (read-only catalog + optional image host client)
#[derive(Clone)]
struct AppState {
    index: Arc<CategoryIndex>,
    stats: Arc<CatalogStats>,
    image_host: Option<Arc<ImageHostClient>>,
}

/// Summary of the loaded catalog, reported by the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub source: String,
    pub items: usize,
    pub counts: BTreeMap<Category, usize>,
    pub warnings: usize,
    pub dropped_rows: usize,
    pub loaded_at: String,
    pub min_budget: u64,
    pub max_budget: u64,
    pub budget_step: u64,
    pub default_budget: u64,
}

impl CatalogStats {
    pub fn new(source: impl Into<String>, load: &CatalogLoad) -> Self {
        Self {
            source: source.into(),
            items: load.index.len(),
            counts: load.index.counts(),
            warnings: load.warnings.len(),
            dropped_rows: load.dropped_rows(),
            loaded_at: chrono::Utc::now().to_rfc3339(),
            min_budget: MIN_BUDGET,
            max_budget: MAX_BUDGET,
            budget_step: BUDGET_STEP,
            default_budget: DEFAULT_BUDGET,
        }
    }
}

/// Budget query parameter; negative values are treated as zero
#[derive(Deserialize)]
struct BudgetParams {
    #[serde(default = "default_budget")]
    budget: i64,
}

fn default_budget() -> i64 {
    DEFAULT_BUDGET as i64
}

impl BudgetParams {
    fn budget(&self) -> u64 {
        self.budget.max(0) as u64
    }
}

/// Image listing pagination, passed through to the host
#[derive(Deserialize)]
struct ImageParams {
    page: Option<u32>,
    limit: Option<u32>,
}

/// API response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// A freshly rolled outfit
#[derive(Serialize)]
struct OutfitData {
    budget: u64,
    outfit: SelectedOutfit,
    total: u64,
}

/// Result of re-rolling one slot
#[derive(Serialize)]
struct SlotData {
    category: Category,
    budget: u64,
    #[serde(flatten)]
    result: SlotResult,
}

/// Share message and link for an outfit
#[derive(Serialize)]
struct ShareData {
    message: String,
    share_url: String,
    total: u64,
}

/// Image listing in the host's page shape: `{ success, images, next, previous, total }`
#[derive(Serialize)]
struct ImagesResponse {
    success: bool,
    #[serde(flatten)]
    listing: Option<ImageListing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn roll_outfit(index: Arc<CategoryIndex>, budget: u64) -> OutfitData {
    let mut session = OutfitSession::new(index, budget);
    let mut rng = rand::thread_rng();
    let outfit = session.reroll_all(&mut rng).clone();
    OutfitData {
        budget,
        total: outfit.total_price(),
        outfit,
    }
}

fn roll_slot(index: &CategoryIndex, category: Category, budget: u64) -> SlotResult {
    let mut rng = rand::thread_rng();
    select_slot(index, category, budget, &mut rng)
}

/// GET /api/outfitItems - the full category index
async fn outfit_items_handler(State(state): State<AppState>) -> Json<CategoryIndex> {
    Json(state.index.as_ref().clone())
}

/// GET /api/outfit?budget={budget}
async fn outfit_handler(
    State(state): State<AppState>,
    Query(params): Query<BudgetParams>,
) -> Json<ApiResponse<OutfitData>> {
    let data = roll_outfit(Arc::clone(&state.index), params.budget());
    log::debug!(
        "Rolled outfit: {} slots, total {} of {}",
        data.outfit.len(),
        data.total,
        data.budget
    );
    Json(ApiResponse::ok(data))
}

/// GET /api/outfit/{category}?budget={budget}
async fn slot_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(params): Query<BudgetParams>,
) -> Result<Json<ApiResponse<SlotData>>, StatusCode> {
    let Some(category) = Category::parse(&category) else {
        log::warn!("Slot re-roll for unknown category: {}", category);
        return Err(StatusCode::NOT_FOUND);
    };

    let budget = params.budget();
    let result = roll_slot(&state.index, category, budget);
    Ok(Json(ApiResponse::ok(SlotData {
        category,
        budget,
        result,
    })))
}

/// POST /api/share - share message for the posted outfit
async fn share_handler(Json(posted): Json<SelectedOutfit>) -> Json<ApiResponse<ShareData>> {
    // Slot keys come from the client; file each item under its own type.
    let outfit: SelectedOutfit = posted.iter().map(|(_, item)| item.clone()).collect();
    let message = format_share_message(&outfit);
    Json(ApiResponse::ok(ShareData {
        share_url: share_url(&message),
        total: outfit.total_price(),
        message,
    }))
}

/// GET /api/images?page={page}&limit={limit}
async fn images_handler(State(state): State<AppState>, Query(params): Query<ImageParams>) -> Response {
    let Some(client) = state.image_host.as_ref() else {
        let body = ImagesResponse {
            success: false,
            listing: None,
            error: Some("Image host not configured".to_string()),
        };
        return (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response();
    };

    let page = params.page.unwrap_or(DEFAULT_PAGE);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);

    match client.list_files(page, limit).await {
        Ok(listing) => Json(ImagesResponse {
            success: true,
            listing: Some(listing),
            error: None,
        })
        .into_response(),
        Err(e) => {
            log::error!("Error fetching images: {}", e);
            let body = ImagesResponse {
                success: false,
                listing: None,
                error: Some("Failed to fetch images".to_string()),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

/// GET /api/health - catalog summary and budget bounds
async fn health_handler(State(state): State<AppState>) -> Json<ApiResponse<CatalogStats>> {
    Json(ApiResponse::ok(state.stats.as_ref().clone()))
}

/// Fallback for unmatched API routes
async fn not_found_handler() -> (StatusCode, Json<ApiResponse<()>>) {
    (StatusCode::NOT_FOUND, Json(ApiResponse::err("Not found")))
}

/// Build the web server router
pub fn create_router(
    index: Arc<CategoryIndex>,
    stats: CatalogStats,
    image_host: Option<ImageHostClient>,
) -> Router {
    let state = AppState {
        index,
        stats: Arc::new(stats),
        image_host: image_host.map(Arc::new),
    };

    Router::new()
        .route("/api/outfitItems", get(outfit_items_handler))
        .route("/api/outfit", get(outfit_handler))
        .route("/api/outfit/{category}", get(slot_handler))
        .route("/api/share", post(share_handler))
        .route("/api/images", get(images_handler))
        .route("/api/health", get(health_handler))
        .fallback(not_found_handler)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Resolves when the process receives Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}

/// Start the web server (async)
///
/// Binds to 0.0.0.0 (all interfaces) to work with Docker port mapping.
pub async fn serve(
    index: Arc<CategoryIndex>,
    stats: CatalogStats,
    image_host: Option<ImageHostClient>,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(index, stats, image_host);
    let addr = format!("0.0.0.0:{}", port);

    log::info!("Web API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_params_default() {
        let params: BudgetParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.budget(), 10_000);
    }

    #[test]
    fn test_budget_params_clamps_negative() {
        let params = BudgetParams { budget: -500 };
        assert_eq!(params.budget(), 0);
    }

    #[test]
    fn test_api_response_error_serialization() {
        let response: ApiResponse<()> = ApiResponse::err("Test error");

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("\"error\":\"Test error\""));
        // data should be omitted when None
        assert!(!json.contains("\"data\""));
    }

    #[test]
    fn test_slot_data_flattens_result() {
        let data = SlotData {
            category: Category::Footwear,
            budget: 5000,
            result: SlotResult::NoEligibleItem,
        };

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["category"], "footwear");
        assert_eq!(json["status"], "no_eligible_item");
        assert!(json.get("item").is_none());
    }

    #[test]
    fn test_images_response_matches_host_page_shape() {
        let body = ImagesResponse {
            success: true,
            listing: Some(ImageListing {
                images: vec![],
                next: None,
                previous: None,
                total: 0,
            }),
            error: None,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], true);
        assert!(json["images"].as_array().unwrap().is_empty());
        assert_eq!(json["total"], 0);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_catalog_stats_counts() {
        let load = crate::catalog::load_from_reader(
            "inline",
            "apparel name,item-price,type\ncap,500,headgear\nbag,100,accessory\n".as_bytes(),
        )
        .unwrap();
        let stats = CatalogStats::new("inline", &load);

        assert_eq!(stats.items, 1);
        assert_eq!(stats.counts[&Category::Headgear], 1);
        assert_eq!(stats.dropped_rows, 1);
        assert_eq!(stats.max_budget, 50_000);
    }
}

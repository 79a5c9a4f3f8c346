//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::compare::{compare, locate, Comparison, PinQuery, RouteSummary};
use crate::coord::{Coordinates, MapFrame};
use crate::error::Error;
use crate::format::available_formats;
use crate::format::svg::render_scene;
use crate::format::FormatInfo;
use crate::geo::GeoBackend;
use crate::lookup::PinResolver;
use crate::overlay::MapScene;
use crate::pin::{LocationPin, PinRole, PlacedPin};
use crate::server::state::AppState;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Create the API router
pub fn create_router<G, R>(state: Arc<AppState<G, R>>) -> Router
where
    G: GeoBackend + 'static,
    R: PinResolver + 'static,
{
    Router::new()
        .route("/api/status", get(status_handler::<G, R>))
        .route("/api/formats", get(formats_handler))
        .route("/api/route", get(route_handler))
        .route("/api/compare", post(compare_handler::<G, R>))
        .route("/api/board", get(board_handler::<G, R>))
        .route("/api/board/map.svg", get(map_handler::<G, R>))
        .route(
            "/api/board/:role",
            put(place_handler::<G, R>).delete(clear_handler::<G, R>),
        )
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn new(code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
        }
    }

    fn not_found(query: &str) -> Self {
        Self::new("NOT_FOUND", format!("Location not found: {}", query.trim()))
    }

    fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "GEOCODING_ERROR" | "LOOKUP_ERROR" | "HTTP_ERROR" => StatusCode::BAD_GATEWAY,
            "INTERNAL_ERROR" => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Geocoding(_) => "GEOCODING_ERROR",
            Error::Lookup(_) => "LOOKUP_ERROR",
            Error::Http(_) => "HTTP_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError::new(code, err.to_string())
    }
}

fn parse_role(role: &str) -> Result<PinRole, ApiError> {
    PinRole::from_str(role).map_err(|e| ApiError::new("INVALID_ROLE", e))
}

/// A pin in a request body: a place name, or explicit coordinates
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PinRequest {
    /// Place name to geocode
    pub query: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Display name for explicit coordinates
    pub name: Option<String>,
}

impl TryFrom<PinRequest> for PinQuery {
    type Error = ApiError;

    fn try_from(req: PinRequest) -> Result<Self, Self::Error> {
        match (req.lat, req.lng, req.query) {
            (Some(lat), Some(lng), _) => Ok(PinQuery::At(Coordinates::new(lat, lng), req.name)),
            (None, None, Some(query)) if !query.trim().is_empty() => Ok(PinQuery::Search(query)),
            _ => Err(ApiError::new(
                "INVALID_REQUEST",
                "Pin needs either a non-empty query or both lat and lng",
            )),
        }
    }
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Country, currency and weather lookups are configured
    pub lookups_enabled: bool,
    /// Number of pins on the board
    pub pins: usize,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler<G, R>(State(state): State<Arc<AppState<G, R>>>) -> Json<StatusResponse>
where
    G: GeoBackend,
    R: PinResolver,
{
    let board = state.board().await;
    let pins = [PinRole::Source, PinRole::Target]
        .into_iter()
        .filter(|role| board.get(*role).is_some())
        .count();

    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        lookups_enabled: state.lookups_enabled(),
        pins,
        uptime_secs: state.uptime_secs(),
    })
}

/// Formats list response
#[derive(Debug, Serialize, Deserialize)]
pub struct FormatsResponse {
    pub formats: Vec<FormatInfo>,
}

/// List available output formats
///
/// GET /api/formats
async fn formats_handler() -> Json<FormatsResponse> {
    Json(FormatsResponse {
        formats: available_formats(),
    })
}

/// Route query parameters, each "lat,lng"
#[derive(Debug, Deserialize)]
pub struct RouteParams {
    pub from: String,
    pub to: String,
}

/// Distance, midpoint and zoom between two coordinates
///
/// GET /api/route?from=lat,lng&to=lat,lng
async fn route_handler(Query(params): Query<RouteParams>) -> Result<Json<RouteSummary>, ApiError> {
    let from = Coordinates::from_str(&params.from)?;
    let to = Coordinates::from_str(&params.to)?;
    Ok(Json(RouteSummary::between(from, to)))
}

/// Compare request body
#[derive(Debug, Default, Deserialize)]
pub struct CompareRequest {
    pub source: Option<PinRequest>,
    pub target: Option<PinRequest>,
}

/// One-shot comparison that leaves the board untouched
///
/// POST /api/compare
async fn compare_handler<G, R>(
    State(state): State<Arc<AppState<G, R>>>,
    Json(req): Json<CompareRequest>,
) -> Result<Json<Comparison>, ApiError>
where
    G: GeoBackend,
    R: PinResolver,
{
    let source = req.source.map(PinQuery::try_from).transpose()?;
    let target = req.target.map(PinQuery::try_from).transpose()?;

    let comparison = compare(
        state.geocoder(),
        state.resolver(),
        source.as_ref(),
        target.as_ref(),
    )
    .await?;

    for (query, pin) in [(&source, &comparison.source), (&target, &comparison.target)] {
        if let (Some(PinQuery::Search(text)), None) = (query, pin) {
            return Err(ApiError::not_found(text));
        }
    }

    Ok(Json(comparison))
}

/// Board response
#[derive(Debug, Serialize, Deserialize)]
pub struct BoardResponse {
    pub source: Option<PlacedPin>,
    pub target: Option<PlacedPin>,
    /// Present only when both pins are set
    pub route: Option<RouteSummary>,
    pub frame: MapFrame,
}

/// Current pins with their route and camera frame
///
/// GET /api/board
async fn board_handler<G, R>(State(state): State<Arc<AppState<G, R>>>) -> Json<BoardResponse>
where
    G: GeoBackend,
    R: PinResolver,
{
    let board = state.board().await;
    let placed = |role: PinRole| {
        board.get(role).cloned().zip(board.revision(role)).map(|(pin, revision)| PlacedPin {
            revision,
            pin,
        })
    };

    let route = match (board.get(PinRole::Source), board.get(PinRole::Target)) {
        (Some(a), Some(b)) => Some(RouteSummary::between(a.coords, b.coords)),
        _ => None,
    };

    Json(BoardResponse {
        source: placed(PinRole::Source),
        target: placed(PinRole::Target),
        route,
        frame: board.frame(),
    })
}

/// Search for a place (or take explicit coordinates) and pin it
///
/// PUT /api/board/:role
async fn place_handler<G, R>(
    State(state): State<Arc<AppState<G, R>>>,
    Path(role): Path<String>,
    Json(req): Json<PinRequest>,
) -> Result<Json<LocationPin>, ApiError>
where
    G: GeoBackend,
    R: PinResolver,
{
    let role = parse_role(&role)?;
    let query = PinQuery::try_from(req)?;

    let Some(pin) = locate(state.geocoder(), &query).await? else {
        let PinQuery::Search(text) = &query else {
            return Err(ApiError::new("INTERNAL_ERROR", "Coordinates produced no pin"));
        };
        return Err(ApiError::not_found(text));
    };

    let placed = state
        .place(role, pin)
        .await
        .ok_or_else(|| ApiError::new("NOT_FOUND", format!("The {} pin was removed", role)))?;

    Ok(Json(placed))
}

/// Remove a pin
///
/// DELETE /api/board/:role
async fn clear_handler<G, R>(
    State(state): State<Arc<AppState<G, R>>>,
    Path(role): Path<String>,
) -> Result<StatusCode, ApiError>
where
    G: GeoBackend,
    R: PinResolver,
{
    let role = parse_role(&role)?;
    match state.clear(role).await {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError::new("NOT_FOUND", format!("No {} pin placed", role))),
    }
}

/// The board drawn as an SVG overlay
///
/// GET /api/board/map.svg
async fn map_handler<G, R>(State(state): State<Arc<AppState<G, R>>>) -> impl IntoResponse
where
    G: GeoBackend,
    R: PinResolver,
{
    let scene = MapScene::from_board(&state.board().await);
    let svg = render_scene(&scene, &state.config);
    ([(header::CONTENT_TYPE, "image/svg+xml")], svg)
}

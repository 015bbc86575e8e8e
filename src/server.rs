use std::{
    net::SocketAddr,
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{
    network::{Connection, Network, Station, StationId, TotalMinutes},
    search::{Mode, NO_ROUTE, describe_route, find_route},
    trips::{Demand, TripRecord, generate_trips},
};

const MAX_TRIPS: usize = 1000;

type ApiError = (StatusCode, String);

/// Routes saved by users, kept for the lifetime of the server.
#[derive(Debug, Default)]
pub struct Favorites(Vec<String>);

impl Favorites {
    /// Returns false when the route was already saved.
    pub fn add(&mut self, route: String) -> bool {
        if self.0.contains(&route) {
            return false;
        }
        self.0.push(route);
        true
    }

    pub fn list(&self) -> &[String] {
        &self.0
    }
}

#[derive(Clone)]
pub struct AppState {
    network: Arc<Network>,
    demand: Arc<Demand>,
    favorites: Arc<Mutex<Favorites>>,
}

impl AppState {
    pub fn new(network: Network, demand: Demand) -> Self {
        Self {
            network: Arc::new(network),
            demand: Arc::new(demand),
            favorites: Default::default(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationView {
    pub id: StationId,
    pub name: String,
    pub line: String,
}

impl From<&Station> for StationView {
    fn from(s: &Station) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            line: s.line.clone(),
        }
    }
}

#[derive(Deserialize)]
pub struct RouteQuery {
    pub from: String,
    pub to: String,
    #[serde(default = "default_mode")]
    pub mode: Mode,
}

fn default_mode() -> Mode {
    Mode::Fastest
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteView {
    pub mode: Mode,
    pub stations: Vec<StationView>,
    pub minutes: Option<TotalMinutes>,
    pub description: String,
}

#[derive(Deserialize)]
pub struct TripsQuery {
    pub count: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripsView {
    pub seed: u64,
    pub trips: Vec<TripRecord>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/stations", get(stations))
        .route("/edges", get(edges))
        .route("/route", get(route))
        .route("/trips", get(trips))
        .route("/favorites", get(favorites).post(add_favorite))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Serving routes");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

pub async fn stations(State(state): State<AppState>) -> Json<Vec<StationView>> {
    Json(state.network.stations().map(StationView::from).collect())
}

pub async fn edges(State(state): State<AppState>) -> Json<Vec<Connection>> {
    Json(state.network.edges().cloned().collect())
}

pub async fn route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RouteView>, ApiError> {
    let network = &state.network;
    let not_found = |e: crate::error::NetworkError| (StatusCode::NOT_FOUND, e.to_string());
    let from = network.resolve(&query.from).map_err(not_found)?;
    let to = network.resolve(&query.to).map_err(not_found)?;

    let route = find_route(network, query.mode, from.id.as_str(), to.id.as_str())
        .ok_or_else(|| (StatusCode::NOT_FOUND, NO_ROUTE.to_owned()))?;

    Ok(Json(RouteView {
        mode: route.mode,
        stations: route
            .path
            .stations()
            .iter()
            .filter_map(|id| network.get(id.as_str()))
            .map(StationView::from)
            .collect(),
        minutes: route.minutes,
        description: describe_route(network, &route),
    }))
}

pub async fn trips(
    State(state): State<AppState>,
    Query(query): Query<TripsQuery>,
) -> Result<Json<TripsView>, ApiError> {
    let count = query.count.unwrap_or(10);
    if count > MAX_TRIPS {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("count must be at most {MAX_TRIPS}"),
        ));
    }

    let seed = query.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let trips = generate_trips(&state.network, &state.demand, count, &mut rng);

    Ok(Json(TripsView { seed, trips }))
}

pub async fn favorites(State(state): State<AppState>) -> Json<Vec<String>> {
    let favorites = state.favorites.lock().unwrap_or_else(PoisonError::into_inner);
    Json(favorites.list().to_vec())
}

pub async fn add_favorite(
    State(state): State<AppState>,
    Json(route): Json<String>,
) -> Json<Vec<String>> {
    let mut favorites = state.favorites.lock().unwrap_or_else(PoisonError::into_inner);
    favorites.add(route);
    Json(favorites.list().to_vec())
}

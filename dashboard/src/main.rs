use std::{fs::OpenOptions, sync::Arc};

use axum::{
    Json, Router,
    extract::{
        Path, State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use chrono::Utc;
use dashboard::{
    config::DashboardConfig,
    controller::{DashboardController, DashboardEvent},
    dashboard_state::DashboardState,
    display::DisplayFrame,
    location_source,
};
use geo_types::Point;
use nav_dash_data_management::DataManager;
use nav_dash_lib::{
    favorite::Favorite,
    theme::{MapType, Theme},
};
use serde::Deserialize;
use tokio::sync::{Mutex, broadcast};
use tower_http::services::{ServeDir, ServeFile};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    std::fs::create_dir_all("dashboard/log")?;
    let log_file = "dashboard/log/dashboard.log";

    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file))
        .init();

    tracing::info!("Starting dashboard...");

    let config = DashboardConfig::load();

    let data_manager = match &config.database_path {
        Some(path) => DataManager::start_with_path(path).await,
        None => DataManager::start().await,
    }
    .map_err(|err| anyhow::anyhow!("Failed to start data manager: {err:?}"))?;

    // Persisted UI state survives restarts; session statistics do not.
    let theme = data_manager
        .get_theme()
        .await
        .map_err(|err| anyhow::anyhow!("Failed to load theme: {err:?}"))?;
    let map_type = data_manager
        .get_map_type()
        .await
        .map_err(|err| anyhow::anyhow!("Failed to load map type: {err:?}"))?;
    let achievements = data_manager
        .get_achievements()
        .await
        .map_err(|err| anyhow::anyhow!("Failed to load achievements: {err:?}"))?;

    let (tx, _rx) = broadcast::channel(100);

    let state = Arc::new(DashboardState {
        tx,
        data_manager,
        controller: Mutex::new(DashboardController::new(theme, map_type, achievements)),
        config,
    });

    tokio::spawn(location_source::run(state.clone()));

    let app = Router::new()
        .nest_service("/static", ServeDir::new("dashboard/static"))
        .fallback_service(ServeFile::new("dashboard/static/index.html"))
        .route("/state", get(get_state))
        .route("/navigation/start", post(start_navigation))
        .route("/navigation/stop", post(stop_navigation))
        .route("/favorites", get(get_favorites).post(add_favorite))
        .route("/favorites/{name}", delete(delete_favorite))
        .route("/theme", get(get_theme).put(put_theme))
        .route("/map_type", get(get_map_type).put(put_map_type))
        .route("/achievements", get(get_achievements))
        .route("/traffic", get(get_traffic))
        .route("/ws", get(ws_handler))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind(&state.config.bind_address).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn get_state(State(state): State<Arc<DashboardState>>) -> Json<DisplayFrame> {
    Json(state.controller.lock().await.frame(Utc::now()))
}

async fn start_navigation(State(state): State<Arc<DashboardState>>) -> Json<DisplayFrame> {
    Json(state.dispatch(DashboardEvent::SessionStart).await)
}

async fn stop_navigation(State(state): State<Arc<DashboardState>>) -> Json<DisplayFrame> {
    Json(state.dispatch(DashboardEvent::SessionStop).await)
}

#[derive(Deserialize)]
struct NewFavorite {
    name: String,
    latitude: f64,
    longitude: f64,
}

async fn get_favorites(State(state): State<Arc<DashboardState>>) -> Response {
    match state.data_manager.get_favorites().await {
        Ok(favorites) => Json(favorites).into_response(),
        Err(err) => {
            tracing::error!("Failed to get favorites: {err:?}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn add_favorite(
    State(state): State<Arc<DashboardState>>,
    Json(request): Json<NewFavorite>,
) -> Response {
    let favorite = Favorite::new(
        request.name,
        Point::new(request.longitude, request.latitude),
        Utc::now(),
    );

    match state.data_manager.add_favorite(favorite).await {
        Ok(()) => StatusCode::CREATED.into_response(),
        Err(err) => {
            tracing::error!("Failed to add favorite: {err:?}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn delete_favorite(
    State(state): State<Arc<DashboardState>>,
    Path(name): Path<String>,
) -> Response {
    match state.data_manager.remove_favorite(&name).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => {
            tracing::error!("Failed to remove favorite {name}: {err:?}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn get_theme(State(state): State<Arc<DashboardState>>) -> Response {
    match state.data_manager.get_theme().await {
        Ok(theme) => Json(theme).into_response(),
        Err(err) => {
            tracing::error!("Failed to get theme: {err:?}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn put_theme(State(state): State<Arc<DashboardState>>, Json(theme): Json<Theme>) -> Response {
    if let Err(err) = state.data_manager.set_theme(theme).await {
        tracing::error!("Failed to store theme: {err:?}");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let frame = {
        let mut controller = state.controller.lock().await;
        controller.set_theme(theme);
        controller.frame(Utc::now())
    };
    let _ = state.tx.send(frame);

    Json(theme).into_response()
}

async fn get_map_type(State(state): State<Arc<DashboardState>>) -> Response {
    match state.data_manager.get_map_type().await {
        Ok(map_type) => Json(map_type).into_response(),
        Err(err) => {
            tracing::error!("Failed to get map type: {err:?}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn put_map_type(
    State(state): State<Arc<DashboardState>>,
    Json(map_type): Json<MapType>,
) -> Response {
    if let Err(err) = state.data_manager.set_map_type(map_type).await {
        tracing::error!("Failed to store map type: {err:?}");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let frame = {
        let mut controller = state.controller.lock().await;
        controller.set_map_type(map_type);
        controller.frame(Utc::now())
    };
    let _ = state.tx.send(frame);

    Json(map_type).into_response()
}

async fn get_achievements(State(state): State<Arc<DashboardState>>) -> Response {
    match state.data_manager.get_achievements().await {
        Ok(unlocked) => Json(unlocked).into_response(),
        Err(err) => {
            tracing::error!("Failed to get achievements: {err:?}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn get_traffic(State(state): State<Arc<DashboardState>>) -> Response {
    let report = state.controller.lock().await.refresh_traffic(Utc::now());
    Json(report).into_response()
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<DashboardState>>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<DashboardState>) {
    let mut rx = state.tx.subscribe();

    // Current frame first, then every refresh as it happens.
    let frame = state.controller.lock().await.frame(Utc::now());
    if send_frame(&mut socket, &frame).await.is_err() {
        return;
    }

    loop {
        match rx.recv().await {
            Ok(frame) => {
                if send_frame(&mut socket, &frame).await.is_err() {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::debug!("Display subscriber lagged, skipped {skipped} frames");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn send_frame(socket: &mut WebSocket, frame: &DisplayFrame) -> Result<(), axum::Error> {
    let json = serde_json::to_string(frame).unwrap_or_default();
    socket.send(Message::Text(json.into())).await
}

//! HTTP surface for the match.
//!
//! Handlers decode path and form parameters, take the coordinator lock for
//! the duration of one operation, and render the [`Reply`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{Json, Router};
use axum::body::Body;
use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::{Form, Path, State};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::Deserialize;
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::RecvError;
use tower::ServiceBuilder;
use tracing::{debug, info, instrument, warn};

use crate::broadcast::ChannelBroadcaster;
use crate::config::ServerConfig;
use crate::coordinator::{MatchCoordinator, Reply};
use crate::game::PlayerId;
use crate::store::MatchStore;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    coordinator: Arc<Mutex<MatchCoordinator>>,
    viewers: ChannelBroadcaster,
}

impl AppState {
    /// Recovers the stored match and wires it to a fresh viewer channel.
    #[instrument(skip(store))]
    pub fn recover(store: Box<dyn MatchStore>, capacity: usize) -> Self {
        let viewers = ChannelBroadcaster::new(capacity);
        let coordinator = MatchCoordinator::recover(store, Arc::new(viewers.clone()));
        Self {
            coordinator: Arc::new(Mutex::new(coordinator)),
            viewers,
        }
    }

    /// Channel viewers subscribe to.
    pub fn viewers(&self) -> &ChannelBroadcaster {
        &self.viewers
    }

    /// Locks the coordinator, recovering a poisoned lock.
    pub fn coordinator(&self) -> MutexGuard<'_, MatchCoordinator> {
        self.coordinator
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Form body of `POST /startgame`.
#[derive(Debug, Deserialize)]
pub struct StartForm {
    /// Requested mark, `X` or `O`.
    #[serde(rename = "type")]
    pub mark: String,
}

/// Form body of `POST /move/{playerId}`.
#[derive(Debug, Deserialize)]
pub struct MoveForm {
    /// Row.
    pub x: i32,
    /// Column.
    pub y: i32,
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::State(state) => Json(state).into_response(),
            Reply::Move(msg) => Json(msg).into_response(),
            Reply::Notice(text) => text.into_response(),
            Reply::Silent => StatusCode::OK.into_response(),
        }
    }
}

/// Builds the router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/newgame", get(new_game))
        .route("/startgame", post(start_game))
        .route("/joingame", get(join_game))
        .route("/gameboard", get(game_board))
        .route("/gameboard/ws", get(watch_game))
        .route("/move/{player_id}", post(submit_move))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            debug!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(config: &ServerConfig, store: Box<dyn MatchStore>) -> anyhow::Result<()> {
    let state = AppState::recover(store, *config.broadcast_capacity());
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(address = %listener.local_addr()?, "Match server ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutting down");
        })
        .await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn new_game(State(app): State<AppState>) -> Reply {
    app.coordinator().new_game()
}

async fn start_game(State(app): State<AppState>, Form(form): Form<StartForm>) -> Reply {
    app.coordinator().start_game(&form.mark)
}

async fn join_game(State(app): State<AppState>) -> Reply {
    app.coordinator().join_game()
}

async fn game_board(State(app): State<AppState>) -> Reply {
    app.coordinator().current_state()
}

async fn submit_move(
    State(app): State<AppState>,
    Path(player_id): Path<PlayerId>,
    Form(form): Form<MoveForm>,
) -> Reply {
    app.coordinator().submit_move(player_id, form.x, form.y)
}

async fn watch_game(State(app): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let updates = app.viewers().subscribe();
    ws.on_upgrade(move |socket| forward_updates(socket, updates))
}

/// Pushes every published state to one viewer until either side goes away.
async fn forward_updates(mut socket: WebSocket, mut updates: Receiver<String>) {
    info!("Viewer connected");
    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Ok(payload) => {
                    if let Err(e) = socket.send(WsMessage::Text(payload.into())).await {
                        debug!(error = %e, "Viewer send failed");
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Viewer lagging, frames dropped");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(WsMessage::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!(error = %e, "Viewer receive failed");
                    break;
                }
            },
        }
    }
    info!("Viewer disconnected");
}

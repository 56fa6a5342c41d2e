//! HTTP Game Server
//!
//! Exposes the engine to the browser client and runs the background hazard
//! check. All access to the engine goes through one `RwLock`, so actions,
//! countdown ticks and hazard checks never interleave.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, RwLock};
use tokio::time::{interval, Instant, MissedTickBehavior};
use tower_http::services::ServeDir;
use tracing::{debug, info, instrument, warn};

use crate::game::action::ActionError;
use crate::game::engine::GameEngine;
use crate::game::events::GameEvent;
use crate::game::state::GameState;
use crate::network::protocol::{ActionRequest, ErrorResponse};

/// Engine shared between request handlers and the hazard loop.
pub type SharedEngine = Arc<RwLock<GameEngine>>;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address.
    pub bind_addr: SocketAddr,
    /// Directory of client assets to serve, if any.
    pub static_dir: Option<PathBuf>,
    /// Cadence of the background hazard check.
    pub hazard_interval: Duration,
    /// Fixed level-generation seed. `None` draws one from entropy.
    pub seed: Option<u64>,
    /// Server version string.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            static_dir: None,
            hazard_interval: Duration::from_millis(crate::HAZARD_INTERVAL_MS),
            seed: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables.
    ///
    /// Reads `PORT`, `BIND_HOST`, `STATIC_DIR`, `HAZARD_INTERVAL_MS` and
    /// `GAME_SEED`. Unparseable values are logged and replaced by defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = parse_or(&lookup, "PORT", defaults.bind_addr.port());
        let host = parse_or(&lookup, "BIND_HOST", defaults.bind_addr.ip());
        let interval_ms = parse_or(
            &lookup,
            "HAZARD_INTERVAL_MS",
            defaults.hazard_interval.as_millis() as u64,
        );

        Self {
            bind_addr: SocketAddr::new(host, port),
            static_dir: lookup("STATIC_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            hazard_interval: Duration::from_millis(interval_ms),
            seed: lookup("GAME_SEED").and_then(|v| match v.parse() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    warn!("Ignoring invalid GAME_SEED {:?}", v);
                    None
                }
            }),
            ..defaults
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {} {:?}", key, raw);
            default
        }),
        None => default,
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Game server errors.
#[derive(Debug, thiserror::Error)]
pub enum GameServerError {
    /// Failed to bind to address.
    #[error("Failed to bind {addr}: {source}")]
    BindFailed {
        /// Address that was requested.
        addr: SocketAddr,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The HTTP server stopped with an error.
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// A rejected action, rendered as `400 {"error": ...}`.
#[derive(Debug)]
pub struct ApiError(ActionError);

impl From<ActionError> for ApiError {
    fn from(err: ActionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::from(&self.0))).into_response()
    }
}

// =============================================================================
// ROUTES
// =============================================================================

/// Build the HTTP routes around a shared engine.
pub fn build_router(engine: SharedEngine, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/status", get(get_status))
        .route("/action", post(post_action))
        .route("/tick", post(post_tick))
        .route("/health", get(health))
        .with_state(engine);

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(middleware::from_fn(log_request))
}

/// Log each request with its response status.
async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;
    debug!("{} {} -> {}", method, path, response.status());
    response
}

async fn health() -> &'static str {
    "ok"
}

async fn get_status(State(engine): State<SharedEngine>) -> Json<GameState> {
    Json(engine.read().await.state().clone())
}

async fn post_action(
    State(engine): State<SharedEngine>,
    body: Bytes,
) -> Result<Json<GameState>, ApiError> {
    let action = match ActionRequest::from_slice(&body) {
        Ok(request) => request.into_action(),
        Err(e) => {
            debug!("Unparseable action body: {}", e);
            Err(ActionError::UnknownAction(String::new()))
        }
    };
    let action = action.inspect_err(|e| debug!("Rejected action: {:?}", e))?;

    let mut engine = engine.write().await;
    let events = engine
        .apply_action(&action)
        .inspect_err(|e| debug!("Action {:?} rejected: {}", action, e))?;
    log_events(&events);
    Ok(Json(engine.state().clone()))
}

async fn post_tick(State(engine): State<SharedEngine>) -> Json<GameState> {
    let mut engine = engine.write().await;
    let events = engine.tick();
    log_events(&events);
    Json(engine.state().clone())
}

/// Log engine events, level transitions at `info`.
fn log_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::GameOver { reason, level } => {
                info!("Game over on level {} ({}), back to level 1", level, reason);
            }
            GameEvent::LevelCompleted { completed_level, next_level, map_size } => {
                info!(
                    "Level {} complete, starting level {} on a {}x{} map",
                    completed_level, next_level, map_size, map_size
                );
            }
            other => debug!("{:?}", other),
        }
    }
}

// =============================================================================
// SERVER
// =============================================================================

/// The game server.
pub struct GameServer {
    /// Server configuration.
    config: ServerConfig,
    /// The one game.
    engine: SharedEngine,
    /// Shutdown signal.
    shutdown_tx: broadcast::Sender<()>,
}

impl GameServer {
    /// Create a new game server with a fresh game.
    pub fn new(config: ServerConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        let engine = GameEngine::seeded(config.seed, config.hazard_interval);
        info!("Level seed: {}", engine.seed());

        Self {
            config,
            engine: Arc::new(RwLock::new(engine)),
            shutdown_tx,
        }
    }

    /// Shared handle to the engine.
    pub fn engine(&self) -> SharedEngine {
        self.engine.clone()
    }

    /// Sender that stops [`GameServer::run`] when signalled.
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Routes for this server.
    pub fn router(&self) -> Router {
        build_router(self.engine.clone(), self.config.static_dir.as_deref())
    }

    /// Run the server until shutdown.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<(), GameServerError> {
        let addr = self.config.bind_addr;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| GameServerError::BindFailed { addr, source })?;
        info!("Game server v{} listening on {}", self.config.version, addr);
        if let Some(dir) = &self.config.static_dir {
            info!("Serving client assets from {}", dir.display());
        }

        let hazard_engine = self.engine.clone();
        let hazard_period = self.config.hazard_interval;
        let hazard_shutdown = self.shutdown_tx.subscribe();
        let hazard_handle = tokio::spawn(async move {
            run_hazard_loop(hazard_engine, hazard_period, hazard_shutdown).await;
        });

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let result = axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("Shutdown signal received");
            })
            .await
            .map_err(GameServerError::Serve);

        hazard_handle.abort();
        result
    }

    /// Shutdown the server.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

/// Feed real elapsed time to the engine's hazard clock until shutdown.
async fn run_hazard_loop(
    engine: SharedEngine,
    period: Duration,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                let elapsed = now.duration_since(last);
                last = now;

                let events = engine.write().await.advance_clock(elapsed);
                log_events(&events);
            }
            _ = shutdown_rx.recv() => {
                debug!("Hazard loop stopped");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::game::action::{Action, MoveDirection};
    use crate::game::state::{HazardZone, ResourceNode, ResourceType};

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.hazard_interval, Duration::from_secs(1));
        assert!(config.static_dir.is_none());
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_config_from_lookup() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("PORT", "8081"),
            ("BIND_HOST", "127.0.0.1"),
            ("STATIC_DIR", "public"),
            ("HAZARD_INTERVAL_MS", "250"),
            ("GAME_SEED", "99"),
        ]));

        assert_eq!(config.bind_addr, "127.0.0.1:8081".parse().unwrap());
        assert_eq!(config.static_dir, Some(PathBuf::from("public")));
        assert_eq!(config.hazard_interval, Duration::from_millis(250));
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn test_config_invalid_values_fall_back() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("PORT", "not-a-port"),
            ("GAME_SEED", "-1"),
            ("STATIC_DIR", ""),
        ]));

        assert_eq!(config.bind_addr.port(), 3000);
        assert!(config.seed.is_none());
        assert!(config.static_dir.is_none());
    }

    #[tokio::test]
    async fn test_server_creation() {
        let config = ServerConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            seed: Some(1234),
            ..Default::default()
        };
        let server = GameServer::new(config);

        let engine = server.engine();
        let engine = engine.read().await;
        assert_eq!(engine.seed(), 1234);
        assert_eq!(engine.state().level, 1);
    }

    #[tokio::test]
    async fn test_server_shutdown() {
        let config = ServerConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            ..Default::default()
        };
        let server = GameServer::new(config);
        server.shutdown();
        // Should not panic
    }

    #[tokio::test(start_paused = true)]
    async fn test_hazard_loop_applies_damage() {
        let engine: SharedEngine = Arc::new(RwLock::new(GameEngine::seeded(
            Some(7),
            Duration::from_secs(1),
        )));
        {
            let mut guard = engine.write().await;
            let state = guard.state_mut();
            state.active_sensors.clear();
            state.resource_nodes = vec![ResourceNode::new(40, 40, ResourceType::Iron)];
            state.hazard_zones = vec![HazardZone { x: 200, y: 170, radius: 45.0, damage: 3 }];
            guard
                .apply_action(&Action::Move { direction: Some(MoveDirection::Forward) })
                .unwrap();
        }

        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let handle = tokio::spawn(run_hazard_loop(engine.clone(), Duration::from_secs(1), shutdown_rx));

        // Paused clock auto-advances while the test awaits
        tokio::time::sleep(Duration::from_millis(3500)).await;
        let _ = shutdown_tx.send(());
        let _ = handle.await;

        let battery = engine.read().await.state().battery_percentage;
        // 98 after the move, 3 damage per completed second
        assert_eq!(battery, 98 - 9);
    }
}

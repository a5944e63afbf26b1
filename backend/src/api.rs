use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use irrigation_core::{DesignConstants, DesignEngine, DesignError, IrrigationDesign, ProjectParameters, SiteAnalysis};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct AppState {
    pub engine: DesignEngine,
}

impl AppState {
    pub fn new(engine: DesignEngine) -> Self {
        Self { engine }
    }
}

/// Body of `POST /api/design` and of the `DESIGN:` socket command.
#[derive(Debug, Deserialize)]
pub struct DesignRequest {
    pub site: SiteAnalysis,
    #[serde(default)]
    pub params: ProjectParameters,
    #[serde(default)]
    pub constants: Option<DesignConstants>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// A design failure as seen by clients.
#[derive(Debug)]
pub struct ApiError(DesignError);

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self.0 {
            DesignError::Catalog(_) => "CATALOG_ERROR",
            DesignError::InvalidSite(_) => "INVALID_SITE",
        }
    }
}

impl From<DesignError> for ApiError {
    fn from(err: DesignError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "code": self.code(),
            "message": self.0.to_string(),
        });
        (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
    }
}

/// Format an engine error as a socket message for the frontend
fn format_error(code: &str, message: &str, severity: &str) -> String {
    format!("ERROR_UPDATE:{}", json!({
        "code": code,
        "message": message,
        "severity": severity
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/catalog", get(catalog))
        .route("/api/design", post(design))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> &'static str {
    "Irrigation design backend"
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: irrigation_core::version(),
    })
}

async fn catalog(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.engine.catalog.clone())
}

fn run_design(engine: &DesignEngine, request: DesignRequest) -> Result<IrrigationDesign, ApiError> {
    let design = match request.constants {
        Some(constants) => DesignEngine::new(engine.catalog.clone(), constants).generate(&request.site, &request.params)?,
        None => engine.generate(&request.site, &request.params)?,
    };
    Ok(design)
}

async fn design(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DesignRequest>,
) -> Result<Json<IrrigationDesign>, ApiError> {
    let design = run_design(&state.engine, request).map_err(|e| {
        warn!("Design request failed: {}", e.0);
        e
    })?;
    info!(zones = design.total_zones, warnings = design.warnings.len(), "Design request served");
    Ok(Json(design))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Reply to one text command. Every command gets exactly one reply.
pub fn handle_command(engine: &DesignEngine, text: &str) -> String {
    if text == "PING" {
        return "PONG".to_string();
    }

    if let Some(payload) = text.strip_prefix("DESIGN:") {
        let request = match serde_json::from_str::<DesignRequest>(payload) {
            Ok(request) => request,
            Err(e) => {
                warn!("Failed to parse design command: {}", e);
                return format_error("INVALID_REQUEST", &format!("Invalid design request: {}", e), "error");
            }
        };

        return match run_design(engine, request) {
            Ok(design) => {
                let json = serde_json::to_string(&design).unwrap_or_else(|_| "{}".into());
                format!("DESIGN_UPDATE:{}", json)
            }
            Err(e) => {
                warn!("Design failed: {}", e.0);
                format_error(e.code(), &e.0.to_string(), "error")
            }
        };
    }

    warn!("Unknown command: {}", text);
    format_error("UNKNOWN_COMMAND", &format!("Unknown command: {}", text), "warning")
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let session = Uuid::new_v4();
    info!(%session, "Client connected");

    while let Some(msg) = socket.recv().await {
        let msg = if let Ok(msg) = msg {
            msg
        } else {
            break;
        };

        match msg {
            Message::Text(text) => {
                debug!(%session, "Received message: {}", text);
                let reply = handle_command(&state.engine, &text);
                if socket.send(Message::Text(reply)).await.is_err() {
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    info!(%session, "Client disconnected");
}

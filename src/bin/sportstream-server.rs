use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::{info, warn};
use serde::Deserialize;
use serde_json::json;
use std::env;
use std::time::Instant;
use streamed_api::{
    ApiError, ApiResult, CatalogEntry, FALLBACK_SPORT_NAMES, HomepageRow, Sport, StreamTarget,
    Streamed,
};

const BIND_ENV: &str = "SPORTSTREAM_BIND";
const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let service = Streamed::from_env();
    let addr = env::var(BIND_ENV).unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        "sportstream-server listening on http://{addr} (upstream {})",
        service.config().base_url
    );
    axum::serve(listener, router(service)).await?;
    Ok(())
}

fn router(service: Streamed) -> Router {
    Router::new()
        .route("/api/sports", get(sports))
        .route("/api/sports/fallback", get(fallback_sports))
        .route("/api/homepage", get(homepage))
        .route("/api/matches", get(matches))
        .route("/api/search", get(search))
        .route("/api/streams/{id}", get(stream))
        .with_state(service)
}

fn handle_cli_args() -> bool {
    let Some(arg) = env::args().nth(1) else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("sportstream-server {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "sportstream-server - JSON aggregator for live sports streams

Usage:
  sportstream-server
  sportstream-server --help
  sportstream-server --version

Routes:
  GET /api/sports
  GET /api/sports/fallback
  GET /api/homepage
  GET /api/matches?sport=<id>
  GET /api/search?q=<text>&sport=<name>&live=<true|false>
  GET /api/streams/{id}

Environment:
  SPORTSTREAM_BIND          Listen address (default 127.0.0.1:8080)
  STREAMED_BASE_URL         Upstream API base URL (default https://streamed.su)
  STREAMED_TIMEOUT_SECS     Per-request timeout in seconds (default 10, minimum 5)
  RUST_LOG                  Log filter (default info)"
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

struct HttpError(ApiError);

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

fn status_for(err: &ApiError) -> StatusCode {
    match err {
        ApiError::UpstreamUnavailable(..) | ApiError::Decode(..) => StatusCode::BAD_GATEWAY,
        ApiError::NoStreamsFound(_) => StatusCode::NOT_FOUND,
        ApiError::InvalidUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.0.kind(),
            "message": self.0.to_string(),
        });
        (status_for(&self.0), Json(body)).into_response()
    }
}

type HttpResult<T> = Result<Json<T>, HttpError>;

/// One log line per request with its outcome, then the JSON body or error.
fn respond<T>(
    route: &str,
    started: Instant,
    result: ApiResult<T>,
    count: impl Fn(&T) -> usize,
) -> HttpResult<T> {
    let elapsed = started.elapsed().as_millis();
    match result {
        Ok(value) => {
            info!("{route} -> 200 ({} items, {elapsed}ms)", count(&value));
            Ok(Json(value))
        }
        Err(e) => {
            warn!("{route} -> {} {e} ({elapsed}ms)", status_for(&e).as_u16());
            Err(e.into())
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn sports(State(service): State<Streamed>) -> HttpResult<Vec<Sport>> {
    let started = Instant::now();
    respond("GET /api/sports", started, service.sports().await, Vec::len)
}

async fn fallback_sports() -> Json<Vec<&'static str>> {
    info!("GET /api/sports/fallback -> 200");
    Json(FALLBACK_SPORT_NAMES.to_vec())
}

async fn homepage(State(service): State<Streamed>) -> HttpResult<Vec<HomepageRow>> {
    let started = Instant::now();
    respond(
        "GET /api/homepage",
        started,
        service.list_homepage_rows().await,
        Vec::len,
    )
}

#[derive(Debug, Default, Deserialize)]
struct MatchesQuery {
    sport: Option<String>,
}

async fn matches(
    State(service): State<Streamed>,
    Query(params): Query<MatchesQuery>,
) -> HttpResult<Vec<CatalogEntry>> {
    let started = Instant::now();
    let sport = params.sport.as_deref().filter(|s| !s.is_empty());
    let route = format!("GET /api/matches sport={}", sport.unwrap_or("-"));
    respond(&route, started, service.list_by_sport(sport).await, Vec::len)
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
    sport: Option<String>,
    #[serde(default = "live_default")]
    live: bool,
}

fn live_default() -> bool {
    true
}

async fn search(
    State(service): State<Streamed>,
    Query(params): Query<SearchQuery>,
) -> HttpResult<Vec<CatalogEntry>> {
    let started = Instant::now();
    let sport = params.sport.as_deref().filter(|s| !s.is_empty());
    let route = format!(
        "GET /api/search q={:?} sport={} live={}",
        params.q,
        sport.unwrap_or("all"),
        params.live
    );
    let result = service.search(&params.q, sport, params.live).await;
    respond(&route, started, result, Vec::len)
}

async fn stream(
    State(service): State<Streamed>,
    Path(id): Path<String>,
) -> HttpResult<StreamTarget> {
    let started = Instant::now();
    let route = format!("GET /api/streams/{id}");
    respond(&route, started, service.resolve_playback(&id).await, |_| 1)
}

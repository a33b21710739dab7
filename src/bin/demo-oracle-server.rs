use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::{env, net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};

use anyhow::{Context, Result};

use demo_oracle::banner;
use demo_oracle::check::{self, Mismatch};
use demo_oracle::oracle;
use demo_oracle::script::SCRIPT;

use tokio::task;

/* -------------------------- App state -------------------------- */

struct AppState {
    /// Optional API key for /api/check (DEMO_ORACLE_API_KEY).
    api_key: Option<String>,
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Key presented by the client: `X-API-Key` wins over `Authorization: Bearer`.
fn presented_key(headers: &HeaderMap) -> Option<&str> {
    if let Some(key) = header(headers, "x-api-key") {
        return Some(key.trim());
    }
    let (scheme, token) = header(headers, AUTHORIZATION.as_str())?
        .trim()
        .split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then_some(token.trim())
}

impl AppState {
    /// `true` when no key is configured or the client presented the right one.
    fn authorized(&self, headers: &HeaderMap) -> bool {
        match &self.api_key {
            None => true,
            Some(expected) => presented_key(headers) == Some(expected.as_str()),
        }
    }
}

/* -------------------------- Request/Response ------------------- */
/* Clients may send 'transcript' or 'content'. */

#[derive(Deserialize, Debug)]
struct CheckReq {
    #[serde(default)]
    transcript: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct CheckResp {
    ok: bool,
    mismatches: Vec<Mismatch>,
    logs: Vec<String>,
}

#[derive(Serialize)]
struct OracleResp {
    ok: bool,
    output: String,
    lines: Vec<String>,
}

#[derive(Serialize)]
struct ScriptResp {
    ok: bool,
    script: &'static str,
}

/* -------------------------- Server main ------------------------ */

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    banner::print_server_banner();

    let api_key = env::var("DEMO_ORACLE_API_KEY")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let state = Arc::new(AppState { api_key });

    let api = Router::new()
        .route("/oracle", get(api_oracle))
        .route("/script", get(api_script))
        .route("/check", post(api_check))
        .with_state(state);

    let app = Router::new().nest("/api", api).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    );

    // Default: 127.0.0.1:8081.
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8081);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid HOST/PORT: {host}:{port}"))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind failed for address {addr}"))?;
    log::info!("demo-oracle API listening on http://{addr}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

/* -------------------------- Handlers --------------------------- */

async fn api_oracle() -> impl IntoResponse {
    let lines = oracle::run();
    Json(OracleResp {
        ok: true,
        output: oracle::render_transcript(&lines),
        lines,
    })
}

async fn api_script() -> impl IntoResponse {
    Json(ScriptResp {
        ok: true,
        script: SCRIPT,
    })
}

fn refused(status: StatusCode, logs: Vec<String>) -> (StatusCode, Json<CheckResp>) {
    (
        status,
        Json(CheckResp {
            ok: false,
            mismatches: Vec::new(),
            logs,
        }),
    )
}

async fn api_check(
    State(s): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<CheckReq>, JsonRejection>,
) -> impl IntoResponse {
    let mut logs: Vec<String> = Vec::new();

    if !s.authorized(&headers) {
        logs.push("auth: missing or invalid API key".into());
        return refused(StatusCode::UNAUTHORIZED, logs);
    }

    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            log::debug!("rejected /api/check body: {rejection}");
            logs.push(format!("bad request: {}", rejection.body_text()));
            return refused(rejection.status(), logs);
        }
    };

    // transcript > content > empty
    let captured = req.transcript.or(req.content).unwrap_or_default();

    if captured.is_empty() {
        logs.push("warn: empty transcript".into());
        return refused(StatusCode::OK, logs);
    }

    let res = task::spawn_blocking(move || check::check(&captured)).await;

    match res {
        Ok(report) => {
            logs.push(format!(
                "lines: expected={} actual={}",
                report.expected_lines, report.actual_lines
            ));
            (
                StatusCode::OK,
                Json(CheckResp {
                    ok: report.is_pass(),
                    mismatches: report.mismatches,
                    logs,
                }),
            )
        }
        Err(e) => {
            logs.push(format!("join error: {e}"));
            refused(StatusCode::INTERNAL_SERVER_ERROR, logs)
        }
    }
}

//! RPC method handler for the fontsurvey JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested independently and
//! reused by the webview UI. The `App` lock is never held across an await:
//! collection and submission take the lock to begin, release it while the
//! source or gateway works, and take it again to finish.

use std::sync::{Mutex, MutexGuard};

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::font_reviewer::{FontReviewer, FontReviewerTrait};
use crate::services::font_source::{BrowserFontReport, FontSource};
use crate::services::settings_engine::SettingsEngineTrait;
use crate::services::submission_gateway::FontSubmitter;
use crate::types::errors::CollectError;

fn lock(app: &Mutex<App>) -> Result<MutexGuard<'_, App>, String> {
    app.lock().map_err(|e| e.to_string())
}

fn snapshot_value(reviewer: &FontReviewer) -> Result<Value, String> {
    serde_json::to_value(reviewer.snapshot()).map_err(|e| e.to_string())
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
/// Reviewer methods answer with the state snapshot.
pub async fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Survey ───
        "survey.state" => {
            let a = lock(app)?;
            snapshot_value(&a.reviewer)
        }
        "survey.set_user_agent" => {
            let ua = params
                .get("user_agent")
                .and_then(|v| v.as_str())
                .ok_or("missing user_agent")?;
            let mut a = lock(app)?;
            a.reviewer.set_user_agent(ua).map_err(|e| e.to_string())?;
            snapshot_value(&a.reviewer)
        }
        "survey.reset" => {
            let mut a = lock(app)?;
            a.reviewer.reset().map_err(|e| e.to_string())?;
            snapshot_value(&a.reviewer)
        }

        // ─── Fonts ───
        "fonts.collect" => collect(app, params).await,
        "fonts.toggle" => {
            let index = params
                .get("index")
                .and_then(|v| v.as_u64())
                .ok_or("missing index")? as usize;
            let mut a = lock(app)?;
            a.reviewer.toggle_inclusion(index).map_err(|e| e.to_string())?;
            snapshot_value(&a.reviewer)
        }
        "fonts.submit" => submit(app, params).await,

        // ─── Settings ───
        "settings.get" => {
            let a = lock(app)?;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.reset" => {
            let mut a = lock(app)?;
            a.settings_engine.reset().map_err(|e| e.to_string())?;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}

/// `fonts.collect`: uses the browser report in `params.report` when present,
/// otherwise queries the configured font source off the async threads.
async fn collect(app: &Mutex<App>, params: &Value) -> Result<Value, String> {
    let report = match params.get("report") {
        Some(v) => Some(
            serde_json::from_value::<BrowserFontReport>(v.clone())
                .map_err(|e| format!("invalid report: {}", e))?,
        ),
        None => None,
    };

    let source = {
        let mut a = lock(app)?;
        a.reviewer.begin_collect().map_err(|e| e.to_string())?;
        a.font_source()
    };

    let result = match report {
        Some(report) => report.into_result(),
        None => tokio::task::spawn_blocking(move || source.query_local_fonts())
            .await
            .unwrap_or_else(|e| Err(CollectError::QueryFailed(e.to_string()))),
    };

    let mut a = lock(app)?;
    a.reviewer.finish_collect(result).map_err(|e| e.to_string())?;
    snapshot_value(&a.reviewer)
}

/// `fonts.submit`: optional `declared_os` string.
async fn submit(app: &Mutex<App>, params: &Value) -> Result<Value, String> {
    let declared_os = params
        .get("declared_os")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    let (payload, gateway) = {
        let mut a = lock(app)?;
        let payload = a.reviewer.begin_submit(declared_os).map_err(|e| e.to_string())?;
        (payload, a.gateway())
    };

    let result = gateway.submit(payload).await;

    let mut a = lock(app)?;
    a.reviewer.finish_submit(result).map_err(|e| e.to_string())?;
    snapshot_value(&a.reviewer)
}

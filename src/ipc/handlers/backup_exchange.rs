use crate::catalog;
use crate::eval;
use crate::exchange;
use crate::ipc::error::ok;
use crate::ipc::helpers::{optional_str, required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use std::path::PathBuf;

fn handle_export(state: &mut AppState, req: &Request) -> serde_json::Value {
    let out_dir = optional_str(&req.params, "dir")
        .map(PathBuf::from)
        .or_else(|| state.workspace.clone());
    let Some(out_dir) = out_dir else {
        return HandlerErr::bad_params("missing params.dir and no workspace selected")
            .response(&req.id);
    };

    match exchange::export_snapshot(&state.snapshot, &out_dir, exchange::today()) {
        Ok(summary) => {
            tracing::info!(path = %summary.path.display(), bytes = summary.bytes, "snapshot exported");
            ok(
                &req.id,
                json!({
                    "path": summary.path.to_string_lossy(),
                    "fileName": summary.path.file_name().map(|n| n.to_string_lossy().to_string()),
                    "bytes": summary.bytes,
                }),
            )
        }
        Err(e) => HandlerErr {
            code: "io_failed",
            message: format!("{e:#}"),
            details: Some(json!({ "dir": out_dir.to_string_lossy() })),
        }
        .response(&req.id),
    }
}

fn handle_import(state: &mut AppState, req: &Request) -> serde_json::Value {
    let imported = match (
        optional_str(&req.params, "text"),
        required_str(&req.params, "path"),
    ) {
        (Some(text), _) => exchange::parse_snapshot(text),
        (None, Ok(path)) => exchange::import_snapshot_file(&PathBuf::from(path)),
        (None, Err(e)) => return e.response(&req.id),
    };
    match imported {
        Ok(snapshot) => {
            let majors = snapshot.majors.len();
            state.commit(snapshot);
            tracing::info!(majors, "snapshot imported");
            ok(
                &req.id,
                json!({ "progress": eval::progress_report(&state.snapshot) }),
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "import rejected");
            HandlerErr::from(e).response(&req.id)
        }
    }
}

fn handle_reset(state: &mut AppState, req: &Request) -> serde_json::Value {
    let confirmed = req
        .params
        .get("confirm")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    if !confirmed {
        return HandlerErr {
            code: "confirmation_required",
            message: "reset discards all progress; resend with confirm: true".to_string(),
            details: None,
        }
        .response(&req.id);
    }
    state.commit(catalog::default_snapshot());
    tracing::info!("snapshot reset to defaults");
    ok(
        &req.id,
        json!({ "progress": eval::progress_report(&state.snapshot) }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "snapshot.export" => Some(handle_export(state, req)),
        "snapshot.import" => Some(handle_import(state, req)),
        "snapshot.reset" => Some(handle_reset(state, req)),
        _ => None,
    }
}

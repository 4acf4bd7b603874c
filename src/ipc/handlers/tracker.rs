use crate::eval;
use crate::ipc::error::ok;
use crate::ipc::helpers::{required_index, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::model::Status;
use serde_json::json;

fn status_options() -> serde_json::Value {
    Status::COURSE_STATUSES
        .iter()
        .map(|s| json!({ "value": s.as_str(), "label": s.label() }))
        .collect()
}

fn active_major_key(state: &AppState) -> Option<String> {
    state.active_major().map(|m| m.key.clone())
}

fn handle_snapshot_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "snapshot": &state.snapshot,
            "progress": eval::progress_report(&state.snapshot),
            "activeMajor": state.active_major,
            "statuses": status_options(),
        }),
    )
}

fn handle_progress_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!(eval::progress_report(&state.snapshot)))
}

fn view_payload(state: &AppState) -> serde_json::Value {
    json!({
        "activeMajor": state.active_major,
        "majorKey": active_major_key(state),
        "major": state.active_major().map(eval::major_report),
    })
}

fn handle_view_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, view_payload(state))
}

fn handle_view_set_active_major(state: &mut AppState, req: &Request) -> serde_json::Value {
    let index = match required_index(&req.params, "index") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let len = state.snapshot.majors.len();
    if index >= len {
        return HandlerErr {
            code: "bad_params",
            message: format!("major index {} out of range", index),
            details: Some(json!({ "index": index, "len": len })),
        }
        .response(&req.id);
    }
    state.active_major = index;
    tracing::debug!(index, "active major changed");
    ok(&req.id, view_payload(state))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "snapshot.get" => Some(handle_snapshot_get(state, req)),
        "progress.get" => Some(handle_progress_get(state, req)),
        "view.get" => Some(handle_view_get(state, req)),
        "view.setActiveMajor" => Some(handle_view_set_active_major(state, req)),
        _ => None,
    }
}

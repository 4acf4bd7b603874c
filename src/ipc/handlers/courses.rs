use crate::ipc::helpers::{
    item_path, optional_str, required_index, required_str, run_mutation, section_path, HandlerErr,
};
use crate::ipc::types::{AppState, Request};
use crate::model::Status;
use crate::mutate::Mutation;
use serde_json::json;

fn handle_set_status(state: &mut AppState, req: &Request) -> serde_json::Value {
    let path = match item_path(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let raw = match required_str(&req.params, "status") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let Some(status) = Status::parse_course(raw) else {
        return HandlerErr {
            code: "bad_params",
            message: "status must be one of: not_taken, planned, currently_taking, taken, retake"
                .to_string(),
            details: Some(json!({ "status": raw })),
        }
        .response(&req.id);
    };
    run_mutation(state, req, Mutation::SetItemStatus { path, status })
}

fn handle_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let section = match section_path(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    // Blank or missing fields are refused by the mutation itself.
    let code = optional_str(&req.params, "code").unwrap_or("").to_string();
    let title = optional_str(&req.params, "title").unwrap_or("").to_string();
    let units = req
        .params
        .get("units")
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    run_mutation(
        state,
        req,
        Mutation::AddCourse {
            section,
            code,
            title,
            units,
        },
    )
}

fn handle_remove(state: &mut AppState, req: &Request) -> serde_json::Value {
    let section = match section_path(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let index = match required_index(&req.params, "index") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    run_mutation(state, req, Mutation::RemoveCourse { section, index })
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "course.setStatus" => Some(handle_set_status(state, req)),
        "course.add" => Some(handle_add(state, req)),
        "course.remove" => Some(handle_remove(state, req)),
        _ => None,
    }
}

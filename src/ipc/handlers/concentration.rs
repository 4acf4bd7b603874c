use crate::ipc::error::ok;
use crate::ipc::helpers::{optional_str, required_str, run_mutation, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::model::{ConcentrationId, ConcentrationScheme, Slot};
use crate::mutate::{AddressingError, InvalidOperation, Mutation, MutationError};
use serde_json::json;

fn parse_slot(params: &serde_json::Value) -> Result<Slot, HandlerErr> {
    let raw = optional_str(params, "slot").unwrap_or("single");
    Slot::parse(raw).ok_or_else(|| HandlerErr {
        code: "bad_params",
        message: "slot must be one of: single, primary, secondary".to_string(),
        details: Some(json!({ "slot": raw })),
    })
}

fn handle_options(state: &mut AppState, req: &Request) -> serde_json::Value {
    let major_key = match required_str(&req.params, "majorKey") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let Some(major) = state.snapshot.major(major_key) else {
        return HandlerErr::from(MutationError::from(AddressingError::UnknownMajor(
            major_key.to_string(),
        )))
        .response(&req.id);
    };
    let Some(scheme) = major.concentration.as_ref() else {
        return HandlerErr::from(MutationError::from(InvalidOperation::NoScheme(
            major_key.to_string(),
        )))
        .response(&req.id);
    };

    let selections: serde_json::Map<String, serde_json::Value> = scheme
        .layout
        .slots()
        .iter()
        .map(|slot| {
            let chosen = scheme.selection(major, *slot);
            (slot.to_string(), json!(chosen))
        })
        .collect();
    let options: Vec<serde_json::Value> = scheme
        .options
        .iter()
        .map(|o| {
            json!({
                "id": o.id,
                "label": o.label,
                "sectionKey": ConcentrationScheme::course_section_key(&o.id),
            })
        })
        .collect();

    ok(
        &req.id,
        json!({
            "majorKey": major.key,
            "layout": scheme.layout,
            "options": options,
            "selections": selections,
        }),
    )
}

fn handle_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let major_key = match required_str(&req.params, "majorKey") {
        Ok(v) => v.to_string(),
        Err(e) => return e.response(&req.id),
    };
    let slot = match parse_slot(&req.params) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    // Null or an empty id clears the slot.
    let concentration = optional_str(&req.params, "concentrationId")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ConcentrationId::new);
    run_mutation(
        state,
        req,
        Mutation::SelectConcentration {
            major_key,
            slot,
            concentration,
        },
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "concentration.options" => Some(handle_options(state, req)),
        "concentration.select" => Some(handle_select(state, req)),
        _ => None,
    }
}

use serde_json::json;

use crate::eval;
use crate::exchange::ImportFormatError;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::mutate::{self, ItemPath, Mutation, MutationError, SectionPath};

pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl HandlerErr {
    pub fn bad_params(message: impl Into<String>) -> Self {
        Self {
            code: "bad_params",
            message: message.into(),
            details: None,
        }
    }

    pub fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, self.details)
    }
}

impl From<MutationError> for HandlerErr {
    fn from(e: MutationError) -> Self {
        Self {
            code: e.code(),
            message: e.to_string(),
            details: None,
        }
    }
}

impl From<ImportFormatError> for HandlerErr {
    fn from(e: ImportFormatError) -> Self {
        Self {
            code: "import_format",
            message: e.to_string(),
            details: None,
        }
    }
}

pub fn required_str<'a>(params: &'a serde_json::Value, key: &str) -> Result<&'a str, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing params.{}", key)))
}

pub fn optional_str<'a>(params: &'a serde_json::Value, key: &str) -> Option<&'a str> {
    params.get(key).and_then(|v| v.as_str())
}

pub fn required_index(params: &serde_json::Value, key: &str) -> Result<usize, HandlerErr> {
    let Some(v) = params.get(key) else {
        return Err(HandlerErr::bad_params(format!("missing params.{}", key)));
    };
    v.as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| HandlerErr {
            code: "bad_params",
            message: format!("params.{} must be a non-negative integer", key),
            details: Some(json!({ "param": key, "value": v })),
        })
}

fn optional_index(params: &serde_json::Value, key: &str) -> Result<Option<usize>, HandlerErr> {
    match params.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(_) => required_index(params, key).map(Some),
    }
}

/// A section address comes either as a dotted `sectionPath` string or as
/// `majorIndex` / `sectionIndex` / `subsections` fields.
pub fn section_path(params: &serde_json::Value) -> Result<SectionPath, HandlerErr> {
    if let Some(raw) = optional_str(params, "sectionPath") {
        return raw
            .parse::<SectionPath>()
            .map_err(|e| HandlerErr::from(MutationError::from(e)));
    }
    let mut path = SectionPath::top(
        required_index(params, "majorIndex")?,
        required_index(params, "sectionIndex")?,
    );
    if let Some(subs) = params.get("subsections").and_then(|v| v.as_array()) {
        for s in subs {
            let Some(n) = s.as_u64() else {
                return Err(HandlerErr::bad_params(
                    "params.subsections must contain non-negative integers",
                ));
            };
            path.subsections.push(n as usize);
        }
    }
    Ok(path)
}

pub fn item_path(params: &serde_json::Value) -> Result<ItemPath, HandlerErr> {
    if let Some(raw) = optional_str(params, "path") {
        return raw
            .parse::<ItemPath>()
            .map_err(|e| HandlerErr::from(MutationError::from(e)));
    }
    Ok(ItemPath {
        section: section_path(params)?,
        group: optional_index(params, "groupIndex")?,
        item: required_index(params, "itemIndex")?,
    })
}

/// Applies a mutation and commits the result. A refused mutation leaves the
/// snapshot untouched and is reported with its error code.
pub fn run_mutation(state: &mut AppState, req: &Request, mutation: Mutation) -> serde_json::Value {
    match mutate::apply(&state.snapshot, &mutation) {
        Ok(next) => {
            state.commit(next);
            ok(
                &req.id,
                json!({ "progress": eval::progress_report(&state.snapshot) }),
            )
        }
        Err(e) => {
            tracing::warn!(method = %req.method, error = %e, "mutation refused");
            HandlerErr::from(e).response(&req.id)
        }
    }
}

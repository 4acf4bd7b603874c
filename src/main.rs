mod catalog;
mod config;
mod db;
mod eval;
mod exchange;
mod ipc;
mod model;
mod mutate;

use std::io::{self, BufRead, Write};

fn main() {
    let config = config::Config::from_env();
    config::init_tracing(&config);

    let mut state = ipc::AppState::new();
    if let Some(workspace) = config.workspace.as_deref() {
        if let Err(e) = state.open_workspace(workspace) {
            tracing::warn!(workspace = %workspace.display(), error = %e, "store unavailable at startup");
        }
    }
    tracing::info!(storage = state.storage_mode(), "ready");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut buf: Vec<u8> = Vec::new();

    loop {
        buf.clear();
        match input.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::error!(error = %e, "stdin read failed");
                break;
            }
        }

        let req = match parse_request(&buf) {
            Ok(Some(v)) => v,
            Ok(None) => continue,
            Err(message) => {
                // Can't reply without id.
                tracing::warn!(error = %message, "unparsable request line");
                let resp = serde_json::json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": message },
                });
                let _ = writeln!(stdout, "{}", resp);
                let _ = stdout.flush();
                continue;
            }
        };

        tracing::debug!(id = %req.id, method = %req.method, "request");
        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
}

/// `Ok(None)` for a blank line.
fn parse_request(raw: &[u8]) -> Result<Option<ipc::Request>, String> {
    let line = std::str::from_utf8(raw).map_err(|e| format!("request is not UTF-8: {e}"))?;
    if line.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line)
        .map(Some)
        .map_err(|e| e.to_string())
}

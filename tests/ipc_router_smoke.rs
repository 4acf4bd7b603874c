use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_degreetrackd");
    let mut child = Command::new(exe)
        .env_remove("DEGREETRACK_WORKSPACE")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn degreetrackd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    if value.get("ok").and_then(|v| v.as_bool()) == Some(false) {
        let code = value
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        assert_ne!(
            code, "not_implemented",
            "unexpected unknown method for {}",
            method
        );
    }
    value
}

fn error_code(resp: &serde_json::Value) -> Option<&str> {
    resp.get("error")
        .and_then(|e| e.get("code"))
        .and_then(|v| v.as_str())
}

fn overall(resp: &serde_json::Value) -> f64 {
    resp.pointer("/result/progress/overall")
        .and_then(|v| v.as_f64())
        .expect("overall progress")
}

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let workspace = temp_dir("degreetrack-router-smoke");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let health = request(&mut stdin, &mut reader, "1", "health", json!({}));
    assert_eq!(
        health.pointer("/result/storage").and_then(|v| v.as_str()),
        Some("memory")
    );

    let selected = request(
        &mut stdin,
        &mut reader,
        "2",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    assert_eq!(
        selected.pointer("/result/storage").and_then(|v| v.as_str()),
        Some("sqlite")
    );

    let snap = request(&mut stdin, &mut reader, "3", "snapshot.get", json!({}));
    assert_eq!(
        snap.pointer("/result/snapshot/majors")
            .and_then(|v| v.as_array())
            .map(|a| a.len()),
        Some(2)
    );
    assert_eq!(overall(&snap), 0.0);
    assert_eq!(
        snap.pointer("/result/statuses")
            .and_then(|v| v.as_array())
            .map(|a| a.len()),
        Some(5)
    );

    let set = request(
        &mut stdin,
        &mut reader,
        "4",
        "course.setStatus",
        json!({ "path": "majors.0.sections.0.items.0", "status": "taken" }),
    );
    assert_eq!(set.get("ok").and_then(|v| v.as_bool()), Some(true));
    assert!(overall(&set) > 0.0);

    let stale = request(
        &mut stdin,
        &mut reader,
        "5",
        "course.setStatus",
        json!({ "majorIndex": 0, "sectionIndex": 500, "itemIndex": 0, "status": "taken" }),
    );
    assert_eq!(error_code(&stale), Some("bad_path"));

    let fixed = request(
        &mut stdin,
        &mut reader,
        "6",
        "course.add",
        json!({ "sectionPath": "majors.0.sections.0", "code": "X 1", "title": "X", "units": 3 }),
    );
    assert_eq!(error_code(&fixed), Some("invalid_operation"));

    let options = request(
        &mut stdin,
        &mut reader,
        "7",
        "concentration.options",
        json!({ "majorKey": "polisci" }),
    );
    assert_eq!(
        options
            .pointer("/result/options")
            .and_then(|v| v.as_array())
            .map(|a| a.len()),
        Some(5)
    );
    assert!(options
        .pointer("/result/selections/primary")
        .map(|v| v.is_null())
        .unwrap_or(false));

    let chosen = request(
        &mut stdin,
        &mut reader,
        "8",
        "concentration.select",
        json!({ "majorKey": "polisci", "slot": "primary", "concentrationId": "data-science" }),
    );
    assert_eq!(chosen.get("ok").and_then(|v| v.as_bool()), Some(true));

    let unknown = request(
        &mut stdin,
        &mut reader,
        "9",
        "concentration.select",
        json!({ "majorKey": "symsys", "concentrationId": "underwater-basketry" }),
    );
    assert_eq!(error_code(&unknown), Some("invalid_operation"));

    let view = request(
        &mut stdin,
        &mut reader,
        "10",
        "view.setActiveMajor",
        json!({ "index": 1 }),
    );
    assert_eq!(
        view.pointer("/result/majorKey").and_then(|v| v.as_str()),
        Some("polisci")
    );
    let out_of_range = request(
        &mut stdin,
        &mut reader,
        "11",
        "view.setActiveMajor",
        json!({ "index": 9 }),
    );
    assert_eq!(error_code(&out_of_range), Some("bad_params"));

    let exported = request(&mut stdin, &mut reader, "12", "snapshot.export", json!({}));
    let export_path = exported
        .pointer("/result/path")
        .and_then(|v| v.as_str())
        .expect("export path")
        .to_string();
    assert!(PathBuf::from(&export_path).is_file());

    let refused = request(&mut stdin, &mut reader, "13", "snapshot.reset", json!({}));
    assert_eq!(error_code(&refused), Some("confirmation_required"));
    let reset = request(
        &mut stdin,
        &mut reader,
        "14",
        "snapshot.reset",
        json!({ "confirm": true }),
    );
    assert_eq!(overall(&reset), 0.0);

    let before_bad = request(&mut stdin, &mut reader, "15a", "snapshot.get", json!({}));
    let bad_import = request(
        &mut stdin,
        &mut reader,
        "15",
        "snapshot.import",
        json!({ "text": "{\"owner\":\"x\"}" }),
    );
    assert_eq!(error_code(&bad_import), Some("import_format"));
    let not_json = request(
        &mut stdin,
        &mut reader,
        "15b",
        "snapshot.import",
        json!({ "text": "{\"majors\": [" }),
    );
    assert_eq!(error_code(&not_json), Some("import_format"));
    let after_bad = request(&mut stdin, &mut reader, "15c", "snapshot.get", json!({}));
    assert_eq!(
        before_bad.pointer("/result/snapshot").map(|v| v.to_string()),
        after_bad.pointer("/result/snapshot").map(|v| v.to_string())
    );

    let imported = request(
        &mut stdin,
        &mut reader,
        "16",
        "snapshot.import",
        json!({ "path": export_path }),
    );
    assert!(overall(&imported) > 0.0);

    let report = request(&mut stdin, &mut reader, "17", "progress.get", json!({}));
    assert!(report.pointer("/result/overall").is_some());

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn snapshot_survives_restart_in_same_workspace() {
    let workspace = temp_dir("degreetrack-restart");

    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let set = request(
        &mut stdin,
        &mut reader,
        "2",
        "course.setStatus",
        json!({ "path": "majors.1.sections.0.items.0", "status": "taken" }),
    );
    let before = overall(&set);
    drop(stdin);
    let _ = child.wait();

    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let snap = request(&mut stdin, &mut reader, "2", "snapshot.get", json!({}));
    assert_eq!(overall(&snap), before);
    assert_eq!(
        snap.pointer("/result/snapshot/majors/1/sections/0/items/0/status")
            .and_then(|v| v.as_str()),
        Some("taken")
    );
    drop(stdin);
    let _ = child.wait();
}

#[test]
fn unknown_method_is_reported() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let payload = json!({ "id": "x", "method": "grades.list", "params": {} });
    writeln!(stdin, "{}", payload).expect("write");
    stdin.flush().expect("flush");
    let mut line = String::new();
    reader.read_line(&mut line).expect("read");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("json");
    assert_eq!(error_code(&value), Some("not_implemented"));
    drop(stdin);
    let _ = child.wait();
}

#[test]
fn malformed_lines_do_not_stop_the_loop() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    stdin.write_all(b"\xff\xfe garbage\n").expect("write bytes");
    stdin.flush().expect("flush");
    let mut line = String::new();
    reader.read_line(&mut line).expect("read");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("json");
    assert_eq!(error_code(&value), Some("bad_json"));

    writeln!(stdin, "{{not json").expect("write");
    stdin.flush().expect("flush");
    let mut line = String::new();
    reader.read_line(&mut line).expect("read");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("json");
    assert_eq!(error_code(&value), Some("bad_json"));

    let health = request(&mut stdin, &mut reader, "1", "health", json!({}));
    assert_eq!(health.get("ok").and_then(|v| v.as_bool()), Some(true));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn first_workspace_keeps_edits_made_in_memory() {
    let workspace = temp_dir("degreetrack-late-workspace");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let set = request(
        &mut stdin,
        &mut reader,
        "1",
        "course.setStatus",
        json!({ "path": "majors.0.sections.0.items.0", "status": "taken" }),
    );
    let before = overall(&set);
    assert!(before > 0.0);

    let _ = request(
        &mut stdin,
        &mut reader,
        "2",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let snap = request(&mut stdin, &mut reader, "3", "snapshot.get", json!({}));
    assert_eq!(overall(&snap), before);
    drop(stdin);
    let _ = child.wait();

    // The seeded store carries the edit into the next session.
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let snap = request(&mut stdin, &mut reader, "2", "snapshot.get", json!({}));
    assert_eq!(
        snap.pointer("/result/snapshot/majors/0/sections/0/items/0/status")
            .and_then(|v| v.as_str()),
        Some("taken")
    );
    drop(stdin);
    let _ = child.wait();
}

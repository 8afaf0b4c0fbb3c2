use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn fixture_path(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(rel)
}

fn spawn_sidecar(envs: &[(&str, &str)]) -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_lmsimportd");
    let mut cmd = Command::new(exe);
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .env_remove("LMSIMPORTD_RULES")
        .env_remove("LMSIMPORTD_MAX_ROWS");
    for (k, v) in envs {
        cmd.env(k, v);
    }
    let mut child = cmd.spawn().expect("spawn lmsimportd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn read_response(reader: &mut BufReader<ChildStdout>) -> serde_json::Value {
    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response");
    serde_json::from_str(line.trim()).expect("parse response json")
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

    let value = read_response(reader);
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn result(value: &serde_json::Value) -> &serde_json::Value {
    assert_eq!(
        value.get("ok").and_then(|v| v.as_bool()),
        Some(true),
        "expected ok response, got {}",
        value
    );
    value.get("result").expect("result")
}

fn error_code(value: &serde_json::Value) -> &str {
    assert_eq!(value.get("ok").and_then(|v| v.as_bool()), Some(false));
    value
        .get("error")
        .and_then(|e| e.get("code"))
        .and_then(|v| v.as_str())
        .unwrap_or("unknown")
}

fn shutdown(mut child: Child, stdin: ChildStdin) {
    drop(stdin);
    let status = child.wait().expect("wait sidecar");
    assert!(status.success());
}

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let (child, mut stdin, mut reader) = spawn_sidecar(&[]);

    let health = request(&mut stdin, &mut reader, "1", "health", json!({}));
    let health = result(&health);
    assert_eq!(
        health.get("version").and_then(|v| v.as_str()),
        Some(env!("CARGO_PKG_VERSION"))
    );
    assert!(health["rulesPath"].is_null());
    assert_eq!(health["maxRows"].as_u64(), Some(5000));
    assert!(health["rules"]["headers"].as_u64().unwrap_or(0) > 50);

    let mapped = request(
        &mut stdin,
        &mut reader,
        "2",
        "import.mapHeaders",
        json!({ "headers": ["No", " nama  lengkap ", "TTL", "Hobi", null] }),
    );
    let headers = result(&mapped)["headers"].as_array().expect("headers").clone();
    let statuses: Vec<&str> = headers
        .iter()
        .map(|h| h["status"].as_str().unwrap_or(""))
        .collect();
    assert_eq!(
        statuses,
        vec!["ignored", "mapped", "mapped", "unmapped", "unmapped"]
    );
    assert_eq!(headers[1]["target"], "__fullName");
    assert_eq!(headers[2]["target"], "__placeAndDateOfBirth");
    assert!(headers[3].get("target").is_none());

    let cases = [
        ("date", json!("07-Sep-25"), json!("2025-09-07")),
        ("date", json!(45677), json!("2025-01-20")),
        ("phone", json!(81234567890u64), json!("081234567890")),
        ("gender", json!("Laki-laki"), json!("male")),
        ("education", json!(""), json!("Unknown")),
        (
            "educationOrOccupation",
            json!("GURU"),
            json!({ "education": "Unknown", "occupation": "Teacher" }),
        ),
        (
            "fullName",
            json!("ahmad budi santoso wijaya"),
            json!({ "firstName": "Ahmad", "middleName": "Budi Santoso", "lastName": "Wijaya" }),
        ),
        (
            "placeAndDateOfBirth",
            json!("Kupang, 07-Sep-2001"),
            json!({ "placeOfBirth": "Kupang", "dateOfBirth": "2001-09-07" }),
        ),
        ("name", json!("  sri   WAHYUNI "), json!("Sri Wahyuni")),
    ];
    for (i, (kind, value, expected)) in cases.iter().enumerate() {
        let resp = request(
            &mut stdin,
            &mut reader,
            &format!("n{i}"),
            "import.normalize",
            json!({ "kind": kind, "value": value }),
        );
        assert_eq!(&result(&resp)["value"], expected, "kind {kind}");
    }

    let bad_kind = request(
        &mut stdin,
        &mut reader,
        "3",
        "import.normalize",
        json!({ "kind": "shoeSize", "value": "42" }),
    );
    assert_eq!(error_code(&bad_kind), "bad_params");

    let transformed = request(
        &mut stdin,
        &mut reader,
        "4",
        "import.transformRows",
        json!({
            "firstRow": 2,
            "rows": [
                { "Nama": "budi santoso", "No HP": 81234567890u64, "Tgl Lahir": 36892 },
                { "Nama": "", "No HP": null },
                { "Nama": "", "Jenis Kelamin": "lainnya" }
            ]
        }),
    );
    let report = result(&transformed);
    let records = report["records"].as_array().expect("records");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["row"], 2);
    assert_eq!(records[0]["record"]["firstName"], "Budi");
    assert_eq!(records[0]["record"]["phone"], "081234567890");
    assert_eq!(records[0]["record"]["dateOfBirth"], "2001-01-01");
    assert_eq!(records[0]["record"]["education"], "Unknown");
    assert_eq!(records[1]["row"], 4);
    let codes: Vec<&str> = records[1]["warnings"]
        .as_array()
        .expect("warnings")
        .iter()
        .map(|w| w["code"].as_str().unwrap_or(""))
        .collect();
    assert_eq!(codes, vec!["missing_name", "unrecognized_gender"]);
    assert_eq!(report["skippedBlankRows"], 1);
    assert_eq!(report["warningCount"], 2);

    let bad_rows = request(
        &mut stdin,
        &mut reader,
        "5",
        "import.transformRows",
        json!({ "rows": ["not an object"] }),
    );
    assert_eq!(error_code(&bad_rows), "bad_params");

    let huge_first_row = request(
        &mut stdin,
        &mut reader,
        "5b",
        "import.transformRows",
        json!({ "firstRow": u64::MAX, "rows": [{ "Nama": "a" }, { "Nama": "b" }] }),
    );
    assert_eq!(error_code(&huge_first_row), "bad_params");

    let negative_first_row = request(
        &mut stdin,
        &mut reader,
        "5c",
        "import.transformRows",
        json!({ "firstRow": -3, "rows": [{ "Nama": "a" }] }),
    );
    assert_eq!(error_code(&negative_first_row), "bad_params");

    // Still serving after the rejected numbering.
    let last_row = request(
        &mut stdin,
        &mut reader,
        "5d",
        "import.transformRows",
        json!({ "firstRow": u64::MAX - 1, "rows": [{ "Nama": "a" }] }),
    );
    assert_eq!(
        result(&last_row)["records"][0]["row"].as_u64(),
        Some(u64::MAX - 1)
    );

    let unknown = request(&mut stdin, &mut reader, "6", "students.list", json!({}));
    assert_eq!(error_code(&unknown), "not_implemented");

    writeln!(stdin, "this is not json").expect("write garbage");
    stdin.flush().expect("flush garbage");
    let garbage = read_response(&mut reader);
    assert!(garbage.get("id").is_none());
    assert_eq!(error_code(&garbage), "bad_json");

    // The sidecar keeps serving after a bad line.
    let again = request(&mut stdin, &mut reader, "7", "health", json!({}));
    result(&again);

    shutdown(child, stdin);
}

#[test]
fn preview_file_reads_csv_below_title_rows() {
    let (child, mut stdin, mut reader) = spawn_sidecar(&[]);
    let sample = fixture_path("fixtures/students_sample.csv");

    let preview = request(
        &mut stdin,
        &mut reader,
        "1",
        "import.previewFile",
        json!({ "path": sample.to_string_lossy() }),
    );
    let preview = result(&preview);
    assert_eq!(preview["sheet"], "students_sample");
    assert_eq!(preview["headerRow"], 3);
    assert_eq!(preview["totalRows"], 4);
    assert_eq!(preview["truncated"], false);
    assert_eq!(preview["skippedBlankRows"], 1);
    assert_eq!(preview["headers"][0]["status"], "ignored");
    assert_eq!(preview["headers"][8]["status"], "ignored");

    let records = preview["records"].as_array().expect("records");
    assert_eq!(records.len(), 3);

    let budi = &records[0]["record"];
    assert_eq!(records[0]["row"], 4);
    assert_eq!(budi["registrationDate"], "2025-01-20");
    assert_eq!(budi["firstName"], "Budi");
    assert_eq!(budi["lastName"], "Santoso");
    assert_eq!(budi["gender"], "male");
    assert_eq!(budi["placeOfBirth"], "Kupang");
    assert_eq!(budi["dateOfBirth"], "2001-09-07");
    assert_eq!(budi["phone"], "081234567890");
    assert_eq!(budi["education"], "Bachelor's Degree");
    assert_eq!(budi["occupation"], "Unknown");

    let ayu = &records[1]["record"];
    assert_eq!(ayu["middleName"], "Luh Putu");
    assert_eq!(ayu["gender"], "female");
    assert_eq!(ayu["dateOfBirth"], "2005-08-17");
    assert_eq!(ayu["address"], "Jl. Udayana 3");
    assert_eq!(ayu["phone"], "081339496117, 082147215233");
    assert_eq!(ayu["occupation"], "Teacher");

    let third = &records[2];
    assert_eq!(third["row"], 7);
    assert_eq!(third["record"]["placeOfBirth"], "Ende");
    assert_eq!(third["record"]["dateOfBirth"], "2003-03-01");
    assert_eq!(third["record"]["phone"], "085212345678");
    assert_eq!(third["record"]["occupation"], "University Student");
    assert_eq!(third["record"]["registrationDate"], "kemarin");
    assert_eq!(preview["warningCount"], 2);

    let limited = request(
        &mut stdin,
        &mut reader,
        "2",
        "import.previewFile",
        json!({ "path": sample.to_string_lossy(), "limit": 1 }),
    );
    let limited = result(&limited);
    assert_eq!(limited["records"].as_array().map(|r| r.len()), Some(1));
    assert_eq!(limited["truncated"], true);

    let no_header = request(
        &mut stdin,
        &mut reader,
        "3",
        "import.previewFile",
        json!({ "path": fixture_path("fixtures/students_no_header.csv").to_string_lossy() }),
    );
    assert_eq!(error_code(&no_header), "no_header_row");

    let missing = request(
        &mut stdin,
        &mut reader,
        "4",
        "import.previewFile",
        json!({ "path": fixture_path("fixtures/does_not_exist.xlsx").to_string_lossy() }),
    );
    assert_eq!(error_code(&missing), "sheet_read_failed");

    let no_path = request(&mut stdin, &mut reader, "5", "import.previewFile", json!({}));
    assert_eq!(error_code(&no_path), "bad_params");

    shutdown(child, stdin);
}

#[test]
fn rules_can_be_loaded_rejected_and_reset() {
    let (child, mut stdin, mut reader) = spawn_sidecar(&[]);
    let extra = fixture_path("fixtures/rules_extra.json");
    let extra_str = extra.to_string_lossy().to_string();

    let before = request(&mut stdin, &mut reader, "1", "rules.get", json!({}));
    let before_headers = result(&before)["summary"]["headers"]
        .as_u64()
        .expect("header count");

    let loaded = request(
        &mut stdin,
        &mut reader,
        "2",
        "rules.load",
        json!({ "path": extra_str }),
    );
    assert_eq!(
        result(&loaded)["summary"]["headers"].as_u64(),
        Some(before_headers + 3)
    );

    let got = request(&mut stdin, &mut reader, "3", "rules.get", json!({}));
    let got = result(&got);
    assert_eq!(got["rulesPath"], extra_str.as_str());
    assert_eq!(got["rules"]["headers"]["NAMA MURID"], "__fullName");
    assert!(got["rules"]["headers"]["CATATAN WALI"].is_null());
    assert_eq!(got["rules"]["gender"]["LANANG"], "male");

    let gender = request(
        &mut stdin,
        &mut reader,
        "4",
        "import.normalize",
        json!({ "kind": "gender", "value": "Wadon" }),
    );
    assert_eq!(result(&gender)["value"], "female");

    let rejected = request(
        &mut stdin,
        &mut reader,
        "5",
        "rules.load",
        json!({ "path": fixture_path("fixtures/rules_invalid.json").to_string_lossy() }),
    );
    assert_eq!(error_code(&rejected), "rules_load_failed");
    let still = request(&mut stdin, &mut reader, "6", "rules.get", json!({}));
    assert_eq!(result(&still)["rulesPath"], extra_str.as_str());

    let reset = request(&mut stdin, &mut reader, "7", "rules.reset", json!({}));
    assert_eq!(
        result(&reset)["summary"]["headers"].as_u64(),
        Some(before_headers)
    );
    let gender = request(
        &mut stdin,
        &mut reader,
        "8",
        "import.normalize",
        json!({ "kind": "gender", "value": "Wadon" }),
    );
    assert_eq!(result(&gender)["value"], "wadon");

    shutdown(child, stdin);
}

#[test]
fn environment_sets_rules_and_row_cap() {
    let extra = fixture_path("fixtures/rules_extra.json");
    let extra_str = extra.to_string_lossy().to_string();
    let (child, mut stdin, mut reader) = spawn_sidecar(&[
        ("LMSIMPORTD_RULES", extra_str.as_str()),
        ("LMSIMPORTD_MAX_ROWS", "2"),
    ]);

    let health = request(&mut stdin, &mut reader, "1", "health", json!({}));
    let health = result(&health);
    assert_eq!(health["rulesPath"], extra_str.as_str());
    assert_eq!(health["maxRows"], 2);

    let too_many = request(
        &mut stdin,
        &mut reader,
        "2",
        "import.transformRows",
        json!({ "rows": [{ "Nama": "a" }, { "Nama": "b" }, { "Nama": "c" }] }),
    );
    assert_eq!(error_code(&too_many), "too_many_rows");
    assert_eq!(too_many["error"]["details"]["maxRows"], 2);

    let ok_rows = request(
        &mut stdin,
        &mut reader,
        "3",
        "import.transformRows",
        json!({ "rows": [{ "Nama Murid": "sari dewi", "Kontak": "+6285212345678" }] }),
    );
    let record = &result(&ok_rows)["records"][0]["record"];
    assert_eq!(record["firstName"], "Sari");
    assert_eq!(record["phone"], "085212345678");

    shutdown(child, stdin);
}

#[test]
fn broken_rules_file_at_startup_keeps_builtins() {
    let invalid = fixture_path("fixtures/rules_invalid.json");
    let invalid_str = invalid.to_string_lossy().to_string();
    let (child, mut stdin, mut reader) =
        spawn_sidecar(&[("LMSIMPORTD_RULES", invalid_str.as_str())]);

    let health = request(&mut stdin, &mut reader, "1", "health", json!({}));
    assert!(result(&health)["rulesPath"].is_null());

    let gender = request(
        &mut stdin,
        &mut reader,
        "2",
        "import.normalize",
        json!({ "kind": "gender", "value": "Cowok" }),
    );
    assert_eq!(result(&gender)["value"], "male");

    shutdown(child, stdin);
}

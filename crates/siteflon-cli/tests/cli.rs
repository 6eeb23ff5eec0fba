use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

const HEADER: &str = "<!doctype HTML><html><head><link rel=\"stylesheet\" href=\"styles.css\"></head><body><div id=\"content\">";
const FOOTER: &str = "</div></body></html>";

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_siteflon"))
}

fn unique_name(name: &str) -> String {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).expect("time");
    format!(
        "siteflon_cli_{}_{}_{}_{}",
        name,
        std::process::id(),
        now.as_secs(),
        now.subsec_nanos()
    )
}

fn temp_file(name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("{}.sfl", unique_name(name)));
    fs::write(&path, contents).expect("write temp file");
    path
}

#[test]
fn render_wraps_fragment_in_shell() {
    let input = temp_file("render", "*bold*");
    let output = Command::new(bin_path())
        .args([input.to_str().expect("path")])
        .output()
        .expect("run");

    assert!(output.status.success(), "expected success exit code");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        format!("{}<strong>bold</strong>{}", HEADER, FOOTER)
    );
}

#[test]
fn raw_outputs_fragment_html() {
    let input = temp_file("raw", "# Title\nbody");
    let output = Command::new(bin_path())
        .args(["--raw", input.to_str().expect("path")])
        .output()
        .expect("run");

    assert!(output.status.success(), "expected success exit code");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "<h1> Title</h1>body");
}

#[test]
fn reads_stdin_when_no_input_given() {
    let mut child = Command::new(bin_path())
        .args(["--raw", "--preserve-newlines"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"a\nb")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait");

    assert!(output.status.success(), "expected success exit code");
    assert_eq!(String::from_utf8_lossy(&output.stdout), "a<br>b");
}

#[test]
fn latin1_input_is_compiled_byte_for_byte() {
    let input = temp_file("latin1", b"*a\xff* caf\xe9");
    let output = Command::new(bin_path())
        .args(["--raw", input.to_str().expect("path")])
        .output()
        .expect("run");

    assert!(output.status.success(), "expected success exit code");
    assert_eq!(output.stdout, b"<strong>a\xff</strong> caf\xe9".to_vec());

    let output = Command::new(bin_path())
        .args(["--diagnostics", "pretty", input.to_str().expect("path")])
        .output()
        .expect("run");
    assert!(output.status.success(), "expected success exit code");
    let mut expected = HEADER.as_bytes().to_vec();
    expected.extend_from_slice(b"<strong>a\xff</strong> caf\xe9");
    expected.extend_from_slice(FOOTER.as_bytes());
    assert_eq!(output.stdout, expected);
}

#[test]
fn custom_stylesheet_href() {
    let input = temp_file("stylesheet", "x");
    let output = Command::new(bin_path())
        .args(["--stylesheet", "/site.css", input.to_str().expect("path")])
        .output()
        .expect("run");

    assert!(output.status.success(), "expected success exit code");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("href=\"/site.css\""));
}

#[test]
fn writes_output_file_and_stylesheet() {
    let input = temp_file("outfile", "---");
    let out_dir = env::temp_dir().join(unique_name("out"));
    let out_file = out_dir.join("index.html");
    fs::create_dir_all(&out_dir).expect("create out dir");

    let output = Command::new(bin_path())
        .args([
            "--emit-css",
            out_dir.to_str().expect("path"),
            "-o",
            out_file.to_str().expect("path"),
            input.to_str().expect("path"),
        ])
        .output()
        .expect("run");

    assert!(output.status.success(), "expected success exit code");
    assert!(output.stdout.is_empty(), "expected nothing on stdout");
    let written = fs::read_to_string(&out_file).expect("read output");
    assert_eq!(written, format!("{}<hr>{}", HEADER, FOOTER));
    assert!(out_dir.join("styles.css").exists(), "expected styles.css");
    fs::remove_dir_all(&out_dir).expect("cleanup");
}

#[test]
fn malformed_link_exits_with_error() {
    let input = temp_file("abort", "*ok* @[text]notparen");
    let output = Command::new(bin_path())
        .args(["--raw", input.to_str().expect("path")])
        .output()
        .expect("run");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "expected empty fragment");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error: "), "expected one-line message");
}

#[test]
fn diagnostics_pretty_reports_error_and_exit_code() {
    let input = temp_file("pretty", "line\n![alt] img");
    let output = Command::new(bin_path())
        .args(["--diagnostics", "pretty", input.to_str().expect("path")])
        .output()
        .expect("run");

    assert!(!output.status.success(), "expected error exit code");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.starts_with("2:1 error E_IMAGE_NO_URL"),
        "unexpected stderr: {}",
        stderr
    );
}

#[test]
fn diagnostics_json_reports_warnings_and_exit_code() {
    let input = temp_file("json", "*bold\n");
    let output = Command::new(bin_path())
        .args(["--diagnostics", "json", input.to_str().expect("path")])
        .output()
        .expect("run");

    assert!(output.status.success(), "expected success exit code");
    let stderr = String::from_utf8_lossy(&output.stderr);
    let diagnostics: Value = serde_json::from_str(&stderr).expect("json diagnostics");
    let first = &diagnostics[0];
    assert_eq!(first["code"], "W_UNCLOSED");
    assert_eq!(first["severity"], "warning");
    assert_eq!(first["range"]["start"]["line"], 0);
    assert_eq!(first["range"]["start"]["character"], 0);
}

#[test]
fn diagnostics_json_is_empty_array_for_clean_input() {
    let input = temp_file("clean", "plain");
    let output = Command::new(bin_path())
        .args(["--diagnostics", "json", input.to_str().expect("path")])
        .output()
        .expect("run");

    assert!(output.status.success(), "expected success exit code");
    let stderr = String::from_utf8_lossy(&output.stderr);
    let diagnostics: Value = serde_json::from_str(&stderr).expect("json diagnostics");
    assert_eq!(diagnostics, Value::Array(Vec::new()));
}

#[test]
fn usage_errors_exit_with_two() {
    let output = Command::new(bin_path())
        .args(["--diagnostics", "yaml"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(2));

    let output = Command::new(bin_path())
        .args(["--bogus"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn missing_flag_value_names_the_flag_used() {
    let output = Command::new(bin_path())
        .args(["--output"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.starts_with("--output expects a value: OUT"),
        "unexpected stderr: {}",
        stderr
    );
}

//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gradebook() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("gradebook").unwrap();
    cmd.env_remove("GRADEBOOK_API_URL")
        .env_remove("GRADEBOOK_EMAIL")
        .env_remove("GRADEBOOK_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn preview_prints_total_and_grade() {
    gradebook()
        .args([
            "preview",
            "--assignment",
            "8",
            "--quiz",
            "12",
            "--project",
            "20",
            "--midsem",
            "18",
            "--final-exam",
            "25",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 83"))
        .stdout(predicate::str::contains("Grade: B"))
        .stdout(predicate::str::contains("Grade points: 3.0"))
        .stdout(predicate::str::contains("Status: Pass"));
}

#[test]
fn preview_rejects_out_of_range_mark() {
    gradebook()
        .args([
            "preview",
            "--assignment",
            "11",
            "--quiz",
            "0",
            "--project",
            "0",
            "--midsem",
            "0",
            "--final-exam",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("assignment"))
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_accepts_clean_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("marks.json");
    std::fs::write(
        &file,
        json!([
            {"studentId": "s1", "courseId": "CSC101", "assignment": 8, "quiz": 12,
             "project": 20, "midsem": 18, "finalExam": 25},
            {"studentId": "s2", "courseId": "CSC101", "assignment": 10, "quiz": 15,
             "project": 25, "midsem": 20, "finalExam": 30}
        ])
        .to_string(),
    )
    .unwrap();

    gradebook()
        .arg("validate")
        .arg("--marks")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 entries"))
        .stdout(predicate::str::contains("All entries valid"));
}

#[test]
fn validate_reports_every_problem() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("marks.json");
    std::fs::write(
        &file,
        json!([
            {"studentId": "s1", "courseId": "CSC101", "assignment": 11, "quiz": 12,
             "project": 20, "midsem": 18, "finalExam": 25},
            {"studentId": "s1", "courseId": "CSC101", "assignment": 10, "quiz": 15,
             "project": 25, "midsem": 20, "finalExam": 30}
        ])
        .to_string(),
    )
    .unwrap();

    gradebook()
        .arg("validate")
        .arg("--marks")
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::contains("marks[0].assignment"))
        .stdout(predicate::str::contains("Duplicate student IDs found: s1"))
        .stderr(predicate::str::contains("2 validation error(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    gradebook()
        .arg("validate")
        .arg("--marks")
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    gradebook()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created gradebook.toml"))
        .stdout(predicate::str::contains("Created marks.example.json"));

    assert!(dir.path().join("gradebook.toml").exists());

    gradebook()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--marks")
        .arg("marks.example.json")
        .assert()
        .success();
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("gradebook.toml"), "base_url = \"x\"").unwrap();

    gradebook()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    assert_eq!(
        std::fs::read_to_string(dir.path().join("gradebook.toml")).unwrap(),
        "base_url = \"x\""
    );
}

#[test]
fn export_requires_credentials() {
    gradebook()
        .args(["export", "--course", "CSC101"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--email"));
}

#[test]
fn export_rejects_unknown_format() {
    gradebook()
        .args([
            "export",
            "--course",
            "CSC101",
            "--format",
            "pdf",
            "--email",
            "ada@uni.edu",
            "--password",
            "secret",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

fn lecturer() -> serde_json::Value {
    json!({"id": "lec-1", "firstName": "Ada", "lastName": "Lovelace", "email": "ada@uni.edu"})
}

#[tokio::test(flavor = "multi_thread")]
async fn export_writes_all_reports() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"token": "tok-1", "lecturer": lecturer()},
            "message": "Login successful"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/students/course/CSC101"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [
            {"id": "s1", "matricNumber": "CSC/001", "firstName": "Jane", "lastName": "Doe",
             "email": "jane@uni.edu", "courseId": "CSC101"},
            {"id": "s2", "matricNumber": "CSC/002", "firstName": "John", "lastName": "Roe",
             "email": "john@uni.edu", "courseId": "CSC101"}
        ]})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/marks/course/CSC101"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [
            {"id": "m1", "studentId": "s1", "courseId": "CSC101", "assignment": 8,
             "quiz": 12, "project": 20, "midsem": 18, "finalExam": 25,
             "totalScore": 1, "grade": "F"}
        ]})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("exports");

    gradebook()
        .env("GRADEBOOK_API_URL", server.uri())
        .env("GRADEBOOK_EMAIL", "ada@uni.edu")
        .env("GRADEBOOK_PASSWORD", "secret")
        .current_dir(dir.path())
        .args(["export", "--course", "CSC101", "--course-name", "CSC 101"])
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("2 students, 1 with marks"));

    let files: Vec<String> = std::fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files.len(), 3);
    assert!(files.iter().any(|f| f.starts_with("CSC_101_marks_") && f.ends_with(".csv")));
    assert!(files.iter().any(|f| f.starts_with("CSC_101_statistics_") && f.ends_with(".csv")));
    assert!(files.iter().any(|f| f.starts_with("CSC_101_report_") && f.ends_with(".html")));

    let marks_file = files.iter().find(|f| f.contains("_marks_")).unwrap();
    let csv = std::fs::read_to_string(out.join(marks_file)).unwrap();
    assert!(csv.contains("CSC/001,Jane,Doe,jane@uni.edu,8,12,20,18,25,83,B,Pass"));
    assert!(csv.contains("CSC/002,John,Roe,john@uni.edu,N/A"));
}

#[tokio::test(flavor = "multi_thread")]
async fn export_surfaces_login_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid email or password"})),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    gradebook()
        .env("GRADEBOOK_API_URL", server.uri())
        .current_dir(dir.path())
        .args([
            "export",
            "--course",
            "CSC101",
            "--email",
            "ada@uni.edu",
            "--password",
            "wrong",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("login failed: Invalid email or password"));
}

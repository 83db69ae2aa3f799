//! The `gradebook init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("gradebook.toml").exists() {
        println!("gradebook.toml already exists, skipping.");
    } else {
        std::fs::write("gradebook.toml", SAMPLE_CONFIG)?;
        println!("Created gradebook.toml");
    }

    let example_path = std::path::Path::new("marks.example.json");
    if example_path.exists() {
        println!("marks.example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_MARKS)?;
        println!("Created marks.example.json");
    }

    println!("\nNext steps:");
    println!("  1. Point base_url in gradebook.toml at your backend");
    println!("  2. Run: gradebook validate --marks marks.example.json");
    println!("  3. Run: GRADEBOOK_EMAIL=... GRADEBOOK_PASSWORD=... gradebook export --course <id>");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradebook configuration

# Backend base URL. GRADEBOOK_API_URL overrides this value.
base_url = "http://localhost:5000/api"

# Per-request timeout in seconds.
timeout_secs = 30
"#;

const EXAMPLE_MARKS: &str = r#"[
  {
    "studentId": "stu-001",
    "courseId": "CSC101",
    "assignment": 8,
    "quiz": 12.5,
    "project": 20,
    "midsem": 18,
    "finalExam": 25
  },
  {
    "studentId": "stu-002",
    "courseId": "CSC101",
    "assignment": 10,
    "quiz": 15,
    "project": 24,
    "midsem": 19.5,
    "finalExam": 28
  }
]
"#;

//! The `quizpath init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("quizpath.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("data.json"), SAMPLE_DATASET)?;

    println!("\nNext steps:");
    println!("  1. Edit data.json with your own questions and modules");
    println!("  2. Run: quizpath validate");
    println!("  3. Run: quizpath take");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizpath configuration

# Dataset location: a local path or an http(s) URL.
# ${VAR} references are expanded; QUIZPATH_DATASET overrides this value.
dataset = "data.json"

# Fetch attempts before giving up, and the backoff base in milliseconds.
max_attempts = 5
retry_base_delay_ms = 100

output_dir = "./quizpath-results"
"#;

const SAMPLE_DATASET: &str = include_str!("../../../../datasets/sample.json");

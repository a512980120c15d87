pub mod formatter;

pub use formatter::{
    format_graph_dot, format_ranked_table, format_score, format_task_detail, format_tsv,
    should_use_colors, truncate_title,
};

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Serialize a report as pretty JSON.
pub fn to_json<T: Serialize>(report: &T) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report")
}

/// Write text to a file atomically
///
/// Uses atomic-write-file so a reader never sees a half-written report.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    if !content.ends_with('\n') {
        file.write_all(b"\n")
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_write_output_creates_file() {
        let path = env::temp_dir().join("taskrank_test_output.json");
        let _ = fs::remove_file(&path);

        write_output(&path, "{\"total_tasks\": 1}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"total_tasks\": 1}\n");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_write_output_replaces_existing() {
        let path = env::temp_dir().join("taskrank_test_output_replace.txt");
        fs::write(&path, "old content that is longer").unwrap();

        write_output(&path, "new\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_to_json_pretty() {
        #[derive(Serialize)]
        struct Sample {
            total: usize,
        }
        let json = to_json(&Sample { total: 2 }).unwrap();
        assert_eq!(json, "{\n  \"total\": 2\n}");
    }
}

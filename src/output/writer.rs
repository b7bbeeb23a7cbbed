//! Output artifact writer
//!
//! Appends extracted records to the aggregated text artifact. Each record is
//! composed fully in memory and written with a single `write_all`, so a
//! record either lands whole or (on I/O failure) leaves previously written
//! records untouched. Concurrent callers serialize through the mutex the
//! coordinator wraps around this writer.

use crate::config::OutputConfig;
use crate::crawler::ExtractedContent;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Writer for the aggregated crawl artifact
pub struct ArtifactWriter {
    file: File,
    rule: String,
}

impl ArtifactWriter {
    /// Opens the artifact for a new run
    ///
    /// The file is truncated unless `config.append` opts into accumulating
    /// across runs.
    pub fn create(config: &OutputConfig) -> std::io::Result<Self> {
        let path = Path::new(&config.artifact_path);

        let file = if config.append {
            OpenOptions::new().create(true).append(true).open(path)?
        } else {
            File::create(path)?
        };

        let rule = config
            .rule_char
            .to_string()
            .repeat(config.rule_width);

        Ok(Self { file, rule })
    }

    /// Appends one record to the artifact as a single logical unit
    ///
    /// Record layout: rule line, title line, URL line, rule line, blank line,
    /// body, blank line.
    pub fn append(&mut self, record: &ExtractedContent) -> std::io::Result<()> {
        let mut buf = String::with_capacity(record.body.len() + record.title.len() + 256);

        buf.push('\n');
        buf.push_str(&self.rule);
        buf.push('\n');
        buf.push_str("TITLE: ");
        buf.push_str(&record.title);
        buf.push('\n');
        buf.push_str("URL: ");
        buf.push_str(&record.source_url);
        buf.push('\n');
        buf.push_str(&self.rule);
        buf.push_str("\n\n");
        buf.push_str(&record.body);
        buf.push_str("\n\n");

        self.file.write_all(buf.as_bytes())?;
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_output_config(path: &Path, append: bool) -> OutputConfig {
        OutputConfig {
            artifact_path: path.to_string_lossy().to_string(),
            rule_char: '-',
            rule_width: 20,
            append,
        }
    }

    fn sample_record(url: &str) -> ExtractedContent {
        ExtractedContent {
            title: "Sample".to_string(),
            body: "Body text.".to_string(),
            source_url: url.to_string(),
        }
    }

    #[test]
    fn test_record_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("artifact.txt");
        let config = test_output_config(&path, false);

        let mut writer = ArtifactWriter::create(&config).unwrap();
        writer.append(&sample_record("https://example.com/a")).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let rule = "-".repeat(20);
        let expected = format!(
            "\n{rule}\nTITLE: Sample\nURL: https://example.com/a\n{rule}\n\nBody text.\n\n"
        );
        assert_eq!(written, expected);
    }

    #[test]
    fn test_truncates_by_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("artifact.txt");
        std::fs::write(&path, "stale content").unwrap();

        let config = test_output_config(&path, false);
        let _writer = ArtifactWriter::create(&config).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.is_empty());
    }

    #[test]
    fn test_append_mode_preserves_existing_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("artifact.txt");

        let config = test_output_config(&path, false);
        let mut writer = ArtifactWriter::create(&config).unwrap();
        writer.append(&sample_record("https://example.com/a")).unwrap();
        drop(writer);

        let config = test_output_config(&path, true);
        let mut writer = ArtifactWriter::create(&config).unwrap();
        writer.append(&sample_record("https://example.com/b")).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("URL: https://example.com/a"));
        assert!(written.contains("URL: https://example.com/b"));
    }

    #[test]
    fn test_multiple_records_do_not_interleave() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("artifact.txt");
        let config = test_output_config(&path, false);

        let mut writer = ArtifactWriter::create(&config).unwrap();
        for i in 0..5 {
            writer
                .append(&sample_record(&format!("https://example.com/{}", i)))
                .unwrap();
        }

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.matches("TITLE: Sample").count(), 5);
        assert_eq!(written.matches(&"-".repeat(20)).count(), 10);
    }
}

use crate::error::{Result, RiasecError};
use crate::report::{self, OutputFormat};
use crate::types::report::ReportDocument;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Renders `document` and writes it under `dir`, returning the new file path.
pub fn write_report(
    dir: &Path,
    document: &ReportDocument,
    format: OutputFormat,
    stamp: DateTime<Utc>,
) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(RiasecError::Io)?;
    let subject = document
        .subject
        .as_ref()
        .map(|subject| sanitize(&subject.id))
        .unwrap_or_else(|| "anonymous".to_string());
    let file_stamp = stamp.format("%Y%m%dT%H%M%SZ");
    let out_path = dir.join(format!(
        "report-{subject}-{file_stamp}.{}",
        format.extension()
    ));
    let rendered = report::render(document, format)?;
    fs::write(&out_path, rendered).map_err(RiasecError::Io)?;
    tracing::info!(path = %out_path.display(), "exported report");
    Ok(out_path)
}

fn sanitize(id: &str) -> String {
    let cleaned: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "anonymous".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_document;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn write_report_names_file_after_student_and_stamp() {
        let dir = TempDir::new().expect("temp dir should be created");
        let stamp = Utc
            .with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
            .single()
            .expect("valid timestamp");

        let path = write_report(
            &dir.path().join("reports"),
            &sample_document(),
            OutputFormat::Md,
            stamp,
        )
        .expect("export should succeed");

        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some("report-STU-002-20240301T093000Z.md")
        );
        let written = fs::read_to_string(&path).expect("export should be readable");
        assert!(written.contains("## Top Themes"));
    }

    #[test]
    fn sanitize_replaces_path_characters() {
        assert_eq!(sanitize("../etc/passwd"), "___etc_passwd");
        assert_eq!(sanitize(""), "anonymous");
    }

    #[test]
    fn anonymous_documents_get_placeholder_name() {
        let dir = TempDir::new().expect("temp dir should be created");
        let mut document = sample_document();
        document.subject = None;
        let path = write_report(dir.path(), &document, OutputFormat::Json, Utc::now())
            .expect("export should succeed");
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .expect("file name");
        assert!(name.starts_with("report-anonymous-"));
        assert!(name.ends_with(".json"));
    }
}

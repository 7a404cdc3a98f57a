use crate::error::{Result, RiasecError};
use crate::types::answers::AnswerSet;
use crate::types::report::Subject;
use crate::types::student::Student;
use serde_json::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One answer document found on disk.
#[derive(Debug, Clone)]
pub struct AnswerFile {
    pub path: PathBuf,
    pub label: String,
    pub subject: Option<Subject>,
    pub answers: AnswerSet,
}

/// Lists `*.json` files under `root`, or `root` itself when it is a file.
pub fn discover(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(RiasecError::PathNotFound(root.display().to_string()));
    }
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}

pub fn read_answer_file(path: &Path, prefix: &str) -> Result<AnswerFile> {
    let content = std::fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&content)?;
    let label = document
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string())
        });

    // Full student records carry their own identity.
    let subject = if document.get("id").is_some() {
        match serde_json::from_value::<Student>(document.clone()) {
            Ok(student) => Some(student.subject()),
            Err(err) => {
                tracing::debug!(
                    path = %path.display(),
                    error = %err,
                    "answer file has an id but is not a student record"
                );
                None
            }
        }
    } else {
        None
    };

    Ok(AnswerFile {
        path: path.to_path_buf(),
        label,
        subject,
        answers: AnswerSet::from_document(&document, prefix),
    })
}

pub fn load_answer_files(root: &Path, prefix: &str) -> Result<Vec<AnswerFile>> {
    discover(root)?
        .iter()
        .map(|path| read_answer_file(path, prefix))
        .collect()
}

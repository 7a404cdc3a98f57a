use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiasecError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid scoring content: {0}")]
    ContentInvalid(String),

    #[error("student not found: {0}")]
    StudentNotFound(String),

    #[error("student already exists: {0}")]
    DuplicateStudent(String),

    #[error("assessment not completed for student: {0}")]
    AssessmentIncomplete(String),

    #[error("telemetry error: {0}")]
    Telemetry(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RiasecError>;

use crate::error::RiasecError;
use crate::types::answers::DEFAULT_KEY_PREFIX;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RiasecConfig {
    pub questionnaire: Option<QuestionnaireConfig>,
    pub store: Option<StoreConfig>,
    pub report: Option<ReportConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionnaireConfig {
    pub key_prefix: Option<String>,
    pub content_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub path: Option<PathBuf>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub format: Option<String>,
    pub export_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

pub const DEFAULT_STORE_FILE: &str = "students.json";
pub const DEFAULT_EXPORT_DIR: &str = "reports";
pub const DEFAULT_PAGE_SIZE: usize = 7;
pub const DEFAULT_LOG_LEVEL: &str = "warn";
const REPORT_FORMATS: [&str; 3] = ["md", "json", "text"];

impl RiasecConfig {
    pub fn key_prefix(&self) -> &str {
        self.questionnaire
            .as_ref()
            .and_then(|questionnaire| questionnaire.key_prefix.as_deref())
            .unwrap_or(DEFAULT_KEY_PREFIX)
    }

    pub fn content_file(&self) -> Option<&PathBuf> {
        self.questionnaire
            .as_ref()
            .and_then(|questionnaire| questionnaire.content_file.as_ref())
    }

    pub fn store_path(&self) -> PathBuf {
        self.store
            .as_ref()
            .and_then(|store| store.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE))
    }

    pub fn page_size(&self) -> usize {
        self.store
            .as_ref()
            .and_then(|store| store.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn report_format(&self) -> Option<&str> {
        self.report
            .as_ref()
            .and_then(|report| report.format.as_deref())
    }

    pub fn export_dir(&self) -> PathBuf {
        self.report
            .as_ref()
            .and_then(|report| report.export_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR))
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|logging| logging.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn validate(&self) -> Result<(), RiasecError> {
        if self.key_prefix().trim().is_empty() {
            return Err(RiasecError::ConfigParse(
                "questionnaire.key_prefix must not be empty".to_string(),
            ));
        }

        if let Some(page_size) = self.store.as_ref().and_then(|store| store.page_size) {
            if page_size == 0 {
                return Err(RiasecError::ConfigParse(
                    "store.page_size must be greater than 0".to_string(),
                ));
            }
        }

        if let Some(format) = self.report_format() {
            if !REPORT_FORMATS.contains(&format) {
                return Err(RiasecError::ConfigParse(format!(
                    "unsupported report.format: {format} (expected one of {})",
                    REPORT_FORMATS.join(", ")
                )));
            }
        }

        Ok(())
    }
}

pub mod json;
pub mod md;
pub mod text;

use crate::error::RiasecError;
use crate::types::report::ReportDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Md,
    Text,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "json" => Some(Self::Json),
            "md" => Some(Self::Md),
            "text" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Md => "md",
            Self::Text => "txt",
        }
    }
}

pub fn render(document: &ReportDocument, format: OutputFormat) -> Result<String, RiasecError> {
    match format {
        OutputFormat::Json => json::to_json(document).map_err(RiasecError::Json),
        OutputFormat::Md => Ok(md::to_markdown(document)),
        OutputFormat::Text => Ok(text::to_text(document)),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::content::ScoringContent;
    use crate::engine::ScoringEngine;
    use crate::types::answers::{AnswerSet, DEFAULT_KEY_PREFIX};
    use crate::types::report::{ReportDocument, Subject};
    use chrono::NaiveDate;

    /// Artistic-leaning answers: 5 for Artistic, 4 for Social, 2 elsewhere.
    pub(crate) fn sample_document() -> ReportDocument {
        let content = ScoringContent::builtin().expect("builtin content should load");
        let engine = ScoringEngine::new(content, DEFAULT_KEY_PREFIX);
        let artistic = [3, 6, 15, 19, 24, 26, 33, 36, 38, 43, 48];
        let social = [2, 7, 10, 20, 27, 29, 39, 44, 49];
        let answers: AnswerSet = (1..=50u32)
            .map(|ordinal| {
                let value = if artistic.contains(&ordinal) {
                    "5"
                } else if social.contains(&ordinal) {
                    "4"
                } else {
                    "2"
                };
                (format!("q_{ordinal}"), value)
            })
            .collect();

        let subject = Subject {
            id: "STU-002".to_string(),
            name: "Priya Patel".to_string(),
            school_name: "Delhi Public School".to_string(),
            grade: "Class 11".to_string(),
        };
        let generated_on = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
        engine.document(Some(subject), &answers, generated_on)
    }
}

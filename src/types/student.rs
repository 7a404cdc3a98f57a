use crate::types::answers::AnswerSet;
use crate::types::report::Subject;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StudentStatus {
    #[default]
    Registered,
    Completed,
    Other(String),
}

impl StudentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Registered => "REGISTERED",
            Self::Completed => "COMPLETED",
            Self::Other(status) => status.as_str(),
        }
    }
}

impl From<String> for StudentStatus {
    fn from(value: String) -> Self {
        let normalized = value.trim().to_uppercase();
        match normalized.as_str() {
            "" | "REGISTERED" => Self::Registered,
            "COMPLETED" => Self::Completed,
            _ => Self::Other(normalized),
        }
    }
}

impl From<StudentStatus> for String {
    fn from(value: StudentStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_name() -> String {
    "Unknown".to_string()
}

fn default_school() -> String {
    "Unknown School".to_string()
}

fn default_grade() -> String {
    "N/A".to_string()
}

/// A student record as kept in the record store.
///
/// Field aliases accept documents exported from the previous admin
/// dashboard (`school`, `studentClass`, `lastAssessmentDate`). Unknown
/// fields, including flat `q_N` answers, are preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_school", alias = "school", alias = "schoolName")]
    pub school_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_grade", alias = "studentClass")]
    pub grade: String,
    #[serde(default)]
    pub status: StudentStatus,
    #[serde(
        default,
        alias = "lastAssessmentDate",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_assessment_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "AnswerSet::is_empty")]
    pub answers: AnswerSet,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Student {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            school_name: default_school(),
            email: String::new(),
            grade: default_grade(),
            status: StudentStatus::Registered,
            last_assessment_date: None,
            answers: AnswerSet::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == StudentStatus::Completed
    }

    /// Flat `<prefix>N` fields first, then the nested `answers` object.
    pub fn answer_set(&self, prefix: &str) -> AnswerSet {
        let mut answers: AnswerSet = self
            .extra
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        answers.merge(self.answers.clone());
        answers
    }

    pub fn matches(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.school_name.to_lowercase().contains(&needle)
            || self.email.to_lowercase().contains(&needle)
    }

    pub fn subject(&self) -> Subject {
        Subject {
            id: self.id.clone(),
            name: self.name.clone(),
            school_name: self.school_name.clone(),
            grade: self.grade.clone(),
        }
    }
}

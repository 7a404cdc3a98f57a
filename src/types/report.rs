use crate::types::category::Category;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Upper bound of the normalized score scale.
pub const MAX_SCORE: f64 = 50.0;

/// Static reference content describing one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProfile {
    pub code: Category,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub majors: Vec<String>,
    #[serde(default)]
    pub pathways: Vec<String>,
    #[serde(default)]
    pub interests: String,
    #[serde(default)]
    pub activities: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub values: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedScore {
    pub code: Category,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub scores: BTreeMap<Category, f64>,
    pub sorted_scores: Vec<RankedScore>,
    pub interest_code: Vec<Category>,
    pub details: BTreeMap<Category, CategoryProfile>,
}

impl Report {
    pub fn score(&self, category: Category) -> f64 {
        self.scores.get(&category).copied().unwrap_or(0.0)
    }

    pub fn interest_code_string(&self) -> String {
        self.interest_code.iter().map(|c| c.code()).collect()
    }

    pub fn primary(&self) -> Option<&CategoryProfile> {
        self.interest_code
            .first()
            .and_then(|category| self.details.get(category))
    }

    pub fn is_top(&self, category: Category) -> bool {
        self.interest_code.contains(&category)
    }
}

/// How much of the questionnaire an answer set actually covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerCoverage {
    pub total: usize,
    pub answered: usize,
    pub unanswered: usize,
    pub invalid: usize,
}

impl AnswerCoverage {
    pub fn is_complete(&self) -> bool {
        self.answered == self.total
    }
}

/// Who a rendered report is about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub school_name: String,
    pub grade: String,
}

/// Everything a renderer needs; renderers never rescore.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub subject: Option<Subject>,
    pub generated_on: NaiveDate,
    pub content_version: String,
    pub content_fingerprint: String,
    pub coverage: AnswerCoverage,
    pub report: Report,
}

impl ReportDocument {
    pub fn title(&self) -> String {
        match &self.subject {
            Some(subject) => format!("Career Interest Report: {}", subject.name),
            None => "Career Interest Report".to_string(),
        }
    }
}

pub fn score_percentage(score: f64) -> u32 {
    ((score / MAX_SCORE) * 100.0).round().clamp(0.0, 100.0) as u32
}

pub fn rank_label(index: usize) -> &'static str {
    match index {
        0 => "Primary",
        1 => "Secondary",
        _ => "Tertiary",
    }
}

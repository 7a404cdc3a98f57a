//! Question map and category reference content.
//!
//! Both tables are loaded once, validated eagerly, and treated as read-only
//! afterwards. An incomplete table is a deployment defect and surfaces as
//! [`RiasecError::ContentInvalid`] before any scoring happens.

use crate::error::{Result, RiasecError};
use crate::types::category::Category;
use crate::types::config::RiasecConfig;
use crate::types::report::CategoryProfile;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;

pub const BUILTIN_CONTENT: &str = include_str!("../../assets/riasec.toml");

#[derive(Debug, Deserialize)]
struct ContentFile {
    version: String,
    questions: BTreeMap<String, String>,
    categories: BTreeMap<String, ProfileEntry>,
}

#[derive(Debug, Deserialize)]
struct ProfileEntry {
    name: String,
    description: String,
    #[serde(default)]
    majors: Vec<String>,
    #[serde(default)]
    pathways: Vec<String>,
    #[serde(default)]
    interests: String,
    #[serde(default)]
    activities: String,
    #[serde(default)]
    skills: String,
    #[serde(default)]
    values: String,
}

/// Complete mapping from question ordinal `1..=N` to its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionMap {
    categories: Vec<Category>,
}

impl QuestionMap {
    pub fn from_entries(entries: BTreeMap<u32, Category>) -> Result<Self> {
        if entries.is_empty() {
            return Err(RiasecError::ContentInvalid(
                "question map has no questions".to_string(),
            ));
        }

        let mut categories = Vec::with_capacity(entries.len());
        for (expected, (ordinal, category)) in (1u32..).zip(entries) {
            if ordinal != expected {
                return Err(RiasecError::ContentInvalid(format!(
                    "question map is incomplete: expected question {expected}, found {ordinal}"
                )));
            }
            categories.push(category);
        }

        Ok(Self { categories })
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, Category)> + '_ {
        (1u32..).zip(self.categories.iter().copied())
    }

    pub fn question_count(&self, category: Category) -> usize {
        self.categories.iter().filter(|c| **c == category).count()
    }
}

#[derive(Serialize)]
struct CanonicalContent<'a> {
    version: &'a str,
    questions: &'a QuestionMap,
    profiles: &'a BTreeMap<Category, CategoryProfile>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringContent {
    version: String,
    fingerprint: String,
    questions: QuestionMap,
    profiles: BTreeMap<Category, CategoryProfile>,
}

impl ScoringContent {
    pub fn new(
        version: impl Into<String>,
        questions: QuestionMap,
        profiles: BTreeMap<Category, CategoryProfile>,
    ) -> Result<Self> {
        let version = version.into();
        validate_profiles(&profiles)?;

        for category in Category::ordered() {
            if questions.question_count(category) == 0 {
                tracing::warn!(
                    category = %category,
                    "category has no mapped questions and will always score 0"
                );
            }
        }

        let canonical = serde_json::to_vec(&CanonicalContent {
            version: &version,
            questions: &questions,
            profiles: &profiles,
        })?;
        let fingerprint = sha256_hex(&canonical);

        Ok(Self {
            version,
            fingerprint,
            questions,
            profiles,
        })
    }

    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CONTENT)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RiasecError::PathNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|err| match err {
            RiasecError::Toml(source) => {
                RiasecError::ContentInvalid(format!("{}: {}", path.display(), source))
            }
            other => other,
        })
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: ContentFile = toml::from_str(source)?;

        let mut entries = BTreeMap::new();
        for (key, code) in file.questions {
            let ordinal: u32 = key.trim().parse().map_err(|_| {
                RiasecError::ContentInvalid(format!("question key is not an ordinal: {key}"))
            })?;
            let category: Category = code.parse().map_err(|err: String| {
                RiasecError::ContentInvalid(format!("question {ordinal}: {err}"))
            })?;
            if entries.insert(ordinal, category).is_some() {
                return Err(RiasecError::ContentInvalid(format!(
                    "question {ordinal} is defined more than once"
                )));
            }
        }
        let questions = QuestionMap::from_entries(entries)?;

        let mut profiles = BTreeMap::new();
        for (key, entry) in file.categories {
            let code: Category = key.parse().map_err(RiasecError::ContentInvalid)?;
            profiles.insert(
                code,
                CategoryProfile {
                    code,
                    name: entry.name,
                    description: entry.description,
                    majors: entry.majors,
                    pathways: entry.pathways,
                    interests: entry.interests,
                    activities: entry.activities,
                    skills: entry.skills,
                    values: entry.values,
                },
            );
        }

        Self::new(file.version, questions, profiles)
    }

    /// Loads the content file named in the config (relative to `root`), or
    /// the built-in tables when none is configured.
    pub fn load(root: &Path, config: Option<&RiasecConfig>) -> Result<Self> {
        match config.and_then(|cfg| cfg.content_file()) {
            Some(path) => {
                let resolved = root.join(path);
                tracing::info!(path = %resolved.display(), "loading scoring content");
                Self::from_path(&resolved)
            }
            None => Self::builtin(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn questions(&self) -> &QuestionMap {
        &self.questions
    }

    pub fn profiles(&self) -> &BTreeMap<Category, CategoryProfile> {
        &self.profiles
    }

    pub fn empty_categories(&self) -> Vec<Category> {
        Category::ordered()
            .into_iter()
            .filter(|category| self.questions.question_count(*category) == 0)
            .collect()
    }
}

fn validate_profiles(profiles: &BTreeMap<Category, CategoryProfile>) -> Result<()> {
    let missing = Category::ordered()
        .into_iter()
        .filter(|category| !profiles.contains_key(category))
        .map(|category| category.code().to_string())
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(RiasecError::ContentInvalid(format!(
            "reference content is missing categories: {}",
            missing.join(", ")
        )));
    }

    for (category, profile) in profiles {
        if profile.code != *category {
            return Err(RiasecError::ContentInvalid(format!(
                "profile for {category} is labelled {}",
                profile.code
            )));
        }
        if profile.name.trim().is_empty() {
            return Err(RiasecError::ContentInvalid(format!(
                "profile for {category} has an empty name"
            )));
        }
    }

    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}")
}

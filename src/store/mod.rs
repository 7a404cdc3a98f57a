use crate::error::{Result, RiasecError};
use crate::types::student::Student;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct StudentQuery {
    pub search: Option<String>,
    pub page: usize,
    pub per_page: usize,
}

#[derive(Debug, Clone)]
pub struct StudentPage<'a> {
    pub items: Vec<&'a Student>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
    pub first_index: usize,
}

/// Student records persisted as a JSON array.
#[derive(Debug)]
pub struct StudentStore {
    path: PathBuf,
    students: Vec<Student>,
}

impl StudentStore {
    /// Opens the store; a missing file is an empty store.
    pub fn open(path: &Path) -> Result<Self> {
        let students = if path.exists() {
            let content = fs::read_to_string(path)?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            Vec::new()
        };
        tracing::debug!(path = %path.display(), count = students.len(), "opened student store");
        Ok(Self {
            path: path.to_path_buf(),
            students,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn list(&self, query: &StudentQuery) -> StudentPage<'_> {
        let term = query.search.as_deref().unwrap_or("");
        let filtered: Vec<&Student> = self
            .students
            .iter()
            .filter(|student| student.matches(term))
            .collect();

        let per_page = query.per_page.max(1);
        let page = query.page.max(1);
        let total = filtered.len();
        let first_index = (page - 1).saturating_mul(per_page);
        let items = filtered
            .into_iter()
            .skip(first_index)
            .take(per_page)
            .collect();

        StudentPage {
            items,
            total,
            page,
            total_pages: total.div_ceil(per_page),
            first_index,
        }
    }

    pub fn get(&self, id: &str) -> Result<&Student> {
        self.students
            .iter()
            .find(|student| student.id == id)
            .ok_or_else(|| RiasecError::StudentNotFound(id.to_string()))
    }

    pub fn completed(&self) -> impl Iterator<Item = &Student> {
        self.students.iter().filter(|student| student.is_completed())
    }

    pub fn insert(&mut self, student: Student) -> Result<()> {
        if self.students.iter().any(|existing| existing.id == student.id) {
            return Err(RiasecError::DuplicateStudent(student.id));
        }
        tracing::info!(id = %student.id, "adding student");
        self.students.push(student);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<Student> {
        let index = self
            .students
            .iter()
            .position(|student| student.id == id)
            .ok_or_else(|| RiasecError::StudentNotFound(id.to_string()))?;
        tracing::info!(id, "removing student");
        Ok(self.students.remove(index))
    }

    /// Next free `STU-NNN` id.
    pub fn next_id(&self) -> String {
        let highest = self
            .students
            .iter()
            .filter_map(|student| student.id.strip_prefix("STU-"))
            .filter_map(|number| number.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("STU-{:03}", highest + 1)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.students)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for students.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub u32);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for recruiting companies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub String);

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Student record as tracked by the placement cell.
///
/// `current_salary` is expected to be zero while `is_placed` is false. The engine tolerates
/// records that break this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    #[serde(default)]
    pub cgpa: f64,
    #[serde(default)]
    pub is_placed: bool,
    #[serde(default)]
    pub current_salary: f64,
    #[serde(default)]
    pub companies_applied: i32,
    #[serde(default)]
    pub dream_offer: f64,
    #[serde(default)]
    pub dream_company: String,
}

impl Student {
    pub fn from_draft(id: StudentId, draft: StudentDraft) -> Self {
        Self {
            id,
            name: draft.name,
            cgpa: draft.cgpa,
            is_placed: draft.is_placed,
            current_salary: draft.current_salary,
            companies_applied: draft.companies_applied,
            dream_offer: draft.dream_offer,
            dream_company: draft.dream_company,
        }
    }
}

/// Student payload without an identifier, used for create and update requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cgpa: f64,
    #[serde(default)]
    pub is_placed: bool,
    #[serde(default)]
    pub current_salary: f64,
    #[serde(default)]
    pub companies_applied: i32,
    #[serde(default)]
    pub dream_offer: f64,
    #[serde(default)]
    pub dream_company: String,
}

/// Company visiting campus with a single advertised package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub offered_salary: f64,
}

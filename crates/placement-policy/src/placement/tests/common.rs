use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::placement::domain::{Company, CompanyId, Student, StudentDraft, StudentId};
use crate::placement::eligibility::PolicyConfig;
use crate::placement::repository::{next_student_id, PlacementRepository, RepositoryError};
use crate::placement::store::PlacementStatistics;
use crate::placement::{placement_router, PlacementService};

pub(super) fn placed_student() -> Student {
    Student {
        id: StudentId(1),
        name: "Asha Verma".to_string(),
        cgpa: 8.1,
        is_placed: true,
        current_salary: 800_000.0,
        companies_applied: 2,
        dream_offer: 1_500_000.0,
        dream_company: "Globex".to_string(),
    }
}

pub(super) fn unplaced_student() -> Student {
    Student {
        id: StudentId(2),
        name: "Rohan Iyer".to_string(),
        cgpa: 6.4,
        is_placed: false,
        current_salary: 0.0,
        companies_applied: 0,
        dream_offer: 1_000_000.0,
        dream_company: "Initech".to_string(),
    }
}

pub(super) fn company(id: &str, name: &str, offered_salary: f64) -> Company {
    Company {
        id: CompanyId(id.to_string()),
        name: name.to_string(),
        offered_salary,
    }
}

pub(super) fn draft(name: &str, is_placed: bool) -> StudentDraft {
    StudentDraft {
        name: name.to_string(),
        cgpa: 7.5,
        is_placed,
        current_salary: if is_placed { 900_000.0 } else { 0.0 },
        companies_applied: 1,
        dream_offer: 1_200_000.0,
        dream_company: "Globex".to_string(),
    }
}

/// Every sub-policy disabled, then adjusted by `configure`.
pub(super) fn only(configure: impl FnOnce(&mut PolicyConfig)) -> PolicyConfig {
    let mut config = PolicyConfig::disabled();
    configure(&mut config);
    config
}

pub(super) fn statistics(total_students: usize, placed_students: usize) -> PlacementStatistics {
    PlacementStatistics {
        total_students,
        placed_students,
    }
}

pub(super) fn seeded_students() -> Vec<Student> {
    vec![
        placed_student(),
        unplaced_student(),
        Student {
            id: StudentId(3),
            name: "Meera Das".to_string(),
            cgpa: 9.2,
            is_placed: true,
            current_salary: 2_400_000.0,
            companies_applied: 1,
            dream_offer: 3_000_000.0,
            dream_company: "Umbrella".to_string(),
        },
    ]
}

pub(super) fn seeded_companies() -> Vec<Company> {
    vec![
        company("C1", "Globex", 1_000_000.0),
        company("C2", "Initech", 1_600_000.0),
        company("C3", "Umbrella", 700_000.0),
    ]
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    students: Mutex<Vec<Student>>,
    companies: Mutex<BTreeMap<CompanyId, Company>>,
}

impl MemoryRepository {
    pub(super) fn seeded() -> Self {
        Self::with(seeded_students(), seeded_companies())
    }

    pub(super) fn with(students: Vec<Student>, companies: Vec<Company>) -> Self {
        Self {
            students: Mutex::new(students),
            companies: Mutex::new(
                companies
                    .into_iter()
                    .map(|company| (company.id.clone(), company))
                    .collect(),
            ),
        }
    }
}

impl PlacementRepository for MemoryRepository {
    fn students(&self) -> Result<Vec<Student>, RepositoryError> {
        Ok(self.students.lock().expect("student mutex poisoned").clone())
    }

    fn student(&self, id: StudentId) -> Result<Option<Student>, RepositoryError> {
        let guard = self.students.lock().expect("student mutex poisoned");
        Ok(guard.iter().find(|student| student.id == id).cloned())
    }

    fn insert_student(&self, draft: StudentDraft) -> Result<Student, RepositoryError> {
        let mut guard = self.students.lock().expect("student mutex poisoned");
        let id = next_student_id(&guard).ok_or(RepositoryError::Conflict)?;
        let student = Student::from_draft(id, draft);
        guard.push(student.clone());
        Ok(student)
    }

    fn update_student(&self, student: Student) -> Result<(), RepositoryError> {
        let mut guard = self.students.lock().expect("student mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == student.id) {
            Some(existing) => {
                *existing = student;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn companies(&self) -> Result<Vec<Company>, RepositoryError> {
        let guard = self.companies.lock().expect("company mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn company(&self, id: &CompanyId) -> Result<Option<Company>, RepositoryError> {
        let guard = self.companies.lock().expect("company mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl PlacementRepository for UnavailableRepository {
    fn students(&self) -> Result<Vec<Student>, RepositoryError> {
        Ok(Vec::new())
    }

    fn student(&self, _id: StudentId) -> Result<Option<Student>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_student(&self, _draft: StudentDraft) -> Result<Student, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_student(&self, _student: Student) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn companies(&self) -> Result<Vec<Company>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn company(&self, _id: &CompanyId) -> Result<Option<Company>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service(
    config: PolicyConfig,
) -> (PlacementService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::seeded());
    let service =
        PlacementService::new(repository.clone(), config).expect("service builds from seed");
    (service, repository)
}

pub(super) fn router_with_service(service: PlacementService<MemoryRepository>) -> axum::Router {
    placement_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

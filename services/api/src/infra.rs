use metrics_exporter_prometheus::PrometheusHandle;
use placement_policy::config::DataConfig;
use placement_policy::placement::repository::next_student_id;
use placement_policy::placement::seed;
use placement_policy::placement::{
    Company, CompanyId, PlacementRepository, RepositoryError, Student, StudentDraft, StudentId,
};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPlacementRepository {
    students: Arc<Mutex<Vec<Student>>>,
    companies: Arc<Mutex<Vec<Company>>>,
}

impl InMemoryPlacementRepository {
    pub(crate) fn new(students: Vec<Student>, companies: Vec<Company>) -> Self {
        Self {
            students: Arc::new(Mutex::new(students)),
            companies: Arc::new(Mutex::new(companies)),
        }
    }

    /// Hydrate from the seed files, tolerating missing or malformed files.
    pub(crate) fn from_seed(data: &DataConfig) -> Self {
        Self::new(
            seed::load_or_empty(&data.students_path),
            seed::load_or_empty(&data.companies_path),
        )
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("in-memory store poisoned".to_string()))
}

impl PlacementRepository for InMemoryPlacementRepository {
    fn students(&self) -> Result<Vec<Student>, RepositoryError> {
        Ok(lock(&self.students)?.clone())
    }

    fn student(&self, id: StudentId) -> Result<Option<Student>, RepositoryError> {
        let guard = lock(&self.students)?;
        Ok(guard.iter().find(|student| student.id == id).cloned())
    }

    fn insert_student(&self, draft: StudentDraft) -> Result<Student, RepositoryError> {
        let mut guard = lock(&self.students)?;
        let id = next_student_id(&guard).ok_or(RepositoryError::Conflict)?;
        let student = Student::from_draft(id, draft);
        guard.push(student.clone());
        Ok(student)
    }

    fn update_student(&self, student: Student) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.students)?;
        match guard.iter_mut().find(|existing| existing.id == student.id) {
            Some(existing) => {
                *existing = student;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn companies(&self) -> Result<Vec<Company>, RepositoryError> {
        Ok(lock(&self.companies)?.clone())
    }

    fn company(&self, id: &CompanyId) -> Result<Option<Company>, RepositoryError> {
        let guard = lock(&self.companies)?;
        Ok(guard.iter().find(|company| &company.id == id).cloned())
    }
}

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use super::domain::{Company, CompanyId, Student, StudentDraft, StudentId};
use super::eligibility::{EligibilityEngine, EligibilityResult, PolicyConfig};
use super::repository::{PlacementRepository, RepositoryError};
use super::store::{PlacementStatistics, PlacementStatisticsCache, PolicyConfigStore};

/// Service composing the repository, the two shared stores, and the eligibility engine.
pub struct PlacementService<R> {
    repository: Arc<R>,
    policies: PolicyConfigStore,
    statistics: PlacementStatisticsCache,
    engine: EligibilityEngine,
    /// Serializes a population write with the statistics recompute that follows it.
    mutations: Mutex<()>,
}

impl<R> PlacementService<R>
where
    R: PlacementRepository + 'static,
{
    /// Build the service and prime the statistics cache from the current population.
    pub fn new(repository: Arc<R>, config: PolicyConfig) -> Result<Self, PlacementServiceError> {
        let students = repository.students()?;
        let statistics = PlacementStatisticsCache::new(&students);
        info!(
            students = students.len(),
            "placement service initialised with policy configuration"
        );

        Ok(Self {
            repository,
            policies: PolicyConfigStore::new(config),
            statistics,
            engine: EligibilityEngine::new(),
            mutations: Mutex::new(()),
        })
    }

    pub fn active_config(&self) -> Arc<PolicyConfig> {
        self.policies.get()
    }

    /// Replace the whole policy configuration.
    pub fn configure(&self, config: PolicyConfig) -> Arc<PolicyConfig> {
        let stored = self.policies.replace(config);
        info!(config = ?stored, "policy configuration updated");
        stored
    }

    pub fn statistics(&self) -> PlacementStatistics {
        self.statistics.get()
    }

    pub fn recompute_statistics(&self) -> Result<PlacementStatistics, PlacementServiceError> {
        let _guard = self.mutation_guard();
        self.refresh_statistics()
    }

    fn mutation_guard(&self) -> MutexGuard<'_, ()> {
        self.mutations.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Callers must hold the mutation guard.
    fn refresh_statistics(&self) -> Result<PlacementStatistics, PlacementServiceError> {
        let students = self.repository.students()?;
        Ok(self.statistics.recompute(&students))
    }

    /// Decide whether a student may apply to a company.
    pub fn evaluate(
        &self,
        student_id: StudentId,
        company_id: &CompanyId,
    ) -> Result<EligibilityResult, PlacementServiceError> {
        let student = self
            .repository
            .student(student_id)?
            .ok_or(PlacementServiceError::StudentNotFound(student_id))?;
        let company = self
            .repository
            .company(company_id)?
            .ok_or_else(|| PlacementServiceError::CompanyNotFound(company_id.clone()))?;

        let config = self.policies.get();
        let statistics = self.statistics.get();
        let result = self
            .engine
            .evaluate(&student, &company, &config, statistics);

        debug!(
            student_id = %student.id,
            company_id = %company.id,
            eligible = result.is_eligible,
            "eligibility evaluated"
        );
        Ok(result)
    }

    /// Every student eligible for the given company, judged against one snapshot pair.
    pub fn eligible_students(
        &self,
        company_id: &CompanyId,
    ) -> Result<Vec<Student>, PlacementServiceError> {
        let company = self
            .repository
            .company(company_id)?
            .ok_or_else(|| PlacementServiceError::CompanyNotFound(company_id.clone()))?;

        let config = self.policies.get();
        let statistics = self.statistics.get();

        Ok(self
            .repository
            .students()?
            .into_iter()
            .filter(|student| {
                self.engine
                    .evaluate(student, &company, &config, statistics)
                    .is_eligible
            })
            .collect())
    }

    pub fn students(&self) -> Result<Vec<Student>, PlacementServiceError> {
        Ok(self.repository.students()?)
    }

    pub fn student(&self, id: StudentId) -> Result<Student, PlacementServiceError> {
        self.repository
            .student(id)?
            .ok_or(PlacementServiceError::StudentNotFound(id))
    }

    /// Add a student and refresh the statistics before returning.
    pub fn create_student(&self, draft: StudentDraft) -> Result<Student, PlacementServiceError> {
        validate_draft(&draft)?;
        let _guard = self.mutation_guard();
        let student = self.repository.insert_student(draft)?;
        self.refresh_statistics()?;
        info!(student_id = %student.id, "student created");
        Ok(student)
    }

    /// Replace a student's attributes and refresh the statistics before returning.
    pub fn update_student(
        &self,
        id: StudentId,
        draft: StudentDraft,
    ) -> Result<Student, PlacementServiceError> {
        validate_draft(&draft)?;
        let student = Student::from_draft(id, draft);
        let _guard = self.mutation_guard();
        match self.repository.update_student(student.clone()) {
            Ok(()) => {}
            Err(RepositoryError::NotFound) => {
                return Err(PlacementServiceError::StudentNotFound(id));
            }
            Err(err) => return Err(err.into()),
        }
        self.refresh_statistics()?;
        info!(student_id = %id, "student updated");
        Ok(student)
    }

    pub fn companies(&self) -> Result<Vec<Company>, PlacementServiceError> {
        Ok(self.repository.companies()?)
    }

    pub fn company(&self, id: &CompanyId) -> Result<Company, PlacementServiceError> {
        self.repository
            .company(id)?
            .ok_or_else(|| PlacementServiceError::CompanyNotFound(id.clone()))
    }
}

fn validate_draft(draft: &StudentDraft) -> Result<(), PlacementServiceError> {
    if draft.name.trim().is_empty() {
        return Err(PlacementServiceError::InvalidStudent(
            "student name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Error raised by the placement service.
#[derive(Debug, thiserror::Error)]
pub enum PlacementServiceError {
    #[error("student {0} not found")]
    StudentNotFound(StudentId),
    #[error("company {0} not found")]
    CompanyNotFound(CompanyId),
    #[error("invalid student: {0}")]
    InvalidStudent(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

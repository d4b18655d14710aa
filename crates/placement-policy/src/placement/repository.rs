use super::domain::{Company, CompanyId, Student, StudentDraft, StudentId};

/// Storage abstraction for the student and company collections.
pub trait PlacementRepository: Send + Sync {
    fn students(&self) -> Result<Vec<Student>, RepositoryError>;
    fn student(&self, id: StudentId) -> Result<Option<Student>, RepositoryError>;
    /// Store a new student, assigning the next identifier.
    fn insert_student(&self, draft: StudentDraft) -> Result<Student, RepositoryError>;
    fn update_student(&self, student: Student) -> Result<(), RepositoryError>;
    fn companies(&self) -> Result<Vec<Company>, RepositoryError>;
    fn company(&self, id: &CompanyId) -> Result<Option<Company>, RepositoryError>;
}

/// Identifier following the highest stored student id, or 1 for an empty collection.
/// `None` once the id space is exhausted.
pub fn next_student_id(students: &[Student]) -> Option<StudentId> {
    match students.iter().map(|student| student.id.0).max() {
        Some(id) => id.checked_add(1).map(StudentId),
        None => Some(StudentId(1)),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

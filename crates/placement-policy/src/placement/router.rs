use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::domain::{CompanyId, StudentDraft, StudentId};
use super::eligibility::PolicyConfig;
use super::repository::{PlacementRepository, RepositoryError};
use super::service::{PlacementService, PlacementServiceError};

/// Request body for a single eligibility check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityCheckRequest {
    pub student_id: StudentId,
    pub company_id: CompanyId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsView {
    pub total_students: usize,
    pub placed_students: usize,
    pub placement_percentage: f64,
}

/// Router exposing policy configuration, eligibility, and population endpoints.
pub fn placement_router<R>(service: Arc<PlacementService<R>>) -> Router
where
    R: PlacementRepository + 'static,
{
    Router::new()
        .route("/policies", get(policies_handler::<R>))
        .route("/policies/configure", post(configure_handler::<R>))
        .route("/eligibility/check", post(check_handler::<R>))
        .route(
            "/students",
            get(list_students_handler::<R>).post(create_student_handler::<R>),
        )
        .route(
            "/students/:student_id",
            get(student_handler::<R>).put(update_student_handler::<R>),
        )
        .route("/companies", get(list_companies_handler::<R>))
        .route(
            "/companies/:company_id/eligible-students",
            get(eligible_students_handler::<R>),
        )
        .route("/statistics", get(statistics_handler::<R>))
        .with_state(service)
}

pub(crate) async fn policies_handler<R>(
    State(service): State<Arc<PlacementService<R>>>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    let config = service.active_config();
    (StatusCode::OK, Json(config.as_ref().clone())).into_response()
}

pub(crate) async fn configure_handler<R>(
    State(service): State<Arc<PlacementService<R>>>,
    payload: Result<Json<PolicyConfig>, JsonRejection>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    match payload {
        Ok(Json(config)) => {
            let stored = service.configure(config);
            (StatusCode::OK, Json(stored.as_ref().clone())).into_response()
        }
        Err(rejection) => {
            warn!(error = %rejection, "rejected policy configuration payload");
            bad_request(format!("invalid policy configuration: {rejection}"))
        }
    }
}

pub(crate) async fn check_handler<R>(
    State(service): State<Arc<PlacementService<R>>>,
    payload: Result<Json<EligibilityCheckRequest>, JsonRejection>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return bad_request(format!("invalid JSON format: {rejection}")),
    };

    match service.evaluate(request.student_id, &request.company_id) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_students_handler<R>(
    State(service): State<Arc<PlacementService<R>>>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    match service.students() {
        Ok(students) => (StatusCode::OK, Json(students)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn student_handler<R>(
    State(service): State<Arc<PlacementService<R>>>,
    Path(student_id): Path<String>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    let Some(id) = parse_student_id(&student_id) else {
        return bad_request("invalid student ID format in URL path".to_string());
    };

    match service.student(id) {
        Ok(student) => (StatusCode::OK, Json(student)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_student_handler<R>(
    State(service): State<Arc<PlacementService<R>>>,
    payload: Result<Json<StudentDraft>, JsonRejection>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    let draft = match payload {
        Ok(Json(draft)) => draft,
        Err(rejection) => return bad_request(format!("invalid JSON payload: {rejection}")),
    };

    match service.create_student(draft) {
        Ok(student) => (StatusCode::CREATED, Json(student)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_student_handler<R>(
    State(service): State<Arc<PlacementService<R>>>,
    Path(student_id): Path<String>,
    payload: Result<Json<StudentDraft>, JsonRejection>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    let Some(id) = parse_student_id(&student_id) else {
        return bad_request("invalid student ID format in URL path".to_string());
    };
    let draft = match payload {
        Ok(Json(draft)) => draft,
        Err(rejection) => return bad_request(format!("invalid JSON payload: {rejection}")),
    };

    match service.update_student(id, draft) {
        Ok(student) => (StatusCode::OK, Json(student)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_companies_handler<R>(
    State(service): State<Arc<PlacementService<R>>>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    match service.companies() {
        Ok(companies) => (StatusCode::OK, Json(companies)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn eligible_students_handler<R>(
    State(service): State<Arc<PlacementService<R>>>,
    Path(company_id): Path<String>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    match service.eligible_students(&CompanyId(company_id)) {
        Ok(students) => (StatusCode::OK, Json(students)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn statistics_handler<R>(
    State(service): State<Arc<PlacementService<R>>>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    let statistics = service.statistics();
    let view = StatisticsView {
        total_students: statistics.total_students,
        placed_students: statistics.placed_students,
        placement_percentage: statistics.placement_percentage(),
    };
    (StatusCode::OK, Json(view)).into_response()
}

fn parse_student_id(raw: &str) -> Option<StudentId> {
    raw.trim().parse::<u32>().ok().map(StudentId)
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

fn error_response(error: PlacementServiceError) -> Response {
    let status = match &error {
        PlacementServiceError::StudentNotFound(_)
        | PlacementServiceError::CompanyNotFound(_)
        | PlacementServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        PlacementServiceError::InvalidStudent(_) => StatusCode::BAD_REQUEST,
        PlacementServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        PlacementServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(json!({ "error": error.to_string() }))).into_response()
}

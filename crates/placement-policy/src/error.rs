use crate::config::ConfigError;
use crate::placement::{PlacementServiceError, PolicyConfigError, RepositoryError, SeedError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Seed(SeedError),
    Policy(PolicyConfigError),
    Placement(PlacementServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Seed(err) => write!(f, "seed data error: {}", err),
            AppError::Policy(err) => write!(f, "{}", err),
            AppError::Placement(err) => write!(f, "placement error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Seed(err) => Some(err),
            AppError::Policy(err) => Some(err),
            AppError::Placement(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Policy(_) | AppError::Placement(PlacementServiceError::InvalidStudent(_)) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Placement(
                PlacementServiceError::StudentNotFound(_)
                | PlacementServiceError::CompanyNotFound(_)
                | PlacementServiceError::Repository(RepositoryError::NotFound),
            ) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Seed(_)
            | AppError::Placement(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<SeedError> for AppError {
    fn from(value: SeedError) -> Self {
        Self::Seed(value)
    }
}

impl From<PolicyConfigError> for AppError {
    fn from(value: PolicyConfigError) -> Self {
        Self::Policy(value)
    }
}

impl From<PlacementServiceError> for AppError {
    fn from(value: PlacementServiceError) -> Self {
        Self::Placement(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{CompanyId, StudentId};

    #[test]
    fn not_found_errors_map_to_404() {
        let response =
            AppError::from(PlacementServiceError::StudentNotFound(StudentId(9))).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response =
            AppError::from(PlacementServiceError::CompanyNotFound(CompanyId("C9".to_string())))
                .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_configuration_maps_to_400() {
        let err = PolicyConfigError::InvalidConfiguration("expected value".to_string());
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn repository_outage_maps_to_500() {
        let err = PlacementServiceError::Repository(RepositoryError::Unavailable(
            "offline".to_string(),
        ));
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

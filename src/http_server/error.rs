use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::{Html, IntoResponse},
};
use thiserror::Error;

use crate::http_server::views;
use crate::services::ServiceError;

/// Errors a handler can return. Each kind maps to a status and an HTML page.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("page not found")]
    NotFound,

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Status a failed service call is reported with.
pub fn service_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::Integrity(_) | ServiceError::InUse { .. } => StatusCode::CONFLICT,
        ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Service(err) => service_status(err),
        }
    }
}

// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response<Body> {
        let status = self.status();
        let page = match status {
            StatusCode::NOT_FOUND => {
                log::debug!("{}", self);
                views::home::not_found()
            }
            StatusCode::CONFLICT => {
                log::warn!("{}", self);
                let message = match &self {
                    AppError::Service(ServiceError::InUse { .. }) => self.to_string(),
                    _ => "The change could not be saved.".to_string(),
                };
                views::home::conflict(&message)
            }
            _ => {
                log::error!("{:?}", self);
                views::home::server_error()
            }
        };

        (status, Html(page)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    #[test]
    fn test_status_per_error_kind() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::from(ServiceError::not_found("venue", 1)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(ServiceError::InUse {
                entity: "venue",
                id: 1,
                references: 2,
            })
            .status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(ServiceError::Integrity("fk".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(ServiceError::Database(DbErr::Custom("boom".into()))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_error_page_hides_details() {
        let response =
            AppError::from(ServiceError::Database(DbErr::Custom("secret".into()))).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
